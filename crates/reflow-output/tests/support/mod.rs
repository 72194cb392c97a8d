//! A toy brace language standing in for the upstream tokenizer and layout engine.
//!
//! Words, `; { } ( ) ,`, `//` line comments and `/* */` block comments. The layout puts one
//! statement per line, indents blocks by [`INDENT`], moves comments onto their own lines and
//! marks a boundary at every statement start.

use std::ops::Range;

use reflow_output::{
    BlankLineWish, EMPTY_SPAN, FormattedOutput, OutputBuilder, SourceInput, SourceText, Tok,
    Token, start_tok,
};

pub const INDENT: usize = 4;

const PUNCT: &[char] = &[';', '{', '}', '(', ')', ','];

pub fn lex(text: &str) -> SourceText {
    let mut tokens: Vec<Token> = Vec::new();
    let mut pending: Vec<Tok> = Vec::new();
    let mut next = 0;
    let mut at = 0;
    while let Some(ch) = text[at..].chars().next() {
        let rest = &text[at..];
        if ch.is_whitespace() {
            let len = rest
                .find(|c: char| !c.is_whitespace())
                .unwrap_or(rest.len());
            pending.push(Tok::trivia(at, &rest[..len]));
            at += len;
            continue;
        }
        if let Some(len) = comment_len(rest) {
            pending.push(Tok::real(next, at, &rest[..len]));
            next += 1;
            at += len;
            continue;
        }
        let len = if PUNCT.contains(&ch) {
            ch.len_utf8()
        } else {
            rest.char_indices()
                .skip(1)
                .find(|&(i, c)| {
                    c.is_whitespace() || PUNCT.contains(&c) || comment_len(&rest[i..]).is_some()
                })
                .map_or(rest.len(), |(i, _)| i)
        };
        tokens.push(Token {
            tok: Tok::real(next, at, &rest[..len]),
            toks_before: std::mem::take(&mut pending),
            toks_after: Vec::new(),
        });
        next += 1;
        at += len;
    }
    if let Some(last) = tokens.last_mut() {
        last.toks_after = pending;
    }
    SourceText::new(text, tokens)
}

fn comment_len(rest: &str) -> Option<usize> {
    if rest.starts_with("//") {
        let line = rest.find('\n').map_or(rest, |end| &rest[..end]);
        Some(line.trim_end().len())
    } else if rest.starts_with("/*") {
        Some(rest[2..].find("*/").map_or(rest.len(), |end| end + 4))
    } else {
        None
    }
}

pub fn layout(source: &SourceText) -> FormattedOutput<'_, SourceText> {
    layout_with(OutputBuilder::new(source))
}

pub fn layout_with(mut builder: OutputBuilder<'_, SourceText>) -> FormattedOutput<'_, SourceText> {
    let source = builder.input();
    let mut depth = 0usize;
    let mut line_open = false;
    let mut previous = "";
    for token in source.tokens() {
        let Some(k) = token.tok.index.real() else {
            continue;
        };
        let text = token.tok.text.as_str();
        if text == "}" {
            if line_open {
                builder.emit_text("\n", EMPTY_SPAN);
                line_open = false;
            }
            depth = depth.saturating_sub(1);
        }
        if !line_open && let Some(first) = start_tok(token).index.real() {
            builder.mark_boundary(first);
        }
        for comment in token.toks_before.iter().filter(|tok| tok.index.is_real()) {
            emit_comment(&mut builder, comment, depth, &mut line_open);
        }

        if !line_open {
            builder.set_indent(depth * INDENT);
        } else if !matches!(text, ";" | "," | ")") && previous != "(" {
            builder.emit_text(" ", EMPTY_SPAN);
        }
        builder.emit_text(text, k..k + 1);
        line_open = true;
        match text {
            "{" => {
                depth += 1;
                builder.record_wish(k + 1, BlankLineWish::No);
                builder.emit_text("\n", EMPTY_SPAN);
                line_open = false;
            }
            ";" => {
                builder.emit_text("\n", EMPTY_SPAN);
                line_open = false;
            }
            "}" => {
                builder.emit_text("\n", EMPTY_SPAN);
                line_open = false;
                if depth == 0 {
                    builder.force_blank_line_after_last();
                }
            }
            _ => {}
        }
        previous = text;

        for comment in token.toks_after.iter().filter(|tok| tok.index.is_real()) {
            emit_comment(&mut builder, comment, depth, &mut line_open);
        }
    }
    builder.finish()
}

fn emit_comment(
    builder: &mut OutputBuilder<'_, SourceText>,
    comment: &Tok,
    depth: usize,
    line_open: &mut bool,
) {
    let Some(k) = comment.index.real() else {
        return;
    };
    if *line_open {
        builder.emit_text("\n", EMPTY_SPAN);
    }
    let column = depth * INDENT;
    let text = builder
        .comments()
        .rewrite(comment, builder.options().max_width, column);
    builder.set_indent(column);
    builder.emit_text(&text, k..k + 1);
    builder.emit_text("\n", EMPTY_SPAN);
    *line_open = false;
}

/// Formats the whole document.
#[allow(dead_code)]
pub fn format(text: &str) -> String {
    let source = lex(text);
    layout(&source).text()
}

/// Reformats only the requested tok ranges of `text`.
#[allow(dead_code)]
pub fn format_ranges(text: &str, requests: &[Range<usize>]) -> String {
    let source = lex(text);
    layout(&source)
        .render_to_string(requests)
        .expect("partial format")
}

/// Every tok range of the document.
pub fn everything(source: &SourceText) -> Range<usize> {
    0..source.token_count()
}

/// One edit per line, as `start..end "text"`.
#[allow(dead_code)]
pub fn describe_edits(
    output: &FormattedOutput<'_, SourceText>,
    requests: &[Range<usize>],
) -> String {
    output
        .compute_replacements(requests)
        .expect("replacements")
        .iter()
        .map(|edit| format!("{:?} {:?}", edit.range(), edit.text()))
        .collect::<Vec<_>>()
        .join("\n")
}
