use std::ops::Range;

use crate::span::{EMPTY_SPAN, union};
use crate::token::Token;

/// What the output side needs to know about the original document.
///
/// Token ranges are half-open ranges of real tok indices; an empty range means no real tok.
pub trait SourceInput {
    /// The full original text.
    fn text(&self) -> &str;

    /// Number of real toks (comments included), excluding any end-of-file marker.
    fn token_count(&self) -> usize;

    /// The token owning real tok `index`. For a comment this is the token it is attached to.
    fn token(&self, index: usize) -> Option<&Token>;

    fn line_count(&self) -> usize;

    /// Real toks touching input line `line`; empty for a blank line.
    fn line_tokens(&self, line: usize) -> Range<usize>;

    /// Real toks whose last byte lies on input line `line`.
    fn line_tokens_ending(&self, line: usize) -> Range<usize>;
}

/// Line-indexed view of a tokenized document.
///
/// Lexing happens elsewhere; this only indexes the tokens it is given by byte position.
#[derive(Debug, Clone)]
pub struct SourceText {
    text: String,
    tokens: Vec<Token>,
    token_of_tok: Vec<Option<usize>>,
    line_tokens: Vec<Range<usize>>,
    line_tokens_ending: Vec<Range<usize>>,
}

impl SourceText {
    pub fn new(text: impl Into<String>, tokens: Vec<Token>) -> Self {
        let text = text.into();
        let line_starts: Vec<usize> = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(at, _)| at + 1))
            .collect();
        let line_of = |byte: usize| line_starts.partition_point(|&start| start <= byte) - 1;

        let mut token_of_tok: Vec<Option<usize>> = Vec::new();
        let mut line_tokens = vec![EMPTY_SPAN; line_starts.len()];
        let mut line_tokens_ending = vec![EMPTY_SPAN; line_starts.len()];
        for (owner, token) in tokens.iter().enumerate() {
            for tok in token.toks() {
                let Some(k) = tok.index.real() else {
                    continue;
                };
                if token_of_tok.len() <= k {
                    token_of_tok.resize(k + 1, None);
                }
                token_of_tok[k] = Some(owner);

                let first = line_of(tok.position);
                let last = line_of(tok.end().saturating_sub(1).max(tok.position));
                for line in first..=last {
                    line_tokens[line] = union(&line_tokens[line], &(k..k + 1));
                }
                line_tokens_ending[last] = union(&line_tokens_ending[last], &(k..k + 1));
            }
        }

        Self {
            text,
            tokens,
            token_of_tok,
            line_tokens,
            line_tokens_ending,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

impl SourceInput for SourceText {
    fn text(&self) -> &str {
        &self.text
    }

    fn token_count(&self) -> usize {
        self.token_of_tok.len()
    }

    fn token(&self, index: usize) -> Option<&Token> {
        let owner = (*self.token_of_tok.get(index)?)?;
        self.tokens.get(owner)
    }

    fn line_count(&self) -> usize {
        self.line_tokens.len()
    }

    fn line_tokens(&self, line: usize) -> Range<usize> {
        self.line_tokens.get(line).cloned().unwrap_or(EMPTY_SPAN)
    }

    fn line_tokens_ending(&self, line: usize) -> Range<usize> {
        self.line_tokens_ending
            .get(line)
            .cloned()
            .unwrap_or(EMPTY_SPAN)
    }
}
