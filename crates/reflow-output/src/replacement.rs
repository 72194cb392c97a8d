use std::ops::Range;

use serde::Serialize;
use tracing::debug;

use crate::error::ReconcileError;
use crate::input::SourceInput;
use crate::output::FormattedOutput;
use crate::token::{Tok, Token, end_tok, start_tok};

/// Replace the bytes `range` of the original document with `text`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Replacement {
    range: Range<usize>,
    text: String,
}

impl Replacement {
    pub fn new(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl<I: SourceInput> FormattedOutput<'_, I> {
    /// Edits that turn the original document into one where the requested tok ranges are
    /// reformatted and everything else is untouched.
    ///
    /// Requests are half-open tok ranges; they may overlap and are clipped to the stream.
    /// Each one is snapped to boundaries and then widened to whole tokens, so a comment and
    /// the token it is attached to are always replaced together. The result is sorted by start
    /// offset and its ranges never overlap.
    ///
    /// At least one boundary must have been marked; otherwise any request that survives
    /// clipping fails with [`ReconcileError::NoBoundaries`].
    pub fn compute_replacements(
        &self,
        requests: &[Range<usize>],
    ) -> Result<Vec<Replacement>, ReconcileError> {
        let ranges = self.breakable_ranges(requests)?;
        let replacements = ranges
            .iter()
            .map(|range| self.replacement_for(range.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            requests = requests.len(),
            ranges = ?ranges,
            replacements = replacements.len(),
            "planned partial format"
        );
        Ok(replacements)
    }

    /// Clips, snaps to boundaries, widens to whole tokens, and unions the requested ranges.
    fn breakable_ranges(
        &self,
        requests: &[Range<usize>],
    ) -> Result<Vec<Range<usize>>, ReconcileError> {
        let token_count = self.input.token_count();
        let mut expanded = Vec::with_capacity(requests.len());
        for request in requests {
            let clipped = request.start.min(token_count)..request.end.min(token_count);
            if clipped.is_empty() {
                continue;
            }
            let snapped = self
                .boundaries
                .expand_to_breakable(clipped, token_count)
                .ok_or(ReconcileError::NoBoundaries)?;
            if !snapped.is_empty() {
                expanded.push(self.whole_tokens(snapped)?);
            }
        }
        Ok(coalesce(expanded))
    }

    /// Widens `range` to the first and last real toks of the tokens owning its ends.
    fn whole_tokens(&self, range: Range<usize>) -> Result<Range<usize>, ReconcileError> {
        let first = start_tok(self.token(range.start)?);
        let last = end_tok(self.token(range.end - 1)?);
        let start = real_index(first, range.start)?.min(range.start);
        let end = (real_index(last, range.end - 1)? + 1).max(range.end);
        Ok(start..end)
    }

    fn replacement_for(&self, range: Range<usize>) -> Result<Replacement, ReconcileError> {
        let text = self.input.text();
        let start = start_tok(self.token(range.start)?);
        let end = end_tok(self.token(range.end - 1)?);
        let start_k = real_index(start, range.start)?;
        let end_k = real_index(end, range.end - 1)?;

        let mut replacement = String::new();
        let (replace_from, needs_break_before) = scan_back(text, start.position);
        if needs_break_before {
            replacement.push('\n');
        }

        let first_line = self
            .token_lines
            .lines_of(start_k)
            .or_else(|| self.token_lines.lines_of(end_k))
            .map_or(self.lines.len(), |lines| lines.start);
        let end_line = self
            .token_lines
            .lines_of(end_k)
            .map_or(first_line, |lines| lines.end)
            .max(first_line);
        // Trailing blank lines were never materialized, so the span may run past the output.
        let available = end_line.min(self.lines.len());
        let copied = &self.lines[first_line.min(available)..available];
        replacement.push_str(&copied.join("\n"));
        replacement.push('\n');

        let mut replace_to = end.end().min(text.len());
        if end_k + 1 == self.input.token_count() {
            // The last token owns the rest of the document, trailing whitespace included.
            replace_to = text.len();
        }
        let (replace_to, reindent) = scan_forward(text, replace_to);
        if reindent && let Some(trailing) = self.lines.get(end_line) {
            replacement.push_str(leading_whitespace(trailing));
        }

        Ok(Replacement::new(replace_from..replace_to, replacement))
    }

    fn token(&self, index: usize) -> Result<&Token, ReconcileError> {
        self.input
            .token(index)
            .ok_or(ReconcileError::UnknownToken { index })
    }
}

fn real_index(tok: &Tok, requested: usize) -> Result<usize, ReconcileError> {
    tok.index
        .real()
        .ok_or(ReconcileError::UnknownToken { index: requested })
}

/// Sorts and unions ranges; touching ranges merge.
fn coalesce(mut ranges: Vec<Range<usize>>) -> Vec<Range<usize>> {
    ranges.sort_unstable_by_key(|range| range.start);
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    merged
}

/// Start offset of an edit beginning at `position`.
///
/// Whitespace back to the start of the line joins the edit. If code precedes the token on its
/// line, the edit starts at `position` and must open with a line break.
fn scan_back(text: &str, position: usize) -> (usize, bool) {
    let before = text.get(..position).unwrap_or_default();
    let mut from = position;
    for ch in before.chars().rev() {
        if ch == '\n' {
            break;
        }
        if !ch.is_whitespace() {
            return (position, true);
        }
        from -= ch.len_utf8();
    }
    (from, false)
}

/// End offset of an edit ending at `position`, and whether the remainder of the line needs
/// re-indenting.
///
/// Trailing whitespace joins the edit. A newline ends the edit just past it and leaves the next
/// line alone; code on the same line stays outside the edit and must be re-indented.
fn scan_forward(text: &str, position: usize) -> (usize, bool) {
    let after = text.get(position..).unwrap_or_default();
    let mut to = position;
    for ch in after.chars() {
        if ch == '\n' {
            return (to + 1, false);
        }
        if !ch.is_whitespace() {
            break;
        }
        to += ch.len_utf8();
    }
    (to, true)
}

fn leading_whitespace(line: &str) -> &str {
    match line.find(|ch: char| !ch.is_whitespace()) {
        Some(end) => &line[..end],
        None => "",
    }
}
