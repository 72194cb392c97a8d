use std::fmt;
use std::ops::Range;

use tracing::{debug, trace};

use crate::blank_lines::{BlankLineLedger, BlankLineWish, WishMerge};
use crate::boundaries::BoundaryIndex;
use crate::comments::{CommentRewriter, VerbatimComments};
use crate::input::SourceInput;
use crate::options::OutputOptions;
use crate::output::FormattedOutput;
use crate::span::SpanTracker;

/// Whitespace that has been asked for but not yet written.
///
/// Nothing reaches the line buffer until a printable character arrives, so runs of blank-line
/// requests coalesce and whitespace at the end of the document disappears.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Pending {
    spaces: usize,
    newlines: usize,
}

/// Collects layout directives into finished output lines.
///
/// Directives must arrive in non-decreasing source order. Source ranges are half-open ranges of
/// real tok indices; pass an empty range for text that has no source backing.
pub struct OutputBuilder<'a, I: SourceInput> {
    input: &'a I,
    options: OutputOptions,
    comments: Box<dyn CommentRewriter>,
    ledger: BlankLineLedger,
    boundaries: BoundaryIndex,
    spans: SpanTracker,
    lines: Vec<String>,
    line: String,
    pending: Pending,
    // Closest input line to what is being emitted.
    input_line: usize,
    // Exclusive end of the last source-backed emission; blank-line wishes are keyed by it.
    last_anchor: Option<usize>,
}

impl<'a, I: SourceInput> OutputBuilder<'a, I> {
    pub fn new(input: &'a I) -> Self {
        Self::with_options(input, OutputOptions::default(), Box::new(VerbatimComments))
    }

    pub fn with_options(
        input: &'a I,
        options: OutputOptions,
        comments: Box<dyn CommentRewriter>,
    ) -> Self {
        Self {
            input,
            options,
            comments,
            ledger: BlankLineLedger::default(),
            boundaries: BoundaryIndex::default(),
            spans: SpanTracker::default(),
            lines: Vec::new(),
            line: String::new(),
            pending: Pending::default(),
            input_line: 0,
            last_anchor: None,
        }
    }

    /// Replaces the rule for combining two wishes recorded on one anchor.
    pub fn merge_wishes_with(mut self, policy: Box<dyn WishMerge>) -> Self {
        self.ledger.set_policy(policy);
        self
    }

    pub fn input(&self) -> &'a I {
        self.input
    }

    pub fn options(&self) -> &OutputOptions {
        &self.options
    }

    pub fn comments(&self) -> &dyn CommentRewriter {
        self.comments.as_ref()
    }

    /// Anchor of the last source-backed emission, if any.
    pub fn last_anchor(&self) -> Option<usize> {
        self.last_anchor
    }

    pub fn emit_text(&mut self, text: &str, range: Range<usize>) {
        if !range.is_empty() {
            let saw_blank = self.skip_input_lines(range.start);
            if self.blank_line_wanted(text, saw_blank) {
                trace!(anchor = ?self.last_anchor, saw_blank, "blank line before emission");
                self.pending.newlines += 1;
            }
        }

        if text == "\n" {
            // Line break from the layout; repeated breaks coalesce.
            self.pending.newlines = self.pending.newlines.max(1);
            self.pending.spaces = 0;
        } else {
            for ch in text.chars() {
                match ch {
                    ' ' => self.pending.spaces += 1,
                    '\n' => {
                        self.pending.spaces = 0;
                        self.pending.newlines += 1;
                    }
                    _ => {
                        self.materialize(ch);
                        let line = self.lines.len();
                        self.spans.record_first(line, &range);
                        self.spans.extend_full(line, &range);
                    }
                }
            }
            self.spans.extend_full(self.lines.len(), &range);
        }

        if !range.is_empty() {
            self.last_anchor = Some(range.end);
        }
    }

    /// Places the cursor at `columns` for the next printable character.
    pub fn set_indent(&mut self, columns: usize) {
        self.pending.spaces = columns;
    }

    pub fn record_wish(&mut self, anchor: usize, wish: BlankLineWish) {
        self.ledger.record_wish(anchor, wish);
    }

    /// Asks for a blank line after the last emitted token unless a wish is already recorded
    /// there.
    pub fn force_blank_line_after_last(&mut self) {
        if let Some(anchor) = self.last_anchor {
            self.ledger.force(anchor);
        }
    }

    pub fn mark_boundary(&mut self, index: usize) {
        self.boundaries.mark_boundary(index);
    }

    /// Flushes the incomplete last line and freezes the output.
    pub fn finish(self) -> FormattedOutput<'a, I> {
        let mut lines = self.lines;
        if !self.line.is_empty() {
            lines.push(self.line);
        }
        let token_count = self.input.token_count();
        let spans = self.spans.seal(lines.len(), token_count..token_count + 1);
        debug!(
            lines = lines.len(),
            boundaries = self.boundaries.len(),
            blank_line_wishes = self.ledger.len(),
            "output finalized"
        );
        FormattedOutput::new(
            self.input,
            lines,
            spans,
            self.boundaries,
            self.options,
            self.comments,
        )
    }

    /// Advances past input lines that end before tok `start`, reporting whether any of them
    /// was blank.
    fn skip_input_lines(&mut self, start: usize) -> bool {
        let mut saw_blank = false;
        let line_count = self.input.line_count();
        while self.input_line < line_count {
            let ending = self.input.line_tokens_ending(self.input_line);
            if !ending.is_empty() && ending.end > start {
                break;
            }
            if self.input.line_tokens(self.input_line).is_empty() {
                saw_blank = true;
            }
            self.input_line += 1;
        }
        saw_blank
    }

    fn blank_line_wanted(&self, text: &str, saw_blank: bool) -> bool {
        let recorded = self
            .last_anchor
            .and_then(|anchor| self.ledger.resolve(anchor));
        match recorded {
            Some(wish) if !self.options.is_comment(text) => wish.wanted().unwrap_or(saw_blank),
            _ => saw_blank,
        }
    }

    fn materialize(&mut self, ch: char) {
        while self.pending.newlines > 0 {
            self.lines.push(std::mem::take(&mut self.line));
            self.spans.start_line();
            self.pending.newlines -= 1;
        }
        self.line.extend(std::iter::repeat_n(' ', self.pending.spaces));
        self.pending.spaces = 0;
        self.line.push(ch);
    }
}

impl<I: SourceInput> fmt::Debug for OutputBuilder<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputBuilder")
            .field("input_line", &self.input_line)
            .field("last_anchor", &self.last_anchor)
            .field("spaces_pending", &self.pending.spaces)
            .field("newlines_pending", &self.pending.newlines)
            .field("blank_lines", &self.ledger)
            .field("boundaries", &self.boundaries)
            .field("lines", &self.lines.len())
            .finish()
    }
}
