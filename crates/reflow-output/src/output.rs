use std::fmt;
use std::ops::Range;

use rustc_hash::FxHashMap;

use crate::boundaries::BoundaryIndex;
use crate::comments::CommentRewriter;
use crate::input::SourceInput;
use crate::options::OutputOptions;
use crate::span::LineSpans;

/// Maps a tok index to the half-open range of output lines whose full span contains it.
#[derive(Debug, Clone, Default)]
pub(crate) struct TokenLineMap {
    lines: FxHashMap<usize, Range<usize>>,
}

impl TokenLineMap {
    pub(crate) fn new(full_spans: &[Range<usize>]) -> Self {
        let mut lines: FxHashMap<usize, Range<usize>> = FxHashMap::default();
        for (line, span) in full_spans.iter().enumerate() {
            for k in span.clone() {
                lines
                    .entry(k)
                    .and_modify(|range| range.end = line + 1)
                    .or_insert(line..line + 1);
            }
        }
        Self { lines }
    }

    pub(crate) fn lines_of(&self, k: usize) -> Option<Range<usize>> {
        self.lines.get(&k).cloned()
    }
}

/// The finished output of one build pass. Read-only; every query is a pure function of it.
pub struct FormattedOutput<'a, I: SourceInput> {
    pub(crate) input: &'a I,
    pub(crate) lines: Vec<String>,
    pub(crate) spans: LineSpans,
    pub(crate) token_lines: TokenLineMap,
    pub(crate) boundaries: BoundaryIndex,
    options: OutputOptions,
    comments: Box<dyn CommentRewriter>,
}

impl<'a, I: SourceInput> FormattedOutput<'a, I> {
    pub(crate) fn new(
        input: &'a I,
        lines: Vec<String>,
        spans: LineSpans,
        boundaries: BoundaryIndex,
        options: OutputOptions,
        comments: Box<dyn CommentRewriter>,
    ) -> Self {
        let token_lines = TokenLineMap::new(spans.full());
        Self {
            input,
            lines,
            spans,
            token_lines,
            boundaries,
            options,
            comments,
        }
    }

    pub fn input(&self) -> &'a I {
        self.input
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn spans(&self) -> &LineSpans {
        &self.spans
    }

    pub fn boundaries(&self) -> &BoundaryIndex {
        &self.boundaries
    }

    pub fn options(&self) -> &OutputOptions {
        &self.options
    }

    pub fn comments(&self) -> &dyn CommentRewriter {
        self.comments.as_ref()
    }

    /// Output lines covering tok `k`, the end-of-file sentinel included.
    pub fn token_lines(&self, k: usize) -> Option<Range<usize>> {
        self.token_lines.lines_of(k)
    }

    /// The output line whose first source-backed text came from tok `k`.
    pub fn line_starting_with(&self, k: usize) -> Option<usize> {
        self.spans.first().iter().position(|span| span.contains(&k))
    }

    /// The whole document: every line followed by a newline.
    pub fn text(&self) -> String {
        let mut text = String::with_capacity(self.lines.iter().map(|line| line.len() + 1).sum());
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}

impl<I: SourceInput> fmt::Debug for FormattedOutput<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormattedOutput")
            .field("lines", &self.lines)
            .field("spans", &self.spans)
            .field("boundaries", &self.boundaries)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
