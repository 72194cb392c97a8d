use std::ops::Range;

/// The range recorded for an output line that no source-backed text reached.
pub const EMPTY_SPAN: Range<usize> = 0..0;

/// Smallest range covering both operands; an empty operand contributes nothing.
pub fn union(x: &Range<usize>, y: &Range<usize>) -> Range<usize> {
    if x.is_empty() {
        y.clone()
    } else if y.is_empty() {
        x.clone()
    } else {
        x.start.min(y.start)..x.end.max(y.end)
    }
}

/// Per-output-line token ranges, frozen at finalize.
///
/// Every list holds one entry per output line plus a trailing end-of-file sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSpans {
    first: Vec<Range<usize>>,
    first_core: Vec<Range<usize>>,
    full: Vec<Range<usize>>,
}

impl LineSpans {
    /// Source range of the first emission that put printable text on each line.
    pub fn first(&self) -> &[Range<usize>] {
        &self.first
    }

    pub fn first_core(&self) -> &[Range<usize>] {
        &self.first_core
    }

    /// Union of every emission that contributed to each line.
    pub fn full(&self) -> &[Range<usize>] {
        &self.full
    }
}

/// Records which source tokens reached the output line under construction.
///
/// The first-span lists are sticky: only the first source-backed printable character on a line
/// sets them. The full-span list accumulates every contributing emission.
#[derive(Debug, Clone, Default)]
pub(crate) struct SpanTracker {
    spans: LineSpans,
    first_set: bool,
}

impl SpanTracker {
    /// A new output line has begun.
    pub(crate) fn start_line(&mut self) {
        self.first_set = false;
    }

    pub(crate) fn record_first(&mut self, line: usize, range: &Range<usize>) {
        if self.first_set || range.is_empty() {
            return;
        }
        for list in [&mut self.spans.first, &mut self.spans.first_core] {
            pad(list, line + 1);
            list[line] = range.clone();
        }
        self.first_set = true;
    }

    pub(crate) fn extend_full(&mut self, line: usize, range: &Range<usize>) {
        if range.is_empty() {
            return;
        }
        pad(&mut self.spans.full, line + 1);
        self.spans.full[line] = union(&self.spans.full[line], range);
    }

    /// Sizes every list to `line_count` and appends the end-of-file sentinel.
    pub(crate) fn seal(mut self, line_count: usize, sentinel: Range<usize>) -> LineSpans {
        for list in [
            &mut self.spans.first,
            &mut self.spans.first_core,
            &mut self.spans.full,
        ] {
            list.truncate(line_count);
            pad(list, line_count);
            list.push(sentinel.clone());
        }
        self.spans
    }
}

fn pad(list: &mut Vec<Range<usize>>, len: usize) {
    if list.len() < len {
        list.resize(len, EMPTY_SPAN);
    }
}
