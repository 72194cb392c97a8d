use std::collections::BTreeSet;
use std::ops::Range;

/// Token indices at which a partial reformat may start or stop (statement and member edges).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundaryIndex {
    marks: BTreeSet<usize>,
}

impl BoundaryIndex {
    pub fn mark_boundary(&mut self, index: usize) {
        self.marks.insert(index);
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.marks.contains(&index)
    }

    /// Widens the half-open token range `range` so both ends sit on marked boundaries.
    ///
    /// The start moves down to the greatest boundary at or below it (or up to the first
    /// boundary when there is none). The end moves up to the first boundary past the range's
    /// last token; with no boundary above, it moves to `token_count`, the end of the stream.
    ///
    /// Returns `None` when no boundary has been marked.
    pub fn expand_to_breakable(
        &self,
        range: Range<usize>,
        token_count: usize,
    ) -> Option<Range<usize>> {
        let first = *self.marks.first()?;
        let lo = self.marks.range(..=range.start).next_back().copied().unwrap_or(first);
        let last = range.end.saturating_sub(1);
        let hi = self
            .marks
            .range(last + 1..)
            .next()
            .copied()
            .unwrap_or(token_count);
        Some(lo..hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(marks: &[usize]) -> BoundaryIndex {
        let mut boundaries = BoundaryIndex::default();
        for &mark in marks {
            boundaries.mark_boundary(mark);
        }
        boundaries
    }

    #[test]
    fn snaps_both_ends_outward() {
        let boundaries = index(&[0, 4, 9, 15]);
        assert_eq!(boundaries.expand_to_breakable(5..7, 20), Some(4..9));
        assert_eq!(boundaries.expand_to_breakable(4..9, 20), Some(4..9));
        assert_eq!(boundaries.expand_to_breakable(8..10, 20), Some(4..15));
    }

    #[test]
    fn range_past_the_last_boundary_runs_to_the_end() {
        let boundaries = index(&[0, 2]);
        assert_eq!(boundaries.expand_to_breakable(2..4, 4), Some(2..4));
        assert_eq!(boundaries.expand_to_breakable(3..4, 4), Some(2..4));
    }

    #[test]
    fn range_before_the_first_boundary_starts_there() {
        let boundaries = index(&[3, 6]);
        assert_eq!(boundaries.expand_to_breakable(0..4, 10), Some(3..6));
        assert_eq!(boundaries.expand_to_breakable(0..2, 10), Some(3..3));
    }

    #[test]
    fn duplicates_collapse() {
        let boundaries = index(&[5, 5, 1]);
        assert_eq!(boundaries.len(), 2);
        assert!(boundaries.contains(1));
    }

    #[test]
    fn empty_index_cannot_expand() {
        assert_eq!(BoundaryIndex::default().expand_to_breakable(0..1, 1), None);
    }
}
