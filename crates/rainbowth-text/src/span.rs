//! Half-open character spans.
//!
//! All offsets are **0-indexed** and count Unicode scalar values (chars), not
//! bytes or grapheme clusters. This matches how `ropey` indexes text and how
//! host paint APIs address regions. A span `[start, end)` includes `start`
//! and excludes `end`; a bracket occurrence is always a one-char span.

use std::fmt;

// ---------------------------------------------------------------------------
// Span
// ---------------------------------------------------------------------------

/// A half-open char-offset range in a document: `[start, end)`.
///
/// `start` is inclusive, `end` is exclusive. An empty span has
/// `start == end` and represents a collapsed cursor. Spans are always
/// normalized so that `start <= end` — use [`Span::new`] which enforces
/// this, or [`Span::ordered`] on untrusted input.
///
/// # Ordering
///
/// Spans order by `start` first, then `end`, so a sorted sequence of spans
/// is in document order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// A zero-width span at offset 0.
    pub const ZERO: Self = Self { start: 0, end: 0 };

    /// Create a span. Panics in debug if `start > end`.
    #[inline]
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "Span::new requires start <= end");
        Self { start, end }
    }

    /// Create a span from two arbitrary offsets, swapping if needed so that
    /// `start <= end`.
    #[inline]
    #[must_use]
    pub const fn ordered(a: usize, b: usize) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// A zero-width span (cursor position) at the given offset.
    #[inline]
    #[must_use]
    pub const fn point(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// The one-char span covering the character at `offset`.
    #[inline]
    #[must_use]
    pub const fn char_at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset + 1,
        }
    }

    /// Number of chars this span covers.
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.end - self.start
    }

    /// True when the span covers zero chars (`start == end`).
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// True when the given offset falls within `[start, end)`.
    #[inline]
    #[must_use]
    pub const fn contains_offset(self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// True when `other` lies entirely within this span.
    ///
    /// Containment is inclusive at both bounds of the half-open ranges:
    /// `[2, 5)` contains `[2, 5)`, `[3, 4)`, and the empty `[4, 4)`, but not
    /// `[4, 6)`. This is the exclusion test — a bracket is suppressed iff
    /// some comment/string span fully contains its one-char span.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        other.start >= self.start && other.end <= self.end
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Span({}..{})", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- Construction -------------------------------------------------------

    #[test]
    fn span_zero() {
        let s = Span::ZERO;
        assert!(s.is_empty());
        assert_eq!(s.start, 0);
        assert_eq!(s.end, 0);
    }

    #[test]
    fn span_new_valid() {
        let s = Span::new(2, 7);
        assert_eq!(s.start, 2);
        assert_eq!(s.end, 7);
        assert_eq!(s.len(), 5);
    }

    #[test]
    fn span_new_same_offset() {
        // start == end is valid (collapsed cursor).
        let s = Span::new(3, 3);
        assert!(s.is_empty());
        assert_eq!(s.len(), 0);
    }

    #[test]
    fn span_point() {
        let s = Span::point(9);
        assert!(s.is_empty());
        assert_eq!(s.start, 9);
        assert_eq!(s.end, 9);
    }

    #[test]
    fn span_char_at() {
        let s = Span::char_at(4);
        assert_eq!(s, Span::new(4, 5));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn span_ordered_already_sorted() {
        let s = Span::ordered(1, 6);
        assert_eq!(s, Span::new(1, 6));
    }

    #[test]
    fn span_ordered_needs_swap() {
        let s = Span::ordered(6, 1);
        assert_eq!(s, Span::new(1, 6));
    }

    // -- Ordering -----------------------------------------------------------

    #[test]
    fn spans_sort_in_document_order() {
        let mut spans = vec![Span::new(5, 6), Span::new(0, 1), Span::new(3, 4)];
        spans.sort_unstable();
        assert_eq!(
            spans,
            vec![Span::new(0, 1), Span::new(3, 4), Span::new(5, 6)]
        );
    }

    #[test]
    fn same_start_orders_by_end() {
        assert!(Span::new(2, 3) < Span::new(2, 8));
    }

    // -- contains_offset ----------------------------------------------------

    #[test]
    fn contains_offset_start_inclusive() {
        assert!(Span::new(2, 5).contains_offset(2));
    }

    #[test]
    fn contains_offset_end_exclusive() {
        assert!(!Span::new(2, 5).contains_offset(5));
    }

    #[test]
    fn empty_span_contains_no_offset() {
        assert!(!Span::point(4).contains_offset(4));
    }

    // -- contains (full containment) ----------------------------------------

    #[test]
    fn contains_inner_span() {
        let outer = Span::new(2, 9);
        assert!(outer.contains(Span::new(3, 4)));
        assert!(outer.contains(Span::new(2, 9)));
    }

    #[test]
    fn contains_rejects_overlap() {
        let outer = Span::new(2, 5);
        assert!(!outer.contains(Span::new(4, 6)));
        assert!(!outer.contains(Span::new(1, 3)));
    }

    #[test]
    fn contains_bracket_at_boundary() {
        // Half-open semantics: the char at the span's end offset is outside.
        let string_span = Span::new(2, 5);
        assert!(string_span.contains(Span::char_at(4)));
        assert!(!string_span.contains(Span::char_at(5)));
        assert!(!string_span.contains(Span::char_at(1)));
    }

    // -- Display ------------------------------------------------------------

    #[test]
    fn span_debug_format() {
        assert_eq!(format!("{:?}", Span::new(1, 4)), "Span(1..4)");
    }

    #[test]
    fn span_display_format() {
        assert_eq!(format!("{}", Span::new(1, 4)), "1..4");
    }

    // -- Hashing ------------------------------------------------------------

    #[test]
    fn span_hash_consistency() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Span::new(0, 1));
        set.insert(Span::new(0, 1)); // duplicate
        set.insert(Span::new(2, 3));
        assert_eq!(set.len(), 2);
    }
}
