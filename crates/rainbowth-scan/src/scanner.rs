//! Bracket scanner.
//!
//! A single pass over a document's bracket occurrences assigns every
//! bracket a nesting depth and groups it into per-line buckets, one bucket
//! per palette color. Depth wraps modulo the palette size, and unbalanced
//! closers push the running depth below zero, which the Euclidean modulo
//! folds back into range instead of panicking.
//!
//! Brackets inside excluded spans (strings, comments) are invisible to the
//! scan: they are neither bucketed nor counted toward the nesting depth.

use std::collections::HashMap;

use rainbowth_text::{Document, DocumentId, Span};

use crate::signs::BracketSigns;

// -----------------------------------------------------------------------------
// ScanResult
// -----------------------------------------------------------------------------

/// The output of one full scan of a document.
///
/// Regions are grouped by line, then by depth bucket. Lines without any
/// visible bracket have no entry at all. A result remembers the document
/// revision it was computed from, so consumers can reject results that a
/// later edit has made stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    doc: DocumentId,
    revision: u64,
    depths: usize,
    per_line: HashMap<usize, Vec<Vec<Span>>>,
}

impl ScanResult {
    /// The document this result was scanned from.
    #[inline]
    #[must_use]
    pub const fn doc(&self) -> DocumentId {
        self.doc
    }

    /// The document revision the scan observed.
    #[inline]
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of depth buckets per line (the palette size).
    #[inline]
    #[must_use]
    pub const fn depths(&self) -> usize {
        self.depths
    }

    /// The regions on `line` at depth bucket `depth`, in document order.
    ///
    /// Returns an empty slice for lines the scan never touched and for
    /// depths at or beyond [`depths`](Self::depths).
    #[must_use]
    pub fn bucket(&self, line: usize, depth: usize) -> &[Span] {
        self.per_line
            .get(&line)
            .and_then(|buckets| buckets.get(depth))
            .map_or(&[][..], Vec::as_slice)
    }

    /// Line numbers that hold at least one bucketed region.
    pub fn lines(&self) -> impl Iterator<Item = usize> + '_ {
        self.per_line.keys().copied()
    }

    /// Total number of bucketed regions across all lines.
    #[must_use]
    pub fn region_count(&self) -> usize {
        self.per_line
            .values()
            .flatten()
            .map(Vec::len)
            .sum()
    }

    pub(crate) fn into_buckets(self) -> HashMap<usize, Vec<Vec<Span>>> {
        self.per_line
    }
}

// -----------------------------------------------------------------------------
// Scanning
// -----------------------------------------------------------------------------

/// Scan `doc` for bracket signs and bucket them by line and depth.
///
/// `excluded` lists spans whose brackets must be ignored, in any order;
/// overlapping spans are fine. `depths` is the palette size and must be at
/// least one.
#[must_use]
pub fn scan(
    doc: &dyn Document,
    signs: &BracketSigns,
    excluded: &[Span],
    depths: usize,
) -> ScanResult {
    debug_assert!(depths >= 1, "a palette needs at least one color");

    let revision = doc.revision();
    let brackets = doc.find_matches(&signs.search_set());

    let mut excluded = excluded.to_vec();
    excluded.sort_unstable();

    let mut per_line: HashMap<usize, Vec<Vec<Span>>> = HashMap::new();
    let mut depth: i64 = -1;
    // Sweep state: all excluded spans starting at or before the current
    // bracket have been folded into `max_end`.
    let mut next_excluded = 0;
    let mut max_end = 0;

    for span in brackets {
        while next_excluded < excluded.len() && excluded[next_excluded].start <= span.start {
            max_end = max_end.max(excluded[next_excluded].end);
            next_excluded += 1;
        }
        if max_end >= span.end {
            continue;
        }
        let Some(c) = doc.char_at(span.start) else {
            continue;
        };
        if signs.is_opener(c) {
            depth += 1;
        }
        let line = doc.line_of(span.start);
        let buckets = per_line
            .entry(line)
            .or_insert_with(|| vec![Vec::new(); depths]);
        buckets[bucket_of(depth, depths)].push(span);
        if signs.is_closer(c) {
            depth -= 1;
        }
    }

    ScanResult {
        doc: doc.id(),
        revision,
        depths,
        per_line,
    }
}

// Truncation cannot happen: rem_euclid of a positive modulus is in
// `0..depths`, which round-trips through i64 on every supported target.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn bucket_of(depth: i64, depths: usize) -> usize {
    depth.rem_euclid(depths as i64) as usize
}
