//! Painted-region index.
//!
//! The host paints regions under named scope keys, two keys per depth: a
//! normal one and a `-lineHighlight` one for regions on the cursor's line.
//! Moving the cursor must not rescan the document, so the index keeps the
//! last scan's buckets around and treats a cursor move as a set transfer:
//! the old line's regions drop back to the normal keys, the new line's
//! regions rise to the highlight keys, and every key is repainted from the
//! sets.
//!
//! Scans run against a revision of the document; an index never accepts a
//! result older than the one it already holds.

use std::collections::{HashMap, HashSet};

use rainbowth_text::{DocumentId, RegionPainter, Span};
use rainbowth_theme::scope::{line_highlight_scope_key, scope_key};

use crate::scanner::ScanResult;

/// Per-document paint state.
///
/// Holds, for each depth, the set of regions currently painted under the
/// normal key and the set painted under the line-highlight key. The two
/// sets of a depth are disjoint and together equal that depth's regions
/// from the installed scan.
#[derive(Debug)]
pub struct HighlightIndex {
    doc: DocumentId,
    revision: u64,
    depths: usize,
    scope_keys: Vec<String>,
    highlight_keys: Vec<String>,
    per_line: HashMap<usize, Vec<Vec<Span>>>,
    normal: Vec<HashSet<Span>>,
    highlighted: Vec<HashSet<Span>>,
    current_line: Option<usize>,
}

impl HighlightIndex {
    /// An empty index for `doc` with `depths` buckets and nothing painted.
    #[must_use]
    pub fn new(doc: DocumentId, depths: usize) -> Self {
        debug_assert!(depths >= 1, "a palette needs at least one color");
        Self {
            doc,
            revision: 0,
            depths,
            scope_keys: (0..depths).map(scope_key).collect(),
            highlight_keys: (0..depths).map(line_highlight_scope_key).collect(),
            per_line: HashMap::new(),
            normal: vec![HashSet::new(); depths],
            highlighted: vec![HashSet::new(); depths],
            current_line: None,
        }
    }

    /// The document this index paints.
    #[inline]
    #[must_use]
    pub const fn doc(&self) -> DocumentId {
        self.doc
    }

    /// Number of depth buckets currently indexed.
    #[inline]
    #[must_use]
    pub const fn depths(&self) -> usize {
        self.depths
    }

    /// The line currently holding the highlight, if any.
    #[inline]
    #[must_use]
    pub const fn current_line(&self) -> Option<usize> {
        self.current_line
    }

    /// Regions painted under the normal key at `depth`, in document order.
    #[must_use]
    pub fn normal_regions(&self, depth: usize) -> Vec<Span> {
        sorted(&self.normal[depth])
    }

    /// Regions painted under the line-highlight key at `depth`, in
    /// document order.
    #[must_use]
    pub fn highlighted_regions(&self, depth: usize) -> Vec<Span> {
        sorted(&self.highlighted[depth])
    }

    /// Install a fresh scan result and repaint every scope.
    ///
    /// All regions start under the normal keys; the highlight is reset and
    /// must be placed again with [`Self::move_highlight`]. Returns `false`
    /// without touching anything when `result` is older than the revision
    /// already installed.
    pub fn install(&mut self, result: ScanResult, painter: &mut dyn RegionPainter) -> bool {
        debug_assert_eq!(result.doc(), self.doc, "result from another document");
        if result.revision() < self.revision {
            return false;
        }
        self.revision = result.revision();
        if result.depths() != self.depths {
            // The palette changed size; retire the old keys before any of
            // them stops being repainted.
            self.clear(painter);
            self.resize(result.depths());
        }
        self.per_line = result.into_buckets();
        for set in &mut self.normal {
            set.clear();
        }
        for set in &mut self.highlighted {
            set.clear();
        }
        for buckets in self.per_line.values() {
            for (depth, bucket) in buckets.iter().enumerate() {
                self.normal[depth].extend(bucket.iter().copied());
            }
        }
        self.current_line = None;
        self.repaint(painter);
        true
    }

    /// Move the line highlight to `line` and repaint.
    ///
    /// `None` parks the highlight nowhere, which is the state while the
    /// selection is not a single caret. Returns `false` when the highlight
    /// is already on `line`; no repaint happens in that case.
    pub fn move_highlight(
        &mut self,
        line: Option<usize>,
        painter: &mut dyn RegionPainter,
    ) -> bool {
        if line == self.current_line {
            return false;
        }
        if let Some(buckets) = self.current_line.and_then(|old| self.per_line.get(&old)) {
            for (depth, bucket) in buckets.iter().enumerate() {
                for span in bucket {
                    let was_highlighted = self.highlighted[depth].remove(span);
                    debug_assert!(was_highlighted, "highlighted set out of sync");
                    self.normal[depth].insert(*span);
                }
            }
        }
        if let Some(buckets) = line.and_then(|new| self.per_line.get(&new)) {
            for (depth, bucket) in buckets.iter().enumerate() {
                for span in bucket {
                    let was_normal = self.normal[depth].remove(span);
                    debug_assert!(was_normal, "normal set out of sync");
                    self.highlighted[depth].insert(*span);
                }
            }
        }
        self.current_line = line;
        self.repaint(painter);
        true
    }

    /// Remove every region this index has painted.
    pub fn clear(&self, painter: &mut dyn RegionPainter) {
        for key in self.scope_keys.iter().chain(&self.highlight_keys) {
            painter.clear_regions(self.doc, key);
        }
    }

    fn resize(&mut self, depths: usize) {
        self.depths = depths;
        self.scope_keys = (0..depths).map(scope_key).collect();
        self.highlight_keys = (0..depths).map(line_highlight_scope_key).collect();
        self.normal = vec![HashSet::new(); depths];
        self.highlighted = vec![HashSet::new(); depths];
    }

    fn repaint(&self, painter: &mut dyn RegionPainter) {
        for depth in 0..self.depths {
            painter.paint_regions(self.doc, &self.scope_keys[depth], &sorted(&self.normal[depth]));
            painter.paint_regions(
                self.doc,
                &self.highlight_keys[depth],
                &sorted(&self.highlighted[depth]),
            );
        }
    }
}

fn sorted(set: &HashSet<Span>) -> Vec<Span> {
    let mut spans: Vec<Span> = set.iter().copied().collect();
    spans.sort_unstable();
    spans
}
