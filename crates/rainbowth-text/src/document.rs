//! Host capability traits.
//!
//! The highlighting core never talks to an editor directly. It consumes two
//! narrow capabilities the host implements over its own machinery:
//!
//! - [`Document`] — read-only queries against one open buffer: char-class
//!   search, semantic comment/string spans, line lookup, the current
//!   selection, and an edit revision counter.
//! - [`RegionPainter`] — the one-way decoration channel. Painting a scope
//!   key **replaces** that scope's entire region set; there is no
//!   incremental add/remove on the wire, which is why the index repaints
//!   whole scopes after each swap.
//!
//! Both traits are object-safe on purpose: the plugin layer stores no
//! generics and a host can hand in `&dyn Document` per event.

use crate::span::Span;

// ---------------------------------------------------------------------------
// DocumentId
// ---------------------------------------------------------------------------

/// Stable identity of one open document for the lifetime of the process.
///
/// The plugin keys its per-document state on this, so a host must not
/// recycle ids while a document is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u64);

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "doc#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// SemanticClass
// ---------------------------------------------------------------------------

/// The two semantic span classes the scanner can be told to skip.
///
/// How the host computes these (syntax tree, scope names, heuristics) is its
/// business; the core only requires that every returned span is half-open
/// and char-offset based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticClass {
    /// Comment text, including the comment introducer.
    Comment,
    /// String literals, including the quotes.
    String,
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// Read-only view of one open document.
///
/// Offsets are char offsets; see [`Span`](crate::span::Span) for the
/// indexing rules. All queries reflect the document state at call time —
/// the core snapshots `revision()` before a scan and discards results that
/// no longer match.
pub trait Document {
    /// This document's stable identity.
    fn id(&self) -> DocumentId;

    /// Monotonic edit counter. Any content change must increase it.
    fn revision(&self) -> u64;

    /// Total length in chars.
    fn len_chars(&self) -> usize;

    /// The char at `offset`, or `None` past the end.
    fn char_at(&self, offset: usize) -> Option<char>;

    /// 0-indexed line containing `offset`. Offsets past the end clamp to
    /// the last line.
    fn line_of(&self, offset: usize) -> usize;

    /// One-char spans of every occurrence of any char in `chars`, in
    /// document order.
    fn find_matches(&self, chars: &str) -> Vec<Span>;

    /// All spans of the given semantic class, half-open. Order and
    /// disjointness are not required; the scanner sorts what it gets.
    fn semantic_spans(&self, class: SemanticClass) -> Vec<Span>;

    /// The current selection as a list of spans, one per caret. A collapsed
    /// cursor is an empty span. An empty list means no selection at all.
    fn selection(&self) -> Vec<Span>;

    /// Language identifier for the gate (`"clojure"`, `"scheme"`, ...), or
    /// `None` when the host has no idea what this document is.
    fn language(&self) -> Option<&str>;
}

// ---------------------------------------------------------------------------
// RegionPainter
// ---------------------------------------------------------------------------

/// The decoration channel back into the host.
///
/// Scope keys are plain strings (`rainbowth0`, `rainbowth0-lineHighlight`,
/// ...). The host maps them to whatever styling mechanism it has.
pub trait RegionPainter {
    /// Replace the region set painted under `scope` for this document.
    /// Regions arrive sorted by start offset.
    fn paint_regions(&mut self, doc: DocumentId, scope: &str, regions: &[Span]);

    /// Remove every region painted under `scope` for this document.
    fn clear_regions(&mut self, doc: DocumentId, scope: &str);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
