//! Reference [`Document`] implementation backed by a rope.
//!
//! `TextDocument` is what the demo binary and the test suites run the core
//! against. It is a real, editable buffer, not a mock: edits go through a
//! [`ropey::Rope`] and bump the revision counter exactly the way a host
//! buffer would.
//!
//! # Design choices
//!
//! - **ropey** provides O(log n) edits, efficient line indexing, and
//!   battle-tested Unicode handling. Offsets in the public API are char
//!   offsets; byte offsets never leak out.
//!
//! - **Semantic spans are injected, not computed.** Comment/string detection
//!   belongs to the host's syntax layer. The reference document stores
//!   whatever the caller supplies via
//!   [`set_semantic_spans`](TextDocument::set_semantic_spans) and drops it
//!   on the next edit, since derived data is stale the moment the text
//!   changes.
//!
//! - **Selection is a span list.** One empty span is a collapsed cursor;
//!   anything else (multiple carets, a non-empty range) makes the
//!   line-highlight layer stand down, so the reference document does not
//!   try to be clever about normalizing it.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ropey::Rope;

use crate::document::{Document, DocumentId, SemanticClass};
use crate::language;
use crate::span::Span;

// ---------------------------------------------------------------------------
// TextDocument
// ---------------------------------------------------------------------------

/// An editable in-memory document implementing [`Document`].
pub struct TextDocument {
    id: DocumentId,
    rope: Rope,
    path: Option<PathBuf>,
    revision: u64,
    language: Option<String>,
    selection: Vec<Span>,
    comment_spans: Vec<Span>,
    string_spans: Vec<Span>,
}

impl TextDocument {
    // -- Construction -------------------------------------------------------

    /// Create an empty document.
    #[must_use]
    pub fn new(id: DocumentId) -> Self {
        Self {
            id,
            rope: Rope::new(),
            path: None,
            revision: 0,
            language: None,
            selection: Vec::new(),
            comment_spans: Vec::new(),
            string_spans: Vec::new(),
        }
    }

    /// Create a document from a string.
    #[must_use]
    pub fn from_text(id: DocumentId, text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            ..Self::new(id)
        }
    }

    /// Load a document from a file, detecting the language from the file
    /// extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid
    /// UTF-8.
    pub fn from_file(id: DocumentId, path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self {
            rope: Rope::from_str(&text),
            language: language::from_extension(path).map(str::to_owned),
            path: Some(path.to_path_buf()),
            ..Self::new(id)
        })
    }

    // -- Text access --------------------------------------------------------

    /// Collect all text into a `String`. Allocates.
    #[must_use]
    pub fn contents(&self) -> String {
        self.rope.to_string()
    }

    /// Total number of lines. An empty document has 1 line.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// True when the document contains no text.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// The file path this document was loaded from, if any.
    #[inline]
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // -- Editing ------------------------------------------------------------

    /// Replace the text in `span` with `text`, bumping the revision.
    ///
    /// Injected semantic spans are dropped (they describe text that no
    /// longer exists); the caller re-supplies them after re-lexing. The
    /// selection is left alone — hosts move carets themselves.
    ///
    /// # Panics
    ///
    /// Panics if `span.end` exceeds the document length.
    pub fn replace(&mut self, span: Span, text: &str) {
        assert!(
            span.end <= self.rope.len_chars(),
            "replace span out of bounds"
        );
        self.rope.remove(span.start..span.end);
        self.rope.insert(span.start, text);
        self.revision += 1;
        self.comment_spans.clear();
        self.string_spans.clear();
    }

    /// Insert `text` at `offset`, bumping the revision.
    ///
    /// # Panics
    ///
    /// Panics if `offset` exceeds the document length.
    pub fn insert(&mut self, offset: usize, text: &str) {
        self.replace(Span::point(offset), text);
    }

    /// Delete the text in `span`, bumping the revision.
    ///
    /// # Panics
    ///
    /// Panics if `span.end` exceeds the document length.
    pub fn delete(&mut self, span: Span) {
        self.replace(span, "");
    }

    // -- Host-side state ----------------------------------------------------

    /// Set the language identifier used by the language gate.
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = Some(language.into());
    }

    /// Place a single collapsed cursor at `offset`.
    pub fn set_cursor(&mut self, offset: usize) {
        self.selection = vec![Span::point(offset)];
    }

    /// Replace the whole selection (multiple carets, ranges, or empty).
    pub fn set_selection(&mut self, selection: Vec<Span>) {
        self.selection = selection;
    }

    /// Inject the semantic spans for one class, as a host syntax layer
    /// would after (re-)lexing.
    pub fn set_semantic_spans(&mut self, class: SemanticClass, spans: Vec<Span>) {
        match class {
            SemanticClass::Comment => self.comment_spans = spans,
            SemanticClass::String => self.string_spans = spans,
        }
    }
}

impl Document for TextDocument {
    #[inline]
    fn id(&self) -> DocumentId {
        self.id
    }

    #[inline]
    fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        self.rope.get_char(offset)
    }

    fn line_of(&self, offset: usize) -> usize {
        self.rope.char_to_line(offset.min(self.rope.len_chars()))
    }

    fn find_matches(&self, chars: &str) -> Vec<Span> {
        self.rope
            .chars()
            .enumerate()
            .filter(|(_, c)| chars.contains(*c))
            .map(|(i, _)| Span::char_at(i))
            .collect()
    }

    fn semantic_spans(&self, class: SemanticClass) -> Vec<Span> {
        match class {
            SemanticClass::Comment => self.comment_spans.clone(),
            SemanticClass::String => self.string_spans.clone(),
        }
    }

    fn selection(&self) -> Vec<Span> {
        self.selection.clone()
    }

    fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

impl fmt::Debug for TextDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextDocument")
            .field("id", &self.id)
            .field("chars", &self.rope.len_chars())
            .field("revision", &self.revision)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
