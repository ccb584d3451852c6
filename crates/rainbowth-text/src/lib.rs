//! # rainbowth-text — Document abstraction for rainbowth
//!
//! This crate defines the narrow surface the highlighting core needs from a
//! host editor, plus a self-contained reference implementation:
//!
//! - **[`span`]** — `Span`, a half-open char-offset range, the unit every
//!   scanner result and paint call is expressed in
//! - **[`document`]** — the [`Document`](document::Document) and
//!   [`RegionPainter`](document::RegionPainter) capability traits, plus
//!   `DocumentId` and the semantic span classes
//! - **[`text_document`]** — `TextDocument`, a [`ropey`]-backed `Document`
//!   used by the demo binary and the test suites
//! - **[`language`]** — file-extension to language-id mapping for the
//!   language gate
//!
//! A real host implements `Document`/`RegionPainter` over its own buffer and
//! decoration machinery; nothing in the core depends on `TextDocument`.

pub mod document;
pub mod language;
pub mod span;
pub mod text_document;

pub use document::{Document, DocumentId, RegionPainter, SemanticClass};
pub use span::Span;
pub use text_document::TextDocument;
