//! # rainbowth-scan — bracket scanning and incremental cursor-line restyle
//!
//! The working core: walk a document's bracket characters, assign each one
//! a nesting depth, bucket the depths per line, and keep a per-document
//! index that restyles a single line on cursor movement without touching
//! the rest.
//!
//! # Architecture
//!
//! ```text
//! Settings (palettes, languages, signs, exclusion toggles)
//!     │
//!     ▼
//! signs.rs:    validated opener/closer sets
//!     │
//!     ▼
//! scanner.rs:  one pass over the document → ScanResult
//!     │        (per-line depth buckets, revision-tagged)
//!     ▼
//! index.rs:    HighlightIndex — normal/highlighted region sets per depth,
//!     │        O(line) swap when the cursor changes lines
//!     ▼
//! plugin.rs:   the four host entry points (activate, modified,
//!              selection changed, close) wiring documents to all of it
//! ```
//!
//! Depth colors and theme patching live in `rainbowth-theme`; this crate
//! only consumes [`Palette`](rainbowth_theme::Palette) sizes and scope-key
//! naming.

pub mod index;
pub mod plugin;
pub mod scanner;
pub mod settings;
pub mod signs;

pub use index::HighlightIndex;
pub use plugin::Rainbowth;
pub use scanner::{scan, ScanResult};
pub use settings::{Settings, SettingsError};
pub use signs::BracketSigns;
