//! # rainbowth-theme — palette, perturbation, asset patching, cache
//!
//! Everything that touches colors or theme assets lives here, kept apart
//! from the scanner so the text pipeline never does file I/O.
//!
//! # Architecture
//!
//! ```text
//! theme asset (XML plist)
//!     │  extract background / lineHighlight
//!     ▼
//! color.rs:   canonicalize hex, perturb the depth background
//!     │
//!     ▼
//! patcher.rs: generate 2N scoped rules, splice them into the asset
//!     │                (sentinel block, idempotent rewrite)
//!     ▼
//! cache.rs:   remember which palette each scheme was patched with,
//!             so activation skips redundant rewrites
//! ```
//!
//! [`Palette`] is the shared currency: the scanner wraps depths onto it,
//! the patcher turns it into style rules, and the cache compares it
//! structurally to decide whether an asset needs rewriting.

pub mod cache;
pub mod color;
pub mod error;
pub mod palette;
pub mod patcher;
pub mod scope;

pub use cache::SchemeCache;
pub use error::ThemeError;
pub use palette::Palette;
