//! File-extension to language-id mapping.
//!
//! The language gate compares these identifiers against the configured
//! `languages` list, so the strings here are the ones users write in their
//! settings file.

use std::path::Path;

/// Detect the language identifier from a file extension.
///
/// Returns `Some("clojure")` for `.clj` files, etc. Covers the lisp family
/// this tool is usually enabled for plus a few common hosts worth gating
/// on. Extend as needed; unknown extensions are simply unmatched by the
/// gate.
#[must_use]
pub fn from_extension(path: &Path) -> Option<&'static str> {
    match path.extension()?.to_str()? {
        "lisp" | "lsp" | "cl" | "el" => Some("lisp"),
        "scm" | "ss" | "rkt" => Some("scheme"),
        "clj" | "cljc" | "edn" => Some("clojure"),
        "cljs" => Some("clojurescript"),
        "fnl" => Some("fennel"),
        "rs" => Some("rust"),
        "py" => Some("python"),
        "js" => Some("javascript"),
        _ => None,
    }
}
