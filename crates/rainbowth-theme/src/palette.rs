//! Depth palettes.
//!
//! A palette is an ordered list of hex colors, one per nesting depth,
//! wrapping when brackets nest deeper than the list is long. Palettes come
//! from the settings file (per scheme name, with a `default` fallback) and
//! are compared structurally by the scheme cache to decide whether a theme
//! asset needs re-patching.

use serde::{Deserialize, Serialize};

/// An ordered, depth-indexed list of hex color strings.
///
/// Order matters: depth `d` styles with color `d % len`. Two palettes are
/// equal only when they list the same colors in the same order — a
/// reordering must re-patch the theme.
///
/// An empty palette is representable (settings files may contain one) but
/// never survives settings resolution; everything downstream of
/// resolution may assume `len() >= 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(Vec<String>);

impl Palette {
    /// Wrap a color list as a palette.
    #[must_use]
    pub const fn new(colors: Vec<String>) -> Self {
        Self(colors)
    }

    /// Convenience constructor from string slices.
    #[must_use]
    pub fn of(colors: &[&str]) -> Self {
        Self(colors.iter().map(ToString::to_string).collect())
    }

    /// Number of depth colors before wrapping.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the palette has no colors (pre-resolution only).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The color for a nesting depth, wrapping modulo the palette size.
    ///
    /// # Panics
    ///
    /// Panics if the palette is empty. Settings resolution guarantees
    /// non-empty palettes; see [`Palette`].
    #[inline]
    #[must_use]
    pub fn color_for(&self, depth: usize) -> &str {
        &self.0[depth % self.0.len()]
    }

    /// Iterate the colors in depth order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn color_for_wraps_modulo_len() {
        let p = Palette::of(&["#ff0000", "#00ff00", "#0000ff"]);
        assert_eq!(p.color_for(0), "#ff0000");
        assert_eq!(p.color_for(1), "#00ff00");
        assert_eq!(p.color_for(2), "#0000ff");
        assert_eq!(p.color_for(3), "#ff0000");
        assert_eq!(p.color_for(7), "#00ff00");
    }

    #[test]
    fn equality_is_order_sensitive() {
        let a = Palette::of(&["#ff0000", "#00ff00"]);
        let b = Palette::of(&["#00ff00", "#ff0000"]);
        assert_ne!(a, b);
        assert_eq!(a, Palette::of(&["#ff0000", "#00ff00"]));
    }

    #[test]
    fn serde_is_a_plain_color_array() {
        let p = Palette::of(&["#ff0000", "#00ff00"]);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r##"["#ff0000","#00ff00"]"##);
        let back: Palette = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn empty_palette_is_representable() {
        let p: Palette = serde_json::from_str("[]").unwrap();
        assert!(p.is_empty());
    }

    #[test]
    fn iter_yields_depth_order() {
        let p = Palette::of(&["#a", "#b"]);
        let collected: Vec<&str> = p.iter().collect();
        assert_eq!(collected, vec!["#a", "#b"]);
    }
}
