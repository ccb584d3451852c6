//! Scope-key naming contract.
//!
//! Painted region sets and generated theme rules meet at these strings:
//! the index paints under `rainbowth{d}` / `rainbowth{d}-lineHighlight`,
//! and [`patcher`](crate::patcher) writes rules with exactly those scope
//! names, so the host's style resolution connects the two. Nothing else
//! may invent scope keys.

/// Scope key for depth `d` regions on non-highlighted lines.
#[must_use]
pub fn scope_key(depth: usize) -> String {
    format!("rainbowth{depth}")
}

/// Scope key for depth `d` regions on the cursor-highlighted line.
#[must_use]
pub fn line_highlight_scope_key(depth: usize) -> String {
    format!("rainbowth{depth}-lineHighlight")
}

/// Parse a scope key back into `(depth, is_line_highlight)`.
///
/// Returns `None` for keys outside the contract.
#[must_use]
pub fn parse_scope_key(key: &str) -> Option<(usize, bool)> {
    let rest = key.strip_prefix("rainbowth")?;
    match rest.strip_suffix("-lineHighlight") {
        Some(depth) => Some((depth.parse().ok()?, true)),
        None => Some((rest.parse().ok()?, false)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_follow_the_contract() {
        assert_eq!(scope_key(0), "rainbowth0");
        assert_eq!(scope_key(12), "rainbowth12");
        assert_eq!(line_highlight_scope_key(3), "rainbowth3-lineHighlight");
    }

    #[test]
    fn parse_roundtrip() {
        for depth in [0, 1, 7, 42] {
            assert_eq!(parse_scope_key(&scope_key(depth)), Some((depth, false)));
            assert_eq!(
                parse_scope_key(&line_highlight_scope_key(depth)),
                Some((depth, true))
            );
        }
    }

    #[test]
    fn parse_rejects_foreign_keys() {
        assert_eq!(parse_scope_key("comment"), None);
        assert_eq!(parse_scope_key("rainbowth"), None);
        assert_eq!(parse_scope_key("rainbowthx"), None);
        assert_eq!(parse_scope_key("rainbowth-lineHighlight"), None);
    }
}
