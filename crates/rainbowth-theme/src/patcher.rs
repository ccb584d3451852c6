//! Theme asset patching.
//!
//! Splices one generated rule block into an XML-plist theme asset, between
//! the sentinel comments `<!-- rainbowth -->` and `<!-- /rainbowth -->`,
//! immediately before the first `</array>` (the close of the rules array).
//! Re-patching first strips any previous sentinel line, so the rewrite is
//! idempotent and a palette change replaces the block instead of stacking
//! a second one.
//!
//! Parsing a full plist just to read two strings and find one insertion
//! point is not worth the machinery, so extraction is scoped regex over the
//! raw text: the first `<key>settings</key><dict>...</dict>` block is the
//! theme's global settings, and named values are `<key>/<string>` pairs
//! inside it. Everything structural the patcher relies on is checked, and a
//! miss is a [`ThemeError::MalformedTheme`] that leaves the asset
//! untouched.
//!
//! The sentinel markers and the `rainbowth{d}` / `rainbowth{d}-lineHighlight`
//! scope names are a fixed contract with the scanner side; the painted
//! scope keys must resolve to these generated rules.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::color;
use crate::error::ThemeError;
use crate::palette::Palette;
use crate::scope;

// ---------------------------------------------------------------------------
// Compiled patterns
// ---------------------------------------------------------------------------

/// The first global settings dict in the asset.
fn settings_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<key>settings</key>\s*<dict>(.+?)</dict>")
            .unwrap_or_else(|err| panic!("settings block regex: {err}"))
    })
}

/// A previously inserted sentinel line, indentation through newline.
fn sentinel_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[ \t]+<!-- rainbowth -->.+\n")
            .unwrap_or_else(|err| panic!("sentinel regex: {err}"))
    })
}

/// One `<key>…</key><string>…</string>` pair inside the settings dict.
fn setting_pair_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<key>([^<]+)</key>\s*<string>(.+?)</string>")
            .unwrap_or_else(|err| panic!("setting pair regex: {err}"))
    })
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Extract a named string value from the asset's global settings dict.
///
/// Looks at the *first* `<key>settings</key><dict>...</dict>` block only —
/// in a tmTheme-style asset that is the global settings entry, and it stays
/// first even after our block is spliced in at the end of the array.
///
/// # Errors
///
/// [`ThemeError::MalformedTheme`] when the settings block or the named
/// value is absent.
pub fn extract_setting(theme_text: &str, name: &str) -> Result<String, ThemeError> {
    let settings = settings_block_re()
        .captures(theme_text)
        .and_then(|c| c.get(1))
        .ok_or_else(|| ThemeError::malformed("settings block"))?
        .as_str();

    setting_pair_re()
        .captures_iter(settings)
        .find(|c| c.get(1).is_some_and(|key| key.as_str() == name))
        .and_then(|c| c.get(2))
        .map(|m| m.as_str().to_owned())
        .ok_or_else(|| ThemeError::malformed(format!("{name} setting")))
}

// ---------------------------------------------------------------------------
// Rule generation
// ---------------------------------------------------------------------------

/// Generate the rule block for a palette: two single-line `<dict>` rules
/// per color, scoped `rainbowth{i}` and `rainbowth{i}-lineHighlight`.
///
/// Both rules pair the palette color as foreground with a background fill:
/// the normal rule uses a perturbed copy of the theme background (an exact
/// copy would read as "no background" to the host and the foreground would
/// be dropped with it), the line-highlight rule uses the theme's cursor
/// line color verbatim so brackets on the highlighted line blend into the
/// highlight bar.
#[must_use]
pub fn generate_rules(palette: &Palette, background: &str, line_highlight: &str) -> String {
    let background = color::perturb(background);

    let mut xml = String::new();
    for (index, fg) in palette.iter().enumerate() {
        let normal_scope = scope::scope_key(index);
        let highlight_scope = scope::line_highlight_scope_key(index);
        xml.push_str(&format!(
            "<dict>\
             <key>scope</key><string>{normal_scope}</string>\
             <key>settings</key><dict>\
             <key>foreground</key><string>{fg}</string>\
             <key>background</key><string>{background}</string>\
             </dict>\
             </dict>\
             <dict>\
             <key>scope</key><string>{highlight_scope}</string>\
             <key>settings</key><dict>\
             <key>foreground</key><string>{fg}</string>\
             <key>background</key><string>{line_highlight}</string>\
             </dict>\
             </dict>"
        ));
    }
    xml
}

// ---------------------------------------------------------------------------
// Patching
// ---------------------------------------------------------------------------

/// Patch a theme asset's text with the rule block for `palette`.
///
/// Extracts `background` and `lineHighlight` from the global settings,
/// removes any previous sentinel lines, and splices the fresh block in
/// before the first `</array>`. Idempotent:
/// `patch(patch(t, p), p) == patch(t, p)`.
///
/// # Errors
///
/// [`ThemeError::MalformedTheme`] when a required setting or the rules
/// array is absent. The input is never partially transformed — on error
/// the caller still holds the original text.
pub fn patch(theme_text: &str, palette: &Palette) -> Result<String, ThemeError> {
    let background = extract_setting(theme_text, "background")?;
    let line_highlight = extract_setting(theme_text, "lineHighlight")?;

    let stripped = sentinel_line_re().replace_all(theme_text, "");

    let close = stripped
        .find("</array>")
        .ok_or_else(|| ThemeError::malformed("rules array"))?;

    let rules = generate_rules(palette, &background, &line_highlight);
    let mut patched = String::with_capacity(stripped.len() + rules.len() + 64);
    patched.push_str(&stripped[..close]);
    patched.push_str("\t<!-- rainbowth -->");
    patched.push_str(&rules);
    patched.push_str("<!-- /rainbowth -->\n\t");
    patched.push_str(&stripped[close..]);
    Ok(patched)
}

/// Patch a theme asset in place on disk.
///
/// # Errors
///
/// [`ThemeError::AssetIo`] when the file cannot be read or written,
/// [`ThemeError::MalformedTheme`] when [`patch`] rejects the content. On
/// any error the file is left as it was.
pub fn patch_file(path: &Path, palette: &Palette) -> Result<(), ThemeError> {
    let theme_text = fs::read_to_string(path).map_err(|source| ThemeError::AssetIo {
        path: path.to_path_buf(),
        source,
    })?;

    let patched = patch(&theme_text, palette)?;

    fs::write(path, patched).map_err(|source| ThemeError::AssetIo {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const THEME: &str = "\
<plist version=\"1.0\">\n\
<dict>\n\
\t<key>name</key><string>Test</string>\n\
\t<key>settings</key>\n\
\t<array>\n\
\t\t<dict>\n\
\t\t\t<key>settings</key>\n\
\t\t\t<dict>\n\
\t\t\t\t<key>background</key>\n\
\t\t\t\t<string>#112233</string>\n\
\t\t\t\t<key>lineHighlight</key>\n\
\t\t\t\t<string>#445566</string>\n\
\t\t\t</dict>\n\
\t\t</dict>\n\
\t</array>\n\
</dict>\n\
</plist>\n";

    fn palette2() -> Palette {
        Palette::of(&["#ff0000", "#00ff00"])
    }

    // -- extract_setting ----------------------------------------------------

    #[test]
    fn extract_setting_finds_values() {
        assert_eq!(extract_setting(THEME, "background").unwrap(), "#112233");
        assert_eq!(extract_setting(THEME, "lineHighlight").unwrap(), "#445566");
    }

    #[test]
    fn extract_setting_missing_value() {
        let err = extract_setting(THEME, "caret").unwrap_err();
        assert!(err.to_string().contains("caret setting"));
    }

    #[test]
    fn extract_setting_missing_settings_block() {
        let err = extract_setting("<plist></plist>", "background").unwrap_err();
        assert!(err.to_string().contains("settings block"));
    }

    #[test]
    fn extract_setting_matches_whole_key() {
        // "line" must not resolve against the "lineHighlight" key.
        let err = extract_setting(THEME, "line").unwrap_err();
        assert!(err.to_string().contains("line setting"));
        assert_eq!(extract_setting(THEME, "lineHighlight").unwrap(), "#445566");
    }

    // -- generate_rules -----------------------------------------------------

    #[test]
    fn generate_rules_two_per_color() {
        let rules = generate_rules(&palette2(), "#112233", "#445566");
        assert_eq!(rules.matches("<key>scope</key>").count(), 4);
        assert!(rules.contains("<string>rainbowth0</string>"));
        assert!(rules.contains("<string>rainbowth0-lineHighlight</string>"));
        assert!(rules.contains("<string>rainbowth1</string>"));
        assert!(rules.contains("<string>rainbowth1-lineHighlight</string>"));
    }

    #[test]
    fn generate_rules_backgrounds() {
        let rules = generate_rules(&palette2(), "#112233", "#445566");
        // Normal rules carry the perturbed background, line-highlight rules
        // the cursor line color verbatim.
        assert_eq!(
            rules.matches("<key>background</key><string>#112234ff</string>").count(),
            2
        );
        assert_eq!(
            rules.matches("<key>background</key><string>#445566</string>").count(),
            2
        );
    }

    #[test]
    fn generate_rules_foregrounds_in_palette_order() {
        let rules = generate_rules(&palette2(), "#112233", "#445566");
        let first_red = rules.find("#ff0000").unwrap();
        let first_green = rules.find("#00ff00").unwrap();
        assert!(first_red < first_green);
        // Each color appears in both its rules.
        assert_eq!(rules.matches("#ff0000").count(), 2);
        assert_eq!(rules.matches("#00ff00").count(), 2);
    }

    // -- patch --------------------------------------------------------------

    #[test]
    fn patch_inserts_sentinel_block_before_array_close() {
        let patched = patch(THEME, &palette2()).unwrap();
        let open = patched.find("<!-- rainbowth -->").unwrap();
        let close = patched.find("<!-- /rainbowth -->").unwrap();
        let array_close = patched.find("</array>").unwrap();
        assert!(open < close);
        assert!(close < array_close);
    }

    #[test]
    fn patch_is_idempotent() {
        let once = patch(THEME, &palette2()).unwrap();
        let twice = patch(&once, &palette2()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn patch_with_new_palette_replaces_block() {
        let once = patch(THEME, &palette2()).unwrap();
        let other = patch(&once, &Palette::of(&["#aabbcc"])).unwrap();
        assert_eq!(other.matches("<!-- rainbowth -->").count(), 1);
        assert!(other.contains("#aabbcc"));
        assert!(!other.contains("#ff0000"));
    }

    #[test]
    fn patch_preserves_global_settings() {
        let patched = patch(THEME, &palette2()).unwrap();
        assert_eq!(extract_setting(&patched, "background").unwrap(), "#112233");
        assert_eq!(
            extract_setting(&patched, "lineHighlight").unwrap(),
            "#445566"
        );
    }

    #[test]
    fn patch_rejects_theme_without_array() {
        let theme = "<dict><key>settings</key><dict>\
                     <key>background</key><string>#111</string>\
                     <key>lineHighlight</key><string>#222</string>\
                     </dict></dict>";
        let err = patch(theme, &palette2()).unwrap_err();
        assert!(matches!(err, ThemeError::MalformedTheme { .. }));
    }

    #[test]
    fn patch_rejects_theme_without_background() {
        let theme = "<dict><key>settings</key><dict>\
                     <key>lineHighlight</key><string>#222</string>\
                     </dict></dict><array></array>";
        let err = patch(theme, &palette2()).unwrap_err();
        assert!(err.to_string().contains("background"));
    }

    #[test]
    fn depth_zero_background_is_perturbed_theme_background() {
        // End-to-end wiring check: background #112233, lineHighlight
        // #445566, palette of 2 gives exactly 4 rules and the depth-0
        // normal rule carries perturb("#112233").
        let patched = patch(THEME, &palette2()).unwrap();
        let rule0 = patched
            .split("<string>rainbowth0</string>")
            .nth(1)
            .unwrap()
            .split("</dict></dict>")
            .next()
            .unwrap();
        assert!(rule0.contains(&crate::color::perturb("#112233")));
        assert_eq!(patched.matches("<key>scope</key>").count(), 4);
    }

    // -- patch_file ---------------------------------------------------------

    #[test]
    fn patch_file_rewrites_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Test.tmTheme");
        fs::write(&path, THEME).unwrap();

        patch_file(&path, &palette2()).unwrap();

        let on_disk = fs::read_to_string(&path).unwrap();
        assert!(on_disk.contains("<!-- rainbowth -->"));
        assert_eq!(on_disk, patch(THEME, &palette2()).unwrap());
    }

    #[test]
    fn patch_file_missing_asset() {
        let dir = tempfile::tempdir().unwrap();
        let err = patch_file(&dir.path().join("absent.tmTheme"), &palette2()).unwrap_err();
        assert!(matches!(err, ThemeError::AssetIo { .. }));
    }

    #[test]
    fn patch_file_leaves_malformed_asset_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.tmTheme");
        fs::write(&path, "<plist>nothing here</plist>").unwrap();

        let err = patch_file(&path, &palette2()).unwrap_err();
        assert!(matches!(err, ThemeError::MalformedTheme { .. }));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "<plist>nothing here</plist>"
        );
    }
}
