//! User settings.
//!
//! Settings load from a JSON file with every key optional; anything absent
//! falls back to a default that suits the lisp family. Palette lookup runs
//! a three-step chain (scheme-named entry, `"default"` entry, built-in
//! rainbow), skipping empty palettes so a stray `[]` in the file can never
//! produce a zero-color scan.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rainbowth_theme::Palette;
use serde::Deserialize;
use thiserror::Error;

use crate::signs::BracketSigns;

// -----------------------------------------------------------------------------
// Errors
// -----------------------------------------------------------------------------

/// Failures while loading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("cannot read settings {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The settings file is not valid JSON of the expected shape.
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// A custom sign configuration has no characters on one side.
    #[error("custom signs define no {side} characters")]
    EmptySigns {
        /// Which side is empty, `"opener"` or `"closer"`.
        side: &'static str,
    },

    /// A character is configured as both opener and closer.
    #[error("custom signs use {chars:?} as both opener and closer")]
    AmbiguousSigns {
        /// The offending characters.
        chars: String,
    },
}

// -----------------------------------------------------------------------------
// Settings
// -----------------------------------------------------------------------------

/// The parsed settings file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    palettes: BTreeMap<String, Palette>,
    languages: Vec<String>,
    exclude_languages: bool,
    custom_signs: CustomSigns,
    disable_inside_string: bool,
    disable_inside_comment: bool,
}

/// The `custom_signs` settings block.
///
/// `prefix` holds the opener characters and `suffix` the closers; the
/// block only takes effect when `enabled` is set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CustomSigns {
    enabled: bool,
    prefix: String,
    suffix: String,
}

impl Settings {
    /// Load settings from a JSON file.
    ///
    /// # Errors
    ///
    /// [`SettingsError::Io`] when the file cannot be read,
    /// [`SettingsError::Parse`] when it is not valid settings JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parse settings from JSON text.
    ///
    /// # Errors
    ///
    /// [`SettingsError::Parse`] when the text is not valid settings JSON.
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Pick the palette for a color scheme.
    ///
    /// Tries the entry named after the scheme, then the `"default"` entry,
    /// then the built-in rainbow. Empty palettes are skipped, so the
    /// result always has at least one color.
    #[must_use]
    pub fn palette_for(&self, scheme: Option<&str>) -> Palette {
        scheme
            .and_then(|name| self.palettes.get(name))
            .filter(|palette| !palette.is_empty())
            .or_else(|| {
                self.palettes
                    .get("default")
                    .filter(|palette| !palette.is_empty())
            })
            .cloned()
            .unwrap_or_else(default_palette)
    }

    /// The bracket signs the scanner should look for.
    ///
    /// # Errors
    ///
    /// Validation errors from [`BracketSigns::custom`] when the
    /// `custom_signs` block is enabled but unusable.
    pub fn signs(&self) -> Result<BracketSigns, SettingsError> {
        if self.custom_signs.enabled {
            BracketSigns::custom(&self.custom_signs.prefix, &self.custom_signs.suffix)
        } else {
            Ok(BracketSigns::default())
        }
    }

    /// Whether documents in `language` get rainbow brackets.
    ///
    /// Documents without a language are always disabled. Otherwise the
    /// `languages` list is an allow list, or a deny list when
    /// `exclude_languages` is set.
    #[must_use]
    pub fn language_enabled(&self, language: Option<&str>) -> bool {
        let Some(language) = language else {
            return false;
        };
        let listed = self.languages.iter().any(|entry| entry == language);
        listed != self.exclude_languages
    }

    /// Whether brackets inside string literals are skipped.
    #[inline]
    #[must_use]
    pub const fn disable_inside_string(&self) -> bool {
        self.disable_inside_string
    }

    /// Whether brackets inside comments are skipped.
    #[inline]
    #[must_use]
    pub const fn disable_inside_comment(&self) -> bool {
        self.disable_inside_comment
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            palettes: BTreeMap::new(),
            languages: ["lisp", "scheme", "clojure", "clojurescript"]
                .map(str::to_owned)
                .to_vec(),
            exclude_languages: false,
            custom_signs: CustomSigns::default(),
            disable_inside_string: true,
            disable_inside_comment: true,
        }
    }
}

impl Default for CustomSigns {
    fn default() -> Self {
        Self {
            enabled: false,
            prefix: "([".to_owned(),
            suffix: ")]".to_owned(),
        }
    }
}

/// The built-in fallback palette.
#[must_use]
pub fn default_palette() -> Palette {
    Palette::of(&[
        "#e06c75", "#e5c07b", "#98c379", "#56b6c2", "#61afef", "#c678dd",
    ])
}
