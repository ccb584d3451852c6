//! Bracket sign sets.
//!
//! Which characters count as openers and closers is configuration, not a
//! hardcoded pair of literals: the default `(` `[` / `)` `]` suits the lisp
//! family, and `custom_signs` in the settings file swaps in anything else.
//! A [`BracketSigns`] value is always valid — the constructors reject
//! configurations the scanner could not interpret.

use crate::settings::SettingsError;

/// Validated opener/closer character sets.
///
/// Membership is by `char`, so multi-byte characters work as signs. A
/// character may appear in at most one of the two sets; the scanner's
/// depth arithmetic has no sensible reading for a sign that both opens
/// and closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketSigns {
    openers: String,
    closers: String,
}

impl BracketSigns {
    /// Build custom sign sets, validating them.
    ///
    /// # Errors
    ///
    /// [`SettingsError::EmptySigns`] when either set is empty,
    /// [`SettingsError::AmbiguousSigns`] when a character appears in both.
    pub fn custom(openers: &str, closers: &str) -> Result<Self, SettingsError> {
        if openers.is_empty() {
            return Err(SettingsError::EmptySigns { side: "opener" });
        }
        if closers.is_empty() {
            return Err(SettingsError::EmptySigns { side: "closer" });
        }
        let ambiguous: String = openers.chars().filter(|c| closers.contains(*c)).collect();
        if !ambiguous.is_empty() {
            return Err(SettingsError::AmbiguousSigns { chars: ambiguous });
        }
        Ok(Self {
            openers: openers.to_owned(),
            closers: closers.to_owned(),
        })
    }

    /// The opener characters.
    #[inline]
    #[must_use]
    pub fn openers(&self) -> &str {
        &self.openers
    }

    /// The closer characters.
    #[inline]
    #[must_use]
    pub fn closers(&self) -> &str {
        &self.closers
    }

    /// All sign characters, for handing to a document's char-class search.
    #[must_use]
    pub fn search_set(&self) -> String {
        format!("{}{}", self.openers, self.closers)
    }

    /// True when `c` opens a nesting level.
    #[inline]
    #[must_use]
    pub fn is_opener(&self, c: char) -> bool {
        self.openers.contains(c)
    }

    /// True when `c` closes a nesting level.
    #[inline]
    #[must_use]
    pub fn is_closer(&self, c: char) -> bool {
        self.closers.contains(c)
    }
}

impl Default for BracketSigns {
    /// The lisp-family default: `(` `[` open, `)` `]` close.
    fn default() -> Self {
        Self {
            openers: "([".to_owned(),
            closers: ")]".to_owned(),
        }
    }
}
