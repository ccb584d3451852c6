//! Error types for theme patching and the scheme cache.

use std::io;
use std::path::PathBuf;

/// Errors that can occur while patching a theme asset or persisting the
/// scheme cache.
///
/// A corrupt cache *store* is deliberately not represented here: an
/// unreadable store is treated as an empty cache and heals on the next
/// successful write.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// The asset is missing a structure the patcher relies on (the global
    /// settings dict, a named setting, or the rules array to splice into).
    /// The asset is left untouched and the cache is not updated, so the
    /// next activation retries.
    #[error("malformed theme asset: missing {what}")]
    MalformedTheme { what: String },

    /// Reading or writing the theme asset failed.
    #[error("theme asset I/O failed for {}: {source}", path.display())]
    AssetIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the cache store failed. The in-memory cache is left
    /// unchanged so the patch is retried next time.
    #[error("cache store write failed for {}: {source}", path.display())]
    CacheIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ThemeError {
    /// Shorthand for the malformed-asset case.
    #[must_use]
    pub fn malformed(what: impl Into<String>) -> Self {
        Self::MalformedTheme { what: what.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_message_names_the_missing_piece() {
        let err = ThemeError::malformed("background setting");
        assert_eq!(
            err.to_string(),
            "malformed theme asset: missing background setting"
        );
    }

    #[test]
    fn io_errors_carry_the_path() {
        let err = ThemeError::AssetIo {
            path: PathBuf::from("/tmp/x.tmTheme"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/tmp/x.tmTheme"));
    }
}
