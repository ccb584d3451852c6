//! Persistent scheme cache.
//!
//! Records which palette each scheme's asset was last patched with, so
//! activation can skip the rewrite when nothing changed. The store is a
//! single JSON object (`{ "SchemeName": ["#color", ...] }`) at a fixed
//! path; it loads lazily on first query and stays memoized for the life of
//! the service.
//!
//! The cache is an availability device, never a source of truth: a missing
//! or unreadable store just means "patch again", and a successful
//! [`record`](SchemeCache::record) rewrites the whole store, healing any
//! earlier corruption. Construct one `SchemeCache` at startup and pass it
//! by reference; access is `&mut self` and a concurrent host must
//! serialize it externally.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ThemeError;
use crate::palette::Palette;

// ---------------------------------------------------------------------------
// SchemeCache
// ---------------------------------------------------------------------------

/// Scheme-name → last-patched-palette map with a JSON file behind it.
#[derive(Debug)]
pub struct SchemeCache {
    store_path: PathBuf,
    entries: Option<BTreeMap<String, Palette>>,
}

impl SchemeCache {
    /// Create the service. No I/O happens until the first query.
    #[must_use]
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
            entries: None,
        }
    }

    /// Where the store lives on disk.
    #[inline]
    #[must_use]
    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// True when the scheme's asset needs patching: either the scheme has
    /// never been recorded or it was recorded with a different palette.
    ///
    /// Structural comparison — same colors in a different order still
    /// means "patch".
    pub fn should_patch(&mut self, scheme: &str, palette: &Palette) -> bool {
        self.entries_mut().get(scheme) != Some(palette)
    }

    /// Record that the scheme's asset now carries `palette`.
    ///
    /// Persists the whole map (creating parent directories as needed) and
    /// only then updates the in-memory state, so a failed write leaves
    /// [`should_patch`](Self::should_patch) answering `true` and the next
    /// activation retries.
    ///
    /// # Errors
    ///
    /// [`ThemeError::CacheIo`] when the store cannot be written.
    pub fn record(&mut self, scheme: &str, palette: &Palette) -> Result<(), ThemeError> {
        let mut next = self.entries_mut().clone();
        next.insert(scheme.to_owned(), palette.clone());

        let json = serde_json::to_string(&next).map_err(|err| ThemeError::CacheIo {
            path: self.store_path.clone(),
            source: err.into(),
        })?;

        if let Some(dir) = self.store_path.parent() {
            fs::create_dir_all(dir).map_err(|source| ThemeError::CacheIo {
                path: self.store_path.clone(),
                source,
            })?;
        }
        fs::write(&self.store_path, json).map_err(|source| ThemeError::CacheIo {
            path: self.store_path.clone(),
            source,
        })?;

        self.entries = Some(next);
        Ok(())
    }

    /// The palette last recorded for a scheme, if any.
    pub fn recorded(&mut self, scheme: &str) -> Option<&Palette> {
        self.entries_mut().get(scheme)
    }

    fn entries_mut(&mut self) -> &mut BTreeMap<String, Palette> {
        let path = &self.store_path;
        self.entries.get_or_insert_with(|| load_store(path))
    }
}

/// Load the store, treating every failure as an empty cache.
fn load_store(path: &Path) -> BTreeMap<String, Palette> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            if err.kind() != std::io::ErrorKind::NotFound {
                debug!(path = %path.display(), %err, "cache store unreadable, starting empty");
            }
            return BTreeMap::new();
        }
    };
    match serde_json::from_str(&text) {
        Ok(entries) => entries,
        Err(err) => {
            debug!(path = %path.display(), %err, "cache store corrupt, starting empty");
            BTreeMap::new()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn palette_a() -> Palette {
        Palette::of(&["#ff0000", "#00ff00"])
    }

    fn palette_b() -> Palette {
        Palette::of(&["#00ff00", "#ff0000"])
    }

    // -- Gating -------------------------------------------------------------

    #[test]
    fn unknown_scheme_needs_patch() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = SchemeCache::new(dir.path().join("schemes.json"));
        assert!(cache.should_patch("Monokai", &palette_a()));
    }

    #[test]
    fn recorded_scheme_skips_patch() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = SchemeCache::new(dir.path().join("schemes.json"));
        cache.record("Monokai", &palette_a()).unwrap();
        assert!(!cache.should_patch("Monokai", &palette_a()));
    }

    #[test]
    fn palette_change_needs_patch_again() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = SchemeCache::new(dir.path().join("schemes.json"));
        cache.record("Monokai", &palette_a()).unwrap();
        // Same colors reordered still count as a different palette.
        assert!(cache.should_patch("Monokai", &palette_b()));
        assert!(cache.should_patch("Solarized", &palette_a()));
    }

    // -- Persistence --------------------------------------------------------

    #[test]
    fn records_persist_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("schemes.json");

        let mut first = SchemeCache::new(&store);
        first.record("Monokai", &palette_a()).unwrap();

        let mut second = SchemeCache::new(&store);
        assert!(!second.should_patch("Monokai", &palette_a()));
        assert_eq!(second.recorded("Monokai"), Some(&palette_a()));
    }

    #[test]
    fn record_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("nested").join("deeper").join("schemes.json");
        let mut cache = SchemeCache::new(&store);
        cache.record("Monokai", &palette_a()).unwrap();
        assert!(store.exists());
    }

    #[test]
    fn store_is_a_json_object_of_color_arrays() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("schemes.json");
        let mut cache = SchemeCache::new(&store);
        cache.record("Monokai", &palette_a()).unwrap();

        let raw = fs::read_to_string(&store).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["Monokai"][0], "#ff0000");
        assert_eq!(value["Monokai"][1], "#00ff00");
    }

    #[test]
    fn record_overwrites_previous_palette() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("schemes.json");
        let mut cache = SchemeCache::new(&store);
        cache.record("Monokai", &palette_a()).unwrap();
        cache.record("Monokai", &palette_b()).unwrap();

        let mut reread = SchemeCache::new(&store);
        assert_eq!(reread.recorded("Monokai"), Some(&palette_b()));
    }

    // -- Self-healing -------------------------------------------------------

    #[test]
    fn corrupt_store_is_treated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("schemes.json");
        fs::write(&store, "{ not json ]").unwrap();

        let mut cache = SchemeCache::new(&store);
        assert!(cache.should_patch("Monokai", &palette_a()));
    }

    #[test]
    fn corrupt_store_heals_on_next_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("schemes.json");
        fs::write(&store, "garbage").unwrap();

        let mut cache = SchemeCache::new(&store);
        cache.record("Monokai", &palette_a()).unwrap();

        let mut reread = SchemeCache::new(&store);
        assert!(!reread.should_patch("Monokai", &palette_a()));
    }

    #[test]
    fn load_is_memoized() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("schemes.json");

        let mut writer = SchemeCache::new(&store);
        writer.record("Monokai", &palette_a()).unwrap();

        let mut cache = SchemeCache::new(&store);
        assert!(!cache.should_patch("Monokai", &palette_a()));

        // A later external rewrite is not observed: the first load sticks
        // for the life of the service.
        fs::write(&store, "{}").unwrap();
        assert!(!cache.should_patch("Monokai", &palette_a()));
    }
}
