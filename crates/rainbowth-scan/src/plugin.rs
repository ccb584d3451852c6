//! Plugin surface.
//!
//! [`Rainbowth`] is the piece a host editor talks to. The host forwards
//! four events (activate, modify, selection change, close) and provides a
//! [`RegionPainter`] to paint through; everything else, from the language
//! gate to theme patching to the per-document highlight index, happens in
//! here.
//!
//! One instance serves any number of documents. All methods take `&mut
//! self`, so a host drives it from wherever it handles its events without
//! further synchronization.

use std::collections::HashMap;
use std::path::PathBuf;

use rainbowth_text::{Document, DocumentId, RegionPainter, SemanticClass};
use rainbowth_theme::{Palette, SchemeCache, patcher};
use tracing::{info, warn};

use crate::index::HighlightIndex;
use crate::scanner::scan;
use crate::settings::{Settings, SettingsError};
use crate::signs::BracketSigns;

/// The active color scheme, as told to us by the host.
#[derive(Debug)]
struct ActiveScheme {
    path: PathBuf,
    name: String,
}

/// What we know about a document we have seen.
///
/// Documents that fail the language gate are remembered as `Disabled` so
/// later modify and selection events fall through cheaply.
#[derive(Debug)]
enum DocumentContext {
    Disabled,
    Enabled {
        palette: Palette,
        index: HighlightIndex,
    },
}

/// Rainbow bracket highlighting over host-provided documents.
#[derive(Debug)]
pub struct Rainbowth {
    settings: Settings,
    signs: BracketSigns,
    cache: SchemeCache,
    scheme: Option<ActiveScheme>,
    contexts: HashMap<DocumentId, DocumentContext>,
}

impl Rainbowth {
    /// Build the plugin from settings and a scheme cache.
    ///
    /// # Errors
    ///
    /// Sign validation errors from the settings, surfaced here so a bad
    /// `custom_signs` block fails loudly at startup instead of on the
    /// first scan.
    pub fn new(settings: Settings, cache: SchemeCache) -> Result<Self, SettingsError> {
        let signs = settings.signs()?;
        Ok(Self {
            settings,
            signs,
            cache,
            scheme: None,
            contexts: HashMap::new(),
        })
    }

    /// Tell the plugin which color scheme asset the host is using.
    ///
    /// The scheme's name, used for palette lookup and cache gating, is the
    /// asset's file stem. Takes effect on the next activation.
    pub fn set_color_scheme(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        let name = path.file_stem().map_or_else(
            || path.to_string_lossy().into_owned(),
            |stem| stem.to_string_lossy().into_owned(),
        );
        self.scheme = Some(ActiveScheme { path, name });
    }

    /// The palette in effect for `doc`, if it is enabled.
    #[must_use]
    pub fn palette(&self, doc: DocumentId) -> Option<&Palette> {
        match self.contexts.get(&doc) {
            Some(DocumentContext::Enabled { palette, .. }) => Some(palette),
            _ => None,
        }
    }

    /// Whether `doc` passed the language gate on its last activation.
    #[must_use]
    pub fn is_enabled(&self, doc: DocumentId) -> bool {
        matches!(
            self.contexts.get(&doc),
            Some(DocumentContext::Enabled { .. })
        )
    }

    /// A document became active.
    ///
    /// Runs the language gate, patches the color scheme when the cache
    /// says its rules are missing or stale, and performs the initial scan
    /// and paint.
    pub fn on_activate(&mut self, doc: &dyn Document, painter: &mut dyn RegionPainter) {
        // Re-activation rebuilds the context from current settings and
        // scheme; whatever the old context painted is retired first.
        if let Some(DocumentContext::Enabled { index, .. }) = self.contexts.get(&doc.id()) {
            index.clear(painter);
        }
        if !self.settings.language_enabled(doc.language()) {
            self.contexts.insert(doc.id(), DocumentContext::Disabled);
            return;
        }
        let palette = self
            .settings
            .palette_for(self.scheme.as_ref().map(|scheme| scheme.name.as_str()));
        self.ensure_scheme_patched(&palette);
        let index = HighlightIndex::new(doc.id(), palette.len());
        self.contexts
            .insert(doc.id(), DocumentContext::Enabled { palette, index });
        self.on_modified(doc, painter);
    }

    /// The document's text changed; rescan and repaint.
    pub fn on_modified(&mut self, doc: &dyn Document, painter: &mut dyn RegionPainter) {
        let Some(DocumentContext::Enabled { palette, index }) = self.contexts.get_mut(&doc.id())
        else {
            return;
        };
        let mut excluded = Vec::new();
        if self.settings.disable_inside_comment() {
            excluded.extend(doc.semantic_spans(SemanticClass::Comment));
        }
        if self.settings.disable_inside_string() {
            excluded.extend(doc.semantic_spans(SemanticClass::String));
        }
        let result = scan(doc, &self.signs, &excluded, palette.len());
        index.install(result, painter);
        index.move_highlight(cursor_line(doc), painter);
    }

    /// The selection moved; shift the line highlight if needed.
    pub fn on_selection_changed(&mut self, doc: &dyn Document, painter: &mut dyn RegionPainter) {
        let Some(DocumentContext::Enabled { index, .. }) = self.contexts.get_mut(&doc.id()) else {
            return;
        };
        index.move_highlight(cursor_line(doc), painter);
    }

    /// The document went away; unpaint it and forget it.
    pub fn on_close(&mut self, doc: DocumentId, painter: &mut dyn RegionPainter) {
        if let Some(DocumentContext::Enabled { index, .. }) = self.contexts.remove(&doc) {
            index.clear(painter);
        }
    }

    /// Patch the scheme asset with `palette` unless the cache says that
    /// exact palette is already in it.
    ///
    /// Patch failures are logged and swallowed: a read-only theme must
    /// not take bracket scanning down with it.
    fn ensure_scheme_patched(&mut self, palette: &Palette) {
        let Some(scheme) = &self.scheme else {
            return;
        };
        if !self.cache.should_patch(&scheme.name, palette) {
            return;
        }
        info!(scheme = %scheme.name, "patching color scheme");
        match patcher::patch_file(&scheme.path, palette) {
            Ok(()) => {
                if let Err(err) = self.cache.record(&scheme.name, palette) {
                    warn!(%err, "could not persist the scheme cache");
                }
            }
            Err(err) => {
                warn!(%err, "color scheme patch failed; highlighting continues unthemed");
            }
        }
    }
}

/// The line to highlight for the current selection.
///
/// Only a single empty caret pins a line; multiple cursors or an actual
/// selection park the highlight.
fn cursor_line(doc: &dyn Document) -> Option<usize> {
    match doc.selection().as_slice() {
        [caret] if caret.is_empty() => Some(doc.line_of(caret.start)),
        _ => None,
    }
}
