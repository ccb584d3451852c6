// SPDX-License-Identifier: MIT
//
// rainbowth — depth-colored bracket highlighting, demoed in a terminal.
//
// This is the demo host that wires together all the crates:
//
//   rainbowth-text  → documents, spans, the painter capability
//   rainbowth-scan  → bracket scanner, highlight index, plugin surface
//   rainbowth-theme → palettes, color perturbation, theme patching, cache
//
// The pieces a real editor would provide live here: a small lisp-aware
// lexer stands in for the host's syntax engine (comment and string spans),
// and AnsiPainter implements the RegionPainter capability by remembering
// scope → regions and rendering the document to stdout in 24-bit color.
// A file flows through:
//
//   file → TextDocument → on_activate → scan / patch / paint → ANSI dump

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::process;

use rainbowth_scan::settings::default_palette;
use rainbowth_scan::{Rainbowth, Settings};
use rainbowth_text::{Document, DocumentId, RegionPainter, SemanticClass, Span, TextDocument};
use rainbowth_theme::color::rgba;
use rainbowth_theme::scope::parse_scope_key;
use rainbowth_theme::{Palette, SchemeCache};
use tracing::info;
use tracing_subscriber::EnvFilter;

// ─── Command line ───────────────────────────────────────────────────────────

const USAGE: &str = "usage: rainbowth [--settings FILE] [--theme FILE] [--cache FILE] [--line N] FILE";

struct Args {
    settings: Option<PathBuf>,
    theme: Option<PathBuf>,
    cache: Option<PathBuf>,
    /// 1-based caret line.
    line: Option<usize>,
    file: PathBuf,
}

fn parse_args() -> Result<Args, String> {
    let mut args = env::args().skip(1);
    let mut settings = None;
    let mut theme = None;
    let mut cache = None;
    let mut line = None;
    let mut file = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--settings" => {
                settings = Some(PathBuf::from(
                    args.next().ok_or("--settings needs a file argument")?,
                ));
            }
            "--theme" => {
                theme = Some(PathBuf::from(
                    args.next().ok_or("--theme needs a file argument")?,
                ));
            }
            "--cache" => {
                cache = Some(PathBuf::from(
                    args.next().ok_or("--cache needs a file argument")?,
                ));
            }
            "--line" => {
                let value = args.next().ok_or("--line needs a line number")?;
                line = Some(
                    value
                        .parse()
                        .map_err(|_| format!("--line: not a line number: {value}"))?,
                );
            }
            "--help" | "-h" => {
                println!("{USAGE}");
                process::exit(0);
            }
            _ if arg.starts_with('-') => return Err(format!("unknown option: {arg}")),
            _ => file = Some(PathBuf::from(arg)),
        }
    }

    let file = file.ok_or(USAGE)?;
    Ok(Args {
        settings,
        theme,
        cache,
        line,
        file,
    })
}

// ─── Lisp lexing ────────────────────────────────────────────────────────────

/// Comment and string spans for lisp-family text.
///
/// `;` opens a comment that runs to the end of the line (newline not
/// included); `"` opens a string that runs to its closing quote, with
/// backslash escaping the next character. A `;` inside a string or a `"`
/// inside a comment does not open anything. Unterminated strings extend
/// to the end of the text. Offsets are char offsets.
fn lex_semantic_spans(text: &str) -> (Vec<Span>, Vec<Span>) {
    let chars: Vec<char> = text.chars().collect();
    let mut comments = Vec::new();
    let mut strings = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            ';' => {
                let start = i;
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
                comments.push(Span::new(start, i));
            }
            '"' => {
                let start = i;
                i += 1;
                while i < chars.len() {
                    match chars[i] {
                        '\\' => i += 2,
                        '"' => {
                            i += 1;
                            break;
                        }
                        _ => i += 1,
                    }
                }
                strings.push(Span::new(start, i.min(chars.len())));
            }
            _ => i += 1,
        }
    }

    (comments, strings)
}

/// Char offset of the first character on `line` (0-based).
///
/// Past the last line, returns the end of the text.
fn line_start_offset(text: &str, line: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let mut remaining = line;
    for (offset, ch) in text.chars().enumerate() {
        if ch == '\n' {
            remaining -= 1;
            if remaining == 0 {
                return offset + 1;
            }
        }
    }
    text.chars().count()
}

// ─── ANSI painter ───────────────────────────────────────────────────────────

/// A [`RegionPainter`] that renders to ANSI-colored text.
///
/// Scope keys carry the depth and highlight flag, so rendering only needs
/// the palette: regions under a normal key get that depth's color as the
/// foreground, regions under a line-highlight key additionally get a dim
/// gray background.
#[derive(Default)]
struct AnsiPainter {
    scopes: HashMap<String, Vec<Span>>,
}

impl RegionPainter for AnsiPainter {
    fn paint_regions(&mut self, _doc: DocumentId, scope: &str, regions: &[Span]) {
        self.scopes.insert(scope.to_owned(), regions.to_vec());
    }

    fn clear_regions(&mut self, _doc: DocumentId, scope: &str) {
        self.scopes.remove(scope);
    }
}

impl AnsiPainter {
    /// Offset → (depth color, highlighted) over all painted scopes.
    fn color_map(&self, palette: &Palette) -> HashMap<usize, (String, bool)> {
        let mut map = HashMap::new();
        for (key, regions) in &self.scopes {
            let Some((depth, highlighted)) = parse_scope_key(key) else {
                continue;
            };
            let color = palette.color_for(depth);
            for region in regions {
                for offset in region.start..region.end {
                    map.insert(offset, (color.to_owned(), highlighted));
                }
            }
        }
        map
    }

    fn render(&self, text: &str, palette: &Palette) -> String {
        let colors = self.color_map(palette);
        let mut out = String::new();
        for (offset, ch) in text.chars().enumerate() {
            match colors.get(&offset) {
                Some((color, highlighted)) => {
                    let (r, g, b, _) = rgba(color).unwrap_or((255, 255, 255, 255));
                    if *highlighted {
                        out.push_str("\x1b[48;2;64;64;64m");
                    }
                    out.push_str(&format!("\x1b[38;2;{r};{g};{b}m{ch}\x1b[0m"));
                }
                None => out.push(ch),
            }
        }
        out
    }
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args().unwrap_or_else(|err| {
        eprintln!("rainbowth: {err}");
        process::exit(1);
    });

    let settings = match &args.settings {
        Some(path) => Settings::load(path).unwrap_or_else(|err| {
            eprintln!("rainbowth: {err}");
            process::exit(1);
        }),
        None => Settings::default(),
    };

    let store = args
        .cache
        .clone()
        .unwrap_or_else(|| env::temp_dir().join("rainbowth").join("schemes.json"));
    let mut plugin = Rainbowth::new(settings, SchemeCache::new(store)).unwrap_or_else(|err| {
        eprintln!("rainbowth: {err}");
        process::exit(1);
    });
    if let Some(theme) = &args.theme {
        plugin.set_color_scheme(theme);
    }

    let mut doc = TextDocument::from_file(DocumentId(1), &args.file).unwrap_or_else(|err| {
        eprintln!("rainbowth: {}: {err}", args.file.display());
        process::exit(1);
    });
    let text = doc.contents();
    let (comments, strings) = lex_semantic_spans(&text);
    doc.set_semantic_spans(SemanticClass::Comment, comments);
    doc.set_semantic_spans(SemanticClass::String, strings);
    info!(path = %args.file.display(), lines = doc.line_count(), "document loaded");

    let mut painter = AnsiPainter::default();
    plugin.on_activate(&doc, &mut painter);
    if let Some(line) = args.line {
        doc.set_cursor(line_start_offset(&text, line.saturating_sub(1)));
        plugin.on_selection_changed(&doc, &mut painter);
    }

    if !plugin.is_enabled(doc.id()) {
        eprintln!(
            "rainbowth: {}: language not enabled, printing plain",
            args.file.display()
        );
        print!("{text}");
        return;
    }

    let palette = plugin
        .palette(doc.id())
        .cloned()
        .unwrap_or_else(default_palette);
    print!("{}", painter.render(&text, &palette));
}

// ─── Tests ──────────────────────────────────────────────────────────────────
