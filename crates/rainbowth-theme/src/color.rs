//! Hex color canonicalization and deterministic perturbation.
//!
//! Theme assets carry colors as `#RGB`, `#RRGGBB`, or `#RRGGBBAA` strings.
//! Everything here normalizes to the 9-char `#rrggbbaa` form before doing
//! arithmetic, and everything is best-effort: a string that is not a hex
//! color passes through [`perturb`] unchanged rather than erroring, since a
//! cosmetically un-nudged background is strictly better than a failed
//! patch.

// ---------------------------------------------------------------------------
// Canonicalization
// ---------------------------------------------------------------------------

/// Normalize a hex color to the 9-char lowercase `#rrggbbaa` form.
///
/// - `#RGB` doubles each digit and gains an opaque alpha: `#abc` becomes
///   `#aabbccff`
/// - `#RRGGBB` gains an opaque alpha: `#112233` becomes `#112233ff`
/// - `#RRGGBBAA` is lowercased as-is
///
/// Returns `None` for anything else (wrong length, missing `#`, non-hex
/// digits).
#[must_use]
pub fn canonicalize(color: &str) -> Option<String> {
    let digits = color.strip_prefix('#')?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let expanded = match digits.len() {
        3 => {
            let mut out = String::with_capacity(8);
            for ch in digits.chars() {
                out.push(ch);
                out.push(ch);
            }
            out.push_str("ff");
            out
        }
        6 => format!("{digits}ff"),
        8 => digits.to_owned(),
        _ => return None,
    };
    Some(format!("#{}", expanded.to_ascii_lowercase()))
}

// ---------------------------------------------------------------------------
// Perturbation
// ---------------------------------------------------------------------------

/// Nudge a color by one blue-channel step, deterministically.
///
/// The canonical 8 hex digits are read as one `u32` (`0xRRGGBBAA`). When
/// the blue byte is saturated (`value & 0xff00 == 0xff00`) the value steps
/// down by `0x100`, otherwise up by `0x100`. The result is always the
/// 9-char lowercase form and always differs from the canonical input by
/// exactly one blue step, which is invisible to the eye but distinct to
/// the theme engine — the whole point: a background that is *almost* the
/// theme background, so depth scopes restyle without looking styled.
///
/// Malformed input is returned unchanged.
#[must_use]
pub fn perturb(color: &str) -> String {
    let Some(canonical) = canonicalize(color) else {
        return color.to_owned();
    };
    let Ok(value) = u32::from_str_radix(&canonical[1..], 16) else {
        return color.to_owned();
    };
    // Blue byte saturated: step down so the nudge never carries into green.
    let nudged = if value & 0xff00 == 0xff00 {
        value - 0x100
    } else {
        value + 0x100
    };
    format!("#{nudged:08x}")
}

// ---------------------------------------------------------------------------
// Channel extraction
// ---------------------------------------------------------------------------

/// Split a hex color into `(r, g, b, a)` bytes, canonicalizing first.
///
/// Returns `None` for malformed input.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // each channel is masked to 8 bits
pub fn rgba(color: &str) -> Option<(u8, u8, u8, u8)> {
    let canonical = canonicalize(color)?;
    let value = u32::from_str_radix(&canonical[1..], 16).ok()?;
    Some((
        (value >> 24) as u8,
        ((value >> 16) & 0xff) as u8,
        ((value >> 8) & 0xff) as u8,
        (value & 0xff) as u8,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
