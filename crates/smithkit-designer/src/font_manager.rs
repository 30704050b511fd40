//! System font lookup and text metrics.
//!
//! Fonts are resolved through `fontdb` once per (family, weight, style) and
//! cached for the life of the process. When no system face matches, the
//! bundled DejaVu Sans is used, so text always measures and rasterizes.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::{point, Font, Scale};
use std::{
    collections::HashMap,
    fs,
    sync::{Mutex, OnceLock},
};

/// Family used for every label and user text.
pub const DEFAULT_FAMILY: &str = "Sans";

#[derive(Clone, Eq, PartialEq, Hash)]
struct FontKey {
    family: String,
    bold: bool,
    italic: bool,
}

/// Bundled fallback face.
pub fn default_font() -> &'static Font<'static> {
    static FONT: OnceLock<Font<'static>> = OnceLock::new();
    FONT.get_or_init(|| {
        let font_data = include_bytes!("../assets/fonts/dejavu/DejaVuSans.ttf");
        Font::try_from_bytes(font_data as &[u8])
            .unwrap_or_else(|| panic!("bundled DejaVu Sans font is invalid"))
    })
}

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        tracing::debug!("Font database loaded with {} faces", db.len());
        db
    })
}

pub fn get_font_for(family: &str, bold: bool, italic: bool) -> &'static Font<'static> {
    static CACHE: OnceLock<Mutex<HashMap<FontKey, &'static Font<'static>>>> = OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    let key = FontKey {
        family: family.to_string(),
        bold,
        italic,
    };

    if let Some(font) = cache.lock().unwrap_or_else(|p| p.into_inner()).get(&key) {
        return font;
    }

    let font_ref: &'static Font<'static> = match load_font_from_system(family, bold, italic) {
        Some(font) => Box::leak(Box::new(font)),
        None => {
            tracing::warn!(
                "No system font for family '{}' (bold: {}, italic: {}), using bundled font",
                family,
                bold,
                italic
            );
            default_font()
        }
    };

    cache
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .insert(key, font_ref);
    font_ref
}

fn load_font_from_system(family: &str, bold: bool, italic: bool) -> Option<Font<'static>> {
    let families: Vec<Family<'_>> = match family.trim() {
        "" | "Sans" => vec![Family::SansSerif],
        "Serif" => vec![Family::Serif],
        "Monospace" => vec![Family::Monospace],
        other => vec![Family::Name(other), Family::SansSerif],
    };

    let query = Query {
        families: &families,
        weight: if bold { Weight::BOLD } else { Weight::NORMAL },
        stretch: Stretch::Normal,
        style: if italic { Style::Italic } else { Style::Normal },
    };

    let id = db().query(&query)?;
    let face = db().face(id)?;

    match &face.source {
        fontdb::Source::File(path) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec_and_index(bytes, face.index)
        }
        fontdb::Source::SharedFile(path, _) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec_and_index(bytes, face.index)
        }
        fontdb::Source::Binary(bytes) => {
            Font::try_from_vec_and_index(bytes.as_ref().as_ref().to_vec(), face.index)
        }
    }
}

/// Width and height of a single line of text at `font_size`.
pub fn text_extent(text: &str, font_size: f64, bold: bool) -> (f64, f64) {
    measure(get_font_for(DEFAULT_FAMILY, bold, false), text, font_size)
}

fn measure(font: &Font<'_>, text: &str, font_size: f64) -> (f64, f64) {
    let scale = Scale::uniform(font_size as f32);
    let v_metrics = font.v_metrics(scale);
    let width = font
        .layout(text, scale, point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0);
    (width as f64, (v_metrics.ascent - v_metrics.descent) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_grows_with_text_and_size() {
        let (w1, h1) = text_extent("0.2", 12.0, false);
        let (w2, _) = text_extent("0.2 0.5", 12.0, false);
        let (_, h3) = text_extent("0.2", 24.0, false);
        assert!(w1 > 0.0 && h1 > 0.0);
        assert!(w2 > w1);
        assert!(h3 > h1);
    }

    #[test]
    fn test_bundled_font_has_glyphs() {
        let font = default_font();
        assert!(font.glyph_count() > 0);
        let (w, h) = measure(font, "SMITH CHART", 16.0);
        assert!(w > 0.0 && h > 0.0);
    }

    #[test]
    fn test_empty_text_has_no_width() {
        let (w, _) = text_extent("", 12.0, false);
        assert_eq!(w, 0.0);
    }
}
