//! Font registry and text layout for text decorations

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use ab_glyph::{Font, FontArc, FontVec, OutlineCurve};
use tailor_config::AssetConfig;
use tiny_skia::PathBuilder;
use tracing::{debug, info, warn};
use usvg::fontdb::{Database, Family, Query};

use crate::assets::AssetSource;
use crate::constants::{FALLBACK_ADVANCE, LINE_HEIGHT};
use crate::error::SurfaceError;

/// Laid out text in object-local coordinates (origin at the top-left)
#[derive(Debug, Clone)]
pub struct TextLayout {
    pub width: f32,
    pub height: f32,
    /// Glyph outlines, `None` when no font could be resolved
    pub path: Option<tiny_skia::Path>,
}

/// Fonts available to text decorations, keyed by family name
#[derive(Default, Clone)]
pub struct FontBook {
    fonts: HashMap<String, FontArc>,
    /// Family used when a requested family is not registered
    fallback: Option<String>,
    /// Resolve unregistered families against installed fonts
    system: bool,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("families", &self.fonts.keys().collect::<Vec<_>>())
            .field("fallback", &self.fallback)
            .field("system", &self.system)
            .finish()
    }
}

impl FontBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every configured font, skipping files that fail to load
    pub fn load(config: &AssetConfig, assets: &dyn AssetSource) -> Self {
        let mut book = Self {
            system: config.system_fonts,
            ..Self::new()
        };
        for entry in &config.fonts {
            let result = assets
                .read(&entry.path)
                .and_then(|bytes| book.register(&entry.family, bytes));
            if let Err(e) = result {
                warn!("Font {} not loaded: {}", entry.family, e);
            }
        }
        info!(
            "Font book ready with {} families (system fonts: {})",
            book.fonts.len(),
            book.system
        );
        book
    }

    /// Fall back to installed fonts for families that are not registered
    pub fn with_system_fonts(mut self) -> Self {
        self.system = true;
        self
    }

    /// Register a font file under a family name. The first family becomes the fallback.
    pub fn register(&mut self, family: &str, bytes: Vec<u8>) -> Result<(), SurfaceError> {
        let font = FontArc::try_from_vec(bytes).map_err(|_| SurfaceError::Font {
            family: family.to_string(),
        })?;
        let key = family.to_lowercase();
        if self.fallback.is_none() {
            self.fallback = Some(key.clone());
        }
        self.fonts.insert(key, font);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Registered family, then installed family, then registered fallback,
    /// then the installed default face
    fn resolve(&self, family: &str) -> Option<FontArc> {
        if let Some(font) = self.fonts.get(&family.to_lowercase()) {
            return Some(font.clone());
        }
        if self.system {
            if let Some(font) = system_font(family) {
                return Some(font);
            }
        }
        let fallback = self
            .fallback
            .as_ref()
            .and_then(|fallback| self.fonts.get(fallback))
            .cloned();
        if fallback.is_some() || !self.system {
            return fallback;
        }
        system_default()
    }

    /// Lay out `text` at `font_size` pixels per em. Lines are split on `\n`.
    pub fn layout(&self, text: &str, family: &str, font_size: f32) -> TextLayout {
        let line_count = text.split('\n').count().max(1);
        let height = line_count as f32 * font_size * LINE_HEIGHT;

        let Some(font) = self.resolve(family) else {
            debug!("No font for {}, using estimated metrics", family);
            let longest = text.split('\n').map(|l| l.chars().count()).max().unwrap_or(0);
            return TextLayout {
                width: longest as f32 * font_size * FALLBACK_ADVANCE,
                height,
                path: None,
            };
        };

        let units_per_em = font.units_per_em().unwrap_or(1000.0);
        let factor = font_size / units_per_em;
        let ascent = font.ascent_unscaled() * factor;

        let mut builder = PathBuilder::new();
        let mut width: f32 = 0.0;

        for (line_index, line) in text.split('\n').enumerate() {
            let baseline = line_index as f32 * font_size * LINE_HEIGHT + ascent;
            let mut pen_x = 0.0;
            let mut previous = None;

            for c in line.chars() {
                let glyph = font.glyph_id(c);
                if let Some(previous) = previous {
                    pen_x += font.kern_unscaled(previous, glyph) * factor;
                }
                if let Some(outline) = font.outline(glyph) {
                    let to_local =
                        |p: ab_glyph::Point| (pen_x + p.x * factor, baseline - p.y * factor);
                    append_outline(&mut builder, &outline.curves, to_local);
                }
                pen_x += font.h_advance_unscaled(glyph) * factor;
                previous = Some(glyph);
            }
            width = width.max(pen_x);
        }

        TextLayout {
            width,
            height,
            path: builder.finish(),
        }
    }
}

// ============================================================================
// Installed fonts
// ============================================================================

fn system_database() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        info!("Indexed {} installed font faces", db.len());
        db
    })
}

fn load_face(query: &Query<'_>) -> Option<FontArc> {
    let db = system_database();
    let id = db.query(query)?;
    db.with_face_data(id, |data, index| FontVec::try_from_vec_and_index(data.to_vec(), index))?
        .ok()
        .map(FontArc::new)
}

/// Installed font for a family name, cached per family
fn system_font(family: &str) -> Option<FontArc> {
    static CACHE: OnceLock<Mutex<HashMap<String, Option<FontArc>>>> = OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    let key = family.trim().to_lowercase();

    if let Some(font) = cache.lock().unwrap_or_else(|p| p.into_inner()).get(&key) {
        return font.clone();
    }

    let families = match key.as_str() {
        "" | "sans-serif" => vec![Family::SansSerif],
        "serif" => vec![Family::Serif],
        "monospace" => vec![Family::Monospace],
        _ => vec![Family::Name(family.trim())],
    };
    let font = load_face(&Query {
        families: &families,
        ..Default::default()
    });
    if font.is_none() {
        debug!("No installed font for {}", family);
    }

    cache
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .insert(key, font.clone());
    font
}

/// Common sans-serif families tried when the generic family is unmapped
const SANS_FAMILIES: [&str; 4] = ["sans-serif", "DejaVu Sans", "Liberation Sans", "Noto Sans"];

/// Installed sans-serif face, or the first indexed face
fn system_default() -> Option<FontArc> {
    static DEFAULT: OnceLock<Option<FontArc>> = OnceLock::new();
    DEFAULT
        .get_or_init(|| {
            SANS_FAMILIES.iter().find_map(|family| system_font(family)).or_else(|| {
                let db = system_database();
                let face = db.faces().next()?;
                let family = face.families.first().map(|(name, _)| name.as_str())?;
                load_face(&Query {
                    families: &[Family::Name(family)],
                    ..Default::default()
                })
            })
        })
        .clone()
}

/// Begin a new contour unless `start` continues the current one
fn start_segment(builder: &mut PathBuilder, cursor: Option<(f32, f32)>, start: (f32, f32)) {
    let connected = cursor
        .is_some_and(|(x, y)| (x - start.0).abs() < 1e-4 && (y - start.1).abs() < 1e-4);
    if connected {
        return;
    }
    if cursor.is_some() {
        builder.close();
    }
    builder.move_to(start.0, start.1);
}

fn append_outline(
    builder: &mut PathBuilder,
    curves: &[OutlineCurve],
    to_local: impl Fn(ab_glyph::Point) -> (f32, f32),
) {
    let mut cursor: Option<(f32, f32)> = None;

    for curve in curves {
        match *curve {
            OutlineCurve::Line(p0, p1) => {
                let (a, b) = (to_local(p0), to_local(p1));
                start_segment(builder, cursor, a);
                builder.line_to(b.0, b.1);
                cursor = Some(b);
            }
            OutlineCurve::Quad(p0, p1, p2) => {
                let (a, c, b) = (to_local(p0), to_local(p1), to_local(p2));
                start_segment(builder, cursor, a);
                builder.quad_to(c.0, c.1, b.0, b.1);
                cursor = Some(b);
            }
            OutlineCurve::Cubic(p0, p1, p2, p3) => {
                let (a, c1, c2, b) = (to_local(p0), to_local(p1), to_local(p2), to_local(p3));
                start_segment(builder, cursor, a);
                builder.cubic_to(c1.0, c1.1, c2.0, c2.1, b.0, b.1);
                cursor = Some(b);
            }
        }
    }
    if cursor.is_some() {
        builder.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_metrics_without_fonts() {
        let book = FontBook::new();
        let layout = book.layout("Edit me", "Arial", 24.0);
        assert!((layout.width - 7.0 * 24.0 * FALLBACK_ADVANCE).abs() < 1e-4);
        assert!((layout.height - 24.0 * LINE_HEIGHT).abs() < 1e-4);
        assert!(layout.path.is_none());
    }

    #[test]
    fn test_multiline_height() {
        let book = FontBook::new();
        let layout = book.layout("a\nbb\nccc", "Arial", 10.0);
        assert!((layout.height - 3.0 * 10.0 * LINE_HEIGHT).abs() < 1e-4);
        assert!((layout.width - 3.0 * 10.0 * FALLBACK_ADVANCE).abs() < 1e-4);
    }

    #[test]
    fn test_unknown_family_uses_installed_font() {
        if system_default().is_none() {
            // no fonts installed on this machine
            return;
        }
        let book = FontBook::new().with_system_fonts();
        let layout = book.layout("Edit me", "No Such Family", 24.0);
        let path = layout.path.expect("glyph outlines");
        assert!(layout.width > 0.0);
        assert!(path.bounds().width() > 10.0);
        assert!(path.bounds().left() >= -1.0);
    }

    #[test]
    fn test_system_fonts_off_by_default() {
        let book = FontBook::new();
        assert!(book.layout("x", "sans-serif", 12.0).path.is_none());
    }

    #[test]
    fn test_invalid_font_bytes_rejected() {
        let mut book = FontBook::new();
        assert!(book.register("Broken", vec![0, 1, 2, 3]).is_err());
        assert!(book.is_empty());
    }
}
