use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    assets::color::Rgba8,
    foundation::error::{HabitError, HabitResult},
};

/// Where the font used for the card text came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontOrigin {
    /// The configured preferred font file.
    Preferred(PathBuf),
    /// A face picked from the system font database.
    System(String),
    /// The face compiled into the binary.
    Bundled,
}

/// Font bytes ready to be shaped with Parley and rasterized with `vello_cpu`.
#[derive(Clone)]
pub struct ResolvedFont {
    /// Raw font file bytes (may be a collection).
    pub bytes: Arc<Vec<u8>>,
    /// Face index inside `bytes`.
    pub index: u32,
    /// Provenance, for diagnostics.
    pub origin: FontOrigin,
}

impl std::fmt::Debug for ResolvedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedFont")
            .field("bytes_len", &self.bytes.len())
            .field("index", &self.index)
            .field("origin", &self.origin)
            .finish()
    }
}

impl ResolvedFont {
    pub fn to_font_data(&self) -> vello_cpu::peniko::FontData {
        vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(self.bytes.as_ref().clone()),
            self.index,
        )
    }
}

/// Sans-serif families tried, in order, before fontdb's generic mapping.
const SANS_SERIF_CANDIDATES: &[&str] = &[
    "Helvetica",
    "Arial",
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
];

static BUNDLED_FONT: &[u8] = include_bytes!("../../fonts/DejaVuSans.ttf");

/// Resolve the card font: the preferred file, then a sans-serif system face, then the
/// bundled DejaVu Sans.
pub fn resolve_font(preferred: Option<&Path>, index: u32) -> ResolvedFont {
    if let Some(path) = preferred {
        match load_font_file(path, index) {
            Ok(font) => return font,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "preferred font unavailable, falling back to system font");
            }
        }
    }

    system_sans_serif().unwrap_or_else(|| {
        tracing::info!("no sans-serif system font found, using the bundled font");
        bundled_font()
    })
}

/// DejaVu Sans, shipped inside the binary.
pub fn bundled_font() -> ResolvedFont {
    ResolvedFont {
        bytes: Arc::new(BUNDLED_FONT.to_vec()),
        index: 0,
        origin: FontOrigin::Bundled,
    }
}

fn load_font_file(path: &Path, index: u32) -> HabitResult<ResolvedFont> {
    let bytes = std::fs::read(path)
        .map_err(|e| HabitError::validation(format!("read font '{}': {e}", path.display())))?;

    let mut db = usvg::fontdb::Database::new();
    db.load_font_data(bytes.clone());
    if !db.faces().any(|f| f.index == index) {
        return Err(HabitError::validation(format!(
            "font '{}' has no face at index {index}",
            path.display()
        )));
    }

    Ok(ResolvedFont {
        bytes: Arc::new(bytes),
        index,
        origin: FontOrigin::Preferred(path.to_path_buf()),
    })
}

fn system_sans_serif() -> Option<ResolvedFont> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();

    let families = SANS_SERIF_CANDIDATES
        .iter()
        .map(|&name| usvg::fontdb::Family::Name(name))
        .chain([usvg::fontdb::Family::SansSerif])
        .collect::<Vec<_>>();
    let query = usvg::fontdb::Query {
        families: &families,
        ..usvg::fontdb::Query::default()
    };
    let id = db.query(&query)?;

    let family = db
        .face(id)
        .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
        .unwrap_or_default();
    let (bytes, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;

    tracing::debug!(%family, "using system font");
    Some(ResolvedFont {
        bytes: Arc::new(bytes),
        index,
        origin: FontOrigin::System(family),
    })
}

/// Parley contexts bound to a single registered font.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    family_name: String,
}

impl TextLayoutEngine {
    /// Register `font` with a fresh Parley font collection.
    pub fn new(font: &ResolvedFont) -> HabitResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font.bytes.as_ref().clone()),
            None,
        );
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            HabitError::validation("no font families registered from font bytes")
        })?;

        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| HabitError::validation("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Shape a single unwrapped line of plain text.
    pub fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: Rgba8,
    ) -> HabitResult<parley::Layout<Rgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(HabitError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
