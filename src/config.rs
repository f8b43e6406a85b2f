use std::path::{Path, PathBuf};

use crate::{
    assets::color::Rgba8,
    foundation::core::{Canvas, Vec2},
    foundation::error::{HabitError, HabitResult},
    grid::mapper::{COLS, ROWS},
};

// Avoid pathological allocations; also keeps every raster within `vello_cpu`'s u16 limit.
const MAX_DIM: u32 = 16_384;

/// Every layout, color and output constant of the wallpaper.
///
/// Defaults reproduce the stock 4K card. A JSON file may override any subset of fields.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WallpaperConfig {
    pub canvas: Canvas,

    pub background: Rgba8,
    pub card_color: Rgba8,
    pub shadow_color: Rgba8,
    pub active_color: Rgba8,
    pub empty_color: Rgba8,
    pub title_color: Rgba8,
    pub subtitle_color: Rgba8,

    pub cell_size: u32,
    pub cell_gap: u32,
    pub cell_radius: f64,

    pub padding: u32,
    /// Extra card height reserved for the title block.
    pub header_height: u32,
    pub corner_radius: f64,

    pub shadow_offset: Vec2,
    pub shadow_blur: u32,

    /// Preferred font file; a system sans-serif face is used when it cannot be loaded.
    pub font_path: Option<PathBuf>,
    pub font_index: u32,
    pub title_size: f32,
    pub subtitle_size: f32,
    /// Vertical distance from the title origin to the subtitle origin.
    pub subtitle_offset: u32,
    /// Vertical distance from the title origin to the top of the grid.
    pub grid_offset: u32,

    pub file_prefix: String,
    pub file_extension: String,
    /// Fixed-name artifact from older versions, removed during cleanup.
    pub legacy_file_name: Option<String>,
}

impl Default for WallpaperConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 3840,
                height: 2160,
            },
            background: Rgba8::rgb(0x1f, 0x24, 0x30),
            card_color: Rgba8::rgb(0xff, 0xff, 0xff),
            shadow_color: Rgba8::rgba(0, 0, 0, 80),
            active_color: Rgba8::rgb(0xff, 0xb8, 0x6c),
            empty_color: Rgba8::rgb(0xfd, 0xf6, 0xe3),
            title_color: Rgba8::rgb(0x2e, 0x34, 0x40),
            subtitle_color: Rgba8::rgb(0x88, 0x88, 0x88),
            cell_size: 30,
            cell_gap: 8,
            cell_radius: 4.0,
            padding: 60,
            header_height: 80,
            corner_radius: 20.0,
            shadow_offset: Vec2::new(0.0, 10.0),
            shadow_blur: 20,
            font_path: Some(PathBuf::from("/System/Library/Fonts/Helvetica.ttc")),
            font_index: 0,
            title_size: 60.0,
            subtitle_size: 30.0,
            subtitle_offset: 70,
            grid_offset: 120,
            file_prefix: "wallpaper_".to_owned(),
            file_extension: "png".to_owned(),
            legacy_file_name: Some("wallpaper.png".to_owned()),
        }
    }
}

impl WallpaperConfig {
    /// Load a config file; fields missing from the file keep their defaults.
    pub fn from_path(path: &Path) -> HabitResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| HabitError::validation(format!("read config '{}': {e}", path.display())))?;
        let cfg: Self = serde_json::from_str(&text)
            .map_err(|e| HabitError::serde(format!("parse config '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> HabitResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        if self.canvas.width > MAX_DIM || self.canvas.height > MAX_DIM {
            return Err(HabitError::validation(format!(
                "canvas too large: {}x{} (max {MAX_DIM}x{MAX_DIM})",
                self.canvas.width, self.canvas.height
            )));
        }
        if self.cell_size == 0 {
            return Err(HabitError::validation("cell_size must be > 0"));
        }
        let blur_pad = self.shadow_blur.saturating_mul(2);
        let card = self
            .card_width()
            .max(self.card_height())
            .saturating_add(blur_pad);
        if card > MAX_DIM {
            return Err(HabitError::validation(format!(
                "card with shadow is {card}px on its long side (max {MAX_DIM})"
            )));
        }
        for (name, v) in [
            ("title_size", self.title_size),
            ("subtitle_size", self.subtitle_size),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(HabitError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if !self.shadow_offset.x.is_finite() || !self.shadow_offset.y.is_finite() {
            return Err(HabitError::validation("shadow_offset must be finite"));
        }
        if self.file_prefix.is_empty() || self.file_extension.is_empty() {
            return Err(HabitError::validation(
                "file_prefix and file_extension must be non-empty",
            ));
        }
        if self.file_prefix.contains(['/', '\\']) {
            return Err(HabitError::validation(
                "file_prefix must not contain path separators",
            ));
        }
        Ok(())
    }

    // Geometry saturates instead of overflowing; `validate` rejects anything that large.

    /// Width of the 52-column grid in pixels.
    pub fn grid_width(&self) -> u32 {
        span(COLS as u32, self.cell_size, self.cell_gap)
    }

    /// Height of the 7-row grid in pixels.
    pub fn grid_height(&self) -> u32 {
        span(ROWS as u32, self.cell_size, self.cell_gap)
    }

    pub fn card_width(&self) -> u32 {
        self.grid_width()
            .saturating_add(self.padding.saturating_mul(2))
    }

    pub fn card_height(&self) -> u32 {
        self.grid_height()
            .saturating_add(self.padding.saturating_mul(2))
            .saturating_add(self.header_height)
    }

    /// Distance between the top-left corners of adjacent cells.
    pub fn cell_pitch(&self) -> u32 {
        self.cell_size.saturating_add(self.cell_gap)
    }
}

fn span(count: u32, size: u32, gap: u32) -> u32 {
    count
        .saturating_mul(size)
        .saturating_add((count - 1).saturating_mul(gap))
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
