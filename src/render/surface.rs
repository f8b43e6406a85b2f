use std::io::Cursor;

use crate::{
    assets::font::FontOrigin,
    foundation::core::PremulImage,
    foundation::error::{HabitError, HabitResult},
};

/// Facts about a finished render, for logging and tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Grid cells painted with the active color.
    pub active_cells: usize,
    /// Input date strings dropped because they did not parse.
    pub skipped_dates: usize,
    /// Font used for the title and subtitle; `None` when text layout failed.
    pub font: Option<FontOrigin>,
}

/// A finished, opaque wallpaper raster.
///
/// Pixels are stored as premultiplied RGBA8 with alpha 255 everywhere, so dropping the alpha
/// channel yields the RGB image directly.
#[derive(Clone, Debug)]
pub struct Surface {
    image: PremulImage,
    stats: RenderStats,
}

impl Surface {
    pub(crate) fn new(image: PremulImage, stats: RenderStats) -> Self {
        Self { image, stats }
    }

    pub fn width(&self) -> u32 {
        self.image.width
    }

    pub fn height(&self) -> u32 {
        self.image.height
    }

    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    /// RGB value at `(x, y)`.
    pub fn rgb_at(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.image.pixel(x, y).map(|[r, g, b, _]| [r, g, b])
    }

    pub fn to_rgb_image(&self) -> HabitResult<image::RgbImage> {
        let rgb: Vec<u8> = self
            .image
            .data
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        image::RgbImage::from_raw(self.width(), self.height(), rgb)
            .ok_or_else(|| HabitError::render("surface buffer does not match its dimensions"))
    }

    /// Lossless PNG bytes of the surface.
    pub fn encode_png(&self) -> HabitResult<Vec<u8>> {
        let rgb = self.to_rgb_image()?;
        let mut buf = Cursor::new(Vec::new());
        rgb.write_to(&mut buf, image::ImageFormat::Png)
            .map_err(|e| HabitError::output(format!("encode png: {e}")))?;
        Ok(buf.into_inner())
    }
}
