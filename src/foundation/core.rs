use crate::foundation::error::{HabitError, HabitResult};

pub use kurbo::{Point, Rect, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> HabitResult<Self> {
        if width == 0 || height == 0 {
            return Err(HabitError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Top-left corner that centers a `width`x`height` box on this canvas.
    ///
    /// Rounds toward negative infinity, so a box larger than the canvas gets a negative origin.
    pub fn centered_origin(self, width: u32, height: u32) -> Point {
        let x = (i64::from(self.width) - i64::from(width)).div_euclid(2);
        let y = (i64::from(self.height) - i64::from(height)).div_euclid(2);
        Point::new(x as f64, y as f64)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Raster image in premultiplied RGBA8, tightly packed, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PremulImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl PremulImage {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> HabitResult<Self> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(HabitError::render(format!(
                "image data is {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn transparent(width: u32, height: u32) -> HabitResult<Self> {
        Ok(Self {
            width,
            height,
            data: vec![0u8; byte_len(width, height)?],
        })
    }

    pub fn filled(width: u32, height: u32, color: Rgba8Premul) -> HabitResult<Self> {
        Ok(Self {
            width,
            height,
            data: color.to_array().repeat(byte_len(width, height)? / 4),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ])
    }
}

fn byte_len(width: u32, height: u32) -> HabitResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| HabitError::render("image buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
