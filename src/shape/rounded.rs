use vello_cpu::kurbo::Shape as _;

use crate::{
    assets::color::Rgba8,
    effects::blur::gaussian_blur,
    foundation::core::{PremulImage, Rect, Vec2},
    foundation::error::{HabitError, HabitResult},
};

const PATH_TOLERANCE: f64 = 0.1;

/// Largest usable corner radius for a `width`x`height` box.
pub fn clamp_radius(width: f64, height: f64, radius: f64) -> f64 {
    if !radius.is_finite() || radius <= 0.0 {
        return 0.0;
    }
    radius.min(width.min(height).max(0.0) / 2.0)
}

/// Rounded-rectangle outline in rasterizer coordinates, radius clamped to fit `rect`.
pub fn rounded_rect_path(rect: Rect, radius: f64) -> vello_cpu::kurbo::BezPath {
    let r = clamp_radius(rect.width(), rect.height(), radius);
    vello_cpu::kurbo::RoundedRect::new(rect.x0, rect.y0, rect.x1, rect.y1, r)
        .to_path(PATH_TOLERANCE)
}

pub fn to_cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

/// Rasterizer canvas dimensions; `vello_cpu` addresses pixels with `u16`.
pub(crate) fn cpu_dims(width: u32, height: u32) -> HabitResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| HabitError::validation(format!("canvas width {width} exceeds u16")))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| HabitError::validation(format!("canvas height {height} exceeds u16")))?;
    Ok((w, h))
}

/// Read back a finished `vello_cpu` context into a premultiplied image.
pub(crate) fn readback(
    ctx: &mut vello_cpu::RenderContext,
    width: u32,
    height: u32,
) -> HabitResult<PremulImage> {
    let (w, h) = cpu_dims(width, height)?;
    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    PremulImage::new(width, height, pixmap.data_as_u8_slice().to_vec())
}

fn fill_rounded_on_canvas(
    canvas_w: u32,
    canvas_h: u32,
    rect: Rect,
    radius: f64,
    fill: Rgba8,
) -> HabitResult<PremulImage> {
    if canvas_w == 0 || canvas_h == 0 {
        return PremulImage::transparent(canvas_w, canvas_h);
    }
    let (w, h) = cpu_dims(canvas_w, canvas_h)?;
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_paint(to_cpu_color(fill));
    if rect.width() > 0.0 && rect.height() > 0.0 {
        ctx.fill_path(&rounded_rect_path(rect, radius));
    }
    readback(&mut ctx, canvas_w, canvas_h)
}

/// A `width`x`height` image, `fill` inside the rounded outline and transparent outside.
pub fn rounded_rect(width: u32, height: u32, radius: f64, fill: Rgba8) -> HabitResult<PremulImage> {
    let rect = Rect::new(0.0, 0.0, f64::from(width), f64::from(height));
    fill_rounded_on_canvas(width, height, rect, radius, fill)
}

/// Soft shadow of a rounded rectangle.
///
/// The canvas is padded by `blur_radius` on every side, the shape sits at
/// `(blur_radius + offset.x, blur_radius + offset.y)`, and the whole canvas is blurred.
pub fn shadow(
    width: u32,
    height: u32,
    radius: f64,
    offset: Vec2,
    blur_radius: u32,
    color: Rgba8,
) -> HabitResult<PremulImage> {
    let pad = blur_radius
        .checked_mul(2)
        .ok_or_else(|| HabitError::validation("shadow blur radius too large"))?;
    let canvas_w = width
        .checked_add(pad)
        .ok_or_else(|| HabitError::validation("shadow width overflow"))?;
    let canvas_h = height
        .checked_add(pad)
        .ok_or_else(|| HabitError::validation("shadow height overflow"))?;

    let origin = Vec2::new(f64::from(blur_radius), f64::from(blur_radius)) + offset;
    let rect = Rect::new(
        origin.x,
        origin.y,
        origin.x + f64::from(width),
        origin.y + f64::from(height),
    );

    let shape = fill_rounded_on_canvas(canvas_w, canvas_h, rect, radius, color)?;
    if blur_radius == 0 {
        return Ok(shape);
    }
    gaussian_blur(&shape, blur_radius)
}

#[cfg(test)]
#[path = "../../tests/unit/shape/rounded.rs"]
mod tests;
