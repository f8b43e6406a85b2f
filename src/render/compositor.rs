use chrono::NaiveDate;

use crate::{
    assets::color::Rgba8,
    assets::font::{FontOrigin, resolve_font},
    config::WallpaperConfig,
    effects::composite::paste_over,
    foundation::core::{Point, PremulImage, Rect},
    foundation::error::HabitResult,
    grid::mapper::{CellState, GridMatrix, build_grid},
    grid::snapshot::HabitSnapshot,
    render::surface::{RenderStats, Surface},
    render::text::{TextLine, draw_lines},
    shape::rounded::{
        cpu_dims, readback, rounded_rect, rounded_rect_path, shadow, to_cpu_color,
    },
};

/// Where everything lands for a given configuration.
///
/// `card` is in canvas pixels; the other positions are relative to the card's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardLayout {
    pub card: Rect,
    pub title_origin: Point,
    pub subtitle_origin: Point,
    pub grid_origin: Point,
}

impl CardLayout {
    pub fn new(cfg: &WallpaperConfig) -> Self {
        let (w, h) = (cfg.card_width(), cfg.card_height());
        let origin = cfg.canvas.centered_origin(w, h);
        let pad = f64::from(cfg.padding);

        Self {
            card: Rect::new(
                origin.x,
                origin.y,
                origin.x + f64::from(w),
                origin.y + f64::from(h),
            ),
            title_origin: Point::new(pad, pad),
            subtitle_origin: Point::new(pad, pad + f64::from(cfg.subtitle_offset)),
            grid_origin: Point::new(pad, pad + f64::from(cfg.grid_offset)),
        }
    }

    /// Card-local rectangle of the cell at `(col, row)`.
    pub fn cell_rect(&self, cfg: &WallpaperConfig, col: usize, row: usize) -> Rect {
        let pitch = f64::from(cfg.cell_pitch());
        let size = f64::from(cfg.cell_size);
        let x = self.grid_origin.x + col as f64 * pitch;
        let y = self.grid_origin.y + row as f64 * pitch;
        Rect::new(x, y, x + size, y + size)
    }
}

/// Compose the wallpaper for `snapshot` with the grid ending at `reference`.
///
/// Layers, bottom to top: background, blurred shadow, card, then one card-sized overlay holding
/// the text and the grid. Never fails for a valid configuration.
#[tracing::instrument(skip_all, fields(title = %snapshot.title, %reference))]
pub fn render(
    snapshot: &HabitSnapshot,
    reference: NaiveDate,
    cfg: &WallpaperConfig,
) -> HabitResult<Surface> {
    cfg.validate()?;

    let background = Rgba8 {
        a: 255,
        ..cfg.background
    };
    let mut canvas =
        PremulImage::filled(cfg.canvas.width, cfg.canvas.height, background.to_premul())?;

    let layout = CardLayout::new(cfg);
    let (card_w, card_h) = (cfg.card_width(), cfg.card_height());
    let (card_x, card_y) = (layout.card.x0 as i64, layout.card.y0 as i64);

    let shadow_img = shadow(
        card_w,
        card_h,
        cfg.corner_radius,
        cfg.shadow_offset,
        cfg.shadow_blur,
        cfg.shadow_color,
    )?;
    let blur = i64::from(cfg.shadow_blur);
    paste_over(&mut canvas, &shadow_img, card_x - blur, card_y - blur);

    let card = rounded_rect(card_w, card_h, cfg.corner_radius, cfg.card_color)?;
    paste_over(&mut canvas, &card, card_x, card_y);

    let grid = build_grid(&snapshot.completed_dates, reference);
    let (overlay, font) = paint_overlay(snapshot, &grid, &layout, cfg)?;
    paste_over(&mut canvas, &overlay, card_x, card_y);

    let stats = RenderStats {
        active_cells: grid.active_count(),
        skipped_dates: snapshot.skipped,
        font,
    };
    tracing::debug!(
        active = stats.active_cells,
        skipped = stats.skipped_dates,
        "wallpaper composed"
    );
    Ok(Surface::new(canvas, stats))
}

fn paint_overlay(
    snapshot: &HabitSnapshot,
    grid: &GridMatrix,
    layout: &CardLayout,
    cfg: &WallpaperConfig,
) -> HabitResult<(PremulImage, Option<FontOrigin>)> {
    let (card_w, card_h) = (cfg.card_width(), cfg.card_height());
    let (w, h) = cpu_dims(card_w, card_h)?;
    let mut ctx = vello_cpu::RenderContext::new(w, h);

    let font = resolve_font(cfg.font_path.as_deref(), cfg.font_index);
    let lines = [
        TextLine {
            text: &snapshot.title,
            size_px: cfg.title_size,
            color: cfg.title_color,
            origin: layout.title_origin,
        },
        TextLine {
            text: &snapshot.subtitle,
            size_px: cfg.subtitle_size,
            color: cfg.subtitle_color,
            origin: layout.subtitle_origin,
        },
    ];
    let drawn = draw_lines(&mut ctx, &font, &lines);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    let font_origin = match drawn {
        Ok(()) => Some(font.origin),
        Err(err) => {
            tracing::warn!(%err, "text layout failed, rendering without text");
            None
        }
    };

    let active = to_cpu_color(cfg.active_color);
    let empty = to_cpu_color(cfg.empty_color);
    for ((col, row), cell) in grid.iter_positioned() {
        ctx.set_paint(match cell.state {
            CellState::Active => active,
            CellState::Empty => empty,
        });
        ctx.fill_path(&rounded_rect_path(
            layout.cell_rect(cfg, col, row),
            cfg.cell_radius,
        ));
    }

    let overlay = readback(&mut ctx, card_w, card_h)?;
    Ok((overlay, font_origin))
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
