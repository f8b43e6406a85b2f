use crate::{
    assets::color::Rgba8,
    assets::font::{ResolvedFont, TextLayoutEngine},
    foundation::core::Point,
    foundation::error::HabitResult,
};

/// One unwrapped line of text, positioned by the top-left of its layout box.
pub(crate) struct TextLine<'a> {
    pub text: &'a str,
    pub size_px: f32,
    pub color: Rgba8,
    pub origin: Point,
}

/// Shape and fill `lines` with a single font.
///
/// Leaves a translation on `ctx`; callers reset the transform afterwards.
pub(crate) fn draw_lines(
    ctx: &mut vello_cpu::RenderContext,
    font: &ResolvedFont,
    lines: &[TextLine<'_>],
) -> HabitResult<()> {
    let mut engine = TextLayoutEngine::new(font)?;
    let font_data = font.to_font_data();

    for line in lines {
        if line.text.is_empty() {
            continue;
        }
        let layout = engine.layout_line(line.text, line.size_px, line.color)?;
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            line.origin.x,
            line.origin.y,
        )));

        for layout_line in layout.lines() {
            for item in layout_line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font_data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }
    Ok(())
}
