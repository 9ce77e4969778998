//! The falling-glyph frame step.

use katarain_core::{DropSpeed, GLYPH_SIZE, RainStyle};
use rand::Rng;

use crate::columns::ColumnTable;
use crate::paint::{Font, PaintContext};

/// Paint one frame of rain and advance every column.
///
/// The whole surface is first covered with the translucent trail colour so
/// earlier glyphs fade instead of disappearing. Then every column gets one
/// random glyph at its current offset. A column whose glyph is already below
/// the bottom edge restarts from the top when a uniform draw exceeds the
/// style's restart threshold. Every offset then advances by the speed's size
/// ratio, including columns that just restarted.
pub fn draw_frame<P, R>(
    ctx: &mut P,
    columns: &mut ColumnTable,
    speed: DropSpeed,
    style: &RainStyle,
    rng: &mut R,
) where
    P: PaintContext + ?Sized,
    R: Rng + ?Sized,
{
    let width = ctx.width() as f32;
    let height = ctx.height() as f32;
    let glyph_size = GLYPH_SIZE as f32;
    let size_ratio = speed.size_ratio();

    ctx.set_fill_style(style.trail);
    ctx.fill_rect(0.0, 0.0, width, height);
    ctx.set_fill_style(style.glyph_color);
    ctx.set_font(Font::serif(GLYPH_SIZE));

    let mut buf = [0u8; 4];
    for (i, offset) in columns.offsets_mut().iter_mut().enumerate() {
        let glyph = style.glyphs.pick(rng);
        let y = *offset * glyph_size;
        ctx.fill_text(glyph.encode_utf8(&mut buf), i as f32 * glyph_size, y);

        if y > height && rng.gen_range(0.0..1.0) > style.restart_threshold {
            *offset = 0.0;
        }

        *offset += size_ratio;
    }
}
