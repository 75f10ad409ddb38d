//! CPU backend for draw commands.
//!
//! Each frame is cleared and replayed into a `tiny_skia::Pixmap` with
//! anti-aliased fills, then copied out as an `image::RgbaImage`.

use std::path::Path;

use image::{ImageResult, Rgba, RgbaImage};
use tiny_skia::{Paint, Pixmap, Transform};

use super::{DrawCommand, PaintContext};
use crate::widgets::{Color, Rect};

pub struct Rasterizer {
    width: u32,
    height: u32,
    /// `None` for a zero-area surface
    pixmap: Option<Pixmap>,
}

impl Rasterizer {
    pub fn new(width: u32, height: u32) -> Self {
        let pixmap = Pixmap::new(width, height);
        if pixmap.is_none() {
            log::debug!("Empty raster target {}x{}", width, height);
        }
        Self {
            width,
            height,
            pixmap,
        }
    }

    /// Clear to `clear_color`, replay every command of `paint_ctx`, and return the frame.
    pub fn render(&mut self, paint_ctx: &PaintContext, clear_color: Color) -> RgbaImage {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return RgbaImage::new(self.width, self.height);
        };

        pixmap.fill(skia_color(clear_color));
        for command in paint_ctx.commands() {
            match command {
                DrawCommand::Rect { rect, color } => fill_rect(pixmap, *rect, *color),
            }
        }

        let mut frame = RgbaImage::new(self.width, self.height);
        for (dst, src) in frame.pixels_mut().zip(pixmap.pixels()) {
            let c = src.demultiply();
            *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        frame
    }
}

fn fill_rect(pixmap: &mut Pixmap, rect: Rect, color: Color) {
    if !(rect.width > 0.0 && rect.height > 0.0 && rect.x.is_finite() && rect.y.is_finite()) {
        return;
    }
    // Clip to the surface
    let x0 = rect.x.max(0.0);
    let y0 = rect.y.max(0.0);
    let x1 = rect.right().min(pixmap.width() as f32);
    let y1 = rect.bottom().min(pixmap.height() as f32);
    let Some(area) = tiny_skia::Rect::from_ltrb(x0, y0, x1, y1) else {
        return;
    };
    if area.width() <= 0.0 || area.height() <= 0.0 {
        return;
    }

    let mut paint = Paint::default();
    paint.set_color(skia_color(color));
    paint.anti_alias = true;
    pixmap.fill_rect(area, &paint, Transform::identity(), None);
}

fn skia_color(color: Color) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_rgba8();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

/// Write a rendered frame as PNG, creating parent directories as needed.
pub fn save_png(frame: &RgbaImage, path: impl AsRef<Path>) -> ImageResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    frame.save(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_color() {
        let mut raster = Rasterizer::new(4, 3);
        let frame = raster.render(&PaintContext::new(), Color::from_hex(0x102030));
        assert_eq!(frame.dimensions(), (4, 3));
        assert_eq!(frame.get_pixel(3, 2).0, [0x10, 0x20, 0x30, 0xFF]);
    }

    #[test]
    fn test_pixel_aligned_rect() {
        let mut raster = Rasterizer::new(10, 10);
        let mut ctx = PaintContext::new();
        ctx.draw_rect(Rect::new(2.0, 3.0, 4.0, 2.0), Color::WHITE);
        let frame = raster.render(&ctx, Color::BLACK);

        assert_eq!(frame.get_pixel(2, 3).0, [255, 255, 255, 255]);
        assert_eq!(frame.get_pixel(5, 4).0, [255, 255, 255, 255]);
        assert_eq!(frame.get_pixel(6, 4).0, [0, 0, 0, 255]);
        assert_eq!(frame.get_pixel(2, 5).0, [0, 0, 0, 255]);
        assert_eq!(frame.get_pixel(1, 3).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_fractional_edge_is_blended() {
        let mut raster = Rasterizer::new(4, 1);
        let mut ctx = PaintContext::new();
        ctx.draw_rect(Rect::new(0.0, 0.0, 1.5, 1.0), Color::WHITE);
        let frame = raster.render(&ctx, Color::BLACK);

        assert_eq!(frame.get_pixel(0, 0).0, [255, 255, 255, 255]);
        let edge = frame.get_pixel(1, 0).0;
        assert!((96..=160).contains(&edge[0]), "edge pixel {:?}", edge);
        assert_eq!(edge[3], 255);
        assert_eq!(frame.get_pixel(2, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_rect_outside_surface_is_clipped() {
        let mut raster = Rasterizer::new(3, 3);
        let mut ctx = PaintContext::new();
        ctx.draw_rect(Rect::new(-5.0, -5.0, 6.0, 6.0), Color::WHITE);
        ctx.draw_rect(Rect::new(10.0, 10.0, 5.0, 5.0), Color::WHITE);
        let frame = raster.render(&ctx, Color::BLACK);

        assert_eq!(frame.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(frame.get_pixel(1, 1).0, [0, 0, 0, 255]);
        assert_eq!(frame.get_pixel(2, 2).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_zero_width_draws_nothing() {
        let mut raster = Rasterizer::new(2, 2);
        let mut ctx = PaintContext::new();
        ctx.draw_rect(Rect::new(1.0, 0.0, 0.0, 2.0), Color::WHITE);
        ctx.draw_rect(Rect::new(0.0, 0.0, f32::NAN, 2.0), Color::WHITE);
        let frame = raster.render(&ctx, Color::BLACK);
        assert!(frame.pixels().all(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn test_later_commands_paint_over_earlier() {
        let mut raster = Rasterizer::new(4, 4);
        let mut ctx = PaintContext::new();
        ctx.draw_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::from_hex(0xB22234));
        ctx.draw_rect(Rect::new(2.0, 2.0, 2.0, 2.0), Color::from_hex(0x3C3B6E));
        let frame = raster.render(&ctx, Color::BLACK);
        assert_eq!(frame.get_pixel(0, 0).0, [0xB2, 0x22, 0x34, 0xFF]);
        assert_eq!(frame.get_pixel(3, 3).0, [0x3C, 0x3B, 0x6E, 0xFF]);
    }

    #[test]
    fn test_empty_surface() {
        let mut raster = Rasterizer::new(0, 5);
        let mut ctx = PaintContext::new();
        ctx.draw_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::WHITE);
        let frame = raster.render(&ctx, Color::BLACK);
        assert_eq!(frame.dimensions(), (0, 5));
    }
}
