//! Draw protocol and the software backend.
//!
//! Widgets record [`DrawCommand`]s into a [`PaintContext`] during paint; a
//! [`Rasterizer`] then turns one frame's commands into pixels.

pub mod commands;
pub mod raster;

pub use commands::DrawCommand;
pub use raster::{save_png, Rasterizer};

use crate::widgets::{Color, Rect};

pub struct PaintContext {
    commands: Vec<DrawCommand>,
}

impl PaintContext {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Create a new PaintContext with pre-allocated capacity to avoid per-frame allocations
    pub fn with_capacity(commands: usize) -> Self {
        Self {
            commands: Vec::with_capacity(commands),
        }
    }

    /// Clear all buffers for reuse, preserving allocated capacity
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::rect(rect, color));
    }

    /// Commands in paint order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for PaintContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_rect_records_in_order() {
        let mut ctx = PaintContext::with_capacity(2);
        ctx.draw_rect(Rect::new(0.0, 0.0, 10.0, 5.0), Color::WHITE);
        ctx.draw_rect(Rect::new(1.0, 1.0, 2.0, 2.0), Color::BLACK);

        assert_eq!(ctx.len(), 2);
        assert_eq!(
            ctx.commands()[1],
            DrawCommand::rect(Rect::new(1.0, 1.0, 2.0, 2.0), Color::BLACK)
        );
        assert_eq!(ctx.commands()[0].bounds(), Rect::new(0.0, 0.0, 10.0, 5.0));
    }

    #[test]
    fn test_clear() {
        let mut ctx = PaintContext::new();
        ctx.draw_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        ctx.clear();
        assert!(ctx.is_empty());
    }
}
