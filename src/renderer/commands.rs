//! Draw command definitions.

use crate::widgets::{Color, Rect};

/// A single draw operation in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Fill an axis-aligned rectangle with a solid color.
    Rect {
        /// Rectangle bounds
        rect: Rect,
        /// Fill color
        color: Color,
    },
}

impl DrawCommand {
    /// Create a filled rectangle.
    pub fn rect(rect: Rect, color: Color) -> Self {
        Self::Rect { rect, color }
    }

    /// Bounds touched by this command.
    pub fn bounds(&self) -> Rect {
        match self {
            DrawCommand::Rect { rect, .. } => *rect,
        }
    }
}
