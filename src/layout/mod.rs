pub mod constraints;

pub use constraints::{Constraints, Size};

/// A unified sizing type that can specify exact, min, max, or range constraints.
///
/// A length without an exact value is "auto": the widget picks its intrinsic
/// size, raised to `min` and capped at `max`.
///
/// # Examples
/// ```
/// use underwood::prelude::*;
///
/// // Exact size (most common)
/// flag().width(200.0);
///
/// // Auto with a minimum
/// flag().width(at_least(100.0));
///
/// // Auto within a range
/// flag().width(at_least(50.0).at_most(400.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Length {
    pub min: Option<f32>,
    pub max: Option<f32>,
    pub exact: Option<f32>,
}

impl Length {
    /// Auto sizing with no bounds.
    pub const AUTO: Length = Length {
        min: None,
        max: None,
        exact: None,
    };

    /// Add a minimum constraint to this length.
    pub fn at_least(mut self, min: f32) -> Self {
        self.min = Some(min);
        self
    }

    /// Add a maximum constraint to this length.
    pub fn at_most(mut self, max: f32) -> Self {
        self.max = Some(max);
        self
    }

    /// Resolve along one axis: the exact value, or `intrinsic` raised to the
    /// minimums; then capped at `max` and at the available space.
    fn resolve(&self, intrinsic: f32, min_available: f32, max_available: f32) -> f32 {
        let base = match self.exact {
            Some(exact) => exact,
            None => intrinsic
                .max(self.min.unwrap_or(0.0))
                .max(min_available),
        };
        let capped = match self.max {
            Some(max) => base.min(max),
            None => base,
        };
        capped.min(max_available)
    }
}

/// Create a length with a minimum constraint.
pub fn at_least(min: f32) -> Length {
    Length {
        min: Some(min),
        max: None,
        exact: None,
    }
}

/// Create a length with a maximum constraint.
pub fn at_most(max: f32) -> Length {
    Length {
        min: None,
        max: Some(max),
        exact: None,
    }
}

/// f32 converts to exact sizing
impl From<f32> for Length {
    fn from(value: f32) -> Self {
        Length {
            min: None,
            max: None,
            exact: Some(value),
        }
    }
}

/// Measure a box that keeps the aspect ratio of `intrinsic`.
///
/// Each axis resolves independently (see [`Length`]). A height taller than
/// the resolved width allows shrinks to `width / ratio`; width always wins. Degenerate results clamp to zero.
pub fn measure_aspect(
    width: Length,
    height: Length,
    constraints: Constraints,
    intrinsic: Size,
) -> Size {
    let mut size = Size::new(
        width.resolve(
            intrinsic.width,
            constraints.min_width,
            constraints.max_width,
        ),
        height.resolve(
            intrinsic.height,
            constraints.min_height,
            constraints.max_height,
        ),
    )
    .sanitized();

    if intrinsic.is_empty() {
        return size;
    }

    // Cross-multiplied so the intrinsic size itself never rounds past the ratio
    if size.height * intrinsic.width > size.width * intrinsic.height {
        size.height = size.width * intrinsic.height / intrinsic.width;
    }

    size
}
