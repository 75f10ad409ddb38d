//! Animated flag widget.
//!
//! Thirteen horizontal stripes alternate between the two palette colors; the
//! top six span the full width and the remaining seven stop at 55%. A block
//! in the overlay color covers the bottom-right 45% of the width across the
//! bottom seven stripes.
//!
//! The entrance animation slides every stripe in from the left edge, one
//! after another, and finally slides the overlay block in from its own left
//! edge:
//!
//! ```text
//! row 0   |=====>
//! row 1   |  ~~=====>
//! row 2   |    ~~~~=====>
//!  ...
//! overlay |                    ~~~~~~~~~~=====>
//! ```
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use underwood::prelude::*;
//!
//! let mut view = flag().width(329.0);
//! view.layout(Constraints::unbounded());
//! view.animate_in();
//!
//! let start = Instant::now();
//! view.advance_animations(start);
//! view.advance_animations(start + Duration::from_secs(3));
//! assert_eq!(view.interpolated_width(FlagElement::Row(0)), 329.0);
//! ```

use std::time::Instant;

use crate::animation::{Animatable, Timeline, TimingFunction, Transition};
use crate::layout::{measure_aspect, Constraints, Length, Size};
use crate::reactive::WidgetId;
use crate::renderer::PaintContext;

use super::widget::{Color, Event, EventResponse, MouseButton, Rect, Widget};

/// Number of horizontal stripes.
pub const ROWS: usize = 13;
/// Stripes `0..FULL_WIDTH_ROWS` span the whole width.
pub const FULL_WIDTH_ROWS: usize = 6;
/// Width of the remaining stripes relative to the surface width.
pub const SHORT_ROW_FRACTION: f32 = 0.55;
/// Width of the overlay block relative to the surface width.
pub const OVERLAY_WIDTH_FRACTION: f32 = 0.45;
/// Height of the overlay block in stripes.
pub const OVERLAY_ROWS: usize = 7;
/// Size used when both dimensions are auto; also fixes the aspect ratio.
pub const INTRINSIC_SIZE: Size = Size::new(329.0, 208.0);

/// Called on every completed left click inside the flag
pub type ClickCallback = Box<dyn FnMut()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresentationState {
    #[default]
    Hidden,
    Shown,
    Animating,
}

/// One animated element of the flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagElement {
    /// Stripe by index, `0..ROWS`, top to bottom
    Row(usize),
    /// The bottom-right block
    Overlay,
}

impl FlagElement {
    /// All elements in paint order.
    pub fn all() -> impl Iterator<Item = FlagElement> {
        (0..ROWS)
            .map(FlagElement::Row)
            .chain(std::iter::once(FlagElement::Overlay))
    }

    /// Index of this element's interval in the entrance timeline.
    pub fn interval_index(self) -> Option<usize> {
        match self {
            FlagElement::Row(row) if row < ROWS => Some(row),
            FlagElement::Row(_) => None,
            FlagElement::Overlay => Some(ROWS),
        }
    }
}

/// Colors and timing of a flag.
#[derive(Debug, Clone)]
pub struct FlagStyle {
    /// Stripe colors; stripe `i` uses `palette[i % palette.len()]`
    pub palette: Vec<Color>,
    /// Fill of the bottom-right block
    pub overlay: Color,
    /// Duration of each stripe's and the overlay's slide, in milliseconds
    pub row_duration_ms: f32,
    /// Delay between consecutive stripes as a fraction of the duration
    pub stagger_fraction: f32,
    /// Delay between the last stripe and the overlay as a fraction of the duration
    pub overlay_lag_fraction: f32,
    /// Easing shared by every stripe and the overlay
    pub timing: TimingFunction,
}

impl FlagStyle {
    pub const RED: Color = Color::from_hex(0xB22234);
    pub const WHITE: Color = Color::from_hex(0xFFFFFF);
    pub const BLUE: Color = Color::from_hex(0x3C3B6E);

    pub fn row_color(&self, row: usize) -> Color {
        if self.palette.is_empty() {
            return Color::TRANSPARENT;
        }
        self.palette[row % self.palette.len()]
    }

    /// Build the entrance timeline: one interval per stripe, cascading by
    /// `stagger_fraction` of the duration, then the overlay.
    pub fn entrance_timeline(&self) -> Timeline {
        let transition = Transition::new(self.row_duration_ms, self.timing);
        let mut timeline = Timeline::staggered(
            ROWS,
            transition.clone(),
            self.row_duration_ms * self.stagger_fraction,
        );
        let overlay_delay = timeline.last().map_or(0.0, |last| {
            last.delay_ms + last.duration_ms * self.overlay_lag_fraction
        });
        timeline.push(transition.delay(overlay_delay));
        timeline
    }
}

impl Default for FlagStyle {
    fn default() -> Self {
        Self {
            palette: vec![Self::RED, Self::WHITE],
            overlay: Self::BLUE,
            row_duration_ms: 500.0,
            stagger_fraction: 1.0 / 6.0,
            overlay_lag_fraction: 0.55,
            timing: TimingFunction::Decelerate(2.0),
        }
    }
}

/// Fully shown geometry of a flag inside `bounds`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlagLayout {
    pub bounds: Rect,
    pub band_height: f32,
    pub overlay: Rect,
}

impl FlagLayout {
    pub fn new(bounds: Rect) -> Self {
        let band_height = bounds.height / ROWS as f32;
        let overlay_width = bounds.width * OVERLAY_WIDTH_FRACTION;
        let overlay_height = band_height * OVERLAY_ROWS as f32;
        Self {
            bounds,
            band_height,
            overlay: Rect::new(
                bounds.right() - overlay_width,
                bounds.bottom() - overlay_height,
                overlay_width,
                overlay_height,
            ),
        }
    }

    /// Band of stripe `row` as a full-width rect.
    pub fn band(&self, row: usize) -> Rect {
        let top = self.band_height * row as f32;
        let bottom = self.band_height * (row + 1) as f32;
        Rect::new(
            self.bounds.x,
            self.bounds.y + top,
            self.bounds.width,
            bottom - top,
        )
    }

    /// Width of `element` when fully shown.
    pub fn target_width(&self, element: FlagElement) -> f32 {
        match element {
            FlagElement::Row(row) if row < FULL_WIDTH_ROWS => self.bounds.width,
            FlagElement::Row(row) if row < ROWS => self.bounds.width * SHORT_ROW_FRACTION,
            FlagElement::Row(_) => 0.0,
            FlagElement::Overlay => self.overlay.width,
        }
    }
}

pub struct FlagView {
    widget_id: WidgetId,
    width: Length,
    height: Length,
    style: FlagStyle,
    state: PresentationState,
    timeline: Option<Timeline>,
    bounds: Rect,
    on_click: Option<ClickCallback>,
    animate_on_click: bool,
    is_pressed: bool,
}

impl FlagView {
    pub fn new() -> Self {
        Self {
            widget_id: WidgetId::next(),
            width: Length::AUTO,
            height: Length::AUTO,
            style: FlagStyle::default(),
            state: PresentationState::Hidden,
            timeline: None,
            bounds: Rect::default(),
            on_click: None,
            animate_on_click: false,
            is_pressed: false,
        }
    }

    pub fn width(mut self, width: impl Into<Length>) -> Self {
        self.width = width.into();
        self
    }

    pub fn height(mut self, height: impl Into<Length>) -> Self {
        self.height = height.into();
        self
    }

    pub fn style(mut self, style: FlagStyle) -> Self {
        self.style = style;
        self
    }

    pub fn on_click<F: FnMut() + 'static>(mut self, callback: F) -> Self {
        self.on_click = Some(Box::new(callback));
        self
    }

    /// Restart the entrance animation whenever the flag is clicked.
    pub fn animate_on_click(mut self, enabled: bool) -> Self {
        self.animate_on_click = enabled;
        self
    }

    pub fn id(&self) -> WidgetId {
        self.widget_id
    }

    pub fn state(&self) -> PresentationState {
        self.state
    }

    /// The live entrance timeline, if animating.
    pub fn timeline(&self) -> Option<&Timeline> {
        self.timeline.as_ref()
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn flag_layout(&self) -> FlagLayout {
        FlagLayout::new(self.bounds)
    }

    pub fn show(&mut self) {
        self.transition_to(PresentationState::Shown, None);
    }

    pub fn hide(&mut self) {
        self.transition_to(PresentationState::Hidden, None);
    }

    /// Restart the entrance animation from nothing. Time starts on the next
    /// call to [`Widget::advance_animations`].
    pub fn animate_in(&mut self) {
        let timeline = self.style.entrance_timeline();
        log::debug!(
            "Flag {:?}: entrance timeline with {} intervals over {:.0}ms",
            self.widget_id,
            timeline.len(),
            timeline.total_ms()
        );
        self.transition_to(PresentationState::Animating, Some(timeline));
    }

    fn transition_to(&mut self, state: PresentationState, timeline: Option<Timeline>) {
        if self.timeline.is_some() {
            log::debug!("Flag {:?}: cancelling live timeline", self.widget_id);
        }
        log::debug!("Flag {:?}: {:?} -> {:?}", self.widget_id, self.state, state);
        self.timeline = timeline;
        self.state = state;
        self.widget_id.request_paint();
    }

    /// Current width of `element` in the active presentation state.
    pub fn interpolated_width(&self, element: FlagElement) -> f32 {
        let target = self.flag_layout().target_width(element);
        match self.state {
            PresentationState::Hidden => 0.0,
            PresentationState::Shown => target,
            PresentationState::Animating => {
                let fraction = match (&self.timeline, element.interval_index()) {
                    (Some(timeline), Some(index)) => timeline.fraction(index),
                    _ => 0.0,
                };
                f32::lerp(&0.0, &target, fraction)
            }
        }
    }

    fn click(&mut self) {
        if let Some(ref mut callback) = self.on_click {
            callback();
        }
        if self.animate_on_click {
            self.animate_in();
        }
    }
}

impl Default for FlagView {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for FlagView {
    fn advance_animations(&mut self, now: Instant) -> bool {
        if self.state != PresentationState::Animating {
            return false;
        }
        let Some(ref mut timeline) = self.timeline else {
            return false;
        };
        if timeline.is_complete() {
            return false;
        }

        let running = timeline.advance(now);
        log::trace!(
            "Flag {:?}: tick at {:.1}ms",
            self.widget_id,
            timeline.elapsed_ms()
        );
        self.widget_id.request_paint();
        if !running {
            log::debug!("Flag {:?}: entrance animation finished", self.widget_id);
        }
        running
    }

    fn layout(&mut self, constraints: Constraints) -> Size {
        let size = measure_aspect(self.width, self.height, constraints, INTRINSIC_SIZE);
        if size.width != self.bounds.width || size.height != self.bounds.height {
            self.bounds.width = size.width;
            self.bounds.height = size.height;
            self.widget_id.request_paint();
        }
        size
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        self.bounds.x = x;
        self.bounds.y = y;
    }

    fn paint(&self, ctx: &mut PaintContext) {
        if self.bounds.width <= 0.0 || self.bounds.height <= 0.0 {
            return;
        }
        let layout = self.flag_layout();

        for row in 0..ROWS {
            let band = layout.band(row);
            let width = self.interpolated_width(FlagElement::Row(row));
            ctx.draw_rect(
                Rect::new(band.x, band.y, width, band.height),
                self.style.row_color(row),
            );
        }

        let width = self.interpolated_width(FlagElement::Overlay);
        ctx.draw_rect(
            Rect::new(layout.overlay.x, layout.overlay.y, width, layout.overlay.height),
            self.style.overlay,
        );
    }

    fn event(&mut self, event: &Event) -> EventResponse {
        match event {
            Event::MouseDown { x, y, button } => {
                if *button == MouseButton::Left && self.bounds.contains(*x, *y) {
                    self.is_pressed = true;
                    return EventResponse::Handled;
                }
            }
            Event::MouseUp { x, y, button } => {
                if self.is_pressed && *button == MouseButton::Left {
                    self.is_pressed = false;
                    if self.bounds.contains(*x, *y) {
                        self.click();
                        return EventResponse::Handled;
                    }
                }
            }
            Event::MouseLeave => {
                self.is_pressed = false;
            }
            Event::MouseMove { .. } => {}
        }
        EventResponse::Ignored
    }
}

pub fn flag() -> FlagView {
    FlagView::new()
}
