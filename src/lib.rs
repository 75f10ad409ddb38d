pub mod animation;
pub mod layout;
pub mod reactive;
pub mod renderer;
pub mod widgets;

use std::time::{Duration, Instant};

use image::RgbaImage;
use layout::{Constraints, Size};
use reactive::{take_frame_request, with_app_state, with_app_state_mut};
use renderer::{PaintContext, Rasterizer};
use widgets::{Color, Event, Widget};

pub mod prelude {
    pub use crate::animation::{Timeline, TimingFunction, Transition};
    pub use crate::layout::{at_least, at_most, Constraints, Length, Size};
    pub use crate::renderer::{save_png, DrawCommand, PaintContext, Rasterizer};
    pub use crate::widgets::{
        flag, Color, Event, EventResponse, FlagElement, FlagLayout, FlagStyle, FlagView,
        MouseButton, PresentationState, Rect, Widget,
    };
    pub use crate::{App, AppConfig, Frame};
}

pub struct AppConfig {
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
    /// Time between frames on the virtual clock
    pub frame_interval: Duration,
    /// Stop after this many frames even if the widget is still animating
    pub max_frames: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 329,
            height: 208,
            frame_interval: Duration::from_millis(16),
            max_frames: None,
            background_color: Color::rgb(0.1, 0.1, 0.15),
        }
    }
}

/// One rendered frame handed to the frame callback.
pub struct Frame {
    pub index: u64,
    /// Virtual time since the first frame
    pub time: Duration,
    /// Whether the root still had running animations when this frame was drawn
    pub animating: bool,
    pub image: RgbaImage,
}

/// A callback that gets called each frame before rendering.
/// Use this to process external events (like channel messages) and update state.
pub type UpdateCallback = Box<dyn FnMut()>;

/// Headless host for a widget.
///
/// Drives the root widget through the same steps a windowed host would:
/// event dispatch, animation tick, layout, paint, and rasterization. Layout
/// and paint only run when a widget marked them dirty; otherwise the previous
/// frame is handed out again. Time
/// comes from a virtual clock advancing by `frame_interval` per frame, so a
/// run is fully reproducible. The loop ends when the callback returns
/// `false`, when `max_frames` is reached, or when the widget goes idle (no
/// running animation, no pending redraw, no scheduled events).
pub struct App {
    config: AppConfig,
    on_update: Option<UpdateCallback>,
    scheduled_events: Vec<(u64, Event)>,
}

impl App {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            on_update: None,
            scheduled_events: Vec::new(),
        }
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            on_update: None,
            scheduled_events: Vec::new(),
        }
    }

    pub fn width(mut self, width: u32) -> Self {
        self.config.width = width;
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.config.height = height;
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.config.background_color = color;
        self
    }

    pub fn frame_interval(mut self, interval: Duration) -> Self {
        self.config.frame_interval = interval;
        self
    }

    pub fn max_frames(mut self, frames: u64) -> Self {
        self.config.max_frames = Some(frames);
        self
    }

    /// Set a callback that gets called each frame before rendering.
    pub fn on_update<F: FnMut() + 'static>(mut self, callback: F) -> Self {
        self.on_update = Some(Box::new(callback));
        self
    }

    /// Deliver `event` to the root widget right before frame `frame` is drawn.
    pub fn event_at(mut self, frame: u64, event: Event) -> Self {
        self.scheduled_events.push((frame, event));
        self.scheduled_events.sort_by_key(|(frame, _)| *frame);
        self
    }

    /// Run until idle, returning the number of frames drawn.
    pub fn run<W, F>(mut self, mut root: W, mut on_frame: F) -> u64
    where
        W: Widget,
        F: FnMut(&Frame) -> bool,
    {
        let _ = env_logger::try_init();

        let width = self.config.width;
        let height = self.config.height;
        let mut rasterizer = Rasterizer::new(width, height);
        let mut paint_ctx = PaintContext::with_capacity(16);
        let constraints = Constraints::loose(Size::new(width as f32, height as f32));

        log::info!(
            "Starting headless host: {}x{}, frame interval {:?}",
            width,
            height,
            self.config.frame_interval
        );

        let start = Instant::now();
        let mut time = Duration::ZERO;
        let mut index = 0;
        let mut pending = std::mem::take(&mut self.scheduled_events).into_iter().peekable();
        let mut last_image: Option<RgbaImage> = None;
        with_app_state_mut(|state| state.invalidate_all());

        loop {
            if self.config.max_frames.is_some_and(|max| index >= max) {
                log::info!("Reached frame limit after {} frames", index);
                break;
            }

            // Call the update callback to process external events
            if let Some(ref mut callback) = self.on_update {
                callback();
            }

            // Dispatch input events scheduled for this frame
            while let Some((_, event)) = pending.next_if(|(frame, _)| *frame <= index) {
                root.event(&event);
            }

            let animating = root.advance_animations(start + time);

            if with_app_state(|state| state.needs_layout()) {
                root.layout(constraints);
                root.set_origin(0.0, 0.0);
                with_app_state_mut(|state| state.clear_layout_flag());
            }

            let image = match last_image.take() {
                Some(image) if !with_app_state(|state| state.needs_paint()) => image,
                _ => {
                    if let Some(id) = with_app_state(|state| state.last_dirty) {
                        log::trace!("Frame {}: repainting for {:?}", index, id);
                    }
                    paint_ctx.clear();
                    root.paint(&mut paint_ctx);
                    with_app_state_mut(|state| state.clear_paint_flag());
                    rasterizer.render(&paint_ctx, self.config.background_color)
                }
            };
            let frame_requested = take_frame_request();

            let frame = Frame {
                index,
                time,
                animating,
                image,
            };
            index += 1;
            if !on_frame(&frame) {
                break;
            }
            last_image = Some(frame.image);

            let idle = !animating && !frame_requested && pending.peek().is_none();
            if idle {
                log::info!("Widget idle after {} frames ({:?})", index, time);
                break;
            }

            time += self.config.frame_interval;
        }

        index
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
