use crate::{Result, VisualTestError};
use std::path::PathBuf;
use std::time::Duration;
use underwood::prelude::*;

/// Initial presentation of the flag in a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    Hidden,
    Shown,
    /// Entrance animation started before the first frame
    Entrance,
}

/// A flag rendered on a fixed surface at a fixed virtual time
#[derive(Debug, Clone)]
pub struct Scene {
    pub name: String,
    pub surface: (u32, u32),
    /// Flag width; `None` keeps the intrinsic size
    pub flag_width: Option<f32>,
    pub presentation: Presentation,
    /// Virtual time of the captured frame
    pub at: Duration,
}

impl Scene {
    pub fn new(name: &str, presentation: Presentation) -> Self {
        Self {
            name: name.to_string(),
            surface: (329, 208),
            flag_width: None,
            presentation,
            at: Duration::ZERO,
        }
    }

    pub fn surface(mut self, width: u32, height: u32) -> Self {
        self.surface = (width, height);
        self
    }

    pub fn flag_width(mut self, width: f32) -> Self {
        self.flag_width = Some(width);
        self
    }

    pub fn at(mut self, time: Duration) -> Self {
        self.at = time;
        self
    }
}

/// Configuration for capturing a scene
pub struct CaptureConfig {
    pub scene: Scene,
    /// Path where the frame will be saved
    pub output_path: PathBuf,
    /// Virtual time between frames
    pub frame_interval: Duration,
}

/// Time step used unless a test asks for another one
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(10);

/// Render a scene up to its capture time and return that frame.
///
/// Scenes that go idle before `scene.at` yield their last frame.
pub fn render_scene(scene: &Scene, frame_interval: Duration) -> Result<image::RgbaImage> {
    let mut view = flag();
    if let Some(width) = scene.flag_width {
        view = view.width(width);
    }
    match scene.presentation {
        Presentation::Hidden => view.hide(),
        Presentation::Shown => view.show(),
        Presentation::Entrance => view.animate_in(),
    }

    let (width, height) = scene.surface;
    let mut captured = None;
    App::new()
        .width(width)
        .height(height)
        .background_color(Color::BLACK)
        .frame_interval(frame_interval)
        .run(view, |frame| {
            captured = Some(frame.image.clone());
            frame.time < scene.at
        });

    captured.ok_or_else(|| {
        VisualTestError::Capture(format!("Scene '{}' produced no frame", scene.name))
    })
}

/// Render a scene and save it as PNG
pub fn capture_scene(config: &CaptureConfig) -> Result<()> {
    let frame = render_scene(&config.scene, config.frame_interval)?;
    save_png(&frame, &config.output_path)?;

    // Verify the frame was written
    if !config.output_path.exists() {
        return Err(VisualTestError::Capture(format!(
            "Frame was not written to {}",
            config.output_path.display()
        )));
    }

    Ok(())
}
