use std::path::PathBuf;
use std::time::Duration;

use underwood::prelude::*;

/// Renders the entrance animation to PNG frames.
///
/// ```bash
/// RUST_LOG=debug cargo run --example flag_demo -- /tmp/flag_frames
/// ```
///
/// Halfway through, a click on the flag restarts the animation.
fn main() -> image::ImageResult<()> {
    env_logger::init();

    let output = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("target/flag_demo"));

    let mut view = flag()
        .width(658.0)
        .animate_on_click(true)
        .on_click(|| log::info!("Flag clicked, restarting entrance"));
    view.animate_in();

    let click_frame = 30;
    let app = App::new()
        .width(658)
        .height(416)
        .background_color(Color::from_hex(0x1B1B24))
        .frame_interval(Duration::from_millis(1000 / 60))
        .event_at(
            click_frame,
            Event::MouseDown {
                x: 40.0,
                y: 40.0,
                button: MouseButton::Left,
            },
        )
        .event_at(
            click_frame,
            Event::MouseUp {
                x: 40.0,
                y: 40.0,
                button: MouseButton::Left,
            },
        );

    let mut saved = 0;
    let mut failure = None;
    let frames = app.run(view, |frame| {
        if frame.index % 6 != 0 && frame.animating {
            return true;
        }
        let path = output.join(format!("frame_{:04}.png", frame.index));
        match save_png(&frame.image, &path) {
            Ok(()) => {
                saved += 1;
                true
            }
            Err(e) => {
                log::error!("Failed to write {}: {}", path.display(), e);
                failure = Some(e);
                false
            }
        }
    });

    if let Some(e) = failure {
        return Err(e);
    }

    println!(
        "Rendered {} frames, wrote {} to {}",
        frames,
        saved,
        output.display()
    );
    Ok(())
}
