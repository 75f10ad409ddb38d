use std::time::{Duration, Instant};

use underwood::prelude::*;
use underwood::widgets::flag::ROWS;

fn laid_out() -> FlagView {
    let mut view = flag();
    view.layout(Constraints::unbounded());
    view
}

fn widths(view: &FlagView) -> Vec<f32> {
    FlagElement::all()
        .map(|element| view.interpolated_width(element))
        .collect()
}

#[test]
fn test_widths_never_shrink_while_animating() {
    let start = Instant::now();
    let mut view = laid_out();
    view.animate_in();
    view.advance_animations(start);

    let mut previous = widths(&view);
    for step in 1..=200 {
        view.advance_animations(start + Duration::from_millis(step * 10));
        let current = widths(&view);
        for (before, after) in previous.iter().zip(&current) {
            assert!(after >= before, "width shrank at {}ms", step * 10);
        }
        previous = current;
    }
}

#[test]
fn test_each_row_reaches_target_at_its_end() {
    let start = Instant::now();
    let mut view = laid_out();
    view.animate_in();
    view.advance_animations(start);

    let timeline = view.timeline().cloned().expect("live timeline");
    let layout = view.flag_layout();
    for element in FlagElement::all() {
        let index = element.interval_index().expect("known element");
        let interval = timeline.get(index).expect("interval");

        let midway = (interval.delay_ms + interval.duration_ms / 2.0) as u64;
        view.advance_animations(start + Duration::from_millis(midway));
        assert!(view.interpolated_width(element) < layout.target_width(element));

        view.advance_animations(start + Duration::from_millis(interval.end_ms().ceil() as u64));
        assert_eq!(view.interpolated_width(element), layout.target_width(element));
    }
}

#[test]
fn test_second_animate_in_discards_first() {
    let start = Instant::now();
    let mut first = laid_out();
    first.animate_in();
    first.advance_animations(start);
    first.advance_animations(start + Duration::from_millis(700));
    assert!(first.interpolated_width(FlagElement::Row(0)) > 0.0);

    // Restart mid-flight; nothing of the first run survives
    first.animate_in();
    assert!(widths(&first).iter().all(|w| *w == 0.0));

    let restart = start + Duration::from_millis(710);
    let mut fresh = laid_out();
    fresh.animate_in();

    first.advance_animations(restart);
    fresh.advance_animations(restart);
    for offset in [0, 50, 120, 400, 900, 1_800] {
        let now = restart + Duration::from_millis(offset);
        first.advance_animations(now);
        fresh.advance_animations(now);
        assert_eq!(widths(&first), widths(&fresh), "diverged {}ms after restart", offset);
    }
}

#[test]
fn test_hide_mid_animation_zeroes_everything() {
    let start = Instant::now();
    let mut view = laid_out();
    view.animate_in();
    view.advance_animations(start);
    view.advance_animations(start + Duration::from_millis(600));

    view.hide();
    assert_eq!(view.state(), PresentationState::Hidden);
    assert!(view.timeline().is_none());

    for later in [600, 1_000, 5_000] {
        assert!(!view.advance_animations(start + Duration::from_millis(later)));
        assert!(widths(&view).iter().all(|w| *w == 0.0));
    }
}

#[test]
fn test_show_mid_animation_snaps_to_targets() {
    let start = Instant::now();
    let mut view = laid_out();
    view.animate_in();
    view.advance_animations(start);
    view.advance_animations(start + Duration::from_millis(100));

    view.show();
    let layout = view.flag_layout();
    for element in FlagElement::all() {
        assert_eq!(view.interpolated_width(element), layout.target_width(element));
    }
}

#[test]
fn test_sizing_contract() {
    let mut view = flag();
    assert_eq!(view.layout(Constraints::unbounded()), Size::new(329.0, 208.0));

    let mut narrow = flag().width(150.0);
    let size = narrow.layout(Constraints::unbounded());
    assert_eq!(size.width, 150.0);
    assert!((size.height - 150.0 / (329.0 / 208.0)).abs() < 1e-3);
}

#[test]
fn test_rendered_frame_matches_layout() {
    let mut view = laid_out();
    view.show();

    let mut ctx = PaintContext::new();
    view.paint(&mut ctx);
    assert_eq!(ctx.len(), ROWS + 1);

    let background = Color::BLACK;
    let frame = Rasterizer::new(329, 208).render(&ctx, background);

    // Top-left: first red stripe
    assert_eq!(frame.get_pixel(5, 5).0, FlagStyle::RED.to_rgba8());
    // Second stripe is white
    assert_eq!(frame.get_pixel(5, 20).0, FlagStyle::WHITE.to_rgba8());
    // Short stripes leave the bottom-left region at 55%; the overlay fills the rest
    assert_eq!(frame.get_pixel(320, 200).0, FlagStyle::BLUE.to_rgba8());
    assert_eq!(frame.get_pixel(5, 200).0, FlagStyle::RED.to_rgba8());
}

#[test]
fn test_hidden_frame_is_background() {
    let view = laid_out();
    let mut ctx = PaintContext::new();
    view.paint(&mut ctx);
    let frame = Rasterizer::new(329, 208).render(&ctx, Color::BLACK);
    assert!(frame.pixels().all(|p| p.0 == [0, 0, 0, 255]));
}
