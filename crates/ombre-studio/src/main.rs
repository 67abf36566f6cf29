//! Headless picker demo: drives a scripted pointer gesture through the
//! widget layer and logs every gradient string the component emits.
//!
//! ```text
//! cargo run -p ombre-studio
//! RUST_LOG=debug cargo run -p ombre-studio
//! ```

use std::time::{Duration, Instant};

use anyhow::Result;

use ombre_core::logging::{init_logging, LoggingConfig};
use ombre_core::track::left_px_from_percent;
use ombre_ui::picker::PANEL_PADDING;
use ombre_ui::prelude::*;

const VIEWPORT: Vec2 = Vec2::new(424.0, 320.0);
const TRACK_HEIGHT: f32 = 36.0;

/// The demo lays the track in the first row, so its rect is known.
fn track_rect() -> Rect {
    Rect::new(
        PANEL_PADDING,
        PANEL_PADDING,
        VIEWPORT.x - 2.0 * PANEL_PADDING,
        TRACK_HEIGHT,
    )
}

fn track_point(percent: f32) -> Vec2 {
    let rect = track_rect();
    Vec2::new(
        rect.origin.x + left_px_from_percent(percent, rect.size.x),
        rect.center().y,
    )
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut picker = GradientPicker::new(
        PickerConfig::new()
            .gradient("linear-gradient(90deg, rgba(10, 10, 193, 1) 20%, rgba(163, 0, 255, 1) 80%)")
            .update_delay_ms(120)
            .layout(vec![
                vec![Control::Track],
                vec![Control::HueSlider],
                vec![Control::AlphaSlider],
                vec![Control::GradientText],
            ])
            .on_change(|css| log::info!("onChange: {css}")),
    );

    let t0 = Instant::now();
    let mut now = t0;
    let frame = |picker: &mut GradientPicker, events: &[UiEvent], now: Instant| {
        let commands = picker.frame(events, VIEWPORT, now).items().len();
        log::debug!("frame at {:?}: {commands} draw commands", now - t0);
    };

    // Mount frame (no emission by design).
    frame(&mut picker, &[], now);

    // Grab the left stop and sweep it rightward into the neighbor's gap
    // zone; the thumb sticks at the collision boundary.
    let start = track_point(20.0);
    now += Duration::from_millis(16);
    frame(&mut picker, &[UiEvent::PointerDown { pos: start }], now);

    for step in 1..=20 {
        let pos = track_point(20.0 + step as f32 * 3.0);
        now += Duration::from_millis(16);
        frame(&mut picker, &[UiEvent::Drag { pos, start }], now);
    }

    now += Duration::from_millis(16);
    frame(&mut picker, &[UiEvent::DragEnd { pos: track_point(78.0), start }], now);
    log::info!("after drag: {}", picker.gradient());

    // Let the debounce window elapse so the edit is delivered.
    now += Duration::from_millis(200);
    frame(&mut picker, &[], now);

    // Retint the (still selected) stop via the hue slider.
    let hue_y = PANEL_PADDING + TRACK_HEIGHT + 8.0 + 12.0;
    let hue_pos = Vec2::new(VIEWPORT.x * 0.5, hue_y);
    now += Duration::from_millis(16);
    frame(&mut picker, &[UiEvent::PointerDown { pos: hue_pos }], now);
    now += Duration::from_millis(200);
    frame(&mut picker, &[], now);

    log::info!("final: {}", picker.gradient());
    Ok(())
}
