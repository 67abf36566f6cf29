use ombre_core::schedule::FrameSlot;
use ombre_core::state::HUE_MAX;
use ombre_core::track::{thumb_left_from_value, value_from_x, THUMB_RADIUS};
use ombre_css::Rgba;

use crate::cmd::Border;
use crate::event::{EventResult, UiEvent};
use crate::geom::{Rect, Vec2};
use crate::painter::Painter;
use crate::theme;
use crate::widget::Widget;
use crate::SharedPicker;

const SLIDER_HEIGHT: f32 = 24.0;

/// Horizontal hue slider over the active stop's color.
///
/// Pointer samples are coalesced through a single-slot register and
/// committed once per frame, so fast pointer movement costs one state write
/// per redraw.
pub struct HueSlider {
    shared: SharedPicker,
    pending: FrameSlot<f32>,
}

impl HueSlider {
    pub fn new(shared: SharedPicker) -> Self {
        Self { shared, pending: FrameSlot::new() }
    }

    fn pick(&mut self, x: f32, rect: Rect) {
        let t = value_from_x(x - rect.origin.x, rect.size.x);
        self.pending.schedule(t * HUE_MAX);
    }
}

impl Widget for HueSlider {
    fn measure(&self, avail: Vec2) -> Vec2 {
        Vec2::new(avail.x, SLIDER_HEIGHT)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        // Rainbow ramp: the six hue sectors plus the wrap back to red.
        let ramp = (0..=6)
            .map(|i| {
                let (r, g, b) = ombre_css::hsv_to_rgb(i as f32 * 60.0, 1.0, 1.0);
                (i as f32 / 6.0, Rgba::opaque(r, g, b))
            })
            .collect();
        painter.fill_rounded_rect(
            rect,
            theme::CORNER_RADIUS,
            theme::FIELD_BG,
            Some(Border::new(1.0, theme::BORDER)),
        );
        painter.fill_hgradient(rect, ramp);

        let state = self.shared.borrow();
        let cx = rect.origin.x + thumb_left_from_value(state.hue() / HUE_MAX, rect.size.x);
        let cy = rect.center().y;
        let radius = if painter.is_hovered(rect) { THUMB_RADIUS - 3.0 } else { THUMB_RADIUS - 4.0 };
        painter.fill_circle(
            Vec2::new(cx, cy),
            radius,
            state.rgba().with_alpha(1.0),
            Some(Border::new(2.0, theme::THUMB)),
        );
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect) -> EventResult {
        match event {
            UiEvent::PointerDown { pos } if rect.contains(*pos) => {
                self.pick(pos.x, rect);
                EventResult::Consumed
            }
            UiEvent::Drag { pos, start } | UiEvent::DragEnd { pos, start }
                if rect.contains(*start) =>
            {
                self.pick(pos.x, rect);
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn tick(&mut self) {
        if let Some(hue) = self.pending.take() {
            self.shared.borrow_mut().set_hue(hue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ombre_core::state::PickerState;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn drag_samples_coalesce_to_one_commit_per_frame() {
        let shared = Rc::new(RefCell::new(PickerState::new()));
        let mut slider = HueSlider::new(shared.clone());
        let rect = Rect::new(0.0, 0.0, 224.0, SLIDER_HEIGHT);

        let start = Vec2::new(20.0, 10.0);
        for x in [40.0, 80.0, 120.0, 212.0] {
            slider.on_event(&UiEvent::Drag { pos: Vec2::new(x, 10.0), start }, rect);
        }
        // Nothing written until the frame boundary.
        let before = shared.borrow().hue();
        assert_eq!(before, shared.borrow().rgba().hue());

        slider.tick();
        let hue = shared.borrow().hue();
        assert_eq!(hue, HUE_MAX); // x = 212 is the right inset end
        assert!(!slider.pending.is_scheduled());
    }

    #[test]
    fn commit_recolors_active_stop() {
        let shared = Rc::new(RefCell::new(PickerState::new()));
        let mut slider = HueSlider::new(shared.clone());
        let rect = Rect::new(0.0, 0.0, 224.0, SLIDER_HEIGHT);

        slider.on_event(&UiEvent::PointerDown { pos: Vec2::new(112.0, 10.0) }, rect);
        slider.tick();

        let state = shared.borrow();
        assert_eq!(state.hue(), 180.0);
        let active = state.stops.active_stop().unwrap();
        assert_eq!(active.color, state.rgba());
    }
}
