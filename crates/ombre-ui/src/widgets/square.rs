use ombre_core::schedule::FrameSlot;
use ombre_core::state::HUE_MAX;
use ombre_css::{rgb_to_hsv, Rgba};

use crate::cmd::Border;
use crate::event::{EventResult, UiEvent};
use crate::geom::{Rect, Vec2};
use crate::painter::Painter;
use crate::theme;
use crate::widget::Widget;
use crate::SharedPicker;

const SQUARE_HEIGHT: f32 = 160.0;
const MARKER_RADIUS: f32 = 7.0;

/// Saturation/value plane at the current hue.
///
/// Saturation runs left→right, value bottom→top; the marker tracks the
/// active stop's color.
pub struct ColorSquare {
    shared: SharedPicker,
    pending: FrameSlot<(f32, f32)>,
}

impl ColorSquare {
    pub fn new(shared: SharedPicker) -> Self {
        Self { shared, pending: FrameSlot::new() }
    }

    fn pick(&mut self, pos: Vec2, rect: Rect) {
        let s = ((pos.x - rect.origin.x) / rect.size.x.max(1.0)).clamp(0.0, 1.0);
        let y = ((pos.y - rect.origin.y) / rect.size.y.max(1.0)).clamp(0.0, 1.0);
        self.pending.schedule((s, 1.0 - y));
    }
}

impl Widget for ColorSquare {
    fn measure(&self, avail: Vec2) -> Vec2 {
        Vec2::new(avail.x, SQUARE_HEIGHT)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let state = self.shared.borrow();
        let hue = state.hue() % HUE_MAX;

        // White→hue across, then transparent→black down.
        let (hr, hg, hb) = ombre_css::hsv_to_rgb(hue, 1.0, 1.0);
        painter.fill_hgradient(
            rect,
            vec![(0.0, Rgba::opaque(255, 255, 255)), (1.0, Rgba::opaque(hr, hg, hb))],
        );
        painter.fill_vgradient(
            rect,
            vec![(0.0, Rgba::new(0, 0, 0, 0.0)), (1.0, Rgba::new(0, 0, 0, 1.0))],
        );

        let color = state.rgba();
        let hsv = rgb_to_hsv(color.r, color.g, color.b);
        let marker = Vec2::new(
            rect.origin.x + hsv.s * rect.size.x,
            rect.origin.y + (1.0 - hsv.v) * rect.size.y,
        );
        painter.fill_circle(
            marker,
            MARKER_RADIUS,
            color.with_alpha(1.0),
            Some(Border::new(2.0, theme::THUMB)),
        );
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect) -> EventResult {
        match event {
            UiEvent::PointerDown { pos } if rect.contains(*pos) => {
                self.pick(*pos, rect);
                EventResult::Consumed
            }
            UiEvent::Drag { pos, start } | UiEvent::DragEnd { pos, start }
                if rect.contains(*start) =>
            {
                self.pick(*pos, rect);
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn tick(&mut self) {
        if let Some((s, v)) = self.pending.take() {
            self.shared.borrow_mut().set_saturation_value(s, v);
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
    fn corner_picks_map_to_saturation_value_extremes() {
        let shared = Rc::new(RefCell::new(PickerState::new()));
        let mut square = ColorSquare::new(shared.clone());
        let rect = Rect::new(0.0, 0.0, 200.0, SQUARE_HEIGHT);

        // Top-right corner: full saturation, full value.
        square.on_event(&UiEvent::PointerDown { pos: Vec2::new(199.0, 0.0) }, rect);
        square.tick();
        {
            let state = shared.borrow();
            let hsv = rgb_to_hsv(state.rgba().r, state.rgba().g, state.rgba().b);
            assert!(hsv.s > 0.99 && hsv.v > 0.99);
        }

        // Bottom-left corner: black.
        square.on_event(&UiEvent::PointerDown { pos: Vec2::new(0.0, 159.9) }, rect);
        square.tick();
        let state = shared.borrow();
        assert_eq!(
            (state.rgba().r, state.rgba().g, state.rgba().b),
            (0, 0, 0)
        );
    }

    #[test]
    fn alpha_is_preserved_through_square_edits() {
        let shared = Rc::new(RefCell::new(PickerState::new()));
        shared.borrow_mut().set_alpha(0.4);

        let mut square = ColorSquare::new(shared.clone());
        let rect = Rect::new(0.0, 0.0, 200.0, SQUARE_HEIGHT);
        square.on_event(&UiEvent::PointerDown { pos: Vec2::new(120.0, 40.0) }, rect);
        square.tick();

        assert_eq!(shared.borrow().rgba().a, 0.4);
    }
}
