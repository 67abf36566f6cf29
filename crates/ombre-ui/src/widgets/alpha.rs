use ombre_core::schedule::FrameSlot;
use ombre_core::track::{thumb_left_from_value, value_from_x, THUMB_RADIUS};

use crate::cmd::Border;
use crate::event::{EventResult, UiEvent};
use crate::geom::{Rect, Vec2};
use crate::painter::Painter;
use crate::theme;
use crate::widget::Widget;
use crate::SharedPicker;

const SLIDER_HEIGHT: f32 = 24.0;

/// Horizontal opacity slider over the active stop's color.
pub struct AlphaSlider {
    shared: SharedPicker,
    pending: FrameSlot<f32>,
}

impl AlphaSlider {
    pub fn new(shared: SharedPicker) -> Self {
        Self { shared, pending: FrameSlot::new() }
    }

    fn pick(&mut self, x: f32, rect: Rect) {
        self.pending.schedule(value_from_x(x - rect.origin.x, rect.size.x));
    }
}

impl Widget for AlphaSlider {
    fn measure(&self, avail: Vec2) -> Vec2 {
        Vec2::new(avail.x, SLIDER_HEIGHT)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let state = self.shared.borrow();
        let color = state.rgba();

        painter.fill_checker(rect, theme::CHECKER_CELL);
        painter.fill_hgradient(
            rect,
            vec![(0.0, color.with_alpha(0.0)), (1.0, color.with_alpha(1.0))],
        );

        let cx = rect.origin.x + thumb_left_from_value(color.a, rect.size.x);
        painter.fill_circle(
            Vec2::new(cx, rect.center().y),
            THUMB_RADIUS - 4.0,
            color,
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
        if let Some(alpha) = self.pending.take() {
            self.shared.borrow_mut().set_alpha(alpha);
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
    fn pick_left_end_makes_active_stop_transparent() {
        let shared = Rc::new(RefCell::new(PickerState::new()));
        let mut slider = AlphaSlider::new(shared.clone());
        let rect = Rect::new(0.0, 0.0, 224.0, SLIDER_HEIGHT);

        slider.on_event(&UiEvent::PointerDown { pos: Vec2::new(0.0, 10.0) }, rect);
        slider.tick();

        let state = shared.borrow();
        assert_eq!(state.rgba().a, 0.0);
        assert_eq!(state.stops.active_stop().unwrap().color.a, 0.0);
    }
}
