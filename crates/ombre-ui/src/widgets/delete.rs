use crate::cmd::Border;
use crate::event::{EventResult, UiEvent};
use crate::geom::{Rect, Vec2};
use crate::painter::Painter;
use crate::theme;
use crate::widget::Widget;
use crate::SharedPicker;

const BUTTON_SIZE: f32 = 28.0;

/// Deletes the active stop. Disabled while the collection is at the
/// two-stop minimum; the guard lives in the collection itself, this widget
/// only mirrors it visually.
pub struct DeleteStop {
    shared: SharedPicker,
}

impl DeleteStop {
    pub fn new(shared: SharedPicker) -> Self {
        Self { shared }
    }
}

impl Widget for DeleteStop {
    fn measure(&self, _avail: Vec2) -> Vec2 {
        Vec2::new(BUTTON_SIZE, BUTTON_SIZE)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let enabled = self.shared.borrow().stops.can_delete();
        let bg = if enabled && painter.is_hovered(rect) { theme::FIELD_BG } else { theme::PANEL_BG };
        painter.fill_rounded_rect(
            rect,
            theme::CORNER_RADIUS,
            bg,
            Some(Border::new(1.0, theme::BORDER)),
        );

        let color = if enabled { theme::TEXT } else { theme::TEXT_MUTED };
        painter.text(
            "\u{2715}",
            Vec2::new(rect.origin.x + 9.0, rect.origin.y + (rect.size.y - theme::TEXT_SIZE) * 0.5),
            theme::TEXT_SIZE,
            color,
        );
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect) -> EventResult {
        if let UiEvent::Click { pos } = event {
            if rect.contains(*pos) {
                self.shared.borrow_mut().delete_active();
                return EventResult::Consumed;
            }
        }
        EventResult::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ombre_core::state::PickerState;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn delete_stops_at_the_two_stop_floor() {
        let shared = Rc::new(RefCell::new(PickerState::from_gradient(
            "linear-gradient(90deg, #ff0000 0%, #00ff00 50%, #0000ff 100%)",
        )));
        let mut button = DeleteStop::new(shared.clone());
        let rect = Rect::new(0.0, 0.0, BUTTON_SIZE, BUTTON_SIZE);
        let click = UiEvent::Click { pos: Vec2::new(10.0, 10.0) };

        button.on_event(&click, rect);
        assert_eq!(shared.borrow().stops.len(), 2);

        // Further clicks are refused at the floor.
        button.on_event(&click, rect);
        button.on_event(&click, rect);
        assert_eq!(shared.borrow().stops.len(), 2);
        assert!(shared.borrow().stops.active_stop().is_some());
    }
}
