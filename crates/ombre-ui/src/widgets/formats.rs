use ombre_css::GradientFormat;

use crate::cmd::Border;
use crate::event::{EventResult, UiEvent};
use crate::geom::{Rect, Vec2};
use crate::painter::Painter;
use crate::theme;
use crate::widget::Widget;
use crate::SharedPicker;

const SWITCH_HEIGHT: f32 = 28.0;

/// Segmented switch between the allowed gradient formats.
pub struct FormatSwitch {
    shared: SharedPicker,
}

impl FormatSwitch {
    pub fn new(shared: SharedPicker) -> Self {
        Self { shared }
    }

    fn label(format: GradientFormat) -> &'static str {
        match format {
            GradientFormat::Linear => "linear",
            GradientFormat::Radial => "radial",
            GradientFormat::Conic => "conic",
        }
    }

    fn segments(&self, rect: Rect) -> Vec<(GradientFormat, Rect)> {
        let formats = self.shared.borrow().allowed_formats().to_vec();
        let count = formats.len().max(1) as f32;
        let width = rect.size.x / count;

        formats
            .into_iter()
            .enumerate()
            .map(|(i, f)| {
                (f, Rect::new(rect.origin.x + i as f32 * width, rect.origin.y, width, rect.size.y))
            })
            .collect()
    }
}

impl Widget for FormatSwitch {
    fn measure(&self, _avail: Vec2) -> Vec2 {
        let count = self.shared.borrow().allowed_formats().len().max(1) as f32;
        Vec2::new(count * 56.0, SWITCH_HEIGHT)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let current = self.shared.borrow().format();

        for (format, seg) in self.segments(rect) {
            let selected = format == current;
            let bg = if selected {
                theme::ACCENT
            } else if painter.is_hovered(seg) {
                theme::FIELD_BG
            } else {
                theme::PANEL_BG
            };
            painter.fill_rounded_rect(
                seg.inset(1.0),
                theme::CORNER_RADIUS,
                bg,
                Some(Border::new(1.0, theme::BORDER)),
            );

            let color = if selected { theme::THUMB } else { theme::TEXT_MUTED };
            painter.text(
                Self::label(format),
                Vec2::new(seg.origin.x + 8.0, seg.origin.y + (seg.size.y - theme::TEXT_SIZE) * 0.5),
                theme::TEXT_SIZE,
                color,
            );
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect) -> EventResult {
        if let UiEvent::Click { pos } = event {
            if rect.contains(*pos) {
                for (format, seg) in self.segments(rect) {
                    if seg.contains(*pos) {
                        self.shared.borrow_mut().set_format(format);
                        return EventResult::Consumed;
                    }
                }
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
    fn click_switches_between_allowed_formats() {
        let shared = Rc::new(RefCell::new(PickerState::new()));
        let mut switch = FormatSwitch::new(shared.clone());
        let rect = Rect::new(0.0, 0.0, 168.0, SWITCH_HEIGHT);

        // Three formats → 56px segments: click the middle one.
        switch.on_event(&UiEvent::Click { pos: Vec2::new(84.0, 14.0) }, rect);
        assert_eq!(shared.borrow().format(), GradientFormat::Radial);

        switch.on_event(&UiEvent::Click { pos: Vec2::new(140.0, 14.0) }, rect);
        assert_eq!(shared.borrow().format(), GradientFormat::Conic);
    }
}
