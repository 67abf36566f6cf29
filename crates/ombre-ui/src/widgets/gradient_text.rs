use crate::cmd::Border;
use crate::event::{EventResult, UiEvent};
use crate::geom::{Rect, Vec2};
use crate::painter::Painter;
use crate::theme;
use crate::widget::Widget;
use crate::SharedPicker;

const FIELD_HEIGHT: f32 = 28.0;
const COPY_WIDTH: f32 = 52.0;

/// Read-only display of the built gradient string with a copy button.
pub struct GradientText {
    shared: SharedPicker,
}

impl GradientText {
    pub fn new(shared: SharedPicker) -> Self {
        Self { shared }
    }

    fn copy_rect(rect: Rect) -> Rect {
        Rect::new(
            rect.origin.x + rect.size.x - COPY_WIDTH,
            rect.origin.y,
            COPY_WIDTH,
            rect.size.y,
        )
    }
}

impl Widget for GradientText {
    fn measure(&self, avail: Vec2) -> Vec2 {
        Vec2::new(avail.x, FIELD_HEIGHT)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        painter.fill_rounded_rect(
            rect,
            theme::CORNER_RADIUS,
            theme::FIELD_BG,
            Some(Border::new(1.0, theme::BORDER)),
        );

        let css = self.shared.borrow().descriptor().to_css();
        painter.text(
            css,
            Vec2::new(rect.origin.x + 8.0, rect.origin.y + (rect.size.y - theme::TEXT_SIZE) * 0.5),
            theme::TEXT_SIZE,
            theme::TEXT_MUTED,
        );

        let copy = Self::copy_rect(rect);
        let bg = if painter.is_hovered(copy) { theme::ACCENT } else { theme::PANEL_BG };
        painter.fill_rounded_rect(
            copy.inset(2.0),
            theme::CORNER_RADIUS,
            bg,
            Some(Border::new(1.0, theme::BORDER)),
        );
        painter.text(
            "copy",
            Vec2::new(copy.origin.x + 10.0, copy.origin.y + (copy.size.y - theme::TEXT_SIZE) * 0.5),
            theme::TEXT_SIZE,
            theme::TEXT,
        );
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect) -> EventResult {
        if let UiEvent::Click { pos } = event {
            if Self::copy_rect(rect).contains(*pos) {
                let css = self.shared.borrow().descriptor().to_css();
                match arboard::Clipboard::new() {
                    Ok(mut clipboard) => {
                        if let Err(e) = clipboard.set_text(css) {
                            log::warn!("clipboard write failed: {e}");
                        }
                    }
                    Err(e) => log::warn!("clipboard unavailable: {e}"),
                }
                return EventResult::Consumed;
            }
        }
        EventResult::Ignored
    }
}
