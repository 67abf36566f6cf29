use crate::cmd::Border;
use crate::event::{EventResult, Key, UiEvent};
use crate::geom::{Rect, Vec2};
use crate::painter::Painter;
use crate::theme;
use crate::widget::Widget;
use crate::SharedPicker;

const INPUT_HEIGHT: f32 = 28.0;
const STEPPER_WIDTH: f32 = 18.0;

/// Numeric angle entry for linear gradients, in degrees.
///
/// Click to focus, type digits to edit (committed on every keystroke),
/// Up/Down or the steppers change the angle by one degree, wrapping at 360.
/// Typed values above 360 clamp to 360; non-numeric edits are ignored.
pub struct AngleInput {
    shared: SharedPicker,
    focused: bool,
    buffer: String,
}

impl AngleInput {
    pub fn new(shared: SharedPicker) -> Self {
        Self { shared, focused: false, buffer: String::new() }
    }

    fn display(&self) -> String {
        format!("{}", self.shared.borrow().angle())
    }

    fn commit_buffer(&mut self) {
        if let Ok(value) = self.buffer.trim().parse::<f32>() {
            self.shared.borrow_mut().set_angle(value);
        }
    }

    fn stepper_rects(rect: Rect) -> (Rect, Rect) {
        let x = rect.origin.x + rect.size.x - STEPPER_WIDTH;
        let half = rect.size.y / 2.0;
        let up = Rect::new(x, rect.origin.y, STEPPER_WIDTH, half);
        let down = Rect::new(x, rect.origin.y + half, STEPPER_WIDTH, half);
        (up, down)
    }
}

impl Widget for AngleInput {
    fn measure(&self, _avail: Vec2) -> Vec2 {
        Vec2::new(96.0, INPUT_HEIGHT)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let border = if self.focused { theme::ACCENT } else { theme::BORDER };
        painter.fill_rounded_rect(
            rect,
            theme::CORNER_RADIUS,
            theme::FIELD_BG,
            Some(Border::new(if self.focused { 2.0 } else { 1.0 }, border)),
        );

        let text = if self.focused { self.buffer.clone() } else { self.display() };
        let origin = Vec2::new(
            rect.origin.x + 8.0,
            rect.origin.y + (rect.size.y - theme::TEXT_SIZE) * 0.5,
        );
        painter.text(format!("{text}\u{00b0}"), origin, theme::TEXT_SIZE, theme::TEXT);

        let (up, down) = Self::stepper_rects(rect);
        for (zone, glyph) in [(up, "\u{25b4}"), (down, "\u{25be}")] {
            let color = if painter.is_hovered(zone) { theme::TEXT } else { theme::TEXT_MUTED };
            painter.text(
                glyph,
                Vec2::new(zone.origin.x + 4.0, zone.origin.y + 1.0),
                theme::TEXT_SIZE - 3.0,
                color,
            );
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect) -> EventResult {
        match event {
            UiEvent::Click { pos } => {
                if !rect.contains(*pos) {
                    self.focused = false;
                    return EventResult::Ignored;
                }

                let (up, down) = Self::stepper_rects(rect);
                if up.contains(*pos) {
                    self.shared.borrow_mut().increment_angle();
                } else if down.contains(*pos) {
                    self.shared.borrow_mut().decrement_angle();
                } else if !self.focused {
                    self.focused = true;
                    self.buffer = self.display();
                }
                EventResult::Consumed
            }
            UiEvent::TextInput { text } if self.focused => {
                for ch in text.chars() {
                    if ch.is_ascii_digit() || ch == '.' {
                        self.buffer.push(ch);
                    }
                }
                self.commit_buffer();
                EventResult::Consumed
            }
            UiEvent::KeyPress { key } if self.focused => match key {
                Key::Up => {
                    self.shared.borrow_mut().increment_angle();
                    self.buffer = self.display();
                    EventResult::Consumed
                }
                Key::Down => {
                    self.shared.borrow_mut().decrement_angle();
                    self.buffer = self.display();
                    EventResult::Consumed
                }
                Key::Backspace => {
                    self.buffer.pop();
                    self.commit_buffer();
                    EventResult::Consumed
                }
                Key::Enter => {
                    self.commit_buffer();
                    self.focused = false;
                    EventResult::Consumed
                }
                Key::Escape => {
                    self.focused = false;
                    EventResult::Consumed
                }
            },
            _ => EventResult::Ignored,
        }
    }
}
