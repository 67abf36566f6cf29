use ombre_css::Rgba;

use crate::cmd::Border;
use crate::event::{EventResult, UiEvent};
use crate::geom::{Rect, Vec2};
use crate::painter::Painter;
use crate::theme;
use crate::widget::Widget;
use crate::SharedPicker;

const BUTTON_SIZE: f32 = 28.0;

/// Platform color-sampling capability.
///
/// `open` blocks until the user picks a color or cancels; `None` means
/// cancelled. Hosts without a sampler simply don't install one and the
/// button degrades to a logged warning.
pub trait ColorSampler {
    fn open(&mut self) -> Option<Rgba>;
}

/// Screen color sampling button. A successful sample is treated exactly
/// like a manual recolor of the active stop.
pub struct EyeDropper {
    shared: SharedPicker,
    sampler: Option<Box<dyn ColorSampler>>,
}

impl EyeDropper {
    pub fn new(shared: SharedPicker) -> Self {
        Self { shared, sampler: None }
    }

    pub fn with_sampler(mut self, sampler: Box<dyn ColorSampler>) -> Self {
        self.sampler = Some(sampler);
        self
    }
}

impl Widget for EyeDropper {
    fn measure(&self, _avail: Vec2) -> Vec2 {
        Vec2::new(BUTTON_SIZE, BUTTON_SIZE)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let bg = if painter.is_hovered(rect) { theme::FIELD_BG } else { theme::PANEL_BG };
        painter.fill_rounded_rect(
            rect,
            theme::CORNER_RADIUS,
            bg,
            Some(Border::new(1.0, theme::BORDER)),
        );
        painter.text(
            "\u{2316}",
            Vec2::new(rect.origin.x + 8.0, rect.origin.y + (rect.size.y - theme::TEXT_SIZE) * 0.5),
            theme::TEXT_SIZE,
            theme::TEXT,
        );
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect) -> EventResult {
        if let UiEvent::Click { pos } = event {
            if rect.contains(*pos) {
                match self.sampler.as_mut() {
                    None => log::warn!("eye dropper is not supported on this platform"),
                    Some(sampler) => match sampler.open() {
                        Some(color) => self.shared.borrow_mut().set_rgba(color),
                        None => log::debug!("eye dropper cancelled"),
                    },
                }
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

    struct FixedSampler(Option<Rgba>);
    impl ColorSampler for FixedSampler {
        fn open(&mut self) -> Option<Rgba> {
            self.0
        }
    }

    #[test]
    fn sampled_color_recolors_active_stop() {
        let shared = Rc::new(RefCell::new(PickerState::new()));
        let mut dropper = EyeDropper::new(shared.clone())
            .with_sampler(Box::new(FixedSampler(Some(Rgba::opaque(1, 2, 3)))));
        let rect = Rect::new(0.0, 0.0, BUTTON_SIZE, BUTTON_SIZE);

        dropper.on_event(&UiEvent::Click { pos: Vec2::new(10.0, 10.0) }, rect);

        let state = shared.borrow();
        assert_eq!(state.rgba(), Rgba::opaque(1, 2, 3));
        assert_eq!(state.stops.active_stop().unwrap().color, Rgba::opaque(1, 2, 3));
    }

    #[test]
    fn cancel_and_missing_sampler_change_nothing() {
        let shared = Rc::new(RefCell::new(PickerState::new()));
        let before = shared.borrow().rgba();
        let rect = Rect::new(0.0, 0.0, BUTTON_SIZE, BUTTON_SIZE);
        let click = UiEvent::Click { pos: Vec2::new(10.0, 10.0) };

        let mut cancelled =
            EyeDropper::new(shared.clone()).with_sampler(Box::new(FixedSampler(None)));
        cancelled.on_event(&click, rect);
        assert_eq!(shared.borrow().rgba(), before);

        let mut unsupported = EyeDropper::new(shared.clone());
        unsupported.on_event(&click, rect);
        assert_eq!(shared.borrow().rgba(), before);
    }
}
