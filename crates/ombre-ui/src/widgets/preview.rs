use crate::cmd::Border;
use crate::event::{EventResult, UiEvent};
use crate::geom::{Rect, Vec2};
use crate::painter::Painter;
use crate::theme;
use crate::widget::Widget;
use crate::SharedPicker;

const PREVIEW_HEIGHT: f32 = 48.0;

/// Read-only swatch of the current gradient (draft included while
/// dragging). Rendered as a horizontal ramp regardless of format; the
/// host's real surface applies the radial/conic geometry.
pub struct Preview {
    shared: SharedPicker,
}

impl Preview {
    pub fn new(shared: SharedPicker) -> Self {
        Self { shared }
    }
}

impl Widget for Preview {
    fn measure(&self, avail: Vec2) -> Vec2 {
        Vec2::new(avail.x, PREVIEW_HEIGHT)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        painter.fill_checker(rect, theme::CHECKER_CELL);

        let state = self.shared.borrow();
        let stops = state.effective_stops();
        let ramp = match stops.len() {
            0 => vec![(0.0, ombre_css::Rgba::new(0, 0, 0, 0.0))],
            1 => vec![(0.0, stops[0].color), (1.0, stops[0].color)],
            _ => stops.iter().map(|s| (s.position / 100.0, s.color)).collect(),
        };
        painter.fill_hgradient(rect, ramp);
        painter.fill_rounded_rect(
            rect,
            theme::CORNER_RADIUS,
            ombre_css::Rgba::new(0, 0, 0, 0.0),
            Some(Border::new(1.0, theme::BORDER)),
        );
    }

    fn on_event(&mut self, _event: &UiEvent, _rect: Rect) -> EventResult {
        EventResult::Ignored
    }
}
