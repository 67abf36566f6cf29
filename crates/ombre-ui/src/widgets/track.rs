use ombre_core::stops::StopId;
use ombre_core::track::{left_px_from_percent, percent_from_x, STOP_SIZE, THUMB_RADIUS};

use crate::event::{EventResult, UiEvent};
use crate::geom::{Rect, Vec2};
use crate::painter::Painter;
use crate::theme;
use crate::widget::Widget;
use crate::SharedPicker;

const TRACK_HEIGHT: f32 = 36.0;

/// The interactive gradient track.
///
/// Owns the pointer gestures over the stop collection: grab-and-drag an
/// existing stop (constrained by the collision engine), press empty track to
/// create a stop and keep dragging it, click a stop to select it. The stop
/// collection itself lives in the shared state; during a gesture only the
/// drag session's draft moves, and the committed position lands on release.
pub struct GradientTrack {
    shared: SharedPicker,
}

impl GradientTrack {
    pub fn new(shared: SharedPicker) -> Self {
        Self { shared }
    }

    /// Topmost stop thumb under `pos`, in rendering order (later stops sit
    /// above earlier ones, so scan the order back to front).
    fn hit_thumb(&self, pos: Vec2, rect: Rect) -> Option<(StopId, f32)> {
        let state = self.shared.borrow();
        let cy = rect.origin.y + rect.size.y * 0.5;

        for id in state.stops.order().iter().rev() {
            let Some(stop) = state.stops.get(*id) else { continue };
            let cx = rect.origin.x + left_px_from_percent(stop.position, rect.size.x);
            if (pos.x - cx).abs() <= THUMB_RADIUS && (pos.y - cy).abs() <= THUMB_RADIUS {
                return Some((*id, pos.x - cx));
            }
        }
        None
    }

    /// Raw percent for a pointer x, compensating the grab offset so the
    /// thumb does not snap under the cursor.
    fn raw_percent(&self, pointer_x: f32, rect: Rect) -> f32 {
        let offset = {
            let state = self.shared.borrow();
            state.drag.as_ref().map_or(0.0, |s| s.pointer_offset_px)
        };
        percent_from_x(pointer_x - offset - rect.origin.x, rect.size.x)
    }
}

impl Widget for GradientTrack {
    fn measure(&self, avail: Vec2) -> Vec2 {
        Vec2::new(avail.x, TRACK_HEIGHT)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let state = self.shared.borrow();

        // Bar with the live gradient (draft substituted while dragging).
        let bar = Rect::new(
            rect.origin.x,
            rect.origin.y + (rect.size.y - STOP_SIZE) * 0.5,
            rect.size.x,
            STOP_SIZE,
        );
        painter.fill_checker(bar, theme::CHECKER_CELL);

        let stops = state.effective_stops();
        let ramp: Vec<(f32, ombre_css::Rgba)> = match stops.len() {
            0 => vec![(0.0, ombre_css::Rgba::new(0, 0, 0, 0.0))],
            1 => vec![(0.0, stops[0].color), (1.0, stops[0].color)],
            _ => stops.iter().map(|s| (s.position / 100.0, s.color)).collect(),
        };
        painter.fill_hgradient(bar, ramp);

        // Stop thumbs.
        let cy = rect.origin.y + rect.size.y * 0.5;
        for id in state.stops.order() {
            let Some(stop) = state.stops.get(*id) else { continue };

            let position = match &state.drag {
                Some(s) if s.stop == *id => s.draft,
                _ => stop.position,
            };
            let cx = rect.origin.x + left_px_from_percent(position, rect.size.x);

            let outer = Rect::new(
                cx - THUMB_RADIUS,
                cy - THUMB_RADIUS,
                STOP_SIZE,
                STOP_SIZE,
            );
            let is_active = state.stops.active() == Some(*id);
            let border = if is_active { theme::ACCENT } else { theme::BORDER };

            painter.fill_rounded_rect(
                outer,
                theme::CORNER_RADIUS,
                theme::THUMB,
                Some(crate::cmd::Border::new(2.0, border)),
            );
            painter.fill_checker(outer.inset(5.0), 3.0);
            painter.fill_rect(outer.inset(5.0), stop.color);
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect) -> EventResult {
        match event {
            UiEvent::PointerDown { pos } if rect.contains(*pos) => {
                if let Some((id, offset)) = self.hit_thumb(*pos, rect) {
                    let raw = percent_from_x(pos.x - offset - rect.origin.x, rect.size.x);
                    self.shared.borrow_mut().begin_drag(id, raw, offset);
                } else {
                    let raw = percent_from_x(pos.x - rect.origin.x, rect.size.x);
                    self.shared.borrow_mut().add_stop_at(raw);
                }
                EventResult::Consumed
            }
            UiEvent::Drag { pos, start } if rect.contains(*start) => {
                let raw = self.raw_percent(pos.x, rect);
                let mut state = self.shared.borrow_mut();
                if state.drag.is_some() {
                    state.drag_to(raw);
                    return EventResult::Consumed;
                }
                EventResult::Ignored
            }
            UiEvent::DragEnd { pos, start } if rect.contains(*start) => {
                let raw = self.raw_percent(pos.x, rect);
                let mut state = self.shared.borrow_mut();
                if state.drag.is_some() {
                    state.drag_to(raw);
                    state.end_drag();
                    return EventResult::Consumed;
                }
                // Release with no live session still clears any leftovers.
                state.reset_drag();
                EventResult::Ignored
            }
            UiEvent::Click { pos } if rect.contains(*pos) => {
                // Press already selected (and possibly created) the stop;
                // a bare click on a thumb only needs selection.
                if let Some((id, _)) = self.hit_thumb(*pos, rect) {
                    let mut state = self.shared.borrow_mut();
                    if state.dragging().is_none() {
                        state.select_stop(id);
                    }
                    return EventResult::Consumed;
                }
                EventResult::Ignored
            }
            _ => EventResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ombre_core::drag::MIN_GAP;
    use ombre_core::state::PickerState;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn picker(gradient: &str) -> SharedPicker {
        Rc::new(RefCell::new(PickerState::from_gradient(gradient)))
    }

    fn track_rect() -> Rect {
        // 224px wide track → 200px usable span → 2px per percent.
        Rect::new(0.0, 0.0, 224.0, TRACK_HEIGHT)
    }

    fn x_at(percent: f32, rect: Rect) -> f32 {
        rect.origin.x + left_px_from_percent(percent, rect.size.x)
    }

    #[test]
    fn press_on_thumb_starts_drag_and_selects() {
        let shared = picker("linear-gradient(90deg, #ff0000 20%, #0000ff 80%)");
        let mut track = GradientTrack::new(shared.clone());
        let rect = track_rect();

        let first = shared.borrow().stops.order()[0];
        let pos = Vec2::new(x_at(20.0, rect), rect.center().y);
        track.on_event(&UiEvent::PointerDown { pos }, rect);

        let state = shared.borrow();
        assert_eq!(state.dragging(), Some(first));
        assert_eq!(state.stops.active(), Some(first));
    }

    #[test]
    fn press_on_empty_track_creates_dragging_stop() {
        let shared = picker("linear-gradient(90deg, #ff0000 0%, #0000ff 100%)");
        let mut track = GradientTrack::new(shared.clone());
        let rect = track_rect();

        let pos = Vec2::new(x_at(50.0, rect), rect.center().y);
        track.on_event(&UiEvent::PointerDown { pos }, rect);

        let state = shared.borrow();
        assert_eq!(state.stops.len(), 3);
        let created = state.dragging().expect("new stop should be dragging");
        assert_eq!(state.stops.active(), Some(created));
        assert!((state.stops.get(created).unwrap().position - 50.0).abs() < 0.5);
    }

    #[test]
    fn drag_is_blocked_at_the_neighbor_gap() {
        let shared = picker("linear-gradient(90deg, #ff0000 20%, #0000ff 80%)");
        let mut track = GradientTrack::new(shared.clone());
        let rect = track_rect();

        let start = Vec2::new(x_at(20.0, rect), rect.center().y);
        track.on_event(&UiEvent::PointerDown { pos: start }, rect);

        // Sweep rightward through the neighbor at 80.
        for percent in [40.0, 60.0, 77.0, 82.0] {
            let pos = Vec2::new(x_at(percent, rect), rect.center().y);
            track.on_event(&UiEvent::Drag { pos, start }, rect);
        }
        let draft = shared.borrow().drag.as_ref().unwrap().draft;
        assert!((draft - (80.0 - MIN_GAP)).abs() < 0.1, "draft {draft}");

        let release = Vec2::new(x_at(82.0, rect), rect.center().y);
        track.on_event(&UiEvent::DragEnd { pos: release, start }, rect);

        let state = shared.borrow();
        assert!(state.drag.is_none());
        let committed: Vec<f32> =
            state.stops.sorted().iter().map(|s| s.position).collect();
        assert!((committed[0] - 76.0).abs() < 0.1, "committed {committed:?}");
    }

    #[test]
    fn gap_invariant_holds_after_many_gestures() {
        let shared = picker("linear-gradient(90deg, #ff0000 0%, #00ff00 50%, #0000ff 100%)");
        let mut track = GradientTrack::new(shared.clone());
        let rect = track_rect();

        let sweeps: [(f32, [f32; 4]); 3] = [
            (50.0, [30.0, 10.0, 90.0, 60.0]),
            (0.0, [40.0, 70.0, 20.0, 95.0]),
            (100.0, [55.0, 5.0, 45.0, 35.0]),
        ];
        for (grab, moves) in sweeps {
            let start = Vec2::new(x_at(grab, rect), rect.center().y);
            track.on_event(&UiEvent::PointerDown { pos: start }, rect);
            for m in moves {
                let pos = Vec2::new(x_at(m, rect), rect.center().y);
                track.on_event(&UiEvent::Drag { pos, start }, rect);
            }
            track.on_event(&UiEvent::DragEnd { pos: start, start }, rect);

            let state = shared.borrow();
            let positions: Vec<f32> =
                state.stops.sorted().iter().map(|s| s.position).collect();
            for pair in positions.windows(2) {
                assert!(
                    pair[1] - pair[0] >= MIN_GAP - 0.1,
                    "gap violated: {positions:?}"
                );
            }
        }
    }
}
