use crate::event::{EventResult, UiEvent};
use crate::geom::{Rect, Vec2};
use crate::painter::Painter;

/// The core trait every picker control implements.
///
/// Controls are retained: the shell keeps them alive across frames, routes
/// events into `on_event`, drains deferred updates in `tick`, and repaints
/// with `paint`.
pub trait Widget: 'static {
    /// Preferred size given the available space.
    ///
    /// Must be deterministic: the shell may call this several times per
    /// layout pass.
    fn measure(&self, avail: Vec2) -> Vec2;

    /// Draws the widget into `painter` within `rect`.
    fn paint(&self, painter: &mut Painter, rect: Rect);

    /// Routes an input event. Return [`EventResult::Consumed`] to stop
    /// propagation to later controls.
    fn on_event(&mut self, _event: &UiEvent, _rect: Rect) -> EventResult {
        EventResult::Ignored
    }

    /// Frame boundary hook: commits the control's coalesced pending update,
    /// if any. Called exactly once per frame, after event routing.
    fn tick(&mut self) {}
}

/// A type-erased widget.
pub struct Element(Box<dyn Widget>);

impl Element {
    pub fn new<W: Widget>(w: W) -> Self {
        Self(Box::new(w))
    }

    #[inline]
    pub fn measure(&self, avail: Vec2) -> Vec2 {
        self.0.measure(avail)
    }

    #[inline]
    pub fn paint(&self, painter: &mut Painter, rect: Rect) {
        self.0.paint(painter, rect)
    }

    #[inline]
    pub fn on_event(&mut self, event: &UiEvent, rect: Rect) -> EventResult {
        self.0.on_event(event, rect)
    }

    #[inline]
    pub fn tick(&mut self) {
        self.0.tick()
    }
}

impl<W: Widget> From<W> for Element {
    fn from(w: W) -> Self {
        Self::new(w)
    }
}
