use crate::geom::Vec2;

/// Named keys routed to the widgets.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Backspace,
    Enter,
    Escape,
}

/// Input events routed through the control tree.
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Primary button pressed at `pos`. Starts gestures (grab a stop thumb,
    /// create a stop on the empty track, jump a slider to the cursor).
    PointerDown { pos: Vec2 },
    /// Pointer moved while the primary button is held.
    /// `pos` is the current position; `start` is where the gesture began.
    Drag { pos: Vec2, start: Vec2 },
    /// Primary button released after a gesture.
    ///
    /// Fires even when `pos` has left the widget; check
    /// `rect.contains(start)` to decide drag ownership, not `pos`.
    DragEnd { pos: Vec2, start: Vec2 },
    /// Press-and-release without movement.
    Click { pos: Vec2 },
    /// Pointer moved with no button held (fired every frame).
    Hover { pos: Vec2 },
    /// Committed text input (one or more characters).
    TextInput { text: String },
    /// Named key pressed.
    KeyPress { key: Key },
}

/// Result returned by [`crate::widget::Widget::on_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was handled; stop routing to siblings.
    Consumed,
    /// Event was not handled; keep routing.
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}
