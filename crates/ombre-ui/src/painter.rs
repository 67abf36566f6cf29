use ombre_css::Rgba;

use crate::cmd::{Border, DrawCmd, DrawList};
use crate::geom::{Rect, Vec2};

/// Drawing surface passed to [`crate::widget::Widget::paint`].
///
/// Wraps the frame's [`DrawList`] with a high-level API and exposes pointer
/// state so widgets can express hover/pressed visuals directly in their
/// paint implementations.
pub struct Painter<'a> {
    list: &'a mut DrawList,
    /// Current pointer position in logical pixels.
    pub mouse_pos: Vec2,
    /// True while the primary button is held down.
    pub mouse_pressed: bool,
}

impl<'a> Painter<'a> {
    pub fn new(list: &'a mut DrawList, mouse_pos: Vec2, mouse_pressed: bool) -> Self {
        Self { list, mouse_pos, mouse_pressed }
    }

    // ── input queries ─────────────────────────────────────────────────────

    #[inline]
    pub fn is_hovered(&self, rect: Rect) -> bool {
        rect.contains(self.mouse_pos)
    }

    #[inline]
    pub fn is_pressed(&self, rect: Rect) -> bool {
        self.mouse_pressed && rect.contains(self.mouse_pos)
    }

    // ── drawing ───────────────────────────────────────────────────────────

    pub fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.list.push(DrawCmd::Rect { rect, color });
    }

    /// Pass `radius = 0.0` for sharp corners, `border = None` for no stroke.
    pub fn fill_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        color: Rgba,
        border: Option<Border>,
    ) {
        self.list.push(DrawCmd::RoundedRect { rect, radius, color, border });
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, border: Option<Border>) {
        self.list.push(DrawCmd::Circle { center, radius, color, border });
    }

    /// Left-to-right gradient; offsets in `[0, 1]`.
    pub fn fill_hgradient(&mut self, rect: Rect, stops: Vec<(f32, Rgba)>) {
        self.list.push(DrawCmd::HGradient { rect, stops });
    }

    /// Top-to-bottom gradient; offsets in `[0, 1]`.
    pub fn fill_vgradient(&mut self, rect: Rect, stops: Vec<(f32, Rgba)>) {
        self.list.push(DrawCmd::VGradient { rect, stops });
    }

    /// Checkerboard backdrop for translucent fills.
    pub fn fill_checker(&mut self, rect: Rect, cell: f32) {
        self.list.push(DrawCmd::Checkerboard { rect, cell });
    }

    pub fn text(&mut self, text: impl Into<String>, origin: Vec2, size: f32, color: Rgba) {
        self.list.push(DrawCmd::Text { origin, size, color, text: text.into() });
    }
}
