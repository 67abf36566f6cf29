use ombre_css::Rgba;

use crate::geom::{Rect, Vec2};

/// Stroke attached to a filled shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Rgba,
}

impl Border {
    #[inline]
    pub const fn new(width: f32, color: Rgba) -> Self {
        Self { width, color }
    }
}

/// Renderer-agnostic draw command stream.
///
/// The picker never touches a drawing surface itself: each frame it records
/// commands and the host renderer replays them with whatever backend it has.
/// Gradient and checkerboard fills are first-class commands because the
/// color proxies (hue ramp, alpha ramp, saturation/value square, track
/// preview) are the component's whole visual output.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect {
        rect: Rect,
        color: Rgba,
    },
    RoundedRect {
        rect: Rect,
        radius: f32,
        color: Rgba,
        border: Option<Border>,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
        border: Option<Border>,
    },
    /// Left-to-right gradient fill; stop offsets are normalized to `[0, 1]`.
    HGradient {
        rect: Rect,
        stops: Vec<(f32, Rgba)>,
    },
    /// Top-to-bottom gradient fill; stop offsets are normalized to `[0, 1]`.
    VGradient {
        rect: Rect,
        stops: Vec<(f32, Rgba)>,
    },
    /// Alternating light/dark cells behind translucent fills.
    Checkerboard {
        rect: Rect,
        cell: f32,
    },
    /// Single-line text at `origin` (top-left), `size` in logical pixels.
    Text {
        origin: Vec2,
        size: f32,
        color: Rgba,
        text: String,
    },
}

/// Recorded draw stream for one frame. Insertion order is paint order.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawCmd>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items, keeping allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.items.push(cmd);
    }

    /// Items in paint order (back to front).
    #[inline]
    pub fn items(&self) -> &[DrawCmd] {
        &self.items
    }
}
