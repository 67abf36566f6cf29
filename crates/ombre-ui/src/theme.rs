//! Default visual constants shared by the controls.
//!
//! Hosts restyle through the per-control style knobs; these are just the
//! out-of-the-box values.

use ombre_css::Rgba;

pub const PANEL_BG: Rgba = Rgba::opaque(24, 26, 32);
pub const FIELD_BG: Rgba = Rgba::opaque(36, 40, 48);
pub const BORDER: Rgba = Rgba::opaque(62, 68, 80);
pub const ACCENT: Rgba = Rgba::opaque(64, 156, 255);
pub const TEXT: Rgba = Rgba::opaque(226, 230, 238);
pub const TEXT_MUTED: Rgba = Rgba::opaque(140, 148, 162);
pub const THUMB: Rgba = Rgba::opaque(255, 255, 255);

pub const CORNER_RADIUS: f32 = 4.0;
pub const CHECKER_CELL: f32 = 6.0;
pub const TEXT_SIZE: f32 = 13.0;
