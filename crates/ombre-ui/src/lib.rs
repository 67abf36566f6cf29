//! Ombre UI: the gradient picker's retained control layer.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use ombre_ui::prelude::*;
//!
//! let mut picker = GradientPicker::new(
//!     PickerConfig::new()
//!         .gradient("linear-gradient(90deg, rgba(10,10,193,1) 0%, rgba(163,0,255,1) 100%)")
//!         .update_delay_ms(200)
//!         .on_change(|css| println!("gradient: {css}")),
//! );
//!
//! // In your frame callback:
//! let draw_list = picker.frame(&events, viewport, std::time::Instant::now());
//! // Replay draw_list.items() with your renderer.
//! ```
//!
//! The picker never draws: each [`GradientPicker::frame`] records a
//! [`cmd::DrawCmd`] stream for the host renderer and routes that frame's
//! [`event::UiEvent`]s into the controls. All domain state lives in
//! [`ombre_core::state::PickerState`], shared across the controls through a
//! [`SharedPicker`] handle.

pub mod cmd;
pub mod event;
pub mod geom;
pub mod painter;
pub mod picker;
pub mod theme;
pub mod widget;
pub mod widgets;

pub use picker::{Control, GradientPicker, PickerConfig};

/// Shared handle to one picker's state, passed to every control.
pub type SharedPicker = std::rc::Rc<std::cell::RefCell<ombre_core::state::PickerState>>;

/// Everything needed to embed the picker or extend it with custom controls.
pub mod prelude {
    pub use crate::cmd::{Border, DrawCmd, DrawList};
    pub use crate::event::{EventResult, Key, UiEvent};
    pub use crate::geom::{Rect, Vec2};
    pub use crate::painter::Painter;
    pub use crate::picker::{Control, GradientPicker, PickerConfig};
    pub use crate::widget::{Element, Widget};
    pub use crate::widgets::{
        AlphaSlider, AngleInput, ColorSampler, ColorSquare, DeleteStop, EyeDropper,
        FormatSwitch, GradientText, GradientTrack, HueSlider, Preview, StopPosition,
    };
    pub use crate::SharedPicker;

    // Re-export the domain primitives every embedder needs.
    pub use ombre_core::state::PickerState;
    pub use ombre_css::{GradientDesc, GradientFormat, Rgba};
}
