//! The picker's interactive controls.
//!
//! Every control is a bidirectional view over one attribute of the shared
//! [`ombre_core::state::PickerState`]: it paints from the state each frame
//! and requests mutations through the state's setter methods, coalesced to
//! one commit per frame where pointer movement can outpace redraws.

pub mod alpha;
pub mod angle;
pub mod delete;
pub mod dropper;
pub mod formats;
pub mod gradient_text;
pub mod hue;
pub mod position;
pub mod preview;
pub mod square;
pub mod track;

pub use alpha::AlphaSlider;
pub use angle::AngleInput;
pub use delete::DeleteStop;
pub use dropper::{ColorSampler, EyeDropper};
pub use formats::FormatSwitch;
pub use gradient_text::GradientText;
pub use hue::HueSlider;
pub use position::StopPosition;
pub use preview::Preview;
pub use square::ColorSquare;
pub use track::GradientTrack;
