//! Parser, builder, and color types for **CSS gradient strings**.
//!
//! This crate is intentionally dependency-free so host applications and
//! tooling can round-trip gradient strings without pulling in the widget
//! stack.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`color`] | `Rgba`, `Hsv`, hex/rgba parsing, HSV conversions |
//! | [`error`] | `ParseError` |
//! | [`gradient`] | `GradientDesc`, `GradientFormat`, `GradientStop`, `to_css` |
//! | [`parser`] | `parse_gradient` entry point |
//!
//! # Quick start
//!
//! ```rust
//! use ombre_css::{parse_gradient, GradientFormat};
//!
//! let d = parse_gradient("linear-gradient(90deg, #ff0000 0%, #0000ff 100%)").unwrap();
//! assert_eq!(d.format, GradientFormat::Linear);
//! assert_eq!(d.angle, 90.0);
//! assert_eq!(d.stops.len(), 2);
//! ```

pub mod color;
pub mod error;
pub mod gradient;
pub mod parser;

pub use color::{hsv_to_rgb, normalize_hue, rgb_to_hsv, Hsv, Rgba};
pub use error::ParseError;
pub use gradient::{GradientDesc, GradientFormat, GradientStop};
pub use parser::parse_gradient;
