use crate::color::Rgba;

// ── GradientFormat ────────────────────────────────────────────────────────

/// The three supported CSS gradient functions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GradientFormat {
    Linear,
    Radial,
    Conic,
}

impl GradientFormat {
    pub const ALL: [GradientFormat; 3] =
        [GradientFormat::Linear, GradientFormat::Radial, GradientFormat::Conic];

    /// CSS function name, without the parenthesis.
    #[inline]
    pub fn css_name(self) -> &'static str {
        match self {
            GradientFormat::Linear => "linear-gradient",
            GradientFormat::Radial => "radial-gradient",
            GradientFormat::Conic => "conic-gradient",
        }
    }

    /// Matches a function name case-insensitively.
    pub fn from_css_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|f| f.css_name() == lower)
    }

    /// Auxiliary syntax used when nothing was parsed from the input:
    /// shape/position for radial, origin angle/center for conic.
    #[inline]
    pub fn default_prefix(self) -> &'static str {
        match self {
            GradientFormat::Linear => "",
            GradientFormat::Radial => "circle at center",
            GradientFormat::Conic => "from 90deg at 50% 50%",
        }
    }
}

// ── GradientStop / GradientDesc ───────────────────────────────────────────

/// One resolved color stop: position in `[0, 100]` percent.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GradientStop {
    pub position: f32,
    pub color: Rgba,
}

impl GradientStop {
    #[inline]
    pub const fn new(position: f32, color: Rgba) -> Self {
        Self { position, color }
    }
}

/// Canonical parsed representation of a gradient string.
///
/// `angle` applies to linear gradients only (degrees, default 90).
/// `prefix` carries radial/conic auxiliary syntax verbatim, e.g.
/// `"circle at center"`; empty means none.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientDesc {
    pub format: GradientFormat,
    pub angle: f32,
    pub prefix: String,
    pub stops: Vec<GradientStop>,
}

impl GradientDesc {
    pub fn new(format: GradientFormat, stops: Vec<GradientStop>) -> Self {
        Self { format, angle: 90.0, prefix: String::new(), stops }
    }

    /// Serializes back to CSS. Stops are sorted by position and clamped to
    /// `[0, 100]`; parsing the output reproduces an equivalent stop set.
    pub fn to_css(&self) -> String {
        let mut stops = self.stops.clone();
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));

        let body = stops
            .iter()
            .map(|s| format!("{} {}%", s.color, s.position.clamp(0.0, 100.0)))
            .collect::<Vec<_>>()
            .join(", ");

        match self.format {
            GradientFormat::Linear => {
                format!("linear-gradient({}deg, {})", self.angle, body)
            }
            GradientFormat::Radial | GradientFormat::Conic => {
                let prefix = self.prefix.trim();
                if prefix.is_empty() {
                    format!("{}({})", self.format.css_name(), body)
                } else {
                    format!("{}({}, {})", self.format.css_name(), prefix, body)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Rgba {
        Rgba::opaque(255, 0, 0)
    }

    #[test]
    fn linear_includes_angle() {
        let d = GradientDesc::new(
            GradientFormat::Linear,
            vec![GradientStop::new(0.0, red()), GradientStop::new(100.0, red())],
        );
        assert_eq!(
            d.to_css(),
            "linear-gradient(90deg, rgba(255, 0, 0, 1) 0%, rgba(255, 0, 0, 1) 100%)"
        );
    }

    #[test]
    fn radial_prepends_prefix_when_present() {
        let mut d = GradientDesc::new(
            GradientFormat::Radial,
            vec![GradientStop::new(50.0, red())],
        );
        d.prefix = "circle at center".to_string();
        assert_eq!(
            d.to_css(),
            "radial-gradient(circle at center, rgba(255, 0, 0, 1) 50%)"
        );

        d.prefix.clear();
        assert_eq!(d.to_css(), "radial-gradient(rgba(255, 0, 0, 1) 50%)");
    }

    #[test]
    fn stops_are_sorted_and_clamped() {
        let d = GradientDesc::new(
            GradientFormat::Conic,
            vec![GradientStop::new(120.0, red()), GradientStop::new(-5.0, red())],
        );
        assert_eq!(
            d.to_css(),
            "conic-gradient(rgba(255, 0, 0, 1) 0%, rgba(255, 0, 0, 1) 100%)"
        );
    }
}
