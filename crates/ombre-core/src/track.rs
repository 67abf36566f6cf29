//! Track geometry: mapping between percentages and pixels.
//!
//! Thumbs are drawn centered on their value, so the usable span of a track
//! is inset by one thumb radius on each side, so a marker at 0% or 100% still
//! renders fully inside the track bounds.

/// Stop marker diameter in logical pixels.
pub const STOP_SIZE: f32 = 24.0;

/// Thumb radius, the horizontal inset applied at both track ends.
pub const THUMB_RADIUS: f32 = STOP_SIZE / 2.0;

/// Center x (in track-local pixels) for a stop at `pos` percent.
pub fn left_px_from_percent(pos: f32, width: f32) -> f32 {
    let t = pos.clamp(0.0, 100.0) / 100.0;
    THUMB_RADIUS + t * span(width)
}

/// Percentage for a pointer at track-local `x`.
pub fn percent_from_x(x: f32, width: f32) -> f32 {
    let cx = x.clamp(THUMB_RADIUS, (width - THUMB_RADIUS).max(THUMB_RADIUS));
    let t = (cx - THUMB_RADIUS) / span(width);
    (t * 100.0).clamp(0.0, 100.0)
}

/// Normalized value in `[0, 1]` for a pointer at track-local `x`, used by
/// the hue/alpha sliders.
pub fn value_from_x(x: f32, width: f32) -> f32 {
    let cx = x.clamp(THUMB_RADIUS, (width - THUMB_RADIUS).max(THUMB_RADIUS));
    ((cx - THUMB_RADIUS) / span(width)).clamp(0.0, 1.0)
}

/// Center x (in track-local pixels) for a normalized value in `[0, 1]`.
pub fn thumb_left_from_value(value: f32, width: f32) -> f32 {
    THUMB_RADIUS + value.clamp(0.0, 1.0) * span(width)
}

/// Usable horizontal span once both thumb insets are removed. Never below
/// one pixel so the mappings stay finite on degenerate widths.
#[inline]
fn span(width: f32) -> f32 {
    (width - 2.0 * THUMB_RADIUS).max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_map_to_insets() {
        assert_eq!(left_px_from_percent(0.0, 200.0), THUMB_RADIUS);
        assert_eq!(left_px_from_percent(100.0, 200.0), 200.0 - THUMB_RADIUS);
    }

    #[test]
    fn px_and_percent_are_inverses_midtrack() {
        let width = 320.0;
        for pos in [0.0_f32, 12.5, 50.0, 77.0, 100.0] {
            let px = left_px_from_percent(pos, width);
            let back = percent_from_x(px, width);
            assert!((back - pos).abs() < 1e-3, "{pos} -> {px} -> {back}");
        }
    }

    #[test]
    fn pointer_outside_track_clamps() {
        assert_eq!(percent_from_x(-50.0, 200.0), 0.0);
        assert_eq!(percent_from_x(500.0, 200.0), 100.0);
    }

    #[test]
    fn degenerate_width_stays_finite() {
        let p = percent_from_x(10.0, 0.0);
        assert!(p.is_finite());
        assert!((0.0..=100.0).contains(&p));
    }

    #[test]
    fn value_mapping_round_trips() {
        let width = 160.0;
        for v in [0.0_f32, 0.25, 0.5, 1.0] {
            let px = thumb_left_from_value(v, width);
            assert!((value_from_x(px, width) - v).abs() < 1e-4);
        }
    }
}
