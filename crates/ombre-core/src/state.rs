use std::collections::HashMap;

use ombre_css::{parse_gradient, GradientDesc, GradientFormat, GradientStop, Rgba};

use crate::drag::{apply_jump, enforce_gap_with_edge, stop_gap, DragSession, MIN_GAP};
use crate::stops::{Stop, StopId, StopSet};

/// Upper end of the hue range. Kept reachable (inclusive) so the hue thumb
/// can sit at the far right for colors that wrap back to red.
pub const HUE_MAX: f32 = 360.0;

/// Shared state bundle for one picker instance.
///
/// Exactly one of these exists per picker; the composition shell hands each
/// control a shared handle and every mutation goes through the named methods
/// below. The stop collection, active selection, and drag session have a
/// single writer at a time by construction, since only one pointer gesture can be
/// live.
#[derive(Debug)]
pub struct PickerState {
    pub stops: StopSet,
    format: GradientFormat,
    allowed_formats: Vec<GradientFormat>,
    prefixes: HashMap<GradientFormat, String>,
    angle: f32,
    /// Color mirrored from the active stop; edited by the color controls.
    rgba: Rgba,
    /// Sticky hue: survives round-trips through gray/red where the color
    /// alone cannot encode it.
    hue: f32,
    pub drag: Option<DragSession>,
}

impl PickerState {
    pub fn new() -> Self {
        let stops = StopSet::seed();
        let rgba = stops.active_stop().map(|s| s.color).unwrap_or(Rgba::black());
        let hue = rgba.hue();

        let prefixes = GradientFormat::ALL
            .into_iter()
            .map(|f| (f, f.default_prefix().to_string()))
            .collect();

        Self {
            stops,
            format: GradientFormat::Linear,
            allowed_formats: GradientFormat::ALL.to_vec(),
            prefixes,
            angle: 90.0,
            rgba,
            hue,
            drag: None,
        }
    }

    /// Seeds the state from a gradient string; malformed input falls back to
    /// the default state (the caller keeps going, per the error policy).
    pub fn from_gradient(input: &str) -> Self {
        let mut state = Self::new();
        match parse_gradient(input) {
            Ok(desc) => state.apply_desc(&desc),
            Err(e) => log::debug!("ignoring unparseable initial gradient: {e}"),
        }
        state
    }

    // ── format / angle / prefix ───────────────────────────────────────────

    #[inline]
    pub fn format(&self) -> GradientFormat {
        self.format
    }

    /// Switches format; requests outside the allowed subset are ignored.
    pub fn set_format(&mut self, format: GradientFormat) {
        if self.allowed_formats.contains(&format) {
            self.format = format;
        }
    }

    #[inline]
    pub fn allowed_formats(&self) -> &[GradientFormat] {
        &self.allowed_formats
    }

    /// Restricts the format switcher. The current format stays even when the
    /// subset excludes it; only future switches are limited.
    pub fn set_allowed_formats(&mut self, formats: Vec<GradientFormat>) {
        if !formats.is_empty() {
            self.allowed_formats = formats;
        }
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Typed angle entry: clamped to `[0, 360]` rather than rejected.
    pub fn set_angle(&mut self, angle: f32) {
        if angle.is_finite() {
            self.angle = angle.clamp(0.0, 360.0);
        }
    }

    /// Stepper/arrow-key increment, wrapping at 360.
    pub fn increment_angle(&mut self) {
        self.angle = (self.angle + 1.0) % 360.0;
    }

    /// Stepper/arrow-key decrement, wrapping below 0.
    pub fn decrement_angle(&mut self) {
        self.angle = (self.angle - 1.0 + 360.0) % 360.0;
    }

    pub fn prefix_for(&self, format: GradientFormat) -> &str {
        self.prefixes.get(&format).map(String::as_str).unwrap_or("")
    }

    // ── active color ──────────────────────────────────────────────────────

    #[inline]
    pub fn rgba(&self) -> Rgba {
        self.rgba
    }

    #[inline]
    pub fn hue(&self) -> f32 {
        self.hue
    }

    /// Writes a full color (eye dropper, external recolor) into the mirror
    /// and the active stop.
    pub fn set_rgba(&mut self, rgba: Rgba) {
        self.rgba = rgba;
        self.hue = rgba.hue();
        self.recolor_active();
    }

    /// Hue slider commit: re-derives RGB at the new hue, preserving
    /// saturation, value, and alpha.
    pub fn set_hue(&mut self, hue: f32) {
        self.hue = hue.clamp(0.0, HUE_MAX);
        self.rgba = self.rgba.with_hue(self.hue);
        self.recolor_active();
    }

    /// Alpha slider commit.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.rgba = self.rgba.with_alpha(alpha);
        self.recolor_active();
    }

    /// Saturation/value square commit; hue and alpha stay fixed.
    pub fn set_saturation_value(&mut self, s: f32, v: f32) {
        self.rgba = self.rgba.with_hsv(self.hue, s.clamp(0.0, 1.0), v.clamp(0.0, 1.0));
        self.recolor_active();
    }

    fn recolor_active(&mut self) {
        if let Some(id) = self.stops.active() {
            self.stops.set_color(id, self.rgba);
        }
    }

    /// Refreshes the color mirror from the active stop.
    ///
    /// When the stop's hue computes to 0 but the slider was parked near the
    /// top of the range, keep 360: both encode red, and snapping the thumb
    /// across the whole track on reselection reads as a glitch.
    pub fn sync_color_from_active(&mut self) {
        let Some(stop) = self.stops.active_stop() else { return };
        self.rgba = stop.color;
        let computed = self.rgba.hue();
        self.hue = if computed == 0.0 && self.hue > 300.0 { HUE_MAX } else { computed };
    }

    // ── stop operations ───────────────────────────────────────────────────

    /// Stop click without drag: select and sync the color controls.
    pub fn select_stop(&mut self, id: StopId) {
        self.stops.set_active(id);
        self.sync_color_from_active();
    }

    /// Pointer-down on empty track: create a stop at a gap-respecting
    /// position seeded with the current color, select it, and start a drag
    /// session so the stop can be placed before release.
    pub fn add_stop_at(&mut self, raw_pos: f32) -> StopId {
        let safe = stop_gap(raw_pos, &self.stops.positions(), MIN_GAP);
        let id = self.stops.add(safe, self.rgba);
        self.stops.set_active(id);
        self.sync_color_from_active();

        let mut session = DragSession::new(id, safe, 0.0);
        session.last_raw = Some(safe);
        self.drag = Some(session);
        id
    }

    /// Deletes the active stop (refused at the minimum count) and syncs the
    /// color controls to the promoted neighbor.
    pub fn delete_active(&mut self) -> bool {
        let removed = self.stops.remove_active().is_some();
        if removed {
            self.sync_color_from_active();
        }
        removed
    }

    // ── drag session ──────────────────────────────────────────────────────

    /// Pointer-down on an existing stop: select it and open a drag session
    /// at the constrained position.
    pub fn begin_drag(&mut self, id: StopId, raw: f32, pointer_offset_px: f32) {
        self.select_stop(id);
        let result = apply_jump(raw, id, &self.stops, None, None);

        let mut session = DragSession::new(id, result.pos, pointer_offset_px);
        session.last_raw = Some(raw);
        session.block = result.block;
        self.drag = Some(session);
    }

    /// Pointer-move: runs the constraint engine and updates the draft only.
    /// Returns `true` when the draft actually changed.
    pub fn drag_to(&mut self, raw: f32) -> bool {
        let Some(session) = self.drag.as_mut() else { return false };

        let result = apply_jump(raw, session.stop, &self.stops, session.last_raw, session.block);
        session.last_raw = Some(raw);
        session.block = result.block;

        // Sub-millipercent pointer jitter schedules no work.
        let next = round3(result.pos);
        if session.draft == next {
            return false;
        }
        session.draft = next;
        true
    }

    /// Pointer-up/cancel: one final constraint pass over the draft, commit
    /// into the collection, and tear the session down.
    pub fn end_drag(&mut self) -> bool {
        let Some(session) = self.drag.take() else { return false };
        let result = apply_jump(
            session.draft,
            session.stop,
            &self.stops,
            session.last_raw,
            session.block,
        );
        self.stops.set_position(session.stop, result.pos);
        true
    }

    /// Unconditional drag teardown with no commit (defensive reset).
    pub fn reset_drag(&mut self) {
        self.drag = None;
    }

    #[inline]
    pub fn dragging(&self) -> Option<StopId> {
        self.drag.as_ref().map(|s| s.stop)
    }

    /// Position shown by the numeric input: the drag draft while the active
    /// stop is mid-gesture, the committed value otherwise.
    pub fn active_position_display(&self) -> Option<f32> {
        let active = self.stops.active()?;
        if let Some(session) = &self.drag {
            if session.stop == active {
                return Some(session.draft);
            }
        }
        self.stops.get(active).map(|s| s.position)
    }

    /// Typed/stepped position edit for the active stop, clamped through the
    /// edge-aware gap rule. Mid-drag the edit lands in the draft; otherwise
    /// it commits immediately.
    pub fn edit_active_position(&mut self, value: f32) -> bool {
        let Some(active) = self.stops.active() else { return false };
        if !value.is_finite() {
            return false;
        }

        let others = self.stops.positions_excluding(active);
        let safe = enforce_gap_with_edge(value, &others, MIN_GAP);

        if let Some(session) = self.drag.as_mut() {
            if session.stop == active {
                if session.draft == safe {
                    return false;
                }
                session.draft = safe;
                return true;
            }
        }

        self.stops.set_position(active, safe);
        true
    }

    /// Arrow-key/stepper nudge of the active stop position.
    pub fn nudge_active_position(&mut self, delta: f32) -> bool {
        match self.active_position_display() {
            Some(base) => self.edit_active_position((base + delta).clamp(0.0, 100.0)),
            None => false,
        }
    }

    // ── serialization ─────────────────────────────────────────────────────

    /// Committed stops with the in-flight draft substituted for the dragged
    /// stop, sorted by position.
    pub fn effective_stops(&self) -> Vec<Stop> {
        let mut stops = self.stops.sorted();
        if let Some(session) = &self.drag {
            for stop in &mut stops {
                if stop.id == session.stop {
                    stop.position = session.draft;
                }
            }
            stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        }
        stops
    }

    /// Rebuilds the descriptor delivered to the host.
    pub fn descriptor(&self) -> GradientDesc {
        GradientDesc {
            format: self.format,
            angle: self.angle,
            prefix: self.prefix_for(self.format).to_string(),
            stops: self
                .effective_stops()
                .into_iter()
                .map(|s| GradientStop::new(s.position, s.color))
                .collect(),
        }
    }

    /// Adopts an externally supplied descriptor: format, angle, prefix
    /// override, full stop replacement, and color-control resync.
    pub fn apply_desc(&mut self, desc: &GradientDesc) {
        self.format = desc.format;
        if desc.format == GradientFormat::Linear {
            self.angle = desc.angle;
        }
        if !desc.prefix.trim().is_empty() {
            self.prefixes.insert(desc.format, desc.prefix.clone());
        }
        self.stops.replace_from_desc(desc);
        self.sync_color_from_active();
    }
}

impl Default for PickerState {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn round3(x: f32) -> f32 {
    (x * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_from_gradient_string() {
        let s = PickerState::from_gradient("linear-gradient(45deg, #ff0000 0%, #0000ff 100%)");
        assert_eq!(s.format(), GradientFormat::Linear);
        assert_eq!(s.angle(), 45.0);
        assert_eq!(s.stops.len(), 2);
        assert_eq!(s.rgba(), Rgba::opaque(255, 0, 0));
    }

    #[test]
    fn malformed_initial_gradient_falls_back_to_seed() {
        let s = PickerState::from_gradient("not a gradient");
        assert_eq!(s.stops.len(), 2);
        assert_eq!(s.format(), GradientFormat::Linear);
    }

    #[test]
    fn new_stop_respects_gap_and_becomes_active() {
        let mut s = PickerState::from_gradient(
            "linear-gradient(90deg, #ff0000 0%, #00ff00 50%, #0000ff 100%)",
        );
        let id = s.add_stop_at(50.0);
        assert_eq!(s.stops.get(id).unwrap().position, 54.0);
        assert_eq!(s.stops.active(), Some(id));
        assert_eq!(s.dragging(), Some(id));
    }

    #[test]
    fn drag_commits_on_end() {
        let mut s =
            PickerState::from_gradient("linear-gradient(90deg, #ff0000 20%, #0000ff 80%)");
        let id = s.stops.order()[0];

        s.begin_drag(id, 20.0, 0.0);
        s.drag_to(40.0);
        assert_eq!(s.stops.get(id).unwrap().position, 20.0); // draft only
        s.end_drag();
        assert_eq!(s.stops.get(id).unwrap().position, 40.0);
        assert!(s.drag.is_none());
    }

    #[test]
    fn effective_stops_substitute_draft() {
        let mut s =
            PickerState::from_gradient("linear-gradient(90deg, #ff0000 20%, #0000ff 80%)");
        let id = s.stops.order()[0];
        s.begin_drag(id, 20.0, 0.0);
        s.drag_to(60.0);

        let eff = s.effective_stops();
        assert_eq!(eff[0].position, 60.0);
        assert_eq!(s.stops.get(id).unwrap().position, 20.0);
    }

    #[test]
    fn typed_position_mid_drag_edits_draft_only() {
        let mut s =
            PickerState::from_gradient("linear-gradient(90deg, #ff0000 20%, #0000ff 80%)");
        let id = s.stops.order()[0];
        s.begin_drag(id, 20.0, 0.0);

        assert!(s.edit_active_position(30.0));
        assert_eq!(s.active_position_display(), Some(30.0));
        assert_eq!(s.stops.get(id).unwrap().position, 20.0);
    }

    #[test]
    fn sticky_hue_survives_wrap_to_red() {
        let mut s = PickerState::new();
        s.set_hue(355.0);
        let active = s.stops.active().unwrap();
        s.stops.set_color(active, Rgba::opaque(255, 0, 0)); // hue computes to 0
        s.sync_color_from_active();
        assert_eq!(s.hue(), HUE_MAX);
    }

    #[test]
    fn plain_red_keeps_zero_hue() {
        let mut s = PickerState::new();
        s.set_hue(10.0);
        let active = s.stops.active().unwrap();
        s.stops.set_color(active, Rgba::opaque(255, 0, 0));
        s.sync_color_from_active();
        assert_eq!(s.hue(), 0.0);
    }

    #[test]
    fn angle_wraps_on_steppers_and_clamps_on_typing() {
        let mut s = PickerState::new();
        s.set_angle(359.0);
        s.increment_angle();
        assert_eq!(s.angle(), 0.0);
        s.decrement_angle();
        assert_eq!(s.angle(), 359.0);

        s.set_angle(500.0);
        assert_eq!(s.angle(), 360.0);
    }

    #[test]
    fn format_switch_respects_allowed_subset() {
        let mut s = PickerState::new();
        s.set_allowed_formats(vec![GradientFormat::Linear, GradientFormat::Radial]);
        s.set_format(GradientFormat::Conic);
        assert_eq!(s.format(), GradientFormat::Linear);
        s.set_format(GradientFormat::Radial);
        assert_eq!(s.format(), GradientFormat::Radial);
    }

    #[test]
    fn color_edits_write_through_to_active_stop() {
        let mut s = PickerState::new();
        let active = s.stops.active().unwrap();

        s.set_hue(240.0);
        s.set_alpha(0.5);
        let stop = s.stops.get(active).unwrap();
        assert_eq!(stop.color.a, 0.5);
        assert_eq!(stop.color, s.rgba());
    }

    #[test]
    fn descriptor_round_trips_through_the_parser() {
        let s = PickerState::from_gradient(
            "radial-gradient(circle at center, rgba(10, 20, 30, 0.5) 10%, #ffffff 90%)",
        );
        let css = s.descriptor().to_css();
        let reparsed = parse_gradient(&css).unwrap();
        assert!(s.stops.matches_desc(&reparsed));
    }
}
