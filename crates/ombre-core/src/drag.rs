use crate::stops::{StopId, StopSet};

/// Smallest permitted distance between two stop positions, in percent.
pub const MIN_GAP: f32 = 4.0;

// ── Block state ───────────────────────────────────────────────────────────

/// Approach direction recorded when a drag runs into a neighbor.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Dir {
    /// Moving left, pressing against the left neighbor.
    Left,
    /// Moving right, pressing against the right neighbor.
    Right,
}

/// Memory of a neighbor collision being actively resisted.
///
/// A block encodes approach history, not just current position. The caller
/// must thread it across consecutive move samples of one gesture; it cannot
/// be recomputed from the latest position alone.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Block {
    pub neighbor: StopId,
    pub dir: Dir,
}

/// Result of one constraint-engine step.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct JumpResult {
    /// The legal draft position.
    pub pos: f32,
    /// Block to carry into the next step, if a collision is being held.
    pub block: Option<Block>,
}

// ── Drag session ──────────────────────────────────────────────────────────

/// Ephemeral per-gesture state: created on pointer-down, destroyed on
/// release, at which point `draft` is committed into the collection.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub stop: StopId,
    /// Provisional position, not yet committed.
    pub draft: f32,
    /// Raw (unconstrained) position from the previous sample.
    pub last_raw: Option<f32>,
    pub block: Option<Block>,
    /// Horizontal distance from the pointer to the grabbed thumb center,
    /// so the thumb does not snap under the cursor on pick-up.
    pub pointer_offset_px: f32,
}

impl DragSession {
    pub fn new(stop: StopId, draft: f32, pointer_offset_px: f32) -> Self {
        Self { stop, draft, last_raw: None, block: None, pointer_offset_px }
    }
}

// ── Constraint engine ─────────────────────────────────────────────────────

/// Converts a raw pointer-derived position into a legal draft position.
///
/// While the pointer moves toward a neighbor and enters the minimum-gap
/// zone, the moving stop pins to the gap boundary and a [`Block`] is
/// installed. The block holds until the raw position leaves the zone on
/// either side: backing off releases it immediately, and pushing past
/// `neighbor + gap` (or `- gap` for a left block) releases it as well, so a
/// stop never tunnels through a neighbor mid-zone.
pub fn apply_jump(
    raw: f32,
    moving: StopId,
    set: &StopSet,
    last_raw: Option<f32>,
    block: Option<Block>,
) -> JumpResult {
    let pos = raw.clamp(0.0, 100.0);
    let direction = last_raw.map_or(0.0, |last| raw - last);

    let (left, right) = neighbors_for(pos, moving, set);

    if let Some(held) = block {
        match set.get(held.neighbor) {
            // Neighbor vanished mid-gesture; forget the block.
            None => {}
            Some(neighbor) => match held.dir {
                Dir::Right => {
                    if raw > neighbor.position - MIN_GAP && raw < neighbor.position + MIN_GAP {
                        let pinned = neighbor.position - MIN_GAP;
                        return JumpResult {
                            pos: reclamp(pinned, moving, set),
                            block: Some(held),
                        };
                    }
                }
                Dir::Left => {
                    if raw < neighbor.position + MIN_GAP && raw > neighbor.position - MIN_GAP {
                        let pinned = neighbor.position + MIN_GAP;
                        return JumpResult {
                            pos: reclamp(pinned, moving, set),
                            block: Some(held),
                        };
                    }
                }
            },
        }
    }

    if direction > 0.0 {
        if let Some(right) = right {
            if raw >= right.position - MIN_GAP && raw < right.position + MIN_GAP {
                let pinned = right.position - MIN_GAP;
                return JumpResult {
                    pos: reclamp(pinned, moving, set),
                    block: Some(Block { neighbor: right.id, dir: Dir::Right }),
                };
            }
        }
    }

    if direction < 0.0 {
        if let Some(left) = left {
            if raw <= left.position + MIN_GAP && raw > left.position - MIN_GAP {
                let pinned = left.position + MIN_GAP;
                return JumpResult {
                    pos: reclamp(pinned, moving, set),
                    block: Some(Block { neighbor: left.id, dir: Dir::Left }),
                };
            }
        }
    }

    let clamped = clamp_between(pos, left.map(|s| s.position), right.map(|s| s.position));
    JumpResult { pos: clamped, block: None }
}

/// Immediate neighbors of `pos` among all stops except the moving one.
/// A stop sitting exactly at `pos` is neither left nor right.
fn neighbors_for(
    pos: f32,
    moving: StopId,
    set: &StopSet,
) -> (Option<&crate::stops::Stop>, Option<&crate::stops::Stop>) {
    let mut left = None;
    let mut right = None;

    for id in set.order() {
        let Some(stop) = set.get(*id) else { continue };
        if stop.id == moving {
            continue;
        }
        if stop.position < pos {
            left = Some(stop);
        }
        if stop.position > pos && right.is_none() {
            right = Some(stop);
        }
    }

    (left, right)
}

/// Re-clamps a pinned position against the neighbors at that position,
/// guarding against the far side when three stops are tightly packed.
fn reclamp(pos: f32, moving: StopId, set: &StopSet) -> f32 {
    let (left, right) = neighbors_for(pos, moving, set);
    clamp_between(pos, left.map(|s| s.position), right.map(|s| s.position))
}

/// Interval clamp: at least `MIN_GAP` away from both neighbors, inside
/// `[0, 100]`.
fn clamp_between(pos: f32, left: Option<f32>, right: Option<f32>) -> f32 {
    let mut p = pos;
    if let Some(l) = left {
        p = p.max(l + MIN_GAP);
    }
    if let Some(r) = right {
        p = p.min(r - MIN_GAP);
    }
    p.clamp(0.0, 100.0)
}

// ── New-stop placement ────────────────────────────────────────────────────

/// Pushes a proposed *new* stop position away from existing stops until it
/// respects `min_gap`, clamped to `[0, 100]`. Governs creation only;
/// existing-stop drags go through [`apply_jump`].
pub fn stop_gap(pos: f32, others: &[f32], min_gap: f32) -> f32 {
    let mut sorted = others.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mut p = pos;
    for other in sorted {
        if (other - p).abs() < min_gap {
            p = (other + min_gap).clamp(0.0, 100.0);
        }
    }
    p
}

/// Gap rule for typed position edits.
///
/// A neighbor parked exactly at an edge cannot be pushed, so the edit is
/// held `gap` away from that edge instead of being shifted past it.
pub fn enforce_gap_with_edge(pos: f32, others: &[f32], gap: f32) -> f32 {
    let clamped = pos.clamp(0.0, 100.0);

    if others.iter().any(|&p| (p - 100.0).abs() < 1e-4) {
        return clamped.min(100.0 - gap);
    }
    if others.iter().any(|&p| p.abs() < 1e-4) {
        return clamped.max(gap);
    }

    stop_gap(clamped, others, gap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ombre_css::Rgba;

    /// Builds a set and returns (set, ids) for the given positions.
    fn set_at(positions: &[f32]) -> (StopSet, Vec<StopId>) {
        let mut set = StopSet::new();
        let ids = positions.iter().map(|&p| set.add(p, Rgba::black())).collect();
        (set, ids)
    }

    /// Replays raw samples through the engine, threading block state the
    /// way a pointer gesture does.
    fn replay(set: &StopSet, moving: StopId, samples: &[f32]) -> JumpResult {
        let mut last_raw = None;
        let mut block = None;
        let mut result = JumpResult { pos: 0.0, block: None };
        for &raw in samples {
            result = apply_jump(raw, moving, set, last_raw, block);
            last_raw = Some(raw);
            block = result.block;
        }
        result
    }

    #[test]
    fn free_movement_is_just_clamped() {
        let (set, ids) = set_at(&[20.0, 80.0]);
        let r = apply_jump(50.0, ids[0], &set, Some(40.0), None);
        assert_eq!(r.pos, 50.0);
        assert!(r.block.is_none());
    }

    #[test]
    fn entering_gap_zone_pins_and_blocks() {
        let (set, ids) = set_at(&[20.0, 80.0]);
        let r = replay(&set, ids[0], &[60.0, 77.0]);
        assert_eq!(r.pos, 76.0);
        assert_eq!(r.block.map(|b| b.dir), Some(Dir::Right));
    }

    #[test]
    fn blocked_drag_holds_at_gap_boundary() {
        // Dragging from 20 toward 80: pinned at 76 through the whole zone.
        let (set, ids) = set_at(&[20.0, 80.0]);
        for push in [78.0, 80.0, 82.0, 83.9] {
            let r = replay(&set, ids[0], &[60.0, 77.0, push]);
            assert_eq!(r.pos, 76.0, "raw {push} should stay pinned");
            assert!(r.block.is_some());
        }
    }

    #[test]
    fn block_releases_past_far_side() {
        let (set, ids) = set_at(&[20.0, 80.0]);
        let r = replay(&set, ids[0], &[60.0, 77.0, 85.0]);
        assert_eq!(r.pos, 85.0);
        assert!(r.block.is_none());
    }

    #[test]
    fn block_releases_on_reversal() {
        let (set, ids) = set_at(&[20.0, 80.0]);
        let r = replay(&set, ids[0], &[60.0, 77.0, 70.0]);
        assert_eq!(r.pos, 70.0);
        assert!(r.block.is_none());
    }

    #[test]
    fn leftward_block_mirrors_rightward() {
        let (set, ids) = set_at(&[20.0, 80.0]);
        let r = replay(&set, ids[1], &[40.0, 22.0, 18.0]);
        assert_eq!(r.pos, 24.0);
        assert_eq!(r.block.map(|b| b.dir), Some(Dir::Left));

        let released = replay(&set, ids[1], &[40.0, 22.0, 10.0]);
        assert_eq!(released.pos, 10.0);
        assert!(released.block.is_none());
    }

    #[test]
    fn drafts_never_violate_min_gap() {
        // A jittery sweep across the whole track: every returned draft must
        // stay at least MIN_GAP away from both fixed neighbors.
        let (set, ids) = set_at(&[10.0, 50.0, 90.0]);
        let moving = ids[1];

        let mut last_raw = None;
        let mut block = None;
        let mut raw: f32 = 50.0;
        let deltas = [7.0, -3.0, 11.0, -6.0, 13.0, 9.0, -20.0, 4.0, 30.0, -45.0, 18.0];
        for (i, d) in deltas.iter().cycle().take(60).enumerate() {
            raw = (raw + if i % 3 == 0 { *d } else { d * 0.5 }).clamp(-10.0, 110.0);
            let r = apply_jump(raw, moving, &set, last_raw, block);
            assert!((r.pos - 10.0).abs() >= MIN_GAP - 1e-3, "pos {} too close to 10", r.pos);
            assert!((r.pos - 90.0).abs() >= MIN_GAP - 1e-3, "pos {} too close to 90", r.pos);
            last_raw = Some(raw);
            block = r.block;
        }
    }

    #[test]
    fn first_sample_has_no_direction() {
        // Without a previous sample there is no approach, so landing inside
        // the zone clamps instead of installing a block.
        let (set, ids) = set_at(&[20.0, 80.0]);
        let r = apply_jump(78.0, ids[0], &set, None, None);
        assert_eq!(r.pos, 76.0);
        assert!(r.block.is_none());
    }

    // ── stop_gap / enforce_gap_with_edge ──────────────────────────────────

    #[test]
    fn new_stop_pushed_off_coincident_stop() {
        assert_eq!(stop_gap(50.0, &[50.0], 4.0), 54.0);
    }

    #[test]
    fn new_stop_far_from_others_unchanged() {
        assert_eq!(stop_gap(30.0, &[50.0, 90.0], 4.0), 30.0);
    }

    #[test]
    fn new_stop_clamped_at_track_end() {
        assert_eq!(stop_gap(99.0, &[98.0], 4.0), 100.0);
    }

    #[test]
    fn edge_rule_holds_back_from_occupied_right_edge() {
        assert_eq!(enforce_gap_with_edge(100.0, &[100.0, 0.0], 4.0), 96.0);
    }

    #[test]
    fn edge_rule_holds_back_from_occupied_left_edge() {
        assert_eq!(enforce_gap_with_edge(0.0, &[0.0, 50.0], 4.0), 4.0);
    }

    #[test]
    fn edge_rule_falls_through_to_gap_push() {
        assert_eq!(enforce_gap_with_edge(50.0, &[50.0], 4.0), 54.0);
    }
}
