use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use ombre_css::{GradientDesc, Rgba};

static NEXT_STOP_ID: AtomicU64 = AtomicU64::new(1);

/// Fewest stops a collection may hold; deletion below this is refused.
pub const MIN_STOPS: usize = 2;

// ── StopId ────────────────────────────────────────────────────────────────

/// Opaque unique identifier for a color stop.
///
/// Allocated once at stop creation and immutable for the stop's lifetime.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct StopId(u64);

impl StopId {
    /// Allocate a new, globally unique `StopId`.
    pub fn new() -> Self {
        StopId(NEXT_STOP_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for StopId {
    fn default() -> Self {
        Self::new()
    }
}

// ── Stop ──────────────────────────────────────────────────────────────────

/// One gradient color stop: a color anchored at a percentage along the
/// track axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Stop {
    pub id: StopId,
    /// Position in `[0, 100]` percent.
    pub position: f32,
    pub color: Rgba,
}

// ── StopSet ───────────────────────────────────────────────────────────────

/// The canonical stop collection.
///
/// Rank is derived from `position`; the `order` list is recomputed whenever
/// any position changes so rendering identity stays stable. At most one stop
/// is active at a time and the active id always refers to a live stop (it is
/// re-validated after every removal or replacement).
#[derive(Debug, Clone)]
pub struct StopSet {
    stops: HashMap<StopId, Stop>,
    order: Vec<StopId>,
    active: Option<StopId>,
}

impl StopSet {
    /// Empty collection. Callers normally start from [`StopSet::seed`] or
    /// [`StopSet::from_desc`]; an empty set renders nothing.
    pub fn new() -> Self {
        Self { stops: HashMap::new(), order: Vec::new(), active: None }
    }

    /// The default two-stop warm gradient shown before any input arrives.
    pub fn seed() -> Self {
        let mut set = Self::new();
        let first = set.add(15.0, Rgba::opaque(255, 126, 95));
        set.add(85.0, Rgba::opaque(254, 180, 123));
        set.active = Some(first);
        set
    }

    /// Builds a collection from a parsed descriptor. Stops keep the
    /// descriptor's sorted order; the first stop becomes active.
    pub fn from_desc(desc: &GradientDesc) -> Self {
        let mut set = Self::new();
        for stop in &desc.stops {
            set.add(stop.position, stop.color);
        }
        set.active = set.order.first().copied();
        set
    }

    // ── queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    #[inline]
    pub fn get(&self, id: StopId) -> Option<&Stop> {
        self.stops.get(&id)
    }

    /// Ids in ascending position order.
    #[inline]
    pub fn order(&self) -> &[StopId] {
        &self.order
    }

    /// Stops in ascending position order.
    pub fn sorted(&self) -> Vec<Stop> {
        self.order.iter().filter_map(|id| self.stops.get(id)).copied().collect()
    }

    /// Positions of every stop except `excluded`, unsorted.
    pub fn positions_excluding(&self, excluded: StopId) -> Vec<f32> {
        self.stops
            .values()
            .filter(|s| s.id != excluded)
            .map(|s| s.position)
            .collect()
    }

    /// Positions of all stops, unsorted.
    pub fn positions(&self) -> Vec<f32> {
        self.stops.values().map(|s| s.position).collect()
    }

    #[inline]
    pub fn active(&self) -> Option<StopId> {
        self.active
    }

    /// The active stop, or `None` when no stop is active. A dangling active
    /// id is treated as "no active stop" rather than an error.
    pub fn active_stop(&self) -> Option<&Stop> {
        self.active.and_then(|id| self.stops.get(&id))
    }

    #[inline]
    pub fn can_delete(&self) -> bool {
        self.stops.len() > MIN_STOPS
    }

    // ── mutations ─────────────────────────────────────────────────────────

    /// Inserts a new stop and returns its id. Does not change the active
    /// selection; callers decide whether the new stop is selected.
    pub fn add(&mut self, position: f32, color: Rgba) -> StopId {
        let id = StopId::new();
        self.stops.insert(id, Stop { id, position: position.clamp(0.0, 100.0), color });
        self.reorder();
        id
    }

    /// Makes `id` active if it exists; ignored otherwise.
    pub fn set_active(&mut self, id: StopId) {
        if self.stops.contains_key(&id) {
            self.active = Some(id);
        }
    }

    /// Removes the active stop. Refused (returns `None`) when the collection
    /// is at the minimum count or nothing is active. The next stop in order
    /// is promoted to active, falling back to the previous one.
    pub fn remove_active(&mut self) -> Option<StopId> {
        let active = self.active?;
        if self.stops.len() <= MIN_STOPS || !self.stops.contains_key(&active) {
            return None;
        }

        let idx = self.order.iter().position(|&id| id == active)?;
        let fallback = self
            .order
            .get(idx + 1)
            .or_else(|| idx.checked_sub(1).and_then(|i| self.order.get(i)))
            .copied();

        self.stops.remove(&active);
        self.reorder();
        self.active = fallback;
        self.validate_active();
        Some(active)
    }

    /// Writes a committed position and recomputes the order list.
    pub fn set_position(&mut self, id: StopId, position: f32) {
        if let Some(stop) = self.stops.get_mut(&id) {
            stop.position = position.clamp(0.0, 100.0);
            self.reorder();
        }
    }

    /// Recolors one stop; position and order are untouched.
    pub fn set_color(&mut self, id: StopId, color: Rgba) {
        if let Some(stop) = self.stops.get_mut(&id) {
            stop.color = color;
        }
    }

    /// Replaces the whole collection from a descriptor. The active selection
    /// is preserved by rank (same index in the sorted order) when possible,
    /// defaulting to the first stop.
    pub fn replace_from_desc(&mut self, desc: &GradientDesc) {
        let active_rank = self
            .active
            .and_then(|id| self.order.iter().position(|&o| o == id));

        let rebuilt = Self::from_desc(desc);
        self.stops = rebuilt.stops;
        self.order = rebuilt.order;

        self.active = active_rank
            .and_then(|rank| self.order.get(rank))
            .or_else(|| self.order.first())
            .copied();
    }

    /// True when the collection already matches `desc` stop for stop.
    pub fn matches_desc(&self, desc: &GradientDesc) -> bool {
        let sorted = self.sorted();
        sorted.len() == desc.stops.len()
            && sorted
                .iter()
                .zip(&desc.stops)
                .all(|(a, b)| a.position == b.position && a.color == b.color)
    }

    // ── internal ──────────────────────────────────────────────────────────

    /// Rebuilds `order` from positions. Ties break on id so the order is
    /// deterministic even while two stops sit at the same position.
    fn reorder(&mut self) {
        self.order = self.stops.keys().copied().collect();
        self.order.sort_by(|a, b| {
            let pa = self.stops[a].position;
            let pb = self.stops[b].position;
            pa.total_cmp(&pb).then_with(|| self.stops[a].id.0.cmp(&self.stops[b].id.0))
        });
        self.validate_active();
    }

    fn validate_active(&mut self) {
        if let Some(id) = self.active {
            if !self.stops.contains_key(&id) {
                self.active = self.order.first().copied();
            }
        }
    }
}

impl Default for StopSet {
    fn default() -> Self {
        Self::seed()
    }
}
