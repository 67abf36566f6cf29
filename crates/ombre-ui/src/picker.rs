use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use ombre_core::schedule::Debounce;
use ombre_core::state::PickerState;
use ombre_css::{parse_gradient, GradientFormat};

use crate::cmd::DrawList;
use crate::event::UiEvent;
use crate::geom::{Rect, Vec2};
use crate::painter::Painter;
use crate::theme;
use crate::widget::Element;
use crate::widgets::{
    AlphaSlider, AngleInput, ColorSampler, ColorSquare, DeleteStop, EyeDropper, FormatSwitch,
    GradientText, GradientTrack, HueSlider, Preview, StopPosition,
};
use crate::SharedPicker;

/// Inset between the panel edge and the outermost controls. Public so
/// hosts can map pointer coordinates onto the layout.
pub const PANEL_PADDING: f32 = 12.0;
/// Spacing between rows and between controls within a row.
pub const ROW_GAP: f32 = 8.0;

const PADDING: f32 = PANEL_PADDING;
const GAP: f32 = ROW_GAP;

// ── Configuration ─────────────────────────────────────────────────────────

/// The controls a layout row can place.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Control {
    Preview,
    Track,
    ColorSquare,
    HueSlider,
    AlphaSlider,
    Formats,
    Angle,
    StopPosition,
    Delete,
    EyeDropper,
    GradientText,
}

impl Control {
    /// Whether the control stretches over the row's remaining width.
    /// Fixed controls keep their measured width.
    fn expands(self) -> bool {
        !matches!(
            self,
            Control::Formats
                | Control::Angle
                | Control::StopPosition
                | Control::Delete
                | Control::EyeDropper
        )
    }
}

/// Configuration for one picker instance.
///
/// ```rust,ignore
/// let picker = GradientPicker::new(
///     PickerConfig::new()
///         .gradient("linear-gradient(90deg, #ff0000 0%, #0000ff 100%)")
///         .update_delay_ms(200)
///         .on_change(|css| println!("{css}")),
/// );
/// ```
pub struct PickerConfig {
    gradient: Option<String>,
    update_delay: Duration,
    formats: Vec<GradientFormat>,
    layout: Vec<Vec<Control>>,
    sampler: Option<Box<dyn ColorSampler>>,
    on_change: Option<Box<dyn FnMut(&str)>>,
}

impl PickerConfig {
    pub fn new() -> Self {
        Self {
            gradient: None,
            update_delay: Duration::ZERO,
            formats: GradientFormat::ALL.to_vec(),
            layout: Self::default_layout(),
            sampler: None,
            on_change: None,
        }
    }

    /// Rows rendered top to bottom; controls left to right within a row.
    pub fn default_layout() -> Vec<Vec<Control>> {
        vec![
            vec![Control::Preview],
            vec![Control::Track],
            vec![Control::ColorSquare],
            vec![Control::HueSlider, Control::EyeDropper],
            vec![Control::AlphaSlider],
            vec![
                Control::Formats,
                Control::Angle,
                Control::StopPosition,
                Control::Delete,
            ],
            vec![Control::GradientText],
        ]
    }

    /// Seeds the stop collection, format, angle, and prefix on first mount.
    pub fn gradient(mut self, gradient: impl Into<String>) -> Self {
        self.gradient = Some(gradient.into());
        self
    }

    /// Debounce window for outbound emissions. Zero delivers on the next
    /// frame boundary.
    pub fn update_delay_ms(mut self, ms: u64) -> Self {
        self.update_delay = Duration::from_millis(ms);
        self
    }

    /// Restricts which formats the switcher offers.
    pub fn formats(mut self, formats: Vec<GradientFormat>) -> Self {
        self.formats = formats;
        self
    }

    /// Replaces the default control arrangement.
    pub fn layout(mut self, layout: Vec<Vec<Control>>) -> Self {
        self.layout = layout;
        self
    }

    /// Installs the platform eye-dropper capability.
    pub fn sampler(mut self, sampler: Box<dyn ColorSampler>) -> Self {
        self.sampler = Some(sampler);
        self
    }

    /// Callback receiving each newly built gradient string.
    pub fn on_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ── GradientPicker ────────────────────────────────────────────────────────

/// The composition shell: owns the shared state, the configured controls,
/// the emission channel, and external-input reconciliation.
///
/// Call [`frame`](Self::frame) once per redraw with the frame's events; the
/// returned draw list is the complete visual output.
pub struct GradientPicker {
    shared: SharedPicker,
    rows: Vec<Vec<(Control, Element)>>,
    draw_list: DrawList,

    debounce: Debounce<String>,
    on_change: Option<Box<dyn FnMut(&str)>>,
    /// Last string handed to the debouncer; incoming external updates equal
    /// to it are our own echo and are ignored.
    last_emitted: Option<String>,
    /// Last built string, for change detection across frames.
    last_built: Option<String>,
    /// The mount frame must not emit the initial default state.
    first_frame: bool,
    /// External gradient waiting to be reconciled (deferred while dragging).
    pending_input: Option<String>,

    mouse_pos: Vec2,
    mouse_pressed: bool,
}

impl GradientPicker {
    pub fn new(config: PickerConfig) -> Self {
        let mut state = match &config.gradient {
            Some(g) => PickerState::from_gradient(g),
            None => PickerState::new(),
        };
        state.set_allowed_formats(config.formats.clone());
        let shared: SharedPicker = Rc::new(RefCell::new(state));

        let mut sampler = config.sampler;
        let rows = config
            .layout
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&kind| (kind, Self::build(kind, &shared, &mut sampler)))
                    .collect()
            })
            .collect();

        Self {
            shared,
            rows,
            draw_list: DrawList::new(),
            debounce: Debounce::new(config.update_delay),
            on_change: config.on_change,
            last_emitted: None,
            last_built: None,
            first_frame: true,
            pending_input: None,
            mouse_pos: Vec2::zero(),
            mouse_pressed: false,
        }
    }

    fn build(
        kind: Control,
        shared: &SharedPicker,
        sampler: &mut Option<Box<dyn ColorSampler>>,
    ) -> Element {
        match kind {
            Control::Preview => Preview::new(shared.clone()).into(),
            Control::Track => GradientTrack::new(shared.clone()).into(),
            Control::ColorSquare => ColorSquare::new(shared.clone()).into(),
            Control::HueSlider => HueSlider::new(shared.clone()).into(),
            Control::AlphaSlider => AlphaSlider::new(shared.clone()).into(),
            Control::Formats => FormatSwitch::new(shared.clone()).into(),
            Control::Angle => AngleInput::new(shared.clone()).into(),
            Control::StopPosition => StopPosition::new(shared.clone()).into(),
            Control::Delete => DeleteStop::new(shared.clone()).into(),
            Control::EyeDropper => {
                let dropper = EyeDropper::new(shared.clone());
                match sampler.take() {
                    Some(s) => dropper.with_sampler(s).into(),
                    None => dropper.into(),
                }
            }
            Control::GradientText => GradientText::new(shared.clone()).into(),
        }
    }

    /// Shared handle to the picker state, for hosts that embed their own
    /// controls next to the built-in ones.
    pub fn shared(&self) -> SharedPicker {
        self.shared.clone()
    }

    /// The gradient string for the current (effective) state.
    pub fn gradient(&self) -> String {
        self.shared.borrow().descriptor().to_css()
    }

    /// Hands the picker an externally owned gradient string. Reconciled on
    /// the next frame: ignored while a drag is in progress, when it equals
    /// our own last emission, when it fails to parse, or when it matches the
    /// current stop set.
    pub fn set_gradient(&mut self, gradient: impl Into<String>) {
        self.pending_input = Some(gradient.into());
    }

    /// Runs one frame: reconcile → route events → commit coalesced updates
    /// → rebuild/emit → paint. Returns the frame's draw commands.
    pub fn frame(&mut self, events: &[UiEvent], viewport: Vec2, now: Instant) -> &DrawList {
        self.reconcile();

        let rects = self.layout_rects(viewport);

        for event in events {
            self.track_mouse(event);
            'routing: for (row, row_rects) in self.rows.iter_mut().zip(&rects) {
                for ((_, element), rect) in row.iter_mut().zip(row_rects) {
                    let Some(rect) = rect else { continue };
                    if element.on_event(event, *rect).is_consumed() {
                        break 'routing;
                    }
                }
            }
        }

        // Frame boundary: every control commits at most one pending update.
        for row in &mut self.rows {
            for (_, element) in row.iter_mut() {
                element.tick();
            }
        }

        self.emit(now);
        self.paint(viewport, &rects);
        &self.draw_list
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn reconcile(&mut self) {
        if self.shared.borrow().dragging().is_some() {
            return; // keep pending input for after the gesture
        }
        let Some(input) = self.pending_input.take() else { return };

        if self.last_emitted.as_deref() == Some(input.as_str()) {
            return; // our own emission echoed back
        }

        let desc = match parse_gradient(&input) {
            Ok(desc) => desc,
            Err(e) => {
                log::debug!("ignoring unparseable gradient input: {e}");
                return;
            }
        };

        {
            let mut state = self.shared.borrow_mut();
            if state.stops.matches_desc(&desc) {
                return;
            }
            state.apply_desc(&desc);
        }
        self.last_emitted = Some(input);
    }

    fn track_mouse(&mut self, event: &UiEvent) {
        match event {
            UiEvent::PointerDown { pos } | UiEvent::Drag { pos, .. } => {
                self.mouse_pos = *pos;
                self.mouse_pressed = true;
            }
            UiEvent::DragEnd { pos, .. } | UiEvent::Click { pos } => {
                self.mouse_pos = *pos;
                self.mouse_pressed = false;
            }
            UiEvent::Hover { pos } => self.mouse_pos = *pos,
            _ => {}
        }
    }

    fn emit(&mut self, now: Instant) {
        let css = self.shared.borrow().descriptor().to_css();

        if self.first_frame {
            // The mount frame would otherwise fire with the initial state.
            self.first_frame = false;
            self.last_built = Some(css);
        } else if self.last_built.as_deref() != Some(css.as_str()) {
            self.last_built = Some(css.clone());
            if self.last_emitted.as_deref() != Some(css.as_str()) {
                self.last_emitted = Some(css.clone());
                self.debounce.push(css, now);
            }
        }

        if let Some(ready) = self.debounce.poll(now) {
            if let Some(on_change) = self.on_change.as_mut() {
                on_change(&ready);
            }
        }
    }

    /// Per-row rects for the visible controls; `None` for hidden ones
    /// (the angle input outside linear mode).
    fn layout_rects(&self, viewport: Vec2) -> Vec<Vec<Option<Rect>>> {
        let format = self.shared.borrow().format();
        let avail = Vec2::new((viewport.x - 2.0 * PADDING).max(0.0), viewport.y);

        let mut rects = Vec::with_capacity(self.rows.len());
        let mut y = PADDING;

        for row in &self.rows {
            let visible: Vec<bool> = row
                .iter()
                .map(|(kind, _)| *kind != Control::Angle || format == GradientFormat::Linear)
                .collect();

            let mut fixed_width = 0.0;
            let mut flexible = 0usize;
            let mut row_height: f32 = 0.0;
            for ((kind, element), vis) in row.iter().zip(&visible) {
                if !vis {
                    continue;
                }
                let size = element.measure(avail);
                row_height = row_height.max(size.y);
                if kind.expands() {
                    flexible += 1;
                } else {
                    fixed_width += size.x;
                }
            }

            let shown = visible.iter().filter(|v| **v).count();
            if shown == 0 {
                rects.push(vec![None; row.len()]);
                continue;
            }

            let gaps = (shown - 1) as f32 * GAP;
            let flex_width = if flexible > 0 {
                ((avail.x - fixed_width - gaps) / flexible as f32).max(0.0)
            } else {
                0.0
            };

            let mut x = PADDING;
            let mut row_rects = Vec::with_capacity(row.len());
            for ((kind, element), vis) in row.iter().zip(&visible) {
                if !vis {
                    row_rects.push(None);
                    continue;
                }
                let width = if kind.expands() { flex_width } else { element.measure(avail).x };
                row_rects.push(Some(Rect::new(x, y, width, row_height)));
                x += width + GAP;
            }

            rects.push(row_rects);
            y += row_height + GAP;
        }

        rects
    }

    fn paint(&mut self, viewport: Vec2, rects: &[Vec<Option<Rect>>]) {
        self.draw_list.clear();
        let mut painter = Painter::new(&mut self.draw_list, self.mouse_pos, self.mouse_pressed);

        painter.fill_rounded_rect(
            Rect::new(0.0, 0.0, viewport.x, viewport.y),
            theme::CORNER_RADIUS,
            theme::PANEL_BG,
            None,
        );

        for (row, row_rects) in self.rows.iter().zip(rects) {
            for ((_, element), rect) in row.iter().zip(row_rects) {
                if let Some(rect) = rect {
                    element.paint(&mut painter, *rect);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Vec2;

    const VIEWPORT: Vec2 = Vec2::new(324.0, 600.0);

    fn collected() -> (Rc<RefCell<Vec<String>>>, impl FnMut(&str) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |css: &str| sink.borrow_mut().push(css.to_string()))
    }

    fn track_rect() -> Rect {
        // Layout [[Track]]: one row at the panel padding.
        Rect::new(PADDING, PADDING, VIEWPORT.x - 2.0 * PADDING, 36.0)
    }

    fn track_x(percent: f32) -> f32 {
        let rect = track_rect();
        rect.origin.x + ombre_core::track::left_px_from_percent(percent, rect.size.x)
    }

    #[test]
    fn first_frame_does_not_emit() {
        let (seen, sink) = collected();
        let mut picker = GradientPicker::new(
            PickerConfig::new()
                .gradient("linear-gradient(90deg, #ff0000 0%, #0000ff 100%)")
                .on_change(sink),
        );

        let t0 = Instant::now();
        picker.frame(&[], VIEWPORT, t0);
        picker.frame(&[], VIEWPORT, t0 + Duration::from_millis(50));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn burst_of_changes_coalesces_into_one_emission() {
        let (seen, sink) = collected();
        let mut picker = GradientPicker::new(
            PickerConfig::new()
                .gradient("linear-gradient(90deg, #ff0000 20%, #0000ff 80%)")
                .update_delay_ms(200)
                .layout(vec![vec![Control::Track]])
                .on_change(sink),
        );

        let t0 = Instant::now();
        picker.frame(&[], VIEWPORT, t0);

        // Grab the first stop and feed ten rapid move samples, one per frame.
        let cy = track_rect().center().y;
        let start = Vec2::new(track_x(20.0), cy);
        picker.frame(
            &[UiEvent::PointerDown { pos: start }],
            VIEWPORT,
            t0 + Duration::from_millis(10),
        );
        for i in 0..10u64 {
            let pos = Vec2::new(track_x(25.0 + i as f32 * 2.0), cy);
            picker.frame(
                &[UiEvent::Drag { pos, start }],
                VIEWPORT,
                t0 + Duration::from_millis(20 + i * 10),
            );
        }
        let release = Vec2::new(track_x(43.0), cy);
        picker.frame(
            &[UiEvent::DragEnd { pos: release, start }],
            VIEWPORT,
            t0 + Duration::from_millis(130),
        );

        // Still inside the debounce window: nothing delivered yet.
        assert!(seen.borrow().is_empty());

        // Past the window: exactly one delivery, carrying the final value.
        picker.frame(&[], VIEWPORT, t0 + Duration::from_millis(400));
        assert_eq!(seen.borrow().len(), 1);
        assert!(seen.borrow()[0].contains("43%"), "got {:?}", seen.borrow()[0]);
    }

    #[test]
    fn external_input_replaces_state() {
        let mut picker = GradientPicker::new(
            PickerConfig::new().gradient("linear-gradient(90deg, #ff0000 0%, #0000ff 100%)"),
        );
        let t0 = Instant::now();
        picker.frame(&[], VIEWPORT, t0);

        picker.set_gradient("radial-gradient(circle at center, #00ff00 10%, #000000 90%)");
        picker.frame(&[], VIEWPORT, t0 + Duration::from_millis(10));

        let state = picker.shared();
        let state = state.borrow();
        assert_eq!(state.format(), GradientFormat::Radial);
        let positions: Vec<f32> = state.stops.sorted().iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![10.0, 90.0]);
    }

    #[test]
    fn own_emission_echoed_back_is_ignored() {
        let (seen, sink) = collected();
        let mut picker = GradientPicker::new(
            PickerConfig::new()
                .gradient("linear-gradient(90deg, #ff0000 20%, #0000ff 80%)")
                .layout(vec![vec![Control::Track]])
                .on_change(sink),
        );

        let t0 = Instant::now();
        picker.frame(&[], VIEWPORT, t0);

        // Make a real change so something is emitted.
        let cy = track_rect().center().y;
        let start = Vec2::new(track_x(20.0), cy);
        picker.frame(
            &[UiEvent::PointerDown { pos: start }],
            VIEWPORT,
            t0 + Duration::from_millis(10),
        );
        picker.frame(
            &[UiEvent::DragEnd { pos: Vec2::new(track_x(40.0), cy), start }],
            VIEWPORT,
            t0 + Duration::from_millis(20),
        );
        picker.frame(&[], VIEWPORT, t0 + Duration::from_millis(30));
        assert_eq!(seen.borrow().len(), 1);
        let emitted = seen.borrow()[0].clone();

        // The host hands our own string back: no state churn, no re-emission.
        picker.set_gradient(emitted);
        for i in 0..5u64 {
            picker.frame(&[], VIEWPORT, t0 + Duration::from_millis(40 + i));
        }
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn malformed_external_input_keeps_state() {
        let mut picker = GradientPicker::new(
            PickerConfig::new().gradient("linear-gradient(90deg, #ff0000 0%, #0000ff 100%)"),
        );
        let t0 = Instant::now();
        picker.frame(&[], VIEWPORT, t0);
        let before = picker.gradient();

        picker.set_gradient("definitely not a gradient");
        picker.frame(&[], VIEWPORT, t0 + Duration::from_millis(10));
        assert_eq!(picker.gradient(), before);
    }

    #[test]
    fn reconciliation_waits_for_drag_end() {
        let mut picker = GradientPicker::new(
            PickerConfig::new()
                .gradient("linear-gradient(90deg, #ff0000 20%, #0000ff 80%)")
                .layout(vec![vec![Control::Track]]),
        );
        let t0 = Instant::now();
        picker.frame(&[], VIEWPORT, t0);

        let cy = track_rect().center().y;
        let start = Vec2::new(track_x(20.0), cy);
        picker.frame(
            &[UiEvent::PointerDown { pos: start }],
            VIEWPORT,
            t0 + Duration::from_millis(10),
        );

        picker.set_gradient("conic-gradient(#000000 0%, #ffffff 100%)");
        picker.frame(&[], VIEWPORT, t0 + Duration::from_millis(20));
        // Mid-drag: external input is deferred.
        assert_eq!(picker.shared().borrow().format(), GradientFormat::Linear);

        picker.frame(
            &[UiEvent::DragEnd { pos: start, start }],
            VIEWPORT,
            t0 + Duration::from_millis(30),
        );
        picker.frame(&[], VIEWPORT, t0 + Duration::from_millis(40));
        assert_eq!(picker.shared().borrow().format(), GradientFormat::Conic);
    }

    #[test]
    fn angle_input_hidden_outside_linear_format() {
        let picker = GradientPicker::new(
            PickerConfig::new()
                .gradient("radial-gradient(circle at center, #ff0000 0%, #0000ff 100%)")
                .layout(vec![vec![Control::Angle, Control::StopPosition]]),
        );
        let rects = picker.layout_rects(VIEWPORT);
        assert!(rects[0][0].is_none());
        assert!(rects[0][1].is_some());
    }
}
