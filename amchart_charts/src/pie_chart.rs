// Copyright 2025 the AMChart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pie and donut chart with tap selection.
//!
//! Wedges start at the top of the circle (`3π/2` in y-down coordinates) and
//! run clockwise. A reload sweeps every wedge from its previous angles to its
//! new ones; the first reload sweeps from a zero-width wedge at the start
//! angle. Tapping a wedge pushes it [`SELECTION_OFFSET`] outward along its
//! mid-angle.

use alloc::string::String;
use alloc::vec::Vec;
use core::f64::consts::{PI, TAU};
use core::time::Duration;

use amchart_core::{
    Animator, PathPair, Scene, ShapeLayer, Sweep, TextAlign, TextLabel, TextStyle, Timing,
    Transition, WedgeFrame,
};
use kurbo::{BezPath, Point, Rect, Shape, Size, Vec2};
use peniko::Color;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::chart::{
    CENTER_LABEL, ChartState, ChartView, ReloadEnv, finite_or_zero, hand_off, series_layer,
};
use crate::error::ChartResult;
#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::z_order;

/// Gap between the view square and the outer radius; also the distance a
/// selected wedge moves outward.
pub const SELECTION_OFFSET: f64 = 10.0;

/// Angle where the first wedge starts: straight up.
pub const START_ANGLE: f64 = PI * 1.5;

/// Pull-based data for a [`PieChart`].
pub trait PieDataSource {
    /// Number of wedges.
    fn number_of_sections(&self) -> usize;
    /// Value of one wedge.
    fn value(&self, section: usize) -> f64;
    /// Fill color of one wedge.
    fn color(&self, section: usize) -> Color;
}

/// Receives selection changes made by [`PieChart::tap`].
pub trait PieChartDelegate {
    /// `section` became selected.
    fn did_select_section(&mut self, section: usize);
    /// `section` stopped being selected.
    fn did_deselect_section(&mut self, section: usize);
}

/// Configuration of a [`PieChart`].
#[derive(Clone, Debug, PartialEq)]
pub struct PieChartConfig {
    /// Cut a hole of half the radius out of every wedge.
    pub donut: bool,
    /// Text shown in the middle of the chart; empty for none.
    pub center_label: String,
    /// Font of the centre label.
    pub center_label_style: TextStyle,
    /// Color of the centre label.
    pub center_label_color: Color,
    /// Duration of the reload sweep.
    pub animation_duration: Duration,
    /// Duration of the select and deselect motion.
    pub selected_animation_duration: Duration,
}

impl Default for PieChartConfig {
    fn default() -> Self {
        Self {
            donut: false,
            center_label: String::new(),
            center_label_style: TextStyle::default(),
            center_label_color: Color::BLACK,
            animation_duration: Duration::from_millis(400),
            selected_animation_duration: Duration::from_millis(300),
        }
    }
}

impl PieChartConfig {
    /// Enables or disables donut mode.
    pub fn with_donut(mut self, donut: bool) -> Self {
        self.donut = donut;
        self
    }

    /// Sets the centre label text.
    pub fn with_center_label(mut self, text: impl Into<String>) -> Self {
        self.center_label = text.into();
        self
    }

    /// Sets font and color of the centre label.
    pub fn with_center_label_style(mut self, style: TextStyle, color: Color) -> Self {
        self.center_label_style = style;
        self.center_label_color = color;
        self
    }

    /// Sets the reload sweep duration.
    pub fn with_animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    /// Sets the selection motion duration.
    pub fn with_selected_animation_duration(mut self, duration: Duration) -> Self {
        self.selected_animation_duration = duration;
        self
    }
}

/// Circle geometry of a laid-out pie.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieGeometry {
    /// Centre of the view square.
    pub center: Point,
    /// Outer wedge radius.
    pub radius: f64,
    /// Inner wedge radius; zero unless in donut mode.
    pub hole_radius: f64,
}

impl PieGeometry {
    /// Fits the pie in the largest square centred in `size`.
    pub fn fit(size: Size, donut: bool) -> Self {
        let side = size.width.min(size.height);
        let radius = ((side - SELECTION_OFFSET * 2.0) / 2.0).max(0.0);
        Self {
            center: Point::new(size.width / 2.0, size.height / 2.0),
            radius,
            hole_radius: if donut { radius / 2.0 } else { 0.0 },
        }
    }

    /// The unselected wedge circle.
    pub fn frame(&self) -> WedgeFrame {
        WedgeFrame::new(self.center, self.radius, self.hole_radius)
    }
}

/// A selection change reported by [`PieChart::tap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieSelection {
    /// The wedge was selected.
    Selected(usize),
    /// The wedge was deselected.
    Deselected(usize),
}

/// Cumulative wedge angles for `values`, starting at [`START_ANGLE`].
///
/// Each wedge spans `2π * value / sum`; a zero or non-finite sum yields empty wedges.
pub fn pie_sweeps(values: &[f64]) -> Vec<Sweep> {
    let sum: f64 = values.iter().sum();
    let mut angle = START_ANGLE;
    values
        .iter()
        .map(|&value| {
            let start = angle;
            angle += TAU * finite_or_zero(value / sum);
            Sweep::new(start, angle)
        })
        .collect()
}

/// One wedge: from the hole edge (or the centre) out to the rim, around the
/// arc, and back along the hole.
pub fn wedge_path(center: Point, radius: f64, hole_radius: f64, sweep: Sweep) -> BezPath {
    WedgeFrame::new(center, radius, hole_radius).path(sweep)
}

/// A pie chart view.
#[derive(Clone, Debug, Default)]
pub struct PieChart {
    config: PieChartConfig,
    scene: Scene,
    state: ChartState,
    geometry: Option<PieGeometry>,
    sweeps: Vec<Sweep>,
    selected: Option<usize>,
}

impl PieChart {
    /// Creates a chart with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a chart with `config`.
    pub fn with_config(config: PieChartConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &PieChartConfig {
        &self.config
    }

    /// Mutable configuration; takes effect on the next reload.
    pub fn config_mut(&mut self) -> &mut PieChartConfig {
        &mut self.config
    }

    /// Circle geometry of the last successful reload.
    pub fn geometry(&self) -> Option<PieGeometry> {
        self.geometry
    }

    /// Committed wedge angles, in section order.
    pub fn sweeps(&self) -> &[Sweep] {
        &self.sweeps
    }

    /// The selected wedge, if any.
    pub fn selected_section(&self) -> Option<usize> {
        self.selected
    }

    /// Drops committed angles so the next reload sweeps every wedge from the start angle.
    pub fn redraw_chart(&mut self) {
        self.sweeps.clear();
    }

    fn wedge(&self, geometry: PieGeometry, section: usize, selected: bool) -> Option<BezPath> {
        let sweep = *self.sweeps.get(section)?;
        let mut center = geometry.center;
        if selected {
            let angle = sweep.mid_angle();
            center += Vec2::new(angle.cos(), angle.sin()) * SELECTION_OFFSET;
        }
        Some(wedge_path(
            center,
            geometry.radius,
            geometry.hole_radius,
            sweep,
        ))
    }

    /// Moves `section` in or out and returns the transition doing it.
    fn shift(&mut self, geometry: PieGeometry, section: usize, select: bool) -> Option<Transition> {
        let from = self.wedge(geometry, section, !select)?;
        let to = self.wedge(geometry, section, select)?;
        let layer = series_layer(section, 0);
        if let Some(shape) = self.scene.shape_mut(layer) {
            shape.path = to.clone();
        }
        Some(Transition::morph(
            layer,
            PathPair::new(from, to),
            self.config.selected_animation_duration,
            Timing::EaseOut,
        ))
    }

    /// Handles a tap at `point` in view coordinates.
    ///
    /// Tapping an unselected wedge selects it (deselecting any other), and
    /// tapping the selected wedge deselects it. The delegate hears about every
    /// deselection before the matching selection. Taps outside every wedge do
    /// nothing.
    pub fn tap(
        &mut self,
        point: Point,
        animator: &mut dyn Animator,
        mut delegate: Option<&mut dyn PieChartDelegate>,
    ) -> SmallVec<[PieSelection; 2]> {
        let mut changes = SmallVec::new();
        let Some(geometry) = self.geometry else {
            return changes;
        };
        // Only wedges still in the scene can be hit.
        let hit = (0..self.sweeps.len()).find(|&section| {
            self.scene.shape(series_layer(section, 0)).is_some()
                && self
                    .wedge(geometry, section, self.selected == Some(section))
                    .is_some_and(|path| path.contains(point))
        });
        let Some(section) = hit else {
            return changes;
        };

        let mut transitions: SmallVec<[Transition; 2]> = SmallVec::new();
        match self.selected {
            Some(current) if current == section => {
                transitions.extend(self.shift(geometry, section, false));
                self.selected = None;
                changes.push(PieSelection::Deselected(section));
            }
            previous => {
                transitions.extend(self.shift(geometry, section, true));
                if let Some(previous) = previous {
                    transitions.extend(self.shift(geometry, previous, false));
                    changes.push(PieSelection::Deselected(previous));
                }
                self.selected = Some(section);
                changes.push(PieSelection::Selected(section));
            }
        }
        debug!(section, ?changes, "pie tap");

        if let Some(delegate) = delegate.as_deref_mut() {
            for change in &changes {
                match *change {
                    PieSelection::Selected(s) => delegate.did_select_section(s),
                    PieSelection::Deselected(s) => delegate.did_deselect_section(s),
                }
            }
        }
        self.state = hand_off(&transitions, animator);
        changes
    }

    fn rebuild(&mut self, size: Size, source: &dyn PieDataSource) -> Vec<Transition> {
        let sections = source.number_of_sections();
        let values: Vec<f64> = (0..sections).map(|s| source.value(s)).collect();
        debug!(sections, donut = self.config.donut, "reload pie chart");

        let geometry = PieGeometry::fit(size, self.config.donut);
        self.geometry = Some(geometry);
        self.state = ChartState::LaidOut;

        let targets = pie_sweeps(&values);
        let mut transitions = Vec::with_capacity(sections);
        for (section, &to) in targets.iter().enumerate() {
            let from = self
                .sweeps
                .get(section)
                .copied()
                .unwrap_or(Sweep::new(START_ANGLE, START_ANGLE));
            trace!(section, start = to.start_angle, end = to.end_angle, "pie wedge");
            let transition = Transition::sweep(
                series_layer(section, 0),
                geometry.frame(),
                from,
                to,
                self.config.animation_duration,
                Timing::Linear,
            );
            self.scene.push(
                ShapeLayer::new(transition.layer, transition.paths.target.clone())
                    .with_fill(source.color(section))
                    .with_z_index(z_order::SERIES_FILL),
            );
            transitions.push(transition);
        }
        self.sweeps = targets;

        if !self.config.center_label.is_empty() {
            // The label square matches the donut hole diameter.
            let side = geometry.radius;
            self.scene.push(
                TextLabel::new(
                    CENTER_LABEL,
                    self.config.center_label.clone(),
                    Rect::from_center_size(geometry.center, Size::new(side, side)),
                )
                .with_style(self.config.center_label_style)
                .with_fill(self.config.center_label_color)
                .with_align(TextAlign::Center)
                .with_z_index(z_order::OVERLAY_LABELS),
            );
        }
        transitions
    }
}

impl ChartView for PieChart {
    type Source = dyn PieDataSource;

    fn reload(
        &mut self,
        size: Size,
        source: Option<&Self::Source>,
        env: &mut ReloadEnv<'_>,
    ) -> ChartResult<()> {
        self.scene.clear();
        self.selected = None;
        let Some(source) = source else {
            self.geometry = None;
            self.sweeps.clear();
            self.state = ChartState::Idle;
            return Ok(());
        };
        let transitions = self.rebuild(size, source);
        self.state = hand_off(&transitions, env.animator);
        Ok(())
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn state(&self) -> ChartState {
        self.state
    }

    fn finish_animations(&mut self) {
        if self.state == ChartState::Animating {
            self.state = ChartState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use amchart_core::{HeuristicTextMeasurer, TransitionLog, Tween};
    use kurbo::PathEl;
    use peniko::color::palette::css;

    struct Slices(Vec<f64>);

    impl PieDataSource for Slices {
        fn number_of_sections(&self) -> usize {
            self.0.len()
        }
        fn value(&self, section: usize) -> f64 {
            self.0[section]
        }
        fn color(&self, _section: usize) -> Color {
            css::TEAL
        }
    }

    fn reload(chart: &mut PieChart, slices: &Slices, log: &mut TransitionLog) {
        let mut env = ReloadEnv::new(&HeuristicTextMeasurer, log);
        chart
            .reload(Size::new(220.0, 320.0), Some(slices), &mut env)
            .expect("pie reloads never fail");
    }

    #[test]
    fn sweeps_are_proportional_and_close_the_circle() {
        let sweeps = pie_sweeps(&[1.0, 1.0, 2.0]);
        assert_eq!(sweeps[0].start_angle, START_ANGLE);
        assert!((sweeps[0].extent() - PI / 2.0).abs() < 1e-12);
        assert!((sweeps[2].extent() - PI).abs() < 1e-12);
        assert!((sweeps[2].end_angle - (START_ANGLE + TAU)).abs() < 1e-12);
        assert_eq!(sweeps[1].start_angle, sweeps[0].end_angle);
    }

    #[test]
    fn zero_sum_yields_empty_wedges() {
        let sweeps = pie_sweeps(&[0.0, 0.0]);
        assert!(sweeps.iter().all(|s| s.extent() == 0.0));
    }

    #[test]
    fn geometry_fits_the_short_side() {
        let g = PieGeometry::fit(Size::new(220.0, 320.0), true);
        assert_eq!(g.center, Point::new(110.0, 160.0));
        assert_eq!(g.radius, 100.0);
        assert_eq!(g.hole_radius, 50.0);
        assert_eq!(PieGeometry::fit(Size::new(10.0, 10.0), false).radius, 0.0);
    }

    #[test]
    fn pie_wedge_starts_at_the_centre() {
        let center = Point::new(50.0, 50.0);
        let path = wedge_path(center, 40.0, 0.0, Sweep::new(START_ANGLE, START_ANGLE + PI));
        let els = path.elements();
        assert_eq!(els[0], PathEl::MoveTo(center));
        match els[1] {
            PathEl::LineTo(p) => assert!((p - Point::new(50.0, 10.0)).hypot() < 1e-9),
            ref other => panic!("expected line to the rim, got {other:?}"),
        }
        assert_eq!(els.last(), Some(&PathEl::ClosePath));
        assert!(path.contains(Point::new(70.0, 50.0)));
        assert!(!path.contains(Point::new(30.0, 50.0)));
    }

    #[test]
    fn donut_wedge_leaves_the_hole_empty() {
        let center = Point::new(0.0, 0.0);
        let path = wedge_path(center, 40.0, 20.0, Sweep::new(0.0, PI));
        assert!(!path.contains(Point::new(0.0, 10.0)));
        assert!(path.contains(Point::new(0.0, 30.0)));
    }

    #[test]
    fn first_reload_sweeps_from_the_start_angle() {
        let mut chart = PieChart::new();
        let mut log = TransitionLog::new();
        reload(&mut chart, &Slices(vec![25.0, 75.0]), &mut log);
        let first = log.take();
        assert_eq!(first.len(), 2);
        let Tween::Sweep { from, to, frame } = first[1].tween else {
            panic!("expected a sweep, got {:?}", first[1].tween);
        };
        assert_eq!(from, Sweep::new(START_ANGLE, START_ANGLE));
        assert!((to.extent() - PI * 1.5).abs() < 1e-12);
        assert_eq!(frame, chart.geometry().expect("laid out").frame());
        assert_eq!(first[1].timing, Timing::Linear);
        assert_eq!(chart.state(), ChartState::Animating);

        reload(&mut chart, &Slices(vec![50.0, 50.0]), &mut log);
        let second = log.take();
        assert_eq!(second[1].tween, Tween::Sweep {
            from: to,
            to: chart.sweeps()[1],
            frame,
        });
    }

    #[test]
    fn sampled_sweep_grows_from_an_empty_wedge() {
        let mut chart = PieChart::new();
        let mut log = TransitionLog::new();
        reload(&mut chart, &Slices(vec![25.0, 75.0]), &mut log);
        let geometry = chart.geometry().expect("laid out");
        let big = log.last_for(series_layer(1, 0)).expect("sweep");

        let empty = wedge_path(
            geometry.center,
            geometry.radius,
            geometry.hole_radius,
            Sweep::new(START_ANGLE, START_ANGLE),
        );
        assert_eq!(big.sample(0.0), empty);
        assert_ne!(big.sample(0.0), big.paths.target);
        let half = big.sweep_at(0.5).expect("sweep");
        assert_eq!(
            big.sample(0.5),
            wedge_path(geometry.center, geometry.radius, geometry.hole_radius, half)
        );
        assert_eq!(big.sample(1.0), chart.scene().shape(series_layer(1, 0)).expect("wedge").path);
    }

    #[test]
    fn tap_after_clearing_source_is_ignored() {
        struct Calls(Vec<usize>);
        impl PieChartDelegate for Calls {
            fn did_select_section(&mut self, section: usize) {
                self.0.push(section);
            }
            fn did_deselect_section(&mut self, section: usize) {
                self.0.push(section);
            }
        }

        let mut chart = PieChart::new();
        let mut log = TransitionLog::new();
        reload(&mut chart, &Slices(vec![25.0, 75.0]), &mut log);
        chart.finish_animations();
        let mut env = ReloadEnv::new(&HeuristicTextMeasurer, &mut log);
        chart
            .reload(Size::new(220.0, 320.0), None, &mut env)
            .expect("no source is not an error");
        assert!(chart.scene().is_empty());
        assert!(chart.geometry().is_none());
        log.take();

        let mut calls = Calls(Vec::new());
        let changes = chart.tap(Point::new(150.0, 120.0), &mut log, Some(&mut calls));
        assert!(changes.is_empty());
        assert!(calls.0.is_empty());
        assert!(log.is_empty());
        assert_eq!(chart.selected_section(), None);
        assert_eq!(chart.state(), ChartState::Idle);
    }

    #[test]
    fn centre_label_needs_text() {
        let mut chart = PieChart::new();
        let mut log = TransitionLog::new();
        reload(&mut chart, &Slices(vec![1.0]), &mut log);
        assert!(chart.scene().text(CENTER_LABEL).is_none());

        chart.config_mut().center_label = "Total".into();
        reload(&mut chart, &Slices(vec![1.0]), &mut log);
        let label = chart.scene().text(CENTER_LABEL).expect("centre label");
        assert_eq!(label.frame, Rect::new(60.0, 110.0, 160.0, 210.0));
        assert_eq!(label.align, TextAlign::Center);
    }

    #[test]
    fn tap_outside_does_nothing() {
        let mut chart = PieChart::new();
        let mut log = TransitionLog::new();
        reload(&mut chart, &Slices(vec![1.0, 1.0]), &mut log);
        log.take();
        let changes = chart.tap(Point::new(2.0, 2.0), &mut log, None);
        assert!(changes.is_empty());
        assert!(log.is_empty());
    }

    #[test]
    fn selected_wedge_moves_outward() {
        let mut chart = PieChart::new();
        let mut log = TransitionLog::new();
        reload(&mut chart, &Slices(vec![25.0, 75.0]), &mut log);
        log.take();
        let before = chart
            .scene()
            .shape(series_layer(0, 0))
            .expect("wedge")
            .bounds();

        // Upper-right quadrant belongs to the first wedge.
        let changes = chart.tap(Point::new(150.0, 120.0), &mut log, None);
        assert_eq!(changes.as_slice(), &[PieSelection::Selected(0)]);
        let after = chart
            .scene()
            .shape(series_layer(0, 0))
            .expect("wedge")
            .bounds();
        let shift = after.center() - before.center();
        let expected = SELECTION_OFFSET * core::f64::consts::FRAC_1_SQRT_2;
        assert!((shift.x - expected).abs() < 1e-6, "shift {shift:?}");
        assert!((shift.y + expected).abs() < 1e-6, "shift {shift:?}");

        let t = log.last_for(series_layer(0, 0)).expect("selection motion");
        assert_eq!(t.timing, Timing::EaseOut);
        assert_eq!(t.duration, Duration::from_millis(300));
        assert!(t.paths.is_compatible());
    }

    #[test]
    fn reload_clears_selection() {
        let mut chart = PieChart::new();
        let mut log = TransitionLog::new();
        reload(&mut chart, &Slices(vec![25.0, 75.0]), &mut log);
        chart.tap(Point::new(150.0, 120.0), &mut log, None);
        assert_eq!(chart.selected_section(), Some(0));
        reload(&mut chart, &Slices(vec![25.0, 75.0]), &mut log);
        assert_eq!(chart.selected_section(), None);
    }
}
