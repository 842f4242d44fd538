// Copyright 2025 the AMChart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-series line chart with point markers.

use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use amchart_core::{PathPair, Scene, ShapeLayer, StrokeStyle, Timing, Transition};
use kurbo::{BezPath, Point, Size};
use peniko::Color;
use tracing::{debug, trace};

use crate::axis::AxisSpec;
use crate::chart::{
    ChartState, ChartView, IndexPath, ReloadEnv, hand_off, rejected, series_layer,
};
use crate::error::{ChartResult, ConfigError};
use crate::guides::{AxisGuideStyle, push_cartesian_guides};
use crate::layout::{CartesianLayout, XAxisLabels, plot_y};
use crate::marker::{MarkerType, POINT_RADIUS, append_marker};
use crate::z_order;

/// Pull-based data for a [`LineChart`]. Every series has the same row count.
pub trait LineDataSource {
    /// Number of series.
    fn number_of_sections(&self) -> usize;
    /// Number of points per series.
    fn number_of_rows(&self) -> usize;
    /// One point value.
    fn value(&self, index: IndexPath) -> f64;
    /// Line and marker color of a series.
    fn color(&self, section: usize) -> Color;
    /// Category label under column `row`.
    fn x_label(&self, row: usize) -> String;
    /// Marker drawn at each point of a series.
    fn marker_type(&self, section: usize) -> MarkerType;
}

/// Configuration of a [`LineChart`].
#[derive(Clone, Debug, PartialEq)]
pub struct LineChartConfig {
    /// Value axis.
    pub y_axis: AxisSpec,
    /// Axis frame styling.
    pub guides: AxisGuideStyle,
    /// Stroke width of series lines and markers.
    pub line_width: f64,
    /// Duration of reveal and morph transitions.
    pub animation_duration: Duration,
}

impl Default for LineChartConfig {
    fn default() -> Self {
        Self {
            y_axis: AxisSpec::new(0.0, 1000.0, 6),
            guides: AxisGuideStyle::default(),
            line_width: 1.0,
            animation_duration: Duration::from_millis(600),
        }
    }
}

impl LineChartConfig {
    /// Sets the value axis.
    pub fn with_y_axis(mut self, y_axis: AxisSpec) -> Self {
        self.y_axis = y_axis;
        self
    }

    /// Sets the axis frame styling.
    pub fn with_guides(mut self, guides: AxisGuideStyle) -> Self {
        self.guides = guides;
        self
    }

    /// Sets the series stroke width.
    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }

    /// Sets the transition duration.
    pub fn with_animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }
}

/// One polyline through `points` with a marker at every point.
///
/// Each point contributes its marker as a separate subpath, and consecutive
/// points are joined by a straight segment.
pub fn line_path(points: &[Point], marker: MarkerType, radius: f64) -> BezPath {
    let mut path = BezPath::new();
    for (i, &point) in points.iter().enumerate() {
        if i > 0 {
            path.line_to(point);
        }
        append_marker(&mut path, point, radius, marker);
        path.move_to(point);
    }
    path
}

/// A line chart view.
///
/// The target path of every series is kept after a reload and becomes the
/// start of that series' morph on the next one. A series whose marker type or
/// row count changed is revealed from scratch instead.
#[derive(Clone, Debug, Default)]
pub struct LineChart {
    config: LineChartConfig,
    scene: Scene,
    state: ChartState,
    committed: Vec<BezPath>,
}

impl LineChart {
    /// Creates a chart with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a chart with `config`.
    pub fn with_config(config: LineChartConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &LineChartConfig {
        &self.config
    }

    /// Mutable configuration; takes effect on the next reload.
    pub fn config_mut(&mut self) -> &mut LineChartConfig {
        &mut self.config
    }

    /// Drops committed series paths so the next reload reveals every line from scratch.
    pub fn redraw_chart(&mut self) {
        self.committed.clear();
    }

    fn rebuild(
        &mut self,
        size: Size,
        source: &dyn LineDataSource,
        env: &ReloadEnv<'_>,
    ) -> ChartResult<Vec<Transition>> {
        let sections = source.number_of_sections();
        let rows = source.number_of_rows();
        self.config.y_axis.validate()?;
        if rows == 0 {
            return Err(ConfigError::NoRows.into());
        }
        debug!(sections, rows, "reload line chart");

        let names: Vec<String> = (0..rows).map(|r| source.x_label(r)).collect();
        let config = &self.config;
        let layout = CartesianLayout::arrange(
            env.measurer,
            size,
            &config.y_axis,
            XAxisLabels::Categories(&names),
            &config.guides,
        )?;
        self.state = ChartState::LaidOut;
        push_cartesian_guides(&mut self.scene, &layout, &config.guides);

        let plot = layout.plot;
        let mut transitions = Vec::with_capacity(sections);
        let mut targets = Vec::with_capacity(sections);
        for section in 0..sections {
            let points: Vec<Point> = (0..rows)
                .map(|row| {
                    let value = source.value(IndexPath::new(section, row));
                    Point::new(layout.slot_center(row), plot_y(plot, &config.y_axis, value))
                })
                .collect();
            let marker = source.marker_type(section);
            let color = source.color(section);
            let path = line_path(&points, marker, POINT_RADIUS);
            trace!(section, ?marker, "line series");

            let id = series_layer(section, 0);
            self.scene.push(
                ShapeLayer::new(id, path.clone())
                    .with_fill(marker.fill_brush(color))
                    .with_stroke(StrokeStyle::solid(color, config.line_width))
                    .with_z_index(z_order::SERIES_STROKE),
            );
            // A changed marker or row count breaks the path structure; those
            // series are revealed again instead of morphed.
            let morph = self
                .committed
                .get(section)
                .map(|previous| PathPair::new(previous.clone(), path.clone()))
                .filter(PathPair::is_compatible);
            transitions.push(match morph {
                Some(paths) => {
                    Transition::morph(id, paths, config.animation_duration, Timing::EaseOut)
                }
                None => Transition::reveal(
                    id,
                    path.clone(),
                    config.animation_duration,
                    Timing::Linear,
                ),
            });
            targets.push(path);
        }
        self.committed = targets;
        Ok(transitions)
    }
}

impl ChartView for LineChart {
    type Source = dyn LineDataSource;

    fn reload(
        &mut self,
        size: Size,
        source: Option<&Self::Source>,
        env: &mut ReloadEnv<'_>,
    ) -> ChartResult<()> {
        self.scene.clear();
        let Some(source) = source else {
            self.state = ChartState::Idle;
            return Ok(());
        };
        match self.rebuild(size, source, env) {
            Ok(transitions) => {
                self.state = hand_off(&transitions, env.animator);
                Ok(())
            }
            Err(error) => {
                self.scene.clear();
                self.state = ChartState::Idle;
                Err(rejected("line", error))
            }
        }
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
    use alloc::format;
    use alloc::vec;
    use amchart_core::{HeuristicTextMeasurer, TransitionLog, Tween};
    use kurbo::PathEl;
    use peniko::Brush;
    use peniko::color::palette::css;

    use crate::error::ChartError;

    struct Lines {
        values: Vec<Vec<f64>>,
        marker: MarkerType,
    }

    impl LineDataSource for Lines {
        fn number_of_sections(&self) -> usize {
            self.values.len()
        }
        fn number_of_rows(&self) -> usize {
            self.values.first().map_or(0, Vec::len)
        }
        fn value(&self, index: IndexPath) -> f64 {
            self.values[index.section][index.row]
        }
        fn color(&self, _section: usize) -> Color {
            css::ORANGE
        }
        fn x_label(&self, row: usize) -> String {
            format!("R{row}")
        }
        fn marker_type(&self, _section: usize) -> MarkerType {
            self.marker
        }
    }

    fn reload(chart: &mut LineChart, lines: &Lines, log: &mut TransitionLog) -> ChartResult<()> {
        let mut env = ReloadEnv::new(&HeuristicTextMeasurer, log);
        chart.reload(Size::new(400.0, 300.0), Some(lines), &mut env)
    }

    fn vertices(path: &BezPath) -> Vec<Point> {
        // Every point ends with a `MoveTo` back onto the polyline.
        path.elements()
            .iter()
            .filter_map(|el| match el {
                PathEl::MoveTo(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn line_path_joins_points_and_adds_markers() {
        let points = [Point::new(0.0, 0.0), Point::new(10.0, 5.0)];
        let path = line_path(&points, MarkerType::Cross, 1.0);
        let els = path.elements();
        // Cross marker: M L M L, then a move back to the point.
        assert_eq!(els[4], PathEl::MoveTo(points[0]));
        assert_eq!(els[5], PathEl::LineTo(points[1]));
        assert_eq!(els.last(), Some(&PathEl::MoveTo(points[1])));
    }

    #[test]
    fn first_reload_reveals_then_morphs() {
        let mut chart = LineChart::new();
        let mut log = TransitionLog::new();
        let mut lines = Lines {
            values: vec![vec![100.0, 500.0, 900.0]],
            marker: MarkerType::Circle,
        };
        reload(&mut chart, &lines, &mut log).expect("valid chart");
        let first = log.take();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].tween, Tween::Reveal);

        lines.values = vec![vec![900.0, 500.0, 100.0]];
        reload(&mut chart, &lines, &mut log).expect("valid chart");
        let second = log.take();
        assert_eq!(second[0].tween, Tween::Morph);
        assert_eq!(second[0].timing, Timing::EaseOut);
        assert_eq!(second[0].paths.start, first[0].paths.target);
        assert!(second[0].paths.is_compatible());

        chart.redraw_chart();
        reload(&mut chart, &lines, &mut log).expect("valid chart");
        assert_eq!(log.take()[0].tween, Tween::Reveal);
    }

    #[test]
    fn marker_change_reveals_instead_of_morphing() {
        let mut chart = LineChart::new();
        let mut log = TransitionLog::new();
        let mut lines = Lines {
            values: vec![vec![100.0, 500.0]],
            marker: MarkerType::Circle,
        };
        reload(&mut chart, &lines, &mut log).expect("valid chart");
        log.take();

        lines.marker = MarkerType::Cross;
        reload(&mut chart, &lines, &mut log).expect("valid chart");
        let t = &log.take()[0];
        assert_eq!(t.tween, Tween::Reveal);
        assert_eq!(t.timing, Timing::Linear);
        assert_eq!(t.sample(0.0), chart.scene().shape(series_layer(0, 0)).expect("series").path);
    }

    #[test]
    fn points_sit_on_slot_centres_and_value_heights() {
        let mut chart = LineChart::new();
        let mut log = TransitionLog::new();
        let lines = Lines {
            values: vec![vec![0.0, 500.0, 1000.0]],
            marker: MarkerType::Square,
        };
        reload(&mut chart, &lines, &mut log).expect("valid chart");
        let y_axis = chart.scene().shape(crate::chart::Y_AXIS_LINE).expect("y axis");
        let plot_top = y_axis.bounds().y0;
        let plot_bottom = y_axis.bounds().y1;

        let series = chart.scene().shape(series_layer(0, 0)).expect("series");
        let pts = vertices(&series.path);
        // Three marker subpaths plus three moves back onto the line.
        let on_line: Vec<Point> = pts.iter().skip(1).step_by(2).copied().collect();
        assert_eq!(on_line.len(), 3);
        assert!((on_line[0].y - plot_bottom).abs() < 1e-9);
        assert!((on_line[1].y - (plot_top + plot_bottom) / 2.0).abs() < 1e-9);
        assert!((on_line[2].y - plot_top).abs() < 1e-9);
        assert!(on_line[0].x < on_line[1].x && on_line[1].x < on_line[2].x);
    }

    #[test]
    fn non_finite_values_sit_on_the_plot_top() {
        let mut chart = LineChart::new();
        let mut log = TransitionLog::new();
        let lines = Lines {
            values: vec![vec![f64::NAN, 500.0, f64::INFINITY]],
            marker: MarkerType::Circle,
        };
        reload(&mut chart, &lines, &mut log).expect("valid chart");
        let plot_top = chart
            .scene()
            .shape(crate::chart::Y_AXIS_LINE)
            .expect("y axis")
            .bounds()
            .y0;

        let series = chart.scene().shape(series_layer(0, 0)).expect("series");
        let pts = vertices(&series.path);
        let on_line: Vec<Point> = pts.iter().skip(1).step_by(2).copied().collect();
        assert_eq!(on_line.len(), 3);
        assert!((on_line[0].y - plot_top).abs() < 1e-9);
        assert!((on_line[2].y - plot_top).abs() < 1e-9);
        assert!(pts.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn fill_follows_marker_type() {
        let mut chart = LineChart::new();
        let mut log = TransitionLog::new();
        let mut lines = Lines {
            values: vec![vec![1.0]],
            marker: MarkerType::FilledDiamond,
        };
        reload(&mut chart, &lines, &mut log).expect("valid chart");
        let layer = chart.scene().shape(series_layer(0, 0)).expect("series");
        assert_eq!(layer.fill, Brush::Solid(css::ORANGE));

        lines.marker = MarkerType::Diamond;
        reload(&mut chart, &lines, &mut log).expect("valid chart");
        let layer = chart.scene().shape(series_layer(0, 0)).expect("series");
        assert_eq!(layer.fill, Brush::Solid(Color::TRANSPARENT));
        assert_eq!(layer.stroke.as_ref().map(StrokeStyle::width), Some(1.0));
    }

    #[test]
    fn failed_reload_keeps_committed_paths() {
        let mut chart = LineChart::new();
        let mut log = TransitionLog::new();
        let lines = Lines {
            values: vec![vec![1.0, 2.0]],
            marker: MarkerType::Circle,
        };
        reload(&mut chart, &lines, &mut log).expect("valid chart");
        let committed = log.take()[0].paths.target.clone();

        chart.config_mut().y_axis = AxisSpec::new(10.0, 10.0, 6);
        let err = reload(&mut chart, &lines, &mut log).expect_err("empty range");
        assert!(matches!(err, ChartError::InvalidConfiguration(ConfigError::Range { .. })));

        chart.config_mut().y_axis = AxisSpec::new(0.0, 1000.0, 6);
        reload(&mut chart, &lines, &mut log).expect("valid chart");
        assert_eq!(log.take()[0].paths.start, committed);
    }

    #[test]
    fn zero_rows_is_rejected() {
        let mut chart = LineChart::new();
        let mut log = TransitionLog::new();
        let lines = Lines {
            values: vec![],
            marker: MarkerType::Circle,
        };
        let err = reload(&mut chart, &lines, &mut log).expect_err("no rows");
        assert_eq!(err, ChartError::InvalidConfiguration(ConfigError::NoRows));
    }
}
