// Copyright 2025 the AMChart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stacked bar chart.
//!
//! Each section is one bar centred in its category slot; the rows of a section
//! stack bottom-up inside it. The bar's total height is the section sum mapped
//! onto the y axis, and each row takes a share of that height proportional to
//! its value.

use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use amchart_core::{PathPair, Scene, ShapeLayer, Timing, Transition};
use kurbo::{BezPath, Point, Rect, Size};
use peniko::Color;
use tracing::{debug, trace};

use crate::axis::AxisSpec;
use crate::chart::{
    ChartState, ChartView, IndexPath, ReloadEnv, finite_or_zero, hand_off, rejected, series_layer,
};
use crate::error::{ChartError, ChartResult, ConfigError};
use crate::guides::{AxisGuideStyle, push_cartesian_guides};
use crate::layout::{CartesianLayout, XAxisLabels};
use crate::z_order;

/// Pull-based data for a [`BarChart`].
pub trait BarDataSource {
    /// Number of bars.
    fn number_of_sections(&self) -> usize;
    /// Number of stacked values in bar `section`.
    fn number_of_rows(&self, section: usize) -> usize;
    /// A stacked value; must not be negative.
    fn value(&self, index: IndexPath) -> f64;
    /// Fill color of one stacked value.
    fn color(&self, index: IndexPath) -> Color;
    /// Category label under bar `section`.
    fn x_label(&self, section: usize) -> String;
}

/// Configuration of a [`BarChart`].
#[derive(Clone, Debug, PartialEq)]
pub struct BarChartConfig {
    /// Value axis. `max` must not be negative.
    pub y_axis: AxisSpec,
    /// Axis frame styling.
    pub guides: AxisGuideStyle,
    /// Horizontal gap between bars and at both ends.
    pub bar_space: f64,
    /// Duration of the grow-from-baseline transition.
    pub animation_duration: Duration,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            y_axis: AxisSpec::new(0.0, 1000.0, 6),
            guides: AxisGuideStyle::default(),
            bar_space: 8.0,
            animation_duration: Duration::from_millis(600),
        }
    }
}

impl BarChartConfig {
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

    /// Sets the gap between bars.
    pub fn with_bar_space(mut self, bar_space: f64) -> Self {
        self.bar_space = bar_space;
        self
    }

    /// Sets the transition duration.
    pub fn with_animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }
}

/// Geometry of one stacked bar.
#[derive(Clone, Debug, PartialEq)]
pub struct BarStack {
    /// The visible bar; segments are clipped to it.
    pub column: Rect,
    /// One rectangle per row, bottom-up.
    pub segments: Vec<Rect>,
}

/// Stacks `values` into a bar of `bar_width` standing on `bottom_left`.
///
/// The bar is `(sum - min) / (max - min)` of `plot_height` tall. Stacking starts
/// `total * min / (sum - min)` below the baseline so that the part of the stack
/// below the axis minimum is clipped away. Degenerate ratios give zero heights.
pub fn bar_segments(
    bottom_left: Point,
    bar_width: f64,
    plot_height: f64,
    values: &[f64],
    min: f64,
    max: f64,
) -> BarStack {
    let sum: f64 = values.iter().sum();
    let excess = sum - min;
    let total = finite_or_zero(excess / (max - min) * plot_height).max(0.0);
    let bottom = bottom_left.y;
    let x0 = bottom_left.x;
    let x1 = x0 + bar_width;
    let column = Rect::new(x0, bottom - total, x1, bottom);

    let mut y = bottom + finite_or_zero(total * min / excess);
    let segments = values
        .iter()
        .map(|&value| {
            let height = finite_or_zero(value / excess * total);
            let segment = Rect::new(x0, y - height, x1, y);
            y -= height;
            clip_to_column(segment, column)
        })
        .collect();
    BarStack { column, segments }
}

fn clip_to_column(segment: Rect, column: Rect) -> Rect {
    let clip = |y: f64| y.max(column.y0).min(column.y1);
    Rect::new(segment.x0, clip(segment.y0), segment.x1, clip(segment.y1))
}

/// Outline of a bar segment: top-left, bottom-left, bottom-right, top-right.
pub(crate) fn bar_path(rect: Rect) -> BezPath {
    let mut p = BezPath::new();
    p.move_to((rect.x0, rect.y0));
    p.line_to((rect.x0, rect.y1));
    p.line_to((rect.x1, rect.y1));
    p.line_to((rect.x1, rect.y0));
    p.close_path();
    p
}

/// A stacked bar chart view.
#[derive(Clone, Debug, Default)]
pub struct BarChart {
    config: BarChartConfig,
    scene: Scene,
    state: ChartState,
}

impl BarChart {
    /// Creates a chart with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a chart with `config`.
    pub fn with_config(config: BarChartConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &BarChartConfig {
        &self.config
    }

    /// Mutable configuration; takes effect on the next reload.
    pub fn config_mut(&mut self) -> &mut BarChartConfig {
        &mut self.config
    }

    fn validate(&self, sections: usize) -> Result<(), ConfigError> {
        let y_axis = &self.config.y_axis;
        y_axis.validate()?;
        if sections == 0 {
            return Err(ConfigError::NoSections);
        }
        if y_axis.max < 0.0 {
            return Err(ConfigError::NegativeMax { max: y_axis.max });
        }
        Ok(())
    }

    fn rebuild(
        &mut self,
        size: Size,
        source: &dyn BarDataSource,
        env: &ReloadEnv<'_>,
    ) -> ChartResult<Vec<Transition>> {
        let sections = source.number_of_sections();
        self.validate(sections)?;

        let mut series = Vec::with_capacity(sections);
        for section in 0..sections {
            let rows = source.number_of_rows(section);
            let mut values = Vec::with_capacity(rows);
            for row in 0..rows {
                let value = source.value(IndexPath::new(section, row));
                if value < 0.0 {
                    return Err(ChartError::InvalidData {
                        section,
                        row,
                        value,
                    });
                }
                values.push(value);
            }
            series.push(values);
        }
        let names: Vec<String> = (0..sections).map(|s| source.x_label(s)).collect();
        debug!(sections, "reload bar chart");

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
        let n = sections as f64;
        let bar_width = ((plot.width() - config.bar_space * (n + 1.0)) / n).max(0.0);
        let mut transitions = Vec::new();
        for (section, values) in series.iter().enumerate() {
            let x0 = layout.slot_center(section) - bar_width / 2.0;
            let stack = bar_segments(
                Point::new(x0, plot.y1),
                bar_width,
                plot.height(),
                values,
                config.y_axis.min,
                config.y_axis.max,
            );
            trace!(section, height = stack.column.height(), "bar stack");
            let flat = bar_path(Rect::new(stack.column.x0, plot.y1, stack.column.x1, plot.y1));
            for (row, segment) in stack.segments.iter().enumerate() {
                let id = series_layer(section, row);
                let path = bar_path(*segment);
                self.scene.push(
                    ShapeLayer::new(id, path.clone())
                        .with_fill(source.color(IndexPath::new(section, row)))
                        .with_z_index(z_order::SERIES_FILL),
                );
                transitions.push(Transition::morph(
                    id,
                    PathPair::new(flat.clone(), path),
                    config.animation_duration,
                    Timing::EaseOut,
                ));
            }
        }
        Ok(transitions)
    }
}

impl ChartView for BarChart {
    type Source = dyn BarDataSource;

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
                Err(rejected("bar", error))
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
    use kurbo::Shape;
    use peniko::color::palette::css;

    struct Bars(Vec<Vec<f64>>);

    impl BarDataSource for Bars {
        fn number_of_sections(&self) -> usize {
            self.0.len()
        }
        fn number_of_rows(&self, section: usize) -> usize {
            self.0[section].len()
        }
        fn value(&self, index: IndexPath) -> f64 {
            self.0[index.section][index.row]
        }
        fn color(&self, _index: IndexPath) -> Color {
            css::STEEL_BLUE
        }
        fn x_label(&self, section: usize) -> String {
            format!("S{section}")
        }
    }

    fn reload(chart: &mut BarChart, bars: &Bars, log: &mut TransitionLog) -> ChartResult<()> {
        let mut env = ReloadEnv::new(&HeuristicTextMeasurer, log);
        chart.reload(Size::new(400.0, 300.0), Some(bars), &mut env)
    }

    #[test]
    fn ten_percent_bar_splits_evenly() {
        let stack = bar_segments(Point::new(10.0, 500.0), 20.0, 400.0, &[50.0, 50.0], 0.0, 1000.0);
        assert_eq!(stack.column, Rect::new(10.0, 460.0, 30.0, 500.0));
        assert_eq!(stack.segments[0], Rect::new(10.0, 480.0, 30.0, 500.0));
        assert_eq!(stack.segments[1], Rect::new(10.0, 460.0, 30.0, 480.0));
    }

    #[test]
    fn sum_equal_to_min_gives_zero_height() {
        let stack = bar_segments(Point::new(0.0, 100.0), 10.0, 80.0, &[20.0, 30.0], 50.0, 100.0);
        assert_eq!(stack.column.height(), 0.0);
        for s in &stack.segments {
            assert!(s.y0.is_finite() && s.y1.is_finite());
            assert_eq!(s.height(), 0.0);
        }
    }

    #[test]
    fn stack_below_axis_min_is_clipped() {
        // Values 200..600 of a 200..1000 axis: half the plot.
        let stack = bar_segments(Point::new(0.0, 800.0), 10.0, 800.0, &[300.0, 300.0], 200.0, 1000.0);
        assert_eq!(stack.column, Rect::new(0.0, 400.0, 10.0, 800.0));
        assert_eq!(stack.segments[0], Rect::new(0.0, 700.0, 10.0, 800.0));
        assert_eq!(stack.segments[1], Rect::new(0.0, 400.0, 10.0, 700.0));
    }

    #[test]
    fn reload_emits_one_layer_and_transition_per_row() {
        let mut chart = BarChart::new();
        let mut log = TransitionLog::new();
        let bars = Bars(vec![vec![100.0, 200.0], vec![300.0]]);
        reload(&mut chart, &bars, &mut log).expect("valid chart");

        assert_eq!(chart.state(), ChartState::Animating);
        assert_eq!(log.len(), 3);
        let segment = chart.scene().shape(series_layer(0, 1)).expect("segment");
        let t = log.last_for(series_layer(0, 1)).expect("transition");
        assert_eq!(t.tween, Tween::Morph);
        assert_eq!(t.timing, Timing::EaseOut);
        assert_eq!(t.paths.target, segment.path);
        assert!(t.paths.is_compatible());
        // Grows from a flat line on the x axis.
        assert_eq!(t.paths.start.bounding_box().height(), 0.0);

        chart.finish_animations();
        assert_eq!(chart.state(), ChartState::Idle);
    }

    #[test]
    fn bars_are_centred_in_their_slots() {
        let mut chart = BarChart::new();
        let mut log = TransitionLog::new();
        let bars = Bars(vec![vec![500.0], vec![500.0], vec![500.0]]);
        reload(&mut chart, &bars, &mut log).expect("valid chart");

        for section in 0..3 {
            let label = chart
                .scene()
                .text(amchart_core::LayerId::for_index(crate::chart::X_LABEL_BASE, section))
                .expect("x label");
            let bar = chart.scene().shape(series_layer(section, 0)).expect("bar");
            assert!((bar.bounds().center().x - label.center().x).abs() < 1e-9);
        }
    }

    #[test]
    fn negative_value_is_invalid_data() {
        let mut chart = BarChart::new();
        let mut log = TransitionLog::new();
        let bars = Bars(vec![vec![1.0, -2.0]]);
        let err = reload(&mut chart, &bars, &mut log).expect_err("negative value");
        assert_eq!(
            err,
            ChartError::InvalidData {
                section: 0,
                row: 1,
                value: -2.0
            }
        );
        assert!(chart.scene().is_empty());
        assert!(log.is_empty());
    }

    #[test]
    fn preconditions_are_checked() {
        let mut log = TransitionLog::new();
        let mut chart = BarChart::new();
        let err = reload(&mut chart, &Bars(vec![]), &mut log).expect_err("no sections");
        assert_eq!(err, ChartError::InvalidConfiguration(ConfigError::NoSections));

        let mut chart = BarChart::with_config(
            BarChartConfig::default().with_y_axis(AxisSpec::new(-10.0, -1.0, 3)),
        );
        let err = reload(&mut chart, &Bars(vec![vec![1.0]]), &mut log).expect_err("negative max");
        assert_eq!(
            err,
            ChartError::InvalidConfiguration(ConfigError::NegativeMax { max: -1.0 })
        );
    }

    #[test]
    fn missing_source_clears_scene() {
        let mut chart = BarChart::new();
        let mut log = TransitionLog::new();
        reload(&mut chart, &Bars(vec![vec![1.0]]), &mut log).expect("valid chart");
        assert!(!chart.scene().is_empty());

        let mut env = ReloadEnv::new(&HeuristicTextMeasurer, &mut log);
        chart
            .reload(Size::new(400.0, 300.0), None, &mut env)
            .expect("no source is not an error");
        assert!(chart.scene().is_empty());
        assert_eq!(chart.state(), ChartState::Idle);
    }
}
