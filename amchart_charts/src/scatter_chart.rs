// Copyright 2025 the AMChart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scatter chart over two numeric axes.

use alloc::vec::Vec;
use core::time::Duration;

use amchart_core::{Scene, ShapeLayer, StrokeStyle, Timing, Transition};
use kurbo::{BezPath, Point, Rect, Size};
use peniko::Color;
use tracing::{debug, trace};

use crate::axis::AxisSpec;
use crate::chart::{ChartState, ChartView, IndexPath, ReloadEnv, hand_off, rejected, series_layer};
use crate::error::ChartResult;
use crate::guides::{AxisGuideStyle, push_cartesian_guides};
use crate::layout::{CartesianLayout, XAxisLabels, plot_y};
use crate::marker::{MarkerType, POINT_RADIUS, append_marker};
use crate::z_order;

/// One scatter point in axis units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScatterValue {
    /// Horizontal value.
    pub x: f64,
    /// Vertical value.
    pub y: f64,
}

impl ScatterValue {
    /// Creates a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pull-based data for a [`ScatterChart`].
pub trait ScatterDataSource {
    /// Number of series.
    fn number_of_sections(&self) -> usize;
    /// Number of points in series `section`.
    fn number_of_rows(&self, section: usize) -> usize;
    /// One point.
    fn value(&self, index: IndexPath) -> ScatterValue;
    /// Marker color of a series.
    fn color(&self, section: usize) -> Color;
    /// Marker shape of a series.
    fn marker_type(&self, section: usize) -> MarkerType;
}

/// Configuration of a [`ScatterChart`].
#[derive(Clone, Debug, PartialEq)]
pub struct ScatterChartConfig {
    /// Horizontal axis.
    pub x_axis: AxisSpec,
    /// Vertical axis.
    pub y_axis: AxisSpec,
    /// Axis frame styling.
    pub guides: AxisGuideStyle,
    /// Stroke width of markers.
    pub line_width: f64,
    /// Duration of the reveal transition.
    pub animation_duration: Duration,
}

impl Default for ScatterChartConfig {
    fn default() -> Self {
        Self {
            x_axis: AxisSpec::new(0.0, 1000.0, 6),
            y_axis: AxisSpec::new(0.0, 1000.0, 6),
            guides: AxisGuideStyle::default(),
            line_width: 1.0,
            animation_duration: Duration::from_millis(600),
        }
    }
}

impl ScatterChartConfig {
    /// Sets the horizontal axis.
    pub fn with_x_axis(mut self, x_axis: AxisSpec) -> Self {
        self.x_axis = x_axis;
        self
    }

    /// Sets the vertical axis.
    pub fn with_y_axis(mut self, y_axis: AxisSpec) -> Self {
        self.y_axis = y_axis;
        self
    }

    /// Sets the axis frame styling.
    pub fn with_guides(mut self, guides: AxisGuideStyle) -> Self {
        self.guides = guides;
        self
    }

    /// Sets the marker stroke width.
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

/// Maps a value onto `plot`: `x_axis.min` at the left edge, `y_axis.min` at the bottom.
///
/// A non-finite x lands on the left edge and a non-finite y on the top edge.
pub fn scatter_point(plot: Rect, x_axis: &AxisSpec, y_axis: &AxisSpec, value: ScatterValue) -> Point {
    Point::new(
        plot.x0 + x_axis.fraction(value.x) * plot.width(),
        plot_y(plot, y_axis, value.y),
    )
}

/// One marker per value, with no connecting line.
pub fn scatter_path(
    plot: Rect,
    x_axis: &AxisSpec,
    y_axis: &AxisSpec,
    values: &[ScatterValue],
    marker: MarkerType,
) -> BezPath {
    let mut path = BezPath::new();
    for &value in values {
        append_marker(
            &mut path,
            scatter_point(plot, x_axis, y_axis, value),
            POINT_RADIUS,
            marker,
        );
    }
    path
}

/// A scatter chart view.
#[derive(Clone, Debug, Default)]
pub struct ScatterChart {
    config: ScatterChartConfig,
    scene: Scene,
    state: ChartState,
}

impl ScatterChart {
    /// Creates a chart with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a chart with `config`.
    pub fn with_config(config: ScatterChartConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &ScatterChartConfig {
        &self.config
    }

    /// Mutable configuration; takes effect on the next reload.
    pub fn config_mut(&mut self) -> &mut ScatterChartConfig {
        &mut self.config
    }

    fn rebuild(
        &mut self,
        size: Size,
        source: &dyn ScatterDataSource,
        env: &ReloadEnv<'_>,
    ) -> ChartResult<Vec<Transition>> {
        let config = &self.config;
        config.x_axis.validate()?;
        config.y_axis.validate()?;
        let sections = source.number_of_sections();
        debug!(sections, "reload scatter chart");

        let layout = CartesianLayout::arrange(
            env.measurer,
            size,
            &config.y_axis,
            XAxisLabels::Numeric(&config.x_axis),
            &config.guides,
        )?;
        self.state = ChartState::LaidOut;
        push_cartesian_guides(&mut self.scene, &layout, &config.guides);

        let mut transitions = Vec::with_capacity(sections);
        for section in 0..sections {
            let rows = source.number_of_rows(section);
            let values: Vec<ScatterValue> = (0..rows)
                .map(|row| source.value(IndexPath::new(section, row)))
                .collect();
            let marker = source.marker_type(section);
            let color = source.color(section);
            let path = scatter_path(layout.plot, &config.x_axis, &config.y_axis, &values, marker);
            trace!(section, rows, ?marker, "scatter series");

            let layer = series_layer(section, 0);
            self.scene.push(
                ShapeLayer::new(layer, path.clone())
                    .with_fill(marker.fill_brush(color))
                    .with_stroke(StrokeStyle::solid(color, config.line_width))
                    .with_z_index(z_order::SERIES_POINTS),
            );
            transitions.push(Transition::reveal(
                layer,
                path,
                config.animation_duration,
                Timing::Linear,
            ));
        }
        Ok(transitions)
    }
}

impl ChartView for ScatterChart {
    type Source = dyn ScatterDataSource;

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
                Err(rejected("scatter", error))
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
