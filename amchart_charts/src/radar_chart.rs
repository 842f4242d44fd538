// Copyright 2025 the AMChart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Radar (spider) chart.
//!
//! Rows are the polygon vertices, spaced evenly around the circle starting
//! straight up. Each section is one closed polygon whose vertex `k` sits at
//! the fraction of the radius given by its value on the shared axis.

use alloc::string::String;
use alloc::vec::Vec;
use core::f64::consts::{PI, TAU};
use core::time::Duration;

use amchart_core::{
    LayerId, PathPair, Scene, ShapeLayer, StrokeStyle, TextAlign, TextLabel, TextStyle, Timing,
    Transition,
};
use kurbo::{BezPath, Cap, Join, Point, Rect, Size, Stroke, Vec2};
use peniko::Color;
use tracing::{debug, trace};

use crate::axis::AxisSpec;
use crate::chart::{
    AXIS_LABEL_BASE, ChartState, ChartView, IndexPath, RADAR_GRID, ReloadEnv, VERTEX_LABEL_BASE,
    hand_off, rejected, series_layer,
};
use crate::error::{ChartResult, ConfigError};
#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::z_order;

/// Stroke width of every series outline.
pub const SERIES_LINE_WIDTH: f64 = 3.5;

/// Padding added to the largest vertex label extent.
const VERTEX_LABEL_PADDING: f64 = 2.0;

/// Offset of axis value labels from the first spoke.
const AXIS_LABEL_MARGIN: f64 = 8.0;

/// Dash pattern of dotted series outlines.
const DOTTED_DASHES: [f64; 2] = [5.0, 6.0];

/// Pull-based data for a [`RadarChart`]. Every section has the same row count.
pub trait RadarDataSource {
    /// Number of polygons.
    fn number_of_sections(&self) -> usize;
    /// Number of vertices; at least 3.
    fn number_of_rows(&self) -> usize;
    /// One vertex value.
    fn value(&self, index: IndexPath) -> f64;
    /// Fill of one polygon.
    fn fill_color(&self, section: usize) -> Color;
    /// Outline of one polygon.
    fn stroke_color(&self, section: usize) -> Color;

    /// Title drawn outside vertex `row`.
    fn vertex_title(&self, row: usize) -> String {
        let _ = row;
        String::new()
    }

    /// Font of the title at vertex `row`.
    fn vertex_style(&self, row: usize) -> TextStyle {
        let _ = row;
        TextStyle::default()
    }

    /// Color of the title at vertex `row`.
    fn vertex_color(&self, row: usize) -> Color {
        let _ = row;
        Color::BLACK
    }
}

/// Configuration of a [`RadarChart`].
#[derive(Clone, Debug, PartialEq)]
pub struct RadarChartConfig {
    /// Value axis shared by every spoke.
    pub axis: AxisSpec,
    /// Color of spokes and rings.
    pub axis_color: Color,
    /// Width of spokes and rings.
    pub axis_width: f64,
    /// Font of axis value labels.
    pub axis_label_style: TextStyle,
    /// Color of axis value labels.
    pub axis_label_color: Color,
    /// Dash the series outlines.
    pub dotted_lines: bool,
    /// Duration of the morph transition.
    pub animation_duration: Duration,
}

impl Default for RadarChartConfig {
    fn default() -> Self {
        Self {
            axis: AxisSpec::new(0.0, 5.0, 6),
            axis_color: Color::BLACK,
            axis_width: 1.0,
            axis_label_style: TextStyle::default(),
            axis_label_color: Color::BLACK,
            dotted_lines: false,
            animation_duration: Duration::from_millis(600),
        }
    }
}

impl RadarChartConfig {
    /// Sets the value axis.
    pub fn with_axis(mut self, axis: AxisSpec) -> Self {
        self.axis = axis;
        self
    }

    /// Sets color and width of spokes and rings.
    pub fn with_axis_line(mut self, color: Color, width: f64) -> Self {
        self.axis_color = color;
        self.axis_width = width;
        self
    }

    /// Sets font and color of axis value labels.
    pub fn with_axis_labels(mut self, style: TextStyle, color: Color) -> Self {
        self.axis_label_style = style;
        self.axis_label_color = color;
        self
    }

    /// Enables or disables dashed series outlines.
    pub fn with_dotted_lines(mut self, dotted: bool) -> Self {
        self.dotted_lines = dotted;
        self
    }

    /// Sets the transition duration.
    pub fn with_animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }
}

/// Vertex angles for `rows` spokes, starting straight up and running clockwise.
pub fn radar_angles(rows: usize) -> Vec<f64> {
    let step = TAU / rows as f64;
    (0..rows).map(|k| PI * 1.5 + step * k as f64).collect()
}

fn on_circle(center: Point, radius: f64, angle: f64) -> Point {
    center + Vec2::new(angle.cos(), angle.sin()) * radius
}

/// A closed polygon with vertex `k` at `radius * fraction(value_k)` along spoke `k`.
///
/// A zero `radius` collapses every vertex onto `center` while keeping the
/// same element structure, which is what the first reload morphs from.
pub fn radar_polygon(center: Point, radius: f64, values: &[f64], axis: &AxisSpec) -> BezPath {
    let mut path = BezPath::new();
    for (k, (&value, angle)) in values.iter().zip(radar_angles(values.len())).enumerate() {
        let point = on_circle(center, radius * axis.fraction(value), angle);
        if k == 0 {
            path.move_to(point);
        } else {
            path.line_to(point);
        }
    }
    if !values.is_empty() {
        path.close_path();
    }
    path
}

/// Spokes from `center` to every vertex, then `tick_count` rings from the
/// outer radius inward.
pub fn radar_grid(center: Point, radius: f64, rows: usize, tick_count: usize) -> BezPath {
    let angles = radar_angles(rows);
    let mut path = BezPath::new();
    for &angle in &angles {
        path.move_to(center);
        path.line_to(on_circle(center, radius, angle));
    }
    for ring in ring_radii(radius, tick_count) {
        for (k, &angle) in angles.iter().enumerate() {
            let point = on_circle(center, ring, angle);
            if k == 0 {
                path.move_to(point);
            } else {
                path.line_to(point);
            }
        }
        path.close_path();
    }
    path
}

/// Ring radii from `radius` down to zero, one per axis label.
fn ring_radii(radius: f64, tick_count: usize) -> impl Iterator<Item = f64> {
    let step = if tick_count > 1 {
        radius / (tick_count - 1) as f64
    } else {
        0.0
    };
    (0..tick_count).map(move |i| radius - step * i as f64)
}

/// A radar chart view.
#[derive(Clone, Debug, Default)]
pub struct RadarChart {
    config: RadarChartConfig,
    scene: Scene,
    state: ChartState,
    committed: Vec<BezPath>,
}

impl RadarChart {
    /// Creates a chart with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a chart with `config`.
    pub fn with_config(config: RadarChartConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &RadarChartConfig {
        &self.config
    }

    /// Mutable configuration; takes effect on the next reload.
    pub fn config_mut(&mut self) -> &mut RadarChartConfig {
        &mut self.config
    }

    /// Drops committed polygons so the next reload grows every one from the centre.
    pub fn redraw_chart(&mut self) {
        self.committed.clear();
    }

    fn series_stroke(&self, color: Color) -> StrokeStyle {
        let mut stroke = Stroke::new(SERIES_LINE_WIDTH)
            .with_join(Join::Round)
            .with_caps(Cap::Round);
        if self.config.dotted_lines {
            stroke = stroke.with_dashes(0.0, DOTTED_DASHES);
        }
        StrokeStyle::solid(color, SERIES_LINE_WIDTH).with_stroke(stroke)
    }

    fn rebuild(
        &mut self,
        size: Size,
        source: &dyn RadarDataSource,
        env: &ReloadEnv<'_>,
    ) -> ChartResult<Vec<Transition>> {
        let sections = source.number_of_sections();
        let rows = source.number_of_rows();
        let axis = self.config.axis;
        axis.validate()?;
        if sections == 0 {
            return Err(ConfigError::NoSections.into());
        }
        if rows < 3 {
            return Err(ConfigError::RadarRows { rows }.into());
        }
        debug!(sections, rows, "reload radar chart");

        // Pass 1: measure vertex titles and axis labels.
        let titles: Vec<(String, TextStyle, Color, Size)> = (0..rows)
            .map(|row| {
                let title = source.vertex_title(row);
                let style = source.vertex_style(row);
                let size = env.measurer.size_to_fit(&title, &style);
                (title, style, source.vertex_color(row), size)
            })
            .collect();
        let max_vertex = titles.iter().fold(0.0_f64, |acc, (.., s)| {
            acc.max(s.width).max(s.height)
        }) + VERTEX_LABEL_PADDING;
        let mut axis_texts = axis.labels()?;
        axis_texts.reverse();
        let axis_sizes: Vec<Size> = axis_texts
            .iter()
            .map(|t| env.measurer.size_to_fit(t, &self.config.axis_label_style))
            .collect();
        let max_axis_width = axis_sizes.iter().fold(0.0_f64, |acc, s| acc.max(s.width));

        // Pass 2: place everything around the centre of the view square.
        let side = size.width.min(size.height);
        let center = Point::new(size.width / 2.0, size.height / 2.0);
        let radius = ((side - max_vertex * 2.0) / 2.0).max(0.0);
        trace!(?center, radius, max_vertex, "radar layout");
        self.state = ChartState::LaidOut;

        let angles = radar_angles(rows);
        self.scene.push(
            ShapeLayer::new(RADAR_GRID, radar_grid(center, radius, rows, axis.tick_count))
                .with_stroke(StrokeStyle::solid(
                    self.config.axis_color,
                    self.config.axis_width,
                ))
                .with_z_index(z_order::GRID_LINES),
        );

        let label_radius = radius + max_vertex / 2.0;
        for (row, ((title, style, color, size), &angle)) in titles.into_iter().zip(&angles).enumerate()
        {
            if title.is_empty() {
                continue;
            }
            let frame = Rect::from_center_size(on_circle(center, label_radius, angle), size);
            self.scene.push(
                TextLabel::new(LayerId::for_index(VERTEX_LABEL_BASE, row), title, frame)
                    .with_style(style)
                    .with_fill(color)
                    .with_align(TextAlign::Center)
                    .with_z_index(z_order::AXIS_LABELS),
            );
        }

        let first = angles[0];
        let offset = Vec2::new(-max_axis_width / 2.0 - AXIS_LABEL_MARGIN, AXIS_LABEL_MARGIN);
        for (i, ((text, size), ring)) in axis_texts
            .into_iter()
            .zip(axis_sizes)
            .zip(ring_radii(radius, axis.tick_count))
            .enumerate()
        {
            let frame = Rect::from_center_size(on_circle(center, ring, first) + offset, size);
            self.scene.push(
                TextLabel::new(LayerId::for_index(AXIS_LABEL_BASE, i), text, frame)
                    .with_style(self.config.axis_label_style)
                    .with_fill(self.config.axis_label_color)
                    .with_align(TextAlign::Center)
                    .with_z_index(z_order::AXIS_LABELS),
            );
        }

        let mut transitions = Vec::with_capacity(sections);
        let mut targets = Vec::with_capacity(sections);
        for section in 0..sections {
            let values: Vec<f64> = (0..rows)
                .map(|row| source.value(IndexPath::new(section, row)))
                .collect();
            let path = radar_polygon(center, radius, &values, &axis);
            let start = match self.committed.get(section) {
                Some(previous) => previous.clone(),
                None => radar_polygon(center, 0.0, &values, &axis),
            };
            trace!(section, "radar series");

            let layer = series_layer(section, 0);
            self.scene.push(
                ShapeLayer::new(layer, path.clone())
                    .with_fill(source.fill_color(section))
                    .with_stroke(self.series_stroke(source.stroke_color(section)))
                    .with_z_index(z_order::SERIES_FILL),
            );
            transitions.push(Transition::morph(
                layer,
                PathPair::new(start, path.clone()),
                self.config.animation_duration,
                Timing::EaseOut,
            ));
            targets.push(path);
        }
        self.committed = targets;
        Ok(transitions)
    }
}

impl ChartView for RadarChart {
    type Source = dyn RadarDataSource;

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
                Err(rejected("radar", error))
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
