// Copyright 2025 the AMChart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart engines for `amchart_core`.
//!
//! Five chart views pull their data from a data-source trait on every reload
//! and rebuild an [`amchart_core::Scene`]:
//! - [`BarChart`]: stacked bars, one per section,
//! - [`LineChart`]: one polyline with point markers per section,
//! - [`PieChart`]: wedges with optional donut hole and tap selection,
//! - [`RadarChart`]: closed polygons over a spoke-and-ring grid,
//! - [`ScatterChart`]: markers over two numeric axes.
//!
//! Motion is described, not performed: each reload hands explicit
//! [`amchart_core::Transition`]s to the host's [`amchart_core::Animator`].
//! Reloads validate their configuration first and return a [`ChartError`]
//! instead of panicking.

#![no_std]

extern crate alloc;

mod axis;
mod bar_chart;
mod chart;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod guides;
mod layout;
mod line_chart;
mod marker;
mod pie_chart;
mod radar_chart;
mod scatter_chart;
mod z_order;

pub use axis::{AxisDirection, AxisSpec, AxisTick};
pub use bar_chart::{BarChart, BarChartConfig, BarDataSource, BarStack, bar_segments};
pub use chart::{ChartState, ChartView, IndexPath, ReloadEnv, finite_or_zero, series_layer};
pub use error::{ChartError, ChartResult, ConfigError};
pub use format::DecimalPlaces;
pub use guides::{AxisGuideStyle, push_cartesian_guides};
pub use layout::{CartesianLayout, MARGIN, PlacedLabel, XAxisLabels};
pub use line_chart::{LineChart, LineChartConfig, LineDataSource, line_path};
pub use marker::{MarkerType, POINT_RADIUS, make_marker};
pub use pie_chart::{
    PieChart, PieChartConfig, PieChartDelegate, PieDataSource, PieGeometry, PieSelection,
    SELECTION_OFFSET, START_ANGLE, pie_sweeps, wedge_path,
};
pub use radar_chart::{
    RadarChart, RadarChartConfig, RadarDataSource, SERIES_LINE_WIDTH, radar_angles, radar_grid,
    radar_polygon,
};
pub use scatter_chart::{
    ScatterChart, ScatterChartConfig, ScatterDataSource, ScatterValue, scatter_path,
    scatter_point,
};
pub use z_order::*;
