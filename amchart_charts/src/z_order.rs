// Copyright 2025 the AMChart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for chart-generated primitives.
//!
//! Every [`amchart_core::Primitive`] carries an explicit `z_index`. Charts set
//! these consistently; hosts sort by `(z_index, LayerId)` for a deterministic
//! tie-break.

/// Horizontal gridlines and the radar web.
pub const GRID_LINES: i32 = -50;

/// Filled series shapes (bar segments, pie wedges, radar polygons).
pub const SERIES_FILL: i32 = 0;
/// Stroked series paths (line chart polylines).
pub const SERIES_STROKE: i32 = 10;
/// Marker-only series (scatter points).
pub const SERIES_POINTS: i32 = 20;

/// Axis lines.
pub const AXIS_RULES: i32 = 30;
/// Axis value labels, category labels and radar vertex labels.
pub const AXIS_LABELS: i32 = 40;
/// Axis titles.
pub const AXIS_TITLES: i32 = 50;

/// Chart-level overlays such as the pie centre label.
pub const OVERLAY_LABELS: i32 = 80;
