// Copyright 2025 the AMChart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point markers for line and scatter series.

use kurbo::{BezPath, Circle, Point, Shape};
use peniko::{Brush, Color};

/// Radius of every data-point marker.
pub const POINT_RADIUS: f64 = 5.0;

/// Curve flattening tolerance for circle markers.
const MARKER_TOLERANCE: f64 = 0.1;

/// The nine marker shapes a series can use.
///
/// Outline and filled variants share geometry; only the fill differs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MarkerType {
    /// Outlined circle.
    #[default]
    Circle,
    /// Filled circle.
    FilledCircle,
    /// Outlined square.
    Square,
    /// Filled square.
    FilledSquare,
    /// Outlined upward triangle.
    Triangle,
    /// Filled upward triangle.
    FilledTriangle,
    /// Outlined diamond.
    Diamond,
    /// Filled diamond.
    FilledDiamond,
    /// Two crossing diagonal strokes.
    Cross,
}

impl MarkerType {
    /// Every marker type, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Circle,
        Self::FilledCircle,
        Self::Square,
        Self::FilledSquare,
        Self::Triangle,
        Self::FilledTriangle,
        Self::Diamond,
        Self::FilledDiamond,
        Self::Cross,
    ];

    /// Whether series using this marker fill their path with the series color.
    pub const fn is_filled(self) -> bool {
        matches!(
            self,
            Self::FilledCircle | Self::FilledSquare | Self::FilledTriangle | Self::FilledDiamond
        )
    }

    /// Fill paint for a series of `color`: the color itself, or transparent.
    pub fn fill_brush(self, color: Color) -> Brush {
        if self.is_filled() {
            Brush::Solid(color)
        } else {
            Brush::Solid(Color::TRANSPARENT)
        }
    }
}

/// Builds the marker outline centred on `center`.
pub fn make_marker(center: Point, radius: f64, marker: MarkerType) -> BezPath {
    let Point { x, y } = center;
    match marker {
        MarkerType::Circle | MarkerType::FilledCircle => Circle::new(center, radius)
            .path_elements(MARKER_TOLERANCE)
            .collect(),
        MarkerType::Square | MarkerType::FilledSquare => {
            let mut p = BezPath::new();
            p.move_to((x - radius, y - radius));
            p.line_to((x + radius, y - radius));
            p.line_to((x + radius, y + radius));
            p.line_to((x - radius, y + radius));
            p.close_path();
            p
        }
        MarkerType::Triangle | MarkerType::FilledTriangle => {
            let mut p = BezPath::new();
            p.move_to((x, y - radius));
            p.line_to((x + radius, y + radius));
            p.line_to((x - radius, y + radius));
            p.close_path();
            p
        }
        MarkerType::Diamond | MarkerType::FilledDiamond => {
            let mut p = BezPath::new();
            p.move_to((x, y - radius));
            p.line_to((x + radius, y));
            p.line_to((x, y + radius));
            p.line_to((x - radius, y));
            p.close_path();
            p
        }
        MarkerType::Cross => {
            let mut p = BezPath::new();
            p.move_to((x - radius, y - radius));
            p.line_to((x + radius, y + radius));
            p.move_to((x + radius, y - radius));
            p.line_to((x - radius, y + radius));
            p
        }
    }
}

/// Appends a marker as new subpaths of `path`.
pub(crate) fn append_marker(path: &mut BezPath, center: Point, radius: f64, marker: MarkerType) {
    path.extend(make_marker(center, radius, marker).elements().iter().copied());
}
