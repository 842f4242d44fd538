// Copyright 2025 the AMChart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis lines, labels, titles and gridlines for cartesian charts.

use alloc::string::String;

use amchart_core::{LayerId, Scene, ShapeLayer, TextLabel, TextStyle};
use kurbo::Rect;
use peniko::Color;

use crate::chart::{
    GRID_LINE_BASE, X_AXIS_LINE, X_AXIS_TITLE, X_LABEL_BASE, Y_AXIS_LINE, Y_AXIS_TITLE,
    Y_LABEL_BASE,
};
use crate::layout::{CartesianLayout, PlacedLabel};
use crate::z_order;

/// Thickness of horizontal gridlines.
const GRID_LINE_WIDTH: f64 = 1.0;

/// Styling of the axis frame shared by bar, line and scatter charts.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisGuideStyle {
    /// Axis line color.
    pub axis_color: Color,
    /// Axis line thickness.
    pub axis_width: f64,
    /// Font of y value labels.
    pub y_label_style: TextStyle,
    /// Color of y value labels.
    pub y_label_color: Color,
    /// Font of x labels.
    pub x_label_style: TextStyle,
    /// Color of x labels.
    pub x_label_color: Color,
    /// Y axis title; empty for none.
    pub y_title: String,
    /// Font of the y axis title.
    pub y_title_style: TextStyle,
    /// Color of the y axis title.
    pub y_title_color: Color,
    /// X axis title; empty for none.
    pub x_title: String,
    /// Font of the x axis title.
    pub x_title_style: TextStyle,
    /// Color of the x axis title.
    pub x_title_color: Color,
    /// Whether to draw a black gridline at every y label.
    pub horizontal_lines: bool,
}

impl Default for AxisGuideStyle {
    fn default() -> Self {
        Self {
            axis_color: Color::BLACK,
            axis_width: 1.0,
            y_label_style: TextStyle::default(),
            y_label_color: Color::BLACK,
            x_label_style: TextStyle::default(),
            x_label_color: Color::BLACK,
            y_title: String::new(),
            y_title_style: TextStyle::default(),
            y_title_color: Color::BLACK,
            x_title: String::new(),
            x_title_style: TextStyle::default(),
            x_title_color: Color::BLACK,
            horizontal_lines: false,
        }
    }
}

impl AxisGuideStyle {
    /// Sets the axis line color.
    pub fn with_axis_color(mut self, color: Color) -> Self {
        self.axis_color = color;
        self
    }

    /// Sets the axis line thickness.
    pub fn with_axis_width(mut self, width: f64) -> Self {
        self.axis_width = width;
        self
    }

    /// Sets font and color of y value labels.
    pub fn with_y_labels(mut self, style: TextStyle, color: Color) -> Self {
        self.y_label_style = style;
        self.y_label_color = color;
        self
    }

    /// Sets font and color of x labels.
    pub fn with_x_labels(mut self, style: TextStyle, color: Color) -> Self {
        self.x_label_style = style;
        self.x_label_color = color;
        self
    }

    /// Sets the y axis title.
    pub fn with_y_title(mut self, title: impl Into<String>) -> Self {
        self.y_title = title.into();
        self
    }

    /// Sets font and color of the y axis title.
    pub fn with_y_title_style(mut self, style: TextStyle, color: Color) -> Self {
        self.y_title_style = style;
        self.y_title_color = color;
        self
    }

    /// Sets the x axis title.
    pub fn with_x_title(mut self, title: impl Into<String>) -> Self {
        self.x_title = title.into();
        self
    }

    /// Sets font and color of the x axis title.
    pub fn with_x_title_style(mut self, style: TextStyle, color: Color) -> Self {
        self.x_title_style = style;
        self.x_title_color = color;
        self
    }

    /// Enables or disables horizontal gridlines.
    pub fn with_horizontal_lines(mut self, enabled: bool) -> Self {
        self.horizontal_lines = enabled;
        self
    }
}

fn label(id: LayerId, placed: &PlacedLabel, style: TextStyle, color: Color, z: i32) -> TextLabel {
    TextLabel::new(id, placed.text.clone(), placed.frame)
        .with_style(style)
        .with_fill(color)
        .with_align(placed.align)
        .with_z_index(z)
}

/// Appends axis lines, labels, titles and optional gridlines for `layout`.
pub fn push_cartesian_guides(scene: &mut Scene, layout: &CartesianLayout, style: &AxisGuideStyle) {
    if style.horizontal_lines {
        let x_axis = layout.x_axis_line;
        for (i, y) in layout.y_tick_positions().enumerate() {
            scene.push(
                ShapeLayer::filled_rect(
                    LayerId::for_index(GRID_LINE_BASE, i),
                    Rect::new(x_axis.x0, y, x_axis.x1, y + GRID_LINE_WIDTH),
                    Color::BLACK,
                )
                .with_z_index(z_order::GRID_LINES),
            );
        }
    }

    scene.push(
        ShapeLayer::filled_rect(Y_AXIS_LINE, layout.y_axis_line, style.axis_color)
            .with_z_index(z_order::AXIS_RULES),
    );
    scene.push(
        ShapeLayer::filled_rect(X_AXIS_LINE, layout.x_axis_line, style.axis_color)
            .with_z_index(z_order::AXIS_RULES),
    );

    for (i, placed) in layout.y_labels.iter().enumerate() {
        scene.push(label(
            LayerId::for_index(Y_LABEL_BASE, i),
            placed,
            style.y_label_style,
            style.y_label_color,
            z_order::AXIS_LABELS,
        ));
    }
    for (i, placed) in layout.x_labels.iter().enumerate() {
        scene.push(label(
            LayerId::for_index(X_LABEL_BASE, i),
            placed,
            style.x_label_style,
            style.x_label_color,
            z_order::AXIS_LABELS,
        ));
    }

    if let Some(title) = &layout.y_title {
        scene.push(label(
            Y_AXIS_TITLE,
            title,
            style.y_title_style,
            style.y_title_color,
            z_order::AXIS_TITLES,
        ));
    }
    if let Some(title) = &layout.x_title {
        scene.push(label(
            X_AXIS_TITLE,
            title,
            style.x_title_style,
            style.x_title_color,
            z_order::AXIS_TITLES,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use amchart_core::HeuristicTextMeasurer;
    use kurbo::Size;

    use crate::axis::AxisSpec;
    use crate::layout::XAxisLabels;

    fn arrange(style: &AxisGuideStyle) -> CartesianLayout {
        let names = vec!["Jan".to_string(), "Feb".to_string(), "Mar".to_string()];
        CartesianLayout::arrange(
            &HeuristicTextMeasurer,
            Size::new(320.0, 240.0),
            &AxisSpec::new(0.0, 100.0, 5),
            XAxisLabels::Categories(&names),
            style,
        )
        .expect("valid axis")
    }

    #[test]
    fn emits_axes_and_labels() {
        let style = AxisGuideStyle::default();
        let layout = arrange(&style);
        let mut scene = Scene::new();
        push_cartesian_guides(&mut scene, &layout, &style);

        assert_eq!(scene.shapes().count(), 2);
        assert_eq!(scene.texts().count(), 5 + 3);
        let y_axis = scene.shape(Y_AXIS_LINE).expect("y axis");
        assert_eq!(y_axis.bounds(), layout.y_axis_line);
        assert_eq!(y_axis.z_index, z_order::AXIS_RULES);
        assert!(scene.text(Y_AXIS_TITLE).is_none());
    }

    #[test]
    fn gridlines_sit_on_every_y_label() {
        let style = AxisGuideStyle::default()
            .with_horizontal_lines(true)
            .with_y_title("Sales")
            .with_axis_color(peniko::color::palette::css::GRAY);
        let layout = arrange(&style);
        let mut scene = Scene::new();
        push_cartesian_guides(&mut scene, &layout, &style);

        let grid: vec::Vec<Rect> = scene
            .shapes()
            .filter(|s| s.z_index == z_order::GRID_LINES)
            .map(ShapeLayer::bounds)
            .collect();
        assert_eq!(grid.len(), 5);
        for (rect, label) in grid.iter().zip(&layout.y_labels) {
            assert!((rect.height() - GRID_LINE_WIDTH).abs() < 1e-9);
            assert_eq!(rect.x0, layout.x_axis_line.x0);
            assert_eq!(rect.x1, layout.x_axis_line.x1);
            assert!((rect.y0 - label.frame.center().y).abs() < 1e-9);
        }
        let title = scene.text(Y_AXIS_TITLE).expect("y title");
        assert_eq!(title.text, "Sales");
        assert_eq!(title.z_index, z_order::AXIS_TITLES);
    }
}
