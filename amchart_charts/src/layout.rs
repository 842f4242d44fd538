// Copyright 2025 the AMChart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cartesian frame layout shared by bar, line and scatter charts.
//!
//! Layout is two-pass: every axis label and title is measured first, then the
//! axis lines are placed so the widest y label fits to the left of the y axis
//! and the tallest x label (plus the optional x title) fits below the x axis.

use alloc::string::String;
use alloc::vec::Vec;

use amchart_core::{TextAlign, TextMeasurer};
use kurbo::{Rect, Size};
use tracing::trace;

use crate::axis::{AxisDirection, AxisSpec};
use crate::chart::finite_or_zero;
use crate::error::ChartResult;
use crate::guides::AxisGuideStyle;

/// Gap between axis lines, labels and titles.
pub const MARGIN: f64 = 8.0;

/// What the x axis shows.
#[derive(Clone, Copy, Debug)]
pub enum XAxisLabels<'a> {
    /// One label per equal-width slot (bar sections, line rows).
    Categories(&'a [String]),
    /// A numeric axis with labels centred on evenly spaced ticks (scatter).
    Numeric(&'a AxisSpec),
}

/// A label with its final frame.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLabel {
    /// Label text.
    pub text: String,
    /// Frame in view coordinates.
    pub frame: Rect,
    /// Alignment inside `frame`.
    pub align: TextAlign,
}

/// Axis, label and plot geometry for one reload.
#[derive(Clone, Debug, PartialEq)]
pub struct CartesianLayout {
    /// The y axis line, `axis_width` wide.
    pub y_axis_line: Rect,
    /// The x axis line, `axis_width` tall.
    pub x_axis_line: Rect,
    /// Series area: right of the y axis, above the x axis.
    pub plot: Rect,
    /// Y value labels, `min` first.
    pub y_labels: Vec<PlacedLabel>,
    /// X labels: categories in slot order, or numeric ticks `min` first.
    pub x_labels: Vec<PlacedLabel>,
    /// Y axis title, when non-empty.
    pub y_title: Option<PlacedLabel>,
    /// X axis title, when non-empty.
    pub x_title: Option<PlacedLabel>,
}

fn max_extent(sizes: &[Size]) -> Size {
    sizes.iter().fold(Size::ZERO, |acc, s| {
        Size::new(acc.width.max(s.width), acc.height.max(s.height))
    })
}

impl CartesianLayout {
    /// Measures every label and positions axes, labels and titles in a view of `size`.
    pub fn arrange(
        measurer: &dyn TextMeasurer,
        size: Size,
        y_axis: &AxisSpec,
        x_axis: XAxisLabels<'_>,
        style: &AxisGuideStyle,
    ) -> ChartResult<Self> {
        // Pass 1: measure.
        let y_texts = y_axis.labels()?;
        let y_sizes: Vec<Size> = y_texts
            .iter()
            .map(|t| measurer.size_to_fit(t, &style.y_label_style))
            .collect();
        let x_texts = match x_axis {
            XAxisLabels::Categories(names) => names.to_vec(),
            XAxisLabels::Numeric(axis) => axis.labels()?,
        };
        let x_sizes: Vec<Size> = x_texts
            .iter()
            .map(|t| measurer.size_to_fit(t, &style.x_label_style))
            .collect();
        let y_max = max_extent(&y_sizes);
        let x_max = max_extent(&x_sizes);
        let y_title_size = measurer.size_to_fit(&style.y_title, &style.y_title_style);
        let x_title_size = measurer.size_to_fit(&style.x_title, &style.x_title_style);

        // Pass 2: axis lines relative to the measured extents.
        let axis_width = style.axis_width;
        let y_axis_x = y_max.width + MARGIN;
        let title_gap = if x_title_size.height > 0.0 {
            MARGIN * 2.0
        } else {
            MARGIN
        };
        let x_axis_y =
            size.height - x_max.height - title_gap - x_title_size.height - axis_width;
        let top = y_title_size.height + MARGIN + y_max.height / 2.0;
        let x_axis_width = match x_axis {
            XAxisLabels::Categories(_) => size.width - y_axis_x,
            // Half of the rightmost numeric label hangs past the axis end.
            XAxisLabels::Numeric(_) => {
                let last = x_sizes.last().map_or(0.0, |s| s.width);
                size.width - y_axis_x - last / 2.0
            }
        };
        let x_axis_end = y_axis_x + x_axis_width;

        let y_axis_line = Rect::new(y_axis_x, top, y_axis_x + axis_width, x_axis_y);
        let x_axis_line = Rect::new(y_axis_x, x_axis_y, x_axis_end, x_axis_y + axis_width);
        let plot = Rect::new(y_axis_x + axis_width, top, x_axis_end, x_axis_y);
        trace!(?plot, y_axis_x, x_axis_y, "cartesian layout");

        let y_labels = y_axis
            .layout(AxisDirection::Vertical, plot.y0, plot.y1)?
            .into_iter()
            .zip(&y_sizes)
            .map(|(tick, s)| PlacedLabel {
                text: tick.text,
                frame: Rect::new(
                    y_axis_x - MARGIN - s.width,
                    tick.position - s.height / 2.0,
                    y_axis_x - MARGIN,
                    tick.position + s.height / 2.0,
                ),
                align: TextAlign::Right,
            })
            .collect();

        let label_top = x_axis_y + axis_width + MARGIN;
        let x_labels = match x_axis {
            XAxisLabels::Categories(_) => {
                let slot = slot_width(plot, x_texts.len());
                x_texts
                    .into_iter()
                    .zip(&x_sizes)
                    .enumerate()
                    .map(|(i, (text, s))| {
                        let x0 = plot.x0 + slot * i as f64;
                        PlacedLabel {
                            text,
                            frame: Rect::new(x0, label_top, x0 + slot, label_top + s.height),
                            align: TextAlign::Center,
                        }
                    })
                    .collect()
            }
            XAxisLabels::Numeric(axis) => axis
                .layout(AxisDirection::Horizontal, plot.x0, plot.x1)?
                .into_iter()
                .zip(&x_sizes)
                .map(|(tick, s)| PlacedLabel {
                    text: tick.text,
                    frame: Rect::new(
                        tick.position - s.width / 2.0,
                        label_top,
                        tick.position + s.width / 2.0,
                        label_top + s.height,
                    ),
                    align: TextAlign::Center,
                })
                .collect(),
        };

        let y_title = (!style.y_title.is_empty()).then(|| PlacedLabel {
            text: style.y_title.clone(),
            frame: Rect::new(
                y_axis_x - y_title_size.width / 2.0,
                0.0,
                y_axis_x + y_title_size.width / 2.0,
                y_title_size.height,
            ),
            align: TextAlign::Center,
        });
        let x_title = (!style.x_title.is_empty()).then(|| PlacedLabel {
            text: style.x_title.clone(),
            frame: Rect::new(
                y_axis_x,
                size.height - x_title_size.height,
                x_axis_end,
                size.height,
            ),
            align: TextAlign::Center,
        });

        Ok(Self {
            y_axis_line,
            x_axis_line,
            plot,
            y_labels,
            x_labels,
            y_title,
            x_title,
        })
    }

    /// Width of one category slot.
    pub fn slot_width(&self) -> f64 {
        slot_width(self.plot, self.x_labels.len())
    }

    /// Horizontal centre of category slot `index`.
    pub fn slot_center(&self, index: usize) -> f64 {
        self.plot.x0 + self.slot_width() * (index as f64 + 0.5)
    }

    /// Vertical centres of the y labels, `min` first; gridlines sit here.
    pub fn y_tick_positions(&self) -> impl Iterator<Item = f64> + '_ {
        self.y_labels.iter().map(|l| l.frame.center().y)
    }
}

/// Vertical position of `value` in `plot`: `axis.min` on the bottom edge,
/// `axis.max` on the top edge. Non-finite offsets land on the top edge.
pub(crate) fn plot_y(plot: Rect, axis: &AxisSpec, value: f64) -> f64 {
    let height = plot.height();
    let ratio = (value - axis.min) / axis.span();
    plot.y0 + finite_or_zero(height - ratio * height)
}

fn slot_width(plot: Rect, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    plot.width() / count as f64
}
