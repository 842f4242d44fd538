// Copyright 2025 the AMChart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis value labels.
//!
//! An [`AxisSpec`] is a linear range split into `tick_count` evenly spaced
//! labels. It is validated once per reload and then used to produce label
//! text, label positions along an axis line, and the value-to-fraction mapping
//! shared by every path builder.

use alloc::string::String;
use alloc::vec::Vec;

use crate::chart::finite_or_zero;
use crate::error::{ChartResult, ConfigError};
use crate::format::DecimalPlaces;

/// Which way an axis runs on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisDirection {
    /// Left to right, `min` at the left end.
    Horizontal,
    /// Bottom to top, `min` at the bottom end.
    Vertical,
}

/// A linear value range with evenly spaced labels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisSpec {
    /// Value at the first label.
    pub min: f64,
    /// Value at the last label.
    pub max: f64,
    /// Number of labels, including both ends.
    pub tick_count: usize,
    /// Fractional digits in label text.
    pub decimal_places: DecimalPlaces,
}

/// One positioned axis label.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    /// Domain value.
    pub value: f64,
    /// Formatted label text.
    pub text: String,
    /// Screen coordinate along the axis (x for horizontal, y for vertical).
    pub position: f64,
}

impl AxisSpec {
    /// Creates a spec with integer labels.
    pub const fn new(min: f64, max: f64, tick_count: usize) -> Self {
        Self {
            min,
            max,
            tick_count,
            decimal_places: DecimalPlaces::Zero,
        }
    }

    /// Sets the label precision.
    pub fn with_decimal_places(mut self, decimal_places: DecimalPlaces) -> Self {
        self.decimal_places = decimal_places;
        self
    }

    /// Sets the range.
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Sets the label count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Checks `tick_count >= 2` and `min < max`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_count < 2 {
            return Err(ConfigError::TickCount {
                count: self.tick_count,
            });
        }
        if self.min.is_nan() || self.max.is_nan() || self.min >= self.max {
            return Err(ConfigError::Range {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// `max - min`.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Position of `value` in the range, `0` at `min` and `1` at `max`.
    ///
    /// Values outside the range map outside `[0, 1]`; non-finite results map to `0`.
    pub fn fraction(&self, value: f64) -> f64 {
        finite_or_zero((value - self.min) / self.span())
    }

    /// Label values from `min` to `max`, evenly spaced.
    ///
    /// Each value is computed from its index so the last one is exactly `max`.
    pub fn values(&self) -> ChartResult<Vec<f64>> {
        self.validate()?;
        let last = self.tick_count - 1;
        let step = self.span() / last as f64;
        Ok((0..self.tick_count)
            .map(|i| if i == last { self.max } else { self.min + step * i as f64 })
            .collect())
    }

    /// Label text from `min` to `max`.
    pub fn labels(&self) -> ChartResult<Vec<String>> {
        Ok(self
            .values()?
            .into_iter()
            .map(|v| self.decimal_places.format(v))
            .collect())
    }

    /// Positions labels along an axis line running from `start` to `end`.
    ///
    /// Horizontal axes put `min` at `start`. Vertical axes take `start` as the
    /// top and `end` as the bottom, and put `min` at the bottom. Ticks are
    /// returned in value order either way.
    pub fn layout(&self, direction: AxisDirection, start: f64, end: f64) -> ChartResult<Vec<AxisTick>> {
        let values = self.values()?;
        let space = (end - start) / (self.tick_count - 1) as f64;
        Ok(values
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                let offset = space * i as f64;
                let position = match direction {
                    AxisDirection::Horizontal => start + offset,
                    AxisDirection::Vertical => end - offset,
                };
                AxisTick {
                    value,
                    text: self.decimal_places.format(value),
                    position,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::error::ChartError;

    #[test]
    fn six_labels_from_zero_to_thousand() {
        let axis = AxisSpec::new(0.0, 1000.0, 6);
        let labels = axis.labels().expect("valid axis");
        assert_eq!(labels, ["0", "200", "400", "600", "800", "1000"]);
    }

    #[test]
    fn last_value_is_exactly_max() {
        let axis = AxisSpec::new(0.1, 0.7, 7);
        let values = axis.values().expect("valid axis");
        assert_eq!(values.first().copied(), Some(0.1));
        assert_eq!(values.last().copied(), Some(0.7));
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn too_few_ticks_is_rejected_not_nan() {
        let axis = AxisSpec::new(0.0, 10.0, 1);
        assert_eq!(
            axis.labels(),
            Err(ChartError::InvalidConfiguration(ConfigError::TickCount { count: 1 }))
        );
    }

    #[test]
    fn empty_range_is_rejected() {
        assert!(AxisSpec::new(5.0, 5.0, 3).validate().is_err());
        assert!(AxisSpec::new(6.0, 5.0, 3).validate().is_err());
        assert!(AxisSpec::new(f64::NAN, 5.0, 3).validate().is_err());
    }

    #[test]
    fn vertical_layout_puts_min_at_bottom() {
        let axis = AxisSpec::new(0.0, 100.0, 3).with_decimal_places(DecimalPlaces::One);
        let ticks = axis
            .layout(AxisDirection::Vertical, 10.0, 110.0)
            .expect("valid axis");
        let pos: std::vec::Vec<f64> = ticks.iter().map(|t| t.position).collect();
        assert_eq!(pos, [110.0, 60.0, 10.0]);
        assert_eq!(ticks[2].text, "100.0");
    }

    #[test]
    fn horizontal_layout_is_ascending() {
        let axis = AxisSpec::new(-1.0, 1.0, 5);
        let ticks = axis
            .layout(AxisDirection::Horizontal, 0.0, 40.0)
            .expect("valid axis");
        let pos: std::vec::Vec<f64> = ticks.iter().map(|t| t.position).collect();
        assert_eq!(pos, [0.0, 10.0, 20.0, 30.0, 40.0]);
        assert_eq!(ticks[0].text, "-1");
        assert_eq!(ticks[2].text, "0");
    }

    #[test]
    fn fraction_maps_range_to_unit_interval() {
        let axis = AxisSpec::new(0.0, 100.0, 6);
        assert_eq!(axis.fraction(50.0), 0.5);
        assert_eq!(axis.fraction(0.0), 0.0);
        assert_eq!(axis.fraction(f64::NAN), 0.0);
    }
}
