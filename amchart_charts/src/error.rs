// Copyright 2025 the AMChart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Result alias used by every reload and layout entry point.
pub type ChartResult<T> = Result<T, ChartError>;

/// A configuration precondition that makes a reload impossible.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Fewer than two axis labels.
    #[error("axis needs at least 2 labels, got {count}")]
    TickCount {
        /// Configured label count.
        count: usize,
    },
    /// The axis range is empty or inverted.
    #[error("axis range is empty: min={min}, max={max}")]
    Range {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },
    /// A bar chart axis maximum below zero.
    #[error("bar axis max must not be negative, got {max}")]
    NegativeMax {
        /// Configured maximum.
        max: f64,
    },
    /// Radar charts need a polygon.
    #[error("radar chart needs at least 3 rows, got {rows}")]
    RadarRows {
        /// Row count reported by the data source.
        rows: usize,
    },
    /// The data source reported zero sections.
    #[error("chart has no sections")]
    NoSections,
    /// The data source reported zero rows.
    #[error("chart has no rows")]
    NoRows,
}

/// Errors returned by chart reloads.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ChartError {
    /// The configuration or data-source counts violate a precondition.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// A data value violates a precondition.
    #[error("invalid data at section {section}, row {row}: {value}")]
    InvalidData {
        /// Section of the offending value.
        section: usize,
        /// Row of the offending value.
        row: usize,
        /// The value itself.
        value: f64,
    },
}
