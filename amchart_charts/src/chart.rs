// Copyright 2025 the AMChart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The reload contract shared by every chart engine.

use amchart_core::{Animator, LayerId, Scene, TextMeasurer, Transition};
use kurbo::Size;
use tracing::{trace, warn};

use crate::error::ChartError;

/// Lifecycle of a chart view.
///
/// A reload always passes through `LaidOut`. It ends in `Animating` when
/// transitions were handed to the animator, otherwise in `Idle`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChartState {
    /// Never reloaded.
    #[default]
    Uninitialized,
    /// Geometry computed for the current reload.
    LaidOut,
    /// Transitions are in flight in the host.
    Animating,
    /// Nothing in flight.
    Idle,
}

/// Address of one value: `section` is the series, `row` the position in it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexPath {
    /// Series index.
    pub section: usize,
    /// Value index within the series.
    pub row: usize,
}

impl IndexPath {
    /// Creates an index path.
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }
}

/// Host services used during a reload.
pub struct ReloadEnv<'a> {
    /// Measures labels for the first layout pass.
    pub measurer: &'a dyn TextMeasurer,
    /// Receives the transitions of the reload.
    pub animator: &'a mut dyn Animator,
}

impl core::fmt::Debug for ReloadEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReloadEnv").finish_non_exhaustive()
    }
}

impl<'a> ReloadEnv<'a> {
    /// Bundles a measurer and an animator.
    pub fn new(measurer: &'a dyn TextMeasurer, animator: &'a mut dyn Animator) -> Self {
        Self { measurer, animator }
    }
}

/// A chart view: pulls data from its source on reload and exposes a [`Scene`].
pub trait ChartView {
    /// The data-source trait object this chart pulls from.
    type Source: ?Sized;

    /// Rebuilds the scene for a view of `size`.
    ///
    /// `None` clears the scene and is not an error. A failed precondition
    /// returns `Err` before any path is built; committed series geometry is
    /// left as it was.
    fn reload(
        &mut self,
        size: Size,
        source: Option<&Self::Source>,
        env: &mut ReloadEnv<'_>,
    ) -> Result<(), ChartError>;

    /// The scene produced by the last reload.
    fn scene(&self) -> &Scene;

    /// Current lifecycle state.
    fn state(&self) -> ChartState;

    /// Tells the chart the host finished every in-flight transition.
    fn finish_animations(&mut self);
}

/// Maps non-finite ratios (zero denominators, NaN inputs) to `0.0`.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        trace!(value, "clamped non-finite value to zero");
        0.0
    }
}

pub(crate) const Y_AXIS_LINE: LayerId = LayerId(1);
pub(crate) const X_AXIS_LINE: LayerId = LayerId(2);
pub(crate) const Y_AXIS_TITLE: LayerId = LayerId(3);
pub(crate) const X_AXIS_TITLE: LayerId = LayerId(4);
pub(crate) const CENTER_LABEL: LayerId = LayerId(5);
pub(crate) const RADAR_GRID: LayerId = LayerId(6);

pub(crate) const GRID_LINE_BASE: u64 = 100;
pub(crate) const Y_LABEL_BASE: u64 = 1_000;
pub(crate) const X_LABEL_BASE: u64 = 2_000;
pub(crate) const VERTEX_LABEL_BASE: u64 = 3_000;
pub(crate) const AXIS_LABEL_BASE: u64 = 4_000;

const SERIES_BASE: u64 = 1 << 20;
const ROW_STRIDE: u64 = 1 << 16;

/// Layer id of a series shape.
///
/// Bar segments use one layer per `(section, row)`. Line, radar and scatter
/// series use `row == 0`, and pie wedges use `row == 0` with the wedge index as
/// `section`.
pub fn series_layer(section: usize, row: usize) -> LayerId {
    LayerId(SERIES_BASE + section as u64 * ROW_STRIDE + row as u64)
}

/// Hands `transitions` to the animator and returns the resulting state.
pub(crate) fn hand_off(transitions: &[Transition], animator: &mut dyn Animator) -> ChartState {
    if transitions.is_empty() {
        return ChartState::Idle;
    }
    for t in transitions {
        animator.animate(t);
    }
    ChartState::Animating
}

/// Logs a rejected reload and passes the error through.
pub(crate) fn rejected(chart: &'static str, error: ChartError) -> ChartError {
    warn!(chart, error = %error, "reload rejected");
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use amchart_core::{PathPair, Timing, TransitionLog};
    use core::time::Duration;

    #[test]
    fn non_finite_ratios_become_zero() {
        assert_eq!(finite_or_zero(f64::NAN), 0.0);
        assert_eq!(finite_or_zero(f64::INFINITY), 0.0);
        assert_eq!(finite_or_zero(-0.25), -0.25);
    }

    #[test]
    fn series_layers_do_not_collide() {
        assert_ne!(series_layer(0, 1), series_layer(1, 0));
        assert!(series_layer(0, 0).0 > AXIS_LABEL_BASE + 1_000);
    }

    #[test]
    fn hand_off_sets_state() {
        let mut log = TransitionLog::new();
        assert_eq!(hand_off(&[], &mut log), ChartState::Idle);
        let t = Transition::morph(
            series_layer(0, 0),
            PathPair::default(),
            Duration::from_millis(600),
            Timing::EaseOut,
        );
        assert_eq!(hand_off(&[t], &mut log), ChartState::Animating);
        assert_eq!(log.len(), 1);
    }
}
