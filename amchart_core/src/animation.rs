// Copyright 2025 the AMChart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition contract between chart engines and the host animator.
//!
//! Engines never mutate a live layer over time. Each reload hands the host one
//! [`Transition`] per animated layer, carrying an explicit `(start, target)`
//! [`PathPair`]. Hosts with native path animation use the pair directly; others
//! can sample [`Transition::sample`] per frame.

use alloc::vec::Vec;
use core::time::Duration;

use kurbo::{BezPath, Circle, PathEl, Point, Shape};

use crate::scene::LayerId;

/// Timing curve of a transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Timing {
    /// Constant speed.
    #[default]
    Linear,
    /// Decelerating.
    EaseOut,
}

impl Timing {
    /// Maps linear progress `t` (clamped to `[0, 1]`) to eased progress.
    ///
    /// `EaseOut` is the quadratic `1 - (1 - t)^2`; hosts with their own curves
    /// should ignore this and use the variant as a hint.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv
            }
        }
    }
}

/// The endpoints of one animated path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathPair {
    /// Path at progress 0.
    pub start: BezPath,
    /// Path at progress 1; also the committed path after the reload.
    pub target: BezPath,
}

impl PathPair {
    /// Creates a pair.
    pub fn new(start: BezPath, target: BezPath) -> Self {
        Self { start, target }
    }

    /// A pair with identical endpoints.
    pub fn settled(path: BezPath) -> Self {
        Self {
            start: path.clone(),
            target: path,
        }
    }

    /// Whether `start` and `target` have the same element kinds in the same order.
    pub fn is_compatible(&self) -> bool {
        let a = self.start.elements();
        let b = self.target.elements();
        a.len() == b.len()
            && a.iter().zip(b).all(|(x, y)| {
                matches!(
                    (x, y),
                    (PathEl::MoveTo(_), PathEl::MoveTo(_))
                        | (PathEl::LineTo(_), PathEl::LineTo(_))
                        | (PathEl::QuadTo(..), PathEl::QuadTo(..))
                        | (PathEl::CurveTo(..), PathEl::CurveTo(..))
                        | (PathEl::ClosePath, PathEl::ClosePath)
                )
            })
    }

    /// Lerps every control point at progress `t`.
    ///
    /// Paths with different structure cannot be blended; they snap to `target`.
    /// Progress at or past either end returns that endpoint unchanged.
    pub fn interpolate(&self, t: f64) -> BezPath {
        if t <= 0.0 && self.is_compatible() {
            return self.start.clone();
        }
        if t >= 1.0 || !self.is_compatible() {
            return self.target.clone();
        }
        let els = self
            .start
            .elements()
            .iter()
            .zip(self.target.elements())
            .map(|(a, b)| match (*a, *b) {
                (PathEl::MoveTo(p0), PathEl::MoveTo(p1)) => PathEl::MoveTo(p0.lerp(p1, t)),
                (PathEl::LineTo(p0), PathEl::LineTo(p1)) => PathEl::LineTo(p0.lerp(p1, t)),
                (PathEl::QuadTo(a0, a1), PathEl::QuadTo(b0, b1)) => {
                    PathEl::QuadTo(a0.lerp(b0, t), a1.lerp(b1, t))
                }
                (PathEl::CurveTo(a0, a1, a2), PathEl::CurveTo(b0, b1, b2)) => {
                    PathEl::CurveTo(a0.lerp(b0, t), a1.lerp(b1, t), a2.lerp(b2, t))
                }
                _ => *b,
            })
            .collect::<Vec<_>>();
        BezPath::from_vec(els)
    }
}

/// Start and end angle of a wedge, in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sweep {
    /// Angle where the wedge starts.
    pub start_angle: f64,
    /// Angle where the wedge ends.
    pub end_angle: f64,
}

impl Sweep {
    /// Creates a sweep.
    pub const fn new(start_angle: f64, end_angle: f64) -> Self {
        Self {
            start_angle,
            end_angle,
        }
    }

    /// Angular extent.
    pub fn extent(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Angle halfway between start and end.
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) * 0.5
    }

    /// Linear blend toward `other`.
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            start_angle: self.start_angle + (other.start_angle - self.start_angle) * t,
            end_angle: self.end_angle + (other.end_angle - self.end_angle) * t,
        }
    }
}

/// The circle a wedge is cut from.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WedgeFrame {
    /// Circle centre.
    pub center: Point,
    /// Outer radius.
    pub radius: f64,
    /// Inner radius; zero for a full wedge.
    pub hole_radius: f64,
}

impl WedgeFrame {
    const TOLERANCE: f64 = 0.1;

    /// Creates a frame.
    pub const fn new(center: Point, radius: f64, hole_radius: f64) -> Self {
        Self {
            center,
            radius,
            hole_radius,
        }
    }

    /// The wedge covering `sweep`: from the hole edge (or the centre) out to
    /// the rim, around the arc, and back along the hole.
    pub fn path(&self, sweep: Sweep) -> BezPath {
        Circle::new(self.center, self.radius)
            .segment(self.hole_radius, sweep.start_angle, sweep.extent())
            .path_elements(Self::TOLERANCE)
            .collect()
    }
}

/// What kind of motion a transition describes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tween {
    /// Blend control points from `start` to `target`.
    Morph,
    /// Draw `target` progressively along its length (stroke end 0 to 1).
    Reveal,
    /// Sweep a wedge's angles; every frame is the wedge rebuilt from the
    /// blended angles, since wedges of different extent do not share a
    /// path structure.
    Sweep {
        /// Angles at progress 0.
        from: Sweep,
        /// Angles at progress 1.
        to: Sweep,
        /// Circle the wedge is cut from.
        frame: WedgeFrame,
    },
}

/// One animated layer update handed to the host.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// Layer being animated.
    pub layer: LayerId,
    /// Motion kind.
    pub tween: Tween,
    /// Path endpoints.
    pub paths: PathPair,
    /// Total duration.
    pub duration: Duration,
    /// Timing curve.
    pub timing: Timing,
}

impl Transition {
    /// Creates a morph transition.
    pub fn morph(layer: LayerId, paths: PathPair, duration: Duration, timing: Timing) -> Self {
        Self {
            layer,
            tween: Tween::Morph,
            paths,
            duration,
            timing,
        }
    }

    /// Creates a stroke reveal of `target`.
    pub fn reveal(layer: LayerId, target: BezPath, duration: Duration, timing: Timing) -> Self {
        Self {
            layer,
            tween: Tween::Reveal,
            paths: PathPair::settled(target),
            duration,
            timing,
        }
    }

    /// Creates a sweep of the wedge cut from `frame`, from `from` to `to`.
    pub fn sweep(
        layer: LayerId,
        frame: WedgeFrame,
        from: Sweep,
        to: Sweep,
        duration: Duration,
        timing: Timing,
    ) -> Self {
        Self {
            layer,
            tween: Tween::Sweep { from, to, frame },
            paths: PathPair::new(frame.path(from), frame.path(to)),
            duration,
            timing,
        }
    }

    /// The path to show at linear progress `t`.
    ///
    /// Reveals always return the full target; trim it with [`Self::stroke_end`].
    /// Sweeps rebuild the wedge from [`Self::sweep_at`].
    pub fn sample(&self, t: f64) -> BezPath {
        let eased = self.timing.apply(t);
        match self.tween {
            Tween::Reveal => self.paths.target.clone(),
            Tween::Morph => self.paths.interpolate(eased),
            Tween::Sweep { .. } if eased >= 1.0 => self.paths.target.clone(),
            Tween::Sweep { from, to, frame } => frame.path(from.lerp(&to, eased)),
        }
    }

    /// Fraction of the stroke that is visible at linear progress `t`.
    pub fn stroke_end(&self, t: f64) -> f64 {
        match self.tween {
            Tween::Reveal => self.timing.apply(t),
            Tween::Morph | Tween::Sweep { .. } => 1.0,
        }
    }

    /// Blended wedge angles at linear progress `t`, for sweep transitions.
    pub fn sweep_at(&self, t: f64) -> Option<Sweep> {
        match self.tween {
            Tween::Sweep { from, to, .. } => Some(from.lerp(&to, self.timing.apply(t))),
            Tween::Morph | Tween::Reveal => None,
        }
    }
}

/// The host-side animation driver.
pub trait Animator {
    /// Starts `transition`, replacing any in-flight animation on the same layer.
    fn animate(&mut self, transition: &Transition);
}

/// An animator that drops every transition; layers simply show their target.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopAnimator;

impl Animator for NoopAnimator {
    fn animate(&mut self, _transition: &Transition) {}
}

/// An animator that records transitions, for tests and offline rendering.
#[derive(Clone, Debug, Default)]
pub struct TransitionLog {
    transitions: Vec<Transition>,
}

impl TransitionLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded transitions in hand-off order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// The most recent transition for `layer`.
    pub fn last_for(&self, layer: LayerId) -> Option<&Transition> {
        self.transitions.iter().rev().find(|t| t.layer == layer)
    }

    /// Number of recorded transitions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Drains the log.
    pub fn take(&mut self) -> Vec<Transition> {
        core::mem::take(&mut self.transitions)
    }
}

impl Animator for TransitionLog {
    fn animate(&mut self, transition: &Transition) {
        self.transitions.push(transition.clone());
    }
}
