// Copyright 2025 the AMChart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render output and host contracts for AMChart chart views.
//!
//! Chart engines in `amchart_charts` never talk to a UI toolkit directly. They
//! produce values from this crate instead:
//! - a [`Scene`]: z-ordered shape layers (vector paths with fill/stroke) and text labels,
//! - [`Transition`]s: explicit `(start, target)` path pairs handed to an [`Animator`],
//! - text measurement requests through [`TextMeasurer`] (the "size to fit" step of layout).
//!
//! Compositing, font rasterization and animation timing live in the host.

#![no_std]

extern crate alloc;

mod animation;
mod scene;
mod text;

pub use animation::{
    Animator, NoopAnimator, PathPair, Sweep, Timing, Transition, TransitionLog, Tween, WedgeFrame,
};
pub use scene::{LayerId, Primitive, Scene, ShapeLayer, StrokeStyle, TextAlign, TextLabel};
pub use text::{FontWeight, HeuristicTextMeasurer, TextMeasurer, TextMetrics, TextStyle};
