// Copyright 2025 the AMChart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render tree produced by a chart reload.
//!
//! A [`Scene`] is the only output format of the chart engines: a flat list of
//! [`Primitive`]s that the host attaches to its own view/layer hierarchy. Each
//! primitive carries a stable [`LayerId`] so transitions can address it, and a
//! `z_index`; hosts paint in `(z_index, id)` order.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{BezPath, Point, Rect, Shape, Stroke};
use peniko::{Brush, Color};

use crate::text::TextStyle;

/// Stable identity of a primitive within a chart's scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u64);

impl LayerId {
    /// Wraps a raw id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns `base + index`, the id scheme used for per-section and per-row layers.
    pub const fn for_index(base: u64, index: usize) -> Self {
        Self(base + index as u64)
    }
}

/// Paint plus kurbo stroke parameters (width, joins, caps, dashes).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke geometry parameters.
    pub stroke: Stroke,
}

impl StrokeStyle {
    /// A solid stroke with default joins and caps.
    pub fn solid(brush: impl Into<Brush>, width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke: Stroke::new(width),
        }
    }

    /// Replaces the stroke parameters.
    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = stroke;
        self
    }

    /// Stroke width.
    pub fn width(&self) -> f64 {
        self.stroke.width
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(Color::BLACK, 1.0)
    }
}

/// A vector path with fill and optional stroke.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeLayer {
    /// Stable id.
    pub id: LayerId,
    /// Geometry in view coordinates.
    pub path: BezPath,
    /// Fill paint; transparent for outline-only shapes.
    pub fill: Brush,
    /// Optional outline.
    pub stroke: Option<StrokeStyle>,
    /// Paint order hint.
    pub z_index: i32,
}

impl ShapeLayer {
    /// Creates an unfilled, unstroked layer.
    pub fn new(id: LayerId, path: BezPath) -> Self {
        Self {
            id,
            path,
            fill: Brush::Solid(Color::TRANSPARENT),
            stroke: None,
            z_index: 0,
        }
    }

    /// A filled axis-aligned rectangle, the way axis lines and gridlines are drawn.
    pub fn filled_rect(id: LayerId, rect: Rect, fill: impl Into<Brush>) -> Self {
        Self::new(id, rect.to_path(0.1)).with_fill(fill)
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the outline.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Sets the paint order hint.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Bounding box of the path, ignoring stroke width.
    pub fn bounds(&self) -> Rect {
        self.path.bounding_box()
    }
}

/// Horizontal alignment of text inside its frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAlign {
    /// Flush left.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}

/// A single-line text label placed in a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLabel {
    /// Stable id.
    pub id: LayerId,
    /// Unshaped text.
    pub text: String,
    /// Label frame in view coordinates.
    pub frame: Rect,
    /// Font parameters.
    pub style: TextStyle,
    /// Text color.
    pub fill: Brush,
    /// Alignment inside `frame`.
    pub align: TextAlign,
    /// Paint order hint.
    pub z_index: i32,
}

impl TextLabel {
    /// Creates a black, left-aligned label.
    pub fn new(id: LayerId, text: impl Into<String>, frame: Rect) -> Self {
        Self {
            id,
            text: text.into(),
            frame,
            style: TextStyle::default(),
            fill: Brush::Solid(Color::BLACK),
            align: TextAlign::Left,
            z_index: 0,
        }
    }

    /// Sets the font parameters.
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the text color.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the alignment.
    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Sets the paint order hint.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Center of the label frame.
    pub fn center(&self) -> Point {
        self.frame.center()
    }
}

/// One drawable element of a [`Scene`].
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// A filled and/or stroked path.
    Shape(ShapeLayer),
    /// A text label.
    Text(TextLabel),
}

impl Primitive {
    /// Stable id.
    pub fn id(&self) -> LayerId {
        match self {
            Self::Shape(s) => s.id,
            Self::Text(t) => t.id,
        }
    }

    /// Paint order hint.
    pub fn z_index(&self) -> i32 {
        match self {
            Self::Shape(s) => s.z_index,
            Self::Text(t) => t.z_index,
        }
    }

    /// Bounds in view coordinates.
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Shape(s) => s.bounds(),
            Self::Text(t) => t.frame,
        }
    }
}

impl From<ShapeLayer> for Primitive {
    fn from(value: ShapeLayer) -> Self {
        Self::Shape(value)
    }
}

impl From<TextLabel> for Primitive {
    fn from(value: TextLabel) -> Self {
        Self::Text(value)
    }
}

/// The full render output of a chart.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    primitives: Vec<Primitive>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every primitive.
    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    /// Appends a primitive.
    pub fn push(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    /// Number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Whether the scene has no primitives.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Primitives in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter()
    }

    /// Primitives sorted by `(z_index, id)`, the order hosts should paint in.
    pub fn painter_order(&self) -> Vec<&Primitive> {
        let mut out: Vec<&Primitive> = self.primitives.iter().collect();
        out.sort_by_key(|p| (p.z_index(), p.id()));
        out
    }

    /// All shape layers in insertion order.
    pub fn shapes(&self) -> impl Iterator<Item = &ShapeLayer> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Shape(s) => Some(s),
            Primitive::Text(_) => None,
        })
    }

    /// All text labels in insertion order.
    pub fn texts(&self) -> impl Iterator<Item = &TextLabel> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text(t) => Some(t),
            Primitive::Shape(_) => None,
        })
    }

    /// Looks up a shape layer by id.
    pub fn shape(&self, id: LayerId) -> Option<&ShapeLayer> {
        self.shapes().find(|s| s.id == id)
    }

    /// Looks up a shape layer by id for in-place updates (selection offsets).
    pub fn shape_mut(&mut self, id: LayerId) -> Option<&mut ShapeLayer> {
        self.primitives.iter_mut().find_map(|p| match p {
            Primitive::Shape(s) if s.id == id => Some(s),
            _ => None,
        })
    }

    /// Looks up a text label by id.
    pub fn text(&self, id: LayerId) -> Option<&TextLabel> {
        self.texts().find(|t| t.id == id)
    }

    /// Union of all primitive bounds, or `None` for an empty scene.
    pub fn bounds(&self) -> Option<Rect> {
        self.primitives
            .iter()
            .map(Primitive::bounds)
            .reduce(|a, b| a.union(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peniko::color::palette::css;

    #[test]
    fn painter_order_sorts_by_z_then_id() {
        let mut scene = Scene::new();
        scene.push(TextLabel::new(LayerId(5), "label", Rect::new(0.0, 0.0, 10.0, 10.0)).with_z_index(40));
        scene.push(
            ShapeLayer::filled_rect(LayerId(9), Rect::new(0.0, 0.0, 1.0, 1.0), css::BLACK)
                .with_z_index(-50),
        );
        scene.push(
            ShapeLayer::filled_rect(LayerId(2), Rect::new(0.0, 0.0, 1.0, 1.0), css::BLACK)
                .with_z_index(-50),
        );

        let ids: Vec<u64> = scene.painter_order().iter().map(|p| p.id().0).collect();
        assert_eq!(ids, [2, 9, 5]);
    }

    #[test]
    fn lookups_and_bounds() {
        let mut scene = Scene::new();
        assert!(scene.bounds().is_none());
        scene.push(ShapeLayer::filled_rect(
            LayerId(1),
            Rect::new(10.0, 10.0, 20.0, 20.0),
            css::TOMATO,
        ));
        scene.push(TextLabel::new(LayerId(2), "x", Rect::new(0.0, 30.0, 5.0, 40.0)));

        assert_eq!(scene.shape(LayerId(1)).map(|s| s.fill.clone()), Some(css::TOMATO.into()));
        assert!(scene.shape(LayerId(2)).is_none());
        assert_eq!(scene.text(LayerId(2)).map(|t| t.text.as_str()), Some("x"));
        assert_eq!(scene.bounds(), Some(Rect::new(0.0, 10.0, 20.0, 40.0)));

        scene.shape_mut(LayerId(1)).expect("shape").fill = css::BLACK.into();
        assert_eq!(scene.shape(LayerId(1)).map(|s| s.fill.clone()), Some(css::BLACK.into()));

        scene.clear();
        assert!(scene.is_empty());
    }
}
