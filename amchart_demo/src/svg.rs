// Copyright 2025 the AMChart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump of an `amchart_core::Scene`.

use amchart_core::{Primitive, Scene, ShapeLayer, StrokeStyle, TextAlign, TextLabel};
use kurbo::{Cap, Join, Size};
use peniko::Brush;

/// Serializes `scene` in painter order into a standalone SVG document of `size`.
pub(crate) fn scene_to_svg(scene: &Scene, size: Size) -> String {
    let mut out = String::new();
    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
    out.push_str(&format!(
        r#"viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
        w = size.width,
        h = size.height,
    ));
    out.push('\n');
    out.push_str(r##"<rect width="100%" height="100%" fill="#ffffff"/>"##);
    out.push('\n');

    for primitive in scene.painter_order() {
        match primitive {
            Primitive::Shape(shape) => write_shape(&mut out, shape),
            Primitive::Text(label) => write_text(&mut out, label),
        }
    }

    out.push_str("</svg>\n");
    out
}

fn write_shape(out: &mut String, shape: &ShapeLayer) {
    out.push_str(&format!(r#"<path d="{}""#, shape.path.to_svg()));
    write_paint_attr(out, "fill", &shape.fill);
    if let Some(stroke) = &shape.stroke {
        write_stroke_attrs(out, stroke);
    }
    out.push_str("/>\n");
}

fn write_stroke_attrs(out: &mut String, style: &StrokeStyle) {
    write_paint_attr(out, "stroke", &style.brush);
    let stroke = &style.stroke;
    out.push_str(&format!(r#" stroke-width="{}""#, stroke.width));
    out.push_str(match stroke.join {
        Join::Bevel => r#" stroke-linejoin="bevel""#,
        Join::Miter => r#" stroke-linejoin="miter""#,
        Join::Round => r#" stroke-linejoin="round""#,
    });
    out.push_str(match stroke.start_cap {
        Cap::Butt => "",
        Cap::Square => r#" stroke-linecap="square""#,
        Cap::Round => r#" stroke-linecap="round""#,
    });
    if !stroke.dash_pattern.is_empty() {
        let dashes: Vec<String> = stroke.dash_pattern.iter().map(f64::to_string).collect();
        out.push_str(&format!(r#" stroke-dasharray="{}""#, dashes.join(" ")));
    }
}

fn write_text(out: &mut String, label: &TextLabel) {
    let (x, anchor) = match label.align {
        TextAlign::Left => (label.frame.x0, "start"),
        TextAlign::Center => (label.frame.center().x, "middle"),
        TextAlign::Right => (label.frame.x1, "end"),
    };
    out.push_str(&format!(
        r#"<text x="{x}" y="{y}" font-size="{size}" font-weight="{weight}" text-anchor="{anchor}" dominant-baseline="middle""#,
        y = label.frame.center().y,
        size = label.style.font_size,
        weight = label.style.font_weight.0,
    ));
    write_paint_attr(out, "fill", &label.fill);
    out.push('>');
    out.push_str(&escape_xml(&label.text));
    out.push_str("</text>\n");
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            if rgba.a == 0 {
                return ("none".to_string(), None);
            }
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = (rgba.a != 255).then(|| f64::from(rgba.a) / 255.0);
            (fill, opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
