// Copyright 2025 the Panorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG markup for a [`Scene`].
//!
//! Output is compact and deterministic: numbers are printed with at most
//! three decimals and trailing zeros stripped, attributes appear in a fixed
//! order, and identity transforms are omitted.

use alloc::format;
use alloc::string::String;
use core::fmt::Write as _;

use kurbo::{Affine, BezPath, PathEl, Point, Shape, Size};
use peniko::Color;

use crate::scene::{Node, Scene};
use crate::types::{Element, NodeId, Paint, TextAnchor};

/// SVG namespace URI.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
/// XHTML namespace URI, used for inputs inside `foreignObject`.
pub const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";
/// Attribute carrying a node's [`NodeId`] on elements a host needs to map back.
pub const NODE_ATTR: &str = "data-panorama-node";

const PATH_TOLERANCE: f64 = 0.1;

pub(crate) fn document(scene: &Scene, size: Size, view: Affine) -> String {
    let mut svg = String::new();
    let w = fmt_f64(size.width);
    let h = fmt_f64(size.height);
    let _ = write!(
        svg,
        "<svg xmlns=\"{SVG_NS}\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
    );
    let root = scene.root();
    if let Some(node) = scene.node(root) {
        write_node(scene, root, node, Some(view), &mut svg);
    }
    svg.push_str("</svg>");
    svg
}

pub(crate) fn fragment(scene: &Scene, id: NodeId) -> String {
    let mut out = String::new();
    if let Some(node) = scene.node(id) {
        write_node(scene, id, node, None, &mut out);
    }
    out
}

pub(crate) fn children(scene: &Scene, id: NodeId) -> String {
    let mut out = String::new();
    for child in scene.children(id) {
        if let Some(node) = scene.node(*child) {
            write_node(scene, *child, node, None, &mut out);
        }
    }
    out
}

/// Writes one node; `outer` is pre-multiplied into its transform (used for
/// the view transform on the root group).
fn write_node(scene: &Scene, id: NodeId, node: &Node, outer: Option<Affine>, out: &mut String) {
    let transform = match outer {
        Some(outer) => outer * node.transform,
        None => node.transform,
    };

    let mut attrs = String::new();
    if let Some(element_id) = &node.element_id {
        let _ = write!(attrs, " id=\"{}\"", escape(element_id));
    }
    if let Some(class) = &node.class {
        let _ = write!(attrs, " class=\"{}\"", escape(class));
    }
    if transform != Affine::IDENTITY {
        let _ = write!(attrs, " transform=\"{}\"", affine_to_svg_matrix(transform));
    }
    write_style(node, &mut attrs);

    match &node.element {
        Element::Group => {
            let _ = write!(out, "<g{attrs}>");
            for child in &node.children {
                if let Some(child_node) = scene.node(*child) {
                    write_node(scene, *child, child_node, None, out);
                }
            }
            out.push_str("</g>");
        }
        Element::Rect(r) => {
            let r = r.abs();
            let _ = write!(
                out,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{attrs}/>",
                fmt_f64(r.x0),
                fmt_f64(r.y0),
                fmt_f64(r.width()),
                fmt_f64(r.height()),
            );
        }
        Element::RoundedRect(rr) => {
            if let Some(radius) = rr.radii().as_single_radius() {
                let r = rr.rect();
                let _ = write!(
                    out,
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\" ry=\"{}\"{attrs}/>",
                    fmt_f64(r.x0),
                    fmt_f64(r.y0),
                    fmt_f64(r.width()),
                    fmt_f64(r.height()),
                    fmt_f64(radius),
                    fmt_f64(radius),
                );
            } else {
                let d = bez_path_to_svg_d(&rr.to_path(PATH_TOLERANCE));
                let _ = write!(out, "<path d=\"{d}\"{attrs}/>");
            }
        }
        Element::Circle(c) => {
            let _ = write!(
                out,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{attrs}/>",
                fmt_f64(c.center.x),
                fmt_f64(c.center.y),
                fmt_f64(c.radius),
            );
        }
        Element::Ellipse { center, radii } => {
            let _ = write!(
                out,
                "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\"{attrs}/>",
                fmt_f64(center.x),
                fmt_f64(center.y),
                fmt_f64(radii.x.abs()),
                fmt_f64(radii.y.abs()),
            );
        }
        Element::Line(l) => {
            let _ = write!(
                out,
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"{attrs}/>",
                fmt_f64(l.p0.x),
                fmt_f64(l.p0.y),
                fmt_f64(l.p1.x),
                fmt_f64(l.p1.y),
            );
        }
        Element::Polyline(pts) => {
            let _ = write!(out, "<polyline points=\"{}\"{attrs}/>", points_attr(pts));
        }
        Element::Polygon(pts) => {
            let _ = write!(out, "<polygon points=\"{}\"{attrs}/>", points_attr(pts));
        }
        Element::Path(p) => {
            let _ = write!(out, "<path d=\"{}\"{attrs}/>", bez_path_to_svg_d(p));
        }
        Element::Text(t) => {
            let _ = write!(
                out,
                "<text x=\"{}\" y=\"{}\" font-size=\"{}\"",
                fmt_f64(t.origin.x),
                fmt_f64(t.origin.y),
                fmt_f64(t.font_size),
            );
            match t.anchor {
                TextAnchor::Start => {}
                TextAnchor::Middle => out.push_str(" text-anchor=\"middle\""),
                TextAnchor::End => out.push_str(" text-anchor=\"end\""),
            }
            if let Some(family) = &t.font_family {
                let _ = write!(out, " font-family=\"{}\"", escape(family));
            }
            let _ = write!(out, "{attrs}>{}</text>", escape(&t.content));
        }
        Element::Input(input) => {
            let r = input.rect.abs();
            let _ = write!(
                out,
                "<foreignObject x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{attrs}>",
                fmt_f64(r.x0),
                fmt_f64(r.y0),
                fmt_f64(r.width()),
                fmt_f64(r.height()),
            );
            let _ = write!(
                out,
                "<input xmlns=\"{XHTML_NS}\" {NODE_ATTR}=\"{id}\" type=\"{}\" value=\"{}\"",
                input.kind.as_html_type(),
                escape(&input.value),
            );
            if !input.placeholder.is_empty() {
                let _ = write!(out, " placeholder=\"{}\"", escape(&input.placeholder));
            }
            if let Some(name) = &input.name {
                let _ = write!(out, " name=\"{}\"", escape(name));
            }
            out.push_str(" style=\"width:100%;height:100%;box-sizing:border-box\"/>");
            out.push_str("</foreignObject>");
        }
        Element::SymbolUse(u) => {
            let r = u.rect.abs();
            let _ = write!(
                out,
                "<use href=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{attrs}/>",
                escape(&u.href),
                fmt_f64(r.x0),
                fmt_f64(r.y0),
                fmt_f64(r.width()),
                fmt_f64(r.height()),
            );
        }
    }
}

fn write_style(node: &Node, attrs: &mut String) {
    let style = &node.style;
    write_paint(attrs, "fill", style.fill);
    write_paint(attrs, "stroke", style.stroke);
    if style.has_stroke() && style.stroke_width != 1.0 {
        let _ = write!(attrs, " stroke-width=\"{}\"", fmt_f64(style.stroke_width));
    }
    let opacity = style.opacity.clamp(0.0, 1.0);
    if opacity < 1.0 {
        let _ = write!(attrs, " opacity=\"{}\"", fmt_f32(opacity));
    }
}

fn write_paint(attrs: &mut String, name: &str, paint: Paint) {
    match paint {
        Paint::Inherit => {}
        Paint::None => {
            let _ = write!(attrs, " {name}=\"none\"");
        }
        Paint::Solid(color) => {
            let (rgb, a) = color_to_svg(color);
            let _ = write!(attrs, " {name}=\"{rgb}\"");
            if a < 1.0 {
                let _ = write!(attrs, " {name}-opacity=\"{}\"", fmt_f32(a));
            }
        }
    }
}

fn points_attr(pts: &[Point]) -> String {
    let mut s = String::new();
    for (i, p) in pts.iter().enumerate() {
        if i > 0 {
            s.push(' ');
        }
        let _ = write!(s, "{},{}", fmt_f64(p.x), fmt_f64(p.y));
    }
    s
}

fn bez_path_to_svg_d(path: &BezPath) -> String {
    let mut d = String::new();
    for el in path.iter() {
        match el {
            PathEl::MoveTo(p) => {
                let _ = write!(d, "M{} {}", fmt_f64(p.x), fmt_f64(p.y));
            }
            PathEl::LineTo(p) => {
                let _ = write!(d, "L{} {}", fmt_f64(p.x), fmt_f64(p.y));
            }
            PathEl::QuadTo(p1, p2) => {
                let _ = write!(
                    d,
                    "Q{} {} {} {}",
                    fmt_f64(p1.x),
                    fmt_f64(p1.y),
                    fmt_f64(p2.x),
                    fmt_f64(p2.y)
                );
            }
            PathEl::CurveTo(p1, p2, p3) => {
                let _ = write!(
                    d,
                    "C{} {} {} {} {} {}",
                    fmt_f64(p1.x),
                    fmt_f64(p1.y),
                    fmt_f64(p2.x),
                    fmt_f64(p2.y),
                    fmt_f64(p3.x),
                    fmt_f64(p3.y)
                );
            }
            PathEl::ClosePath => d.push('Z'),
        }
    }
    d
}

fn color_to_svg(color: Color) -> (String, f32) {
    let rgba = color.to_rgba8();
    let a = f32::from(rgba.a) / 255.0;
    (format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b), a)
}

/// Formats an affine as an SVG `matrix(...)` transform.
pub fn affine_to_svg_matrix(xf: Affine) -> String {
    // kurbo::Affine stores [a, b, c, d, e, f] corresponding to:
    // [ a c e ]
    // [ b d f ]
    // [ 0 0 1 ]
    let c = xf.as_coeffs();
    format!(
        "matrix({} {} {} {} {} {})",
        fmt_f64(c[0]),
        fmt_f64(c[1]),
        fmt_f64(c[2]),
        fmt_f64(c[3]),
        fmt_f64(c[4]),
        fmt_f64(c[5]),
    )
}

/// Escapes text for use in XML attribute values and character data.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "SVG uses f32-like scalar formatting"
)]
fn fmt_f64(v: f64) -> String {
    fmt_f32(v as f32)
}

fn fmt_f32(v: f32) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "integral check only; out-of-range values fall through to decimal formatting"
    )]
    let i = v as i32;
    #[allow(
        clippy::cast_precision_loss,
        reason = "comparison against the original f32 value"
    )]
    let diff = (i as f32) - v;
    if diff > -1e-6 && diff < 1e-6 {
        return format!("{i}");
    }

    let mut s = format!("{v:.3}");
    while s.contains('.') && s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" {
        s.remove(0);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_formatting() {
        assert_eq!(fmt_f64(3.0), "3");
        assert_eq!(fmt_f64(-2.5), "-2.5");
        assert_eq!(fmt_f64(0.1234), "0.123");
        assert_eq!(fmt_f64(1.2001), "1.2");
        assert_eq!(fmt_f64(-0.0001), "0");
    }

    #[test]
    fn matrix_formatting() {
        let xf = Affine::translate((10.0, -4.5)) * Affine::scale(2.0);
        assert_eq!(affine_to_svg_matrix(xf), "matrix(2 0 0 2 10 -4.5)");
    }

    #[test]
    fn escaping() {
        assert_eq!(
            escape("a<b & \"c\" 'd'>"),
            "a&lt;b &amp; &quot;c&quot; &#39;d&#39;&gt;"
        );
    }

    #[test]
    fn path_data() {
        let mut p = BezPath::new();
        p.move_to((0.0, 0.0));
        p.line_to((10.0, 0.0));
        p.quad_to((15.0, 5.0), (10.0, 10.0));
        p.close_path();
        assert_eq!(bez_path_to_svg_d(&p), "M0 0L10 0Q15 5 10 10Z");
    }

    #[test]
    fn color_hex_and_alpha() {
        let (hex, a) = color_to_svg(Color::from_rgba8(255, 128, 0, 255));
        assert_eq!(hex, "#ff8000");
        assert_eq!(a, 1.0);
        let (_, a) = color_to_svg(Color::from_rgba8(0, 0, 0, 0));
        assert_eq!(a, 0.0);
    }
}
