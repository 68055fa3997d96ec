// Copyright 2025 the Panorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Markup produced for each element kind.

use kurbo::{Affine, BezPath, Circle, Line, Point, Rect, RoundedRect, Size, Vec2};
use panorama_scene::svg::NODE_ATTR;
use panorama_scene::{
    InputElement, InputKind, Paint, Scene, Style, TextAnchor, TextElement,
};
use peniko::Color;

#[test]
fn document_wraps_root_group_with_view_transform() {
    let scene = Scene::new();
    let view = Affine::translate((5.0, 6.0)) * Affine::scale(1.5);
    let svg = scene.to_svg_document(Size::new(640.0, 480.0), view);

    assert_eq!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"640\" height=\"480\" viewBox=\"0 0 640 480\">\
         <g transform=\"matrix(1.5 0 0 1.5 5 6)\"></g></svg>"
    );
}

#[test]
fn shapes_render_with_style() {
    let mut scene = Scene::new();
    let root = scene.root();

    let r = scene.rect(root, Rect::new(10.0, 20.0, 30.0, 40.0)).unwrap();
    scene
        .set_style(r, Style::filled(Color::from_rgba8(255, 0, 0, 255)))
        .unwrap();
    let c = scene.circle(root, Circle::new((1.0, 2.0), 3.0)).unwrap();
    scene
        .set_style(c, Style::stroked(Color::from_rgba8(0, 0, 255, 255), 2.0))
        .unwrap();
    scene
        .ellipse(root, Point::new(0.0, 0.0), Vec2::new(5.0, 2.5))
        .unwrap();
    scene
        .line(root, Line::new((0.0, 0.0), (10.0, 10.0)))
        .unwrap();
    scene
        .polyline(root, [Point::new(0.0, 0.0), Point::new(1.5, 2.0)])
        .unwrap();
    scene
        .polygon(
            root,
            [
                Point::new(0.0, 0.0),
                Point::new(4.0, 0.0),
                Point::new(2.0, 3.0),
            ],
        )
        .unwrap();
    scene
        .rounded_rect(root, RoundedRect::new(0.0, 0.0, 10.0, 10.0, 2.0))
        .unwrap();

    let svg = scene.children_markup(root);
    assert!(svg.contains("<rect x=\"10\" y=\"20\" width=\"20\" height=\"20\" fill=\"#ff0000\"/>"));
    assert!(svg.contains(
        "<circle cx=\"1\" cy=\"2\" r=\"3\" fill=\"none\" stroke=\"#0000ff\" stroke-width=\"2\"/>"
    ));
    assert!(svg.contains("<ellipse cx=\"0\" cy=\"0\" rx=\"5\" ry=\"2.5\"/>"));
    assert!(svg.contains("<line x1=\"0\" y1=\"0\" x2=\"10\" y2=\"10\"/>"));
    assert!(svg.contains("<polyline points=\"0,0 1.5,2\"/>"));
    assert!(svg.contains("<polygon points=\"0,0 4,0 2,3\"/>"));
    assert!(svg.contains("rx=\"2\" ry=\"2\""));
}

#[test]
fn groups_nest_with_attributes() {
    let mut scene = Scene::new();
    let g = scene.group(scene.root()).unwrap();
    scene.set_element_id(g, Some("layer".into())).unwrap();
    scene.set_class(g, Some("a b".into())).unwrap();
    scene.set_transform(g, Affine::translate((3.0, 4.0))).unwrap();
    scene
        .set_style(g, Style::default().with_opacity(0.5))
        .unwrap();
    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.line_to((1.0, 1.0));
    scene.path(g, path).unwrap();

    let fragment = scene.to_svg_fragment(g).unwrap();
    assert_eq!(
        fragment,
        "<g id=\"layer\" class=\"a b\" transform=\"matrix(1 0 0 1 3 4)\" opacity=\"0.5\">\
         <path d=\"M0 0L1 1\"/></g>"
    );
}

#[test]
fn text_is_escaped_and_anchored() {
    let mut scene = Scene::new();
    scene
        .text(
            scene.root(),
            TextElement::new(Point::new(5.0, 10.0), "a < b & c")
                .with_font_size(12.0)
                .with_anchor(TextAnchor::Middle)
                .with_font_family("Inter"),
        )
        .unwrap();

    let svg = scene.children_markup(scene.root());
    assert_eq!(
        svg,
        "<text x=\"5\" y=\"10\" font-size=\"12\" text-anchor=\"middle\" font-family=\"Inter\">\
         a &lt; b &amp; c</text>"
    );
}

#[test]
fn inputs_carry_node_id_for_write_back() {
    let mut scene = Scene::new();
    let id = scene
        .input(
            scene.root(),
            InputElement::new(Rect::new(0.0, 0.0, 120.0, 24.0))
                .with_kind(InputKind::Number)
                .with_value("3\"")
                .with_placeholder("count")
                .with_name("qty"),
        )
        .unwrap();

    let svg = scene.to_svg_fragment(id).unwrap();
    assert!(svg.starts_with("<foreignObject x=\"0\" y=\"0\" width=\"120\" height=\"24\">"));
    assert!(svg.contains(&format!("{NODE_ATTR}=\"{id}\"")));
    assert!(svg.contains("type=\"number\" value=\"3&quot;\" placeholder=\"count\" name=\"qty\""));
    assert!(svg.ends_with("</foreignObject>"));
}

#[test]
fn symbol_use_and_translucent_paint() {
    let mut scene = Scene::new();
    let u = scene
        .symbol_use(scene.root(), "sprites.svg#star", Rect::new(0.0, 0.0, 16.0, 16.0))
        .unwrap();
    scene
        .set_style(
            u,
            Style::default().with_fill(Paint::Solid(Color::from_rgba8(0, 0, 0, 51))),
        )
        .unwrap();

    let svg = scene.to_svg_fragment(u).unwrap();
    assert_eq!(
        svg,
        "<use href=\"sprites.svg#star\" x=\"0\" y=\"0\" width=\"16\" height=\"16\" fill=\"#000000\" fill-opacity=\"0.2\"/>"
    );
}

#[test]
fn stale_nodes_have_no_fragment() {
    let mut scene = Scene::new();
    let g = scene.group(scene.root()).unwrap();
    scene.remove(g).unwrap();
    assert_eq!(scene.to_svg_fragment(g), None);
}
