// Copyright 2025 the Panorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the display tree: node identifiers, elements and styling.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{BezPath, Circle, Line, Point, Rect, RoundedRect, Shape, Vec2};
use peniko::Color;

/// Identifier for a node in a [`Scene`](crate::Scene).
///
/// A slot index plus a generation counter. Removing a node frees its slot;
/// reusing the slot bumps the generation, so stale ids never alias a newer
/// node. Use [`Scene::is_alive`](crate::Scene::is_alive) to check liveness.
///
/// The [`Display`](fmt::Display) form (`"<slot>v<generation>"`) is stable and
/// round-trips through [`NodeId::parse`]; it is used to tag DOM elements.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Parses the [`Display`](fmt::Display) form of a `NodeId`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let (idx, generation) = s.split_once('v')?;
        Some(Self(idx.parse().ok()?, generation.parse().ok()?))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.0, self.1)
    }
}

/// How a fill or stroke is painted.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Paint {
    /// Emit nothing; the value is inherited from the parent (or the SVG default).
    #[default]
    Inherit,
    /// Explicitly unpainted (`none`).
    None,
    /// A solid color.
    Solid(Color),
}

/// Presentation attributes shared by every element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    /// Interior paint.
    pub fill: Paint,
    /// Outline paint.
    pub stroke: Paint,
    /// Outline width in local units; only emitted when `stroke` is painted.
    pub stroke_width: f64,
    /// Group/element opacity in `0.0..=1.0`.
    pub opacity: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Paint::Inherit,
            stroke: Paint::Inherit,
            stroke_width: 1.0,
            opacity: 1.0,
        }
    }
}

impl Style {
    /// A style with a solid fill.
    #[must_use]
    pub fn filled(color: Color) -> Self {
        Self {
            fill: Paint::Solid(color),
            ..Self::default()
        }
    }

    /// A style with a solid stroke and no fill.
    #[must_use]
    pub fn stroked(color: Color, width: f64) -> Self {
        Self {
            fill: Paint::None,
            stroke: Paint::Solid(color),
            stroke_width: width,
            ..Self::default()
        }
    }

    /// Replaces the fill.
    #[must_use]
    pub fn with_fill(mut self, fill: Paint) -> Self {
        self.fill = fill;
        self
    }

    /// Replaces the stroke and its width.
    #[must_use]
    pub fn with_stroke(mut self, stroke: Paint, width: f64) -> Self {
        self.stroke = stroke;
        self.stroke_width = width;
        self
    }

    /// Replaces the opacity.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub(crate) fn has_stroke(&self) -> bool {
        matches!(self.stroke, Paint::Solid(_)) && self.stroke_width > 0.0
    }
}

/// Horizontal alignment of text relative to its origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TextAnchor {
    /// Text starts at the origin.
    #[default]
    Start,
    /// Text is centered on the origin.
    Middle,
    /// Text ends at the origin.
    End,
}

/// A run of text positioned at its baseline origin.
#[derive(Clone, Debug, PartialEq)]
pub struct TextElement {
    /// Baseline origin.
    pub origin: Point,
    /// Text content.
    pub content: String,
    /// Font size in local units.
    pub font_size: f64,
    /// Alignment relative to `origin`.
    pub anchor: TextAnchor,
    /// Optional CSS font family.
    pub font_family: Option<String>,
}

impl TextElement {
    /// Default font size for new text.
    pub const DEFAULT_FONT_SIZE: f64 = 16.0;

    /// Creates left-aligned text at the default size.
    #[must_use]
    pub fn new(origin: Point, content: impl Into<String>) -> Self {
        Self {
            origin,
            content: content.into(),
            font_size: Self::DEFAULT_FONT_SIZE,
            anchor: TextAnchor::Start,
            font_family: None,
        }
    }

    /// Sets the font size.
    #[must_use]
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    /// Sets the anchor.
    #[must_use]
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the font family.
    #[must_use]
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    /// Estimated bounds, assuming an average advance of 0.6em and an
    /// ascent/descent split of 0.8em/0.2em.
    #[must_use]
    pub fn estimated_bounds(&self) -> Rect {
        #[allow(
            clippy::cast_precision_loss,
            reason = "character counts are far below f64 precision limits"
        )]
        let width = self.content.chars().count() as f64 * self.font_size * 0.6;
        let x0 = match self.anchor {
            TextAnchor::Start => self.origin.x,
            TextAnchor::Middle => self.origin.x - width * 0.5,
            TextAnchor::End => self.origin.x - width,
        };
        Rect::new(
            x0,
            self.origin.y - self.font_size * 0.8,
            x0 + width,
            self.origin.y + self.font_size * 0.2,
        )
    }
}

/// HTML `type` of an editable input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum InputKind {
    /// Free text.
    #[default]
    Text,
    /// Numeric entry.
    Number,
    /// Masked text.
    Password,
    /// Search box.
    Search,
}

impl InputKind {
    /// The HTML `type` attribute value.
    #[must_use]
    pub fn as_html_type(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Password => "password",
            Self::Search => "search",
        }
    }
}

/// An editable form field embedded in the drawing.
///
/// Rendered as an HTML `<input>` inside an SVG `<foreignObject>` occupying `rect`.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct InputElement {
    /// Area occupied by the field, in local units.
    pub rect: Rect,
    /// Input type.
    pub kind: InputKind,
    /// Current value.
    pub value: String,
    /// Placeholder shown while empty.
    pub placeholder: String,
    /// Optional form `name`.
    pub name: Option<String>,
}

impl InputElement {
    /// Creates an empty text input occupying `rect`.
    #[must_use]
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            ..Self::default()
        }
    }

    /// Sets the input type.
    #[must_use]
    pub fn with_kind(mut self, kind: InputKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the initial value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Sets the placeholder.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Sets the form name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A reference to a graphics symbol defined elsewhere.
///
/// `href` is either a fragment (`#gear`) for a symbol in the same document or
/// an external reference (`icons.svg#gear`).
#[derive(Clone, Debug, PartialEq)]
pub struct SymbolUse {
    /// Symbol reference.
    pub href: String,
    /// Placement of the symbol's viewport, in local units.
    pub rect: Rect,
}

/// The kind and geometry of a node.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    /// A container (`<g>`).
    Group,
    /// An axis-aligned rectangle.
    Rect(Rect),
    /// A rectangle with rounded corners; SVG supports a single radius, so
    /// mixed radii fall back to a path.
    RoundedRect(RoundedRect),
    /// A circle.
    Circle(Circle),
    /// An axis-aligned ellipse.
    Ellipse {
        /// Center point.
        center: Point,
        /// Horizontal and vertical radii.
        radii: Vec2,
    },
    /// A single line segment.
    Line(Line),
    /// An open polyline.
    Polyline(Vec<Point>),
    /// A closed polygon.
    Polygon(Vec<Point>),
    /// An arbitrary path.
    Path(BezPath),
    /// Text.
    Text(TextElement),
    /// An editable form field.
    Input(InputElement),
    /// A symbol reference.
    SymbolUse(SymbolUse),
}

impl Element {
    /// Returns `true` for elements that can hold children.
    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group)
    }

    /// Short name used in diagnostics; matches the emitted SVG tag.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Group => "g",
            Self::Rect(_) | Self::RoundedRect(_) => "rect",
            Self::Circle(_) => "circle",
            Self::Ellipse { .. } => "ellipse",
            Self::Line(_) => "line",
            Self::Polyline(_) => "polyline",
            Self::Polygon(_) => "polygon",
            Self::Path(_) => "path",
            Self::Text(_) => "text",
            Self::Input(_) => "foreignObject",
            Self::SymbolUse(_) => "use",
        }
    }

    /// Bounds of the geometry in local coordinates, ignoring stroke.
    ///
    /// Groups and empty point lists or paths have no bounds of their own.
    #[must_use]
    pub fn local_bounds(&self) -> Option<Rect> {
        match self {
            Self::Group => None,
            Self::Rect(r) => Some(r.abs()),
            Self::RoundedRect(rr) => Some(rr.rect()),
            Self::Circle(c) => Some(c.bounding_box()),
            Self::Ellipse { center, radii } => Some(Rect::from_center_size(
                *center,
                (radii.x.abs() * 2.0, radii.y.abs() * 2.0),
            )),
            Self::Line(l) => Some(l.bounding_box()),
            Self::Polyline(pts) | Self::Polygon(pts) => points_bounds(pts),
            Self::Path(p) => {
                if p.elements().is_empty() {
                    None
                } else {
                    Some(p.bounding_box())
                }
            }
            Self::Text(t) => Some(t.estimated_bounds()),
            Self::Input(i) => Some(i.rect.abs()),
            Self::SymbolUse(u) => Some(u.rect.abs()),
        }
    }
}

fn points_bounds(pts: &[Point]) -> Option<Rect> {
    let (first, rest) = pts.split_first()?;
    Some(
        rest.iter()
            .fold(Rect::from_points(*first, *first), |r, p| r.union_pt(*p)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_display_roundtrip() {
        let id = NodeId::new(12, 3);
        let text = alloc::format!("{id}");
        assert_eq!(text, "12v3");
        assert_eq!(NodeId::parse(&text), Some(id));
        assert_eq!(NodeId::parse("12"), None);
        assert_eq!(NodeId::parse("av1"), None);
    }

    #[test]
    fn text_bounds_follow_anchor() {
        let text = TextElement::new(Point::new(100.0, 50.0), "abcd").with_font_size(10.0);
        assert_eq!(text.estimated_bounds(), Rect::new(100.0, 42.0, 124.0, 52.0));

        let centered = text.clone().with_anchor(TextAnchor::Middle);
        assert_eq!(centered.estimated_bounds().center().x, 100.0);

        let end = text.with_anchor(TextAnchor::End);
        assert_eq!(end.estimated_bounds().x1, 100.0);
    }

    #[test]
    fn element_bounds() {
        assert_eq!(Element::Group.local_bounds(), None);
        assert_eq!(Element::Polyline(Vec::new()).local_bounds(), None);
        assert_eq!(Element::Path(BezPath::new()).local_bounds(), None);
        assert_eq!(
            Element::Circle(Circle::new((10.0, 10.0), 5.0)).local_bounds(),
            Some(Rect::new(5.0, 5.0, 15.0, 15.0))
        );
        assert_eq!(
            Element::Ellipse {
                center: Point::new(0.0, 0.0),
                radii: Vec2::new(4.0, 2.0),
            }
            .local_bounds(),
            Some(Rect::new(-4.0, -2.0, 4.0, 2.0))
        );
        assert_eq!(
            Element::Polygon(alloc::vec![
                Point::new(1.0, 5.0),
                Point::new(-2.0, 3.0),
                Point::new(4.0, -1.0),
            ])
            .local_bounds(),
            Some(Rect::new(-2.0, -1.0, 4.0, 5.0))
        );
    }

    #[test]
    fn stroke_only_counts_when_painted() {
        assert!(!Style::default().has_stroke());
        assert!(Style::stroked(Color::BLACK, 2.0).has_stroke());
        assert!(!Style::stroked(Color::BLACK, 0.0).has_stroke());
    }
}
