// Copyright 2025 the Panorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Affine, BezPath, Circle, Line, Point, Rect, RoundedRect, Size, Vec2};

use crate::error::SceneError;
use crate::svg;
use crate::types::{Element, InputElement, NodeId, Style, SymbolUse, TextElement};

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) element: Element,
    pub(crate) transform: Affine,
    pub(crate) style: Style,
    pub(crate) element_id: Option<String>,
    pub(crate) class: Option<String>,
}

impl Node {
    fn new(parent: Option<NodeId>, element: Element) -> Self {
        Self {
            parent,
            children: Vec::new(),
            element,
            transform: Affine::IDENTITY,
            style: Style::default(),
            element_id: None,
            class: None,
        }
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// A retained tree of display elements under a single root group.
///
/// The root group is created with the scene and cannot be removed; a display
/// surface applies its pan/zoom transform to it. Every other node is created
/// through the element factory methods ([`Scene::group`], [`Scene::rect`],
/// [`Scene::text`], [`Scene::input`], ...), each of which appends the new node
/// as the last child of a parent group.
#[derive(Clone, Debug)]
pub struct Scene {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
    live: usize,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates a scene containing only the root group.
    #[must_use]
    pub fn new() -> Self {
        let root = NodeId::new(0, 1);
        Self {
            slots: alloc::vec![Slot {
                generation: 1,
                node: Some(Node::new(None, Element::Group)),
            }],
            free: Vec::new(),
            root,
            live: 1,
        }
    }

    /// The root group.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if the root has no descendants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 1
    }

    /// Returns `true` if `id` refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Returns the element of a live node.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.node(id).map(|n| &n.element)
    }

    /// Returns the parent of a live node; `None` for the root.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Returns the children of a live node in paint order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Inserts `element` as the last child of `parent`.
    ///
    /// The factory methods below are thin wrappers over this.
    pub fn insert(&mut self, parent: NodeId, element: Element) -> Result<NodeId, SceneError> {
        let parent_node = self.node(parent).ok_or(SceneError::StaleNode(parent))?;
        if !parent_node.element.is_group() {
            return Err(SceneError::NotAGroup(parent));
        }

        let node = Node::new(Some(parent), element);
        let id = if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.node = Some(node);
            NodeId::new(idx, slot.generation)
        } else {
            let idx = slot_index(self.slots.len());
            self.slots.push(Slot {
                generation: 1,
                node: Some(node),
            });
            NodeId::new(idx, 1)
        };
        self.live += 1;
        if let Some(p) = self.node_mut(parent) {
            p.children.push(id);
        }
        Ok(id)
    }

    /// Creates a nested group.
    pub fn group(&mut self, parent: NodeId) -> Result<NodeId, SceneError> {
        self.insert(parent, Element::Group)
    }

    /// Creates a rectangle.
    pub fn rect(&mut self, parent: NodeId, rect: Rect) -> Result<NodeId, SceneError> {
        self.insert(parent, Element::Rect(rect))
    }

    /// Creates a rounded rectangle.
    pub fn rounded_rect(
        &mut self,
        parent: NodeId,
        rect: RoundedRect,
    ) -> Result<NodeId, SceneError> {
        self.insert(parent, Element::RoundedRect(rect))
    }

    /// Creates a circle.
    pub fn circle(&mut self, parent: NodeId, circle: Circle) -> Result<NodeId, SceneError> {
        self.insert(parent, Element::Circle(circle))
    }

    /// Creates an axis-aligned ellipse.
    pub fn ellipse(
        &mut self,
        parent: NodeId,
        center: Point,
        radii: Vec2,
    ) -> Result<NodeId, SceneError> {
        self.insert(parent, Element::Ellipse { center, radii })
    }

    /// Creates a line segment.
    pub fn line(&mut self, parent: NodeId, line: Line) -> Result<NodeId, SceneError> {
        self.insert(parent, Element::Line(line))
    }

    /// Creates an open polyline.
    pub fn polyline(
        &mut self,
        parent: NodeId,
        points: impl IntoIterator<Item = Point>,
    ) -> Result<NodeId, SceneError> {
        self.insert(parent, Element::Polyline(points.into_iter().collect()))
    }

    /// Creates a closed polygon.
    pub fn polygon(
        &mut self,
        parent: NodeId,
        points: impl IntoIterator<Item = Point>,
    ) -> Result<NodeId, SceneError> {
        self.insert(parent, Element::Polygon(points.into_iter().collect()))
    }

    /// Creates a path.
    pub fn path(&mut self, parent: NodeId, path: BezPath) -> Result<NodeId, SceneError> {
        self.insert(parent, Element::Path(path))
    }

    /// Creates a text element.
    pub fn text(&mut self, parent: NodeId, text: TextElement) -> Result<NodeId, SceneError> {
        self.insert(parent, Element::Text(text))
    }

    /// Creates an editable form field.
    pub fn input(&mut self, parent: NodeId, input: InputElement) -> Result<NodeId, SceneError> {
        self.insert(parent, Element::Input(input))
    }

    /// Creates a reference to a symbol, placed in `rect`.
    pub fn symbol_use(
        &mut self,
        parent: NodeId,
        href: impl Into<String>,
        rect: Rect,
    ) -> Result<NodeId, SceneError> {
        self.insert(
            parent,
            Element::SymbolUse(SymbolUse {
                href: href.into(),
                rect,
            }),
        )
    }

    /// Removes a node and all of its descendants.
    pub fn remove(&mut self, id: NodeId) -> Result<(), SceneError> {
        if id == self.root {
            return Err(SceneError::RootRemoval);
        }
        let parent = self
            .node(id)
            .ok_or(SceneError::StaleNode(id))?
            .parent;
        if let Some(p) = parent.and_then(|p| self.node_mut(p)) {
            p.children.retain(|c| *c != id);
        }

        let mut stack = alloc::vec![id];
        while let Some(current) = stack.pop() {
            let Some(slot) = self.slots.get_mut(current.idx()) else {
                continue;
            };
            if let Some(node) = slot.node.take() {
                stack.extend(node.children);
                self.free.push(slot_index(current.idx()));
                self.live -= 1;
            }
        }
        Ok(())
    }

    /// Removes every descendant of the root.
    pub fn clear(&mut self) {
        let children: Vec<NodeId> = self.children(self.root).to_vec();
        for child in children {
            // Children of a live root are always live.
            let _ = self.remove(child);
        }
    }

    /// Returns the local transform of a live node.
    #[must_use]
    pub fn transform(&self, id: NodeId) -> Option<Affine> {
        self.node(id).map(|n| n.transform)
    }

    /// Sets the local transform of a node.
    pub fn set_transform(&mut self, id: NodeId, transform: Affine) -> Result<(), SceneError> {
        self.node_mut(id).ok_or(SceneError::StaleNode(id))?.transform = transform;
        Ok(())
    }

    /// Returns the style of a live node.
    #[must_use]
    pub fn style(&self, id: NodeId) -> Option<Style> {
        self.node(id).map(|n| n.style)
    }

    /// Sets the style of a node.
    pub fn set_style(&mut self, id: NodeId, style: Style) -> Result<(), SceneError> {
        self.node_mut(id).ok_or(SceneError::StaleNode(id))?.style = style;
        Ok(())
    }

    /// Sets (or clears) the CSS class of a node.
    pub fn set_class(&mut self, id: NodeId, class: Option<String>) -> Result<(), SceneError> {
        self.node_mut(id).ok_or(SceneError::StaleNode(id))?.class = class;
        Ok(())
    }

    /// Returns the CSS class of a live node.
    #[must_use]
    pub fn class(&self, id: NodeId) -> Option<&str> {
        self.node(id).and_then(|n| n.class.as_deref())
    }

    /// Sets (or clears) the document `id` attribute of a node.
    pub fn set_element_id(
        &mut self,
        id: NodeId,
        element_id: Option<String>,
    ) -> Result<(), SceneError> {
        self.node_mut(id).ok_or(SceneError::StaleNode(id))?.element_id = element_id;
        Ok(())
    }

    /// Returns the document `id` attribute of a live node.
    #[must_use]
    pub fn element_id(&self, id: NodeId) -> Option<&str> {
        self.node(id).and_then(|n| n.element_id.as_deref())
    }

    /// Finds the first live node (in slot order) whose document `id` is `element_id`.
    #[must_use]
    pub fn find_by_element_id(&self, element_id: &str) -> Option<NodeId> {
        self.slots.iter().enumerate().find_map(|(idx, slot)| {
            let node = slot.node.as_ref()?;
            (node.element_id.as_deref() == Some(element_id))
                .then(|| NodeId::new(slot_index(idx), slot.generation))
        })
    }

    /// Replaces the content of a text element.
    pub fn set_text(&mut self, id: NodeId, content: impl Into<String>) -> Result<(), SceneError> {
        match &mut self.node_mut(id).ok_or(SceneError::StaleNode(id))?.element {
            Element::Text(text) => {
                text.content = content.into();
                Ok(())
            }
            _ => Err(SceneError::WrongElement {
                id,
                expected: "text",
            }),
        }
    }

    /// Replaces the value of an editable input.
    pub fn set_input_value(
        &mut self,
        id: NodeId,
        value: impl Into<String>,
    ) -> Result<(), SceneError> {
        match &mut self.node_mut(id).ok_or(SceneError::StaleNode(id))?.element {
            Element::Input(input) => {
                input.value = value.into();
                Ok(())
            }
            _ => Err(SceneError::WrongElement {
                id,
                expected: "input",
            }),
        }
    }

    /// Returns the current value of an editable input.
    #[must_use]
    pub fn input_value(&self, id: NodeId) -> Option<&str> {
        match self.get(id)? {
            Element::Input(input) => Some(&input.value),
            _ => None,
        }
    }

    /// Transform from a node's local space into root-content space.
    ///
    /// The root's own transform is included; a surface's view transform is not.
    #[must_use]
    pub fn world_transform(&self, id: NodeId) -> Option<Affine> {
        let mut node = self.node(id)?;
        let mut xf = node.transform;
        while let Some(parent) = node.parent {
            node = self.node(parent)?;
            xf = node.transform * xf;
        }
        Some(xf)
    }

    /// Union of the bounds of every element under the root, in the root
    /// group's local space (the root's own transform is not applied).
    ///
    /// Stroke widths are included; returns `None` for an empty scene.
    #[must_use]
    pub fn content_bounds(&self) -> Option<Rect> {
        self.bounds_from(self.root, Affine::IDENTITY)
    }

    /// Union of the bounds of every element in the subtree rooted at `id`,
    /// in root-content space (see [`Scene::world_transform`]).
    #[must_use]
    pub fn subtree_bounds(&self, id: NodeId) -> Option<Rect> {
        self.bounds_from(id, self.world_transform(id)?)
    }

    fn bounds_from(&self, id: NodeId, start: Affine) -> Option<Rect> {
        let mut bounds: Option<Rect> = None;
        let mut stack = alloc::vec![(id, start)];
        while let Some((current, xf)) = stack.pop() {
            let Some(node) = self.node(current) else {
                continue;
            };
            if let Some(local) = node.element.local_bounds() {
                let local = if node.style.has_stroke() {
                    let pad = node.style.stroke_width * 0.5;
                    local.inflate(pad, pad)
                } else {
                    local
                };
                let world = xf.transform_rect_bbox(local);
                bounds = Some(bounds.map_or(world, |b| b.union(world)));
            }
            for child in &node.children {
                if let Some(child_node) = self.node(*child) {
                    stack.push((*child, xf * child_node.transform));
                }
            }
        }
        bounds
    }

    /// Serializes the scene as a standalone SVG document of the given size,
    /// with `view` applied to the root group.
    #[must_use]
    pub fn to_svg_document(&self, size: Size, view: Affine) -> String {
        svg::document(self, size, view)
    }

    /// Serializes one node (and its subtree) as an SVG fragment.
    #[must_use]
    pub fn to_svg_fragment(&self, id: NodeId) -> Option<String> {
        self.is_alive(id).then(|| svg::fragment(self, id))
    }

    /// Serializes the children of `id`, without the node's own element.
    ///
    /// A host that owns the root `<g>` in its document uses this to refresh
    /// the group's content.
    #[must_use]
    pub fn children_markup(&self, id: NodeId) -> String {
        svg::children(self, id)
    }

    pub(crate) fn node(&self, id: NodeId) -> Option<&Node> {
        let slot = self.slots.get(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.node.as_ref()
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.node.as_mut()
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "slot indices originate from u32 ids; scenes never approach u32::MAX nodes"
)]
fn slot_index(idx: usize) -> u32 {
    idx as u32
}

#[cfg(test)]
mod tests {
    use kurbo::{Affine, Point, Rect};

    use super::Scene;
    use crate::error::SceneError;
    use crate::types::{Element, InputElement, TextElement};

    #[test]
    fn new_scene_has_only_root() {
        let scene = Scene::new();
        assert_eq!(scene.len(), 1);
        assert!(scene.is_empty());
        assert_eq!(scene.get(scene.root()), Some(&Element::Group));
        assert_eq!(scene.parent(scene.root()), None);
        assert_eq!(scene.content_bounds(), None);
    }

    #[test]
    fn children_are_appended_in_order() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene.rect(root, Rect::new(0.0, 0.0, 1.0, 1.0)).unwrap();
        let g = scene.group(root).unwrap();
        let b = scene.rect(g, Rect::new(0.0, 0.0, 1.0, 1.0)).unwrap();

        assert_eq!(scene.children(root), &[a, g]);
        assert_eq!(scene.children(g), &[b]);
        assert_eq!(scene.parent(b), Some(g));
        assert_eq!(scene.len(), 4);
    }

    #[test]
    fn only_groups_accept_children() {
        let mut scene = Scene::new();
        let r = scene.rect(scene.root(), Rect::new(0.0, 0.0, 1.0, 1.0)).unwrap();
        assert_eq!(scene.group(r), Err(SceneError::NotAGroup(r)));
    }

    #[test]
    fn remove_is_recursive_and_ids_go_stale() {
        let mut scene = Scene::new();
        let root = scene.root();
        let g = scene.group(root).unwrap();
        let inner = scene.group(g).unwrap();
        let leaf = scene.rect(inner, Rect::new(0.0, 0.0, 1.0, 1.0)).unwrap();

        scene.remove(g).unwrap();
        assert!(!scene.is_alive(g));
        assert!(!scene.is_alive(inner));
        assert!(!scene.is_alive(leaf));
        assert!(scene.children(root).is_empty());
        assert_eq!(scene.len(), 1);

        // Slot reuse bumps the generation, so old ids stay dead.
        let fresh = scene.group(root).unwrap();
        assert!(scene.is_alive(fresh));
        assert!(!scene.is_alive(g));
        assert_eq!(scene.remove(g), Err(SceneError::StaleNode(g)));
    }

    #[test]
    fn root_cannot_be_removed() {
        let mut scene = Scene::new();
        assert_eq!(scene.remove(scene.root()), Err(SceneError::RootRemoval));
    }

    #[test]
    fn clear_empties_root() {
        let mut scene = Scene::new();
        let root = scene.root();
        scene.group(root).unwrap();
        scene.rect(root, Rect::new(0.0, 0.0, 1.0, 1.0)).unwrap();
        scene.clear();
        assert!(scene.is_empty());
    }

    #[test]
    fn text_and_input_editing() {
        let mut scene = Scene::new();
        let root = scene.root();
        let t = scene.text(root, TextElement::new(Point::ZERO, "a")).unwrap();
        let i = scene
            .input(root, InputElement::new(Rect::new(0.0, 0.0, 80.0, 20.0)))
            .unwrap();

        scene.set_text(t, "hello").unwrap();
        scene.set_input_value(i, "42").unwrap();
        assert_eq!(scene.input_value(i), Some("42"));
        assert_eq!(scene.input_value(t), None);
        assert_eq!(
            scene.set_text(i, "x"),
            Err(SceneError::WrongElement {
                id: i,
                expected: "text",
            })
        );
        match scene.get(t) {
            Some(Element::Text(text)) => assert_eq!(text.content, "hello"),
            other => panic!("unexpected element {other:?}"),
        }
    }

    #[test]
    fn element_ids_are_searchable() {
        let mut scene = Scene::new();
        let g = scene.group(scene.root()).unwrap();
        scene.set_element_id(g, Some("layer-1".into())).unwrap();
        assert_eq!(scene.find_by_element_id("layer-1"), Some(g));
        assert_eq!(scene.element_id(g), Some("layer-1"));
        assert_eq!(scene.find_by_element_id("missing"), None);
    }

    #[test]
    fn bounds_compose_nested_transforms() {
        let mut scene = Scene::new();
        let root = scene.root();
        let g = scene.group(root).unwrap();
        scene
            .set_transform(g, Affine::translate((100.0, 0.0)) * Affine::scale(2.0))
            .unwrap();
        scene.rect(g, Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        scene.rect(root, Rect::new(-5.0, -5.0, 0.0, 0.0)).unwrap();

        assert_eq!(
            scene.content_bounds(),
            Some(Rect::new(-5.0, -5.0, 120.0, 20.0))
        );
        assert_eq!(
            scene.subtree_bounds(g),
            Some(Rect::new(100.0, 0.0, 120.0, 20.0))
        );
    }
}
