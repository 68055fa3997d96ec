// Copyright 2025 the Panorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::HashMap;

use kurbo::{Affine, Size};
use panorama_scene::Scene;
use panorama_scene::svg::affine_to_svg_matrix;

use crate::config::RenderMode;

/// The document a [`Surface`](crate::Surface) draws into.
///
/// A host owns the concrete root graphics group. The surface decides *what*
/// the root transform and content are; the host decides how they reach the
/// screen. `web::WebHost` (on `wasm32`) is the browser implementation and
/// [`MarkupHost`] a headless one.
pub trait SurfaceHost {
    /// Whether this host can render in `mode`.
    fn supports(&self, mode: RenderMode) -> bool;

    /// Attaches to the anchor element with the given id, creating the root
    /// group inside it, and returns the anchor's size in pixels.
    ///
    /// Returns `None` when no such anchor exists.
    fn attach(&mut self, anchor_id: &str) -> Option<Size>;

    /// Replaces the content of the root group with the scene's children and
    /// applies `root_transform` to it.
    fn render(&mut self, scene: &Scene, root_transform: Affine);

    /// Applies `root_transform` to the root group without touching content.
    fn apply_transform(&mut self, root_transform: Affine);
}

/// A headless host that keeps the rendered markup in memory.
///
/// Anchors are registered up front with their sizes. Useful for server-side
/// rendering, snapshots and tests.
#[derive(Clone, Debug, Default)]
pub struct MarkupHost {
    anchors: HashMap<String, Size>,
    attached: Option<String>,
    content: String,
    transform: Option<String>,
    renders: usize,
}

impl MarkupHost {
    /// Creates a host with no anchors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an anchor element.
    #[must_use]
    pub fn with_anchor(mut self, id: impl Into<String>, size: Size) -> Self {
        self.anchors.insert(id.into(), size);
        self
    }

    /// Id of the anchor the host is attached to.
    #[must_use]
    pub fn attached(&self) -> Option<&str> {
        self.attached.as_deref()
    }

    /// Markup of the root group's content as of the last render.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The root group's `transform` attribute, if one has been applied.
    #[must_use]
    pub fn transform_attr(&self) -> Option<&str> {
        self.transform.as_deref()
    }

    /// Number of full content renders so far.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.renders
    }
}

impl SurfaceHost for MarkupHost {
    fn supports(&self, mode: RenderMode) -> bool {
        mode == RenderMode::Svg
    }

    fn attach(&mut self, anchor_id: &str) -> Option<Size> {
        let size = *self.anchors.get(anchor_id)?;
        self.attached = Some(anchor_id.to_owned());
        Some(size)
    }

    fn render(&mut self, scene: &Scene, root_transform: Affine) {
        self.content = scene.children_markup(scene.root());
        self.renders += 1;
        self.apply_transform(root_transform);
    }

    fn apply_transform(&mut self, root_transform: Affine) {
        self.transform = Some(affine_to_svg_matrix(root_transform));
    }
}
