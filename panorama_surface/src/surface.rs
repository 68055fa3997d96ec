// Copyright 2025 the Panorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Size};
use log::{debug, info, warn};
use panorama_event_state::drag::{DragState, PointerButton};
use panorama_scene::{NodeId, Scene};
use panorama_view2d::ViewTransform;

use crate::config::SurfaceConfig;
use crate::error::SurfaceError;
use crate::event::SurfaceEvent;
use crate::host::SurfaceHost;

/// A pannable, zoomable display surface.
///
/// A surface owns a [`Scene`], the [`ViewTransform`] applied to the scene's
/// root group, and the gesture state that drives it. It draws through a
/// [`SurfaceHost`].
///
/// Lifecycle:
/// 1. [`Surface::new`] with a host and config; build content with
///    [`Surface::update`] at any time.
/// 2. [`Surface::init`] attaches to an anchor element and renders. It fails
///    (fatally) if the surface is already initialized, the anchor is missing,
///    or the host cannot render in the configured mode.
/// 3. Feed input through [`Surface::handle_event`]: primary or middle button
///    drags pan, the wheel zooms at the pointer, resizes update the view.
#[derive(Debug)]
pub struct Surface<H> {
    host: H,
    config: SurfaceConfig,
    scene: Scene,
    view: ViewTransform,
    drag: DragState,
    anchor: Option<String>,
}

impl<H: SurfaceHost> Surface<H> {
    /// Creates an uninitialized surface with an empty scene.
    #[must_use]
    pub fn new(host: H, config: SurfaceConfig) -> Self {
        let view = ViewTransform::new(Size::ZERO)
            .with_scale_limits(config.min_scale, config.max_scale)
            .with_fit_mode(config.fit_mode);
        Self {
            host,
            config,
            scene: Scene::new(),
            view,
            drag: DragState::default(),
            anchor: None,
        }
    }

    /// Attaches to the anchor element `anchor_id` and renders the scene.
    pub fn init(&mut self, anchor_id: &str) -> Result<(), SurfaceError> {
        if self.anchor.is_some() {
            warn!("surface already initialized on `{anchor_id}`");
            return Err(SurfaceError::AlreadyInitialized);
        }
        self.config.validate()?;
        let mode = self.config.render_mode;
        if !self.host.supports(mode) {
            warn!("render mode {mode:?} unsupported by host");
            return Err(SurfaceError::UnsupportedRenderMode(mode));
        }
        let Some(size) = self.host.attach(anchor_id) else {
            warn!("anchor `{anchor_id}` not found");
            return Err(SurfaceError::MissingAnchor(anchor_id.to_owned()));
        };

        self.anchor = Some(anchor_id.to_owned());
        self.view.set_view_size(size);
        if self.config.fit_on_init {
            self.fit_view();
        }
        self.host.render(&self.scene, self.root_transform());
        info!(
            "surface initialized on `{anchor_id}` at {}x{} ({} nodes)",
            size.width,
            size.height,
            self.scene.len()
        );
        Ok(())
    }

    /// Returns `true` after a successful [`Surface::init`].
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.anchor.is_some()
    }

    /// Id of the anchor this surface is attached to.
    #[must_use]
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// The host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The root group of the scene; new top-level elements go here.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.scene.root()
    }

    /// The view transform.
    #[must_use]
    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    /// The transform applied to the root group: the view transform composed
    /// with the root's own local transform.
    #[must_use]
    pub fn root_transform(&self) -> Affine {
        let local = self
            .scene
            .transform(self.scene.root())
            .unwrap_or(Affine::IDENTITY);
        self.view.transform() * local
    }

    /// Mutates the scene, then re-renders if initialized.
    ///
    /// This is the element factory entry point:
    ///
    /// ```rust
    /// use kurbo::{Rect, Size};
    /// use panorama_surface::{MarkupHost, Surface, SurfaceConfig};
    ///
    /// let host = MarkupHost::new().with_anchor("stage", Size::new(400.0, 300.0));
    /// let mut surface = Surface::new(host, SurfaceConfig::default());
    /// surface.init("stage").unwrap();
    ///
    /// let id = surface
    ///     .update(|scene| {
    ///         let g = scene.group(scene.root())?;
    ///         scene.rect(g, Rect::new(0.0, 0.0, 40.0, 30.0))
    ///     })
    ///     .unwrap();
    /// assert!(surface.scene().is_alive(id));
    /// assert!(surface.host().content().contains("<rect"));
    /// ```
    pub fn update<R>(&mut self, f: impl FnOnce(&mut Scene) -> R) -> R {
        let result = f(&mut self.scene);
        if self.is_initialized() {
            self.host.render(&self.scene, self.root_transform());
        }
        result
    }

    /// Records a value typed into an editable input.
    ///
    /// The host already shows the new value, so nothing is re-rendered.
    pub fn sync_input(&mut self, id: NodeId, value: &str) -> Result<(), SurfaceError> {
        self.scene.set_input_value(id, value)?;
        debug!("input {id} = {value:?}");
        Ok(())
    }

    /// Routes an input event. Returns `true` if the view changed.
    ///
    /// Events before [`Surface::init`] are ignored.
    pub fn handle_event(&mut self, event: SurfaceEvent) -> bool {
        if !self.is_initialized() {
            return false;
        }
        let changed = match event {
            SurfaceEvent::PointerDown { pos, button } => {
                if matches!(button, PointerButton::Primary | PointerButton::Auxiliary) {
                    self.drag.begin(pos, button);
                    self.view.begin_drag();
                }
                false
            }
            SurfaceEvent::PointerMove { pos } => match self.drag.update(pos) {
                Some(step) => self.view.drag_by(step.total),
                None => false,
            },
            SurfaceEvent::PointerUp { .. } | SurfaceEvent::PointerLeave => {
                if self.drag.end().is_some() {
                    self.view.end_drag();
                }
                false
            }
            SurfaceEvent::Wheel { pos, delta } => {
                let pixels = delta.to_pixels(self.view.view_size());
                self.view
                    .zoom_at(pos, wheel_zoom_factor(pixels.y, self.config.wheel_zoom_speed))
            }
            SurfaceEvent::Resize { size } => {
                if size == self.view.view_size() {
                    false
                } else {
                    debug!("surface resized to {}x{}", size.width, size.height);
                    self.view.set_view_size(size);
                    self.config.fit_on_resize && self.fit_view()
                }
            }
        };
        if changed {
            self.host.apply_transform(self.root_transform());
        }
        changed
    }

    /// Frames the scene's content in the view. Returns `true` if the view changed.
    pub fn fit_to_content(&mut self) -> bool {
        let changed = self.fit_view();
        if changed && self.is_initialized() {
            self.host.apply_transform(self.root_transform());
        }
        changed
    }

    /// Returns to scale `1.0` with no offsets.
    pub fn reset_view(&mut self) {
        self.drag.end();
        self.view.reset();
        if self.is_initialized() {
            self.host.apply_transform(self.root_transform());
        }
    }

    /// Renders the whole surface as a standalone SVG document.
    #[must_use]
    pub fn to_svg(&self) -> String {
        self.scene
            .to_svg_document(self.view.view_size(), self.view.transform())
    }

    fn fit_view(&mut self) -> bool {
        // Frame the content as rendered, under the root group's own transform.
        let Some(bounds) = self.scene.subtree_bounds(self.scene.root()) else {
            debug!("fit skipped: scene is empty");
            return false;
        };
        let fitted = self.view.fit_content(bounds, self.config.fit_padding);
        if fitted {
            debug!(
                "fit {bounds:?} at scale {:.3}, centering offset {:?}",
                self.view.scale(),
                self.view.center_offset()
            );
        }
        fitted
    }
}

/// Zoom factor for a vertical wheel movement of `dy` pixels.
///
/// Extreme deltas saturate instead of overflowing to `inf` or underflowing to
/// zero, so the view clamps to its scale range.
fn wheel_zoom_factor(dy: f64, speed: f64) -> f64 {
    let factor = (-dy * speed).exp();
    if factor.is_nan() {
        1.0
    } else {
        factor.clamp(f64::MIN_POSITIVE, f64::MAX)
    }
}
