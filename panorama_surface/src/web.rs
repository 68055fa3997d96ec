// Copyright 2025 the Panorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser host and mounting, available on `wasm32` only.
//!
//! [`mount`] creates an `<svg>` inside an anchor element, renders the scene
//! into its root `<g>`, and wires DOM events into [`Surface::handle_event`]:
//!
//! ```no_run
//! use kurbo::Rect;
//! use panorama_surface::SurfaceConfig;
//! use panorama_surface::web;
//!
//! web::init_logging(log::Level::Debug);
//! let mounted = web::mount("stage", SurfaceConfig::default(), |scene| {
//!     scene.rect(scene.root(), Rect::new(0.0, 0.0, 100.0, 50.0))?;
//!     Ok(())
//! })
//! .expect("mount");
//! // Keep `mounted` alive for as long as the surface should react to input.
//! std::mem::forget(mounted);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use kurbo::{Affine, Point, Size, Vec2};
use log::{debug, warn};
use panorama_event_state::drag::PointerButton;
use panorama_event_state::wheel::{DeltaMode, WheelDelta};
use panorama_scene::svg::{NODE_ATTR, SVG_NS, affine_to_svg_matrix};
use panorama_scene::{NodeId, Scene, SceneError};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlInputElement, MouseEvent, WheelEvent};

use crate::config::{RenderMode, SurfaceConfig};
use crate::error::SurfaceError;
use crate::event::SurfaceEvent;
use crate::host::SurfaceHost;
use crate::surface::Surface;

thread_local! {
    static MOUNTED: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Installs the browser console logger and the panic hook.
///
/// Safe to call more than once.
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    // Fails only when a logger is already installed.
    let _ = console_log::init_with_level(level);
}

/// [`SurfaceHost`] backed by the browser DOM.
#[derive(Debug)]
pub struct WebHost {
    document: Document,
    anchor: Option<Element>,
    svg: Option<Element>,
    root: Option<Element>,
}

impl WebHost {
    /// Creates a host for the current window's document.
    ///
    /// Returns `None` outside a browser window (for example in a worker).
    #[must_use]
    pub fn new() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self {
            document,
            anchor: None,
            svg: None,
            root: None,
        })
    }

    /// The `<svg>` element created by [`SurfaceHost::attach`].
    #[must_use]
    pub fn svg(&self) -> Option<&Element> {
        self.svg.as_ref()
    }

    /// Current size of the anchor element.
    #[must_use]
    pub fn anchor_size(&self) -> Option<Size> {
        let rect = self.anchor.as_ref()?.get_bounding_client_rect();
        Some(Size::new(rect.width(), rect.height()))
    }

    fn create_svg_element(&self, tag: &str) -> Option<Element> {
        self.document.create_element_ns(Some(SVG_NS), tag).ok()
    }
}

impl SurfaceHost for WebHost {
    fn supports(&self, mode: RenderMode) -> bool {
        match mode {
            RenderMode::Svg => self.create_svg_element("svg").is_some(),
            RenderMode::Canvas => false,
        }
    }

    fn attach(&mut self, anchor_id: &str) -> Option<Size> {
        let anchor = self.document.get_element_by_id(anchor_id)?;
        let svg = self.create_svg_element("svg")?;
        let _ = svg.set_attribute("xmlns", SVG_NS);
        let _ = svg.set_attribute("width", "100%");
        let _ = svg.set_attribute("height", "100%");
        let _ = svg.set_attribute("style", "display:block;touch-action:none;user-select:none");
        let root = self.create_svg_element("g")?;
        let _ = root.set_attribute("class", "panorama-root");
        svg.append_child(&root).ok()?;
        anchor.append_child(&svg).ok()?;

        let rect = anchor.get_bounding_client_rect();
        self.anchor = Some(anchor);
        self.svg = Some(svg);
        self.root = Some(root);
        Some(Size::new(rect.width(), rect.height()))
    }

    fn render(&mut self, scene: &Scene, root_transform: Affine) {
        if let Some(root) = &self.root {
            root.set_inner_html(&scene.children_markup(scene.root()));
        }
        self.apply_transform(root_transform);
    }

    fn apply_transform(&mut self, root_transform: Affine) {
        if let Some(root) = &self.root {
            let _ = root.set_attribute("transform", &affine_to_svg_matrix(root_transform));
        }
    }
}

/// A surface mounted in the document, together with its event listeners.
///
/// Dropping it unregisters the listeners, removes the `<svg>` from the
/// document and frees the anchor for another [`mount`].
#[derive(Debug)]
pub struct WebSurface {
    surface: Rc<RefCell<Surface<WebHost>>>,
    anchor_id: String,
    _listeners: Vec<EventListener>,
}

impl WebSurface {
    /// Shared handle to the surface, for use in other event handlers.
    #[must_use]
    pub fn surface(&self) -> Rc<RefCell<Surface<WebHost>>> {
        Rc::clone(&self.surface)
    }

    /// Mutates the scene and re-renders. See [`Surface::update`].
    pub fn update<R>(&self, f: impl FnOnce(&mut Scene) -> R) -> R {
        self.surface.borrow_mut().update(f)
    }

    /// Frames the content in the view. See [`Surface::fit_to_content`].
    pub fn fit_to_content(&self) -> bool {
        self.surface.borrow_mut().fit_to_content()
    }
}

impl Drop for WebSurface {
    fn drop(&mut self) {
        if let Some(svg) = self.surface.borrow().host().svg() {
            svg.remove();
        }
        MOUNTED.with(|m| m.borrow_mut().retain(|a| *a != self.anchor_id));
        debug!("unmounted surface from `{}`", self.anchor_id);
    }
}

/// Builds a scene with `build`, mounts it in the element `anchor_id` and
/// starts handling input.
///
/// Fails with [`SurfaceError::AlreadyInitialized`] if a surface is already
/// mounted on that anchor, [`SurfaceError::MissingAnchor`] if the element
/// does not exist, and [`SurfaceError::UnsupportedRenderMode`] for render
/// modes the browser host does not implement.
pub fn mount(
    anchor_id: &str,
    config: SurfaceConfig,
    build: impl FnOnce(&mut Scene) -> Result<(), SceneError>,
) -> Result<WebSurface, SurfaceError> {
    if MOUNTED.with(|m| m.borrow().iter().any(|a| a == anchor_id)) {
        warn!("anchor `{anchor_id}` already has a surface");
        return Err(SurfaceError::AlreadyInitialized);
    }
    let host = WebHost::new().ok_or_else(|| SurfaceError::MissingAnchor(anchor_id.to_owned()))?;
    let mut surface = Surface::new(host, config);
    surface.update(build)?;
    surface.init(anchor_id)?;
    let svg = surface
        .host()
        .svg()
        .cloned()
        .ok_or_else(|| SurfaceError::MissingAnchor(anchor_id.to_owned()))?;

    let surface = Rc::new(RefCell::new(surface));
    let listeners = install_listeners(&surface, &svg);
    MOUNTED.with(|m| m.borrow_mut().push(anchor_id.to_owned()));
    Ok(WebSurface {
        surface,
        anchor_id: anchor_id.to_owned(),
        _listeners: listeners,
    })
}

fn install_listeners(surface: &Rc<RefCell<Surface<WebHost>>>, svg: &Element) -> Vec<EventListener> {
    let mut listeners = Vec::new();

    let s = Rc::clone(surface);
    let target = svg.clone();
    listeners.push(EventListener::new_with_options(
        svg,
        "mousedown",
        EventListenerOptions::enable_prevent_default(),
        move |event: &Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            // Clicks inside form fields focus the field instead of panning.
            if in_foreign_object(event) {
                return;
            }
            let button = PointerButton::from_dom(event.button());
            s.borrow_mut().handle_event(SurfaceEvent::PointerDown {
                pos: view_pos(&target, event),
                button,
            });
            if button != PointerButton::Secondary {
                event.prevent_default();
            }
        },
    ));

    let s = Rc::clone(surface);
    let target = svg.clone();
    listeners.push(EventListener::new(svg, "mousemove", move |event: &Event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        s.borrow_mut().handle_event(SurfaceEvent::PointerMove {
            pos: view_pos(&target, event),
        });
    }));

    let s = Rc::clone(surface);
    let target = svg.clone();
    listeners.push(EventListener::new(svg, "mouseup", move |event: &Event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        s.borrow_mut().handle_event(SurfaceEvent::PointerUp {
            pos: view_pos(&target, event),
        });
    }));

    let s = Rc::clone(surface);
    listeners.push(EventListener::new(svg, "mouseleave", move |_: &Event| {
        s.borrow_mut().handle_event(SurfaceEvent::PointerLeave);
    }));

    let s = Rc::clone(surface);
    let target = svg.clone();
    listeners.push(EventListener::new_with_options(
        svg,
        "wheel",
        EventListenerOptions::enable_prevent_default(),
        move |event: &Event| {
            let Some(event) = event.dyn_ref::<WheelEvent>() else {
                return;
            };
            let delta = WheelDelta::new(
                Vec2::new(event.delta_x(), event.delta_y()),
                DeltaMode::from_dom(event.delta_mode()),
            );
            s.borrow_mut().handle_event(SurfaceEvent::Wheel {
                pos: view_pos(&target, event),
                delta,
            });
            event.prevent_default();
        },
    ));

    let s = Rc::clone(surface);
    listeners.push(EventListener::new(svg, "input", move |event: &Event| {
        let Some(input) = event
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(id) = input
            .get_attribute(NODE_ATTR)
            .as_deref()
            .and_then(NodeId::parse)
        else {
            return;
        };
        if let Err(err) = s.borrow_mut().sync_input(id, &input.value()) {
            warn!("dropping input for {id}: {err}");
        }
    }));

    if let Some(window) = web_sys::window() {
        let s = Rc::clone(surface);
        listeners.push(EventListener::new(&window, "resize", move |_: &Event| {
            let size = s.borrow().host().anchor_size();
            if let Some(size) = size {
                s.borrow_mut().handle_event(SurfaceEvent::Resize { size });
            }
        }));
    }

    listeners
}

fn view_pos(svg: &Element, event: &MouseEvent) -> Point {
    let rect = svg.get_bounding_client_rect();
    Point::new(
        f64::from(event.client_x()) - rect.left(),
        f64::from(event.client_y()) - rect.top(),
    )
}

fn in_foreign_object(event: &MouseEvent) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.closest("foreignObject").ok().flatten())
        .is_some()
}
