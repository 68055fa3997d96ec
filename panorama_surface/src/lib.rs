// Copyright 2025 the Panorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panorama Surface: a pannable, zoomable SVG display surface.
//!
//! A [`Surface`] combines a [`Scene`](panorama_scene::Scene) of nested
//! elements with a [`ViewTransform`](panorama_view2d::ViewTransform) and the
//! gesture state that drives it:
//!
//! - dragging with the primary or middle button pans,
//! - the wheel zooms about the pointer, clamped to the configured scale range,
//! - [`Surface::fit_to_content`] scales and centers the content in the view.
//!
//! The surface draws through a [`SurfaceHost`]. [`MarkupHost`] keeps the
//! markup in memory; on `wasm32` the `web` module provides `WebHost`, which
//! mirrors the scene into a live `<svg>` element, and `web::mount`, which
//! wires DOM events to the surface.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size, Vec2};
//! use panorama_surface::{
//!     MarkupHost, PointerButton, Surface, SurfaceConfig, SurfaceEvent, WheelDelta,
//! };
//!
//! let host = MarkupHost::new().with_anchor("stage", Size::new(800.0, 600.0));
//! let mut surface = Surface::new(host, SurfaceConfig::default().with_fit_on_init(false));
//! surface
//!     .update(|scene| scene.rect(scene.root(), Rect::new(0.0, 0.0, 100.0, 100.0)))
//!     .unwrap();
//! surface.init("stage").unwrap();
//!
//! // Drag 30px to the right.
//! let down = SurfaceEvent::PointerDown { pos: Point::new(10.0, 10.0), button: PointerButton::Primary };
//! surface.handle_event(down);
//! surface.handle_event(SurfaceEvent::PointerMove { pos: Point::new(40.0, 10.0) });
//! surface.handle_event(SurfaceEvent::PointerUp { pos: Point::new(40.0, 10.0) });
//! assert_eq!(surface.view().offset(), Vec2::new(30.0, 0.0));
//!
//! // Scroll up to zoom in about the pointer.
//! let wheel = SurfaceEvent::Wheel { pos: Point::new(400.0, 300.0), delta: WheelDelta::pixels(Vec2::new(0.0, -100.0)) };
//! assert!(surface.handle_event(wheel));
//! assert!(surface.view().scale() > 1.0);
//! ```
//!
//! ## Logging
//!
//! Lifecycle and view changes are reported through the [`log`] facade.
//! In the browser, call `web::init_logging` to route them to the console.

mod config;
mod error;
mod event;
mod host;
mod surface;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{RenderMode, SurfaceConfig};
pub use error::SurfaceError;
pub use event::SurfaceEvent;
pub use host::{MarkupHost, SurfaceHost};
pub use surface::Surface;

pub use panorama_event_state::drag::PointerButton;
pub use panorama_event_state::wheel::{DeltaMode, WheelDelta};
pub use panorama_scene;
pub use panorama_view2d::FitMode;
