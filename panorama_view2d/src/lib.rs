// Copyright 2025 the Panorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panorama View 2D: the pan/zoom transform behind a display surface.
//!
//! This crate provides a small, headless model of a pannable, zoomable view
//! whose extents are expressed in device pixels. It focuses on:
//! - Drag panning expressed as "offset at drag start + pointer displacement".
//! - Zoom-to-pointer: scaling while keeping the world point under the cursor fixed.
//! - Content fitting: framing a world-space rectangle inside the view.
//! - Coordinate conversion between world and view space.
//!
//! It does **not** own any display tree or DOM. Callers are expected to:
//! - Keep their own scene and apply [`ViewTransform::transform`] to its root group.
//! - Translate raw input events into [`ViewTransform::begin_drag`],
//!   [`ViewTransform::drag_by`] and [`ViewTransform::zoom_at`] calls.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size, Vec2};
//! use panorama_view2d::ViewTransform;
//!
//! let mut view = ViewTransform::new(Size::new(800.0, 600.0));
//! view.fit_content(Rect::new(0.0, 0.0, 400.0, 300.0), 0.0);
//! assert_eq!(view.scale(), 2.0);
//!
//! // Drag the content 20px to the right.
//! view.begin_drag();
//! view.drag_by(Vec2::new(20.0, 0.0));
//! view.end_drag();
//!
//! // Zoom in at the cursor; the world point under it stays put.
//! let cursor = Point::new(100.0, 100.0);
//! let before = view.view_to_world_point(cursor);
//! view.zoom_at(cursor, 1.25);
//! let after = view.view_to_world_point(cursor);
//! assert!((before - after).hypot() < 1e-9);
//! ```
//!
//! ## Design notes
//!
//! - The view is axis-aligned with a **uniform** scale clamped to a fixed range
//!   (`0.1..=10.0` unless configured otherwise).
//! - Offsets live in view space so that drag deltas apply without conversion.
//!
//! This crate is `no_std`.

#![no_std]

mod modes;
mod view;

pub use modes::FitMode;
pub use view::{DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE, ViewDebugInfo, ViewTransform};
