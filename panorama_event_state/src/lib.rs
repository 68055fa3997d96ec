// Copyright 2025 the Panorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panorama Event State: pointer gesture state for pan/zoom surfaces.
//!
//! This crate provides small state machines that sit between raw input
//! events and a view transform:
//!
//! - [`drag`]: Track a press/move/release sequence and report per-move deltas
//!   and the total displacement since the press.
//! - [`wheel`]: Normalize wheel deltas reported in pixels, lines or pages.
//!
//! Neither module knows about the DOM or about any particular view type; they
//! take positions and raw deltas and return plain Kurbo vectors.
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use panorama_event_state::drag::{DragState, PointerButton};
//! use panorama_event_state::wheel::{DeltaMode, WheelDelta};
//!
//! let mut drag = DragState::default();
//! drag.begin(Point::new(0.0, 0.0), PointerButton::Primary);
//! let total = drag.update(Point::new(4.0, 3.0)).unwrap().total;
//! assert_eq!(total, Vec2::new(4.0, 3.0));
//!
//! let wheel = WheelDelta::new(Vec2::new(0.0, -1.0), DeltaMode::Line);
//! assert_eq!(wheel.to_pixels(Size::new(100.0, 100.0)).y, -16.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod drag;
pub mod wheel;
