// Copyright 2025 the Panorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panorama Scene: a retained SVG display tree.
//!
//! The scene is the content of a display surface: a tree of groups, shapes,
//! text, editable form fields and references to externally defined symbols,
//! all hanging off one root group. A surface applies its pan/zoom transform to
//! that root group; everything below it is expressed in content ("world")
//! coordinates.
//!
//! - [`Scene`]: the node arena and the element factory.
//! - [`NodeId`]: generational handle of a node.
//! - [`Element`]: what a node draws; [`Style`] and [`Paint`]: how.
//! - [`TextElement`], [`InputElement`], [`SymbolUse`]: payloads of the richer elements.
//! - [`svg`]: markup helpers; [`Scene::to_svg_document`] renders a standalone document.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Affine, Circle, Rect, Size};
//! use peniko::Color;
//! use panorama_scene::{InputElement, Scene, Style, TextElement};
//!
//! let mut scene = Scene::new();
//! let root = scene.root();
//!
//! let card = scene.group(root).unwrap();
//! scene.set_transform(card, Affine::translate((40.0, 40.0))).unwrap();
//! let bg = scene.rect(card, Rect::new(0.0, 0.0, 200.0, 120.0)).unwrap();
//! scene.set_style(bg, Style::filled(Color::WHITE)).unwrap();
//! scene.circle(card, Circle::new((20.0, 20.0), 8.0)).unwrap();
//! scene.text(card, TextElement::new((40.0, 26.0).into(), "Name")).unwrap();
//! scene
//!     .input(card, InputElement::new(Rect::new(10.0, 50.0, 190.0, 74.0)).with_placeholder("type here"))
//!     .unwrap();
//! scene.symbol_use(card, "icons.svg#gear", Rect::new(170.0, 90.0, 190.0, 110.0)).unwrap();
//!
//! assert_eq!(scene.content_bounds(), Some(Rect::new(40.0, 40.0, 240.0, 160.0)));
//!
//! let svg = scene.to_svg_document(Size::new(800.0, 600.0), Affine::IDENTITY);
//! assert!(svg.starts_with("<svg"));
//! assert!(svg.contains("<use href=\"icons.svg#gear\""));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod scene;
pub mod svg;
mod types;

pub use error::SceneError;
pub use scene::Scene;
pub use types::{
    Element, InputElement, InputKind, NodeId, Paint, Style, SymbolUse, TextAnchor, TextElement,
};
