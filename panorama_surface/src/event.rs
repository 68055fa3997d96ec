// Copyright 2025 the Panorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size};
use panorama_event_state::drag::PointerButton;
use panorama_event_state::wheel::WheelDelta;

/// Input delivered to [`Surface::handle_event`](crate::Surface::handle_event).
///
/// Positions are in view space: pixels relative to the top-left corner of
/// the host element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceEvent {
    /// A pointer button was pressed.
    PointerDown {
        /// Pointer position.
        pos: Point,
        /// Button that was pressed.
        button: PointerButton,
    },
    /// The pointer moved.
    PointerMove {
        /// Pointer position.
        pos: Point,
    },
    /// A pointer button was released.
    PointerUp {
        /// Pointer position.
        pos: Point,
    },
    /// The pointer left the host element.
    PointerLeave,
    /// The wheel was scrolled.
    Wheel {
        /// Pointer position.
        pos: Point,
        /// Raw wheel movement.
        delta: WheelDelta,
    },
    /// The host element changed size.
    Resize {
        /// New size in pixels.
        size: Size,
    },
}
