// Copyright 2025 the Panorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag tracking: turn a press/move/release sequence into pan displacements.
//!
//! ## Usage
//!
//! 1) Call [`DragState::begin`] on pointer press with the position and button.
//! 2) On each move, call [`DragState::update`]; it yields both the delta since
//!    the previous move and the total displacement since the press.
//! 3) Call [`DragState::end`] on release (or when the pointer leaves the host).
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use panorama_event_state::drag::{DragState, PointerButton};
//!
//! let mut drag = DragState::default();
//! drag.begin(Point::new(10.0, 20.0), PointerButton::Primary);
//!
//! let step = drag.update(Point::new(15.0, 25.0)).unwrap();
//! assert_eq!(step.delta, Vec2::new(5.0, 5.0));
//! assert_eq!(step.total, Vec2::new(5.0, 5.0));
//!
//! let step = drag.update(Point::new(12.0, 30.0)).unwrap();
//! assert_eq!(step.delta, Vec2::new(-3.0, 5.0));
//! assert_eq!(step.total, Vec2::new(2.0, 10.0));
//!
//! assert_eq!(drag.end(), Some(Vec2::new(2.0, 10.0)));
//! assert!(!drag.is_dragging());
//! ```

use kurbo::{Point, Vec2};

/// Pointer button that started a drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Usually the left mouse button.
    Primary,
    /// Usually the wheel button.
    Auxiliary,
    /// Usually the right mouse button.
    Secondary,
    /// Any other button, by its DOM `MouseEvent.button` number.
    Other(i16),
}

impl PointerButton {
    /// Maps a DOM `MouseEvent.button` value.
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            other => Self::Other(other),
        }
    }
}

/// Movement reported by [`DragState::update`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragUpdate {
    /// Movement since the previous update (or since the press).
    pub delta: Vec2,
    /// Movement since the press.
    pub total: Vec2,
}

/// Tracks a single in-progress drag.
#[derive(Clone, Copy, Debug, Default)]
pub struct DragState {
    active: Option<ActiveDrag>,
}

#[derive(Clone, Copy, Debug)]
struct ActiveDrag {
    start: Point,
    last: Point,
    button: PointerButton,
}

impl DragState {
    /// Starts tracking a drag at `pos`, replacing any drag in progress.
    pub fn begin(&mut self, pos: Point, button: PointerButton) {
        self.active = Some(ActiveDrag {
            start: pos,
            last: pos,
            button,
        });
    }

    /// Records a pointer move. Returns `None` when no drag is active.
    pub fn update(&mut self, pos: Point) -> Option<DragUpdate> {
        let active = self.active.as_mut()?;
        let delta = pos - active.last;
        active.last = pos;
        Some(DragUpdate {
            delta,
            total: pos - active.start,
        })
    }

    /// Ends the drag, returning the total displacement if one was active.
    pub fn end(&mut self) -> Option<Vec2> {
        self.active.take().map(|a| a.last - a.start)
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Position where the active drag started.
    #[must_use]
    pub fn start_pos(&self) -> Option<Point> {
        self.active.map(|a| a.start)
    }

    /// Button that started the active drag.
    #[must_use]
    pub fn button(&self) -> Option<PointerButton> {
        self.active.map(|a| a.button)
    }
}
