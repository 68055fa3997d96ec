// Copyright 2025 the Panorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wheel delta normalization.
//!
//! Browsers report wheel movement in pixels, lines or pages depending on the
//! device and platform. [`WheelDelta::to_pixels`] folds all three into pixels
//! so that zoom speed does not depend on where the event came from.
//!
//! ```
//! use kurbo::{Size, Vec2};
//! use panorama_event_state::wheel::{DeltaMode, WheelDelta};
//!
//! let lines = WheelDelta::new(Vec2::new(0.0, 3.0), DeltaMode::Line);
//! assert_eq!(lines.to_pixels(Size::new(800.0, 600.0)), Vec2::new(0.0, 48.0));
//! ```

use kurbo::{Size, Vec2};

/// Pixels per line for [`DeltaMode::Line`] deltas.
pub const LINE_HEIGHT: f64 = 16.0;

/// Unit of a wheel delta, mirroring DOM `WheelEvent.deltaMode`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DeltaMode {
    /// Delta is in pixels.
    #[default]
    Pixel,
    /// Delta is in lines.
    Line,
    /// Delta is in pages.
    Page,
}

impl DeltaMode {
    /// Maps a DOM `WheelEvent.deltaMode` value; unknown values are treated as pixels.
    #[must_use]
    pub fn from_dom(mode: u32) -> Self {
        match mode {
            1 => Self::Line,
            2 => Self::Page,
            _ => Self::Pixel,
        }
    }
}

/// A raw wheel movement and its unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelDelta {
    /// Raw delta as reported by the event.
    pub delta: Vec2,
    /// Unit of `delta`.
    pub mode: DeltaMode,
}

impl WheelDelta {
    /// Creates a wheel delta.
    #[must_use]
    pub fn new(delta: Vec2, mode: DeltaMode) -> Self {
        Self { delta, mode }
    }

    /// Creates a wheel delta already expressed in pixels.
    #[must_use]
    pub fn pixels(delta: Vec2) -> Self {
        Self::new(delta, DeltaMode::Pixel)
    }

    /// Converts the delta into pixels; a page is the size of the view.
    #[must_use]
    pub fn to_pixels(self, page: Size) -> Vec2 {
        match self.mode {
            DeltaMode::Pixel => self.delta,
            DeltaMode::Line => self.delta * LINE_HEIGHT,
            DeltaMode::Page => Vec2::new(self.delta.x * page.width, self.delta.y * page.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_deltas_pass_through() {
        let d = WheelDelta::pixels(Vec2::new(1.5, -2.0));
        assert_eq!(d.to_pixels(Size::new(10.0, 10.0)), Vec2::new(1.5, -2.0));
    }

    #[test]
    fn page_deltas_scale_by_view_size() {
        let d = WheelDelta::new(Vec2::new(1.0, -0.5), DeltaMode::Page);
        assert_eq!(d.to_pixels(Size::new(800.0, 600.0)), Vec2::new(800.0, -300.0));
    }

    #[test]
    fn dom_mode_mapping() {
        assert_eq!(DeltaMode::from_dom(0), DeltaMode::Pixel);
        assert_eq!(DeltaMode::from_dom(1), DeltaMode::Line);
        assert_eq!(DeltaMode::from_dom(2), DeltaMode::Page);
        assert_eq!(DeltaMode::from_dom(9), DeltaMode::Pixel);
    }
}
