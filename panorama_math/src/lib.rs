// Copyright 2025 the Panorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panorama Math: scalar helpers shared by the view and surface crates.
//!
//! These are deliberately tiny and stateless:
//! - [`lerp`] / [`inverse_lerp`] / [`remap`] for interpolation.
//! - [`clamp`] for range limiting with a forgiving argument order.
//! - [`half`] for the many "center of an extent" computations.
//!
//! ```rust
//! use panorama_math::{clamp, half, lerp};
//!
//! assert_eq!(lerp(10.0, 20.0, 0.25), 12.5);
//! assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
//! assert_eq!(half(800.0), 400.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

/// Linearly interpolates between `a` and `b`.
///
/// `t` is not clamped, so values outside `0.0..=1.0` extrapolate.
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Returns the interpolation parameter of `value` between `a` and `b`.
///
/// Returns `0.0` when the range is empty.
#[must_use]
pub fn inverse_lerp(a: f64, b: f64, value: f64) -> f64 {
    let span = b - a;
    if span == 0.0 {
        return 0.0;
    }
    (value - a) / span
}

/// Maps `value` from the range `from` onto the range `to`.
#[must_use]
pub fn remap(value: f64, from: (f64, f64), to: (f64, f64)) -> f64 {
    lerp(to.0, to.1, inverse_lerp(from.0, from.1, value))
}

/// Clamps `value` into the range spanned by `min` and `max`.
///
/// Unlike [`f64::clamp`], a reversed range is normalized rather than
/// panicking, and a NaN `value` is passed through unchanged.
#[must_use]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

/// Returns half of `value`.
#[must_use]
pub fn half(value: f64) -> f64 {
    value * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints_and_extrapolation() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp(2.0, 6.0, 0.5), 4.0);
        assert_eq!(lerp(2.0, 6.0, 1.5), 8.0);
    }

    #[test]
    fn inverse_lerp_handles_empty_range() {
        assert_eq!(inverse_lerp(3.0, 3.0, 10.0), 0.0);
        assert_eq!(inverse_lerp(0.0, 10.0, 2.5), 0.25);
    }

    #[test]
    fn remap_between_ranges() {
        assert_eq!(remap(5.0, (0.0, 10.0), (100.0, 200.0)), 150.0);
        assert_eq!(remap(0.0, (0.0, 10.0), (1.0, -1.0)), 1.0);
    }

    #[test]
    fn clamp_normalizes_reversed_range() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 10.0, 0.0), 10.0);
        assert!(clamp(f64::NAN, 0.0, 1.0).is_nan());
    }

    #[test]
    fn half_of_values() {
        assert_eq!(half(10.0), 5.0);
        assert_eq!(half(-3.0), -1.5);
        assert_eq!(half(0.0), 0.0);
    }
}
