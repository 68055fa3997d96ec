// Copyright 2025 the Panorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use panorama_view2d::{DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE, FitMode};

use crate::error::SurfaceError;

/// How a surface draws into its host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RenderMode {
    /// Retained SVG elements.
    #[default]
    Svg,
    /// Immediate-mode 2D canvas. No host currently supports it.
    Canvas,
}

/// Tunables for a [`Surface`](crate::Surface).
///
/// All fields have defaults; with the `serde` feature the struct can be
/// loaded from JSON (or any serde format) with missing fields filled in.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SurfaceConfig {
    /// Smallest allowed scale.
    pub min_scale: f64,
    /// Largest allowed scale.
    pub max_scale: f64,
    /// Zoom factor per wheel pixel: a wheel movement of `dy` pixels zooms by
    /// `exp(-dy * wheel_zoom_speed)`.
    pub wheel_zoom_speed: f64,
    /// Padding around the content when fitting, in content units.
    pub fit_padding: f64,
    /// How fitted content is positioned.
    pub fit_mode: FitMode,
    /// Requested render mode.
    pub render_mode: RenderMode,
    /// Fit the content into view right after initialization.
    pub fit_on_init: bool,
    /// Refit the content whenever the host is resized.
    pub fit_on_resize: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            wheel_zoom_speed: 0.0015,
            fit_padding: 0.0,
            fit_mode: FitMode::Center,
            render_mode: RenderMode::Svg,
            fit_on_init: true,
            fit_on_resize: false,
        }
    }
}

impl SurfaceConfig {
    /// Sets the scale range.
    #[must_use]
    pub fn with_scale_limits(mut self, min_scale: f64, max_scale: f64) -> Self {
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self
    }

    /// Sets the wheel zoom speed.
    #[must_use]
    pub fn with_wheel_zoom_speed(mut self, speed: f64) -> Self {
        self.wheel_zoom_speed = speed;
        self
    }

    /// Sets the fit padding.
    #[must_use]
    pub fn with_fit_padding(mut self, padding: f64) -> Self {
        self.fit_padding = padding;
        self
    }

    /// Sets the fit mode.
    #[must_use]
    pub fn with_fit_mode(mut self, mode: FitMode) -> Self {
        self.fit_mode = mode;
        self
    }

    /// Sets the render mode.
    #[must_use]
    pub fn with_render_mode(mut self, mode: RenderMode) -> Self {
        self.render_mode = mode;
        self
    }

    /// Sets whether to fit on initialization.
    #[must_use]
    pub fn with_fit_on_init(mut self, fit: bool) -> Self {
        self.fit_on_init = fit;
        self
    }

    /// Sets whether to refit on resize.
    #[must_use]
    pub fn with_fit_on_resize(mut self, fit: bool) -> Self {
        self.fit_on_resize = fit;
        self
    }

    /// Checks that the numeric fields are usable.
    pub fn validate(&self) -> Result<(), SurfaceError> {
        if !(self.min_scale.is_finite() && self.min_scale > 0.0) {
            return Err(SurfaceError::InvalidConfig("min_scale must be finite and positive"));
        }
        if !(self.max_scale.is_finite() && self.max_scale > 0.0) {
            return Err(SurfaceError::InvalidConfig("max_scale must be finite and positive"));
        }
        if !(self.wheel_zoom_speed.is_finite() && self.wheel_zoom_speed >= 0.0) {
            return Err(SurfaceError::InvalidConfig(
                "wheel_zoom_speed must be finite and non-negative",
            ));
        }
        if !(self.fit_padding.is_finite() && self.fit_padding >= 0.0) {
            return Err(SurfaceError::InvalidConfig(
                "fit_padding must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SurfaceConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.min_scale, 0.1);
        assert_eq!(config.max_scale, 10.0);
        assert_eq!(config.render_mode, RenderMode::Svg);
    }

    #[test]
    fn rejects_bad_numbers() {
        let bad = SurfaceConfig::default().with_scale_limits(0.0, 4.0);
        assert_eq!(
            bad.validate(),
            Err(SurfaceError::InvalidConfig("min_scale must be finite and positive"))
        );
        let bad = SurfaceConfig::default().with_scale_limits(0.1, f64::INFINITY);
        assert_eq!(
            bad.validate(),
            Err(SurfaceError::InvalidConfig(
                "max_scale must be finite and positive"
            ))
        );
        let bad = SurfaceConfig::default().with_wheel_zoom_speed(f64::NAN);
        assert!(bad.validate().is_err());
        let bad = SurfaceConfig::default().with_fit_padding(-1.0);
        assert!(bad.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn loads_partial_json() {
        let config: SurfaceConfig =
            serde_json::from_str(r#"{ "max_scale": 4.0, "render_mode": "canvas" }"#).unwrap();
        assert_eq!(config.max_scale, 4.0);
        assert_eq!(config.min_scale, 0.1);
        assert_eq!(config.render_mode, RenderMode::Canvas);
        assert_eq!(config.fit_mode, FitMode::Center);
    }
}
