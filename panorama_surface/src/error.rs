// Copyright 2025 the Panorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;

use panorama_scene::SceneError;

use crate::config::RenderMode;

/// Error returned by [`Surface`](crate::Surface) operations.
///
/// The initialization variants are fatal: a surface that failed to
/// initialize stays uninitialized and there is no retry logic.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceError {
    /// [`Surface::init`](crate::Surface::init) was called on a surface (or an
    /// anchor) that is already initialized.
    AlreadyInitialized,
    /// No element with the given id exists in the document.
    MissingAnchor(String),
    /// The host cannot render in the configured mode.
    UnsupportedRenderMode(RenderMode),
    /// The configuration is unusable; the message names the offending field.
    InvalidConfig(&'static str),
    /// A display-tree operation failed.
    Scene(SceneError),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyInitialized => f.write_str("surface is already initialized"),
            Self::MissingAnchor(id) => write!(f, "no anchor element with id `{id}`"),
            Self::UnsupportedRenderMode(mode) => {
                write!(f, "render mode {mode:?} is not supported by this host")
            }
            Self::InvalidConfig(msg) => write!(f, "invalid surface config: {msg}"),
            Self::Scene(err) => write!(f, "scene error: {err}"),
        }
    }
}

impl std::error::Error for SurfaceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Scene(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SceneError> for SurfaceError {
    fn from(err: SceneError) -> Self {
        Self::Scene(err)
    }
}
