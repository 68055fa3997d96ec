// Copyright 2025 the Panorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// How fitted content is positioned inside the view.
///
/// Consulted by [`crate::ViewTransform::fit_content`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitMode {
    /// Center the fitted content within the view.
    #[default]
    Center,
    /// Align the minimum corner of the fitted content with the view origin.
    AlignMin,
}
