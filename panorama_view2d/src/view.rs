// Copyright 2025 the Panorama Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};
use panorama_math::{clamp, half};

use crate::modes::FitMode;

/// Default lower bound for [`ViewTransform::scale`].
pub const DEFAULT_MIN_SCALE: f64 = 0.1;
/// Default upper bound for [`ViewTransform::scale`].
pub const DEFAULT_MAX_SCALE: f64 = 10.0;

/// Pan and zoom state for a display surface.
///
/// `ViewTransform` maps world coordinates (the coordinate system of the
/// content) into view coordinates (pixels relative to the host element). The
/// mapping is a uniform scale followed by a translation made of two parts:
/// - the *pan offset*, driven by drag gestures and zoom-to-pointer;
/// - the *centering offset*, produced by [`ViewTransform::fit_content`].
///
/// The combined mapping is available as [`ViewTransform::transform`] and is
/// what a surface applies to its root graphics group.
#[derive(Clone, Debug)]
pub struct ViewTransform {
    view_size: Size,
    scale: f64,
    offset: Vec2,
    drag_start_offset: Vec2,
    center_offset: Vec2,
    dragging: bool,
    min_scale: f64,
    max_scale: f64,
    fit_mode: FitMode,
    world_to_view: Affine,
    view_to_world: Affine,
}

impl ViewTransform {
    /// Creates a view of the given pixel size at scale `1.0` with no offsets.
    #[must_use]
    pub fn new(view_size: Size) -> Self {
        let mut view = Self {
            view_size,
            scale: 1.0,
            offset: Vec2::ZERO,
            drag_start_offset: Vec2::ZERO,
            center_offset: Vec2::ZERO,
            dragging: false,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            fit_mode: FitMode::default(),
            world_to_view: Affine::IDENTITY,
            view_to_world: Affine::IDENTITY,
        };
        view.rebuild_transforms();
        view
    }

    /// Builder form of [`ViewTransform::set_scale_limits`].
    #[must_use]
    pub fn with_scale_limits(mut self, min_scale: f64, max_scale: f64) -> Self {
        self.set_scale_limits(min_scale, max_scale);
        self
    }

    /// Builder form of [`ViewTransform::set_fit_mode`].
    #[must_use]
    pub fn with_fit_mode(mut self, mode: FitMode) -> Self {
        self.fit_mode = mode;
        self
    }

    /// Returns the view size in pixels.
    #[must_use]
    pub fn view_size(&self) -> Size {
        self.view_size
    }

    /// Sets the view size in pixels.
    ///
    /// Scale and offsets are left alone; callers that want the content to
    /// follow the new size call [`ViewTransform::fit_content`] afterwards.
    pub fn set_view_size(&mut self, size: Size) {
        self.view_size = size;
    }

    /// Returns the current scale factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the configured `(min, max)` scale range.
    #[must_use]
    pub fn scale_limits(&self) -> (f64, f64) {
        (self.min_scale, self.max_scale)
    }

    /// Sets the minimum and maximum scale factors.
    ///
    /// The range is normalized so that `min <= max`, and the current scale is
    /// clamped into it (about the view center).
    pub fn set_scale_limits(&mut self, min_scale: f64, max_scale: f64) {
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self.set_scale(self.scale);
    }

    /// Returns the current pan offset in view space.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Returns the pan offset captured by the last [`ViewTransform::begin_drag`].
    #[must_use]
    pub fn drag_start_offset(&self) -> Vec2 {
        self.drag_start_offset
    }

    /// Returns the content-centering offset computed by the last fit.
    #[must_use]
    pub fn center_offset(&self) -> Vec2 {
        self.center_offset
    }

    /// Returns the current fit mode.
    #[must_use]
    pub fn fit_mode(&self) -> FitMode {
        self.fit_mode
    }

    /// Sets how [`ViewTransform::fit_content`] positions content.
    pub fn set_fit_mode(&mut self, mode: FitMode) {
        self.fit_mode = mode;
    }

    /// Returns `true` between [`ViewTransform::begin_drag`] and [`ViewTransform::end_drag`].
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Returns the world-to-view transform to apply to the root group.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.world_to_view
    }

    /// Starts a drag, remembering the current pan offset.
    pub fn begin_drag(&mut self) {
        self.drag_start_offset = self.offset;
        self.dragging = true;
    }

    /// Sets the pan offset to the drag-start offset plus `total`.
    ///
    /// `total` is the pointer displacement since the drag started, in view
    /// space. Returns `true` if the offset changed. Outside a drag this does
    /// nothing.
    pub fn drag_by(&mut self, total: Vec2) -> bool {
        if !self.dragging {
            return false;
        }
        let offset = self.drag_start_offset + total;
        if offset == self.offset {
            return false;
        }
        self.offset = offset;
        self.rebuild_transforms();
        true
    }

    /// Ends the current drag. The pan offset stays where the drag left it.
    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Pans by a delta in view space. Returns `true` if the offset changed.
    pub fn pan_by(&mut self, delta: Vec2) -> bool {
        if delta == Vec2::ZERO {
            return false;
        }
        self.shift_offset(delta);
        true
    }

    /// Multiplies the scale by `factor`, keeping the world point under
    /// `pointer` (a view-space position) fixed.
    ///
    /// The resulting scale is clamped to the configured range. Returns `true`
    /// if the scale changed; non-positive or non-finite factors are ignored.
    pub fn zoom_at(&mut self, pointer: Point, factor: f64) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let old_scale = self.scale;
        let new_scale = clamp(old_scale * factor, self.min_scale, self.max_scale);
        if (new_scale - old_scale).abs() < f64::EPSILON {
            return false;
        }

        let anchor_world = self.view_to_world_point(pointer);
        self.scale = new_scale;
        self.rebuild_transforms();
        let drifted = self.world_to_view_point(anchor_world);
        self.shift_offset(pointer - drifted);
        true
    }

    /// Sets the scale directly (clamped), zooming about the view center.
    pub fn set_scale(&mut self, scale: f64) -> bool {
        let center = Point::new(half(self.view_size.width), half(self.view_size.height));
        self.zoom_at(center, scale / self.scale)
    }

    /// Frames `bounds` (world space) inside the view.
    ///
    /// `padding` is added around the content, in world units. The scale is
    /// the largest one at which the padded content fits (clamped to the
    /// configured range), the pan offset is reset and the centering offset
    /// positions the content according to the [`FitMode`].
    ///
    /// Returns `false` without changing anything when either the content or
    /// the view is empty.
    pub fn fit_content(&mut self, bounds: Rect, padding: f64) -> bool {
        let padded = bounds.inflate(padding.max(0.0), padding.max(0.0));
        if !(padded.width() > 0.0 && padded.height() > 0.0) {
            return false;
        }
        if !(self.view_size.width > 0.0 && self.view_size.height > 0.0) {
            return false;
        }

        let sx = self.view_size.width / padded.width();
        let sy = self.view_size.height / padded.height();
        self.scale = clamp(sx.min(sy), self.min_scale, self.max_scale);

        self.offset = Vec2::ZERO;
        self.drag_start_offset = Vec2::ZERO;
        self.center_offset = match self.fit_mode {
            FitMode::Center => {
                let view_center = Vec2::new(
                    half(self.view_size.width),
                    half(self.view_size.height),
                );
                view_center - padded.center().to_vec2() * self.scale
            }
            FitMode::AlignMin => -padded.origin().to_vec2() * self.scale,
        };
        self.rebuild_transforms();
        true
    }

    /// Returns to scale `1.0` with all offsets cleared.
    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.offset = Vec2::ZERO;
        self.drag_start_offset = Vec2::ZERO;
        self.center_offset = Vec2::ZERO;
        self.dragging = false;
        self.rebuild_transforms();
    }

    /// Returns the world-space rectangle currently visible.
    #[must_use]
    pub fn visible_world_rect(&self) -> Rect {
        self.view_to_world_rect(self.view_size.to_rect())
    }

    /// Converts a world-space point into view coordinates.
    #[must_use]
    pub fn world_to_view_point(&self, pt: Point) -> Point {
        self.world_to_view * pt
    }

    /// Converts a view-space point into world coordinates.
    #[must_use]
    pub fn view_to_world_point(&self, pt: Point) -> Point {
        self.view_to_world * pt
    }

    /// Converts a world-space rectangle into view coordinates.
    #[must_use]
    pub fn world_to_view_rect(&self, rect: Rect) -> Rect {
        // Axis-aligned with uniform positive scale, so the corners map to corners.
        Rect::from_points(
            self.world_to_view * rect.origin(),
            self.world_to_view * Point::new(rect.x1, rect.y1),
        )
    }

    /// Converts a view-space rectangle into world coordinates.
    #[must_use]
    pub fn view_to_world_rect(&self, rect: Rect) -> Rect {
        Rect::from_points(
            self.view_to_world * rect.origin(),
            self.view_to_world * Point::new(rect.x1, rect.y1),
        )
    }

    /// Snapshot of the current state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewDebugInfo {
        ViewDebugInfo {
            view_size: self.view_size,
            visible_world_rect: self.visible_world_rect(),
            scale: self.scale,
            offset: self.offset,
            drag_start_offset: self.drag_start_offset,
            center_offset: self.center_offset,
            dragging: self.dragging,
            min_scale: self.min_scale,
            max_scale: self.max_scale,
            fit_mode: self.fit_mode,
        }
    }

    fn shift_offset(&mut self, delta: Vec2) {
        self.offset += delta;
        // Keep an in-flight drag consistent with offsets applied mid-gesture,
        // otherwise the next `drag_by` would undo them.
        if self.dragging {
            self.drag_start_offset += delta;
        }
        self.rebuild_transforms();
    }

    fn rebuild_transforms(&mut self) {
        self.world_to_view =
            Affine::translate(self.center_offset + self.offset) * Affine::scale(self.scale);
        self.view_to_world = self.world_to_view.inverse();
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

/// Debug snapshot of a [`ViewTransform`].
#[derive(Clone, Copy, Debug)]
pub struct ViewDebugInfo {
    /// View size in pixels.
    pub view_size: Size,
    /// World-space rectangle currently visible.
    pub visible_world_rect: Rect,
    /// Current scale factor.
    pub scale: f64,
    /// Current pan offset.
    pub offset: Vec2,
    /// Pan offset at the start of the last drag.
    pub drag_start_offset: Vec2,
    /// Content-centering offset from the last fit.
    pub center_offset: Vec2,
    /// Whether a drag is in progress.
    pub dragging: bool,
    /// Minimum scale factor.
    pub min_scale: f64,
    /// Maximum scale factor.
    pub max_scale: f64,
    /// Fit mode used by [`ViewTransform::fit_content`].
    pub fit_mode: FitMode,
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size, Vec2};

    use super::{DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE, FitMode, ViewTransform};

    fn assert_close(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn world_view_roundtrip() {
        let mut view = ViewTransform::new(Size::new(800.0, 600.0));
        view.pan_by(Vec2::new(30.0, -12.0));
        view.set_scale(2.5);

        let world = Point::new(10.0, -5.0);
        let back = view.view_to_world_point(view.world_to_view_point(world));
        assert_close(back, world);
    }

    #[test]
    fn drag_applies_total_displacement_to_start_offset() {
        let mut view = ViewTransform::new(Size::new(800.0, 600.0));
        view.pan_by(Vec2::new(10.0, 10.0));

        view.begin_drag();
        assert_eq!(view.drag_start_offset(), Vec2::new(10.0, 10.0));
        assert!(view.drag_by(Vec2::new(5.0, 0.0)));
        assert!(view.drag_by(Vec2::new(20.0, -4.0)));
        view.end_drag();

        assert_eq!(view.offset(), Vec2::new(30.0, 6.0));
        assert!(!view.is_dragging());
    }

    #[test]
    fn drag_by_outside_drag_is_ignored() {
        let mut view = ViewTransform::new(Size::new(100.0, 100.0));
        assert!(!view.drag_by(Vec2::new(5.0, 5.0)));
        assert_eq!(view.offset(), Vec2::ZERO);
    }

    #[test]
    fn zoom_at_keeps_pointer_anchor_fixed() {
        let mut view = ViewTransform::new(Size::new(800.0, 600.0));
        view.pan_by(Vec2::new(-40.0, 25.0));

        let pointer = Point::new(123.0, 456.0);
        let before = view.view_to_world_point(pointer);
        assert!(view.zoom_at(pointer, 1.8));
        let after = view.view_to_world_point(pointer);

        assert_close(before, after);
        assert!((view.scale() - 1.8).abs() < 1e-12);
    }

    #[test]
    fn zoom_is_clamped_to_range() {
        let mut view = ViewTransform::new(Size::new(800.0, 600.0));
        view.zoom_at(Point::ZERO, 1e6);
        assert_eq!(view.scale(), DEFAULT_MAX_SCALE);
        // Already at the limit: no change reported.
        assert!(!view.zoom_at(Point::ZERO, 2.0));

        view.zoom_at(Point::ZERO, 1e-9);
        assert_eq!(view.scale(), DEFAULT_MIN_SCALE);
    }

    #[test]
    fn zoom_ignores_invalid_factors() {
        let mut view = ViewTransform::new(Size::new(800.0, 600.0));
        assert!(!view.zoom_at(Point::ZERO, 0.0));
        assert!(!view.zoom_at(Point::ZERO, -2.0));
        assert!(!view.zoom_at(Point::ZERO, f64::NAN));
        assert_eq!(view.scale(), 1.0);
    }

    #[test]
    fn zoom_during_drag_is_not_undone_by_next_drag_update() {
        let mut view = ViewTransform::new(Size::new(400.0, 400.0));
        view.begin_drag();
        view.drag_by(Vec2::new(10.0, 0.0));

        let pointer = Point::new(200.0, 200.0);
        let anchor = view.view_to_world_point(pointer);
        view.zoom_at(pointer, 2.0);
        // Same total displacement as before the zoom.
        view.drag_by(Vec2::new(10.0, 0.0));

        assert_close(view.view_to_world_point(pointer), anchor);
    }

    #[test]
    fn fit_content_centers_and_scales() {
        let mut view = ViewTransform::new(Size::new(200.0, 100.0));
        let content = Rect::new(-50.0, -25.0, 50.0, 25.0);
        assert!(view.fit_content(content, 0.0));

        assert!((view.scale() - 2.0).abs() < 1e-12);
        assert_eq!(view.offset(), Vec2::ZERO);
        assert_close(
            view.world_to_view_point(content.center()),
            Point::new(100.0, 50.0),
        );
        let visible = view.visible_world_rect();
        assert!(visible.min_x() <= content.min_x() + 1e-9);
        assert!(visible.max_x() >= content.max_x() - 1e-9);
        assert!(visible.min_y() <= content.min_y() + 1e-9);
        assert!(visible.max_y() >= content.max_y() - 1e-9);
    }

    #[test]
    fn fit_content_with_padding_shrinks_scale() {
        let mut view = ViewTransform::new(Size::new(100.0, 100.0));
        view.fit_content(Rect::new(0.0, 0.0, 80.0, 80.0), 10.0);
        assert!((view.scale() - 1.0).abs() < 1e-12);
        assert_close(view.world_to_view_point(Point::ZERO), Point::new(10.0, 10.0));
    }

    #[test]
    fn fit_content_align_min() {
        let mut view =
            ViewTransform::new(Size::new(200.0, 100.0)).with_fit_mode(FitMode::AlignMin);
        let content = Rect::new(-50.0, -20.0, 150.0, 80.0);
        view.fit_content(content, 0.0);
        assert_close(view.world_to_view_point(content.origin()), Point::ZERO);
    }

    #[test]
    fn fit_content_resets_pan_but_keeps_centering() {
        let mut view = ViewTransform::new(Size::new(100.0, 100.0));
        view.pan_by(Vec2::new(300.0, 300.0));
        view.fit_content(Rect::new(10.0, 10.0, 20.0, 20.0), 0.0);
        assert_eq!(view.offset(), Vec2::ZERO);
        assert_eq!(view.center_offset(), Vec2::new(-100.0, -100.0));
        // 10x10 at scale 10 exactly fills the view.
        assert_close(
            view.world_to_view_point(Point::new(10.0, 10.0)),
            Point::ZERO,
        );
    }

    #[test]
    fn fit_content_ignores_degenerate_input() {
        let mut view = ViewTransform::new(Size::new(100.0, 100.0));
        assert!(!view.fit_content(Rect::new(5.0, 5.0, 5.0, 20.0), 0.0));

        let mut empty_view = ViewTransform::default();
        assert!(!empty_view.fit_content(Rect::new(0.0, 0.0, 10.0, 10.0), 0.0));
        assert_eq!(empty_view.scale(), 1.0);
    }

    #[test]
    fn scale_limits_are_normalized_and_applied() {
        let mut view = ViewTransform::new(Size::new(100.0, 100.0));
        view.set_scale(8.0);
        view.set_scale_limits(4.0, 0.5);
        assert_eq!(view.scale_limits(), (0.5, 4.0));
        assert_eq!(view.scale(), 4.0);
    }

    #[test]
    fn reset_and_debug_info() {
        let mut view = ViewTransform::new(Size::new(300.0, 200.0));
        view.fit_content(Rect::new(0.0, 0.0, 30.0, 20.0), 0.0);
        view.pan_by(Vec2::new(4.0, 4.0));
        view.reset();

        let info = view.debug_info();
        assert_eq!(info.scale, 1.0);
        assert_eq!(info.offset, Vec2::ZERO);
        assert_eq!(info.center_offset, Vec2::ZERO);
        assert_eq!(info.visible_world_rect, Rect::new(0.0, 0.0, 300.0, 200.0));
        assert!(!info.dragging);
    }
}
