// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Track geometry and the soft clamp applied at either end of the track.

use kurbo::Size;

/// Measured dimensions of the carousel track.
///
/// The carousel is a horizontal strip of `image_count` images inside a
/// viewport ("mask") that shows `visible_images` of them at once. Offsets are
/// expressed as the horizontal translation of the strip: `0.0` shows the first
/// section and [`min_x`](Self::min_x) shows the last.
///
/// Every derived quantity is recomputed on use and returns `None` until the
/// measurements it depends on have been reported.
///
/// ```rust
/// use understory_carousel::TrackGeometry;
///
/// let mut track = TrackGeometry::new(3);
/// assert_eq!(track.full_section(), None);
///
/// track.set_mask_width(Some(300.0));
/// track.set_container_width(Some(500.0));
/// track.set_image_count(Some(5));
///
/// assert_eq!(track.full_section(), Some(100.0));
/// assert_eq!(track.min_x(), Some(-200.0));
/// assert_eq!(track.section_count(), Some(2));
/// assert_eq!(track.x_for_index(2), Some(-200.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TrackGeometry {
    mask_width: Option<f64>,
    container_width: Option<f64>,
    image_count: Option<usize>,
    visible_images: usize,
}

impl TrackGeometry {
    /// Creates an unmeasured track showing `visible_images` images at a time.
    ///
    /// A count of zero is treated as one.
    #[must_use]
    pub fn new(visible_images: usize) -> Self {
        Self {
            mask_width: None,
            container_width: None,
            image_count: None,
            visible_images: visible_images.max(1),
        }
    }

    /// Width of the visible viewport, if measured.
    #[must_use]
    pub fn mask_width(&self) -> Option<f64> {
        self.mask_width
    }

    /// Sets the width of the visible viewport.
    ///
    /// Non-finite widths are treated as unmeasured.
    pub fn set_mask_width(&mut self, width: Option<f64>) {
        self.mask_width = width.filter(|w| w.is_finite());
    }

    /// Total width of the image strip, if measured.
    #[must_use]
    pub fn container_width(&self) -> Option<f64> {
        self.container_width
    }

    /// Sets the total width of the image strip.
    ///
    /// Non-finite widths are treated as unmeasured.
    pub fn set_container_width(&mut self, width: Option<f64>) {
        self.container_width = width.filter(|w| w.is_finite());
    }

    /// Number of images on the track, if known.
    #[must_use]
    pub fn image_count(&self) -> Option<usize> {
        self.image_count
    }

    /// Sets the number of images on the track.
    pub fn set_image_count(&mut self, count: Option<usize>) {
        self.image_count = count;
    }

    /// Number of images shown side by side.
    #[must_use]
    pub fn visible_images(&self) -> usize {
        self.visible_images
    }

    /// Sets the number of images shown side by side (at least one).
    pub fn set_visible_images(&mut self, count: usize) {
        self.visible_images = count.max(1);
    }

    /// Width of one section: the mask divided evenly among visible images.
    #[must_use]
    pub fn full_section(&self) -> Option<f64> {
        let visible = self.visible_images as f64;
        self.mask_width.map(|mask| mask / visible)
    }

    /// Half of [`full_section`](Self::full_section).
    #[must_use]
    pub fn half_section(&self) -> Option<f64> {
        self.full_section().map(|full| full / 2.0)
    }

    /// Half of [`half_section`](Self::half_section); the snapping tolerance.
    #[must_use]
    pub fn quarter_section(&self) -> Option<f64> {
        self.half_section().map(|half| half / 2.0)
    }

    /// Leftmost legal offset. Never positive.
    #[must_use]
    pub fn min_x(&self) -> Option<f64> {
        let container = self.container_width?;
        let mask = self.mask_width?;
        Some((-(container - mask)).min(0.0))
    }

    /// Number of snap positions beyond the first.
    ///
    /// Zero when every image fits in the mask at once.
    #[must_use]
    pub fn section_count(&self) -> Option<usize> {
        self.image_count
            .map(|count| count.saturating_sub(self.visible_images))
    }

    /// Clamps a section index into `[0, section_count]`.
    #[must_use]
    pub fn clamp_index(&self, index: usize) -> Option<usize> {
        self.section_count().map(|count| index.min(count))
    }

    /// Offset that aligns section `index` with the left edge of the mask.
    #[must_use]
    pub fn x_for_index(&self, index: usize) -> Option<f64> {
        self.full_section().map(|full| -(full * index as f64))
    }

    /// Distance from the start of the track to the center of section `index`.
    #[must_use]
    pub fn section_center(&self, index: usize) -> Option<f64> {
        let full = self.full_section()?;
        Some(full * index as f64 + full / 2.0)
    }

    /// Size each image should be laid out at, given the mask size.
    #[must_use]
    pub fn item_size(&self, mask: Size) -> Size {
        Size::new(mask.width / self.visible_images as f64, mask.height)
    }

    /// `true` if `x` is at or past the first section (the left end has been hit).
    #[must_use]
    pub fn has_hit_left_end(&self, x: f64) -> bool {
        x >= 0.0
    }

    /// `true` if `x` is at or past the last section (the right end has been hit).
    ///
    /// Always `false` while the track is unmeasured.
    #[must_use]
    pub fn has_hit_right_end(&self, x: f64) -> bool {
        self.min_x().is_some_and(|min_x| x <= min_x)
    }

    /// Soft-clamps `x` into `[min_x, 0]` using `rate` as the overscroll divisor.
    #[must_use]
    pub fn soft_clamp_x(&self, x: f64, rate: f64) -> Option<f64> {
        self.min_x().map(|min_x| soft_clamp(x, min_x, 0.0, rate))
    }
}

/// Compresses values outside `[min, max]` instead of cutting them off.
///
/// Inside the range `x` is returned unchanged. Past either bound, the excess
/// distance is divided by `rate`, which gives a rubber-band feel when a drag
/// pulls the track beyond its ends.
///
/// ```rust
/// use understory_carousel::soft_clamp;
///
/// assert_eq!(soft_clamp(-50.0, -100.0, 0.0, 5.0), -50.0);
/// assert_eq!(soft_clamp(-150.0, -100.0, 0.0, 5.0), -110.0);
/// assert_eq!(soft_clamp(25.0, -100.0, 0.0, 5.0), 5.0);
/// ```
#[must_use]
pub fn soft_clamp(x: f64, min: f64, max: f64, rate: f64) -> f64 {
    if x < min {
        min - ((x - min) / rate).abs()
    } else if x > max {
        max + ((x - max) / rate).abs()
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::{TrackGeometry, soft_clamp};

    fn measured(mask: f64, container: f64, images: usize, visible: usize) -> TrackGeometry {
        let mut track = TrackGeometry::new(visible);
        track.set_mask_width(Some(mask));
        track.set_container_width(Some(container));
        track.set_image_count(Some(images));
        track
    }

    #[test]
    fn unmeasured_track_reports_nothing() {
        let track = TrackGeometry::new(1);
        assert_eq!(track.full_section(), None);
        assert_eq!(track.half_section(), None);
        assert_eq!(track.min_x(), None);
        assert_eq!(track.section_count(), None);
        assert_eq!(track.x_for_index(1), None);
        assert_eq!(track.soft_clamp_x(10.0, 5.0), None);
        assert!(!track.has_hit_right_end(-1_000.0));
    }

    #[test]
    fn three_visible_images_split_the_mask() {
        let track = measured(300.0, 600.0, 6, 3);
        assert_eq!(track.full_section(), Some(100.0));
        assert_eq!(track.half_section(), Some(50.0));
        assert_eq!(track.quarter_section(), Some(25.0));
        assert_eq!(track.section_count(), Some(3));
        assert_eq!(track.x_for_index(2), Some(-200.0));
        assert_eq!(track.section_center(2), Some(250.0));
        assert_eq!(track.min_x(), Some(-300.0));
    }

    #[test]
    fn section_count_saturates_when_images_fit() {
        let track = measured(300.0, 200.0, 2, 3);
        assert_eq!(track.section_count(), Some(0));
        assert_eq!(track.min_x(), Some(0.0));
        assert_eq!(track.clamp_index(5), Some(0));
    }

    #[test]
    fn zero_visible_images_is_promoted() {
        let mut track = TrackGeometry::new(0);
        assert_eq!(track.visible_images(), 1);
        track.set_visible_images(0);
        assert_eq!(track.visible_images(), 1);
    }

    #[test]
    fn non_finite_measurements_are_ignored() {
        let mut track = TrackGeometry::new(1);
        track.set_mask_width(Some(f64::NAN));
        track.set_container_width(Some(f64::INFINITY));
        assert_eq!(track.mask_width(), None);
        assert_eq!(track.container_width(), None);
    }

    #[test]
    fn item_size_divides_width_only() {
        let track = TrackGeometry::new(4);
        assert_eq!(
            track.item_size(Size::new(400.0, 120.0)),
            Size::new(100.0, 120.0)
        );
    }

    #[test]
    fn soft_clamp_is_identity_inside_bounds() {
        let (min, max) = (-400.0, 0.0);
        let mut x = min;
        while x <= max {
            assert_eq!(soft_clamp(x, min, max, 5.0), x);
            x += 12.5;
        }
    }

    #[test]
    fn soft_clamp_compresses_but_never_reaches_the_hard_distance() {
        let (min, max) = (-400.0, 0.0);
        for excess in [0.5, 1.0, 10.0, 250.0, 10_000.0] {
            let below = min - excess;
            let clamped = soft_clamp(below, min, max, 5.0);
            assert!(clamped < min, "{clamped} should stay past {min}");
            assert!(clamped > below, "{clamped} should be gentler than {below}");

            let above = max + excess;
            let clamped = soft_clamp(above, min, max, 5.0);
            assert!(clamped > max, "{clamped} should stay past {max}");
            assert!(clamped < above, "{clamped} should be gentler than {above}");
        }
    }

    #[test]
    fn end_detection_uses_current_geometry() {
        let mut track = measured(100.0, 500.0, 5, 1);
        assert!(track.has_hit_left_end(0.0));
        assert!(!track.has_hit_left_end(-0.1));
        assert!(track.has_hit_right_end(-400.0));
        assert!(!track.has_hit_right_end(-399.0));

        // A resize moves the right end with it.
        track.set_container_width(Some(300.0));
        assert!(track.has_hit_right_end(-200.0));
    }
}
