// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nearest-section resolution with direction-dependent hysteresis.

use crate::geometry::TrackGeometry;

/// Direction in which the image strip travels.
///
/// The names describe where the *content* moves from the viewer's point of
/// view when advancing: `Right` advances towards higher section indices (the
/// strip itself shifts left, so offsets become more negative) and `Left`
/// goes back towards section zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards section zero.
    Left,
    /// Towards the last section.
    Right,
}

impl Direction {
    /// Direction implied by a horizontal velocity in offset space.
    ///
    /// Negative velocities move the strip towards [`TrackGeometry::min_x`],
    /// which advances the carousel, so they map to [`Direction::Right`].
    /// Zero maps to [`Direction::Left`].
    #[must_use]
    pub fn from_velocity(velocity: f64) -> Self {
        if velocity < 0.0 { Self::Right } else { Self::Left }
    }
}

/// A section the track should come to rest on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapTarget {
    /// Offset of the strip once snapped.
    pub offset: f64,
    /// Index of the section that is now current.
    pub index: usize,
}

/// Finds the section a travelling strip should settle on.
///
/// `x` is the distance travelled from the start of the track (the negated
/// strip offset). Section `i` is centered at
/// `full_section * i + half_section`; the boundary between two sections is
/// that center shifted by a quarter section *against* the direction of
/// travel, so a strip moving `Right` commits to the next section earlier and
/// a strip moving `Left` falls back to the previous one earlier.
///
/// Past the last center, `Right` lands on the last section while `Left`
/// reports `section_count - 1` together with the offset of the last section.
/// That pairing is kept deliberately to match the established carousel
/// behavior; the index saturates at zero for a single-section track.
///
/// Returns `None` until the track is measured, and for non-finite `x`.
///
/// ```rust
/// use understory_carousel::{Direction, TrackGeometry, nearest_section};
///
/// let mut track = TrackGeometry::new(1);
/// track.set_mask_width(Some(100.0));
/// track.set_image_count(Some(5));
///
/// // 60px along the track: moving right already commits to section 1,
/// // moving left still falls back to section 0.
/// let right = nearest_section(&track, 60.0, Direction::Right).unwrap();
/// assert_eq!((right.index, right.offset), (1, -100.0));
/// let left = nearest_section(&track, 60.0, Direction::Left).unwrap();
/// assert_eq!((left.index, left.offset), (0, 0.0));
/// ```
#[must_use]
pub fn nearest_section(track: &TrackGeometry, x: f64, direction: Direction) -> Option<SnapTarget> {
    if !x.is_finite() {
        return None;
    }
    let section_count = track.section_count()?;
    let quarter = track.quarter_section()?;
    let first_center = track.section_center(0)?;
    let final_center = track.section_center(section_count)?;

    // Boundaries sit a quarter section before each center when moving right
    // and a quarter section after it when moving left.
    let bias = match direction {
        Direction::Right => -quarter,
        Direction::Left => quarter,
    };
    let target = |index: usize| -> Option<SnapTarget> {
        Some(SnapTarget {
            offset: track.x_for_index(index)?,
            index,
        })
    };

    if x <= first_center + bias {
        return Some(SnapTarget {
            offset: 0.0,
            index: 0,
        });
    }

    if x > final_center + bias {
        let offset = track.x_for_index(section_count)?;
        let index = match direction {
            Direction::Right => section_count,
            Direction::Left => section_count.saturating_sub(1),
        };
        return Some(SnapTarget { offset, index });
    }

    for index in 0..section_count {
        let next = index + 1;
        let lower = track.section_center(index)? + bias;
        let upper = track.section_center(next)? + bias;
        if x > lower && x <= upper {
            return target(next);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::{Direction, SnapTarget, nearest_section};
    use crate::geometry::TrackGeometry;

    /// One image per section, 100px sections, `images` images.
    fn track(images: usize) -> TrackGeometry {
        let mut track = TrackGeometry::new(1);
        track.set_mask_width(Some(100.0));
        track.set_container_width(Some(100.0 * images as f64));
        track.set_image_count(Some(images));
        track
    }

    fn resolve(track: &TrackGeometry, x: f64, direction: Direction) -> SnapTarget {
        nearest_section(track, x, direction).unwrap()
    }

    #[test]
    fn direction_from_velocity_sign() {
        assert_eq!(Direction::from_velocity(-0.5), Direction::Right);
        assert_eq!(Direction::from_velocity(0.5), Direction::Left);
        assert_eq!(Direction::from_velocity(0.0), Direction::Left);
    }

    #[test]
    fn unmeasured_or_non_finite_input_resolves_to_nothing() {
        let empty = TrackGeometry::new(1);
        assert_eq!(nearest_section(&empty, 0.0, Direction::Right), None);

        let track = track(5);
        assert_eq!(nearest_section(&track, f64::NAN, Direction::Left), None);
        assert_eq!(nearest_section(&track, f64::INFINITY, Direction::Right), None);
    }

    #[test]
    fn resting_offset_resolves_to_its_own_section() {
        // Centers sit at 50, 150, 250, 350, 450. A strip resting on section
        // `i` has travelled exactly `100 * i`.
        let track = track(5);
        for index in 0..=4 {
            let x = 100.0 * index as f64;
            assert_eq!(resolve(&track, x, Direction::Right).index, index);
            assert_eq!(resolve(&track, x, Direction::Left).index, index);
        }
    }

    #[test]
    fn exact_center_splits_by_direction() {
        // A center is always inside the (c_i - q, c_{i+1} - q] band for
        // `Right` and inside (c_{i-1} + q, c_i + q] for `Left`.
        let track = track(5);
        for index in 1..4 {
            let center = track.section_center(index).unwrap();
            assert_eq!(resolve(&track, center, Direction::Right).index, index + 1);
            assert_eq!(resolve(&track, center, Direction::Left).index, index);
        }
        let first = track.section_center(0).unwrap();
        assert_eq!(resolve(&track, first, Direction::Right).index, 1);
        assert_eq!(resolve(&track, first, Direction::Left).index, 0);
    }

    #[test]
    fn moving_right_commits_earlier_than_moving_left() {
        let track = track(5);
        // Between center(1) - q = 125 and center(1) + q = 175 the answer
        // depends on direction.
        let right = resolve(&track, 130.0, Direction::Right);
        let left = resolve(&track, 130.0, Direction::Left);
        assert_eq!(right, SnapTarget { offset: -200.0, index: 2 });
        assert_eq!(left, SnapTarget { offset: -100.0, index: 1 });
    }

    #[test]
    fn first_section_is_special_cased() {
        let track = track(5);
        assert_eq!(
            resolve(&track, 25.0, Direction::Right),
            SnapTarget { offset: 0.0, index: 0 }
        );
        assert_eq!(
            resolve(&track, 75.0, Direction::Left),
            SnapTarget { offset: 0.0, index: 0 }
        );
        assert_eq!(resolve(&track, 26.0, Direction::Right).index, 1);
        // Overscrolled past the start.
        assert_eq!(resolve(&track, -60.0, Direction::Right).index, 0);
    }

    #[test]
    fn last_section_keeps_left_asymmetry() {
        let track = track(5);
        // Final center is 450, quarter section 25.
        assert_eq!(
            resolve(&track, 430.0, Direction::Right),
            SnapTarget { offset: -400.0, index: 4 }
        );
        assert_eq!(
            resolve(&track, 480.0, Direction::Left),
            SnapTarget { offset: -400.0, index: 3 }
        );
        // Just inside the left band the regular scan answers.
        assert_eq!(
            resolve(&track, 475.0, Direction::Left),
            SnapTarget { offset: -400.0, index: 4 }
        );
    }

    #[test]
    fn single_section_track_never_underflows() {
        let track = track(1);
        assert_eq!(resolve(&track, 500.0, Direction::Left).index, 0);
        assert_eq!(resolve(&track, 500.0, Direction::Right).index, 0);
        assert_eq!(resolve(&track, 10.0, Direction::Right).index, 0);
    }

    #[test]
    fn multi_image_sections_use_section_width() {
        let mut track = TrackGeometry::new(3);
        track.set_mask_width(Some(300.0));
        track.set_container_width(Some(600.0));
        track.set_image_count(Some(6));

        let target = resolve(&track, 190.0, Direction::Right);
        assert_eq!(target, SnapTarget { offset: -200.0, index: 2 });
    }
}
