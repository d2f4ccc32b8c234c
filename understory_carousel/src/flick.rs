// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-stepped flick deceleration.
//!
//! A [`Flick`] starts with the velocity measured on the last drag event and
//! loses a fixed `decay` of speed on every frame until its magnitude is at or
//! below `decay`, at which point it reports [`FlickStep::Settled`]. Starting
//! from a non-zero velocity `v`, that takes exactly `ceil(|v| / decay)` calls
//! to [`Flick::step`], the last of which is the settling one.
//!
//! ```rust
//! use understory_carousel::{Direction, Flick, FlickStep};
//!
//! let mut x = -100.0;
//! let mut flick = Flick::new(-10.0, 0);
//!
//! let mut frames = 0;
//! while flick.step(&mut x, -1_000.0, 2.0) == FlickStep::Moving {
//!     frames += 1;
//! }
//! // Four moving frames (10 + 8 + 6 + 4 pixels) and one settling frame.
//! assert_eq!(frames + 1, 5);
//! assert_eq!(x, -128.0);
//! assert_eq!(flick.direction(), Direction::Right);
//! ```

use crate::snap::Direction;

/// Result of advancing a [`Flick`] by one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlickStep {
    /// The offset moved; schedule another frame.
    Moving,
    /// The flick is spent; resolve the nearest section.
    Settled,
}

/// State of one in-flight flick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Flick {
    velocity: f64,
    direction: Direction,
    generation: u64,
}

impl Flick {
    /// Starts a flick with the given release velocity.
    ///
    /// `generation` identifies the gesture that launched the flick; the
    /// engine drops flicks whose generation is no longer current.
    #[must_use]
    pub fn new(velocity: f64, generation: u64) -> Self {
        Self {
            velocity,
            direction: Direction::from_velocity(velocity),
            generation,
        }
    }

    /// Remaining velocity, in pixels per frame.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Direction of the most recent movement.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Gesture generation this flick belongs to.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advances the flick by one frame, moving `x` in place.
    ///
    /// A non-finite velocity settles at once without moving `x`.
    ///
    /// Reaching either end of the track (`x >= 0` or `x <= min_x`) drops the
    /// remaining speed so the next frame settles, instead of carrying the
    /// strip further into overscroll.
    pub fn step(&mut self, x: &mut f64, min_x: f64, decay: f64) -> FlickStep {
        let mut velocity = self.velocity;
        if !velocity.is_finite() || velocity.abs() <= decay {
            return FlickStep::Settled;
        }

        *x += velocity;
        if velocity > 0.0 {
            if *x >= 0.0 {
                velocity = decay;
            }
            self.velocity = velocity - decay;
            self.direction = Direction::Left;
        } else {
            if *x <= min_x {
                velocity = -decay;
            }
            self.velocity = velocity + decay;
            self.direction = Direction::Right;
        }
        FlickStep::Moving
    }
}

#[cfg(test)]
mod tests {
    use super::{Flick, FlickStep};
    use crate::snap::Direction;

    /// Runs a flick to completion and returns the number of `step` calls.
    fn run(flick: &mut Flick, x: &mut f64, min_x: f64, decay: f64) -> usize {
        let mut calls = 0;
        loop {
            calls += 1;
            assert!(calls < 10_000, "flick failed to settle");
            if flick.step(x, min_x, decay) == FlickStep::Settled {
                return calls;
            }
        }
    }

    #[test]
    fn release_velocity_of_ten_takes_five_frames() {
        let mut x = -300.0;
        let mut flick = Flick::new(10.0, 0);
        assert_eq!(run(&mut flick, &mut x, -1_000.0, 2.0), 5);
        assert_eq!(x, -272.0);
        assert_eq!(flick.direction(), Direction::Left);
        assert_eq!(flick.velocity(), 2.0);
    }

    #[test]
    fn frame_count_is_ceiling_of_velocity_over_decay() {
        // (velocity, decay, expected frames)
        let cases = [
            (10.0, 2.0, 5),
            (-10.0, 2.0, 5),
            (11.0, 2.0, 6),
            (3.0, 2.0, 2),
            (1.0, 2.0, 1),
            (-2.0, 2.0, 1),
            (37.5, 5.0, 8),
            (-0.25, 0.1, 3),
        ];
        for (velocity, decay, expected) in cases {
            let mut x = -5_000.0;
            let mut flick = Flick::new(velocity, 0);
            assert_eq!(
                run(&mut flick, &mut x, -10_000.0, decay),
                expected,
                "velocity {velocity}, decay {decay}"
            );
        }
    }

    #[test]
    fn non_finite_velocity_settles_without_moving() {
        for velocity in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut x = -150.0;
            let mut flick = Flick::new(velocity, 0);
            assert_eq!(flick.step(&mut x, -400.0, 2.0), FlickStep::Settled);
            assert_eq!(x, -150.0);
        }
    }

    #[test]
    fn velocity_never_crosses_zero() {
        let mut x = -500.0;
        let mut flick = Flick::new(9.0, 0);
        while flick.step(&mut x, -1_000.0, 2.0) == FlickStep::Moving {
            assert!(flick.velocity() > 0.0);
        }
        assert_eq!(flick.velocity(), 1.0);
    }

    #[test]
    fn hitting_the_left_end_settles_on_the_next_frame() {
        let mut x = -20.0;
        let mut flick = Flick::new(30.0, 0);

        assert_eq!(flick.step(&mut x, -1_000.0, 2.0), FlickStep::Moving);
        assert_eq!(x, 10.0);
        assert_eq!(flick.velocity(), 0.0);
        assert_eq!(flick.step(&mut x, -1_000.0, 2.0), FlickStep::Settled);
        assert_eq!(x, 10.0);
    }

    #[test]
    fn hitting_the_right_end_settles_on_the_next_frame() {
        let mut x = -390.0;
        let mut flick = Flick::new(-30.0, 0);

        assert_eq!(flick.step(&mut x, -400.0, 2.0), FlickStep::Moving);
        assert_eq!(x, -420.0);
        assert_eq!(flick.velocity(), 0.0);
        assert_eq!(flick.direction(), Direction::Right);
        assert_eq!(flick.step(&mut x, -400.0, 2.0), FlickStep::Settled);
    }

    #[test]
    fn zero_velocity_settles_immediately_moving_left() {
        let mut x = -150.0;
        let mut flick = Flick::new(0.0, 3);
        assert_eq!(flick.step(&mut x, -400.0, 2.0), FlickStep::Settled);
        assert_eq!(x, -150.0);
        assert_eq!(flick.direction(), Direction::Left);
        assert_eq!(flick.generation(), 3);
    }
}
