// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag input consumed by the engine, and a helper that derives it from
//! pointer positions.
//!
//! Gesture capture is left to the host. Hosts that already receive
//! cumulative and per-event deltas (as most gesture recognizers report them)
//! build [`DragInput`] values directly; hosts that only see pointer positions
//! run them through a [`PointerTracker`].
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_carousel::{DragPhase, PointerTracker};
//!
//! let mut pointer = PointerTracker::default();
//!
//! let start = pointer.down(Point::new(200.0, 50.0));
//! assert_eq!(start.phase, DragPhase::Start);
//!
//! let track = pointer.moved(Point::new(180.0, 52.0)).unwrap();
//! assert_eq!(track.delta.x, -20.0);
//! assert_eq!(track.frame_dx, -20.0);
//!
//! let track = pointer.moved(Point::new(150.0, 53.0)).unwrap();
//! assert_eq!(track.delta.x, -50.0);
//! assert_eq!(track.frame_dx, -30.0);
//!
//! let end = pointer.up(Point::new(150.0, 53.0)).unwrap();
//! assert_eq!(end.phase, DragPhase::End);
//! assert!(!pointer.is_dragging());
//! ```

use kurbo::{Point, Vec2};

/// Phase of a drag gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragPhase {
    /// The pointer went down and started moving.
    Start,
    /// The pointer moved while down.
    Track,
    /// The pointer was released.
    End,
}

/// One drag event as seen by the engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragInput {
    /// Which part of the gesture this is.
    pub phase: DragPhase,
    /// Total movement since the gesture started.
    pub delta: Vec2,
    /// Horizontal movement since the previous event of this gesture.
    ///
    /// The value seen on the last `Track` event becomes the flick velocity.
    pub frame_dx: f64,
}

impl DragInput {
    /// A `Start` event with no movement.
    #[must_use]
    pub fn start() -> Self {
        Self {
            phase: DragPhase::Start,
            delta: Vec2::ZERO,
            frame_dx: 0.0,
        }
    }

    /// A `Track` event.
    #[must_use]
    pub fn track(delta: Vec2, frame_dx: f64) -> Self {
        Self {
            phase: DragPhase::Track,
            delta,
            frame_dx,
        }
    }

    /// An `End` event carrying the total movement of the gesture.
    #[must_use]
    pub fn end(delta: Vec2) -> Self {
        Self {
            phase: DragPhase::End,
            delta,
            frame_dx: 0.0,
        }
    }

    /// `true` when vertical movement dominates, i.e. the gesture is most
    /// likely a page scroll rather than a carousel drag.
    #[must_use]
    pub fn is_vertical(&self) -> bool {
        self.delta.y.abs() > self.delta.x.abs()
    }

    /// `true` when the horizontal movement and frame velocity are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.delta.x.is_finite() && self.frame_dx.is_finite()
    }
}

/// Derives [`DragInput`] events from raw pointer positions.
#[derive(Debug, Clone, Default, Copy)]
pub struct PointerTracker {
    /// Position where the current gesture started.
    pub start_pos: Option<Point>,
    /// Last position reported during the current gesture.
    pub last_pos: Option<Point>,
}

impl PointerTracker {
    /// Starts a gesture at `pos`.
    ///
    /// A gesture already in progress is discarded.
    pub fn down(&mut self, pos: Point) -> DragInput {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        DragInput::start()
    }

    /// Reports a pointer move, or `None` when no gesture is active.
    pub fn moved(&mut self, pos: Point) -> Option<DragInput> {
        let start = self.start_pos?;
        let frame_dx = self.last_pos.map_or(0.0, |last| pos.x - last.x);
        self.last_pos = Some(pos);
        Some(DragInput::track(pos - start, frame_dx))
    }

    /// Ends the gesture at `pos`, or returns `None` when no gesture is active.
    pub fn up(&mut self, pos: Point) -> Option<DragInput> {
        let start = self.start_pos?;
        self.cancel();
        Some(DragInput::end(pos - start))
    }

    /// Abandons the current gesture without producing an event.
    pub fn cancel(&mut self) {
        self.start_pos = None;
        self.last_pos = None;
    }

    /// Returns `true` while a gesture is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }
}
