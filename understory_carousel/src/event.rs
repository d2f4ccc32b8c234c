// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;

/// How the host should move the strip to a new offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Jump straight there (drag tracking, flick frames, instant moves).
    None,
    /// Eased slide continuing the current direction of travel.
    SameDirection,
    /// Eased slide that turns back against the last flick.
    ReverseDirection,
}

/// Output of a [`MotionEngine`](crate::MotionEngine), drained by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CarouselEvent {
    /// Translate the image strip horizontally to `x`.
    Translate {
        /// Horizontal offset, already soft-clamped.
        x: f64,
        /// Whether and how to animate the move.
        transition: Transition,
    },
    /// Measure the carousel and report it through
    /// [`MotionEngine::set_viewport`](crate::MotionEngine::set_viewport).
    RequestMeasure,
    /// Lay out every image at `item_size`.
    ResizeItems {
        /// Size of one image.
        item_size: Size,
    },
    /// Measure the image strip and report it through
    /// [`MotionEngine::set_container_width`](crate::MotionEngine::set_container_width).
    RequestContainerMeasure,
    /// A section transition finished; images up to `next_index` may be loaded.
    LazyLoad {
        /// Index of the rightmost fully visible image.
        current_index: usize,
        /// Index of the next image to come into view.
        next_index: usize,
    },
    /// Ask the embedding page to re-run its layout hooks for this carousel.
    RequestInit,
    /// Autoplay was started or stopped through the public controls.
    PlaybackChanged {
        /// `true` when autoplay is now running.
        playing: bool,
    },
}
