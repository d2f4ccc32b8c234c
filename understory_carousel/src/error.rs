// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Reasons a [`CarouselConfig`](crate::CarouselConfig) is rejected.
///
/// Runtime operations on [`MotionEngine`](crate::MotionEngine) never fail;
/// only the configuration is checked, once, when an engine is built.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Flick decay must be a finite value greater than zero.
    #[error("flick decay must be finite and greater than zero, got {0}")]
    InvalidDecay(f64),
    /// Overscroll rate must be a finite value greater than zero.
    #[error("overscroll rate must be finite and greater than zero, got {0}")]
    InvalidOverScroll(f64),
    /// At least one image has to be visible at a time.
    #[error("visible image count must be at least 1")]
    NoVisibleImages,
    /// Autoplay needs a non-zero interval between flips.
    #[error("autoplay flip time must be greater than zero")]
    ZeroFlipTime,
}
