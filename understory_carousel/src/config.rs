// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.

use crate::error::ConfigError;

/// Tunables for a [`MotionEngine`](crate::MotionEngine).
///
/// All fields have defaults matching a single-image carousel with no
/// autoplay and no navigation controls. With the `serde` feature enabled the
/// struct can be loaded from any serde format; missing fields fall back to
/// their defaults.
///
/// ```rust
/// use understory_carousel::CarouselConfig;
///
/// let config = CarouselConfig::default()
///     .with_visible_images(3)
///     .with_auto_play(true)
///     .with_flip_time_ms(5_000);
/// assert!(config.validate().is_ok());
///
/// let broken = CarouselConfig::default().with_decay(0.0);
/// assert!(broken.validate().is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CarouselConfig {
    /// Start flipping through sections as soon as the engine is connected.
    pub auto_play: bool,
    /// Velocity removed from a flick on every frame, in pixels per frame.
    pub decay: f64,
    /// Whether the host renders one navigation dot per section.
    pub dots: bool,
    /// Interval between autoplay flips, in milliseconds.
    pub flip_time_ms: u64,
    /// Divisor applied to the distance dragged past either end of the track.
    pub over_scroll: f64,
    /// Whether the host renders previous/next arrows.
    pub nav: bool,
    /// Number of images shown side by side.
    pub visible_images: usize,
    /// Pause before a snap that reverses the direction of the flick, in milliseconds.
    pub recenter_delay_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            auto_play: false,
            decay: 2.0,
            dots: false,
            flip_time_ms: 3_000,
            over_scroll: 5.0,
            nav: false,
            visible_images: 1,
            recenter_delay_ms: 100,
        }
    }
}

impl CarouselConfig {
    /// Sets [`auto_play`](Self::auto_play).
    #[must_use]
    pub fn with_auto_play(mut self, auto_play: bool) -> Self {
        self.auto_play = auto_play;
        self
    }

    /// Sets [`decay`](Self::decay).
    #[must_use]
    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    /// Sets [`dots`](Self::dots).
    #[must_use]
    pub fn with_dots(mut self, dots: bool) -> Self {
        self.dots = dots;
        self
    }

    /// Sets [`flip_time_ms`](Self::flip_time_ms).
    #[must_use]
    pub fn with_flip_time_ms(mut self, flip_time_ms: u64) -> Self {
        self.flip_time_ms = flip_time_ms;
        self
    }

    /// Sets [`over_scroll`](Self::over_scroll).
    #[must_use]
    pub fn with_over_scroll(mut self, over_scroll: f64) -> Self {
        self.over_scroll = over_scroll;
        self
    }

    /// Sets [`nav`](Self::nav).
    #[must_use]
    pub fn with_nav(mut self, nav: bool) -> Self {
        self.nav = nav;
        self
    }

    /// Sets [`visible_images`](Self::visible_images).
    #[must_use]
    pub fn with_visible_images(mut self, visible_images: usize) -> Self {
        self.visible_images = visible_images;
        self
    }

    /// Sets [`recenter_delay_ms`](Self::recenter_delay_ms).
    #[must_use]
    pub fn with_recenter_delay_ms(mut self, recenter_delay_ms: u64) -> Self {
        self.recenter_delay_ms = recenter_delay_ms;
        self
    }

    /// Checks that the configuration can drive an engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.decay.is_finite() && self.decay > 0.0) {
            return Err(ConfigError::InvalidDecay(self.decay));
        }
        if !(self.over_scroll.is_finite() && self.over_scroll > 0.0) {
            return Err(ConfigError::InvalidOverScroll(self.over_scroll));
        }
        if self.visible_images == 0 {
            return Err(ConfigError::NoVisibleImages);
        }
        if self.flip_time_ms == 0 {
            return Err(ConfigError::ZeroFlipTime);
        }
        Ok(())
    }
}
