// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_carousel --heading-base-level=0

//! Understory Carousel: a headless motion and snapping engine for image carousels.
//!
//! This crate models the part of a carousel that is independent of any
//! renderer: where the image strip is, how a drag moves it, how a released
//! drag decelerates, which section it snaps to, and when autoplay flips to
//! the next section. It focuses on:
//! - [`TrackGeometry`]: section widths, offsets and track ends derived from
//!   the measured viewport, strip width and image count.
//! - [`soft_clamp`]: the rubber-band compression applied past either end.
//! - [`Flick`]: frame-stepped deceleration of a released drag.
//! - [`nearest_section`]: direction-aware snapping with a quarter-section
//!   hysteresis band.
//! - [`MotionEngine`]: the stateful controller tying these together with
//!   drag tracking, section navigation and autoplay.
//!
//! It does **not** capture input or render anything. Callers are expected
//! to:
//! - Report measurements (viewport size, strip width, image count).
//! - Feed drag gestures as [`DragInput`]s, directly or through a
//!   [`PointerTracker`].
//! - Call [`MotionEngine::tick`] every animation frame while
//!   [`MotionEngine::needs_frame`] is `true`, and by
//!   [`MotionEngine::next_deadline`] otherwise.
//! - Apply the [`CarouselEvent`]s drained from the engine: translate the
//!   strip, lay out images, report transition ends, lazy-load images.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_carousel::{
//!     CarouselConfig, CarouselEvent, Direction, MotionEngine, Transition,
//! };
//!
//! let config = CarouselConfig::default().with_visible_images(3);
//! let mut engine = MotionEngine::new(config).unwrap();
//!
//! engine.set_image_count(6);
//! engine.set_viewport(Size::new(300.0, 100.0));
//! engine.set_container_width(600.0);
//! engine.drain_events().for_each(drop);
//!
//! engine.next_slide(Direction::Right, false);
//! assert_eq!(engine.current_section_index(), 1);
//! assert_eq!(
//!     engine.drain_events().collect::<Vec<_>>(),
//!     [CarouselEvent::Translate {
//!         x: -100.0,
//!         transition: Transition::SameDirection,
//!     }]
//! );
//!
//! // Once the host's slide animation finishes, images 3 and 4 may load.
//! engine.transition_end();
//! assert_eq!(
//!     engine.drain_events().next(),
//!     Some(CarouselEvent::LazyLoad {
//!         current_index: 3,
//!         next_index: 4,
//!     })
//! );
//! ```
//!
//! ## Design notes
//!
//! - Offsets are the horizontal translation of the strip: `0.0` shows the
//!   first section, [`TrackGeometry::min_x`] the last.
//! - Derived geometry is recomputed on every use, so measurements may change
//!   mid-gesture without leaving stale values behind.
//! - Nothing fails at runtime. Operations that need measurements the host has
//!   not reported yet do nothing; only [`CarouselConfig`] is validated.
//! - State transitions are logged through `tracing`; no subscriber is
//!   installed.
//!
//! ## Features
//!
//! - `serde`: derive `Serialize`/`Deserialize` for [`CarouselConfig`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod drag;
mod engine;
mod error;
mod event;
mod flick;
mod geometry;
mod snap;

pub use config::CarouselConfig;
pub use drag::{DragInput, DragPhase, PointerTracker};
pub use engine::{MotionEngine, MotionState};
pub use error::ConfigError;
pub use event::{CarouselEvent, Transition};
pub use flick::{Flick, FlickStep};
pub use geometry::{TrackGeometry, soft_clamp};
pub use snap::{Direction, SnapTarget, nearest_section};
