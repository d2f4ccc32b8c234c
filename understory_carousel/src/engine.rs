// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The carousel motion engine.

use alloc::vec::Vec;

use kurbo::Size;
use tracing::{debug, trace};
use understory_timing::{TimerId, TimerQueue};

use crate::config::CarouselConfig;
use crate::drag::{DragInput, DragPhase};
use crate::error::ConfigError;
use crate::event::{CarouselEvent, Transition};
use crate::flick::{Flick, FlickStep};
use crate::geometry::TrackGeometry;
use crate::snap::{Direction, nearest_section};

/// Coarse state of the engine, for hosts that adapt their input handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MotionState {
    /// Nothing is moving under the engine's control.
    Idle,
    /// A drag gesture is in progress.
    Dragging,
    /// A released drag is decelerating; call [`MotionEngine::tick`] every frame.
    Flicking,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Timer {
    /// Advance one section.
    AutoPlay,
    /// Finish a direction-reversing snap, unless the gesture was superseded.
    Recenter { x: f64, generation: u64 },
    /// Restart autoplay after a dot selection.
    ResumeAutoPlay,
}

/// Headless motion and snapping engine for an image carousel.
///
/// The engine owns the strip offset, the current section, the flick in
/// flight and the autoplay timer. The host feeds it measurements, drag
/// input, frame ticks and timestamps, and applies the [`CarouselEvent`]s it
/// emits (see [`drain_events`](Self::drain_events)).
///
/// Timestamps are milliseconds from any monotonic clock. Call
/// [`tick`](Self::tick) once per animation frame while
/// [`needs_frame`](Self::needs_frame) is `true`, and no later than
/// [`next_deadline`](Self::next_deadline) otherwise.
///
/// Cancellation uses a gesture generation: a new drag, a pointer press or an
/// explicit navigation bumps it, and any flick or delayed snap created under
/// an older generation is dropped the next time it would run.
///
/// ```rust
/// use kurbo::{Size, Vec2};
/// use understory_carousel::{CarouselEvent, DragInput, MotionEngine};
///
/// let mut engine = MotionEngine::default();
/// engine.set_image_count(5);
/// engine.set_viewport(Size::new(100.0, 60.0));
/// engine.set_container_width(500.0);
///
/// // Drag left by 70px, releasing with a small velocity.
/// engine.drag(DragInput::start(), 0);
/// engine.drag(DragInput::track(Vec2::new(-70.0, 0.0), -4.0), 16);
/// engine.drag(DragInput::end(Vec2::new(-70.0, 0.0)), 32);
///
/// let mut now = 32;
/// while engine.needs_frame() {
///     now += 16;
///     engine.tick(now);
/// }
/// assert_eq!(engine.current_section_index(), 1);
/// assert_eq!(engine.current_x(), -100.0);
///
/// let last = engine.drain_events().last();
/// assert!(matches!(last, Some(CarouselEvent::Translate { x, .. }) if x == -100.0));
/// ```
#[derive(Clone, Debug)]
pub struct MotionEngine {
    config: CarouselConfig,
    track: TrackGeometry,
    current_x: f64,
    current_section_index: usize,
    dragging: bool,
    final_velocity: f64,
    flick: Option<Flick>,
    generation: u64,
    is_playing: bool,
    resume_playing: bool,
    autoplay_timer: Option<TimerId>,
    lazy_load_armed: bool,
    timers: TimerQueue<Timer>,
    events: Vec<CarouselEvent>,
}

impl Default for MotionEngine {
    fn default() -> Self {
        Self::with_valid_config(CarouselConfig::default())
    }
}

impl MotionEngine {
    /// Creates an engine, rejecting configurations that cannot work.
    pub fn new(config: CarouselConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: CarouselConfig) -> Self {
        Self {
            track: TrackGeometry::new(config.visible_images),
            config,
            current_x: 0.0,
            current_section_index: 0,
            dragging: false,
            final_velocity: 0.0,
            flick: None,
            generation: 0,
            is_playing: false,
            resume_playing: false,
            autoplay_timer: None,
            lazy_load_armed: false,
            timers: TimerQueue::new(),
            events: Vec::new(),
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// The current track measurements.
    #[must_use]
    pub fn track(&self) -> &TrackGeometry {
        &self.track
    }

    /// Last committed strip offset.
    #[must_use]
    pub fn current_x(&self) -> f64 {
        self.current_x
    }

    /// Index of the current section.
    #[must_use]
    pub fn current_section_index(&self) -> usize {
        self.current_section_index
    }

    /// Number of snap positions beyond the first, once the image count is known.
    #[must_use]
    pub fn section_count(&self) -> Option<usize> {
        self.track.section_count()
    }

    /// Velocity captured from the most recent drag event.
    #[must_use]
    pub fn final_velocity(&self) -> f64 {
        self.final_velocity
    }

    /// `true` while autoplay is running.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Coarse motion state.
    #[must_use]
    pub fn state(&self) -> MotionState {
        if self.dragging {
            MotionState::Dragging
        } else if self.active_flick().is_some() {
            MotionState::Flicking
        } else {
            MotionState::Idle
        }
    }

    /// `true` when the next animation frame must call [`tick`](Self::tick).
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.active_flick().is_some()
    }

    /// Earliest pending timer deadline (autoplay, delayed snap, autoplay resume).
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Selection state of the navigation dots, one per section.
    ///
    /// Empty until the image count is known.
    pub fn dots(&self) -> impl Iterator<Item = bool> + '_ {
        let current = self.current_section_index;
        self.track
            .section_count()
            .into_iter()
            .flat_map(move |count| (0..=count).map(move |index| index == current))
    }

    /// Removes and returns the events emitted since the last call.
    pub fn drain_events(&mut self) -> impl Iterator<Item = CarouselEvent> + '_ {
        self.events.drain(..)
    }

    // Layout protocol.

    /// Attaches the engine to its host.
    ///
    /// Requests a first measurement and a host re-init, and starts autoplay
    /// when configured.
    pub fn connect(&mut self, now: u64) {
        self.events.push(CarouselEvent::RequestMeasure);
        self.events.push(CarouselEvent::RequestInit);
        if self.config.auto_play {
            self.start_autoplay(now);
        }
    }

    /// Requests a fresh measurement, for example after the parent layout changed.
    pub fn init(&mut self) {
        self.events.push(CarouselEvent::RequestMeasure);
    }

    /// Reports the number of images on the track.
    pub fn set_image_count(&mut self, count: usize) {
        self.track.set_image_count(Some(count));
        if count > 0 {
            self.events.push(CarouselEvent::RequestMeasure);
        }
    }

    /// Changes how many images are shown side by side (at least one).
    pub fn set_visible_images(&mut self, count: usize) {
        let count = count.max(1);
        self.config.visible_images = count;
        self.track.set_visible_images(count);
        self.events.push(CarouselEvent::RequestMeasure);
    }

    /// Reports the size of the carousel viewport.
    ///
    /// Ignored until the image count is known. Otherwise emits
    /// [`CarouselEvent::ResizeItems`] followed by
    /// [`CarouselEvent::RequestContainerMeasure`].
    pub fn set_viewport(&mut self, size: Size) {
        if self.track.image_count().is_none() {
            trace!("viewport reported before image count; ignoring");
            return;
        }
        self.track.set_mask_width(Some(size.width));
        self.events.push(CarouselEvent::ResizeItems {
            item_size: self.track.item_size(size),
        });
        self.events.push(CarouselEvent::RequestContainerMeasure);
    }

    /// Reports the width of the laid-out image strip and re-applies the
    /// current section without animation.
    pub fn set_container_width(&mut self, width: f64) {
        self.track.set_container_width(Some(width));
        self.go_to_section(self.current_section_index);
    }

    // Offset translation.

    /// Soft-clamps `x` against the current track and emits it as an
    /// untransitioned [`CarouselEvent::Translate`].
    ///
    /// Returns the clamped offset, or `None` (emitting nothing) while the
    /// track is unmeasured or `x` is not finite. The committed offset is not
    /// changed.
    pub fn translate(&mut self, x: f64) -> Option<f64> {
        self.translate_with(x, Transition::None)
    }

    fn translate_with(&mut self, x: f64, transition: Transition) -> Option<f64> {
        if !x.is_finite() {
            debug!(x, "non-finite offset; ignoring");
            return None;
        }
        let clamped = self.track.soft_clamp_x(x, self.config.over_scroll)?;
        self.events.push(CarouselEvent::Translate {
            x: clamped,
            transition,
        });
        Some(clamped)
    }

    fn animate_to_offset(&mut self, x: f64, transition: Transition) {
        if self.translate_with(x, transition).is_some() {
            self.lazy_load_armed = true;
        }
    }

    // Drag tracking.

    /// Stops any flick as soon as the pointer goes down.
    pub fn pointer_down(&mut self) {
        self.cancel_motion();
    }

    /// Feeds one drag event.
    pub fn drag(&mut self, input: DragInput, now: u64) {
        match input.phase {
            DragPhase::Start => self.drag_start(),
            DragPhase::Track => {
                if !self.dragging {
                    trace!("drag track without start; ignoring");
                    return;
                }
                if input.is_vertical() {
                    return;
                }
                if !input.is_finite() {
                    debug!("non-finite drag movement; ignoring");
                    return;
                }
                self.final_velocity = input.frame_dx;
                self.translate(self.current_x + input.delta.x);
            }
            DragPhase::End => {
                if !self.dragging {
                    trace!("drag end without start; ignoring");
                    return;
                }
                self.dragging = false;
                if input.is_vertical() || !input.is_finite() {
                    debug!("vertical or non-finite release; restoring offset");
                    self.translate(self.current_x);
                    self.finish_gesture(now);
                    return;
                }
                self.current_x += input.delta.x;
                self.flick = Some(Flick::new(self.final_velocity, self.generation));
                debug!(
                    x = self.current_x,
                    velocity = self.final_velocity,
                    "drag released"
                );
            }
        }
    }

    fn drag_start(&mut self) {
        self.cancel_motion();
        self.dragging = true;
        self.final_velocity = 0.0;
        let resume_pending = self
            .timers
            .cancel_where(|timer| matches!(timer, Timer::ResumeAutoPlay))
            > 0;
        if self.is_playing || resume_pending {
            self.resume_playing = true;
            self.halt_autoplay();
        }
        debug!(x = self.current_x, "drag started");
    }

    /// Invalidates the running flick and any pending delayed snap.
    fn cancel_motion(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    fn active_flick(&self) -> Option<&Flick> {
        self.flick
            .as_ref()
            .filter(|flick| flick.generation() == self.generation)
    }

    fn finish_gesture(&mut self, now: u64) {
        if self.resume_playing {
            self.resume_playing = false;
            self.start_autoplay(now);
        }
    }

    // Frame and timer driving.

    /// Advances the engine to `now`.
    ///
    /// Fires every timer that is due, then runs one flick frame if a flick is
    /// in flight.
    pub fn tick(&mut self, now: u64) {
        while let Some(expired) = self.timers.pop_due(now) {
            match expired.payload {
                Timer::AutoPlay => self.next_slide(Direction::Right, true),
                Timer::Recenter { x, generation } => {
                    if generation == self.generation {
                        self.animate_to_offset(x, Transition::ReverseDirection);
                    } else {
                        trace!("delayed snap superseded");
                    }
                }
                Timer::ResumeAutoPlay => self.start_autoplay(now),
            }
        }
        self.step_flick(now);
    }

    fn step_flick(&mut self, now: u64) {
        let Some(mut flick) = self.flick.take() else {
            return;
        };
        if flick.generation() != self.generation {
            trace!("flick preempted");
            return;
        }
        let Some(min_x) = self.track.min_x() else {
            debug!("track not measured; dropping flick");
            self.finish_gesture(now);
            return;
        };

        match flick.step(&mut self.current_x, min_x, self.config.decay) {
            FlickStep::Moving => {
                trace!(
                    x = self.current_x,
                    velocity = flick.velocity(),
                    "flick frame"
                );
                self.translate(self.current_x);
                self.flick = Some(flick);
            }
            FlickStep::Settled => self.settle(flick.direction(), now),
        }
    }

    fn settle(&mut self, direction: Direction, now: u64) {
        let Some(target) = nearest_section(&self.track, -self.current_x, direction) else {
            debug!("no section to settle on");
            self.finish_gesture(now);
            return;
        };
        self.current_section_index = target.index;

        // Snapping back against the flick reads as a jolt unless it pauses
        // first; at either end of the track there is nothing to pause for.
        let reverses = match direction {
            Direction::Left => {
                target.offset < self.current_x && !self.track.has_hit_left_end(self.current_x)
            }
            Direction::Right => {
                target.offset > self.current_x && !self.track.has_hit_right_end(self.current_x)
            }
        };
        if reverses {
            self.timers.schedule_once(
                now,
                self.config.recenter_delay_ms,
                Timer::Recenter {
                    x: target.offset,
                    generation: self.generation,
                },
            );
        } else {
            self.animate_to_offset(target.offset, Transition::SameDirection);
        }
        debug!(
            index = target.index,
            x = target.offset,
            reverses,
            "flick settled"
        );

        self.current_x = target.offset;
        self.finish_gesture(now);
    }

    // Navigation.

    fn go_to_section(&mut self, index: usize) {
        let index = self.track.clamp_index(index).unwrap_or(index);
        self.current_section_index = index;
        if let Some(x) = self.track.x_for_index(index) {
            self.current_x = x;
            self.translate(x);
        }
    }

    /// Jumps to section `index` without animation.
    ///
    /// Out-of-range indices are clamped to the last section. Before the
    /// track is measured the index is remembered and applied once it is.
    pub fn move_to_section(&mut self, index: usize) {
        self.cancel_motion();
        self.go_to_section(index);
    }

    /// Slides to section `index` and arms the lazy-load notification.
    ///
    /// Out-of-range indices are clamped to the last section.
    pub fn animate_to_section(&mut self, index: usize) {
        self.cancel_motion();
        let index = self.track.clamp_index(index).unwrap_or(index);
        self.current_section_index = index;
        if let Some(x) = self.track.x_for_index(index) {
            self.current_x = x;
            self.animate_to_offset(x, Transition::SameDirection);
        }
        debug!(index, "animating to section");
    }

    /// Slides one section in `direction`.
    ///
    /// At either end the carousel wraps around when `recycle` is set and
    /// otherwise re-centres the current section.
    pub fn next_slide(&mut self, direction: Direction, recycle: bool) {
        let Some(section_count) = self.track.section_count() else {
            return;
        };
        let index = self.current_section_index.min(section_count);
        let next = match direction {
            Direction::Right if index >= section_count => {
                if recycle {
                    0
                } else {
                    index
                }
            }
            Direction::Right => index + 1,
            Direction::Left if index == 0 => {
                if recycle {
                    section_count
                } else {
                    0
                }
            }
            Direction::Left => index - 1,
        };
        self.animate_to_section(next);
    }

    /// Reports that the host finished the last animated transition.
    ///
    /// Emits [`CarouselEvent::LazyLoad`] once per animated move.
    pub fn transition_end(&mut self) {
        if !self.lazy_load_armed {
            return;
        }
        self.lazy_load_armed = false;
        let current_index = self.current_section_index + self.track.visible_images() - 1;
        self.events.push(CarouselEvent::LazyLoad {
            current_index,
            next_index: current_index + 1,
        });
    }

    // Autoplay.

    fn start_autoplay(&mut self, now: u64) {
        self.is_playing = true;
        if let Some(id) = self.autoplay_timer.take() {
            self.timers.cancel(id);
        }
        self.autoplay_timer = Some(self.timers.schedule_repeating(
            now,
            self.config.flip_time_ms,
            Timer::AutoPlay,
        ));
        debug!(flip_time_ms = self.config.flip_time_ms, "autoplay running");
    }

    fn halt_autoplay(&mut self) {
        self.is_playing = false;
        if let Some(id) = self.autoplay_timer.take() {
            self.timers.cancel(id);
            debug!("autoplay halted");
        }
    }

    /// Starts (or restarts) autoplay: one section to the right every
    /// `flip_time_ms`, wrapping at the end.
    pub fn play(&mut self, now: u64) {
        self.start_autoplay(now);
        self.events
            .push(CarouselEvent::PlaybackChanged { playing: true });
    }

    /// Stops autoplay, including any pending resume after a drag or a dot
    /// selection.
    pub fn stop(&mut self) {
        self.halt_autoplay();
        self.resume_playing = false;
        self.timers
            .cancel_where(|timer| matches!(timer, Timer::ResumeAutoPlay));
        self.events
            .push(CarouselEvent::PlaybackChanged { playing: false });
    }

    /// Turns the `auto_play` setting on or off.
    ///
    /// Turning it on starts playback; turning it off only affects future
    /// dot selections and connections, a running autoplay keeps going until
    /// [`stop`](Self::stop).
    pub fn set_auto_play(&mut self, enabled: bool, now: u64) {
        self.config.auto_play = enabled;
        if enabled {
            self.start_autoplay(now);
        }
    }

    /// Handles a press on a previous/next arrow.
    ///
    /// Restarts the autoplay interval when playing so the manual flip is not
    /// immediately followed by an automatic one, then slides without wrapping.
    pub fn nav_arrow(&mut self, direction: Direction, now: u64) {
        if self.is_playing {
            self.start_autoplay(now);
        }
        self.next_slide(direction, false);
    }

    /// Handles a press on navigation dot `index`.
    ///
    /// Autoplay pauses; with `auto_play` configured it resumes one flip
    /// interval later.
    pub fn select_dot(&mut self, index: usize, now: u64) {
        self.halt_autoplay();
        self.timers
            .cancel_where(|timer| matches!(timer, Timer::ResumeAutoPlay));
        self.animate_to_section(index);
        if self.config.auto_play {
            self.timers
                .schedule_once(now, self.config.flip_time_ms, Timer::ResumeAutoPlay);
        }
    }
}
