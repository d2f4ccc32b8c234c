// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic timer queue primitives.
//!
//! This crate provides [`TimerQueue`], a small queue of one-shot and repeating
//! timers keyed by [`TimerId`]. It does not read a clock and does not own a
//! thread or an event loop. Hosts pass the current time (in milliseconds, from
//! whatever monotonic source they have) into every call and poll for expired
//! timers from their own frame or idle callback.
//!
//! Each timer carries a caller-defined payload `T`, typically a small enum
//! naming what should happen when it fires.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_timing::TimerQueue;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum Job {
//!     Flip,
//!     Blink,
//! }
//!
//! let mut timers = TimerQueue::new();
//! let flip = timers.schedule_repeating(0, 3_000, Job::Flip);
//! timers.schedule_once(0, 100, Job::Blink);
//!
//! assert_eq!(timers.next_deadline(), Some(100));
//! assert!(timers.pop_due(50).is_none());
//!
//! let fired = timers.pop_due(100).unwrap();
//! assert_eq!(fired.payload, Job::Blink);
//!
//! // Repeating timers re-arm themselves after firing.
//! let fired = timers.pop_due(3_000).unwrap();
//! assert_eq!(fired.id, flip);
//! assert_eq!(timers.next_deadline(), Some(6_000));
//!
//! timers.cancel(flip);
//! assert!(timers.is_empty());
//! ```
//!
//! Timers that share a deadline fire in scheduling order. A repeating timer
//! that falls behind (because the host polled late) fires once and then skips
//! the periods it missed rather than firing in a burst.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

/// Identifier of a scheduled timer.
///
/// Identifiers are unique for the lifetime of the [`TimerQueue`] that issued
/// them and are never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Returns the raw value of this identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A timer that has reached its deadline, as returned by [`TimerQueue::pop_due`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expired<T> {
    /// Identifier of the timer that fired.
    pub id: TimerId,
    /// The deadline the timer was armed for.
    pub deadline: u64,
    /// The payload supplied when the timer was scheduled.
    pub payload: T,
}

#[derive(Clone, Debug)]
struct Entry<T> {
    id: TimerId,
    deadline: u64,
    period: Option<u64>,
    payload: T,
}

/// Queue of pending one-shot and repeating timers.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedules `payload` to fire once, `delay` milliseconds after `now`.
    pub fn schedule_once(&mut self, now: u64, delay: u64, payload: T) -> TimerId {
        self.push(now.saturating_add(delay), None, payload)
    }

    /// Schedules `payload` to fire every `period` milliseconds, starting one
    /// period after `now`.
    ///
    /// A zero period is treated as one millisecond.
    pub fn schedule_repeating(&mut self, now: u64, period: u64, payload: T) -> TimerId {
        let period = period.max(1);
        self.push(now.saturating_add(period), Some(period), payload)
    }

    /// Cancels the timer with the given id.
    ///
    /// Returns `true` if the timer was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Cancels every pending timer whose payload matches `predicate`.
    ///
    /// Returns the number of timers removed.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| !predicate(&entry.payload));
        before - self.entries.len()
    }

    /// Returns `true` if the timer with the given id is still pending.
    #[must_use]
    pub fn contains(&self, id: TimerId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Returns the earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|entry| entry.deadline).min()
    }

    /// Returns the number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cancels all pending timers.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn push(&mut self, deadline: u64, period: Option<u64>, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            deadline,
            period,
            payload,
        });
        id
    }

    /// Index of the earliest entry due at `now`, ties broken by id.
    fn earliest_due(&self, now: u64) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.deadline <= now)
            .min_by_key(|(_, entry)| (entry.deadline, entry.id))
            .map(|(index, _)| index)
    }
}

impl<T: Clone> TimerQueue<T> {
    /// Removes and returns the earliest timer whose deadline is at or before
    /// `now`.
    ///
    /// One-shot timers are removed from the queue. Repeating timers stay
    /// queued with their next deadline strictly after `now`, so draining the
    /// queue with `while let Some(t) = queue.pop_due(now)` terminates and
    /// yields each repeating timer at most once. A repeating timer whose next
    /// deadline would not fit in a `u64` fires one last time and is removed.
    pub fn pop_due(&mut self, now: u64) -> Option<Expired<T>> {
        let index = self.earliest_due(now)?;
        let Some(period) = self.entries[index].period else {
            let entry = self.entries.remove(index);
            return Some(Expired {
                id: entry.id,
                deadline: entry.deadline,
                payload: entry.payload,
            });
        };

        let entry = &mut self.entries[index];
        let fired = Expired {
            id: entry.id,
            deadline: entry.deadline,
            payload: entry.payload.clone(),
        };
        let missed = (now - entry.deadline) / period + 1;
        entry.deadline = entry
            .deadline
            .saturating_add(missed.saturating_mul(period));
        if entry.deadline <= now {
            // No representable deadline after `now`; the timer is spent.
            self.entries.remove(index);
        }
        Some(fired)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{TimerId, TimerQueue};

    fn drain(queue: &mut TimerQueue<u32>, now: u64) -> Vec<u32> {
        let mut fired = Vec::new();
        while let Some(expired) = queue.pop_due(now) {
            fired.push(expired.payload);
        }
        fired
    }

    #[test]
    fn empty_queue_has_no_deadline() {
        let mut queue = TimerQueue::<u32>::new();
        assert!(queue.is_empty());
        assert_eq!(queue.next_deadline(), None);
        assert!(queue.pop_due(u64::MAX).is_none());
    }

    #[test]
    fn one_shot_fires_once_at_deadline() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule_once(10, 100, 7);

        assert!(queue.pop_due(109).is_none());
        let fired = queue.pop_due(110).unwrap();
        assert_eq!(fired.id, id);
        assert_eq!(fired.deadline, 110);
        assert_eq!(fired.payload, 7);

        assert!(!queue.contains(id));
        assert!(queue.pop_due(1_000).is_none());
    }

    #[test]
    fn due_timers_fire_in_deadline_then_schedule_order() {
        let mut queue = TimerQueue::new();
        queue.schedule_once(0, 30, 3);
        queue.schedule_once(0, 10, 1);
        queue.schedule_once(0, 30, 4);
        queue.schedule_once(0, 20, 2);

        assert_eq!(drain(&mut queue, 100), vec![1, 2, 3, 4]);
    }

    #[test]
    fn repeating_timer_rearms_after_each_fire() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule_repeating(0, 3_000, 9);

        assert_eq!(queue.next_deadline(), Some(3_000));
        assert_eq!(drain(&mut queue, 3_000), vec![9]);
        assert_eq!(queue.next_deadline(), Some(6_000));
        assert_eq!(drain(&mut queue, 6_001), vec![9]);
        assert!(queue.contains(id));
    }

    #[test]
    fn late_poll_skips_missed_periods() {
        let mut queue = TimerQueue::new();
        queue.schedule_repeating(0, 100, 1);

        // Three and a half periods late: fires once, next deadline stays on cadence.
        assert_eq!(drain(&mut queue, 350), vec![1]);
        assert_eq!(queue.next_deadline(), Some(400));
    }

    #[test]
    fn zero_period_is_promoted_to_one() {
        let mut queue = TimerQueue::new();
        queue.schedule_repeating(5, 0, 1);
        assert_eq!(queue.next_deadline(), Some(6));
    }

    #[test]
    fn cancel_removes_only_the_named_timer() {
        let mut queue = TimerQueue::new();
        let a = queue.schedule_once(0, 10, 1);
        let b = queue.schedule_once(0, 10, 2);

        assert!(queue.cancel(a));
        assert!(!queue.cancel(a));
        assert!(queue.contains(b));
        assert_eq!(drain(&mut queue, 10), vec![2]);
    }

    #[test]
    fn cancel_where_filters_by_payload() {
        let mut queue = TimerQueue::new();
        queue.schedule_once(0, 10, 1);
        queue.schedule_repeating(0, 10, 2);
        queue.schedule_once(0, 10, 2);

        assert_eq!(queue.cancel_where(|payload| *payload == 2), 2);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn repeating_timer_without_a_later_deadline_is_removed() {
        let mut queue = TimerQueue::new();
        queue.schedule_repeating(0, 10, 7);
        queue.schedule_repeating(u64::MAX - 5, 10, 8);

        assert_eq!(drain(&mut queue, u64::MAX), vec![7, 8]);
        assert!(queue.is_empty());
    }

    #[test]
    fn ids_are_never_reused() {
        let mut queue = TimerQueue::new();
        let a = queue.schedule_once(0, 1, 0);
        queue.clear();
        let b = queue.schedule_once(0, 1, 0);
        assert_ne!(a, b);
        assert_eq!(a, TimerId(0));
        assert_eq!(b.get(), 1);
    }
}
