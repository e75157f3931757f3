// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Delay scheduling: one pending timer per attachment on a host-driven clock.
//!
//! ## Model
//!
//! The host owns real time. It forwards the current time (in milliseconds)
//! through [`Scheduler::advance_to`]; timers whose deadline has passed are then
//! due. Each attachment owns a [`DelaySlot`] holding at most one [`Timer`];
//! arming a slot replaces whatever it held, and slots of different
//! attachments never interfere.
//!
//! ```
//! use understory_tooltip::schedule::{DelaySlot, Scheduler, TimerAction};
//!
//! let mut clock = Scheduler::new();
//! let mut slot = DelaySlot::default();
//!
//! // No delay: the caller runs the action now.
//! assert_eq!(clock.schedule(&mut slot, None, TimerAction::Hide), Some(TimerAction::Hide));
//!
//! // A delay arms the slot; a later request replaces it.
//! assert_eq!(clock.schedule(&mut slot, Some(100), TimerAction::Show), None);
//! assert_eq!(clock.schedule(&mut slot, Some(50), TimerAction::Hide), None);
//! clock.advance_to(49);
//! assert_eq!(slot.take_due(clock.now()), None);
//! clock.advance_to(50);
//! assert_eq!(slot.take_due(clock.now()).map(|t| t.action), Some(TimerAction::Hide));
//! ```

/// What a timer does when it fires.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TimerAction {
    /// Create and place the overlay.
    Show,
    /// Tear the overlay down.
    Hide,
}

/// An armed timer.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Timer {
    /// Deadline in host milliseconds.
    pub due: u64,
    /// Arming order; breaks ties between equal deadlines.
    pub seq: u64,
    /// Action to run.
    pub action: TimerAction,
}

/// A single-timer slot owned by one attachment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DelaySlot {
    pending: Option<Timer>,
}

impl DelaySlot {
    /// Drop the pending timer, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// The pending timer, if any.
    pub fn pending(&self) -> Option<Timer> {
        self.pending
    }

    /// Remove and return the pending timer if its deadline is at or before `now`.
    pub fn take_due(&mut self, now: u64) -> Option<Timer> {
        match self.pending {
            Some(timer) if timer.due <= now => self.pending.take(),
            _ => None,
        }
    }
}

/// Host-driven clock that arms [`DelaySlot`]s.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now: u64,
    next_seq: u64,
}

impl Scheduler {
    /// A clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current host time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Move the clock forward. Time never goes backwards.
    pub fn advance_to(&mut self, now: u64) {
        self.now = self.now.max(now);
    }

    /// Cancel whatever `slot` holds, then either arm it or hand the action back.
    ///
    /// With a delay the slot is armed to fire `delay_ms` from now and `None`
    /// is returned. Without one the action is returned for the caller to run
    /// immediately. A delay of zero fires on the next advance.
    pub fn schedule(
        &mut self,
        slot: &mut DelaySlot,
        delay_ms: Option<u32>,
        action: TimerAction,
    ) -> Option<TimerAction> {
        slot.cancel();
        match delay_ms {
            Some(delay) => {
                self.next_seq += 1;
                slot.pending = Some(Timer {
                    due: self.now.saturating_add(u64::from(delay)),
                    seq: self.next_seq,
                    action,
                });
                None
            }
            None => Some(action),
        }
    }
}
