//! Resend countdown.
//!
//! Each activation owns one ticker and one ceiling timer, tagged with the
//! activation's generation. Restarting bumps the generation and hands back
//! the previous pair for cancellation; late events from an older
//! generation are reported as stale and change nothing.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::model::COUNTDOWN_SECONDS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    Tick,
    Ceiling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId {
    pub generation: u64,
    pub kind: TimerKind,
}

impl TimerId {
    #[must_use]
    pub const fn tick(generation: u64) -> Self {
        Self {
            generation,
            kind: TimerKind::Tick,
        }
    }

    #[must_use]
    pub const fn ceiling(generation: u64) -> Self {
        Self {
            generation,
            kind: TimerKind::Ceiling,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CountdownState {
    #[default]
    Idle,
    Counting { seconds_remaining: u32 },
}

/// Timers the caller must install (and cancel) after `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownPlan {
    pub cancel: Option<[TimerId; 2]>,
    pub tick: TimerId,
    pub ceiling: TimerId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOutcome {
    /// Timer belongs to an earlier activation, or the countdown already ended.
    Stale,
    /// Still counting; install the next tick.
    Rearm(TimerId),
    /// Countdown is back to idle. Carries the sibling timer still pending.
    Finished { cancel: Option<TimerId> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResendCountdown {
    state: CountdownState,
    generation: u64,
    start_seconds: u32,
}

impl Default for ResendCountdown {
    fn default() -> Self {
        Self::new(COUNTDOWN_SECONDS)
    }
}

impl ResendCountdown {
    #[must_use]
    pub fn new(start_seconds: u32) -> Self {
        Self {
            state: CountdownState::Idle,
            generation: 0,
            start_seconds: start_seconds.max(1),
        }
    }

    #[must_use]
    pub const fn state(&self) -> CountdownState {
        self.state
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn seconds_remaining(&self) -> Option<u32> {
        match self.state {
            CountdownState::Idle => None,
            CountdownState::Counting { seconds_remaining } => Some(seconds_remaining),
        }
    }

    #[must_use]
    pub const fn is_counting(&self) -> bool {
        matches!(self.state, CountdownState::Counting { .. })
    }

    /// Takes effect on the next `start`.
    pub fn set_start_seconds(&mut self, start_seconds: u32) {
        self.start_seconds = start_seconds.max(1);
    }

    pub fn start(&mut self) -> CountdownPlan {
        let cancel = self
            .is_counting()
            .then(|| [TimerId::tick(self.generation), TimerId::ceiling(self.generation)]);

        self.generation = self.generation.wrapping_add(1);
        self.state = CountdownState::Counting {
            seconds_remaining: self.start_seconds,
        };

        debug!(
            generation = self.generation,
            restarted = cancel.is_some(),
            "resend countdown started"
        );

        CountdownPlan {
            cancel,
            tick: TimerId::tick(self.generation),
            ceiling: TimerId::ceiling(self.generation),
        }
    }

    pub fn on_timer(&mut self, id: TimerId) -> TimerOutcome {
        let CountdownState::Counting { seconds_remaining } = self.state else {
            trace!(?id, "timer fired while idle");
            return TimerOutcome::Stale;
        };

        if id.generation != self.generation {
            trace!(?id, current = self.generation, "stale countdown timer");
            return TimerOutcome::Stale;
        }

        match id.kind {
            TimerKind::Tick if seconds_remaining > 1 => {
                self.state = CountdownState::Counting {
                    seconds_remaining: seconds_remaining - 1,
                };
                TimerOutcome::Rearm(TimerId::tick(self.generation))
            }
            TimerKind::Tick => {
                self.state = CountdownState::Idle;
                debug!(generation = self.generation, "resend countdown finished");
                TimerOutcome::Finished {
                    cancel: Some(TimerId::ceiling(self.generation)),
                }
            }
            TimerKind::Ceiling => {
                self.state = CountdownState::Idle;
                debug!(generation = self.generation, "resend countdown hit ceiling");
                TimerOutcome::Finished {
                    cancel: Some(TimerId::tick(self.generation)),
                }
            }
        }
    }
}
