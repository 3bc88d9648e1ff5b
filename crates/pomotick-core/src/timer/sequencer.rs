//! Session sequencing.
//!
//! Decides which session follows a finished one and keeps the work-cycle
//! bookkeeping. Timing of the switch (the settle delay) is not handled here;
//! see [`crate::runtime`].

use serde::{Deserialize, Serialize};

use super::session::{SessionType, SESSIONS_BEFORE_LONG_BREAK};

/// Work-session counters carried across sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleCounters {
    pub completed_work_sessions: u32,
    pub work_sessions_in_cycle: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSequencer {
    sessions_before_long_break: u32,
}

impl SessionSequencer {
    pub fn new() -> Self {
        Self {
            sessions_before_long_break: SESSIONS_BEFORE_LONG_BREAK,
        }
    }

    pub fn sessions_before_long_break(&self) -> u32 {
        self.sessions_before_long_break
    }

    /// Record a finished session and return the session that should follow.
    ///
    /// Work completions bump both counters. The cycle counter saturates at
    /// the threshold until a long break is entered.
    pub fn record_completion(
        &self,
        finished: SessionType,
        counters: &mut CycleCounters,
    ) -> SessionType {
        match finished {
            SessionType::Work => {
                counters.completed_work_sessions =
                    counters.completed_work_sessions.saturating_add(1);
                counters.work_sessions_in_cycle = (counters.work_sessions_in_cycle + 1)
                    .min(self.sessions_before_long_break);
                if counters.work_sessions_in_cycle >= self.sessions_before_long_break {
                    SessionType::LongBreak
                } else {
                    SessionType::ShortBreak
                }
            }
            SessionType::ShortBreak | SessionType::LongBreak => SessionType::Work,
        }
    }

    /// Bookkeeping for switching into `target`.
    ///
    /// Entering a long break once the cycle is full starts a new cycle.
    pub fn enter(&self, target: SessionType, counters: &mut CycleCounters) {
        if target == SessionType::LongBreak
            && counters.work_sessions_in_cycle >= self.sessions_before_long_break
        {
            counters.work_sessions_in_cycle = 0;
        }
    }
}

impl Default for SessionSequencer {
    fn default() -> Self {
        Self::new()
    }
}
