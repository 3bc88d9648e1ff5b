use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::SessionType;

/// Every state change in the engine produces an Event.
/// Front-ends subscribe to them; the snapshot is the source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        session_type: SessionType,
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        session_type: SessionType,
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    TimerResumed {
        session_type: SessionType,
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        session_type: SessionType,
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    /// One second of countdown elapsed.
    Tick {
        session_type: SessionType,
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    /// The countdown reached zero.
    ///
    /// `next_session` is set when auto-advance will switch after the settle delay.
    SessionCompleted {
        session_type: SessionType,
        completed_work_sessions: u32,
        work_sessions_in_cycle: u32,
        next_session: Option<SessionType>,
        at: DateTime<Utc>,
    },
    SessionSwitched {
        from: SessionType,
        to: SessionType,
        /// True when triggered by auto-advance rather than a user selection.
        automatic: bool,
        at: DateTime<Utc>,
    },
    AutoAdvanceChanged {
        enabled: bool,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn is_completion(&self) -> bool {
        matches!(self, Event::SessionCompleted { .. })
    }
}
