//! Timer engine implementation.
//!
//! The timer engine is a tick-driven state machine. It does not use
//! internal threads - the caller delivers one `tick()` per elapsed second
//! while the timer is running (see [`crate::runtime::TimerRuntime`]).
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Paused -> Running
//! Running | Paused -> (reset) -> Idle
//! Running -> (countdown reaches 0) -> Idle
//! ```
//!
//! ## Usage
//!
//! ```
//! use pomotick_core::TimerEngine;
//!
//! let mut engine = TimerEngine::new();
//! engine.start();
//! // Once per second:
//! engine.tick(); // Returns Some(Event::SessionCompleted) when the session ends
//! ```

use chrono::Utc;
use tracing::{debug, info};

use super::sequencer::{CycleCounters, SessionSequencer};
use super::session::SessionType;
use super::snapshot::{TimerSnapshot, TimerState};
use crate::events::Event;

/// Core timer engine.
///
/// Every command returns `Some(event)` when applied and `None` when the
/// command is not legal in the current state.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    session_type: SessionType,
    state: TimerState,
    time_left_secs: u32,
    counters: CycleCounters,
    auto_advance: bool,
    /// Session to switch to once the settle delay elapses.
    pending_advance: Option<SessionType>,
    sequencer: SessionSequencer,
}

impl TimerEngine {
    /// Create a new engine: idle, in a full work session, auto-advance on.
    pub fn new() -> Self {
        Self::from_snapshot(TimerSnapshot::default())
    }

    /// Rebuild an engine from a snapshot, clamping it back into range.
    pub fn from_snapshot(snapshot: TimerSnapshot) -> Self {
        let sequencer = SessionSequencer::new();
        Self {
            session_type: snapshot.session_type,
            state: snapshot.timer_state,
            time_left_secs: snapshot
                .time_left_secs
                .min(snapshot.session_type.duration_secs()),
            counters: CycleCounters {
                completed_work_sessions: snapshot.completed_work_sessions,
                work_sessions_in_cycle: snapshot
                    .work_sessions_in_cycle
                    .min(sequencer.sessions_before_long_break()),
            },
            auto_advance: snapshot.auto_advance,
            pending_advance: None,
            sequencer,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn session_type(&self) -> SessionType {
        self.session_type
    }

    pub fn time_left_secs(&self) -> u32 {
        self.time_left_secs
    }

    pub fn counters(&self) -> CycleCounters {
        self.counters
    }

    pub fn auto_advance(&self) -> bool {
        self.auto_advance
    }

    pub fn pending_advance(&self) -> Option<SessionType> {
        self.pending_advance
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            session_type: self.session_type,
            timer_state: self.state,
            time_left_secs: self.time_left_secs,
            completed_work_sessions: self.counters.completed_work_sessions,
            work_sessions_in_cycle: self.counters.work_sessions_in_cycle,
            auto_advance: self.auto_advance,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start the countdown. Legal from `Idle` only.
    ///
    /// If an automatic switch is still waiting out the settle delay it is
    /// applied right away and the next session starts. A session left at
    /// zero is re-armed to its full length first.
    pub fn start(&mut self) -> Option<Event> {
        if self.state != TimerState::Idle {
            return None;
        }
        if let Some(next) = self.pending_advance.take() {
            self.switch_to(next);
        } else if self.time_left_secs == 0 {
            self.time_left_secs = self.session_type.duration_secs();
        }
        self.state = TimerState::Running;
        debug!(session = %self.session_type, time_left = self.time_left_secs, "timer started");
        Some(Event::TimerStarted {
            session_type: self.session_type,
            time_left_secs: self.time_left_secs,
            at: Utc::now(),
        })
    }

    /// Pause the countdown, keeping the remaining time. Legal from `Running` only.
    pub fn pause(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.state = TimerState::Paused;
        debug!(time_left = self.time_left_secs, "timer paused");
        Some(Event::TimerPaused {
            session_type: self.session_type,
            time_left_secs: self.time_left_secs,
            at: Utc::now(),
        })
    }

    /// Continue a paused countdown. Legal from `Paused` only.
    pub fn resume(&mut self) -> Option<Event> {
        if self.state != TimerState::Paused {
            return None;
        }
        self.state = TimerState::Running;
        debug!(time_left = self.time_left_secs, "timer resumed");
        Some(Event::TimerResumed {
            session_type: self.session_type,
            time_left_secs: self.time_left_secs,
            at: Utc::now(),
        })
    }

    /// Single-button control: pause when running, otherwise start or resume.
    pub fn toggle_pause(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running => self.pause(),
            TimerState::Paused => self.resume(),
            TimerState::Idle => self.start(),
        }
    }

    /// Back to `Idle` with the current session at full length.
    ///
    /// Legal from any state; counters are untouched.
    pub fn reset(&mut self) -> Option<Event> {
        self.state = TimerState::Idle;
        self.pending_advance = None;
        self.time_left_secs = self.session_type.duration_secs();
        debug!(session = %self.session_type, "timer reset");
        Some(Event::TimerReset {
            session_type: self.session_type,
            time_left_secs: self.time_left_secs,
            at: Utc::now(),
        })
    }

    /// Manually switch session type. Rejected unless `Idle`.
    pub fn select_session(&mut self, session_type: SessionType) -> Option<Event> {
        if self.state != TimerState::Idle {
            return None;
        }
        self.pending_advance = None;
        let from = self.session_type;
        self.switch_to(session_type);
        debug!(from = %from, to = %session_type, "session selected");
        Some(Event::SessionSwitched {
            from,
            to: session_type,
            automatic: false,
            at: Utc::now(),
        })
    }

    /// Turning auto-advance off also drops a switch that is still pending.
    pub fn set_auto_advance(&mut self, enabled: bool) -> Option<Event> {
        self.auto_advance = enabled;
        if !enabled {
            self.pending_advance = None;
        }
        Some(Event::AutoAdvanceChanged {
            enabled,
            at: Utc::now(),
        })
    }

    /// Advance the countdown by one second.
    ///
    /// Ignored unless running. When the last second elapses the engine goes
    /// `Idle` and returns `Event::SessionCompleted`.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        if self.time_left_secs > 1 {
            self.time_left_secs -= 1;
            return Some(Event::Tick {
                session_type: self.session_type,
                time_left_secs: self.time_left_secs,
                at: Utc::now(),
            });
        }
        Some(self.complete())
    }

    /// Apply the switch scheduled by the last completion.
    ///
    /// Returns `None` when nothing is pending, e.g. because a user action
    /// pre-empted it during the settle delay.
    pub fn apply_pending_advance(&mut self) -> Option<Event> {
        if self.state != TimerState::Idle {
            self.pending_advance = None;
            return None;
        }
        let next = self.pending_advance.take()?;
        let from = self.session_type;
        self.switch_to(next);
        info!(from = %from, to = %next, "auto-advanced to next session");
        Some(Event::SessionSwitched {
            from,
            to: next,
            automatic: true,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete(&mut self) -> Event {
        let finished = self.session_type;
        self.time_left_secs = 0;
        self.state = TimerState::Idle;
        let next = self
            .sequencer
            .record_completion(finished, &mut self.counters);
        self.pending_advance = self.auto_advance.then_some(next);
        info!(
            session = %finished,
            completed = self.counters.completed_work_sessions,
            cycle = self.counters.work_sessions_in_cycle,
            "session completed"
        );
        Event::SessionCompleted {
            session_type: finished,
            completed_work_sessions: self.counters.completed_work_sessions,
            work_sessions_in_cycle: self.counters.work_sessions_in_cycle,
            next_session: self.pending_advance,
            at: Utc::now(),
        }
    }

    fn switch_to(&mut self, session_type: SessionType) {
        self.sequencer.enter(session_type, &mut self.counters);
        self.session_type = session_type;
        self.time_left_secs = session_type.duration_secs();
        self.state = TimerState::Idle;
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}
