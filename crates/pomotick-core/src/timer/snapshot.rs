use serde::{Deserialize, Serialize};

use super::session::SessionType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// Externally observable state of the timer.
///
/// Presentation layers render from this and never mutate it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub session_type: SessionType,
    pub timer_state: TimerState,
    pub time_left_secs: u32,
    /// Lifetime count of finished work sessions.
    pub completed_work_sessions: u32,
    pub work_sessions_in_cycle: u32,
    pub auto_advance: bool,
}

impl TimerSnapshot {
    pub fn duration_secs(&self) -> u32 {
        self.session_type.duration_secs()
    }

    /// 0.0 .. 1.0 progress within the current session.
    pub fn progress(&self) -> f64 {
        let total = self.duration_secs();
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.time_left_secs);
        f64::from(elapsed) / f64::from(total)
    }

    /// Remaining time as `MM:SS`.
    pub fn format_remaining(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.time_left_secs / 60,
            self.time_left_secs % 60
        )
    }
}

impl Default for TimerSnapshot {
    fn default() -> Self {
        let session_type = SessionType::Work;
        Self {
            session_type,
            timer_state: TimerState::Idle,
            time_left_secs: session_type.duration_secs(),
            completed_work_sessions: 0,
            work_sessions_in_cycle: 0,
            auto_advance: true,
        }
    }
}
