use serde::{Deserialize, Serialize};

use super::engine::TimerEngine;
use super::session::SessionType;
use crate::events::Event;

/// A user request forwarded by a front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", content = "value", rename_all = "snake_case")]
pub enum Intent {
    Start,
    Pause,
    Resume,
    TogglePause,
    Reset,
    SelectSession(SessionType),
    SetAutoAdvance(bool),
}

impl TimerEngine {
    /// Dispatch an intent to the matching command.
    pub fn apply(&mut self, intent: Intent) -> Option<Event> {
        match intent {
            Intent::Start => self.start(),
            Intent::Pause => self.pause(),
            Intent::Resume => self.resume(),
            Intent::TogglePause => self.toggle_pause(),
            Intent::Reset => self.reset(),
            Intent::SelectSession(session_type) => self.select_session(session_type),
            Intent::SetAutoAdvance(enabled) => self.set_auto_advance(enabled),
        }
    }
}
