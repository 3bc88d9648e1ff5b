use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ParseSessionTypeError;

/// Work sessions that make up one cycle before a long break is due.
pub const SESSIONS_BEFORE_LONG_BREAK: u32 = 4;

/// Pause between a session finishing and the automatic switch to the next one.
pub const SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Granularity of the countdown.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    #[default]
    Work,
    ShortBreak,
    LongBreak,
}

impl SessionType {
    pub const ALL: [SessionType; 3] = [
        SessionType::Work,
        SessionType::ShortBreak,
        SessionType::LongBreak,
    ];

    /// Full length of a session of this type, in seconds.
    pub fn duration_secs(&self) -> u32 {
        match self {
            SessionType::Work => 25 * 60,
            SessionType::ShortBreak => 5 * 60,
            SessionType::LongBreak => 15 * 60,
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            SessionType::Work => "Focus",
            SessionType::ShortBreak => "Short Break",
            SessionType::LongBreak => "Long Break",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::Work => "work",
            SessionType::ShortBreak => "short_break",
            SessionType::LongBreak => "long_break",
        }
    }

    pub fn is_break(&self) -> bool {
        !matches!(self, SessionType::Work)
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SessionType {
    type Err = ParseSessionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "work" | "focus" => Ok(SessionType::Work),
            "short_break" | "short-break" | "short" => Ok(SessionType::ShortBreak),
            "long_break" | "long-break" | "long" => Ok(SessionType::LongBreak),
            other => Err(ParseSessionTypeError(other.to_string())),
        }
    }
}
