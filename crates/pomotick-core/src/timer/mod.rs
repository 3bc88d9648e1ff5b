mod engine;
mod intent;
mod sequencer;
mod session;
mod snapshot;

pub use engine::TimerEngine;
pub use intent::Intent;
pub use sequencer::{CycleCounters, SessionSequencer};
pub use session::{
    SessionType, SESSIONS_BEFORE_LONG_BREAK, SETTLE_DELAY, TICK_INTERVAL,
};
pub use snapshot::{TimerSnapshot, TimerState};
