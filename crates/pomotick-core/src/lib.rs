//! # Pomotick Core Library
//!
//! This library provides the core logic for the Pomotick Pomodoro timer:
//! alternating 25-minute focus sessions with short breaks, and a long break
//! after every fourth focus session.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A tick-driven state machine covering the session
//!   clock, the session sequencer and the control surface
//! - **Runtime**: Tokio drivers that deliver one tick per second and apply
//!   auto-advance after a short settle delay
//! - **Notify**: Injected capability used to announce finished sessions
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`TimerRuntime`]: Drives a `TimerEngine` in real time
//! - [`TimerSnapshot`]: Externally observable timer state
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod notify;
pub mod runtime;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, NotifyError, ParseSessionTypeError};
pub use events::Event;
pub use notify::{FnNotifier, Notifier, NotifierSet, NullNotifier};
pub use runtime::{RuntimeOptions, TimerRuntime};
pub use storage::Config;
pub use timer::{
    CycleCounters, Intent, SessionSequencer, SessionType, TimerEngine, TimerSnapshot, TimerState,
};
