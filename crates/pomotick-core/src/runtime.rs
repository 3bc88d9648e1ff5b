//! Async drivers for the timer engine.
//!
//! [`TimerRuntime`] owns a [`TimerEngine`] and the two timers that move it
//! forward on their own: the periodic one-second tick while a session is
//! running, and the one-shot settle delay between a completion and the
//! automatic switch to the next session.
//!
//! After every mutation the runtime reconciles its drivers with the engine:
//! a tick driver exists iff the engine is running, and a settle driver
//! exists iff an automatic switch is pending. Each driver carries a
//! generation number, so a task that was aborted while already waiting on
//! the lock can never act on the engine.
//!
//! All methods that may spawn drivers must be called from within a Tokio
//! runtime.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, warn};

use crate::events::Event;
use crate::notify::{Notifier, NullNotifier};
use crate::timer::{
    Intent, SessionType, TimerEngine, TimerSnapshot, SETTLE_DELAY, TICK_INTERVAL,
};

const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeOptions {
    pub tick_interval: Duration,
    pub settle_delay: Duration,
    /// Start the next session right after an automatic switch.
    pub auto_start: bool,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            tick_interval: TICK_INTERVAL,
            settle_delay: SETTLE_DELAY,
            auto_start: false,
        }
    }
}

/// Handle to a running timer. Cheap to clone; all clones share one engine.
#[derive(Clone)]
pub struct TimerRuntime {
    shared: Arc<Shared>,
}

struct Shared {
    core: Mutex<Core>,
    snapshot_tx: watch::Sender<TimerSnapshot>,
    events_tx: broadcast::Sender<Event>,
    notifier: Arc<dyn Notifier>,
    options: RuntimeOptions,
}

struct Core {
    engine: TimerEngine,
    ticker: Option<Driver>,
    settle: Option<Driver>,
    generation: u64,
}

struct Driver {
    generation: u64,
    handle: JoinHandle<()>,
}

impl Driver {
    fn cancel(self) {
        self.handle.abort();
    }
}

impl TimerRuntime {
    pub fn new(engine: TimerEngine, notifier: Arc<dyn Notifier>, options: RuntimeOptions) -> Self {
        let (snapshot_tx, _) = watch::channel(engine.snapshot());
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let shared = Arc::new(Shared {
            core: Mutex::new(Core {
                engine,
                ticker: None,
                settle: None,
                generation: 0,
            }),
            snapshot_tx,
            events_tx,
            notifier,
            options,
        });
        {
            let mut core = shared.lock();
            shared.reconcile(&mut core);
        }
        Self { shared }
    }

    /// A fresh engine with no notifier and the standard timings.
    pub fn with_defaults() -> Self {
        Self::new(
            TimerEngine::new(),
            Arc::new(NullNotifier),
            RuntimeOptions::default(),
        )
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.shared.lock().engine.snapshot()
    }

    /// Receiver that always holds the latest snapshot.
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.shared.snapshot_tx.subscribe()
    }

    /// Receiver for every event produced from now on.
    pub fn events(&self) -> broadcast::Receiver<Event> {
        self.shared.events_tx.subscribe()
    }

    pub fn dispatch(&self, intent: Intent) -> Option<Event> {
        self.shared.apply(|engine| engine.apply(intent))
    }

    pub fn start(&self) -> Option<Event> {
        self.dispatch(Intent::Start)
    }

    pub fn pause(&self) -> Option<Event> {
        self.dispatch(Intent::Pause)
    }

    pub fn resume(&self) -> Option<Event> {
        self.dispatch(Intent::Resume)
    }

    pub fn toggle_pause(&self) -> Option<Event> {
        self.dispatch(Intent::TogglePause)
    }

    pub fn reset(&self) -> Option<Event> {
        self.dispatch(Intent::Reset)
    }

    pub fn select_session(&self, session_type: SessionType) -> Option<Event> {
        self.dispatch(Intent::SelectSession(session_type))
    }

    pub fn set_auto_advance(&self, enabled: bool) -> Option<Event> {
        self.dispatch(Intent::SetAutoAdvance(enabled))
    }

    /// Whether a tick driver is currently live.
    pub fn is_ticking(&self) -> bool {
        self.shared.lock().ticker.is_some()
    }

    /// Whether an automatic switch is waiting out the settle delay.
    pub fn is_settling(&self) -> bool {
        self.shared.lock().settle.is_some()
    }

    /// Stop every driver. The engine keeps its state.
    pub fn shutdown(&self) {
        let mut core = self.shared.lock();
        core.stop_drivers();
        debug!("timer runtime shut down");
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Core> {
        self.core.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply(self: &Arc<Self>, f: impl FnOnce(&mut TimerEngine) -> Option<Event>) -> Option<Event> {
        let mut core = self.lock();
        let event = f(&mut core.engine)?;
        self.reconcile(&mut core);
        self.publish(&core, event.clone());
        Some(event)
    }

    /// Bring the drivers in line with the engine state.
    fn reconcile(self: &Arc<Self>, core: &mut Core) {
        match (core.engine.is_running(), core.ticker.is_some()) {
            (true, false) => self.spawn_ticker(core),
            (false, true) => {
                if let Some(ticker) = core.ticker.take() {
                    debug!(generation = ticker.generation, "tick driver stopped");
                    ticker.cancel();
                }
            }
            _ => {}
        }

        match (core.engine.pending_advance().is_some(), core.settle.is_some()) {
            (true, false) => self.spawn_settle(core),
            (false, true) => {
                if let Some(settle) = core.settle.take() {
                    debug!(generation = settle.generation, "pending auto-advance cancelled");
                    settle.cancel();
                }
            }
            _ => {}
        }
    }

    fn spawn_ticker(self: &Arc<Self>, core: &mut Core) {
        let generation = core.next_generation();
        let weak: Weak<Shared> = Arc::downgrade(self);
        let period = self.options.tick_interval;
        let first = Instant::now() + period;
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(first, period);
            loop {
                interval.tick().await;
                let Some(shared) = weak.upgrade() else {
                    break;
                };
                if !shared.on_tick(generation) {
                    break;
                }
            }
        });
        debug!(generation, "tick driver started");
        core.ticker = Some(Driver { generation, handle });
    }

    fn spawn_settle(self: &Arc<Self>, core: &mut Core) {
        let generation = core.next_generation();
        let weak: Weak<Shared> = Arc::downgrade(self);
        let delay = self.options.settle_delay;
        let handle = tokio::spawn(async move {
            time::sleep(delay).await;
            if let Some(shared) = weak.upgrade() {
                shared.on_settle(generation);
            }
        });
        debug!(generation, ?delay, "auto-advance scheduled");
        core.settle = Some(Driver { generation, handle });
    }

    /// Returns whether the driver should keep ticking.
    fn on_tick(self: &Arc<Self>, generation: u64) -> bool {
        let mut core = self.lock();
        if core.ticker.as_ref().map(|d| d.generation) != Some(generation) {
            return false;
        }
        let Some(event) = core.engine.tick() else {
            core.ticker = None;
            return false;
        };

        let finished = match &event {
            Event::SessionCompleted { session_type, .. } => Some(*session_type),
            _ => None,
        };
        if finished.is_some() {
            // This task is the driver; let it end instead of aborting itself.
            core.ticker = None;
        }
        self.reconcile(&mut core);
        self.publish(&core, event);
        drop(core);

        match finished {
            Some(session) => {
                self.spawn_notify(session);
                false
            }
            None => true,
        }
    }

    fn on_settle(self: &Arc<Self>, generation: u64) {
        let mut core = self.lock();
        if core.settle.as_ref().map(|d| d.generation) != Some(generation) {
            return;
        }
        core.settle = None;
        let Some(switched) = core.engine.apply_pending_advance() else {
            return;
        };
        self.publish(&core, switched);

        if self.options.auto_start {
            if let Some(started) = core.engine.start() {
                self.reconcile(&mut core);
                self.publish(&core, started);
            }
        }
    }

    /// Fire-and-forget: the notifier runs off the runtime threads and its
    /// outcome never reaches the engine.
    fn spawn_notify(&self, session: SessionType) {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            let outcome =
                tokio::task::spawn_blocking(move || notifier.notify_session_complete(session))
                    .await;
            match outcome {
                Ok(Ok(())) => debug!(session = %session, "completion notified"),
                Ok(Err(e)) => warn!(session = %session, error = %e, "completion notification failed"),
                Err(e) => warn!(session = %session, error = %e, "completion notifier panicked"),
            }
        });
    }

    fn publish(&self, core: &Core, event: Event) {
        self.snapshot_tx.send_replace(core.engine.snapshot());
        // Nobody listening is fine.
        let _ = self.events_tx.send(event);
    }
}

impl Core {
    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    fn stop_drivers(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
        if let Some(settle) = self.settle.take() {
            settle.cancel();
        }
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        self.core
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .stop_drivers();
    }
}
