//! Completion notification capability.
//!
//! The engine only knows that "a session just ended". How that is announced
//! (bell, desktop popup, sound) belongs to the front-end, which injects a
//! [`Notifier`] into the runtime.

use std::sync::Arc;

use crate::error::NotifyError;
use crate::timer::SessionType;

pub trait Notifier: Send + Sync {
    fn notify_session_complete(&self, session: SessionType) -> Result<(), NotifyError>;
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify_session_complete(&self, _session: SessionType) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Adapts a closure into a [`Notifier`].
pub struct FnNotifier<F>(F);

impl<F> FnNotifier<F>
where
    F: Fn(SessionType) -> Result<(), NotifyError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Notifier for FnNotifier<F>
where
    F: Fn(SessionType) -> Result<(), NotifyError> + Send + Sync,
{
    fn notify_session_complete(&self, session: SessionType) -> Result<(), NotifyError> {
        (self.0)(session)
    }
}

/// Fans a notification out to several backends.
///
/// Every backend is tried; the first failure is reported.
#[derive(Default, Clone)]
pub struct NotifierSet {
    backends: Vec<Arc<dyn Notifier>>,
}

impl NotifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, backend: impl Notifier + 'static) -> Self {
        self.backends.push(Arc::new(backend));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

impl Notifier for NotifierSet {
    fn notify_session_complete(&self, session: SessionType) -> Result<(), NotifyError> {
        let mut first_err = None;
        for backend in &self.backends {
            if let Err(e) = backend.notify_session_complete(session) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}
