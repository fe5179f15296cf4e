// SPDX-License-Identifier: MPL-2.0
//! Thread-safe handle around the engine.
//!
//! `Indicators` keeps the engine behind a mutex and runs a driver task that
//! receives matured timers and applies them under the same lock, so timer
//! fires never race with user-driven mutations.

use super::engine::{Activation, Engine};
use super::scheduler::TimerFired;
use super::snapshot::Snapshot;
use crate::config::Config;
use crate::error::Result;
use crate::indicator::Indicator;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};

/// Cloneable, shareable entry point to an indicator stack.
///
/// # Example
///
/// ```
/// use indicator_stack::config::Config;
/// use indicator_stack::{Indicator, Indicators};
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> indicator_stack::error::Result<()> {
/// let indicators = Indicators::new(&Config::default())?;
/// indicators.display(Indicator::new("saved", "Saved").dismiss_after(Duration::from_secs(3)));
/// assert!(indicators.snapshot().contains("saved"));
///
/// indicators.dismiss("saved");
/// assert!(indicators.snapshot().is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Indicators {
    engine: Arc<Mutex<Engine>>,
}

impl Indicators {
    /// Creates a stack driven by the current tokio runtime.
    ///
    /// Fails with `Error::Runtime` when called outside a runtime.
    pub fn new(config: &Config) -> Result<Self> {
        let runtime = Handle::try_current()?;
        Ok(Self::with_runtime(config, runtime))
    }

    /// Creates a stack whose timers and driver run on `runtime`.
    ///
    /// Usable from threads that are not part of the runtime.
    pub fn with_runtime(config: &Config, runtime: Handle) -> Self {
        let (engine, fired_rx) = Engine::new(config, runtime.clone());
        let engine = Arc::new(Mutex::new(engine));
        runtime.spawn(drive_timers(Arc::downgrade(&engine), fired_rx));
        Self { engine }
    }

    pub fn display(&self, indicator: Indicator) {
        self.lock().display(indicator);
    }

    pub fn dismiss(&self, id: &str) -> bool {
        self.lock().dismiss(id)
    }

    pub fn dismiss_all(&self) {
        self.lock().dismiss_all();
    }

    pub fn set_expanded(&self, id: &str, expanded: bool) -> bool {
        self.lock().set_expanded(id, expanded)
    }

    pub fn toggle_expanded(&self, id: &str) -> Option<bool> {
        self.lock().toggle_expanded(id)
    }

    pub fn activate(&self, id: &str) -> Option<Activation> {
        self.lock().activate(id)
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.lock().subscribe()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.lock().contains(id)
    }

    #[must_use]
    pub fn is_expanded(&self, id: &str) -> bool {
        self.lock().is_expanded(id)
    }

    #[must_use]
    pub fn haptics_enabled(&self) -> bool {
        self.lock().haptics_enabled()
    }

    /// Engine state stays consistent across a panic in another holder, so a
    /// poisoned lock is recovered.
    fn lock(&self) -> MutexGuard<'_, Engine> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Applies matured timers until the engine is dropped.
async fn drive_timers(
    engine: Weak<Mutex<Engine>>,
    mut fired_rx: mpsc::UnboundedReceiver<TimerFired>,
) {
    while let Some(fired) = fired_rx.recv().await {
        let Some(shared) = engine.upgrade() else {
            break;
        };
        shared
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .handle_timer_fired(fired);
    }
    tracing::trace!("timer driver stopped");
}
