// SPDX-License-Identifier: MPL-2.0
//! Per-indicator expiry timers.
//!
//! Each armed timer is a one-shot tokio task that sleeps and then reports
//! `(id, generation)` on the engine's channel. The task never touches engine
//! state; the receiving side decides whether the fire still applies.

use crate::indicator::IndicatorId;
use std::collections::HashMap;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A matured timer, delivered to the engine's owning context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerFired {
    pub id: IndicatorId,
    /// Generation of the record when the timer was armed.
    pub generation: u64,
}

#[derive(Debug)]
struct ArmedTimer {
    task: JoinHandle<()>,
    generation: u64,
}

/// Owns at most one expiry timer per indicator id.
#[derive(Debug)]
pub struct TimerScheduler {
    runtime: Handle,
    fired_tx: mpsc::UnboundedSender<TimerFired>,
    armed: HashMap<IndicatorId, ArmedTimer>,
}

impl TimerScheduler {
    /// Creates a scheduler spawning timers on `runtime` and reporting on `fired_tx`.
    pub fn new(runtime: Handle, fired_tx: mpsc::UnboundedSender<TimerFired>) -> Self {
        Self {
            runtime,
            fired_tx,
            armed: HashMap::new(),
        }
    }

    /// Replaces any timer for `id` with a fresh one-shot timer.
    ///
    /// The previous task is aborted before the new one is spawned, within the
    /// same `&mut self` call.
    pub fn arm(&mut self, id: &IndicatorId, delay: Duration, generation: u64) {
        self.cancel(id.as_str());

        let tx = self.fired_tx.clone();
        let fired = TimerFired {
            id: id.clone(),
            generation,
        };
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver is gone once the engine is dropped.
            let _ = tx.send(fired);
        });

        tracing::trace!(
            id = %id,
            generation,
            duration_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "armed expiry timer"
        );
        self.armed.insert(id.clone(), ArmedTimer { task, generation });
    }

    /// Cancels the timer for `id`. Returns `true` if one was armed.
    pub fn cancel(&mut self, id: &str) -> bool {
        match self.armed.remove(id) {
            Some(timer) => {
                timer.task.abort();
                tracing::trace!(
                    id,
                    generation = timer.generation,
                    "cancelled expiry timer"
                );
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, timer) in self.armed.drain() {
            timer.task.abort();
        }
    }

    #[must_use]
    pub fn is_armed(&self, id: &str) -> bool {
        self.armed.contains_key(id)
    }

    /// Generation the current timer for `id` was armed for.
    #[must_use]
    pub fn armed_generation(&self, id: &str) -> Option<u64> {
        self.armed.get(id).map(|timer| timer.generation)
    }

    #[must_use]
    pub fn armed_count(&self) -> usize {
        self.armed.len()
    }

    /// Forgets the bookkeeping for a timer that has matured.
    ///
    /// Only removes the entry if it still belongs to `fired`; a newer timer
    /// armed for the same id is left in place.
    pub(crate) fn settle(&mut self, fired: &TimerFired) {
        if self.armed_generation(fired.id.as_str()) == Some(fired.generation) {
            self.armed.remove(fired.id.as_str());
        }
    }
}

impl Drop for TimerScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
