// SPDX-License-Identifier: MPL-2.0
//! Indicator lifecycle management.
//!
//! The `Engine` owns the ordered set of visible indicators, their expansion
//! state and their expiry timers. All mutation goes through `&mut self`, so
//! whoever owns the engine serializes every transition. Timer fires arrive
//! as [`TimerFired`] messages and are only honored when their generation is
//! still the record's current one.

use super::depth::DepthStep;
use super::scheduler::{TimerFired, TimerScheduler};
use super::snapshot::{Snapshot, VisibleIndicator};
use crate::config::Config;
use crate::indicator::{ActionKind, DismissPolicy, Indicator, IndicatorId};
use std::collections::HashSet;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};

/// Outcome of tapping an indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Expanded,
    Collapsed,
    /// The caller should run the action it associated with this id.
    Execute(IndicatorId),
}

#[derive(Debug)]
struct Entry {
    indicator: Indicator,
    generation: u64,
}

/// Owns the visible indicators and drives their transitions.
#[derive(Debug)]
pub struct Engine {
    /// Stack order: oldest first, newest last.
    visible: Vec<Entry>,
    expanded: HashSet<IndicatorId>,
    scheduler: TimerScheduler,
    /// Engine-wide, so a fire from an earlier lifetime of an id never matches.
    next_generation: u64,
    revision: u64,
    depth_step: DepthStep,
    haptics_enabled: bool,
    changes: watch::Sender<Snapshot>,
}

impl Engine {
    /// Creates an engine whose timers run on `runtime`.
    ///
    /// The returned receiver yields matured timers; feed each one to
    /// [`Engine::handle_timer_fired`] from the context that owns the engine.
    pub fn new(config: &Config, runtime: Handle) -> (Self, mpsc::UnboundedReceiver<TimerFired>) {
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        let (changes, _) = watch::channel(Snapshot::default());
        let engine = Self {
            visible: Vec::new(),
            expanded: HashSet::new(),
            scheduler: TimerScheduler::new(runtime, fired_tx),
            next_generation: 0,
            revision: 0,
            depth_step: config.depth_step(),
            haptics_enabled: config.haptics_enabled(),
            changes,
        };
        (engine, fired_rx)
    }

    /// Shows an indicator, or updates the visible one with the same id in place.
    ///
    /// An update keeps the stack position and the expansion state, except that
    /// an indicator without detail text is collapsed. The expiry countdown
    /// restarts from now unless the indicator is expanded.
    pub fn display(&mut self, indicator: Indicator) {
        let generation = self.bump_generation();
        let id = indicator.id().clone();
        let policy = indicator.dismiss_policy();
        let has_detail = indicator.has_detail();

        match self.position(id.as_str()) {
            Some(index) => {
                self.visible[index] = Entry {
                    indicator,
                    generation,
                };
                if !has_detail && self.expanded.remove(id.as_str()) {
                    tracing::debug!(id = %id, "collapsed indicator without detail text");
                }
                tracing::debug!(id = %id, generation, index, "updated indicator in place");
            }
            None => {
                self.visible.push(Entry {
                    indicator,
                    generation,
                });
                tracing::debug!(id = %id, generation, "displayed indicator");
            }
        }

        if self.expanded.contains(id.as_str()) {
            self.scheduler.cancel(id.as_str());
        } else {
            self.arm_or_cancel(&id, policy, generation);
        }
        self.publish();
    }

    /// Removes the indicator with `id`. Returns `false` if it was not visible.
    pub fn dismiss(&mut self, id: &str) -> bool {
        self.remove(id, "dismissed")
    }

    /// Removes every indicator and cancels every timer.
    pub fn dismiss_all(&mut self) {
        self.scheduler.cancel_all();
        if self.visible.is_empty() {
            return;
        }
        let count = self.visible.len();
        self.visible.clear();
        self.expanded.clear();
        tracing::debug!(count, "dismissed all indicators");
        self.publish();
    }

    /// Expands or collapses an indicator.
    ///
    /// Expanding requires detail text and suspends expiry. Collapsing starts a
    /// fresh countdown for `After` policies. Returns `true` if the state
    /// changed; requests for absent ids or the current state are no-ops.
    pub fn set_expanded(&mut self, id: &str, expanded: bool) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        if self.expanded.contains(id) == expanded {
            return false;
        }
        if expanded && !self.visible[index].indicator.has_detail() {
            return false;
        }

        let generation = self.bump_generation();
        let entry = &mut self.visible[index];
        entry.generation = generation;
        let entry_id = entry.indicator.id().clone();
        let policy = entry.indicator.dismiss_policy();

        if expanded {
            self.expanded.insert(entry_id.clone());
            self.scheduler.cancel(id);
        } else {
            self.expanded.remove(id);
            self.arm_or_cancel(&entry_id, policy, generation);
        }
        tracing::debug!(id = %entry_id, generation, expanded, "changed expansion");
        self.publish();
        true
    }

    /// Flips the expansion state. Returns the new state if it changed.
    pub fn toggle_expanded(&mut self, id: &str) -> Option<bool> {
        let target = !self.is_expanded(id);
        self.set_expanded(id, target).then_some(target)
    }

    /// Applies the indicator's tap action.
    ///
    /// `ToggleExpansion` is handled here; `Execute` is returned to the caller
    /// untouched. Returns `None` when there is nothing to do.
    pub fn activate(&mut self, id: &str) -> Option<Activation> {
        let action = self.get(id)?.action()?;
        match action {
            ActionKind::ToggleExpansion => self.toggle_expanded(id).map(|expanded| {
                if expanded {
                    Activation::Expanded
                } else {
                    Activation::Collapsed
                }
            }),
            ActionKind::Execute => Some(Activation::Execute(IndicatorId::from(id))),
        }
    }

    /// Applies a matured timer.
    ///
    /// The indicator is dismissed only if the fire carries its current
    /// generation; fires for replaced, expanded or removed records are
    /// dropped. Returns `true` if an indicator was dismissed.
    pub fn handle_timer_fired(&mut self, fired: TimerFired) -> bool {
        self.scheduler.settle(&fired);

        if self.generation(fired.id.as_str()) != Some(fired.generation) {
            tracing::debug!(
                id = %fired.id,
                generation = fired.generation,
                "discarded stale timer fire"
            );
            return false;
        }
        self.remove(fired.id.as_str(), "expired")
    }

    /// Current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let count = self.visible.len();
        let entries = self
            .visible
            .iter()
            .enumerate()
            .map(|(index, entry)| VisibleIndicator {
                indicator: entry.indicator.clone(),
                generation: entry.generation,
                expanded: self.expanded.contains(entry.indicator.id().as_str()),
                scale: self.depth_step.scale(index, count),
                z_index: index,
            })
            .collect();
        Snapshot {
            revision: self.revision,
            entries,
        }
    }

    /// Receives a fresh snapshot after every state-changing mutation.
    ///
    /// Dropping the receiver unsubscribes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.changes.subscribe()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Indicator> {
        self.position(id).map(|index| &self.visible[index].indicator)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    #[must_use]
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Current generation of a visible indicator.
    #[must_use]
    pub fn generation(&self, id: &str) -> Option<u64> {
        self.position(id).map(|index| self.visible[index].generation)
    }

    /// Whether an expiry timer is pending for `id`.
    #[must_use]
    pub fn is_timer_armed(&self, id: &str) -> bool {
        self.scheduler.is_armed(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Advisory flag for the rendering layer; has no effect on engine state.
    #[must_use]
    pub fn haptics_enabled(&self) -> bool {
        self.haptics_enabled
    }

    #[must_use]
    pub fn depth_step(&self) -> DepthStep {
        self.depth_step
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.visible
            .iter()
            .position(|entry| entry.indicator.id().as_str() == id)
    }

    fn bump_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    fn arm_or_cancel(&mut self, id: &IndicatorId, policy: DismissPolicy, generation: u64) {
        match policy.timeout() {
            Some(delay) => self.scheduler.arm(id, delay, generation),
            None => {
                self.scheduler.cancel(id.as_str());
            }
        }
    }

    fn remove(&mut self, id: &str, reason: &'static str) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.visible.remove(index);
        self.expanded.remove(id);
        self.scheduler.cancel(id);
        tracing::debug!(id, reason, "removed indicator");
        self.publish();
        true
    }

    fn publish(&mut self) {
        self.revision += 1;
        let snapshot = self.snapshot();
        self.changes.send_replace(snapshot);
    }
}
