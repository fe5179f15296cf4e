// SPDX-License-Identifier: MPL-2.0
//! Read-only view of the engine state for the rendering layer.

use crate::indicator::{Indicator, IndicatorId};

/// One visible indicator together with its engine-assigned metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleIndicator {
    pub indicator: Indicator,
    pub generation: u64,
    pub expanded: bool,
    /// Visual scale from the stack depth metric (1.0 for the top entry).
    pub scale: f32,
    /// Stacking order; higher draws above lower.
    pub z_index: usize,
}

impl VisibleIndicator {
    #[must_use]
    pub fn id(&self) -> &IndicatorId {
        self.indicator.id()
    }
}

/// Visible indicators in stack order (oldest first, newest last).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub(crate) revision: u64,
    pub(crate) entries: Vec<VisibleIndicator>,
}

impl Snapshot {
    /// Number of state-changing mutations applied before this snapshot was taken.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn iter(&self) -> impl Iterator<Item = &VisibleIndicator> {
        self.entries.iter()
    }

    #[must_use]
    pub fn entries(&self) -> &[VisibleIndicator] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&VisibleIndicator> {
        self.entries.iter().find(|entry| entry.id().as_str() == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Ids in stack order.
    pub fn ids(&self) -> impl Iterator<Item = &IndicatorId> {
        self.entries.iter().map(VisibleIndicator::id)
    }

    /// Ids currently in the expanded state.
    pub fn expanded_ids(&self) -> impl Iterator<Item = &IndicatorId> {
        self.entries
            .iter()
            .filter(|entry| entry.expanded)
            .map(VisibleIndicator::id)
    }
}
