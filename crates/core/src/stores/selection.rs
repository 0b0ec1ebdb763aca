#![forbid(unsafe_code)]

use crate::domain::ProcessId;
use std::collections::{BTreeSet, HashSet};

/// Operator selection, kept consistent with the identifiers emitted by the
/// latest tick.
#[derive(Debug, Default)]
pub struct Selection {
    selected: HashSet<ProcessId>,
    live: HashSet<ProcessId>,
}

impl Selection {
    /// Flip `id` and return its new membership. Identifiers that were not
    /// emitted by the latest tick are ignored.
    pub fn toggle(&mut self, id: ProcessId) -> Option<bool> {
        if !self.live.contains(&id) {
            return None;
        }
        if self.selected.remove(&id) {
            Some(false)
        } else {
            self.selected.insert(id);
            Some(true)
        }
    }

    /// Adopt `emitted` as the live set and drop selections that left it.
    pub fn reconcile(&mut self, emitted: HashSet<ProcessId>) {
        self.selected.retain(|id| emitted.contains(id));
        self.live = emitted;
    }

    pub fn contains(&self, id: ProcessId) -> bool {
        self.selected.contains(&id)
    }

    /// Selected identifiers in ascending order.
    pub fn ids(&self) -> BTreeSet<ProcessId> {
        self.selected.iter().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
