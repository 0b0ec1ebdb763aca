#![forbid(unsafe_code)]

use crate::domain::ProcessId;
use std::collections::HashSet;

/// Every identifier observed during the session. Never pruned.
#[derive(Debug, Default)]
pub struct SeenSet {
    ids: HashSet<ProcessId>,
}

impl SeenSet {
    /// Mark `id` as seen and report whether it already was.
    pub fn observe(&mut self, id: ProcessId) -> bool {
        !self.ids.insert(id)
    }

    pub fn contains(&self, id: ProcessId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
