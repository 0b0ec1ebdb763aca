#![forbid(unsafe_code)]

use crate::classifier::classify;
use crate::control::{SignalTerminator, Terminator};
use crate::domain::{DisplayRecord, ProcessId, SnapshotEntry};
use crate::error::TerminateError;
use crate::observation::{ProcessSource, source_for};
use crate::stores::EngineState;
use config::Sampler;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::{debug, info, trace, warn};

pub struct Services {
    pub source: Box<dyn ProcessSource>,
    pub terminator: Box<dyn Terminator>,
}

impl Services {
    /// OS-backed services: the configured source and `SIGTERM` delivery.
    pub fn system(sampler: &Sampler) -> Self {
        Self {
            source: source_for(sampler),
            terminator: Box::new(SignalTerminator),
        }
    }
}

pub type TerminateReport = BTreeMap<ProcessId, Result<(), TerminateError>>;

/// Merges each fresh snapshot with the seen/selected history.
pub struct ReconciliationEngine {
    services: Services,
    state: EngineState,
    tick_id: u64,
}

impl ReconciliationEngine {
    pub fn new(services: Services) -> Self {
        Self {
            services,
            state: EngineState::default(),
            tick_id: 0,
        }
    }

    /// Take a snapshot, label every readable process and reconcile the
    /// selection with it. Records are sorted by name, then identifier.
    pub fn tick(&mut self) -> Vec<DisplayRecord> {
        self.tick_id = self.tick_id.saturating_add(1);
        let span = tracing::debug_span!("tick", tick_id = self.tick_id);
        let _enter = span.enter();

        let snapshot = self.services.source.list_processes();
        let mut emitted = HashSet::with_capacity(snapshot.len());
        let mut records = Vec::with_capacity(snapshot.len());
        let mut unreadable = 0usize;

        for entry in snapshot {
            let sample = match entry {
                SnapshotEntry::Readable(sample) => sample,
                SnapshotEntry::Unreadable(id) => {
                    trace!(%id, "skipping unreadable process");
                    unreadable += 1;
                    continue;
                }
            };
            if !emitted.insert(sample.id) {
                trace!(id = %sample.id, "duplicate pid in snapshot");
                continue;
            }

            let seen_before = self.state.seen.observe(sample.id);
            let label = classify(&sample.raw_status, seen_before);
            records.push(DisplayRecord {
                selected: self.state.selection.contains(sample.id),
                id: sample.id,
                name: sample.name,
                label,
            });
        }

        self.state.selection.reconcile(emitted);
        records.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        debug!(
            records = records.len(),
            unreadable,
            seen = self.state.seen.len(),
            "tick complete"
        );
        records
    }

    /// Flip the selection of a live process. Returns the new membership, or
    /// `None` when `id` was not part of the latest tick.
    pub fn toggle_selection(&mut self, id: ProcessId) -> Option<bool> {
        let toggled = self.state.selection.toggle(id);
        match toggled {
            Some(selected) => debug!(%id, selected, "selection toggled"),
            None => trace!(%id, "ignoring toggle of a process that is not listed"),
        }
        toggled
    }

    /// Ask every process in `ids` to exit. Each identifier gets its own
    /// outcome; a failure never stops the rest of the batch.
    pub fn terminate(&self, ids: impl IntoIterator<Item = ProcessId>) -> TerminateReport {
        ids.into_iter()
            .map(|id| {
                let result = self.services.terminator.terminate(id);
                match &result {
                    Ok(()) => info!(%id, "terminate signal sent"),
                    Err(err) => warn!(%id, %err, "failed to terminate process"),
                }
                (id, result)
            })
            .collect()
    }

    /// Currently selected identifiers, ascending.
    pub fn selected(&self) -> BTreeSet<ProcessId> {
        self.state.selection.ids()
    }

    pub fn source(&self) -> &dyn ProcessSource {
        self.services.source.as_ref()
    }

    /// Read-only access to the tracking sets (useful for tests).
    pub fn state(&self) -> &EngineState {
        &self.state
    }
}
