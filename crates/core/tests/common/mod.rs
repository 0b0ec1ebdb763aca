#![allow(dead_code)]

use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use taskmon_core::control::Terminator;
use taskmon_core::domain::{
    CpuSample, DisplayRecord, LifecycleLabel, ProcessId, ProcessSample, RawStatus, SnapshotEntry,
};
use taskmon_core::observation::ProcessSource;
use taskmon_core::{Notice, Presenter, ReconciliationEngine, Services, TerminateError};

pub fn pid(raw: u32) -> ProcessId {
    ProcessId::new(raw)
}

pub fn entry(id: u32, name: &str, raw_status: RawStatus) -> SnapshotEntry {
    SnapshotEntry::Readable(ProcessSample {
        id: pid(id),
        name: name.into(),
        raw_status,
        cpu_percent: 0.0,
    })
}

pub fn busy(id: u32, name: &str, cpu_percent: f32) -> SnapshotEntry {
    SnapshotEntry::Readable(ProcessSample {
        id: pid(id),
        name: name.into(),
        raw_status: RawStatus::Running,
        cpu_percent,
    })
}

pub fn record(id: u32, name: &str, label: LifecycleLabel, selected: bool) -> DisplayRecord {
    DisplayRecord {
        id: pid(id),
        name: name.into(),
        label,
        selected,
    }
}

/// Process table whose contents the test controls.
#[derive(Clone, Default)]
pub struct ProcessTable {
    entries: Arc<Mutex<Vec<SnapshotEntry>>>,
    listings: Arc<AtomicUsize>,
}

impl ProcessTable {
    pub fn with(entries: Vec<SnapshotEntry>) -> Self {
        let table = Self::default();
        table.set(entries);
        table
    }

    pub fn set(&self, entries: Vec<SnapshotEntry>) {
        *self.entries.lock() = entries;
    }

    pub fn listings(&self) -> usize {
        self.listings.load(Ordering::SeqCst)
    }
}

impl ProcessSource for ProcessTable {
    fn list_processes(&self) -> Vec<SnapshotEntry> {
        self.listings.fetch_add(1, Ordering::SeqCst);
        self.entries.lock().clone()
    }
}

/// Terminator that succeeds for `alive` pids only.
#[derive(Clone, Default)]
pub struct FakeTerminator {
    alive: Arc<Mutex<HashSet<ProcessId>>>,
    protected: Arc<Mutex<HashSet<ProcessId>>>,
    signalled: Arc<Mutex<Vec<ProcessId>>>,
}

impl FakeTerminator {
    pub fn alive(ids: &[u32]) -> Self {
        let terminator = Self::default();
        terminator.alive.lock().extend(ids.iter().copied().map(pid));
        terminator
    }

    pub fn protect(&self, id: u32) {
        self.protected.lock().insert(pid(id));
    }

    pub fn signalled(&self) -> Vec<ProcessId> {
        self.signalled.lock().clone()
    }
}

impl Terminator for FakeTerminator {
    fn terminate(&self, id: ProcessId) -> Result<(), TerminateError> {
        if !self.alive.lock().contains(&id) {
            return Err(TerminateError::NotFound);
        }
        if self.protected.lock().contains(&id) {
            return Err(TerminateError::AccessDenied);
        }
        self.signalled.lock().push(id);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Presented {
    Records(Vec<DisplayRecord>),
    Notice(Notice),
    Chart(Vec<CpuSample>),
}

/// Presenter that keeps everything it is shown.
#[derive(Clone, Default)]
pub struct RecordingPresenter {
    shown: Arc<Mutex<Vec<Presented>>>,
}

impl RecordingPresenter {
    pub fn shown(&self) -> Vec<Presented> {
        self.shown.lock().clone()
    }

    pub fn publications(&self) -> Vec<Vec<DisplayRecord>> {
        self.shown
            .lock()
            .iter()
            .filter_map(|item| match item {
                Presented::Records(records) => Some(records.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.shown
            .lock()
            .iter()
            .filter_map(|item| match item {
                Presented::Notice(notice) => Some(notice.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Presenter for RecordingPresenter {
    fn publish(&mut self, records: &[DisplayRecord]) {
        self.shown.lock().push(Presented::Records(records.to_vec()));
    }

    fn notify(&mut self, notice: Notice) {
        self.shown.lock().push(Presented::Notice(notice));
    }

    fn chart(&mut self, samples: &[CpuSample]) {
        self.shown.lock().push(Presented::Chart(samples.to_vec()));
    }
}

pub fn engine(table: &ProcessTable, terminator: &FakeTerminator) -> ReconciliationEngine {
    ReconciliationEngine::new(Services {
        source: Box::new(table.clone()),
        terminator: Box::new(terminator.clone()),
    })
}
