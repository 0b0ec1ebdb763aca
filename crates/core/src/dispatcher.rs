#![forbid(unsafe_code)]

use crate::clock::{Clock, TokioClock};
use crate::domain::{CpuSample, DisplayRecord, ProcessId, SnapshotEntry};
use crate::engine::{ReconciliationEngine, Services, TerminateReport};
use crate::error::TerminateError;
use config::Sampler;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Operator commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Toggle(ProcessId),
    TerminateSelected,
    Refresh,
    SnapshotCpu,
}

/// Message for the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Selection of a listed process flipped.
    Selection {
        id: ProcessId,
        selected: bool,
    },
    /// Toggle of a process missing from the latest tick.
    NotListed(ProcessId),
    Terminated(ProcessId),
    TerminateFailed {
        id: ProcessId,
        error: TerminateError,
    },
    NoSelection,
    NoProcessData,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selection { id, selected: true } => write!(f, "process {id} selected"),
            Self::Selection { id, selected: false } => write!(f, "process {id} deselected"),
            Self::NotListed(id) => write!(f, "process {id} is not listed"),
            Self::Terminated(id) => write!(f, "process {id} terminated"),
            Self::TerminateFailed { id, error } => {
                write!(f, "could not terminate process {id}: {error}")
            }
            Self::NoSelection => f.write_str("select at least one process to terminate"),
            Self::NoProcessData => f.write_str("no process data available"),
        }
    }
}

/// Display side of the monitor.
pub trait Presenter: Send {
    /// Show the records of one tick.
    fn publish(&mut self, records: &[DisplayRecord]);
    fn notify(&mut self, notice: Notice);
    /// Render a CPU usage snapshot.
    fn chart(&mut self, samples: &[CpuSample]);
}

/// Relays commands to the engine and results to the presenter.
pub struct Dispatcher {
    engine: ReconciliationEngine,
    presenter: Box<dyn Presenter>,
    clock: Arc<dyn Clock>,
    cpu_window: Duration,
}

impl Dispatcher {
    pub fn new(
        engine: ReconciliationEngine,
        presenter: Box<dyn Presenter>,
        clock: Arc<dyn Clock>,
        cpu_window: Duration,
    ) -> Self {
        Self {
            engine,
            presenter,
            clock,
            cpu_window,
        }
    }

    /// Dispatcher backed by the OS and tokio's clock.
    pub fn system(sampler: &Sampler, presenter: Box<dyn Presenter>) -> Self {
        let engine = ReconciliationEngine::new(Services::system(sampler));
        Self::new(engine, presenter, Arc::new(TokioClock), sampler.cpu_window)
    }

    pub async fn dispatch(&mut self, command: Command) {
        debug!(?command, "dispatching");
        match command {
            Command::Toggle(id) => {
                self.toggle(id);
            }
            Command::TerminateSelected => {
                self.terminate_selected();
            }
            Command::Refresh => self.refresh(),
            Command::SnapshotCpu => {
                self.snapshot_cpu_usage().await;
            }
        }
    }

    /// Run one tick and publish its records.
    pub fn refresh(&mut self) {
        let records = self.engine.tick();
        self.presenter.publish(&records);
    }

    /// Flip the selection of `id` and report the outcome.
    pub fn toggle(&mut self, id: ProcessId) -> Option<bool> {
        let toggled = self.engine.toggle_selection(id);
        let notice = match toggled {
            Some(selected) => Notice::Selection { id, selected },
            None => Notice::NotListed(id),
        };
        self.presenter.notify(notice);
        toggled
    }

    /// Terminate every selected process, one notice per identifier.
    pub fn terminate_selected(&mut self) -> TerminateReport {
        let selected = self.engine.selected();
        if selected.is_empty() {
            self.presenter.notify(Notice::NoSelection);
            return TerminateReport::new();
        }
        self.terminate(selected)
    }

    /// Terminate an explicit set of processes, one notice per identifier.
    pub fn terminate(&mut self, ids: impl IntoIterator<Item = ProcessId>) -> TerminateReport {
        let report = self.engine.terminate(ids);
        for (id, result) in &report {
            let notice = match result {
                Ok(()) => Notice::Terminated(*id),
                Err(error) => Notice::TerminateFailed { id: *id, error: *error },
            };
            self.presenter.notify(notice);
        }
        report
    }

    /// Sample CPU usage of every readable process and hand it to the chart.
    ///
    /// Runs two passes `cpu_window` apart so that each process has a baseline.
    /// Does not touch the engine's tracking state.
    pub async fn snapshot_cpu_usage(&mut self) -> Vec<CpuSample> {
        let source = self.engine.source();
        source.list_processes();
        self.clock.sleep(self.cpu_window).await;

        let mut samples: Vec<CpuSample> = source
            .list_processes()
            .into_iter()
            .filter_map(|entry| match entry {
                SnapshotEntry::Readable(sample) => Some(CpuSample::from(sample)),
                SnapshotEntry::Unreadable(_) => None,
            })
            .collect();
        samples.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        if samples.is_empty() {
            warn!("cpu snapshot found no readable process");
            self.presenter.notify(Notice::NoProcessData);
        } else {
            self.presenter.chart(&samples);
        }
        samples
    }

    pub fn set_cpu_window(&mut self, cpu_window: Duration) {
        self.cpu_window = cpu_window;
    }

    pub fn engine(&self) -> &ReconciliationEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ReconciliationEngine {
        &mut self.engine
    }
}
