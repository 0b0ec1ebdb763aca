#![forbid(unsafe_code)]

use crate::domain::{LifecycleLabel, ProcessId, RawStatus};

/// Attributes read for one process during a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessSample {
    pub id: ProcessId,
    pub name: String,
    pub raw_status: RawStatus,
    /// Usage since the previous sample of this pid; `0.0` on first sight.
    pub cpu_percent: f32,
}

/// One process as seen by a single snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotEntry {
    Readable(ProcessSample),
    /// The process exists but its attributes could not be read.
    Unreadable(ProcessId),
}

impl SnapshotEntry {
    pub fn id(&self) -> ProcessId {
        match self {
            Self::Readable(sample) => sample.id,
            Self::Unreadable(id) => *id,
        }
    }

    pub fn is_accessible(&self) -> bool {
        matches!(self, Self::Readable(_))
    }
}

/// Row handed to the display for one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
    pub id: ProcessId,
    pub name: String,
    pub label: LifecycleLabel,
    pub selected: bool,
}

/// Point handed to the chart renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuSample {
    pub name: String,
    pub id: ProcessId,
    pub cpu_percent: f32,
}

impl CpuSample {
    /// Axis label, e.g. `bash (PID 42)`.
    pub fn label(&self) -> String {
        format!("{} (PID {})", self.name, self.id)
    }
}

impl From<ProcessSample> for CpuSample {
    fn from(sample: ProcessSample) -> Self {
        Self {
            name: sample.name,
            id: sample.id,
            cpu_percent: sample.cpu_percent,
        }
    }
}
