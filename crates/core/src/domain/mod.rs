#![forbid(unsafe_code)]

mod ids;
mod process;
mod status;

pub use ids::ProcessId;
pub use process::{CpuSample, DisplayRecord, ProcessSample, SnapshotEntry};
pub use status::{LifecycleLabel, RawStatus};
