#![forbid(unsafe_code)]

use crate::source_kind::SourceKind;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::time::Duration;

/// Shortest accepted tick period.
pub const MIN_CYCLE: Duration = Duration::from_secs(1);

/// Longest accepted gap between the two passes of a CPU snapshot.
pub const MAX_CPU_WINDOW: Duration = Duration::from_secs(10);

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Sampler {
    /// Tick period in seconds.
    #[serde_as(as = "serde_with::DurationSeconds")]
    pub cycle: Duration,

    /// Gap between the priming and the measuring pass of a CPU snapshot, in
    /// milliseconds.
    #[serde_as(as = "serde_with::DurationMilliSeconds")]
    pub cpu_window: Duration,

    pub source: SourceKind,

    /// Hide the monitor's own process.
    pub exclude_self: bool,
}

impl Default for Sampler {
    fn default() -> Self {
        Self {
            cycle: Duration::from_secs(3),
            cpu_window: Duration::from_millis(500),
            source: SourceKind::default(),
            exclude_self: true,
        }
    }
}

impl Sampler {
    pub fn sanitized(self) -> Self {
        Self {
            cycle: self.cycle.max(MIN_CYCLE),
            cpu_window: self.cpu_window.min(MAX_CPU_WINDOW),
            ..self
        }
    }
}
