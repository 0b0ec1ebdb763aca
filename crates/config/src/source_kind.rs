#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Backend used to enumerate processes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Read `/proc` directly. Distinguishes vanished from unreadable pids.
    #[default]
    Procfs,
    /// Portable backend; unreadable processes are simply not listed.
    Sysinfo,
}
