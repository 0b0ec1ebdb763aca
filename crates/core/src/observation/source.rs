#![forbid(unsafe_code)]

use crate::domain::SnapshotEntry;

pub trait ProcessSource: Send + Sync {
    /// Enumerate the live processes.
    ///
    /// Processes that exit mid-query are left out, unreadable ones are listed
    /// as [`SnapshotEntry::Unreadable`]. Neither is an error: a failed
    /// enumeration yields an empty list.
    fn list_processes(&self) -> Vec<SnapshotEntry>;
}
