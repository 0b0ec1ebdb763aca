#![forbid(unsafe_code)]

use crate::domain::{ProcessId, ProcessSample, RawStatus, SnapshotEntry};
use crate::observation::ProcessSource;
use parking_lot::Mutex;
use sysinfo::{ProcessRefreshKind, ProcessStatus, ProcessesToUpdate, System};
use tracing::trace;

/// Portable source backed by `sysinfo`.
///
/// sysinfo keeps the previous CPU reading of every process itself and drops
/// processes it cannot read, so this source never yields
/// [`SnapshotEntry::Unreadable`].
pub struct SysinfoSource {
    exclude: Option<ProcessId>,
    system: Mutex<System>,
}

impl SysinfoSource {
    pub fn new(exclude_self: bool) -> Self {
        Self {
            exclude: exclude_self.then(|| ProcessId::new(std::process::id())),
            system: Mutex::new(System::new()),
        }
    }
}

impl ProcessSource for SysinfoSource {
    fn list_processes(&self) -> Vec<SnapshotEntry> {
        let mut system = self.system.lock();
        let refreshed = system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_cpu(),
        );
        trace!(refreshed, "refreshed processes");

        system
            .processes()
            .iter()
            .filter_map(|(pid, process)| {
                let id = ProcessId::new(pid.as_u32());
                (self.exclude != Some(id)).then(|| {
                    SnapshotEntry::Readable(ProcessSample {
                        id,
                        name: process.name().to_string_lossy().into_owned(),
                        raw_status: raw_status(process.status()),
                        cpu_percent: process.cpu_usage(),
                    })
                })
            })
            .collect()
    }
}

fn raw_status(status: ProcessStatus) -> RawStatus {
    match status {
        ProcessStatus::Run => RawStatus::Running,
        ProcessStatus::Sleep => RawStatus::Sleeping,
        ProcessStatus::LockBlocked => RawStatus::Waiting,
        ProcessStatus::Zombie => RawStatus::Zombie,
        ProcessStatus::Stop => RawStatus::Stopped,
        ProcessStatus::Dead => RawStatus::Dead,
        ProcessStatus::Idle => RawStatus::Idle,
        ProcessStatus::UninterruptibleDiskSleep => RawStatus::from_linux_state('D'),
        ProcessStatus::Tracing => RawStatus::from_linux_state('t'),
        ProcessStatus::Wakekill => RawStatus::from_linux_state('K'),
        ProcessStatus::Waking => RawStatus::from_linux_state('W'),
        ProcessStatus::Parked => RawStatus::from_linux_state('P'),
        ProcessStatus::Unknown(code) => match char::from_u32(code) {
            Some(state) => RawStatus::from_linux_state(state),
            None => RawStatus::Other(code.to_string()),
        },
        other => RawStatus::Other(other.to_string().to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_own_process_unless_excluded() {
        let me = ProcessId::new(std::process::id());

        let entries = SysinfoSource::new(false).list_processes();
        assert!(entries.iter().any(|entry| entry.id() == me));

        let entries = SysinfoSource::new(true).list_processes();
        assert!(entries.iter().all(|entry| entry.id() != me));
        assert!(entries.iter().all(SnapshotEntry::is_accessible));
    }

    #[test]
    fn maps_known_statuses() {
        assert_eq!(raw_status(ProcessStatus::Run), RawStatus::Running);
        assert_eq!(raw_status(ProcessStatus::Sleep), RawStatus::Sleeping);
        assert_eq!(raw_status(ProcessStatus::Zombie), RawStatus::Zombie);
    }

    #[test]
    fn kernel_states_match_the_procfs_names() {
        for (status, state) in [
            (ProcessStatus::UninterruptibleDiskSleep, 'D'),
            (ProcessStatus::Tracing, 't'),
            (ProcessStatus::Wakekill, 'K'),
            (ProcessStatus::Waking, 'W'),
            (ProcessStatus::Parked, 'P'),
        ] {
            assert_eq!(raw_status(status), RawStatus::from_linux_state(state));
        }
        assert_eq!(
            raw_status(ProcessStatus::UninterruptibleDiskSleep).as_str(),
            "disk-sleep"
        );
    }

    #[test]
    fn unknown_state_keeps_its_letter() {
        assert_eq!(
            raw_status(ProcessStatus::Unknown(u32::from('?'))),
            RawStatus::Other("?".into())
        );
    }
}
