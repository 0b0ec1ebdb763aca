#![forbid(unsafe_code)]

use crate::domain::{ProcessId, ProcessSample, RawStatus, SnapshotEntry};
use crate::error::ReadError;
use crate::observation::{CpuTracker, ProcessSource};
use parking_lot::Mutex;
use procfs::process::{Process, all_processes};
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Reads `/proc/<pid>/stat` for every process.
#[derive(Debug)]
pub struct ProcfsSource {
    exclude: Option<ProcessId>,
    cpu: Mutex<CpuTracker>,
}

impl ProcfsSource {
    pub fn new(exclude_self: bool) -> Self {
        Self {
            exclude: exclude_self.then(|| ProcessId::new(std::process::id())),
            cpu: Mutex::new(CpuTracker::new(procfs::ticks_per_second())),
        }
    }

    fn read(
        process: &Process,
        cpu: &mut CpuTracker,
        now: Instant,
    ) -> Result<ProcessSample, ReadError> {
        let stat = process.stat()?;
        let raw_status = RawStatus::from_linux_state(stat.state);
        let id = ProcessId::new(stat.pid as u32);
        let cpu_percent = cpu.sample(id, stat.utime + stat.stime, now);

        Ok(ProcessSample {
            id,
            name: stat.comm,
            raw_status,
            cpu_percent,
        })
    }
}

impl ProcessSource for ProcfsSource {
    fn list_processes(&self) -> Vec<SnapshotEntry> {
        let processes = match all_processes() {
            Ok(processes) => processes,
            Err(err) => {
                warn!(%err, "failed to enumerate /proc");
                return Vec::new();
            }
        };

        let now = Instant::now();
        let mut cpu = self.cpu.lock();
        let mut entries = Vec::new();

        for process in processes {
            let process = match process {
                Ok(process) => process,
                Err(err) => {
                    trace!(%err, "skipping /proc entry");
                    continue;
                }
            };
            let id = ProcessId::new(process.pid() as u32);
            if self.exclude == Some(id) {
                continue;
            }

            match Self::read(&process, &mut cpu, now) {
                Ok(sample) => entries.push(SnapshotEntry::Readable(sample)),
                Err(ReadError::Vanished) => trace!(%id, "process vanished mid-scan"),
                Err(ReadError::AccessDenied) => {
                    trace!(%id, "process is not readable");
                    entries.push(SnapshotEntry::Unreadable(id));
                }
                Err(err) => debug!(%id, %err, "failed to read process"),
            }
        }

        let live: HashSet<_> = entries.iter().map(SnapshotEntry::id).collect();
        cpu.retain(&live);
        entries
    }
}
