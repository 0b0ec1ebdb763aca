#![forbid(unsafe_code)]

use crate::domain::ProcessId;
use std::collections::{HashMap, HashSet};
use std::time::Instant;

#[derive(Debug, Clone, Copy)]
struct CpuMark {
    /// utime + stime
    busy_ticks: u64,
    at: Instant,
}

/// Per-process CPU usage from successive busy-tick readings.
///
/// Percentages are relative to one CPU, so a multi-threaded process can
/// exceed 100.
#[derive(Debug)]
pub struct CpuTracker {
    ticks_per_second: u64,
    marks: HashMap<ProcessId, CpuMark>,
}

impl CpuTracker {
    pub fn new(ticks_per_second: u64) -> Self {
        Self {
            ticks_per_second: ticks_per_second.max(1),
            marks: HashMap::new(),
        }
    }

    /// Record a reading and return the usage since the previous one.
    pub fn sample(&mut self, id: ProcessId, busy_ticks: u64, at: Instant) -> f32 {
        let mark = CpuMark { busy_ticks, at };
        let Some(prev) = self.marks.insert(id, mark) else {
            return 0.0;
        };
        let elapsed = at.saturating_duration_since(prev.at).as_secs_f64();
        if elapsed <= 0.0 {
            return 0.0;
        }
        // a smaller reading means the pid now belongs to another process
        let ticks = busy_ticks.saturating_sub(prev.busy_ticks);
        let busy_secs = ticks as f64 / self.ticks_per_second as f64;
        (busy_secs / elapsed * 100.0) as f32
    }

    /// Forget every pid not in `live`.
    pub fn retain(&mut self, live: &HashSet<ProcessId>) {
        self.marks.retain(|id, _| live.contains(id));
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}
