#![forbid(unsafe_code)]

mod cpu;
mod procfs_source;
mod source;
mod sysinfo_source;

pub use cpu::CpuTracker;
pub use procfs_source::ProcfsSource;
pub use source::ProcessSource;
pub use sysinfo_source::SysinfoSource;

use config::{Sampler, SourceKind};

/// Build the source selected by `sampler.source`.
pub fn source_for(sampler: &Sampler) -> Box<dyn ProcessSource> {
    match sampler.source {
        SourceKind::Procfs => Box::new(ProcfsSource::new(sampler.exclude_self)),
        SourceKind::Sysinfo => Box::new(SysinfoSource::new(sampler.exclude_self)),
    }
}
