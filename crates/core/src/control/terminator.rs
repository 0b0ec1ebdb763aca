#![forbid(unsafe_code)]

use crate::domain::ProcessId;
use crate::error::TerminateError;
use nix::errno::Errno;
use nix::sys::signal::{Signal, kill};
use nix::unistd::Pid;
use tracing::warn;

pub trait Terminator: Send + Sync {
    /// Ask `id` to exit. Returns once the request is delivered, without
    /// waiting for the process to go away.
    fn terminate(&self, id: ProcessId) -> Result<(), TerminateError>;
}

/// Sends `SIGTERM`.
#[derive(Debug, Default)]
pub struct SignalTerminator;

impl Terminator for SignalTerminator {
    fn terminate(&self, id: ProcessId) -> Result<(), TerminateError> {
        // 0 and anything beyond i32::MAX would address a process group
        let raw = i32::try_from(id.as_u32())
            .ok()
            .filter(|pid| *pid > 0)
            .ok_or(TerminateError::NotFound)?;

        kill(Pid::from_raw(raw), Signal::SIGTERM).map_err(|errno| match errno {
            Errno::ESRCH => TerminateError::NotFound,
            Errno::EPERM => TerminateError::AccessDenied,
            other => {
                warn!(%id, %other, "unexpected kill failure");
                TerminateError::AccessDenied
            }
        })
    }
}
