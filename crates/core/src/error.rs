#![forbid(unsafe_code)]

/// Why a single process could not be read during a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// The process exited between enumeration and the attribute read.
    #[error("process vanished")]
    Vanished,

    #[error("access denied")]
    AccessDenied,

    #[error("procfs error: {0}")]
    Procfs(procfs::ProcError),
}

impl From<procfs::ProcError> for ReadError {
    fn from(err: procfs::ProcError) -> Self {
        match err {
            procfs::ProcError::NotFound(_) | procfs::ProcError::Incomplete(_) => Self::Vanished,
            procfs::ProcError::PermissionDenied(_) => Self::AccessDenied,
            other => Self::Procfs(other),
        }
    }
}

/// Why a terminate request for one process failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TerminateError {
    #[error("no such process")]
    NotFound,

    #[error("access denied")]
    AccessDenied,
}
