use crate::signals::SignalEvent;
use flume::SendError;
use std::io;
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to install signal handler: {0}")]
    SignalHandler(#[source] io::Error),

    #[error("Failed to send signal event: {0}")]
    SendSignal(#[from] SendError<SignalEvent>),

    #[error("Failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("Monitor is no longer running")]
    MonitorGone,

    #[error("Could not terminate {failed} of {total} processes")]
    TerminateFailed { failed: usize, total: usize },
}

/// Unusable line on stdin.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("empty line")]
    Empty,

    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("`toggle` needs a pid")]
    MissingPid,

    #[error("`{0}` is not a valid pid: {1}")]
    BadPid(String, #[source] ParseIntError),
}
