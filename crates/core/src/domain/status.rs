#![forbid(unsafe_code)]

use std::fmt;

/// Process status as reported by the OS.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RawStatus {
    Running,
    Sleeping,
    Waiting,
    Zombie,
    Stopped,
    Dead,
    Idle,
    /// Any status without a dedicated variant, in the backend's own words.
    Other(String),
}

impl RawStatus {
    /// Map a Linux `/proc/<pid>/stat` state letter. States without a
    /// dedicated variant use psutil's names; unknown letters pass through.
    pub fn from_linux_state(state: char) -> Self {
        match state {
            'R' => Self::Running,
            'S' => Self::Sleeping,
            'D' => Self::Other("disk-sleep".into()),
            'Z' => Self::Zombie,
            'T' => Self::Stopped,
            't' => Self::Other("tracing-stop".into()),
            'X' | 'x' => Self::Dead,
            'I' => Self::Idle,
            'K' => Self::Other("wake-kill".into()),
            'W' => Self::Other("waking".into()),
            'P' => Self::Other("parked".into()),
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Running => "running",
            Self::Sleeping => "sleeping",
            Self::Waiting => "waiting",
            Self::Zombie => "zombie",
            Self::Stopped => "stopped",
            Self::Dead => "dead",
            Self::Idle => "idle",
            Self::Other(status) => status,
        }
    }
}

impl fmt::Display for RawStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Observed state of a process relative to the monitoring history.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LifecycleLabel {
    /// First cycle in which the identifier was observed.
    New,
    Running,
    Waiting,
    Terminated,
    Idle,
    /// Raw status passed through verbatim.
    Unknown(String),
}

impl LifecycleLabel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::New => "new",
            Self::Running => "running",
            Self::Waiting => "waiting",
            Self::Terminated => "terminated",
            Self::Idle => "idle",
            Self::Unknown(status) => status,
        }
    }
}

impl fmt::Display for LifecycleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
