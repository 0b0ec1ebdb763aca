#![forbid(unsafe_code)]

use crate::domain::{LifecycleLabel, RawStatus};

/// Derive the lifecycle label of a process.
///
/// A process observed for the first time is always [`LifecycleLabel::New`],
/// whatever the OS reports. Afterwards the raw status decides. Recording the
/// identifier as seen is up to the caller.
///
/// ```
/// # use taskmon_core::classifier::classify;
/// # use taskmon_core::domain::{LifecycleLabel, RawStatus};
/// assert_eq!(classify(&RawStatus::Running, false), LifecycleLabel::New);
/// assert_eq!(classify(&RawStatus::Sleeping, true), LifecycleLabel::Waiting);
/// ```
pub fn classify(raw_status: &RawStatus, seen_before: bool) -> LifecycleLabel {
    if !seen_before {
        return LifecycleLabel::New;
    }
    match raw_status {
        RawStatus::Running => LifecycleLabel::Running,
        RawStatus::Sleeping | RawStatus::Waiting => LifecycleLabel::Waiting,
        RawStatus::Zombie | RawStatus::Stopped | RawStatus::Dead => LifecycleLabel::Terminated,
        RawStatus::Idle => LifecycleLabel::Idle,
        RawStatus::Other(status) => LifecycleLabel::Unknown(status.clone()),
    }
}
