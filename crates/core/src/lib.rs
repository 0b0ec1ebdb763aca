#![forbid(unsafe_code)]

pub mod classifier;
pub mod clock;
pub mod control;
pub mod dispatcher;
pub mod domain;
pub mod engine;
mod error;
pub mod monitor;
pub mod observation;
pub mod stores;

pub use dispatcher::{Command, Dispatcher, Notice, Presenter};
pub use engine::{ReconciliationEngine, Services, TerminateReport};
pub use error::{ReadError, TerminateError};
pub use monitor::{ControlEvent, Monitor};
