#![forbid(unsafe_code)]

mod terminator;

pub use terminator::{SignalTerminator, Terminator};
