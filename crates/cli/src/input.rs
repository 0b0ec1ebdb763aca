use crate::error::{Error, InputError};
use std::io::BufRead;
use std::str::FromStr;
use taskmon_core::domain::ProcessId;
use taskmon_core::{Command, ControlEvent};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// One line typed by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Quit,
}

impl FromStr for Input {
    type Err = InputError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(InputError::Empty);
        };
        let command = match verb.to_lowercase().as_str() {
            "toggle" | "t" => {
                let pid = words.next().ok_or(InputError::MissingPid)?;
                let id = pid
                    .parse::<ProcessId>()
                    .map_err(|err| InputError::BadPid(pid.to_owned(), err))?;
                Command::Toggle(id)
            }
            "kill" | "k" => Command::TerminateSelected,
            "refresh" | "r" => Command::Refresh,
            "cpu" | "c" => Command::SnapshotCpu,
            "quit" | "q" | "exit" => return Ok(Self::Quit),
            _ => return Err(InputError::UnknownCommand(verb.to_owned())),
        };
        Ok(Self::Command(command))
    }
}

/// Forward commands read from `reader` to the monitor until EOF, `quit`, or
/// the monitor going away. Blocks; run it on its own thread.
pub fn read_commands(
    reader: impl BufRead,
    control_tx: &UnboundedSender<ControlEvent>,
    cancel: &CancellationToken,
) -> Result<(), Error> {
    for line in reader.lines() {
        let line = line.map_err(Error::Stdin)?;
        match line.parse::<Input>() {
            Ok(Input::Command(command)) => control_tx
                .send(ControlEvent::Command(command))
                .map_err(|_| Error::MonitorGone)?,
            Ok(Input::Quit) => {
                cancel.cancel();
                return Ok(());
            }
            Err(InputError::Empty) => {}
            Err(err) => warn!(%err, "ignoring input"),
        }
    }
    debug!("stdin closed");
    Ok(())
}
