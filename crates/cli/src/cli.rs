use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::path::{Path, PathBuf};

/// taskmon: a live process monitor
///
/// taskmon lists every process with a lifecycle label, lets you select and
/// terminate processes, and samples CPU usage across the whole table.
#[derive(Debug, Parser, Clone)]
#[command(about, long_about, version)]
pub struct Cli {
    /// Path to configuration file.
    ///
    /// Without it, defaults and `TASKMON_*` environment variables apply.
    #[arg(short, long, value_parser = validate_file)]
    pub conffile: Option<PathBuf>,

    /// Path to log file.
    ///
    /// Logs go to stderr when unset.
    #[arg(short, long)]
    pub logfile: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    pub dump_config: bool,

    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    #[command(subcommand)]
    pub mode: Option<Mode>,
}

#[derive(Debug, Subcommand, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Refresh periodically and read commands from stdin (default).
    ///
    /// Commands: `toggle <pid>`, `kill`, `refresh`, `cpu`, `quit`.
    /// SIGUSR1 refreshes, SIGUSR2 samples CPU usage, SIGHUP reloads the
    /// configuration file.
    Watch,

    /// Print the process table once.
    List,

    /// Terminate the given processes.
    Kill {
        #[arg(required = true)]
        pids: Vec<u32>,
    },

    /// Sample CPU usage of every process once.
    Cpu,
}

/// Check if the file exists.
#[inline(always)]
fn validate_file(file: &str) -> Result<PathBuf, String> {
    let path = Path::new(file);
    if path.exists() {
        Ok(path.to_owned())
    } else {
        Err(format!("File not found: {:?}", path))
    }
}
