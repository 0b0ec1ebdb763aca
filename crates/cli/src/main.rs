use anyhow::Context;
use clap::Parser;
use config::Config;
use flume::bounded;
use std::fs::File;
use std::sync::Mutex;
use taskmon::{
    cli::{Cli, Mode},
    error::Error,
    input::read_commands,
    presenter::TerminalPresenter,
    signals::{SignalEvent, wait_for_signal},
};
use taskmon_core::domain::ProcessId;
use taskmon_core::{Command, ControlEvent, Dispatcher, Monitor};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use tracing_log::AsTrace;
use tracing_subscriber::{EnvFilter, fmt::writer::BoxMakeWriter};

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    debug!(config = ?cli);

    let config = load_config(&cli)?;
    if cli.dump_config {
        let toml = config.to_toml()?;
        std::io::Write::write_all(&mut std::io::stdout(), toml.as_bytes())?;
        return Ok(());
    }

    match cli.mode.clone().unwrap_or(Mode::Watch) {
        Mode::Watch => watch(cli, config).await,
        Mode::List => {
            let mut dispatcher = Dispatcher::system(&config.sampler, presenter());
            // first sight is always `new`; prime so labels reflect status
            dispatcher.engine_mut().tick();
            dispatcher.refresh();
            Ok(())
        }
        Mode::Kill { pids } => {
            let mut dispatcher = Dispatcher::system(&config.sampler, presenter());
            let report = dispatcher.terminate(pids.into_iter().map(ProcessId::new));
            let failed = report.values().filter(|result| result.is_err()).count();
            if failed > 0 {
                return Err(Error::TerminateFailed {
                    failed,
                    total: report.len(),
                }
                .into());
            }
            Ok(())
        }
        Mode::Cpu => {
            let mut dispatcher = Dispatcher::system(&config.sampler, presenter());
            dispatcher.snapshot_cpu_usage().await;
            Ok(())
        }
    }
}

async fn watch(cli: Cli, config: Config) -> anyhow::Result<()> {
    let cancel = CancellationToken::new();
    let (control_tx, control_rx) = mpsc::unbounded_channel();
    let (events_tx, events_rx) = bounded(8);

    let mut monitor = Monitor::system(config.sampler, presenter());
    let monitor_task = tokio::spawn({
        let cancel = cancel.clone();
        async move { monitor.run_until(cancel, control_rx).await }
    });

    let signal_task = tokio::spawn(async move { wait_for_signal(&events_tx).await });

    std::thread::Builder::new()
        .name("stdin".into())
        .spawn({
            let control_tx = control_tx.clone();
            let cancel = cancel.clone();
            move || {
                if let Err(err) = read_commands(std::io::stdin().lock(), &control_tx, &cancel) {
                    error!(error = ?err, "Stopped reading commands");
                }
            }
        })
        .context("failed to spawn stdin reader")?;

    info!("monitoring started");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            res = events_rx.recv_async() => {
                // only fails once the signal task has ended
                let Ok(event) = res else { break };
                debug!(?event, "Received signal event");
                match event {
                    SignalEvent::SigUSR1 => send(&control_tx, ControlEvent::Command(Command::Refresh))?,
                    SignalEvent::SigUSR2 => send(&control_tx, ControlEvent::Command(Command::SnapshotCpu))?,
                    SignalEvent::SigHUP => match load_config(&cli) {
                        Ok(config) => send(&control_tx, ControlEvent::Reload(config))?,
                        Err(err) => error!(error = ?err, "Failed to reload config"),
                    },
                    SignalEvent::Shutdown => cancel.cancel(),
                }
            }
        }
    }

    cancel.cancel();
    monitor_task.await?;
    if signal_task.is_finished() {
        signal_task.await??;
    } else {
        signal_task.abort();
    }
    info!("monitoring stopped");
    Ok(())
}

fn send(control_tx: &UnboundedSender<ControlEvent>, event: ControlEvent) -> Result<(), Error> {
    control_tx.send(event).map_err(|_| Error::MonitorGone)
}

fn load_config(cli: &Cli) -> Result<Config, config::Error> {
    match &cli.conffile {
        Some(path) => Config::load(path),
        None => Config::from_env(),
    }
}

fn presenter() -> Box<TerminalPresenter<std::io::Stdout>> {
    Box::new(TerminalPresenter::stdout())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let writer = match &cli.logfile {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {path:?}"))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };
    let filter = EnvFilter::builder()
        .with_default_directive(cli.verbosity.log_level_filter().as_trace().into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(cli.logfile.is_none())
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .init();
    Ok(())
}
