#![forbid(unsafe_code)]

use crate::clock::{Clock, TokioClock};
use crate::dispatcher::{Command, Dispatcher, Presenter};
use config::{Config, Sampler};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub enum ControlEvent {
    Command(Command),
    Reload(Config),
}

/// Drives periodic ticks and serializes them with operator commands.
pub struct Monitor {
    sampler: Sampler,
    dispatcher: Dispatcher,
    clock: Arc<dyn Clock>,
}

impl Monitor {
    pub fn new(sampler: Sampler, dispatcher: Dispatcher, clock: Arc<dyn Clock>) -> Self {
        Self {
            sampler,
            dispatcher,
            clock,
        }
    }

    /// Monitor backed by the OS and tokio's clock.
    pub fn system(sampler: Sampler, presenter: Box<dyn Presenter>) -> Self {
        let dispatcher = Dispatcher::system(&sampler, presenter);
        Self::new(sampler, dispatcher, Arc::new(TokioClock))
    }

    /// Tick every `cycle` until `cancel` fires, handling control events in
    /// between. The first tick runs immediately. A tick that overruns its
    /// period is followed directly by the next one. Cancellation also cuts
    /// short a command in progress, such as the wait of a CPU snapshot.
    pub async fn run_until(
        &mut self,
        cancel: CancellationToken,
        mut control_rx: mpsc::UnboundedReceiver<ControlEvent>,
    ) {
        let clock = Arc::clone(&self.clock);
        let mut next_tick = clock.now();
        let mut control_open = true;

        loop {
            let wait = next_tick.saturating_duration_since(clock.now());
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("shutdown requested");
                    break;
                }
                event = control_rx.recv(), if control_open => match event {
                    Some(event) => tokio::select! {
                        biased;
                        _ = cancel.cancelled() => {
                            info!("shutdown requested while handling a control event");
                            break;
                        }
                        _ = self.handle_control(event) => {}
                    },
                    None => {
                        debug!("control channel closed");
                        control_open = false;
                    }
                },
                _ = clock.sleep(wait) => {
                    let started = clock.now();
                    self.dispatcher.refresh();
                    next_tick = next_deadline(started, clock.now(), self.sampler.cycle);
                }
            }
        }
    }

    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }

    async fn handle_control(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::Command(command) => self.dispatcher.dispatch(command).await,
            ControlEvent::Reload(config) => {
                self.apply_reload(config.sampler);
                info!("config reloaded");
            }
        }
    }

    fn apply_reload(&mut self, mut sampler: Sampler) {
        if sampler.source != self.sampler.source || sampler.exclude_self != self.sampler.exclude_self
        {
            warn!(
                current = ?self.sampler.source,
                requested = ?sampler.source,
                "ignoring source change during reload"
            );
            sampler.source = self.sampler.source;
            sampler.exclude_self = self.sampler.exclude_self;
        }

        self.dispatcher.set_cpu_window(sampler.cpu_window);
        self.sampler = sampler;
    }
}

fn next_deadline(started: Instant, finished: Instant, cycle: Duration) -> Instant {
    (started + cycle).max(finished)
}
