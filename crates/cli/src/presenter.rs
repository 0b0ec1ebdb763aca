use std::io::{self, Write};
use taskmon_core::domain::{CpuSample, DisplayRecord};
use taskmon_core::{Notice, Presenter};
use tracing::warn;

/// Widest bar drawn by [`TerminalPresenter::chart`], reached at 100%.
const BAR_WIDTH: f32 = 50.0;

/// Plain-text tables on a terminal.
pub struct TerminalPresenter<W> {
    out: W,
}

impl TerminalPresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_table(&mut self, records: &[DisplayRecord]) -> io::Result<()> {
        writeln!(self.out, "SEL {:>8}  {:<12} NAME", "PID", "STATE")?;
        for record in records {
            let check = if record.selected { "[x]" } else { "[ ]" };
            writeln!(
                self.out,
                "{check} {:>8}  {:<12} {}",
                record.id, record.label, record.name
            )?;
        }
        writeln!(self.out, "{} processes", records.len())?;
        self.out.flush()
    }

    fn write_chart(&mut self, samples: &[CpuSample]) -> io::Result<()> {
        let width = samples
            .iter()
            .map(|sample| sample.label().len())
            .max()
            .unwrap_or(0);
        for sample in samples {
            let bar = (sample.cpu_percent.clamp(0.0, 100.0) / 100.0 * BAR_WIDTH).round() as usize;
            writeln!(
                self.out,
                "{:<width$} {:>6.1}% {}",
                sample.label(),
                sample.cpu_percent,
                "#".repeat(bar)
            )?;
        }
        self.out.flush()
    }

    fn report(&mut self, result: io::Result<()>) {
        if let Err(err) = result {
            warn!(%err, "failed to write to terminal");
        }
    }
}

impl<W: Write + Send> Presenter for TerminalPresenter<W> {
    fn publish(&mut self, records: &[DisplayRecord]) {
        let result = self.write_table(records);
        self.report(result);
    }

    fn notify(&mut self, notice: Notice) {
        let prefix = match notice {
            Notice::Selection { .. } | Notice::Terminated(_) => "ok",
            Notice::TerminateFailed { .. } => "error",
            Notice::NotListed(_) | Notice::NoSelection | Notice::NoProcessData => "warning",
        };
        let result = writeln!(self.out, "{prefix}: {notice}").and_then(|()| self.out.flush());
        self.report(result);
    }

    fn chart(&mut self, samples: &[CpuSample]) {
        let result = self.write_chart(samples);
        self.report(result);
    }
}
