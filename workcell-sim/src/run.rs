//! Protocol runs
//!
//! Builds the workcell from configuration, runs the protocol and writes the
//! report. A protocol error still produces the partial log and device status.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::{error, info};
use workcell_core::config::WorkcellConfig;
use workcell_core::traits::{Clock, Delay};
use workcell_core::{Protocol, ProtocolError, RunReport, Workcell};
use workcell_drivers::{InstantDelay, SystemClock, ThreadDelay};

use crate::config::{load_config, protocol_for};
use crate::report::{DeviceTable, Header, LogTable, Summary};

/// Exit code for a run stopped by a protocol error
pub const EXIT_PROTOCOL_FAILED: u8 = 2;

/// Arguments for `workcell-sim run`
#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Workcell TOML file (defaults to the embedded layout)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip real-time pacing
    #[arg(long)]
    pub instant: bool,

    /// Wait for Enter before starting
    #[arg(long)]
    pub interactive: bool,
}

/// A finished or stopped run
pub struct RunOutcome<D, C> {
    /// Workcell after the run
    pub cell: Workcell<D, C>,
    /// Report, or the error that stopped the run
    pub result: Result<RunReport, ProtocolError>,
}

impl<D, C> RunOutcome<D, C> {
    /// Process exit code for this outcome
    pub fn exit_code(&self) -> u8 {
        match self.result {
            Ok(_) => 0,
            Err(_) => EXIT_PROTOCOL_FAILED,
        }
    }
}

/// Run a protocol on a workcell built from `config`, writing the report to `out`
pub fn execute<D, C, W>(
    config: &WorkcellConfig,
    protocol: &Protocol,
    delay: D,
    clock: C,
    out: &mut W,
) -> Result<RunOutcome<D, C>>
where
    D: Delay,
    C: Clock,
    W: Write,
{
    let mut cell = Workcell::from_config(config, delay, clock).context("invalid workcell")?;

    let header = Header {
        workcell: cell.name(),
        protocol,
        started: cell.clock().now(),
    };
    writeln!(out, "{header}\n")?;
    out.flush()?;

    let result = cell.run_protocol(protocol);

    writeln!(out, "\n{}\n", LogTable(cell.log()))?;
    writeln!(out, "{}\n", DeviceTable::new(cell.devices()))?;
    match &result {
        Ok(report) => {
            info!(protocol = %report.protocol, "run finished");
            writeln!(out, "{}", Summary(report))?;
        }
        Err(e) => {
            error!(error = %e, "run stopped");
            writeln!(out, "PROTOCOL FAILED: {e}")?;
        }
    }

    Ok(RunOutcome { cell, result })
}

/// Block until the user presses Enter
fn wait_for_enter() -> Result<()> {
    print!("Press Enter to start the protocol...");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(())
}

/// Entry point for `workcell-sim run`
pub fn run(args: &RunArgs) -> Result<u8> {
    let config = load_config(args.config.as_deref())?;
    let protocol = protocol_for(&config);

    if args.interactive {
        wait_for_enter()?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.instant {
        let outcome = execute(&config, &protocol, InstantDelay::new(), SystemClock, &mut out)?;
        let simulated = outcome.cell.delay().simulated();
        writeln!(out, "Simulated time: {:.1}s", simulated.as_secs_f64())?;
        Ok(outcome.exit_code())
    } else {
        let outcome = execute(&config, &protocol, ThreadDelay, SystemClock, &mut out)?;
        Ok(outcome.exit_code())
    }
}
