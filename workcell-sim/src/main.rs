//! workcell-sim entry point
//!
//! Parses command-line arguments, sets up logging and dispatches to the
//! subcommand handlers.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use workcell_sim::config::load_config;
use workcell_sim::report::Layout;
use workcell_sim::run::{run, RunArgs};

/// Plate-handling workcell simulator
///
/// Runs a protocol on a simulated robot workcell and reports every plate
/// transfer. Without a subcommand, `run` is assumed.
#[derive(Parser, Debug)]
#[command(name = "workcell-sim", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the configured protocol
    Run(RunArgs),

    /// Print the configured devices and initial plates
    Layout(LayoutArgs),
}

#[derive(clap::Args, Debug)]
struct LayoutArgs {
    /// Workcell TOML file (defaults to the embedded layout)
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

fn layout(args: &LayoutArgs) -> Result<u8> {
    let config = load_config(args.config.as_deref())?;
    println!("{}", Layout(&config));
    Ok(0)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!("workcell-sim starting");

    let result = match cli.command {
        Some(Commands::Run(args)) => run(&args),
        Some(Commands::Layout(args)) => layout(&args),
        None => run(&RunArgs::default()),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
