use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use self::{advise::AdviseArg, analyze::AnalyzeArg, enrich::EnrichArg};

mod advise;
mod analyze;
mod enrich;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log debug events (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Analyze one video's pose track and write the analysis JSON
    Analyze(#[clap(flatten)] AnalyzeArg),
    /// Merge advice and a classifier prediction into an analysis JSON
    Enrich(#[clap(flatten)] EnrichArg),
    /// Print posture advice for a set of metrics
    Advise(#[clap(flatten)] AdviseArg),
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logging(args.verbose);
    match args.mode {
        Mode::Analyze(arg) => analyze::run(&arg)?,
        Mode::Enrich(arg) => enrich::run(&arg)?,
        Mode::Advise(arg) => advise::run(&arg),
    }
    Ok(())
}
