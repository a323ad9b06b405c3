// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and dispatches to a use case.
// All real work happens in Layer 2 (application).

pub mod commands;

use anyhow::Result;
use clap::Parser;
use std::path::Path;

use commands::{Commands, PrepareArgs, ReplayArgs, StatsArgs};

#[derive(Parser, Debug)]
#[command(
    name = "ltr-prep",
    version,
    about = "Build learning-to-rank training and test files from topics, qrels and query-document features."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Prepare(args) => run_prepare(args),
            Commands::Stats(args)   => run_stats(args),
            Commands::Replay(args)  => run_replay(args),
        }
    }
}

fn run_prepare(args: PrepareArgs) -> Result<()> {
    use crate::application::prepare_use_case::{PrepareConfig, PrepareUseCase};

    let config: PrepareConfig = args.into();
    tracing::info!("{:?}", config);
    let summary = PrepareUseCase::new(config).execute()?;

    println!(
        "Prepared {} queries: {} training rows, {} test rows ({} unjudged queries left out of training).",
        summary.queries, summary.train_rows, summary.test_rows, summary.unjudged_queries
    );
    Ok(())
}

fn run_stats(args: StatsArgs) -> Result<()> {
    use crate::application::stats_use_case::StatsUseCase;

    let rows = StatsUseCase::new(args.topics, args.features, args.qrels, &args.output).execute()?;
    println!("Wrote statistics for {} queries to {}", rows, args.output);
    Ok(())
}

fn run_replay(args: ReplayArgs) -> Result<()> {
    use crate::application::prepare_use_case::PrepareUseCase;
    use crate::infra::manifest::load_manifest;

    let saved = load_manifest(Path::new(&args.manifest))?;
    tracing::info!("Replaying '{}'", args.manifest);
    let config = args.replay_config(saved);

    let summary = PrepareUseCase::new(config).execute()?;
    println!(
        "Replayed {} queries: {} training rows, {} test rows.",
        summary.queries, summary.train_rows, summary.test_rows
    );
    Ok(())
}
