// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Three subcommands:
//
//   prepare  — stats + train + test files (positional inputs)
//   stats    — only the relevance statistics table
//   replay   — re-run `prepare` from a saved manifest

use clap::{Args, Subcommand};

use crate::application::prepare_use_case::PrepareConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the statistics, training and test files
    Prepare(PrepareArgs),

    /// Write only the per-query relevance statistics table
    Stats(StatsArgs),

    /// Re-run a build from a manifest written by `prepare --manifest`
    Replay(ReplayArgs),
}

#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Topics file (tab-separated, header line, query id first)
    pub topics: String,

    /// Query-document feature table: qid, docid, f1..fN
    pub features: String,

    /// Relevance judgments: qid, [iteration,] docid, grade
    pub qrels: String,

    /// Negative sampling policy: natural, equal_neg, double_neg,
    /// triple_neg, quadruple_neg or hexaple_neg (anything else = natural)
    pub policy: String,

    /// Rank cap, appended to the output file names
    pub rank: usize,

    /// Output path of the relevance statistics table
    pub stats: String,

    /// Training file stem; written as <stem>.<policy>.<rank>
    pub train: String,

    /// Test file stem; written as <stem>.<policy>.<rank>
    pub test: String,

    /// Seed for negative sampling (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Also write the run configuration as JSON to this path
    #[arg(long)]
    pub manifest: Option<String>,
}

/// Convert CLI args into the application-layer config.
/// The application layer never sees clap types.
impl From<PrepareArgs> for PrepareConfig {
    fn from(a: PrepareArgs) -> Self {
        PrepareConfig {
            topics_path:   a.topics,
            features_path: a.features,
            qrels_path:    a.qrels,
            policy:        a.policy,
            rank:          a.rank,
            stats_path:    a.stats,
            train_stem:    a.train,
            test_stem:     a.test,
            seed:          a.seed,
            manifest:      a.manifest,
        }
    }
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    pub topics: String,
    pub features: String,
    pub qrels: String,
    /// Output path of the statistics table
    pub output: String,
}

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Manifest JSON written by a previous `prepare --manifest`
    pub manifest: String,

    /// Override the manifest's seed
    #[arg(long)]
    pub seed: Option<u64>,
}

impl ReplayArgs {
    /// Turn a saved manifest into the config to run.
    ///
    /// # Arguments
    /// * `saved` - The config read back from `self.manifest`
    ///
    /// # Returns
    /// The same config with `--seed` applied (if given) and the
    /// manifest output cleared, so a replay never rewrites the
    /// file it was started from.
    pub fn replay_config(&self, saved: PrepareConfig) -> PrepareConfig {
        PrepareConfig {
            seed:     self.seed.or(saved.seed),
            manifest: None,
            ..saved
        }
    }
}
