// ============================================================
// Layer 2 — PrepareUseCase
// ============================================================
// Builds the learning-to-rank files for one collection:
//
//   Step 1: Load topics, qrels, features    (Layer 4 - data)
//   Step 2: Write relevance statistics      (Layer 6 - infra)
//   Step 3: Write the training file         (Layer 4 + 6)
//   Step 4: Write the test file             (Layer 4 + 6)
//   Step 5: Save the run manifest, if asked (Layer 6 - infra)
//
// Every input is loaded before any output is opened, so a bad
// input never leaves partial files behind. Output lines follow
// topic order; within a query they follow sampler order
// (training) or baseline order (test).

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::application::stats_use_case::relevance_stats;
use crate::data::{emitter::DatasetEmitter, loader::TsvCollection, sampler::NegativeSampler};
use crate::domain::collection::{FeatureTable, Qrels, Topics};
use crate::domain::policy::SamplingPolicy;
use crate::domain::traits::CollectionSource;
use crate::infra::{manifest::save_manifest, writer::DatasetWriter};

// ─── Configuration ────────────────────────────────────────────────────────────
// Everything a run needs. Serialisable so it can be written as a
// manifest and replayed later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepareConfig {
    pub topics_path:   String,
    pub features_path: String,
    pub qrels_path:    String,
    /// Policy name as given; unknown names sample naturally
    pub policy:        String,
    /// Rank cap. Recorded in file names only; never truncates output.
    pub rank:          usize,
    pub stats_path:    String,
    pub train_stem:    String,
    pub test_stem:     String,
    pub seed:          Option<u64>,
    pub manifest:      Option<String>,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            topics_path:   "topics.tsv".to_string(),
            features_path: "features.tsv".to_string(),
            qrels_path:    "qrels.tsv".to_string(),
            policy:        SamplingPolicy::Natural.name().to_string(),
            rank:          1000,
            stats_path:    "stats.tsv".to_string(),
            train_stem:    "train".to_string(),
            test_stem:     "test".to_string(),
            seed:          None,
            manifest:      None,
        }
    }
}

impl PrepareConfig {
    pub fn sampling_policy(&self) -> SamplingPolicy {
        SamplingPolicy::from_name(&self.policy)
    }

    /// `<train_stem>.<policy>.<rank>`
    pub fn train_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.{}.{}", self.train_stem, self.policy, self.rank))
    }

    /// `<test_stem>.<policy>.<rank>`
    pub fn test_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.{}.{}", self.test_stem, self.policy, self.rank))
    }
}

/// Counts reported back to the CLI after a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrepareSummary {
    pub queries:          usize,
    pub train_rows:       usize,
    pub test_rows:        usize,
    /// Queries left out of the training file for lack of judgments
    pub unjudged_queries: usize,
}

// ─── PrepareUseCase ───────────────────────────────────────────────────────────
pub struct PrepareUseCase {
    config: PrepareConfig,
}

impl PrepareUseCase {
    pub fn new(config: PrepareConfig) -> Self {
        Self { config }
    }

    /// Run against the TSV files named in the config
    pub fn execute(&self) -> Result<PrepareSummary> {
        let cfg    = &self.config;
        let source = TsvCollection::new(&cfg.topics_path, &cfg.features_path, &cfg.qrels_path);
        self.execute_with(&source)
    }

    /// Run against any collection source
    pub fn execute_with(&self, source: &dyn CollectionSource) -> Result<PrepareSummary> {
        let cfg    = &self.config;
        let policy = cfg.sampling_policy();

        // ── Step 1: Load every input up front ─────────────────────────────────
        let topics   = source.topics().context("Loading topics")?;
        let qrels    = source.qrels().context("Loading relevance judgments")?;
        let features = source.features().context("Loading query-document features")?;
        if topics.is_empty() {
            tracing::warn!("No topics loaded; output files will be empty");
        }

        // ── Step 2: Statistics (diagnostic, never fatal) ──────────────────────
        tracing::info!("Relevance judgment analysis ...");
        let report = relevance_stats(&topics, &qrels, &features);
        if let Err(e) = report.write(Path::new(&cfg.stats_path)) {
            tracing::warn!("Statistics not written: {:#}", e);
        }

        // ── Step 3: Training file ─────────────────────────────────────────────
        // One random source for the whole run, never reseeded per query
        let rng = match cfg.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None       => ChaCha8Rng::from_entropy(),
        };
        let mut sampler = NegativeSampler::new(rng);
        let emitter     = DatasetEmitter::new();

        tracing::info!("Preparing training samples (policy: {}) ...", policy);
        let (train_rows, unjudged_queries) = write_training(
            &cfg.train_path(),
            &emitter,
            &mut sampler,
            policy,
            &topics,
            &qrels,
            &features,
        )?;

        // ── Step 4: Test file ─────────────────────────────────────────────────
        tracing::info!("Preparing testing samples ...");
        let test_rows = write_test(&cfg.test_path(), &emitter, cfg.rank, &topics, &qrels, &features)?;

        // ── Step 5: Manifest ──────────────────────────────────────────────────
        if let Some(path) = &cfg.manifest {
            save_manifest(cfg, Path::new(path))?;
        }

        let summary = PrepareSummary {
            queries: topics.len(),
            train_rows,
            test_rows,
            unjudged_queries,
        };
        tracing::info!(
            "Done: {} queries, {} training rows, {} test rows",
            summary.queries,
            summary.train_rows,
            summary.test_rows
        );
        Ok(summary)
    }
}

/// Returns (rows written, queries skipped for lack of judgments)
fn write_training(
    path:     &Path,
    emitter:  &DatasetEmitter,
    sampler:  &mut NegativeSampler<ChaCha8Rng>,
    policy:   SamplingPolicy,
    topics:   &Topics,
    qrels:    &Qrels,
    features: &FeatureTable,
) -> Result<(usize, usize)> {
    let mut writer  = DatasetWriter::create(path)?;
    let mut skipped = 0usize;

    for query_id in topics.ids() {
        let Some(judgments) = qrels.for_query(query_id) else {
            tracing::debug!("Query {} has no judgments, left out of training", query_id);
            skipped += 1;
            continue;
        };
        let Some(candidates) = features.for_query(query_id) else {
            tracing::debug!("Query {} has no candidates", query_id);
            continue;
        };

        let lines = emitter.training_group(sampler, policy, query_id, judgments, candidates);
        writer.write_lines(&lines)?;
    }

    Ok((writer.finish()?, skipped))
}

fn write_test(
    path:     &Path,
    emitter:  &DatasetEmitter,
    rank:     usize,
    topics:   &Topics,
    qrels:    &Qrels,
    features: &FeatureTable,
) -> Result<usize> {
    let mut writer = DatasetWriter::create(path)?;

    for query_id in topics.ids() {
        let Some(candidates) = features.for_query(query_id).filter(|c| !c.is_empty()) else {
            tracing::debug!("Query {} has no candidates", query_id);
            continue;
        };
        if candidates.len() > rank {
            // The rank cap labels the output; it does not truncate it
            tracing::debug!(
                "Query {} has {} candidates, above rank cap {}",
                query_id,
                candidates.len(),
                rank
            );
        }

        let lines = emitter.test_group(query_id, qrels.for_query(query_id), candidates);
        writer.write_lines(&lines)?;
    }

    writer.finish()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Fixed in-memory collection
    struct Fixture {
        topics:   Topics,
        qrels:    Qrels,
        features: FeatureTable,
    }

    impl CollectionSource for Fixture {
        fn topics(&self) -> Result<Topics> {
            Ok(self.topics.clone())
        }
        fn qrels(&self) -> Result<Qrels> {
            Ok(self.qrels.clone())
        }
        fn features(&self) -> Result<FeatureTable> {
            Ok(self.features.clone())
        }
    }

    /// Q1: d1 grade 2, d2 grade 0, d3/d4 unjudged.
    /// Q2: no judgments at all.
    fn fixture() -> Fixture {
        let topics: Topics = ["Q1", "Q2"].into_iter().collect();

        let mut qrels = Qrels::new();
        qrels.insert("Q1", "d1", 2);
        qrels.insert("Q1", "d2", 0);

        let mut features = FeatureTable::new();
        let q1 = features.query_mut("Q1");
        q1.push("d1", vec![1.0, 2.0]);
        q1.push("d2", vec![3.0, 4.0]);
        q1.push("d3", vec![5.0, 6.0]);
        q1.push("d4", vec![7.0, 8.0]);
        let q2 = features.query_mut("Q2");
        q2.push("e1", vec![0.0]);
        q2.push("e2", vec![2.0]);

        Fixture { topics, qrels, features }
    }

    fn config_in(dir: &TempDir, policy: &str) -> PrepareConfig {
        let out = |name: &str| dir.path().join(name).to_string_lossy().into_owned();
        PrepareConfig {
            policy:     policy.to_string(),
            rank:       100,
            stats_path: out("stats.tsv"),
            train_stem: out("train"),
            test_stem:  out("test"),
            seed:       Some(7),
            ..PrepareConfig::default()
        }
    }

    #[test]
    fn test_output_paths_carry_policy_and_rank() {
        let cfg = PrepareConfig {
            policy:     "equal_neg".into(),
            rank:       100,
            train_stem: "out/train".into(),
            test_stem:  "out/test".into(),
            ..PrepareConfig::default()
        };
        assert_eq!(cfg.train_path(), PathBuf::from("out/train.equal_neg.100"));
        assert_eq!(cfg.test_path(), PathBuf::from("out/test.equal_neg.100"));
        assert_eq!(cfg.sampling_policy(), SamplingPolicy::Equal);
    }

    #[test]
    fn test_natural_end_to_end() {
        let dir = TempDir::new().unwrap();
        let cfg = config_in(&dir, "natural");
        let summary = PrepareUseCase::new(cfg.clone()).execute_with(&fixture()).unwrap();

        assert_eq!(
            summary,
            PrepareSummary { queries: 2, train_rows: 2, test_rows: 6, unjudged_queries: 1 }
        );

        let train = fs::read_to_string(cfg.train_path()).unwrap();
        assert_eq!(train, "2 qid:Q1 1:0.0 2:0.0 # d1\n0 qid:Q1 1:1.0 2:1.0 # d2\n");

        // Q2 is unjudged: absent from training, present in test with label 0
        let test = fs::read_to_string(cfg.test_path()).unwrap();
        let lines: Vec<&str> = test.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "2 qid:Q1 1:0.0 2:0.0 # d1");
        assert_eq!(lines[3], "0 qid:Q1 1:1.0 2:1.0 # d4");
        assert_eq!(lines[4], "0 qid:Q2 1:0.0 # e1");
        assert_eq!(lines[5], "0 qid:Q2 1:1.0 # e2");

        let stats = fs::read_to_string(&cfg.stats_path).unwrap();
        assert_eq!(
            stats,
            "query_id\trel\tirrel\tnonannotated\nQ1\t1\t1\t2\nQ2\t0\t0\t2\n"
        );
    }

    #[test]
    fn test_equal_policy_uses_unjudged_fallback() {
        let dir = TempDir::new().unwrap();
        let cfg = config_in(&dir, "equal_neg");

        let mut source = fixture();
        source.qrels = Qrels::new();
        source.qrels.insert("Q1", "d1", 2);

        PrepareUseCase::new(cfg.clone()).execute_with(&source).unwrap();
        let train = fs::read_to_string(cfg.train_path()).unwrap();
        let docs: Vec<&str> = train.lines().filter_map(|l| l.split(" # ").nth(1)).collect();
        assert_eq!(docs, vec!["d1", "d4"]);
    }

    #[test]
    fn test_rank_cap_does_not_truncate() {
        let dir = TempDir::new().unwrap();
        let mut cfg = config_in(&dir, "natural");
        cfg.rank = 1;
        let summary = PrepareUseCase::new(cfg).execute_with(&fixture()).unwrap();
        assert_eq!(summary.test_rows, 6);
    }

    #[test]
    fn test_stats_failure_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let mut cfg = config_in(&dir, "natural");
        cfg.stats_path = blocker.join("stats.tsv").to_string_lossy().into_owned();

        let summary = PrepareUseCase::new(cfg.clone()).execute_with(&fixture()).unwrap();
        assert_eq!(summary.train_rows, 2);
        assert!(cfg.test_path().exists());
    }

    #[test]
    fn test_manifest_is_written() {
        let dir = TempDir::new().unwrap();
        let mut cfg = config_in(&dir, "double_neg");
        let manifest = dir.path().join("run.json");
        cfg.manifest = Some(manifest.to_string_lossy().into_owned());

        PrepareUseCase::new(cfg.clone()).execute_with(&fixture()).unwrap();
        let saved = crate::infra::manifest::load_manifest(&manifest).unwrap();
        assert_eq!(saved, cfg);
    }

    #[test]
    fn test_missing_input_produces_no_output() {
        let dir = TempDir::new().unwrap();
        let mut cfg = config_in(&dir, "natural");
        cfg.topics_path = dir.path().join("missing.tsv").to_string_lossy().into_owned();

        let err = PrepareUseCase::new(cfg.clone()).execute().unwrap_err();
        assert!(format!("{err:#}").contains("missing.tsv"));
        assert!(!Path::new(&cfg.stats_path).exists());
        assert!(!cfg.train_path().exists());
    }

    #[test]
    fn test_execute_reads_tsv_files() {
        let dir = TempDir::new().unwrap();
        let write = |name: &str, body: &str| {
            let p = dir.path().join(name);
            fs::write(&p, body).unwrap();
            p.to_string_lossy().into_owned()
        };

        let mut cfg = config_in(&dir, "natural");
        cfg.topics_path   = write("topics.tsv", "qid\ttitle\nQ1\tfirst\n");
        cfg.qrels_path    = write("qrels.tsv", "qid\tdocid\trel\nQ1\td1\t2\nQ1\td2\t0\n");
        cfg.features_path = write(
            "features.tsv",
            "qid\tdocid\tf1\tbm25\nQ1\td1\t1\t2\nQ1\td2\t3\t4\nQ1\td3\t5\t6\nQ1\td4\t7\t8\n",
        );

        let summary = PrepareUseCase::new(cfg.clone()).execute().unwrap();
        assert_eq!(summary.train_rows, 2);
        assert_eq!(summary.test_rows, 4);
        assert_eq!(
            fs::read_to_string(cfg.train_path()).unwrap(),
            "2 qid:Q1 1:0.0 2:0.0 # d1\n0 qid:Q1 1:1.0 2:1.0 # d2\n"
        );
    }
}
