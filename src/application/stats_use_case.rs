// ============================================================
// Layer 2 — Stats Use Case
// ============================================================
// Builds the per-query relevance statistics table:
//
//   Step 1: Load topics, qrels and features   (Layer 4 - data)
//   Step 2: Classify each query's candidates  (Layer 4 - data)
//   Step 3: Write the table                   (Layer 6 - infra)
//
// The prepare pipeline reuses `relevance_stats` for its own
// statistics file.

use anyhow::Result;
use std::path::PathBuf;

use crate::data::{classifier::classify, loader::TsvCollection};
use crate::domain::collection::{FeatureTable, Qrels, Topics};
use crate::domain::traits::CollectionSource;
use crate::infra::stats::StatsReport;

/// Count relevant / irrelevant / unjudged candidates for every topic.
///
/// # Arguments
/// * `topics`   - Query order of the report
/// * `qrels`    - Judgments; unjudged queries count every candidate as unjudged
/// * `features` - Candidate lists; topics without candidates report all zeros
pub fn relevance_stats(topics: &Topics, qrels: &Qrels, features: &FeatureTable) -> StatsReport {
    let mut report = StatsReport::new();

    for query_id in topics.ids() {
        let doc_ids = features
            .for_query(query_id)
            .map(|q| q.doc_ids())
            .unwrap_or_default();
        let partition = classify(doc_ids, qrels.for_query(query_id));
        report.push(query_id.as_str(), partition.counts());
    }

    report
}

pub struct StatsUseCase {
    topics_path:   PathBuf,
    features_path: PathBuf,
    qrels_path:    PathBuf,
    output:        PathBuf,
}

impl StatsUseCase {
    pub fn new(
        topics_path:   impl Into<PathBuf>,
        features_path: impl Into<PathBuf>,
        qrels_path:    impl Into<PathBuf>,
        output:        impl Into<PathBuf>,
    ) -> Self {
        Self {
            topics_path:   topics_path.into(),
            features_path: features_path.into(),
            qrels_path:    qrels_path.into(),
            output:        output.into(),
        }
    }

    /// Load the collection and write the table. Returns the number of rows.
    pub fn execute(&self) -> Result<usize> {
        let source = TsvCollection::new(&self.topics_path, &self.features_path, &self.qrels_path);

        let topics   = source.topics()?;
        let qrels    = source.qrels()?;
        let features = source.features()?;

        let report = relevance_stats(&topics, &qrels, &features);
        report.write(&self.output)?;

        tracing::info!(
            "Wrote statistics for {} queries to '{}'",
            report.rows().len(),
            self.output.display()
        );
        Ok(report.rows().len())
    }
}
