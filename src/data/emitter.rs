// ============================================================
// Layer 4 — Dataset Emitter
// ============================================================
// Renders query groups as sparse feature-vector lines:
//
//   <relevance> qid:<queryId> 1:<f1> 2:<f2> ... N:<fN> # <docId>
//
//   - relevance is the judged grade clamped to >= 0
//     (unjudged and negative grades become 0)
//   - feature indices are 1-based and contiguous
//   - the trailing "# <docId>" comment is always present
//   - floats use the shortest round-trip form and always carry
//     a fractional part: 0.0, 1.0, 0.25
//
// A group is assembled in three steps:
//
//   doc ids ──► (clamped grade, raw vector) ──► min-max per column ──► lines
//
// Training groups get their doc ids from the negative sampler;
// test groups use every candidate in baseline order.

use rand::Rng;

use crate::data::{classifier::classify, normalizer::MinMaxNormalizer, sampler::NegativeSampler};
use crate::domain::collection::{DocId, Grade, Judgments, QueryFeatures};
use crate::domain::policy::SamplingPolicy;

/// Clamp a judgment to a non-negative label. Unjudged is 0.
pub fn clamp_relevance(grade: Option<Grade>) -> Grade {
    grade.unwrap_or(0).max(0)
}

/// Render one record as an output line (without the newline).
///
/// # Example
/// ```text
/// render(2, "Q1", &[0.0, 1.0], "d1")  →  "2 qid:Q1 1:0.0 2:1.0 # d1"
/// ```
pub fn render(relevance: Grade, query_id: &str, features: &[f64], doc_id: &str) -> String {
    let mut line = format!("{relevance} qid:{query_id}");
    for (idx, value) in features.iter().enumerate() {
        line.push_str(&format!(" {}:{:?}", idx + 1, value));
    }
    line.push_str(&format!(" # {doc_id}"));
    line
}

pub struct DatasetEmitter {
    normalizer: MinMaxNormalizer,
}

impl DatasetEmitter {
    pub fn new() -> Self {
        Self { normalizer: MinMaxNormalizer::new() }
    }

    /// Normalize and render the given documents of one query, in the given order.
    pub fn emit_group(
        &self,
        query_id:  &str,
        doc_ids:   &[DocId],
        judgments: Option<&Judgments>,
        features:  &QueryFeatures,
    ) -> Vec<String> {
        let mut labels = Vec::with_capacity(doc_ids.len());
        let mut rows   = Vec::with_capacity(doc_ids.len());
        let mut kept   = Vec::with_capacity(doc_ids.len());

        for doc_id in doc_ids {
            let Some(vector) = features.vector(doc_id) else {
                tracing::warn!("No features for '{}' in query '{}', skipping", doc_id, query_id);
                continue;
            };
            let grade = judgments.and_then(|j| j.get(doc_id)).copied();
            labels.push(clamp_relevance(grade));
            rows.push(vector.to_vec());
            kept.push(doc_id);
        }

        let normalized = self.normalizer.normalize(&rows);

        labels
            .iter()
            .zip(&normalized)
            .zip(&kept)
            .map(|((&label, row), doc_id)| render(label, query_id, row, doc_id))
            .collect()
    }

    /// Training lines for one judged query: relevant documents
    /// followed by the negatives chosen under `policy`.
    pub fn training_group<R: Rng>(
        &self,
        sampler:   &mut NegativeSampler<R>,
        policy:    SamplingPolicy,
        query_id:  &str,
        judgments: &Judgments,
        features:  &QueryFeatures,
    ) -> Vec<String> {
        let partition = classify(features.doc_ids(), Some(judgments));
        let counts    = partition.counts();
        tracing::debug!(
            "Query {}: rel={}, irrel={}, nonannotated={}",
            query_id,
            counts.rel,
            counts.irrel,
            counts.nonannotated
        );

        let training_ids = sampler.select(policy, &partition);
        self.emit_group(query_id, &training_ids, Some(judgments), features)
    }

    /// Test lines for one query: every candidate, baseline order.
    pub fn test_group(
        &self,
        query_id:  &str,
        judgments: Option<&Judgments>,
        features:  &QueryFeatures,
    ) -> Vec<String> {
        self.emit_group(query_id, features.doc_ids(), judgments, features)
    }
}

impl Default for DatasetEmitter {
    fn default() -> Self {
        Self::new()
    }
}
