// ============================================================
// Layer 4 — Negative Sampler
// ============================================================
// Chooses which documents of a query become training examples.
//
// The training set always starts with every relevant document
// (in baseline order), followed by the chosen negatives:
//
//   irrelevant present, Natural   → all irrelevant documents
//   irrelevant present, otherwise → uniform sample without
//                                   replacement of
//                                   min(multiplier × R, |irrelevant|)
//   no irrelevant documents       → the R lowest-ranked unjudged
//                                   documents, whatever the policy
//
// The unjudged fallback is R-sized for every policy; it does
// not scale with the multiplier. When R = 0 the fallback adds
// nothing.
//
// The random source is owned by the sampler and shared across
// all queries of a run. Seed it for reproducible output.
//
// Why fall back to the lowest-ranked unjudged documents?
//   Many pooled judgments contain no explicit negatives for a
//   query. Documents the baseline ranked last are the least
//   likely to be relevant, so they stand in as negatives.
//
// Reference: rand crate documentation (SliceRandom::choose_multiple)

use rand::{seq::SliceRandom, Rng};

use crate::domain::collection::DocId;
use crate::domain::partition::Partition;
use crate::domain::policy::SamplingPolicy;

pub struct NegativeSampler<R: Rng> {
    rng: R,
}

impl<R: Rng> NegativeSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Build the training document list for one query under `policy`.
    ///
    /// The returned Vec is a fresh copy; the partition is never modified.
    pub fn select(&mut self, policy: SamplingPolicy, partition: &Partition) -> Vec<DocId> {
        let num_rel      = partition.relevant.len();
        let mut training = partition.relevant.clone();

        if partition.irrelevant.is_empty() {
            training.extend_from_slice(lowest_ranked(&partition.unjudged, num_rel));
            return training;
        }

        match policy.multiplier() {
            None => training.extend_from_slice(&partition.irrelevant),
            Some(multiplier) => {
                let sampled = sample_without_replacement(
                    &mut self.rng,
                    &partition.irrelevant,
                    multiplier * num_rel,
                );
                training.extend(sampled);
            }
        }

        training
    }
}

/// The last `count` documents of a baseline-ordered list
/// (all of them if fewer exist). `count == 0` yields nothing.
pub fn lowest_ranked(doc_ids: &[DocId], count: usize) -> &[DocId] {
    &doc_ids[doc_ids.len().saturating_sub(count)..]
}

/// Uniformly pick `count` distinct documents, capped at the population size.
pub fn sample_without_replacement<R: Rng + ?Sized>(
    rng:     &mut R,
    doc_ids: &[DocId],
    count:   usize,
) -> Vec<DocId> {
    doc_ids.choose_multiple(rng, count).cloned().collect()
}
