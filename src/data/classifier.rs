// ============================================================
// Layer 4 — Distribution Classifier
// ============================================================
// Splits a query's candidates into relevant / irrelevant /
// unjudged buckets using the query's judgments.
//
// A query with no judgments at all is valid input: every
// candidate is then unjudged.

use crate::domain::collection::{DocId, Judgments};
use crate::domain::partition::Partition;

/// Bucket `doc_ids` by their grade in `judgments`, preserving input order.
pub fn classify(doc_ids: &[DocId], judgments: Option<&Judgments>) -> Partition {
    let mut partition = Partition::default();

    for doc_id in doc_ids {
        match judgments.and_then(|j| j.get(doc_id)) {
            None                      => partition.unjudged.push(doc_id.clone()),
            Some(&grade) if grade > 0 => partition.relevant.push(doc_id.clone()),
            Some(_)                   => partition.irrelevant.push(doc_id.clone()),
        }
    }

    partition
}
