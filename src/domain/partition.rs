// ============================================================
// Layer 3 — Relevance Partition
// ============================================================
// A query's candidates split three ways by their judgment:
//
//   grade > 0        → relevant
//   grade <= 0       → irrelevant
//   no grade at all  → unjudged
//
// Every candidate lands in exactly one bucket, and each bucket
// keeps the candidates' baseline order.

use crate::domain::collection::DocId;

/// The three disjoint buckets of one query's candidates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub relevant:   Vec<DocId>,
    pub irrelevant: Vec<DocId>,
    pub unjudged:   Vec<DocId>,
}

impl Partition {
    /// Bucket sizes, as written to the statistics table
    pub fn counts(&self) -> QueryCounts {
        QueryCounts {
            rel:          self.relevant.len(),
            irrel:        self.irrelevant.len(),
            nonannotated: self.unjudged.len(),
        }
    }
}

/// Per-query bucket sizes. Field names match the statistics header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryCounts {
    pub rel:          usize,
    pub irrel:        usize,
    pub nonannotated: usize,
}
