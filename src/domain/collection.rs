// ============================================================
// Layer 3 — Evaluation Collection Types
// ============================================================
// The three inputs of a dataset build, after loading:
//
//   Topics       → ordered list of query ids (drives output order)
//   Qrels        → query id → { doc id → relevance grade }
//   FeatureTable → query id → ordered candidates + feature vectors
//
// Query and document ids are opaque strings. They are never
// parsed as numbers, so "007" and "7" stay distinct queries.
//
// These types are read-only once loading finishes.

use std::collections::{HashMap, HashSet};

/// Opaque query identifier
pub type QueryId = String;

/// Document identifier, scoped to a query
pub type DocId = String;

/// Graded relevance from the judgment file.
/// Absence (unjudged) is modelled as `Option<Grade>`.
pub type Grade = i32;

/// Relevance judgments for a single query
pub type Judgments = HashMap<DocId, Grade>;

// ─── Topics ───────────────────────────────────────────────────────────────────
/// The query list in file order, without duplicates.
#[derive(Debug, Clone, Default)]
pub struct Topics {
    ids:  Vec<QueryId>,
    seen: HashSet<QueryId>,
}

impl Topics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a query id. Returns false if it was already present,
    /// in which case the first position is kept.
    pub fn push(&mut self, id: impl Into<QueryId>) -> bool {
        let id = id.into();
        if !self.seen.insert(id.clone()) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn ids(&self) -> &[QueryId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<QueryId>> FromIterator<S> for Topics {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut topics = Topics::new();
        for id in iter {
            topics.push(id);
        }
        topics
    }
}

// ─── Qrels ────────────────────────────────────────────────────────────────────
/// Relevance judgments for every judged query.
#[derive(Debug, Clone, Default)]
pub struct Qrels {
    by_query: HashMap<QueryId, Judgments>,
}

impl Qrels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a grade. A repeated (query, doc) pair overwrites the earlier grade.
    pub fn insert(&mut self, query_id: impl Into<QueryId>, doc_id: impl Into<DocId>, grade: Grade) {
        self.by_query
            .entry(query_id.into())
            .or_default()
            .insert(doc_id.into(), grade);
    }

    /// Judgments for one query, or None if the query was never judged
    pub fn for_query(&self, query_id: &str) -> Option<&Judgments> {
        self.by_query.get(query_id)
    }

    /// Number of queries with at least one judgment
    pub fn query_count(&self) -> usize {
        self.by_query.len()
    }
}

// ─── Feature table ────────────────────────────────────────────────────────────
/// Candidate documents of one query in baseline order,
/// each with a feature vector of the same length.
#[derive(Debug, Clone, Default)]
pub struct QueryFeatures {
    doc_ids: Vec<DocId>,
    vectors: HashMap<DocId, Vec<f64>>,
}

impl QueryFeatures {
    /// Append a candidate. The loader checks duplicates and
    /// dimensionality before calling this; a repeated doc id
    /// here replaces the vector but keeps the first position.
    pub fn push(&mut self, doc_id: impl Into<DocId>, features: Vec<f64>) {
        let doc_id = doc_id.into();
        if !self.vectors.contains_key(&doc_id) {
            self.doc_ids.push(doc_id.clone());
        }
        self.vectors.insert(doc_id, features);
    }

    pub fn contains(&self, doc_id: &str) -> bool {
        self.vectors.contains_key(doc_id)
    }

    /// Candidates in the order they appeared in the feature file
    pub fn doc_ids(&self) -> &[DocId] {
        &self.doc_ids
    }

    pub fn vector(&self, doc_id: &str) -> Option<&[f64]> {
        self.vectors.get(doc_id).map(Vec::as_slice)
    }

    /// Feature count of this query's vectors (None before the first push)
    pub fn dimension(&self) -> Option<usize> {
        self.doc_ids
            .first()
            .and_then(|d| self.vectors.get(d))
            .map(Vec::len)
    }

    pub fn len(&self) -> usize {
        self.doc_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc_ids.is_empty()
    }
}

/// All queries' candidates and feature vectors.
#[derive(Debug, Clone, Default)]
pub struct FeatureTable {
    by_query: HashMap<QueryId, QueryFeatures>,
}

impl FeatureTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable access to a query's candidates, created on first use
    pub fn query_mut(&mut self, query_id: impl Into<QueryId>) -> &mut QueryFeatures {
        self.by_query.entry(query_id.into()).or_default()
    }

    pub fn for_query(&self, query_id: &str) -> Option<&QueryFeatures> {
        self.by_query.get(query_id)
    }

    pub fn query_count(&self) -> usize {
        self.by_query.len()
    }

    /// Total number of (query, document) rows
    pub fn row_count(&self) -> usize {
        self.by_query.values().map(QueryFeatures::len).sum()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topics_keep_first_occurrence() {
        let topics: Topics = ["q2", "q1", "q2", "q3"].into_iter().collect();
        assert_eq!(topics.ids(), &["q2", "q1", "q3"]);
    }

    #[test]
    fn test_topics_push_reports_duplicates() {
        let mut topics = Topics::new();
        assert!(topics.push("301"));
        assert!(topics.push("302"));
        assert!(!topics.push("301"));
        assert_eq!(topics.len(), 2);
    }

    #[test]
    fn test_topics_large_list_keeps_order() {
        let topics: Topics = (0..20_000)
            .chain(0..20_000)
            .map(|i| format!("q{i}"))
            .collect();
        assert_eq!(topics.len(), 20_000);
        assert_eq!(topics.ids()[0], "q0");
        assert_eq!(topics.ids()[19_999], "q19999");
    }

    #[test]
    fn test_qrels_last_grade_wins() {
        let mut qrels = Qrels::new();
        qrels.insert("q1", "d1", 1);
        qrels.insert("q1", "d1", 3);
        assert_eq!(qrels.for_query("q1").and_then(|j| j.get("d1")), Some(&3));
        assert!(qrels.for_query("q2").is_none());
    }

    #[test]
    fn test_query_features_preserve_order() {
        let mut table = FeatureTable::new();
        table.query_mut("q1").push("d9", vec![1.0, 2.0]);
        table.query_mut("q1").push("d1", vec![3.0, 4.0]);

        let q1 = table.for_query("q1").unwrap();
        assert_eq!(q1.doc_ids(), &["d9", "d1"]);
        assert_eq!(q1.vector("d1"), Some(&[3.0, 4.0][..]));
        assert_eq!(q1.dimension(), Some(2));
        assert_eq!(table.row_count(), 2);
    }
}
