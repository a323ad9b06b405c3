// ============================================================
// Layer 3 — Core Traits
// ============================================================
// The pipeline reads its three inputs through this trait, so
// the application layer never touches file formats directly.
//
// Implementations:
//   - TsvCollection       → tab-separated files on disk (data::loader)
//   - in-memory fixtures  → unit tests of the application layer

use anyhow::Result;

use crate::domain::collection::{FeatureTable, Qrels, Topics};

// ─── CollectionSource ─────────────────────────────────────────────────────────
/// Anything that can supply the topics, judgments and features
/// for one dataset build.
pub trait CollectionSource {
    /// The ordered query list
    fn topics(&self) -> Result<Topics>;

    /// Relevance judgments, keyed by query then document
    fn qrels(&self) -> Result<Qrels>;

    /// Candidate documents and their feature vectors
    fn features(&self) -> Result<FeatureTable>;
}
