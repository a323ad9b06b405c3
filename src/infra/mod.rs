// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Output side of the pipeline:
//
//   writer.rs   — buffered train/test file writer
//   stats.rs    — per-query judgment coverage table
//   manifest.rs — JSON record of a run's configuration

/// Buffered line writer for dataset files
pub mod writer;

/// Relevance statistics table
pub mod stats;

/// Run configuration save/load
pub mod manifest;
