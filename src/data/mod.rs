// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the raw TSV inputs and the rendered
// output lines, per query:
//
//   topics / qrels / features
//       │
//       ▼
//   loader        → typed collection, fail-fast validation
//       │
//       ▼
//   classifier    → relevant / irrelevant / unjudged
//       │
//       ▼
//   sampler       → training documents (training path only)
//       │
//       ▼
//   normalizer    → column-wise min-max per query
//       │
//       ▼
//   emitter       → "<rel> qid:<q> 1:<f1> ... # <doc>" lines
//
// Each module does one step and is tested on its own.

/// Reads topics, qrels and the feature table
pub mod loader;

/// Buckets a query's candidates by judgment
pub mod classifier;

/// Chooses negative training examples
pub mod sampler;

/// Rescales feature columns to [0, 1]
pub mod normalizer;

/// Renders query groups as sparse feature-vector lines
pub mod emitter;
