// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain structs, enums and traits describing an IR evaluation
// collection and how its documents are bucketed and sampled.
//
// Rules for this layer:
//   - NO file I/O
//   - NO randomness
//   - Only data types, small accessors and traits

// Topics, qrels and the query-document feature table
pub mod collection;

// Relevant / irrelevant / unjudged buckets and their counts
pub mod partition;

// Negative sampling policies and their multipliers
pub mod policy;

// Abstractions over where the collection comes from
pub mod traits;
