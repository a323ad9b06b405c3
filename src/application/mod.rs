// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Workflow coordination only: load, hand each query to the data
// layer, pass the results to the infra writers.
//
// Rules for this layer:
//   - No sampling or normalization math here (that's Layer 4)
//   - No printing (that's Layer 1)

// Full train/test/stats build
pub mod prepare_use_case;

// Statistics table on its own
pub mod stats_use_case;
