// ============================================================
// Layer 3 — Negative Sampling Policy
// ============================================================
// How many negatives a query contributes to the training file,
// as a multiple of its relevant count R:
//
//   policy         CLI name        negatives (irrelevant present)
//   ───────────────────────────────────────────────────────────
//   Natural        natural         every irrelevant document
//   Equal          equal_neg       R
//   Double         double_neg      2R
//   Triple         triple_neg      3R
//   Quadruple      quadruple_neg   4R
//   Hexaple        hexaple_neg     8R
//
// Sampled counts are capped by the number of irrelevant
// documents available. When a query has no irrelevant
// documents every policy falls back to the R lowest-ranked
// unjudged documents (see data::sampler).

use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SamplingPolicy {
    #[default]
    Natural,
    Equal,
    Double,
    Triple,
    Quadruple,
    Hexaple,
}

impl SamplingPolicy {
    pub const ALL: [SamplingPolicy; 6] = [
        SamplingPolicy::Natural,
        SamplingPolicy::Equal,
        SamplingPolicy::Double,
        SamplingPolicy::Triple,
        SamplingPolicy::Quadruple,
        SamplingPolicy::Hexaple,
    ];

    /// Look up a policy by its CLI name.
    /// Any unrecognised name selects `Natural`.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == name)
            .unwrap_or_else(|| {
                tracing::warn!("Unknown sampling policy '{}', using 'natural'", name);
                SamplingPolicy::Natural
            })
    }

    pub fn name(self) -> &'static str {
        match self {
            SamplingPolicy::Natural   => "natural",
            SamplingPolicy::Equal     => "equal_neg",
            SamplingPolicy::Double    => "double_neg",
            SamplingPolicy::Triple    => "triple_neg",
            SamplingPolicy::Quadruple => "quadruple_neg",
            SamplingPolicy::Hexaple   => "hexaple_neg",
        }
    }

    /// Negatives per relevant document, or None when every
    /// irrelevant document is taken (`Natural`).
    pub fn multiplier(self) -> Option<usize> {
        match self {
            SamplingPolicy::Natural   => None,
            SamplingPolicy::Equal     => Some(1),
            SamplingPolicy::Double    => Some(2),
            SamplingPolicy::Triple    => Some(3),
            SamplingPolicy::Quadruple => Some(4),
            SamplingPolicy::Hexaple   => Some(8),
        }
    }
}

impl fmt::Display for SamplingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for policy in SamplingPolicy::ALL {
            assert_eq!(SamplingPolicy::from_name(policy.name()), policy);
        }
    }

    #[test]
    fn test_unknown_name_is_natural() {
        assert_eq!(SamplingPolicy::from_name("random_neg"), SamplingPolicy::Natural);
        assert_eq!(SamplingPolicy::from_name(""), SamplingPolicy::Natural);
        // names are case sensitive
        assert_eq!(SamplingPolicy::from_name("EQUAL_NEG"), SamplingPolicy::Natural);
    }

    #[test]
    fn test_multiplier_table() {
        assert_eq!(SamplingPolicy::Natural.multiplier(), None);
        assert_eq!(SamplingPolicy::Equal.multiplier(), Some(1));
        assert_eq!(SamplingPolicy::Double.multiplier(), Some(2));
        assert_eq!(SamplingPolicy::Triple.multiplier(), Some(3));
        assert_eq!(SamplingPolicy::Quadruple.multiplier(), Some(4));
        assert_eq!(SamplingPolicy::Hexaple.multiplier(), Some(8));
    }
}
