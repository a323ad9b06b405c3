// ============================================================
// Layer 4 — Feature Normalizer
// ============================================================
// Column-wise min-max scaling of one query's feature matrix:
//
//   out[i][j] = (x[i][j] - min_j) / (max_j - min_j)
//
// Rows are documents, columns are features. Scaling is done per
// query group only, never across queries and never per row.
//
// Edge cases:
//   - a column whose max equals its min (including a single-row
//     matrix) maps entirely to 0.0
//   - a value that would come out NaN (NaN input, infinite range)
//     is written as 0.0
//
// Every output value is in [0, 1], and normalizing a normalized
// matrix returns it unchanged.
//
// Why per query and not over the whole file?
//   A ranker only compares documents of the same query. Raw
//   scores such as BM25 live on very different scales from one
//   query to the next (long queries score higher), so scaling
//   within the group keeps every query's features comparable.
//
// Why columns and not rows?
//   A row is one document; its values are different features
//   with unrelated units. Scaling a column puts one feature on
//   the same 0..1 range for every document of the query.
//
// Reference: Liu (2009) Learning to Rank for Information Retrieval,
//            LETOR QueryLevelNorm feature files

pub struct MinMaxNormalizer;

impl MinMaxNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Rescale each column of `matrix` to [0, 1].
    ///
    /// # Arguments
    /// * `matrix` - One row per document, one column per feature.
    ///              Rows of one query share a width.
    ///
    /// # Returns
    /// A new matrix of the same shape
    pub fn normalize(&self, matrix: &[Vec<f64>]) -> Vec<Vec<f64>> {
        let width = matrix.iter().map(Vec::len).max().unwrap_or(0);

        // ── Column bounds ────────────────────────────────────────────────────
        // f64::min / f64::max skip NaN, so a NaN cell never poisons its column
        let mut mins = vec![f64::INFINITY; width];
        let mut maxs = vec![f64::NEG_INFINITY; width];
        for row in matrix {
            for (j, &value) in row.iter().enumerate() {
                mins[j] = mins[j].min(value);
                maxs[j] = maxs[j].max(value);
            }
        }

        matrix
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(j, &value)| scale(value, mins[j], maxs[j]))
                    .collect()
            })
            .collect()
    }
}

impl Default for MinMaxNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn scale(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if !range.is_finite() || range <= 0.0 {
        return 0.0;
    }
    let scaled = (value - min) / range;
    if scaled.is_nan() {
        0.0
    } else {
        scaled.clamp(0.0, 1.0)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_scaled_independently() {
        let n   = MinMaxNormalizer::new();
        let out = n.normalize(&[vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(out, vec![vec![0.0, 0.0], vec![1.0, 1.0]]);
    }

    #[test]
    fn test_middle_values() {
        let n   = MinMaxNormalizer::new();
        let out = n.normalize(&[vec![0.0, 10.0], vec![5.0, 40.0], vec![10.0, 20.0]]);
        assert_eq!(out[1][0], 0.5);
        assert_eq!(out[2][1], 1.0 / 3.0);
        assert_eq!(out[0][1], 0.0);
    }

    #[test]
    fn test_constant_column_is_zero() {
        let n   = MinMaxNormalizer::new();
        let out = n.normalize(&[vec![7.0, 1.0], vec![7.0, 2.0]]);
        assert_eq!(out[0][0], 0.0);
        assert_eq!(out[1][0], 0.0);
        assert_eq!(out[1][1], 1.0);
    }

    #[test]
    fn test_single_row_is_all_zero() {
        let n = MinMaxNormalizer::new();
        assert_eq!(n.normalize(&[vec![3.5, -2.0, 9.0]]), vec![vec![0.0, 0.0, 0.0]]);
    }

    #[test]
    fn test_empty_shapes() {
        let n = MinMaxNormalizer::new();
        assert!(n.normalize(&[]).is_empty());
        assert_eq!(n.normalize(&[vec![], vec![]]), vec![Vec::<f64>::new(), Vec::new()]);
    }

    #[test]
    fn test_output_in_unit_interval() {
        let n = MinMaxNormalizer::new();
        let matrix = vec![
            vec![-3.2, 1e9, 0.0, f64::NAN],
            vec![4.4, -1e9, 0.0, 1.0],
            vec![0.1, 17.0, 0.0, 2.0],
        ];
        for row in n.normalize(&matrix) {
            for v in row {
                assert!((0.0..=1.0).contains(&v), "{v} out of range");
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let n     = MinMaxNormalizer::new();
        let once  = n.normalize(&[vec![2.0, 8.0], vec![6.0, 8.0], vec![4.0, 8.0]]);
        let twice = n.normalize(&once);
        assert_eq!(once, twice);
    }
}
