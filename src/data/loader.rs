// ============================================================
// Layer 4 — Collection Loaders
// ============================================================
// Reads the three tab-separated input files:
//
//   topics    queryId [\t text...]
//   qrels     queryId \t docId \t grade
//             queryId \t iteration \t docId \t grade   (TREC form)
//   features  queryId \t docId \t f1 \t f2 ... \t fN
//
// Shared rules:
//   - the first line is a header and is skipped
//   - blank lines are ignored
//   - cells are trimmed, trailing whitespace is dropped
//
// Any malformed row fails the whole file with its 1-based
// line number. Rows are never skipped.
//
// Why fail instead of skipping a bad row?
//   A dropped feature row shrinks a query's candidate list, and
//   the test file would then silently rank fewer documents than
//   the baseline run retrieved. Failing names the exact line to
//   fix.
//
// Reference: Rust Book §9 (Recoverable Errors with Result)
//            thiserror crate documentation

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::Result;
use thiserror::Error;

use crate::domain::collection::{FeatureTable, Grade, Qrels, Topics};
use crate::domain::traits::CollectionSource;

// ─── Errors ───────────────────────────────────────────────────────────────────
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open '{}': {source}", .path.display())]
    Open {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read '{}': {source}", .path.display())]
    Read {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}:{line}: {reason}", .path.display())]
    Malformed {
        path:   PathBuf,
        line:   usize,
        reason: String,
    },
}

/// Walk the data rows of a TSV file, handing each row's cells to `f`.
/// Returns the number of data rows seen.
fn for_each_row<F>(path: &Path, mut f: F) -> Result<usize, LoadError>
where
    F: FnMut(&[&str]) -> Result<(), String>,
{
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rows = 0usize;
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        // header
        if idx == 0 {
            continue;
        }

        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        let cells: Vec<&str> = line.split('\t').map(str::trim).collect();
        f(cells.as_slice()).map_err(|reason| LoadError::Malformed {
            path: path.to_path_buf(),
            line: idx + 1,
            reason,
        })?;
        rows += 1;
    }

    Ok(rows)
}

fn non_empty<'a>(cell: &'a str, what: &str) -> Result<&'a str, String> {
    if cell.is_empty() {
        Err(format!("empty {what}"))
    } else {
        Ok(cell)
    }
}

// ─── Topics ───────────────────────────────────────────────────────────────────
/// Load the ordered query list. Only the first column is used.
pub fn load_topics(path: &Path) -> Result<Topics, LoadError> {
    let mut topics = Topics::new();
    let rows = for_each_row(path, |cells| {
        let query_id = non_empty(cells[0], "query id")?;
        if !topics.push(query_id) {
            tracing::debug!("Duplicate topic '{}' ignored", query_id);
        }
        Ok(())
    })?;

    tracing::debug!("Read {} topic rows from '{}'", rows, path.display());
    Ok(topics)
}

// ─── Qrels ────────────────────────────────────────────────────────────────────
/// Load relevance judgments in either the 3- or 4-column layout.
pub fn load_qrels(path: &Path) -> Result<Qrels, LoadError> {
    let mut qrels = Qrels::new();
    let rows = for_each_row(path, |cells| {
        let (query_id, doc_id, grade) = match cells {
            [q, d, g] | [q, _, d, g] => (*q, *d, *g),
            _ => {
                return Err(format!(
                    "expected 3 or 4 columns, found {}",
                    cells.len()
                ))
            }
        };
        let query_id = non_empty(query_id, "query id")?;
        let doc_id = non_empty(doc_id, "document id")?;
        let grade: Grade = grade
            .parse()
            .map_err(|_| format!("relevance grade '{grade}' is not an integer"))?;

        qrels.insert(query_id, doc_id, grade);
        Ok(())
    })?;

    tracing::debug!("Read {} judgment rows from '{}'", rows, path.display());
    Ok(qrels)
}

// ─── Features ─────────────────────────────────────────────────────────────────
/// Load the query-document feature table.
///
/// Rows of one query must all carry the same number of features,
/// and a document may appear only once per query.
///
/// # Arguments
/// * `path` - TSV file of `queryId  docId  f1 ... fN` rows
///
/// # Returns
/// The table, with each query's documents in file order, or a
/// `LoadError` naming the first bad line
pub fn load_features(path: &Path) -> Result<FeatureTable, LoadError> {
    let mut table = FeatureTable::new();
    let rows = for_each_row(path, |cells| {
        if cells.len() < 2 {
            return Err(format!(
                "expected query id, document id and features, found {} column(s)",
                cells.len()
            ));
        }
        let query_id = non_empty(cells[0], "query id")?;
        let doc_id = non_empty(cells[1], "document id")?;

        let features = cells[2..]
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                raw.parse::<f64>()
                    .map_err(|_| format!("feature {} value '{}' is not a number", i + 1, raw))
            })
            .collect::<Result<Vec<f64>, String>>()?;

        let query = table.query_mut(query_id);
        if query.contains(doc_id) {
            return Err(format!(
                "document '{doc_id}' listed twice for query '{query_id}'"
            ));
        }
        if let Some(dim) = query.dimension() {
            if dim != features.len() {
                return Err(format!(
                    "query '{}' has {} features per row, this row has {}",
                    query_id,
                    dim,
                    features.len()
                ));
            }
        }
        query.push(doc_id, features);
        Ok(())
    })?;

    tracing::debug!("Read {} feature rows from '{}'", rows, path.display());
    Ok(table)
}

// ─── TsvCollection ────────────────────────────────────────────────────────────
/// The three input files of a dataset build, read on demand.
#[derive(Debug, Clone)]
pub struct TsvCollection {
    topics_path:   PathBuf,
    features_path: PathBuf,
    qrels_path:    PathBuf,
}

impl TsvCollection {
    pub fn new(
        topics_path:   impl Into<PathBuf>,
        features_path: impl Into<PathBuf>,
        qrels_path:    impl Into<PathBuf>,
    ) -> Self {
        Self {
            topics_path:   topics_path.into(),
            features_path: features_path.into(),
            qrels_path:    qrels_path.into(),
        }
    }
}

impl CollectionSource for TsvCollection {
    fn topics(&self) -> Result<Topics> {
        let topics = load_topics(&self.topics_path)?;
        tracing::info!("Loaded {} topics from '{}'", topics.len(), self.topics_path.display());
        Ok(topics)
    }

    fn qrels(&self) -> Result<Qrels> {
        let qrels = load_qrels(&self.qrels_path)?;
        tracing::info!(
            "Loaded judgments for {} queries from '{}'",
            qrels.query_count(),
            self.qrels_path.display()
        );
        Ok(qrels)
    }

    fn features(&self) -> Result<FeatureTable> {
        let table = load_features(&self.features_path)?;
        tracing::info!(
            "Loaded {} candidates over {} queries from '{}'",
            table.row_count(),
            table.query_count(),
            self.features_path.display()
        );
        Ok(table)
    }
}
