// ============================================================
// Layer 6 — Statistics Report
// ============================================================
// Tab-separated table of per-query judgment coverage:
//
//   query_id  rel  irrel  nonannotated
//   301       12   88     900
//   302       3    0      997
//
// One row per query in topic order. This file is diagnostic
// only; nothing downstream reads it, so callers treat a write
// failure as a warning.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::domain::collection::QueryId;
use crate::domain::partition::QueryCounts;

pub const HEADER: [&str; 4] = ["query_id", "rel", "irrel", "nonannotated"];

#[derive(Debug, Clone, Default)]
pub struct StatsReport {
    rows: Vec<(QueryId, QueryCounts)>,
}

impl StatsReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, query_id: impl Into<QueryId>, counts: QueryCounts) {
        self.rows.push((query_id.into(), counts));
    }

    pub fn rows(&self) -> &[(QueryId, QueryCounts)] {
        &self.rows
    }

    /// The full table, header included, newline-terminated
    pub fn render(&self) -> String {
        let mut out = HEADER.join("\t");
        out.push('\n');
        for (query_id, c) in &self.rows {
            out.push_str(&format!(
                "{}\t{}\t{}\t{}\n",
                query_id, c.rel, c.irrel, c.nonannotated
            ));
        }
        out
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create directory '{}'", parent.display()))?;
        }
        fs::write(path, self.render())
            .with_context(|| format!("Cannot write statistics to '{}'", path.display()))?;
        tracing::debug!("Wrote statistics for {} queries to '{}'", self.rows.len(), path.display());
        Ok(())
    }
}
