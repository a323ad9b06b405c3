// ============================================================
// Layer 6 — Dataset Writer
// ============================================================
// Buffered line writer for the train/test files. Parent
// directories are created on open, and the writer counts the
// rows it has written so the run summary can report them.

use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

pub struct DatasetWriter {
    path:  PathBuf,
    out:   BufWriter<File>,
    rows:  usize,
}

impl DatasetWriter {
    /// Create (or truncate) the output file at `path`
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create directory '{}'", parent.display()))?;
        }

        let file = File::create(&path)
            .with_context(|| format!("Cannot create '{}'", path.display()))?;

        Ok(Self { path, out: BufWriter::new(file), rows: 0 })
    }

    /// Append lines, each terminated with '\n'
    pub fn write_lines(&mut self, lines: &[String]) -> Result<()> {
        for line in lines {
            writeln!(self.out, "{line}")
                .with_context(|| format!("Cannot write to '{}'", self.path.display()))?;
        }
        self.rows += lines.len();
        Ok(())
    }

    /// Flush buffered output and return the number of rows written
    pub fn finish(mut self) -> Result<usize> {
        self.out
            .flush()
            .with_context(|| format!("Cannot flush '{}'", self.path.display()))?;
        tracing::debug!("Wrote {} rows to '{}'", self.rows, self.path.display());
        Ok(self.rows)
    }
}
