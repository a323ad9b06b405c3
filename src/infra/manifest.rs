// ============================================================
// Layer 6 — Run Manifest
// ============================================================
// Saves the configuration of a dataset build as pretty JSON so
// a run can be traced back to its inputs, policy, rank cap and
// seed.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::application::prepare_use_case::PrepareConfig;

pub fn save_manifest(cfg: &PrepareConfig, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(cfg)?;

    fs::write(path, json)
        .with_context(|| format!("Cannot write manifest to '{}'", path.display()))?;

    tracing::debug!("Saved run manifest to '{}'", path.display());
    Ok(())
}

pub fn load_manifest(path: &Path) -> Result<PrepareConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Cannot read manifest '{}'", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Invalid manifest '{}'", path.display()))
}
