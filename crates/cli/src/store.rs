//! JSON state file behind the operator commands.
//!
//! Pool rows round-trip through a single JSON document so that suspension
//! flags and provisioned pools survive between invocations. A missing file
//! reads as an empty registry.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use swap_domain::entities::Pool;

pub fn load_pools(path: &Path) -> Result<Vec<Pool>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading state file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing state file {}", path.display()))
}

pub fn save_pools(path: &Path, pools: &[Pool]) -> Result<()> {
    let raw = serde_json::to_string_pretty(pools).context("serializing pools")?;
    fs::write(path, raw).with_context(|| format!("writing state file {}", path.display()))
}
