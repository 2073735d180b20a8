//! Loading a job configuration from disk.

use super::RunConfig;
use crate::error::{ConfigError, Result};
use crate::registry::Registries;
use std::fs;
use std::path::Path;
use tracing::info;

/// Parse and resolve a job configuration from a JSON string, using the
/// process-wide registry snapshot.
pub fn resolve_from_str(raw: &str) -> Result<RunConfig> {
    let parsed: RunConfig = serde_json::from_str(raw)?;
    parsed.resolve(Registries::builtin())
}

/// Load, parse and resolve a job configuration file.
///
/// Returns the frozen, fully-resolved configuration, or the single error
/// that aborted the load.
pub fn load_config(path: &Path) -> Result<RunConfig> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let resolved = resolve_from_str(&raw)?;
    info!(
        job = %resolved.data.name,
        problem_type = %resolved.ml.problem_type,
        data_type = %resolved.data.data_type,
        models = resolved.ml.model_list.len(),
        "job configuration resolved"
    );
    Ok(resolved)
}
