//! Prediction section: settings for scoring new data with the trained
//! models.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_outfile_name() -> Option<String> {
    Some("prediction_results".to_string())
}

/// Optional prediction job. The key itself must be present when the
/// section is supplied, but may be null to express "no prediction data".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PredictionConfig {
    /// Data the trained models should score.
    pub file_path: Option<PathBuf>,
    /// Name of the file the predictions are written to.
    #[serde(default = "default_outfile_name")]
    pub outfile_name: Option<String>,
    /// Metadata accompanying the prediction data.
    #[serde(default)]
    pub metadata_file: Option<PathBuf>,
}

impl PredictionConfig {
    /// Cross-field pass: no prediction data means no prediction outputs.
    pub fn resolve(mut self) -> Result<Self> {
        if self.file_path.is_none() {
            self.outfile_name = None;
            self.metadata_file = None;
        }
        Ok(self)
    }
}
