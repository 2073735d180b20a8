//! Data section of the job configuration.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Which domain-specific preprocessing applies to the dataset.
///
/// `R2G` (Ready to Go) marks data that is already preprocessed, pre-split
/// into train/test sets and pre-labeled; the pipeline must not transform
/// it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Tabular,
    GeneExpression,
    Microbiome,
    Metabolomic,
    Other,
    #[serde(rename = "R2G")]
    ReadyToGo,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DataType::Tabular => "tabular",
            DataType::GeneExpression => "gene_expression",
            DataType::Microbiome => "microbiome",
            DataType::Metabolomic => "metabolomic",
            DataType::Other => "other",
            DataType::ReadyToGo => "R2G",
        };
        write!(f, "{s}")
    }
}

fn default_save_path() -> PathBuf {
    PathBuf::from("/experiments/")
}

/// The dataset this job runs on. Paths are carried opaquely; checking
/// that they exist is the pipeline's concern, not the validator's.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    /// Name given to this job.
    pub name: String,
    /// Path to the training data.
    pub file_path: PathBuf,
    /// Metadata file accompanying the training data.
    #[serde(default)]
    pub metadata_file: Option<PathBuf>,
    /// Optional holdout dataset.
    #[serde(default)]
    pub file_path_holdout_data: Option<PathBuf>,
    /// Metadata file accompanying the holdout set.
    #[serde(default)]
    pub metadata_file_holdout_data: Option<PathBuf>,
    /// Where results are saved.
    #[serde(default = "default_save_path")]
    pub save_path: PathBuf,
    /// Column to predict, in the dataset or its metadata.
    pub target: String,
    pub data_type: DataType,
}

impl DataConfig {
    /// Cross-field pass. R2G data carries its labels and split inline, so
    /// separate metadata files are meaningless and get cleared.
    pub fn resolve(mut self) -> Result<Self> {
        if self.data_type == DataType::ReadyToGo {
            self.metadata_file = None;
            self.metadata_file_holdout_data = None;
        }
        Ok(self)
    }
}
