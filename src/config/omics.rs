//! Per-data-type preprocessing sub-configs. Leaf nodes: field-range
//! checks only, no cross-field rules of their own. Which one survives is
//! decided by the root's pruning pass.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_half() -> f64 {
    0.5
}

fn check_fraction(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::field(
            field,
            format!("must be within [0, 1], got {value}"),
        ));
    }
    Ok(())
}

/// Settings for plain tabular data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TabularConfig {
    /// Drop samples missing more than this fraction of features.
    #[serde(default = "default_half")]
    pub filter_sample_missing: f64,
    /// Drop features missing in more than this fraction of samples.
    #[serde(default = "default_half")]
    pub filter_feature_missing: f64,
}

impl Default for TabularConfig {
    fn default() -> Self {
        Self {
            filter_sample_missing: default_half(),
            filter_feature_missing: default_half(),
        }
    }
}

impl TabularConfig {
    pub fn validate_fields(&self) -> Result<()> {
        check_fraction("tabular.filter_sample_missing", self.filter_sample_missing)?;
        check_fraction("tabular.filter_feature_missing", self.filter_feature_missing)
    }
}

/// Taxonomic rank abundance tables can be collapsed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxonomyLevel {
    Genus,
    Species,
}

fn default_reads() -> u64 {
    1000
}

/// Settings for 16S/shotgun microbiome abundance data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MicrobiomeConfig {
    /// Collapse the abundance table to this rank; null keeps the input
    /// resolution.
    #[serde(default)]
    pub collapse_tax: Option<TaxonomyLevel>,
    /// Drop samples with fewer total reads.
    #[serde(default = "default_reads")]
    pub min_reads: u64,
    /// Rarefaction depth for read-count normalisation.
    #[serde(default = "default_reads")]
    pub norm_reads: u64,
    /// Drop taxa below this mean relative abundance.
    #[serde(default)]
    pub filter_abundance: f64,
    /// Drop taxa present in fewer than this fraction of samples.
    #[serde(default)]
    pub filter_prevalence: f64,
    /// Target classes removed from the dataset before training.
    #[serde(default)]
    pub remove_classes: Vec<String>,
    /// Merge the listed classes into the key class.
    #[serde(default)]
    pub merge_classes: BTreeMap<String, Vec<String>>,
}

impl Default for MicrobiomeConfig {
    fn default() -> Self {
        Self {
            collapse_tax: None,
            min_reads: default_reads(),
            norm_reads: default_reads(),
            filter_abundance: 0.0,
            filter_prevalence: 0.0,
            remove_classes: Vec::new(),
            merge_classes: BTreeMap::new(),
        }
    }
}

impl MicrobiomeConfig {
    pub fn validate_fields(&self) -> Result<()> {
        if !self.filter_abundance.is_finite() || self.filter_abundance < 0.0 {
            return Err(ConfigError::field(
                "microbiome.filter_abundance",
                format!("must be a non-negative number, got {}", self.filter_abundance),
            ));
        }
        check_fraction("microbiome.filter_prevalence", self.filter_prevalence)
    }
}

/// Settings for metabolomic intensity data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetabolomicConfig {
    /// Drop samples missing more than this fraction of metabolites.
    #[serde(default = "default_half")]
    pub filter_sample_missing: f64,
    /// Metadata column holding metabolite annotations, if any.
    #[serde(default)]
    pub annotation_column: Option<String>,
}

impl Default for MetabolomicConfig {
    fn default() -> Self {
        Self {
            filter_sample_missing: default_half(),
            annotation_column: None,
        }
    }
}

impl MetabolomicConfig {
    pub fn validate_fields(&self) -> Result<()> {
        check_fraction("metabolomic.filter_sample_missing", self.filter_sample_missing)
    }
}

/// Unit the expression matrix is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExpressionUnit {
    Counts,
    Fpkm,
    Rpkm,
    Tpm,
    Tmm,
    Log2fc,
    Other,
}

/// Settings for gene-expression data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneExpressionConfig {
    pub expression_type: ExpressionUnit,
    /// Drop genes whose expression never reaches this level.
    #[serde(default)]
    pub min_expression: f64,
    /// Drop genes expressed in fewer than this fraction of samples.
    #[serde(default)]
    pub min_samples_expressed: f64,
}

impl Default for GeneExpressionConfig {
    fn default() -> Self {
        Self {
            expression_type: ExpressionUnit::Other,
            min_expression: 0.0,
            min_samples_expressed: 0.0,
        }
    }
}

impl GeneExpressionConfig {
    pub fn validate_fields(&self) -> Result<()> {
        if !self.min_expression.is_finite() || self.min_expression < 0.0 {
            return Err(ConfigError::field(
                "gene_expression.min_expression",
                format!("must be a non-negative number, got {}", self.min_expression),
            ));
        }
        check_fraction(
            "gene_expression.min_samples_expressed",
            self.min_samples_expressed,
        )
    }
}
