//! Job configuration tree and the cross-field resolution engine.
//!
//! Nodes are deserialized from JSON with serde (field-shape checks), then
//! resolved by a single consuming pass per node: relevance pruning,
//! registry-driven defaulting, subset checks, dependent-value propagation
//! and the R2G override, in that order. A node's `resolve` takes the raw
//! node by value and returns the resolved node, so the pass is idempotent
//! and testable in isolation; nothing mutates in place mid-validation.
//! Any violated invariant aborts the whole load.

pub mod data;
pub mod feature_selection;
mod loader;
pub mod ml;
pub mod omics;
pub mod plotting;
pub mod prediction;
pub mod prune;

pub use data::{DataConfig, DataType};
pub use feature_selection::{AutoConfig, FeatureCount, FeatureSelectionConfig, MethodConfig};
pub use loader::{load_config, resolve_from_str};
pub use ml::{
    AutoKerasConfig, AutoLgbmConfig, AutoXgboostConfig, Balancing, Encoding, HyperTuning,
    MlConfig, YesNo,
};
pub use omics::{
    ExpressionUnit, GeneExpressionConfig, MetabolomicConfig, MicrobiomeConfig, TabularConfig,
    TaxonomyLevel,
};
pub use plotting::{ExplanationsData, PlottingConfig};
pub use prediction::PredictionConfig;

use crate::error::{ConfigError, Result};
use crate::registry::{ProblemType, Registries};
use prune::Slot;
use serde::{Deserialize, Serialize};

/// Ancestor state threaded down through a resolution pass: the registry
/// snapshot plus the discriminators resolved so far.
#[derive(Debug, Clone)]
pub struct ResolveContext<'r> {
    pub registries: &'r Registries,
    problem_type: Option<ProblemType>,
    data_type: Option<DataType>,
}

impl<'r> ResolveContext<'r> {
    pub fn new(registries: &'r Registries) -> Self {
        Self {
            registries,
            problem_type: None,
            data_type: None,
        }
    }

    pub fn with_problem_type(mut self, problem_type: ProblemType) -> Self {
        self.problem_type = Some(problem_type);
        self
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    /// The resolved problem type. Absence means a caller invoked a
    /// problem-type-scoped validator without threading the discriminator
    /// down, which is a defect in the calling node.
    pub fn require_problem_type(&self) -> Result<ProblemType> {
        self.problem_type.ok_or_else(|| {
            ConfigError::Invariant(
                "problem-type-scoped validation invoked without a resolved problem_type".into(),
            )
        })
    }

    pub fn data_type(&self) -> Option<DataType> {
        self.data_type
    }
}

fn default_tabular() -> Option<TabularConfig> {
    Some(TabularConfig::default())
}

fn default_microbiome() -> Option<MicrobiomeConfig> {
    Some(MicrobiomeConfig::default())
}

fn default_metabolomic() -> Option<MetabolomicConfig> {
    Some(MetabolomicConfig::default())
}

fn default_gene_expression() -> Option<GeneExpressionConfig> {
    Some(GeneExpressionConfig::default())
}

/// The root of the job configuration.
///
/// After `resolve` succeeds the tree is fully defaulted and pruned:
/// exactly the per-data-type section matching `data.data_type` survives
/// (none for `other`/`R2G`), and every field the discriminators make
/// irrelevant is null.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub data: DataConfig,
    pub ml: MlConfig,
    #[serde(default)]
    pub plotting: PlottingConfig,
    #[serde(default = "default_tabular", skip_serializing_if = "Option::is_none")]
    pub tabular: Option<TabularConfig>,
    #[serde(default = "default_microbiome", skip_serializing_if = "Option::is_none")]
    pub microbiome: Option<MicrobiomeConfig>,
    #[serde(default = "default_metabolomic", skip_serializing_if = "Option::is_none")]
    pub metabolomic: Option<MetabolomicConfig>,
    #[serde(default = "default_gene_expression", skip_serializing_if = "Option::is_none")]
    pub gene_expression: Option<GeneExpressionConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<PredictionConfig>,
}

impl RunConfig {
    /// Resolve the whole tree against a registry snapshot.
    ///
    /// Order: data first (establishes `data_type`), then the ML section
    /// (establishes `problem_type` and resolves feature selection), then
    /// plotting against the problem type, then the table-driven pruning of
    /// the per-data-type slots, then prediction, and finally the R2G
    /// override that forces the preprocessing-related ML fields inert.
    pub fn resolve(self, registries: &Registries) -> Result<Self> {
        let RunConfig {
            data,
            ml,
            plotting,
            mut tabular,
            mut microbiome,
            mut metabolomic,
            mut gene_expression,
            prediction,
        } = self;

        let data = data.resolve()?;
        let ctx = ResolveContext::new(registries).with_data_type(data.data_type);
        let mut ml = ml.resolve(&ctx)?;
        let ctx = ctx.with_problem_type(ml.problem_type);
        let plotting = plotting.resolve(&ctx)?;

        for slot in prune::slots_to_clear(data.data_type) {
            match slot {
                Slot::Tabular => tabular = None,
                Slot::Microbiome => microbiome = None,
                Slot::Metabolomic => metabolomic = None,
                Slot::GeneExpression => gene_expression = None,
            }
        }
        Self::check_surviving_slot(
            data.data_type,
            tabular.is_some(),
            microbiome.is_some(),
            metabolomic.is_some(),
            gene_expression.is_some(),
        )?;
        if let Some(section) = &tabular {
            section.validate_fields()?;
        }
        if let Some(section) = &microbiome {
            section.validate_fields()?;
        }
        if let Some(section) = &metabolomic {
            section.validate_fields()?;
        }
        if let Some(section) = &gene_expression {
            section.validate_fields()?;
        }

        let mut prediction = prediction.map(PredictionConfig::resolve).transpose()?;

        // R2G data is already preprocessed; the pipeline must not
        // standardize, select features or rebalance it again.
        if data.data_type == DataType::ReadyToGo {
            ml.standardize = false;
            ml.feature_selection = None;
            ml.balancing = Balancing::None;
            if let Some(prediction) = prediction.as_mut() {
                prediction.metadata_file = None;
            }
        }

        Ok(RunConfig {
            data,
            ml,
            plotting,
            tabular,
            microbiome,
            metabolomic,
            gene_expression,
            prediction,
        })
    }

    fn check_surviving_slot(
        data_type: DataType,
        tabular: bool,
        microbiome: bool,
        metabolomic: bool,
        gene_expression: bool,
    ) -> Result<()> {
        let (field, present) = match data_type {
            DataType::Tabular => ("tabular", tabular),
            DataType::Microbiome => ("microbiome", microbiome),
            DataType::Metabolomic => ("metabolomic", metabolomic),
            DataType::GeneExpression => ("gene_expression", gene_expression),
            DataType::Other | DataType::ReadyToGo => return Ok(()),
        };
        if !present {
            return Err(ConfigError::field(
                field,
                format!("section must be present when data.data_type is '{data_type}'"),
            ));
        }
        Ok(())
    }

    /// Pretty JSON rendering of the resolved configuration, for the
    /// downstream pipeline and for operators.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(value: serde_json::Value) -> Result<RunConfig> {
        let raw: RunConfig = serde_json::from_value(value).map_err(ConfigError::from)?;
        raw.resolve(Registries::builtin())
    }

    fn minimal(data_type: &str, problem_type: &str, model: &str) -> serde_json::Value {
        serde_json::json!({
            "data": {
                "name": "job",
                "file_path": "/data/x.csv",
                "target": "label",
                "data_type": data_type,
            },
            "ml": {
                "problem_type": problem_type,
                "model_list": [model],
            },
        })
    }

    #[test]
    fn test_data_type_keeps_exactly_matching_section() {
        let cfg = run(minimal("microbiome", "classification", "RandomForestClassifier")).unwrap();
        assert!(cfg.microbiome.is_some());
        assert!(cfg.tabular.is_none());
        assert!(cfg.metabolomic.is_none());
        assert!(cfg.gene_expression.is_none());
    }

    #[test]
    fn test_r2g_forces_ml_sections_inert() {
        let cfg = run(minimal("R2G", "classification", "RandomForestClassifier")).unwrap();
        assert!(!cfg.ml.standardize);
        assert!(cfg.ml.feature_selection.is_none());
        assert_eq!(cfg.ml.balancing, Balancing::None);
        assert!(cfg.tabular.is_none());
        assert!(cfg.microbiome.is_none());
        assert!(cfg.metabolomic.is_none());
        assert!(cfg.gene_expression.is_none());
    }

    #[test]
    fn test_r2g_clears_prediction_metadata() {
        let mut value = minimal("R2G", "classification", "RandomForestClassifier");
        value["prediction"] = serde_json::json!({
            "file_path": "/data/new.csv",
            "metadata_file": "/data/meta.csv",
        });
        let cfg = run(value).unwrap();
        let prediction = cfg.prediction.unwrap();
        assert!(prediction.metadata_file.is_none());
        assert_eq!(prediction.outfile_name.as_deref(), Some("prediction_results"));
    }

    #[test]
    fn test_explicitly_nulled_matching_section_rejected() {
        let mut value = minimal("tabular", "classification", "RandomForestClassifier");
        value["tabular"] = serde_json::Value::Null;
        let err = run(value).unwrap_err();
        assert!(err.to_string().contains("tabular"));
    }

    #[test]
    fn test_plotting_validated_against_ml_problem_type() {
        let mut value = minimal("tabular", "regression", "RandomForestRegressor");
        value["plotting"] = serde_json::json!({ "plot_method": ["conf_matrix"] });
        let err = run(value).unwrap_err();
        assert!(err.to_string().contains("conf_matrix"));
    }

    #[test]
    fn test_resolved_output_omits_pruned_sections() {
        let cfg = run(minimal("R2G", "classification", "RandomForestClassifier")).unwrap();
        let rendered = cfg.to_json_pretty().unwrap();
        assert!(!rendered.contains("\"tabular\""));
        assert!(!rendered.contains("\"microbiome\""));
        assert!(!rendered.contains("\"feature_selection\""));
    }

    #[test]
    fn test_unknown_root_key_rejected() {
        let mut value = minimal("tabular", "classification", "RandomForestClassifier");
        value["extra_section"] = serde_json::json!({});
        assert!(run(value).is_err());
    }
}
