//! ML section: the aggregate node owning feature selection and the
//! per-estimator sub-configs, and the owner of the resolved problem type.

use super::feature_selection::FeatureSelectionConfig;
use super::ResolveContext;
use crate::error::{ConfigError, Result};
use crate::registry::ProblemType;
use serde::{Deserialize, Serialize};

/// Hyperparameter search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HyperTuning {
    Random,
    Grid,
}

impl Default for HyperTuning {
    fn default() -> Self {
        HyperTuning::Random
    }
}

/// Class-balancing strategy, only meaningful for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Balancing {
    Over,
    Under,
    None,
}

impl Default for Balancing {
    fn default() -> Self {
        Balancing::None
    }
}

/// Target encoding scheme, only meaningful for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Label,
    Onehot,
}

/// The legacy "Y"/"N" flag kept on the wire for compatibility with
/// existing job files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    Y,
    N,
}

impl Default for YesNo {
    fn default() -> Self {
        YesNo::N
    }
}

impl YesNo {
    pub fn as_bool(self) -> bool {
        self == YesNo::Y
    }
}

fn default_n_epochs() -> u32 {
    100
}

fn default_batch_size() -> u32 {
    32
}

fn default_max_trials() -> u32 {
    10
}

fn default_n_trials() -> u32 {
    100
}

/// Settings for the AutoKeras wrapper, kept only when the wrapper is in
/// `model_list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AutoKerasConfig {
    /// Training epochs per candidate architecture.
    #[serde(default = "default_n_epochs")]
    pub n_epochs: u32,
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,
    /// Candidate architectures to try.
    #[serde(default = "default_max_trials")]
    pub max_trials: u32,
}

impl Default for AutoKerasConfig {
    fn default() -> Self {
        Self {
            n_epochs: 100,
            batch_size: 32,
            max_trials: 10,
        }
    }
}

/// Settings for the AutoLGBM wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AutoLgbmConfig {
    /// Tuning trials for the wrapper's internal search.
    #[serde(default = "default_n_trials")]
    pub n_trials: u32,
    /// Wall-clock budget in seconds; null means unbounded.
    #[serde(default)]
    pub timeout: Option<u32>,
    #[serde(default)]
    pub verbose: bool,
}

impl Default for AutoLgbmConfig {
    fn default() -> Self {
        Self {
            n_trials: 100,
            timeout: None,
            verbose: false,
        }
    }
}

/// Settings for the AutoXGBoost wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AutoXgboostConfig {
    #[serde(default = "default_n_trials")]
    pub n_trials: u32,
    #[serde(default)]
    pub timeout: Option<u32>,
    #[serde(default)]
    pub verbose: bool,
}

impl Default for AutoXgboostConfig {
    fn default() -> Self {
        Self {
            n_trials: 100,
            timeout: None,
            verbose: false,
        }
    }
}

fn default_seed() -> u64 {
    29292
}

fn default_test_size() -> f64 {
    0.2
}

fn default_hyper_budget() -> Option<u32> {
    Some(50)
}

fn default_true() -> bool {
    true
}

fn default_autokeras() -> Option<AutoKerasConfig> {
    Some(AutoKerasConfig::default())
}

fn default_autolgbm() -> Option<AutoLgbmConfig> {
    Some(AutoLgbmConfig::default())
}

fn default_autoxgboost() -> Option<AutoXgboostConfig> {
    Some(AutoXgboostConfig::default())
}

fn default_feature_selection() -> Option<FeatureSelectionConfig> {
    Some(FeatureSelectionConfig::default())
}

/// Machine-learning settings for the job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MlConfig {
    /// Random seed, for reproducible runs.
    #[serde(default = "default_seed")]
    pub seed_num: u64,
    /// Fraction of the data held out for testing.
    #[serde(default = "default_test_size")]
    pub test_size: f64,
    pub problem_type: ProblemType,
    #[serde(default)]
    pub hyper_tuning: HyperTuning,
    /// Search budget, only used with random tuning.
    #[serde(default = "default_hyper_budget")]
    pub hyper_budget: Option<u32>,
    /// Whether the train/test split is stratified by a group column.
    #[serde(default)]
    pub stratify_by_groups: YesNo,
    /// Column to stratify the groups by.
    #[serde(default)]
    pub groups: Option<String>,
    #[serde(default = "default_true")]
    pub standardize: bool,
    #[serde(default)]
    pub balancing: Balancing,
    /// Metric the models optimise during training.
    #[serde(default)]
    pub fit_scorer: Option<String>,
    /// Metrics calculated for evaluation.
    #[serde(default)]
    pub scorer_list: Vec<String>,
    /// Models to train in this job.
    pub model_list: Vec<String>,
    #[serde(default)]
    pub encoding: Option<Encoding>,
    #[serde(default = "default_autokeras", skip_serializing_if = "Option::is_none")]
    pub autokeras_config: Option<AutoKerasConfig>,
    #[serde(default = "default_autolgbm", skip_serializing_if = "Option::is_none")]
    pub autolgbm_config: Option<AutoLgbmConfig>,
    #[serde(default = "default_autoxgboost", skip_serializing_if = "Option::is_none")]
    pub autoxgboost_config: Option<AutoXgboostConfig>,
    /// Feature-selection settings; null disables feature selection.
    #[serde(default = "default_feature_selection", skip_serializing_if = "Option::is_none")]
    pub feature_selection: Option<FeatureSelectionConfig>,
}

impl MlConfig {
    fn validate_fields(&self, ctx: &ResolveContext<'_>) -> Result<()> {
        if !(0.0..=1.0).contains(&self.test_size) || !self.test_size.is_finite() {
            return Err(ConfigError::field(
                "ml.test_size",
                format!("must be within [0, 1], got {}", self.test_size),
            ));
        }
        if self.model_list.is_empty() {
            return Err(ConfigError::field("ml.model_list", "must not be empty"));
        }
        for model in &self.model_list {
            if !ctx.registries.models.is_known(model) {
                return Err(ConfigError::field(
                    "ml.model_list",
                    format!("unknown model '{model}'"),
                ));
            }
        }
        if let Some(scorer) = &self.fit_scorer {
            if !ctx.registries.metrics.is_known(scorer) {
                return Err(ConfigError::field(
                    "ml.fit_scorer",
                    format!("unknown metric '{scorer}'"),
                ));
            }
        }
        for scorer in &self.scorer_list {
            if !ctx.registries.metrics.is_known(scorer) {
                return Err(ConfigError::field(
                    "ml.scorer_list",
                    format!("unknown metric '{scorer}'"),
                ));
            }
        }
        for (field, value) in [
            ("ml.autokeras_config.n_epochs", self.autokeras_config.as_ref().map(|c| c.n_epochs)),
            ("ml.autokeras_config.batch_size", self.autokeras_config.as_ref().map(|c| c.batch_size)),
            ("ml.autokeras_config.max_trials", self.autokeras_config.as_ref().map(|c| c.max_trials)),
            ("ml.autolgbm_config.n_trials", self.autolgbm_config.as_ref().map(|c| c.n_trials)),
            ("ml.autoxgboost_config.n_trials", self.autoxgboost_config.as_ref().map(|c| c.n_trials)),
        ] {
            if value == Some(0) {
                return Err(ConfigError::field(field, "must be a positive integer"));
            }
        }
        Ok(())
    }

    /// Cross-field pass over the ML section: tuning-budget pruning, scorer
    /// defaulting, registry subset checks, encoding pruning, estimator
    /// sub-config pruning, and finally feature-selection resolution with
    /// the problem type threaded down.
    pub fn resolve(mut self, ctx: &ResolveContext<'_>) -> Result<Self> {
        self.validate_fields(ctx)?;
        let problem_type = self.problem_type;
        let ctx = ctx.clone().with_problem_type(problem_type);
        let registries = ctx.registries;

        // Grid search enumerates the whole space; a budget is meaningless.
        if self.hyper_tuning == HyperTuning::Grid {
            self.hyper_budget = None;
        }

        let fit_scorer = match self.fit_scorer.take() {
            None => match problem_type {
                ProblemType::Classification => "f1_score".to_string(),
                ProblemType::Regression => "mean_absolute_percentage_error".to_string(),
            },
            Some(scorer) => {
                if registries.metrics.direction(problem_type, &scorer).is_none() {
                    return Err(ConfigError::incompatible(
                        "ml.fit_scorer",
                        &scorer,
                        format!("{problem_type} problems"),
                        registries.metrics.names_for(problem_type),
                    ));
                }
                scorer
            }
        };

        if self.scorer_list.is_empty() {
            self.scorer_list = vec![fit_scorer.clone()];
        } else {
            let invalid: Vec<&str> = self
                .scorer_list
                .iter()
                .map(String::as_str)
                .filter(|s| registries.metrics.direction(problem_type, s).is_none())
                .collect();
            if !invalid.is_empty() {
                return Err(ConfigError::incompatible(
                    "ml.scorer_list",
                    invalid.join(", "),
                    format!("{problem_type} problems"),
                    registries.metrics.names_for(problem_type),
                ));
            }
        }
        self.fit_scorer = Some(fit_scorer);

        let selectable = registries.models.selectable_for(problem_type);
        let invalid: Vec<&str> = self
            .model_list
            .iter()
            .map(String::as_str)
            .filter(|m| !selectable.contains(*m))
            .collect();
        if !invalid.is_empty() {
            return Err(ConfigError::incompatible(
                "ml.model_list",
                invalid.join(", "),
                format!("{problem_type} problems"),
                selectable,
            ));
        }

        if problem_type == ProblemType::Regression {
            self.encoding = None;
        }

        // Estimator sub-configs survive only for selected wrappers.
        if !self.model_list.iter().any(|m| m == "AutoKeras") {
            self.autokeras_config = None;
        }
        if !self.model_list.iter().any(|m| m == "AutoLGBM") {
            self.autolgbm_config = None;
        }
        if !self.model_list.iter().any(|m| m == "AutoXGBoost") {
            self.autoxgboost_config = None;
        }

        if let Some(feature_selection) = self.feature_selection.take() {
            self.feature_selection = Some(feature_selection.resolve(&ctx)?);
        }

        Ok(self)
    }
}
