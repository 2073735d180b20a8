//! Feature-selection section: the selection method, its knobs, and the
//! automated feature-count search.

use super::ResolveContext;
use crate::error::{ConfigError, Result};
use crate::registry::metrics::LOWER_IS_BETTER;
use crate::registry::selection::{RFE, SELECT_K_BEST};
use serde::{Deserialize, Serialize};

/// Number of features to keep: a fixed positive count or `"auto"` to
/// search for the best count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FeatureCountRepr", into = "FeatureCountRepr")]
pub enum FeatureCount {
    Auto,
    Fixed(u64),
}

impl Default for FeatureCount {
    fn default() -> Self {
        FeatureCount::Auto
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum FeatureCountRepr {
    Count(u64),
    Keyword(String),
}

impl TryFrom<FeatureCountRepr> for FeatureCount {
    type Error = String;

    fn try_from(repr: FeatureCountRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            FeatureCountRepr::Count(0) => {
                Err("must be a positive integer or \"auto\"".to_string())
            }
            FeatureCountRepr::Count(n) => Ok(FeatureCount::Fixed(n)),
            FeatureCountRepr::Keyword(s) if s == "auto" => Ok(FeatureCount::Auto),
            FeatureCountRepr::Keyword(s) => {
                Err(format!("must be a positive integer or \"auto\", got \"{s}\""))
            }
        }
    }
}

impl From<FeatureCount> for FeatureCountRepr {
    fn from(k: FeatureCount) -> Self {
        match k {
            FeatureCount::Auto => FeatureCountRepr::Keyword("auto".to_string()),
            FeatureCount::Fixed(n) => FeatureCountRepr::Count(n),
        }
    }
}

fn default_min_features() -> u64 {
    10
}

fn default_interval() -> u64 {
    1
}

fn default_low() -> bool {
    true
}

/// Automated feature-count search: iterate candidate feature-set sizes
/// and keep the count that evaluates best with the chosen estimator and
/// metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AutoConfig {
    /// Smallest feature count to consider.
    #[serde(default = "default_min_features")]
    pub min_features: u64,
    /// Largest feature count to consider; defaults to the dataset width.
    #[serde(default)]
    pub max_features: Option<u64>,
    /// Size of the logarithmic increments between candidate counts.
    #[serde(default = "default_interval")]
    pub interval: u64,
    /// Estimator used to evaluate each candidate feature set.
    #[serde(default)]
    pub eval_model: Option<String>,
    /// Metric used to score the evaluation estimator.
    #[serde(default)]
    pub eval_metric: Option<String>,
    /// Whether a lower metric value is better. Derived from the metric
    /// registry during resolution; any supplied value is overwritten.
    #[serde(default = "default_low")]
    pub low: bool,
}

impl Default for AutoConfig {
    fn default() -> Self {
        Self {
            min_features: default_min_features(),
            max_features: None,
            interval: default_interval(),
            eval_model: None,
            eval_metric: None,
            low: default_low(),
        }
    }
}

impl AutoConfig {
    fn validate_fields(&self, ctx: &ResolveContext<'_>) -> Result<()> {
        if self.min_features == 0 {
            return Err(ConfigError::field(
                "feature_selection.auto.min_features",
                "must be a positive integer",
            ));
        }
        if self.max_features == Some(0) {
            return Err(ConfigError::field(
                "feature_selection.auto.max_features",
                "must be a positive integer or null",
            ));
        }
        if self.interval == 0 {
            return Err(ConfigError::field(
                "feature_selection.auto.interval",
                "must be a positive integer",
            ));
        }
        if let Some(model) = &self.eval_model {
            if !ctx.registries.models.is_known(model) {
                return Err(ConfigError::field(
                    "feature_selection.auto.eval_model",
                    format!("unknown model '{model}'"),
                ));
            }
        }
        if let Some(metric) = &self.eval_metric {
            if !ctx.registries.metrics.is_known(metric) {
                return Err(ConfigError::field(
                    "feature_selection.auto.eval_metric",
                    format!("unknown metric '{metric}'"),
                ));
            }
        }
        Ok(())
    }

    /// Defaulting and compatibility checks against the problem type, plus
    /// derivation of `low` from the metric's registered direction.
    pub fn resolve(mut self, ctx: &ResolveContext<'_>) -> Result<Self> {
        let problem_type = ctx.require_problem_type()?;
        self.validate_fields(ctx)?;
        let registries = ctx.registries;

        let eval_model = match self.eval_model.take() {
            None => registries.models.default_estimator(problem_type).to_string(),
            Some(model) => {
                if !registries.models.for_problem(problem_type).contains(model.as_str()) {
                    return Err(ConfigError::incompatible(
                        "feature_selection.auto.eval_model",
                        &model,
                        format!("{problem_type} problems"),
                        registries.models.for_problem(problem_type),
                    ));
                }
                model
            }
        };

        let eval_metric = match self.eval_metric.take() {
            None => match problem_type {
                crate::registry::ProblemType::Classification => "f1_score".to_string(),
                crate::registry::ProblemType::Regression => "mean_squared_error".to_string(),
            },
            Some(metric) => {
                if registries.metrics.direction(problem_type, &metric).is_none() {
                    return Err(ConfigError::incompatible(
                        "feature_selection.auto.eval_metric",
                        &metric,
                        format!("{problem_type} problems"),
                        registries.metrics.names_for(problem_type),
                    ));
                }
                metric
            }
        };

        self.low = registries.metrics.direction(problem_type, &eval_metric)
            == Some(LOWER_IS_BETTER);
        self.eval_model = Some(eval_model);
        self.eval_metric = Some(eval_metric);
        Ok(self)
    }
}

fn default_method_name() -> String {
    SELECT_K_BEST.to_string()
}

/// The feature-selection method and its method-specific inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodConfig {
    /// Registered feature-selection method to use.
    #[serde(default = "default_method_name")]
    pub name: String,
    /// Scoring metric, required by k-best selection.
    #[serde(default)]
    pub metric: Option<String>,
    /// Ranking estimator, required by recursive feature elimination.
    #[serde(default)]
    pub estimator: Option<String>,
}

impl Default for MethodConfig {
    fn default() -> Self {
        Self {
            name: default_method_name(),
            metric: None,
            estimator: None,
        }
    }
}

impl MethodConfig {
    fn validate_fields(&self, ctx: &ResolveContext<'_>) -> Result<()> {
        let registries = ctx.registries;
        if !registries.selection.is_method(&self.name) {
            return Err(ConfigError::field(
                "feature_selection.method.name",
                format!(
                    "unknown method '{}'; registered methods: [{}]",
                    self.name,
                    registries
                        .selection
                        .methods()
                        .iter()
                        .copied()
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            ));
        }
        if let Some(metric) = &self.metric {
            if !registries.selection.is_kbest_metric(metric) {
                return Err(ConfigError::field(
                    "feature_selection.method.metric",
                    format!("unknown k-best metric '{metric}'"),
                ));
            }
        }
        if let Some(estimator) = &self.estimator {
            if !registries.models.is_known(estimator) {
                return Err(ConfigError::field(
                    "feature_selection.method.estimator",
                    format!("unknown model '{estimator}'"),
                ));
            }
        }
        Ok(())
    }

    /// Method-specific defaulting and compatibility checks. K-best metric
    /// compatibility is looked up in an explicit table rather than
    /// inferred from the metric's name.
    pub fn resolve(mut self, ctx: &ResolveContext<'_>) -> Result<Self> {
        let problem_type = ctx.require_problem_type()?;
        self.validate_fields(ctx)?;
        let registries = ctx.registries;

        if self.name == SELECT_K_BEST {
            let metric = self
                .metric
                .take()
                .unwrap_or_else(|| registries.selection.default_kbest_metric(problem_type).to_string());
            if registries.selection.kbest_metric_problem(&metric) != Some(problem_type) {
                return Err(ConfigError::incompatible(
                    "feature_selection.method.metric",
                    &metric,
                    format!("{problem_type} problems"),
                    registries.selection.kbest_metrics_for(problem_type),
                ));
            }
            self.metric = Some(metric);
        }

        if self.name == RFE {
            let estimator = self
                .estimator
                .take()
                .unwrap_or_else(|| registries.models.default_estimator(problem_type).to_string());
            if !registries.models.for_problem(problem_type).contains(estimator.as_str()) {
                return Err(ConfigError::incompatible(
                    "feature_selection.method.estimator",
                    &estimator,
                    format!("{problem_type} problems"),
                    registries.models.for_problem(problem_type),
                ));
            }
            self.estimator = Some(estimator);
        }

        Ok(self)
    }
}

fn default_auto() -> Option<AutoConfig> {
    Some(AutoConfig::default())
}

fn default_method() -> Option<MethodConfig> {
    Some(MethodConfig::default())
}

/// Feature-selection settings. A null section at the ML level disables
/// feature selection entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureSelectionConfig {
    /// Number of features to select, or `"auto"` to search for the best
    /// count.
    #[serde(default)]
    pub k: FeatureCount,
    /// Variance threshold applied before the method runs.
    #[serde(default)]
    pub var_threshold: f64,
    /// Settings for the automated feature-count search.
    #[serde(default = "default_auto")]
    pub auto: Option<AutoConfig>,
    /// Settings for the selection method itself.
    #[serde(default = "default_method")]
    pub method: Option<MethodConfig>,
}

impl Default for FeatureSelectionConfig {
    fn default() -> Self {
        Self {
            k: FeatureCount::default(),
            var_threshold: 0.0,
            auto: default_auto(),
            method: default_method(),
        }
    }
}

impl FeatureSelectionConfig {
    fn validate_fields(&self) -> Result<()> {
        if !self.var_threshold.is_finite() || self.var_threshold < 0.0 {
            return Err(ConfigError::field(
                "feature_selection.var_threshold",
                format!("must be a non-negative number, got {}", self.var_threshold),
            ));
        }
        Ok(())
    }

    /// Resolves the method first, pushes the RFE estimator into the auto
    /// search (the count search must evaluate with the same estimator RFE
    /// used to rank features), then resolves the auto search.
    pub fn resolve(mut self, ctx: &ResolveContext<'_>) -> Result<Self> {
        ctx.require_problem_type()?;
        self.validate_fields()?;

        if let Some(method) = self.method.take() {
            let method = method.resolve(ctx)?;
            if method.name == RFE {
                if let Some(auto) = self.auto.as_mut() {
                    auto.eval_model = method.estimator.clone();
                }
            }
            self.method = Some(method);
        }

        if let Some(auto) = self.auto.take() {
            self.auto = Some(auto.resolve(ctx)?);
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{ProblemType, Registries};

    fn ctx(problem_type: ProblemType) -> ResolveContext<'static> {
        ResolveContext::new(Registries::builtin()).with_problem_type(problem_type)
    }

    #[test]
    fn test_feature_count_parsing() {
        let k: FeatureCount = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(k, FeatureCount::Auto);
        let k: FeatureCount = serde_json::from_str("25").unwrap();
        assert_eq!(k, FeatureCount::Fixed(25));
        assert!(serde_json::from_str::<FeatureCount>("0").is_err());
        assert!(serde_json::from_str::<FeatureCount>("\"all\"").is_err());
    }

    #[test]
    fn test_kbest_metric_defaults_by_problem_type() {
        let method = MethodConfig::default()
            .resolve(&ctx(ProblemType::Classification))
            .unwrap();
        assert_eq!(method.metric.as_deref(), Some("f_classif"));

        let method = MethodConfig::default()
            .resolve(&ctx(ProblemType::Regression))
            .unwrap();
        assert_eq!(method.metric.as_deref(), Some("f_regression"));
    }

    #[test]
    fn test_kbest_metric_incompatible_with_problem_type() {
        let method = MethodConfig {
            metric: Some("f_regression".to_string()),
            ..MethodConfig::default()
        };
        let err = method.resolve(&ctx(ProblemType::Classification)).unwrap_err();
        assert!(err.to_string().contains("f_regression"));
        assert!(err.to_string().contains("f_classif"));
    }

    #[test]
    fn test_rfe_estimator_defaults_and_checks() {
        let method = MethodConfig {
            name: RFE.to_string(),
            ..MethodConfig::default()
        };
        let resolved = method.resolve(&ctx(ProblemType::Regression)).unwrap();
        assert_eq!(resolved.estimator.as_deref(), Some("RandomForestRegressor"));

        let method = MethodConfig {
            name: RFE.to_string(),
            estimator: Some("SVC".to_string()),
            ..MethodConfig::default()
        };
        let err = method.resolve(&ctx(ProblemType::Regression)).unwrap_err();
        assert!(err.to_string().contains("SVC"));
    }

    #[test]
    fn test_rfe_estimator_propagates_to_auto_search() {
        let fs = FeatureSelectionConfig {
            method: Some(MethodConfig {
                name: RFE.to_string(),
                estimator: Some("GradientBoostingClassifier".to_string()),
                ..MethodConfig::default()
            }),
            ..FeatureSelectionConfig::default()
        };
        let resolved = fs.resolve(&ctx(ProblemType::Classification)).unwrap();
        assert_eq!(
            resolved.auto.unwrap().eval_model.as_deref(),
            Some("GradientBoostingClassifier")
        );
    }

    #[test]
    fn test_auto_defaults_and_low_derivation() {
        let auto = AutoConfig::default()
            .resolve(&ctx(ProblemType::Classification))
            .unwrap();
        assert_eq!(auto.eval_model.as_deref(), Some("RandomForestClassifier"));
        assert_eq!(auto.eval_metric.as_deref(), Some("f1_score"));
        assert!(!auto.low);

        let auto = AutoConfig::default()
            .resolve(&ctx(ProblemType::Regression))
            .unwrap();
        assert_eq!(auto.eval_metric.as_deref(), Some("mean_squared_error"));
        assert!(auto.low);
    }

    #[test]
    fn test_auto_low_follows_metric_direction() {
        let auto = AutoConfig {
            eval_metric: Some("r2_score".to_string()),
            ..AutoConfig::default()
        };
        let resolved = auto.resolve(&ctx(ProblemType::Regression)).unwrap();
        assert!(!resolved.low);
    }

    #[test]
    fn test_auto_eval_model_rejects_wrapper_models() {
        let auto = AutoConfig {
            eval_model: Some("AutoKeras".to_string()),
            ..AutoConfig::default()
        };
        let err = auto.resolve(&ctx(ProblemType::Classification)).unwrap_err();
        assert!(matches!(err, ConfigError::Incompatible { .. }));
    }

    #[test]
    fn test_auto_positive_int_checks() {
        let auto = AutoConfig {
            interval: 0,
            ..AutoConfig::default()
        };
        let err = auto.resolve(&ctx(ProblemType::Classification)).unwrap_err();
        assert!(err.to_string().contains("interval"));
    }

    #[test]
    fn test_negative_var_threshold_rejected() {
        let fs = FeatureSelectionConfig {
            var_threshold: -0.5,
            ..FeatureSelectionConfig::default()
        };
        let err = fs.resolve(&ctx(ProblemType::Classification)).unwrap_err();
        assert!(err.to_string().contains("var_threshold"));
    }

    #[test]
    fn test_nulled_subsections_stay_null() {
        let fs: FeatureSelectionConfig = serde_json::from_value(serde_json::json!({
            "k": 10,
            "auto": null,
            "method": null,
        }))
        .unwrap();
        let resolved = fs.resolve(&ctx(ProblemType::Classification)).unwrap();
        assert!(resolved.auto.is_none());
        assert!(resolved.method.is_none());
    }
}
