//! Model registry: which estimators exist for each problem type.

use super::ProblemType;
use std::collections::BTreeSet;

const CLASSIFICATION_MODELS: &[&str] = &[
    "AdaBoostClassifier",
    "GradientBoostingClassifier",
    "KNeighborsClassifier",
    "LogisticRegression",
    "RandomForestClassifier",
    "SVC",
];

const REGRESSION_MODELS: &[&str] = &[
    "AdaBoostRegressor",
    "GradientBoostingRegressor",
    "KNeighborsRegressor",
    "LinearRegression",
    "RandomForestRegressor",
    "SVR",
];

// AutoML wrappers that pick their own underlying estimator.
const BOTH_MODELS: &[&str] = &["AutoKeras", "AutoLGBM", "AutoXGBoost"];

/// Mapping from problem-type-or-"both" to the set of model names the
/// training engine can instantiate.
#[derive(Debug)]
pub struct ModelRegistry {
    classification: BTreeSet<&'static str>,
    regression: BTreeSet<&'static str>,
    both: BTreeSet<&'static str>,
}

impl ModelRegistry {
    pub fn builtin() -> Self {
        Self {
            classification: CLASSIFICATION_MODELS.iter().copied().collect(),
            regression: REGRESSION_MODELS.iter().copied().collect(),
            both: BOTH_MODELS.iter().copied().collect(),
        }
    }

    /// Models usable as a plain estimator for the given problem type.
    /// Excludes the AutoML wrappers: they cannot stand in where a single
    /// concrete estimator is required (RFE, auto-search evaluation).
    pub fn for_problem(&self, problem_type: ProblemType) -> &BTreeSet<&'static str> {
        match problem_type {
            ProblemType::Classification => &self.classification,
            ProblemType::Regression => &self.regression,
        }
    }

    /// Models selectable in `model_list` for the given problem type:
    /// the problem-type set plus the wrappers registered for both.
    pub fn selectable_for(&self, problem_type: ProblemType) -> BTreeSet<&'static str> {
        self.for_problem(problem_type)
            .union(&self.both)
            .copied()
            .collect()
    }

    /// Membership in the union of every registered model name, used for
    /// field-level checks before the problem type is consulted.
    pub fn is_known(&self, name: &str) -> bool {
        self.classification.contains(name)
            || self.regression.contains(name)
            || self.both.contains(name)
    }

    /// Default estimator for the given problem type.
    pub fn default_estimator(&self, problem_type: ProblemType) -> &'static str {
        match problem_type {
            ProblemType::Classification => "RandomForestClassifier",
            ProblemType::Regression => "RandomForestRegressor",
        }
    }
}
