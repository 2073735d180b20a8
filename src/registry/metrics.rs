//! Metric registry: which scorers exist per problem type and whether a
//! lower or higher value is better.

use super::ProblemType;
use std::collections::BTreeMap;

/// Optimization direction of a metric: +1 when higher is better, -1 when
/// lower is better.
pub const HIGHER_IS_BETTER: i8 = 1;
pub const LOWER_IS_BETTER: i8 = -1;

const CLASSIFICATION_METRICS: &[(&str, i8)] = &[
    ("accuracy_score", HIGHER_IS_BETTER),
    ("f1_score", HIGHER_IS_BETTER),
    ("precision_score", HIGHER_IS_BETTER),
    ("recall_score", HIGHER_IS_BETTER),
    ("roc_auc_score", HIGHER_IS_BETTER),
];

const REGRESSION_METRICS: &[(&str, i8)] = &[
    ("explained_variance_score", HIGHER_IS_BETTER),
    ("mean_absolute_error", LOWER_IS_BETTER),
    ("mean_absolute_percentage_error", LOWER_IS_BETTER),
    ("mean_squared_error", LOWER_IS_BETTER),
    ("r2_score", HIGHER_IS_BETTER),
];

/// Mapping from problem type to metric name to optimization direction.
#[derive(Debug)]
pub struct MetricRegistry {
    classification: BTreeMap<&'static str, i8>,
    regression: BTreeMap<&'static str, i8>,
}

impl MetricRegistry {
    pub fn builtin() -> Self {
        Self {
            classification: CLASSIFICATION_METRICS.iter().copied().collect(),
            regression: REGRESSION_METRICS.iter().copied().collect(),
        }
    }

    /// Metrics valid for the given problem type.
    pub fn for_problem(&self, problem_type: ProblemType) -> &BTreeMap<&'static str, i8> {
        match problem_type {
            ProblemType::Classification => &self.classification,
            ProblemType::Regression => &self.regression,
        }
    }

    /// Registered names for the given problem type, in deterministic order.
    pub fn names_for(&self, problem_type: ProblemType) -> impl Iterator<Item = &'static str> + '_ {
        self.for_problem(problem_type).keys().copied()
    }

    /// Optimization direction, or None if the metric is not registered for
    /// the problem type.
    pub fn direction(&self, problem_type: ProblemType, name: &str) -> Option<i8> {
        self.for_problem(problem_type).get(name).copied()
    }

    /// Membership in the union of every registered metric name.
    pub fn is_known(&self, name: &str) -> bool {
        self.classification.contains_key(name) || self.regression.contains_key(name)
    }
}
