//! Feature-selection registries: the method names the selector stage
//! implements and the k-best scoring functions with the problem type each
//! one applies to.

use super::ProblemType;
use std::collections::{BTreeMap, BTreeSet};

/// Method names that gate sibling fields in the method sub-config.
pub const SELECT_K_BEST: &str = "SelectKBest";
pub const RFE: &str = "RFE";

const FS_METHODS: &[&str] = &[RFE, SELECT_K_BEST];

// Each k-best scoring function is applicable to exactly one problem type.
const KBEST_METRICS: &[(&str, ProblemType)] = &[
    ("f_classif", ProblemType::Classification),
    ("f_regression", ProblemType::Regression),
    ("mutual_info_classif", ProblemType::Classification),
    ("mutual_info_regression", ProblemType::Regression),
];

/// Registered feature-selection methods and the k-best metric
/// compatibility table.
#[derive(Debug)]
pub struct SelectionRegistry {
    methods: BTreeSet<&'static str>,
    kbest_metrics: BTreeMap<&'static str, ProblemType>,
}

impl SelectionRegistry {
    pub fn builtin() -> Self {
        Self {
            methods: FS_METHODS.iter().copied().collect(),
            kbest_metrics: KBEST_METRICS.iter().copied().collect(),
        }
    }

    pub fn methods(&self) -> &BTreeSet<&'static str> {
        &self.methods
    }

    pub fn is_method(&self, name: &str) -> bool {
        self.methods.contains(name)
    }

    /// Membership in the full k-best metric set, regardless of problem type.
    pub fn is_kbest_metric(&self, name: &str) -> bool {
        self.kbest_metrics.contains_key(name)
    }

    /// The problem type a k-best metric applies to, or None if unregistered.
    pub fn kbest_metric_problem(&self, name: &str) -> Option<ProblemType> {
        self.kbest_metrics.get(name).copied()
    }

    /// K-best metrics applicable to the given problem type.
    pub fn kbest_metrics_for(
        &self,
        problem_type: ProblemType,
    ) -> impl Iterator<Item = &'static str> + '_ {
        self.kbest_metrics
            .iter()
            .filter(move |(_, p)| **p == problem_type)
            .map(|(name, _)| *name)
    }

    /// Default k-best metric for the given problem type.
    pub fn default_kbest_metric(&self, problem_type: ProblemType) -> &'static str {
        match problem_type {
            ProblemType::Classification => "f_classif",
            ProblemType::Regression => "f_regression",
        }
    }
}
