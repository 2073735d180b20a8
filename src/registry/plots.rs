//! Plot catalogs: which plots the reporting stage can draw, split into a
//! shared catalog and one per problem type.

use super::ProblemType;
use std::collections::BTreeSet;

const PLOTS_BOTH: &[&str] = &["barplot_scorer", "boxplot_scorer", "shap_plots", "permut_imp_test"];
const PLOTS_CLF: &[&str] = &["conf_matrix", "roc_curve"];
const PLOTS_REG: &[&str] = &["hist_overlapped", "joint", "joint_dens", "corr"];

/// Plot names that gate sibling fields in the plotting section.
pub const SHAP_PLOTS: &str = "shap_plots";
pub const PERMUT_IMP_TEST: &str = "permut_imp_test";

/// The three disjoint plot catalogs.
#[derive(Debug)]
pub struct PlotCatalog {
    both: BTreeSet<&'static str>,
    classification: BTreeSet<&'static str>,
    regression: BTreeSet<&'static str>,
}

impl PlotCatalog {
    pub fn builtin() -> Self {
        Self {
            both: PLOTS_BOTH.iter().copied().collect(),
            classification: PLOTS_CLF.iter().copied().collect(),
            regression: PLOTS_REG.iter().copied().collect(),
        }
    }

    /// Plots valid for the given problem type: the shared catalog plus the
    /// problem-type-specific one.
    pub fn valid_for(&self, problem_type: ProblemType) -> BTreeSet<&'static str> {
        let specific = match problem_type {
            ProblemType::Classification => &self.classification,
            ProblemType::Regression => &self.regression,
        };
        self.both.union(specific).copied().collect()
    }

    /// Membership in the union of all three catalogs.
    pub fn is_known(&self, name: &str) -> bool {
        self.both.contains(name)
            || self.classification.contains(name)
            || self.regression.contains(name)
    }
}
