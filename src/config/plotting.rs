//! Plotting section: which report plots to draw and their knobs.

use super::ResolveContext;
use crate::error::{ConfigError, Result};
use crate::registry::plots::{PERMUT_IMP_TEST, SHAP_PLOTS};
use serde::{Deserialize, Serialize};

/// Which data splits SHAP explanations are computed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExplanationsData {
    Test,
    Exemplars,
    All,
}

fn default_top_feats() -> Option<u32> {
    Some(20)
}

fn default_explanations_data() -> Option<ExplanationsData> {
    Some(ExplanationsData::All)
}

/// Plot selection for the reporting stage. Duplicate entries in
/// `plot_method` are allowed and order carries no meaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlottingConfig {
    /// Plots to be created.
    #[serde(default)]
    pub plot_method: Vec<String>,
    /// Top features shown in the permutation-importance plot.
    #[serde(rename = "top_feats_permImp", default = "default_top_feats")]
    pub top_feats_perm_imp: Option<u32>,
    /// Top features shown in the SHAP plots.
    #[serde(default = "default_top_feats")]
    pub top_feats_shap: Option<u32>,
    /// Data splits used for the SHAP calculations.
    #[serde(default = "default_explanations_data")]
    pub explanations_data: Option<ExplanationsData>,
}

impl Default for PlottingConfig {
    fn default() -> Self {
        Self {
            plot_method: Vec::new(),
            top_feats_perm_imp: default_top_feats(),
            top_feats_shap: default_top_feats(),
            explanations_data: default_explanations_data(),
        }
    }
}

impl PlottingConfig {
    fn validate_fields(&self, ctx: &ResolveContext<'_>) -> Result<()> {
        for name in &self.plot_method {
            if !ctx.registries.plots.is_known(name) {
                return Err(ConfigError::field(
                    "plotting.plot_method",
                    format!("unknown plot '{name}'"),
                ));
            }
        }
        for (field, value) in [
            ("plotting.top_feats_permImp", self.top_feats_perm_imp),
            ("plotting.top_feats_shap", self.top_feats_shap),
        ] {
            if value == Some(0) {
                return Err(ConfigError::field(field, "must be a positive integer"));
            }
        }
        Ok(())
    }

    /// Field checks, relevance pruning, then the subset check against the
    /// problem-type catalog. Invoked by the root, which owns the resolved
    /// problem type.
    pub fn resolve(mut self, ctx: &ResolveContext<'_>) -> Result<Self> {
        let problem_type = ctx.require_problem_type()?;
        self.validate_fields(ctx)?;

        if !self.plot_method.iter().any(|p| p == SHAP_PLOTS) {
            self.top_feats_shap = None;
            self.explanations_data = None;
        }
        if !self.plot_method.iter().any(|p| p == PERMUT_IMP_TEST) {
            self.top_feats_perm_imp = None;
        }

        let valid = ctx.registries.plots.valid_for(problem_type);
        let invalid: Vec<&str> = self
            .plot_method
            .iter()
            .map(String::as_str)
            .filter(|p| !valid.contains(p))
            .collect();
        if !invalid.is_empty() {
            return Err(ConfigError::incompatible(
                "plotting.plot_method",
                invalid.join(", "),
                format!("{problem_type} problems"),
                valid,
            ));
        }

        Ok(self)
    }
}
