//! Capability registries consumed by the configuration resolver.
//!
//! The registries map each problem type to the models, metrics and plots
//! the pipeline can actually provide. They are loaded once at process
//! start, never mutated afterwards, and passed by reference into every
//! resolution pass; node logic never reaches for globals.

pub mod metrics;
pub mod models;
pub mod plots;
pub mod selection;

pub use metrics::MetricRegistry;
pub use models::ModelRegistry;
pub use plots::PlotCatalog;
pub use selection::SelectionRegistry;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// The top-level dichotomy governing which models, metrics and plots are
/// valid for a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProblemType {
    Classification,
    Regression,
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemType::Classification => write!(f, "classification"),
            ProblemType::Regression => write!(f, "regression"),
        }
    }
}

/// Immutable snapshot of every capability registry.
#[derive(Debug)]
pub struct Registries {
    pub models: ModelRegistry,
    pub metrics: MetricRegistry,
    pub plots: PlotCatalog,
    pub selection: SelectionRegistry,
}

impl Registries {
    /// Build a snapshot of the built-in registries.
    pub fn new() -> Self {
        Self {
            models: ModelRegistry::builtin(),
            metrics: MetricRegistry::builtin(),
            plots: PlotCatalog::builtin(),
            selection: SelectionRegistry::builtin(),
        }
    }

    /// Process-wide snapshot, initialized on first use and shared
    /// read-only across concurrent loads.
    pub fn builtin() -> &'static Registries {
        static BUILTIN: OnceLock<Registries> = OnceLock::new();
        BUILTIN.get_or_init(Registries::new)
    }
}

impl Default for Registries {
    fn default() -> Self {
        Self::new()
    }
}
