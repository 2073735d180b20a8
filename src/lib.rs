//! Autoomics - Configuration validation for an omics AutoML pipeline
//!
//! This crate ingests a hierarchical job specification (data source, ML
//! strategy, feature selection, plotting, prediction) and validates it
//! into a single consistent, fully-resolved configuration object before
//! the pipeline runs.
//!
//! # Modules
//!
//! - [`config`] - Job configuration tree and the cross-field resolution engine
//! - [`registry`] - Read-only capability registries (models, metrics, plots)
//! - [`preprocessing`] - Variance-based feature pre-filter
//! - [`error`] - Error types
//! - [`cli`] - Command-line interface

// Core error handling
pub mod error;

// Configuration tree and resolution
pub mod config;
pub mod registry;

// Preprocessing collaborators
pub mod preprocessing;

// Services
pub mod cli;

pub use error::{ConfigError, Result};

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{ConfigError, Result};

    // Configuration tree
    pub use crate::config::{
        load_config, resolve_from_str, DataConfig, DataType, FeatureCount,
        FeatureSelectionConfig, MlConfig, PlottingConfig, PredictionConfig, ResolveContext,
        RunConfig,
    };

    // Registries
    pub use crate::registry::{ProblemType, Registries};

    // Preprocessing
    pub use crate::preprocessing::{variance_removal, VarianceSelector};
}
