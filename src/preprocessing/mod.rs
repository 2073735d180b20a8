//! Preprocessing collaborators exposed to the pipeline.
//!
//! Only the variance-based pre-filter lives here; the heavier selection
//! methods (k-best, RFE) run in the training stage and are configured, not
//! implemented, by this crate.

mod variance;

pub use variance::{variance_removal, VarianceSelector};
