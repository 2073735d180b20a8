//! Error types for configuration loading and resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or resolving a job configuration.
///
/// Every variant is terminal for the whole load: a single violated
/// constraint aborts resolution and no partially-resolved configuration
/// is ever returned.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A field failed its own type/range/membership check, independent of
    /// any other field.
    #[error("invalid `{field}`: {reason}")]
    Field { field: String, reason: String },

    /// A field value is valid in isolation but incompatible with a sibling
    /// discriminator (usually the problem type). The message enumerates
    /// the accepted set.
    #[error("invalid `{field}`: {value} is not valid for {context}; valid options: [{valid}]")]
    Incompatible {
        field: String,
        value: String,
        context: String,
        valid: String,
    },

    /// An internal call received state the enclosing schema should have
    /// made impossible. Indicates a defect in the calling node, not bad
    /// user input.
    #[error("internal invariant violated: {0}")]
    Invariant(String),

    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Field-shape error with the field path and the violated constraint.
    pub fn field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Field {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Cross-field consistency error naming the offending value and the
    /// accepted set for the given context.
    pub fn incompatible<I, S>(
        field: impl Into<String>,
        value: impl AsRef<str>,
        context: impl Into<String>,
        valid: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let valid = valid
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self::Incompatible {
            field: field.into(),
            value: value.as_ref().to_string(),
            context: context.into(),
            valid,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incompatible_message_enumerates_valid_set() {
        let err = ConfigError::incompatible(
            "ml.fit_scorer",
            "r2_score",
            "classification problems",
            ["accuracy_score", "f1_score"],
        );
        let msg = err.to_string();
        assert!(msg.contains("ml.fit_scorer"));
        assert!(msg.contains("r2_score"));
        assert!(msg.contains("accuracy_score, f1_score"));
    }

    #[test]
    fn test_field_message_names_field() {
        let err = ConfigError::field("ml.test_size", "must be within [0, 1], got 1.5");
        assert_eq!(
            err.to_string(),
            "invalid `ml.test_size`: must be within [0, 1], got 1.5"
        );
    }
}
