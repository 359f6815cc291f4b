//! # Validation Errors
//!
//! Every check is fail-fast: the first violation becomes the error returned
//! for the whole validation pass.

use crate::store::StoreError;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    /// The resource or a secret could not be read
    #[error(transparent)]
    Fetch(#[from] StoreError),

    /// Invalid field combination, missing block or empty required string
    #[error("{0}")]
    Structural(String),

    /// A referenced secret exists but has no data under the expected key
    #[error("Secret name {secret} is missing data for key {key}")]
    MissingCredential { secret: String, key: String },

    /// A referenced secret does not exist
    #[error("Secret name {secret} not found, expected data for key {key}")]
    MissingSecret { secret: String, key: String },

    /// Override key or value outside the allow-list
    #[error("unsupported override: {0}")]
    UnsupportedOverride(String),

    /// A resource request or limit is not a valid quantity
    #[error("invalid {workload} resource {field} '{value}': {reason}")]
    ResourceRequirements {
        workload: &'static str,
        field: String,
        value: String,
        reason: String,
    },
}

/// Taxonomy of validation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    Fetch,
    Structural,
    MissingCredential,
    UnsupportedOverride,
    ResourceRequirements,
}

impl ValidationErrorKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationErrorKind::Fetch => "fetch",
            ValidationErrorKind::Structural => "structural",
            ValidationErrorKind::MissingCredential => "missing-credential",
            ValidationErrorKind::UnsupportedOverride => "unsupported-override",
            ValidationErrorKind::ResourceRequirements => "resource-requirements",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ValidationError {
    pub fn structural(msg: impl fmt::Display) -> Self {
        Self::Structural(msg.to_string())
    }

    pub fn missing_credential(secret: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MissingCredential {
            secret: secret.into(),
            key: key.into(),
        }
    }

    /// Classify a failed secret read: an absent secret is a missing
    /// credential, any other store failure stays a fetch error
    pub fn secret_lookup(
        error: StoreError,
        secret: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        if error.is_not_found() {
            Self::MissingSecret {
                secret: secret.into(),
                key: key.into(),
            }
        } else {
            Self::Fetch(error)
        }
    }

    #[must_use]
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            ValidationError::Fetch(_) => ValidationErrorKind::Fetch,
            ValidationError::Structural(_) => ValidationErrorKind::Structural,
            ValidationError::MissingCredential { .. } | ValidationError::MissingSecret { .. } => {
                ValidationErrorKind::MissingCredential
            }
            ValidationError::UnsupportedOverride(_) => ValidationErrorKind::UnsupportedOverride,
            ValidationError::ResourceRequirements { .. } => {
                ValidationErrorKind::ResourceRequirements
            }
        }
    }
}
