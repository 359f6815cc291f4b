//! # Prelude
//!
//! Re-exports commonly used types and traits for convenience.
//!
//! ```rust
//! use dpa_validator::prelude::*;
//! ```

// CRD types
pub use crate::crd::*;

// Stores the validator reads from
pub use crate::store::{
    ConfigurationStore, InMemoryStore, KubeStore, ResourceKey, SecretStore, StoreError,
};

// Validation entry points
pub use crate::validation::{
    validate_data_protection_application, DpaValidator, ValidationContext, ValidationError,
    ValidationErrorKind,
};

// Config types
pub use crate::config::ValidatorConfig;
