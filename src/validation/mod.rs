//! # Validation
//!
//! Validators for DataProtectionApplication resources.
//!
//! - `application` - top-level pass over one resource
//! - `plugins` - default plugin credential secrets
//! - `backup_locations` / `snapshot_locations` - provider-specific location rules
//! - `resources` - velero and node agent resource requirements
//!
//! ```rust,no_run
//! # async fn run(store: &dpa_validator::store::InMemoryStore) {
//! use dpa_validator::store::ResourceKey;
//! use dpa_validator::validation::validate_data_protection_application;
//!
//! let key = ResourceKey::new("openshift-adp", "dpa");
//! match validate_data_protection_application(&key, store, store).await {
//!     Ok(()) => println!("valid"),
//!     Err(e) => println!("invalid: {e}"),
//! }
//! # }
//! ```

mod application;
pub mod backup_locations;
mod error;
pub mod plugins;
mod quantity;
pub mod resources;
pub mod snapshot_locations;

pub use application::DpaValidator;
pub use error::{ValidationError, ValidationErrorKind};
pub use quantity::validate_quantity;

use crate::store::{ConfigurationStore, ResourceKey, SecretStore};
use tracing::{info_span, Span};

/// Resource under validation and the span its pass is recorded in
#[derive(Debug, Clone)]
pub struct ValidationContext {
    pub key: ResourceKey,
    span: Span,
}

impl ValidationContext {
    pub fn new(key: ResourceKey) -> Self {
        let span = info_span!(
            "validate",
            resource.kind = "DataProtectionApplication",
            resource.namespace = %key.namespace,
            resource.name = %key.name,
        );
        Self { key, span }
    }

    #[must_use]
    pub fn span(&self) -> &Span {
        &self.span
    }
}

/// Validate one DataProtectionApplication
///
/// Convenience wrapper around [`DpaValidator`] for callers that do not keep
/// a validator around.
pub async fn validate_data_protection_application(
    key: &ResourceKey,
    configs: &dyn ConfigurationStore,
    secrets: &dyn SecretStore,
) -> Result<(), ValidationError> {
    DpaValidator::new(ValidationContext::new(key.clone()), configs, secrets)
        .validate()
        .await
}
