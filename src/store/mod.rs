//! # Stores
//!
//! Read-only access to the resources the validator consumes.
//!
//! Each store implements one or both of:
//! - `ConfigurationStore` for DataProtectionApplication and CloudStorage resources
//! - `SecretStore` for provider credential secrets
//!
//! Two implementations ship with the crate: `KubeStore` reads from the cluster,
//! `InMemoryStore` serves fixtures (tests, offline validation) and can be
//! filled from YAML manifests.

use crate::crd::{CloudStorage, DataProtectionApplication};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use std::fmt;
use thiserror::Error;

mod cluster;
mod manifest;
mod memory;

pub use cluster::KubeStore;
pub use manifest::LoadedManifests;
pub use memory::InMemoryStore;

/// Namespace and name of a namespaced resource
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceKey {
    pub namespace: String,
    pub name: String,
}

impl ResourceKey {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Key of another resource in the same namespace
    #[must_use]
    pub fn sibling(&self, name: impl Into<String>) -> Self {
        Self::new(self.namespace.clone(), name)
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} {key} not found")]
    NotFound { kind: &'static str, key: ResourceKey },
    #[error("failed to get {kind} {key}: {source}")]
    Kube {
        kind: &'static str,
        key: ResourceKey,
        #[source]
        source: kube::Error,
    },
}

impl StoreError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Source of the configuration resources
#[async_trait]
pub trait ConfigurationStore: Send + Sync {
    /// Read the current DataProtectionApplication
    async fn get_data_protection_application(
        &self,
        key: &ResourceKey,
    ) -> Result<DataProtectionApplication, StoreError>;

    /// Read a CloudStorage bucket resource
    async fn get_cloud_storage(&self, key: &ResourceKey) -> Result<CloudStorage, StoreError>;
}

/// Source of provider credential secrets
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Read a secret; a missing secret is an error
    async fn get_secret(&self, key: &ResourceKey) -> Result<Secret, StoreError>;
}
