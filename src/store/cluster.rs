//! # Kubernetes Store
//!
//! Reads resources through the Kubernetes API.

use super::{ConfigurationStore, ResourceKey, SecretStore, StoreError};
use crate::crd::{CloudStorage, DataProtectionApplication};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::NamespaceResourceScope;
use kube::{Api, Client, Resource};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Store backed by a Kubernetes client
#[derive(Clone)]
pub struct KubeStore {
    client: Client,
}

impl std::fmt::Debug for KubeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeStore").finish_non_exhaustive()
    }
}

impl KubeStore {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn get_namespaced<K>(
        &self,
        kind: &'static str,
        key: &ResourceKey,
    ) -> Result<K, StoreError>
    where
        K: Resource<Scope = NamespaceResourceScope, DynamicType = ()>
            + Clone
            + DeserializeOwned
            + std::fmt::Debug,
    {
        debug!("Getting {} {}", kind, key);
        let api: Api<K> = Api::namespaced(self.client.clone(), &key.namespace);
        match api.get(&key.name).await {
            Ok(resource) => Ok(resource),
            Err(kube::Error::Api(api_err)) if api_err.code == 404 => Err(StoreError::NotFound {
                kind,
                key: key.clone(),
            }),
            Err(source) => Err(StoreError::Kube {
                kind,
                key: key.clone(),
                source,
            }),
        }
    }
}

#[async_trait]
impl ConfigurationStore for KubeStore {
    async fn get_data_protection_application(
        &self,
        key: &ResourceKey,
    ) -> Result<DataProtectionApplication, StoreError> {
        self.get_namespaced("DataProtectionApplication", key).await
    }

    async fn get_cloud_storage(&self, key: &ResourceKey) -> Result<CloudStorage, StoreError> {
        self.get_namespaced("CloudStorage", key).await
    }
}

#[async_trait]
impl SecretStore for KubeStore {
    async fn get_secret(&self, key: &ResourceKey) -> Result<Secret, StoreError> {
        self.get_namespaced("Secret", key).await
    }
}
