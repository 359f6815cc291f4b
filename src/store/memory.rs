//! # In-Memory Store
//!
//! Fixture-backed store used by tests and by offline validation of manifests.

use super::{ConfigurationStore, ResourceKey, SecretStore, StoreError};
use crate::crd::{CloudStorage, DataProtectionApplication};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::ByteString;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    applications: HashMap<ResourceKey, DataProtectionApplication>,
    cloud_storages: HashMap<ResourceKey, CloudStorage>,
    secrets: HashMap<ResourceKey, Secret>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a DataProtectionApplication under its metadata namespace/name
    pub fn insert_data_protection_application(&mut self, dpa: DataProtectionApplication) {
        self.applications.insert(key_of(&dpa.metadata), dpa);
    }

    pub fn insert_cloud_storage(&mut self, cloud_storage: CloudStorage) {
        self.cloud_storages
            .insert(key_of(&cloud_storage.metadata), cloud_storage);
    }

    pub fn insert_secret(&mut self, secret: Secret) {
        self.secrets.insert(key_of(&secret.metadata), secret);
    }

    /// Store a secret built from string key/value pairs
    pub fn insert_secret_data<'a>(
        &mut self,
        key: &ResourceKey,
        data: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) {
        let data: BTreeMap<String, ByteString> = data
            .into_iter()
            .map(|(k, v)| (k.to_string(), ByteString(v.as_bytes().to_vec())))
            .collect();
        self.insert_secret(Secret {
            metadata: ObjectMeta {
                name: Some(key.name.clone()),
                namespace: Some(key.namespace.clone()),
                ..ObjectMeta::default()
            },
            data: Some(data),
            ..Secret::default()
        });
    }

    pub fn remove_secret(&mut self, key: &ResourceKey) -> Option<Secret> {
        self.secrets.remove(key)
    }
}

fn key_of(metadata: &ObjectMeta) -> ResourceKey {
    ResourceKey::new(
        metadata.namespace.clone().unwrap_or_default(),
        metadata.name.clone().unwrap_or_default(),
    )
}

fn not_found(kind: &'static str, key: &ResourceKey) -> StoreError {
    StoreError::NotFound {
        kind,
        key: key.clone(),
    }
}

#[async_trait]
impl ConfigurationStore for InMemoryStore {
    async fn get_data_protection_application(
        &self,
        key: &ResourceKey,
    ) -> Result<DataProtectionApplication, StoreError> {
        self.applications
            .get(key)
            .cloned()
            .ok_or_else(|| not_found("DataProtectionApplication", key))
    }

    async fn get_cloud_storage(&self, key: &ResourceKey) -> Result<CloudStorage, StoreError> {
        self.cloud_storages
            .get(key)
            .cloned()
            .ok_or_else(|| not_found("CloudStorage", key))
    }
}

#[async_trait]
impl SecretStore for InMemoryStore {
    async fn get_secret(&self, key: &ResourceKey) -> Result<Secret, StoreError> {
        self.secrets
            .get(key)
            .cloned()
            .ok_or_else(|| not_found("Secret", key))
    }
}
