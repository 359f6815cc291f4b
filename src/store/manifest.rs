//! # Manifest Loading
//!
//! Fills an [`InMemoryStore`] from multi-document YAML.
//!
//! Recognized kinds are `DataProtectionApplication`, `CloudStorage` and
//! `Secret`; other documents are skipped. Documents without a namespace are
//! placed in the given one.

use super::{InMemoryStore, ResourceKey};
use crate::crd::{CloudStorage, DataProtectionApplication};
use anyhow::{Context, Result};
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::ByteString;
use serde::Deserialize;
use tracing::debug;

/// Resources loaded from one manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedManifests {
    /// Keys of the DataProtectionApplications, in document order
    pub applications: Vec<ResourceKey>,
    pub cloud_storages: usize,
    pub secrets: usize,
}

impl InMemoryStore {
    /// Load every recognized document of `yaml` into the store
    pub fn load_manifests(&mut self, yaml: &str, namespace: &str) -> Result<LoadedManifests> {
        let mut loaded = LoadedManifests::default();

        for (index, document) in serde_yaml::Deserializer::from_str(yaml).enumerate() {
            let value = serde_yaml::Value::deserialize(document)
                .with_context(|| format!("Failed to parse YAML document {index}"))?;
            if value.is_null() {
                continue;
            }
            let kind = value
                .get("kind")
                .and_then(serde_yaml::Value::as_str)
                .unwrap_or_default()
                .to_string();

            match kind.as_str() {
                "DataProtectionApplication" => {
                    let mut dpa: DataProtectionApplication = serde_yaml::from_value(value)
                        .with_context(|| {
                            format!("Failed to parse DataProtectionApplication in document {index}")
                        })?;
                    let key = default_namespace(&mut dpa.metadata, namespace);
                    loaded.applications.push(key);
                    self.insert_data_protection_application(dpa);
                }
                "CloudStorage" => {
                    let mut cloud_storage: CloudStorage = serde_yaml::from_value(value)
                        .with_context(|| {
                            format!("Failed to parse CloudStorage in document {index}")
                        })?;
                    default_namespace(&mut cloud_storage.metadata, namespace);
                    loaded.cloud_storages += 1;
                    self.insert_cloud_storage(cloud_storage);
                }
                "Secret" => {
                    let mut secret: Secret = serde_yaml::from_value(value)
                        .with_context(|| format!("Failed to parse Secret in document {index}"))?;
                    default_namespace(&mut secret.metadata, namespace);
                    merge_string_data(&mut secret);
                    loaded.secrets += 1;
                    self.insert_secret(secret);
                }
                other => debug!("Skipping document {} of kind '{}'", index, other),
            }
        }

        Ok(loaded)
    }
}

fn default_namespace(metadata: &mut ObjectMeta, namespace: &str) -> ResourceKey {
    let namespace = metadata
        .namespace
        .get_or_insert_with(|| namespace.to_string())
        .clone();
    ResourceKey::new(namespace, metadata.name.clone().unwrap_or_default())
}

/// Fold `stringData` into `data` the way the API server does on write
fn merge_string_data(secret: &mut Secret) {
    let Some(string_data) = secret.string_data.take() else {
        return;
    };
    let data = secret.data.get_or_insert_with(Default::default);
    for (key, value) in string_data {
        data.insert(key, ByteString(value.into_bytes()));
    }
}
