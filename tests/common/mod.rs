//! Common fixtures for the validation integration tests
//!
//! Builds DataProtectionApplications and fills an in-memory store the way
//! the validator would find them in the cluster.

#![allow(dead_code, reason = "not every test file uses every fixture")]

use dpa_validator::crd::{
    ApplicationConfig, BackupLocation, BackupStorageLocationSpec, CloudStorage,
    CloudStorageLocation, CloudStorageProvider, CloudStorageRef, CloudStorageSpec, CredentialRef,
    DataProtectionApplication, DefaultPlugin, ObjectStorageLocation, SnapshotLocation,
    VeleroConfig, VolumeSnapshotLocationSpec,
};
use dpa_validator::store::{InMemoryStore, ResourceKey};
use std::collections::BTreeMap;

pub const NAMESPACE: &str = "openshift-adp";
pub const DPA_NAME: &str = "dpa";

pub fn dpa_key() -> ResourceKey {
    ResourceKey::new(NAMESPACE, DPA_NAME)
}

/// DataProtectionApplication with the given plugins and no locations
pub fn dpa(plugins: &[DefaultPlugin]) -> DataProtectionApplication {
    let mut dpa = DataProtectionApplication::new(DPA_NAME, Default::default());
    dpa.metadata.namespace = Some(NAMESPACE.to_string());
    dpa.spec.configuration = Some(ApplicationConfig {
        velero: Some(VeleroConfig {
            default_plugins: plugins.to_vec(),
            ..Default::default()
        }),
        ..Default::default()
    });
    dpa
}

pub fn velero_mut(dpa: &mut DataProtectionApplication) -> &mut VeleroConfig {
    dpa.spec
        .configuration
        .get_or_insert_with(Default::default)
        .velero
        .get_or_insert_with(Default::default)
}

/// AWS backup location with region and prefix set
pub fn aws_location(name: &str, credential: Option<CredentialRef>) -> BackupLocation {
    BackupLocation {
        name: Some(name.to_string()),
        velero: Some(BackupStorageLocationSpec {
            provider: "aws".to_string(),
            credential,
            object_storage: Some(ObjectStorageLocation {
                bucket: "backups".to_string(),
                prefix: "velero".to_string(),
            }),
            config: BTreeMap::from([("region".to_string(), "us-east-1".to_string())]),
            default: true,
        }),
        cloud_storage: None,
    }
}

/// Backup location backed by a CloudStorage bucket
pub fn bucket_location(
    name: &str,
    bucket: &str,
    credential: Option<CredentialRef>,
) -> BackupLocation {
    BackupLocation {
        name: Some(name.to_string()),
        velero: None,
        cloud_storage: Some(CloudStorageLocation {
            cloud_storage_ref: CloudStorageRef {
                name: bucket.to_string(),
            },
            credential,
            prefix: "velero".to_string(),
            ..Default::default()
        }),
    }
}

pub fn snapshot_location(
    provider: &str,
    config: &[(&str, &str)],
    credential: Option<CredentialRef>,
) -> SnapshotLocation {
    SnapshotLocation {
        name: Some("snapshots".to_string()),
        velero: Some(VolumeSnapshotLocationSpec {
            provider: provider.to_string(),
            credential,
            config: config
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }),
    }
}

pub fn cloud_storage(name: &str, provider: CloudStorageProvider) -> CloudStorage {
    let mut cloud_storage = CloudStorage::new(
        name,
        CloudStorageSpec {
            name: name.to_string(),
            provider,
        },
    );
    cloud_storage.metadata.namespace = Some(NAMESPACE.to_string());
    cloud_storage
}

/// Store holding `dpa` and nothing else
pub fn store_with(dpa: DataProtectionApplication) -> InMemoryStore {
    let mut store = InMemoryStore::new();
    store.insert_data_protection_application(dpa);
    store
}

/// Add a secret in the test namespace with one key
pub fn add_secret(store: &mut InMemoryStore, name: &str, key: &str, value: &str) {
    store.insert_secret_data(&ResourceKey::new(NAMESPACE, name), [(key, value)]);
}
