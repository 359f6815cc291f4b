//! # Locations
//!
//! Backup storage location and volume snapshot location types.

use crate::constants::VELERO_IO_PREFIX;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reference to a key inside a Secret in the resource namespace
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRef {
    /// Secret name
    #[serde(default)]
    pub name: String,
    /// Key inside the secret data
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub optional: Option<bool>,
}

impl CredentialRef {
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            optional: None,
        }
    }
}

/// One entry of `spec.backupLocations`
/// Exactly one of `velero` or `bucket` is expected
#[derive(Debug, Clone, Default, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BackupLocation {
    #[serde(default)]
    pub name: Option<String>,
    /// Backup storage location handled directly by a provider plugin
    #[serde(default)]
    pub velero: Option<BackupStorageLocationSpec>,
    /// Backup storage location backed by a CloudStorage bucket resource
    #[serde(default, rename = "bucket")]
    pub cloud_storage: Option<CloudStorageLocation>,
}

impl BackupLocation {
    /// Name used in error messages (empty when the location is unnamed)
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

/// Provider-native backup storage location
#[derive(Debug, Clone, Default, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BackupStorageLocationSpec {
    /// Provider identifier, optionally prefixed with `velero.io/`
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub credential: Option<CredentialRef>,
    #[serde(default)]
    pub object_storage: Option<ObjectStorageLocation>,
    /// Provider-specific settings (region, s3Url, resourceGroup, ...)
    #[serde(default)]
    pub config: BTreeMap<String, String>,
    #[serde(default)]
    pub default: bool,
}

impl BackupStorageLocationSpec {
    /// Provider with the `velero.io/` prefix stripped
    #[must_use]
    pub fn provider_name(&self) -> &str {
        strip_velero_prefix(&self.provider)
    }
}

/// Bucket and prefix inside the object store
#[derive(Debug, Clone, Default, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObjectStorageLocation {
    #[serde(default)]
    pub bucket: String,
    #[serde(default)]
    pub prefix: String,
}

/// Backup storage location backed by a CloudStorage resource
#[derive(Debug, Clone, Default, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CloudStorageLocation {
    pub cloud_storage_ref: CloudStorageRef,
    #[serde(default)]
    pub credential: Option<CredentialRef>,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub config: BTreeMap<String, String>,
    #[serde(default)]
    pub default: bool,
}

/// Reference to a CloudStorage resource in the same namespace
#[derive(Debug, Clone, Default, Deserialize, Serialize, schemars::JsonSchema)]
pub struct CloudStorageRef {
    #[serde(default)]
    pub name: String,
}

/// One entry of `spec.snapshotLocations`
#[derive(Debug, Clone, Default, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotLocation {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub velero: Option<VolumeSnapshotLocationSpec>,
}

/// Provider-native volume snapshot location
#[derive(Debug, Clone, Default, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VolumeSnapshotLocationSpec {
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub credential: Option<CredentialRef>,
    #[serde(default)]
    pub config: BTreeMap<String, String>,
}

impl VolumeSnapshotLocationSpec {
    /// Provider with the `velero.io/` prefix stripped
    #[must_use]
    pub fn provider_name(&self) -> &str {
        strip_velero_prefix(&self.provider)
    }
}

/// Strip the `velero.io/` namespace from a provider identifier
#[must_use]
pub fn strip_velero_prefix(provider: &str) -> &str {
    provider.strip_prefix(VELERO_IO_PREFIX).unwrap_or(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_velero_prefix() {
        assert_eq!(strip_velero_prefix("velero.io/aws"), "aws");
        assert_eq!(strip_velero_prefix("aws"), "aws");
        assert_eq!(strip_velero_prefix("example.io/aws"), "example.io/aws");
    }

    #[test]
    fn test_cloud_storage_block_uses_bucket_key() {
        let yaml = r#"
name: cloud
bucket:
  cloudStorageRef:
    name: my-bucket
  prefix: velero
"#;
        let location: BackupLocation = serde_yaml::from_str(yaml).unwrap();
        let cloud = location.cloud_storage.unwrap();
        assert_eq!(cloud.cloud_storage_ref.name, "my-bucket");
        assert_eq!(cloud.prefix, "velero");
        assert!(location.velero.is_none());
    }
}
