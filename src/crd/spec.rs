//! # DataProtectionApplication Spec
//!
//! Main CRD specification types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// DataProtectionApplication Custom Resource Definition
///
/// Declares the backup engine configuration: plugins, node agent, backup
/// storage locations and volume snapshot locations.
///
/// # Example
///
/// ```yaml
/// apiVersion: oadp.openshift.io/v1alpha1
/// kind: DataProtectionApplication
/// metadata:
///   name: dpa
///   namespace: openshift-adp
/// spec:
///   configuration:
///     velero:
///       defaultPlugins:
///         - aws
///         - openshift
///   backupLocations:
///     - velero:
///         provider: aws
///         default: true
///         objectStorage:
///           bucket: my-bucket
///           prefix: velero
///         config:
///           region: us-east-1
/// ```
#[derive(
    kube::CustomResource, Debug, Clone, Default, Deserialize, Serialize, schemars::JsonSchema,
)]
#[kube(
    kind = "DataProtectionApplication",
    group = "oadp.openshift.io",
    version = "v1alpha1",
    namespaced,
    shortname = "dpa",
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct DataProtectionApplicationSpec {
    /// Backup engine and node agent configuration
    #[serde(default)]
    pub configuration: Option<crate::crd::ApplicationConfig>,
    /// Backup storage locations, in the order they are applied
    #[serde(default)]
    pub backup_locations: Vec<crate::crd::BackupLocation>,
    /// Volume snapshot locations, in the order they are applied
    #[serde(default)]
    pub snapshot_locations: Vec<crate::crd::SnapshotLocation>,
    /// Escape hatch for unsupported configuration modes
    /// Only `operator-type` is accepted, and only with the value `mtc`
    #[serde(default)]
    pub unsupported_overrides: BTreeMap<String, String>,
    /// Back up internal images together with the cluster resources
    /// Default: true (a backup location prefix is then required)
    #[serde(default)]
    pub backup_images: Option<bool>,
}

impl DataProtectionApplication {
    /// Whether image backup is enabled
    /// Anything but an explicit `backupImages: false` enables it
    #[must_use]
    pub fn backup_images(&self) -> bool {
        self.spec.backup_images.unwrap_or(true)
    }

    /// Velero configuration, if the resource declares one
    #[must_use]
    pub fn velero(&self) -> Option<&crate::crd::VeleroConfig> {
        self.spec
            .configuration
            .as_ref()
            .and_then(|configuration| configuration.velero.as_ref())
    }

    /// Whether `noDefaultBackupLocation` is set on the velero configuration
    #[must_use]
    pub fn no_default_backup_location(&self) -> bool {
        self.velero()
            .is_some_and(|velero| velero.no_default_backup_location)
    }

    /// Whether the velero configuration carries the given feature flag
    #[must_use]
    pub fn has_feature_flag(&self, flag: &str) -> bool {
        self.velero()
            .is_some_and(|velero| velero.has_feature_flag(flag))
    }
}
