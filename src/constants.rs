//! # Constants
//!
//! Shared constants used by the validators.
//!
//! Values that are also configurable (namespace, resource name, log settings)
//! only provide the defaults here; see [`crate::config::ValidatorConfig`].

/// Prefix stripped from provider identifiers (`velero.io/aws` -> `aws`)
pub const VELERO_IO_PREFIX: &str = "velero.io/";

/// Velero feature flag that disables every secret check
pub const NO_SECRET_FEATURE_FLAG: &str = "no-secret";

/// Only override key accepted in `unsupportedOverrides`
pub const OPERATOR_TYPE_KEY: &str = "operator-type";

/// Only value accepted for [`OPERATOR_TYPE_KEY`]
pub const OPERATOR_TYPE_MTC: &str = "mtc";

/// Secret key used by every cloud provider plugin when none is given
pub const DEFAULT_PLUGIN_SECRET_KEY: &str = "cloud";

/// Default namespace the operator and its resources live in
pub const DEFAULT_NAMESPACE: &str = "openshift-adp";

/// Default name of the DataProtectionApplication to validate
pub const DEFAULT_DPA_NAME: &str = "dpa";

/// Backup location config key holding the AWS region
pub const AWS_REGION_CONFIG_KEY: &str = "region";

/// Backup location config key holding a custom S3 endpoint
pub const AWS_S3_URL_CONFIG_KEY: &str = "s3Url";

/// Azure backup location config keys that must be set
pub const AZURE_RESOURCE_GROUP_CONFIG_KEY: &str = "resourceGroup";
pub const AZURE_STORAGE_ACCOUNT_CONFIG_KEY: &str = "storageAccount";

/// Snapshot location config keys accepted per provider
pub const AWS_SNAPSHOT_CONFIG_KEYS: &[&str] = &["region", "profile", "enableSharedConfig"];
pub const GCP_SNAPSHOT_CONFIG_KEYS: &[&str] = &["snapshotLocation", "project", "volumeProject"];
pub const AZURE_SNAPSHOT_CONFIG_KEYS: &[&str] =
    &["apiTimeout", "resourceGroup", "subscriptionId", "incremental"];
