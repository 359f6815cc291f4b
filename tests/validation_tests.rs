//! # Validation Tests
//!
//! End-to-end validation passes against an in-memory store.
//!
//! These tests verify:
//! - Backup location presence rules and `noDefaultBackupLocation`
//! - Per-location prefix and credential rules
//! - Default plugin credential secrets, and the flags that switch them off
//! - Override allow-list, resource requirements and peer location checks

mod common;

use common::*;
use dpa_validator::crd::{
    BackupLocation, CloudStorageProvider, CredentialRef, DefaultPlugin, NodeAgentConfig,
    PodConfig, ResticConfig, SnapshotLocation,
};
use dpa_validator::store::InMemoryStore;
use dpa_validator::validation::{
    validate_data_protection_application, DpaValidator, ValidationContext, ValidationError,
    ValidationErrorKind,
};
use k8s_openapi::api::core::v1::ResourceRequirements;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use std::collections::BTreeMap;

async fn validate(store: &InMemoryStore) -> Result<(), ValidationError> {
    validate_data_protection_application(&dpa_key(), store, store).await
}

/// Valid AWS setup: one location on the default secret
fn aws_store() -> (InMemoryStore, dpa_validator::crd::DataProtectionApplication) {
    let mut dpa = dpa(&[DefaultPlugin::Aws, DefaultPlugin::Openshift]);
    dpa.spec.backup_locations = vec![aws_location("main", None)];
    let mut store = store_with(dpa.clone());
    add_secret(&mut store, "cloud-credentials", "cloud", "[default]");
    (store, dpa)
}

#[tokio::test]
async fn test_valid_aws_configuration() {
    let (store, _) = aws_store();
    assert!(validate(&store).await.is_ok());
}

#[tokio::test]
async fn test_cloud_storage_location_with_no_secret_flag() {
    let mut dpa = dpa(&[]);
    velero_mut(&mut dpa).feature_flags = vec!["no-secret".to_string()];
    dpa.spec.backup_locations = vec![bucket_location("main", "my-bucket", None)];

    let mut store = store_with(dpa);
    store.insert_cloud_storage(cloud_storage("my-bucket", CloudStorageProvider::Aws));

    assert!(validate(&store).await.is_ok());
}

#[tokio::test]
async fn test_restic_and_node_agent_are_mutually_exclusive() {
    let (_, mut dpa) = aws_store();
    if let Some(configuration) = dpa.spec.configuration.as_mut() {
        configuration.restic = Some(ResticConfig::default());
        configuration.node_agent = Some(NodeAgentConfig::default());
    }
    let mut store = store_with(dpa);
    add_secret(&mut store, "cloud-credentials", "cloud", "[default]");

    let err = validate(&store).await.unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::Structural);
    assert!(err.to_string().contains("mutually exclusive"));
}

#[tokio::test]
async fn test_snapshot_location_without_velero_block() {
    let (_, mut dpa) = aws_store();
    dpa.spec.snapshot_locations = vec![SnapshotLocation::default()];
    let mut store = store_with(dpa);
    add_secret(&mut store, "cloud-credentials", "cloud", "[default]");

    let err = validate(&store).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "snapshotLocation velero configuration cannot be nil"
    );
}

#[tokio::test]
async fn test_unsupported_operator_type_override() {
    let (_, mut dpa) = aws_store();
    dpa.spec
        .unsupported_overrides
        .insert("operator-type".to_string(), "oadp".to_string());
    let mut store = store_with(dpa);
    add_secret(&mut store, "cloud-credentials", "cloud", "[default]");

    let err = validate(&store).await.unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::UnsupportedOverride);
    assert!(err.to_string().contains("unsupported override"));
}

#[tokio::test]
async fn test_only_operator_type_override_is_accepted() {
    let (mut store, mut dpa) = aws_store();
    dpa.spec
        .unsupported_overrides
        .insert("operator-type".to_string(), "mtc".to_string());
    store.insert_data_protection_application(dpa.clone());
    assert!(validate(&store).await.is_ok());

    dpa.spec
        .unsupported_overrides
        .insert("tech-preview-ack".to_string(), "true".to_string());
    store.insert_data_protection_application(dpa);

    let err = validate(&store).await.unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::UnsupportedOverride);
    assert_eq!(
        err.to_string(),
        "unsupported override: override key 'tech-preview-ack' is not recognized"
    );
}

#[tokio::test]
async fn test_missing_default_secret_is_named() {
    let mut dpa = dpa(&[DefaultPlugin::Aws]);
    dpa.spec.backup_locations = vec![aws_location("main", None)];
    let store = store_with(dpa);

    let err = validate(&store).await.unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::MissingCredential);
    assert_eq!(
        err.to_string(),
        "Secret name cloud-credentials not found, expected data for key cloud"
    );
}

#[tokio::test]
async fn test_missing_location_secret_names_secret_and_key() {
    let mut dpa = dpa(&[DefaultPlugin::Aws]);
    dpa.spec.backup_locations = vec![aws_location(
        "main",
        Some(CredentialRef::new("my-creds", "my-key")),
    )];

    let err = validate(&store_with(dpa)).await.unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::MissingCredential);
    let message = err.to_string();
    assert!(message.contains("my-creds"), "unexpected error: {message}");
    assert!(message.contains("my-key"), "unexpected error: {message}");
}

#[tokio::test]
async fn test_plugin_reports_missing_snapshot_secret_with_key() {
    let mut dpa = dpa(&[DefaultPlugin::Aws]);
    dpa.spec.backup_locations = vec![aws_location(
        "main",
        Some(CredentialRef::new("bsl-credentials", "cloud")),
    )];
    dpa.spec.snapshot_locations = vec![snapshot_location(
        "aws",
        &[("region", "us-east-1")],
        Some(CredentialRef::new("vsl-credentials", "vsl-key")),
    )];
    let mut store = store_with(dpa);
    add_secret(&mut store, "bsl-credentials", "cloud", "[default]");

    let err = validate(&store).await.unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::MissingCredential);
    assert_eq!(
        err.to_string(),
        "Secret name vsl-credentials not found, expected data for key vsl-key"
    );
}

#[tokio::test]
async fn test_no_secret_flag_skips_missing_plugin_secret() {
    let mut dpa = dpa(&[DefaultPlugin::Aws]);
    dpa.spec.backup_locations = vec![aws_location("main", None)];
    velero_mut(&mut dpa).feature_flags = vec!["no-secret".to_string()];

    // no cloud-credentials secret in the store
    assert!(validate(&store_with(dpa)).await.is_ok());
}

#[tokio::test]
async fn test_no_default_backup_location_skips_snapshot_secret() {
    let mut dpa = dpa(&[DefaultPlugin::Aws]);
    velero_mut(&mut dpa).no_default_backup_location = true;
    dpa.spec.backup_images = Some(false);
    dpa.spec.snapshot_locations = vec![snapshot_location(
        "aws",
        &[("region", "us-east-1")],
        None,
    )];

    let result = validate(&store_with(dpa)).await;
    assert!(result.is_ok(), "unexpected error: {result:?}");
}

#[tokio::test]
async fn test_plugins_without_metadata_are_skipped() {
    let (_, mut dpa) = aws_store();
    velero_mut(&mut dpa).default_plugins = vec![
        DefaultPlugin::Aws,
        DefaultPlugin::Hypershift,
        DefaultPlugin::Other("example-plugin".to_string()),
    ];
    let mut store = store_with(dpa);
    add_secret(&mut store, "cloud-credentials", "cloud", "[default]");

    assert!(validate(&store).await.is_ok());
}

#[tokio::test]
async fn test_plugin_checks_default_secret_of_snapshot_location() {
    let mut dpa = dpa(&[DefaultPlugin::Aws]);
    dpa.spec.backup_locations = vec![aws_location(
        "main",
        Some(CredentialRef::new("bsl-credentials", "cloud")),
    )];
    dpa.spec.snapshot_locations = vec![snapshot_location(
        "aws",
        &[("region", "us-east-1")],
        None,
    )];
    let mut store = store_with(dpa);
    add_secret(&mut store, "bsl-credentials", "cloud", "[default]");

    let err = validate(&store).await.unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::MissingCredential);
    assert!(
        err.to_string().contains("cloud-credentials"),
        "unexpected error: {err}"
    );

    add_secret(&mut store, "cloud-credentials", "cloud", "[default]");
    assert!(validate(&store).await.is_ok());
}

#[tokio::test]
async fn test_plugin_skips_secrets_when_locations_carry_credentials() {
    let mut dpa = dpa(&[DefaultPlugin::Aws, DefaultPlugin::Gcp]);
    dpa.spec.backup_locations = vec![aws_location(
        "main",
        Some(CredentialRef::new("bsl-credentials", "cloud")),
    )];
    let mut store = store_with(dpa);
    add_secret(&mut store, "bsl-credentials", "cloud", "[default]");

    // gcp is untracked and gets checked, but no gcp location names a secret
    assert!(validate(&store).await.is_ok());
}

#[tokio::test]
async fn test_no_default_backup_location() {
    let mut dpa = dpa(&[DefaultPlugin::Aws]);
    velero_mut(&mut dpa).no_default_backup_location = true;

    let mut with_location = dpa.clone();
    with_location.spec.backup_locations = vec![aws_location("main", None)];
    let err = validate(&store_with(with_location)).await.unwrap_err();
    assert!(err
        .to_string()
        .contains("cannot have backup locations if noDefaultBackupLocation is set"));

    let err = validate(&store_with(dpa.clone())).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "backupImages needs to be set to false when noDefaultBackupLocation is set"
    );

    dpa.spec.backup_images = Some(false);
    assert!(validate(&store_with(dpa)).await.is_ok());
}

#[tokio::test]
async fn test_backup_locations_required() {
    let store = store_with(dpa(&[DefaultPlugin::Aws]));
    let err = validate(&store).await.unwrap_err();
    assert!(err
        .to_string()
        .starts_with("no backupstoragelocations configured"));
}

#[tokio::test]
async fn test_location_without_any_block() {
    let mut dpa = dpa(&[]);
    dpa.spec.backup_locations = vec![BackupLocation::default()];
    dpa.spec.backup_images = Some(false);
    velero_mut(&mut dpa).feature_flags = vec!["no-secret".to_string()];

    let err = validate(&store_with(dpa)).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "BackupLocation must have velero or bucket configuration"
    );
}

#[tokio::test]
async fn test_empty_prefix_depends_on_backup_images() {
    let (_, mut dpa) = aws_store();
    if let Some(object_storage) = dpa.spec.backup_locations[0]
        .velero
        .as_mut()
        .and_then(|velero| velero.object_storage.as_mut())
    {
        object_storage.prefix.clear();
    }

    let mut store = store_with(dpa.clone());
    add_secret(&mut store, "cloud-credentials", "cloud", "[default]");
    let err = validate(&store).await.unwrap_err();
    assert!(err.to_string().contains("must have velero prefix"));

    dpa.spec.backup_images = Some(false);
    store.insert_data_protection_application(dpa);
    assert!(validate(&store).await.is_ok());
}

#[tokio::test]
async fn test_secret_must_hold_data_under_key() {
    let (mut store, _) = aws_store();

    add_secret(&mut store, "cloud-credentials", "other", "[default]");
    let err = validate(&store).await.unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::MissingCredential);
    assert_eq!(
        err.to_string(),
        "Secret name cloud-credentials is missing data for key cloud"
    );

    add_secret(&mut store, "cloud-credentials", "cloud", "");
    let err = validate(&store).await.unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::MissingCredential);

    add_secret(&mut store, "cloud-credentials", "cloud", "[default]");
    assert!(validate(&store).await.is_ok());
}

#[tokio::test]
async fn test_explicit_credential_fields_must_be_set() {
    let mut dpa = dpa(&[DefaultPlugin::Aws]);
    dpa.spec.backup_locations = vec![aws_location("main", Some(CredentialRef::new("creds", "")))];

    let err = validate(&store_with(dpa)).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Secret key specified in BackupLocation main cannot be empty"
    );
}

#[tokio::test]
async fn test_only_one_default_location() {
    let (_, mut dpa) = aws_store();
    dpa.spec.backup_locations.push(aws_location("second", None));
    let mut store = store_with(dpa);
    add_secret(&mut store, "cloud-credentials", "cloud", "[default]");

    let err = validate(&store).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "only one BackupLocation can be set as default"
    );
}

#[tokio::test]
async fn test_invalid_velero_resource_allocation() {
    let (_, mut dpa) = aws_store();
    velero_mut(&mut dpa).pod_config = Some(PodConfig {
        resource_allocations: Some(ResourceRequirements {
            requests: Some(BTreeMap::from([(
                "cpu".to_string(),
                Quantity("a lot".to_string()),
            )])),
            ..Default::default()
        }),
    });
    let mut store = store_with(dpa);
    add_secret(&mut store, "cloud-credentials", "cloud", "[default]");

    let err = validate(&store).await.unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::ResourceRequirements);
}

#[tokio::test]
async fn test_missing_resource_is_a_fetch_error() {
    let err = validate(&InMemoryStore::new()).await.unwrap_err();
    match err {
        ValidationError::Fetch(e) => assert!(e.is_not_found()),
        other => panic!("expected fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_repeated_validation_gives_same_verdict() {
    let (valid, _) = aws_store();
    let validator = DpaValidator::new(ValidationContext::new(dpa_key()), &valid, &valid);
    assert!(validator.validate().await.is_ok());
    assert!(validator.validate().await.is_ok());

    let mut invalid = dpa(&[DefaultPlugin::Aws]);
    invalid.spec.backup_locations = vec![aws_location("main", None)];
    let store = store_with(invalid);
    let validator = DpaValidator::new(ValidationContext::new(dpa_key()), &store, &store);
    let first = validator.validate().await.unwrap_err().to_string();
    let second = validator.validate().await.unwrap_err().to_string();
    assert_eq!(first, second);
}
