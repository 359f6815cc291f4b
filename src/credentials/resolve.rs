//! # Secret Resolution
//!
//! Derives which secrets a location reads its provider credentials from.

use super::plugins::provider_metadata;
use crate::crd::{BackupLocation, DataProtectionApplication};
use crate::validation::ValidationError;
use std::collections::BTreeSet;
use std::fmt;

/// Name and key of the secret holding a location's credentials
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SecretCoordinates {
    pub name: String,
    pub key: String,
}

impl SecretCoordinates {
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for SecretCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.key)
    }
}

/// Effective secret for a backup location
///
/// Precedence: cloud-storage credential, then velero credential, then the
/// default secret of the velero provider's plugin.
pub fn resolve_backup_location_secret(
    location: &BackupLocation,
) -> Result<SecretCoordinates, ValidationError> {
    let explicit = location
        .cloud_storage
        .as_ref()
        .and_then(|cloud| cloud.credential.as_ref())
        .or_else(|| {
            location
                .velero
                .as_ref()
                .and_then(|velero| velero.credential.as_ref())
        });
    if let Some(credential) = explicit {
        return Ok(SecretCoordinates::new(&credential.name, &credential.key));
    }

    let Some(velero) = location.velero.as_ref() else {
        return Err(ValidationError::structural(format!(
            "BackupLocation {} has no credential and no velero provider \
             to take a default secret from",
            location.display_name()
        )));
    };
    let provider = velero.provider_name();
    provider_metadata(provider)
        .map(|metadata| SecretCoordinates::new(metadata.secret_name, metadata.secret_key))
        .ok_or_else(|| {
            ValidationError::structural(format!(
                "BackupLocation {} has no credential and provider '{}' has no default secret",
                location.display_name(),
                provider
            ))
        })
}

/// Distinct secrets referenced by locations of `provider`
///
/// Locations with an explicit credential contribute it, the others
/// contribute `default_secret`. Both backup and snapshot locations count.
#[must_use]
pub fn secrets_for_provider(
    dpa: &DataProtectionApplication,
    provider: &str,
    default_secret: &SecretCoordinates,
) -> BTreeSet<SecretCoordinates> {
    let backup = dpa
        .spec
        .backup_locations
        .iter()
        .filter_map(|location| location.velero.as_ref())
        .map(|velero| (velero.provider_name(), velero.credential.as_ref()));
    let snapshot = dpa
        .spec
        .snapshot_locations
        .iter()
        .filter_map(|location| location.velero.as_ref())
        .map(|velero| (velero.provider_name(), velero.credential.as_ref()));

    backup
        .chain(snapshot)
        .filter(|(location_provider, _)| *location_provider == provider)
        .map(|(_, credential)| {
            credential.map_or_else(
                || default_secret.clone(),
                |c| SecretCoordinates::new(&c.name, &c.key),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::{
        BackupStorageLocationSpec, CloudStorageLocation, CloudStorageRef, CredentialRef,
        SnapshotLocation, VolumeSnapshotLocationSpec,
    };

    fn velero_location(provider: &str, credential: Option<CredentialRef>) -> BackupLocation {
        BackupLocation {
            name: Some("default".to_string()),
            velero: Some(BackupStorageLocationSpec {
                provider: provider.to_string(),
                credential,
                ..Default::default()
            }),
            cloud_storage: None,
        }
    }

    #[test]
    fn test_explicit_velero_credential_wins() {
        let location = velero_location("aws", Some(CredentialRef::new("my-creds", "aws")));
        let resolved = resolve_backup_location_secret(&location).unwrap();
        assert_eq!(resolved.name, "my-creds");
        assert_eq!(resolved.key, "aws");
    }

    #[test]
    fn test_cloud_storage_credential_takes_precedence() {
        let mut location = velero_location("aws", Some(CredentialRef::new("velero", "cloud")));
        location.cloud_storage = Some(CloudStorageLocation {
            cloud_storage_ref: CloudStorageRef {
                name: "bucket".to_string(),
            },
            credential: Some(CredentialRef::new("bucket-creds", "bucket-key")),
            ..Default::default()
        });
        let resolved = resolve_backup_location_secret(&location).unwrap();
        assert_eq!(resolved.to_string(), "bucket-creds[bucket-key]");
    }

    #[test]
    fn test_provider_default_secret() {
        let resolved =
            resolve_backup_location_secret(&velero_location("velero.io/gcp", None)).unwrap();
        assert_eq!(resolved.name, "cloud-credentials-gcp");
        assert_eq!(resolved.key, "cloud");
    }

    #[test]
    fn test_unknown_provider_without_credential_is_structural() {
        let err = resolve_backup_location_secret(&velero_location("example.io/nfs", None))
            .unwrap_err();
        assert!(err.to_string().contains("has no default secret"));
    }

    #[test]
    fn test_secrets_are_deduplicated_across_locations() {
        let mut dpa = DataProtectionApplication::new("dpa", Default::default());
        dpa.spec.backup_locations = vec![
            velero_location("aws", None),
            velero_location("velero.io/aws", None),
            velero_location("aws", Some(CredentialRef::new("other", "cloud"))),
            velero_location("gcp", None),
        ];
        dpa.spec.snapshot_locations = vec![SnapshotLocation {
            name: None,
            velero: Some(VolumeSnapshotLocationSpec {
                provider: "aws".to_string(),
                credential: None,
                ..Default::default()
            }),
        }];

        let default_secret = SecretCoordinates::new("cloud-credentials", "cloud");
        let secrets = secrets_for_provider(&dpa, "aws", &default_secret);
        assert_eq!(
            secrets.into_iter().collect::<Vec<_>>(),
            vec![default_secret, SecretCoordinates::new("other", "cloud")]
        );
    }
}
