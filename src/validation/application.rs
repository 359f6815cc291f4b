//! # DataProtectionApplication Validation
//!
//! Main orchestration for validating DataProtectionApplication resources.
//!
//! Cheap structural checks run first, then the plugin credential checks, the
//! workload resource checks and finally the provider-specific location checks.
//! The first failure ends the pass.

use super::backup_locations::validate_backup_storage_locations;
use super::error::ValidationError;
use super::plugins::validate_plugins;
use super::resources::{validate_node_agent_resources, validate_velero_resources};
use super::snapshot_locations::validate_volume_snapshot_locations;
use super::ValidationContext;
use crate::constants::{NO_SECRET_FEATURE_FLAG, OPERATOR_TYPE_KEY, OPERATOR_TYPE_MTC};
use crate::credentials::{resolve_backup_location_secret, SecretCoordinates};
use crate::crd::{BackupLocation, DataProtectionApplication};
use crate::store::{ConfigurationStore, SecretStore};
use tracing::{debug, info, warn, Instrument};

/// Validator for one DataProtectionApplication
///
/// Holds no state between runs: every call to [`DpaValidator::validate`]
/// reads the resource and its secrets again.
pub struct DpaValidator<'a> {
    context: ValidationContext,
    configs: &'a dyn ConfigurationStore,
    secrets: &'a dyn SecretStore,
}

impl std::fmt::Debug for DpaValidator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DpaValidator")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

impl<'a> DpaValidator<'a> {
    pub fn new(
        context: ValidationContext,
        configs: &'a dyn ConfigurationStore,
        secrets: &'a dyn SecretStore,
    ) -> Self {
        Self {
            context,
            configs,
            secrets,
        }
    }

    #[must_use]
    pub fn context(&self) -> &ValidationContext {
        &self.context
    }

    /// Validate the resource
    ///
    /// Returns `Ok(())` when every check passes, otherwise the first violation.
    pub async fn validate(&self) -> Result<(), ValidationError> {
        let span = self.context.span().clone();
        async {
            let result = self.run().await;
            match &result {
                Ok(()) => info!(
                    "✅ DataProtectionApplication {} is valid",
                    self.context.key
                ),
                Err(e) => warn!(
                    error.kind = %e.kind(),
                    "DataProtectionApplication {} is invalid: {}",
                    self.context.key,
                    e
                ),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run(&self) -> Result<(), ValidationError> {
        let dpa = self
            .configs
            .get_data_protection_application(&self.context.key)
            .await?;

        validate_configuration(&dpa)?;

        let check_secrets =
            !(dpa.has_feature_flag(NO_SECRET_FEATURE_FLAG) || dpa.no_default_backup_location());
        for location in &dpa.spec.backup_locations {
            validate_location_shape(&dpa, location)?;
            if check_secrets {
                validate_location_credential(location)?;
                let coordinates = resolve_backup_location_secret(location)?;
                self.require_secret_data(&coordinates).await?;
            }
        }

        for location in &dpa.spec.snapshot_locations {
            if location.velero.is_none() {
                return Err(ValidationError::structural(
                    "snapshotLocation velero configuration cannot be nil",
                ));
            }
        }

        validate_unsupported_overrides(&dpa)?;

        validate_plugins(&self.context, self.configs, self.secrets).await?;

        validate_velero_resources(&dpa)?;
        validate_node_agent_resources(&dpa)?;

        validate_backup_storage_locations(&dpa)?;
        validate_volume_snapshot_locations(&dpa)?;

        Ok(())
    }

    /// Require the secret to exist and hold non-empty data under the key
    async fn require_secret_data(
        &self,
        coordinates: &SecretCoordinates,
    ) -> Result<(), ValidationError> {
        let key = self.context.key.sibling(&coordinates.name);
        let secret = self.secrets.get_secret(&key).await.map_err(|e| {
            ValidationError::secret_lookup(e, &coordinates.name, &coordinates.key)
        })?;
        let has_data = secret
            .data
            .as_ref()
            .and_then(|data| data.get(&coordinates.key))
            .is_some_and(|value| !value.0.is_empty());
        if !has_data {
            return Err(ValidationError::missing_credential(
                &coordinates.name,
                &coordinates.key,
            ));
        }
        debug!("Secret {} has data for key {}", key, coordinates.key);
        Ok(())
    }
}

/// Configuration blocks, node agent exclusivity and backup location presence
fn validate_configuration(dpa: &DataProtectionApplication) -> Result<(), ValidationError> {
    let Some(configuration) = dpa.spec.configuration.as_ref() else {
        return Err(ValidationError::structural(
            "DPA CR Velero configuration cannot be nil",
        ));
    };
    let Some(velero) = configuration.velero.as_ref() else {
        return Err(ValidationError::structural(
            "DPA CR Velero configuration cannot be nil",
        ));
    };

    if configuration.restic.is_some() && configuration.node_agent.is_some() {
        return Err(ValidationError::structural(
            "DPA CR cannot have restic (deprecated in OADP 1.3) as well as nodeAgent options \
             at the same time, they are mutually exclusive",
        ));
    }

    if velero.no_default_backup_location {
        if !dpa.spec.backup_locations.is_empty() {
            return Err(ValidationError::structural(
                "DPA CR Velero configuration cannot have backup locations \
                 if noDefaultBackupLocation is set",
            ));
        }
    } else if dpa.spec.backup_locations.is_empty() {
        return Err(ValidationError::structural(
            "no backupstoragelocations configured, ensure a backupstoragelocation \
             has been configured or use the noDefaultBackupLocation flag",
        ));
    }

    if velero.no_default_backup_location && dpa.backup_images() {
        return Err(ValidationError::structural(
            "backupImages needs to be set to false when noDefaultBackupLocation is set",
        ));
    }

    Ok(())
}

/// Block presence and prefix rules for one backup location
fn validate_location_shape(
    dpa: &DataProtectionApplication,
    location: &BackupLocation,
) -> Result<(), ValidationError> {
    if location.velero.is_none() && location.cloud_storage.is_none() {
        return Err(ValidationError::structural(
            "BackupLocation must have velero or bucket configuration",
        ));
    }

    let velero_prefix_missing = location
        .velero
        .as_ref()
        .and_then(|velero| velero.object_storage.as_ref())
        .is_some_and(|object_storage| object_storage.prefix.is_empty());
    if velero_prefix_missing && dpa.backup_images() {
        return Err(ValidationError::structural(
            "BackupLocation must have velero prefix when backupImages is not set to false",
        ));
    }

    let cloud_prefix_missing = location
        .cloud_storage
        .as_ref()
        .is_some_and(|cloud| cloud.prefix.is_empty());
    if cloud_prefix_missing && dpa.backup_images() {
        return Err(ValidationError::structural(
            "BackupLocation must have cloud storage prefix when backupImages is not set to false",
        ));
    }

    Ok(())
}

/// An explicit velero credential must name both a secret and a key
fn validate_location_credential(location: &BackupLocation) -> Result<(), ValidationError> {
    let Some(credential) = location
        .velero
        .as_ref()
        .and_then(|velero| velero.credential.as_ref())
    else {
        return Ok(());
    };

    if credential.key.is_empty() {
        return Err(ValidationError::structural(format!(
            "Secret key specified in BackupLocation {} cannot be empty",
            location.display_name()
        )));
    }
    if credential.name.is_empty() {
        return Err(ValidationError::structural(format!(
            "Secret name specified in BackupLocation {} cannot be empty",
            location.display_name()
        )));
    }
    Ok(())
}

/// Operator type must be `mtc`, every other key is forbidden
fn validate_unsupported_overrides(dpa: &DataProtectionApplication) -> Result<(), ValidationError> {
    let overrides = &dpa.spec.unsupported_overrides;

    if overrides
        .get(OPERATOR_TYPE_KEY)
        .is_some_and(|value| value != OPERATOR_TYPE_MTC)
    {
        return Err(ValidationError::UnsupportedOverride(format!(
            "only {OPERATOR_TYPE_MTC} operator type override is supported"
        )));
    }

    if let Some(key) = overrides
        .keys()
        .find(|key| key.as_str() != OPERATOR_TYPE_KEY)
    {
        return Err(ValidationError::UnsupportedOverride(format!(
            "override key '{key}' is not recognized"
        )));
    }

    Ok(())
}
