//! # Volume Snapshot Location Validation
//!
//! Provider-specific shape checks for `spec.snapshotLocations`.

use super::error::ValidationError;
use crate::constants::{
    AWS_REGION_CONFIG_KEY, AWS_SNAPSHOT_CONFIG_KEYS, AZURE_SNAPSHOT_CONFIG_KEYS,
    GCP_SNAPSHOT_CONFIG_KEYS,
};
use crate::crd::{DataProtectionApplication, VolumeSnapshotLocationSpec};

/// Validate every snapshot location
pub fn validate_volume_snapshot_locations(
    dpa: &DataProtectionApplication,
) -> Result<(), ValidationError> {
    for location in &dpa.spec.snapshot_locations {
        let name = location.name.as_deref().unwrap_or_default();
        let Some(velero) = &location.velero else {
            return Err(ValidationError::structural(
                "snapshotLocation velero configuration cannot be nil",
            ));
        };
        validate_velero_snapshot_location(name, velero)?;
    }
    Ok(())
}

fn validate_velero_snapshot_location(
    name: &str,
    velero: &VolumeSnapshotLocationSpec,
) -> Result<(), ValidationError> {
    if velero.provider.is_empty() {
        return Err(ValidationError::structural(format!(
            "no provider specified for snapshotLocation {name}"
        )));
    }

    if let Some(credential) = &velero.credential {
        if credential.name.is_empty() {
            return Err(ValidationError::structural(format!(
                "Secret name specified in snapshotLocation {name} cannot be empty"
            )));
        }
        if credential.key.is_empty() {
            return Err(ValidationError::structural(format!(
                "Secret key specified in snapshotLocation {name} cannot be empty"
            )));
        }
    }

    let provider = velero.provider_name();
    let allowed_keys = match provider {
        "aws" => {
            if velero
                .config
                .get(AWS_REGION_CONFIG_KEY)
                .is_none_or(String::is_empty)
            {
                return Err(ValidationError::structural(format!(
                    "region for AWS snapshotLocation {name} must be set in config"
                )));
            }
            AWS_SNAPSHOT_CONFIG_KEYS
        }
        "gcp" => GCP_SNAPSHOT_CONFIG_KEYS,
        "azure" => AZURE_SNAPSHOT_CONFIG_KEYS,
        _ => return Ok(()),
    };

    if let Some(key) = velero
        .config
        .keys()
        .find(|key| !allowed_keys.contains(&key.as_str()))
    {
        return Err(ValidationError::structural(format!(
            "config key '{key}' is not supported for {provider} snapshotLocation {name}, \
             supported keys are: {}",
            allowed_keys.join(", ")
        )));
    }

    Ok(())
}
