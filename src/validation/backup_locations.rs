//! # Backup Storage Location Validation
//!
//! Provider-specific shape checks for `spec.backupLocations`.

use super::error::ValidationError;
use crate::constants::{
    AWS_REGION_CONFIG_KEY, AWS_S3_URL_CONFIG_KEY, AZURE_RESOURCE_GROUP_CONFIG_KEY,
    AZURE_STORAGE_ACCOUNT_CONFIG_KEY,
};
use crate::crd::{
    BackupLocation, BackupStorageLocationSpec, CloudStorageLocation, DataProtectionApplication,
};

/// Validate every backup location and the default-location count
pub fn validate_backup_storage_locations(
    dpa: &DataProtectionApplication,
) -> Result<(), ValidationError> {
    let mut default_locations = 0;

    for location in &dpa.spec.backup_locations {
        let name = location.display_name();
        match (&location.velero, &location.cloud_storage) {
            (Some(_), Some(_)) => {
                return Err(ValidationError::structural(format!(
                    "BackupLocation {name} cannot have both velero and bucket configuration"
                )));
            }
            (Some(velero), None) => validate_velero_location(name, velero)?,
            (None, Some(cloud)) => validate_cloud_storage_location(name, cloud)?,
            (None, None) => {
                return Err(ValidationError::structural(
                    "BackupLocation must have velero or bucket configuration",
                ));
            }
        }
        if is_default(location) {
            default_locations += 1;
        }
    }

    if default_locations > 1 {
        return Err(ValidationError::structural(
            "only one BackupLocation can be set as default",
        ));
    }

    Ok(())
}

fn is_default(location: &BackupLocation) -> bool {
    location.velero.as_ref().is_some_and(|v| v.default)
        || location.cloud_storage.as_ref().is_some_and(|c| c.default)
}

fn validate_velero_location(
    name: &str,
    velero: &BackupStorageLocationSpec,
) -> Result<(), ValidationError> {
    if velero.provider.is_empty() {
        return Err(ValidationError::structural(format!(
            "no provider specified for BackupLocation {name}"
        )));
    }

    let Some(object_storage) = &velero.object_storage else {
        return Err(ValidationError::structural(format!(
            "object storage configuration for BackupLocation {name} cannot be nil"
        )));
    };
    if object_storage.bucket.is_empty() {
        return Err(ValidationError::structural(format!(
            "bucket name for BackupLocation {name} cannot be empty"
        )));
    }

    match velero.provider_name() {
        "aws" => {
            let has_region = velero
                .config
                .get(AWS_REGION_CONFIG_KEY)
                .is_some_and(|region| !region.is_empty());
            let has_s3_url = velero
                .config
                .get(AWS_S3_URL_CONFIG_KEY)
                .is_some_and(|url| !url.is_empty());
            if !has_region && !has_s3_url {
                return Err(ValidationError::structural(format!(
                    "region for AWS BackupLocation {name} must be set in config \
                     when no s3Url is given"
                )));
            }
        }
        "azure" => {
            for key in [AZURE_RESOURCE_GROUP_CONFIG_KEY, AZURE_STORAGE_ACCOUNT_CONFIG_KEY] {
                if velero.config.get(key).is_none_or(String::is_empty) {
                    return Err(ValidationError::structural(format!(
                        "{key} for Azure BackupLocation {name} must be set in config"
                    )));
                }
            }
        }
        _ => {}
    }

    Ok(())
}

fn validate_cloud_storage_location(
    name: &str,
    cloud: &CloudStorageLocation,
) -> Result<(), ValidationError> {
    if cloud.cloud_storage_ref.name.is_empty() {
        return Err(ValidationError::structural(format!(
            "cloudStorageRef name for BackupLocation {name} cannot be empty"
        )));
    }
    Ok(())
}
