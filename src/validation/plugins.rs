//! # Default Plugin Validation
//!
//! Confirms that every cloud provider plugin which falls back on credential
//! secrets can actually read them.

use super::error::ValidationError;
use super::ValidationContext;
use crate::constants::NO_SECRET_FEATURE_FLAG;
use crate::credentials::{
    plugin_metadata, secrets_for_provider, DefaultCredentialNeeds, PluginCheckContext,
    SecretCoordinates,
};
use crate::store::{ConfigurationStore, SecretStore};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Validate the credential secrets of every default plugin
///
/// Reads the resource again rather than reusing the caller's copy, and stops
/// at the first secret that cannot be read.
pub async fn validate_plugins(
    context: &ValidationContext,
    configs: &dyn ConfigurationStore,
    secrets: &dyn SecretStore,
) -> Result<(), ValidationError> {
    let dpa = configs.get_data_protection_application(&context.key).await?;
    let needs = DefaultCredentialNeeds::compute(&dpa, &context.key.namespace, configs).await?;

    let snapshot_providers: BTreeSet<&str> = dpa
        .spec
        .snapshot_locations
        .iter()
        .filter_map(|location| location.velero.as_ref())
        .map(|velero| velero.provider_name())
        .collect();

    let secrets_disabled =
        dpa.no_default_backup_location() || dpa.has_feature_flag(NO_SECRET_FEATURE_FLAG);
    let plugins = dpa
        .velero()
        .map(|velero| velero.default_plugins.as_slice())
        .unwrap_or_default();

    for plugin in plugins {
        let Some(metadata) = plugin_metadata(plugin) else {
            debug!("No metadata for plugin {}, skipping credential check", plugin);
            continue;
        };

        let check_context = PluginCheckContext {
            used_by_snapshot_location: snapshot_providers.contains(plugin.as_str()),
            has_cloud_storage: needs.has_cloud_storage(),
        };
        let needs_check = needs
            .need_for(plugin.as_str())
            .requires_check(check_context);

        if !(metadata.is_cloud_provider && needs_check && !secrets_disabled) {
            continue;
        }

        let default_secret = SecretCoordinates::new(metadata.secret_name, metadata.secret_key);
        for coordinates in secrets_for_provider(&dpa, plugin.as_str(), &default_secret) {
            let key = context.key.sibling(&coordinates.name);
            if let Err(e) = secrets.get_secret(&key).await {
                info!(
                    "error validating {} provider secret: {}/{}",
                    plugin, key.namespace, coordinates
                );
                return Err(ValidationError::secret_lookup(
                    e,
                    coordinates.name,
                    coordinates.key,
                ));
            }
        }
    }

    Ok(())
}
