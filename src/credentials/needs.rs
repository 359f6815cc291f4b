//! # Default Credential Needs
//!
//! Works out which providers rely on their plugin's default secret, and turns
//! that into a per-plugin decision on whether the secret must be checked.
//!
//! ## Decision table
//!
//! | need (from locations) | snapshot location uses it | own cloud-storage credential | check? |
//! |---|---|---|---|
//! | any | yes | any | yes |
//! | `Required` | no | any | yes |
//! | `NotRequired` | no | any | no |
//! | `Untracked` | no | no | yes |
//! | `Untracked` | no | yes | no |

use super::plugins::plugin_metadata;
use crate::crd::{CloudStorageProvider, DataProtectionApplication};
use crate::store::{ConfigurationStore, ResourceKey};
use crate::validation::ValidationError;
use std::collections::BTreeMap;
use tracing::debug;

/// Whether a provider relies on its plugin's default secret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialNeed {
    /// Some location of this provider has no explicit credential
    Required,
    /// Every location of this provider names its own credential
    NotRequired,
    /// No location mentions this provider
    Untracked,
}

/// Facts about the resource that can force a plugin check
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PluginCheckContext {
    pub used_by_snapshot_location: bool,
    pub has_cloud_storage: bool,
}

impl CredentialNeed {
    #[must_use]
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => CredentialNeed::Required,
            Some(false) => CredentialNeed::NotRequired,
            None => CredentialNeed::Untracked,
        }
    }

    /// Whether the plugin's credential secrets must be checked
    #[must_use]
    pub fn requires_check(self, context: PluginCheckContext) -> bool {
        if context.used_by_snapshot_location {
            return true;
        }
        match self {
            CredentialNeed::Required => true,
            CredentialNeed::NotRequired => false,
            CredentialNeed::Untracked => !context.has_cloud_storage,
        }
    }
}

/// Per-provider default credential needs across all locations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultCredentialNeeds {
    by_provider: BTreeMap<String, bool>,
    has_cloud_storage: bool,
}

impl DefaultCredentialNeeds {
    /// Inspect every location of `dpa`
    ///
    /// Cloud-storage locations without a credential are resolved through
    /// their CloudStorage resource to learn the provider behind the bucket.
    pub async fn compute(
        dpa: &DataProtectionApplication,
        namespace: &str,
        configs: &dyn ConfigurationStore,
    ) -> Result<Self, ValidationError> {
        let mut needs = Self::default();

        if dpa.no_default_backup_location() {
            let plugins = dpa
                .velero()
                .map(|velero| velero.default_plugins.as_slice())
                .unwrap_or_default();
            for plugin in plugins {
                if let Some(metadata) = plugin_metadata(plugin) {
                    if metadata.is_cloud_provider {
                        needs
                            .by_provider
                            .insert(metadata.provider_name.to_string(), false);
                    }
                }
            }
        } else {
            for location in &dpa.spec.backup_locations {
                if let Some(velero) = &location.velero {
                    let provider = velero.provider_name().to_string();
                    if velero.credential.is_none() {
                        needs.by_provider.insert(provider, true);
                    } else {
                        needs.by_provider.entry(provider).or_insert(false);
                    }
                }
                if let Some(cloud) = &location.cloud_storage {
                    if cloud.credential.is_some() {
                        needs.has_cloud_storage = true;
                    } else {
                        let key = ResourceKey::new(namespace, &cloud.cloud_storage_ref.name);
                        let cloud_storage = configs.get_cloud_storage(&key).await?;
                        debug!(
                            "CloudStorage {} is backed by provider {}",
                            key, cloud_storage.spec.provider
                        );
                        needs
                            .by_provider
                            .insert(cloud_storage.spec.provider.as_str().to_string(), true);
                    }
                }
            }
        }

        for location in &dpa.spec.snapshot_locations {
            if let Some(velero) = &location.velero {
                let provider = velero.provider_name();
                // Buckets created from credentials-bearing cloud storage hand
                // their credentials to AWS snapshot locations as well
                let has_own_credentials = velero.credential.is_some()
                    || (provider == CloudStorageProvider::Aws.as_str() && needs.has_cloud_storage);
                needs
                    .by_provider
                    .insert(provider.to_string(), !has_own_credentials);
            }
        }

        Ok(needs)
    }

    /// Tri-state need recorded for `provider`
    #[must_use]
    pub fn need_for(&self, provider: &str) -> CredentialNeed {
        CredentialNeed::from_flag(self.by_provider.get(provider).copied())
    }

    /// Whether any cloud-storage location carries its own credential
    #[must_use]
    pub fn has_cloud_storage(&self) -> bool {
        self.has_cloud_storage
    }
}
