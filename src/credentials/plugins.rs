//! # Plugin Metadata
//!
//! Static per-plugin facts: whether the plugin talks to a cloud provider and
//! which secret holds its credentials when a location names none.

use crate::constants::DEFAULT_PLUGIN_SECRET_KEY;
use crate::crd::DefaultPlugin;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginMetadata {
    pub is_cloud_provider: bool,
    /// Secret read when no explicit credential is given
    pub secret_name: &'static str,
    /// Key inside [`Self::secret_name`]
    pub secret_key: &'static str,
    /// Provider identifier used by locations served by this plugin
    pub provider_name: &'static str,
}

const fn cloud(secret_name: &'static str, provider_name: &'static str) -> PluginMetadata {
    PluginMetadata {
        is_cloud_provider: true,
        secret_name,
        secret_key: DEFAULT_PLUGIN_SECRET_KEY,
        provider_name,
    }
}

const NOT_CLOUD: PluginMetadata = PluginMetadata {
    is_cloud_provider: false,
    secret_name: "",
    secret_key: "",
    provider_name: "",
};

/// Metadata for a default plugin, `None` when the plugin has none
///
/// Callers skip plugins without metadata.
#[must_use]
pub fn plugin_metadata(plugin: &DefaultPlugin) -> Option<PluginMetadata> {
    match plugin {
        DefaultPlugin::Aws | DefaultPlugin::LegacyAws => Some(cloud("cloud-credentials", "aws")),
        DefaultPlugin::Gcp => Some(cloud("cloud-credentials-gcp", "gcp")),
        DefaultPlugin::Azure => Some(cloud("cloud-credentials-azure", "azure")),
        DefaultPlugin::Csi | DefaultPlugin::Openshift | DefaultPlugin::Kubevirt => {
            Some(NOT_CLOUD)
        }
        DefaultPlugin::Vsm | DefaultPlugin::Hypershift | DefaultPlugin::Other(_) => None,
    }
}

/// Metadata for a location provider identifier (`aws`, `gcp`, ...)
#[must_use]
pub fn provider_metadata(provider: &str) -> Option<PluginMetadata> {
    provider
        .parse::<DefaultPlugin>()
        .ok()
        .and_then(|plugin| plugin_metadata(&plugin))
        .filter(|metadata| metadata.is_cloud_provider)
}
