//! # Velero Configuration
//!
//! Backup engine, default plugins and node agent configuration types.

use k8s_openapi::api::core::v1::ResourceRequirements;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// `spec.configuration` block
#[derive(Debug, Clone, Default, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationConfig {
    /// Backup engine configuration (required)
    #[serde(default)]
    pub velero: Option<VeleroConfig>,
    /// Legacy file system backup agent (deprecated, replaced by `nodeAgent`)
    #[serde(default)]
    pub restic: Option<ResticConfig>,
    /// File system backup agent
    #[serde(default)]
    pub node_agent: Option<NodeAgentConfig>,
}

/// Backup engine configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VeleroConfig {
    /// Feature flags passed to the backup engine (e.g. `no-secret`, `EnableCSI`)
    #[serde(default)]
    pub feature_flags: Vec<String>,
    /// Provider plugins installed with the backup engine
    #[serde(default)]
    pub default_plugins: Vec<DefaultPlugin>,
    /// Do not create a default backup storage location
    /// When set, `backupLocations` must be empty and `backupImages` must be false
    #[serde(default)]
    pub no_default_backup_location: bool,
    /// Pod scheduling and resource configuration for the backup engine
    #[serde(default)]
    pub pod_config: Option<PodConfig>,
}

impl VeleroConfig {
    #[must_use]
    pub fn has_feature_flag(&self, flag: &str) -> bool {
        self.feature_flags.iter().any(|f| f == flag)
    }
}

/// Legacy node agent configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResticConfig {
    #[serde(default)]
    pub enable: Option<bool>,
    #[serde(default)]
    pub pod_config: Option<PodConfig>,
}

/// Node agent configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NodeAgentConfig {
    #[serde(default)]
    pub enable: Option<bool>,
    /// Uploader used for file system backups (`kopia` or `restic`)
    #[serde(default)]
    pub uploader_type: Option<String>,
    #[serde(default)]
    pub pod_config: Option<PodConfig>,
}

/// Pod-level configuration shared by the backup engine and the node agent
#[derive(Debug, Clone, Default, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PodConfig {
    /// CPU and memory requests/limits for the workload
    #[serde(default)]
    pub resource_allocations: Option<ResourceRequirements>,
}

/// Provider plugin installed with the backup engine
///
/// Plugins the validator has no table entry for deserialize into
/// [`DefaultPlugin::Other`] and keep their identifier.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deserialize,
    Serialize,
    schemars::JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum DefaultPlugin {
    Aws,
    LegacyAws,
    Gcp,
    Azure,
    Csi,
    Openshift,
    Kubevirt,
    Vsm,
    Hypershift,
    #[serde(untagged)]
    Other(String),
}

impl DefaultPlugin {
    /// Plugin identifier as written in the resource
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            DefaultPlugin::Aws => "aws",
            DefaultPlugin::LegacyAws => "legacy-aws",
            DefaultPlugin::Gcp => "gcp",
            DefaultPlugin::Azure => "azure",
            DefaultPlugin::Csi => "csi",
            DefaultPlugin::Openshift => "openshift",
            DefaultPlugin::Kubevirt => "kubevirt",
            DefaultPlugin::Vsm => "vsm",
            DefaultPlugin::Hypershift => "hypershift",
            DefaultPlugin::Other(name) => name,
        }
    }
}

impl FromStr for DefaultPlugin {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "aws" => DefaultPlugin::Aws,
            "legacy-aws" => DefaultPlugin::LegacyAws,
            "gcp" => DefaultPlugin::Gcp,
            "azure" => DefaultPlugin::Azure,
            "csi" => DefaultPlugin::Csi,
            "openshift" => DefaultPlugin::Openshift,
            "kubevirt" => DefaultPlugin::Kubevirt,
            "vsm" => DefaultPlugin::Vsm,
            "hypershift" => DefaultPlugin::Hypershift,
            other => DefaultPlugin::Other(other.to_string()),
        })
    }
}

impl fmt::Display for DefaultPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
