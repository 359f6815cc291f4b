//! # CloudStorage
//!
//! Bucket resource referenced by `bucket.cloudStorageRef` in a backup location.
//! The validator only reads it to learn which provider backs the bucket.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(kube::CustomResource, Debug, Clone, Deserialize, Serialize, schemars::JsonSchema)]
#[kube(
    kind = "CloudStorage",
    group = "oadp.openshift.io",
    version = "v1alpha1",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct CloudStorageSpec {
    /// Bucket name in the provider
    pub name: String,
    pub provider: CloudStorageProvider,
}

/// Provider hosting a CloudStorage bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CloudStorageProvider {
    Aws,
    Gcp,
    Azure,
}

impl CloudStorageProvider {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CloudStorageProvider::Aws => "aws",
            CloudStorageProvider::Gcp => "gcp",
            CloudStorageProvider::Azure => "azure",
        }
    }
}

impl fmt::Display for CloudStorageProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
