//! # Resource Requirement Validation
//!
//! Validates the CPU/memory requests and limits of the workloads the
//! application deploys: the backup engine and the node agent.

use super::error::ValidationError;
use super::quantity::validate_quantity;
use crate::crd::{DataProtectionApplication, PodConfig};
use k8s_openapi::api::core::v1::ResourceRequirements;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use std::collections::BTreeMap;

const VELERO_WORKLOAD: &str = "velero";
const NODE_AGENT_WORKLOAD: &str = "node-agent";

/// Validate `configuration.velero.podConfig.resourceAllocations`
pub fn validate_velero_resources(dpa: &DataProtectionApplication) -> Result<(), ValidationError> {
    let pod_config = dpa.velero().and_then(|velero| velero.pod_config.as_ref());
    validate_pod_resources(VELERO_WORKLOAD, pod_config)
}

/// Validate the node agent resource allocations
/// `nodeAgent.podConfig` is used when present, otherwise the legacy `restic.podConfig`
pub fn validate_node_agent_resources(
    dpa: &DataProtectionApplication,
) -> Result<(), ValidationError> {
    let Some(configuration) = dpa.spec.configuration.as_ref() else {
        return Ok(());
    };
    let pod_config = configuration
        .node_agent
        .as_ref()
        .and_then(|node_agent| node_agent.pod_config.as_ref())
        .or_else(|| {
            configuration
                .restic
                .as_ref()
                .and_then(|restic| restic.pod_config.as_ref())
        });
    validate_pod_resources(NODE_AGENT_WORKLOAD, pod_config)
}

fn validate_pod_resources(
    workload: &'static str,
    pod_config: Option<&PodConfig>,
) -> Result<(), ValidationError> {
    let Some(requirements) = pod_config.and_then(|pc| pc.resource_allocations.as_ref()) else {
        return Ok(());
    };
    validate_requirements(workload, requirements)
}

fn validate_requirements(
    workload: &'static str,
    requirements: &ResourceRequirements,
) -> Result<(), ValidationError> {
    validate_quantities(workload, "requests", requirements.requests.as_ref())?;
    validate_quantities(workload, "limits", requirements.limits.as_ref())
}

fn validate_quantities(
    workload: &'static str,
    section: &str,
    quantities: Option<&BTreeMap<String, Quantity>>,
) -> Result<(), ValidationError> {
    for (resource, quantity) in quantities.into_iter().flatten() {
        if let Err(e) = validate_quantity(&quantity.0) {
            return Err(ValidationError::ResourceRequirements {
                workload,
                field: format!("{section}.{resource}"),
                value: quantity.0.clone(),
                reason: e.to_string(),
            });
        }
    }
    Ok(())
}
