//! # CRD Generator
//!
//! Generates the CustomResourceDefinition YAML for the resources the validator reads.
//!
//! ## Usage
//!
//! ```bash
//! # Generate CRD YAML
//! cargo run --bin crdgen > config/crd/oadp.openshift.io.yaml
//!
//! # Generate and apply directly
//! cargo run --bin crdgen | kubectl apply -f -
//! ```

use dpa_validator::crd::{CloudStorage, DataProtectionApplication};
use kube::core::CustomResourceExt;
use std::process::ExitCode;

fn main() -> ExitCode {
    let crds = [DataProtectionApplication::crd(), CloudStorage::crd()];

    for crd in &crds {
        match serde_yaml::to_string(crd) {
            Ok(yaml) => print!("---\n{yaml}"),
            Err(e) => {
                eprintln!("Failed to serialize CRD to YAML: {e}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
