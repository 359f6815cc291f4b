//! # DataProtectionApplication Validator
//!
//! Validates a DataProtectionApplication before the operator reconciles it.
//!
//! ## Usage
//!
//! ```bash
//! # Validate the resource in the cluster (POD_NAMESPACE / DPA_NAME defaults)
//! dpa-validator check
//!
//! # Validate a named resource
//! dpa-validator check --namespace openshift-adp --name velero-sample
//!
//! # Validate a manifest from disk, reading secrets from the cluster
//! dpa-validator file dpa.yaml
//!
//! # Validate a manifest without a cluster, secrets taken from the manifest
//! dpa-validator file dpa.yaml --offline
//!
//! # Machine-readable verdict
//! dpa-validator check --output json
//! ```
//!
//! Exits with status 0 when the resource is valid and 1 otherwise.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dpa_validator::config::ValidatorConfig;
use dpa_validator::observability::init_tracing;
use dpa_validator::store::{
    ConfigurationStore, InMemoryStore, KubeStore, ResourceKey, SecretStore,
};
use dpa_validator::validation::{DpaValidator, ValidationContext};
use kube::Client;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

/// DataProtectionApplication validator
#[derive(Parser)]
#[command(name = "dpa-validator")]
#[command(
    about = "Validate DataProtectionApplication resources",
    long_about = None,
    after_help = "\
Examples:
  dpa-validator check
  dpa-validator check --namespace openshift-adp --name dpa
  dpa-validator file dpa.yaml --offline
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verdict format on stdout
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a DataProtectionApplication in the cluster
    Check {
        /// Namespace of the resource (defaults to POD_NAMESPACE)
        #[arg(short, long)]
        namespace: Option<String>,

        /// Name of the resource (defaults to DPA_NAME)
        #[arg(long)]
        name: Option<String>,
    },
    /// Validate the DataProtectionApplications in a manifest file
    File {
        /// Multi-document YAML file
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Namespace for documents that do not set one (defaults to POD_NAMESPACE)
        #[arg(short, long)]
        namespace: Option<String>,

        /// Read secrets from the manifest instead of the cluster
        #[arg(long)]
        offline: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // rustls 0.23 needs a process-wide crypto provider before the kube client is built
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        anyhow::bail!("Failed to install rustls crypto provider");
    }

    let config = ValidatorConfig::from_env();
    init_tracing(&config)?;

    let cli = Cli::parse();
    let valid = match cli.command {
        Commands::Check { namespace, name } => {
            let key = ResourceKey::new(
                namespace.unwrap_or(config.namespace),
                name.unwrap_or(config.dpa_name),
            );
            check_command(key, cli.output).await?
        }
        Commands::File {
            path,
            namespace,
            offline,
        } => {
            file_command(
                &path,
                &namespace.unwrap_or(config.namespace),
                offline,
                cli.output,
            )
            .await?
        }
    };

    Ok(if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn kube_store() -> Result<KubeStore> {
    let client = Client::try_default()
        .await
        .context("Failed to create Kubernetes client. Ensure kubeconfig is configured.")?;
    Ok(KubeStore::new(client))
}

async fn check_command(key: ResourceKey, output: OutputFormat) -> Result<bool> {
    let store = kube_store().await?;
    Ok(run_validation(key, &store, &store, output).await)
}

async fn file_command(
    path: &Path,
    namespace: &str,
    offline: bool,
    output: OutputFormat,
) -> Result<bool> {
    let yaml = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest {}", path.display()))?;

    let mut manifests = InMemoryStore::new();
    let loaded = manifests
        .load_manifests(&yaml, namespace)
        .with_context(|| format!("Failed to load manifest {}", path.display()))?;
    if loaded.applications.is_empty() {
        anyhow::bail!(
            "No DataProtectionApplication found in {}",
            path.display()
        );
    }
    info!(
        "Loaded {} DataProtectionApplication(s), {} CloudStorage(s) and {} Secret(s) from {}",
        loaded.applications.len(),
        loaded.cloud_storages,
        loaded.secrets,
        path.display()
    );

    let cluster;
    let secrets: &dyn SecretStore = if offline {
        &manifests
    } else {
        cluster = kube_store().await?;
        &cluster
    };

    let mut all_valid = true;
    for key in loaded.applications {
        all_valid &= run_validation(key, &manifests, secrets, output).await;
    }
    Ok(all_valid)
}

/// Validate one resource and report the verdict on stdout
async fn run_validation(
    key: ResourceKey,
    configs: &dyn ConfigurationStore,
    secrets: &dyn SecretStore,
    output: OutputFormat,
) -> bool {
    let validator = DpaValidator::new(ValidationContext::new(key), configs, secrets);
    let result = validator.validate().await;
    let key = &validator.context().key;

    match output {
        OutputFormat::Text => match &result {
            Ok(()) => println!("{key}: valid"),
            Err(e) => println!("{key}: invalid ({}): {e}", e.kind()),
        },
        OutputFormat::Json => {
            let verdict = match &result {
                Ok(()) => json!({ "resource": key.to_string(), "valid": true }),
                Err(e) => json!({
                    "resource": key.to_string(),
                    "valid": false,
                    "kind": e.kind().as_str(),
                    "error": e.to_string(),
                }),
            };
            println!("{verdict}");
        }
    }
    result.is_ok()
}
