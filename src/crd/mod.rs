//! # Custom Resource Definitions
//!
//! CRD types read by the validator.
//!
//! ## Module Structure
//!
//! - `spec.rs` - DataProtectionApplication specification
//! - `velero.rs` - Backup engine, plugins and node agent configuration
//! - `location.rs` - Backup storage and volume snapshot locations
//! - `cloud_storage.rs` - CloudStorage bucket resource

mod cloud_storage;
mod location;
mod spec;
mod velero;

// Re-export all public types
pub use cloud_storage::{CloudStorage, CloudStorageProvider, CloudStorageSpec};
pub use location::{
    strip_velero_prefix, BackupLocation, BackupStorageLocationSpec, CloudStorageLocation,
    CloudStorageRef, CredentialRef, ObjectStorageLocation, SnapshotLocation,
    VolumeSnapshotLocationSpec,
};
pub use spec::{DataProtectionApplication, DataProtectionApplicationSpec};
pub use velero::{
    ApplicationConfig, DefaultPlugin, NodeAgentConfig, PodConfig, ResticConfig, VeleroConfig,
};
