//! # Credentials
//!
//! Provider credential bookkeeping shared by the validators:
//!
//! - `plugins` - static metadata per default plugin
//! - `resolve` - which secret a location reads its credentials from
//! - `needs` - which providers rely on their plugin's default secret

mod needs;
mod plugins;
mod resolve;

pub use needs::{CredentialNeed, DefaultCredentialNeeds, PluginCheckContext};
pub use plugins::{plugin_metadata, provider_metadata, PluginMetadata};
pub use resolve::{resolve_backup_location_secret, secrets_for_provider, SecretCoordinates};
