//! DataProtectionApplication Validator Library
//!
//! Validates DataProtectionApplication resources before they are reconciled:
//! backup and snapshot locations, default plugins and the credential secrets
//! they depend on.
//!
//! ## Quick Start
//!
//! ```rust
//! use dpa_validator::prelude::*;
//! ```
//!
//! This brings commonly used types and traits into scope. For more specific imports,
//! use the individual modules.

pub mod config;
pub mod constants;
pub mod credentials;
pub mod crd;
pub mod observability;
pub mod prelude;
pub mod store;
pub mod validation;
