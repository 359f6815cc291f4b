//! # Configuration
//!
//! Runtime settings for the validator binaries, loaded from environment variables.

mod validator;

pub use validator::ValidatorConfig;
