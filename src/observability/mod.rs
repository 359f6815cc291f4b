//! # Observability
//!
//! - `logging`: tracing subscriber setup for the validator binaries

pub mod logging;

pub use logging::init_tracing;
