//! Fundability assessment engine and its service boundary.
//!
//! The `assessment` module holds the pure scoring core (criteria catalog,
//! scoring engine, recommendation generator, lender matching) together with
//! the repository traits and axum router that expose it. Configuration,
//! telemetry, and error plumbing live alongside in their own modules.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
