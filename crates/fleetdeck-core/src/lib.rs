//! fleetdeck-core — shared domain model for the fleetdeck monitoring stack.
//!
//! Holds the serde wire model of the deployment registry (projects,
//! production targets, deployment history, domain configuration) and the
//! configuration structs the other crates are constructed from.
//!
//! Nothing in this crate talks to the network or reads ambient state;
//! configuration values are always supplied explicitly by the embedding
//! application so the whole stack stays testable with injected fakes.

pub mod config;
pub mod types;

pub use config::{AlertConfig, MonitorConfig, RegistryConfig};
pub use types::*;
