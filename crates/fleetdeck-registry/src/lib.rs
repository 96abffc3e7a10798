//! fleetdeck-registry — client for the deployment platform's REST API.
//!
//! Exposes the [`Registry`] trait as the seam between the monitoring
//! logic and the platform, plus the reqwest-backed [`HttpRegistry`]
//! implementation covering the four endpoints fleetdeck consumes:
//!
//! | Endpoint | Operation |
//! |---|---|
//! | `GET /v9/projects?limit=` | [`Registry::list_projects`] |
//! | `GET /v6/domains/{domain}/config` | [`Registry::domain_config`] |
//! | `GET /v6/deployments?projectId=&limit=` | [`Registry::list_deployments`] |
//! | `POST /v2/now/deployments/{uid}/aliases` | [`Registry::assign_alias`] |
//!
//! Calls never retry internally; retry cadence belongs to the
//! reconciliation loop, and rollback failures are operator-handled.

pub mod client;
pub mod error;

pub use client::{HttpRegistry, PROJECT_LIST_LIMIT, Registry};
pub use error::{RegistryError, RegistryResult};
