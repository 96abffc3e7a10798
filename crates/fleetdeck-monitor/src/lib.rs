//! fleetdeck-monitor — the health reconciliation loop.
//!
//! Polls the deployment registry on a fixed interval, probes custom
//! domains concurrently, and publishes the merged result as a single
//! [`HealthSnapshot`] that the embedding UI paginates over.
//!
//! # Architecture
//!
//! ```text
//! FleetMonitor
//!   ├── Background poll task (watch-channel shutdown)
//!   │   ├── Registry::list_projects  (limit 100)
//!   │   ├── probe_all → domain_valid fan-out
//!   │   └── Snapshot replaced wholesale on success
//!   ├── RefreshHandle — out-of-cadence reconcile requests
//!   └── Arc<RwLock<HealthSnapshot>> — read-only to consumers
//! ```
//!
//! A failed cycle leaves the previous snapshot and its timestamp
//! untouched; the next tick retries. The one-shot [`sweep`] scans the
//! fleet for projects in ERROR state and alerts each, and
//! [`manual_ping`] backs the per-project ping action.

pub mod actions;
pub mod monitor;
pub mod probe;
pub mod snapshot;
pub mod sweep;

#[cfg(test)]
mod testing;

pub use actions::manual_ping;
pub use monitor::{FleetMonitor, RefreshHandle};
pub use probe::{probe_all, probe_project};
pub use snapshot::{HealthSnapshot, PageView};
pub use sweep::{SweepReport, sweep};
