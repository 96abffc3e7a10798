//! Scheduled error sweep over the fleet.
//!
//! One-shot scan intended for a cron-style caller: list the fleet,
//! raise a down alert for every project whose production deployment is
//! in ERROR state, and report counts. Alert delivery stays best-effort;
//! only the registry listing itself can fail the sweep.

use tracing::{info, warn};

use fleetdeck_alert::{AlertSink, Notification};
use fleetdeck_core::ReadyState;
use fleetdeck_registry::{PROJECT_LIST_LIMIT, Registry, RegistryResult};

/// Outcome counts of one sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    /// Projects examined.
    pub checked: usize,
    /// Projects found in ERROR state.
    pub issues: usize,
    /// Down alerts actually delivered.
    pub delivered: usize,
}

/// Scan the fleet and alert on every project in ERROR state.
pub async fn sweep(registry: &dyn Registry, sink: &dyn AlertSink) -> RegistryResult<SweepReport> {
    let projects = registry.list_projects(PROJECT_LIST_LIMIT).await?;
    let checked = projects.len();

    let down: Vec<_> = projects
        .iter()
        .filter(|p| p.production_state() == ReadyState::Error)
        .collect();

    let mut delivered = 0;
    for project in &down {
        if sink.notify(&Notification::project_down(project)).await {
            delivered += 1;
        } else {
            warn!(project = %project.name, "down alert delivery failed");
        }
    }

    let report = SweepReport {
        checked,
        issues: down.len(),
        delivered,
    };
    info!(checked = report.checked, issues = report.issues, "fleet sweep complete");
    Ok(report)
}
