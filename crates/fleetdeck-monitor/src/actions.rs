//! User-triggered actions outside the timer cadence.

use tracing::info;

use fleetdeck_alert::{AlertSink, Notification};
use fleetdeck_core::Project;

use crate::monitor::RefreshHandle;

/// Send a manual health ping for one project and request a fresh
/// reconciliation afterwards.
///
/// Returns whether the notification was delivered, so the invoking UI
/// can confirm or report the outcome.
pub async fn manual_ping(
    sink: &dyn AlertSink,
    project: &Project,
    refresh: Option<&RefreshHandle>,
) -> bool {
    let delivered = sink.notify(&Notification::manual_ping(project)).await;
    info!(project = %project.name, delivered, "manual ping");
    if let Some(refresh) = refresh {
        refresh.request();
    }
    delivered
}
