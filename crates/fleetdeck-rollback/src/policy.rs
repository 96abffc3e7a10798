//! Rollback target selection.

use fleetdeck_core::{Deployment, ReadyState};

/// Pick the deployment to roll back to: the first entry past index 0
/// whose state is READY.
///
/// The history is taken in the order the registry returned it, which
/// is assumed newest-first; the payload carries no creation timestamp
/// to re-sort by. Index 0 is the current deployment and is never a
/// candidate.
pub fn select_rollback_target(history: &[Deployment]) -> Option<&Deployment> {
    history
        .iter()
        .skip(1)
        .find(|d| d.state == ReadyState::Ready)
}
