//! fleetdeck-rollback — roll a project's production alias back to the
//! previous healthy deployment.
//!
//! Split into a pure selection policy (given a deployment history,
//! pick the target) that unit tests cover exhaustively, and a
//! side-effecting orchestrator that fetches history, re-points the
//! alias, alerts on the outcome, and requests a fresh reconciliation.
//!
//! Rollback is strictly operator-initiated. It must never run from the
//! timer loop, and callers are required to obtain explicit user
//! confirmation first: an accidental rollback is a production incident.

pub mod error;
pub mod orchestrator;
pub mod policy;

#[cfg(test)]
mod testing;

pub use error::{RollbackError, RollbackResult};
pub use orchestrator::{HISTORY_LIMIT, RollbackOrchestrator, RollbackOutcome};
pub use policy::select_rollback_target;
