//! Execution of a rollback against the registry.

use std::sync::Arc;

use tracing::{info, warn};

use fleetdeck_alert::{AlertSink, Notification};
use fleetdeck_core::{DeploymentUid, Project, ProjectId};
use fleetdeck_monitor::RefreshHandle;
use fleetdeck_registry::Registry;

use crate::error::{RollbackError, RollbackResult};
use crate::policy::select_rollback_target;

/// Deployment-history entries fetched per rollback. The target is
/// always within the last few deployments; anything older is an
/// operator decision, not a rollback.
pub const HISTORY_LIMIT: usize = 5;

/// Outcome details of a successful rollback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollbackOutcome {
    pub project_id: ProjectId,
    /// Deployment the production alias now points at.
    pub target_uid: DeploymentUid,
    /// The re-pointed alias.
    pub alias: String,
}

/// Drives rollbacks: history fetch, target selection, alias write,
/// outcome alert, refresh request.
pub struct RollbackOrchestrator {
    registry: Arc<dyn Registry>,
    sink: Option<Arc<dyn AlertSink>>,
    refresh: Option<RefreshHandle>,
}

impl RollbackOrchestrator {
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self {
            registry,
            sink: None,
            refresh: None,
        }
    }

    /// Alert sink notified of rollback outcomes.
    pub fn with_sink(mut self, sink: Arc<dyn AlertSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Monitor handle to refresh the snapshot after a successful
    /// rollback.
    pub fn with_refresh(mut self, refresh: RefreshHandle) -> Self {
        self.refresh = Some(refresh);
        self
    }

    /// Roll the project's production alias back to the previous READY
    /// deployment.
    ///
    /// Callers must obtain explicit user confirmation before invoking
    /// this: it mutates production routing. No retry is attempted on
    /// failure; the outcome is reported to the caller (and to the
    /// alert sink when one is configured) for a human to act on.
    pub async fn rollback(&self, project: &Project) -> RollbackResult<RollbackOutcome> {
        let result = self.execute(project).await;
        match &result {
            Ok(outcome) => {
                info!(
                    project = %project.name,
                    target = %outcome.target_uid,
                    alias = %outcome.alias,
                    "rollback complete"
                );
                self.notify(Notification::rollback_complete(
                    project,
                    &outcome.target_uid,
                    &outcome.alias,
                ))
                .await;
                if let Some(refresh) = &self.refresh {
                    refresh.request();
                }
            }
            Err(e) => {
                warn!(project = %project.name, error = %e, "rollback failed");
                self.notify(Notification::rollback_failed(project, &e.to_string()))
                    .await;
            }
        }
        result
    }

    async fn execute(&self, project: &Project) -> RollbackResult<RollbackOutcome> {
        let history = self
            .registry
            .list_deployments(&project.id, HISTORY_LIMIT)
            .await?;
        let target = select_rollback_target(&history).ok_or(RollbackError::NoSuitableTarget)?;
        let alias = project
            .canonical_domain()
            .ok_or_else(|| RollbackError::NoAliasedDomain(project.name.clone()))?
            .to_owned();

        self.registry.assign_alias(&target.uid, &alias).await?;

        Ok(RollbackOutcome {
            project_id: project.id.clone(),
            target_uid: target.uid.clone(),
            alias,
        })
    }

    async fn notify(&self, notification: Notification) {
        if let Some(sink) = &self.sink {
            if !sink.notify(&notification).await {
                warn!(title = %notification.title, "rollback outcome alert not delivered");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeRegistry, FakeSink, project, ready_history};
    use fleetdeck_core::ReadyState;
    use tokio::sync::mpsc;

    fn orchestrator(registry: FakeRegistry) -> (Arc<FakeRegistry>, RollbackOrchestrator) {
        let registry = Arc::new(registry);
        (registry.clone(), RollbackOrchestrator::new(registry))
    }

    #[tokio::test]
    async fn rollback_repoints_alias_to_previous_ready_deployment() {
        let (registry, orchestrator) =
            orchestrator(FakeRegistry::default().with_history("prj_1", ready_history()));
        let project = project("prj_1", Some("acme.example.com"));

        let outcome = orchestrator.rollback(&project).await.unwrap();
        assert_eq!(outcome.target_uid, "C");
        assert_eq!(outcome.alias, "acme.example.com");

        let writes = registry.alias_writes();
        assert_eq!(writes, vec![("C".to_string(), "acme.example.com".to_string())]);
    }

    #[tokio::test]
    async fn single_entry_history_fails_without_alias_write() {
        let history = vec![fleetdeck_core::Deployment {
            uid: "A".to_string(),
            state: ReadyState::Ready,
        }];
        let (registry, orchestrator) =
            orchestrator(FakeRegistry::default().with_history("prj_1", history));
        let project = project("prj_1", Some("acme.example.com"));

        let err = orchestrator.rollback(&project).await.unwrap_err();
        assert!(matches!(err, RollbackError::NoSuitableTarget));
        assert!(registry.alias_writes().is_empty());
    }

    #[tokio::test]
    async fn missing_domain_fails_without_alias_write() {
        let (registry, orchestrator) =
            orchestrator(FakeRegistry::default().with_history("prj_1", ready_history()));
        let project = project("prj_1", None);

        let err = orchestrator.rollback(&project).await.unwrap_err();
        assert!(matches!(err, RollbackError::NoAliasedDomain(_)));
        assert!(registry.alias_writes().is_empty());
    }

    #[tokio::test]
    async fn history_fetch_failure_propagates() {
        let (_, orchestrator) = orchestrator(FakeRegistry::default());
        let project = project("prj_unknown", Some("acme.example.com"));

        let err = orchestrator.rollback(&project).await.unwrap_err();
        assert!(matches!(err, RollbackError::Registry(_)));
    }

    #[tokio::test]
    async fn alias_write_failure_propagates() {
        let registry = FakeRegistry::default()
            .with_history("prj_1", ready_history())
            .failing_alias_writes();
        let (_, orchestrator) = orchestrator(registry);
        let project = project("prj_1", Some("acme.example.com"));

        let err = orchestrator.rollback(&project).await.unwrap_err();
        assert!(matches!(err, RollbackError::Registry(_)));
    }

    #[tokio::test]
    async fn successful_rollback_requests_refresh_and_alerts() {
        let sink = Arc::new(FakeSink::default());
        let (tx, mut rx) = mpsc::channel(1);
        let registry = Arc::new(FakeRegistry::default().with_history("prj_1", ready_history()));
        let orchestrator = RollbackOrchestrator::new(registry)
            .with_sink(sink.clone())
            .with_refresh(RefreshHandle::new(tx));
        let project = project("prj_1", Some("acme.example.com"));

        orchestrator.rollback(&project).await.unwrap();

        assert!(rx.try_recv().is_ok());
        let sent = sink.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].title.starts_with("Rollback complete"));
    }

    #[tokio::test]
    async fn failed_rollback_alerts_but_does_not_refresh() {
        let sink = Arc::new(FakeSink::default());
        let (tx, mut rx) = mpsc::channel(1);
        let registry = Arc::new(FakeRegistry::default());
        let orchestrator = RollbackOrchestrator::new(registry)
            .with_sink(sink.clone())
            .with_refresh(RefreshHandle::new(tx));
        let project = project("prj_1", Some("acme.example.com"));

        assert!(orchestrator.rollback(&project).await.is_err());

        assert!(rx.try_recv().is_err());
        let sent = sink.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].title.starts_with("Rollback failed"));
    }
}
