//! In-memory fakes for the rollback tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use fleetdeck_alert::{AlertSink, Notification};
use fleetdeck_core::{Deployment, DomainConfig, ProductionTarget, Project, ReadyState, Targets};
use fleetdeck_registry::{Registry, RegistryError, RegistryResult};

/// Registry fake scripted with deployment histories; records alias
/// writes.
#[derive(Default)]
pub struct FakeRegistry {
    deployments: HashMap<String, Vec<Deployment>>,
    alias_writes: Mutex<Vec<(String, String)>>,
    fail_alias_writes: bool,
}

impl FakeRegistry {
    pub fn with_history(mut self, project_id: &str, history: Vec<Deployment>) -> Self {
        self.deployments.insert(project_id.to_string(), history);
        self
    }

    pub fn failing_alias_writes(mut self) -> Self {
        self.fail_alias_writes = true;
        self
    }

    pub fn alias_writes(&self) -> Vec<(String, String)> {
        self.alias_writes.lock().unwrap().clone()
    }
}

fn unavailable(endpoint: &str) -> RegistryError {
    RegistryError::Status {
        status: 503,
        endpoint: endpoint.to_string(),
    }
}

#[async_trait]
impl Registry for FakeRegistry {
    async fn list_projects(&self, _limit: usize) -> RegistryResult<Vec<Project>> {
        Ok(Vec::new())
    }

    async fn domain_config(&self, domain: &str) -> RegistryResult<DomainConfig> {
        Err(unavailable(&format!("/v6/domains/{domain}/config")))
    }

    async fn list_deployments(
        &self,
        project_id: &str,
        limit: usize,
    ) -> RegistryResult<Vec<Deployment>> {
        let history = self
            .deployments
            .get(project_id)
            .ok_or_else(|| unavailable("/v6/deployments"))?;
        Ok(history.iter().take(limit).cloned().collect())
    }

    async fn assign_alias(&self, uid: &str, alias: &str) -> RegistryResult<()> {
        if self.fail_alias_writes {
            return Err(unavailable("/v2/now/deployments"));
        }
        self.alias_writes
            .lock()
            .unwrap()
            .push((uid.to_string(), alias.to_string()));
        Ok(())
    }
}

/// Sink fake recording every notification.
#[derive(Default)]
pub struct FakeSink {
    pub sent: Mutex<Vec<Notification>>,
}

#[async_trait]
impl AlertSink for FakeSink {
    async fn notify(&self, notification: &Notification) -> bool {
        self.sent.lock().unwrap().push(notification.clone());
        true
    }
}

/// A project optionally binding a production domain.
pub fn project(id: &str, domain: Option<&str>) -> Project {
    Project {
        id: id.to_string(),
        name: format!("site-{id}"),
        updated_at: None,
        targets: Some(Targets {
            production: Some(ProductionTarget {
                id: "dpl-current".to_string(),
                alias: domain.map(|d| vec![d.to_string()]).unwrap_or_default(),
                ready_state: ReadyState::Error,
            }),
        }),
        alias: None,
        domain_valid: None,
    }
}

/// History where the current deployment is broken and `C` is the first
/// READY entry past it.
pub fn ready_history() -> Vec<Deployment> {
    vec![
        Deployment { uid: "A".to_string(), state: ReadyState::Error },
        Deployment { uid: "B".to_string(), state: ReadyState::Building },
        Deployment { uid: "C".to_string(), state: ReadyState::Ready },
        Deployment { uid: "D".to_string(), state: ReadyState::Ready },
    ]
}
