//! In-memory fakes shared by this crate's tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use fleetdeck_alert::{AlertSink, Notification};
use fleetdeck_core::{Deployment, DomainConfig, ProductionTarget, Project, ReadyState, Targets};
use fleetdeck_registry::{Registry, RegistryError, RegistryResult};

/// Registry fake with scripted responses and call counters.
#[derive(Default)]
pub struct FakeRegistry {
    projects: Mutex<Vec<Project>>,
    domains: HashMap<String, DomainConfig>,
    deployments: HashMap<String, Vec<Deployment>>,
    fail_listing: AtomicBool,
    unconfigured: bool,
    list_calls: AtomicUsize,
    probe_calls: AtomicUsize,
}

impl FakeRegistry {
    pub fn with_projects(self, projects: Vec<Project>) -> Self {
        *self.projects.lock().unwrap() = projects;
        self
    }

    pub fn with_domain(mut self, domain: &str, config: DomainConfig) -> Self {
        self.domains.insert(domain.to_string(), config);
        self
    }

    pub fn with_history(mut self, project_id: &str, history: Vec<Deployment>) -> Self {
        self.deployments.insert(project_id.to_string(), history);
        self
    }

    pub fn unconfigured(mut self) -> Self {
        self.unconfigured = true;
        self
    }

    /// Make subsequent `list_projects` calls fail.
    pub fn fail_listing(&self) {
        self.fail_listing.store(true, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn probe_calls(&self) -> usize {
        self.probe_calls.load(Ordering::SeqCst)
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
    fn is_configured(&self) -> bool {
        !self.unconfigured
    }

    async fn list_projects(&self, limit: usize) -> RegistryResult<Vec<Project>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(unavailable("/v9/projects"));
        }
        let projects = self.projects.lock().unwrap();
        Ok(projects.iter().take(limit).cloned().collect())
    }

    async fn domain_config(&self, domain: &str) -> RegistryResult<DomainConfig> {
        self.probe_calls.fetch_add(1, Ordering::SeqCst);
        self.domains
            .get(domain)
            .copied()
            .ok_or_else(|| unavailable(&format!("/v6/domains/{domain}/config")))
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

    async fn assign_alias(&self, _uid: &str, _alias: &str) -> RegistryResult<()> {
        Ok(())
    }
}

/// Sink fake recording every notification.
#[derive(Default)]
pub struct FakeSink {
    pub sent: Mutex<Vec<Notification>>,
    pub reject: bool,
}

impl FakeSink {
    pub fn rejecting() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reject: true,
        }
    }
}

#[async_trait]
impl AlertSink for FakeSink {
    async fn notify(&self, notification: &Notification) -> bool {
        self.sent.lock().unwrap().push(notification.clone());
        !self.reject
    }
}

/// A project whose production target binds the given domain.
pub fn project_with_domain(id: &str, domain: &str) -> Project {
    project_with_state(id, domain, ReadyState::Ready)
}

pub fn project_with_state(id: &str, domain: &str, state: ReadyState) -> Project {
    Project {
        id: id.to_string(),
        name: format!("site-{id}"),
        updated_at: None,
        targets: Some(Targets {
            production: Some(ProductionTarget {
                id: format!("dpl-{id}"),
                alias: vec![domain.to_string()],
                ready_state: state,
            }),
        }),
        alias: None,
        domain_valid: None,
    }
}
