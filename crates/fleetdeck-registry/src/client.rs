//! The `Registry` trait and its HTTP implementation.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use fleetdeck_core::{Deployment, DomainConfig, Project, RegistryConfig};

use crate::error::{RegistryError, RegistryResult};

/// Fixed page size for the project listing. The registry is queried
/// once with this limit and never paginated further; fleets beyond it
/// are truncated. Known limitation.
pub const PROJECT_LIST_LIMIT: usize = 100;

/// Read/write surface of the deployment registry.
///
/// The monitoring and rollback crates depend on this trait only, so
/// tests can inject in-memory fakes.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Whether the client holds usable credentials. The reconciliation
    /// loop stays inactive while this is false.
    fn is_configured(&self) -> bool {
        true
    }

    /// List up to `limit` hosted projects, in registry order.
    async fn list_projects(&self, limit: usize) -> RegistryResult<Vec<Project>>;

    /// Query DNS/SSL configuration state for a custom domain.
    async fn domain_config(&self, domain: &str) -> RegistryResult<DomainConfig>;

    /// Fetch up to `limit` recent deployments for a project, in the
    /// order the registry returns them (newest first).
    async fn list_deployments(
        &self,
        project_id: &str,
        limit: usize,
    ) -> RegistryResult<Vec<Deployment>>;

    /// Re-point `alias` at the deployment identified by `uid`. This is
    /// the only write operation and mutates production routing.
    async fn assign_alias(&self, uid: &str, alias: &str) -> RegistryResult<()>;
}

#[derive(Debug, Deserialize)]
struct ProjectList {
    #[serde(default)]
    projects: Vec<Project>,
}

#[derive(Debug, Deserialize)]
struct DeploymentList {
    #[serde(default)]
    deployments: Vec<Deployment>,
}

/// Registry client backed by reqwest.
pub struct HttpRegistry {
    http: reqwest::Client,
    config: RegistryConfig,
}

impl HttpRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let mut req = self
            .http
            .get(format!("{}{}", self.config.base_url, path))
            .bearer_auth(&self.config.token);
        if let Some(team) = &self.config.team_id {
            req = req.query(&[("teamId", team)]);
        }
        req
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        let mut req = self
            .http
            .post(format!("{}{}", self.config.base_url, path))
            .bearer_auth(&self.config.token);
        if let Some(team) = &self.config.team_id {
            req = req.query(&[("teamId", team)]);
        }
        req
    }
}

fn check_status(resp: reqwest::Response, endpoint: &str) -> RegistryResult<reqwest::Response> {
    if resp.status().is_success() {
        Ok(resp)
    } else {
        Err(RegistryError::Status {
            status: resp.status().as_u16(),
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl Registry for HttpRegistry {
    fn is_configured(&self) -> bool {
        self.config.is_active()
    }

    async fn list_projects(&self, limit: usize) -> RegistryResult<Vec<Project>> {
        let resp = self
            .get("/v9/projects")
            .query(&[("limit", limit)])
            .send()
            .await?;
        let body: ProjectList = check_status(resp, "/v9/projects")?.json().await?;
        debug!(count = body.projects.len(), "listed projects");
        Ok(body.projects)
    }

    async fn domain_config(&self, domain: &str) -> RegistryResult<DomainConfig> {
        let path = format!("/v6/domains/{domain}/config");
        let resp = self.get(&path).send().await?;
        Ok(check_status(resp, &path)?.json().await?)
    }

    async fn list_deployments(
        &self,
        project_id: &str,
        limit: usize,
    ) -> RegistryResult<Vec<Deployment>> {
        let resp = self
            .get("/v6/deployments")
            .query(&[("projectId", project_id)])
            .query(&[("limit", limit)])
            .send()
            .await?;
        let body: DeploymentList = check_status(resp, "/v6/deployments")?.json().await?;
        Ok(body.deployments)
    }

    async fn assign_alias(&self, uid: &str, alias: &str) -> RegistryResult<()> {
        let path = format!("/v2/now/deployments/{uid}/aliases");
        let resp = self
            .post(&path)
            .json(&json!({ "alias": alias }))
            .send()
            .await?;
        check_status(resp, &path)?;
        debug!(%uid, %alias, "production alias reassigned");
        Ok(())
    }
}
