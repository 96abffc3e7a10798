//! Configuration structs for the monitoring stack.
//!
//! All values are supplied by the embedding application at construction
//! time; core logic never reads environment variables or other ambient
//! state.

use std::time::Duration;

/// Default base URL of the deployment registry API.
pub const DEFAULT_REGISTRY_BASE: &str = "https://api.vercel.com";

/// Default base URL of the push notification service.
pub const DEFAULT_ALERT_BASE: &str = "https://ntfy.sh";

/// Reserved subdomain suffix of platform-issued domains. Domains under
/// this suffix carry no independent DNS/SSL to validate.
pub const DEFAULT_PLATFORM_SUFFIX: &str = ".vercel.app";

/// Interval between reconciliation cycles.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Projects shown per page in the fleet view.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Access configuration for the deployment registry.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub base_url: String,
    /// Bearer token; an empty token leaves the monitor inactive.
    pub token: String,
    /// Optional team-scoping identifier, appended as a `teamId` query
    /// parameter on every request when present.
    pub team_id: Option<String>,
}

impl RegistryConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_REGISTRY_BASE.to_string(),
            token: token.into(),
            team_id: None,
        }
    }

    pub fn with_team(mut self, team_id: impl Into<String>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }

    /// Whether a usable token is configured.
    pub fn is_active(&self) -> bool {
        !self.token.is_empty()
    }
}

/// Access configuration for the push notification service.
#[derive(Debug, Clone)]
pub struct AlertConfig {
    pub base_url: String,
    /// Topic the notifications are published to.
    pub topic: String,
    /// Optional bearer token; anonymous topics are supported.
    pub token: Option<String>,
}

impl AlertConfig {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_ALERT_BASE.to_string(),
            topic: topic.into(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Tuning knobs for the reconciliation loop and fleet view.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Interval between timer-driven reconciliation cycles.
    pub poll_interval: Duration,
    /// Projects per page in the paginated fleet view.
    pub page_size: usize,
    /// Platform-issued subdomain suffix that short-circuits the domain
    /// prober.
    pub platform_suffix: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            page_size: DEFAULT_PAGE_SIZE,
            platform_suffix: DEFAULT_PLATFORM_SUFFIX.to_string(),
        }
    }
}
