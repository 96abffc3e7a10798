//! Domain types mirrored from the deployment registry's JSON payloads.
//!
//! Field names follow the registry's camelCase wire format. The only
//! field the registry never sends is `domain_valid` — that is derived by
//! the domain prober and attached during reconciliation.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Opaque stable identifier for a project.
pub type ProjectId = String;

/// Unique identifier for a single deployment.
pub type DeploymentUid = String;

// ── Build state ────────────────────────────────────────────────────

/// Build/deploy status of a deployment.
///
/// The registry reports transitional states beyond the ones listed; any
/// unrecognized value maps to `Unknown` rather than failing the decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Ready,
    Error,
    Building,
    Queued,
    Initializing,
    Canceled,
    Unknown,
}

impl ReadyState {
    /// Parse the registry's SCREAMING_SNAKE_CASE state string.
    pub fn from_api(s: &str) -> Self {
        match s {
            "READY" => ReadyState::Ready,
            "ERROR" => ReadyState::Error,
            "BUILDING" => ReadyState::Building,
            "QUEUED" => ReadyState::Queued,
            "INITIALIZING" => ReadyState::Initializing,
            "CANCELED" => ReadyState::Canceled,
            _ => ReadyState::Unknown,
        }
    }

    /// The wire spelling of this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadyState::Ready => "READY",
            ReadyState::Error => "ERROR",
            ReadyState::Building => "BUILDING",
            ReadyState::Queued => "QUEUED",
            ReadyState::Initializing => "INITIALIZING",
            ReadyState::Canceled => "CANCELED",
            ReadyState::Unknown => "UNKNOWN",
        }
    }

    /// Whether this state is neither settled-good nor settled-bad.
    pub fn is_in_progress(&self) -> bool {
        !matches!(self, ReadyState::Ready | ReadyState::Error)
    }
}

impl fmt::Display for ReadyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ReadyState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ReadyState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ReadyState::from_api(&s))
    }
}

// ── Project ────────────────────────────────────────────────────────

/// A hosted project as returned by the registry's project listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    /// Unix timestamp (milliseconds) of the last registry-side update.
    #[serde(default)]
    pub updated_at: Option<u64>,
    #[serde(default)]
    pub targets: Option<Targets>,
    /// Top-level alias fallback, used when no production target is set.
    #[serde(default)]
    pub alias: Option<Vec<String>>,
    /// Derived DNS/SSL health, attached by the domain prober. Never
    /// present in registry responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_valid: Option<bool>,
}

/// Per-environment deployment targets of a project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Targets {
    #[serde(default)]
    pub production: Option<ProductionTarget>,
}

/// The currently live production deployment and its bound aliases.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductionTarget {
    pub id: DeploymentUid,
    /// Bound domains, first entry is canonical.
    #[serde(default)]
    pub alias: Vec<String>,
    pub ready_state: ReadyState,
}

impl Project {
    /// The canonical production domain: first production-target alias,
    /// falling back to the first top-level alias.
    pub fn canonical_domain(&self) -> Option<&str> {
        self.production_target()
            .and_then(|t| t.alias.first())
            .or_else(|| self.alias.as_deref().and_then(|a| a.first()))
            .map(String::as_str)
    }

    /// The production target, if one is set.
    pub fn production_target(&self) -> Option<&ProductionTarget> {
        self.targets.as_ref().and_then(|t| t.production.as_ref())
    }

    /// Build state of the production deployment. A project with no
    /// production target classifies as `Ready`.
    pub fn production_state(&self) -> ReadyState {
        self.production_target()
            .map(|t| t.ready_state)
            .unwrap_or(ReadyState::Ready)
    }

    /// Derived domain health; `false` until the prober has run.
    pub fn domain_ok(&self) -> bool {
        self.domain_valid.unwrap_or(false)
    }
}

// ── Deployment history ─────────────────────────────────────────────

/// One entry from a project's deployment history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Deployment {
    pub uid: DeploymentUid,
    pub state: ReadyState,
}

// ── Domain configuration ───────────────────────────────────────────

/// Result of the registry's domain-configuration probe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DomainConfig {
    pub configured: bool,
    pub misconfigured: bool,
}

impl DomainConfig {
    /// DNS/SSL is healthy when the domain is configured and not flagged
    /// as misconfigured.
    pub fn is_valid(&self) -> bool {
        self.configured && !self.misconfigured
    }
}
