//! Domain health probing.
//!
//! Attaches the derived `domain_valid` flag to projects. Platform
//! subdomains and domainless projects short-circuit to valid without a
//! probe; custom domains are checked against the registry's domain
//! config endpoint and fail closed on any error.

use futures::future::join_all;
use tracing::debug;

use fleetdeck_core::Project;
use fleetdeck_registry::Registry;

/// Probe a single project and attach `domain_valid`.
///
/// The fast path for platform subdomains is deliberate: there is no
/// independent DNS/SSL to validate, not a claim that the domain
/// resolves.
pub async fn probe_project(
    registry: &dyn Registry,
    platform_suffix: &str,
    mut project: Project,
) -> Project {
    let domain = project.canonical_domain().map(str::to_owned);
    let valid = match domain {
        None => true,
        Some(domain) if domain.ends_with(platform_suffix) => true,
        Some(domain) => match registry.domain_config(&domain).await {
            Ok(config) => config.is_valid(),
            Err(e) => {
                debug!(%domain, error = %e, "domain probe failed, marking invalid");
                false
            }
        },
    };
    project.domain_valid = Some(valid);
    project
}

/// Probe every project of a cycle concurrently.
///
/// The gather preserves registry order and waits for all probes to
/// settle; a slow or failing probe degrades its own project to
/// `domain_valid = false` without affecting the rest.
pub async fn probe_all(
    registry: &dyn Registry,
    platform_suffix: &str,
    projects: Vec<Project>,
) -> Vec<Project> {
    join_all(
        projects
            .into_iter()
            .map(|p| probe_project(registry, platform_suffix, p)),
    )
    .await
}
