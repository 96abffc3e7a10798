//! Notification shapes sent by fleetdeck.

use fleetdeck_core::{Project, ReadyState};

/// Notification priority on the push service's 1..=5 integer scale,
/// higher is more urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Min,
    Low,
    Default,
    High,
    Urgent,
}

impl Priority {
    /// Wire value for the `Priority` header.
    pub fn as_header(self) -> &'static str {
        match self {
            Priority::Min => "1",
            Priority::Low => "2",
            Priority::Default => "3",
            Priority::High => "4",
            Priority::Urgent => "5",
        }
    }
}

/// A fully formatted push notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub priority: Priority,
    pub tags: Vec<String>,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>, priority: Priority) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            priority,
            tags: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Manual health ping for a single project. Error state escalates
    /// to urgent priority with alarm tags.
    pub fn manual_ping(project: &Project) -> Self {
        let state = project.production_state();
        let domain = project.canonical_domain().unwrap_or("N/A");
        let body = format!(
            "Node: {}\nStatus: {}\nDomain: {}\nSSL Health: {}",
            project.name,
            state,
            domain,
            if project.domain_ok() { "PASS" } else { "FAIL" },
        );
        let (priority, tags) = if state == ReadyState::Error {
            (Priority::Urgent, ["rotating_light", "skull"])
        } else {
            (Priority::Default, ["rocket", "white_check_mark"])
        };
        Notification::new(format!("Manual Ping: {}", project.name), body, priority).with_tags(tags)
    }

    /// Down alert raised by the error sweep for a project whose
    /// production deployment is in ERROR state.
    ///
    /// Titles travel as HTTP header values and must stay visible
    /// ASCII; the alarm emoji lives in the tags instead.
    pub fn project_down(project: &Project) -> Self {
        Notification::new(
            format!("PROJECT DOWN: {}", project.name),
            format!(
                "{} is in ERROR state. Manual intervention required.",
                project.name
            ),
            Priority::Urgent,
        )
        .with_tags(["rotating_light", "skull"])
    }

    /// Successful rollback outcome.
    pub fn rollback_complete(project: &Project, target_uid: &str, alias: &str) -> Self {
        Notification::new(
            format!("Rollback complete: {}", project.name),
            format!("Production alias {alias} re-pointed to deployment {target_uid}."),
            Priority::High,
        )
        .with_tags(["rewind", "white_check_mark"])
    }

    /// Failed rollback outcome.
    pub fn rollback_failed(project: &Project, reason: &str) -> Self {
        Notification::new(
            format!("Rollback failed: {}", project.name),
            format!("Rollback of {} was not applied: {reason}", project.name),
            Priority::Urgent,
        )
        .with_tags(["rotating_light", "x"])
    }
}
