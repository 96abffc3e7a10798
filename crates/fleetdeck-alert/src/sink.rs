//! Delivery of notifications to the push service.

use async_trait::async_trait;
use tracing::{debug, warn};

use fleetdeck_core::AlertConfig;

use crate::message::Notification;

/// Outbound notification channel.
///
/// Delivery is best-effort: implementations report success as a bool
/// and must not propagate errors to the caller.
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn notify(&self, notification: &Notification) -> bool;
}

/// Sink posting to an ntfy-style topic endpoint.
///
/// The notification title, priority, and tags travel as headers; the
/// body is the plain-text message. The Authorization header is attached
/// only when a token is configured, so anonymous topics keep working.
pub struct NtfySink {
    http: reqwest::Client,
    config: AlertConfig,
}

impl NtfySink {
    pub fn new(config: AlertConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn topic_url(&self) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.topic
        )
    }

    fn build_request(&self, notification: &Notification) -> reqwest::RequestBuilder {
        let mut req = self
            .http
            .post(self.topic_url())
            .header("Title", &notification.title)
            .header("Priority", notification.priority.as_header())
            .body(notification.body.clone());
        if !notification.tags.is_empty() {
            req = req.header("Tags", notification.tags.join(","));
        }
        if let Some(token) = &self.config.token {
            req = req.bearer_auth(token);
        }
        req
    }
}

#[async_trait]
impl AlertSink for NtfySink {
    async fn notify(&self, notification: &Notification) -> bool {
        match self.build_request(notification).send().await {
            Ok(resp) if resp.status().is_success() => {
                debug!(topic = %self.config.topic, title = %notification.title, "notification delivered");
                true
            }
            Ok(resp) => {
                warn!(
                    topic = %self.config.topic,
                    status = %resp.status(),
                    "push service rejected notification"
                );
                false
            }
            Err(e) => {
                warn!(topic = %self.config.topic, error = %e, "notification delivery failed");
                false
            }
        }
    }
}
