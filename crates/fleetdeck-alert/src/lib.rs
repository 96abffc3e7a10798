//! fleetdeck-alert — push notifications for the monitoring stack.
//!
//! Formats human-readable notifications (title, priority, tags, body)
//! and posts them to a topic on an ntfy-style push service. Delivery is
//! fire-and-forget: [`AlertSink::notify`] reports success as a bool and
//! never returns an error, so calling code can inform the user without
//! crashing the interaction.

pub mod message;
pub mod sink;

pub use message::{Notification, Priority};
pub use sink::{AlertSink, NtfySink};
