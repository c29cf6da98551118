//! Outbound notification queued for asynchronous delivery

use chrono::{DateTime, Utc};

/// Row in the email outbox
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedEmail {
    pub to: String,
    pub template: String,
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl QueuedEmail {
    pub fn new(to: impl Into<String>, template: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            to: to.into(),
            template: template.into(),
            data,
            created_at: Utc::now(),
        }
    }
}
