//! Session Event Logger
//!
//! Structured session events (ingredient edits, recipe requests) routed through
//! `tracing` under the `session_events` target, so they land in the NDJSON log.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    IngredientAdded { ingredient: String },
    IngredientRemoved { ingredient: String },
    RecipeRequested { query: String, history_len: usize },
    RecipeReceived { backend: String, bytes: usize },
    RecipeFailed { backend: String, error_msg: String },
}

impl SessionEvent {
    pub fn is_failure(&self) -> bool {
        matches!(self, SessionEvent::RecipeFailed { .. })
    }
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: SessionEvent,
}

impl EventLogEntry {
    pub fn new(session_id: &str, event: SessionEvent) -> Self {
        Self {
            session_id: session_id.into(),
            timestamp: Utc::now(),
            event,
        }
    }

    /// NDJSON line for this entry.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}

pub struct EventLogger;

impl EventLogger {
    /// Emit a session event; failures are logged at warn level.
    pub fn log_event(session_id: &str, event: SessionEvent) {
        let entry = EventLogEntry::new(session_id, event);
        let json = entry.to_json();
        if entry.event.is_failure() {
            warn!(target: "session_events", event = %json, "Session event");
        } else {
            info!(target: "session_events", event = %json, "Session event");
        }
    }
}
