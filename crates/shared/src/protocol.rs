use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::TrialEvent;

/// Success acknowledgment from the logging service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogAck {
    pub ok: bool,
}

impl LogAck {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// Failure reply body, shared by every non-success status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReply {
    pub ok: bool,
    pub error: String,
}

impl ErrorReply {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}

/// A trial event as persisted, with the server arrival stamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTrialEvent {
    #[serde(flatten)]
    pub event: TrialEvent,
    pub received_at: DateTime<Utc>,
}
