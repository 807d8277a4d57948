use shared::domain::Condition;
use uuid::Uuid;

/// Per-session state handed to the trial controller and event logger.
/// Created at session start, dropped when the session ends; never persisted.
#[derive(Debug, Clone)]
pub struct SessionContext {
    session_id: String,
    participant_id: Uuid,
    pub condition: Condition,
}

impl SessionContext {
    /// Draws the participant identity exactly once; every later call to
    /// [`SessionContext::participant_id`] sees the same value.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            participant_id: Uuid::new_v4(),
            condition: Condition::default(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn participant_id(&self) -> Uuid {
        self.participant_id
    }
}
