use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{SessionId, UserProfile};
use super::intake::IntakeState;
use super::recommendations::PlanKind;

/// Everything kept for one onboarding session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub session_id: SessionId,
    pub profile: UserProfile,
    #[serde(default)]
    pub intake: IntakeState,
    /// Bookmarked plans in the order they were saved.
    #[serde(default)]
    pub saved_plans: Vec<PlanKind>,
    #[serde(default)]
    pub agent_requests: Vec<AgentCallbackRequest>,
    pub created_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(session_id: SessionId, created_at: DateTime<Utc>) -> Self {
        Self {
            session_id,
            profile: UserProfile::default(),
            intake: IntakeState::default(),
            saved_plans: Vec::new(),
            agent_requests: Vec::new(),
            created_at,
        }
    }

    /// Add `plan` if absent, remove it otherwise. Returns whether it is now saved.
    pub fn toggle_saved_plan(&mut self, plan: PlanKind) -> bool {
        if let Some(index) = self.saved_plans.iter().position(|saved| *saved == plan) {
            self.saved_plans.remove(index);
            false
        } else {
            self.saved_plans.push(plan);
            true
        }
    }
}

/// Contact details left by a user who wants an agent to call back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCallbackRequest {
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Titles of the plans saved when the request was made.
    pub plans: Vec<String>,
    pub requested_at: DateTime<Utc>,
}

/// Persistence port keyed by session. Engines never touch it.
pub trait SessionStore: Send + Sync {
    fn load(&self, id: &SessionId) -> Result<Option<SessionRecord>, StoreError>;
    /// Store a brand-new record. Must fail with `AlreadyExists` instead of
    /// replacing a record kept under the same id.
    fn insert(&self, record: &SessionRecord) -> Result<(), StoreError>;
    /// Replace the record kept under `record.session_id`.
    fn save(&self, record: &SessionRecord) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session {0} already exists")]
    AlreadyExists(SessionId),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("stored session is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}
