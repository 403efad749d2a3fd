use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::onboarding::assistant::{AssistantError, FreeTextAssistant, ScriptedAssistant};
use crate::workflows::onboarding::domain::{SessionId, UserProfile};
use crate::workflows::onboarding::intake::IntakeSession;
use crate::workflows::onboarding::repository::{SessionRecord, SessionStore, StoreError};
use crate::workflows::onboarding::{onboarding_router, OnboardingService};

/// Answers in question order for the highest-scoring profile.
pub(super) const HIGH_RISK_ANSWERS: [&str; 12] = [
    "55+",
    "Lagos",
    "Rider/Driver",
    "Under ₦50k",
    "5 or more",
    "Physical work",
    "Chronic conditions (e.g., diabetes, hypertension)",
    "Yes",
    "Yes",
    "I want everything covered",
    "I avoid risk (conservative)",
    "Under ₦2,000",
];

/// Answers in question order for the lowest-scoring profile.
pub(super) const LOW_RISK_ANSWERS: [&str; 12] = [
    "18-25",
    "Abuja",
    "Student",
    "Above ₦500k",
    "None",
    "Mostly indoors",
    "Healthy, no issues",
    "No",
    "No",
    "Health coverage",
    "Balanced approach",
    "₦5,000 - ₦10,000",
];

/// Business owner with a vehicle; qualifies for every plan.
pub(super) const BUSINESS_OWNER_ANSWERS: [&str; 12] = [
    "26-35",
    "Kano",
    "Self-employed/Business",
    "₦150k-₦300k",
    "1-2 people",
    "Mixed activities",
    "Minor conditions (e.g., glasses, allergies)",
    "Yes",
    "Yes",
    "Business protection",
    "I can take risks if needed",
    "₦10,000 - ₦20,000",
];

pub(super) fn completed_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

/// Run `answers` through the intake flow, returning the finalized profile.
pub(super) fn completed_profile(answers: &[&str; 12]) -> UserProfile {
    let mut intake = IntakeSession::new();
    for answer in answers {
        intake
            .answer(answer, completed_at())
            .expect("fixture answer accepted");
    }
    let (profile, _) = intake.into_parts();
    assert!(profile.is_complete(), "fixture answers finalize the profile");
    profile
}

/// Every answer present but never finalized.
pub(super) fn answered_but_open(answers: &[&str; 12]) -> UserProfile {
    let mut intake = IntakeSession::new();
    for answer in &answers[..11] {
        intake
            .answer(answer, completed_at())
            .expect("fixture answer accepted");
    }
    let (mut profile, _) = intake.into_parts();
    profile.monthly_budget = Some(answers[11].to_string());
    profile
}

pub(super) fn build_service() -> (
    OnboardingService<MemorySessionStore, ScriptedAssistant>,
    Arc<MemorySessionStore>,
) {
    let store = Arc::new(MemorySessionStore::default());
    let service = OnboardingService::new(store.clone(), Arc::new(ScriptedAssistant));
    (service, store)
}

pub(super) fn router_with_service(
    service: OnboardingService<MemorySessionStore, ScriptedAssistant>,
) -> axum::Router {
    onboarding_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemorySessionStore {
    pub(super) records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl MemorySessionStore {
    pub(super) fn record(&self, id: &SessionId) -> Option<SessionRecord> {
        self.records
            .lock()
            .expect("store mutex poisoned")
            .get(id)
            .cloned()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, id: &SessionId) -> Result<Option<SessionRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn insert(&self, record: &SessionRecord) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.contains_key(&record.session_id) {
            return Err(StoreError::AlreadyExists(record.session_id.clone()));
        }
        guard.insert(record.session_id.clone(), record.clone());
        Ok(())
    }

    fn save(&self, record: &SessionRecord) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.insert(record.session_id.clone(), record.clone());
        Ok(())
    }
}

pub(super) struct UnavailableStore;

impl SessionStore for UnavailableStore {
    fn load(&self, _id: &SessionId) -> Result<Option<SessionRecord>, StoreError> {
        Err(StoreError::Unavailable("disk offline".to_string()))
    }

    fn insert(&self, _record: &SessionRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("disk offline".to_string()))
    }

    fn save(&self, _record: &SessionRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("disk offline".to_string()))
    }
}

pub(super) struct OfflineAssistant;

impl FreeTextAssistant for OfflineAssistant {
    fn answer_free_text(
        &self,
        _question: &str,
        _profile: &UserProfile,
    ) -> Result<String, AssistantError> {
        Err(AssistantError::Unavailable("model endpoint timed out".to_string()))
    }
}

pub(super) fn assert_status(response: &Response, status: StatusCode) {
    assert_eq!(response.status(), status);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
