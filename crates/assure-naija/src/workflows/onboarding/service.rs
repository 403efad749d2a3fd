use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::assistant::{AssistantError, FreeTextAssistant};
use super::domain::{ProfileNotReady, RiskLevel, SessionId, UserProfile};
use super::intake::{AnswerOutcome, IntakeError, IntakeProgress, IntakeSession};
use super::questions::{chat_questions, ChatQuestion, QuestionPrompt};
use super::recommendations::{generate_recommendations, InsurancePlan, PlanKind};
use super::repository::{AgentCallbackRequest, SessionRecord, SessionStore, StoreError};
use super::scoring::{self, ScoreComponent};

/// Service composing the session store, intake flow, engines and assistant.
pub struct OnboardingService<S, A> {
    store: Arc<S>,
    assistant: Arc<A>,
    /// Held across every load-modify-save so concurrent requests cannot drop
    /// each other's writes.
    writes: Mutex<()>,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Ids tried before giving up on finding a free one.
const MAX_ID_ATTEMPTS: usize = 100_000;

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("session-{id:06}"))
}

impl<S, A> OnboardingService<S, A>
where
    S: SessionStore + 'static,
    A: FreeTextAssistant + 'static,
{
    pub fn new(store: Arc<S>, assistant: Arc<A>) -> Self {
        Self {
            store,
            assistant,
            writes: Mutex::new(()),
        }
    }

    pub fn questions(&self) -> Vec<ChatQuestion> {
        chat_questions()
    }

    /// Open a new session with an empty profile.
    ///
    /// The id sequence restarts with the process while a durable store keeps
    /// older sessions, so ids already taken are skipped rather than reused.
    pub fn create_session(&self) -> Result<SessionView, OnboardingServiceError> {
        let now = Utc::now();
        for _ in 0..MAX_ID_ATTEMPTS {
            let record = SessionRecord::new(next_session_id(), now);
            match self.store.insert(&record) {
                Ok(()) => {
                    info!(session_id = %record.session_id, "onboarding session created");
                    return Ok(SessionView::from_record(&record));
                }
                Err(StoreError::AlreadyExists(id)) => {
                    debug!(session_id = %id, "session id taken, drawing the next one");
                }
                Err(error) => return Err(error.into()),
            }
        }

        Err(StoreError::Unavailable("no free session id left".to_string()).into())
    }

    pub fn session(&self, id: &SessionId) -> Result<SessionView, OnboardingServiceError> {
        let record = self.fetch(id)?;
        Ok(SessionView::from_record(&record))
    }

    /// Feed one answer to the session's intake flow and persist the result.
    pub fn answer(
        &self,
        id: &SessionId,
        text: &str,
    ) -> Result<AnswerOutcome, OnboardingServiceError> {
        let _writes = self.lock_writes();
        let mut record = self.fetch(id)?;
        let mut intake = IntakeSession::resume(record.profile, record.intake);
        let outcome = intake.answer(text, Utc::now());
        let (profile, state) = intake.into_parts();
        record.profile = profile;
        record.intake = state;

        let outcome = outcome?;
        self.store.save(&record)?;

        if let AnswerOutcome::Completed { assessment } = &outcome {
            info!(
                session_id = %id,
                score = assessment.score,
                level = %assessment.level,
                "onboarding profile completed"
            );
        }

        Ok(outcome)
    }

    /// Risk readout for the explanation screen.
    pub fn risk(&self, id: &SessionId) -> Result<RiskReport, OnboardingServiceError> {
        let record = self.fetch(id)?;
        let assessment = scoring::assess(&record.profile)?;

        Ok(RiskReport {
            score: assessment.score,
            level: assessment.level,
            label: assessment.label(),
            key_factors: assessment.key_factors(),
            highlights: assessment.highlights(&record.profile),
            components: assessment.components,
        })
    }

    pub fn recommendations(
        &self,
        id: &SessionId,
    ) -> Result<Vec<InsurancePlan>, OnboardingServiceError> {
        let record = self.fetch(id)?;
        Ok(generate_recommendations(&record.profile)?)
    }

    /// Save or unsave a plan by its catalogue id.
    pub fn toggle_saved_plan(
        &self,
        id: &SessionId,
        plan_id: &str,
    ) -> Result<SavedPlansView, OnboardingServiceError> {
        let plan = PlanKind::from_id(plan_id)
            .ok_or_else(|| OnboardingServiceError::UnknownPlan(plan_id.to_string()))?;

        let _writes = self.lock_writes();
        let mut record = self.fetch(id)?;
        let saved = record.toggle_saved_plan(plan);
        self.store.save(&record)?;

        Ok(SavedPlansView {
            plan,
            saved,
            saved_plans: record.saved_plans,
        })
    }

    /// Record a request for an agent to call back about the saved plans.
    /// At least one plan must be saved first.
    pub fn request_agent_callback(
        &self,
        id: &SessionId,
        contact: AgentContact,
    ) -> Result<AgentCallbackRequest, OnboardingServiceError> {
        let contact = contact.validate()?;
        let _writes = self.lock_writes();
        let mut record = self.fetch(id)?;
        if record.saved_plans.is_empty() {
            return Err(OnboardingServiceError::InvalidContactRequest(
                "save at least one plan before asking for an agent",
            ));
        }

        let request = AgentCallbackRequest {
            name: contact.name,
            phone: contact.phone,
            email: contact.email,
            plans: record
                .saved_plans
                .iter()
                .map(|plan| plan.title().to_string())
                .collect(),
            requested_at: Utc::now(),
        };
        record.agent_requests.push(request.clone());
        self.store.save(&record)?;

        info!(
            session_id = %id,
            plans = request.plans.len(),
            "agent callback requested"
        );
        Ok(request)
    }

    /// Free-text question routed to the assistant port.
    pub fn ask(&self, id: &SessionId, question: &str) -> Result<String, OnboardingServiceError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(OnboardingServiceError::Intake(IntakeError::EmptyAnswer));
        }

        let record = self.fetch(id)?;
        self.assistant
            .answer_free_text(question, &record.profile)
            .map_err(|error| {
                warn!(session_id = %id, %error, "assistant request failed");
                OnboardingServiceError::from(error)
            })
    }

    /// Clear the profile, flow state and saved plans so the user can start over.
    pub fn restart(&self, id: &SessionId) -> Result<SessionView, OnboardingServiceError> {
        let _writes = self.lock_writes();
        let mut record = self.fetch(id)?;
        let mut intake = IntakeSession::resume(record.profile, record.intake);
        intake.restart();
        let (profile, state) = intake.into_parts();
        record.profile = profile;
        record.intake = state;
        record.saved_plans.clear();
        self.store.save(&record)?;

        info!(session_id = %id, "onboarding session restarted");
        Ok(SessionView::from_record(&record))
    }

    // The guard protects no data, so a poisoned lock is still usable.
    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.writes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn fetch(&self, id: &SessionId) -> Result<SessionRecord, OnboardingServiceError> {
        self.store
            .load(id)?
            .ok_or_else(|| OnboardingServiceError::UnknownSession(id.clone()))
    }
}

/// Session state as exposed to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session_id: SessionId,
    pub profile: UserProfile,
    pub progress: IntakeProgress,
    pub completed: bool,
    pub awaiting_location: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_question: Option<QuestionPrompt>,
    pub saved_plans: Vec<PlanKind>,
}

impl SessionView {
    fn from_record(record: &SessionRecord) -> Self {
        let intake = IntakeSession::resume(record.profile.clone(), record.intake);
        Self {
            session_id: record.session_id.clone(),
            profile: record.profile.clone(),
            progress: intake.progress(),
            completed: record.profile.is_complete(),
            awaiting_location: record.intake.awaiting_location,
            next_question: intake.current_prompt(),
            saved_plans: record.saved_plans.clone(),
        }
    }
}

/// Risk explanation payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskReport {
    pub score: u8,
    pub level: RiskLevel,
    pub label: &'static str,
    pub key_factors: [&'static str; 4],
    pub highlights: Vec<String>,
    pub components: Vec<ScoreComponent>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPlansView {
    pub plan: PlanKind,
    pub saved: bool,
    pub saved_plans: Vec<PlanKind>,
}

/// Contact form submitted with an agent callback request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentContact {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl AgentContact {
    fn validate(self) -> Result<Self, OnboardingServiceError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(OnboardingServiceError::InvalidContactRequest(
                "name is required",
            ));
        }

        let phone = self.phone.trim().to_string();
        let digits = phone.chars().filter(char::is_ascii_digit).count();
        let phone_chars_ok = phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'));
        if digits < MIN_PHONE_DIGITS || !phone_chars_ok {
            return Err(OnboardingServiceError::InvalidContactRequest(
                "a valid phone number is required",
            ));
        }

        let email = self
            .email
            .map(|email| email.trim().to_string())
            .filter(|email| !email.is_empty());
        if email.as_deref().is_some_and(|email| !email.contains('@')) {
            return Err(OnboardingServiceError::InvalidContactRequest(
                "email address is not valid",
            ));
        }

        Ok(Self { name, phone, email })
    }
}

const MIN_PHONE_DIGITS: usize = 7;

/// Error raised by the onboarding service.
#[derive(Debug, thiserror::Error)]
pub enum OnboardingServiceError {
    #[error("session {0} not found")]
    UnknownSession(SessionId),
    #[error("unknown plan: {0}")]
    UnknownPlan(String),
    #[error("invalid contact request: {0}")]
    InvalidContactRequest(&'static str),
    #[error(transparent)]
    NotReady(#[from] ProfileNotReady),
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Assistant(#[from] AssistantError),
}
