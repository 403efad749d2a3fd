//! Onboarding questionnaire, risk scoring, and insurance plan matching.
//!
//! The engines in [`scoring`] and [`recommendations`] are pure functions over a
//! finalized [`UserProfile`]. Session storage and free-text answering sit behind
//! the [`SessionStore`] and [`FreeTextAssistant`] ports so the service can be
//! exercised without infrastructure.

pub mod answers;
pub mod assistant;
pub mod domain;
pub mod intake;
pub mod normalizer;
pub mod questions;
pub mod recommendations;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use answers::parse_boolean;
pub use assistant::{AssistantError, FreeTextAssistant, ScriptedAssistant};
pub use domain::{
    AnswerValue, ProfileField, ProfileNotReady, RecordError, RiskLevel, SessionId, UserProfile,
};
pub use intake::{AnswerOutcome, IntakeError, IntakeProgress, IntakeSession, IntakeState};
pub use questions::{chat_questions, ChatQuestion, QuestionCategory, QuestionPrompt};
pub use recommendations::{generate_recommendations, InsurancePlan, PlanKind, PremiumRange};
pub use repository::{AgentCallbackRequest, SessionRecord, SessionStore, StoreError};
pub use router::onboarding_router;
pub use scoring::{assess, compute_risk_score, risk_level_of, RiskAssessment, ScoreComponent};
pub use service::{
    AgentContact, OnboardingService, OnboardingServiceError, RiskReport, SavedPlansView,
    SessionView,
};
