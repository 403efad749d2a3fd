use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::assistant::FreeTextAssistant;
use super::domain::SessionId;
use super::intake::IntakeError;
use super::repository::SessionStore;
use super::service::{AgentContact, OnboardingService, OnboardingServiceError};

#[derive(Debug, Deserialize)]
pub(crate) struct AnswerPayload {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionPayload {
    pub question: String,
}

/// Router builder exposing the onboarding session endpoints.
pub fn onboarding_router<S, A>(service: Arc<OnboardingService<S, A>>) -> Router
where
    S: SessionStore + 'static,
    A: FreeTextAssistant + 'static,
{
    Router::new()
        .route("/api/v1/onboarding/questions", get(questions_handler::<S, A>))
        .route("/api/v1/onboarding/sessions", post(create_handler::<S, A>))
        .route(
            "/api/v1/onboarding/sessions/:session_id",
            get(session_handler::<S, A>).delete(restart_handler::<S, A>),
        )
        .route(
            "/api/v1/onboarding/sessions/:session_id/answers",
            post(answer_handler::<S, A>),
        )
        .route(
            "/api/v1/onboarding/sessions/:session_id/risk",
            get(risk_handler::<S, A>),
        )
        .route(
            "/api/v1/onboarding/sessions/:session_id/recommendations",
            get(recommendations_handler::<S, A>),
        )
        .route(
            "/api/v1/onboarding/sessions/:session_id/saved-plans/:plan_id",
            post(saved_plan_handler::<S, A>),
        )
        .route(
            "/api/v1/onboarding/sessions/:session_id/agent-requests",
            post(agent_request_handler::<S, A>),
        )
        .route(
            "/api/v1/onboarding/sessions/:session_id/questions",
            post(ask_handler::<S, A>),
        )
        .with_state(service)
}

pub(crate) async fn questions_handler<S, A>(
    State(service): State<Arc<OnboardingService<S, A>>>,
) -> Response
where
    S: SessionStore + 'static,
    A: FreeTextAssistant + 'static,
{
    (StatusCode::OK, Json(service.questions())).into_response()
}

pub(crate) async fn create_handler<S, A>(
    State(service): State<Arc<OnboardingService<S, A>>>,
) -> Response
where
    S: SessionStore + 'static,
    A: FreeTextAssistant + 'static,
{
    match service.create_session() {
        Ok(view) => (StatusCode::CREATED, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn session_handler<S, A>(
    State(service): State<Arc<OnboardingService<S, A>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    A: FreeTextAssistant + 'static,
{
    match service.session(&SessionId(session_id)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn restart_handler<S, A>(
    State(service): State<Arc<OnboardingService<S, A>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    A: FreeTextAssistant + 'static,
{
    match service.restart(&SessionId(session_id)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn answer_handler<S, A>(
    State(service): State<Arc<OnboardingService<S, A>>>,
    Path(session_id): Path<String>,
    Json(payload): Json<AnswerPayload>,
) -> Response
where
    S: SessionStore + 'static,
    A: FreeTextAssistant + 'static,
{
    match service.answer(&SessionId(session_id), &payload.text) {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn risk_handler<S, A>(
    State(service): State<Arc<OnboardingService<S, A>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    A: FreeTextAssistant + 'static,
{
    match service.risk(&SessionId(session_id)) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn recommendations_handler<S, A>(
    State(service): State<Arc<OnboardingService<S, A>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    A: FreeTextAssistant + 'static,
{
    match service.recommendations(&SessionId(session_id)) {
        Ok(plans) => (StatusCode::OK, Json(plans)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn saved_plan_handler<S, A>(
    State(service): State<Arc<OnboardingService<S, A>>>,
    Path((session_id, plan_id)): Path<(String, String)>,
) -> Response
where
    S: SessionStore + 'static,
    A: FreeTextAssistant + 'static,
{
    match service.toggle_saved_plan(&SessionId(session_id), &plan_id) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn agent_request_handler<S, A>(
    State(service): State<Arc<OnboardingService<S, A>>>,
    Path(session_id): Path<String>,
    Json(contact): Json<AgentContact>,
) -> Response
where
    S: SessionStore + 'static,
    A: FreeTextAssistant + 'static,
{
    match service.request_agent_callback(&SessionId(session_id), contact) {
        Ok(request) => (StatusCode::CREATED, Json(request)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn ask_handler<S, A>(
    State(service): State<Arc<OnboardingService<S, A>>>,
    Path(session_id): Path<String>,
    Json(payload): Json<QuestionPayload>,
) -> Response
where
    S: SessionStore + 'static,
    A: FreeTextAssistant + 'static,
{
    match service.ask(&SessionId(session_id), &payload.question) {
        Ok(answer) => (StatusCode::OK, Json(json!({ "answer": answer }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) fn status_for(error: &OnboardingServiceError) -> StatusCode {
    match error {
        OnboardingServiceError::UnknownSession(_) => StatusCode::NOT_FOUND,
        OnboardingServiceError::NotReady(_)
        | OnboardingServiceError::Intake(IntakeError::AlreadyCompleted)
        | OnboardingServiceError::Intake(IntakeError::NotReady(_)) => StatusCode::CONFLICT,
        OnboardingServiceError::UnknownPlan(_)
        | OnboardingServiceError::InvalidContactRequest(_)
        | OnboardingServiceError::Intake(_) => StatusCode::UNPROCESSABLE_ENTITY,
        OnboardingServiceError::Assistant(_) => StatusCode::SERVICE_UNAVAILABLE,
        OnboardingServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: OnboardingServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (status_for(&error), Json(payload)).into_response()
}
