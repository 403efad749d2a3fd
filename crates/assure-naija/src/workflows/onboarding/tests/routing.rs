use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;

use crate::workflows::onboarding::assistant::ScriptedAssistant;
use crate::workflows::onboarding::router::{risk_handler, session_handler};
use crate::workflows::onboarding::OnboardingService;

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

async fn create_session(router: &axum::Router) -> String {
    let response = router
        .clone()
        .oneshot(empty_request(Method::POST, "/api/v1/onboarding/sessions"))
        .await
        .expect("route executes");
    assert_status(&response, StatusCode::CREATED);
    let payload = read_json_body(response).await;
    payload["sessionId"]
        .as_str()
        .expect("session id present")
        .to_string()
}

async fn answer_all(router: &axum::Router, session_id: &str, answers: &[&str; 12]) {
    for answer in answers {
        let response = router
            .clone()
            .oneshot(json_request(
                Method::POST,
                &format!("/api/v1/onboarding/sessions/{session_id}/answers"),
                json!({ "text": answer }),
            ))
            .await
            .expect("route executes");
        assert_status(&response, StatusCode::OK);
    }
}

#[tokio::test]
async fn questions_route_lists_schema() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(empty_request(Method::GET, "/api/v1/onboarding/questions"))
        .await
        .expect("route executes");

    assert_status(&response, StatusCode::OK);
    let payload = read_json_body(response).await;
    let questions = payload.as_array().expect("array payload");
    assert_eq!(questions.len(), 12);
    assert_eq!(questions[0]["field"], "ageRange");
    assert_eq!(questions[7]["options"], json!(["Yes", "No"]));
}

#[tokio::test]
async fn create_route_returns_first_question() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(empty_request(Method::POST, "/api/v1/onboarding/sessions"))
        .await
        .expect("route executes");

    assert_status(&response, StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["nextQuestion"]["field"], "ageRange");
    assert_eq!(payload["progress"]["total"], 12);
    assert_eq!(payload["completed"], false);
}

#[tokio::test]
async fn answer_route_reports_outcome() {
    let (service, _) = build_service();
    let router = router_with_service(service);
    let session_id = create_session(&router).await;

    let response = router
        .clone()
        .oneshot(json_request(
            Method::POST,
            &format!("/api/v1/onboarding/sessions/{session_id}/answers"),
            json!({ "text": "46-55" }),
        ))
        .await
        .expect("route executes");

    assert_status(&response, StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["outcome"], "recorded");
    assert_eq!(payload["field"], "ageRange");
    assert_eq!(payload["next"]["field"], "location");

    let blank = router
        .oneshot(json_request(
            Method::POST,
            &format!("/api/v1/onboarding/sessions/{session_id}/answers"),
            json!({ "text": "" }),
        ))
        .await
        .expect("route executes");
    assert_status(&blank, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn full_flow_serves_risk_and_recommendations() {
    let (service, _) = build_service();
    let router = router_with_service(service);
    let session_id = create_session(&router).await;
    answer_all(&router, &session_id, &HIGH_RISK_ANSWERS).await;

    let risk = router
        .clone()
        .oneshot(empty_request(
            Method::GET,
            &format!("/api/v1/onboarding/sessions/{session_id}/risk"),
        ))
        .await
        .expect("route executes");
    assert_status(&risk, StatusCode::OK);
    let payload = read_json_body(risk).await;
    assert_eq!(payload["score"], 100);
    assert_eq!(payload["level"], "high");
    assert_eq!(payload["keyFactors"].as_array().map(Vec::len), Some(4));

    let plans = router
        .clone()
        .oneshot(empty_request(
            Method::GET,
            &format!("/api/v1/onboarding/sessions/{session_id}/recommendations"),
        ))
        .await
        .expect("route executes");
    assert_status(&plans, StatusCode::OK);
    let payload = read_json_body(plans).await;
    let ids: Vec<_> = payload
        .as_array()
        .expect("array payload")
        .iter()
        .filter_map(|plan| plan["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["health", "life", "motor", "device"]);

    let again = router
        .oneshot(json_request(
            Method::POST,
            &format!("/api/v1/onboarding/sessions/{session_id}/answers"),
            json!({ "text": "18-25" }),
        ))
        .await
        .expect("route executes");
    assert_status(&again, StatusCode::CONFLICT);
}

#[tokio::test]
async fn engines_answer_conflict_before_completion() {
    let (service, _) = build_service();
    let service = Arc::new(service);
    let view = service.create_session().expect("session created");

    let response = risk_handler::<MemorySessionStore, ScriptedAssistant>(
        State(service.clone()),
        Path(view.session_id.0.clone()),
    )
    .await;
    assert_status(&response, StatusCode::CONFLICT);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .is_some_and(|error| error.contains("ageRange")));
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let (service, _) = build_service();
    let service = Arc::new(service);

    let response = session_handler::<MemorySessionStore, ScriptedAssistant>(
        State(service),
        Path("session-000000".to_string()),
    )
    .await;

    assert_status(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn saved_plan_route_validates_plan_ids() {
    let (service, _) = build_service();
    let router = router_with_service(service);
    let session_id = create_session(&router).await;

    let saved = router
        .clone()
        .oneshot(empty_request(
            Method::POST,
            &format!("/api/v1/onboarding/sessions/{session_id}/saved-plans/device"),
        ))
        .await
        .expect("route executes");
    assert_status(&saved, StatusCode::OK);
    let payload = read_json_body(saved).await;
    assert_eq!(payload["saved"], true);
    assert_eq!(payload["savedPlans"], json!(["device"]));

    let unknown = router
        .oneshot(empty_request(
            Method::POST,
            &format!("/api/v1/onboarding/sessions/{session_id}/saved-plans/pets"),
        ))
        .await
        .expect("route executes");
    assert_status(&unknown, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn agent_request_route_validates_contact() {
    let (service, _) = build_service();
    let router = router_with_service(service);
    let session_id = create_session(&router).await;
    let uri = format!("/api/v1/onboarding/sessions/{session_id}/agent-requests");

    let invalid = router
        .clone()
        .oneshot(json_request(
            Method::POST,
            &uri,
            json!({ "name": "Tunde", "phone": "" }),
        ))
        .await
        .expect("route executes");
    assert_status(&invalid, StatusCode::UNPROCESSABLE_ENTITY);

    let nothing_saved = router
        .clone()
        .oneshot(json_request(
            Method::POST,
            &uri,
            json!({ "name": "Tunde", "phone": "0803 555 0199" }),
        ))
        .await
        .expect("route executes");
    assert_status(&nothing_saved, StatusCode::UNPROCESSABLE_ENTITY);

    let saved = router
        .clone()
        .oneshot(empty_request(
            Method::POST,
            &format!("/api/v1/onboarding/sessions/{session_id}/saved-plans/life"),
        ))
        .await
        .expect("route executes");
    assert_status(&saved, StatusCode::OK);

    let created = router
        .oneshot(json_request(
            Method::POST,
            &uri,
            json!({ "name": "Tunde", "phone": "0803 555 0199", "email": "tunde@example.com" }),
        ))
        .await
        .expect("route executes");
    assert_status(&created, StatusCode::CREATED);
    let payload = read_json_body(created).await;
    assert_eq!(payload["email"], "tunde@example.com");
    assert!(payload.get("requestedAt").is_some());
    assert_eq!(payload["plans"], json!(["Life Insurance"]));
}

#[tokio::test]
async fn question_route_returns_assistant_answer() {
    let (service, _) = build_service();
    let router = router_with_service(service);
    let session_id = create_session(&router).await;

    let response = router
        .oneshot(json_request(
            Method::POST,
            &format!("/api/v1/onboarding/sessions/{session_id}/questions"),
            json!({ "question": "What types of insurance are there?" }),
        ))
        .await
        .expect("route executes");

    assert_status(&response, StatusCode::OK);
    let payload = read_json_body(response).await;
    assert!(payload["answer"]
        .as_str()
        .is_some_and(|answer| answer.contains("motor")));
}

#[tokio::test]
async fn delete_route_restarts_session() {
    let (service, store) = build_service();
    let router = router_with_service(service);
    let session_id = create_session(&router).await;
    answer_all(&router, &session_id, &LOW_RISK_ANSWERS).await;

    let response = router
        .oneshot(empty_request(
            Method::DELETE,
            &format!("/api/v1/onboarding/sessions/{session_id}"),
        ))
        .await
        .expect("route executes");

    assert_status(&response, StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["completed"], false);
    let record = store
        .record(&crate::workflows::onboarding::SessionId(session_id))
        .expect("record kept");
    assert!(record.profile.missing_fields().len() == 12);
}

#[tokio::test]
async fn store_outage_is_internal_error() {
    let service = OnboardingService::new(Arc::new(UnavailableStore), Arc::new(ScriptedAssistant));
    let router = crate::workflows::onboarding::onboarding_router(Arc::new(service));

    let response = router
        .oneshot(empty_request(Method::POST, "/api/v1/onboarding/sessions"))
        .await
        .expect("route executes");

    assert_status(&response, StatusCode::INTERNAL_SERVER_ERROR);
}
