use crate::cli::ServeArgs;
use crate::infra::{AppState, SessionBackend};
use crate::routes::with_onboarding_routes;
use assure_naija::config::AppConfig;
use assure_naija::error::AppError;
use assure_naija::telemetry;
use assure_naija::workflows::onboarding::{OnboardingService, ScriptedAssistant};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = SessionBackend::from_config(&config.storage)?;
    info!(backend = store.describe(), "session store selected");
    let service = Arc::new(OnboardingService::new(
        Arc::new(store),
        Arc::new(ScriptedAssistant),
    ));

    let app = with_onboarding_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "onboarding service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
