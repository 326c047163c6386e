use crate::cli::ServeArgs;
use crate::infra::{
    default_engine_config, seed_sample_claims, AppState, InMemoryAssessmentStore,
    InMemoryClaimStore,
};
use crate::routes::with_assessment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use claims_triage::config::AppConfig;
use claims_triage::error::AppError;
use claims_triage::scoring::RiskAssessmentService;
use claims_triage::telemetry;
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

    let claims = Arc::new(InMemoryClaimStore::default());
    seed_sample_claims(&claims);
    let assessments = Arc::new(InMemoryAssessmentStore::default());
    let service = Arc::new(RiskAssessmentService::new(
        claims,
        assessments,
        default_engine_config(),
    )?);

    let app = with_assessment_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "claims triage service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
