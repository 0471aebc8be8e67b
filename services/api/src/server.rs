use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_operational_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use hepa_insight::assessment::{
    AssessmentEngine, AssessmentService, AssessmentServiceError, HttpPredictionClient,
};
use hepa_insight::config::{AppConfig, PredictionConfig};
use hepa_insight::error::AppError;
use hepa_insight::telemetry;
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
    if let Some(url) = args.prediction_url.take() {
        config.prediction = PredictionConfig::new(url, config.prediction.timeout.as_secs())?;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let client =
        HttpPredictionClient::new(&config.prediction).map_err(AssessmentServiceError::from)?;
    let predictor = Arc::new(client);
    let prediction_endpoint = predictor.endpoint().to_string();
    let assessment_service = Arc::new(AssessmentService::new(
        predictor,
        AssessmentEngine::canonical(),
    ));

    let app = with_operational_routes(assessment_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        prediction_endpoint = %prediction_endpoint,
        "liver assessment service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
