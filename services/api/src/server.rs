use crate::cli::ServeArgs;
use crate::infra::{AnalyticsContext, AppState};
use crate::routes::router;
use axum_prometheus::PrometheusMetricLayer;
use hr_analytics::config::AppConfig;
use hr_analytics::error::AppError;
use hr_analytics::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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

    telemetry::init(&config.telemetry, config.environment)?;

    let analytics = AnalyticsContext::from_config(&config.analytics)?;
    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        analytics: Arc::new(analytics),
    };

    let app = router(app_state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        reference_date = ?config.analytics.reference_date,
        "hr analytics service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
