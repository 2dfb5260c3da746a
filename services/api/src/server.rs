use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryPollRepository, InMemoryProviderRepository, InMemoryTicketRepository,
};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use gestao::config::AppConfig;
use gestao::error::AppError;
use gestao::telemetry;
use gestao::workflows::maintenance::MaintenanceService;
use gestao::workflows::polls::PollService;
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let poll_service = Arc::new(PollService::new(Arc::new(
        InMemoryPollRepository::default(),
    )));
    let maintenance_service = Arc::new(MaintenanceService::new(
        Arc::new(InMemoryTicketRepository::default()),
        Arc::new(InMemoryProviderRepository::default()),
        config.messaging.clone(),
    ));

    let app = with_service_routes(poll_service, maintenance_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        community = %config.messaging.community_name,
        "community management service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
