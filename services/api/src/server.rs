use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState, InMemoryKnownWordsStore, InMemoryProgressStore};
use crate::routes::with_coach_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use lingo_coach::config::AppConfig;
use lingo_coach::error::AppError;
use lingo_coach::telemetry;
use lingo_coach::CoachService;
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

    let catalog = load_catalog(&config.catalog)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = Arc::new(CoachService::new(
        &catalog,
        Arc::new(InMemoryProgressStore::default()),
        Arc::new(InMemoryKnownWordsStore::default()),
    ));

    let app = with_coach_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, topics = catalog.len(), "lingo coach ready");

    axum::serve(listener, app).await?;
    Ok(())
}
