use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryWardrobeRepository};
use crate::routes::with_wardrobe_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use wardrobe_ai::config::AppConfig;
use wardrobe_ai::error::AppError;
use wardrobe_ai::telemetry;
use wardrobe_ai::wardrobe::{build_suggester, OutfitRuleBook, OutfitSuggester, WardrobeService};

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

    let rules = Arc::new(OutfitRuleBook::load(&config.suggestions)?);
    let suggester = build_suggester(&config.suggestions, rules.clone())?;
    info!(
        provider = suggester.name(),
        occasions = rules.occasions().count(),
        seeded = config.suggestions.seed.is_some(),
        "outfit suggester configured"
    );

    let repository = Arc::new(InMemoryWardrobeRepository::default());
    let wardrobe_service = Arc::new(WardrobeService::new(repository, suggester));

    let app = with_wardrobe_routes(wardrobe_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "wardrobe service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
