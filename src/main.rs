use std::sync::Arc;

use fitcoach::coach::{ChatRouteState, ChatService, CoachApi, HttpCoachClient, chat_routes};
use fitcoach::config::{CoachEndpointConfig, ServerConfig};
use fitcoach::onboarding::{OnboardingManager, OnboardingRouteState, onboarding_routes};
use fitcoach::plan::{PlanRouteState, plan_routes};
use fitcoach::profile::{ProfileRouteState, profile_routes};
use fitcoach::store::{Database, LibSqlBackend};
use fitcoach::tracking::{TrackingRouteState, tracking_routes};
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ServerConfig::from_env();

    eprintln!("🏋  Fitcoach v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: http://0.0.0.0:{}/api", config.port);
    eprintln!("   Database: {}", config.db_path);

    // ── Database ─────────────────────────────────────────────────────────
    let db: Arc<dyn Database> = Arc::new(
        LibSqlBackend::new_local(std::path::Path::new(&config.db_path)).await?,
    );

    // ── Coach endpoint ───────────────────────────────────────────────────
    let coach: Option<Arc<dyn CoachApi>> = match CoachEndpointConfig::from_env() {
        Some(endpoint) => {
            eprintln!("   Coach endpoint: {}", endpoint.url);
            Some(Arc::new(HttpCoachClient::new(endpoint)))
        }
        None => {
            eprintln!("   Coach endpoint: not configured (fallback persona only)");
            None
        }
    };

    // ── Services ─────────────────────────────────────────────────────────
    let manager = Arc::new(OnboardingManager::new(Arc::clone(&db)));
    let chat = Arc::new(ChatService::new(Arc::clone(&db), coach));

    let app = onboarding_routes(OnboardingRouteState { manager })
        .merge(profile_routes(ProfileRouteState {
            db: Arc::clone(&db),
        }))
        .merge(plan_routes(PlanRouteState {
            db: Arc::clone(&db),
        }))
        .merge(tracking_routes(TrackingRouteState {
            db: Arc::clone(&db),
        }))
        .merge(chat_routes(ChatRouteState { service: chat }))
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "Fitcoach server started");
    axum::serve(listener, app).await?;

    Ok(())
}
