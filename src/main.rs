use std::sync::Arc;

use axum::Router;
use dotacup::bracket::InMemoryBracketStore;
use dotacup::fantasy::InMemoryFantasyStore;
use dotacup::leaderboard::InMemoryLeaderboardStore;
use dotacup::provider::OpenDotaClient;
use dotacup::season::InMemorySeasonStatsStore;
use dotacup::shared::AppState;
use dotacup::standings::InMemoryGroupStore;
use dotacup::tournament::InMemoryMatchStore;
use dotacup::unparsed::InMemoryUnparsedQueue;
use dotacup::{admin_router, EngineConfig, RecalcOrchestrator};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dotacup=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting tournament recalculation engine");

    let config = match EngineConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    // Dependency injection keeps the stores swappable; in-memory backends
    // here, a database-backed set in production.
    let matches = Arc::new(InMemoryMatchStore::new());
    let groups = Arc::new(InMemoryGroupStore::new());
    let brackets = Arc::new(InMemoryBracketStore::new());
    let fantasy = Arc::new(InMemoryFantasyStore::new());
    let leaderboard = Arc::new(InMemoryLeaderboardStore::new());
    let season = Arc::new(InMemorySeasonStatsStore::new());
    let queue = Arc::new(InMemoryUnparsedQueue::new());
    let provider = match OpenDotaClient::from_env() {
        Ok(client) => Arc::new(client),
        Err(err) => {
            eprintln!("failed to build stats provider: {err}");
            std::process::exit(1);
        }
    };

    let orchestrator = Arc::new(RecalcOrchestrator::new(
        matches, groups, brackets, fantasy, leaderboard, season, queue, provider, config,
    ));
    let app_state = AppState::new(orchestrator);

    let app = Router::new()
        .merge(admin_router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let listener = match tokio::net::TcpListener::bind("0.0.0.0:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            eprintln!("failed to bind 0.0.0.0:3000: {err}");
            std::process::exit(1);
        }
    };
    info!("Server running on http://localhost:3000");
    if let Err(err) = axum::serve(listener, app).await {
        eprintln!("server error: {err}");
        std::process::exit(1);
    }
}
