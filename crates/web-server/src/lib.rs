use axum::{routing::get, Router};
use configuration::Config;
use database::TradeStore;
use query_compiler::QueryConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing;

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub store: TradeStore,
    /// The compiler configuration, carrying the base relation name.
    pub query_config: QueryConfig,
}

/// The main function to configure and run the web server.
///
/// Note: tracing is initialized by the binary that calls this, not here, to
/// avoid conflicting subscribers.
pub async fn run_server(addr: SocketAddr, config: Config) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let db_pool = database::connect().await?;
    database::run_migrations(&db_pool).await?;
    let store = TradeStore::new(db_pool);

    let app_state = Arc::new(AppState {
        store,
        query_config: QueryConfig::new(config.analytics.table),
    });
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    // --- DEFINE THE APPLICATION ROUTES ---
    let app = Router::new()
        .route("/", get(handlers::run_analytics))
        .route("/api/health", get(|| async { "OK" }))
        .with_state(app_state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http());

    tracing::info!("Analytics server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
