use std::sync::Arc;

use axum::Router;
use migration::MigratorTrait;
use sea_orm::Database;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::task::TaskState;

pub mod api;

/// Connects to the database, applies pending migrations and serves the
/// application until the process is stopped.
#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: Config) -> anyhow::Result<()> {
    let server_address = format!("{}:{}", config.app_host, config.app_port);
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("Todo API server running on http://{}", server_address);

    let db = Database::connect(config.database_url()).await?;
    migration::Migrator::up(&db, None).await?;
    tracing::info!("Database migrations applied successfully");

    let task_state = Arc::new(TaskState { db: Arc::new(db) });
    let app = create_app(task_state);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Assembles the application router. Split from [`start_web_server`] so
/// tests can drive the full router without binding a socket.
pub fn create_app(task_state: Arc<TaskState>) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health_check_handler))
        .merge(api::create_api_router(task_state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}
