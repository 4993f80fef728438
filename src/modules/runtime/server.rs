//! HTTP server for the todos service

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use todos_core::{AppConfig, TodoError};
use todos_types::ErrorResponse;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::handlers::{OpenApiHandler, TodoHandler};
use crate::state::AppState;
use crate::store::{self, TodoStore};

/// Runtime server for the todos service
pub struct Runtime {
    config: Arc<AppConfig>,
    store: Arc<dyn TodoStore>,
}

impl Runtime {
    /// Create a new runtime, opening the store named by the configuration
    pub async fn new(config: AppConfig) -> Result<Self, TodoError> {
        let store = store::open(&config.store).await?;
        Ok(Self::with_store(config, store))
    }

    /// Create a runtime around an already opened store
    pub fn with_store(config: AppConfig, store: Arc<dyn TodoStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Build the Axum router
    pub fn router(&self) -> Router {
        build_router(AppState::new(self.store.clone(), self.config.clone()))
    }

    /// Start the server
    pub async fn run(&self) -> Result<(), TodoError> {
        let addr: SocketAddr = format!("{}:{}", self.config.host(), self.config.port())
            .parse()
            .map_err(|e| TodoError::Server(format!("Invalid address: {}", e)))?;

        let app = self.router();

        info!("Starting todos server on http://{}", addr);
        info!("Name: {}", self.config.name);
        info!(
            "Store: {} (database '{}')",
            self.store.backend(),
            self.config.store.database()
        );
        info!("Todos endpoint: http://{}/todos/", addr);
        info!("OpenAPI docs: http://{}/docs", addr);
        if let Some(dir) = self.config.static_dir() {
            info!("Serving static files from {}", dir);
        }

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| TodoError::Server(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, app)
            .with_graceful_shutdown(Self::shutdown_signal())
            .await
            .map_err(|e| TodoError::Server(format!("Server error: {}", e)))?;

        info!("Server stopped");
        self.shutdown().await?;

        Ok(())
    }

    /// Wait for shutdown signal
    async fn shutdown_signal() {
        let ctrl_c = async {
            signal::ctrl_c()
                .await
                .expect("Failed to install CTRL+C signal handler");
        };

        #[cfg(unix)]
        let terminate = async {
            signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("Failed to install SIGTERM signal handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                debug!("Received CTRL+C, shutting down...");
            }
            _ = terminate => {
                debug!("Received SIGTERM, shutting down...");
            }
        }
    }

    /// Gracefully shutdown the runtime
    pub async fn shutdown(&self) -> Result<(), TodoError> {
        info!("Closing store...");
        if let Err(e) = self.store.close().await {
            warn!("Error closing store: {}", e);
        }
        info!("Shutdown complete");
        Ok(())
    }

    /// Get the configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the store
    pub fn store(&self) -> &Arc<dyn TodoStore> {
        &self.store
    }
}

/// Build the router for `state`.
///
/// Methods not registered on a route answer 405 Method Not Allowed.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = state.config.static_dir().map(str::to_string);

    let mut router = Router::new()
        // Todo resource
        .route("/todos", get(TodoHandler::list).post(TodoHandler::create))
        .route("/todos/", get(TodoHandler::list).post(TodoHandler::create))
        .route(
            "/todos/:id",
            get(TodoHandler::get)
                .put(TodoHandler::update)
                .delete(TodoHandler::delete),
        )
        // Documentation
        .route("/docs", get(OpenApiHandler::handle))
        // Health check
        .route("/health", get(health_check));

    // Browser client
    if let Some(dir) = static_dir {
        let index = Path::new(&dir).join("index.html");
        router = router
            .nest_service("/static", ServeDir::new(&dir))
            .route_service("/", ServeFile::new(index));
    }

    router
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.health_check().await {
        Ok(()) => (StatusCode::OK, "OK").into_response(),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new(e.sanitized_message())),
            )
                .into_response()
        }
    }
}
