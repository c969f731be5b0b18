//! Application startup and lifecycle management.

use crate::config::UserConfig;
use crate::handlers;
use crate::services::{MongoDb, UserRepository};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    security_headers::security_headers_middleware,
    tracing::{make_request_span, request_id_middleware},
};
use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: UserConfig,
    pub db: MongoDb,
    pub repository: UserRepository,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics))
        .route(
            "/users",
            post(handlers::users::create_user).get(handlers::users::list_users),
        )
        .route(
            "/users/:id",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<axum::body::Body>))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: UserConfig) -> Result<Self, AppError> {
        let db = MongoDb::connect(&config.mongodb, &config.service_name).await?;
        let repository = UserRepository::new(&db);

        let state = AppState {
            config: config.clone(),
            db,
            repository,
        };

        // Port 0 picks a random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(service = %config.service_name, port, "Listening");

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn db(&self) -> &MongoDb {
        &self.state.db
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> Result<(), AppError> {
        self.run_until(std::future::pending()).await
    }

    /// Serve until `shutdown` resolves, then drain connections and close the
    /// MongoDB client.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), AppError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let db = self.state.db.clone();
        spawn_connection_probe(db.clone(), self.state.config.health.timeout_ms);

        let router = build_router(self.state);
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                AppError::from(e)
            })?;

        db.shutdown().await;
        tracing::info!("MongoDB client closed");
        Ok(())
    }
}

/// Logs the initial connection outcome without blocking startup.
fn spawn_connection_probe(db: MongoDb, timeout_ms: u64) {
    tokio::spawn(async move {
        match db.health_check(Duration::from_millis(timeout_ms)).await {
            Ok(()) => tracing::info!("MongoDB connected"),
            Err(e) => tracing::error!(error = %e, "MongoDB connection error"),
        }
    });
}
