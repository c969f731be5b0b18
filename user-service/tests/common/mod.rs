//! Test helpers for user-service integration tests.
//!
//! Tests talking to a live database read `TEST_MONGODB_URI`
//! (default `mongodb://localhost:27017`) and use a fresh database each.

#![allow(dead_code)]

use service_core::config::{Config as CoreConfig, LogFormat};
use user_service::config::{Environment, HealthConfig, MongoConfig, UserConfig};
use user_service::services::{MongoDb, UserRepository};
use user_service::startup::{AppState, Application};

/// Nothing listens on port 1, so server selection fails fast.
pub const UNREACHABLE_MONGODB_URI: &str = "mongodb://127.0.0.1:1/?connectTimeoutMS=200";

pub fn test_config(uri: &str, db_name: &str) -> UserConfig {
    UserConfig {
        common: CoreConfig {
            port: 0, // Random port
            log_level: "error".to_string(),
            log_format: LogFormat::Text,
            otlp_endpoint: None,
        },
        environment: Environment::Dev,
        service_name: "user-service-test".to_string(),
        mongodb: MongoConfig {
            uri: uri.to_string(),
            database: Some(db_name.to_string()),
            server_selection_timeout_secs: 1,
        },
        health: HealthConfig { timeout_ms: 500 },
    }
}

/// State wired to a database that cannot be reached, for router tests that
/// must not depend on MongoDB.
pub async fn unreachable_state() -> AppState {
    let config = test_config(UNREACHABLE_MONGODB_URI, "unreachable");
    let db = MongoDb::connect(&config.mongodb, &config.service_name)
        .await
        .expect("Failed to build MongoDB client");
    let repository = UserRepository::new(&db);

    AppState {
        config,
        db,
        repository,
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: MongoDb,
    pub db_name: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let uri = std::env::var("TEST_MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        Self::spawn_with_uri(&uri).await
    }

    pub async fn spawn_with_uri(uri: &str) -> Self {
        let db_name = format!("user_test_{}", uuid::Uuid::new_v4().simple());
        let config = test_config(uri, &db_name);

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);
        let db = app.db().clone();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling the metrics endpoint,
        // which does not touch the database.
        let client = reqwest::Client::new();
        let ready_url = format!("{}/metrics", address);
        for _ in 0..50 {
            if client.get(&ready_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            db_name,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Cleanup test database after test completes.
    pub async fn cleanup(&self) {
        self.db
            .database()
            .drop(None)
            .await
            .expect("Failed to drop test database");
    }
}
