use crate::config::{MongoConfig, DEFAULT_DATABASE};
use crate::models::User;
use mongodb::{bson::doc, options::ClientOptions, Client as MongoClient, Collection, Database};
use service_core::error::AppError;
use std::time::Duration;

/// Process-wide database handle. Cloning shares the driver's pool.
#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    /// Builds the client. The driver connects lazily, so an unreachable
    /// server is only reported by the first operation.
    pub async fn connect(config: &MongoConfig, app_name: &str) -> Result<Self, AppError> {
        let mut client_options = ClientOptions::parse(&config.uri).await.map_err(|e| {
            tracing::error!("Failed to parse MongoDB connection string: {}", e);
            AppError::ConfigError(e.into())
        })?;
        client_options.app_name = Some(app_name.to_string());
        client_options.server_selection_timeout =
            Some(Duration::from_secs(config.server_selection_timeout_secs));

        let database = config
            .database
            .clone()
            .or_else(|| client_options.default_database.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let client = MongoClient::with_options(client_options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(&database);
        tracing::info!(database = %database, "MongoDB client initialized");

        Ok(Self { client, db })
    }

    /// Pings the server, failing with `ServiceUnavailable` after `timeout`.
    pub async fn health_check(&self, timeout: Duration) -> Result<(), AppError> {
        let admin = self.client.database("admin");
        let ping = admin.run_command(doc! { "ping": 1 }, None);

        match tokio::time::timeout(timeout, ping).await {
            Ok(result) => {
                result.map_err(AppError::from)?;
                Ok(())
            }
            Err(_) => Err(AppError::ServiceUnavailable(anyhow::anyhow!(
                "MongoDB ping timed out after {:?}",
                timeout
            ))),
        }
    }

    pub fn users(&self) -> Collection<User> {
        self.db.collection("users")
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Closes the client's connections. Other clones become unusable.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}
