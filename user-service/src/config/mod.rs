use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017/muchtodo";
pub const DEFAULT_DATABASE: &str = "muchtodo";

#[derive(Debug, Clone)]
pub struct UserConfig {
    pub common: core_config::Config,
    pub environment: Environment,
    pub service_name: String,
    pub mongodb: MongoConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Dev,
    Prod,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    /// Overrides the database named in the URI.
    pub database: Option<String>,
    pub server_selection_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct HealthConfig {
    pub timeout_ms: u64,
}

impl UserConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;

        let environment: Environment = env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "dev".to_string())
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;
        let is_prod = environment == Environment::Prod;

        Ok(UserConfig {
            common: common_config,
            environment,
            service_name: get_env("SERVICE_NAME", Some("user-service"), false)?,
            mongodb: MongoConfig {
                uri: unquote(&get_env("MONGO_URI", Some(DEFAULT_MONGO_URI), is_prod)?),
                database: env::var("DB_NAME").ok().filter(|name| !name.is_empty()),
                server_selection_timeout_secs: parse_env(
                    "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                    "5",
                )?,
            },
            health: HealthConfig {
                timeout_ms: parse_env("HEALTH_CHECK_TIMEOUT_MS", "2000")?,
            },
        })
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

/// `.env` files often quote URIs; the driver rejects the quotes.
fn unquote(value: &str) -> String {
    value.trim_matches('"').to_string()
}

fn parse_env(key: &str, default: &str) -> Result<u64, AppError> {
    get_env(key, Some(default), false)?
        .parse()
        .map_err(|e: std::num::ParseIntError| {
            AppError::ConfigError(anyhow::anyhow!("{} must be a number: {}", key, e))
        })
}
