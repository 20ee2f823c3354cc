use crate::core::{AppError, Result};
use crate::modules::reports::models::SubQuery;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::env;
use std::time::Duration;

/// Record store connection settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    /// Connections kept open while idle
    pub pool_size: u32,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        let url = env::var("DATABASE_URL")
            .map_err(|_| AppError::Configuration("DATABASE_URL not set".to_string()))?;

        Ok(DatabaseConfig {
            url,
            pool_size: parse_or("DATABASE_POOL_SIZE", 10)?,
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 20)?,
            acquire_timeout_secs: parse_or("DATABASE_ACQUIRE_TIMEOUT_SECS", 30)?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_connections == 0 {
            return Err(AppError::Configuration(
                "DATABASE_MAX_CONNECTIONS must be greater than 0".to_string(),
            ));
        }

        if self.pool_size > self.max_connections {
            return Err(AppError::Configuration(format!(
                "DATABASE_POOL_SIZE ({}) exceeds DATABASE_MAX_CONNECTIONS ({})",
                self.pool_size, self.max_connections
            )));
        }

        // A smaller pool still works; the batch just queues for connections
        if (self.max_connections as usize) < SubQuery::ALL.len() {
            tracing::warn!(
                max_connections = self.max_connections,
                sub_queries = SubQuery::ALL.len(),
                "Pool is smaller than one report batch"
            );
        }

        Ok(())
    }

    /// Number of dashboard reports whose batches fit the pool at once
    pub fn concurrent_reports(&self) -> u32 {
        self.max_connections / SubQuery::ALL.len() as u32
    }

    /// Create the MySQL connection pool.
    pub async fn create_pool(&self) -> Result<MySqlPool> {
        MySqlPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.pool_size)
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(600)) // 10 minutes
            .max_lifetime(Duration::from_secs(1800)) // 30 minutes
            .test_before_acquire(true)
            .connect(&self.url)
            .await
            .map_err(AppError::Database)
    }
}

fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("Invalid {}", name))),
        Err(_) => Ok(default),
    }
}
