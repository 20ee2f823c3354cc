use crate::core::{AppError, ReportingOffset, Result, RoleRegistry};
use crate::modules::reports::ReportSettings;
use std::env;
use std::time::Duration;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub reports: ReportConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    /// Reject every write with a fixed message
    pub demo_mode: bool,
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub top_products_limit: u32,
    /// Per sub-query deadline
    pub query_timeout_secs: u64,
    pub utc_offset_minutes: i32,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub roles: RoleRegistry,
}

impl ReportConfig {
    pub const MAX_TOP_PRODUCTS: u32 = 50;

    pub fn from_env() -> Result<Self> {
        Ok(ReportConfig {
            top_products_limit: parse_var("REPORT_TOP_PRODUCTS_LIMIT", "5")?,
            query_timeout_secs: parse_var("REPORT_QUERY_TIMEOUT_SECS", "15")?,
            utc_offset_minutes: parse_var("REPORT_UTC_OFFSET_MINUTES", "0")?,
        })
    }

    /// Aggregator settings derived from this configuration
    pub fn settings(&self) -> Result<ReportSettings> {
        let offset = ReportingOffset::from_minutes(self.utc_offset_minutes)
            .map_err(AppError::Configuration)?;

        Ok(ReportSettings {
            top_products_limit: self.top_products_limit,
            query_timeout: Duration::from_secs(self.query_timeout_secs),
            offset,
        })
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let roles = match env::var("ROLE_PERMISSIONS") {
            Ok(raw) if !raw.trim().is_empty() => {
                RoleRegistry::from_json_str(&raw).map_err(AppError::Configuration)?
            }
            _ => RoleRegistry::builtin(),
        };

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                demo_mode: parse_var("DEMO_MODE", "false")?,
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            reports: ReportConfig::from_env()?,
            security: SecurityConfig { roles },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.database.validate()?;

        let limit = self.reports.top_products_limit;
        if limit == 0 || limit > ReportConfig::MAX_TOP_PRODUCTS {
            return Err(AppError::Configuration(format!(
                "REPORT_TOP_PRODUCTS_LIMIT must be between 1 and {}",
                ReportConfig::MAX_TOP_PRODUCTS
            )));
        }

        if self.reports.query_timeout_secs == 0 {
            return Err(AppError::Configuration(
                "REPORT_QUERY_TIMEOUT_SECS must be greater than 0".to_string(),
            ));
        }

        self.reports.settings()?;

        if self.security.roles.is_empty() {
            return Err(AppError::Configuration(
                "ROLE_PERMISSIONS must define at least one role".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: &str) -> Result<T> {
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .trim()
        .parse()
        .map_err(|_| AppError::Configuration(format!("Invalid {}", name)))
}
