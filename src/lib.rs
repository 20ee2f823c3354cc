//! POS Dashboard Analytics Library
//!
//! Aggregates sales records into a single dashboard report and exposes the
//! cash drawer ledger behind the same permission and write-policy checks.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

use actix_web::web;

use crate::core::AppError;

// Re-export commonly used types
pub use modules::cash_drawer;
pub use modules::reports;

/// Register every route and the extractor error handlers.
///
/// Shared by the binary and the contract tests so both see the same surface.
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::validation(err.to_string()).into()
    }))
    .app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::validation(err.to_string()).into()
    }))
    .configure(modules::health::controllers::configure)
    .configure(modules::reports::controllers::configure)
    .configure(modules::cash_drawer::controllers::configure);
}
