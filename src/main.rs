use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pos_dashboard::config::Config;
use pos_dashboard::core::{write_policy, SystemClock};
use pos_dashboard::middleware::{not_found, ErrorHandler, RequestId};
use pos_dashboard::modules::cash_drawer::{CashDrawerService, MySqlCashDrawerRepository};
use pos_dashboard::modules::reports::{MySqlReportRepository, ReportService};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize tracing; JSON lines in production
    let json_logs = config.app.env == "production";
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("pos_dashboard={},actix_web=info", config.app.log_level).into()
            }),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    config
        .validate()
        .context("Configuration validation failed")?;

    tracing::info!("Starting POS Dashboard Analytics");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());
    if config.app.demo_mode {
        tracing::warn!("Demo mode enabled, write operations are disabled");
    }

    // Create database connection pool
    let db_pool = config
        .database
        .create_pool()
        .await
        .context("Failed to create database pool")?;

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!(
        pool_size = config.database.pool_size,
        max_connections = config.database.max_connections,
        concurrent_reports = config.database.concurrent_reports(),
        "Database pool initialized"
    );

    let clock = Arc::new(SystemClock);
    let write_policy = write_policy::from_demo_mode(config.app.demo_mode);

    let report_service = web::Data::new(ReportService::new(
        Arc::new(MySqlReportRepository::new(db_pool.clone())),
        clock.clone(),
        config.reports.settings()?,
    ));
    let cash_drawer_service = web::Data::new(CashDrawerService::new(
        Arc::new(MySqlCashDrawerRepository::new(db_pool.clone())),
        write_policy.clone(),
        clock,
    ));
    let roles = web::Data::new(config.security.roles.clone());
    let policy_data = web::Data::from(write_policy);
    let pool_data = web::Data::new(db_pool);

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(report_service.clone())
            .app_data(cash_drawer_service.clone())
            .app_data(roles.clone())
            .app_data(policy_data.clone())
            .app_data(pool_data.clone())
            .configure(pos_dashboard::configure_app)
            .default_service(web::to(not_found))
            .wrap(Cors::permissive())
            .wrap(ErrorHandler)
            .wrap(TracingLogger::default())
            .wrap(RequestId)
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}
