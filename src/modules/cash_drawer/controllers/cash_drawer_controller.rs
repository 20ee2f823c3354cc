use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::error;

use crate::core::{Action, AppError, Module, Result, RoleRegistry};
use crate::middleware::require_permission;
use crate::modules::cash_drawer::models::{CashDrawerEntry, DrawerSummary, NewCashDrawerEntry};
use crate::modules::cash_drawer::services::CashDrawerService;

/// Query parameters for the drawer summary endpoint
#[derive(Debug, Deserialize)]
pub struct DrawerSummaryQuery {
    /// Inclusive start (RFC 3339)
    pub start: String,
    /// Inclusive end (RFC 3339)
    pub end: String,
    #[serde(default)]
    pub cashier_id: Option<String>,
}

fn parse_instant(field: &str, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| {
            AppError::validation(format!(
                "Invalid {} format: '{}'. Expected RFC 3339",
                field, raw
            ))
        })
}

/// POST /api/cash-drawer/entries
pub async fn create_entry(
    req: HttpRequest,
    service: web::Data<CashDrawerService>,
    roles: web::Data<RoleRegistry>,
    payload: web::Json<NewCashDrawerEntry>,
) -> HttpResponse {
    match handle_create_entry(req, service, roles, payload).await {
        Ok(entry) => HttpResponse::Created().json(entry),
        Err(e) => {
            error!("Failed to record cash drawer entry: {}", e);
            e.error_response()
        }
    }
}

/// GET /api/cash-drawer/summary
pub async fn get_summary(
    req: HttpRequest,
    service: web::Data<CashDrawerService>,
    roles: web::Data<RoleRegistry>,
    query: web::Query<DrawerSummaryQuery>,
) -> HttpResponse {
    match handle_get_summary(req, service, roles, query).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => {
            error!("Failed to summarize cash drawer: {}", e);
            e.error_response()
        }
    }
}

async fn handle_create_entry(
    req: HttpRequest,
    service: web::Data<CashDrawerService>,
    roles: web::Data<RoleRegistry>,
    payload: web::Json<NewCashDrawerEntry>,
) -> Result<CashDrawerEntry> {
    require_permission(&req, &roles, Module::CashDrawer, Action::Create)?;
    service.record_entry(payload.into_inner()).await
}

async fn handle_get_summary(
    req: HttpRequest,
    service: web::Data<CashDrawerService>,
    roles: web::Data<RoleRegistry>,
    query: web::Query<DrawerSummaryQuery>,
) -> Result<DrawerSummary> {
    require_permission(&req, &roles, Module::CashDrawer, Action::Read)?;

    let start = parse_instant("start", &query.start)?;
    let end = parse_instant("end", &query.end)?;
    let cashier_id = query.cashier_id.as_deref().filter(|id| !id.is_empty());

    service.summarize(start, end, cashier_id).await
}

/// Configure routes for cash drawer module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/cash-drawer")
            .route("/entries", web::post().to(create_entry))
            .route("/summary", web::get().to(get_summary)),
    );
}
