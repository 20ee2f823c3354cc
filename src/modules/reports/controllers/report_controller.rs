use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::error;

use crate::core::{Action, AppError, Module, Result, RoleRegistry};
use crate::middleware::require_permission;
use crate::modules::reports::models::{Report, ReportPeriod, ReportRequest};
use crate::modules::reports::services::ReportService;

/// Query parameters for the dashboard report endpoint
#[derive(Debug, Default, Deserialize)]
pub struct DashboardReportQuery {
    /// day | week | month | year (default: month)
    #[serde(default)]
    pub period: Option<String>,
    /// Explicit inclusive start (RFC 3339); requires `end`
    #[serde(default)]
    pub start: Option<String>,
    /// Explicit inclusive end (RFC 3339); requires `start`
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub compare_to_previous: bool,
    /// Year of the monthly trend (default: current year)
    #[serde(default)]
    pub year: Option<i32>,
}

impl DashboardReportQuery {
    pub fn into_request(self) -> Result<ReportRequest> {
        let period = match self.period.as_deref() {
            Some(raw) => raw.parse::<ReportPeriod>().map_err(AppError::validation)?,
            None => ReportPeriod::default(),
        };

        let range = match (self.start.as_deref(), self.end.as_deref()) {
            (Some(start), Some(end)) => Some((
                parse_instant("start", start)?,
                parse_instant("end", end)?,
            )),
            (None, None) => None,
            _ => {
                return Err(AppError::validation(
                    "start and end must be provided together",
                ))
            }
        };

        Ok(ReportRequest {
            period,
            range,
            compare_to_previous: self.compare_to_previous,
            year: self.year,
        })
    }
}

fn parse_instant(field: &str, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| {
            AppError::validation(format!(
                "Invalid {} format: '{}'. Expected RFC 3339, e.g. 2025-03-01T00:00:00Z",
                field, raw
            ))
        })
}

/// GET /api/reports/dashboard
///
/// Returns the full dashboard report for the requested period. Requires
/// `dashboard:read`.
pub async fn get_dashboard_report(
    req: HttpRequest,
    service: web::Data<ReportService>,
    roles: web::Data<RoleRegistry>,
    query: web::Query<DashboardReportQuery>,
) -> HttpResponse {
    match handle_get_dashboard_report(req, service, roles, query).await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => {
            error!("Failed to generate dashboard report: {}", e);
            e.error_response()
        }
    }
}

async fn handle_get_dashboard_report(
    req: HttpRequest,
    service: web::Data<ReportService>,
    roles: web::Data<RoleRegistry>,
    query: web::Query<DashboardReportQuery>,
) -> Result<Report> {
    require_permission(&req, &roles, Module::Dashboard, Action::Read)?;

    let request = query.into_inner().into_request()?;
    service.generate(request).await
}

/// Configure routes for reports module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/reports").route("/dashboard", web::get().to(get_dashboard_report)),
    );
}
