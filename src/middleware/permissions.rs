use actix_web::HttpRequest;

use crate::core::{Action, AppError, Module, Result, RoleRegistry};

/// Role of the operator, set by the upstream authentication layer
pub const OPERATOR_ROLE_HEADER: &str = "X-Operator-Role";

/// Check that the calling operator's role grants `(module, action)`.
///
/// Returns the role name on success.
pub fn require_permission(
    req: &HttpRequest,
    registry: &RoleRegistry,
    module: Module,
    action: Action,
) -> Result<String> {
    let role = req
        .headers()
        .get(OPERATOR_ROLE_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| AppError::unauthorized(format!("Missing {} header", OPERATOR_ROLE_HEADER)))?;

    if !registry.is_allowed(role, module, action) {
        tracing::warn!(role = %role, module = %module, action = %action, "Permission denied");
        return Err(AppError::forbidden(format!(
            "role '{}' may not {} {}",
            role, action, module
        )));
    }

    Ok(role.to_string())
}
