use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use stockroom_core::error::CoreError;
use stockroom_core::ledger::LedgerError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors (ledger rejections included) and
/// adds HTTP-specific variants. Every variant renders as
/// `{ "error": <message>, "code": <CODE> }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        AppError::Core(CoreError::Ledger(err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(first_validation_message(&err)))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Ledger(ledger) => classify_ledger_error(ledger),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal()
        }
    }
}

fn classify_ledger_error(err: &LedgerError) -> (StatusCode, &'static str, String) {
    let (status, code) = match err {
        LedgerError::ProductNotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        LedgerError::InvalidQuantity(_) => (StatusCode::BAD_REQUEST, "INVALID_QUANTITY"),
        LedgerError::MissingReason => (StatusCode::BAD_REQUEST, "MISSING_REASON"),
        LedgerError::InvalidDirection(_) => (StatusCode::BAD_REQUEST, "INVALID_DIRECTION"),
        LedgerError::InsufficientStock { .. } => (StatusCode::CONFLICT, "INSUFFICIENT_STOCK"),
        LedgerError::ProductInactive { .. } => (StatusCode::CONFLICT, "PRODUCT_INACTIVE"),
        LedgerError::PersistenceFailure(msg) => {
            tracing::error!(error = %msg, "Ledger persistence failure");
            return internal();
        }
    };
    (status, code, err.to_string())
}

/// User-facing message for a known unique constraint.
fn unique_violation_message(constraint: &str) -> String {
    match constraint {
        "uq_products_code" => "A product with this code already exists".to_string(),
        "uq_users_email" => "This email is already registered".to_string(),
        "uq_categories_name" => "A category with this name already exists".to_string(),
        other => format!("Duplicate value violates unique constraint: {other}"),
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations (`23505`) on `uq_*` constraints map to 409.
/// - Foreign key (`23503`) and check (`23514`) violations map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                Some("23505") if constraint.starts_with("uq_") => (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    unique_violation_message(constraint),
                ),
                Some("23503") => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_REFERENCE",
                    format!("Referenced record does not exist ({constraint})"),
                ),
                Some("23514") => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    format!("Value violates check constraint: {constraint}"),
                ),
                _ => {
                    tracing::error!(error = %db_err, "Database error");
                    internal()
                }
            }
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}

/// Pick one human-readable message out of a validator error set.
fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .find_map(|(field, errs)| {
            errs.first().map(|e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .unwrap_or_else(|| "Validation failed".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn ledger_errors_map_to_http_statuses() {
        assert_eq!(
            status_of(LedgerError::ProductNotFound { id: 1 }.into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(LedgerError::InvalidQuantity("0".into()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(LedgerError::MissingReason.into()), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(LedgerError::InvalidDirection("x".into()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(
                LedgerError::InsufficientStock {
                    available: 5,
                    requested: 10
                }
                .into()
            ),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(LedgerError::ProductInactive { id: 1 }.into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(LedgerError::PersistenceFailure("boom".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn core_errors_map_to_http_statuses() {
        let not_found = CoreError::NotFound {
            entity: "Product",
            id: 9,
        };
        assert_eq!(status_of(not_found.into()), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(CoreError::validation("bad").into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(CoreError::Unauthorized("no".into()).into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(CoreError::Forbidden("no".into()).into()),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(AppError::Database(sqlx::Error::RowNotFound)),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn known_unique_constraints_get_friendly_messages() {
        assert_eq!(
            unique_violation_message("uq_products_code"),
            "A product with this code already exists"
        );
        assert_eq!(
            unique_violation_message("uq_users_email"),
            "This email is already registered"
        );
        assert!(unique_violation_message("uq_other").contains("uq_other"));
    }
}
