//! `IntoResponse` for `AppError`.
//!
//! Every error body is an [`ErrorResponse`] tagged with the current request ID.
//! Sources of server-side failures are logged, never returned.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::CURRENT_REQUEST_ID;
use crate::api::dto::ErrorResponse;
use crate::api::headers;
use crate::error::AppError;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::IdExists { .. }
            | AppError::Validation { .. }
            | AppError::ValidationErrors { .. }
            | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database { .. } | AppError::Configuration { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::IdExists { .. } => "ID_EXISTS",
            AppError::Validation { .. } | AppError::ValidationErrors { .. } => "VALIDATION_ERROR",
            AppError::BadRequest { .. } => "BAD_REQUEST",
            AppError::Unauthorized { .. } => "UNAUTHORIZED",
            AppError::Database { .. } => "DATABASE_ERROR",
            AppError::Configuration { .. } => "CONFIGURATION_ERROR",
            AppError::ConnectionPool { .. } => "SERVICE_UNAVAILABLE",
            AppError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    fn to_error_response(&self) -> ErrorResponse {
        let code = self.code();
        match self {
            AppError::IdExists { entity } => ErrorResponse::new(code, self.to_string())
                .with_details(json!({ "entity": entity })),
            AppError::Validation { field, reason } => {
                ErrorResponse::new(code, "Validation failed").with_details(json!([
                    { "field": field, "message": reason }
                ]))
            }
            AppError::ValidationErrors { errors } => {
                ErrorResponse::new(code, "Validation failed").with_details(json!(errors))
            }
            AppError::BadRequest { message } | AppError::Unauthorized { message } => {
                ErrorResponse::new(code, message.as_str())
            }
            AppError::Database { operation, .. } => {
                ErrorResponse::new(code, format!("Database operation failed: {}", operation))
            }
            AppError::Configuration { key, .. } => {
                ErrorResponse::new(code, format!("Configuration error: {}", key))
            }
            AppError::ConnectionPool { .. } => {
                ErrorResponse::new(code, "Database connection unavailable")
            }
            AppError::Internal { .. } => ErrorResponse::new(code, "An internal error occurred"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let mut body = self.to_error_response();
        if let Ok(request_id) = CURRENT_REQUEST_ID.try_with(Clone::clone) {
            body = body.with_request_id(request_id);
        }

        match &self {
            AppError::IdExists { entity } => (
                status,
                headers::failure_alert(entity, "idexists"),
                Json(body),
            )
                .into_response(),
            _ => (status, Json(body)).into_response(),
        }
    }
}
