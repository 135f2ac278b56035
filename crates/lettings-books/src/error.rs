use crate::books::classify::CategoryRulesError;
use crate::books::invoices::InvoiceError;
use crate::books::reconcile::ReconciliationError;
use crate::config::ConfigError;
use crate::directory::service::DirectoryError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

/// Application-level failures: everything that can stop the service from
/// starting, plus the service errors the demo drives directly.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    CategoryRules(CategoryRulesError),
    Io(std::io::Error),
    Server(axum::Error),
    Reconciliation(ReconciliationError),
    Invoices(InvoiceError),
    Directory(DirectoryError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::CategoryRules(err) => write!(f, "category rules error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Reconciliation(err) => write!(f, "reconciliation error: {}", err),
            AppError::Invoices(err) => write!(f, "invoice error: {}", err),
            AppError::Directory(err) => write!(f, "directory error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::CategoryRules(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Reconciliation(err) => Some(err),
            AppError::Invoices(err) => Some(err),
            AppError::Directory(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Reconciliation(_) | AppError::Invoices(_) | AppError::Directory(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::CategoryRules(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<CategoryRulesError> for AppError {
    fn from(value: CategoryRulesError) -> Self {
        Self::CategoryRules(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<ReconciliationError> for AppError {
    fn from(value: ReconciliationError) -> Self {
        Self::Reconciliation(value)
    }
}

impl From<InvoiceError> for AppError {
    fn from(value: InvoiceError) -> Self {
        Self::Invoices(value)
    }
}

impl From<DirectoryError> for AppError {
    fn from(value: DirectoryError) -> Self {
        Self::Directory(value)
    }
}
