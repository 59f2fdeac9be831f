use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;
use toolbox_core::ToolError;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Tool '{0}' not found")]
    ToolNotFound(String),

    #[error("No API endpoint at {0}")]
    RouteNotFound(String),

    #[error("Locale '{0}' is not supported")]
    UnsupportedLocale(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Invalid preference: {0}")]
    BadPreference(String),

    #[error("Tool execution failed: {0}")]
    ToolExecutionError(String),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<ToolError> for AppError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::NotFound(name) => AppError::ToolNotFound(name),
            ToolError::InvalidArguments(msg) => AppError::InvalidArguments(msg),
            ToolError::Execution(msg) => AppError::ToolExecutionError(msg),
        }
    }
}

impl AppError {
    fn error_type(&self) -> &'static str {
        match self {
            AppError::ToolNotFound(_)
            | AppError::RouteNotFound(_)
            | AppError::UnsupportedLocale(_) => "not_found_error",
            AppError::InvalidArguments(_) | AppError::BadPreference(_) => "invalid_request_error",
            _ => "api_error",
        }
    }
}

#[derive(Serialize)]
struct JsonError {
    message: String,
    r#type: String,
}

#[derive(Serialize)]
struct JsonErrorWrapper {
    error: JsonError,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ToolNotFound(_) => StatusCode::NOT_FOUND,
            AppError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            AppError::UnsupportedLocale(_) => StatusCode::NOT_FOUND,
            AppError::InvalidArguments(_) => StatusCode::BAD_REQUEST,
            AppError::BadPreference(_) => StatusCode::BAD_REQUEST,
            AppError::ToolExecutionError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            tracing::error!("{}", self);
        }
        let error_response = JsonErrorWrapper {
            error: JsonError {
                message: self.to_string(),
                r#type: self.error_type().to_string(),
            },
        };
        HttpResponse::build(status_code).json(error_response)
    }
}
