use crate::model::ErrorResponse;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use minilink_resolver::ResolveError;
use minilink_shortener::CreateError;
use tracing::error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Gateway-level error, mapping service failures to HTTP responses.
///
/// Invalid input and not-found map to distinct client errors; every
/// other failure becomes a generic server error that leaks no internal
/// detail.
#[derive(Debug)]
pub enum AppError {
    MalformedBody,
    Create(CreateError),
    Resolve(ResolveError),
}

impl From<JsonRejection> for AppError {
    fn from(_: JsonRejection) -> Self {
        Self::MalformedBody
    }
}

impl From<CreateError> for AppError {
    fn from(value: CreateError) -> Self {
        Self::Create(value)
    }
}

impl From<ResolveError> for AppError {
    fn from(value: ResolveError) -> Self {
        Self::Resolve(value)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::MalformedBody => (
                StatusCode::BAD_REQUEST,
                "Missing required parameters".to_string(),
            ),
            AppError::Create(CreateError::InvalidInput(message)) => {
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Create(CreateError::GenerationExhausted) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not generate unique code, please try again".to_string(),
            ),
            AppError::Create(CreateError::StoreUnavailable(detail)) => {
                error!(detail = %detail, "store failure during creation");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error".to_string(),
                )
            }
            AppError::Resolve(ResolveError::NotFound) => (
                StatusCode::NOT_FOUND,
                "Short URL not found".to_string(),
            ),
            AppError::Resolve(ResolveError::StoreUnavailable(detail)) => {
                error!(detail = %detail, "store failure during resolution");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
