use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ApiResponse;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No eligible employees left for this prize")]
    EmptyPool,

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Failed to load employees: {0}")]
    LoadFailed(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("External API error: {0}")]
    ExternalApiError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl AppError {
    /// Message suitable for a user-visible notification.
    ///
    /// Server-provided messages are passed through, transport failures get a generic text.
    pub fn user_message(&self) -> String {
        match self {
            AppError::EmptyPool => "Semua karyawan sudah memenangkan hadiah ini".to_string(),
            AppError::Persistence(msg)
            | AppError::LoadFailed(msg)
            | AppError::ValidationError(msg) => msg.clone(),
            AppError::Timeout(_) => "Server tidak merespons, silakan coba lagi".to_string(),
            _ => "Terjadi kesalahan, silakan coba lagi".to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                (
                    actix_web::http::StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    msg.clone(),
                )
            }
            AppError::EmptyPool => (
                actix_web::http::StatusCode::CONFLICT,
                "EMPTY_POOL",
                self.user_message(),
            ),
            AppError::Persistence(msg) => {
                log::error!("Persistence error: {msg}");
                (
                    actix_web::http::StatusCode::BAD_GATEWAY,
                    "PERSISTENCE_ERROR",
                    msg.clone(),
                )
            }
            AppError::ExternalApiError(msg) => {
                log::error!("External API error: {msg}");
                (
                    actix_web::http::StatusCode::BAD_GATEWAY,
                    "EXTERNAL_API_ERROR",
                    self.user_message(),
                )
            }
            AppError::LoadFailed(msg) => {
                log::warn!("Load error: {msg}");
                (
                    actix_web::http::StatusCode::BAD_GATEWAY,
                    "LOAD_ERROR",
                    msg.clone(),
                )
            }
            AppError::Timeout(msg) => {
                log::error!("Timeout: {msg}");
                (
                    actix_web::http::StatusCode::GATEWAY_TIMEOUT,
                    "TIMEOUT",
                    self.user_message(),
                )
            }
            AppError::ReqwestError(err) => {
                log::error!("HTTP request error: {err}");
                (
                    actix_web::http::StatusCode::BAD_GATEWAY,
                    "EXTERNAL_API_ERROR",
                    "External service unavailable".to_string(),
                )
            }
            _ => {
                log::error!("Internal error: {self}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        HttpResponse::build(status_code).json(ApiResponse::<()>::failure(error_code, message))
    }
}
