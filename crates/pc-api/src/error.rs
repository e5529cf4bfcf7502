//! # HTTP error mapping
//!
//! Turns `AppError` into status codes and JSON bodies, and routes extractor
//! failures (bad JSON, bad query or path values) into the same validation shape.

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use pc_core::error::{AppError, FieldError};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
#[error(transparent)]
pub struct ApiError(#[from] pub AppError);

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError(AppError::from(err))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict(_) | AppError::InvalidReference { .. } => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match &self.0 {
            AppError::Validation(fields) => json!({ "detail": fields }),
            AppError::Internal(reason) => {
                log::error!("request failed: {}", reason);
                json!({ "detail": "Internal server error" })
            }
            other => json!({ "detail": other.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

fn rejected(field: &str, reason: impl ToString) -> actix_web::Error {
    ApiError(AppError::Validation(vec![FieldError::new(field, reason.to_string())])).into()
}

/// Malformed or mistyped request bodies become 422 validation errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| rejected("body", err))
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| rejected("query", err))
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| rejected("path", err))
}
