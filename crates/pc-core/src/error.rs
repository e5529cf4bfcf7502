//! # AppError
//!
//! Centralized error handling for PickChef.
//! Maps domain-specific failures to actionable error types.

use serde::Serialize;
use thiserror::Error;

/// One failing field of a rejected payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// The primary error type for all pc-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed or out-of-range input. Lists every failing field.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// The addressed resource does not exist (e.g., Recipe, Ingredient)
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Duplicate unique value, or a delete blocked by existing references
    #[error("{0}")]
    Conflict(String),

    /// The payload points at another entity that does not exist
    #[error("{entity} with id {id} not found")]
    InvalidReference { entity: &'static str, id: i64 },

    /// Infrastructure failure (e.g., DB unreachable, constraint not pre-checked)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        AppError::NotFound { entity, id }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(format!("{err:#}"))
    }
}

impl From<garde::Report> for AppError {
    fn from(report: garde::Report) -> Self {
        let fields = report
            .iter()
            .map(|(path, error)| {
                let field = path.to_string();
                let field = if field.is_empty() { "body".to_string() } else { field };
                FieldError::new(field, error.message().to_string())
            })
            .collect();
        AppError::Validation(fields)
    }
}

/// A specialized Result type for PickChef logic.
pub type Result<T> = std::result::Result<T, AppError>;
