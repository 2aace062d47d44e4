use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use std::fmt;
use uuid::Uuid;

use crate::domain::errors::{AppError, ErrorKind};
use crate::domain::user::ValueObjectError;

use super::dtos::ErrorResponse;

/// API error type that maps service failures to HTTP responses
#[derive(Debug)]
pub enum ApiError {
  /// Catalog failure, rendered with the catalog's code, message and status
  Domain(ErrorKind),

  /// Request body failed validation (400, `INVALID_REQUEST` with details)
  Validation(Vec<String>),

  /// Infrastructure failure (500); details are logged, never returned
  Internal(String),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Domain(kind) => write!(f, "{}: {}", kind.code(), kind.message()),
      ApiError::Validation(messages) => write!(f, "Validation error: {}", messages.join(", ")),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Domain(kind) => {
        StatusCode::from_u16(kind.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
      }
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let error_response = match self {
      ApiError::Domain(kind) => ErrorResponse {
        error: kind.code().to_string(),
        message: kind.message().to_string(),
        details: None,
      },
      ApiError::Validation(messages) => ErrorResponse {
        error: ErrorKind::InvalidRequest.code().to_string(),
        message: ErrorKind::InvalidRequest.message().to_string(),
        details: Some(serde_json::json!(messages)),
      },
      ApiError::Internal(msg) => {
        // Don't expose internal error details
        tracing::error!("Internal error: {}", msg);
        ErrorResponse {
          error: "INTERNAL_ERROR".to_string(),
          message: "An internal server error occurred".to_string(),
          details: None,
        }
      }
    };

    HttpResponse::build(self.status_code())
      .content_type(ContentType::json())
      .json(error_response)
  }
}

impl From<ErrorKind> for ApiError {
  fn from(kind: ErrorKind) -> Self {
    ApiError::Domain(kind)
  }
}

impl From<AppError> for ApiError {
  fn from(error: AppError) -> Self {
    match error {
      AppError::Domain(kind) => ApiError::Domain(kind),
      other => ApiError::Internal(other.to_string()),
    }
  }
}

impl From<ValueObjectError> for ApiError {
  fn from(error: ValueObjectError) -> Self {
    AppError::from(error).into()
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let mut messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();
    messages.sort();

    ApiError::Validation(messages)
  }
}

/// Parses a path id; anything but a UUID is an invalid request
pub fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
  Uuid::parse_str(raw.trim()).map_err(|_| ApiError::Domain(ErrorKind::InvalidRequest))
}
