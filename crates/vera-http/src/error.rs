//! API error type, the `{status, message, timeStamp}` error body, and the
//! Portuguese translation applied at the transport boundary.
//!
//! Internally everything speaks the English message constants; the wire
//! speaks Portuguese. Unknown messages pass through untranslated.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use vera_core::ServiceError;

/// Internal (English) message constants; keys of the translation table.
pub mod messages {
  pub const REGISTRO_NOT_FOUND: &str = "Registro not found";
  pub const FAILED_TO_UPDATE_REGISTRO: &str = "Failed to update registro";
  pub const SALARY_MUST_BE_POSITIVE: &str = "Salary must be positive";
  pub const SALARY_MINIMUM: &str = "Salary must be at least 1300";
  pub const SALARY_MAXIMUM: &str = "Salary cannot exceed 100,000";
  pub const EMPLOYEE_NAME_REQUIRED: &str = "Employee name is required";
  pub const EMPLOYEE_NAME_MAX_LENGTH: &str =
    "Employee name cannot exceed 30 characters";
  pub const DATE_FORMAT_INVALID: &str = "Date must be in YYYY-MM-DD format";
  pub const ADMISSION_DATE_FUTURE: &str =
    "Admission date cannot be in the future";
  pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";
}

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(&'static str),

  #[error("bad request: {0}")]
  BadRequest(&'static str),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl<E> From<ServiceError<E>> for ApiError
where
  E: std::error::Error + Send + Sync + 'static,
{
  fn from(err: ServiceError<E>) -> Self {
    match err {
      ServiceError::NotFound => {
        ApiError::NotFound(messages::REGISTRO_NOT_FOUND)
      }
      ServiceError::UpdateFailed => {
        ApiError::BadRequest(messages::FAILED_TO_UPDATE_REGISTRO)
      }
      ServiceError::Store(e) => ApiError::Store(Box::new(e)),
    }
  }
}

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
  pub status:     u16,
  pub message:    String,
  pub time_stamp: String,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, translate(m)),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, translate(m)),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store operation failed");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          translate(messages::INTERNAL_SERVER_ERROR),
        )
      }
    };

    let body = ErrorBody {
      status:     status.as_u16(),
      message,
      time_stamp: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    };
    (status, Json(body)).into_response()
  }
}

/// Translate an internal message into the Portuguese form exposed on the
/// wire.
fn translate(message: &str) -> String {
  match message {
    "Registro not found" => "Registro não encontrado",
    "Failed to update registro" => "Falha ao atualizar registro",
    "Salary must be positive" => "Salário deve ser um número positivo",
    "Salary must be at least 1300" => "Salário deve ser no mínimo 1300",
    "Salary cannot exceed 100,000" => "Salário não pode exceder 100.000",
    "Employee name is required" => "Nome do funcionário é obrigatório",
    "Employee name cannot exceed 30 characters" => {
      "Nome do funcionário não pode exceder 30 caracteres"
    }
    "Date must be in YYYY-MM-DD format" => {
      "Data deve estar no formato AAAA-MM-DD"
    }
    "Admission date cannot be in the future" => {
      "Data de admissão não pode ser no futuro"
    }
    "Internal server error" => "Erro interno do servidor",
    other => other,
  }
  .to_string()
}
