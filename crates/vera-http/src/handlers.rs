//! Handlers for the `/registros` endpoints.
//!
//! | Method   | Path                   | Notes                               |
//! |----------|------------------------|-------------------------------------|
//! | `POST`   | `/registros`           | 201 + created record                |
//! | `GET`    | `/registros`           | Filtered listing                    |
//! | `GET`    | `/registros/paginated` | Filtered + sorted, one page         |
//! | `GET`    | `/registros/{id}`      | 404 if not found                    |
//! | `PATCH`  | `/registros/{id}`      | Partial update, whitelisted fields  |
//! | `DELETE` | `/registros/{id}`      | 204 on success                      |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use vera_core::{
  Registro,
  service::{NewRegistro, RegistroService, UpdateRegistro},
  store::{
    OrderDirection, OrderField, Page, Pagination, RegistroFilters,
    RegistroStore,
  },
};

use crate::{error::ApiError, validate};

// ─── Bodies and query parameters ─────────────────────────────────────────────

/// Body of `POST /registros`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
  pub admission_date: String,
  pub salary:         f64,
  pub employee:       String,
}

/// Body of `PATCH /registros/{id}`.
///
/// Only these three fields are updatable. Anything else in the payload —
/// `calculatedSalary`, `id`, `createdAt`, … — is dropped at
/// deserialisation, so illegitimate input cannot reach the stored record.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBody {
  pub admission_date: Option<String>,
  pub salary:         Option<f64>,
  pub employee:       Option<String>,
}

/// Filter query parameters, mapping 1:1 onto [`RegistroFilters`].
/// Numeric-looking fields are coerced by the query deserialiser.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
  pub id:                      Option<String>,
  pub start_date:              Option<String>,
  pub end_date:                Option<String>,
  pub start_salary:            Option<f64>,
  pub end_salary:              Option<f64>,
  pub start_salary_calculated: Option<f64>,
  pub end_salary_calculated:   Option<f64>,
  pub employee:                Option<String>,
}

impl FilterParams {
  fn into_filters(self) -> RegistroFilters {
    RegistroFilters {
      id:                      self.id,
      start_date:              self.start_date,
      end_date:                self.end_date,
      start_salary:            self.start_salary,
      end_salary:              self.end_salary,
      start_salary_calculated: self.start_salary_calculated,
      end_salary_calculated:   self.end_salary_calculated,
      employee:                self.employee,
    }
  }
}

/// Pagination query parameters for `GET /registros/paginated`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
  pub page:     Option<i64>,
  pub limit:    Option<i64>,
  pub order:    Option<String>,
  pub order_by: Option<String>,
}

impl PageParams {
  /// Unrecognised `order`/`orderBy` values fall back to the listing
  /// defaults (admission date, descending) rather than erroring; negative
  /// page/limit values clamp to zero.
  fn into_pagination(self) -> Pagination {
    Pagination {
      page:     self.page.unwrap_or(0).max(0) as u64,
      limit:    self.limit.unwrap_or(8).max(0) as u64,
      order:    self
        .order
        .as_deref()
        .and_then(OrderField::parse)
        .unwrap_or_default(),
      order_by: self
        .order_by
        .as_deref()
        .and_then(OrderDirection::parse)
        .unwrap_or(OrderDirection::Desc),
    }
  }
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /registros`
pub async fn create<R>(
  State(service): State<RegistroService<R>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  R: RegistroStore + 'static,
{
  validate::validate_create(&body)?;

  let registro = service
    .create(NewRegistro {
      admission_date: body.admission_date,
      salary:         body.salary,
      employee:       body.employee,
    })
    .await?;
  Ok((StatusCode::CREATED, Json(registro)))
}

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /registros`
pub async fn list<R>(
  State(service): State<RegistroService<R>>,
  Query(params): Query<FilterParams>,
) -> Result<Json<Vec<Registro>>, ApiError>
where
  R: RegistroStore + 'static,
{
  let registros = service.find_all(&params.into_filters()).await?;
  Ok(Json(registros))
}

/// `GET /registros/paginated`
pub async fn list_paginated<R>(
  State(service): State<RegistroService<R>>,
  Query(filters): Query<FilterParams>,
  Query(page): Query<PageParams>,
) -> Result<Json<Page<Registro>>, ApiError>
where
  R: RegistroStore + 'static,
{
  let page = service
    .find_all_paginated(&filters.into_filters(), &page.into_pagination())
    .await?;
  Ok(Json(page))
}

// ─── Point operations ────────────────────────────────────────────────────────

/// `GET /registros/{id}`
pub async fn get_one<R>(
  State(service): State<RegistroService<R>>,
  Path(id): Path<String>,
) -> Result<Json<Registro>, ApiError>
where
  R: RegistroStore + 'static,
{
  let registro = service.find_one(&id).await?;
  Ok(Json(registro))
}

/// `PATCH /registros/{id}`
pub async fn patch_one<R>(
  State(service): State<RegistroService<R>>,
  Path(id): Path<String>,
  Json(body): Json<UpdateBody>,
) -> Result<Json<Registro>, ApiError>
where
  R: RegistroStore + 'static,
{
  validate::validate_update(&body)?;

  let registro = service
    .patch(
      &id,
      UpdateRegistro {
        admission_date: body.admission_date,
        salary:         body.salary,
        employee:       body.employee,
      },
    )
    .await?;
  Ok(Json(registro))
}

/// `DELETE /registros/{id}`
pub async fn delete_one<R>(
  State(service): State<RegistroService<R>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
  R: RegistroStore + 'static,
{
  service.remove(&id).await?;
  Ok(StatusCode::NO_CONTENT)
}
