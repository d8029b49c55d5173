//! `RegistroService` — orchestrates CRUD against whichever backend is
//! injected, applying derived-value computation on write and on every read.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
  elapsed::elapsed_label,
  error::{ServiceError, ServiceResult},
  registro::Registro,
  salary::{SALARY_PERCENTAGE, percentage_of},
  store::{Page, Pagination, RegistroFilters, RegistroPatch, RegistroStore},
};

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Input for [`RegistroService::create`]. Validated by the transport layer
/// before it reaches the service.
#[derive(Debug, Clone)]
pub struct NewRegistro {
  pub admission_date: String,
  pub salary:         f64,
  pub employee:       String,
}

/// Partial input for [`RegistroService::patch`].
///
/// Deliberately admits only the caller-updatable fields; `id`, `created_at`
/// and the derived fields cannot be addressed through this type at all.
#[derive(Debug, Clone, Default)]
pub struct UpdateRegistro {
  pub admission_date: Option<String>,
  pub salary:         Option<f64>,
  pub employee:       Option<String>,
}

// ─── Service ─────────────────────────────────────────────────────────────────

/// High-level registry operations over any [`RegistroStore`].
///
/// Cloning is cheap — the backend is reference-counted.
pub struct RegistroService<R> {
  store: Arc<R>,
}

// Manual impl: `#[derive(Clone)]` would require `R: Clone`.
impl<R> Clone for RegistroService<R> {
  fn clone(&self) -> Self {
    Self {
      store: Arc::clone(&self.store),
    }
  }
}

impl<R: RegistroStore> RegistroService<R> {
  pub fn new(store: Arc<R>) -> Self {
    Self { store }
  }

  /// Create a registro: derive `calculated_salary`, stamp a fresh id and
  /// `created_at`, insert, and return the record as stored.
  pub async fn create(
    &self,
    input: NewRegistro,
  ) -> ServiceResult<Registro, R::Error> {
    let calculated_salary = percentage_of(input.salary, SALARY_PERCENTAGE);
    let calculated_admission_date = elapsed_label(&input.admission_date);

    let registro = Registro {
      id: Uuid::new_v4().to_string(),
      admission_date: input.admission_date,
      salary: input.salary,
      calculated_salary,
      employee: input.employee,
      created_at: Utc::now(),
      calculated_admission_date: Some(calculated_admission_date),
    };

    self
      .store
      .insert(registro)
      .await
      .map_err(ServiceError::Store)
  }

  /// All records matching `filters`, each with a freshly computed elapsed
  /// label.
  pub async fn find_all(
    &self,
    filters: &RegistroFilters,
  ) -> ServiceResult<Vec<Registro>, R::Error> {
    let registros =
      self.store.get(filters).await.map_err(ServiceError::Store)?;
    Ok(registros.into_iter().map(refresh_elapsed).collect())
  }

  /// One page of matching records; totals cover the whole filtered set.
  pub async fn find_all_paginated(
    &self,
    filters: &RegistroFilters,
    pagination: &Pagination,
  ) -> ServiceResult<Page<Registro>, R::Error> {
    let mut page = self
      .store
      .get_paginated(filters, pagination)
      .await
      .map_err(ServiceError::Store)?;
    page.data = page.data.into_iter().map(refresh_elapsed).collect();
    Ok(page)
  }

  /// Point lookup; [`ServiceError::NotFound`] when the id is unknown.
  pub async fn find_one(&self, id: &str) -> ServiceResult<Registro, R::Error> {
    self
      .store
      .get_by_id(id)
      .await
      .map_err(ServiceError::Store)?
      .map(refresh_elapsed)
      .ok_or(ServiceError::NotFound)
  }

  /// Apply a partial update. `calculated_salary` is recomputed when the
  /// update carries a new salary; nothing else can touch it.
  pub async fn patch(
    &self,
    id: &str,
    update: UpdateRegistro,
  ) -> ServiceResult<Registro, R::Error> {
    let existing =
      self.store.get_by_id(id).await.map_err(ServiceError::Store)?;
    if existing.is_none() {
      return Err(ServiceError::NotFound);
    }

    let calculated_salary =
      update.salary.map(|s| percentage_of(s, SALARY_PERCENTAGE));
    let patch = RegistroPatch {
      admission_date: update.admission_date,
      salary: update.salary,
      calculated_salary,
      employee: update.employee,
      calculated_admission_date: None,
    };

    self
      .store
      .put(id, patch)
      .await
      .map_err(ServiceError::Store)?
      .map(refresh_elapsed)
      .ok_or(ServiceError::UpdateFailed)
  }

  /// Delete by id; [`ServiceError::NotFound`] when nothing was removed.
  pub async fn remove(&self, id: &str) -> ServiceResult<(), R::Error> {
    let deleted =
      self.store.delete(id).await.map_err(ServiceError::Store)?;
    if deleted { Ok(()) } else { Err(ServiceError::NotFound) }
  }
}

/// Recompute the elapsed-time label; a stored value is stale by construction
/// since "now" advances.
fn refresh_elapsed(mut registro: Registro) -> Registro {
  registro.calculated_admission_date =
    Some(elapsed_label(&registro.admission_date));
  registro
}
