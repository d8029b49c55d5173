//! The `RegistroStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (`vera-store-memory`,
//! `vera-store-mongo`). Higher layers depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use serde::Serialize;

use crate::registro::Registro;

// ─── Filters ─────────────────────────────────────────────────────────────────

/// Optional predicates combined with logical AND.
///
/// An empty filter set matches every record. Range bounds are inclusive on
/// both ends; either end may be supplied alone.
#[derive(Debug, Clone, Default)]
pub struct RegistroFilters {
  /// Exact id match.
  pub id:                      Option<String>,
  /// Lower bound on `admission_date`. ISO dates compare correctly as plain
  /// strings, so no parsing happens here.
  pub start_date:              Option<String>,
  pub end_date:                Option<String>,
  pub start_salary:            Option<f64>,
  pub end_salary:              Option<f64>,
  pub start_salary_calculated: Option<f64>,
  pub end_salary_calculated:   Option<f64>,
  /// Case-insensitive substring match on the employee name.
  pub employee:                Option<String>,
}

// ─── Pagination ──────────────────────────────────────────────────────────────

/// Record fields a paginated listing can sort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderField {
  Employee,
  #[default]
  AdmissionDate,
  Salary,
  CalculatedSalary,
}

impl OrderField {
  /// Parse a wire name. Returns `None` for unrecognised input so callers
  /// fall back to their own default instead of erroring.
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "employee" => Some(Self::Employee),
      "admissionDate" => Some(Self::AdmissionDate),
      "salary" => Some(Self::Salary),
      "calculatedSalary" => Some(Self::CalculatedSalary),
      _ => None,
    }
  }

  /// The stored field name this key sorts on.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Employee => "employee",
      Self::AdmissionDate => "admissionDate",
      Self::Salary => "salary",
      Self::CalculatedSalary => "calculatedSalary",
    }
  }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
  #[default]
  Asc,
  Desc,
}

impl OrderDirection {
  /// Parse a wire name; `None` for unrecognised input.
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "asc" => Some(Self::Asc),
      "desc" => Some(Self::Desc),
      _ => None,
    }
  }
}

/// Page/sort specification for [`RegistroStore::get_paginated`].
#[derive(Debug, Clone)]
pub struct Pagination {
  /// Zero-based page index.
  pub page:     u64,
  pub limit:    u64,
  pub order:    OrderField,
  pub order_by: OrderDirection,
}

impl Default for Pagination {
  fn default() -> Self {
    Self {
      page:     0,
      limit:    8,
      order:    OrderField::AdmissionDate,
      order_by: OrderDirection::Asc,
    }
  }
}

/// One page of results plus totals computed over the whole filtered set.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
  pub total:       u64,
  pub page:        u64,
  pub total_pages: u64,
  pub limit:       u64,
  pub data:        Vec<T>,
}

// ─── Patch ───────────────────────────────────────────────────────────────────

/// Partial update applied by [`RegistroStore::put`].
///
/// Only supplied fields are merged into the stored record; `id` and
/// `created_at` are immutable and cannot be addressed here at all.
#[derive(Debug, Clone, Default)]
pub struct RegistroPatch {
  pub admission_date:            Option<String>,
  pub salary:                    Option<f64>,
  pub calculated_salary:         Option<f64>,
  pub employee:                  Option<String>,
  pub calculated_admission_date: Option<String>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a registro storage backend.
///
/// Expected absence (unknown id) is reported in-band as `None`/`false`;
/// `Self::Error` is reserved for failures to reach or mutate the store.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait RegistroStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Store a fully-formed record (id and timestamps already assigned by the
  /// service) and return it as stored.
  fn insert(
    &self,
    registro: Registro,
  ) -> impl Future<Output = Result<Registro, Self::Error>> + Send + '_;

  /// All records matching every supplied filter.
  fn get<'a>(
    &'a self,
    filters: &'a RegistroFilters,
  ) -> impl Future<Output = Result<Vec<Registro>, Self::Error>> + Send + 'a;

  /// Filter, sort, and slice one page. `total` and `total_pages` cover the
  /// filtered set, before slicing.
  fn get_paginated<'a>(
    &'a self,
    filters: &'a RegistroFilters,
    pagination: &'a Pagination,
  ) -> impl Future<Output = Result<Page<Registro>, Self::Error>> + Send + 'a;

  /// Point lookup. `None` (not an error) if no record matches.
  fn get_by_id<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Registro>, Self::Error>> + Send + 'a;

  /// Merge the supplied fields into the existing record. `None` if `id`
  /// does not exist.
  fn put<'a>(
    &'a self,
    id: &'a str,
    patch: RegistroPatch,
  ) -> impl Future<Output = Result<Option<Registro>, Self::Error>> + Send + 'a;

  /// `true` if a record existed and was removed.
  fn delete<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn order_field_parses_wire_names() {
    assert_eq!(OrderField::parse("employee"), Some(OrderField::Employee));
    assert_eq!(
      OrderField::parse("admissionDate"),
      Some(OrderField::AdmissionDate)
    );
    assert_eq!(OrderField::parse("salary"), Some(OrderField::Salary));
    assert_eq!(
      OrderField::parse("calculatedSalary"),
      Some(OrderField::CalculatedSalary)
    );
  }

  #[test]
  fn unrecognised_order_values_are_none() {
    assert_eq!(OrderField::parse("ADMISSIONDATE"), None);
    assert_eq!(OrderField::parse(""), None);
    assert_eq!(OrderDirection::parse("descending"), None);
  }

  #[test]
  fn pagination_defaults() {
    let p = Pagination::default();
    assert_eq!(p.page, 0);
    assert_eq!(p.limit, 8);
    assert_eq!(p.order, OrderField::AdmissionDate);
    assert_eq!(p.order_by, OrderDirection::Asc);
  }
}
