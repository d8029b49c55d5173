//! [`MemoryStore`] — the transient implementation of [`RegistroStore`].

use std::{
  cmp::Ordering,
  sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use chrono::NaiveDate;
use vera_core::{
  registro::Registro,
  store::{
    OrderDirection, OrderField, Page, Pagination, RegistroFilters,
    RegistroPatch, RegistroStore,
  },
};

use crate::{Error, Result};

/// In-memory registro store over an ordered sequence.
///
/// Mutations (insert/put/delete) serialise behind the write lock so two
/// concurrent updates to the same id never interleave partial writes; reads
/// share the read lock and do not block each other.
pub struct MemoryStore {
  registros: RwLock<Vec<Registro>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self {
      registros: RwLock::new(Vec::new()),
    }
  }

  fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Registro>>> {
    self.registros.read().map_err(|_| Error::LockPoisoned)
  }

  fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Registro>>> {
    self.registros.write().map_err(|_| Error::LockPoisoned)
  }
}

impl Default for MemoryStore {
  fn default() -> Self {
    Self::new()
  }
}

// ─── Filtering and ordering ──────────────────────────────────────────────────

/// Predicates compose in a fixed order (id → date range → salary range →
/// calculated-salary range → employee substring) so short-circuiting is
/// deterministic.
fn matches(registro: &Registro, filters: &RegistroFilters) -> bool {
  if let Some(id) = &filters.id {
    if &registro.id != id {
      return false;
    }
  }
  if let Some(start) = &filters.start_date {
    if registro.admission_date.as_str() < start.as_str() {
      return false;
    }
  }
  if let Some(end) = &filters.end_date {
    if registro.admission_date.as_str() > end.as_str() {
      return false;
    }
  }
  if let Some(lo) = filters.start_salary {
    if registro.salary < lo {
      return false;
    }
  }
  if let Some(hi) = filters.end_salary {
    if registro.salary > hi {
      return false;
    }
  }
  if let Some(lo) = filters.start_salary_calculated {
    if registro.calculated_salary < lo {
      return false;
    }
  }
  if let Some(hi) = filters.end_salary_calculated {
    if registro.calculated_salary > hi {
      return false;
    }
  }
  if let Some(needle) = &filters.employee {
    if !registro
      .employee
      .to_lowercase()
      .contains(&needle.to_lowercase())
    {
      return false;
    }
  }
  true
}

/// Comparator keyed by the requested order field. Ties keep the underlying
/// (stable) sort order; nothing else breaks them.
fn compare(a: &Registro, b: &Registro, order: OrderField) -> Ordering {
  match order {
    OrderField::Employee => {
      a.employee.to_lowercase().cmp(&b.employee.to_lowercase())
    }
    OrderField::AdmissionDate => {
      parse_date(&a.admission_date).cmp(&parse_date(&b.admission_date))
    }
    OrderField::Salary => {
      a.salary.partial_cmp(&b.salary).unwrap_or(Ordering::Equal)
    }
    OrderField::CalculatedSalary => a
      .calculated_salary
      .partial_cmp(&b.calculated_salary)
      .unwrap_or(Ordering::Equal),
  }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

// ─── RegistroStore impl ──────────────────────────────────────────────────────

impl RegistroStore for MemoryStore {
  type Error = Error;

  async fn insert(&self, registro: Registro) -> Result<Registro> {
    self.write()?.push(registro.clone());
    Ok(registro)
  }

  async fn get(&self, filters: &RegistroFilters) -> Result<Vec<Registro>> {
    Ok(
      self
        .read()?
        .iter()
        .filter(|r| matches(r, filters))
        .cloned()
        .collect(),
    )
  }

  async fn get_paginated(
    &self,
    filters: &RegistroFilters,
    pagination: &Pagination,
  ) -> Result<Page<Registro>> {
    let mut matching = self.get(filters).await?;
    matching.sort_by(|a, b| {
      let ordering = compare(a, b, pagination.order);
      match pagination.order_by {
        OrderDirection::Asc => ordering,
        OrderDirection::Desc => ordering.reverse(),
      }
    });

    let total = matching.len() as u64;
    let start = pagination.page.saturating_mul(pagination.limit) as usize;
    let data: Vec<Registro> = matching
      .into_iter()
      .skip(start)
      .take(pagination.limit as usize)
      .collect();

    Ok(Page {
      total,
      page: pagination.page,
      total_pages: total.div_ceil(pagination.limit.max(1)),
      limit: pagination.limit,
      data,
    })
  }

  async fn get_by_id(&self, id: &str) -> Result<Option<Registro>> {
    Ok(self.read()?.iter().find(|r| r.id == id).cloned())
  }

  async fn put(
    &self,
    id: &str,
    patch: RegistroPatch,
  ) -> Result<Option<Registro>> {
    let mut registros = self.write()?;
    let Some(registro) = registros.iter_mut().find(|r| r.id == id) else {
      return Ok(None);
    };

    if let Some(admission_date) = patch.admission_date {
      registro.admission_date = admission_date;
    }
    if let Some(salary) = patch.salary {
      registro.salary = salary;
    }
    if let Some(calculated_salary) = patch.calculated_salary {
      registro.calculated_salary = calculated_salary;
    }
    if let Some(employee) = patch.employee {
      registro.employee = employee;
    }
    if let Some(label) = patch.calculated_admission_date {
      registro.calculated_admission_date = Some(label);
    }

    Ok(Some(registro.clone()))
  }

  async fn delete(&self, id: &str) -> Result<bool> {
    let mut registros = self.write()?;
    match registros.iter().position(|r| r.id == id) {
      Some(index) => {
        registros.remove(index);
        Ok(true)
      }
      None => Ok(false),
    }
  }
}
