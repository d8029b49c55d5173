//! Registro — one employee registry entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An employee registry entry.
///
/// The two `calculated_*` fields are system-derived and never accepted from
/// callers: `calculated_salary` is recomputed whenever `salary` changes, and
/// `calculated_admission_date` is recomputed on every read because it is a
/// function of "now".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registro {
  /// Opaque unique identifier. Assigned at creation, immutable, never
  /// reused. Backends may normalise it to their native id format on insert.
  pub id:                        String,
  /// Admission date as an ISO `YYYY-MM-DD` string — a calendar date, not a
  /// timestamp.
  pub admission_date:            String,
  pub salary:                    f64,
  /// Always exactly `round2(salary * 0.35)`.
  pub calculated_salary:         f64,
  pub employee:                  String,
  /// Set once at creation, immutable thereafter.
  pub created_at:                DateTime<Utc>,
  /// Elapsed time since admission, e.g. `"5 dias, 3 meses e 2 anos"`. A
  /// stored value is only a cache; read paths always recompute it.
  pub calculated_admission_date: Option<String>,
}
