//! Translation of the store contract's query types into MongoDB documents.
//!
//! Pure functions, so the translation is testable without a live server.

use bson::{Bson, Document, doc, oid::ObjectId};
use vera_core::store::{OrderDirection, Pagination, RegistroFilters};

/// Page-size bounds pushed down to the store.
pub const MIN_LIMIT: u64 = 1;
pub const MAX_LIMIT: u64 = 100;

/// Build the filter document for a registro query.
///
/// Range filters sit at the top level of the document; the id and employee
/// conditions ride in an `$and` array. An id that is not a well-formed
/// ObjectId is silently dropped — a malformed id can never match a real
/// record, and probing with one must behave like "no such record" rather
/// than a query failure.
pub fn build_filter(filters: &RegistroFilters) -> Document {
  let mut query = Document::new();
  let mut conditions: Vec<Document> = Vec::new();

  if let Some(id) = filters.id.as_deref() {
    if let Ok(oid) = ObjectId::parse_str(id) {
      conditions.push(doc! { "_id": oid });
    }
  }

  add_range(
    &mut query,
    "admissionDate",
    filters.start_date.clone().map(Bson::String),
    filters.end_date.clone().map(Bson::String),
  );
  add_range(
    &mut query,
    "salary",
    filters.start_salary.map(Bson::Double),
    filters.end_salary.map(Bson::Double),
  );
  add_range(
    &mut query,
    "calculatedSalary",
    filters.start_salary_calculated.map(Bson::Double),
    filters.end_salary_calculated.map(Bson::Double),
  );

  if let Some(employee) = filters.employee.as_deref() {
    let needle = employee.trim();
    if !needle.is_empty() {
      conditions.push(doc! {
        "employee": bson::Regex {
          pattern: escape_regex(needle),
          options: "i".to_string(),
        }
      });
    }
  }

  if !conditions.is_empty() {
    query.insert("$and", conditions);
  }
  query
}

/// Inclusive `$gte`/`$lte` range on `field`; either bound may be absent.
fn add_range(
  query: &mut Document,
  field: &str,
  start: Option<Bson>,
  end: Option<Bson>,
) {
  let mut range = Document::new();
  if let Some(start) = start {
    range.insert("$gte", start);
  }
  if let Some(end) = end {
    range.insert("$lte", end);
  }
  if !range.is_empty() {
    query.insert(field, range);
  }
}

/// Escape regex metacharacters so a substring filter matches literally.
fn escape_regex(input: &str) -> String {
  let mut escaped = String::with_capacity(input.len());
  for c in input.chars() {
    if matches!(
      c,
      '.'
        | '*'
        | '+'
        | '?'
        | '^'
        | '$'
        | '{'
        | '}'
        | '('
        | ')'
        | '|'
        | '['
        | ']'
        | '\\'
    ) {
      escaped.push('\\');
    }
    escaped.push(c);
  }
  escaped
}

/// Sort specification: `{field: ±1}`.
pub fn sort_spec(pagination: &Pagination) -> Document {
  let direction = match pagination.order_by {
    OrderDirection::Asc => 1,
    OrderDirection::Desc => -1,
  };
  doc! { pagination.order.as_str(): direction }
}

/// Clamp the requested page size to `[1, 100]`.
pub fn clamp_limit(limit: u64) -> u64 {
  limit.clamp(MIN_LIMIT, MAX_LIMIT)
}
