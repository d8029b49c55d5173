//! Input validation for the registro endpoints.
//!
//! The core never sees a value that failed these checks. Each rule carries
//! its own message constant; translation happens at the response boundary.

use chrono::{NaiveDate, Utc};

use crate::{
  error::{ApiError, messages},
  handlers::{CreateBody, UpdateBody},
};

const SALARY_MIN: f64 = 1300.0;
const SALARY_MAX: f64 = 100_000.0;
const EMPLOYEE_MAX_LEN: usize = 30;

pub fn validate_create(body: &CreateBody) -> Result<(), ApiError> {
  validate_admission_date(&body.admission_date)?;
  validate_salary(body.salary)?;
  validate_employee(&body.employee)
}

pub fn validate_update(body: &UpdateBody) -> Result<(), ApiError> {
  if let Some(date) = &body.admission_date {
    validate_admission_date(date)?;
  }
  if let Some(salary) = body.salary {
    validate_salary(salary)?;
  }
  if let Some(employee) = &body.employee {
    validate_employee(employee)?;
  }
  Ok(())
}

/// `YYYY-MM-DD`, a real calendar date, and not in the future.
fn validate_admission_date(value: &str) -> Result<(), ApiError> {
  if !is_iso_date_shaped(value) {
    return Err(ApiError::BadRequest(messages::DATE_FORMAT_INVALID));
  }
  let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
    .map_err(|_| ApiError::BadRequest(messages::DATE_FORMAT_INVALID))?;
  if date > Utc::now().date_naive() {
    return Err(ApiError::BadRequest(messages::ADMISSION_DATE_FUTURE));
  }
  Ok(())
}

/// Strict `\d{4}-\d{2}-\d{2}` shape; chrono alone would accept unpadded
/// parts.
fn is_iso_date_shaped(value: &str) -> bool {
  let bytes = value.as_bytes();
  bytes.len() == 10
    && bytes.iter().enumerate().all(|(i, b)| match i {
      4 | 7 => *b == b'-',
      _ => b.is_ascii_digit(),
    })
}

fn validate_salary(value: f64) -> Result<(), ApiError> {
  if value <= 0.0 {
    return Err(ApiError::BadRequest(messages::SALARY_MUST_BE_POSITIVE));
  }
  if value < SALARY_MIN {
    return Err(ApiError::BadRequest(messages::SALARY_MINIMUM));
  }
  if value > SALARY_MAX {
    return Err(ApiError::BadRequest(messages::SALARY_MAXIMUM));
  }
  Ok(())
}

fn validate_employee(value: &str) -> Result<(), ApiError> {
  if value.is_empty() {
    return Err(ApiError::BadRequest(messages::EMPLOYEE_NAME_REQUIRED));
  }
  if value.chars().count() > EMPLOYEE_MAX_LEN {
    return Err(ApiError::BadRequest(messages::EMPLOYEE_NAME_MAX_LENGTH));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn create_body(date: &str, salary: f64, employee: &str) -> CreateBody {
    CreateBody {
      admission_date: date.into(),
      salary,
      employee: employee.into(),
    }
  }

  fn message_of(err: ApiError) -> &'static str {
    match err {
      ApiError::BadRequest(m) => m,
      other => panic!("expected BadRequest, got {other:?}"),
    }
  }

  #[test]
  fn a_valid_body_passes() {
    assert!(validate_create(&create_body("2023-01-15", 5000.0, "Ana")).is_ok());
  }

  #[test]
  fn malformed_dates_are_rejected() {
    for date in ["15-01-2023", "2023/01/15", "2023-1-5", "2023-13-40", ""] {
      let err = validate_create(&create_body(date, 5000.0, "Ana"))
        .expect_err(date);
      assert_eq!(message_of(err), messages::DATE_FORMAT_INVALID);
    }
  }

  #[test]
  fn future_dates_are_rejected() {
    let err =
      validate_create(&create_body("2999-01-01", 5000.0, "Ana")).unwrap_err();
    assert_eq!(message_of(err), messages::ADMISSION_DATE_FUTURE);
  }

  #[test]
  fn salary_bounds() {
    let low =
      validate_create(&create_body("2023-01-15", 1000.0, "Ana")).unwrap_err();
    assert_eq!(message_of(low), messages::SALARY_MINIMUM);

    let negative =
      validate_create(&create_body("2023-01-15", -1.0, "Ana")).unwrap_err();
    assert_eq!(message_of(negative), messages::SALARY_MUST_BE_POSITIVE);

    let high = validate_create(&create_body("2023-01-15", 100_001.0, "Ana"))
      .unwrap_err();
    assert_eq!(message_of(high), messages::SALARY_MAXIMUM);

    assert!(
      validate_create(&create_body("2023-01-15", 1300.0, "Ana")).is_ok()
    );
    assert!(
      validate_create(&create_body("2023-01-15", 100_000.0, "Ana")).is_ok()
    );
  }

  #[test]
  fn employee_name_length_bounds() {
    let empty =
      validate_create(&create_body("2023-01-15", 5000.0, "")).unwrap_err();
    assert_eq!(message_of(empty), messages::EMPLOYEE_NAME_REQUIRED);

    let long = "x".repeat(31);
    let err = validate_create(&create_body("2023-01-15", 5000.0, &long))
      .unwrap_err();
    assert_eq!(message_of(err), messages::EMPLOYEE_NAME_MAX_LENGTH);

    let max = "x".repeat(30);
    assert!(validate_create(&create_body("2023-01-15", 5000.0, &max)).is_ok());
  }

  #[test]
  fn update_only_validates_supplied_fields() {
    assert!(validate_update(&UpdateBody::default()).is_ok());

    let err = validate_update(&UpdateBody {
      salary: Some(12.0),
      ..Default::default()
    })
    .unwrap_err();
    assert_eq!(message_of(err), messages::SALARY_MINIMUM);
  }
}
