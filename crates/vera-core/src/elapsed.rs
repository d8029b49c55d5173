//! Elapsed-time labels for admission dates.
//!
//! Produces the Portuguese `"5 dias, 3 meses e 2 anos"` style label attached
//! to every record on read. The label is a function of "now", so a stored
//! copy is never authoritative.

use chrono::{Datelike, NaiveDate, Utc};

/// Elapsed time between `start` (ISO `YYYY-MM-DD`) and today.
///
/// Unparseable input collapses to `"0 dias"`; the validation layer keeps
/// such values out of the store in the first place.
pub fn elapsed_label(start: &str) -> String {
  match NaiveDate::parse_from_str(start, "%Y-%m-%d") {
    Ok(date) => elapsed_between(date, Utc::now().date_naive()),
    Err(_) => "0 dias".to_string(),
  }
}

/// Calendar difference between `start` and `today` as whole years, months
/// and days (not total days).
///
/// Borrow algorithm: a negative day difference borrows one month and adds
/// the length of the month preceding `today`; a negative month difference
/// then borrows one year and adds 12.
pub fn elapsed_between(start: NaiveDate, today: NaiveDate) -> String {
  let mut years = today.year() - start.year();
  let mut months = today.month() as i32 - start.month() as i32;
  let mut days = today.day() as i32 - start.day() as i32;

  if days < 0 {
    months -= 1;
    days += days_in_previous_month(today);
  }
  if months < 0 {
    years -= 1;
    months += 12;
  }

  let mut parts: Vec<String> = Vec::new();
  if days > 0 {
    parts.push(format!("{days} {}", if days == 1 { "dia" } else { "dias" }));
  }
  if months > 0 {
    parts
      .push(format!("{months} {}", if months == 1 { "mês" } else { "meses" }));
  }
  if years > 0 {
    parts.push(format!("{years} {}", if years == 1 { "ano" } else { "anos" }));
  }

  match parts.as_slice() {
    [] => "0 dias".to_string(),
    [single] => single.clone(),
    [a, b] => format!("{a} e {b}"),
    [a, b, c, ..] => format!("{a}, {b} e {c}"),
  }
}

/// Day count of the month preceding the one `today` falls in.
fn days_in_previous_month(today: NaiveDate) -> i32 {
  NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
    .and_then(|first| first.pred_opt())
    .map(|last| last.day() as i32)
    .unwrap_or(31)
}
