//! End-to-end tests for the `/registros` API over the in-memory backend.

use std::sync::Arc;

use axum::{
  Router,
  body::{Body, to_bytes},
  http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt as _;
use vera_core::service::RegistroService;
use vera_store_memory::MemoryStore;

fn app() -> Router {
  let service = RegistroService::new(Arc::new(MemoryStore::new()));
  vera_http::router(service)
}

async fn send(
  app: &Router,
  method: &str,
  uri: &str,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  let request = match body {
    Some(value) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      builder.body(Body::from(value.to_string())).unwrap()
    }
    None => builder.body(Body::empty()).unwrap(),
  };

  let response = app.clone().oneshot(request).await.unwrap();
  let status = response.status();
  let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
  let value = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, value)
}

fn john_doe() -> Value {
  json!({
    "admissionDate": "2024-01-15",
    "salary": 5000,
    "employee": "John Doe",
  })
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_returns_201_with_derived_fields() {
  let app = app();
  let (status, body) = send(&app, "POST", "/registros", Some(john_doe())).await;

  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["calculatedSalary"].as_f64(), Some(1750.0));
  assert_eq!(body["employee"], "John Doe");
  assert!(!body["id"].as_str().unwrap().is_empty());
  assert!(body["createdAt"].is_string());
  assert!(body["calculatedAdmissionDate"].is_string());
}

#[tokio::test]
async fn create_below_minimum_salary_is_rejected_in_portuguese() {
  let app = app();
  let (status, body) = send(
    &app,
    "POST",
    "/registros",
    Some(json!({
      "admissionDate": "2024-01-15",
      "salary": 1000,
      "employee": "John Doe",
    })),
  )
  .await;

  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["status"], 400);
  assert_eq!(body["message"], "Salário deve ser no mínimo 1300");
  assert!(body["timeStamp"].is_string());
}

#[tokio::test]
async fn create_with_future_admission_date_is_rejected() {
  let app = app();
  let (status, body) = send(
    &app,
    "POST",
    "/registros",
    Some(json!({
      "admissionDate": "2999-01-01",
      "salary": 5000,
      "employee": "John Doe",
    })),
  )
  .await;

  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["message"], "Data de admissão não pode ser no futuro");
}

// ─── Read ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_unknown_id_is_404_with_the_error_body_shape() {
  let app = app();
  let (status, body) =
    send(&app, "GET", "/registros/no-such-id", None).await;

  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["status"], 404);
  assert_eq!(body["message"], "Registro não encontrado");
  assert!(body["timeStamp"].is_string());
}

#[tokio::test]
async fn list_filters_by_salary_range() {
  let app = app();
  for (salary, employee) in
    [(2000, "Ana Souza"), (5000, "John Doe"), (9000, "Carla Mendes")]
  {
    let (status, _) = send(
      &app,
      "POST",
      "/registros",
      Some(json!({
        "admissionDate": "2023-06-01",
        "salary": salary,
        "employee": employee,
      })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
  }

  let (status, body) = send(
    &app,
    "GET",
    "/registros?startSalary=3000&endSalary=8000",
    None,
  )
  .await;

  assert_eq!(status, StatusCode::OK);
  let data = body.as_array().unwrap();
  assert_eq!(data.len(), 1);
  assert_eq!(data[0]["employee"], "John Doe");
}

#[tokio::test]
async fn reads_attach_a_fresh_elapsed_label() {
  let app = app();
  let (_, created) = send(&app, "POST", "/registros", Some(john_doe())).await;
  let id = created["id"].as_str().unwrap();

  let (status, fetched) =
    send(&app, "GET", &format!("/registros/{id}"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert!(fetched["calculatedAdmissionDate"].is_string());
}

// ─── Paginated listing ───────────────────────────────────────────────────────

async fn seed_three(app: &Router) {
  for (date, salary, employee) in [
    ("2020-03-01", 2000, "Ana Souza"),
    ("2022-11-30", 9000, "Carla Mendes"),
    ("2021-07-15", 4500, "Bruno Lima"),
  ] {
    send(
      app,
      "POST",
      "/registros",
      Some(json!({
        "admissionDate": date,
        "salary": salary,
        "employee": employee,
      })),
    )
    .await;
  }
}

#[tokio::test]
async fn paginated_listing_defaults_to_admission_date_desc() {
  let app = app();
  seed_three(&app).await;

  let (status, body) = send(&app, "GET", "/registros/paginated", None).await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["total"], 3);
  assert_eq!(body["page"], 0);
  assert_eq!(body["totalPages"], 1);
  assert_eq!(body["limit"], 8);

  let dates: Vec<&str> = body["data"]
    .as_array()
    .unwrap()
    .iter()
    .map(|r| r["admissionDate"].as_str().unwrap())
    .collect();
  assert_eq!(dates, ["2022-11-30", "2021-07-15", "2020-03-01"]);
}

#[tokio::test]
async fn paginated_listing_honours_order_and_slicing() {
  let app = app();
  seed_three(&app).await;

  let (_, body) = send(
    &app,
    "GET",
    "/registros/paginated?order=salary&orderBy=asc&limit=2&page=1",
    None,
  )
  .await;

  assert_eq!(body["total"], 3);
  assert_eq!(body["totalPages"], 2);
  let data = body["data"].as_array().unwrap();
  assert_eq!(data.len(), 1);
  assert_eq!(data[0]["salary"].as_f64(), Some(9000.0));
}

#[tokio::test]
async fn unrecognised_order_values_fall_back_to_defaults() {
  let app = app();
  seed_three(&app).await;

  let (status, body) = send(
    &app,
    "GET",
    "/registros/paginated?order=bogus&orderBy=upsidedown",
    None,
  )
  .await;

  assert_eq!(status, StatusCode::OK);
  let dates: Vec<&str> = body["data"]
    .as_array()
    .unwrap()
    .iter()
    .map(|r| r["admissionDate"].as_str().unwrap())
    .collect();
  // Defaults: admission date, descending.
  assert_eq!(dates, ["2022-11-30", "2021-07-15", "2020-03-01"]);
}

#[tokio::test]
async fn paginated_total_covers_the_filtered_set() {
  let app = app();
  seed_three(&app).await;

  let (_, body) = send(
    &app,
    "GET",
    "/registros/paginated?startSalary=3000&limit=1",
    None,
  )
  .await;

  assert_eq!(body["total"], 2);
  assert_eq!(body["totalPages"], 2);
  assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

// ─── Patch ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn patch_recomputes_calculated_salary() {
  let app = app();
  let (_, created) = send(&app, "POST", "/registros", Some(john_doe())).await;
  let id = created["id"].as_str().unwrap();

  let (status, updated) = send(
    &app,
    "PATCH",
    &format!("/registros/{id}"),
    Some(json!({ "salary": 6000 })),
  )
  .await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated["salary"].as_f64(), Some(6000.0));
  assert_eq!(updated["calculatedSalary"].as_f64(), Some(2100.0));
  assert_eq!(updated["employee"], "John Doe");
}

#[tokio::test]
async fn patch_ignores_illegitimate_fields() {
  let app = app();
  let (_, created) = send(&app, "POST", "/registros", Some(john_doe())).await;
  let id = created["id"].as_str().unwrap();

  let (status, updated) = send(
    &app,
    "PATCH",
    &format!("/registros/{id}"),
    Some(json!({
      "salary": 6000,
      "calculatedSalary": 1.0,
      "id": "hijacked",
      "createdAt": "1970-01-01T00:00:00Z",
    })),
  )
  .await;

  assert_eq!(status, StatusCode::OK);
  // The whitelist holds: derived and identity fields are untouched by the
  // illegitimate input.
  assert_eq!(updated["id"], *id);
  assert_eq!(updated["calculatedSalary"].as_f64(), Some(2100.0));
  assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn patch_unknown_id_is_404() {
  let app = app();
  let (status, body) = send(
    &app,
    "PATCH",
    "/registros/no-such-id",
    Some(json!({ "salary": 6000 })),
  )
  .await;

  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["message"], "Registro não encontrado");
}

#[tokio::test]
async fn patch_with_invalid_salary_is_rejected_before_the_store() {
  let app = app();
  let (_, created) = send(&app, "POST", "/registros", Some(john_doe())).await;
  let id = created["id"].as_str().unwrap();

  let (status, body) = send(
    &app,
    "PATCH",
    &format!("/registros/{id}"),
    Some(json!({ "salary": -5 })),
  )
  .await;

  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["message"], "Salário deve ser um número positivo");

  // The record is unchanged.
  let (_, fetched) =
    send(&app, "GET", &format!("/registros/{id}"), None).await;
  assert_eq!(fetched["salary"].as_f64(), Some(5000.0));
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_returns_204_then_get_is_404() {
  let app = app();
  let (_, created) = send(&app, "POST", "/registros", Some(john_doe())).await;
  let id = created["id"].as_str().unwrap();

  let (status, body) =
    send(&app, "DELETE", &format!("/registros/{id}"), None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  assert!(body.is_null());

  let (status, _) = send(&app, "GET", &format!("/registros/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_id_is_404() {
  let app = app();
  let (status, _) = send(&app, "DELETE", "/registros/no-such-id", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ─── Full scenario ───────────────────────────────────────────────────────────

#[tokio::test]
async fn create_list_patch_delete_scenario() {
  let app = app();

  let (status, created) =
    send(&app, "POST", "/registros", Some(john_doe())).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(created["calculatedSalary"].as_f64(), Some(1750.0));
  let id = created["id"].as_str().unwrap();

  let (_, listed) = send(
    &app,
    "GET",
    "/registros?startSalary=5000&endSalary=5000",
    None,
  )
  .await;
  let listed = listed.as_array().unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0]["id"], *id);

  let (_, updated) = send(
    &app,
    "PATCH",
    &format!("/registros/{id}"),
    Some(json!({ "salary": 6000 })),
  )
  .await;
  assert_eq!(updated["calculatedSalary"].as_f64(), Some(2100.0));
  assert_eq!(updated["employee"], "John Doe");

  let (status, _) =
    send(&app, "DELETE", &format!("/registros/{id}"), None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);

  let (status, _) = send(&app, "GET", &format!("/registros/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}
