//! JSON HTTP adapter for the Vera employee registry.
//!
//! Exposes an axum [`Router`] backed by any
//! [`vera_core::store::RegistroStore`]; the server binary picks the backend
//! from configuration once at startup, so the choice is invisible here.

pub mod error;
pub mod handlers;
pub mod validate;

use axum::{Router, routing::get};
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use vera_core::{service::RegistroService, store::RegistroStore};

pub use error::ApiError;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` with
/// `VERA_*` environment overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "defaults::host")]
  pub host:           String,
  #[serde(default = "defaults::port")]
  pub port:           u16,
  /// `true` selects the durable MongoDB backend, `false` the in-memory one.
  #[serde(default)]
  pub use_database:   bool,
  #[serde(default = "defaults::mongo_uri")]
  pub mongo_uri:      String,
  #[serde(default = "defaults::mongo_database")]
  pub mongo_database: String,
}

mod defaults {
  pub fn host() -> String {
    "0.0.0.0".to_string()
  }

  pub fn port() -> u16 {
    3000
  }

  pub fn mongo_uri() -> String {
    "mongodb://localhost:27017".to_string()
  }

  pub fn mongo_database() -> String {
    "vera".to_string()
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised router for `service`.
///
/// The returned `Router<()>` carries request tracing and a permissive CORS
/// layer; auth and TLS are the caller's responsibility.
pub fn router<R>(service: RegistroService<R>) -> Router<()>
where
  R: RegistroStore + 'static,
{
  Router::new()
    .route(
      "/registros",
      get(handlers::list::<R>).post(handlers::create::<R>),
    )
    .route("/registros/paginated", get(handlers::list_paginated::<R>))
    .route(
      "/registros/{id}",
      get(handlers::get_one::<R>)
        .patch(handlers::patch_one::<R>)
        .delete(handlers::delete_one::<R>),
    )
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(service)
}
