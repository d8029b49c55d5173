//! Core types and contracts for the Vera employee registry.
//!
//! The entity, the store contract, the derived-value calculators and the
//! registry service live here. This crate is deliberately free of HTTP and
//! database dependencies; backends and transports live in sibling crates.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod elapsed;
pub mod error;
pub mod registro;
pub mod salary;
pub mod service;
pub mod store;

pub use error::{ServiceError, ServiceResult};
pub use registro::Registro;
