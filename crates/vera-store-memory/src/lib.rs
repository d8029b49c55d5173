//! Transient in-memory backend for the Vera registro store.
//!
//! Reference implementation of [`vera_core::store::RegistroStore`] backed by
//! an ordered in-process sequence. Non-durable; the default backend for
//! tests and for deployments that opt out of the document store.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::MemoryStore;
