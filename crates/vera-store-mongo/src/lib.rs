//! MongoDB backend for the Vera registro store.
//!
//! Implements the same [`vera_core::store::RegistroStore`] contract as the
//! in-memory backend, translating filters into range/regex queries and
//! pushing pagination down as skip/limit/sort. Per-document atomicity is
//! delegated to the server.

mod query;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::MongoStore;
