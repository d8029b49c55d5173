//! Error type for `vera-store-memory`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A writer panicked while holding the lock; the sequence can no longer
  /// be trusted.
  #[error("store lock poisoned")]
  LockPoisoned,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
