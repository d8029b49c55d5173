//! Service-level error taxonomy.

use thiserror::Error;

/// Failure outcomes of the registry service.
///
/// Expected absence is a typed variant, not an exception; the transport
/// layer maps variants onto responses (404, 400, 500) without exception-like
/// control flow at this layer.
#[derive(Debug, Error)]
pub enum ServiceError<E>
where
  E: std::error::Error + Send + Sync + 'static,
{
  /// The requested id does not exist.
  #[error("registro not found")]
  NotFound,

  /// The write-through of a patch unexpectedly reported absence.
  #[error("failed to update registro")]
  UpdateFailed,

  /// The backend could not complete the operation.
  #[error("store error: {0}")]
  Store(#[source] E),
}

pub type ServiceResult<T, E> = Result<T, ServiceError<E>>;
