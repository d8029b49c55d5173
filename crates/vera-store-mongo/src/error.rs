//! Error type for `vera-store-mongo`.

use thiserror::Error;

/// Driver failures wrapped with the operation (and id, where there is one)
/// that hit them, so a backend outage is never mistaken for legitimate
/// absence.
#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to connect to the document store: {0}")]
  Connect(#[source] mongodb::error::Error),

  #[error("failed to insert registro: {0}")]
  Insert(#[source] mongodb::error::Error),

  #[error("failed to fetch registros: {0}")]
  Fetch(#[source] mongodb::error::Error),

  #[error("failed to fetch paginated registros: {0}")]
  FetchPaginated(#[source] mongodb::error::Error),

  #[error("failed to fetch registro by id {id}: {source}")]
  FetchById {
    id:     String,
    #[source]
    source: mongodb::error::Error,
  },

  #[error("failed to update registro {id}: {source}")]
  Update {
    id:     String,
    #[source]
    source: mongodb::error::Error,
  },

  #[error("failed to delete registro {id}: {source}")]
  Delete {
    id:     String,
    #[source]
    source: mongodb::error::Error,
  },

  /// The driver acknowledged an insert but handed back something other than
  /// an ObjectId.
  #[error("inserted id is not an ObjectId")]
  MalformedInsertedId,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
