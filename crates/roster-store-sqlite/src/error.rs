//! Error type for `roster-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// The id passed to an update does not name a stored document.
  #[error("no candidate document with id {0}")]
  CandidateNotFound(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
