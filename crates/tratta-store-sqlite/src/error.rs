//! Error type for `tratta-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("validation error: {0}")]
  Validation(#[from] tratta_core::ValidationError),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored column held a value no domain type accepts (unknown
  /// discriminant, malformed amount).
  #[error("column decode error: {0}")]
  Decode(String),

  #[error("itinerary not found: {0}")]
  ItineraryNotFound(uuid::Uuid),

  /// An itinerary referenced an owner that is not in the store.
  #[error("user not found: {0}")]
  UserNotFound(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
