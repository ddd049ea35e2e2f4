//! Error types for `tratta-core`.

use thiserror::Error;

/// Why an itinerary was rejected at creation or edit time.
///
/// Surfaced synchronously to the caller so the boundary can present
/// field-level feedback. Access denial is *not* represented here — it is an
/// ordinary [`Decision`](crate::visibility::Decision) value, because denial
/// is an expected outcome, not a failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
  #[error("invalid trip kind: {0}")]
  InvalidTripKind(&'static str),

  #[error("missing field: {0}")]
  MissingField(&'static str),

  #[error("{0} must not be negative")]
  NegativeAmount(&'static str),
}

pub type Result<T, E = ValidationError> = std::result::Result<T, E>;
