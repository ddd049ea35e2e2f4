//! Itinerary validation and input normalization.
//!
//! Validation enforces the model invariants before a record is accepted;
//! normalization rewrites accepted input for safe storage (HTML-escaped
//! description, two-decimal amounts). The two are separate steps: the
//! decision engine never depends on either, and normalization never changes
//! the outcome of a decision.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::{
  Result, ValidationError,
  itinerary::{NewItinerary, TripKind},
};

// ─── Field checks ────────────────────────────────────────────────────────────

/// Both addresses must be non-empty after trimming.
pub fn validate_addresses(start_address: &str, end_address: &str) -> Result<()> {
  if start_address.trim().is_empty() {
    return Err(ValidationError::MissingField("start_address"));
  }
  if end_address.trim().is_empty() {
    return Err(ValidationError::MissingField("end_address"));
  }
  Ok(())
}

/// The schedule must be internally consistent with the trip kind:
/// a round trip returns strictly after it leaves, everything else has no
/// return date at all.
pub fn validate_schedule(
  trip_kind: TripKind,
  leave_date: DateTime<Utc>,
  return_date: Option<DateTime<Utc>>,
) -> Result<()> {
  match (trip_kind, return_date) {
    (TripKind::RoundTrip, None) => Err(ValidationError::InvalidTripKind(
      "a round trip requires a return date",
    )),
    (TripKind::RoundTrip, Some(ret)) if ret <= leave_date => {
      Err(ValidationError::InvalidTripKind(
        "the return date must be after the leave date",
      ))
    }
    (TripKind::OneWay, Some(_)) => Err(ValidationError::InvalidTripKind(
      "a one-way trip must not carry a return date",
    )),
    (TripKind::Daily, Some(_)) => Err(ValidationError::InvalidTripKind(
      "a daily trip must not carry a return date",
    )),
    _ => Ok(()),
  }
}

/// Costs default to zero and may never go below it.
pub fn validate_amounts(fuel_cost: Decimal, tolls: Decimal) -> Result<()> {
  if fuel_cost.is_sign_negative() && !fuel_cost.is_zero() {
    return Err(ValidationError::NegativeAmount("fuel_cost"));
  }
  if tolls.is_sign_negative() && !tolls.is_zero() {
    return Err(ValidationError::NegativeAmount("tolls"));
  }
  Ok(())
}

// ─── Normalization ───────────────────────────────────────────────────────────

/// Escape markup-significant characters so the description is inert when a
/// boundary later renders it as HTML. Escaping, not removal: the text stays
/// readable, it just stops being markup.
pub fn sanitize_description(raw: &str) -> String {
  let mut out = String::with_capacity(raw.len());
  for c in raw.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      other => out.push(other),
    }
  }
  out
}

/// Rescale a validated amount to the two decimal places it is stored with.
/// `5` becomes `5.00`, `3.125` becomes `3.12`.
pub fn normalize_amount(amount: Decimal) -> Decimal {
  let mut scaled = amount.round_dp(2);
  scaled.rescale(2);
  scaled
}

// ─── NewItinerary entry points ───────────────────────────────────────────────

impl NewItinerary {
  /// Check every invariant from the data model. Call before
  /// [`normalized`](Self::normalized); validation always sees the caller's
  /// raw input.
  pub fn validate(&self) -> Result<()> {
    validate_addresses(&self.start_address, &self.end_address)?;
    validate_schedule(self.trip_kind, self.leave_date, self.return_date)?;
    validate_amounts(self.fuel_cost, self.tolls)?;
    Ok(())
  }

  /// Rewrite validated input into its storage form.
  pub fn normalized(mut self) -> Self {
    self.description = sanitize_description(&self.description);
    self.fuel_cost = normalize_amount(self.fuel_cost);
    self.tolls = normalize_amount(self.tolls);
    self
  }
}
