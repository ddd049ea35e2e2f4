//! Itinerary — a posted trip offer, the subject of every decision.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Trip kind ───────────────────────────────────────────────────────────────

/// The structural category of an itinerary's schedule.
///
/// The kinds are mutually exclusive: `RoundTrip` requires a return date
/// strictly after the leave date; `OneWay` and `Daily` must not carry one.
/// [`validate`](crate::validate) enforces this before a record is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripKind {
  OneWay,
  RoundTrip,
  Daily,
}

// ─── Itinerary ───────────────────────────────────────────────────────────────

/// A stored trip offer.
///
/// Records handed out by an [`ItineraryStore`](crate::store::ItineraryStore)
/// are fully populated and already validated; the decision components never
/// re-validate on read. `description` is opaque to the engine — it is
/// HTML-escaped once on the way into the store and never inspected by any
/// decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itinerary {
  pub itinerary_id:    Uuid,
  pub owner_id:        Uuid,
  pub start_address:   String,
  pub end_address:     String,
  pub trip_kind:       TripKind,
  pub leave_date:      DateTime<Utc>,
  /// Present iff `trip_kind == RoundTrip`.
  pub return_date:     Option<DateTime<Utc>>,
  /// Two-decimal, non-negative.
  pub fuel_cost:       Decimal,
  /// Two-decimal, non-negative.
  pub tolls:           Decimal,
  pub description:     String,
  /// Restricts visibility to female viewers and the owner.
  pub pink:            bool,
  pub pets_allowed:    bool,
  pub smoking_allowed: bool,
  pub created_at:      DateTime<Utc>,
}

// ─── NewItinerary ────────────────────────────────────────────────────────────

/// Input to [`ItineraryStore::create_itinerary`](crate::store::ItineraryStore::create_itinerary).
/// `itinerary_id` and `created_at` are always assigned by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewItinerary {
  pub owner_id:        Uuid,
  pub start_address:   String,
  pub end_address:     String,
  pub trip_kind:       TripKind,
  pub leave_date:      DateTime<Utc>,
  pub return_date:     Option<DateTime<Utc>>,
  #[serde(default)]
  pub fuel_cost:       Decimal,
  #[serde(default)]
  pub tolls:           Decimal,
  #[serde(default)]
  pub description:     String,
  #[serde(default)]
  pub pink:            bool,
  #[serde(default)]
  pub pets_allowed:    bool,
  #[serde(default)]
  pub smoking_allowed: bool,
}

impl NewItinerary {
  /// Convenience constructor: a one-way trip with zero costs and all flags
  /// off.
  pub fn one_way(
    owner_id: Uuid,
    start_address: impl Into<String>,
    end_address: impl Into<String>,
    leave_date: DateTime<Utc>,
  ) -> Self {
    Self {
      owner_id,
      start_address: start_address.into(),
      end_address: end_address.into(),
      trip_kind: TripKind::OneWay,
      leave_date,
      return_date: None,
      fuel_cost: Decimal::ZERO,
      tolls: Decimal::ZERO,
      description: String::new(),
      pink: false,
      pets_allowed: false,
      smoking_allowed: false,
    }
  }
}

// ─── ItineraryUpdate ─────────────────────────────────────────────────────────

/// A partial edit applied by
/// [`ItineraryStore::update_itinerary`](crate::store::ItineraryStore::update_itinerary).
///
/// `None` fields keep their stored value. Setting `trip_kind` to anything
/// other than [`TripKind::RoundTrip`] clears any stored return date; a
/// round-trip edit must supply `return_date` alongside `trip_kind` when the
/// stored record has none. The merged record is re-validated before writing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItineraryUpdate {
  pub start_address:   Option<String>,
  pub end_address:     Option<String>,
  pub trip_kind:       Option<TripKind>,
  pub leave_date:      Option<DateTime<Utc>>,
  pub return_date:     Option<DateTime<Utc>>,
  pub fuel_cost:       Option<Decimal>,
  pub tolls:           Option<Decimal>,
  /// Replaces the stored description; escaped on the way in like a new one.
  pub description:     Option<String>,
  pub pink:            Option<bool>,
  pub pets_allowed:    Option<bool>,
  pub smoking_allowed: Option<bool>,
}

impl ItineraryUpdate {
  /// Merge this edit into a stored record.
  ///
  /// Incoming text and amounts are normalized here; stored values pass
  /// through untouched — the stored description is already escaped and must
  /// not be escaped twice. The caller re-validates the merged record before
  /// persisting it.
  pub fn apply(self, mut itinerary: Itinerary) -> Itinerary {
    use crate::validate::{normalize_amount, sanitize_description};

    if let Some(start_address) = self.start_address {
      itinerary.start_address = start_address;
    }
    if let Some(end_address) = self.end_address {
      itinerary.end_address = end_address;
    }
    if let Some(trip_kind) = self.trip_kind {
      itinerary.trip_kind = trip_kind;
      if trip_kind != TripKind::RoundTrip {
        itinerary.return_date = None;
      }
    }
    if let Some(leave_date) = self.leave_date {
      itinerary.leave_date = leave_date;
    }
    if let Some(return_date) = self.return_date {
      itinerary.return_date = Some(return_date);
    }
    if let Some(fuel_cost) = self.fuel_cost {
      itinerary.fuel_cost = normalize_amount(fuel_cost);
    }
    if let Some(tolls) = self.tolls {
      itinerary.tolls = normalize_amount(tolls);
    }
    if let Some(description) = self.description {
      itinerary.description = sanitize_description(&description);
    }
    if let Some(pink) = self.pink {
      itinerary.pink = pink;
    }
    if let Some(pets_allowed) = self.pets_allowed {
      itinerary.pets_allowed = pets_allowed;
    }
    if let Some(smoking_allowed) = self.smoking_allowed {
      itinerary.smoking_allowed = smoking_allowed;
    }
    itinerary
  }
}
