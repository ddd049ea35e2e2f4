//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. UUIDs are stored as
//! hyphenated lowercase strings, amounts as fixed two-decimal strings, and
//! enums as their snake_case wire names.

use std::str::FromStr as _;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tratta_core::{
  itinerary::{Itinerary, TripKind},
  user::{Gender, User},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── TripKind ────────────────────────────────────────────────────────────────

pub fn encode_trip_kind(k: TripKind) -> &'static str {
  match k {
    TripKind::OneWay => "one_way",
    TripKind::RoundTrip => "round_trip",
    TripKind::Daily => "daily",
  }
}

pub fn decode_trip_kind(s: &str) -> Result<TripKind> {
  match s {
    "one_way" => Ok(TripKind::OneWay),
    "round_trip" => Ok(TripKind::RoundTrip),
    "daily" => Ok(TripKind::Daily),
    other => Err(Error::Decode(format!("unknown trip kind: {other:?}"))),
  }
}

// ─── Gender ──────────────────────────────────────────────────────────────────

pub fn encode_gender(g: Gender) -> &'static str {
  match g {
    Gender::Female => "female",
    Gender::Male => "male",
    Gender::Unspecified => "unspecified",
  }
}

pub fn decode_gender(s: &str) -> Result<Gender> {
  match s {
    "female" => Ok(Gender::Female),
    "male" => Ok(Gender::Male),
    "unspecified" => Ok(Gender::Unspecified),
    other => Err(Error::Decode(format!("unknown gender: {other:?}"))),
  }
}

// ─── Amounts ─────────────────────────────────────────────────────────────────

pub fn encode_amount(amount: Decimal) -> String { amount.to_string() }

pub fn decode_amount(s: &str) -> Result<Decimal> {
  Decimal::from_str(s)
    .map_err(|e| Error::Decode(format!("malformed amount {s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `users` row.
pub struct RawUser {
  pub user_id:    String,
  pub name:       String,
  pub gender:     String,
  pub created_at: String,
}

impl RawUser {
  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:    decode_uuid(&self.user_id)?,
      name:       self.name,
      gender:     decode_gender(&self.gender)?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from an `itineraries` row.
pub struct RawItinerary {
  pub itinerary_id:    String,
  pub owner_id:        String,
  pub start_address:   String,
  pub end_address:     String,
  pub trip_kind:       String,
  pub leave_date:      String,
  pub return_date:     Option<String>,
  pub fuel_cost:       String,
  pub tolls:           String,
  pub description:     String,
  pub pink:            bool,
  pub pets_allowed:    bool,
  pub smoking_allowed: bool,
  pub created_at:      String,
}

impl RawItinerary {
  pub fn into_itinerary(self) -> Result<Itinerary> {
    Ok(Itinerary {
      itinerary_id:    decode_uuid(&self.itinerary_id)?,
      owner_id:        decode_uuid(&self.owner_id)?,
      start_address:   self.start_address,
      end_address:     self.end_address,
      trip_kind:       decode_trip_kind(&self.trip_kind)?,
      leave_date:      decode_dt(&self.leave_date)?,
      return_date:     self.return_date.as_deref().map(decode_dt).transpose()?,
      fuel_cost:       decode_amount(&self.fuel_cost)?,
      tolls:           decode_amount(&self.tolls)?,
      description:     self.description,
      pink:            self.pink,
      pets_allowed:    self.pets_allowed,
      smoking_allowed: self.smoking_allowed,
      created_at:      decode_dt(&self.created_at)?,
    })
  }
}
