//! The search matcher: which itineraries satisfy a query, and which of those
//! may the requesting viewer actually see?
//!
//! Matching is exact-predicate only — no ranking, no geocoding. Address
//! fields match by case-insensitive substring ("Milan" finds
//! "Milan, Lombardy"); structural filters match by equality. All present
//! query fields are combined with AND.

use serde::Deserialize;

use crate::{
  itinerary::{Itinerary, TripKind},
  user::Viewer,
  visibility,
};

// ─── Query ───────────────────────────────────────────────────────────────────

/// The one stable sort the matcher supports beyond native order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
  LeaveDate,
}

/// Parameters for [`search`]. Absent, empty, and whitespace-only text fields
/// all mean "no constraint".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItineraryQuery {
  /// Substring filter against `start_address`.
  pub origin:          Option<String>,
  /// Substring filter against `end_address`.
  pub destination:     Option<String>,
  pub trip_kind:       Option<TripKind>,
  pub pets_allowed:    Option<bool>,
  pub smoking_allowed: Option<bool>,
  /// `None` keeps the candidates' native order.
  pub sort:            Option<SortKey>,
}

// ─── Matching ────────────────────────────────────────────────────────────────

fn contains_ci(haystack: &str, needle: &str) -> bool {
  haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn text_constraint(field: &Option<String>) -> Option<&str> {
  field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Does a single candidate satisfy every present query field?
pub fn matches(itinerary: &Itinerary, query: &ItineraryQuery) -> bool {
  if let Some(origin) = text_constraint(&query.origin)
    && !contains_ci(&itinerary.start_address, origin)
  {
    return false;
  }
  if let Some(destination) = text_constraint(&query.destination)
    && !contains_ci(&itinerary.end_address, destination)
  {
    return false;
  }
  if query.trip_kind.is_some_and(|k| k != itinerary.trip_kind) {
    return false;
  }
  if query.pets_allowed.is_some_and(|p| p != itinerary.pets_allowed) {
    return false;
  }
  if query
    .smoking_allowed
    .is_some_and(|s| s != itinerary.smoking_allowed)
  {
    return false;
  }
  true
}

/// Filter `candidates` by `query`, then drop whatever `viewer` may not see.
///
/// Pink itineraries the viewer cannot access vanish silently — the
/// list/detail distinction is exactly silence here versus an explicit
/// redirect from [`visibility::can_view`]. The result keeps the candidates'
/// native order unless a [`SortKey`] is requested (stable sort), and the
/// input is never mutated or retained.
pub fn search(
  candidates: &[Itinerary],
  query: &ItineraryQuery,
  viewer: &Viewer,
) -> Vec<Itinerary> {
  let matched: Vec<Itinerary> = candidates
    .iter()
    .filter(|candidate| matches(candidate, query))
    .cloned()
    .collect();

  let mut visible = visibility::retain_visible(viewer, matched);

  match query.sort {
    None => {}
    Some(SortKey::LeaveDate) => {
      visible.sort_by_key(|itinerary| itinerary.leave_date);
    }
  }

  visible
}
