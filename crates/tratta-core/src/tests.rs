//! Unit tests for the decision components and validation.

use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
  ValidationError,
  itinerary::{Itinerary, NewItinerary, TripKind},
  search::{self, ItineraryQuery, SortKey},
  user::{Gender, User, Viewer},
  validate::sanitize_description,
  visibility::{self, DenialReason, RedirectIntent},
};

// ─── Fixtures ────────────────────────────────────────────────────────────────

fn user(gender: Gender) -> User {
  User {
    user_id: Uuid::new_v4(),
    name: "Ada".into(),
    gender,
    created_at: Utc::now(),
  }
}

fn itinerary(owner_id: Uuid, start: &str, end: &str) -> Itinerary {
  Itinerary {
    itinerary_id: Uuid::new_v4(),
    owner_id,
    start_address: start.into(),
    end_address: end.into(),
    trip_kind: TripKind::OneWay,
    leave_date: Utc.with_ymd_and_hms(2026, 9, 10, 8, 30, 0).unwrap(),
    return_date: None,
    fuel_cost: Decimal::ZERO,
    tolls: Decimal::ZERO,
    description: String::new(),
    pink: false,
    pets_allowed: false,
    smoking_allowed: false,
    created_at: Utc::now(),
  }
}

fn pink_itinerary(owner_id: Uuid) -> Itinerary {
  Itinerary { pink: true, ..itinerary(owner_id, "Milan", "Turin") }
}

fn new_round_trip(owner_id: Uuid) -> NewItinerary {
  let leave = Utc.with_ymd_and_hms(2026, 9, 10, 8, 30, 0).unwrap();
  NewItinerary {
    trip_kind: TripKind::RoundTrip,
    return_date: Some(leave + Duration::days(25)),
    ..NewItinerary::one_way(owner_id, "Milan", "Turin", leave)
  }
}

// ─── Visibility guard ────────────────────────────────────────────────────────

#[test]
fn non_pink_is_open_to_everyone() {
  let it = itinerary(Uuid::new_v4(), "Milan", "Turin");

  assert!(visibility::can_view(&Viewer::Guest, &it).is_allowed());
  for gender in [Gender::Female, Gender::Male, Gender::Unspecified] {
    let viewer = Viewer::Identified(user(gender));
    assert!(visibility::can_view(&viewer, &it).is_allowed());
  }
}

#[test]
fn owner_always_sees_their_own_pink_itinerary() {
  // The owner override must win even for a non-female owner.
  let owner = user(Gender::Male);
  let it = pink_itinerary(owner.user_id);

  let decision = visibility::can_view(&Viewer::Identified(owner), &it);
  assert!(decision.is_allowed());
  assert_eq!(decision.reason, None);
}

#[test]
fn female_non_owner_sees_pink() {
  let it = pink_itinerary(Uuid::new_v4());
  let viewer = Viewer::Identified(user(Gender::Female));

  assert!(visibility::can_view(&viewer, &it).is_allowed());
}

#[test]
fn male_non_owner_is_denied_with_dashboard_redirect() {
  let it = pink_itinerary(Uuid::new_v4());
  let viewer = Viewer::Identified(user(Gender::Male));

  let decision = visibility::can_view(&viewer, &it);
  assert!(!decision.is_allowed());
  assert_eq!(decision.reason, Some(DenialReason::PinkRestricted));
  assert_eq!(decision.redirect, Some(RedirectIntent::AuthenticatedHome));
}

#[test]
fn unspecified_gender_counts_as_not_entitled() {
  let it = pink_itinerary(Uuid::new_v4());
  let viewer = Viewer::Identified(user(Gender::Unspecified));

  let decision = visibility::can_view(&viewer, &it);
  assert!(!decision.is_allowed());
  assert_eq!(decision.redirect, Some(RedirectIntent::AuthenticatedHome));
}

#[test]
fn guest_is_denied_with_landing_redirect() {
  let it = pink_itinerary(Uuid::new_v4());

  let decision = visibility::can_view(&Viewer::Guest, &it);
  assert!(!decision.is_allowed());
  assert_eq!(decision.reason, Some(DenialReason::PinkRestricted));
  // Distinct from the identified-user destination.
  assert_eq!(decision.redirect, Some(RedirectIntent::AnonymousLanding));
}

// ─── Search matcher ──────────────────────────────────────────────────────────

#[test]
fn origin_matches_by_case_insensitive_substring() {
  let owner = Uuid::new_v4();
  let candidates = vec![
    itinerary(owner, "Milan, Lombardy", "Turin"),
    itinerary(owner, "Turin", "Genoa"),
  ];
  let query = ItineraryQuery {
    origin: Some("milan".into()),
    ..Default::default()
  };

  let results = search::search(&candidates, &query, &Viewer::Guest);
  assert_eq!(results.len(), 1);
  assert_eq!(results[0].start_address, "Milan, Lombardy");
}

#[test]
fn origin_and_destination_are_anded() {
  let owner = Uuid::new_v4();
  let candidates = vec![
    itinerary(owner, "Milan", "Turin"),
    itinerary(owner, "Milan", "Genoa"),
  ];
  let query = ItineraryQuery {
    origin: Some("Milan".into()),
    destination: Some("Turin".into()),
    ..Default::default()
  };

  let results = search::search(&candidates, &query, &Viewer::Guest);
  assert_eq!(results.len(), 1);
  assert_eq!(results[0].end_address, "Turin");
}

#[test]
fn blank_text_fields_do_not_constrain() {
  let owner = Uuid::new_v4();
  let candidates = vec![
    itinerary(owner, "Milan", "Turin"),
    itinerary(owner, "Rome", "Naples"),
  ];
  let query = ItineraryQuery {
    origin: Some("   ".into()),
    destination: Some(String::new()),
    ..Default::default()
  };

  let results = search::search(&candidates, &query, &Viewer::Guest);
  assert_eq!(results.len(), 2);
}

#[test]
fn structural_filters_require_exact_equality() {
  let owner = Uuid::new_v4();
  let mut daily = itinerary(owner, "Milan", "Turin");
  daily.trip_kind = TripKind::Daily;
  daily.pets_allowed = true;
  let candidates = vec![itinerary(owner, "Milan", "Turin"), daily];

  let by_kind = search::search(
    &candidates,
    &ItineraryQuery { trip_kind: Some(TripKind::Daily), ..Default::default() },
    &Viewer::Guest,
  );
  assert_eq!(by_kind.len(), 1);
  assert_eq!(by_kind[0].trip_kind, TripKind::Daily);

  let by_pets = search::search(
    &candidates,
    &ItineraryQuery { pets_allowed: Some(false), ..Default::default() },
    &Viewer::Guest,
  );
  assert_eq!(by_pets.len(), 1);
  assert!(!by_pets[0].pets_allowed);
}

#[test]
fn pink_results_vanish_silently_for_male_viewer() {
  // Both candidates match the (empty) query; only the non-pink one
  // survives visibility.
  let a = Uuid::new_v4();
  let b = Uuid::new_v4();
  let candidates = vec![pink_itinerary(a), itinerary(b, "Milan", "Turin")];
  let viewer = Viewer::Identified(user(Gender::Male));

  let results =
    search::search(&candidates, &ItineraryQuery::default(), &viewer);
  assert_eq!(results.len(), 1);
  assert_eq!(results[0].owner_id, b);
}

#[test]
fn pink_results_stay_for_female_viewer() {
  let candidates = vec![
    pink_itinerary(Uuid::new_v4()),
    itinerary(Uuid::new_v4(), "Milan", "Turin"),
  ];
  let viewer = Viewer::Identified(user(Gender::Female));

  let results =
    search::search(&candidates, &ItineraryQuery::default(), &viewer);
  assert_eq!(results.len(), 2);
}

#[test]
fn native_order_is_preserved() {
  let owner = Uuid::new_v4();
  let candidates = vec![
    itinerary(owner, "Milan", "Turin"),
    itinerary(owner, "Milan", "Genoa"),
    itinerary(owner, "Milan", "Rome"),
  ];
  let query =
    ItineraryQuery { origin: Some("Milan".into()), ..Default::default() };

  let results = search::search(&candidates, &query, &Viewer::Guest);
  let ends: Vec<_> =
    results.iter().map(|it| it.end_address.as_str()).collect();
  assert_eq!(ends, ["Turin", "Genoa", "Rome"]);
}

#[test]
fn leave_date_sort_is_applied_on_request() {
  let owner = Uuid::new_v4();
  let mut late = itinerary(owner, "Milan", "Turin");
  late.leave_date += Duration::days(7);
  let early = itinerary(owner, "Milan", "Genoa");
  let candidates = vec![late, early];

  let query = ItineraryQuery {
    sort: Some(SortKey::LeaveDate),
    ..Default::default()
  };
  let results = search::search(&candidates, &query, &Viewer::Guest);
  assert_eq!(results[0].end_address, "Genoa");
  assert_eq!(results[1].end_address, "Turin");
}

#[test]
fn search_is_idempotent() {
  let candidates = vec![
    itinerary(Uuid::new_v4(), "Milan", "Turin"),
    pink_itinerary(Uuid::new_v4()),
    itinerary(Uuid::new_v4(), "Milan", "Genoa"),
  ];
  let query =
    ItineraryQuery { origin: Some("Milan".into()), ..Default::default() };
  let viewer = Viewer::Identified(user(Gender::Male));

  let first = search::search(&candidates, &query, &viewer);
  let second = search::search(&candidates, &query, &viewer);

  let ids = |v: &[Itinerary]| {
    v.iter().map(|it| it.itinerary_id).collect::<Vec<_>>()
  };
  assert_eq!(ids(&first), ids(&second));
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[test]
fn round_trip_without_return_date_is_invalid() {
  let mut input = new_round_trip(Uuid::new_v4());
  input.return_date = None;

  assert!(matches!(
    input.validate(),
    Err(ValidationError::InvalidTripKind(_))
  ));
}

#[test]
fn round_trip_return_equal_to_leave_is_invalid() {
  let mut input = new_round_trip(Uuid::new_v4());
  input.return_date = Some(input.leave_date);
  assert!(matches!(
    input.validate(),
    Err(ValidationError::InvalidTripKind(_))
  ));

  // One second later is enough.
  input.return_date = Some(input.leave_date + Duration::seconds(1));
  assert!(input.validate().is_ok());
}

#[test]
fn daily_with_return_date_is_invalid() {
  let mut input = new_round_trip(Uuid::new_v4());
  input.trip_kind = TripKind::Daily;

  assert!(matches!(
    input.validate(),
    Err(ValidationError::InvalidTripKind(_))
  ));
}

#[test]
fn blank_addresses_are_missing_fields() {
  let mut input = new_round_trip(Uuid::new_v4());
  input.start_address = "  ".into();
  assert_eq!(
    input.validate(),
    Err(ValidationError::MissingField("start_address"))
  );

  input.start_address = "Milan".into();
  input.end_address = String::new();
  assert_eq!(
    input.validate(),
    Err(ValidationError::MissingField("end_address"))
  );
}

#[test]
fn negative_amounts_are_rejected() {
  let mut input = new_round_trip(Uuid::new_v4());
  input.fuel_cost = Decimal::new(-500, 2);
  assert_eq!(
    input.validate(),
    Err(ValidationError::NegativeAmount("fuel_cost"))
  );

  input.fuel_cost = Decimal::ZERO;
  input.tolls = Decimal::new(-1, 0);
  assert_eq!(
    input.validate(),
    Err(ValidationError::NegativeAmount("tolls"))
  );
}

#[test]
fn normalized_rescales_amounts_and_escapes_description() {
  let mut input = new_round_trip(Uuid::new_v4());
  input.fuel_cost = Decimal::new(5, 0); // 5
  input.tolls = Decimal::new(3125, 3); // 3.125
  input.description = "<script>alert('toasty!');</script>".into();

  let normalized = input.normalized();
  assert_eq!(normalized.fuel_cost.to_string(), "5.00");
  assert_eq!(normalized.tolls.to_string(), "3.12");
  assert!(!normalized.description.contains('<'));
  assert!(normalized.description.contains("&lt;script&gt;"));
}

#[test]
fn update_away_from_round_trip_clears_return_date() {
  let owner = Uuid::new_v4();
  let mut stored = itinerary(owner, "Milan", "Turin");
  stored.trip_kind = TripKind::RoundTrip;
  stored.return_date = Some(stored.leave_date + Duration::days(25));

  let merged = crate::itinerary::ItineraryUpdate {
    trip_kind: Some(TripKind::Daily),
    ..Default::default()
  }
  .apply(stored);

  assert_eq!(merged.trip_kind, TripKind::Daily);
  assert_eq!(merged.return_date, None);
}

#[test]
fn update_escapes_new_description_but_not_stored_text() {
  let owner = Uuid::new_v4();
  let mut stored = itinerary(owner, "Milan", "Turin");
  stored.description = "already &amp; escaped".into();

  // No description change: stored text passes through untouched.
  let unchanged =
    crate::itinerary::ItineraryUpdate::default().apply(stored.clone());
  assert_eq!(unchanged.description, "already &amp; escaped");

  // A replacement is escaped exactly once.
  let replaced = crate::itinerary::ItineraryUpdate {
    description: Some("<b>loud</b>".into()),
    ..Default::default()
  }
  .apply(stored);
  assert_eq!(replaced.description, "&lt;b&gt;loud&lt;/b&gt;");
}

#[test]
fn sanitize_escapes_without_removing() {
  assert_eq!(
    sanitize_description(r#"5 < 6 & "quotes""#),
    "5 &lt; 6 &amp; &quot;quotes&quot;"
  );
  // Plain text passes through untouched.
  assert_eq!(sanitize_description("MUSIC VERY LOUD!!!"), "MUSIC VERY LOUD!!!");
}
