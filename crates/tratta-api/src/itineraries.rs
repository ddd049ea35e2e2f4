//! Handlers for `/itineraries` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/itineraries` | Search; `?from=&to=&trip_kind=&pets_allowed=&smoking_allowed=&sort=` |
//! | `POST`   | `/itineraries` | Body: [`NewItineraryBody`]; viewer must be signed in |
//! | `GET`    | `/itineraries/:id` | Detail; pink denial answers `303` + `Location` |
//! | `PUT`    | `/itineraries/:id` | Owner-only partial edit |
//! | `DELETE` | `/itineraries/:id` | Owner-only |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::{HeaderMap, StatusCode, header},
  response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tratta_core::{
  itinerary::{Itinerary, ItineraryUpdate, NewItinerary, TripKind},
  search::{self, ItineraryQuery, SortKey},
  store::ItineraryStore,
  validate,
  visibility,
};
use uuid::Uuid;

use crate::{error::ApiError, redirect_path, viewer::resolve_viewer};

// ─── Search / list ───────────────────────────────────────────────────────────

/// Query parameters for `GET /itineraries`. `from`/`to` mirror the search
/// form field names of the original listing page.
#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
  pub from:            Option<String>,
  pub to:              Option<String>,
  pub trip_kind:       Option<TripKind>,
  pub pets_allowed:    Option<bool>,
  pub smoking_allowed: Option<bool>,
  pub sort:            Option<SortKey>,
}

impl From<SearchParams> for ItineraryQuery {
  fn from(p: SearchParams) -> Self {
    Self {
      origin:          p.from,
      destination:     p.to,
      trip_kind:       p.trip_kind,
      pets_allowed:    p.pets_allowed,
      smoking_allowed: p.smoking_allowed,
      sort:            p.sort,
    }
  }
}

/// `GET /itineraries[?from=...][&to=...][&trip_kind=...][&sort=leave_date]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<SearchParams>,
  headers: HeaderMap,
) -> Result<Json<Vec<Itinerary>>, ApiError>
where
  S: ItineraryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let viewer = resolve_viewer(&store, &headers).await?;
  let candidates = store
    .list_all()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let query = ItineraryQuery::from(params);
  Ok(Json(search::search(&candidates, &query, &viewer)))
}

// ─── Detail ──────────────────────────────────────────────────────────────────

/// `GET /itineraries/:id`
///
/// An allowed viewer gets the record. A denied one gets `303 See Other`
/// pointing at the destination the engine's redirect intent maps to, with
/// the denial reason in the body — the detail-view counterpart of the
/// silent filtering the list view does.
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  headers: HeaderMap,
) -> Result<Response, ApiError>
where
  S: ItineraryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let viewer = resolve_viewer(&store, &headers).await?;
  let itinerary = store
    .get_itinerary(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("itinerary {id} not found")))?;

  let decision = visibility::can_view(&viewer, &itinerary);
  if decision.is_allowed() {
    return Ok(Json(itinerary).into_response());
  }

  let location = decision.redirect.map_or("/", redirect_path);
  Ok(
    (
      StatusCode::SEE_OTHER,
      [(header::LOCATION, location)],
      Json(json!({ "error": decision.reason })),
    )
      .into_response(),
  )
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /itineraries`. The owner is always the
/// signed-in viewer; it is never accepted from the payload.
#[derive(Debug, Deserialize)]
pub struct NewItineraryBody {
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

impl NewItineraryBody {
  fn into_new_itinerary(self, owner_id: Uuid) -> NewItinerary {
    NewItinerary {
      owner_id,
      start_address:   self.start_address,
      end_address:     self.end_address,
      trip_kind:       self.trip_kind,
      leave_date:      self.leave_date,
      return_date:     self.return_date,
      fuel_cost:       self.fuel_cost,
      tolls:           self.tolls,
      description:     self.description,
      pink:            self.pink,
      pets_allowed:    self.pets_allowed,
      smoking_allowed: self.smoking_allowed,
    }
  }
}

/// `POST /itineraries` — returns 201 + the stored itinerary.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  headers: HeaderMap,
  Json(body): Json<NewItineraryBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ItineraryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let viewer = resolve_viewer(&store, &headers).await?;
  let Some(user) = viewer.user() else {
    return Err(ApiError::Forbidden(
      "sign in to post an itinerary".into(),
    ));
  };

  let input = body.into_new_itinerary(user.user_id);
  // Validate here so field-level failures answer 422 instead of being
  // flattened into an opaque store error.
  input.validate()?;

  let itinerary = store
    .create_itinerary(input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(itinerary)))
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// `PUT /itineraries/:id` — body: [`ItineraryUpdate`]; owner-only.
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  headers: HeaderMap,
  Json(changes): Json<ItineraryUpdate>,
) -> Result<Json<Itinerary>, ApiError>
where
  S: ItineraryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let viewer = resolve_viewer(&store, &headers).await?;
  let existing = store
    .get_itinerary(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("itinerary {id} not found")))?;

  if !viewer.is_user(existing.owner_id) {
    return Err(ApiError::Forbidden(
      "only the owner may edit an itinerary".into(),
    ));
  }

  // Dry-run the merge so validation failures answer 422; the store repeats
  // the merge on its own copy when it persists.
  let merged = changes.clone().apply(existing);
  validate::validate_addresses(&merged.start_address, &merged.end_address)?;
  validate::validate_schedule(
    merged.trip_kind,
    merged.leave_date,
    merged.return_date,
  )?;
  validate::validate_amounts(merged.fuel_cost, merged.tolls)?;

  let updated = store
    .update_itinerary(id, changes)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(updated))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /itineraries/:id` — owner-only; returns 204.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  headers: HeaderMap,
) -> Result<StatusCode, ApiError>
where
  S: ItineraryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let viewer = resolve_viewer(&store, &headers).await?;
  let existing = store
    .get_itinerary(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("itinerary {id} not found")))?;

  if !viewer.is_user(existing.owner_id) {
    return Err(ApiError::Forbidden(
      "only the owner may delete an itinerary".into(),
    ));
  }

  store
    .delete_itinerary(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}
