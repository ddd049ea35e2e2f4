//! Handlers for `/users` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/users` | Body: `{"name":"...","gender":"female"}` |
//! | `GET`  | `/users/:id` | 404 if not found |
//! | `GET`  | `/users/:id/itineraries` | Owner page; visibility-filtered |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::{HeaderMap, StatusCode},
  response::IntoResponse,
};
use tratta_core::{
  itinerary::Itinerary,
  store::ItineraryStore,
  user::{NewUser, User},
  visibility,
};
use uuid::Uuid;

use crate::{error::ApiError, viewer::resolve_viewer};

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /users` — returns 201 + the stored user.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewUser>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ItineraryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let user = store
    .add_user(body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(user)))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /users/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<User>, ApiError>
where
  S: ItineraryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let user = store
    .get_user(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("user {id} not found")))?;
  Ok(Json(user))
}

// ─── Owner page ──────────────────────────────────────────────────────────────

/// `GET /users/:id/itineraries` — everything this user has posted.
///
/// The owner override means the owner sees all of their rows, pink included;
/// any other viewer gets the visibility-filtered subset.
pub async fn list_itineraries<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  headers: HeaderMap,
) -> Result<Json<Vec<Itinerary>>, ApiError>
where
  S: ItineraryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let viewer = resolve_viewer(&store, &headers).await?;

  let itineraries = store
    .list_by_owner(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(visibility::retain_visible(&viewer, itineraries)))
}
