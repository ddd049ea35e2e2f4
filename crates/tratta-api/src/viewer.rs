//! Per-request viewer resolution.
//!
//! Authentication happens upstream (an OAuth-style identity provider in
//! front of this service); by the time a request reaches these handlers the
//! trusted proxy has either stripped or verified the viewer header. This
//! module only turns that header into an explicit
//! [`Viewer`](tratta_core::user::Viewer) value, so every decision call
//! receives identity as an argument instead of reading ambient state.

use std::sync::Arc;

use axum::http::HeaderMap;
use tratta_core::{store::ItineraryStore, user::Viewer};
use uuid::Uuid;

use crate::error::ApiError;

/// Header carrying the authenticated user's UUID. Absent means guest.
pub const VIEWER_HEADER: &str = "x-viewer-id";

/// Resolve the current request's viewer against the store.
///
/// Absent header → [`Viewer::Guest`]. A present but malformed or unknown id
/// is a `400` — the upstream authenticator should never send one.
pub async fn resolve_viewer<S>(
  store: &Arc<S>,
  headers: &HeaderMap,
) -> Result<Viewer, ApiError>
where
  S: ItineraryStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Some(value) = headers.get(VIEWER_HEADER) else {
    return Ok(Viewer::Guest);
  };

  let id = value
    .to_str()
    .ok()
    .and_then(|s| Uuid::parse_str(s.trim()).ok())
    .ok_or_else(|| {
      ApiError::BadRequest(format!("malformed {VIEWER_HEADER} header"))
    })?;

  let user = store
    .get_user(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::BadRequest(format!("unknown viewer {id}")))?;

  Ok(Viewer::Identified(user))
}
