//! JSON REST API for Tratta.
//!
//! Exposes an axum [`Router`] backed by any
//! [`tratta_core::store::ItineraryStore`]. Identity is resolved upstream;
//! this crate only reads the viewer header (see [`viewer`]). TLS and
//! transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", tratta_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod itineraries;
pub mod users;
pub mod viewer;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use tratta_core::{store::ItineraryStore, visibility::RedirectIntent};

pub use error::ApiError;

/// Map a named redirect intent to this boundary's own routing.
///
/// The engine never knows these paths; it only names the destination kind.
pub fn redirect_path(intent: RedirectIntent) -> &'static str {
  match intent {
    RedirectIntent::AuthenticatedHome => "/dashboard",
    RedirectIntent::AnonymousLanding => "/",
  }
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ItineraryStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Users
    .route("/users", post(users::create::<S>))
    .route("/users/{id}", get(users::get_one::<S>))
    .route("/users/{id}/itineraries", get(users::list_itineraries::<S>))
    // Itineraries
    .route(
      "/itineraries",
      get(itineraries::list::<S>).post(itineraries::create::<S>),
    )
    .route(
      "/itineraries/{id}",
      get(itineraries::get_one::<S>)
        .put(itineraries::update_one::<S>)
        .delete(itineraries::delete_one::<S>),
    )
    .with_state(store)
}
