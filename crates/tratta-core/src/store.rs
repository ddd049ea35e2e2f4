//! The `ItineraryStore` trait.
//!
//! Implemented by storage backends (e.g. `tratta-store-sqlite`). Higher
//! layers (`tratta-api`, `tratta-server`) depend on this abstraction, not on
//! any concrete backend.
//!
//! Records returned by a store are fully populated and already validated;
//! the decision components in [`search`](crate::search) and
//! [`visibility`](crate::visibility) never re-validate on read. The list
//! methods return records in insertion order — the "native order" the
//! search matcher preserves.

use std::future::Future;

use uuid::Uuid;

use crate::{
  itinerary::{Itinerary, ItineraryUpdate, NewItinerary},
  user::{NewUser, User},
};

/// Abstraction over an itinerary store backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ItineraryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Create and persist a new user. `user_id` and `created_at` are set by
  /// the store.
  fn add_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Retrieve a user by UUID. Returns `None` if not found.
  fn get_user(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  // ── Itineraries ───────────────────────────────────────────────────────

  /// Validate, normalize, and persist a new itinerary.
  ///
  /// Returns a [`ValidationError`](crate::ValidationError)-carrying error
  /// if any model invariant fails, and an error if `owner_id` names no
  /// stored user.
  fn create_itinerary(
    &self,
    input: NewItinerary,
  ) -> impl Future<Output = Result<Itinerary, Self::Error>> + Send + '_;

  /// Retrieve an itinerary by UUID. Returns `None` if not found.
  ///
  /// Visibility is *not* applied here; the caller composes with
  /// [`visibility::can_view`](crate::visibility::can_view).
  fn get_itinerary(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Itinerary>, Self::Error>> + Send + '_;

  /// All itineraries, insertion-ordered.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Itinerary>, Self::Error>> + Send + '_;

  /// All itineraries posted by one owner, insertion-ordered.
  fn list_by_owner(
    &self,
    owner_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Itinerary>, Self::Error>> + Send + '_;

  /// Apply a partial edit, re-validate the merged record, and persist it.
  ///
  /// Ownership checks belong to the boundary; the store applies whatever
  /// edit it is handed.
  fn update_itinerary(
    &self,
    id: Uuid,
    changes: ItineraryUpdate,
  ) -> impl Future<Output = Result<Itinerary, Self::Error>> + Send + '_;

  /// Delete an itinerary. Errors if `id` names no stored record.
  fn delete_itinerary(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
