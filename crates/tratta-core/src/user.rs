//! Users and viewers.
//!
//! A [`User`] is the read-only identity a record belongs to. A [`Viewer`] is
//! the request-scoped identity asking to see data: constructed per request by
//! the external identity resolver, handed to every decision call explicitly,
//! and discarded when the request completes. The engine only ever reads it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Gender as reported by the identity provider.
///
/// The pink-itinerary rule treats every value other than `Female` —
/// including [`Unspecified`](Gender::Unspecified) and anonymous viewers —
/// as not entitled to pink content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
  Female,
  Male,
  Unspecified,
}

/// A registered user. Read-only to this crate; registration and
/// authentication live with the external identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub user_id:    Uuid,
  pub name:       String,
  pub gender:     Gender,
  pub created_at: DateTime<Utc>,
}

/// Input to [`ItineraryStore::add_user`](crate::store::ItineraryStore::add_user).
/// `user_id` and `created_at` are always assigned by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
  pub name:   String,
  pub gender: Gender,
}

/// The identity (or lack thereof) behind the current request.
#[derive(Debug, Clone)]
pub enum Viewer {
  /// No identity: the request is anonymous.
  Guest,
  /// An authenticated user, fully resolved by the identity provider.
  Identified(User),
}

impl Viewer {
  /// The resolved user, if any.
  pub fn user(&self) -> Option<&User> {
    match self {
      Self::Guest => None,
      Self::Identified(user) => Some(user),
    }
  }

  /// True when this viewer is the identified user with `user_id`.
  pub fn is_user(&self, user_id: Uuid) -> bool {
    self.user().is_some_and(|u| u.user_id == user_id)
  }
}
