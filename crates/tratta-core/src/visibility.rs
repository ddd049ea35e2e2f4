//! The visibility guard: may this viewer see this itinerary?
//!
//! Denial is an expected, frequent outcome, so it is a first-class
//! [`Decision`] value rather than an error. Callers branch on
//! [`Decision::allowed`]; the boundary layer maps the returned
//! [`RedirectIntent`] to a concrete destination and performs the actual
//! navigation itself. The guard has no side effects.

use serde::Serialize;

use crate::{itinerary::Itinerary, user::{Gender, Viewer}};

// ─── Decision vocabulary ─────────────────────────────────────────────────────

/// Why a viewer was denied. Only one reason exists today; the enum leaves
/// room for more without changing the `Decision` shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
  PinkRestricted,
}

/// Where a denied viewer should be sent. Named intents, not URLs — the
/// boundary owns the mapping to its own routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectIntent {
  /// The signed-in user's home/dashboard.
  AuthenticatedHome,
  /// The anonymous landing page.
  AnonymousLanding,
}

/// The structured result of a visibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
  pub allowed:  bool,
  pub reason:   Option<DenialReason>,
  pub redirect: Option<RedirectIntent>,
}

impl Decision {
  fn allow() -> Self {
    Self { allowed: true, reason: None, redirect: None }
  }

  fn deny(reason: DenialReason, redirect: RedirectIntent) -> Self {
    Self { allowed: false, reason: Some(reason), redirect: Some(redirect) }
  }

  pub fn is_allowed(&self) -> bool { self.allowed }
}

// ─── Guard ───────────────────────────────────────────────────────────────────

/// Decide whether `viewer` may see `itinerary` in detail view.
///
/// The rules run in a fixed order, and the order is load-bearing: ownership
/// overrides the gender rule (an owner always sees their own post), and the
/// two denial arms report different redirect intents, which is an observable
/// distinction between signed-in and anonymous viewers.
pub fn can_view(viewer: &Viewer, itinerary: &Itinerary) -> Decision {
  if !itinerary.pink {
    return Decision::allow();
  }
  match viewer {
    Viewer::Identified(user) if user.user_id == itinerary.owner_id => {
      Decision::allow()
    }
    Viewer::Identified(user) if user.gender == Gender::Female => {
      Decision::allow()
    }
    Viewer::Identified(_) => Decision::deny(
      DenialReason::PinkRestricted,
      RedirectIntent::AuthenticatedHome,
    ),
    Viewer::Guest => Decision::deny(
      DenialReason::PinkRestricted,
      RedirectIntent::AnonymousLanding,
    ),
  }
}

/// Drop every itinerary `viewer` may not see. List context is silent: no
/// denial reason survives, items simply vanish.
pub fn retain_visible(viewer: &Viewer, mut itineraries: Vec<Itinerary>) -> Vec<Itinerary> {
  itineraries.retain(|itinerary| can_view(viewer, itinerary).is_allowed());
  itineraries
}
