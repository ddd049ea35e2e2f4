//! Core types and decision logic for the Tratta ride-share itinerary engine.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.
//!
//! The two decision components — the visibility guard ([`visibility`]) and
//! the search matcher ([`search`]) — are pure functions of their explicit
//! inputs: no ambient session state, no I/O, no internal mutability. Loading
//! itineraries and resolving the requesting [`Viewer`](user::Viewer) belong
//! to the boundary crates.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod itinerary;
pub mod search;
pub mod store;
pub mod user;
pub mod validate;
pub mod visibility;

pub use error::{Result, ValidationError};

#[cfg(test)]
mod tests;
