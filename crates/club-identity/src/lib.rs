//! # club-identity
//!
//! Adapter for the hosted identity provider (a GoTrue-compatible auth
//! service). Implements [`club_core::IdentityProvider`] over its admin REST
//! API using the service-role key, and verifies session tokens locally with
//! the shared JWT secret.

mod error;
mod gotrue;

pub use error::IdentityError;
pub use gotrue::{GoTrueConfig, GoTrueIdentityProvider};
