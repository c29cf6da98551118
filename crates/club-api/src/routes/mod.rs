//! Route definitions
//!
//! Club lifecycle routes are mounted at the root; health routes are exported
//! separately so they sit outside the rate limiter.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{clubs, health, invites, members, signup};
use crate::state::AppState;

/// Create the main API router with all lifecycle routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(signup_routes())
        .merge(club_routes())
        .merge(invite_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn signup_routes() -> Router<AppState> {
    Router::new().route("/signup", post(signup::signup))
}

/// Club routes
fn club_routes() -> Router<AppState> {
    Router::new()
        .route("/clubs", get(clubs::list_my_clubs).post(clubs::create_club))
        .route("/clubs/by-subdomain/:subdomain", get(clubs::get_club_by_subdomain))
        .route("/clubs/:club_id", put(clubs::update_club))
        .route("/clubs/:club_id/members", get(members::list_club_members))
        .route("/clubs/join", post(members::join_club))
}

/// Invitation routes
fn invite_routes() -> Router<AppState> {
    Router::new()
        .route("/clubs/invite", post(invites::invite_member))
        .route("/clubs/bulk-invite", post(invites::bulk_invite))
        .route("/clubs/confirm-invite", post(invites::confirm_invite))
        .route("/clubs/onboarding", post(invites::onboard))
}
