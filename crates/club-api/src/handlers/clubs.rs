//! Club handlers
//!
//! Endpoints for club creation, lookup and settings.

use axum::extract::{Path, State};
use club_service::{
    dto::{ClubResponse, CreateClubRequest, UpdateClubRequest},
    ClubService,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::handlers::parse_club_id;
use crate::response::{ApiJson, ApiResult, Created};
use crate::state::AppState;

/// Create a club owned by the caller
///
/// POST /clubs
pub async fn create_club(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateClubRequest>,
) -> ApiResult<Created<ApiJson<ClubResponse>>> {
    let service = ClubService::new(state.service_context());
    let response = service.create_club(auth.user_id, request).await?;
    Ok(Created(ApiJson(response)))
}

/// List clubs the caller belongs to
///
/// GET /clubs
pub async fn list_my_clubs(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<ApiJson<Vec<ClubResponse>>> {
    let service = ClubService::new(state.service_context());
    let response = service.list_my_clubs(auth.user_id).await?;
    Ok(ApiJson(response))
}

/// Get club by subdomain
///
/// GET /clubs/by-subdomain/{subdomain}
pub async fn get_club_by_subdomain(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(subdomain): Path<String>,
) -> ApiResult<ApiJson<ClubResponse>> {
    let service = ClubService::new(state.service_context());
    let response = service
        .get_club_by_subdomain(auth.user_id, &subdomain)
        .await?;
    Ok(ApiJson(response))
}

/// Update club settings
///
/// PUT /clubs/{club_id}
pub async fn update_club(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(club_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateClubRequest>,
) -> ApiResult<ApiJson<ClubResponse>> {
    let club_id = parse_club_id(&club_id)?;

    let service = ClubService::new(state.service_context());
    let response = service.update_club(auth.user_id, club_id, request).await?;
    Ok(ApiJson(response))
}
