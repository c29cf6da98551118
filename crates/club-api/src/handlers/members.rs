//! Member handlers

use axum::extract::{Path, State};
use club_service::{
    dto::{JoinClubRequest, MemberResponse},
    MemberService,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::handlers::parse_club_id;
use crate::response::{ApiJson, ApiResult, Created};
use crate::state::AppState;

/// Ask to join a club
///
/// POST /clubs/join
pub async fn join_club(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<JoinClubRequest>,
) -> ApiResult<Created<ApiJson<MemberResponse>>> {
    let service = MemberService::new(state.service_context());
    let response = service.join_club(auth.user_id, request).await?;
    Ok(Created(ApiJson(response)))
}

/// List club members
///
/// GET /clubs/{club_id}/members
pub async fn list_club_members(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(club_id): Path<String>,
) -> ApiResult<ApiJson<Vec<MemberResponse>>> {
    let club_id = parse_club_id(&club_id)?;

    let service = MemberService::new(state.service_context());
    let response = service.list_club_members(auth.user_id, club_id).await?;
    Ok(ApiJson(response))
}
