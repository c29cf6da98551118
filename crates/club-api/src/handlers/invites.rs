//! Invite handlers
//!
//! Sending invitations and accepting them. Acceptance is bound to the
//! caller's session email.

use axum::extract::State;
use club_service::{
    dto::{
        BulkInviteRequest, BulkInviteResponse, ConfirmInviteRequest, InviteMemberRequest,
        MemberResponse, OnboardingRequest,
    },
    InviteService,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiJson, ApiResult, Created};
use crate::state::AppState;

/// Invite a single member
///
/// POST /clubs/invite
pub async fn invite_member(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<InviteMemberRequest>,
) -> ApiResult<Created<ApiJson<MemberResponse>>> {
    let service = InviteService::new(state.service_context());
    let response = service.invite_member(auth.user_id, request).await?;
    Ok(Created(ApiJson(response)))
}

/// Invite many members at once
///
/// POST /clubs/bulk-invite
///
/// Per-entry failures are reported in `failed` and do not fail the request.
pub async fn bulk_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<BulkInviteRequest>,
) -> ApiResult<Created<ApiJson<BulkInviteResponse>>> {
    let service = InviteService::new(state.service_context());
    let response = service.bulk_invite(auth.user_id, request).await?;
    Ok(Created(ApiJson(response)))
}

/// Accept an invite
///
/// POST /clubs/confirm-invite
pub async fn confirm_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ConfirmInviteRequest>,
) -> ApiResult<ApiJson<MemberResponse>> {
    let service = InviteService::new(state.service_context());
    let response = service.confirm_invite(&auth.session(), request).await?;
    Ok(ApiJson(response))
}

/// Accept an invite and fill in the member profile
///
/// POST /clubs/onboarding
pub async fn onboard(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<OnboardingRequest>,
) -> ApiResult<ApiJson<MemberResponse>> {
    let service = InviteService::new(state.service_context());
    let response = service
        .onboard_and_confirm(&auth.session(), request)
        .await?;
    Ok(ApiJson(response))
}
