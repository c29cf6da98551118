//! Signup handler

use axum::extract::State;
use club_service::{
    dto::{SignupRequest, SignupResponse},
    SignupService,
};

use crate::extractors::ValidatedJson;
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// Register an account, optionally founding a club
///
/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> ApiResult<ApiJson<SignupResponse>> {
    let service = SignupService::new(state.service_context());
    let response = service.signup(request).await?;
    Ok(ApiJson(response))
}
