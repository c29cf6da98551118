//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    BulkInviteRequest, ConfirmInviteRequest, CreateClubRequest, InviteMemberRequest,
    InviteeRequest, JoinClubRequest, OnboardingRequest, SignupData, SignupRequest,
    UpdateClubRequest,
};

pub use responses::{
    BulkInviteFailure, BulkInviteResponse, ClubResponse, HealthChecks, HealthResponse,
    MemberResponse, ReadinessResponse, SignupResponse, SignupUser,
};

pub use mappers::ClubForViewer;
