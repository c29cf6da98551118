//! # club-service
//!
//! Application layer containing the membership lifecycle core, access
//! control, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AccessGate, ClubOperation, ClubService, InviteService, MemberService, RequiredAccess, Saga,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, SignupService,
    WELCOME_TEMPLATE,
};
