//! Integration test utilities for the club server
//!
//! In-memory stand-ins for the database and the identity provider, with
//! injectable failures, plus helpers for running the REST API end to end.

pub mod helpers;
pub mod memory;

pub use fixtures::*;
pub use helpers::*;
pub use memory::{FailPoint, MemoryIdentityProvider, MemoryStore, SentEmail, SentKind};
