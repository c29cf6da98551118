//! # club-db
//!
//! Persistence gateway implementing the `club-core` repository traits with
//! PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management and migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations
//!
//! Uniqueness (club subdomain, member email per club, user email) is enforced
//! by indexes in the migrations; repositories translate violations into the
//! matching conflict [`club_core::DomainError`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use club_db::{create_pool, run_migrations, PgClubRepository, PoolConfig};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::from_env()).await?;
//!     run_migrations(&pool).await?;
//!     let clubs = PgClubRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, ping, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgClubRepository, PgEmailQueueRepository, PgInviteRepository, PgMemberRepository,
    PgRoleRepository, PgUserRepository,
};
