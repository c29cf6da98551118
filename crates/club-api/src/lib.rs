//! # club-api
//!
//! REST API server for the club membership lifecycle, built with Axum.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{
    create_app, create_app_state, create_app_with_config, run, run_server, spawn_invite_sweep,
};
pub use state::{AppState, ReadinessCheck};
