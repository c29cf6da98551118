//! Session token verification

mod jwt;

pub use jwt::{JwtService, SessionClaims};
