//! Identity provider client errors

use club_core::DomainError;

/// Failures talking to the identity provider
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("identity provider returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl IdentityError {
    /// Message reported by the provider when the account already exists
    pub fn is_already_registered(&self) -> bool {
        match self {
            Self::Status { status, message } => {
                matches!(status, 400 | 409 | 422)
                    && (message.contains("already") || message.contains("email_exists"))
            }
            _ => false,
        }
    }
}

impl From<IdentityError> for DomainError {
    fn from(e: IdentityError) -> Self {
        DomainError::IdentityError(e.to_string())
    }
}
