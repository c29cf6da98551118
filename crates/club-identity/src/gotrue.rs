//! GoTrue admin API client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use club_common::{AppError, AuthConfig, JwtService};
use club_core::{
    AccountMetadata, DomainError, IdentityAccount, IdentityProvider, RepoResult,
    SessionIdentity, SignUpRequest, UserId,
};

use crate::error::IdentityError;

/// Accounts fetched per page when scanning for an email
const USERS_PAGE_SIZE: u32 = 1000;
/// Upper bound on pages scanned by `find_account_by_email`
const MAX_USER_PAGES: u32 = 100;

/// Connection settings for the auth service
#[derive(Clone)]
pub struct GoTrueConfig {
    /// Base URL including the API prefix, e.g. `https://project.supabase.co/auth/v1`
    pub base_url: String,
    pub service_role_key: String,
    pub jwt_secret: String,
    pub timeout: Duration,
}

impl From<&AuthConfig> for GoTrueConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            service_role_key: config.service_role_key.clone(),
            jwt_secret: config.jwt_secret.clone(),
            timeout: config.request_timeout(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
}

impl UserRecord {
    fn into_account(self, fallback_email: &str) -> IdentityAccount {
        IdentityAccount {
            id: UserId::from_uuid(self.id),
            email: self.email.unwrap_or_else(|| fallback_email.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserPage {
    #[serde(default)]
    users: Vec<UserRecord>,
}

/// `/signup` answers with a bare user, or with `{ user, session }` when a
/// session is issued immediately
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    WithSession { user: UserRecord },
    User(UserRecord),
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.msg
            .or(self.message)
            .or(self.error_description)
            .or(self.error)
    }
}

/// Identity provider backed by a GoTrue-compatible auth service
#[derive(Clone)]
pub struct GoTrueIdentityProvider {
    client: Client,
    config: GoTrueConfig,
    jwt: JwtService,
}

impl GoTrueIdentityProvider {
    /// Build the client once per process; it is cheap to clone and share
    pub fn new(config: GoTrueConfig) -> Result<Self, IdentityError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let jwt = JwtService::new(&config.jwt_secret);
        Ok(Self { client, config, jwt })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header("apikey", &self.config.service_role_key)
            .bearer_auth(&self.config.service_role_key)
    }

    async fn check(response: Response) -> Result<Response, IdentityError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or(text);

        Err(IdentityError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, IdentityError> {
        let response = Self::check(request.send().await?).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| IdentityError::Decode(e.to_string()))
    }

    async fn send_empty(request: RequestBuilder) -> Result<(), IdentityError> {
        Self::check(request.send().await?).await.map(|_| ())
    }

    fn conflict_or(email: &str, e: IdentityError) -> DomainError {
        if e.is_already_registered() {
            DomainError::EmailAlreadyExists(email.to_string())
        } else {
            e.into()
        }
    }
}

#[async_trait]
impl IdentityProvider for GoTrueIdentityProvider {
    #[instrument(skip(self))]
    async fn find_account_by_email(&self, email: &str) -> RepoResult<Option<IdentityAccount>> {
        let wanted = email.trim();

        for page in 1..=MAX_USER_PAGES {
            let request = self
                .request(Method::GET, "/admin/users")
                .query(&[("page", page), ("per_page", USERS_PAGE_SIZE)]);
            let batch: UserPage = Self::send_json(request).await?;
            let fetched = batch.users.len();

            if let Some(found) = batch.users.into_iter().find(|u| {
                u.email
                    .as_deref()
                    .is_some_and(|e| e.eq_ignore_ascii_case(wanted))
            }) {
                return Ok(Some(found.into_account(wanted)));
            }

            if fetched < USERS_PAGE_SIZE as usize {
                return Ok(None);
            }
        }

        warn!("Account scan stopped at page limit");
        Ok(None)
    }

    #[instrument(skip(self, metadata))]
    async fn create_account(
        &self,
        email: &str,
        metadata: &AccountMetadata,
        email_confirmed: bool,
    ) -> RepoResult<IdentityAccount> {
        let request = self.request(Method::POST, "/admin/users").json(&json!({
            "email": email,
            "email_confirm": email_confirmed,
            "user_metadata": metadata,
        }));

        let record: UserRecord = Self::send_json(request)
            .await
            .map_err(|e| Self::conflict_or(email, e))?;
        debug!(account_id = %record.id, "Created identity account");
        Ok(record.into_account(email))
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn sign_up(&self, request: &SignUpRequest) -> RepoResult<IdentityAccount> {
        let http = self.request(Method::POST, "/signup").json(&json!({
            "email": request.email,
            "password": request.password,
            "data": request.metadata,
        }));

        let response: SignUpResponse = Self::send_json(http)
            .await
            .map_err(|e| Self::conflict_or(&request.email, e))?;
        let record = match response {
            SignUpResponse::WithSession { user } | SignUpResponse::User(user) => user,
        };
        Ok(record.into_account(&request.email))
    }

    #[instrument(skip(self))]
    async fn delete_account(&self, id: UserId) -> RepoResult<()> {
        let request = self.request(Method::DELETE, &format!("/admin/users/{id}"));
        Self::send_empty(request).await.map_err(Into::into)
    }

    #[instrument(skip(self, data))]
    async fn send_magic_link(
        &self,
        email: &str,
        redirect_url: &str,
        data: &serde_json::Value,
    ) -> RepoResult<()> {
        let request = self
            .request(Method::POST, "/otp")
            .query(&[("redirect_to", redirect_url)])
            .json(&json!({
                "email": email,
                "data": data,
                "create_user": false,
            }));
        Self::send_empty(request).await.map_err(Into::into)
    }

    #[instrument(skip(self, data))]
    async fn send_invite_email(
        &self,
        email: &str,
        redirect_url: &str,
        data: &serde_json::Value,
    ) -> RepoResult<()> {
        let request = self
            .request(Method::POST, "/invite")
            .query(&[("redirect_to", redirect_url)])
            .json(&json!({
                "email": email,
                "data": data,
            }));
        Self::send_empty(request).await.map_err(Into::into)
    }

    async fn authenticate(&self, session_token: &str) -> RepoResult<SessionIdentity> {
        let claims = self.jwt.verify(session_token).map_err(|e| match e {
            AppError::TokenExpired | AppError::InvalidToken => DomainError::InvalidSession,
            other => DomainError::InternalError(other.to_string()),
        })?;
        let user_id = claims.user_id().map_err(|_| DomainError::InvalidSession)?;

        Ok(SessionIdentity {
            user_id,
            email: claims.email,
        })
    }
}

impl std::fmt::Debug for GoTrueIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoTrueIdentityProvider")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}
