//! The external authentication provider capability.
//!
//! The gate and the action adapters never talk to a global client; they
//! receive an [`AuthProvider`] so tests can inject doubles and deployments
//! can point at any provider speaking the same HTTP API.

use async_trait::async_trait;
use axum::http::HeaderMap;
use reqwest::{header::COOKIE, Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use std::fmt;
use tracing::{debug, instrument};
use url::Url;

use super::config::SocialProvider;
use super::session::Session;

const GET_SESSION_ENDPOINT: &str = "/api/auth/get-session";
const SIGN_IN_EMAIL_ENDPOINT: &str = "/api/auth/sign-in/email";
const SIGN_UP_EMAIL_ENDPOINT: &str = "/api/auth/sign-up/email";
const SEND_OTP_ENDPOINT: &str = "/api/auth/email-otp/send-verification-otp";
const SIGN_IN_SOCIAL_ENDPOINT: &str = "/api/auth/sign-in/social";
const REQUEST_PASSWORD_RESET_ENDPOINT: &str = "/api/auth/request-password-reset";
const RESET_PASSWORD_ENDPOINT: &str = "/api/auth/reset-password";
const SIGN_OUT_ENDPOINT: &str = "/api/auth/sign-out";

/// Transport-level failure talking to the provider. Distinct from a
/// non-success reply: a reply carries the provider's own verdict, an error
/// means no verdict was obtained at all.
#[derive(Debug)]
pub struct ProviderError(String);

impl ProviderError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ProviderError {}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        Self(err.to_string())
    }
}

/// HTTP-like outcome of one provider call: status plus parsed JSON body, so
/// adapters can surface the provider's own messages.
#[derive(Clone, Debug)]
pub struct ProviderReply {
    status: StatusCode,
    body: Option<Value>,
}

impl ProviderReply {
    #[must_use]
    pub fn new(status: StatusCode, body: Option<Value>) -> Self {
        Self { status, body }
    }

    #[must_use]
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Human-readable message from the reply body, if the provider sent one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.body.as_ref()?.get("message")?.as_str()
    }

    /// Redirect URL from the reply body, for social sign-in hand-off.
    #[must_use]
    pub fn redirect_url(&self) -> Option<&str> {
        self.body.as_ref()?.get("url")?.as_str()
    }
}

/// Capability injected into the route gate and the auth action adapters.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// One read-only session lookup for the caller's request headers.
    /// `Ok(None)` is the first-class "no session" state.
    async fn get_session(&self, headers: &HeaderMap) -> Result<Option<Session>, ProviderError>;

    async fn sign_in_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderReply, ProviderError>;

    async fn sign_up_email(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<ProviderReply, ProviderError>;

    async fn send_verification_otp(&self, email: &str) -> Result<ProviderReply, ProviderError>;

    /// Ask the provider for the OAuth authorization URL for `provider`.
    /// The handshake itself happens between the browser and the provider.
    async fn social_redirect(
        &self,
        provider: SocialProvider,
        callback_url: &str,
    ) -> Result<ProviderReply, ProviderError>;

    async fn request_password_reset(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<ProviderReply, ProviderError>;

    async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<ProviderReply, ProviderError>;

    /// Revoke the caller's session at the provider.
    async fn sign_out(&self, headers: &HeaderMap) -> Result<ProviderReply, ProviderError>;
}

/// [`AuthProvider`] over the provider's HTTP API.
pub struct HttpAuthProvider {
    client: Client,
    base_url: Url,
    api_key: Option<SecretString>,
}

impl HttpAuthProvider {
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: Url, api_key: Option<SecretString>) -> Result<Self, ProviderError> {
        let client = Client::builder().user_agent(crate::APP_USER_AGENT).build()?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ProviderError> {
        self.base_url
            .join(path)
            .map_err(|err| ProviderError::new(format!("invalid provider endpoint {path}: {err}")))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key.expose_secret()),
            None => request,
        }
    }

    async fn post_json(&self, path: &str, payload: &Value) -> Result<ProviderReply, ProviderError> {
        let url = self.endpoint(path)?;
        let request = self.authorize(self.client.post(url).json(payload));

        let response = request.send().await?;
        let status = response.status();
        // A malformed body is not a transport error; adapters fall back to
        // their default messages when no message can be extracted.
        let body = response.json::<Value>().await.ok();

        debug!("provider reply {status} for {path}");

        Ok(ProviderReply::new(status, body))
    }
}

#[async_trait]
impl AuthProvider for HttpAuthProvider {
    #[instrument(skip_all)]
    async fn get_session(&self, headers: &HeaderMap) -> Result<Option<Session>, ProviderError> {
        let url = self.endpoint(GET_SESSION_ENDPOINT)?;

        let mut request = self.authorize(self.client.get(url));
        if let Some(cookies) = headers.get(COOKIE) {
            request = request.header(COOKIE, cookies.clone());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::new(format!(
                "session lookup returned {status}"
            )));
        }

        // The provider answers with the session object or JSON null.
        let session = response.json::<Option<Session>>().await?;

        Ok(session)
    }

    #[instrument(skip_all, fields(email))]
    async fn sign_in_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderReply, ProviderError> {
        self.post_json(
            SIGN_IN_EMAIL_ENDPOINT,
            &json!({ "email": email, "password": password }),
        )
        .await
    }

    #[instrument(skip_all, fields(email))]
    async fn sign_up_email(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<ProviderReply, ProviderError> {
        self.post_json(
            SIGN_UP_EMAIL_ENDPOINT,
            &json!({ "name": name, "email": email, "password": password }),
        )
        .await
    }

    #[instrument(skip_all, fields(email))]
    async fn send_verification_otp(&self, email: &str) -> Result<ProviderReply, ProviderError> {
        self.post_json(
            SEND_OTP_ENDPOINT,
            &json!({ "email": email, "type": "sign-in" }),
        )
        .await
    }

    #[instrument(skip_all, fields(provider = provider.as_str()))]
    async fn social_redirect(
        &self,
        provider: SocialProvider,
        callback_url: &str,
    ) -> Result<ProviderReply, ProviderError> {
        self.post_json(
            SIGN_IN_SOCIAL_ENDPOINT,
            &json!({ "provider": provider.as_str(), "callbackURL": callback_url }),
        )
        .await
    }

    #[instrument(skip_all, fields(email))]
    async fn request_password_reset(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<ProviderReply, ProviderError> {
        self.post_json(
            REQUEST_PASSWORD_RESET_ENDPOINT,
            &json!({ "email": email, "redirectTo": redirect_to }),
        )
        .await
    }

    #[instrument(skip_all)]
    async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<ProviderReply, ProviderError> {
        self.post_json(
            RESET_PASSWORD_ENDPOINT,
            &json!({ "token": token, "newPassword": new_password }),
        )
        .await
    }

    #[instrument(skip_all)]
    async fn sign_out(&self, headers: &HeaderMap) -> Result<ProviderReply, ProviderError> {
        let url = self.endpoint(SIGN_OUT_ENDPOINT)?;

        let mut request = self.authorize(self.client.post(url).json(&json!({})));
        if let Some(cookies) = headers.get(COOKIE) {
            request = request.header(COOKIE, cookies.clone());
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.json::<Value>().await.ok();

        Ok(ProviderReply::new(status, body))
    }
}
