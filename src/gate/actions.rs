//! Auth action adapters: thin, normalized calls into the provider.
//!
//! Every adapter returns an explicit [`ActionResult`]; failure kinds are
//! enumerable instead of stringly-typed, and a transport failure is always
//! collapsed into a generic internal error so raw faults never reach the
//! forms.

use axum::http::HeaderMap;
use regex::Regex;
use tracing::error;

use super::config::{GateConfig, SocialProvider};
use super::policy::DASHBOARD_PATH;
use super::provider::{AuthProvider, ProviderError, ProviderReply};

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
const RESET_PASSWORD_PATH: &str = "/reset-password";
const MIN_PASSWORD_LENGTH: usize = 6;

/// Why an action failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionErrorKind {
    /// The flow is switched off in the gateway configuration.
    Disabled,
    /// The payload failed local validation before any provider call.
    Validation,
    /// The provider rejected the credentials.
    InvalidCredentials,
    /// The provider refused the operation for another reason.
    Rejected,
    /// Transport failure or unexpected provider behavior.
    Internal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionError {
    pub kind: ActionErrorKind,
    pub message: String,
}

impl ActionError {
    fn new(kind: ActionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Successful outcome; social sign-in carries the hand-off URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionSuccess {
    pub message: String,
    pub redirect_url: Option<String>,
}

impl ActionSuccess {
    fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            redirect_url: None,
        }
    }
}

pub type ActionResult = Result<ActionSuccess, ActionError>;

pub(crate) fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

fn invalid_credentials(reply: &ProviderReply) -> ActionError {
    ActionError::new(
        ActionErrorKind::InvalidCredentials,
        reply.message().unwrap_or(INVALID_CREDENTIALS_MESSAGE),
    )
}

fn rejected(reply: &ProviderReply, fallback: &str) -> ActionError {
    ActionError::new(
        ActionErrorKind::Rejected,
        reply.message().unwrap_or(fallback),
    )
}

fn internal(operation: &str, err: &ProviderError) -> ActionError {
    error!("[{operation}] provider call failed: {err}");
    ActionError::new(ActionErrorKind::Internal, INTERNAL_ERROR_MESSAGE)
}

/// Email/password sign-in. The credential check is entirely the provider's;
/// a non-success reply surfaces the provider's message when it has one.
pub async fn sign_in(
    provider: &dyn AuthProvider,
    config: &GateConfig,
    email: &str,
    password: &str,
) -> ActionResult {
    if !config.email_password_enabled() {
        return Err(ActionError::new(
            ActionErrorKind::Disabled,
            "Email and password sign-in is disabled",
        ));
    }

    if email.trim().is_empty() || password.is_empty() {
        return Err(ActionError::new(
            ActionErrorKind::Validation,
            "Missing email or password",
        ));
    }

    match provider.sign_in_email(email, password).await {
        Ok(reply) if reply.ok() => Ok(ActionSuccess::message("User signed in successfully")),
        Ok(reply) => Err(invalid_credentials(&reply)),
        Err(err) => Err(internal("sign-in", &err)),
    }
}

/// Email/password registration. Sending the verification email is the
/// provider's side effect, not orchestrated here.
pub async fn sign_up(
    provider: &dyn AuthProvider,
    config: &GateConfig,
    name: &str,
    email: &str,
    password: &str,
) -> ActionResult {
    if !config.email_password_enabled() {
        return Err(ActionError::new(
            ActionErrorKind::Disabled,
            "Email and password sign-up is disabled",
        ));
    }

    if name.trim().is_empty() {
        return Err(ActionError::new(ActionErrorKind::Validation, "Missing name"));
    }

    if !valid_email(email.trim()) {
        return Err(ActionError::new(
            ActionErrorKind::Validation,
            "Invalid email address",
        ));
    }

    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(ActionError::new(
            ActionErrorKind::Validation,
            "Password must be at least 6 characters",
        ));
    }

    match provider.sign_up_email(name, email, password).await {
        Ok(reply) if reply.ok() => Ok(ActionSuccess::message("User signed up successfully")),
        Ok(reply) => Err(rejected(&reply, "Registration failed")),
        Err(err) => Err(internal("sign-up", &err)),
    }
}

/// One-time passcode issuance for passwordless sign-in. Code generation and
/// delivery belong to the provider.
// TODO: expose OTP sign-in completion once the provider's verify endpoint
// semantics are settled.
pub async fn send_otp(provider: &dyn AuthProvider, config: &GateConfig, email: &str) -> ActionResult {
    if !config.otp_enabled() {
        return Err(ActionError::new(
            ActionErrorKind::Disabled,
            "One-time code sign-in is disabled",
        ));
    }

    if email.trim().is_empty() {
        return Err(ActionError::new(
            ActionErrorKind::Validation,
            "Email is required",
        ));
    }

    match provider.send_verification_otp(email).await {
        Ok(reply) if reply.ok() => Ok(ActionSuccess::message("Verification code sent")),
        Ok(reply) => Err(rejected(&reply, "Could not send verification code")),
        Err(err) => Err(internal("send-otp", &err)),
    }
}

/// Social sign-in hand-off. Success means the authorization URL was obtained;
/// the OAuth flow completes on the provider's callback, outside this code.
pub async fn sign_in_social(
    provider: &dyn AuthProvider,
    config: &GateConfig,
    social: SocialProvider,
) -> ActionResult {
    if !config.social_provider_enabled(social) {
        return Err(ActionError::new(
            ActionErrorKind::Disabled,
            format!("Sign-in with {social} is not enabled"),
        ));
    }

    match provider.social_redirect(social, DASHBOARD_PATH).await {
        Ok(reply) if reply.ok() => match reply.redirect_url() {
            Some(url) => Ok(ActionSuccess {
                message: format!("Redirecting to {social}"),
                redirect_url: Some(url.to_string()),
            }),
            None => Err(ActionError::new(
                ActionErrorKind::Internal,
                social.failure_message(),
            )),
        },
        Ok(_) => Err(ActionError::new(
            ActionErrorKind::Rejected,
            social.failure_message(),
        )),
        Err(err) => {
            error!("[social:{social}] provider call failed: {err}");
            Err(ActionError::new(
                ActionErrorKind::Internal,
                social.failure_message(),
            ))
        }
    }
}

/// Ask the provider to email a password reset link pointing back at the
/// reset page.
pub async fn forgot_password(provider: &dyn AuthProvider, email: &str) -> ActionResult {
    if !valid_email(email.trim()) {
        return Err(ActionError::new(
            ActionErrorKind::Validation,
            "Invalid email address",
        ));
    }

    match provider
        .request_password_reset(email, RESET_PASSWORD_PATH)
        .await
    {
        Ok(reply) if reply.ok() => Ok(ActionSuccess::message("Password reset email sent")),
        Ok(reply) => Err(rejected(&reply, "Could not send password reset email")),
        Err(err) => Err(internal("forgot-password", &err)),
    }
}

/// Complete a password reset with the emailed token.
pub async fn reset_password(
    provider: &dyn AuthProvider,
    token: &str,
    new_password: &str,
) -> ActionResult {
    if token.trim().is_empty() {
        return Err(ActionError::new(
            ActionErrorKind::Validation,
            "Missing reset token",
        ));
    }

    if new_password.len() < MIN_PASSWORD_LENGTH {
        return Err(ActionError::new(
            ActionErrorKind::Validation,
            "Password must be at least 6 characters",
        ));
    }

    match provider.reset_password(token, new_password).await {
        Ok(reply) if reply.ok() => Ok(ActionSuccess::message("Password reset successfully")),
        Ok(reply) => Err(rejected(&reply, "Invalid or expired reset token")),
        Err(err) => Err(internal("reset-password", &err)),
    }
}

/// Revoke the caller's session.
pub async fn sign_out(provider: &dyn AuthProvider, headers: &HeaderMap) -> ActionResult {
    match provider.sign_out(headers).await {
        Ok(reply) if reply.ok() => Ok(ActionSuccess::message("Signed out")),
        Ok(reply) => Err(rejected(&reply, "Sign out failed")),
        Err(err) => Err(internal("sign-out", &err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::session::Session;
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    /// Test double: every call answers with the configured reply or fails.
    struct StubProvider {
        status: StatusCode,
        body: Option<Value>,
        fail_transport: bool,
    }

    impl StubProvider {
        fn replying(status: StatusCode, body: Option<Value>) -> Self {
            Self {
                status,
                body,
                fail_transport: false,
            }
        }

        fn unreachable_provider() -> Self {
            Self {
                status: StatusCode::OK,
                body: None,
                fail_transport: true,
            }
        }

        fn reply(&self) -> Result<ProviderReply, ProviderError> {
            if self.fail_transport {
                return Err(ProviderError::new("connection refused"));
            }
            Ok(ProviderReply::new(self.status, self.body.clone()))
        }
    }

    #[async_trait]
    impl AuthProvider for StubProvider {
        async fn get_session(
            &self,
            _headers: &HeaderMap,
        ) -> Result<Option<Session>, ProviderError> {
            Ok(None)
        }

        async fn sign_in_email(
            &self,
            _email: &str,
            _password: &str,
        ) -> Result<ProviderReply, ProviderError> {
            self.reply()
        }

        async fn sign_up_email(
            &self,
            _name: &str,
            _email: &str,
            _password: &str,
        ) -> Result<ProviderReply, ProviderError> {
            self.reply()
        }

        async fn send_verification_otp(
            &self,
            _email: &str,
        ) -> Result<ProviderReply, ProviderError> {
            self.reply()
        }

        async fn social_redirect(
            &self,
            _provider: SocialProvider,
            _callback_url: &str,
        ) -> Result<ProviderReply, ProviderError> {
            self.reply()
        }

        async fn request_password_reset(
            &self,
            _email: &str,
            _redirect_to: &str,
        ) -> Result<ProviderReply, ProviderError> {
            self.reply()
        }

        async fn reset_password(
            &self,
            _token: &str,
            _new_password: &str,
        ) -> Result<ProviderReply, ProviderError> {
            self.reply()
        }

        async fn sign_out(&self, _headers: &HeaderMap) -> Result<ProviderReply, ProviderError> {
            self.reply()
        }
    }

    fn config() -> GateConfig {
        GateConfig::new()
            .with_otp_enabled(true)
            .with_social_provider(SocialProvider::Github)
    }

    #[tokio::test]
    async fn sign_in_success() {
        let provider = StubProvider::replying(StatusCode::OK, Some(json!({ "token": "t" })));
        let result = sign_in(&provider, &config(), "a@b.com", "hunter2").await;
        assert_eq!(
            result.map(|success| success.message),
            Ok("User signed in successfully".to_string())
        );
    }

    #[tokio::test]
    async fn sign_in_surfaces_provider_message() {
        let provider = StubProvider::replying(
            StatusCode::UNAUTHORIZED,
            Some(json!({ "message": "Invalid email or password" })),
        );
        let err = sign_in(&provider, &config(), "a@b.com", "wrong")
            .await
            .expect_err("sign-in should fail");
        assert_eq!(err.kind, ActionErrorKind::InvalidCredentials);
        assert_eq!(err.message, "Invalid email or password");
    }

    #[tokio::test]
    async fn sign_in_defaults_message_when_body_is_useless() {
        let provider = StubProvider::replying(StatusCode::UNAUTHORIZED, None);
        let err = sign_in(&provider, &config(), "a@b.com", "wrong")
            .await
            .expect_err("sign-in should fail");
        assert_eq!(err.message, INVALID_CREDENTIALS_MESSAGE);
    }

    #[tokio::test]
    async fn sign_in_transport_failure_is_generic_internal() {
        let provider = StubProvider::unreachable_provider();
        let err = sign_in(&provider, &config(), "a@b.com", "hunter2")
            .await
            .expect_err("sign-in should fail");
        assert_eq!(err.kind, ActionErrorKind::Internal);
        assert_eq!(err.message, INTERNAL_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn sign_in_disabled_by_config() {
        let provider = StubProvider::replying(StatusCode::OK, None);
        let config = GateConfig::new().with_email_password_enabled(false);
        let err = sign_in(&provider, &config, "a@b.com", "hunter2")
            .await
            .expect_err("sign-in should be disabled");
        assert_eq!(err.kind, ActionErrorKind::Disabled);
    }

    #[tokio::test]
    async fn sign_up_validates_locally_before_calling_out() {
        let provider = StubProvider::unreachable_provider();
        let cfg = config();

        let err = sign_up(&provider, &cfg, " ", "a@b.com", "hunter2")
            .await
            .expect_err("empty name");
        assert_eq!(err.kind, ActionErrorKind::Validation);

        let err = sign_up(&provider, &cfg, "Alice", "not-an-email", "hunter2")
            .await
            .expect_err("bad email");
        assert_eq!(err.kind, ActionErrorKind::Validation);

        let err = sign_up(&provider, &cfg, "Alice", "a@b.com", "short")
            .await
            .expect_err("short password");
        assert_eq!(err.kind, ActionErrorKind::Validation);
    }

    #[tokio::test]
    async fn sign_up_success() {
        let provider = StubProvider::replying(StatusCode::OK, None);
        let result = sign_up(&provider, &config(), "Alice", "a@b.com", "hunter2").await;
        assert_eq!(
            result.map(|success| success.message),
            Ok("User signed up successfully".to_string())
        );
    }

    #[tokio::test]
    async fn send_otp_requires_email() {
        let provider = StubProvider::replying(StatusCode::OK, None);
        let err = send_otp(&provider, &config(), "  ")
            .await
            .expect_err("empty email");
        assert_eq!(err.kind, ActionErrorKind::Validation);
    }

    #[tokio::test]
    async fn send_otp_requires_flow_enabled() {
        let provider = StubProvider::replying(StatusCode::OK, None);
        let err = send_otp(&provider, &GateConfig::new(), "a@b.com")
            .await
            .expect_err("otp disabled by default");
        assert_eq!(err.kind, ActionErrorKind::Disabled);
    }

    #[tokio::test]
    async fn social_sign_in_returns_handoff_url() {
        let provider = StubProvider::replying(
            StatusCode::OK,
            Some(json!({ "url": "https://github.com/login/oauth/authorize?s=1" })),
        );
        let success = sign_in_social(&provider, &config(), SocialProvider::Github)
            .await
            .expect("hand-off should succeed");
        assert_eq!(
            success.redirect_url.as_deref(),
            Some("https://github.com/login/oauth/authorize?s=1")
        );
    }

    #[tokio::test]
    async fn social_sign_in_rejects_disabled_provider() {
        let provider = StubProvider::replying(StatusCode::OK, Some(json!({ "url": "x" })));
        let err = sign_in_social(&provider, &config(), SocialProvider::Google)
            .await
            .expect_err("google is not enabled");
        assert_eq!(err.kind, ActionErrorKind::Disabled);
    }

    #[tokio::test]
    async fn social_sign_in_failure_uses_provider_specific_message() {
        let provider = StubProvider::unreachable_provider();
        let err = sign_in_social(&provider, &config(), SocialProvider::Github)
            .await
            .expect_err("transport failure");
        assert_eq!(err.kind, ActionErrorKind::Internal);
        assert_eq!(err.message, "Login with GitHub failed");
    }

    #[tokio::test]
    async fn forgot_password_validates_email() {
        let provider = StubProvider::unreachable_provider();
        let err = forgot_password(&provider, "nope")
            .await
            .expect_err("bad email");
        assert_eq!(err.kind, ActionErrorKind::Validation);
    }

    #[tokio::test]
    async fn reset_password_requires_token_and_length() {
        let provider = StubProvider::replying(StatusCode::OK, None);

        let err = reset_password(&provider, " ", "hunter2")
            .await
            .expect_err("missing token");
        assert_eq!(err.kind, ActionErrorKind::Validation);

        let err = reset_password(&provider, "token", "short")
            .await
            .expect_err("short password");
        assert_eq!(err.kind, ActionErrorKind::Validation);
    }

    #[tokio::test]
    async fn reset_password_surfaces_provider_rejection() {
        let provider = StubProvider::replying(
            StatusCode::BAD_REQUEST,
            Some(json!({ "message": "Token expired" })),
        );
        let err = reset_password(&provider, "token", "hunter2")
            .await
            .expect_err("expired token");
        assert_eq!(err.kind, ActionErrorKind::Rejected);
        assert_eq!(err.message, "Token expired");
    }

    #[tokio::test]
    async fn sign_out_success() {
        let provider = StubProvider::replying(StatusCode::OK, None);
        let result = sign_out(&provider, &HeaderMap::new()).await;
        assert_eq!(
            result.map(|success| success.message),
            Ok("Signed out".to_string())
        );
    }

    #[test]
    fn valid_email_basic_format() {
        assert!(valid_email("a@example.com"));
        assert!(!valid_email("not-an-email"));
        assert!(!valid_email("missing-domain@"));
    }
}
