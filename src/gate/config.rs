//! Gateway configuration with enumerated, explicit options.
//!
//! The upstream provider hides most of this behind plugin registration; here
//! every recognized option is a named field so the effective feature set is
//! inspectable and testable.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

const DEFAULT_SESSION_CACHE_TTL_SECONDS: u64 = 5 * 60;

/// Social sign-in providers the gateway can hand off to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SocialProvider {
    Github,
    Google,
}

impl SocialProvider {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Google => "google",
        }
    }

    /// Message surfaced when the hand-off to this provider fails.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Github => "Login with GitHub failed",
            Self::Google => "Login with Google failed",
        }
    }
}

impl fmt::Display for SocialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SocialProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "github" => Ok(Self::Github),
            "google" => Ok(Self::Google),
            other => Err(format!("unknown social provider: {other}")),
        }
    }
}

#[derive(Clone, Debug)]
pub struct GateConfig {
    email_password_enabled: bool,
    require_email_verification: bool,
    social_providers: BTreeSet<SocialProvider>,
    otp_enabled: bool,
    session_cache_ttl_seconds: u64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GateConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            email_password_enabled: true,
            require_email_verification: true,
            social_providers: BTreeSet::new(),
            otp_enabled: false,
            session_cache_ttl_seconds: DEFAULT_SESSION_CACHE_TTL_SECONDS,
        }
    }

    #[must_use]
    pub fn with_email_password_enabled(mut self, enabled: bool) -> Self {
        self.email_password_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_require_email_verification(mut self, required: bool) -> Self {
        self.require_email_verification = required;
        self
    }

    #[must_use]
    pub fn with_social_providers(mut self, providers: BTreeSet<SocialProvider>) -> Self {
        self.social_providers = providers;
        self
    }

    #[must_use]
    pub fn with_social_provider(mut self, provider: SocialProvider) -> Self {
        self.social_providers.insert(provider);
        self
    }

    #[must_use]
    pub fn with_otp_enabled(mut self, enabled: bool) -> Self {
        self.otp_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_session_cache_ttl_seconds(mut self, seconds: u64) -> Self {
        self.session_cache_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn email_password_enabled(&self) -> bool {
        self.email_password_enabled
    }

    #[must_use]
    pub fn require_email_verification(&self) -> bool {
        self.require_email_verification
    }

    #[must_use]
    pub fn social_providers(&self) -> &BTreeSet<SocialProvider> {
        &self.social_providers
    }

    #[must_use]
    pub fn social_provider_enabled(&self, provider: SocialProvider) -> bool {
        self.social_providers.contains(&provider)
    }

    #[must_use]
    pub fn otp_enabled(&self) -> bool {
        self.otp_enabled
    }

    #[must_use]
    pub fn session_cache_ttl_seconds(&self) -> u64 {
        self.session_cache_ttl_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_config_defaults() {
        let config = GateConfig::new();
        assert!(config.email_password_enabled());
        assert!(config.require_email_verification());
        assert!(config.social_providers().is_empty());
        assert!(!config.otp_enabled());
        assert_eq!(
            config.session_cache_ttl_seconds(),
            DEFAULT_SESSION_CACHE_TTL_SECONDS
        );
    }

    #[test]
    fn gate_config_overrides() {
        let config = GateConfig::new()
            .with_email_password_enabled(false)
            .with_require_email_verification(false)
            .with_social_provider(SocialProvider::Github)
            .with_otp_enabled(true)
            .with_session_cache_ttl_seconds(42);

        assert!(!config.email_password_enabled());
        assert!(!config.require_email_verification());
        assert!(config.social_provider_enabled(SocialProvider::Github));
        assert!(!config.social_provider_enabled(SocialProvider::Google));
        assert!(config.otp_enabled());
        assert_eq!(config.session_cache_ttl_seconds(), 42);
    }

    #[test]
    fn social_provider_parses_known_names() {
        assert_eq!("github".parse(), Ok(SocialProvider::Github));
        assert_eq!(" Google ".parse(), Ok(SocialProvider::Google));
        assert!("myspace".parse::<SocialProvider>().is_err());
    }

    #[test]
    fn social_provider_display_matches_wire_name() {
        assert_eq!(SocialProvider::Github.to_string(), "github");
        assert_eq!(SocialProvider::Google.to_string(), "google");
    }
}
