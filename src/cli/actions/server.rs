use crate::cli::{actions::Action, globals::GlobalArgs};
use crate::gate::{self, config::GateConfig, config::SocialProvider, provider::HttpAuthProvider, state::GateState};
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::sync::Arc;
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub auth_url: String,
    pub email_password_enabled: bool,
    pub require_email_verification: bool,
    pub otp_enabled: bool,
    pub social_providers: BTreeSet<SocialProvider>,
    pub session_cache_ttl_seconds: u64,
}

/// Handle the server action
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let Action::Server(args) = action;

    let base_url = Url::parse(&args.auth_url)
        .with_context(|| format!("Invalid auth provider URL: {}", args.auth_url))?;

    let config = GateConfig::new()
        .with_email_password_enabled(args.email_password_enabled)
        .with_require_email_verification(args.require_email_verification)
        .with_otp_enabled(args.otp_enabled)
        .with_social_providers(args.social_providers)
        .with_session_cache_ttl_seconds(args.session_cache_ttl_seconds);

    let provider = HttpAuthProvider::new(base_url, globals.auth_api_key.clone())
        .context("Failed to build the auth provider client")?;

    let state = Arc::new(GateState::new(config, Arc::new(provider)));

    gate::new(args.port, state).await?;

    Ok(())
}
