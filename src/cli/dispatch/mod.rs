//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the server action with its full gateway
//! configuration.

use crate::cli::actions::{server::Args, Action};
use crate::gate::config::SocialProvider;
use anyhow::{Context, Result};
use std::collections::BTreeSet;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);
    let auth_url = matches
        .get_one::<String>("auth-url")
        .cloned()
        .context("missing required argument: --auth-url")?;

    let social_providers: BTreeSet<SocialProvider> = matches
        .get_many::<SocialProvider>("social-provider")
        .map(|values| values.copied().collect())
        .unwrap_or_default();

    Ok(Action::Server(Args {
        port,
        auth_url,
        email_password_enabled: !matches.get_flag("disable-email-password"),
        require_email_verification: !matches.get_flag("no-email-verification"),
        otp_enabled: matches.get_flag("otp"),
        social_providers,
        session_cache_ttl_seconds: matches
            .get_one::<u64>("session-cache-ttl")
            .copied()
            .unwrap_or(300),
    }))
}
