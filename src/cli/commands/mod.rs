use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ArgAction, ColorChoice, Command,
};

use crate::gate::config::SocialProvider;

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn validator_social_provider() -> ValueParser {
    ValueParser::from(
        move |provider: &str| -> std::result::Result<SocialProvider, String> { provider.parse() },
    )
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("soglia")
        .about("Authentication Gateway")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("SOGLIA_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("auth-url")
                .short('a')
                .long("auth-url")
                .help("Base URL of the authentication provider, example: https://auth.tld:3000")
                .env("SOGLIA_AUTH_URL")
                .required(true),
        )
        .arg(
            Arg::new("auth-api-key")
                .long("auth-api-key")
                .help("Bearer token for server-to-server calls to the authentication provider")
                .env("SOGLIA_AUTH_API_KEY"),
        )
        .arg(
            Arg::new("social-provider")
                .long("social-provider")
                .help("Enable a social sign-in provider: github, google (repeatable)")
                .env("SOGLIA_SOCIAL_PROVIDERS")
                .action(ArgAction::Append)
                .value_delimiter(',')
                .value_parser(validator_social_provider()),
        )
        .arg(
            Arg::new("disable-email-password")
                .long("disable-email-password")
                .help("Disable the email/password sign-in and sign-up flows")
                .env("SOGLIA_DISABLE_EMAIL_PASSWORD")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-email-verification")
                .long("no-email-verification")
                .help("Do not require a verified email to reach protected routes")
                .env("SOGLIA_NO_EMAIL_VERIFICATION")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("otp")
                .long("otp")
                .help("Enable one-time passcode sign-in (code delivery is the provider's job)")
                .env("SOGLIA_OTP")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("session-cache-ttl")
                .long("session-cache-ttl")
                .help("Seconds the provider may cache session reads (informational, forwarded to the provider)")
                .default_value("300")
                .env("SOGLIA_SESSION_CACHE_TTL")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("SOGLIA_LOG_LEVEL")
                .global(true)
                .action(ArgAction::Count)
                .value_parser(validator_log_level()),
        )
}
