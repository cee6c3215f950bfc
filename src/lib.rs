//! # Soglia (Authentication Gateway)
//!
//! `soglia` fronts a web application's navigable routes with a per-request
//! **route gate** and exposes thin **auth action** endpoints that delegate to
//! an external authentication provider.
//!
//! ## Route Gate
//!
//! Every gated navigation request triggers exactly one session lookup against
//! the provider, then a pure classification into `Allow` or `Redirect`:
//!
//! - `/dashboard` and its sub-paths require an authenticated session with a
//!   verified email; anonymous callers land on `/login`, unverified ones on
//!   `/verify-email`.
//! - `/login` and `/register` bounce fully signed-in users to `/dashboard`.
//! - `/` never renders; it redirects to wherever the caller belongs.
//! - A failed session lookup gates like a missing session (fail closed).
//!
//! ## Auth Actions
//!
//! Sign-in, sign-up, OTP issuance, social sign-in (GitHub/Google), password
//! reset, and sign-out are thin adapters over the provider's HTTP API. Every
//! adapter returns an explicit result; transport failures surface to callers
//! as a generic internal error, never as a raw fault. Session issuance,
//! password hashing, and OAuth handshakes stay with the provider.

pub mod cli;
pub mod gate;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
