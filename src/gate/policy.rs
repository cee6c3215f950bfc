//! Route gate: a pure classifier from (path, session state) to a routing
//! decision.
//!
//! This is the whole access policy. It holds no state, performs no I/O and
//! never fails; the middleware in [`super::guard`] feeds it the result of the
//! single per-request session lookup.

use super::session::SessionState;

pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const VERIFY_EMAIL_PATH: &str = "/verify-email";

/// Outcome of gating one request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Serve the requested path unmodified.
    Allow,
    /// Respond with a redirect instead of serving the path.
    Redirect(&'static str),
}

/// The fixed set of paths the gate applies to. Everything else bypasses the
/// gate entirely and is always served.
#[must_use]
pub fn is_gated(path: &str) -> bool {
    matches!(path, ROOT_PATH | LOGIN_PATH | REGISTER_PATH) || is_protected(path)
}

/// `/dashboard` and its sub-paths. An explicit pattern, not a string prefix:
/// `/dashboardfoo` is unrelated.
#[must_use]
pub fn is_protected(path: &str) -> bool {
    path == DASHBOARD_PATH
        || path
            .strip_prefix(DASHBOARD_PATH)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Decide whether to serve `path` or redirect the caller.
///
/// Rules apply in order, first match wins. The protected-path rules run
/// before the root special case, so `/dashboard` itself is always governed
/// by them.
#[must_use]
pub fn decide(path: &str, session: SessionState) -> Decision {
    if is_protected(path) {
        return match session {
            SessionState::Anonymous => Decision::Redirect(LOGIN_PATH),
            SessionState::Unverified => Decision::Redirect(VERIFY_EMAIL_PATH),
            SessionState::Verified => Decision::Allow,
        };
    }

    if (path == LOGIN_PATH || path == REGISTER_PATH) && session == SessionState::Verified {
        return Decision::Redirect(DASHBOARD_PATH);
    }

    if path == ROOT_PATH {
        // The root page never renders; it lands the caller where they belong.
        return Decision::Redirect(match session {
            SessionState::Anonymous => LOGIN_PATH,
            SessionState::Unverified => VERIFY_EMAIL_PATH,
            SessionState::Verified => DASHBOARD_PATH,
        });
    }

    Decision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATES: [SessionState; 3] = [
        SessionState::Anonymous,
        SessionState::Unverified,
        SessionState::Verified,
    ];

    #[test]
    fn anonymous_dashboard_redirects_to_login() {
        for path in ["/dashboard", "/dashboard/", "/dashboard/settings"] {
            assert_eq!(
                decide(path, SessionState::Anonymous),
                Decision::Redirect(LOGIN_PATH),
                "path: {path}"
            );
        }
    }

    #[test]
    fn unverified_dashboard_redirects_to_verify_email() {
        for path in ["/dashboard", "/dashboard/settings/profile"] {
            assert_eq!(
                decide(path, SessionState::Unverified),
                Decision::Redirect(VERIFY_EMAIL_PATH),
                "path: {path}"
            );
        }
    }

    #[test]
    fn verified_dashboard_allowed() {
        assert_eq!(decide("/dashboard", SessionState::Verified), Decision::Allow);
        assert_eq!(
            decide("/dashboard/settings", SessionState::Verified),
            Decision::Allow
        );
    }

    #[test]
    fn verified_login_and_register_redirect_to_dashboard() {
        assert_eq!(
            decide("/login", SessionState::Verified),
            Decision::Redirect(DASHBOARD_PATH)
        );
        assert_eq!(
            decide("/register", SessionState::Verified),
            Decision::Redirect(DASHBOARD_PATH)
        );
    }

    #[test]
    fn login_and_register_served_unless_fully_signed_in() {
        for path in ["/login", "/register"] {
            assert_eq!(decide(path, SessionState::Anonymous), Decision::Allow);
            assert_eq!(decide(path, SessionState::Unverified), Decision::Allow);
        }
    }

    #[test]
    fn root_always_redirects() {
        assert_eq!(
            decide("/", SessionState::Anonymous),
            Decision::Redirect(LOGIN_PATH)
        );
        assert_eq!(
            decide("/", SessionState::Unverified),
            Decision::Redirect(VERIFY_EMAIL_PATH)
        );
        assert_eq!(
            decide("/", SessionState::Verified),
            Decision::Redirect(DASHBOARD_PATH)
        );
    }

    #[test]
    fn unrecognized_paths_always_allowed() {
        for path in ["/about", "/verify-email", "/pricing", "/dashboardfoo"] {
            for state in STATES {
                assert_eq!(decide(path, state), Decision::Allow, "path: {path}");
            }
        }
    }

    #[test]
    fn decision_is_idempotent() {
        for path in ["/", "/login", "/dashboard", "/dashboard/x", "/about"] {
            for state in STATES {
                assert_eq!(decide(path, state), decide(path, state));
            }
        }
    }

    #[test]
    fn gated_path_set_is_explicit() {
        assert!(is_gated("/"));
        assert!(is_gated("/login"));
        assert!(is_gated("/register"));
        assert!(is_gated("/dashboard"));
        assert!(is_gated("/dashboard/settings"));
        assert!(!is_gated("/verify-email"));
        assert!(!is_gated("/about"));
        assert!(!is_gated("/dashboardfoo"));
    }

    #[test]
    fn protected_prefix_is_a_path_boundary() {
        assert!(is_protected("/dashboard"));
        assert!(is_protected("/dashboard/"));
        assert!(is_protected("/dashboard/a/b"));
        assert!(!is_protected("/dashboardfoo"));
        assert!(!is_protected("/dash"));
    }
}
