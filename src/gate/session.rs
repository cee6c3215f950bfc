//! Session snapshot as returned by the external provider.

use serde::{Deserialize, Serialize};

/// The principal inside a provider session.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub email: String,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One session lookup result. The provider returns `null` for anonymous
/// callers, so the absence of a session is modeled as `Option<Session>` at
/// the lookup site, never as an error.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
}

/// The three-state view the route gate works with. Verification status is
/// only meaningful for authenticated sessions, which this encoding makes
/// unrepresentable otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Unverified,
    Verified,
}

impl SessionState {
    /// Fold a session lookup into the gate's view. When the deployment does
    /// not require email verification, any authenticated session counts as
    /// verified; the routing policy itself never needs to know about the
    /// config switch.
    #[must_use]
    pub fn of(session: Option<&Session>, require_verification: bool) -> Self {
        match session {
            None => Self::Anonymous,
            Some(session) if require_verification && !session.user.email_verified => {
                Self::Unverified
            }
            Some(_) => Self::Verified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(email_verified: bool) -> Session {
        Session {
            user: SessionUser {
                email: "alice@example.com".to_string(),
                email_verified,
                name: Some("Alice".to_string()),
            },
        }
    }

    #[test]
    fn missing_session_is_anonymous() {
        assert_eq!(SessionState::of(None, true), SessionState::Anonymous);
        assert_eq!(SessionState::of(None, false), SessionState::Anonymous);
    }

    #[test]
    fn unverified_session_classified() {
        assert_eq!(
            SessionState::of(Some(&session(false)), true),
            SessionState::Unverified
        );
        assert_eq!(
            SessionState::of(Some(&session(true)), true),
            SessionState::Verified
        );
    }

    #[test]
    fn verification_requirement_collapses_when_disabled() {
        assert_eq!(
            SessionState::of(Some(&session(false)), false),
            SessionState::Verified
        );
    }

    #[test]
    fn session_decodes_provider_json() {
        let value = serde_json::json!({
            "user": {
                "email": "bob@example.com",
                "emailVerified": true,
                "name": "Bob"
            }
        });
        let session: Session = serde_json::from_value(value).expect("session should decode");
        assert_eq!(session.user.email, "bob@example.com");
        assert!(session.user.email_verified);
    }

    #[test]
    fn session_decodes_with_missing_optional_fields() {
        let value = serde_json::json!({ "user": { "email": "bob@example.com" } });
        let session: Session = serde_json::from_value(value).expect("session should decode");
        assert!(!session.user.email_verified);
        assert!(session.user.name.is_none());
    }
}
