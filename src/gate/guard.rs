//! Route-gate middleware: one session lookup, then the pure policy.

use axum::{
    extract::{Extension, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::{debug, warn};

use super::policy::{self, Decision};
use super::session::SessionState;
use super::state::GateState;

/// Gate one navigation request. Ungated paths pass through without touching
/// the provider; gated paths cost exactly one session lookup.
pub async fn route_gate(
    Extension(state): Extension<Arc<GateState>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    if !policy::is_gated(&path) {
        return next.run(request).await;
    }

    let session = match state.provider().get_session(request.headers()).await {
        Ok(session) => session,
        Err(err) => {
            // Fail closed: a lookup failure gates like a missing session.
            warn!("session lookup failed, treating request as anonymous: {err}");
            None
        }
    };

    let session_state = SessionState::of(
        session.as_ref(),
        state.config().require_email_verification(),
    );

    debug!("gate: {path} as {session_state:?}");

    match policy::decide(&path, session_state) {
        Decision::Allow => next.run(request).await,
        Decision::Redirect(target) => Redirect::temporary(target).into_response(),
    }
}
