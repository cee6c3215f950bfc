//! Placeholder pages behind the route gate.
//!
//! The real forms are rendered by the frontend; these handlers exist so the
//! gated paths resolve when the gateway runs standalone.

use axum::response::Html;

// Unreachable in practice: the gate always redirects "/".
pub async fn root() -> Html<&'static str> {
    Html("<h1>soglia</h1>")
}

pub async fn login() -> Html<&'static str> {
    Html("<h1>Login</h1>")
}

pub async fn register() -> Html<&'static str> {
    Html("<h1>Register</h1>")
}

pub async fn verify_email() -> Html<&'static str> {
    Html("<h1>Verify your email</h1>")
}

pub async fn reset_password() -> Html<&'static str> {
    Html("<h1>Reset your password</h1>")
}

pub async fn dashboard() -> Html<&'static str> {
    Html("<h1>Dashboard</h1>")
}
