//! HTTP surface for the auth action adapters.
//!
//! Every endpoint answers with the uniform `{ success, message }` shape the
//! forms consume; failure kinds map onto HTTP status codes but the body stays
//! the same either way.

use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::gate::actions::{self, ActionError, ActionErrorKind, ActionResult};
use crate::gate::config::SocialProvider;
use crate::gate::state::GateState;

/// Uniform wire shape consumed by the forms; failures render as toasts from
/// `message`.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SendOtpRequest {
    pub email: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

fn respond(result: ActionResult) -> Response {
    match result {
        Ok(success) => (
            StatusCode::OK,
            Json(ActionResponse {
                success: true,
                message: success.message,
            }),
        )
            .into_response(),
        Err(err) => (
            error_status(&err),
            Json(ActionResponse {
                success: false,
                message: err.message,
            }),
        )
            .into_response(),
    }
}

fn error_status(err: &ActionError) -> StatusCode {
    match err.kind {
        ActionErrorKind::Disabled | ActionErrorKind::Validation => StatusCode::BAD_REQUEST,
        ActionErrorKind::InvalidCredentials => StatusCode::UNAUTHORIZED,
        ActionErrorKind::Rejected => StatusCode::UNPROCESSABLE_ENTITY,
        ActionErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn missing_payload() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ActionResponse {
            success: false,
            message: "Missing payload".to_string(),
        }),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/api/auth/sign-in",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = ActionResponse),
        (status = 401, description = "Invalid credentials", body = ActionResponse),
        (status = 500, description = "Provider unreachable", body = ActionResponse),
    ),
    tag = "auth"
)]
pub async fn sign_in(
    state: Extension<Arc<GateState>>,
    payload: Option<Json<SignInRequest>>,
) -> impl IntoResponse {
    let Some(Json(request)) = payload else {
        return missing_payload();
    };

    respond(
        actions::sign_in(
            state.provider(),
            state.config(),
            &request.email,
            &request.password,
        )
        .await,
    )
}

#[utoipa::path(
    post,
    path = "/api/auth/sign-up",
    request_body = SignUpRequest,
    responses(
        (status = 200, description = "Account created", body = ActionResponse),
        (status = 400, description = "Invalid payload", body = ActionResponse),
        (status = 422, description = "Provider refused the registration", body = ActionResponse),
    ),
    tag = "auth"
)]
pub async fn sign_up(
    state: Extension<Arc<GateState>>,
    payload: Option<Json<SignUpRequest>>,
) -> impl IntoResponse {
    let Some(Json(request)) = payload else {
        return missing_payload();
    };

    respond(
        actions::sign_up(
            state.provider(),
            state.config(),
            &request.name,
            &request.email,
            &request.password,
        )
        .await,
    )
}

#[utoipa::path(
    post,
    path = "/api/auth/otp/send",
    request_body = SendOtpRequest,
    responses(
        (status = 200, description = "Code sent", body = ActionResponse),
        (status = 400, description = "Missing email or flow disabled", body = ActionResponse),
    ),
    tag = "auth"
)]
pub async fn send_otp(
    state: Extension<Arc<GateState>>,
    payload: Option<Json<SendOtpRequest>>,
) -> impl IntoResponse {
    let Some(Json(request)) = payload else {
        return missing_payload();
    };

    respond(actions::send_otp(state.provider(), state.config(), &request.email).await)
}

#[utoipa::path(
    get,
    path = "/api/auth/sign-in/github",
    responses(
        (status = 307, description = "Redirect to the GitHub authorization URL"),
        (status = 400, description = "Provider not enabled", body = ActionResponse),
    ),
    tag = "auth"
)]
pub async fn sign_in_github(state: Extension<Arc<GateState>>) -> impl IntoResponse {
    social(&state, SocialProvider::Github).await
}

#[utoipa::path(
    get,
    path = "/api/auth/sign-in/google",
    responses(
        (status = 307, description = "Redirect to the Google authorization URL"),
        (status = 400, description = "Provider not enabled", body = ActionResponse),
    ),
    tag = "auth"
)]
pub async fn sign_in_google(state: Extension<Arc<GateState>>) -> impl IntoResponse {
    social(&state, SocialProvider::Google).await
}

async fn social(state: &GateState, provider: SocialProvider) -> Response {
    match actions::sign_in_social(state.provider(), state.config(), provider).await {
        Ok(success) => match success.redirect_url.as_deref() {
            Some(url) => Redirect::temporary(url).into_response(),
            None => respond(Ok(success)),
        },
        Err(err) => respond(Err(err)),
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset email sent", body = ActionResponse),
        (status = 400, description = "Invalid email", body = ActionResponse),
    ),
    tag = "auth"
)]
pub async fn forgot_password(
    state: Extension<Arc<GateState>>,
    payload: Option<Json<ForgotPasswordRequest>>,
) -> impl IntoResponse {
    let Some(Json(request)) = payload else {
        return missing_payload();
    };

    respond(actions::forgot_password(state.provider(), &request.email).await)
}

#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset", body = ActionResponse),
        (status = 422, description = "Invalid or expired token", body = ActionResponse),
    ),
    tag = "auth"
)]
pub async fn reset_password(
    state: Extension<Arc<GateState>>,
    payload: Option<Json<ResetPasswordRequest>>,
) -> impl IntoResponse {
    let Some(Json(request)) = payload else {
        return missing_payload();
    };

    respond(actions::reset_password(state.provider(), &request.token, &request.password).await)
}

#[utoipa::path(
    post,
    path = "/api/auth/sign-out",
    responses(
        (status = 200, description = "Session revoked", body = ActionResponse),
    ),
    tag = "auth"
)]
pub async fn sign_out(headers: HeaderMap, state: Extension<Arc<GateState>>) -> impl IntoResponse {
    respond(actions::sign_out(state.provider(), &headers).await)
}
