//! OpenAPI document for the gateway's HTTP surface.

use utoipa::OpenApi;

use super::handlers::{auth, health};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        auth::sign_in,
        auth::sign_up,
        auth::send_otp,
        auth::sign_in_github,
        auth::sign_in_google,
        auth::forgot_password,
        auth::reset_password,
        auth::sign_out,
    ),
    components(schemas(
        auth::ActionResponse,
        auth::SignInRequest,
        auth::SignUpRequest,
        auth::SendOtpRequest,
        auth::ForgotPasswordRequest,
        auth::ResetPasswordRequest,
    )),
    tags(
        (name = "auth", description = "Auth action adapters"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;
