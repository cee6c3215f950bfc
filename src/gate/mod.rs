//! Gateway server assembly: router, middleware stack, listener.

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Extension, MatchedPath},
    http::{HeaderName, HeaderValue, Request},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod actions;
pub mod config;
pub mod guard;
pub mod handlers;
mod openapi;
pub mod policy;
pub mod provider;
pub mod session;
pub mod state;

use self::state::GateState;

/// Build the application router. Split out from [`new`] so tests can drive
/// it without binding a socket.
#[must_use]
pub fn router(state: Arc<GateState>) -> Router {
    // Navigable pages sit behind the route gate; everything else bypasses it.
    let pages = Router::new()
        .route("/", get(handlers::pages::root))
        .route("/login", get(handlers::pages::login))
        .route("/register", get(handlers::pages::register))
        .route("/verify-email", get(handlers::pages::verify_email))
        .route("/reset-password", get(handlers::pages::reset_password))
        .route("/dashboard", get(handlers::pages::dashboard))
        .route("/dashboard/*path", get(handlers::pages::dashboard))
        .layer(middleware::from_fn(guard::route_gate));

    let api = Router::new()
        .route("/api/auth/sign-in", post(handlers::auth::sign_in))
        .route("/api/auth/sign-up", post(handlers::auth::sign_up))
        .route("/api/auth/otp/send", post(handlers::auth::send_otp))
        .route(
            "/api/auth/sign-in/github",
            get(handlers::auth::sign_in_github),
        )
        .route(
            "/api/auth/sign-in/google",
            get(handlers::auth::sign_in_google),
        )
        .route(
            "/api/auth/forgot-password",
            post(handlers::auth::forgot_password),
        )
        .route(
            "/api/auth/reset-password",
            post(handlers::auth::reset_password),
        )
        .route("/api/auth/sign-out", post(handlers::auth::sign_out))
        .route("/health", get(handlers::health));

    Router::new()
        .merge(pages)
        .merge(api)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        )
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &Request<Body>| {
                        HeaderValue::from_str(Ulid::new().to_string().as_str()).ok()
                    },
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(Extension(state)),
        )
}

/// Start the gateway
/// # Errors
/// Return error if failed to bind the listener or serve
pub async fn new(port: u16, state: Arc<GateState>) -> Result<()> {
    let app = router(state);

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
