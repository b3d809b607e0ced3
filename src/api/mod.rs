// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Homevault Contributors

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{ActiveGuestTokensResponse, GuestTokenResponse, IssueGuestTokenRequest},
    state::AppState,
};

pub mod files;
pub mod guests;
pub mod health;

async fn home() -> &'static str {
    "Welcome to Homevault. Files are served under /v1/files/{folder}/{filename}."
}

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        // Wildcard so filenames may contain subdirectories; containment
        // is enforced by the vault, not by route matching.
        .route("/files/{folder}/{*filename}", get(files::read_file))
        .route(
            "/guest-tokens",
            post(guests::issue_guest_token).get(guests::list_guest_tokens),
        )
        .with_state(state.clone());

    Router::new()
        .route("/", get(home))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .with_state(state)
        .nest("/v1", v1_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        files::read_file,
        guests::issue_guest_token,
        guests::list_guest_tokens,
        health::health,
        health::liveness
    ),
    components(
        schemas(
            IssueGuestTokenRequest,
            GuestTokenResponse,
            ActiveGuestTokensResponse
        )
    ),
    tags(
        (name = "Files", description = "Encrypted file retrieval"),
        (name = "Guest Tokens", description = "Short-lived guest access"),
        (name = "Health", description = "Service health probes")
    )
)]
struct ApiDoc;
