// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Homevault Contributors

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    auth::Role,
    error::ApiError,
    models::{ActiveGuestTokensResponse, GuestTokenResponse, IssueGuestTokenRequest},
    state::AppState,
};

#[derive(Deserialize, IntoParams)]
pub struct CallerQuery {
    /// Caller's role (pre-authenticated upstream).
    pub role: String,
}

/// Only the owner manages guest tokens.
fn require_owner(role: &str) -> Result<(), ApiError> {
    match Role::parse(role) {
        Some(Role::Owner) => Ok(()),
        _ => Err(ApiError::forbidden("Only the owner may manage guest tokens")),
    }
}

/// Issue a short-lived guest token.
#[utoipa::path(
    post,
    path = "/v1/guest-tokens",
    params(CallerQuery),
    request_body = IssueGuestTokenRequest,
    tag = "Guest Tokens",
    responses(
        (status = 200, description = "Token issued", body = GuestTokenResponse),
        (status = 403, description = "Caller is not the owner")
    )
)]
pub async fn issue_guest_token(
    State(state): State<AppState>,
    Query(params): Query<CallerQuery>,
    Json(request): Json<IssueGuestTokenRequest>,
) -> Result<Json<GuestTokenResponse>, ApiError> {
    require_owner(&params.role)?;

    let issued = state.guest_tokens.issue(request.duration_minutes);
    tracing::info!(expires_at = %issued.expires_at, "issued guest token");

    Ok(Json(GuestTokenResponse {
        token: issued.token,
        expires_at: issued.expires_at,
    }))
}

/// List the currently live guest tokens (expired ones are swept out as a
/// side effect).
#[utoipa::path(
    get,
    path = "/v1/guest-tokens",
    params(CallerQuery),
    tag = "Guest Tokens",
    responses(
        (status = 200, description = "Live tokens", body = ActiveGuestTokensResponse),
        (status = 403, description = "Caller is not the owner")
    )
)]
pub async fn list_guest_tokens(
    State(state): State<AppState>,
    Query(params): Query<CallerQuery>,
) -> Result<Json<ActiveGuestTokensResponse>, ApiError> {
    require_owner(&params.role)?;

    Ok(Json(ActiveGuestTokensResponse {
        tokens: state.guest_tokens.list_active(),
    }))
}
