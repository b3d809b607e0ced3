// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Homevault Contributors

use axum::{
    extract::{Path, Query, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    auth::{Folder, Role},
    error::ApiError,
    state::AppState,
    vault::VaultError,
};

#[derive(Deserialize, IntoParams)]
pub struct ReadFileQuery {
    /// Caller's role (pre-authenticated upstream).
    pub role: String,
    /// Bearer token; required when role is guest.
    pub guest_token: Option<String>,
}

/// Serve one decrypted file.
///
/// The vault decides: folder allow-list, guest token liveness, the
/// static policy table, path containment, then decryption.
#[utoipa::path(
    get,
    path = "/v1/files/{folder}/{filename}",
    params(
        ("folder" = String, Path, description = "Logical folder name"),
        ("filename" = String, Path, description = "File name within the folder"),
        ReadFileQuery
    ),
    tag = "Files",
    responses(
        (status = 200, description = "Decrypted file bytes", content_type = "application/octet-stream"),
        (status = 400, description = "Unknown folder or invalid path"),
        (status = 403, description = "Access refused or guest token invalid/expired"),
        (status = 404, description = "File not found"),
        (status = 500, description = "Stored file could not be decrypted")
    )
)]
pub async fn read_file(
    State(state): State<AppState>,
    Path((folder, filename)): Path<(String, String)>,
    Query(params): Query<ReadFileQuery>,
) -> Result<Response, ApiError> {
    let role = Role::parse(&params.role)
        .ok_or_else(|| ApiError::forbidden(format!("Unknown role: {}", params.role)))?;
    let folder =
        Folder::parse(&folder).ok_or_else(|| ApiError::from(VaultError::UnknownFolder(folder)))?;

    let plaintext = state
        .vault
        .read(role, folder, &filename, params.guest_token.as_deref())?;

    Ok((
        [(CONTENT_TYPE, "application/octet-stream")],
        plaintext,
    )
        .into_response())
}
