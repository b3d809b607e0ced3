// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Homevault Contributors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::vault::VaultError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

/// Map vault denials onto transport status codes.
///
/// Integrity failures map to 500, never 403: "wrong credentials" and
/// "data corruption / wrong key deployed" must stay distinguishable for
/// operators, and the 500 body stays generic so it leaks nothing about
/// which it was.
impl From<VaultError> for ApiError {
    fn from(err: VaultError) -> Self {
        match err {
            VaultError::UnknownFolder(_) | VaultError::InvalidPath => {
                ApiError::bad_request(err.to_string())
            }
            VaultError::InvalidOrExpiredGuest | VaultError::AccessRefused { .. } => {
                ApiError::forbidden(err.to_string())
            }
            VaultError::NotFound => ApiError::not_found("File not found"),
            VaultError::CorruptOrWrongKey => ApiError::internal("Error retrieving file"),
            VaultError::KeyMaterialMissing(_) | VaultError::Io(_) => {
                tracing::error!(error = %err, "internal vault failure");
                ApiError::internal("Internal storage error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}
