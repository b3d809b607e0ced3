// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Homevault Contributors

//! # API Data Models
//!
//! Request and response structures for the REST API. All types derive
//! `Serialize`/`Deserialize` and `ToSchema` for JSON handling and OpenAPI
//! documentation.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for issuing a guest token.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct IssueGuestTokenRequest {
    /// Token lifetime in minutes. Missing or non-positive values fall
    /// back to the server default (60 minutes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
}

/// A freshly issued guest token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GuestTokenResponse {
    /// Opaque bearer token to present on guest reads.
    pub token: String,
    /// Expiry instant (ISO-8601 UTC).
    pub expires_at: DateTime<Utc>,
}

/// The currently live guest tokens.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActiveGuestTokensResponse {
    /// token → expiry instant (ISO-8601 UTC).
    pub tokens: BTreeMap<String, DateTime<Utc>>,
}
