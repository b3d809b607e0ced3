// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Homevault Contributors

//! Homevault - Personal Encrypted File-Sharing Service
//!
//! A small household file server: files are held encrypted at rest under
//! a single process key, and every read is gated by a role or a
//! short-lived guest token.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Roles, the static permission table, guest tokens
//! - `vault` - Key management, path containment, encrypted reads

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod vault;
