// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Homevault Contributors

//! # Authorization Module
//!
//! This module answers "may this caller read that folder":
//!
//! 1. The HTTP layer hands us a pre-authenticated role string per request
//!    (how the caller proved the role is out of scope here).
//! 2. [`AccessPolicy`] is the static role → folder table.
//! 3. [`GuestTokenStore`] is the dynamic half: guests must additionally
//!    present a live, time-bounded bearer token on every read.
//!
//! The static table and the guest-token check are deliberately separate
//! concerns; the vault service composes them.

pub mod guest;
pub mod policy;
pub mod roles;

pub use guest::{GuestTokenStore, IssuedToken, DEFAULT_TOKEN_MINUTES};
pub use policy::{AccessPolicy, Folder};
pub use roles::Role;
