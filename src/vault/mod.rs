// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Homevault Contributors

//! # Vault Module
//!
//! At-rest encryption and safe file access.
//!
//! ## Security Model
//!
//! - Every stored file is sealed with AES-256-GCM under one process key
//! - The key is loaded (or generated once) at startup and never logged
//! - Plaintext exists only transiently in memory during a read and
//!   during the one-time bulk-encryption pass at startup
//! - Resolved paths cannot escape the storage root
//!
//! ## Storage Layout
//!
//! ```text
//! <storage root>/
//!   documents/{name}.enc
//!   media/{name}.enc
//!   shared/{name}.enc
//!   guest-shared/{name}.enc
//! ```
//!
//! The key file lives at its own configured path, outside the tree.

pub mod error;
pub mod keys;
pub mod paths;
pub mod service;

pub use error::{VaultError, VaultResult};
pub use keys::KeyManager;
pub use paths::{StoragePaths, ENCRYPTED_SUFFIX};
pub use service::{BulkEncryptReport, VaultService};
