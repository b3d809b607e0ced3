// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Homevault Contributors

//! Error taxonomy for the access-and-encryption core.
//!
//! All variants except [`VaultError::KeyMaterialMissing`] and
//! [`VaultError::Io`] are per-request outcomes returned to the HTTP layer,
//! never process faults. Integrity failures (`CorruptOrWrongKey`) are kept
//! distinct from authorization failures so operators can tell "wrong
//! credentials" apart from "data corruption / wrong key deployed".

use std::io;

/// Result type for vault operations.
pub type VaultResult<T> = Result<T, VaultError>;

#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    /// Requested folder is not on the fixed allow-list.
    #[error("unknown folder: {0}")]
    UnknownFolder(String),

    /// Filename is empty, malformed, or escapes the storage root.
    #[error("invalid file path")]
    InvalidPath,

    /// Guest token is missing, unknown, or past its expiry.
    #[error("guest token is missing, invalid or expired")]
    InvalidOrExpiredGuest,

    /// Role exists but has no permission for the folder.
    #[error("role {role} may not access folder {folder}")]
    AccessRefused { role: String, folder: String },

    /// File absent (or not a regular file) after path resolution.
    #[error("file not found")]
    NotFound,

    /// AEAD authentication failed: tampered ciphertext, truncated blob,
    /// or a different key than the one the file was encrypted under.
    /// Deliberately not distinguishable further.
    #[error("stored file could not be decrypted")]
    CorruptOrWrongKey,

    /// No usable key and unable to generate/persist one. Fatal at startup;
    /// the process must refuse to serve.
    #[error("key material missing: {0}")]
    KeyMaterialMissing(String),

    /// Filesystem error outside the taxonomy above.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
