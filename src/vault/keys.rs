// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Homevault Contributors

//! Process encryption key and AEAD primitives.
//!
//! Files at rest are sealed with AES-256-GCM. Each encrypted blob is laid
//! out as `[12-byte nonce][ciphertext+tag]`; the nonce is freshly random
//! per encryption, so ciphertexts never repeat under the same key.
//!
//! Exactly one key lives per process. It is loaded from the key file if
//! one exists, generated and persisted otherwise, and immutable after
//! that. Regenerating the key while encrypted data exists under the old
//! one makes that data permanently unrecoverable, which is why a key file
//! that exists but cannot be read is a fatal startup error rather than a
//! trigger for silent regeneration.
//!
//! The key is never logged and never leaves this module.

use std::fs;
use std::path::Path;

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};

use super::error::{VaultError, VaultResult};

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;

/// AES-GCM nonce length (96 bits).
pub const NONCE_LEN: usize = 12;

/// Owns the process-wide symmetric key and performs encrypt/decrypt.
///
/// Read-only after construction; share via `Arc` without locking.
pub struct KeyManager {
    cipher: Aes256Gcm,
}

impl std::fmt::Debug for KeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material must never appear in debug output or logs.
        f.debug_struct("KeyManager").finish_non_exhaustive()
    }
}

impl KeyManager {
    /// Load the key from `key_path`, or generate and persist a fresh one
    /// if no key file exists yet.
    ///
    /// Generation happens at most once per deployment. Any failure here is
    /// [`VaultError::KeyMaterialMissing`] and the caller must refuse to
    /// start serving.
    pub fn load_or_create(key_path: &Path) -> VaultResult<Self> {
        match fs::read(key_path) {
            Ok(bytes) => {
                if bytes.len() != KEY_LEN {
                    return Err(VaultError::KeyMaterialMissing(format!(
                        "key file {} has {} bytes, expected {KEY_LEN}",
                        key_path.display(),
                        bytes.len()
                    )));
                }
                let key = Key::<Aes256Gcm>::from_slice(&bytes);
                Ok(Self {
                    cipher: Aes256Gcm::new(key),
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let key = Aes256Gcm::generate_key(OsRng);
                Self::persist_key(key_path, key.as_slice())?;
                tracing::info!(path = %key_path.display(), "generated new encryption key");
                Ok(Self {
                    cipher: Aes256Gcm::new(&key),
                })
            }
            Err(e) => Err(VaultError::KeyMaterialMissing(format!(
                "cannot read key file {}: {e}",
                key_path.display()
            ))),
        }
    }

    /// Build a manager from raw key bytes. Intended for tests that need
    /// two distinct keys without touching the filesystem.
    pub fn from_key_bytes(bytes: &[u8; KEY_LEN]) -> Self {
        Self {
            cipher: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(bytes)),
        }
    }

    fn persist_key(key_path: &Path, key: &[u8]) -> VaultResult<()> {
        if let Some(parent) = key_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                VaultError::KeyMaterialMissing(format!(
                    "cannot create key directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        fs::write(key_path, key).map_err(|e| {
            VaultError::KeyMaterialMissing(format!(
                "cannot persist key file {}: {e}",
                key_path.display()
            ))
        })?;

        // Key file is a secret; restrict to the owning user where we can.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(key_path, perms).map_err(|e| {
                VaultError::KeyMaterialMissing(format!(
                    "cannot set key file permissions on {}: {e}",
                    key_path.display()
                ))
            })?;
        }

        Ok(())
    }

    /// Encrypt `plaintext` into a self-contained blob: nonce followed by
    /// ciphertext+tag. Nonce generation is this method's responsibility.
    pub fn encrypt(&self, plaintext: &[u8]) -> VaultResult<Vec<u8>> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|_| std::io::Error::other("AEAD encryption failure"))?;

        let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        blob.extend_from_slice(nonce.as_slice());
        blob.extend_from_slice(&ciphertext);
        Ok(blob)
    }

    /// Decrypt a blob produced by [`KeyManager::encrypt`].
    ///
    /// Fails with [`VaultError::CorruptOrWrongKey`] for truncated input,
    /// tampered ciphertext, or a wrong key. The three causes are not
    /// distinguishable from the error value.
    pub fn decrypt(&self, blob: &[u8]) -> VaultResult<Vec<u8>> {
        if blob.len() < NONCE_LEN {
            return Err(VaultError::CorruptOrWrongKey);
        }
        let (nonce, ciphertext) = blob.split_at(NONCE_LEN);
        self.cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| VaultError::CorruptOrWrongKey)
    }
}
