// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Homevault Contributors

//! The vault service: authorization, path resolution and decryption
//! composed into one read pipeline.
//!
//! Per-request state machine (no persistent state beyond the
//! collaborators):
//!
//! 1. folder must be on the allow-list (enforced by the `Folder` enum
//!    at the boundary)
//! 2. guests must present a live token
//! 3. the static policy table must allow the role/folder pair
//! 4. the filename must resolve inside the folder directory
//! 5. the encrypted file must exist as a regular file
//! 6. decrypt; authentication failure surfaces as `CorruptOrWrongKey`,
//!    never as an access denial
//!
//! Also owns the one-time `bulk_encrypt` startup pass that seals any
//! plaintext file left in the tree. It runs before the listener binds,
//! so it never races a concurrent read.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::auth::{AccessPolicy, Folder, GuestTokenStore, Role};

use super::error::{VaultError, VaultResult};
use super::keys::KeyManager;
use super::paths::{encrypted_form, StoragePaths, ENCRYPTED_SUFFIX};

/// Outcome of a bulk-encryption pass, for startup logging.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BulkEncryptReport {
    /// Plaintext files sealed during this pass.
    pub encrypted: usize,
    /// Files already carrying the encrypted suffix, left untouched.
    pub already_encrypted: usize,
}

/// Orchestrates key management, path containment and the access policy.
#[derive(Debug)]
pub struct VaultService {
    keys: KeyManager,
    paths: StoragePaths,
    guests: Arc<GuestTokenStore>,
}

impl VaultService {
    /// Build the service and create the folder skeleton under the root.
    /// Safe to call on an existing tree (idempotent).
    pub fn new(
        keys: KeyManager,
        paths: StoragePaths,
        guests: Arc<GuestTokenStore>,
    ) -> VaultResult<Self> {
        for folder in Folder::ALL {
            fs::create_dir_all(paths.folder_dir(folder))?;
        }
        Ok(Self {
            keys,
            paths,
            guests,
        })
    }

    /// Storage layout in use.
    pub fn paths(&self) -> &StoragePaths {
        &self.paths
    }

    /// Read and decrypt one file on behalf of `role`.
    ///
    /// Returns the plaintext bytes, or the denial describing exactly which
    /// gate refused the request.
    pub fn read(
        &self,
        role: Role,
        folder: Folder,
        filename: &str,
        guest_token: Option<&str>,
    ) -> VaultResult<Vec<u8>> {
        if role == Role::Guest {
            let live = guest_token
                .map(|token| self.guests.is_valid(token))
                .unwrap_or(false);
            if !live {
                return Err(VaultError::InvalidOrExpiredGuest);
            }
        }

        if !AccessPolicy::allowed(role, folder) {
            return Err(VaultError::AccessRefused {
                role: role.to_string(),
                folder: folder.to_string(),
            });
        }

        let resolved = self.paths.resolve(folder, filename)?;
        let stored = encrypted_form(&resolved);

        // symlink_metadata so a symlink at the leaf is refused outright
        // rather than chased out of the tree.
        let meta = match fs::symlink_metadata(&stored) {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(VaultError::NotFound)
            }
            Err(e) => return Err(e.into()),
        };
        if !meta.is_file() {
            return Err(VaultError::NotFound);
        }

        let blob = fs::read(&stored)?;
        self.keys.decrypt(&blob)
    }

    /// Walk the storage tree once and seal every plaintext file.
    ///
    /// Each plaintext file is replaced by its `.enc` twin and removed;
    /// files already suffixed are skipped, which makes a second pass a
    /// no-op. Intended to run exactly once at startup, before requests
    /// are accepted.
    pub fn bulk_encrypt(&self) -> VaultResult<BulkEncryptReport> {
        let mut report = BulkEncryptReport::default();
        self.encrypt_dir(self.paths.root(), &mut report)?;
        tracing::info!(
            encrypted = report.encrypted,
            already_encrypted = report.already_encrypted,
            "bulk encryption pass complete"
        );
        Ok(report)
    }

    fn encrypt_dir(&self, dir: &Path, report: &mut BulkEncryptReport) -> VaultResult<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            let meta = fs::symlink_metadata(&path)?;

            if meta.is_dir() {
                self.encrypt_dir(&path, report)?;
            } else if meta.is_file() {
                if path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(ENCRYPTED_SUFFIX))
                {
                    report.already_encrypted += 1;
                } else {
                    self.encrypt_file(&path)?;
                    report.encrypted += 1;
                }
            } else {
                tracing::warn!(path = %path.display(), "skipping non-regular file");
            }
        }
        Ok(())
    }

    fn encrypt_file(&self, path: &Path) -> VaultResult<()> {
        let plaintext = fs::read(path)?;
        let blob = self.keys.encrypt(&plaintext)?;
        fs::write(encrypted_form(path), blob)?;
        fs::remove_file(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::GuestTokenStore;
    use crate::vault::keys::KEY_LEN;
    use chrono::{Duration, Utc};
    use std::collections::BTreeMap;

    fn test_vault() -> (tempfile::TempDir, VaultService, Arc<GuestTokenStore>) {
        let dir = tempfile::tempdir().expect("tempdir");
        let guests = Arc::new(GuestTokenStore::new());
        let service = VaultService::new(
            KeyManager::from_key_bytes(&[7; KEY_LEN]),
            StoragePaths::new(dir.path()),
            Arc::clone(&guests),
        )
        .expect("vault init");
        (dir, service, guests)
    }

    fn seed_plaintext(service: &VaultService, folder: Folder, name: &str, contents: &[u8]) {
        let path = service.paths().folder_dir(folder).join(name);
        fs::write(path, contents).expect("seed file");
    }

    /// Snapshot of every file in the tree: path → bytes.
    fn tree_snapshot(root: &Path) -> BTreeMap<String, Vec<u8>> {
        let mut snapshot = BTreeMap::new();
        let mut stack = vec![root.to_path_buf()];
        while let Some(dir) = stack.pop() {
            for entry in fs::read_dir(&dir).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    stack.push(path);
                } else {
                    let key = path.strip_prefix(root).unwrap().display().to_string();
                    snapshot.insert(key, fs::read(&path).unwrap());
                }
            }
        }
        snapshot
    }

    #[test]
    fn new_creates_folder_skeleton() {
        let (_dir, service, _) = test_vault();
        for folder in Folder::ALL {
            assert!(service.paths().folder_dir(folder).is_dir());
        }
    }

    #[test]
    fn bulk_encrypt_seals_plaintext_and_read_recovers_it() {
        let (_dir, service, _) = test_vault();
        seed_plaintext(&service, Folder::Documents, "will.txt", b"to my heirs");

        let report = service.bulk_encrypt().unwrap();
        assert_eq!(report.encrypted, 1);

        // Plaintext is gone, only the sealed form remains.
        let folder_dir = service.paths().folder_dir(Folder::Documents);
        assert!(!folder_dir.join("will.txt").exists());
        assert!(folder_dir.join("will.txt.enc").exists());
        assert_ne!(
            fs::read(folder_dir.join("will.txt.enc")).unwrap(),
            b"to my heirs"
        );

        let plaintext = service
            .read(Role::Owner, Folder::Documents, "will.txt", None)
            .unwrap();
        assert_eq!(plaintext, b"to my heirs");
    }

    #[test]
    fn bulk_encrypt_is_idempotent() {
        let (dir, service, _) = test_vault();
        seed_plaintext(&service, Folder::Shared, "list.txt", b"milk, eggs");
        seed_plaintext(&service, Folder::Media, "pic.jpg", b"\xff\xd8jpeg");

        let first = service.bulk_encrypt().unwrap();
        assert_eq!(first.encrypted, 2);
        let after_first = tree_snapshot(dir.path());

        let second = service.bulk_encrypt().unwrap();
        assert_eq!(second.encrypted, 0);
        assert_eq!(second.already_encrypted, 2);

        // Byte-identical tree: no double encryption, no data loss.
        assert_eq!(tree_snapshot(dir.path()), after_first);
    }

    #[test]
    fn guest_with_live_token_reads_guest_shared() {
        let (_dir, service, guests) = test_vault();
        seed_plaintext(&service, Folder::GuestShared, "note.txt", b"wifi: hunter2");
        service.bulk_encrypt().unwrap();

        let issued = guests.issue(Some(1));
        let plaintext = service
            .read(
                Role::Guest,
                Folder::GuestShared,
                "note.txt",
                Some(&issued.token),
            )
            .unwrap();
        assert_eq!(plaintext, b"wifi: hunter2");
    }

    #[test]
    fn guest_with_expired_token_is_denied() {
        let (_dir, service, guests) = test_vault();
        seed_plaintext(&service, Folder::GuestShared, "note.txt", b"hello");
        service.bulk_encrypt().unwrap();

        // Issue in the past so the token is already two minutes dead.
        let issued = guests.issue_at(Utc::now() - Duration::minutes(3), Some(1));
        let result = service.read(
            Role::Guest,
            Folder::GuestShared,
            "note.txt",
            Some(&issued.token),
        );
        assert!(matches!(result, Err(VaultError::InvalidOrExpiredGuest)));
    }

    #[test]
    fn guest_without_token_is_denied_even_for_guest_shared() {
        let (_dir, service, _) = test_vault();
        let result = service.read(Role::Guest, Folder::GuestShared, "note.txt", None);
        assert!(matches!(result, Err(VaultError::InvalidOrExpiredGuest)));
    }

    #[test]
    fn guest_token_does_not_unlock_other_folders() {
        let (_dir, service, guests) = test_vault();
        let issued = guests.issue(Some(5));

        let result = service.read(
            Role::Guest,
            Folder::Documents,
            "will.txt",
            Some(&issued.token),
        );
        assert!(matches!(result, Err(VaultError::AccessRefused { .. })));
    }

    #[test]
    fn role_without_permission_is_refused() {
        let (_dir, service, _) = test_vault();
        let result = service.read(Role::CoResident, Folder::Documents, "will.txt", None);
        assert!(matches!(result, Err(VaultError::AccessRefused { .. })));
    }

    #[test]
    fn traversal_is_denied_regardless_of_role() {
        let (_dir, service, _) = test_vault();
        let result = service.read(Role::Owner, Folder::Documents, "../../etc/passwd", None);
        assert!(matches!(result, Err(VaultError::InvalidPath)));
    }

    #[test]
    fn missing_file_is_not_found() {
        let (_dir, service, _) = test_vault();
        let result = service.read(Role::Owner, Folder::Shared, "ghost.txt", None);
        assert!(matches!(result, Err(VaultError::NotFound)));
    }

    #[test]
    fn tampered_file_surfaces_corruption_not_denial() {
        let (_dir, service, _) = test_vault();
        seed_plaintext(&service, Folder::Shared, "list.txt", b"milk");
        service.bulk_encrypt().unwrap();

        let stored = service
            .paths()
            .folder_dir(Folder::Shared)
            .join("list.txt.enc");
        let mut blob = fs::read(&stored).unwrap();
        let last = blob.len() - 1;
        blob[last] ^= 0x01;
        fs::write(&stored, blob).unwrap();

        let result = service.read(Role::Owner, Folder::Shared, "list.txt", None);
        assert!(matches!(result, Err(VaultError::CorruptOrWrongKey)));
    }

    #[test]
    fn concurrent_reads_return_identical_plaintext() {
        let (_dir, service, _) = test_vault();
        seed_plaintext(&service, Folder::Shared, "list.txt", b"milk, eggs");
        service.bulk_encrypt().unwrap();

        let service = Arc::new(service);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let service = Arc::clone(&service);
                std::thread::spawn(move || {
                    service
                        .read(Role::Owner, Folder::Shared, "list.txt", None)
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), b"milk, eggs");
        }
    }

    #[cfg(unix)]
    #[test]
    fn symlink_at_leaf_is_refused() {
        let (dir, service, _) = test_vault();

        // A sealed file outside the shared folder, plus a symlink to it.
        let outside = dir.path().join("outside.enc");
        fs::write(&outside, b"not even a valid blob").unwrap();
        std::os::unix::fs::symlink(
            &outside,
            service.paths().folder_dir(Folder::Shared).join("link.enc"),
        )
        .unwrap();

        let result = service.read(Role::Owner, Folder::Shared, "link", None);
        assert!(matches!(result, Err(VaultError::NotFound)));
    }
}
