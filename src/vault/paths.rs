// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Homevault Contributors

//! Storage layout and safe path resolution.
//!
//! ## Storage Layout
//!
//! ```text
//! <root>/
//!   documents/     owner-only material
//!   media/         household media
//!   shared/        shared between members
//!   guest-shared/  exposed to guests
//! ```
//!
//! Every file at rest carries the `.enc` suffix; the suffix is what makes
//! the startup bulk-encryption pass idempotent.
//!
//! ## Containment
//!
//! [`StoragePaths::resolve`] maps an externally supplied filename to a
//! location strictly inside the folder's directory. Normalization is
//! lexical (`.` dropped, `..` popped, absolute names rejected); symlinks
//! are not chased here - the read path separately refuses anything that
//! is not a regular file.

use std::path::{Component, Path, PathBuf};

use crate::auth::Folder;

use super::error::{VaultError, VaultResult};

/// Suffix marking a file as encrypted at rest.
pub const ENCRYPTED_SUFFIX: &str = ".enc";

/// Append the encrypted-at-rest suffix to a resolved path.
pub fn encrypted_form(path: &Path) -> PathBuf {
    let mut os = path.to_path_buf().into_os_string();
    os.push(ENCRYPTED_SUFFIX);
    PathBuf::from(os)
}

/// Storage path utilities for the encrypted tree.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl StoragePaths {
    /// Create a new StoragePaths rooted at `root` (custom roots are how
    /// tests get isolated trees).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory of the storage tree.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory for one logical folder.
    pub fn folder_dir(&self, folder: Folder) -> PathBuf {
        self.root.join(folder.dir_name())
    }

    /// Resolve an externally supplied filename inside `folder`.
    ///
    /// The folder is already a member of the fixed allow-list by
    /// construction (it arrives as an enum); this method only has to keep
    /// the filename inside the folder directory. Returns the logical
    /// (unsuffixed) path, or [`VaultError::InvalidPath`] for empty names,
    /// absolute names, and anything whose `..` segments would climb out.
    pub fn resolve(&self, folder: Folder, filename: &str) -> VaultResult<PathBuf> {
        if filename.trim().is_empty() {
            return Err(VaultError::InvalidPath);
        }

        let base = normalize_lexically(&self.folder_dir(folder)).ok_or(VaultError::InvalidPath)?;
        let candidate = base.join(filename);
        let resolved = normalize_lexically(&candidate).ok_or(VaultError::InvalidPath)?;

        if !resolved.starts_with(&base) || resolved == base {
            return Err(VaultError::InvalidPath);
        }
        Ok(resolved)
    }
}

/// Collapse `.` and `..` segments without touching the filesystem.
///
/// Returns `None` when `..` would pop past the start of the path. An
/// absolute filename joined onto a base replaces it entirely, so it falls
/// out naturally in the caller's prefix check.
fn normalize_lexically(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(p) => out.push(p.as_os_str()),
            Component::RootDir => out.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return None;
                }
                out.pop();
                depth -= 1;
            }
            Component::Normal(seg) => {
                out.push(seg);
                depth += 1;
            }
        }
    }
    Some(out)
}
