// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Homevault Contributors

//! Static role → folder permission table.
//!
//! Folders form a fixed allow-list; requests naming anything else are
//! rejected before the filesystem is touched. The table is exhaustive
//! over both enums, so an unhandled role/folder combination is a compile
//! error rather than a silent empty-set fallback.
//!
//! For the guest role, `allowed` is necessary but not sufficient: callers
//! must additionally prove a live token via
//! [`GuestTokenStore`](super::GuestTokenStore). Keeping the static table
//! separate from the time-bounded guest-identity check is deliberate.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Role;

/// Fixed logical storage namespaces exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Folder {
    /// The owner's private documents
    Documents,
    /// Photos, music, video
    Media,
    /// Shared between household members
    Shared,
    /// Material exposed to guests
    GuestShared,
}

impl Folder {
    /// All folders, in on-disk order. Used to lay out the storage tree.
    pub const ALL: [Folder; 4] = [
        Folder::Documents,
        Folder::Media,
        Folder::Shared,
        Folder::GuestShared,
    ];

    /// Parse a folder from its wire string (case-insensitive).
    pub fn parse(s: &str) -> Option<Folder> {
        match s.to_lowercase().as_str() {
            "documents" => Some(Folder::Documents),
            "media" => Some(Folder::Media),
            "shared" => Some(Folder::Shared),
            "guest-shared" | "guestshared" => Some(Folder::GuestShared),
            _ => None,
        }
    }

    /// Directory name under the storage root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Folder::Documents => "documents",
            Folder::Media => "media",
            Folder::Shared => "shared",
            Folder::GuestShared => "guest-shared",
        }
    }
}

impl std::fmt::Display for Folder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}

/// The static permission table. Pure and immutable after process start.
pub struct AccessPolicy;

impl AccessPolicy {
    /// May `role` touch `folder`?
    ///
    /// Exhaustive over both enums. The hierarchy is strictly nested:
    /// Owner ⊃ CoResident ⊃ LimitedMember ⊃ Guest.
    pub fn allowed(role: Role, folder: Folder) -> bool {
        match (role, folder) {
            (Role::Owner, _) => true,

            (Role::CoResident, Folder::Documents) => false,
            (Role::CoResident, Folder::Media | Folder::Shared | Folder::GuestShared) => true,

            (Role::LimitedMember, Folder::Documents | Folder::Media) => false,
            (Role::LimitedMember, Folder::Shared | Folder::GuestShared) => true,

            (Role::Guest, Folder::GuestShared) => true,
            (Role::Guest, Folder::Documents | Folder::Media | Folder::Shared) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_can_access_everything() {
        for folder in Folder::ALL {
            assert!(AccessPolicy::allowed(Role::Owner, folder));
        }
    }

    #[test]
    fn guest_is_restricted_to_guest_shared() {
        assert!(AccessPolicy::allowed(Role::Guest, Folder::GuestShared));
        assert!(!AccessPolicy::allowed(Role::Guest, Folder::Documents));
        assert!(!AccessPolicy::allowed(Role::Guest, Folder::Media));
        assert!(!AccessPolicy::allowed(Role::Guest, Folder::Shared));
    }

    #[test]
    fn hierarchy_is_strictly_nested() {
        let order = [
            Role::Owner,
            Role::CoResident,
            Role::LimitedMember,
            Role::Guest,
        ];
        for pair in order.windows(2) {
            for folder in Folder::ALL {
                // Anything the lesser role can reach, the greater can too.
                if AccessPolicy::allowed(pair[1], folder) {
                    assert!(AccessPolicy::allowed(pair[0], folder));
                }
            }
        }
    }

    #[test]
    fn folder_parse_is_case_insensitive() {
        assert_eq!(Folder::parse("documents"), Some(Folder::Documents));
        assert_eq!(Folder::parse("MEDIA"), Some(Folder::Media));
        assert_eq!(Folder::parse("Guest-Shared"), Some(Folder::GuestShared));
        assert_eq!(Folder::parse("guestshared"), Some(Folder::GuestShared));
        assert_eq!(Folder::parse("attic"), None);
    }

    #[test]
    fn dir_names_are_stable() {
        // On-disk names are part of the storage layout; renaming them
        // would orphan existing encrypted trees.
        assert_eq!(Folder::Documents.dir_name(), "documents");
        assert_eq!(Folder::GuestShared.dir_name(), "guest-shared");
    }
}
