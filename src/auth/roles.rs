// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Homevault Contributors

//! Household roles for authorization.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Household roles for authorization.
///
/// ## Role Hierarchy
///
/// - `Owner` - Full access to every folder
/// - `CoResident` - Household member, everything except the owner's documents
/// - `LimitedMember` - Shared folders only
/// - `Guest` - Guest-shared folder only, and only with a live guest token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Full access to every folder
    Owner,
    /// Household member
    CoResident,
    /// Limited household member (shared folders only)
    LimitedMember,
    /// Time-bounded visitor; requires a live guest token on every read
    Guest,
}

impl Role {
    /// Parse a role from its wire string (case-insensitive).
    ///
    /// The role string arrives pre-authenticated from the HTTP layer;
    /// anything unrecognized simply maps to no role at all.
    pub fn parse(s: &str) -> Option<Role> {
        match s.to_lowercase().as_str() {
            "owner" => Some(Role::Owner),
            "co-resident" | "coresident" => Some(Role::CoResident),
            "limited-member" | "limitedmember" => Some(Role::LimitedMember),
            "guest" => Some(Role::Guest),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Owner => write!(f, "owner"),
            Role::CoResident => write!(f, "co-resident"),
            Role::LimitedMember => write!(f, "limited-member"),
            Role::Guest => write!(f, "guest"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Role::parse("owner"), Some(Role::Owner));
        assert_eq!(Role::parse("OWNER"), Some(Role::Owner));
        assert_eq!(Role::parse("Co-Resident"), Some(Role::CoResident));
        assert_eq!(Role::parse("coresident"), Some(Role::CoResident));
        assert_eq!(Role::parse("LIMITED-MEMBER"), Some(Role::LimitedMember));
        assert_eq!(Role::parse("guest"), Some(Role::Guest));
    }

    #[test]
    fn unknown_role_parses_to_none() {
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for role in [
            Role::Owner,
            Role::CoResident,
            Role::LimitedMember,
            Role::Guest,
        ] {
            assert_eq!(Role::parse(&role.to_string()), Some(role));
        }
    }
}
