// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Homevault Contributors

//! In-memory registry of guest tokens and their expiry instants.
//!
//! A token is valid iff it is present in the store and the current time
//! is at or before its expiry. Expired entries are dropped lazily on the
//! first validation attempt after expiry, and eagerly whenever the live
//! set is enumerated. Nothing survives a process restart.
//!
//! The store is the only shared mutable state in the core; a single
//! `Mutex` serializes all access (operations are O(1)-ish and contention
//! is negligible). It is constructed once at startup and handed to
//! request handlers by reference, never reached through a global.
//!
//! Every public operation has a `*_at` twin taking an explicit `now`, so
//! tests drive the clock deterministically.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Default lifetime when the caller supplies no (or a non-positive)
/// duration: 60 minutes.
pub const DEFAULT_TOKEN_MINUTES: i64 = 60;

/// A freshly issued guest token and its absolute expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Opaque bearer token (UUID v4 - 122 bits of entropy).
    pub token: String,
    /// Instant after which the token is dead.
    pub expires_at: DateTime<Utc>,
}

/// Process-wide guest token registry.
#[derive(Debug, Default)]
pub struct GuestTokenStore {
    tokens: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl GuestTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new token valid for `duration_minutes` from now.
    ///
    /// Missing or non-positive durations fall back to
    /// [`DEFAULT_TOKEN_MINUTES`] rather than failing.
    pub fn issue(&self, duration_minutes: Option<i64>) -> IssuedToken {
        self.issue_at(Utc::now(), duration_minutes)
    }

    /// Is `token` present and unexpired? Lazily evicts an expired entry.
    pub fn is_valid(&self, token: &str) -> bool {
        self.is_valid_at(Utc::now(), token)
    }

    /// All live tokens, after sweeping out every expired entry.
    pub fn list_active(&self) -> BTreeMap<String, DateTime<Utc>> {
        self.list_active_at(Utc::now())
    }

    /// Clock-injected form of [`issue`](Self::issue).
    pub fn issue_at(&self, now: DateTime<Utc>, duration_minutes: Option<i64>) -> IssuedToken {
        let minutes = match duration_minutes {
            Some(m) if m > 0 => m,
            _ => DEFAULT_TOKEN_MINUTES,
        };
        let token = Uuid::new_v4().to_string();
        let expires_at = now + Duration::minutes(minutes);

        self.tokens
            .lock()
            .expect("guest token lock poisoned")
            .insert(token.clone(), expires_at);

        IssuedToken { token, expires_at }
    }

    /// Clock-injected form of [`is_valid`](Self::is_valid).
    pub fn is_valid_at(&self, now: DateTime<Utc>, token: &str) -> bool {
        let mut tokens = self.tokens.lock().expect("guest token lock poisoned");
        match tokens.get(token) {
            Some(expires_at) if now <= *expires_at => true,
            Some(_) => {
                // Dead entry; drop it on the way out.
                tokens.remove(token);
                false
            }
            None => false,
        }
    }

    /// Clock-injected form of [`list_active`](Self::list_active).
    pub fn list_active_at(&self, now: DateTime<Utc>) -> BTreeMap<String, DateTime<Utc>> {
        let mut tokens = self.tokens.lock().expect("guest token lock poisoned");
        tokens.retain(|_, expires_at| now <= *expires_at);
        tokens
            .iter()
            .map(|(token, expires_at)| (token.clone(), *expires_at))
            .collect()
    }
}
