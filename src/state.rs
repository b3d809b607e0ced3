// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Homevault Contributors

use std::sync::Arc;

use crate::auth::GuestTokenStore;
use crate::vault::VaultService;

/// Shared application state handed to every request handler.
///
/// The guest token store carries its own lock; the vault service is
/// read-only after construction apart from filesystem I/O, so plain
/// `Arc` sharing is enough here.
#[derive(Clone)]
pub struct AppState {
    pub vault: Arc<VaultService>,
    pub guest_tokens: Arc<GuestTokenStore>,
}

impl AppState {
    pub fn new(vault: VaultService, guest_tokens: Arc<GuestTokenStore>) -> Self {
        Self {
            vault: Arc::new(vault),
            guest_tokens,
        }
    }
}
