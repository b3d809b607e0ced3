// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Homevault Contributors

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use homevault::api::router;
use homevault::auth::GuestTokenStore;
use homevault::config::Config;
use homevault::state::AppState;
use homevault::vault::{KeyManager, StoragePaths, VaultService};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env();
    tracing::info!(
        storage_root = %config.storage_root.display(),
        bind_addr = %config.bind_addr,
        "starting homevault"
    );

    // No key, no service: serving without key material would either fail
    // every read or, worse, invite regenerating a key that orphans the
    // existing encrypted tree.
    let keys = match KeyManager::load_or_create(&config.key_file) {
        Ok(keys) => keys,
        Err(e) => {
            tracing::error!(error = %e, "refusing to start without key material");
            return ExitCode::FAILURE;
        }
    };

    let guest_tokens = Arc::new(GuestTokenStore::new());
    let vault = match VaultService::new(
        keys,
        StoragePaths::new(&config.storage_root),
        Arc::clone(&guest_tokens),
    ) {
        Ok(vault) => vault,
        Err(e) => {
            tracing::error!(error = %e, "failed to initialize storage tree");
            return ExitCode::FAILURE;
        }
    };

    // Seal any plaintext left in the tree before the listener binds, so
    // the pass never races a concurrent read.
    match vault.bulk_encrypt() {
        Ok(report) => tracing::info!(
            encrypted = report.encrypted,
            already_encrypted = report.already_encrypted,
            "storage tree sealed"
        ),
        Err(e) => {
            tracing::error!(error = %e, "bulk encryption failed");
            return ExitCode::FAILURE;
        }
    }

    let state = AppState::new(vault, guest_tokens);
    let app = router(state);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, addr = %config.bind_addr, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(addr = %config.bind_addr, "homevault listening (docs at /docs)");

    let serve = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal());
    if let Err(e) = serve.await {
        tracing::error!(error = %e, "server failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
