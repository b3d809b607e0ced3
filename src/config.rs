// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Homevault Contributors

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `STORAGE_ROOT` | Root directory of the encrypted storage tree | `./storage` |
//! | `KEY_FILE` | Path to the binary key file | `./homevault.key` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `5000` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Environment variable naming the storage root directory.
pub const STORAGE_ROOT_ENV: &str = "STORAGE_ROOT";

/// Environment variable naming the key file path.
///
/// The key file must live outside the storage tree; the bulk-encryption
/// pass would otherwise seal the key under itself.
pub const KEY_FILE_ENV: &str = "KEY_FILE";

/// Runtime configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the encrypted storage tree.
    pub storage_root: PathBuf,
    /// Location of the process key file.
    pub key_file: PathBuf,
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Load configuration from the environment, applying defaults for
    /// anything unset.
    pub fn from_env() -> Self {
        let storage_root =
            PathBuf::from(env::var(STORAGE_ROOT_ENV).unwrap_or_else(|_| "./storage".to_string()));
        let key_file =
            PathBuf::from(env::var(KEY_FILE_ENV).unwrap_or_else(|_| "./homevault.key".to_string()));

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .unwrap_or(5000);
        let bind_addr = format!("{host}:{port}")
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 5000)));

        Self {
            storage_root,
            key_file,
            bind_addr,
        }
    }
}
