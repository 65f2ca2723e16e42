//! Command-line and environment configuration for the server binary.

use clap::Parser;
use sheetmark_core::config::resolve_data_root;
use sheetmark_core::{default_log_level, StoragePaths, DATA_ROOT_ENV};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Local HTTP server for the practice-sheet tracker.
#[derive(Debug, Clone, Parser)]
#[command(name = "sheetmark-server", version, about)]
pub struct ServerArgs {
    /// Address to listen on.
    #[arg(long, env = "SHEETMARK_LISTEN", default_value = "127.0.0.1:3000")]
    pub listen: SocketAddr,

    /// Directory holding `user/` and `sheets/` (defaults to `./data`).
    #[arg(long, env = DATA_ROOT_ENV)]
    pub data_root: Option<String>,

    /// One of trace|debug|info|warn|error.
    #[arg(long, env = "SHEETMARK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log directory (defaults to `<data root>/logs`).
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl ServerArgs {
    pub fn storage_paths(&self) -> StoragePaths {
        StoragePaths::from_root(resolve_data_root(self.data_root.as_deref()))
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }

    /// Absolute log directory, resolving relative paths against the working directory.
    pub fn log_dir(&self, paths: &StoragePaths) -> std::io::Result<PathBuf> {
        let dir = self.log_dir.clone().unwrap_or_else(|| paths.log_dir.clone());
        if dir.is_absolute() {
            Ok(dir)
        } else {
            Ok(std::env::current_dir()?.join(dir))
        }
    }
}
