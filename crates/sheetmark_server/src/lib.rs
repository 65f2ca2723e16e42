//! HTTP API over the Sheetmark core.
//!
//! # Responsibility
//! - Map routes onto core services.
//! - Translate core errors into status codes and JSON error bodies.
//!
//! # Invariants
//! - Handlers never panic on bad input; every failure becomes a response.
//! - Map resource reads always answer 200, degrading to an empty map.

pub mod config;
pub mod error;
pub mod routes;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use sheetmark_core::{DocumentStore, FsDocumentStore, SheetLibrary, StoragePaths};
use std::sync::Arc;

pub use config::ServerArgs;

/// Largest accepted backup upload.
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// State shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub sheets: SheetLibrary,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, sheets: SheetLibrary) -> Self {
        Self { store, sheets }
    }

    /// Filesystem-backed state for the standard data layout.
    pub fn from_paths(paths: &StoragePaths) -> Self {
        Self::new(
            Arc::new(FsDocumentStore::new(paths.user_dir.clone())),
            SheetLibrary::new(paths.sheets_dir.clone()),
        )
    }
}

/// Builds the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/resource/:resource",
            get(routes::get_resource).post(routes::post_resource),
        )
        .route(
            "/sheets",
            get(routes::get_sheet).post(routes::sheets_method_not_allowed),
        )
        .route("/sheets/catalog", get(routes::sheet_catalog))
        .route("/sheets/unified", get(routes::unified_sheet))
        .route("/sheets/topics", get(routes::sheet_topics))
        .route("/sheets/stats", get(routes::sheet_stats))
        .route(
            "/backup",
            get(routes::export_backup)
                .post(routes::import_backup)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/health", get(routes::health))
        .with_state(state)
}
