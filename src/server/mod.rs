//! HTTP server
//!
//! This module translates between HTTP and the HTTP-agnostic API layer.
//!
//! - `router` - method/path dispatch, query and body parsing
//! - `cors` - cross-origin policy
//! - `tiny_http` - socket binding, worker pool and response conversion

pub mod cors;
pub mod router;
pub mod tiny_http;

use std::sync::Arc;

use crate::storage::TaskStore;

pub use self::cors::CorsPolicy;
pub use self::router::{BASE_PATH, Reply, route};
pub use self::tiny_http::{bind, handle_request, serve};

/// Shared state handed to every request worker
#[derive(Debug, Clone)]
pub struct AppState {
    /// The task store
    pub store: Arc<dyn TaskStore>,
    /// Cross-origin policy
    pub cors: CorsPolicy,
}

impl AppState {
    /// Create state from a store and a CORS policy
    #[must_use]
    pub const fn new(store: Arc<dyn TaskStore>, cors: CorsPolicy) -> Self {
        Self { store, cors }
    }
}
