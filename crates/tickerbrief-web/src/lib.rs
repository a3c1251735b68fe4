//! HTTP surface for `tickerbrief-core`.
//!
//! | Route | Description |
//! |-------|-------------|
//! | `GET /api/stock/{ticker}?range=` | Stock summary plus generated analysis |
//! | `GET /` and other paths | Static files, `index.html` as fallback |

pub mod error;
pub mod routes;
pub mod state;

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::AppState;

/// Full application router. Static files are served only when a directory is given.
pub fn app(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = routes::stock_router().with_state(Arc::new(state));

    let router = match static_dir {
        Some(dir) => {
            let index_html = dir.join("index.html");
            let serve = ServeDir::new(dir).not_found_service(ServeFile::new(index_html));
            router.fallback_service(serve)
        }
        None => router,
    };

    router.layer(TraceLayer::new_for_http())
}
