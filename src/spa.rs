//! Static file responder with single-page-application fallback routing
//!
//! Files under the configured root are served as-is. Any path whose file does
//! not exist is answered with the fallback document (status 200) so client-side
//! routes such as `/dashboard/settings` reach the app shell.

use axum::http::{header, HeaderValue};
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;

pub const CACHE_CONTROL_VALUE: &str = "no-store, no-cache, must-revalidate";
pub const ALLOW_ORIGIN_VALUE: &str = "*";

pub fn create_router(config: &ServerConfig) -> Router {
    let fallback_file = config.fallback_file();
    if !fallback_file.is_file() {
        warn!(
            "Fallback document {:?} does not exist; unknown paths will return 404",
            fallback_file
        );
    }

    info!(
        "Serving {:?} with fallback {}",
        config.root_dir, config.fallback_path
    );

    let files = ServeDir::new(&config.root_dir).fallback(ServeFile::new(fallback_file));

    // The root path never falls back; it is served (or 404s) as-is
    Router::new()
        .route_service("/", ServeDir::new(&config.root_dir))
        .fallback_service(files)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_VALUE),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN_VALUE),
        ))
}
