//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Home page (catalog grid, waitlist form, FAQ)
//! GET  /set/{slug}       - Product detail page
//! POST /waitlist         - Waitlist signup (HTMX fragment, rate limited)
//! GET  /sitemap.xml      - Sitemap built from the cached catalog
//! GET  /health           - Liveness check
//! GET  /health/ready     - Readiness check (verifies database)
//! ```

pub mod home;
pub mod products;
pub mod sitemap;
pub mod waitlist;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::filters;
use crate::middleware::waitlist_rate_limiter;
use crate::state::AppState;

/// Not-found page template.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate;

/// Fallback handler for unknown paths.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, NotFoundTemplate)
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    // The waitlist POST is the only unauthenticated write; it gets its
    // own router so the rate limiter doesn't wrap the read-only pages.
    let waitlist = Router::new()
        .route("/waitlist", post(waitlist::subscribe))
        .route_layer(waitlist_rate_limiter());

    Router::new()
        .route("/", get(home::home))
        .route("/set/{slug}", get(products::show))
        .route("/sitemap.xml", get(sitemap::sitemap))
        .merge(waitlist)
        .fallback(not_found)
}
