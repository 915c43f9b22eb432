//! Route definitions for the `/catalog` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/catalog`.
///
/// ```text
/// GET /services -> list_services
/// GET /staff    -> list_staff
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/services", get(catalog::list_services))
        .route("/staff", get(catalog::list_staff))
}
