//! Route definitions for the `/availability` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::availability;
use crate::state::AppState;

/// Routes mounted directly under `/api/v1`.
///
/// ```text
/// GET /availability?staff_id&service_id&date -> get_availability
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/availability", get(availability::get_availability))
}
