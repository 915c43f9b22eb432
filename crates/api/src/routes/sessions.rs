//! Route definitions for the `/sessions` resource (the booking flow).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::sessions;
use crate::state::AppState;

/// Routes mounted at `/sessions`.
///
/// ```text
/// POST /              -> create_session
/// GET  /{id}          -> get_session
/// POST /{id}/select   -> select_service_staff
/// POST /{id}/slot     -> select_slot
/// POST /{id}/contact  -> set_contact
/// POST /{id}/confirm  -> confirm_booking
/// POST /{id}/back     -> go_back
/// POST /{id}/reset    -> reset_session
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(sessions::create_session))
        .route("/{id}", get(sessions::get_session))
        .route("/{id}/select", post(sessions::select_service_staff))
        .route("/{id}/slot", post(sessions::select_slot))
        .route("/{id}/contact", post(sessions::set_contact))
        .route("/{id}/confirm", post(sessions::confirm_booking))
        .route("/{id}/back", post(sessions::go_back))
        .route("/{id}/reset", post(sessions::reset_session))
}
