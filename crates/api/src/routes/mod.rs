pub mod availability;
pub mod catalog;
pub mod health;
pub mod sessions;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /catalog/services                 list services
/// /catalog/staff                    list staff
///
/// /availability                     bookable start times for a day
///
/// /sessions                         create a booking session
/// /sessions/{id}                    session state
/// /sessions/{id}/select             step 1: choose service + staff
/// /sessions/{id}/slot               step 2: choose date + time
/// /sessions/{id}/contact            step 3: contact details
/// /sessions/{id}/confirm            step 4: charge deposit, book the slot
/// /sessions/{id}/back               go back one step
/// /sessions/{id}/reset              start over
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/catalog", catalog::router())
        .merge(availability::router())
        .nest("/sessions", sessions::router())
}
