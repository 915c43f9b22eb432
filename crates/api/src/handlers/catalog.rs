//! Handlers for the `/catalog` resource.
//!
//! The catalog is static configuration loaded at startup; these endpoints
//! only expose it for the selection step of the booking flow.

use axum::extract::State;
use axum::Json;
use barberbook_core::catalog::{Service, Staff};

use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/catalog/services
pub async fn list_services(State(state): State<AppState>) -> Json<DataResponse<Vec<Service>>> {
    Json(DataResponse {
        data: state.catalog.services.clone(),
    })
}

/// GET /api/v1/catalog/staff
pub async fn list_staff(State(state): State<AppState>) -> Json<DataResponse<Vec<Staff>>> {
    Json(DataResponse {
        data: state.catalog.staff.clone(),
    })
}
