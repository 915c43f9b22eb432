//! Handlers for the `/availability` resource.

use axum::extract::{Query, State};
use axum::Json;
use barberbook_core::availability::compute_slots;
use barberbook_core::error::CoreError;
use barberbook_core::timeofday::TimeOfDay;
use barberbook_db::repositories::AppointmentRepo;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /availability`.
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub staff_id: String,
    pub service_id: String,
    /// Calendar date, `YYYY-MM-DD`. Past dates are accepted; rejecting them
    /// is a UI affordance, not a rule of the engine.
    pub date: NaiveDate,
}

/// Response payload for `GET /availability`.
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub staff_id: String,
    pub service_id: String,
    pub date: NaiveDate,
    /// Bookable start times, ascending. Empty is a normal answer
    /// ("no slots this day"), not an error.
    pub slots: Vec<TimeOfDay>,
}

/// GET /api/v1/availability
///
/// Compute the bookable start times for one staff member, service, and day.
pub async fn get_availability(
    State(state): State<AppState>,
    Query(params): Query<AvailabilityQuery>,
) -> AppResult<Json<DataResponse<AvailabilityResponse>>> {
    let slots = slots_for(&state, &params.staff_id, &params.service_id, params.date).await?;

    Ok(Json(DataResponse {
        data: AvailabilityResponse {
            staff_id: params.staff_id,
            service_id: params.service_id,
            date: params.date,
            slots,
        },
    }))
}

/// Resolve catalog entries, read the ledger, and run the engine.
///
/// Shared between the availability endpoint and the booking-confirmation
/// recheck.
pub(crate) async fn slots_for(
    state: &AppState,
    staff_id: &str,
    service_id: &str,
    date: NaiveDate,
) -> AppResult<Vec<TimeOfDay>> {
    let service = state
        .catalog
        .service(service_id)
        .ok_or_else(|| CoreError::NotFound {
            entity: "Service",
            id: service_id.to_string(),
        })?;
    let staff = state
        .catalog
        .staff_member(staff_id)
        .ok_or_else(|| CoreError::NotFound {
            entity: "Staff",
            id: staff_id.to_string(),
        })?;

    let occupied_min = AppointmentRepo::occupied_starts(&state.pool, staff_id, date).await?;
    let occupied = occupied_min
        .into_iter()
        .map(time_from_min)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(compute_slots(date, staff, service.duration_min, &occupied))
}

/// Convert a ledger `start_min` column value back into a [`TimeOfDay`].
///
/// The table CHECK constraint keeps values in `0..1440`; anything else means
/// the ledger was tampered with and is an internal error.
fn time_from_min(min: i16) -> Result<TimeOfDay, AppError> {
    let min = u16::try_from(min)
        .map_err(|_| AppError::InternalError(format!("Negative start_min {min} in ledger")))?;
    TimeOfDay::new(min)
        .map_err(|_| AppError::InternalError(format!("Out-of-day start_min {min} in ledger")))
}
