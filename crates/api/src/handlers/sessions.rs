//! Handlers for the `/sessions` resource: the four-step booking flow.
//!
//! Sessions live in memory and wrap the core state machine; every handler
//! locks the session table, applies one transition, and returns the updated
//! session view. Step-gating violations surface as 400s from the machine.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use barberbook_core::error::CoreError;
use barberbook_core::notification::{compose, BookingRecap};
use barberbook_core::session::{BookingSession, Contact, Step};
use barberbook_core::timeofday::TimeOfDay;
use barberbook_db::models::appointment::{Appointment, NewAppointment};
use barberbook_db::repositories::AppointmentRepo;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::availability::slots_for;
use crate::payments;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::whatsapp::wa_link;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body for `POST /sessions/{id}/select`.
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub service_id: String,
    pub staff_id: String,
}

/// Body for `POST /sessions/{id}/slot`.
#[derive(Debug, Deserialize)]
pub struct SlotRequest {
    pub date: NaiveDate,
    pub time: TimeOfDay,
}

/// Body for `POST /sessions/{id}/contact`.
///
/// Lengths are checked here as a request-level affordance; the state machine
/// itself only requires name and phone to be non-empty.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 120))]
    pub full_name: String,
    #[validate(length(min = 5, max = 32))]
    pub phone: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub notes: String,
}

/// Serializable snapshot of a booking session.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub step: Step,
    pub service_id: String,
    pub staff_id: String,
    pub date: Option<NaiveDate>,
    pub time: Option<TimeOfDay>,
    pub contact: Option<Contact>,
    pub paid: bool,
}

impl SessionView {
    fn of(id: Uuid, session: &BookingSession) -> Self {
        Self {
            id,
            step: session.step(),
            service_id: session.service_id().to_string(),
            staff_id: session.staff_id().to_string(),
            date: session.date(),
            time: session.slot(),
            contact: session.contact().cloned(),
            paid: session.paid(),
        }
    }
}

/// The two recap payloads for a confirmed booking.
#[derive(Debug, Serialize)]
pub struct RecapMessages {
    pub client: String,
    pub owner: String,
}

/// Click-to-send WhatsApp deep links for the recap messages.
#[derive(Debug, Serialize)]
pub struct RecapLinks {
    pub client: String,
    pub owner: String,
}

/// Response payload for `POST /sessions/{id}/confirm`.
#[derive(Debug, Serialize)]
pub struct ConfirmResponse {
    pub session: SessionView,
    pub appointment: Appointment,
    pub messages: RecapMessages,
    pub links: RecapLinks,
}

// ---------------------------------------------------------------------------
// Session lifecycle
// ---------------------------------------------------------------------------

/// POST /api/v1/sessions
///
/// Create a booking session with the catalog's default selection.
pub async fn create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<DataResponse<SessionView>>) {
    let session = BookingSession::new(
        &state.catalog.default_service().id,
        &state.catalog.default_staff().id,
    );
    let id = Uuid::new_v4();
    let view = SessionView::of(id, &session);

    state.sessions.write().await.insert(id, session);
    tracing::debug!(session_id = %id, "Booking session created");

    (StatusCode::CREATED, Json(DataResponse { data: view }))
}

/// GET /api/v1/sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<SessionView>>> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or_else(|| session_not_found(id))?;

    Ok(Json(DataResponse {
        data: SessionView::of(id, session),
    }))
}

/// POST /api/v1/sessions/{id}/select
///
/// Step 1: choose service and staff, then move to slot selection.
pub async fn select_service_staff(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SelectRequest>,
) -> AppResult<Json<DataResponse<SessionView>>> {
    if state.catalog.service(&body.service_id).is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Service",
            id: body.service_id,
        }));
    }
    if state.catalog.staff_member(&body.staff_id).is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Staff",
            id: body.staff_id,
        }));
    }

    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;

    session.select(&body.service_id, &body.staff_id)?;
    session.advance_to_slot_select()?;

    Ok(Json(DataResponse {
        data: SessionView::of(id, session),
    }))
}

/// POST /api/v1/sessions/{id}/slot
///
/// Step 2: choose a date and start time. The time must be one of the starts
/// the availability engine currently offers; anything else is answered with
/// 409 so the client re-fetches availability and re-selects.
pub async fn select_slot(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SlotRequest>,
) -> AppResult<Json<DataResponse<SessionView>>> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;

    // Setting the date first also clears any previously selected slot.
    session.set_date(body.date)?;

    let offered = slots_for(
        &state,
        session.staff_id(),
        session.service_id(),
        body.date,
    )
    .await?;
    if !offered.contains(&body.time) {
        return Err(AppError::SlotTaken);
    }

    session.set_slot(body.time)?;
    session.advance_to_contact_info()?;

    Ok(Json(DataResponse {
        data: SessionView::of(id, session),
    }))
}

/// POST /api/v1/sessions/{id}/contact
///
/// Step 3: contact details, then move to payment.
pub async fn set_contact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ContactRequest>,
) -> AppResult<Json<DataResponse<SessionView>>> {
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;

    session.set_contact(Contact {
        full_name: body.full_name,
        phone: body.phone,
        notes: body.notes,
    })?;
    session.advance_to_payment()?;

    Ok(Json(DataResponse {
        data: SessionView::of(id, session),
    }))
}

/// POST /api/v1/sessions/{id}/confirm
///
/// Step 4: charge the deposit, append the booking to the ledger, and
/// compose the recap messages.
///
/// The availability recheck gives the common lost-race case a clean 409
/// before touching the ledger; the table's unique constraint remains the
/// authoritative guard when two confirmations race between recheck and
/// insert.
pub async fn confirm_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<ConfirmResponse>>> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;

    let (service_id, staff_id, date, slot, contact) = match &*session {
        BookingSession::Payment {
            service_id,
            staff_id,
            date,
            slot,
            contact,
            paid,
        } => {
            if *paid {
                return Err(AppError::Core(CoreError::Conflict(
                    "Booking is already confirmed".into(),
                )));
            }
            (
                service_id.clone(),
                staff_id.clone(),
                *date,
                *slot,
                contact.clone(),
            )
        }
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "Confirmation is only available in the payment step".into(),
            )))
        }
    };

    // Selections were validated against the catalog on entry; a miss here
    // means the catalog changed under a live session.
    let service = state
        .catalog
        .service(&service_id)
        .ok_or_else(|| AppError::InternalError(format!("Service '{service_id}' vanished")))?;
    let staff = state
        .catalog
        .staff_member(&staff_id)
        .ok_or_else(|| AppError::InternalError(format!("Staff '{staff_id}' vanished")))?;

    payments::charge(service.deposit_cents)?;

    let offered = slots_for(&state, &staff_id, &service_id, date).await?;
    if !offered.contains(&slot) {
        return Err(AppError::SlotTaken);
    }

    let appointment = AppointmentRepo::append(
        &state.pool,
        &NewAppointment {
            staff_id: staff_id.clone(),
            service_id: service_id.clone(),
            date,
            start_min: slot.minutes() as i16,
            duration_min: service.duration_min as i16,
            client_name: contact.full_name.clone(),
            client_phone: contact.phone.clone(),
            notes: contact.notes.clone(),
            deposit_cents: service.deposit_cents,
        },
    )
    .await?;

    session.confirm_payment()?;
    tracing::info!(
        session_id = %id,
        appointment_id = appointment.id,
        staff_id = %staff_id,
        date = %date,
        start = %slot,
        "Booking confirmed"
    );

    let recap = BookingRecap {
        service_name: service.name.clone(),
        duration_min: service.duration_min,
        staff_name: staff.name.clone(),
        staff_city: staff.city.clone(),
        date,
        time: slot,
        client_name: contact.full_name.clone(),
        client_phone: contact.phone.clone(),
        notes: contact.notes.clone(),
        deposit_cents: service.deposit_cents,
        remainder_cents: service.price_cents - service.deposit_cents,
    };
    let messages = compose(&recap);

    let links = RecapLinks {
        client: wa_link(&contact.phone, &messages.client),
        owner: wa_link(&state.config.owner_whatsapp, &messages.owner),
    };

    Ok(Json(DataResponse {
        data: ConfirmResponse {
            session: SessionView::of(id, session),
            appointment,
            messages: RecapMessages {
                client: messages.client,
                owner: messages.owner,
            },
            links,
        },
    }))
}

/// POST /api/v1/sessions/{id}/back
///
/// Go back one step, keeping already-collected data.
pub async fn go_back(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<SessionView>>> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;

    session.back()?;

    Ok(Json(DataResponse {
        data: SessionView::of(id, session),
    }))
}

/// POST /api/v1/sessions/{id}/reset
///
/// Start over with the catalog defaults ("new booking").
pub async fn reset_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<SessionView>>> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;

    session.reset(
        &state.catalog.default_service().id,
        &state.catalog.default_staff().id,
    );

    Ok(Json(DataResponse {
        data: SessionView::of(id, session),
    }))
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Session",
        id: id.to_string(),
    })
}
