//! Booking-ledger entity models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `appointments` table: one confirmed booking.
///
/// `start_min` and `duration_min` are minutes since midnight / minutes of
/// service, matching the core `TimeOfDay` representation. Each row stores
/// the duration that was actually booked, even though the availability
/// engine's conflict check reuses the queried duration (see DESIGN.md).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Appointment {
    pub id: i64,
    pub staff_id: String,
    pub service_id: String,
    pub date: NaiveDate,
    pub start_min: i16,
    pub duration_min: i16,
    pub client_name: String,
    pub client_phone: String,
    pub notes: String,
    pub deposit_cents: i64,
    pub created_at: DateTime<Utc>,
}

/// DTO for appending a confirmed booking to the ledger.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub staff_id: String,
    pub service_id: String,
    pub date: NaiveDate,
    pub start_min: i16,
    pub duration_min: i16,
    pub client_name: String,
    pub client_phone: String,
    pub notes: String,
    pub deposit_cents: i64,
}
