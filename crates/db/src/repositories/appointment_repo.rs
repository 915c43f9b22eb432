//! Repository for the `appointments` table (the booking ledger).

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::appointment::{Appointment, NewAppointment};

const APPOINTMENT_COLUMNS: &str = "\
    id, staff_id, service_id, date, start_min, duration_min, \
    client_name, client_phone, notes, deposit_cents, created_at";

/// Error from [`AppointmentRepo::append`].
///
/// `SlotTaken` is the recoverable ledger-contention case: another booking
/// claimed the same (staff, date, start) first. Callers should recompute
/// availability and prompt re-selection.
#[derive(Debug, thiserror::Error)]
pub enum AppendError {
    #[error("Slot is no longer available")]
    SlotTaken,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Read/append access to the booking ledger.
pub struct AppointmentRepo;

impl AppointmentRepo {
    /// Occupied start times (minutes since midnight) for one staff member
    /// on one day. Used once per availability computation.
    pub async fn occupied_starts(
        pool: &PgPool,
        staff_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<i16>, sqlx::Error> {
        sqlx::query_scalar::<_, i16>(
            "SELECT start_min FROM appointments \
             WHERE staff_id = $1 AND date = $2 \
             ORDER BY start_min",
        )
        .bind(staff_id)
        .bind(date)
        .fetch_all(pool)
        .await
    }

    /// Append a confirmed booking.
    ///
    /// The `uq_appointments_staff_date_start` unique constraint makes this
    /// the atomicity boundary for double-booking: no lock is held across
    /// the availability recomputation, so the insert itself must decide the
    /// race. A unique violation maps to [`AppendError::SlotTaken`].
    pub async fn append(
        pool: &PgPool,
        input: &NewAppointment,
    ) -> Result<Appointment, AppendError> {
        let query = format!(
            "INSERT INTO appointments \
             (staff_id, service_id, date, start_min, duration_min, \
              client_name, client_phone, notes, deposit_cents) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {APPOINTMENT_COLUMNS}"
        );
        let result = sqlx::query_as::<_, Appointment>(&query)
            .bind(&input.staff_id)
            .bind(&input.service_id)
            .bind(input.date)
            .bind(input.start_min)
            .bind(input.duration_min)
            .bind(&input.client_name)
            .bind(&input.client_phone)
            .bind(&input.notes)
            .bind(input.deposit_cents)
            .fetch_one(pool)
            .await;

        match result {
            Ok(appointment) => Ok(appointment),
            Err(sqlx::Error::Database(db_err)) if is_slot_conflict(db_err.as_ref()) => {
                tracing::info!(
                    staff_id = %input.staff_id,
                    date = %input.date,
                    start_min = input.start_min,
                    "Lost booking race, slot already taken"
                );
                Err(AppendError::SlotTaken)
            }
            Err(err) => Err(AppendError::Database(err)),
        }
    }
}

/// PostgreSQL unique violation (23505) on the slot constraint.
fn is_slot_conflict(err: &dyn sqlx::error::DatabaseError) -> bool {
    err.code().as_deref() == Some("23505")
        && err.constraint() == Some("uq_appointments_staff_date_start")
}
