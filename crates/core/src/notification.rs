//! Recap message composition for a confirmed booking.
//!
//! Pure string templating: the delivery channel (WhatsApp deep links in the
//! api layer) is outside this crate. By the time a recap is composed the
//! session has been paid, so every field is fully resolved.

use chrono::NaiveDate;

use crate::timeofday::TimeOfDay;

/// Everything a confirmed booking's recap messages need.
#[derive(Debug, Clone)]
pub struct BookingRecap {
    pub service_name: String,
    pub duration_min: u16,
    pub staff_name: String,
    pub staff_city: String,
    pub date: NaiveDate,
    pub time: TimeOfDay,
    pub client_name: String,
    pub client_phone: String,
    pub notes: String,
    pub deposit_cents: i64,
    pub remainder_cents: i64,
}

/// The two recap payloads: one for the client, one for the shop owner.
#[derive(Debug, Clone)]
pub struct Messages {
    pub client: String,
    pub owner: String,
}

/// Compose both recap messages from a confirmed booking.
pub fn compose(recap: &BookingRecap) -> Messages {
    let first_name = recap
        .client_name
        .split_whitespace()
        .next()
        .unwrap_or(recap.client_name.as_str());

    let client = format!(
        "Hi {first_name}, your booking is confirmed ✂️\n\n\
         Barber: {staff} ({city})\n\
         Service: {service} ({duration} min)\n\
         Date: {date} at {time}\n\
         Deposit received: {deposit} (remaining: {remainder})\n\n\
         No-show policy: the deposit is not refunded for cancellations \
         less than 3h before.\n\
         See you soon!",
        staff = recap.staff_name,
        city = recap.staff_city,
        service = recap.service_name,
        duration = recap.duration_min,
        date = recap.date,
        time = recap.time,
        deposit = format_eur(recap.deposit_cents),
        remainder = format_eur(recap.remainder_cents),
    );

    let notes = if recap.notes.trim().is_empty() {
        "—"
    } else {
        recap.notes.as_str()
    };

    let owner = format!(
        "NEW BOOKING ✅\n\
         Client: {client} ({phone})\n\
         Barber: {staff} - {city}\n\
         Service: {service} ({duration} min)\n\
         Date: {date} at {time}\n\
         Deposit: {deposit} · Total: {total}\n\
         Notes: {notes}",
        client = recap.client_name,
        phone = recap.client_phone,
        staff = recap.staff_name,
        city = recap.staff_city,
        service = recap.service_name,
        duration = recap.duration_min,
        date = recap.date,
        time = recap.time,
        deposit = format_eur(recap.deposit_cents),
        total = format_eur(recap.deposit_cents + recap.remainder_cents),
    );

    Messages { client, owner }
}

/// Format an amount of cents as euros, dropping the fraction when whole.
pub fn format_eur(cents: i64) -> String {
    if cents % 100 == 0 {
        format!("{}€", cents / 100)
    } else {
        format!("{}.{:02}€", cents / 100, cents % 100)
    }
}
