//! Deposit payment stub.
//!
//! The contract the booking flow depends on: `charge` either succeeds or
//! returns an error, and the session stays unconfirmed on any non-success.
//! A real deployment would call an external payment processor here and
//! block booking confirmation on its result.

/// Payment failure, surfaced to the client as 402.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Payment was declined: {0}")]
    Declined(String),
}

/// Charge the booking deposit. The stub always succeeds.
pub fn charge(amount_cents: i64) -> Result<(), PaymentError> {
    tracing::info!(amount_cents, "Deposit charged (simulated)");
    Ok(())
}
