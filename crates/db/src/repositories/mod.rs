pub mod appointment_repo;

pub use appointment_repo::{AppendError, AppointmentRepo};
