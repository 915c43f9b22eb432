//! Domain logic for the BarberBook booking service.
//!
//! This crate is pure: no I/O, no async, no database types. The api and db
//! crates depend on it; it depends on nothing internal.

pub mod availability;
pub mod catalog;
pub mod error;
pub mod notification;
pub mod session;
pub mod timeofday;
