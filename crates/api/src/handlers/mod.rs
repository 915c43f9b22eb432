pub mod availability;
pub mod catalog;
pub mod sessions;
