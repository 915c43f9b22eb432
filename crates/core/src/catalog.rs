//! Static service/staff catalog, loaded once at startup from a JSON file.
//!
//! The catalog is pure data. Malformed configuration (empty catalog,
//! duplicate ids, inverted windows or breaks) is detected by
//! [`Catalog::validate`] at load time and is fatal; the availability engine
//! never tolerates it at query time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::timeofday::TimeOfDay;

/// A bookable service: fixed duration, price, and up-front deposit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub duration_min: u16,
    pub price_cents: i64,
    pub deposit_cents: i64,
}

/// A working-hours window for one weekday.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DayWindow {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

/// A break interval within a working day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BreakInterval {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

/// A staff member with per-weekday working hours and daily breaks.
///
/// `working_hours` is keyed by weekday number, 0 = Sunday through
/// 6 = Saturday. A weekday absent from the map means the staff member does
/// not work that day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    pub id: String,
    pub name: String,
    pub city: String,
    pub working_hours: BTreeMap<u8, DayWindow>,
    #[serde(default)]
    pub breaks: Vec<BreakInterval>,
}

/// The full service/staff catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub services: Vec<Service>,
    pub staff: Vec<Staff>,
}

impl Catalog {
    /// Parse a catalog from its JSON config representation and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let catalog: Catalog = serde_json::from_str(json)
            .map_err(|e| CoreError::Validation(format!("Malformed catalog JSON: {e}")))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Validate catalog invariants. Runs at load time; any failure is a
    /// configuration error and fatal to startup.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.services.is_empty() {
            return Err(CoreError::Validation("Catalog has no services".into()));
        }
        if self.staff.is_empty() {
            return Err(CoreError::Validation("Catalog has no staff".into()));
        }

        let mut service_ids = std::collections::HashSet::new();
        for service in &self.services {
            if !service_ids.insert(service.id.as_str()) {
                return Err(CoreError::Validation(format!(
                    "Duplicate service id '{}'",
                    service.id
                )));
            }
            if service.duration_min == 0 {
                return Err(CoreError::Validation(format!(
                    "Service '{}' has zero duration",
                    service.id
                )));
            }
            if service.price_cents < 0 || service.deposit_cents < 0 {
                return Err(CoreError::Validation(format!(
                    "Service '{}' has a negative amount",
                    service.id
                )));
            }
            if service.deposit_cents > service.price_cents {
                return Err(CoreError::Validation(format!(
                    "Service '{}' deposit exceeds its price",
                    service.id
                )));
            }
        }

        let mut staff_ids = std::collections::HashSet::new();
        for staff in &self.staff {
            if !staff_ids.insert(staff.id.as_str()) {
                return Err(CoreError::Validation(format!(
                    "Duplicate staff id '{}'",
                    staff.id
                )));
            }
            for (&weekday, window) in &staff.working_hours {
                if weekday > 6 {
                    return Err(CoreError::Validation(format!(
                        "Staff '{}' has an invalid weekday {weekday} (expected 0-6)",
                        staff.id
                    )));
                }
                if window.start >= window.end {
                    return Err(CoreError::Validation(format!(
                        "Staff '{}' weekday {weekday} window starts at or after its end",
                        staff.id
                    )));
                }
            }
            for brk in &staff.breaks {
                if brk.start >= brk.end {
                    return Err(CoreError::Validation(format!(
                        "Staff '{}' has a break starting at or after its end",
                        staff.id
                    )));
                }
            }
        }

        Ok(())
    }

    /// Look up a service by id.
    pub fn service(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    /// Look up a staff member by id.
    pub fn staff_member(&self, id: &str) -> Option<&Staff> {
        self.staff.iter().find(|s| s.id == id)
    }

    /// The default service for a fresh booking session (first in config).
    ///
    /// Infallible after [`Catalog::validate`], which rejects empty catalogs.
    pub fn default_service(&self) -> &Service {
        &self.services[0]
    }

    /// The default staff member for a fresh booking session (first in config).
    pub fn default_staff(&self) -> &Staff {
        &self.staff[0]
    }
}
