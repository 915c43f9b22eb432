//! The four-step booking flow as an explicit state machine.
//!
//! Service/staff selection -> slot selection -> contact info -> payment.
//! Forward transitions are gated on the completeness of the prior step and
//! never skip a step; backward transitions are always permitted. Each state
//! carries only the fields that are valid in it, so a session can never hold
//! e.g. a confirmed payment without a slot.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::timeofday::TimeOfDay;

/// Client contact details collected in the third step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    pub full_name: String,
    pub phone: String,
    pub notes: String,
}

/// Which step of the flow a session is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    ServiceSelect,
    SlotSelect,
    ContactInfo,
    Payment,
}

/// A booking session, owned by exactly one user flow.
#[derive(Debug, Clone)]
pub enum BookingSession {
    /// Step 1: choosing a service and staff member.
    ServiceSelect { service_id: String, staff_id: String },
    /// Step 2: choosing a date and a start time from computed availability.
    SlotSelect {
        service_id: String,
        staff_id: String,
        date: Option<NaiveDate>,
        slot: Option<TimeOfDay>,
    },
    /// Step 3: collecting contact details.
    ContactInfo {
        service_id: String,
        staff_id: String,
        date: NaiveDate,
        slot: TimeOfDay,
        contact: Contact,
    },
    /// Step 4: deposit payment and confirmation.
    Payment {
        service_id: String,
        staff_id: String,
        date: NaiveDate,
        slot: TimeOfDay,
        contact: Contact,
        paid: bool,
    },
}

impl BookingSession {
    /// Start a fresh session with the catalog's default selection.
    pub fn new(default_service_id: &str, default_staff_id: &str) -> Self {
        Self::ServiceSelect {
            service_id: default_service_id.to_string(),
            staff_id: default_staff_id.to_string(),
        }
    }

    /// Current step, for display and serialization.
    pub fn step(&self) -> Step {
        match self {
            Self::ServiceSelect { .. } => Step::ServiceSelect,
            Self::SlotSelect { .. } => Step::SlotSelect,
            Self::ContactInfo { .. } => Step::ContactInfo,
            Self::Payment { .. } => Step::Payment,
        }
    }

    pub fn service_id(&self) -> &str {
        match self {
            Self::ServiceSelect { service_id, .. }
            | Self::SlotSelect { service_id, .. }
            | Self::ContactInfo { service_id, .. }
            | Self::Payment { service_id, .. } => service_id,
        }
    }

    pub fn staff_id(&self) -> &str {
        match self {
            Self::ServiceSelect { staff_id, .. }
            | Self::SlotSelect { staff_id, .. }
            | Self::ContactInfo { staff_id, .. }
            | Self::Payment { staff_id, .. } => staff_id,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::ServiceSelect { .. } => None,
            Self::SlotSelect { date, .. } => *date,
            Self::ContactInfo { date, .. } | Self::Payment { date, .. } => Some(*date),
        }
    }

    pub fn slot(&self) -> Option<TimeOfDay> {
        match self {
            Self::ServiceSelect { .. } => None,
            Self::SlotSelect { slot, .. } => *slot,
            Self::ContactInfo { slot, .. } | Self::Payment { slot, .. } => Some(*slot),
        }
    }

    pub fn contact(&self) -> Option<&Contact> {
        match self {
            Self::ContactInfo { contact, .. } | Self::Payment { contact, .. } => Some(contact),
            _ => None,
        }
    }

    pub fn paid(&self) -> bool {
        matches!(self, Self::Payment { paid: true, .. })
    }

    /// Step 1: replace the selected service and staff.
    pub fn select(&mut self, service_id: &str, staff_id: &str) -> Result<(), CoreError> {
        if service_id.is_empty() || staff_id.is_empty() {
            return Err(CoreError::Validation(
                "Service and staff selection must not be empty".into(),
            ));
        }
        match self {
            Self::ServiceSelect { .. } => {
                *self = Self::ServiceSelect {
                    service_id: service_id.to_string(),
                    staff_id: staff_id.to_string(),
                };
                Ok(())
            }
            _ => Err(self.wrong_step(Step::ServiceSelect)),
        }
    }

    /// Step 1 -> step 2. Requires a non-empty service and staff selection.
    pub fn advance_to_slot_select(&mut self) -> Result<(), CoreError> {
        match self {
            Self::ServiceSelect {
                service_id,
                staff_id,
            } => {
                if service_id.is_empty() || staff_id.is_empty() {
                    return Err(CoreError::Validation(
                        "Select a service and a staff member first".into(),
                    ));
                }
                *self = Self::SlotSelect {
                    service_id: std::mem::take(service_id),
                    staff_id: std::mem::take(staff_id),
                    date: None,
                    slot: None,
                };
                Ok(())
            }
            _ => Err(self.wrong_step(Step::ServiceSelect)),
        }
    }

    /// Step 2: pick a date. Clears any previously selected slot, since
    /// availability must be re-derived for the new date.
    pub fn set_date(&mut self, new_date: NaiveDate) -> Result<(), CoreError> {
        match self {
            Self::SlotSelect { date, slot, .. } => {
                *date = Some(new_date);
                *slot = None;
                Ok(())
            }
            _ => Err(self.wrong_step(Step::SlotSelect)),
        }
    }

    /// Step 2: switch staff without going back to step 1. Clears the slot
    /// for the same reason as a date change.
    pub fn set_staff(&mut self, new_staff_id: &str) -> Result<(), CoreError> {
        if new_staff_id.is_empty() {
            return Err(CoreError::Validation("Staff selection must not be empty".into()));
        }
        match self {
            Self::SlotSelect { staff_id, slot, .. } => {
                *staff_id = new_staff_id.to_string();
                *slot = None;
                Ok(())
            }
            _ => Err(self.wrong_step(Step::SlotSelect)),
        }
    }

    /// Step 2: pick a start time. Requires a date to already be chosen.
    ///
    /// The caller is responsible for offering only times produced by the
    /// availability engine; the machine itself does not recompute them.
    pub fn set_slot(&mut self, time: TimeOfDay) -> Result<(), CoreError> {
        match self {
            Self::SlotSelect { date: None, .. } => {
                Err(CoreError::Validation("Pick a date before a time".into()))
            }
            Self::SlotSelect { slot, .. } => {
                *slot = Some(time);
                Ok(())
            }
            _ => Err(self.wrong_step(Step::SlotSelect)),
        }
    }

    /// Step 2 -> step 3. Requires both a date and a slot.
    pub fn advance_to_contact_info(&mut self) -> Result<(), CoreError> {
        match self {
            Self::SlotSelect {
                service_id,
                staff_id,
                date: Some(date),
                slot: Some(slot),
            } => {
                *self = Self::ContactInfo {
                    service_id: std::mem::take(service_id),
                    staff_id: std::mem::take(staff_id),
                    date: *date,
                    slot: *slot,
                    contact: Contact::default(),
                };
                Ok(())
            }
            Self::SlotSelect { .. } => Err(CoreError::Validation(
                "Pick a date and a time before continuing".into(),
            )),
            _ => Err(self.wrong_step(Step::SlotSelect)),
        }
    }

    /// Step 3: fill in contact details.
    pub fn set_contact(&mut self, new_contact: Contact) -> Result<(), CoreError> {
        match self {
            Self::ContactInfo { contact, .. } => {
                *contact = new_contact;
                Ok(())
            }
            _ => Err(self.wrong_step(Step::ContactInfo)),
        }
    }

    /// Step 3 -> step 4. Requires a non-empty full name and phone. Phone
    /// format is a UI affordance, not checked here.
    pub fn advance_to_payment(&mut self) -> Result<(), CoreError> {
        match self {
            Self::ContactInfo {
                service_id,
                staff_id,
                date,
                slot,
                contact,
            } => {
                if contact.full_name.trim().is_empty() || contact.phone.trim().is_empty() {
                    return Err(CoreError::Validation(
                        "Full name and phone are required before payment".into(),
                    ));
                }
                *self = Self::Payment {
                    service_id: std::mem::take(service_id),
                    staff_id: std::mem::take(staff_id),
                    date: *date,
                    slot: *slot,
                    contact: std::mem::take(contact),
                    paid: false,
                };
                Ok(())
            }
            _ => Err(self.wrong_step(Step::ContactInfo)),
        }
    }

    /// Step 4: record the successful deposit charge. Terminal for the flow;
    /// a second confirmation is a conflict.
    pub fn confirm_payment(&mut self) -> Result<(), CoreError> {
        match self {
            Self::Payment { paid: true, .. } => {
                Err(CoreError::Conflict("Booking is already confirmed".into()))
            }
            Self::Payment { paid, .. } => {
                *paid = true;
                Ok(())
            }
            _ => Err(self.wrong_step(Step::Payment)),
        }
    }

    /// Go back one step, keeping everything the earlier step had already
    /// collected. Always permitted except at the first step.
    pub fn back(&mut self) -> Result<(), CoreError> {
        match self {
            Self::ServiceSelect { .. } => Err(CoreError::Validation(
                "Already at the first step".into(),
            )),
            Self::SlotSelect {
                service_id,
                staff_id,
                ..
            } => {
                *self = Self::ServiceSelect {
                    service_id: std::mem::take(service_id),
                    staff_id: std::mem::take(staff_id),
                };
                Ok(())
            }
            Self::ContactInfo {
                service_id,
                staff_id,
                date,
                slot,
                ..
            } => {
                *self = Self::SlotSelect {
                    service_id: std::mem::take(service_id),
                    staff_id: std::mem::take(staff_id),
                    date: Some(*date),
                    slot: Some(*slot),
                };
                Ok(())
            }
            Self::Payment {
                service_id,
                staff_id,
                date,
                slot,
                contact,
                ..
            } => {
                *self = Self::ContactInfo {
                    service_id: std::mem::take(service_id),
                    staff_id: std::mem::take(staff_id),
                    date: *date,
                    slot: *slot,
                    contact: std::mem::take(contact),
                };
                Ok(())
            }
        }
    }

    /// Return to the initial defaults from any state ("new booking").
    pub fn reset(&mut self, default_service_id: &str, default_staff_id: &str) {
        *self = Self::new(default_service_id, default_staff_id);
    }

    fn wrong_step(&self, expected: Step) -> CoreError {
        CoreError::Validation(format!(
            "Not allowed in step {:?} (expected {:?})",
            self.step(),
            expected
        ))
    }
}
