//! Bookable start-time computation for one staff member on one day.
//!
//! This is the scheduling core: a pure function over the staff member's
//! working hours and breaks, the queried service duration, and the set of
//! already-booked start times. Candidates are probed on a fine grid (5 min)
//! so that openings created by break and buffer edges are found, but only
//! quarter-hour starts are ever offered.

use chrono::{Datelike, NaiveDate};

use crate::catalog::{BreakInterval, Staff};
use crate::timeofday::{ranges_overlap, TimeOfDay};

/// Minute-of-hour values that may be offered as slot starts.
pub const OFFERED_MINUTES: [u16; 4] = [0, 15, 30, 45];

/// Tunable parameters of the slot computation.
#[derive(Debug, Clone, Copy)]
pub struct SlotRules {
    /// Mandatory gap (minutes) inflated around the service interval when
    /// checking against breaks. Not applied to existing bookings.
    pub buffer_min: u16,
    /// Candidate probing granularity (minutes). Finer than the quarter-hour
    /// alignment on purpose; it probes openings, it does not offer them.
    pub step_min: u16,
}

impl Default for SlotRules {
    fn default() -> Self {
        Self {
            buffer_min: 10,
            step_min: 5,
        }
    }
}

/// Compute the ordered bookable start times with the default rules
/// (10 minute buffer, 5 minute probing step).
///
/// `occupied` is the ledger's confirmed start times for this staff member
/// on `date`. Returns an empty vec when the staff member does not work that
/// weekday, or when no candidate survives the filters; absence of
/// availability is not an error.
pub fn compute_slots(
    date: NaiveDate,
    staff: &Staff,
    duration_min: u16,
    occupied: &[TimeOfDay],
) -> Vec<TimeOfDay> {
    compute_slots_with(date, staff, duration_min, occupied, SlotRules::default())
}

/// [`compute_slots`] with explicit rules.
///
/// Guarantees, for fixed inputs:
/// - deterministic, side-effect free;
/// - output strictly ascending;
/// - every slot `t` satisfies `window_start <= t <= window_end - duration`;
/// - `[t - buffer, t + duration + buffer)` overlaps no break (half-open);
/// - `[t, t + duration)` overlaps no `[s, s + duration)` for occupied `s`.
///
/// The existing-booking check reuses the queried duration on both sides and
/// applies no buffer; only breaks get the buffer treatment.
pub fn compute_slots_with(
    date: NaiveDate,
    staff: &Staff,
    duration_min: u16,
    occupied: &[TimeOfDay],
    rules: SlotRules,
) -> Vec<TimeOfDay> {
    let weekday = date.weekday().num_days_from_sunday() as u8;
    let Some(window) = staff.working_hours.get(&weekday) else {
        // Off day: terminal, not an error.
        return Vec::new();
    };

    let window_start = i32::from(window.start.minutes());
    let window_end = i32::from(window.end.minutes());
    let duration = i32::from(duration_min);
    let buffer = i32::from(rules.buffer_min);
    let step = i32::from(rules.step_min).max(1);

    let mut slots = Vec::new();
    let mut t = window_start;
    while t + duration <= window_end {
        let candidate = t;
        t += step;

        let minute = (candidate % 60) as u16;
        if !OFFERED_MINUTES.contains(&minute) {
            continue;
        }
        // Hard rule of its own, kept even though the quarter-hour alignment
        // already excludes :55; it must survive a future step-size change.
        if minute == 55 {
            continue;
        }

        // Breaks are checked against the buffer-inflated interval, so a
        // break can exclude a slot whose raw service interval never touches
        // it.
        let buffered_start = candidate - buffer;
        let buffered_end = candidate + duration + buffer;
        if overlaps_break(buffered_start, buffered_end, &staff.breaks) {
            continue;
        }

        if overlaps_existing(candidate, duration, occupied) {
            continue;
        }

        slots.push(TimeOfDay(candidate as u16));
    }

    slots
}

fn overlaps_break(start: i32, end: i32, breaks: &[BreakInterval]) -> bool {
    breaks.iter().any(|b| {
        ranges_overlap(
            start,
            end,
            i32::from(b.start.minutes()),
            i32::from(b.end.minutes()),
        )
    })
}

fn overlaps_existing(start: i32, duration: i32, occupied: &[TimeOfDay]) -> bool {
    occupied.iter().any(|s| {
        let s = i32::from(s.minutes());
        ranges_overlap(start, start + duration, s, s + duration)
    })
}
