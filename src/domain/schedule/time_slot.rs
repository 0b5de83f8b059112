//! Weekly recurring time slot and the overlap predicate.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{ClockTime, Weekday};
use crate::domain::foundation::ValidationError;

/// A weekly recurring slot: a set of weekdays sharing one time range.
///
/// # Invariants
///
/// - `days` is non-empty
/// - `start < end` (no cross-midnight spans)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TimeSlotRecord", into = "TimeSlotRecord")]
pub struct TimeSlot {
    days: BTreeSet<Weekday>,
    start: ClockTime,
    end: ClockTime,
}

/// Unvalidated wire shape of a time slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimeSlotRecord {
    days: Vec<Weekday>,
    start_time: ClockTime,
    end_time: ClockTime,
}

impl TimeSlot {
    /// Creates a validated time slot.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if no weekday is given
    /// - `InvalidFormat` if `start` is not strictly before `end`
    pub fn new(
        days: impl IntoIterator<Item = Weekday>,
        start: ClockTime,
        end: ClockTime,
    ) -> Result<Self, ValidationError> {
        let days: BTreeSet<Weekday> = days.into_iter().collect();
        if days.is_empty() {
            return Err(ValidationError::empty_field("days"));
        }
        if start >= end {
            return Err(ValidationError::invalid_format(
                "end_time",
                format!("start time {} must be before end time {}", start, end),
            ));
        }
        Ok(Self { days, start, end })
    }

    /// Creates a time slot from `HH:MM` strings.
    pub fn parse(
        days: impl IntoIterator<Item = Weekday>,
        start: &str,
        end: &str,
    ) -> Result<Self, ValidationError> {
        Self::new(days, start.parse()?, end.parse()?)
    }

    pub fn days(&self) -> &BTreeSet<Weekday> {
        &self.days
    }

    pub fn start(&self) -> ClockTime {
        self.start
    }

    pub fn end(&self) -> ClockTime {
        self.end
    }

    /// Returns true if both slots meet on a shared weekday at overlapping times.
    ///
    /// Time ranges are half-open, so back-to-back slots do not overlap.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        !self.days.is_disjoint(&other.days) && self.start < other.end && other.start < self.end
    }
}

/// Free-standing form of [`TimeSlot::overlaps`].
pub fn overlaps(a: &TimeSlot, b: &TimeSlot) -> bool {
    a.overlaps(b)
}

impl TryFrom<TimeSlotRecord> for TimeSlot {
    type Error = ValidationError;

    fn try_from(record: TimeSlotRecord) -> Result<Self, Self::Error> {
        TimeSlot::new(record.days, record.start_time, record.end_time)
    }
}

impl From<TimeSlot> for TimeSlotRecord {
    fn from(slot: TimeSlot) -> Self {
        Self {
            days: slot.days.into_iter().collect(),
            start_time: slot.start,
            end_time: slot.end,
        }
    }
}
