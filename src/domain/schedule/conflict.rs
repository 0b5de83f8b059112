//! Faculty schedule conflict detection.
//!
//! The caller scopes `existing` to one faculty member within one registration
//! period; detection itself only compares slots. A linear scan is enough at
//! the size of a single teaching load.

use super::TimeSlot;

/// Returns true if `candidate` overlaps any slot in `existing`.
///
/// Stops at the first overlap.
pub fn has_conflict<'a, I>(existing: I, candidate: &TimeSlot) -> bool
where
    I: IntoIterator<Item = &'a TimeSlot>,
{
    existing.into_iter().any(|slot| slot.overlaps(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schedule::Weekday::*;

    fn slot(days: &[crate::domain::schedule::Weekday], start: &str, end: &str) -> TimeSlot {
        TimeSlot::parse(days.iter().copied(), start, end).unwrap()
    }

    #[test]
    fn empty_schedule_never_conflicts() {
        let existing: Vec<TimeSlot> = Vec::new();
        let candidate = slot(&[Mon], "10:00", "11:00");
        assert!(!has_conflict(&existing, &candidate));
    }

    #[test]
    fn detects_overlap_anywhere_in_schedule() {
        let existing = vec![
            slot(&[Sun, Tue], "08:00", "09:00"),
            slot(&[Mon, Wed], "10:00", "11:30"),
        ];
        let candidate = slot(&[Wed], "11:00", "12:00");
        assert!(has_conflict(&existing, &candidate));
    }

    #[test]
    fn back_to_back_teaching_is_allowed() {
        let existing = vec![
            slot(&[Mon], "08:00", "10:00"),
            slot(&[Mon], "12:00", "13:00"),
        ];
        let candidate = slot(&[Mon], "10:00", "12:00");
        assert!(!has_conflict(&existing, &candidate));
    }

    #[test]
    fn other_days_are_ignored() {
        let existing = vec![slot(&[Sat, Sun], "09:00", "17:00")];
        let candidate = slot(&[Thu], "09:00", "17:00");
        assert!(!has_conflict(&existing, &candidate));
    }
}
