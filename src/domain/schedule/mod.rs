//! Schedule module - weekly time slots and faculty conflict detection.
//!
//! Pure and stateless; nothing in here touches persistence.

mod clock_time;
mod conflict;
mod time_slot;
mod weekday;

pub use clock_time::ClockTime;
pub use conflict::has_conflict;
pub use time_slot::{overlaps, TimeSlot};
pub use weekday::Weekday;
