//! Nurse rostering domain models.
//!
//! Input side: `RosterRequest` (one department's rules for one
//! scheduling period) and `ShiftPlan` (the shift-name/duration pair
//! resolved from the shift count). Output side: `Roster` and
//! `NurseRoster`, the decoded per-nurse calendars.

pub(crate) mod decimal;
mod request;
mod roster;

pub use request::{RosterRequest, ShiftPlan};
pub use roster::{NurseRoster, Roster};
