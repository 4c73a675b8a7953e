//! Roster (solution) model.
//!
//! A roster is the decoded solver output: per nurse, the 1-based day
//! indices on which they work each shift. Built once from the solver's
//! terminal assignment and never mutated afterward.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::decimal;
use super::{RosterRequest, ShiftPlan};

/// One nurse's decoded calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NurseRoster {
    /// Nurse display name.
    pub name: String,
    /// Shift name → ascending 1-based day indices.
    pub shifts: BTreeMap<String, Vec<u32>>,
}

impl NurseRoster {
    /// Creates an empty calendar with every shift of the plan present.
    pub fn new(name: impl Into<String>, plan: &ShiftPlan) -> Self {
        Self {
            name: name.into(),
            shifts: plan
                .names
                .iter()
                .map(|shift| (shift.clone(), Vec::new()))
                .collect(),
        }
    }

    /// Appends a worked day to a shift's list. Days are appended in
    /// ascending order by the decoder; this does not re-sort.
    pub fn push_day(&mut self, shift: &str, day: u32) {
        self.shifts.entry(shift.to_string()).or_default().push(day);
    }

    /// Days worked on the named shift.
    pub fn days_for(&self, shift: &str) -> &[u32] {
        self.shifts.get(shift).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total shifts worked across the horizon.
    pub fn total_shifts(&self) -> usize {
        self.shifts.values().map(Vec::len).sum()
    }
}

/// A complete schedule result for one department request.
///
/// `found = false` carries only the identifying fields; no partial
/// schedule is ever guessed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roster {
    /// Department identifier from the request.
    pub department_id: String,
    /// Hospital display name.
    pub hospital_name: String,
    /// Department display name.
    pub dept_name: String,
    /// Whether a feasible assignment was found.
    pub found: bool,
    /// Shifts per day; string-serialized for decimal-store round-trip.
    #[serde(with = "decimal::u32_string")]
    pub shift_count: u32,
    /// Per-nurse calendars, in request nurse order. Empty when not found.
    pub nurses: Vec<NurseRoster>,
}

impl Roster {
    /// A found roster with the given per-nurse calendars.
    pub fn found(request: &RosterRequest, nurses: Vec<NurseRoster>) -> Self {
        Self {
            department_id: request.department_id.clone(),
            hospital_name: request.hospital_name.clone(),
            dept_name: request.dept_name.clone(),
            found: true,
            shift_count: request.shift_count,
            nurses,
        }
    }

    /// The no-feasible-schedule outcome: identifying fields only.
    pub fn not_found(request: &RosterRequest) -> Self {
        Self {
            department_id: request.department_id.clone(),
            hospital_name: request.hospital_name.clone(),
            dept_name: request.dept_name.clone(),
            found: false,
            shift_count: request.shift_count,
            nurses: Vec::new(),
        }
    }
}
