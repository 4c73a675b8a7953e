//! Scheduling request model.
//!
//! A `RosterRequest` is the immutable input to one scheduling cycle:
//! department identity, shift configuration, the nurse list, per-shift
//! demand, and the policy scalars bounding nights, hours, consecutive
//! runs, and rest days.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::decimal;

/// Shift configuration resolved from a request's shift count.
///
/// Resolved exactly once at validation time; every constraint reads
/// shift names and durations from here rather than re-deriving them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftPlan {
    /// Shift names, in shift-index order.
    pub names: Vec<String>,
    /// Duration of each shift in hours (parallel to `names`).
    pub hours: Vec<u32>,
}

impl ShiftPlan {
    /// Resolves the plan for a shift count, or `None` if unsupported.
    ///
    /// 3 shifts ⇒ Morning/Evening/Night at 8h each;
    /// 2 shifts ⇒ Morning/Night at 12h each.
    pub fn resolve(shift_count: u32) -> Option<Self> {
        match shift_count {
            3 => Some(Self {
                names: vec!["Morning".into(), "Evening".into(), "Night".into()],
                hours: vec![8, 8, 8],
            }),
            2 => Some(Self {
                names: vec!["Morning".into(), "Night".into()],
                hours: vec![12, 12],
            }),
            _ => None,
        }
    }

    /// Number of shifts per day.
    pub fn shift_count(&self) -> usize {
        self.names.len()
    }

    /// Index of the morning shift.
    pub fn morning_index(&self) -> usize {
        0
    }

    /// Index of the night shift (always the last shift of the day).
    pub fn night_index(&self) -> usize {
        self.names.len() - 1
    }

    /// Longest single-shift duration in hours.
    pub fn max_shift_hours(&self) -> u32 {
        self.hours.iter().copied().max().unwrap_or(0)
    }
}

fn default_weekend_days() -> Vec<u32> {
    // Saturday and Sunday of a Monday-started horizon.
    vec![5, 6]
}

/// One department's scheduling request.
///
/// Immutable once parsed. Nurse identity is the index position in
/// `nurses`; duplicate display names do not collapse two nurses into
/// one. All integer fields accept JSON numbers or numeric strings
/// (decimal-store round-trip, see [`decimal`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterRequest {
    /// Opaque department identifier (store key).
    pub department_id: String,
    /// Hospital display name.
    #[serde(default)]
    pub hospital_name: String,
    /// Department display name.
    #[serde(default)]
    pub dept_name: String,
    /// Shifts per day; 2 or 3 are the supported values.
    #[serde(deserialize_with = "decimal::u32")]
    pub shift_count: u32,
    /// Ordered nurse names; index is identity.
    pub nurses: Vec<String>,
    /// Scheduling horizon in days.
    #[serde(deserialize_with = "decimal::u32")]
    pub num_days: u32,
    /// Minimum headcount per shift name per day.
    #[serde(deserialize_with = "decimal::u32_map")]
    pub demand: BTreeMap<String, u32>,
    /// Longest permitted run of night shifts.
    #[serde(deserialize_with = "decimal::u32")]
    pub max_consecutive_nights: u32,
    /// Lower bound on total working hours across the horizon.
    #[serde(deserialize_with = "decimal::u32")]
    pub min_working_hours: u32,
    /// Upper bound on total working hours across the horizon.
    #[serde(deserialize_with = "decimal::u32")]
    pub max_working_hours: u32,
    /// Longest permitted run of working days.
    #[serde(deserialize_with = "decimal::u32")]
    pub max_subsequent_working_days: u32,
    /// Minimum off days per nurse on the weekend days.
    #[serde(deserialize_with = "decimal::u32")]
    pub min_weekend_off_days: u32,
    /// Minimum night shifts per nurse over the horizon.
    #[serde(deserialize_with = "decimal::u32")]
    pub min_night_shifts: u32,
    /// Maximum night shifts per nurse over the horizon.
    #[serde(deserialize_with = "decimal::u32")]
    pub max_night_shifts: u32,
    /// Minimum off days per nurse over the horizon.
    #[serde(deserialize_with = "decimal::u32")]
    pub min_days_off: u32,
    /// The two 0-based weekend day indices within the horizon. Indices
    /// past the horizon are ignored, so the default works for any
    /// `num_days`.
    #[serde(
        default = "default_weekend_days",
        deserialize_with = "decimal::u32_vec"
    )]
    pub weekend_days: Vec<u32>,
}

impl RosterRequest {
    /// Creates a permissive request: zero demand per resolved shift,
    /// every policy bound wide open. Tighten with the `with_*` setters.
    pub fn new(
        department_id: impl Into<String>,
        nurses: Vec<String>,
        shift_count: u32,
        num_days: u32,
    ) -> Self {
        let demand = ShiftPlan::resolve(shift_count)
            .map(|plan| plan.names.iter().map(|n| (n.clone(), 0)).collect())
            .unwrap_or_default();
        let max_hours = 24 * num_days * nurses.len() as u32;

        Self {
            department_id: department_id.into(),
            hospital_name: String::new(),
            dept_name: String::new(),
            shift_count,
            nurses,
            num_days,
            demand,
            max_consecutive_nights: num_days,
            min_working_hours: 0,
            max_working_hours: max_hours,
            max_subsequent_working_days: num_days,
            min_weekend_off_days: 0,
            min_night_shifts: 0,
            max_night_shifts: num_days,
            min_days_off: 0,
            weekend_days: default_weekend_days(),
        }
    }

    /// Number of nurses.
    pub fn num_nurses(&self) -> usize {
        self.nurses.len()
    }

    /// Sets the hospital display name.
    pub fn with_hospital_name(mut self, name: impl Into<String>) -> Self {
        self.hospital_name = name.into();
        self
    }

    /// Sets the department display name.
    pub fn with_dept_name(mut self, name: impl Into<String>) -> Self {
        self.dept_name = name.into();
        self
    }

    /// Sets the demand for one shift name.
    pub fn with_demand(mut self, shift: impl Into<String>, count: u32) -> Self {
        self.demand.insert(shift.into(), count);
        self
    }

    /// Sets the total working-hour bounds.
    pub fn with_working_hours(mut self, min: u32, max: u32) -> Self {
        self.min_working_hours = min;
        self.max_working_hours = max;
        self
    }

    /// Sets the per-nurse night-shift count bounds.
    pub fn with_night_shifts(mut self, min: u32, max: u32) -> Self {
        self.min_night_shifts = min;
        self.max_night_shifts = max;
        self
    }

    /// Sets the longest permitted night-shift run.
    pub fn with_max_consecutive_nights(mut self, limit: u32) -> Self {
        self.max_consecutive_nights = limit;
        self
    }

    /// Sets the longest permitted working-day run.
    pub fn with_max_subsequent_working_days(mut self, limit: u32) -> Self {
        self.max_subsequent_working_days = limit;
        self
    }

    /// Sets the minimum weekend off days.
    pub fn with_min_weekend_off_days(mut self, days: u32) -> Self {
        self.min_weekend_off_days = days;
        self
    }

    /// Sets the minimum off days over the horizon.
    pub fn with_min_days_off(mut self, days: u32) -> Self {
        self.min_days_off = days;
        self
    }

    /// Sets the 0-based weekend day indices.
    pub fn with_weekend_days(mut self, days: Vec<u32>) -> Self {
        self.weekend_days = days;
        self
    }
}
