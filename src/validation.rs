//! Input validation for roster requests.
//!
//! Checks a request's integrity before any model is built. Detects:
//! - Unsupported shift counts (only 2 and 3 are defined)
//! - Empty horizons and empty nurse lists
//! - Demand entries missing for a resolved shift name
//! - Inverted bound pairs (min > max)
//! - Policy scalars inconsistent with the horizon
//!
//! Validation is fail-fast with respect to the solver: a request that
//! fails here never reaches model construction, so an unsatisfiable
//! model is never built silently from bad bounds.

use crate::models::{RosterRequest, ShiftPlan};

/// Validation outcome: the resolved shift plan, or every detected issue.
pub type ValidationResult = Result<ShiftPlan, Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// `shift_count` outside {2, 3}.
    UnsupportedShiftCount,
    /// `num_days` is zero.
    EmptyHorizon,
    /// The nurse list is empty.
    NoNurses,
    /// A resolved shift name has no demand entry.
    MissingDemand,
    /// A min/max bound pair with min > max.
    InvertedBounds,
    /// A policy scalar inconsistent with the horizon or shift plan.
    PolicyOutOfRange,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a roster request and resolves its shift plan.
///
/// Checks:
/// 1. `shift_count` ∈ {2, 3}
/// 2. `num_days` ≥ 1
/// 3. At least one nurse
/// 4. Demand covers every resolved shift name
/// 5. `min_working_hours` ≤ `max_working_hours`
/// 6. `min_night_shifts` ≤ `max_night_shifts`
/// 7. `min_night_shifts` ≤ `num_days` (a nurse works at most one night per day)
/// 8. `min_days_off` ≤ `num_days`
/// 9. `weekend_days` names exactly two day indices
/// 10. `min_weekend_off_days` ≤ 2 (there are two weekend days)
///
/// Window limits (`max_subsequent_working_days`, `max_consecutive_nights`)
/// are not rejected: a limit at or above the horizon simply generates no
/// window constraints at build time.
///
/// # Returns
/// `Ok(plan)` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request(request: &RosterRequest) -> ValidationResult {
    let mut errors = Vec::new();

    let plan = ShiftPlan::resolve(request.shift_count);
    if plan.is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::UnsupportedShiftCount,
            format!(
                "Unsupported shift count {} (expected 2 or 3)",
                request.shift_count
            ),
        ));
    }

    if request.num_days == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyHorizon,
            "Scheduling horizon must be at least one day",
        ));
    }

    if request.nurses.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoNurses,
            "At least one nurse is required",
        ));
    }

    if let Some(plan) = &plan {
        for shift in &plan.names {
            if !request.demand.contains_key(shift) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MissingDemand,
                    format!("No demand entry for shift '{shift}'"),
                ));
            }
        }
    }

    if request.min_working_hours > request.max_working_hours {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvertedBounds,
            format!(
                "min_working_hours {} exceeds max_working_hours {}",
                request.min_working_hours, request.max_working_hours
            ),
        ));
    }

    if request.min_night_shifts > request.max_night_shifts {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvertedBounds,
            format!(
                "min_night_shifts {} exceeds max_night_shifts {}",
                request.min_night_shifts, request.max_night_shifts
            ),
        ));
    }

    if request.min_night_shifts > request.num_days {
        errors.push(ValidationError::new(
            ValidationErrorKind::PolicyOutOfRange,
            format!(
                "min_night_shifts {} exceeds the {}-day horizon",
                request.min_night_shifts, request.num_days
            ),
        ));
    }

    if request.min_days_off > request.num_days {
        errors.push(ValidationError::new(
            ValidationErrorKind::PolicyOutOfRange,
            format!(
                "min_days_off {} exceeds the {}-day horizon",
                request.min_days_off, request.num_days
            ),
        ));
    }

    if request.weekend_days.len() != 2 {
        errors.push(ValidationError::new(
            ValidationErrorKind::PolicyOutOfRange,
            format!(
                "weekend_days must name exactly two day indices, got {}",
                request.weekend_days.len()
            ),
        ));
    }

    if request.min_weekend_off_days > 2 {
        errors.push(ValidationError::new(
            ValidationErrorKind::PolicyOutOfRange,
            format!(
                "min_weekend_off_days {} exceeds the two weekend days",
                request.min_weekend_off_days
            ),
        ));
    }

    match (plan, errors.is_empty()) {
        (Some(plan), true) => Ok(plan),
        _ => Err(errors),
    }
}
