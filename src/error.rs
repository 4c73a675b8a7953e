//! Service error taxonomy.
//!
//! Distinguishes the four terminal failure shapes a scheduling call can
//! take. Infeasibility is deliberately absent: "no feasible schedule"
//! is a successful `found = false` roster, not an error.

use crate::cp::SolverStatus;
use crate::store::StoreError;
use crate::validation::ValidationError;
use thiserror::Error;

/// Errors surfaced by the rostering service.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The request failed validation; the model was never built.
    #[error("invalid request: {0:?}")]
    Validation(Vec<ValidationError>),

    /// The department identifier is absent from the configuration store.
    #[error("department '{0}' not found")]
    DepartmentNotFound(String),

    /// The store backend failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The solver returned without a feasibility verdict (timeout,
    /// unknown, or an invalid model). Kept distinct from `found=false`
    /// so "no feasible schedule" and "could not determine feasibility"
    /// never mix.
    #[error("solver returned no verdict: {0:?}")]
    Solver(SolverStatus),
}
