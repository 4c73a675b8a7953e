//! Rostering service: one request, one model-build-and-solve cycle.
//!
//! Orchestrates fetch → validate → build → solve → decode. Validation
//! rejects bad requests before any solver contact; solver outcomes are
//! never retried here — the translation is deterministic, so a retry
//! with unchanged input reproduces the same outcome.

use crate::cp::{CpSolver, SolverConfig, SolverStatus};
use crate::error::RosterError;
use crate::models::{Roster, RosterRequest};
use crate::roster::RosterCpBuilder;
use crate::store::DepartmentStore;
use crate::validation;

/// Schedules departments from a configuration store.
///
/// Holds no per-request state: every call builds a fresh model, so
/// concurrent invocations for different requests never share variables
/// or constraints.
///
/// # Example
/// ```
/// use nurse_roster::cp::BacktrackSolver;
/// use nurse_roster::models::RosterRequest;
/// use nurse_roster::store::InMemoryDepartmentStore;
/// use nurse_roster::RosterService;
///
/// let mut store = InMemoryDepartmentStore::new();
/// store.insert(RosterRequest::new("icu", vec!["Alice".into()], 3, 7));
///
/// let service = RosterService::new(store);
/// let roster = service.roster_department("icu", &BacktrackSolver::new()).unwrap();
/// assert!(roster.found);
/// ```
pub struct RosterService<S> {
    store: S,
    config: SolverConfig,
}

impl<S: DepartmentStore> RosterService<S> {
    /// Creates a service over a configuration store with the default
    /// solver configuration.
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: SolverConfig::default(),
        }
    }

    /// Overrides the solver configuration (e.g. max solve time).
    pub fn with_solver_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Schedules a department by id: store lookup, then [`Self::roster`].
    pub fn roster_department<C: CpSolver>(
        &self,
        department_id: &str,
        solver: &C,
    ) -> Result<Roster, RosterError> {
        let request = self
            .store
            .fetch(department_id)?
            .ok_or_else(|| RosterError::DepartmentNotFound(department_id.to_string()))?;
        self.roster(&request, solver)
    }

    /// Schedules a request directly (store-free path).
    ///
    /// Infeasibility is a successful `found = false` roster; only
    /// verdict-less solver statuses become errors.
    pub fn roster<C: CpSolver>(
        &self,
        request: &RosterRequest,
        solver: &C,
    ) -> Result<Roster, RosterError> {
        let plan = validation::validate_request(request).map_err(RosterError::Validation)?;
        let builder = RosterCpBuilder::new(request, &plan);
        let (roster, solution) = builder.solve(solver, &self.config);
        match solution.status {
            SolverStatus::Optimal | SolverStatus::Feasible | SolverStatus::Infeasible => Ok(roster),
            other => Err(RosterError::Solver(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cp::{BacktrackSolver, CpModel, CpSolution};
    use crate::store::{InMemoryDepartmentStore, StoreError};

    fn service_with(request: RosterRequest) -> RosterService<InMemoryDepartmentStore> {
        let mut store = InMemoryDepartmentStore::new();
        store.insert(request);
        RosterService::new(store)
    }

    /// Scenario: one nurse, a week of three shifts, zero demand, wide
    /// bounds. Feasible, and the all-off week is a legal answer.
    #[test]
    fn test_permissive_week_is_found() {
        let request = RosterRequest::new("icu", vec!["Alice".into()], 3, 7)
            .with_working_hours(0, 999);
        let service = service_with(request);
        let roster = service
            .roster_department("icu", &BacktrackSolver::new())
            .unwrap();

        assert!(roster.found);
        assert_eq!(roster.nurses.len(), 1);
        // The reference solver tries 0 first, so the all-off week is
        // exactly what comes back.
        assert_eq!(roster.nurses[0].total_shifts(), 0);
    }

    /// Scenario: demand beyond nurse capacity is infeasible, reported
    /// as found=false rather than an error.
    #[test]
    fn test_over_demand_is_not_found() {
        let request =
            RosterRequest::new("icu", vec!["Alice".into()], 3, 1).with_demand("Morning", 2);
        let service = service_with(request);
        let roster = service
            .roster_department("icu", &BacktrackSolver::new())
            .unwrap();

        assert!(!roster.found);
        assert!(roster.nurses.is_empty());
        assert_eq!(roster.department_id, "icu");
    }

    /// Scenario: unknown department is a distinct not-found error and
    /// no model is built.
    #[test]
    fn test_unknown_department() {
        let service = RosterService::new(InMemoryDepartmentStore::new());
        let err = service
            .roster_department("er", &BacktrackSolver::new())
            .unwrap_err();
        assert!(matches!(err, RosterError::DepartmentNotFound(id) if id == "er"));
    }

    #[test]
    fn test_validation_rejects_before_solving() {
        struct PanicSolver;
        impl CpSolver for PanicSolver {
            fn solve(&self, _: &CpModel, _: &SolverConfig) -> CpSolution {
                panic!("solver must not be reached for invalid requests");
            }
        }

        let mut request = RosterRequest::new("icu", vec!["Alice".into()], 3, 7);
        request.shift_count = 4;
        let service = service_with(request.clone());
        let err = service.roster(&request, &PanicSolver).unwrap_err();
        assert!(matches!(err, RosterError::Validation(_)));
    }

    #[test]
    fn test_store_failure_is_a_store_error() {
        struct DownStore;
        impl DepartmentStore for DownStore {
            fn fetch(&self, _: &str) -> Result<Option<RosterRequest>, StoreError> {
                Err(StoreError::Unavailable("connection refused".into()))
            }
        }

        let service = RosterService::new(DownStore);
        let err = service
            .roster_department("icu", &BacktrackSolver::new())
            .unwrap_err();
        assert!(matches!(err, RosterError::Store(_)));
    }

    #[test]
    fn test_verdictless_solver_is_an_error() {
        struct ShrugSolver;
        impl CpSolver for ShrugSolver {
            fn solve(&self, _: &CpModel, _: &SolverConfig) -> CpSolution {
                CpSolution::empty(SolverStatus::Unknown)
            }
        }

        let request = RosterRequest::new("icu", vec!["Alice".into()], 3, 7);
        let service = service_with(request.clone());
        let err = service.roster(&request, &ShrugSolver).unwrap_err();
        assert!(matches!(err, RosterError::Solver(SolverStatus::Unknown)));
    }

    #[test]
    fn test_zero_time_budget_surfaces_timeout() {
        let request = RosterRequest::new("icu", vec!["Alice".into(), "Bora".into()], 3, 7);
        let service =
            service_with(request.clone()).with_solver_config(SolverConfig { time_limit_ms: 0 });
        let err = service.roster(&request, &BacktrackSolver::new()).unwrap_err();
        assert!(matches!(err, RosterError::Solver(SolverStatus::Timeout)));
    }

    /// Building twice from the same request and solver yields the same
    /// roster: the translation layer is deterministic.
    #[test]
    fn test_idempotent_translation() {
        let request = RosterRequest::new("icu", vec!["Alice".into(), "Bora".into()], 2, 5)
            .with_demand("Morning", 1)
            .with_night_shifts(1, 3);
        let service = service_with(request.clone());
        let solver = BacktrackSolver::new();

        let first = service.roster(&request, &solver).unwrap();
        let second = service.roster(&request, &solver).unwrap();
        assert_eq!(first, second);
        assert!(first.found);
    }

    /// End-to-end round-trip: solved roster survives JSON transport.
    #[test]
    fn test_roster_serialization_round_trip() {
        let request = RosterRequest::new("icu", vec!["Alice".into(), "Bora".into()], 3, 4)
            .with_demand("Night", 1)
            .with_hospital_name("General");
        let service = service_with(request.clone());
        let roster = service.roster(&request, &BacktrackSolver::new()).unwrap();
        assert!(roster.found);

        let json = serde_json::to_string(&roster).unwrap();
        let back: Roster = serde_json::from_str(&json).unwrap();
        assert_eq!(back, roster);
    }
}
