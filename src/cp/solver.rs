//! CP solver interface and reference implementation.

use super::model::{Comparator, CpModel};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Status of the solver after execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    /// Proven optimal solution found.
    Optimal,
    /// Feasible (but not necessarily optimal) solution found.
    Feasible,
    /// No feasible solution exists.
    Infeasible,
    /// Model is invalid or malformed.
    ModelInvalid,
    /// Solver exceeded its time limit.
    Timeout,
    /// No verdict for unknown reasons.
    Unknown,
}

/// Solution from a CP solver.
#[derive(Debug, Clone)]
pub struct CpSolution {
    /// Solver status.
    pub status: SolverStatus,
    /// Boolean variable assignments.
    pub bool_vars: HashMap<String, bool>,
    /// Integer variable assignments.
    pub int_vars: HashMap<String, i64>,
    /// Solve time in milliseconds.
    pub solve_time_ms: i64,
}

impl CpSolution {
    /// Creates an empty solution with the given status.
    pub fn empty(status: SolverStatus) -> Self {
        Self {
            status,
            bool_vars: HashMap::new(),
            int_vars: HashMap::new(),
            solve_time_ms: 0,
        }
    }

    /// Whether a feasible solution was found.
    pub fn is_solution_found(&self) -> bool {
        matches!(self.status, SolverStatus::Optimal | SolverStatus::Feasible)
    }

    /// Assigned value of a boolean variable, if present.
    pub fn bool_value(&self, name: &str) -> Option<bool> {
        self.bool_vars.get(name).copied()
    }

    /// Assigned value of an integer variable, if present.
    pub fn int_value(&self, name: &str) -> Option<i64> {
        self.int_vars.get(name).copied()
    }
}

/// Solver configuration.
///
/// Time-bounding the solve is the solver collaborator's concern; the
/// core only passes this through.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Maximum solve time in milliseconds.
    pub time_limit_ms: i64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: 60_000,
        }
    }
}

/// Trait for CP solver implementations.
///
/// Implementors provide the actual constraint solving logic. This can
/// wrap external engines (e.g., CP-SAT over FFI) or in-process search.
/// One call solves one freshly built model; implementations must not
/// carry state between calls.
pub trait CpSolver {
    /// Solves the model and returns a terminal solution.
    fn solve(&self, model: &CpModel, config: &SolverConfig) -> CpSolution;
}

/// A deterministic backtracking solver for linear 0/1 models.
///
/// Depth-first search over the boolean variables in sorted name order,
/// trying 0 before 1, pruning with interval bounds per constraint.
/// Integer variables are resolved afterwards: equality constraints with
/// a single unassigned variable are propagated to a fixpoint, and any
/// remainder is enumerated over its domain.
///
/// This fills the reference-solver role: it exercises the model without
/// an external engine and stays exact on the small models the tests
/// build. It is not a production search procedure.
///
/// # Limitations
///
/// - No objective function: the first feasible assignment wins
///   (the rostering model defines none).
/// - Free integer variables are enumerated, so wide domains that no
///   equality pins down are slow.
pub struct BacktrackSolver;

impl BacktrackSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BacktrackSolver {
    fn default() -> Self {
        Self::new()
    }
}

enum Outcome {
    Found,
    Exhausted,
    TimedOut,
}

struct Search<'a> {
    model: &'a CpModel,
    bool_order: Vec<&'a str>,
    int_order: Vec<&'a str>,
    values: HashMap<&'a str, i64>,
    deadline: Instant,
}

impl<'a> Search<'a> {
    /// Current domain of a variable: assigned value, bool [0,1], or the
    /// integer variable's declared bounds.
    fn domain(&self, name: &str) -> (i64, i64) {
        if let Some(&v) = self.values.get(name) {
            return (v, v);
        }
        if self.model.bool_vars.contains_key(name) {
            return (0, 1);
        }
        let var = &self.model.int_vars[name];
        (var.min, var.max)
    }

    /// Whether every constraint can still be satisfied under the
    /// current partial assignment (interval bound check).
    fn consistent(&self) -> bool {
        for constraint in &self.model.constraints {
            let mut lo = 0i64;
            let mut hi = 0i64;
            for (name, coeff) in &constraint.expr.terms {
                let (dmin, dmax) = self.domain(name);
                let a = coeff * dmin;
                let b = coeff * dmax;
                lo += a.min(b);
                hi += a.max(b);
            }
            let ok = match constraint.comparator {
                Comparator::LessOrEqual => lo <= constraint.bound,
                Comparator::GreaterOrEqual => hi >= constraint.bound,
                Comparator::Equal => lo <= constraint.bound && constraint.bound <= hi,
            };
            if !ok {
                return false;
            }
        }
        true
    }

    fn assign_bool(&mut self, idx: usize) -> Outcome {
        if Instant::now() >= self.deadline {
            return Outcome::TimedOut;
        }
        if idx == self.bool_order.len() {
            return self.assign_ints();
        }
        let name = self.bool_order[idx];
        for v in 0..=1 {
            self.values.insert(name, v);
            if self.consistent() {
                match self.assign_bool(idx + 1) {
                    Outcome::Exhausted => {}
                    terminal => return terminal,
                }
            }
        }
        self.values.remove(name);
        Outcome::Exhausted
    }

    fn assign_ints(&mut self) -> Outcome {
        if Instant::now() >= self.deadline {
            return Outcome::TimedOut;
        }

        // Fixpoint propagation: an equality with one unassigned variable
        // forces its value.
        let model = self.model;
        let mut propagated: Vec<&'a str> = Vec::new();
        loop {
            let mut changed = false;
            for constraint in &model.constraints {
                if constraint.comparator != Comparator::Equal {
                    continue;
                }
                let mut acc = 0i64;
                let mut open: Option<(&'a str, i64)> = None;
                let mut open_count = 0usize;
                for (name, coeff) in &constraint.expr.terms {
                    match self.values.get(name.as_str()) {
                        Some(&v) => acc += coeff * v,
                        None => {
                            open_count += 1;
                            open = Some((name.as_str(), *coeff));
                        }
                    }
                }
                if open_count != 1 {
                    continue;
                }
                let Some((name, coeff)) = open else {
                    continue;
                };
                let residual = constraint.bound - acc;
                let forced = if coeff != 0 && residual % coeff == 0 {
                    Some(residual / coeff)
                } else {
                    None
                };
                let (dmin, dmax) = self.domain(name);
                match forced {
                    Some(v) if v >= dmin && v <= dmax => {
                        self.values.insert(name, v);
                        propagated.push(name);
                        changed = true;
                    }
                    _ => {
                        self.undo(&propagated);
                        return Outcome::Exhausted;
                    }
                }
            }
            if !changed {
                break;
            }
        }

        if !self.consistent() {
            self.undo(&propagated);
            return Outcome::Exhausted;
        }

        // Enumerate the first variable no equality pinned down.
        let next = self
            .int_order
            .iter()
            .find(|name| !self.values.contains_key(**name))
            .copied();
        if let Some(name) = next {
            let (lo, hi) = self.domain(name);
            for v in lo..=hi {
                self.values.insert(name, v);
                if self.consistent() {
                    match self.assign_ints() {
                        Outcome::Exhausted => {}
                        terminal => return terminal,
                    }
                }
            }
            self.values.remove(name);
            self.undo(&propagated);
            return Outcome::Exhausted;
        }

        // Total assignment; the bound check is exact here.
        Outcome::Found
    }

    fn undo(&mut self, assigned: &[&'a str]) {
        for name in assigned {
            self.values.remove(name);
        }
    }
}

impl CpSolver for BacktrackSolver {
    fn solve(&self, model: &CpModel, config: &SolverConfig) -> CpSolution {
        if model.validate().is_err() {
            return CpSolution::empty(SolverStatus::ModelInvalid);
        }

        let started = Instant::now();
        let deadline = started + Duration::from_millis(config.time_limit_ms.max(0) as u64);

        // Sorted orders keep the search deterministic across runs.
        let mut bool_order: Vec<&str> = model.bool_vars.keys().map(String::as_str).collect();
        bool_order.sort_unstable();
        let mut int_order: Vec<&str> = model.int_vars.keys().map(String::as_str).collect();
        int_order.sort_unstable();

        let mut search = Search {
            model,
            bool_order,
            int_order,
            values: HashMap::new(),
            deadline,
        };

        let outcome = search.assign_bool(0);
        let solve_time_ms = started.elapsed().as_millis() as i64;
        match outcome {
            Outcome::Found => CpSolution {
                status: SolverStatus::Feasible,
                bool_vars: model
                    .bool_vars
                    .keys()
                    .map(|name| (name.clone(), search.values[name.as_str()] != 0))
                    .collect(),
                int_vars: model
                    .int_vars
                    .keys()
                    .map(|name| (name.clone(), search.values[name.as_str()]))
                    .collect(),
                solve_time_ms,
            },
            Outcome::Exhausted => CpSolution {
                solve_time_ms,
                ..CpSolution::empty(SolverStatus::Infeasible)
            },
            Outcome::TimedOut => CpSolution {
                solve_time_ms,
                ..CpSolution::empty(SolverStatus::Timeout)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cp::LinearExpr;

    #[test]
    fn test_feasible_pair() {
        let mut model = CpModel::new("test");
        let a = model.new_bool_var("a");
        let b = model.new_bool_var("b");
        model.add_linear(
            LinearExpr::sum([a.clone(), b.clone()]),
            Comparator::LessOrEqual,
            1,
        );
        model.add_linear(LinearExpr::sum([a, b]), Comparator::GreaterOrEqual, 1);

        let solution = BacktrackSolver::new().solve(&model, &SolverConfig::default());
        assert!(solution.is_solution_found());
        // 0-before-1 in sorted name order: a stays off, b picks up the demand.
        assert_eq!(solution.bool_value("a"), Some(false));
        assert_eq!(solution.bool_value("b"), Some(true));
    }

    #[test]
    fn test_infeasible() {
        let mut model = CpModel::new("test");
        let a = model.new_bool_var("a");
        let b = model.new_bool_var("b");
        model.add_linear(LinearExpr::sum([a, b]), Comparator::GreaterOrEqual, 3);

        let solution = BacktrackSolver::new().solve(&model, &SolverConfig::default());
        assert_eq!(solution.status, SolverStatus::Infeasible);
        assert!(solution.bool_vars.is_empty());
    }

    #[test]
    fn test_equality_propagation() {
        // t = 8x and t >= 8 force x = 1.
        let mut model = CpModel::new("test");
        let x = model.new_bool_var("x");
        let t = model.new_int_var("t", 0, 8);
        model.add_linear(
            LinearExpr::new().term(t.clone(), 1).term(x.clone(), -8),
            Comparator::Equal,
            0,
        );
        model.add_linear(LinearExpr::sum([t]), Comparator::GreaterOrEqual, 8);

        let solution = BacktrackSolver::new().solve(&model, &SolverConfig::default());
        assert!(solution.is_solution_found());
        assert_eq!(solution.bool_value(&x), Some(true));
        assert_eq!(solution.int_value("t"), Some(8));
    }

    #[test]
    fn test_free_int_enumeration() {
        let mut model = CpModel::new("test");
        let x = model.new_int_var("x", 0, 10);
        model.add_linear(LinearExpr::sum([x.clone()]), Comparator::GreaterOrEqual, 4);
        model.add_linear(LinearExpr::sum([x.clone()]), Comparator::LessOrEqual, 4);

        let solution = BacktrackSolver::new().solve(&model, &SolverConfig::default());
        assert!(solution.is_solution_found());
        assert_eq!(solution.int_value(&x), Some(4));
    }

    #[test]
    fn test_deterministic() {
        let mut model = CpModel::new("test");
        for i in 0..6 {
            model.new_bool_var(format!("v_{i}"));
        }
        model.add_linear(
            LinearExpr::sum((0..6).map(|i| format!("v_{i}"))),
            Comparator::GreaterOrEqual,
            2,
        );

        let solver = BacktrackSolver::new();
        let first = solver.solve(&model, &SolverConfig::default());
        let second = solver.solve(&model, &SolverConfig::default());
        assert_eq!(first.bool_vars, second.bool_vars);
    }

    #[test]
    fn test_invalid_model() {
        let mut model = CpModel::new("test");
        model.add_linear(LinearExpr::sum(["missing"]), Comparator::LessOrEqual, 1);

        let solution = BacktrackSolver::new().solve(&model, &SolverConfig::default());
        assert_eq!(solution.status, SolverStatus::ModelInvalid);
    }

    #[test]
    fn test_time_limit() {
        let mut model = CpModel::new("test");
        for i in 0..8 {
            model.new_bool_var(format!("v_{i}"));
        }
        model.add_linear(
            LinearExpr::sum((0..8).map(|i| format!("v_{i}"))),
            Comparator::GreaterOrEqual,
            4,
        );

        let config = SolverConfig { time_limit_ms: 0 };
        let solution = BacktrackSolver::new().solve(&model, &config);
        assert_eq!(solution.status, SolverStatus::Timeout);
    }

    #[test]
    fn test_empty_model_is_feasible() {
        let model = CpModel::new("empty");
        let solution = BacktrackSolver::new().solve(&model, &SolverConfig::default());
        assert!(solution.is_solution_found());
    }

    #[test]
    fn test_status_predicates() {
        assert!(CpSolution::empty(SolverStatus::Optimal).is_solution_found());
        assert!(CpSolution::empty(SolverStatus::Feasible).is_solution_found());
        assert!(!CpSolution::empty(SolverStatus::Infeasible).is_solution_found());
        assert!(!CpSolution::empty(SolverStatus::Unknown).is_solution_found());
    }
}
