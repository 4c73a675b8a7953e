//! Constraint programming layer.
//!
//! The solver-facing capability boundary: boolean/integer decision
//! variables, a linear constraint model, and the `CpSolver` trait the
//! core delegates to. `BacktrackSolver` is the in-crate reference
//! implementation used by the tests.
//!
//! # Reference
//! Rossi et al. (2006), "Handbook of Constraint Programming", Ch. 4

mod model;
mod solver;
mod variables;

pub use model::{Comparator, CpModel, LinearConstraint, LinearExpr};
pub use solver::{BacktrackSolver, CpSolution, CpSolver, SolverConfig, SolverStatus};
pub use variables::{BoolVar, IntVar};
