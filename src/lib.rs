//! Nurse rostering engine.
//!
//! Translates a per-department scheduling request (shift demand, rest rules,
//! working-hour bounds) into a constraint-satisfaction model, delegates to a
//! CP solver behind a trait, and decodes the terminal assignment back into a
//! per-nurse shift calendar.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `RosterRequest`, `ShiftPlan`, `Roster`,
//!   `NurseRoster`
//! - **`validation`**: Request integrity checks (shift count, horizon,
//!   demand coverage, bound-pair ordering)
//! - **`cp`**: Solver-facing layer — boolean/integer variables, linear
//!   constraint model, `CpSolver` trait, reference backtracking solver
//! - **`roster`**: The core — constraint model builder and solution decoder
//! - **`store`**: Department configuration store collaborator
//! - **`service`**: One-request-one-cycle orchestration
//!
//! # Architecture
//!
//! Strictly sequential per request: request → builder → (variables,
//! constraints) → solver → (status, assignment) → decoder → roster. Each
//! invocation builds an independent model; no solver or model state is
//! shared across requests.
//!
//! # References
//!
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"
//! - Rossi et al. (2006), "Handbook of Constraint Programming"

pub mod cp;
pub mod error;
pub mod models;
pub mod roster;
pub mod service;
pub mod store;
pub mod validation;

pub use error::RosterError;
pub use service::RosterService;
