//! The rostering core: constraint model builder and solution decoder.
//!
//! `RosterCpBuilder` translates a validated request into a closed
//! linear constraint system over one boolean per (nurse, day, shift);
//! `decode` maps a solver's terminal assignment back into a `Roster`.
//! Strictly sequential, stateless between requests.
//!
//! # Reference
//! Burke et al. (2004), "The State of the Art of Nurse Rostering"

mod builder;
mod decoder;

pub use builder::{RosterCpBuilder, VarGrid};
pub use decoder::decode;
