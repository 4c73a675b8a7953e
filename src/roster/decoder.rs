//! Solution decoder.
//!
//! Turns a solver's terminal assignment back into a per-nurse calendar.
//! The decoder trusts the solver: no constraint is re-checked here.

use crate::cp::{CpSolution, SolverStatus};
use crate::models::{NurseRoster, Roster, RosterRequest, ShiftPlan};

use super::builder::VarGrid;

/// Decodes a terminal solution into a `Roster`.
///
/// On success, each true indicator appends its 1-based day index to the
/// owning nurse's list for that shift name; nurse order follows the
/// request and day lists ascend. Any non-success status yields the
/// identity-only `found = false` roster (the service layer surfaces
/// Timeout/Unknown as errors before decoding, so those never reach a
/// caller as "not found").
pub fn decode(
    request: &RosterRequest,
    plan: &ShiftPlan,
    grid: &VarGrid,
    solution: &CpSolution,
) -> Roster {
    if !solution.is_solution_found() {
        if solution.status == SolverStatus::Infeasible {
            log::info!(
                "no feasible roster for department '{}' ({} nurses, {} days)",
                request.department_id,
                request.num_nurses(),
                request.num_days
            );
        }
        return Roster::not_found(request);
    }

    let mut nurses = Vec::with_capacity(request.num_nurses());
    for (nurse, name) in request.nurses.iter().enumerate() {
        let mut calendar = NurseRoster::new(name, plan);
        for day in 0..request.num_days as usize {
            for shift in 0..plan.shift_count() {
                if solution.bool_value(grid.name(nurse, day, shift)) == Some(true) {
                    calendar.push_day(&plan.names[shift], (day + 1) as u32);
                }
            }
        }
        nurses.push(calendar);
    }
    Roster::found(request, nurses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cp::CpSolution;

    fn fixture() -> (RosterRequest, ShiftPlan, VarGrid) {
        let request = RosterRequest::new("D1", vec!["Alice".into(), "Bora".into()], 3, 3);
        let plan = ShiftPlan::resolve(3).unwrap();
        let grid = VarGrid::new(2, 3, 3);
        (request, plan, grid)
    }

    fn all_false_solution(grid: &VarGrid, status: SolverStatus) -> CpSolution {
        let mut solution = CpSolution::empty(status);
        for nurse in 0..2 {
            for day in 0..3 {
                for shift in 0..3 {
                    solution
                        .bool_vars
                        .insert(grid.name(nurse, day, shift).to_string(), false);
                }
            }
        }
        solution
    }

    #[test]
    fn test_decode_preserves_nurse_order_and_day_order() {
        let (request, plan, grid) = fixture();
        let mut solution = all_false_solution(&grid, SolverStatus::Feasible);
        // Alice: mornings on days 1 and 3. Bora: night on day 2.
        solution.bool_vars.insert(grid.name(0, 0, 0).into(), true);
        solution.bool_vars.insert(grid.name(0, 2, 0).into(), true);
        solution.bool_vars.insert(grid.name(1, 1, 2).into(), true);

        let roster = decode(&request, &plan, &grid, &solution);
        assert!(roster.found);
        assert_eq!(roster.nurses[0].name, "Alice");
        assert_eq!(roster.nurses[0].days_for("Morning"), [1, 3]);
        assert_eq!(roster.nurses[0].days_for("Evening"), [] as [u32; 0]);
        assert_eq!(roster.nurses[1].name, "Bora");
        assert_eq!(roster.nurses[1].days_for("Night"), [2]);
    }

    #[test]
    fn test_decode_all_off_is_found() {
        let (request, plan, grid) = fixture();
        let solution = all_false_solution(&grid, SolverStatus::Optimal);
        let roster = decode(&request, &plan, &grid, &solution);
        assert!(roster.found);
        assert!(roster.nurses.iter().all(|n| n.total_shifts() == 0));
    }

    #[test]
    fn test_decode_infeasible_is_not_found() {
        let (request, plan, grid) = fixture();
        let solution = CpSolution::empty(SolverStatus::Infeasible);
        let roster = decode(&request, &plan, &grid, &solution);
        assert!(!roster.found);
        assert!(roster.nurses.is_empty());
        assert_eq!(roster.department_id, "D1");
    }
}
