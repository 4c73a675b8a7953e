//! Constraint model builder for nurse rosters.
//!
//! Translates a validated `RosterRequest` into a `CpModel`: one boolean
//! assignment variable per (nurse, day, shift) triple plus the full
//! staffing rule set. Any solution of the model is a legal roster and
//! any legal roster satisfies the model; no rule is weakened silently.
//! Each builder instance produces an independent model — nothing is
//! shared or reused across requests.

use crate::cp::{Comparator, CpModel, CpSolution, CpSolver, LinearExpr, SolverConfig};
use crate::models::{Roster, RosterRequest, ShiftPlan};

use super::decoder::decode;

/// Dense (nurse, day, shift) index space with deterministic variable
/// names, addressed through an explicit flat index function.
#[derive(Debug, Clone)]
pub struct VarGrid {
    num_days: usize,
    num_shifts: usize,
    names: Vec<String>,
}

impl VarGrid {
    /// Pre-computes every assignment variable name.
    pub fn new(num_nurses: usize, num_days: usize, num_shifts: usize) -> Self {
        let mut names = Vec::with_capacity(num_nurses * num_days * num_shifts);
        for nurse in 0..num_nurses {
            for day in 0..num_days {
                for shift in 0..num_shifts {
                    names.push(format!("shift_{nurse}_{day}_{shift}"));
                }
            }
        }
        Self {
            num_days,
            num_shifts,
            names,
        }
    }

    /// Flat index of a (nurse, day, shift) triple.
    #[inline]
    pub fn index(&self, nurse: usize, day: usize, shift: usize) -> usize {
        (nurse * self.num_days + day) * self.num_shifts + shift
    }

    /// Variable name of a (nurse, day, shift) triple.
    pub fn name(&self, nurse: usize, day: usize, shift: usize) -> &str {
        &self.names[self.index(nurse, day, shift)]
    }

    /// Total number of assignment variables.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the grid is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Builds a CP model from a roster request.
///
/// One method per staffing rule; `build` runs them all against a fresh
/// model. The builder is a pure translation and cannot fail on input
/// that passed [`crate::validation::validate_request`].
///
/// # Example
/// ```
/// use nurse_roster::models::RosterRequest;
/// use nurse_roster::roster::RosterCpBuilder;
/// use nurse_roster::validation::validate_request;
///
/// let request = RosterRequest::new("D1", vec!["Alice".into()], 3, 7);
/// let plan = validate_request(&request).unwrap();
/// let model = RosterCpBuilder::new(&request, &plan).build();
/// assert_eq!(model.bool_var_count(), 1 * 7 * 3);
/// ```
pub struct RosterCpBuilder<'a> {
    request: &'a RosterRequest,
    plan: &'a ShiftPlan,
    grid: VarGrid,
}

impl<'a> RosterCpBuilder<'a> {
    /// Creates a builder for one request and its resolved shift plan.
    pub fn new(request: &'a RosterRequest, plan: &'a ShiftPlan) -> Self {
        let grid = VarGrid::new(
            request.num_nurses(),
            request.num_days as usize,
            plan.shift_count(),
        );
        Self {
            request,
            plan,
            grid,
        }
    }

    /// The assignment variable grid.
    pub fn grid(&self) -> &VarGrid {
        &self.grid
    }

    fn nurses(&self) -> usize {
        self.request.num_nurses()
    }

    fn days(&self) -> usize {
        self.request.num_days as usize
    }

    fn shifts(&self) -> usize {
        self.plan.shift_count()
    }

    /// Appends all of one nurse-day's shift indicators to `expr` with
    /// the given coefficient ("worked that day" as a 0/1 sum under the
    /// single-shift rule).
    fn worked_terms(&self, mut expr: LinearExpr, nurse: usize, day: usize, coeff: i64) -> LinearExpr {
        for shift in 0..self.shifts() {
            expr = expr.term(self.grid.name(nurse, day, shift), coeff);
        }
        expr
    }

    /// Builds the closed constraint system for this request.
    pub fn build(&self) -> CpModel {
        let mut model = CpModel::new(format!("roster_{}", self.request.department_id));

        self.declare_assignment_vars(&mut model);
        self.add_single_shift_per_day(&mut model);
        self.add_night_to_morning_rest(&mut model);
        self.add_demand_cover(&mut model);
        self.add_max_subsequent_working_days(&mut model);
        self.add_max_consecutive_nights(&mut model);
        self.add_night_shift_bounds(&mut model);
        self.add_working_hour_bounds(&mut model);
        self.add_no_isolated_day_off(&mut model);
        self.add_no_isolated_working_day(&mut model);
        self.add_weekend_rest(&mut model);
        self.add_min_days_off(&mut model);

        model
    }

    /// Builds, solves, and decodes in one step.
    pub fn solve<S: CpSolver>(&self, solver: &S, config: &SolverConfig) -> (Roster, CpSolution) {
        let model = self.build();
        let solution = solver.solve(&model, config);
        let roster = decode(self.request, self.plan, &self.grid, &solution);
        (roster, solution)
    }

    /// One boolean per (nurse, day, shift) triple.
    fn declare_assignment_vars(&self, model: &mut CpModel) {
        for nurse in 0..self.nurses() {
            for day in 0..self.days() {
                for shift in 0..self.shifts() {
                    model.new_bool_var(self.grid.name(nurse, day, shift));
                }
            }
        }
    }

    /// A nurse works at most one shift each day; an off day is the
    /// all-zero case.
    fn add_single_shift_per_day(&self, model: &mut CpModel) {
        for nurse in 0..self.nurses() {
            for day in 0..self.days() {
                let expr = self.worked_terms(LinearExpr::new(), nurse, day, 1);
                model.add_linear(expr, Comparator::LessOrEqual, 1);
            }
        }
    }

    /// No morning shift the day after a night shift.
    fn add_night_to_morning_rest(&self, model: &mut CpModel) {
        let night = self.plan.night_index();
        let morning = self.plan.morning_index();
        for nurse in 0..self.nurses() {
            for day in 0..self.days().saturating_sub(1) {
                let expr = LinearExpr::sum([
                    self.grid.name(nurse, day, night),
                    self.grid.name(nurse, day + 1, morning),
                ]);
                model.add_linear(expr, Comparator::LessOrEqual, 1);
            }
        }
    }

    /// Demand for each shift of each day is met.
    fn add_demand_cover(&self, model: &mut CpModel) {
        for day in 0..self.days() {
            for shift in 0..self.shifts() {
                let demand = self
                    .request
                    .demand
                    .get(&self.plan.names[shift])
                    .copied()
                    .unwrap_or(0);
                let expr = LinearExpr::sum(
                    (0..self.nurses()).map(|nurse| self.grid.name(nurse, day, shift)),
                );
                model.add_linear(expr, Comparator::GreaterOrEqual, demand as i64);
            }
        }
    }

    /// No more than `max_subsequent_working_days` working days in a
    /// row: every window of limit+1 days has at most limit worked days.
    /// A limit at or above the horizon generates no constraints.
    fn add_max_subsequent_working_days(&self, model: &mut CpModel) {
        let limit = self.request.max_subsequent_working_days as usize;
        let window = limit + 1;
        if window > self.days() {
            return;
        }
        for nurse in 0..self.nurses() {
            for start in 0..=(self.days() - window) {
                let mut expr = LinearExpr::new();
                for day in start..start + window {
                    expr = self.worked_terms(expr, nurse, day, 1);
                }
                model.add_linear(expr, Comparator::LessOrEqual, limit as i64);
            }
        }
    }

    /// No more than `max_consecutive_nights` night shifts in a row,
    /// with the same limit+1 window scheme.
    fn add_max_consecutive_nights(&self, model: &mut CpModel) {
        let limit = self.request.max_consecutive_nights as usize;
        let window = limit + 1;
        if window > self.days() {
            return;
        }
        let night = self.plan.night_index();
        for nurse in 0..self.nurses() {
            for start in 0..=(self.days() - window) {
                let expr = LinearExpr::sum(
                    (start..start + window).map(|day| self.grid.name(nurse, day, night)),
                );
                model.add_linear(expr, Comparator::LessOrEqual, limit as i64);
            }
        }
    }

    /// Per-nurse night-shift total within [min, max].
    fn add_night_shift_bounds(&self, model: &mut CpModel) {
        let night = self.plan.night_index();
        for nurse in 0..self.nurses() {
            let expr = LinearExpr::sum((0..self.days()).map(|day| self.grid.name(nurse, day, night)));
            model.add_linear(
                expr.clone(),
                Comparator::GreaterOrEqual,
                self.request.min_night_shifts as i64,
            );
            model.add_linear(
                expr,
                Comparator::LessOrEqual,
                self.request.max_night_shifts as i64,
            );
        }
    }

    /// Working-hour accounting: a per-slot hour variable equal to the
    /// shift duration times its indicator, a materialized per-nurse
    /// daily total, and a horizon-wide total bounded to
    /// [min_working_hours, max_working_hours] across all nurses.
    fn add_working_hour_bounds(&self, model: &mut CpModel) {
        let mut all_slots = LinearExpr::new();
        for nurse in 0..self.nurses() {
            for day in 0..self.days() {
                let mut day_expr = LinearExpr::new();
                for shift in 0..self.shifts() {
                    let hours = self.plan.hours[shift] as i64;
                    let slot = model.new_int_var(format!("hours_{nurse}_{day}_{shift}"), 0, hours);
                    model.add_linear(
                        LinearExpr::new()
                            .term(slot.clone(), 1)
                            .term(self.grid.name(nurse, day, shift), -hours),
                        Comparator::Equal,
                        0,
                    );
                    all_slots = all_slots.term(slot, 1);
                    day_expr = day_expr.term(self.grid.name(nurse, day, shift), hours);
                }
                // Daily hours per nurse, kept for reporting; bounded by
                // the longest shift thanks to the single-shift rule.
                let day_var = model.new_int_var(
                    format!("day_hours_{nurse}_{day}"),
                    0,
                    self.plan.max_shift_hours() as i64,
                );
                model.add_linear(day_expr.term(day_var, -1), Comparator::Equal, 0);
            }
        }
        let total = model.new_int_var(
            "total_hours",
            self.request.min_working_hours as i64,
            self.request.max_working_hours as i64,
        );
        model.add_linear(all_slots.term(total, -1), Comparator::Equal, 0);
    }

    /// No single off day sandwiched between two working days:
    /// worked(d-1) + worked(d+1) - worked(d) ≤ 1 on interior days.
    fn add_no_isolated_day_off(&self, model: &mut CpModel) {
        for nurse in 0..self.nurses() {
            for day in 1..self.days().saturating_sub(1) {
                let mut expr = self.worked_terms(LinearExpr::new(), nurse, day - 1, 1);
                expr = self.worked_terms(expr, nurse, day + 1, 1);
                expr = self.worked_terms(expr, nurse, day, -1);
                model.add_linear(expr, Comparator::LessOrEqual, 1);
            }
        }
    }

    /// No single working day sandwiched between two off days:
    /// worked(d) - worked(d-1) - worked(d+1) ≤ 0 on interior days.
    fn add_no_isolated_working_day(&self, model: &mut CpModel) {
        for nurse in 0..self.nurses() {
            for day in 1..self.days().saturating_sub(1) {
                let mut expr = self.worked_terms(LinearExpr::new(), nurse, day, 1);
                expr = self.worked_terms(expr, nurse, day - 1, -1);
                expr = self.worked_terms(expr, nurse, day + 1, -1);
                model.add_linear(expr, Comparator::LessOrEqual, 0);
            }
        }
    }

    /// Weekend rest: summed indicators over the configured weekend days
    /// ≤ 2·shift_count − min_weekend_off_days. Weekend indices past the
    /// horizon are ignored; with none in range the rule is vacuous.
    fn add_weekend_rest(&self, model: &mut CpModel) {
        let weekend: Vec<usize> = self
            .request
            .weekend_days
            .iter()
            .map(|&d| d as usize)
            .filter(|&d| d < self.days())
            .collect();
        if weekend.is_empty() {
            return;
        }
        let bound = 2 * self.shifts() as i64 - self.request.min_weekend_off_days as i64;
        for nurse in 0..self.nurses() {
            let mut expr = LinearExpr::new();
            for &day in &weekend {
                expr = self.worked_terms(expr, nurse, day, 1);
            }
            model.add_linear(expr, Comparator::LessOrEqual, bound);
        }
    }

    /// Minimum days off over the horizon: total worked slots per nurse
    /// ≤ num_days·shift_count − min_days_off.
    fn add_min_days_off(&self, model: &mut CpModel) {
        let bound =
            (self.days() * self.shifts()) as i64 - self.request.min_days_off as i64;
        for nurse in 0..self.nurses() {
            let mut expr = LinearExpr::new();
            for day in 0..self.days() {
                expr = self.worked_terms(expr, nurse, day, 1);
            }
            model.add_linear(expr, Comparator::LessOrEqual, bound);
        }
    }
}
