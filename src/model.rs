//! MILP model construction for the weekly scheduling problem.
//!
//! One boolean decision variable per (employee, day, shift type) triple,
//! hard coverage/daily-load/fatigue constraints, and a soft objective
//! minimizing each employee's deviation from their contracted hours.

use std::collections::HashMap;

use chrono::Timelike;
use good_lp::{constraint, variable, Constraint, Expression, ProblemVariables, Variable};
use uuid::Uuid;

use crate::domain::{Employee, ShiftType};

/// Every shift instance must be staffed by at least this many employees.
const MIN_EMPLOYEES_PER_SHIFT: f64 = 1.0;
/// ...and by at most this many.
const MAX_EMPLOYEES_PER_SHIFT: f64 = 2.0;
/// Upper bound on one employee's hour deviation, in tenths of an hour.
const MAX_DEVIATION_TENTHS: f64 = 1000.0;

/// Assignment variables keyed by (employee id, day index, shift index).
type AssignmentVars = HashMap<(Uuid, usize, usize), Variable>;

/// Decision variables, constraints and objective for one solve.
///
/// Built fresh per request; nothing is shared between solves.
pub struct ScheduleModel {
    pub(crate) vars: ProblemVariables,
    pub(crate) assignments: AssignmentVars,
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) objective: Expression,
}

impl ScheduleModel {
    /// Builds the full model for the given roster over `days.len()` days.
    pub fn build(employees: &[Employee], shift_types: &[ShiftType], days: &[&str]) -> Self {
        let mut vars = ProblemVariables::new();
        let mut assignments = AssignmentVars::new();

        for emp in employees {
            for (day_idx, day) in days.iter().enumerate() {
                for (shift_idx, shift) in shift_types.iter().enumerate() {
                    let var = vars.add(
                        variable()
                            .binary()
                            .name(format!("{}_{}_{}", emp.id, day, shift.name)),
                    );
                    assignments.insert((emp.id, day_idx, shift_idx), var);
                }
            }
        }

        let mut constraints = Vec::new();
        add_coverage(&mut constraints, &assignments, employees, shift_types, days.len());
        add_one_shift_per_day(&mut constraints, &assignments, employees, shift_types, days.len());
        add_rest_between_days(&mut constraints, &assignments, employees, shift_types, days.len());
        add_night_shift_cap(&mut constraints, &assignments, employees, shift_types, days.len());
        let objective = add_deviation_objective(
            &mut vars,
            &mut constraints,
            &assignments,
            employees,
            shift_types,
            days.len(),
        );

        Self {
            vars,
            assignments,
            constraints,
            objective,
        }
    }
}

/// Each shift instance is staffed by one or two employees.
fn add_coverage(
    constraints: &mut Vec<Constraint>,
    assignments: &AssignmentVars,
    employees: &[Employee],
    shift_types: &[ShiftType],
    n_days: usize,
) {
    for day_idx in 0..n_days {
        for shift_idx in 0..shift_types.len() {
            let staffed: Expression = employees
                .iter()
                .map(|emp| Expression::from(assignments[&(emp.id, day_idx, shift_idx)]))
                .sum();
            constraints.push(constraint!(staffed.clone() >= MIN_EMPLOYEES_PER_SHIFT));
            constraints.push(constraint!(staffed <= MAX_EMPLOYEES_PER_SHIFT));
        }
    }
}

/// No employee works more than one shift type on the same day.
fn add_one_shift_per_day(
    constraints: &mut Vec<Constraint>,
    assignments: &AssignmentVars,
    employees: &[Employee],
    shift_types: &[ShiftType],
    n_days: usize,
) {
    if shift_types.is_empty() {
        return;
    }
    for emp in employees {
        for day_idx in 0..n_days {
            let day_load: Expression = (0..shift_types.len())
                .map(|shift_idx| Expression::from(assignments[&(emp.id, day_idx, shift_idx)]))
                .sum();
            constraints.push(constraint!(day_load <= 1.0));
        }
    }
}

/// A shift ending late and a shift starting early the next morning cannot
/// both go to the same employee.
fn add_rest_between_days(
    constraints: &mut Vec<Constraint>,
    assignments: &AssignmentVars,
    employees: &[Employee],
    shift_types: &[ShiftType],
    n_days: usize,
) {
    for emp in employees {
        for day_idx in 0..n_days.saturating_sub(1) {
            for (shift_idx, shift) in shift_types.iter().enumerate() {
                for (next_shift_idx, next_shift) in shift_types.iter().enumerate() {
                    if too_close(shift, next_shift) {
                        let curr = assignments[&(emp.id, day_idx, shift_idx)];
                        let next = assignments[&(emp.id, day_idx + 1, next_shift_idx)];
                        constraints.push(constraint!(curr + next <= 1.0));
                    }
                }
            }
        }
    }
}

/// At most two night shifts in any three consecutive days.
fn add_night_shift_cap(
    constraints: &mut Vec<Constraint>,
    assignments: &AssignmentVars,
    employees: &[Employee],
    shift_types: &[ShiftType],
    n_days: usize,
) {
    let Some(night_idx) = night_shift_index(shift_types) else {
        return;
    };
    for emp in employees {
        for day_idx in 0..n_days.saturating_sub(2) {
            let window: Expression = (0..3)
                .map(|offset| Expression::from(assignments[&(emp.id, day_idx + offset, night_idx)]))
                .sum();
            constraints.push(constraint!(window <= 2.0));
        }
    }
}

/// Soft objective: total absolute deviation between scheduled and
/// contracted hours, in tenths of an hour so the solver stays in integer
/// arithmetic.
fn add_deviation_objective(
    vars: &mut ProblemVariables,
    constraints: &mut Vec<Constraint>,
    assignments: &AssignmentVars,
    employees: &[Employee],
    shift_types: &[ShiftType],
    n_days: usize,
) -> Expression {
    let mut deviations = Vec::with_capacity(employees.len());

    for emp in employees {
        let scheduled_tenths: Expression = (0..n_days)
            .flat_map(|day_idx| {
                shift_types.iter().enumerate().map(move |(shift_idx, shift)| {
                    shift.duration_tenths() as f64 * assignments[&(emp.id, day_idx, shift_idx)]
                })
            })
            .sum();
        let target_tenths = (emp.target_hours * 10.0) as i64 as f64;

        let deviation = vars.add(
            variable()
                .integer()
                .min(0.0)
                .max(MAX_DEVIATION_TENTHS)
                .name(format!("deviation_{}", emp.id)),
        );
        // deviation >= |scheduled - target| under minimization.
        constraints.push(constraint!(deviation >= scheduled_tenths.clone() - target_tenths));
        constraints.push(constraint!(deviation >= target_tenths - scheduled_tenths));
        deviations.push(deviation);
    }

    deviations.into_iter().map(Expression::from).sum()
}

/// A late-ending shift followed by an early-starting one the next day
/// leaves too little rest. Hour-of-day comparison only; duration and
/// midnight crossing are ignored.
pub fn too_close(first: &ShiftType, next: &ShiftType) -> bool {
    first.end_time.hour() >= 20 && next.start_time.hour() <= 10
}

/// The shift type treated as the night shift: the first one, in input
/// order, starting at 21:00 or later.
pub fn night_shift_index(shift_types: &[ShiftType]) -> Option<usize> {
    shift_types.iter().position(|s| s.start_time.hour() >= 21)
}
