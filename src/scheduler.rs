//! Weekly schedule generation: model build, bounded solve, response
//! assembly.

use tracing::{info, warn};

use crate::domain::{Employee, ShiftType, DAYS};
use crate::dto::ScheduleResponseDto;
use crate::model::ScheduleModel;
use crate::solver::{self, ScheduleStatus, SolveError, SolvedSchedule, SolverConfig};

/// Produces a schedule for one ISO week, or `None` when no assignment
/// satisfies the hard constraints within the time budget.
///
/// Inputs are assumed validated by the caller: ids unique, week number
/// meaningful for the given year.
pub fn generate_schedule(
    employees: &[Employee],
    shift_types: &[ShiftType],
    week: u32,
    year: i32,
    config: &SolverConfig,
) -> Result<Option<ScheduleResponseDto>, SolveError> {
    info!(
        week,
        year,
        employees = employees.len(),
        shift_types = shift_types.len(),
        "generating schedule"
    );

    if employees.is_empty() {
        if shift_types.is_empty() {
            // Nothing to cover and nobody to assign.
            let solved = SolvedSchedule::empty(ScheduleStatus::Optimal);
            return Ok(Some(ScheduleResponseDto::from_solution(
                &solved, employees, shift_types, &DAYS, week, year,
            )));
        }
        // Coverage demands at least one employee per shift instance.
        warn!("no feasible schedule found");
        return Ok(None);
    }

    let model = ScheduleModel::build(employees, shift_types, &DAYS);
    match solver::solve(model, config)? {
        Some(solved) => {
            info!(
                status = solved.status.as_str(),
                deviation_tenths = solved.objective,
                "schedule generated successfully"
            );
            Ok(Some(ScheduleResponseDto::from_solution(
                &solved, employees, shift_types, &DAYS, week, year,
            )))
        }
        None => {
            warn!("no feasible schedule found");
            Ok(None)
        }
    }
}
