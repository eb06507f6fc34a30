//! Converts a solved assignment into the response views.
//!
//! The flat list, the grid view and the per-employee summary are all
//! derived from the same assignment triples in one pass, so the views
//! cannot drift apart.

use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime};

use crate::domain::{self, Employee, ShiftType};
use crate::dto::{
    AssignedEmployeeDto, EmployeeSummaryDto, GridDayDto, GridShiftDto, GridViewDto,
    ScheduleResponseDto, ScheduledShiftDto,
};
use crate::solver::SolvedSchedule;

/// Summary status threshold: deviations under this count as on-target.
const PERFECT_EPSILON: f64 = 0.01;

impl ScheduleResponseDto {
    /// Builds both views plus the summary from a feasible assignment.
    pub fn from_solution(
        solved: &SolvedSchedule,
        employees: &[Employee],
        shift_types: &[ShiftType],
        days: &[&str],
        week: u32,
        year: i32,
    ) -> Self {
        let mut shifts_list = Vec::with_capacity(days.len() * shift_types.len());
        let mut grid_days = Vec::with_capacity(days.len());
        let mut grid_dates = Vec::with_capacity(days.len());
        let mut shifts_by_day = HashMap::new();

        for (day_idx, day) in days.iter().enumerate() {
            let date = domain::date_for_day(year, week, day_idx);
            let date_str = date.format("%Y-%m-%d").to_string();
            grid_days.push(day.to_string());
            grid_dates.push(date_str.clone());

            let mut day_shifts = HashMap::new();
            for (shift_idx, shift) in shift_types.iter().enumerate() {
                let assigned: Vec<AssignedEmployeeDto> = employees
                    .iter()
                    .filter(|emp| solved.is_assigned(emp.id, day_idx, shift_idx))
                    .map(|emp| AssignedEmployeeDto {
                        id: emp.id,
                        name: emp.full_name(),
                    })
                    .collect();
                let employee_names: Vec<String> =
                    assigned.iter().map(|emp| emp.name.clone()).collect();

                let start_time = NaiveDateTime::new(date, shift.start_time);
                let end_date = if shift.crosses_midnight() {
                    date + Duration::days(1)
                } else {
                    date
                };
                let end_time = NaiveDateTime::new(end_date, shift.end_time);

                shifts_list.push(ScheduledShiftDto {
                    date: date_str.clone(),
                    day_name: day.to_string(),
                    shift_id: shift.id,
                    shift_name: shift.name.clone(),
                    start_time,
                    end_time,
                    hours: shift.duration_hours(),
                    employees: assigned,
                });

                day_shifts.insert(
                    shift.name.clone(),
                    GridShiftDto {
                        employees: employee_names,
                        hours: shift.duration_hours(),
                        start: shift.start_time.format("%H:%M").to_string(),
                        end: shift.end_time.format("%H:%M").to_string(),
                    },
                );
            }

            shifts_by_day.insert(
                day.to_string(),
                GridDayDto {
                    date: date_str,
                    shifts: day_shifts,
                },
            );
        }

        let summary = employees
            .iter()
            .map(|emp| summarize(solved, emp, shift_types, days.len()))
            .collect();

        Self {
            status: solved.status,
            week,
            year,
            shifts: shifts_list,
            grid_view: GridViewDto {
                days: grid_days,
                dates: grid_dates,
                shifts_by_day,
            },
            summary,
        }
    }
}

/// Hour bookkeeping for one employee: actual vs. target plus a per-shift
/// assignment count.
fn summarize(
    solved: &SolvedSchedule,
    emp: &Employee,
    shift_types: &[ShiftType],
    n_days: usize,
) -> EmployeeSummaryDto {
    let mut actual = 0.0;
    let mut counts: HashMap<String, i64> =
        shift_types.iter().map(|s| (s.name.clone(), 0)).collect();

    for day_idx in 0..n_days {
        for (shift_idx, shift) in shift_types.iter().enumerate() {
            if solved.is_assigned(emp.id, day_idx, shift_idx) {
                actual += shift.duration_hours();
                *counts.entry(shift.name.clone()).or_insert(0) += 1;
            }
        }
    }

    let deviation = actual - emp.target_hours;
    let status = if deviation.abs() < PERFECT_EPSILON {
        "perfect"
    } else if deviation > 0.0 {
        "overtime"
    } else {
        "undertime"
    };

    EmployeeSummaryDto {
        id: emp.id,
        first_name: emp.first_name.clone(),
        last_name: emp.last_name.clone(),
        target: emp.target_hours,
        actual: round2(actual),
        deviation: round2(deviation),
        status: status.to_string(),
        shifts: counts,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DAYS;
    use crate::solver::{ScheduleStatus, SolvedSchedule};
    use chrono::{NaiveDate, NaiveTime};
    use std::collections::HashSet;
    use uuid::Uuid;

    fn t(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn solved_with(assigned: HashSet<(Uuid, usize, usize)>) -> SolvedSchedule {
        SolvedSchedule {
            status: ScheduleStatus::Optimal,
            assigned,
            objective: 0.0,
        }
    }

    #[test]
    fn test_midnight_crossing_shift_ends_next_day() {
        let emp = Employee::new(Uuid::new_v4(), "Ada", "Byrne", 8.0);
        let night = ShiftType::new(3, "Night", t(22, 0), t(6, 0));
        let solved = solved_with([(emp.id, 0, 0)].into_iter().collect());

        let response = ScheduleResponseDto::from_solution(
            &solved,
            std::slice::from_ref(&emp),
            std::slice::from_ref(&night),
            &DAYS,
            45,
            2025,
        );

        let monday_night = &response.shifts[0];
        assert_eq!(monday_night.date, "2025-11-03");
        assert_eq!(
            monday_night.start_time,
            NaiveDate::from_ymd_opt(2025, 11, 3).unwrap().and_hms_opt(22, 0, 0).unwrap()
        );
        assert_eq!(
            monday_night.end_time,
            NaiveDate::from_ymd_opt(2025, 11, 4).unwrap().and_hms_opt(6, 0, 0).unwrap()
        );
        assert_eq!(monday_night.hours, 8.0);
        assert_eq!(monday_night.employees.len(), 1);
        assert_eq!(monday_night.employees[0].name, "Ada Byrne");
    }

    #[test]
    fn test_grid_dates_follow_iso_week() {
        let response = ScheduleResponseDto::from_solution(
            &solved_with(HashSet::new()),
            &[],
            &[],
            &DAYS,
            45,
            2025,
        );

        assert_eq!(response.grid_view.days.len(), 7);
        assert_eq!(response.grid_view.dates[0], "2025-11-03");
        assert_eq!(response.grid_view.dates[1], "2025-11-04");
        assert_eq!(response.grid_view.dates[6], "2025-11-09");
        assert_eq!(response.grid_view.shifts_by_day["Monday"].date, "2025-11-03");
        assert!(response.grid_view.shifts_by_day["Monday"].shifts.is_empty());
    }

    #[test]
    fn test_status_classification() {
        let shift = ShiftType::new(1, "Day", t(8, 0), t(16, 0));
        let cases = [
            (40.0, 5, "perfect"),   // 5 × 8h = 40h
            (40.0, 6, "overtime"),  // 48h
            (40.0, 3, "undertime"), // 24h
        ];

        for (target, days_worked, expected) in cases {
            let emp = Employee::new(Uuid::new_v4(), "Ada", "Byrne", target);
            let assigned: HashSet<_> = (0..days_worked).map(|d| (emp.id, d, 0)).collect();
            let summary = summarize(
                &solved_with(assigned),
                &emp,
                std::slice::from_ref(&shift),
                7,
            );
            assert_eq!(summary.status, expected, "target {target}, {days_worked} days");
            assert_eq!(summary.actual, days_worked as f64 * 8.0);
            assert_eq!(summary.shifts["Day"], days_worked as i64);
        }
    }

    #[test]
    fn test_flat_list_and_grid_agree() {
        let alice = Employee::new(Uuid::new_v4(), "Ada", "Byrne", 40.0);
        let ben = Employee::new(Uuid::new_v4(), "Ben", "Craft", 40.0);
        let shifts = vec![
            ShiftType::new(1, "Early", t(6, 0), t(14, 0)),
            ShiftType::new(2, "Late", t(14, 0), t(22, 0)),
        ];
        let assigned: HashSet<_> = [
            (alice.id, 0, 0),
            (ben.id, 0, 1),
            (alice.id, 1, 1),
            (ben.id, 1, 0),
        ]
        .into_iter()
        .collect();

        let response = ScheduleResponseDto::from_solution(
            &solved_with(assigned),
            &[alice.clone(), ben.clone()],
            &shifts,
            &DAYS,
            45,
            2025,
        );

        let from_flat: HashSet<(String, String, String)> = response
            .shifts
            .iter()
            .flat_map(|s| {
                s.employees
                    .iter()
                    .map(|e| (s.day_name.clone(), s.shift_name.clone(), e.name.clone()))
            })
            .collect();

        let from_grid: HashSet<(String, String, String)> = response
            .grid_view
            .shifts_by_day
            .iter()
            .flat_map(|(day, grid_day)| {
                grid_day.shifts.iter().flat_map(|(shift_name, cell)| {
                    cell.employees
                        .iter()
                        .map(|name| (day.clone(), shift_name.clone(), name.clone()))
                })
            })
            .collect();

        assert_eq!(from_flat, from_grid);
        assert_eq!(from_flat.len(), 4);
        // One flat entry per (day, shift) pair, assigned or not.
        assert_eq!(response.shifts.len(), 7 * 2);
    }
}
