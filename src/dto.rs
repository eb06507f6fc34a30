//! Request/response DTOs for the scheduling API.

use std::collections::HashMap;

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Employee, ShiftType};
use crate::solver::ScheduleStatus;

/// Roster request: who is available, which shift templates exist, and
/// which ISO week to plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequestDto {
    pub employees: Vec<EmployeeDto>,
    pub shifts: Vec<ShiftTypeDto>,
    pub week: u32,
    pub year: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub target_hours: f64,
}

impl From<&Employee> for EmployeeDto {
    fn from(e: &Employee) -> Self {
        Self {
            id: e.id,
            first_name: e.first_name.clone(),
            last_name: e.last_name.clone(),
            target_hours: e.target_hours,
        }
    }
}

impl EmployeeDto {
    pub fn to_employee(&self) -> Employee {
        Employee::new(self.id, self.first_name.clone(), self.last_name.clone(), self.target_hours)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftTypeDto {
    pub id: i64,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl From<&ShiftType> for ShiftTypeDto {
    fn from(s: &ShiftType) -> Self {
        Self {
            id: s.id,
            name: s.name.clone(),
            start_time: s.start_time,
            end_time: s.end_time,
        }
    }
}

impl ShiftTypeDto {
    pub fn to_shift_type(&self) -> ShiftType {
        ShiftType::new(self.id, self.name.clone(), self.start_time, self.end_time)
    }
}

/// An employee on a scheduled shift instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedEmployeeDto {
    pub id: Uuid,
    pub name: String,
}

/// One shift occurrence on one concrete date. Flat, storage-friendly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledShiftDto {
    /// ISO date of the day the shift starts, e.g. "2025-11-03".
    pub date: String,
    pub day_name: String,
    pub shift_id: i64,
    pub shift_name: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub hours: f64,
    pub employees: Vec<AssignedEmployeeDto>,
}

/// Compact cell of the calendar grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridShiftDto {
    /// Display names only, for compact rendering.
    pub employees: Vec<String>,
    pub hours: f64,
    /// Time of day, "08:00".
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridDayDto {
    pub date: String,
    /// Keyed by shift name.
    pub shifts: HashMap<String, GridShiftDto>,
}

/// Weekly calendar view. Redundant with the flat list but organized for
/// rendering; both are derived from the same assignment set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridViewDto {
    pub days: Vec<String>,
    pub dates: Vec<String>,
    /// Keyed by day name.
    pub shifts_by_day: HashMap<String, GridDayDto>,
}

/// Per-employee hour bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummaryDto {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub target: f64,
    pub actual: f64,
    pub deviation: f64,
    /// "perfect", "overtime" or "undertime".
    pub status: String,
    /// Assignment count per shift name.
    pub shifts: HashMap<String, i64>,
}

/// Hybrid response carrying both the flat list and the grid view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponseDto {
    pub status: ScheduleStatus,
    pub week: u32,
    pub year: i32,
    pub shifts: Vec<ScheduledShiftDto>,
    pub grid_view: GridViewDto,
    pub summary: Vec<EmployeeSummaryDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_parses_camel_case() {
        let json = r#"{
            "employees": [
                {"id": "6a08ae3f-54d2-4f06-a9dd-0d8b3b1c2f50",
                 "firstName": "Ada", "lastName": "Byrne", "targetHours": 40.0}
            ],
            "shifts": [
                {"id": 1, "name": "Night", "startTime": "22:00:00", "endTime": "06:00:00"}
            ],
            "week": 45,
            "year": 2025
        }"#;

        let request: ScheduleRequestDto = serde_json::from_str(json).unwrap();
        assert_eq!(request.employees.len(), 1);
        assert_eq!(request.employees[0].first_name, "Ada");
        assert_eq!(request.shifts[0].name, "Night");
        assert!(request.shifts[0].to_shift_type().crosses_midnight());
        assert_eq!(request.week, 45);
    }

    #[test]
    fn test_scheduled_shift_serializes_camel_case() {
        let dto = ScheduledShiftDto {
            date: "2025-11-03".to_string(),
            day_name: "Monday".to_string(),
            shift_id: 3,
            shift_name: "Night".to_string(),
            start_time: chrono::NaiveDate::from_ymd_opt(2025, 11, 3)
                .unwrap()
                .and_hms_opt(22, 0, 0)
                .unwrap(),
            end_time: chrono::NaiveDate::from_ymd_opt(2025, 11, 4)
                .unwrap()
                .and_hms_opt(6, 0, 0)
                .unwrap(),
            hours: 8.0,
            employees: vec![],
        };

        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["dayName"], "Monday");
        assert_eq!(value["shiftId"], 3);
        assert_eq!(value["startTime"], "2025-11-03T22:00:00");
        assert_eq!(value["endTime"], "2025-11-04T06:00:00");
    }
}
