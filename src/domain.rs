//! Domain model for weekly shift scheduling.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Weekday labels for one scheduling horizon, Monday first (ISO order).
pub const DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// An employee who can be assigned to shifts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// Contracted hours per week.
    pub target_hours: f64,
}

impl Employee {
    pub fn new(
        id: Uuid,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        target_hours: f64,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            target_hours,
        }
    }

    /// Display name used in schedule output.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A shift template: what a shift looks like, not who works it.
///
/// An end time earlier than the start time means the shift runs into the
/// next calendar day (e.g. 22:00-06:00).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftType {
    pub id: i64,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl ShiftType {
    pub fn new(id: i64, name: impl Into<String>, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            id,
            name: name.into(),
            start_time,
            end_time,
        }
    }

    pub fn crosses_midnight(&self) -> bool {
        minutes_from_midnight(self.end_time) < minutes_from_midnight(self.start_time)
    }

    /// Shift length in minutes, accounting for midnight crossings.
    pub fn duration_minutes(&self) -> i64 {
        let start = minutes_from_midnight(self.start_time);
        let end = minutes_from_midnight(self.end_time);
        if end < start {
            end + 1440 - start
        } else {
            end - start
        }
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration_minutes() as f64 / 60.0
    }

    /// Shift length in tenths of an hour, truncated. A 5.25 h shift counts
    /// as 52 tenths.
    pub fn duration_tenths(&self) -> i64 {
        self.duration_minutes() / 6
    }
}

fn minutes_from_midnight(t: NaiveTime) -> i64 {
    t.hour() as i64 * 60 + t.minute() as i64
}

/// Monday of the given ISO week.
///
/// Week 1 is the week containing January 4th; out-of-range week numbers
/// roll into the neighbouring year without any validation.
pub fn iso_week_start(year: i32, week: u32) -> NaiveDate {
    let jan4 = NaiveDate::from_ymd_opt(year, 1, 4).unwrap();
    let week_one_monday = jan4 - Duration::days(jan4.weekday().num_days_from_monday() as i64);
    week_one_monday + Duration::weeks(week as i64 - 1)
}

/// Calendar date for a day index (0 = Monday) of the given ISO week.
pub fn date_for_day(year: i32, week: u32, day_idx: usize) -> NaiveDate {
    iso_week_start(year, week) + Duration::days(day_idx as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn shift(start: NaiveTime, end: NaiveTime) -> ShiftType {
        ShiftType::new(1, "Test", start, end)
    }

    #[test]
    fn test_duration_day_shift() {
        assert_eq!(shift(t(8, 0), t(16, 0)).duration_hours(), 8.0);
    }

    #[test]
    fn test_duration_ending_at_midnight() {
        assert_eq!(shift(t(16, 0), t(0, 0)).duration_hours(), 8.0);
    }

    #[test]
    fn test_duration_crossing_midnight() {
        let night = shift(t(22, 0), t(6, 0));
        assert!(night.crosses_midnight());
        assert_eq!(night.duration_hours(), 8.0);
    }

    #[test]
    fn test_duration_fractional() {
        let s = shift(t(9, 30), t(14, 45));
        assert!(!s.crosses_midnight());
        assert_eq!(s.duration_hours(), 5.25);
        assert_eq!(s.duration_tenths(), 52);
    }

    #[test]
    fn test_date_for_day_week_45_2025() {
        assert_eq!(
            date_for_day(2025, 45, 0),
            NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()
        );
        assert_eq!(
            date_for_day(2025, 45, 1),
            NaiveDate::from_ymd_opt(2025, 11, 4).unwrap()
        );
    }

    #[test]
    fn test_week_one_contains_january_4th() {
        let monday = iso_week_start(2024, 1);
        // January 1st 2024 is a Monday, so week 1 starts on it.
        assert_eq!(monday, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        // 2025 starts mid-week; week 1 reaches back into December 2024.
        assert_eq!(
            iso_week_start(2025, 1),
            NaiveDate::from_ymd_opt(2024, 12, 30).unwrap()
        );
    }

    #[test]
    fn test_full_name() {
        let emp = Employee::new(Uuid::new_v4(), "Ada", "Byrne", 40.0);
        assert_eq!(emp.full_name(), "Ada Byrne");
    }
}
