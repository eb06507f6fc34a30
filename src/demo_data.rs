//! Demo roster generators.

use chrono::NaiveTime;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use crate::domain::{Employee, ShiftType};
use crate::dto::{EmployeeDto, ScheduleRequestDto, ShiftTypeDto};

/// ISO week the demo rosters are planned for.
pub const DEMO_WEEK: u32 = 45;
pub const DEMO_YEAR: i32 = 2025;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoData {
    Small,
    Large,
}

impl std::str::FromStr for DemoData {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SMALL" => Ok(DemoData::Small),
            "LARGE" => Ok(DemoData::Large),
            _ => Err(()),
        }
    }
}

impl DemoData {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemoData::Small => "SMALL",
            DemoData::Large => "LARGE",
        }
    }

    fn parameters(&self) -> DemoDataParameters {
        match self {
            DemoData::Small => DemoDataParameters {
                employee_count: 12,
                target_hours_distribution: vec![(40.0, 4.0), (32.0, 2.0), (24.0, 1.0)],
                include_day_shift: false,
            },
            DemoData::Large => DemoDataParameters {
                employee_count: 50,
                target_hours_distribution: vec![
                    (40.0, 4.0),
                    (32.0, 3.0),
                    (24.0, 2.0),
                    (16.0, 1.0),
                ],
                include_day_shift: true,
            },
        }
    }
}

struct DemoDataParameters {
    employee_count: usize,
    target_hours_distribution: Vec<(f64, f64)>,
    include_day_shift: bool,
}

/// A complete scheduling request: roster, shift templates, target week.
#[derive(Debug, Clone)]
pub struct DemoRoster {
    pub employees: Vec<Employee>,
    pub shift_types: Vec<ShiftType>,
    pub week: u32,
    pub year: i32,
}

impl From<&DemoRoster> for ScheduleRequestDto {
    fn from(roster: &DemoRoster) -> Self {
        Self {
            employees: roster.employees.iter().map(EmployeeDto::from).collect(),
            shifts: roster.shift_types.iter().map(ShiftTypeDto::from).collect(),
            week: roster.week,
            year: roster.year,
        }
    }
}

/// List of available demo data sets.
pub fn list_demo_data() -> Vec<&'static str> {
    vec!["SMALL", "LARGE"]
}

/// Generates a demo roster for the given size.
pub fn generate(demo: DemoData) -> DemoRoster {
    let params = demo.parameters();
    let mut rng = StdRng::seed_from_u64(0);

    let name_permutations = generate_name_permutations(&mut rng);
    let mut employees = Vec::with_capacity(params.employee_count);
    for i in 0..params.employee_count {
        let (first, last) = &name_permutations[i % name_permutations.len()];
        let target_hours = pick_target_hours(&mut rng, &params.target_hours_distribution);
        employees.push(Employee::new(Uuid::new_v4(), first.clone(), last.clone(), target_hours));
    }

    let mut shift_types = vec![
        ShiftType::new(1, "Early", time(6, 0), time(14, 0)),
        ShiftType::new(2, "Late", time(14, 0), time(22, 0)),
        ShiftType::new(3, "Night", time(22, 0), time(6, 0)),
    ];
    if params.include_day_shift {
        shift_types.insert(1, ShiftType::new(4, "Day", time(9, 0), time(17, 0)));
    }

    DemoRoster {
        employees,
        shift_types,
        week: DEMO_WEEK,
        year: DEMO_YEAR,
    }
}

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

/// Pick target hours based on weighted distribution.
fn pick_target_hours(rng: &mut StdRng, distribution: &[(f64, f64)]) -> f64 {
    let total_weight: f64 = distribution.iter().map(|(_, w)| w).sum();
    let mut choice = rng.gen::<f64>() * total_weight;

    for (hours, weight) in distribution {
        if choice < *weight {
            return *hours;
        }
        choice -= weight;
    }
    distribution.last().map(|(h, _)| *h).unwrap_or(40.0)
}

const FIRST_NAMES: &[&str] = &[
    "Ada", "Ben", "Cleo", "Dev", "Ede", "Finn", "Gail", "Hal", "Ines", "Joel",
];
const LAST_NAMES: &[&str] = &[
    "Byrne", "Craft", "Doyle", "Ember", "Frost", "Hale", "Iqbal", "Marsh", "North", "Quinn",
];

fn generate_name_permutations(rng: &mut StdRng) -> Vec<(String, String)> {
    let mut names = Vec::with_capacity(FIRST_NAMES.len() * LAST_NAMES.len());
    for first in FIRST_NAMES {
        for last in LAST_NAMES {
            names.push((first.to_string(), last.to_string()));
        }
    }
    names.shuffle(rng);
    names
}
