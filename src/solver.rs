//! Solve driver: runs a built model on the MILP backend within a
//! wall-clock budget.

use std::collections::HashSet;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use good_lp::{default_solver, ResolutionError, Solution, SolverModel};
use tracing::warn;
use uuid::Uuid;

use crate::model::ScheduleModel;

/// Default solving time: 90 seconds.
const DEFAULT_TIME_LIMIT_SECS: u64 = 90;

/// Solver configuration with termination criteria.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Give up on the solve after this duration.
    pub time_limit: Duration,
}

impl SolverConfig {
    /// Creates a config with the default 90-second time limit.
    pub fn default_config() -> Self {
        Self {
            time_limit: Duration::from_secs(DEFAULT_TIME_LIMIT_SECS),
        }
    }

    pub fn with_time_limit(time_limit: Duration) -> Self {
        Self { time_limit }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

/// Quality of a returned schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    /// The objective is provably minimal.
    Optimal,
    /// A valid schedule was found but optimality was not proven within the
    /// time budget. Only produced by time-limited backends; the bundled
    /// exact backend proves every result it returns.
    Feasible,
}

impl ScheduleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ScheduleStatus::Optimal => "optimal",
            ScheduleStatus::Feasible => "feasible",
        }
    }
}

/// The satisfying assignment extracted from a successful solve.
#[derive(Debug, Clone)]
pub struct SolvedSchedule {
    pub status: ScheduleStatus,
    /// (employee id, day index, shift index) triples assigned true.
    pub(crate) assigned: HashSet<(Uuid, usize, usize)>,
    /// Total deviation from target hours, in tenths of an hour.
    pub objective: f64,
}

impl SolvedSchedule {
    /// The degenerate schedule with nothing assigned.
    pub fn empty(status: ScheduleStatus) -> Self {
        Self {
            status,
            assigned: HashSet::new(),
            objective: 0.0,
        }
    }

    pub fn is_assigned(&self, employee: Uuid, day_idx: usize, shift_idx: usize) -> bool {
        self.assigned.contains(&(employee, day_idx, shift_idx))
    }
}

/// Failures outside the normal solved / no-schedule outcomes.
#[derive(Debug, thiserror::Error)]
pub enum SolveError {
    #[error("solver backend failure: {0}")]
    Backend(String),

    #[error("solver worker terminated before producing a result")]
    WorkerLost,
}

/// Runs the model to completion or until the time budget expires.
///
/// `Ok(None)` covers both proven infeasibility and a budget that expired
/// before any solution was found; the caller cannot distinguish the two.
/// A worker still running at the deadline is abandoned; there is no
/// mid-solve cancellation.
pub fn solve(model: ScheduleModel, config: &SolverConfig) -> Result<Option<SolvedSchedule>, SolveError> {
    let time_limit = config.time_limit;
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let _ = tx.send(run_backend(model));
    });

    match rx.recv_timeout(time_limit) {
        Ok(outcome) => outcome,
        Err(RecvTimeoutError::Timeout) => {
            warn!(
                time_limit_secs = time_limit.as_secs(),
                "time budget exhausted before any solution was found"
            );
            Ok(None)
        }
        Err(RecvTimeoutError::Disconnected) => Err(SolveError::WorkerLost),
    }
}

fn run_backend(model: ScheduleModel) -> Result<Option<SolvedSchedule>, SolveError> {
    let ScheduleModel {
        vars,
        assignments,
        constraints,
        objective,
    } = model;

    let objective_expr = objective.clone();
    let mut problem = vars.minimise(objective).using(default_solver);
    for c in constraints {
        problem = problem.with(c);
    }

    match problem.solve() {
        Ok(solution) => {
            let objective_value = solution.eval(objective_expr);
            let assigned: HashSet<(Uuid, usize, usize)> = assignments
                .into_iter()
                .filter(|(_, var)| solution.value(*var) > 0.5)
                .map(|(key, _)| key)
                .collect();
            Ok(Some(SolvedSchedule {
                status: ScheduleStatus::Optimal,
                assigned,
                objective: objective_value,
            }))
        }
        Err(ResolutionError::Infeasible) => Ok(None),
        Err(e) => Err(SolveError::Backend(e.to_string())),
    }
}
