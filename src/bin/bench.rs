//! Benchmark for full-week solve latency.
//!
//! Run with: cargo run --release --bin bench

use std::time::{Duration, Instant};

use shift_scheduling::demo_data::{self, DemoData};
use shift_scheduling::scheduler;
use shift_scheduling::solver::SolverConfig;

fn main() {
    let roster = demo_data::generate(DemoData::Large);

    println!("Benchmark: weekly schedule solve");
    println!("  Employees: {}", roster.employees.len());
    println!("  Shift types: {}", roster.shift_types.len());
    println!();

    let config = SolverConfig::with_time_limit(Duration::from_secs(90));
    let start = Instant::now();
    let result = scheduler::generate_schedule(
        &roster.employees,
        &roster.shift_types,
        roster.week,
        roster.year,
        &config,
    )
    .expect("solver backend failure");
    let elapsed = start.elapsed();

    match result {
        Some(response) => {
            let total_deviation: f64 = response.summary.iter().map(|s| s.deviation.abs()).sum();
            println!("Results:");
            println!("  Status: {}", response.status.as_str());
            println!("  Shift instances: {}", response.shifts.len());
            println!("  Total |deviation|: {:.1} hours", total_deviation);
            println!("  Time: {:.2?}", elapsed);
        }
        None => println!("No feasible schedule found ({:.2?})", elapsed),
    }
}
