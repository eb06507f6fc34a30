//! Weekly employee shift scheduling.
//!
//! Builds a boolean assignment model over one ISO week (coverage,
//! one-shift-per-day, rest and night-shift fatigue constraints), solves it
//! with a MILP backend while minimizing each employee's deviation from
//! their contracted hours, and renders the result as a flat shift list
//! plus a calendar-style grid view.

pub mod api;
pub mod converters;
pub mod demo_data;
pub mod domain;
pub mod dto;
pub mod model;
pub mod scheduler;
pub mod solver;
