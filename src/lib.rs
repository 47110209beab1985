//! pilotclock library - new year on a westbound pilot's watch
//!
//! This module exports internal components for integration testing.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod report;
pub mod schedule;
pub mod solver;

pub use error::{InputError, SolveError};
pub use solver::{solve, Solver};
