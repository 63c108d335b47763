//! Solver interface for optmodel.
//!
//! This module provides:
//! - The [`SolverAdapter`] boundary and the four adapter variants
//! - The solve orchestrator state machine
//! - Matrix stuffing and Clarabel integration for continuous models
//! - HiGHS integration for integer models
//! - CPLEX LP rendering of models

mod adapter;
pub mod clarabel;
mod config;
pub mod integer;
mod linear;
pub mod lp_format;
mod nonlinear;
pub mod orchestrator;
mod quadratic;
mod solution;
pub mod stuffing;

pub use adapter::SolverAdapter;
pub use config::SolverConfig;
pub use integer::{IntegerInput, IntegerOutput, IntegerSolverAdapter};
pub use linear::LinearSolverAdapter;
pub use nonlinear::NonlinearSolverAdapter;
pub use orchestrator::{SolveOrchestrator, SolveState};
pub use quadratic::QuadraticSolverAdapter;
pub use solution::{Solution, SolveStatus};
pub use stuffing::{stuff_model, ColumnMap, ConeDims, StuffedProblem};
