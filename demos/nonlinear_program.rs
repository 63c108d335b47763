//! Nonlinear (quadratically constrained) Example
//!
//! Projection of the point (2, 1) onto the unit disk:
//!
//! minimize    (x - 2)^2 + (y - 1)^2
//! subject to  x^2 + y^2 <= 1
//!
//! Also shows an adapter rejecting a model it cannot express.

use optmodel::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Nonlinear Program ===\n");

    let mut model = Model::new();
    let x = model.add_variable_with(VariableBuilder::continuous().name("x").free())?;
    let y = model.add_variable_with(VariableBuilder::continuous().name("y").free())?;

    let disk = add(&quadratic_term(&x, &x, 1.0), &quadratic_term(&y, &y, 1.0));
    model.add_constraint(disk.clone(), "<=", 1.0)?;

    // (x - 2)^2 + (y - 1)^2 = x^2 + y^2 - 4x - 2y + 5
    let objective = sum([&disk, &linear(&x, -4.0), &linear(&y, -2.0), &constant(5.0)]);
    model.set_objective(objective, Sense::Minimize)?;

    println!("{model}");

    match model.solve(&QuadraticSolverAdapter::new()) {
        Ok(_) => println!("Unexpected: the quadratic adapter accepted a quadratic constraint"),
        Err(err) => println!("Quadratic adapter: {err}\n"),
    }

    let solution = model.solve(&NonlinearSolverAdapter::new())?;
    let norm = 5.0_f64.sqrt();
    println!("Results:");
    println!("  Status: {}", solution.status());
    println!("  Distance^2: {:.6}", solution.total_objective());
    println!("  x = {:.6} (expected {:.6})", model.value(&x)?, 2.0 / norm);
    println!("  y = {:.6} (expected {:.6})", model.value(&y)?, 1.0 / norm);
    Ok(())
}
