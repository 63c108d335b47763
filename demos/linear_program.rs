//! Basic Linear Programming Example
//!
//! This example demonstrates solving a simple linear program:
//!
//! maximize    c'x
//! subject to  Ax <= b, x >= 0
//!
//! Run with `RUST_LOG=optmodel=debug` to see the solve state transitions.

use optmodel::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Basic Linear Program ===\n");

    // Problem: Maximize profit = 3*x1 + 2*x2 + 5*x3
    // subject to:
    //   2*x1 + x2 + 3*x3 <= 100  (resource constraint 1)
    //   x1 + 2*x2 + x3 <= 80     (resource constraint 2)
    //   x >= 0
    let mut model = Model::new();
    let x1 = model.add_variable_with(VariableBuilder::continuous().name("x1"))?;
    let x2 = model.add_variable_with(VariableBuilder::continuous().name("x2"))?;
    let x3 = model.add_variable_with(VariableBuilder::continuous().name("x3"))?;

    model.add_constraint(dot([(&x1, 2.0), (&x2, 1.0), (&x3, 3.0)]), "<=", 100.0)?;
    model.add_constraint(dot([(&x1, 1.0), (&x2, 2.0), (&x3, 1.0)]), "<=", 80.0)?;
    model.set_objective(dot([(&x1, 3.0), (&x2, 2.0), (&x3, 5.0)]), Sense::Maximize)?;

    println!("{model}");

    println!("Solving...");
    let solution = model.solve(&LinearSolverAdapter::new())?;

    println!("\nResults:");
    println!("  Status: {}", solution.status());
    println!("  Optimal profit: {:.4}", solution.objective_value());
    for v in [&x1, &x2, &x3] {
        println!("  {} = {:.4}", v.name(), solution.value(v).unwrap_or(0.0));
    }
    println!("  Iterations: {:?}", solution.iterations());
    Ok(())
}
