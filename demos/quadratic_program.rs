//! Quadratic Programming Example
//!
//! minimize    (x - 0.5)^2 + y
//! subject to  x + y <= 1, x, y >= 0
//!
//! The expression's constant (0.25) is not seen by the solver. It is reported
//! separately and included in `total_objective`.

use optmodel::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Quadratic Program ===\n");

    let mut model = Model::new();
    let x = model.add_variable_with(VariableBuilder::continuous().name("x"))?;
    let y = model.add_variable_with(VariableBuilder::continuous().name("y"))?;
    model.add_constraint(add(&var(&x), &var(&y)), "<=", 1.0)?;

    // (x - 0.5)^2 + y = x^2 - x + 0.25 + y
    let objective = sum([
        &quadratic_term(&x, &x, 1.0),
        &linear(&x, -1.0),
        &constant(0.25),
        &linear(&y, 1.0),
    ]);
    model.set_objective(objective, Sense::Minimize)?;

    println!("{model}");

    let config = SolverConfig::new().with_tolerance(1e-9);
    let solution = model.solve(&QuadraticSolverAdapter::with_config(config))?;

    println!("Results:");
    println!("  Status: {}", solution.status());
    println!("  Objective (variable terms): {:.6}", solution.objective_value());
    println!("  Objective constant: {:.6}", solution.objective_constant());
    println!("  Total objective: {:.6}", solution.total_objective());
    println!("  x = {:.6}", model.value(&x)?);
    println!("  y = {:.6}", model.value(&y)?);
    Ok(())
}
