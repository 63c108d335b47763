//! Integer Programming Example
//!
//! maximize    x + y
//! subject to  50x + 24y <= 2400
//!             30x + 33y <= 2100
//!             x, y >= 0 integer
//!
//! Solved in process by HiGHS.

use optmodel::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Integer Program ===\n");

    let mut model = Model::new();
    let x = model
        .add_variable_with(VariableBuilder::integer().name("x"))
        .expect("valid variable");
    let y = model
        .add_variable_with(VariableBuilder::integer().name("y"))
        .expect("valid variable");
    model
        .add_constraint(dot([(&x, 50.0), (&y, 24.0)]), "<=", 2400.0)
        .expect("valid constraint");
    model
        .add_constraint(dot([(&x, 30.0), (&y, 33.0)]), "<=", 2100.0)
        .expect("valid constraint");
    model
        .set_objective(add(&var(&x), &var(&y)), Sense::Maximize)
        .expect("valid objective");

    println!("{model}");

    let adapter =
        IntegerSolverAdapter::with_config(SolverConfig::new().with_time_limit(30.0).with_mip_gap(0.0));

    match model.solve(&adapter) {
        Ok(solution) => {
            println!("Results:");
            println!("  Status: {}", solution.status());
            println!("  Objective: {:.1}", solution.objective_value());
            println!("  x = {:.1}", solution.value(&x).unwrap_or(0.0));
            println!("  y = {:.1}", solution.value(&y).unwrap_or(0.0));
        }
        Err(err) => {
            eprintln!("Solve failed [{}]: {err}", err.code());
            eprintln!("Model state: {}", model.state());
        }
    }
}
