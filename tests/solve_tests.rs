//! Solve tests for the Clarabel-backed adapters.
//!
//! Test cases are defined as data, then run programmatically.

use optmodel::prelude::*;

/// Tolerance for comparing floating point results
const TOL: f64 = 1e-4;

/// A test case definition
struct TestCase {
    name: &'static str,
    /// Builds the model and returns it with the expected objective value
    /// (excluding the objective's constant).
    build: fn() -> (Model, f64),
}

fn nonneg(model: &mut Model) -> Variable {
    model
        .add_variable(Domain::Continuous, 0.0, f64::INFINITY)
        .unwrap()
}

fn free(model: &mut Model) -> Variable {
    model
        .add_variable_with(VariableBuilder::continuous().free())
        .unwrap()
}

fn linear_test_cases() -> Vec<TestCase> {
    vec![
        TestCase {
            name: "trivial_lp",
            build: || {
                // minimize x + y s.t. x + y <= 1, x, y >= 0
                // optimal: x = y = 0, value = 0
                let mut m = Model::new();
                let x = nonneg(&mut m);
                let y = nonneg(&mut m);
                let total = add(&var(&x), &var(&y));
                m.add_constraint(total.clone(), "<=", 1.0).unwrap();
                m.set_objective(total, Sense::Minimize).unwrap();
                (m, 0.0)
            },
        },
        TestCase {
            name: "maximize_budget",
            build: || {
                // maximize x + y s.t. x + y <= 1
                let mut m = Model::new();
                let x = nonneg(&mut m);
                let y = nonneg(&mut m);
                let total = add(&var(&x), &var(&y));
                m.add_constraint(total.clone(), "<=", 1.0).unwrap();
                m.set_objective(total, Sense::Maximize).unwrap();
                (m, 1.0)
            },
        },
        TestCase {
            name: "equality_constraint",
            build: || {
                // minimize 2x + 3y s.t. x + y == 2
                // optimal: x = 2, y = 0, value = 4
                let mut m = Model::new();
                let x = nonneg(&mut m);
                let y = nonneg(&mut m);
                m.add_constraint(add(&var(&x), &var(&y)), "==", 2.0).unwrap();
                m.set_objective(dot([(&x, 2.0), (&y, 3.0)]), Sense::Minimize)
                    .unwrap();
                (m, 4.0)
            },
        },
        TestCase {
            name: "lower_bound_row_with_upper_bound",
            build: || {
                // minimize x + 2y s.t. x + y >= 3, 0 <= x <= 1
                // optimal: x = 1, y = 2, value = 5
                let mut m = Model::new();
                let x = m.add_variable(Domain::Continuous, 0.0, 1.0).unwrap();
                let y = nonneg(&mut m);
                m.add_constraint(add(&var(&x), &var(&y)), ">=", 3.0).unwrap();
                m.set_objective(dot([(&x, 1.0), (&y, 2.0)]), Sense::Minimize)
                    .unwrap();
                (m, 5.0)
            },
        },
        TestCase {
            name: "free_variable",
            build: || {
                // minimize x s.t. x >= -3, x free
                let mut m = Model::new();
                let x = free(&mut m);
                m.add_constraint(var(&x), ">=", -3.0).unwrap();
                m.set_objective(var(&x), Sense::Minimize).unwrap();
                (m, -3.0)
            },
        },
        TestCase {
            name: "constant_in_constraint",
            build: || {
                // minimize x s.t. x + 2 >= 5
                let mut m = Model::new();
                let x = nonneg(&mut m);
                m.add_constraint(add(&var(&x), &constant(2.0)), ">=", 5.0)
                    .unwrap();
                m.set_objective(var(&x), Sense::Minimize).unwrap();
                (m, 3.0)
            },
        },
    ]
}

fn quadratic_test_cases() -> Vec<TestCase> {
    vec![
        TestCase {
            name: "shifted_square",
            build: || {
                // minimize (x - 0.5)^2 + y s.t. x + y <= 1
                // optimal: x = 0.5, y = 0, value = -0.25 + 0.25 constant
                let mut m = Model::new();
                let x = nonneg(&mut m);
                let y = nonneg(&mut m);
                m.add_constraint(add(&var(&x), &var(&y)), "<=", 1.0).unwrap();
                let obj = sum([
                    &quadratic_term(&x, &x, 1.0),
                    &linear(&x, -1.0),
                    &linear(&y, 1.0),
                    &constant(0.25),
                ]);
                m.set_objective(obj, Sense::Minimize).unwrap();
                (m, -0.25)
            },
        },
        TestCase {
            name: "concave_maximize_bounded",
            build: || {
                // maximize -(x - 1)^2 s.t. 0 <= x <= 0.5
                // optimal: x = 0.5, -x^2 + 2x = 0.75
                let mut m = Model::new();
                let x = m.add_variable(Domain::Continuous, 0.0, 0.5).unwrap();
                let obj = sum([
                    &quadratic_term(&x, &x, -1.0),
                    &linear(&x, 2.0),
                    &constant(-1.0),
                ]);
                m.set_objective(obj, Sense::Maximize).unwrap();
                (m, 0.75)
            },
        },
        TestCase {
            name: "sum_squares_on_line",
            build: || {
                // minimize x^2 + y^2 s.t. x + y == 1
                // optimal: x = y = 0.5, value = 0.5
                let mut m = Model::new();
                let x = nonneg(&mut m);
                let y = nonneg(&mut m);
                m.add_constraint(add(&var(&x), &var(&y)), "==", 1.0).unwrap();
                let obj = add(&quadratic_term(&x, &x, 1.0), &quadratic_term(&y, &y, 1.0));
                m.set_objective(obj, Sense::Minimize).unwrap();
                (m, 0.5)
            },
        },
        TestCase {
            name: "cross_term",
            build: || {
                // minimize x^2 + xy + y^2 - 3x s.t. x <= 10, free
                // gradient: 2x + y = 3, x + 2y = 0 => x = 2, y = -1, value = -3
                let mut m = Model::new();
                let x = free(&mut m);
                let y = free(&mut m);
                m.add_constraint(var(&x), "<=", 10.0).unwrap();
                let obj = sum([
                    &quadratic_term(&x, &x, 1.0),
                    &quadratic_term(&x, &y, 1.0),
                    &quadratic_term(&y, &y, 1.0),
                    &linear(&x, -3.0),
                ]);
                m.set_objective(obj, Sense::Minimize).unwrap();
                (m, -3.0)
            },
        },
    ]
}

fn nonlinear_test_cases() -> Vec<TestCase> {
    vec![
        TestCase {
            name: "linear_over_disk",
            build: || {
                // maximize x + y s.t. x^2 + y^2 <= 1
                // optimal: x = y = 1/sqrt(2), value = sqrt(2)
                let mut m = Model::new();
                let x = free(&mut m);
                let y = free(&mut m);
                let disk = add(&quadratic_term(&x, &x, 1.0), &quadratic_term(&y, &y, 1.0));
                m.add_constraint(disk, "<=", 1.0).unwrap();
                m.set_objective(add(&var(&x), &var(&y)), Sense::Maximize)
                    .unwrap();
                (m, std::f64::consts::SQRT_2)
            },
        },
        TestCase {
            name: "square_upper_bound",
            build: || {
                // minimize x s.t. x^2 <= 4
                let mut m = Model::new();
                let x = free(&mut m);
                m.add_constraint(quadratic_term(&x, &x, 1.0), "<=", 4.0)
                    .unwrap();
                m.set_objective(var(&x), Sense::Minimize).unwrap();
                (m, -2.0)
            },
        },
        TestCase {
            name: "concave_lower_bound",
            build: || {
                // maximize y s.t. -x^2 - y^2 >= -1
                let mut m = Model::new();
                let x = free(&mut m);
                let y = free(&mut m);
                let neg_disk = add(&quadratic_term(&x, &x, -1.0), &quadratic_term(&y, &y, -1.0));
                m.add_constraint(neg_disk, ">=", -1.0).unwrap();
                m.set_objective(var(&y), Sense::Maximize).unwrap();
                (m, 1.0)
            },
        },
        TestCase {
            name: "projection_onto_disk",
            build: || {
                // minimize (x - 2)^2 + (y - 2)^2 s.t. x^2 + y^2 <= 2
                // optimal: x = y = 1; variable terms give 1 + 1 - 4 - 4 = -6
                let mut m = Model::new();
                let x = free(&mut m);
                let y = free(&mut m);
                let disk = add(&quadratic_term(&x, &x, 1.0), &quadratic_term(&y, &y, 1.0));
                m.add_constraint(disk.clone(), "<=", 2.0).unwrap();
                let obj = sum([&disk, &linear(&x, -4.0), &linear(&y, -4.0), &constant(8.0)]);
                m.set_objective(obj, Sense::Minimize).unwrap();
                (m, -6.0)
            },
        },
    ]
}

fn run_cases<A: SolverAdapter>(cases: Vec<TestCase>, adapter: &A) {
    for case in cases {
        let (mut model, expected) = (case.build)();
        let result = model.solve(adapter);
        assert!(result.is_ok(), "Model '{}' should solve: {:?}", case.name, result.err());

        let solution = model.solution().unwrap();
        assert_eq!(
            solution.status(),
            SolveStatus::Optimal,
            "Model '{}' should be optimal",
            case.name
        );
        assert!(
            (solution.objective_value() - expected).abs() < TOL,
            "Model '{}': expected {}, got {}",
            case.name,
            expected,
            solution.objective_value()
        );
        assert_eq!(model.state(), SolveState::Solved);
    }
}

#[test]
fn test_linear_models() {
    run_cases(linear_test_cases(), &LinearSolverAdapter::new());
}

#[test]
fn test_quadratic_models() {
    run_cases(quadratic_test_cases(), &QuadraticSolverAdapter::new());
}

#[test]
fn test_nonlinear_models() {
    run_cases(nonlinear_test_cases(), &NonlinearSolverAdapter::new());
}

#[test]
fn test_linear_models_with_nonlinear_adapter() {
    // LPs are a subset of what the nonlinear adapter accepts
    run_cases(linear_test_cases(), &NonlinearSolverAdapter::new());
    run_cases(quadratic_test_cases(), &NonlinearSolverAdapter::new());
}

#[test]
fn test_trivial_lp_values() {
    let mut m = Model::new();
    let x = nonneg(&mut m);
    let y = nonneg(&mut m);
    let total = add(&var(&x), &var(&y));
    m.add_constraint(total.clone(), "<=", 1.0).unwrap();
    m.set_objective(total, Sense::Minimize).unwrap();

    let solution = m.solve(&LinearSolverAdapter::new()).unwrap();
    assert!(solution.status().is_optimal());
    assert!(solution.objective_value().abs() < TOL);
    assert!(solution.value(&x).unwrap().abs() < TOL);
    assert!(solution.value(&y).unwrap().abs() < TOL);
    assert_eq!(solution.solver(), "linear");
    assert!(solution.iterations().is_some());
}

#[test]
fn test_quadratic_offset_convention() {
    let (mut m, _) = (quadratic_test_cases()[0].build)();
    let x = m.variables()[0].clone();
    let y = m.variables()[1].clone();

    let solution = m.solve(&QuadraticSolverAdapter::new()).unwrap();
    assert!((solution.objective_value() + 0.25).abs() < TOL);
    assert!((solution.objective_constant() - 0.25).abs() < 1e-12);
    assert!(solution.total_objective().abs() < TOL);
    assert!((m.value(&x).unwrap() - 0.5).abs() < TOL);
    assert!(m.value(&y).unwrap().abs() < TOL);
}

#[test]
fn test_infeasible() {
    let mut m = Model::new();
    let x = nonneg(&mut m);
    let y = nonneg(&mut m);
    m.add_constraint(add(&var(&x), &var(&y)), "<=", 1.0).unwrap();
    m.add_constraint(add(&var(&x), &var(&y)), ">=", 2.0).unwrap();
    m.set_objective(var(&x), Sense::Minimize).unwrap();

    let err = m.solve(&LinearSolverAdapter::new()).unwrap_err();
    match err {
        OptError::SolverFailure { status, solver, .. } => {
            assert_eq!(status, SolveStatus::Infeasible);
            assert_eq!(solver, "linear");
        }
        other => panic!("expected SolverFailure, got {other:?}"),
    }
    assert_eq!(m.state(), SolveState::Failed);
    assert!(matches!(m.solution(), Err(OptError::NoSolution)));
}

#[test]
fn test_unbounded() {
    let mut m = Model::new();
    let x = nonneg(&mut m);
    m.set_objective(var(&x), Sense::Maximize).unwrap();

    let err = m.solve(&LinearSolverAdapter::new()).unwrap_err();
    assert!(
        matches!(err, OptError::SolverFailure { status: SolveStatus::Unbounded, .. }),
        "unexpected error: {err:?}"
    );
}

#[test]
fn test_integer_variable_rejected_by_linear_adapter() {
    let mut m = Model::new();
    let x = m.add_variable(Domain::Integer, 0.0, 10.0).unwrap();
    m.set_objective(var(&x), Sense::Minimize).unwrap();

    let err = m.solve(&LinearSolverAdapter::new()).unwrap_err();
    assert!(matches!(err, OptError::UnsupportedModel { adapter: "linear", .. }));
    assert_eq!(err.code(), "MODEL_UNSUPPORTED");
    assert_eq!(m.state(), SolveState::Failed);
}

#[test]
fn test_solve_without_objective() {
    let mut m = Model::new();
    let _x = nonneg(&mut m);
    let err = m.solve(&LinearSolverAdapter::new()).unwrap_err();
    assert!(matches!(err, OptError::NoObjective));
    assert_eq!(m.state(), SolveState::Built);
}

#[test]
fn test_solve_is_idempotent() {
    let (mut m, _) = (quadratic_test_cases()[0].build)();
    let adapter = QuadraticSolverAdapter::new();
    let first = m.solve(&adapter).unwrap().clone();
    let second = m.solve(&adapter).unwrap().clone();
    assert_eq!(first.status(), second.status());
    assert_eq!(first.objective_value(), second.objective_value());
    assert_eq!(first.values().count(), second.values().count());
    for ((id_a, a), (id_b, b)) in first.values().zip(second.values()) {
        assert_eq!(id_a, id_b);
        assert_eq!(a, b);
    }
}

#[test]
fn test_modification_invalidates_solution() {
    let (mut m, _) = (linear_test_cases()[1].build)();
    m.solve(&LinearSolverAdapter::new()).unwrap();
    assert!(m.solution().is_ok());

    let x = m.variables()[0].clone();
    m.add_constraint(var(&x), "<=", 0.25).unwrap();
    assert!(matches!(m.solution(), Err(OptError::NoSolution)));
    assert_eq!(m.state(), SolveState::Built);

    let solution = m.solve(&LinearSolverAdapter::new()).unwrap();
    assert!((solution.objective_value() - 1.0).abs() < TOL);
    assert!(solution.value(&x).unwrap() <= 0.25 + TOL);
}

#[test]
fn test_failed_solve_keeps_previous_solution() {
    let (mut m, expected) = (nonlinear_test_cases()[0].build)();
    m.solve(&NonlinearSolverAdapter::new()).unwrap();

    // quadratic constraint is out of reach for the linear adapter
    let err = m.solve(&LinearSolverAdapter::new()).unwrap_err();
    assert!(matches!(err, OptError::UnsupportedModel { .. }));
    assert_eq!(m.state(), SolveState::Failed);

    let kept = m.solution().unwrap();
    assert_eq!(kept.solver(), "nonlinear");
    assert!((kept.objective_value() - expected).abs() < TOL);
}

#[test]
fn test_nonconvex_rejected_before_solve() {
    let mut m = Model::new();
    let x = m.add_variable(Domain::Continuous, 0.0, 1.0).unwrap();
    let y = m.add_variable(Domain::Continuous, 0.0, 1.0).unwrap();
    // x*y is indefinite
    m.set_objective(quadratic_term(&x, &y, 1.0), Sense::Minimize)
        .unwrap();
    assert!(matches!(
        m.solve(&QuadraticSolverAdapter::new()),
        Err(OptError::UnsupportedModel { .. })
    ));
    assert!(matches!(
        m.solve(&NonlinearSolverAdapter::new()),
        Err(OptError::UnsupportedModel { .. })
    ));
}

#[test]
fn test_config_is_applied() {
    let adapter = LinearSolverAdapter::with_config(
        SolverConfig::new().with_tolerance(1e-9).with_max_iter(200),
    );
    let (mut m, expected) = (linear_test_cases()[2].build)();
    let solution = m.solve(&adapter).unwrap();
    assert!((solution.objective_value() - expected).abs() < TOL);
    assert!(solution.iterations().unwrap() <= 200);
}
