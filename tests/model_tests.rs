//! Model building tests: expressions, constraints and invalidation.

use std::collections::HashMap;

use optmodel::prelude::*;

/// Tolerance for comparing floating point results
const TOL: f64 = 1e-4;

fn two_vars() -> (Model, Variable, Variable) {
    let mut m = Model::new();
    let x = m.add_variable(Domain::Continuous, 0.0, 10.0).unwrap();
    let y = m.add_variable(Domain::Continuous, 0.0, 10.0).unwrap();
    (m, x, y)
}

#[test]
fn test_combination_sums_shared_coefficients() {
    let (_m, x, y) = two_vars();
    let a = add(&linear(&x, 2.0), &linear(&y, 1.0));
    let b = add(&linear(&x, 3.0), &constant(4.0));
    let c = add(&a, &b);

    assert_eq!(c.coefficient(x.id()), 5.0);
    assert_eq!(c.coefficient(y.id()), 1.0);
    assert_eq!(c.constant(), 4.0);
    // inputs are untouched
    assert_eq!(a.coefficient(x.id()), 2.0);
    assert_eq!(b.constant(), 4.0);
}

#[test]
fn test_combination_is_associative_within_tolerance() {
    let (_m, x, y) = two_vars();
    let a = linear(&x, 0.1);
    let b = add(&linear(&x, 0.2), &quadratic_term(&x, &y, 0.7));
    let c = add(&linear(&x, 0.3), &quadratic_term(&y, &x, 0.3));

    let left = add(&add(&a, &b), &c);
    let right = add(&a, &add(&b, &c));
    assert!((left.coefficient(x.id()) - right.coefficient(x.id())).abs() < TOL);
    assert!((left.coefficient(x.id()) - 0.6).abs() < TOL);
    // x*y and y*x are the same term
    assert!((left.quadratic_coefficient(x.id(), y.id()) - 1.0).abs() < TOL);
    assert_eq!(left.degree(), 2);
}

#[test]
fn test_cancellation_drops_terms() {
    let (_m, x, _y) = two_vars();
    let e = sub(&linear(&x, 2.0), &scale(&linear(&x, 1.0), 2.0));
    assert!(e.is_constant());
    assert_eq!(e.degree(), 0);
    assert!(e.variables().is_empty());
}

#[test]
fn test_evaluate() {
    let (_m, x, y) = two_vars();
    let e = sum([
        &quadratic_term(&x, &x, 1.0),
        &linear(&y, -2.0),
        &constant(1.5),
    ]);
    let values = HashMap::from([(x.id(), 3.0), (y.id(), 0.5)]);
    assert_eq!(e.evaluate(&values), Some(9.0 - 1.0 + 1.5));
    assert_eq!(e.evaluate(&HashMap::new()), None);
}

#[test]
fn test_operator_spellings() {
    let (mut m, x, _y) = two_vars();
    for op in ["<=", ">=", "==", "=", "≤", "≥"] {
        assert!(m.add_constraint(var(&x), op, 1.0).is_ok(), "operator {op}");
    }
    m.add_constraint(var(&x), '≥', 0.0).unwrap();
    m.add_constraint(var(&x), String::from("<="), 9.0).unwrap();
    for op in ["<", ">", "!=", "=<=", ""] {
        let err = m.add_constraint(var(&x), op, 1.0).unwrap_err();
        assert!(matches!(err, OptError::UnsupportedOperator(_)), "operator {op}");
        assert_eq!(err.code(), "CONSTRAINT_UNSUPPORTED_OPERATOR");
    }
    assert_eq!(m.constraints().len(), 8);
}

#[test]
fn test_constraint_satisfaction() {
    let (mut m, x, y) = two_vars();
    let id = m
        .add_constraint(add(&var(&x), &var(&y)), Relation::LessEqual, 1.0)
        .unwrap();
    let c = &m.constraints()[id.index()];
    let inside = HashMap::from([(x.id(), 0.25), (y.id(), 0.5)]);
    let outside = HashMap::from([(x.id(), 0.75), (y.id(), 0.5)]);
    assert_eq!(c.is_satisfied_by(&inside, TOL), Some(true));
    assert_eq!(c.is_satisfied_by(&outside, TOL), Some(false));
}

#[test]
fn test_every_modification_invalidates() {
    let (mut m, x, y) = two_vars();
    m.set_objective(add(&var(&x), &var(&y)), Sense::Minimize)
        .unwrap();
    let adapter = LinearSolverAdapter::new();

    m.solve(&adapter).unwrap();
    m.add_variable(Domain::Continuous, 0.0, 1.0).unwrap();
    assert!(m.solution().is_err());

    m.solve(&adapter).unwrap();
    m.add_constraint(var(&x), ">=", 1.0).unwrap();
    assert!(m.solution().is_err());

    m.solve(&adapter).unwrap();
    m.set_objective(var(&y), Sense::Maximize).unwrap();
    assert!(m.solution().is_err());
    assert_eq!(m.state(), SolveState::Built);
}

#[test]
fn test_failed_addition_does_not_invalidate() {
    let (mut m, x, _y) = two_vars();
    m.set_objective(var(&x), Sense::Minimize).unwrap();
    m.solve(&LinearSolverAdapter::new()).unwrap();

    assert!(m.add_constraint(var(&x), "<>", 1.0).is_err());
    assert!(m.add_variable(Domain::Integer, 1.0, 0.0).is_err());
    assert!(m.solution().is_ok());
    assert_eq!(m.state(), SolveState::Solved);
}

#[test]
fn test_display_renders_lp() {
    let mut m = Model::new();
    let x = m
        .add_variable_with(VariableBuilder::integer().name("chairs").upper(40.0))
        .unwrap();
    let y = m
        .add_variable_with(VariableBuilder::continuous().name("wood").free())
        .unwrap();
    m.add_constraint(dot([(&x, 3.0), (&y, -1.0)]), ">=", 2.0)
        .unwrap();
    m.set_objective(var(&x), Sense::Maximize).unwrap();

    let text = m.to_string();
    assert_eq!(
        text,
        "Maximize\n obj: chairs\nSubject To\n c0: 3 chairs - wood >= 2\nBounds\n 0 <= chairs <= 40\n wood free\nGeneral\n chairs\nEnd\n"
    );
}
