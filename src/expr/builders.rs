//! Free functions for building expressions without operator overloading.
//!
//! ```
//! use optmodel::prelude::*;
//!
//! let mut model = Model::new();
//! let x = model.add_variable(Domain::Continuous, 0.0, f64::INFINITY).unwrap();
//! let y = model.add_variable(Domain::Continuous, 0.0, f64::INFINITY).unwrap();
//!
//! // (x - 0.5)^2 + y
//! let objective = sum([
//!     &quadratic_term(&x, &x, 1.0),
//!     &linear(&x, -1.0),
//!     &constant(0.25),
//!     &var(&y),
//! ]);
//! assert_eq!(objective.degree(), 2);
//! ```

use super::expression::Expression;
use super::variable::Variable;

/// `coefficient * variable`.
pub fn linear(variable: &Variable, coefficient: f64) -> Expression {
    Expression::term(variable.id(), coefficient)
}

/// The variable itself, with coefficient 1.
pub fn var(variable: &Variable) -> Expression {
    linear(variable, 1.0)
}

/// A constant expression.
pub fn constant(value: f64) -> Expression {
    Expression::from_constant(value)
}

/// `a + b`.
pub fn add(a: &Expression, b: &Expression) -> Expression {
    a.add(b)
}

/// `a - b`.
pub fn sub(a: &Expression, b: &Expression) -> Expression {
    a.add(&b.neg())
}

/// `k * expr`.
pub fn scale(expr: &Expression, k: f64) -> Expression {
    expr.scale(k)
}

/// `coefficient * a * b`. Passing the same variable twice gives a square term.
pub fn quadratic_term(a: &Variable, b: &Variable, coefficient: f64) -> Expression {
    Expression::product(a.id(), b.id(), coefficient)
}

/// Sum of any number of expressions, folded left to right.
pub fn sum<'a>(exprs: impl IntoIterator<Item = &'a Expression>) -> Expression {
    exprs
        .into_iter()
        .fold(Expression::zero(), |acc, e| acc.add(e))
}

/// Weighted sum `sum_i c_i x_i` of variables.
pub fn dot<'a>(terms: impl IntoIterator<Item = (&'a Variable, f64)>) -> Expression {
    terms
        .into_iter()
        .fold(Expression::zero(), |acc, (v, c)| acc.add(&linear(v, c)))
}
