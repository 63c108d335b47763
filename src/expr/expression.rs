//! The linear/quadratic expression value type.
//!
//! An `Expression` is `sum_i c_i x_i + sum_{i<=j} q_ij x_i x_j + k`. It is an
//! immutable value: every combinator returns a new expression and leaves its
//! inputs untouched.
//!
//! Coefficients accumulate with plain `f64` addition, so combining expressions
//! is associative only up to floating-point rounding.

use std::collections::{BTreeMap, HashMap};

use super::variable::VariableId;

/// Linear plus quadratic expression with a constant offset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expression {
    linear: BTreeMap<VariableId, f64>,
    quadratic: BTreeMap<(VariableId, VariableId), f64>,
    constant: f64,
}

fn ordered(a: VariableId, b: VariableId) -> (VariableId, VariableId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl Expression {
    /// The zero expression.
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn from_constant(value: f64) -> Self {
        Self {
            constant: value,
            ..Default::default()
        }
    }

    /// Single linear term: `coeff * var`.
    pub fn term(var: VariableId, coeff: f64) -> Self {
        let mut linear = BTreeMap::new();
        if coeff != 0.0 {
            linear.insert(var, coeff);
        }
        Self {
            linear,
            ..Default::default()
        }
    }

    /// Single quadratic term: `coeff * a * b`.
    pub fn product(a: VariableId, b: VariableId, coeff: f64) -> Self {
        let mut quadratic = BTreeMap::new();
        if coeff != 0.0 {
            quadratic.insert(ordered(a, b), coeff);
        }
        Self {
            quadratic,
            ..Default::default()
        }
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Linear coefficient of `var` (zero if absent).
    pub fn coefficient(&self, var: VariableId) -> f64 {
        self.linear.get(&var).copied().unwrap_or(0.0)
    }

    /// Coefficient of the `a * b` term (zero if absent). Order of `a`, `b` is irrelevant.
    pub fn quadratic_coefficient(&self, a: VariableId, b: VariableId) -> f64 {
        self.quadratic.get(&ordered(a, b)).copied().unwrap_or(0.0)
    }

    /// Linear terms in variable order.
    pub fn linear_terms(&self) -> impl Iterator<Item = (VariableId, f64)> + '_ {
        self.linear.iter().map(|(v, c)| (*v, *c))
    }

    /// Quadratic terms `(a, b, coeff)` with `a <= b`.
    pub fn quadratic_terms(&self) -> impl Iterator<Item = (VariableId, VariableId, f64)> + '_ {
        self.quadratic.iter().map(|((a, b), c)| (*a, *b, *c))
    }

    /// Max degree of any term (0 = constant only).
    pub fn degree(&self) -> usize {
        if !self.quadratic.is_empty() {
            2
        } else {
            usize::from(!self.linear.is_empty())
        }
    }

    pub fn is_linear(&self) -> bool {
        self.quadratic.is_empty()
    }

    pub fn is_constant(&self) -> bool {
        self.linear.is_empty() && self.quadratic.is_empty()
    }

    /// Sum of two expressions; coefficients of shared terms are added.
    pub fn add(&self, other: &Expression) -> Expression {
        let mut linear = self.linear.clone();
        for (var, coeff) in &other.linear {
            *linear.entry(*var).or_insert(0.0) += *coeff;
        }
        let mut quadratic = self.quadratic.clone();
        for (key, coeff) in &other.quadratic {
            *quadratic.entry(*key).or_insert(0.0) += *coeff;
        }
        Expression {
            linear,
            quadratic,
            constant: self.constant + other.constant,
        }
        .pruned()
    }

    /// Scale all terms and the constant by a factor.
    pub fn scale(&self, by: f64) -> Expression {
        Expression {
            linear: self.linear.iter().map(|(v, c)| (*v, c * by)).collect(),
            quadratic: self.quadratic.iter().map(|(k, c)| (*k, c * by)).collect(),
            constant: self.constant * by,
        }
        .pruned()
    }

    pub fn neg(&self) -> Expression {
        self.scale(-1.0)
    }

    /// Add a constant offset.
    pub fn add_constant(&self, value: f64) -> Expression {
        Expression {
            constant: self.constant + value,
            ..self.clone()
        }
    }

    /// Copy with the constant set to zero.
    pub fn without_constant(&self) -> Expression {
        Expression {
            constant: 0.0,
            ..self.clone()
        }
    }

    /// Copy with only the quadratic part.
    pub fn quadratic_part(&self) -> Expression {
        Expression {
            quadratic: self.quadratic.clone(),
            ..Default::default()
        }
    }

    /// All variables referenced by the expression, sorted and deduplicated.
    pub fn variables(&self) -> Vec<VariableId> {
        let mut vars: Vec<VariableId> = self.linear.keys().copied().collect();
        for (a, b) in self.quadratic.keys() {
            vars.push(*a);
            vars.push(*b);
        }
        vars.sort();
        vars.dedup();
        vars
    }

    /// Variables appearing in quadratic terms, sorted and deduplicated.
    pub fn quadratic_variables(&self) -> Vec<VariableId> {
        let mut vars: Vec<VariableId> = self
            .quadratic
            .keys()
            .flat_map(|(a, b)| [*a, *b])
            .collect();
        vars.sort();
        vars.dedup();
        vars
    }

    /// Evaluate at the given point. Returns `None` if a referenced variable has no value.
    pub fn evaluate(&self, values: &HashMap<VariableId, f64>) -> Option<f64> {
        let mut total = self.constant;
        for (var, coeff) in &self.linear {
            total += coeff * values.get(var)?;
        }
        for ((a, b), coeff) in &self.quadratic {
            total += coeff * values.get(a)? * values.get(b)?;
        }
        Some(total)
    }

    /// Whether every coefficient and the constant are finite.
    pub fn is_finite(&self) -> bool {
        self.constant.is_finite()
            && self.linear.values().all(|c| c.is_finite())
            && self.quadratic.values().all(|c| c.is_finite())
    }

    fn pruned(mut self) -> Self {
        self.linear.retain(|_, c| *c != 0.0);
        self.quadratic.retain(|_, c| *c != 0.0);
        self
    }
}

impl From<f64> for Expression {
    fn from(value: f64) -> Self {
        Expression::from_constant(value)
    }
}
