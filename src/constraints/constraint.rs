//! Constraint types for optimization models.
//!
//! A constraint is `expression <relation> rhs`. Constraints are stored by the
//! model in insertion order and are never deduplicated.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{OptError, Result};
use crate::expr::{Expression, VariableId};

/// Relational operator of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `expr <= rhs`
    LessEqual,
    /// `expr >= rhs`
    GreaterEqual,
    /// `expr == rhs`
    Equal,
}

impl Relation {
    pub fn as_str(self) -> &'static str {
        match self {
            Relation::LessEqual => "<=",
            Relation::GreaterEqual => ">=",
            Relation::Equal => "==",
        }
    }

    /// Check `lhs <relation> rhs` with an absolute tolerance.
    pub fn holds(self, lhs: f64, rhs: f64, tol: f64) -> bool {
        match self {
            Relation::LessEqual => lhs <= rhs + tol,
            Relation::GreaterEqual => lhs >= rhs - tol,
            Relation::Equal => (lhs - rhs).abs() <= tol,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relation {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "<=" | "=<" | "≤" => Ok(Relation::LessEqual),
            ">=" | "=>" | "≥" => Ok(Relation::GreaterEqual),
            "==" | "=" => Ok(Relation::Equal),
            other => Err(OptError::UnsupportedOperator(other.to_string())),
        }
    }
}

/// Conversion into a [`Relation`], failing with `UnsupportedOperator`.
pub trait IntoRelation {
    fn into_relation(self) -> Result<Relation>;
}

impl IntoRelation for Relation {
    fn into_relation(self) -> Result<Relation> {
        Ok(self)
    }
}

impl IntoRelation for &str {
    fn into_relation(self) -> Result<Relation> {
        self.parse()
    }
}

impl IntoRelation for String {
    fn into_relation(self) -> Result<Relation> {
        self.parse()
    }
}

impl IntoRelation for char {
    fn into_relation(self) -> Result<Relation> {
        match self {
            '≤' => Ok(Relation::LessEqual),
            '≥' => Ok(Relation::GreaterEqual),
            '=' => Ok(Relation::Equal),
            other => Err(OptError::UnsupportedOperator(other.to_string())),
        }
    }
}

/// Position of a constraint in its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintId(pub(crate) usize);

impl ConstraintId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A constraint in an optimization model.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub(crate) id: ConstraintId,
    pub(crate) expr: Expression,
    pub(crate) relation: Relation,
    pub(crate) rhs: f64,
}

impl Constraint {
    pub fn id(&self) -> ConstraintId {
        self.id
    }

    pub fn expression(&self) -> &Expression {
        &self.expr
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    pub fn is_linear(&self) -> bool {
        self.expr.is_linear()
    }

    /// The constraint with the expression's constant moved to the right-hand side.
    pub fn normalized(&self) -> (Expression, f64) {
        (self.expr.without_constant(), self.rhs - self.expr.constant())
    }

    /// Get all variable IDs in this constraint.
    pub fn variables(&self) -> Vec<VariableId> {
        self.expr.variables()
    }

    /// Whether the point satisfies the constraint within `tol`.
    /// Returns `None` if a referenced variable has no value.
    pub fn is_satisfied_by(&self, values: &HashMap<VariableId, f64>, tol: f64) -> Option<bool> {
        let lhs = self.expr.evaluate(values)?;
        Some(self.relation.holds(lhs, self.rhs, tol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_relations() {
        assert_eq!("<=".parse::<Relation>().unwrap(), Relation::LessEqual);
        assert_eq!(" >= ".parse::<Relation>().unwrap(), Relation::GreaterEqual);
        assert_eq!("=".parse::<Relation>().unwrap(), Relation::Equal);
        assert_eq!("==".into_relation().unwrap(), Relation::Equal);
        assert_eq!('≤'.into_relation().unwrap(), Relation::LessEqual);
    }

    #[test]
    fn test_unsupported_operator() {
        for op in ["<", ">", "!=", ""] {
            let err = op.into_relation().unwrap_err();
            assert!(matches!(err, OptError::UnsupportedOperator(_)), "{op}");
        }
        assert!(matches!(
            '<'.into_relation(),
            Err(OptError::UnsupportedOperator(_))
        ));
    }

    #[test]
    fn test_normalized_moves_constant() {
        let x = VariableId::next();
        let c = Constraint {
            id: ConstraintId(0),
            expr: Expression::term(x, 1.0).add_constant(2.0),
            relation: Relation::LessEqual,
            rhs: 5.0,
        };
        let (lhs, rhs) = c.normalized();
        assert_eq!(lhs.constant(), 0.0);
        assert_eq!(rhs, 3.0);
    }

    #[test]
    fn test_is_satisfied_by() {
        let x = VariableId::next();
        let c = Constraint {
            id: ConstraintId(0),
            expr: Expression::term(x, 2.0),
            relation: Relation::Equal,
            rhs: 4.0,
        };
        assert_eq!(c.is_satisfied_by(&HashMap::from([(x, 2.0)]), 1e-9), Some(true));
        assert_eq!(c.is_satisfied_by(&HashMap::from([(x, 2.1)]), 1e-9), Some(false));
        assert_eq!(c.is_satisfied_by(&HashMap::new(), 1e-9), None);
    }
}
