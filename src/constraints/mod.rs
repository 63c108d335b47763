//! Constraints and relational operators.

pub mod constraint;

pub use constraint::{Constraint, ConstraintId, IntoRelation, Relation};
