//! Expression types and creation utilities.
//!
//! This module provides the building blocks for models:
//! - `Variable`, `VariableId`, `Domain`, `Bounds` and `VariableBuilder`
//! - `Expression` - the immutable linear/quadratic expression value
//! - Builder functions `linear`, `add`, `scale`, `quadratic_term` and friends

pub mod builders;
pub mod expression;
pub mod variable;

pub use builders::{add, constant, dot, linear, quadratic_term, scale, sub, sum, var};
pub use expression::Expression;
pub use variable::{Bounds, Domain, Variable, VariableBuilder, VariableId};
