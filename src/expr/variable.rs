//! Decision variables and the variable builder.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a decision variable.
///
/// Identifiers are drawn from a process-wide counter, so a variable created by
/// one model is never mistaken for a variable of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(u64);

impl VariableId {
    /// Generate a new unique ID.
    pub(crate) fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);
        VariableId(NEXT_ID.fetch_add(1, Ordering::SeqCst))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Value domain of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Domain {
    /// Any real value within the bounds.
    #[default]
    Continuous,
    /// Integer values within the bounds.
    Integer,
    /// 0 or 1 (intersected with the bounds).
    Binary,
}

impl Domain {
    /// Whether the domain restricts values to integers.
    pub fn is_integral(self) -> bool {
        matches!(self, Domain::Integer | Domain::Binary)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Continuous => "continuous",
            Domain::Integer => "integer",
            Domain::Binary => "binary",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower and upper bound of a variable. Infinite values mean unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// `[0, +inf)`, the default for new variables.
    pub fn nonneg() -> Self {
        Self::new(0.0, f64::INFINITY)
    }

    /// `(-inf, +inf)`.
    pub fn free() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Bounds are valid when neither is NaN, `lower <= upper`, and neither
    /// is pinned at the wrong infinity (`lower = +inf` or `upper = -inf`).
    pub fn is_valid(&self) -> bool {
        !self.lower.is_nan()
            && !self.upper.is_nan()
            && self.lower <= self.upper
            && self.lower != f64::INFINITY
            && self.upper != f64::NEG_INFINITY
    }

    /// Bounds as seen by a solver for the given domain: binaries are
    /// intersected with `[0, 1]`.
    pub fn effective(&self, domain: Domain) -> Bounds {
        match domain {
            Domain::Binary => Bounds::new(self.lower.max(0.0), self.upper.min(1.0)),
            _ => *self,
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::nonneg()
    }
}

/// A decision variable owned by a [`Model`](crate::Model).
///
/// Variables are created through [`Model::add_variable`](crate::Model::add_variable)
/// and are immutable afterwards. Cloning yields another handle to the same
/// variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub(crate) id: VariableId,
    pub(crate) name: String,
    pub(crate) domain: Domain,
    pub(crate) bounds: Bounds,
}

impl Variable {
    pub fn id(&self) -> VariableId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn lower(&self) -> f64 {
        self.bounds.lower
    }

    pub fn upper(&self) -> f64 {
        self.bounds.upper
    }

    pub fn is_integral(&self) -> bool {
        self.domain.is_integral()
    }
}

impl From<&Variable> for VariableId {
    fn from(var: &Variable) -> Self {
        var.id
    }
}

/// Builder for variables with a name, domain and bounds.
///
/// ```
/// use optmodel::prelude::*;
///
/// let mut model = Model::new();
/// let x = model
///     .add_variable_with(VariableBuilder::integer().name("x").upper(10.0))
///     .unwrap();
/// assert_eq!(x.name(), "x");
/// assert_eq!(x.bounds(), Bounds::new(0.0, 10.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct VariableBuilder {
    pub(crate) name: Option<String>,
    pub(crate) domain: Domain,
    pub(crate) bounds: Bounds,
}

impl VariableBuilder {
    /// A continuous variable with bounds `[0, +inf)`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Continuous variable builder.
    pub fn continuous() -> Self {
        Self::new()
    }

    /// Integer variable builder.
    pub fn integer() -> Self {
        Self::new().domain(Domain::Integer)
    }

    /// Binary variable builder with bounds `[0, 1]`.
    pub fn binary() -> Self {
        Self::new().domain(Domain::Binary).bounds(0.0, 1.0)
    }

    /// Set the name of the variable.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn domain(mut self, domain: Domain) -> Self {
        self.domain = domain;
        self
    }

    pub fn lower(mut self, lower: f64) -> Self {
        self.bounds.lower = lower;
        self
    }

    pub fn upper(mut self, upper: f64) -> Self {
        self.bounds.upper = upper;
        self
    }

    pub fn bounds(mut self, lower: f64, upper: f64) -> Self {
        self.bounds = Bounds::new(lower, upper);
        self
    }

    /// Remove both bounds.
    pub fn free(mut self) -> Self {
        self.bounds = Bounds::free();
        self
    }
}
