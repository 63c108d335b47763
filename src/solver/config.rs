//! Solver configuration.

/// Configuration options shared by all adapters.
///
/// Every field is optional; `None` means "use the solver's default". Options a
/// solver has no notion of (for example `mip_gap` for a continuous solver) are
/// ignored by that adapter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverConfig {
    /// Time limit in seconds.
    pub time_limit: Option<f64>,
    /// Relative MIP gap tolerance.
    pub mip_gap: Option<f64>,
    /// Feasibility and optimality tolerance.
    pub tolerance: Option<f64>,
    /// Iteration limit.
    pub max_iter: Option<u32>,
    /// Number of threads.
    pub threads: Option<u32>,
    /// Print solver output.
    pub verbose: Option<bool>,
}

impl SolverConfig {
    /// Create a new configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    pub fn with_mip_gap(mut self, gap: f64) -> Self {
        self.mip_gap = Some(gap);
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = Some(tol);
        self
    }

    pub fn with_max_iter(mut self, iterations: u32) -> Self {
        self.max_iter = Some(iterations);
        self
    }

    pub fn with_threads(mut self, count: u32) -> Self {
        self.threads = Some(count);
        self
    }

    pub fn with_verbose(mut self, enabled: bool) -> Self {
        self.verbose = Some(enabled);
        self
    }

    /// Check if this configuration is completely empty (all defaults).
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
