//! Solver port for linear programming.
//!
//! The full-refund promotion assembles a small square equality system
//! whose unknowns are the stakes plus the gross return. Implementations
//! of [`Solver`] wrap a specific backend and provide a unified interface;
//! the default backend is [`HighsSolver`].
//!
//! # Implementation Notes
//!
//! - Implementations must be thread-safe (`Send + Sync`)
//! - Infeasibility is reported through [`SolutionStatus`], not an error:
//!   callers decide whether an infeasible system is exceptional

mod highs;

pub use highs::HighsSolver;

use crate::error::Result;

/// A linear programming solver backend.
pub trait Solver: Send + Sync {
    /// Solver name for logging/config.
    fn name(&self) -> &'static str;

    /// Solve: minimize `c·x` subject to the constraints.
    fn solve_lp(&self, problem: &LpProblem) -> Result<LpSolution>;
}

/// Linear programming problem definition.
#[derive(Debug, Clone)]
pub struct LpProblem {
    /// Objective coefficients (minimize `c·x`).
    pub objective: Vec<f64>,
    /// Constraints.
    pub constraints: Vec<Constraint>,
    /// Variable bounds.
    pub bounds: Vec<VariableBounds>,
}

impl LpProblem {
    /// Create a problem with a zero objective and default bounds.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            objective: vec![0.0; num_vars],
            constraints: Vec::new(),
            bounds: vec![VariableBounds::default(); num_vars],
        }
    }

    /// Number of variables.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.objective.len()
    }
}

/// A single constraint: `sum(coeffs[i] * x[i]) {>=, <=, =} rhs`.
#[derive(Debug, Clone)]
pub struct Constraint {
    /// Coefficients for each variable.
    pub coefficients: Vec<f64>,
    /// Constraint sense (>=, <=, =).
    pub sense: ConstraintSense,
    /// Right-hand side value.
    pub rhs: f64,
}

impl Constraint {
    /// Create a >= constraint.
    #[must_use]
    pub const fn geq(coefficients: Vec<f64>, rhs: f64) -> Self {
        Self {
            coefficients,
            sense: ConstraintSense::GreaterEqual,
            rhs,
        }
    }

    /// Create a <= constraint.
    #[must_use]
    pub const fn leq(coefficients: Vec<f64>, rhs: f64) -> Self {
        Self {
            coefficients,
            sense: ConstraintSense::LessEqual,
            rhs,
        }
    }

    /// Create an = constraint.
    #[must_use]
    pub const fn eq(coefficients: Vec<f64>, rhs: f64) -> Self {
        Self {
            coefficients,
            sense: ConstraintSense::Equal,
            rhs,
        }
    }
}

/// Constraint sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintSense {
    GreaterEqual,
    LessEqual,
    Equal,
}

/// Bounds on a variable.
#[derive(Debug, Clone, Copy)]
pub struct VariableBounds {
    /// Lower bound (None = -infinity).
    pub lower: Option<f64>,
    /// Upper bound (None = +infinity).
    pub upper: Option<f64>,
}

impl Default for VariableBounds {
    fn default() -> Self {
        Self {
            lower: Some(0.0),
            upper: None,
        }
    }
}

impl VariableBounds {
    /// Free variable (no bounds).
    #[must_use]
    pub const fn free() -> Self {
        Self {
            lower: None,
            upper: None,
        }
    }

    /// Non-negative variable [0, +inf).
    #[must_use]
    pub fn non_negative() -> Self {
        Self::default()
    }

    /// Bounded variable [lower, upper].
    #[must_use]
    pub const fn bounded(lower: f64, upper: f64) -> Self {
        Self {
            lower: Some(lower),
            upper: Some(upper),
        }
    }
}

/// Solution returned by a solver backend.
#[derive(Debug, Clone)]
pub struct LpSolution {
    /// Variable values, index-aligned with the problem.
    pub values: Vec<f64>,
    /// Objective value at the solution.
    pub objective: f64,
    /// Whether the problem was solved.
    pub status: SolutionStatus,
}

impl LpSolution {
    /// Check whether the solver found an optimal solution.
    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }
}

/// Outcome of a solve attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    Optimal,
    Infeasible,
}
