//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).

use crate::domain::solver::{LpProblem, LpSolution, SolutionStatus, Solver};
use crate::domain::OddsVector;
use crate::error::Result;

/// Tolerance used by the payout-equality assertions.
pub const TOLERANCE: f64 = 1e-9;

/// A canonical three-outcome vector whose reciprocals sum to exactly 1.
pub fn even_three_way() -> OddsVector {
    OddsVector::try_new(vec![2.0, 3.0, 6.0]).expect("valid odds")
}

/// A typical two-outcome market with a small arbitrage edge.
pub fn two_way() -> OddsVector {
    OddsVector::try_new(vec![2.1, 2.2]).expect("valid odds")
}

/// Assert that `stake[i] * odds[i]` equals `payout` for every outcome.
pub fn assert_equal_payouts(stakes: &[f64], odds: &[f64], payout: f64) {
    assert_eq!(stakes.len(), odds.len(), "stakes and odds must align");
    for (index, (stake, value)) in stakes.iter().zip(odds).enumerate() {
        let observed = stake * value;
        assert!(
            (observed - payout).abs() < TOLERANCE,
            "outcome {index} pays {observed}, expected {payout}"
        );
    }
}

/// Solver stub that reports every problem as infeasible.
pub struct InfeasibleSolver;

impl Solver for InfeasibleSolver {
    fn name(&self) -> &'static str {
        "infeasible"
    }

    fn solve_lp(&self, problem: &LpProblem) -> Result<LpSolution> {
        Ok(LpSolution {
            values: vec![0.0; problem.num_vars()],
            objective: 0.0,
            status: SolutionStatus::Infeasible,
        })
    }
}
