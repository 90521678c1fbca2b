//! Full-refund arbitrage: every losing stake refunded up to a ceiling.
//!
//! Unlike the closed-form promotions this one solves a small dense
//! equality system. The unknowns are the n stakes plus the gross return;
//! one equation per outcome equalizes the gross return (own payout plus
//! the refunds owed on the other stakes), and a final equation pins the
//! total refundable amount to the promotion ceiling, with the
//! highest-odds outcome as the fixed leg excluded from it.

use tracing::debug;

use crate::config::PromotionPolicy;
use crate::domain::equalizer;
use crate::domain::error::DomainError;
use crate::domain::odds::OddsVector;
use crate::domain::solver::{Constraint, LpProblem, Solver, VariableBounds};
use crate::error::Result;

use super::{Promotion, PromotionPlan};

/// Residual tolerance for the back-substitution check.
const RESIDUAL_TOLERANCE: f64 = 1e-6;

/// Solution of the full-refund system.
#[derive(Debug, Clone, PartialEq)]
pub struct RefundPlan {
    stakes: Vec<f64>,
    gross_return: f64,
    profit: f64,
}

impl RefundPlan {
    /// The stake per outcome, index-aligned with the odds.
    pub fn stakes(&self) -> &[f64] {
        &self.stakes
    }

    /// The identical gross return received whichever outcome wins,
    /// refunds included.
    pub fn gross_return(&self) -> f64 {
        self.gross_return
    }

    /// Net profit: gross return minus total staked.
    pub fn profit(&self) -> f64 {
        self.profit
    }
}

impl From<RefundPlan> for PromotionPlan {
    fn from(plan: RefundPlan) -> Self {
        PromotionPlan::new(plan.stakes, plan.profit)
    }
}

/// Solve the stakes when every losing bet is refunded at `refund_rate`,
/// up to `refund_cap` in total.
///
/// A free-bet refund is worth `freebet_bonus_rate` on the unit. The
/// system is solved exactly: the solution is substituted back into every
/// equation and must reproduce the constants within 1e-6.
///
/// # Errors
///
/// [`DomainError::DegenerateSystem`] when the system is infeasible or
/// the back-substitution check fails.
pub fn full_refund<S: Solver>(
    odds: &OddsVector,
    refund_cap: f64,
    as_freebet: bool,
    refund_rate: f64,
    policy: &PromotionPolicy,
    solver: &S,
) -> Result<RefundPlan> {
    equalizer::ensure_positive_stake(refund_cap)?;
    if !refund_rate.is_finite() || refund_rate <= 0.0 || refund_rate > 1.0 {
        return Err(DomainError::InvalidRefundRate { rate: refund_rate }.into());
    }

    let raw = odds.as_slice();
    let n = raw.len();
    let fixed = odds.highest();
    let unit_value = if as_freebet {
        policy.freebet_bonus_rate
    } else {
        1.0
    };
    let refund_factor = refund_rate * unit_value;

    // n + 1 unknowns: the stakes, then the gross return.
    let mut problem = LpProblem::new(n + 1);
    problem.bounds[n] = VariableBounds::free();
    // The equalities determine the solution; maximizing the gross return
    // makes the pick deterministic if they ever fail to.
    problem.objective[n] = -1.0;

    for (index, &value) in raw.iter().enumerate() {
        let mut coefficients = vec![refund_factor; n + 1];
        coefficients[index] = value;
        coefficients[n] = -1.0;
        problem.constraints.push(Constraint::eq(coefficients, 0.0));
    }

    let mut ceiling = vec![refund_rate; n + 1];
    ceiling[fixed] = 0.0;
    ceiling[n] = 0.0;
    problem.constraints.push(Constraint::eq(ceiling, refund_cap));

    let solution = solver.solve_lp(&problem)?;
    if !solution.is_optimal() {
        return Err(DomainError::DegenerateSystem {
            reason: "refund system is infeasible".into(),
        }
        .into());
    }

    // Exact-solve contract: substitute the solution back.
    for constraint in &problem.constraints {
        let lhs: f64 = constraint
            .coefficients
            .iter()
            .zip(solution.values.iter())
            .map(|(coefficient, value)| coefficient * value)
            .sum();
        let residual = lhs - constraint.rhs;
        if residual.abs() > RESIDUAL_TOLERANCE {
            return Err(DomainError::DegenerateSystem {
                reason: format!("solution residual {residual} exceeds tolerance"),
            }
            .into());
        }
    }

    let gross_return = solution.values[n];
    let stakes = solution.values[..n].to_vec();
    let profit = gross_return - stakes.iter().sum::<f64>();
    debug!(
        solver = solver.name(),
        gross_return, profit, "solved refund system"
    );

    Ok(RefundPlan {
        stakes,
        gross_return,
        profit,
    })
}

/// Full refund on losing bets as a registrable promotion.
#[derive(Debug, Clone)]
pub struct FullRefund<S> {
    /// Total refundable amount granted by the operator.
    pub refund_cap: f64,
    /// Whether refunds arrive as free-bet credit.
    pub as_freebet: bool,
    /// Fraction of each lost stake refunded.
    pub refund_rate: f64,
    /// Solver backend for the equation system.
    pub solver: S,
}

impl<S: Solver> Promotion for FullRefund<S> {
    fn name(&self) -> &'static str {
        "full_refund"
    }

    fn plan(&self, odds: &OddsVector, policy: &PromotionPolicy) -> Result<PromotionPlan> {
        full_refund(
            odds,
            self.refund_cap,
            self.as_freebet,
            self.refund_rate,
            policy,
            &self.solver,
        )
        .map(PromotionPlan::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::solver::HighsSolver;
    use crate::error::Error;
    use crate::testkit::InfeasibleSolver;

    // Solver precision, looser than the engine's own tolerances.
    const SOLVE_TOLERANCE: f64 = 1e-6;

    #[test]
    fn two_outcome_cash_refund() {
        let odds = OddsVector::try_new(vec![3.0, 2.5]).unwrap();
        let plan = full_refund(
            &odds,
            100.0,
            false,
            1.0,
            &PromotionPolicy::default(),
            &HighsSolver::new(),
        )
        .unwrap();

        // Ceiling: the non-fixed stake is fully refundable at 100.
        assert!((plan.stakes()[1] - 100.0).abs() < SOLVE_TOLERANCE);
        assert!((plan.stakes()[0] - 75.0).abs() < SOLVE_TOLERANCE);
        assert!((plan.gross_return() - 325.0).abs() < SOLVE_TOLERANCE);
        assert!((plan.profit() - 150.0).abs() < SOLVE_TOLERANCE);
    }

    #[test]
    fn gross_return_is_equal_for_every_outcome() {
        let odds = OddsVector::try_new(vec![4.2, 3.1, 2.4]).unwrap();
        let policy = PromotionPolicy::default();
        let plan = full_refund(&odds, 50.0, false, 0.5, &policy, &HighsSolver::new()).unwrap();

        let raw = odds.as_slice();
        let total: f64 = plan.stakes().iter().sum();
        for (index, &value) in raw.iter().enumerate() {
            let refunds = 0.5 * (total - plan.stakes()[index]);
            let gross = plan.stakes()[index] * value + refunds;
            assert!(
                (gross - plan.gross_return()).abs() < SOLVE_TOLERANCE,
                "outcome {index} returns {gross}, expected {}",
                plan.gross_return()
            );
        }
    }

    #[test]
    fn freebet_refund_discounts_the_factor() {
        let odds = OddsVector::try_new(vec![3.0, 2.5]).unwrap();
        let policy = PromotionPolicy::default();
        let plan = full_refund(&odds, 100.0, true, 1.0, &policy, &HighsSolver::new()).unwrap();

        // Ceiling is on the raw rate, so the refundable stake is still 100;
        // the refunds priced into each outcome are worth 80 on the unit.
        assert!((plan.stakes()[1] - 100.0).abs() < SOLVE_TOLERANCE);
        let gross0 = plan.stakes()[0] * 3.0 + 0.8 * plan.stakes()[1];
        assert!((gross0 - plan.gross_return()).abs() < SOLVE_TOLERANCE);
    }

    #[test]
    fn infeasible_system_is_degenerate() {
        let odds = OddsVector::try_new(vec![3.0, 2.5]).unwrap();
        let result = full_refund(
            &odds,
            100.0,
            false,
            1.0,
            &PromotionPolicy::default(),
            &InfeasibleSolver,
        );
        assert!(matches!(
            result,
            Err(Error::Domain(DomainError::DegenerateSystem { .. }))
        ));
    }
}
