//! Payout equalization across outcomes.
//!
//! The equalizer is the base building block of every promotion: given
//! odds and a stake constraint it produces the stake vector whose payout
//! `stake[i] * odds[i]` is identical for every outcome, so the net result
//! does not depend on which outcome wins.

use crate::domain::error::DomainError;
use crate::domain::odds::OddsVector;
use crate::error::Result;

/// How the stake vector is anchored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StakeConstraint {
    /// Distribute this total across all outcomes.
    TotalStake(f64),

    /// Wager exactly `stake` on `outcome` and size every other stake to
    /// match that outcome's payout. `None` anchors on the lowest-odds
    /// outcome, the leg that conventionally carries the required stake.
    AnchorStake {
        /// Outcome carrying the fixed stake; `None` selects the default.
        outcome: Option<usize>,
        /// The fixed stake amount.
        stake: f64,
    },
}

/// An equalized stake distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct StakePlan {
    stakes: Vec<f64>,
    payout: f64,
}

impl StakePlan {
    pub(crate) fn new(stakes: Vec<f64>, payout: f64) -> Self {
        Self { stakes, payout }
    }

    /// The stake per outcome, index-aligned with the odds.
    pub fn stakes(&self) -> &[f64] {
        &self.stakes
    }

    /// Consume the plan, keeping only the stake vector.
    pub fn into_stakes(self) -> Vec<f64> {
        self.stakes
    }

    /// The identical payout received whichever outcome wins.
    pub fn payout(&self) -> f64 {
        self.payout
    }

    /// Sum of all stakes.
    pub fn total_stake(&self) -> f64 {
        self.stakes.iter().sum()
    }

    /// Net profit: payout minus total stake.
    pub fn profit(&self) -> f64 {
        self.payout - self.total_stake()
    }
}

/// Compute the equalized stake vector for validated odds.
///
/// In total-stake mode the payout is `total / Σ(1/odds[i])`; in anchored
/// mode it is `stake * odds[anchor]`, and the anchor keeps exactly the
/// input stake (never recomputed, to avoid floating rounding drift).
///
/// # Errors
///
/// [`DomainError::NonPositiveStake`] for a non-positive total or anchor
/// stake, [`DomainError::OutcomeOutOfRange`] for an anchor index outside
/// the vector.
pub fn equalize(odds: &OddsVector, constraint: StakeConstraint) -> Result<StakePlan> {
    match constraint {
        StakeConstraint::TotalStake(total) => {
            ensure_positive_stake(total)?;
            Ok(equalize_total(odds.as_slice(), total))
        }
        StakeConstraint::AnchorStake { outcome, stake } => {
            ensure_positive_stake(stake)?;
            let anchor = resolve_outcome(odds, outcome, odds.lowest())?;
            Ok(equalize_anchored(odds.as_slice(), anchor, stake))
        }
    }
}

/// Total-stake equalization over a raw (adapter-transformed) odds slice.
/// Callers guarantee every element is positive.
pub(crate) fn equalize_total(odds: &[f64], total: f64) -> StakePlan {
    let payout = total / odds.iter().map(|value| 1.0 / value).sum::<f64>();
    let stakes = odds.iter().map(|value| payout / value).collect();
    StakePlan::new(stakes, payout)
}

/// Anchored equalization over a raw (adapter-transformed) odds slice.
/// Callers guarantee every element is positive and `anchor` is in range.
pub(crate) fn equalize_anchored(odds: &[f64], anchor: usize, stake: f64) -> StakePlan {
    let payout = stake * odds[anchor];
    let mut stakes: Vec<f64> = odds.iter().map(|value| payout / value).collect();
    stakes[anchor] = stake;
    StakePlan::new(stakes, payout)
}

pub(crate) fn ensure_positive_stake(stake: f64) -> Result<()> {
    if !stake.is_finite() || stake <= 0.0 {
        return Err(DomainError::NonPositiveStake { stake }.into());
    }
    Ok(())
}

pub(crate) fn resolve_outcome(
    odds: &OddsVector,
    outcome: Option<usize>,
    default: usize,
) -> Result<usize> {
    match outcome {
        Some(index) if index < odds.len() => Ok(index),
        Some(index) => Err(DomainError::OutcomeOutOfRange {
            index,
            count: odds.len(),
        }
        .into()),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::testkit::{assert_equal_payouts, even_three_way, two_way, TOLERANCE};

    #[test]
    fn total_stake_distributes_evenly_across_payouts() {
        let odds = even_three_way();
        let plan = equalize(&odds, StakeConstraint::TotalStake(100.0)).unwrap();

        // Reciprocals sum to exactly 1, so the payout equals the total.
        assert!((plan.payout() - 100.0).abs() < TOLERANCE);
        assert!((plan.total_stake() - 100.0).abs() < TOLERANCE);
        assert_equal_payouts(plan.stakes(), odds.as_slice(), plan.payout());

        assert!((plan.stakes()[0] - 50.0).abs() < TOLERANCE);
        assert!((plan.stakes()[1] - 100.0 / 3.0).abs() < TOLERANCE);
        assert!((plan.stakes()[2] - 100.0 / 6.0).abs() < TOLERANCE);
    }

    #[test]
    fn anchored_stake_is_kept_bit_exact() {
        let odds = OddsVector::try_new(vec![2.7, 3.3, 4.1]).unwrap();
        let plan = equalize(
            &odds,
            StakeConstraint::AnchorStake {
                outcome: Some(1),
                stake: 12.34,
            },
        )
        .unwrap();

        assert_eq!(plan.stakes()[1], 12.34);
        assert_equal_payouts(plan.stakes(), odds.as_slice(), plan.payout());
    }

    #[test]
    fn anchor_defaults_to_lowest_odds() {
        let odds = OddsVector::try_new(vec![3.0, 1.5, 2.0]).unwrap();
        let plan = equalize(
            &odds,
            StakeConstraint::AnchorStake {
                outcome: None,
                stake: 10.0,
            },
        )
        .unwrap();

        assert_eq!(plan.stakes()[1], 10.0);
        assert!((plan.payout() - 15.0).abs() < TOLERANCE);
    }

    #[test]
    fn profit_is_payout_minus_total() {
        let odds = two_way();
        let plan = equalize(&odds, StakeConstraint::TotalStake(50.0)).unwrap();
        assert!((plan.profit() - (plan.payout() - 50.0)).abs() < TOLERANCE);
        // 1/2.1 + 1/2.2 < 1: a genuine arbitrage
        assert!(plan.profit() > 0.0);
    }

    #[test]
    fn rejects_non_positive_stakes() {
        let odds = even_three_way();
        for bad in [0.0, -5.0, f64::NAN] {
            let result = equalize(&odds, StakeConstraint::TotalStake(bad));
            assert!(matches!(
                result,
                Err(Error::Domain(DomainError::NonPositiveStake { .. }))
            ));
        }
    }

    #[test]
    fn rejects_out_of_range_anchor() {
        let odds = even_three_way();
        let result = equalize(
            &odds,
            StakeConstraint::AnchorStake {
                outcome: Some(3),
                stake: 10.0,
            },
        );
        assert!(matches!(
            result,
            Err(Error::Domain(DomainError::OutcomeOutOfRange {
                index: 3,
                count: 3
            }))
        ));
    }
}
