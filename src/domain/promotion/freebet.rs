//! Free-bet promotions.
//!
//! A free bet pays profit only: a winning free bet at odds `o` returns
//! `o - 1` per unit, and the stake itself is promotional credit rather
//! than cash. The plans here convert that credit into a guaranteed cash
//! profit by covering the remaining outcomes with real money.

use crate::config::PromotionPolicy;
use crate::domain::equalizer;
use crate::domain::equalizer::StakePlan;
use crate::domain::odds::OddsVector;
use crate::error::Result;

use super::{Promotion, PromotionPlan};

/// Distribute `total` of free-bet credit across all outcomes for an
/// identical cash payout.
///
/// Every stake is credit, so the whole payout is profit; the plan's
/// `profit()` reports payout minus credit spent, i.e. the conversion
/// loss or gain of burning the credit this way.
pub fn distribution(odds: &OddsVector, total: f64) -> Result<StakePlan> {
    equalizer::ensure_positive_stake(total)?;
    Ok(equalizer::equalize_total(&odds.freebet_odds(), total))
}

/// Stake plan for a single free bet.
#[derive(Debug, Clone, PartialEq)]
pub struct FreebetPlan {
    stakes: Vec<f64>,
    payout: f64,
    outcome: usize,
    profit: f64,
}

impl FreebetPlan {
    /// The stake per outcome; `stakes()[outcome()]` is the free bet.
    pub fn stakes(&self) -> &[f64] {
        &self.stakes
    }

    /// The identical payout received whichever outcome wins.
    pub fn payout(&self) -> f64 {
        self.payout
    }

    /// Outcome the free bet is placed on.
    pub fn outcome(&self) -> usize {
        self.outcome
    }

    /// Real money wagered on the covering outcomes.
    pub fn cash_staked(&self) -> f64 {
        self.stakes
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != self.outcome)
            .map(|(_, stake)| stake)
            .sum()
    }

    /// Guaranteed net profit in cash.
    pub fn profit(&self) -> f64 {
        self.profit
    }
}

impl From<FreebetPlan> for PromotionPlan {
    fn from(plan: FreebetPlan) -> Self {
        PromotionPlan::new(plan.stakes, plan.profit)
    }
}

/// Place a free bet of `amount` on one outcome and cover the others with
/// cash for an identical payout everywhere.
///
/// Default policy: the free bet goes on the highest-odds outcome, where
/// the profit-only payout loses the least.
pub fn single(odds: &OddsVector, amount: f64, outcome: Option<usize>) -> Result<FreebetPlan> {
    equalizer::ensure_positive_stake(amount)?;
    let anchor = equalizer::resolve_outcome(odds, outcome, odds.highest())?;

    let mut played = odds.as_slice().to_vec();
    played[anchor] -= 1.0;
    let base = equalizer::equalize_anchored(&played, anchor, amount);

    let payout = base.payout();
    let profit = payout + amount - base.total_stake();
    Ok(FreebetPlan {
        stakes: base.into_stakes(),
        payout,
        outcome: anchor,
        profit,
    })
}

/// Outcome of the second-free-bet decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reallocation {
    /// Covering the second outcome with cash already beats the second
    /// free bet's break-even ratio.
    Kept,
    /// The second outcome is funded with a second free bet of `amount`
    /// instead of cash.
    Second {
        /// Outcome carrying the second free bet.
        outcome: usize,
        /// Size of the second free bet.
        amount: f64,
    },
}

/// Stake plan for two free bets on the same event.
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleFreebetPlan {
    stakes: Vec<f64>,
    payout: f64,
    first_outcome: usize,
    second_outcome: usize,
    reallocation: Reallocation,
    freebet_total: f64,
    profit: f64,
}

impl DoubleFreebetPlan {
    /// The stake per outcome, cash or credit depending on the decision.
    pub fn stakes(&self) -> &[f64] {
        &self.stakes
    }

    /// The identical payout received whichever outcome wins.
    pub fn payout(&self) -> f64 {
        self.payout
    }

    /// Outcome carrying the first free bet.
    pub fn first_outcome(&self) -> usize {
        self.first_outcome
    }

    /// Candidate (and, if reallocated, actual) second free-bet outcome.
    pub fn second_outcome(&self) -> usize {
        self.second_outcome
    }

    /// Whether the second outcome ended up funded by a free bet.
    pub fn reallocation(&self) -> Reallocation {
        self.reallocation
    }

    /// Total free-bet credit consumed by the plan.
    pub fn freebet_total(&self) -> f64 {
        self.freebet_total
    }

    /// Guaranteed net profit in cash.
    pub fn profit(&self) -> f64 {
        self.profit
    }

    /// Profit per unit of free-bet credit consumed.
    pub fn profit_rate(&self) -> f64 {
        self.profit / self.freebet_total
    }
}

impl From<DoubleFreebetPlan> for PromotionPlan {
    fn from(plan: DoubleFreebetPlan) -> Self {
        PromotionPlan::new(plan.stakes, plan.profit)
    }
}

/// Place two free bets of `amount` each on the same event.
///
/// The first free bet goes on `outcome` (default: highest odds). The
/// second targets the best remaining outcome: the global maximum if the
/// first free bet sits elsewhere, otherwise the maximum of the rest.
/// Funding that outcome with credit instead of cash is worth it exactly
/// when the cash plan's profit-per-credit falls below the outcome's
/// break-even ratio `(odds - 1) / odds`; the decision is returned as a
/// [`Reallocation`], never applied silently to shared state.
pub fn double(odds: &OddsVector, amount: f64, outcome: Option<usize>) -> Result<DoubleFreebetPlan> {
    equalizer::ensure_positive_stake(amount)?;
    let highest = odds.highest();
    let first = equalizer::resolve_outcome(odds, outcome, highest)?;

    let mut played = odds.as_slice().to_vec();
    played[first] -= 1.0;
    let base = equalizer::equalize_anchored(&played, first, amount);
    let payout = base.payout();

    let second = if first == highest {
        highest_excluding(odds.as_slice(), highest)
    } else {
        highest
    };

    let mut stakes = base.into_stakes();
    let mut freebet_total = amount;

    let cash_rate = (payout + amount - stakes.iter().sum::<f64>()) / amount;
    let second_odds = odds.as_slice()[second];
    let break_even = (second_odds - 1.0) / second_odds;

    let reallocation = if cash_rate < break_even {
        let second_amount = payout / (second_odds - 1.0);
        stakes[second] = second_amount;
        freebet_total += second_amount;
        Reallocation::Second {
            outcome: second,
            amount: second_amount,
        }
    } else {
        Reallocation::Kept
    };

    let profit = payout + freebet_total - stakes.iter().sum::<f64>();
    Ok(DoubleFreebetPlan {
        stakes,
        payout,
        first_outcome: first,
        second_outcome: second,
        reallocation,
        freebet_total,
        profit,
    })
}

fn highest_excluding(odds: &[f64], excluded: usize) -> usize {
    let mut best = usize::from(excluded == 0);
    for (index, &value) in odds.iter().enumerate() {
        if index != excluded && value > odds[best] {
            best = index;
        }
    }
    best
}

/// A single free bet as a registrable promotion.
#[derive(Debug, Clone)]
pub struct SingleFreebet {
    /// Free-bet amount.
    pub amount: f64,
    /// Outcome to place it on; `None` for the highest odds.
    pub outcome: Option<usize>,
}

impl Promotion for SingleFreebet {
    fn name(&self) -> &'static str {
        "freebet_single"
    }

    fn plan(&self, odds: &OddsVector, _policy: &PromotionPolicy) -> Result<PromotionPlan> {
        single(odds, self.amount, self.outcome).map(PromotionPlan::from)
    }
}

/// Two free bets on the same event as a registrable promotion.
#[derive(Debug, Clone)]
pub struct DoubleFreebet {
    /// Size of each free bet.
    pub amount: f64,
    /// Outcome for the first free bet; `None` for the highest odds.
    pub outcome: Option<usize>,
}

impl Promotion for DoubleFreebet {
    fn name(&self) -> &'static str {
        "freebet_double"
    }

    fn plan(&self, odds: &OddsVector, _policy: &PromotionPolicy) -> Result<PromotionPlan> {
        double(odds, self.amount, self.outcome).map(PromotionPlan::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{assert_equal_payouts, TOLERANCE};

    #[test]
    fn distribution_spreads_credit_over_discounted_odds() {
        let odds = OddsVector::try_new(vec![3.0, 3.0]).unwrap();
        let plan = distribution(&odds, 100.0).unwrap();

        // Discounted odds are [2.0, 2.0]: an even split.
        assert!((plan.stakes()[0] - 50.0).abs() < TOLERANCE);
        assert!((plan.stakes()[1] - 50.0).abs() < TOLERANCE);
        assert!((plan.payout() - 100.0).abs() < TOLERANCE);
    }

    #[test]
    fn single_defaults_to_highest_odds() {
        let odds = OddsVector::try_new(vec![2.0, 1.9]).unwrap();
        let plan = single(&odds, 10.0, None).unwrap();

        assert_eq!(plan.outcome(), 0);
        assert_eq!(plan.stakes()[0], 10.0);
        // Free bet pays (2.0 - 1) * 10 = 10 whichever outcome wins.
        assert!((plan.payout() - 10.0).abs() < TOLERANCE);
        assert!((plan.cash_staked() - 10.0 / 1.9).abs() < TOLERANCE);
        assert!(plan.profit() > 0.0);
        assert!((plan.profit() - (10.0 + 10.0 - plan.stakes().iter().sum::<f64>())).abs()
            < TOLERANCE);
    }

    #[test]
    fn single_equalizes_the_discounted_anchor() {
        let odds = OddsVector::try_new(vec![4.0, 3.0, 5.0]).unwrap();
        let plan = single(&odds, 20.0, Some(2)).unwrap();

        // Anchor pays at discounted odds, others at raw odds.
        let mut played = odds.as_slice().to_vec();
        played[2] -= 1.0;
        assert_equal_payouts(plan.stakes(), &played, plan.payout());
    }

    #[test]
    fn double_keeps_cash_cover_when_ratio_is_good() {
        let odds = OddsVector::try_new(vec![5.0, 1.5]).unwrap();
        let plan = double(&odds, 10.0, None).unwrap();

        assert_eq!(plan.first_outcome(), 0);
        assert_eq!(plan.second_outcome(), 1);
        assert_eq!(plan.reallocation(), Reallocation::Kept);
        assert!((plan.freebet_total() - 10.0).abs() < TOLERANCE);
        // payout 40, stakes [10, 26.67]: profit 13.33
        assert!((plan.profit() - (40.0 + 10.0 - 10.0 - 40.0 / 1.5)).abs() < TOLERANCE);
    }

    #[test]
    fn double_reallocates_when_cash_cover_is_poor() {
        let odds = OddsVector::try_new(vec![1.3, 1.25]).unwrap();
        let plan = double(&odds, 10.0, None).unwrap();

        assert_eq!(plan.first_outcome(), 0);
        assert_eq!(plan.second_outcome(), 1);
        match plan.reallocation() {
            Reallocation::Second { outcome, amount } => {
                assert_eq!(outcome, 1);
                // payout 3.0 at odds-1 = 0.25 needs a 12.0 credit stake
                assert!((amount - 12.0).abs() < TOLERANCE);
            }
            Reallocation::Kept => panic!("expected a second free bet"),
        }
        assert!((plan.freebet_total() - 22.0).abs() < TOLERANCE);
        // No cash at risk: profit is the full equalized payout.
        assert!((plan.profit() - 3.0).abs() < TOLERANCE);
        assert!((plan.profit_rate() - 3.0 / 22.0).abs() < TOLERANCE);
    }

    #[test]
    fn double_second_choice_skips_the_first_outcome() {
        // First free bet forced onto the middle outcome: the global
        // maximum is still free for the second one.
        let odds = OddsVector::try_new(vec![2.0, 3.0, 6.0]).unwrap();
        let plan = double(&odds, 10.0, Some(1)).unwrap();
        assert_eq!(plan.second_outcome(), 2);

        // First free bet on the global maximum: pick the max of the rest.
        let plan = double(&odds, 10.0, None).unwrap();
        assert_eq!(plan.first_outcome(), 2);
        assert_eq!(plan.second_outcome(), 1);
    }
}
