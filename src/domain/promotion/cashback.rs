//! Cashback promotions: stake-on-loss refunds, the single tiered
//! cashback, and the odds-won-as-free-bet reward.

use tracing::{debug, warn};

use crate::config::PromotionPolicy;
use crate::domain::equalizer;
use crate::domain::error::DomainError;
use crate::domain::odds::OddsVector;
use crate::error::Result;

use super::{Promotion, PromotionPlan};

/// Stake plan for a cashback-style promotion.
#[derive(Debug, Clone, PartialEq)]
pub struct CashbackPlan {
    stakes: Vec<f64>,
    payout: f64,
    anchor: usize,
    refund: f64,
    profit: f64,
}

impl CashbackPlan {
    /// The stake per outcome, index-aligned with the odds.
    pub fn stakes(&self) -> &[f64] {
        &self.stakes
    }

    /// The identical gross return received whichever outcome wins,
    /// refund value included.
    pub fn payout(&self) -> f64 {
        self.payout
    }

    /// Outcome carrying the promoted stake.
    pub fn anchor(&self) -> usize {
        self.anchor
    }

    /// Value of the promotional refund or credit priced into the plan.
    pub fn refund(&self) -> f64 {
        self.refund
    }

    /// Guaranteed net profit.
    pub fn profit(&self) -> f64 {
        self.profit
    }
}

impl From<CashbackPlan> for PromotionPlan {
    fn from(plan: CashbackPlan) -> Self {
        PromotionPlan::new(plan.stakes, plan.profit)
    }
}

/// Cover an anchored stake whose loss is refunded at `refund_rate`.
///
/// Default policy: the promoted stake goes on the highest-odds outcome.
/// A free-bet refund is worth `freebet_conversion_rate` on the unit, a
/// cash refund is worth face value. Every other outcome is sized so that
/// its own win plus the anchor refund matches the anchor's payout.
pub fn on_loss(
    odds: &OddsVector,
    max_stake: f64,
    anchor: Option<usize>,
    as_freebet: bool,
    refund_rate: f64,
    policy: &PromotionPolicy,
) -> Result<CashbackPlan> {
    equalizer::ensure_positive_stake(max_stake)?;
    ensure_refund_rate(refund_rate)?;
    let anchor = equalizer::resolve_outcome(odds, anchor, odds.highest())?;

    let unit_value = if as_freebet {
        policy.freebet_conversion_rate
    } else {
        1.0
    };
    let refund = max_stake * refund_rate * unit_value;

    let payout = max_stake * odds.as_slice()[anchor];
    let mut stakes: Vec<f64> = odds
        .as_slice()
        .iter()
        .map(|&value| (payout - refund) / value)
        .collect();
    stakes[anchor] = max_stake;

    let profit = payout - stakes.iter().sum::<f64>();
    Ok(CashbackPlan {
        stakes,
        payout,
        anchor,
        refund,
        profit,
    })
}

/// Single tiered cashback on the highest losing stake.
///
/// The operator refunds a bracketed amount, as free-bet credit, based on
/// the largest stake lost. The anchor is the lowest-odds outcome at the
/// qualifying stake (just above the top bracket); the largest covering
/// stake lands on the second-lowest odds, and its refund bracket feeds
/// back into the stake computation. The stable bracket is found by
/// scanning the tier refunds in descending order; if none is stable the
/// plan falls back to a zero refund.
pub fn tiered(odds: &OddsVector, policy: &PromotionPolicy) -> Result<CashbackPlan> {
    let anchor = odds.lowest();
    let anchor_stake = policy.qualifying_stake();
    equalizer::ensure_positive_stake(anchor_stake)?;

    let raw = odds.as_slice();
    let second = lowest_excluding(raw, anchor);
    let bonus = policy.freebet_bonus_rate;

    let base_payout = anchor_stake * raw[anchor];
    // Refund earned by the anchor stake itself when it loses.
    let anchor_refund = policy.cashback_refund(anchor_stake) * bonus;

    let mut stable = None;
    for candidate in policy.cashback_refunds_descending() {
        let payout = base_payout + candidate * bonus;
        let implied = (payout - anchor_refund) / raw[second];
        if policy.cashback_refund(implied) == candidate {
            stable = Some((candidate, payout));
            break;
        }
        debug!(candidate, implied, "cashback bracket unstable, descending");
    }

    let (refund, payout) = match stable {
        Some(found) => found,
        None => {
            warn!("no stable cashback bracket, falling back to zero refund");
            (0.0, base_payout)
        }
    };

    let mut stakes: Vec<f64> = raw
        .iter()
        .map(|&value| (payout - anchor_refund) / value)
        .collect();
    stakes[anchor] = anchor_stake;

    let profit = payout - stakes.iter().sum::<f64>();
    Ok(CashbackPlan {
        stakes,
        payout,
        anchor,
        refund,
        profit,
    })
}

/// "Winning odds credited as a free bet" promotion.
///
/// A win on the required outcome pays the usual return plus a free bet
/// equal to the odds value, priced at the policy conversion rate. The
/// anchor outcome is operator-designated, so it is required here, not
/// defaulted.
pub fn odds_reward(
    odds: &OddsVector,
    min_stake: f64,
    outcome: usize,
    policy: &PromotionPolicy,
) -> Result<CashbackPlan> {
    equalizer::ensure_positive_stake(min_stake)?;
    let anchor = equalizer::resolve_outcome(odds, Some(outcome), 0)?;

    let anchor_odds = odds.as_slice()[anchor];
    let reward = anchor_odds * policy.freebet_conversion_rate;
    let payout = reward + min_stake * anchor_odds;

    let mut stakes: Vec<f64> = odds
        .as_slice()
        .iter()
        .map(|&value| payout / value)
        .collect();
    stakes[anchor] = min_stake;

    let profit = payout - stakes.iter().sum::<f64>();
    Ok(CashbackPlan {
        stakes,
        payout,
        anchor,
        refund: reward,
        profit,
    })
}

fn ensure_refund_rate(rate: f64) -> Result<()> {
    if !rate.is_finite() || rate <= 0.0 || rate > 1.0 {
        return Err(DomainError::InvalidRefundRate { rate }.into());
    }
    Ok(())
}

fn lowest_excluding(odds: &[f64], excluded: usize) -> usize {
    let mut best = usize::from(excluded == 0);
    for (index, &value) in odds.iter().enumerate() {
        if index != excluded && value < odds[best] {
            best = index;
        }
    }
    best
}

/// Stake-on-loss cashback as a registrable promotion.
#[derive(Debug, Clone)]
pub struct OnLossCashback {
    /// Promoted (refundable) stake.
    pub max_stake: f64,
    /// Outcome to place it on; `None` for the highest odds.
    pub anchor: Option<usize>,
    /// Whether the refund arrives as free-bet credit.
    pub as_freebet: bool,
    /// Fraction of the lost stake refunded.
    pub refund_rate: f64,
}

impl Promotion for OnLossCashback {
    fn name(&self) -> &'static str {
        "cashback_on_loss"
    }

    fn plan(&self, odds: &OddsVector, policy: &PromotionPolicy) -> Result<PromotionPlan> {
        on_loss(
            odds,
            self.max_stake,
            self.anchor,
            self.as_freebet,
            self.refund_rate,
            policy,
        )
        .map(PromotionPlan::from)
    }
}

/// Tiered cashback as a registrable promotion.
#[derive(Debug, Clone, Default)]
pub struct TieredCashback;

impl Promotion for TieredCashback {
    fn name(&self) -> &'static str {
        "cashback_tiered"
    }

    fn plan(&self, odds: &OddsVector, policy: &PromotionPolicy) -> Result<PromotionPlan> {
        tiered(odds, policy).map(PromotionPlan::from)
    }
}

/// Odds-won-as-free-bet reward as a registrable promotion.
#[derive(Debug, Clone)]
pub struct OddsReward {
    /// Minimum qualifying stake on the promoted outcome.
    pub min_stake: f64,
    /// Operator-designated outcome.
    pub outcome: usize,
}

impl Promotion for OddsReward {
    fn name(&self) -> &'static str {
        "odds_reward"
    }

    fn plan(&self, odds: &OddsVector, policy: &PromotionPolicy) -> Result<PromotionPlan> {
        odds_reward(odds, self.min_stake, self.outcome, policy).map(PromotionPlan::from)
    }
}
