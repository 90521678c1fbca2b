//! Boosted-odds promotion optimizer.
//!
//! Each outcome's winning profit is boosted by a tier-dependent (or
//! flat) fraction, with the bonus capped at a maximum. The
//! profit-maximizing anchor outcome is not known in closed form, so
//! every boostable outcome is tried in increasing index order and the
//! best net profit wins, first-found on ties.

use tracing::debug;

use crate::config::PromotionPolicy;
use crate::domain::equalizer;
use crate::domain::error::DomainError;
use crate::domain::odds::OddsVector;
use crate::error::Result;

use super::{Promotion, PromotionPlan};

/// Slack added to the bonus cap for floating comparisons. Not a tunable.
const GAIN_CAP_SLACK: f64 = 0.1;

/// How boost rates are derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoostMode {
    /// Rate from the policy's odds-bracket tier table.
    Tiered,
    /// Same flat rate for every outcome.
    Flat(f64),
}

impl BoostMode {
    /// Boost fraction for the given odds.
    pub fn rate(&self, odds: f64, policy: &PromotionPolicy) -> f64 {
        match *self {
            BoostMode::Tiered => policy.boost_rate(odds),
            BoostMode::Flat(rate) => rate,
        }
    }
}

/// Boosted decimal odds: the profit part grows by `rate`, discounted
/// when the bonus is delivered as free-bet credit.
pub fn boosted_odds(odds: f64, rate: f64, as_freebet: bool, policy: &PromotionPolicy) -> f64 {
    let unit_value = if as_freebet {
        policy.freebet_bonus_rate
    } else {
        1.0
    };
    odds + (odds - 1.0) * rate * unit_value
}

/// Result of the boosted-odds search.
#[derive(Debug, Clone, PartialEq)]
pub struct BoostedPlan {
    stakes: Vec<f64>,
    payout: f64,
    anchor: usize,
    profit: f64,
}

impl BoostedPlan {
    /// The stake per outcome, index-aligned with the odds.
    pub fn stakes(&self) -> &[f64] {
        &self.stakes
    }

    /// Equalized boosted payout of the uncapped outcomes.
    pub fn payout(&self) -> f64 {
        self.payout
    }

    /// The winning anchor outcome.
    pub fn anchor(&self) -> usize {
        self.anchor
    }

    /// Net profit of the winning candidate.
    pub fn profit(&self) -> f64 {
        self.profit
    }
}

impl From<BoostedPlan> for PromotionPlan {
    fn from(plan: BoostedPlan) -> Self {
        PromotionPlan::new(plan.stakes, plan.profit)
    }
}

/// Search for the stake vector maximizing net profit under a capped
/// odds boost.
///
/// For each candidate anchor the stake is sized so the anchor's bonus
/// hits `gain_cap` exactly, the full vector is equalized at the boosted
/// odds, and any outcome whose own bonus would exceed the cap by more
/// than the slack is rescaled down to the anchor's raw break-even stake
/// (its bonus is capped by the operator anyway).
///
/// # Errors
///
/// [`DomainError::NoBoostCandidate`] when no outcome has a non-zero
/// boost rate.
pub fn optimize(
    odds: &OddsVector,
    gain_cap: f64,
    mode: BoostMode,
    as_freebet: bool,
    policy: &PromotionPolicy,
) -> Result<BoostedPlan> {
    equalizer::ensure_positive_stake(gain_cap)?;

    let raw = odds.as_slice();
    let boosted: Vec<f64> = raw
        .iter()
        .map(|&value| boosted_odds(value, mode.rate(value, policy), as_freebet, policy))
        .collect();

    let mut best: Option<BoostedPlan> = None;
    for (anchor, &anchor_odds) in raw.iter().enumerate() {
        let rate = mode.rate(anchor_odds, policy);
        if rate == 0.0 {
            continue;
        }

        // Size the anchor so its full bonus hits the cap exactly.
        let anchor_stake = gain_cap / ((anchor_odds - 1.0) * rate);
        let candidate = equalizer::equalize_anchored(&boosted, anchor, anchor_stake);

        let mut stakes = candidate.into_stakes();
        let mut payout = 0.0;
        for (index, stake) in stakes.iter_mut().enumerate() {
            let bonus = *stake * (raw[index] - 1.0) * mode.rate(raw[index], policy);
            if bonus > gain_cap + GAIN_CAP_SLACK {
                *stake = anchor_stake * anchor_odds / raw[index];
            } else {
                payout = *stake * boosted[index];
            }
        }

        let profit = payout - stakes.iter().sum::<f64>();
        debug!(anchor, profit, "evaluated boosted anchor");

        if best.as_ref().map_or(true, |current| profit > current.profit) {
            best = Some(BoostedPlan {
                stakes,
                payout,
                anchor,
                profit,
            });
        }
    }

    best.ok_or_else(|| {
        DomainError::NoBoostCandidate {
            highest: raw[odds.highest()],
        }
        .into()
    })
}

/// Boosted odds as a registrable promotion.
#[derive(Debug, Clone)]
pub struct BoostedOdds {
    /// Maximum bonus granted by the operator.
    pub gain_cap: f64,
    /// Tiered or flat boost.
    pub mode: BoostMode,
    /// Whether the bonus is delivered as free-bet credit.
    pub as_freebet: bool,
}

impl Promotion for BoostedOdds {
    fn name(&self) -> &'static str {
        "boosted_odds"
    }

    fn plan(&self, odds: &OddsVector, policy: &PromotionPolicy) -> Result<PromotionPlan> {
        optimize(odds, self.gain_cap, self.mode, self.as_freebet, policy).map(PromotionPlan::from)
    }
}
