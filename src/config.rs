//! Promotion policy configuration.
//!
//! Conversion rates and tier tables are business-policy assumptions that
//! vary by operator, so they live in configuration rather than as inline
//! constants. [`PromotionPolicy::default`] mirrors the reference operator
//! values; a TOML file can override any subset of fields.

use serde::Deserialize;
use std::path::Path;

use crate::error::{ConfigError, Result};

/// Operator policy: promotional credit valuation and tier tables.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PromotionPolicy {
    /// Cash value of one unit of free-bet credit once converted through
    /// an arbitrage. Credit cannot be withdrawn 1:1.
    #[serde(default = "default_freebet_conversion_rate")]
    pub freebet_conversion_rate: f64,

    /// Haircut applied when a bonus or refund is delivered as free-bet
    /// credit instead of cash.
    #[serde(default = "default_freebet_bonus_rate")]
    pub freebet_bonus_rate: f64,

    /// Boost fraction per odds bracket, ascending by threshold. Odds
    /// below the first bracket get no boost.
    #[serde(default = "default_boost_tiers")]
    pub boost_tiers: Vec<BoostTier>,

    /// Cashback amount per losing-stake bracket, ascending by threshold.
    /// Stakes at or below the first bracket get no cashback.
    #[serde(default = "default_cashback_tiers")]
    pub cashback_tiers: Vec<CashbackTier>,
}

/// One bracket of the boosted-odds tier table.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct BoostTier {
    /// Inclusive lower odds bound for this bracket.
    pub min_odds: f64,
    /// Boost applied to the profit part `odds - 1` of a winning bet.
    pub rate: f64,
}

/// One bracket of the tiered-cashback table.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct CashbackTier {
    /// Exclusive lower bound on the qualifying losing stake.
    pub min_stake: f64,
    /// Refund granted in this bracket.
    pub refund: f64,
}

fn default_freebet_conversion_rate() -> f64 {
    0.77
}

fn default_freebet_bonus_rate() -> f64 {
    0.8
}

fn default_boost_tiers() -> Vec<BoostTier> {
    vec![
        BoostTier {
            min_odds: 2.0,
            rate: 0.25,
        },
        BoostTier {
            min_odds: 2.51,
            rate: 0.5,
        },
        BoostTier {
            min_odds: 3.51,
            rate: 1.0,
        },
    ]
}

fn default_cashback_tiers() -> Vec<CashbackTier> {
    vec![
        CashbackTier {
            min_stake: 5.0,
            refund: 2.0,
        },
        CashbackTier {
            min_stake: 10.0,
            refund: 4.0,
        },
        CashbackTier {
            min_stake: 15.0,
            refund: 6.0,
        },
        CashbackTier {
            min_stake: 20.0,
            refund: 8.0,
        },
        CashbackTier {
            min_stake: 25.0,
            refund: 10.0,
        },
    ]
}

impl Default for PromotionPolicy {
    fn default() -> Self {
        Self {
            freebet_conversion_rate: default_freebet_conversion_rate(),
            freebet_bonus_rate: default_freebet_bonus_rate(),
            boost_tiers: default_boost_tiers(),
            cashback_tiers: default_cashback_tiers(),
        }
    }
}

impl PromotionPolicy {
    /// Load a policy from a TOML file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let policy: PromotionPolicy = toml::from_str(&content).map_err(ConfigError::Parse)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Check rates and tier-table ordering.
    pub fn validate(&self) -> Result<()> {
        ensure_rate("freebet_conversion_rate", self.freebet_conversion_rate)?;
        ensure_rate("freebet_bonus_rate", self.freebet_bonus_rate)?;

        let mut previous = 1.0;
        for tier in &self.boost_tiers {
            if tier.min_odds <= previous {
                return Err(ConfigError::InvalidValue {
                    field: "boost_tiers",
                    reason: format!(
                        "thresholds must ascend and stay above 1.0, got {}",
                        tier.min_odds
                    ),
                }
                .into());
            }
            if tier.rate <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: "boost_tiers",
                    reason: format!("boost rate must be positive, got {}", tier.rate),
                }
                .into());
            }
            previous = tier.min_odds;
        }

        let mut previous_stake = 0.0;
        let mut previous_refund = 0.0;
        for tier in &self.cashback_tiers {
            if tier.min_stake <= previous_stake || tier.refund <= previous_refund {
                return Err(ConfigError::InvalidValue {
                    field: "cashback_tiers",
                    reason: format!(
                        "brackets must ascend in both stake and refund, got ({}, {})",
                        tier.min_stake, tier.refund
                    ),
                }
                .into());
            }
            previous_stake = tier.min_stake;
            previous_refund = tier.refund;
        }
        Ok(())
    }

    /// Boost fraction for the given odds; zero below the first bracket.
    pub fn boost_rate(&self, odds: f64) -> f64 {
        let mut rate = 0.0;
        for tier in &self.boost_tiers {
            if odds >= tier.min_odds {
                rate = tier.rate;
            } else {
                break;
            }
        }
        rate
    }

    /// Cashback refund for the given losing stake; zero at or below the
    /// first bracket.
    pub fn cashback_refund(&self, stake: f64) -> f64 {
        let mut refund = 0.0;
        for tier in &self.cashback_tiers {
            if stake > tier.min_stake {
                refund = tier.refund;
            } else {
                break;
            }
        }
        refund
    }

    /// Smallest stake that earns the top cashback bracket: just above the
    /// last threshold. Zero when the table is empty.
    pub fn qualifying_stake(&self) -> f64 {
        self.cashback_tiers
            .last()
            .map_or(0.0, |tier| tier.min_stake + 0.01)
    }

    /// Candidate refund values for the tiered-cashback bracket scan,
    /// descending, always ending with zero.
    pub fn cashback_refunds_descending(&self) -> Vec<f64> {
        let mut refunds: Vec<f64> = self.cashback_tiers.iter().rev().map(|t| t.refund).collect();
        refunds.push(0.0);
        refunds
    }
}

fn ensure_rate(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 || value > 1.0 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("must be within (0, 1], got {value}"),
        }
        .into());
    }
    Ok(())
}
