//! Promotional variants of the arbitrage engine.
//!
//! Each promotion derives a transformed odds vector and/or stake
//! constraint, delegates to the equalizer (or to the boosted-odds search,
//! or to the refund equation system), and reports net profit with
//! promotional credits valued at their policy conversion rate.
//!
//! The free functions in the submodules are the core engine surface. The
//! [`Promotion`] trait wraps them with per-instance parameters so a set
//! of configured promotions can be evaluated uniformly against the same
//! odds through a [`PromotionRegistry`].

pub mod boosted;
pub mod cashback;
pub mod freebet;
pub mod refund;

pub use boosted::{BoostMode, BoostedOdds, BoostedPlan};
pub use cashback::{CashbackPlan, OddsReward, OnLossCashback, TieredCashback};
pub use freebet::{DoubleFreebet, DoubleFreebetPlan, FreebetPlan, Reallocation, SingleFreebet};
pub use refund::{FullRefund, RefundPlan};

use crate::config::PromotionPolicy;
use crate::domain::odds::OddsVector;
use crate::error::Result;

/// A stake distribution produced by a promotion.
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionPlan {
    stakes: Vec<f64>,
    profit: f64,
}

impl PromotionPlan {
    pub(crate) fn new(stakes: Vec<f64>, profit: f64) -> Self {
        Self { stakes, profit }
    }

    /// The stake per outcome, index-aligned with the odds.
    pub fn stakes(&self) -> &[f64] {
        &self.stakes
    }

    /// Net profit under the promotion, whichever outcome wins.
    pub fn profit(&self) -> f64 {
        self.profit
    }
}

/// A configured promotion that can plan stakes for an odds vector.
pub trait Promotion: Send + Sync {
    /// Unique identifier for logging and configuration.
    fn name(&self) -> &'static str;

    /// Compute the stake distribution and net profit for `odds`.
    fn plan(&self, odds: &OddsVector, policy: &PromotionPolicy) -> Result<PromotionPlan>;
}

/// Registry of configured promotions, evaluated in registration order.
#[derive(Default)]
pub struct PromotionRegistry {
    promotions: Vec<Box<dyn Promotion>>,
}

impl PromotionRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a promotion.
    pub fn register(&mut self, promotion: Box<dyn Promotion>) {
        self.promotions.push(promotion);
    }

    /// Get all registered promotions.
    pub fn promotions(&self) -> &[Box<dyn Promotion>] {
        &self.promotions
    }

    /// Number of registered promotions.
    pub fn len(&self) -> usize {
        self.promotions.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.promotions.is_empty()
    }

    /// Plan every registered promotion against the same odds.
    ///
    /// Results keep registration order so callers can compare variants
    /// of the same event side by side.
    pub fn plan_all(
        &self,
        odds: &OddsVector,
        policy: &PromotionPolicy,
    ) -> Vec<(&'static str, Result<PromotionPlan>)> {
        self.promotions
            .iter()
            .map(|promotion| (promotion.name(), promotion.plan(odds, policy)))
            .collect()
    }
}
