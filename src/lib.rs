//! Surebet - stake optimization for betting arbitrage and promotions.
//!
//! This crate computes optimal stake distributions across the mutually
//! exclusive outcomes of an event, given decimal odds, for plain arbitrage
//! and for the promotional variants bookmakers run on top of it (free
//! bets, stake-on-loss cashback, boosted odds, tiered cashback,
//! guaranteed refunds, multi-leg combinations).
//!
//! # Architecture
//!
//! Everything is a pure function of its inputs; data flows one way:
//!
//! - **`domain::equalizer`** - the base building block: the stake vector
//!   whose payout `stake[i] * odds[i]` is identical for every outcome,
//!   anchored either by a total stake or by a fixed stake on one outcome.
//! - **`domain::promotion`** - one module per promotional variant. Each
//!   transforms the odds and/or the constraint, delegates to the
//!   equalizer (or to the boosted-odds search, or to the refund equation
//!   system), and reports net profit with promotional credits valued at
//!   their policy conversion rate.
//! - **`domain::solver`** - LP solver port with a HiGHS backend via
//!   `good_lp`, used by the full-refund promotion to solve its square
//!   equality system exactly.
//!
//! # Modules
//!
//! - [`config`] - Promotion policy (conversion rates and tier tables) with
//!   TOML loading
//! - [`domain`] - Odds, equalizer, promotions, solver port
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```
//! use surebet::domain::{equalize, OddsVector, StakeConstraint};
//!
//! let odds = OddsVector::try_new(vec![2.0, 3.0, 6.0]).unwrap();
//! let plan = equalize(&odds, StakeConstraint::TotalStake(100.0)).unwrap();
//!
//! // Every outcome pays the same, whoever wins.
//! assert!((plan.payout() - 100.0).abs() < 1e-9);
//! assert!((plan.stakes()[0] - 50.0).abs() < 1e-9);
//! ```

pub mod config;
pub mod domain;
pub mod error;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
