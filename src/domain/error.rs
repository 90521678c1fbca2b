//! Domain validation errors for the stake engine.
//!
//! These errors are returned by `try_new` constructors and by the
//! equalizer/promotion operations when an input violates an engine
//! invariant. An error means no stake plan is produced; the engine never
//! returns partial results.
//!
//! # Examples
//!
//! ```
//! use surebet::domain::error::DomainError;
//! use surebet::domain::OddsVector;
//!
//! // Decimal odds at or below 1.0 carry no profit potential.
//! let result = OddsVector::try_new(vec![2.0, 1.0]);
//!
//! assert!(matches!(result, Err(DomainError::InvalidOdds { index: 1, .. })));
//! ```

use thiserror::Error;

/// Errors raised when an engine invariant is violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Odds vectors must contain at least one outcome.
    #[error("odds vector is empty")]
    EmptyOdds,

    /// An event needs at least two mutually exclusive outcomes.
    #[error("at least two outcomes are required, got {count}")]
    NotEnoughOutcomes {
        /// Number of outcomes provided.
        count: usize,
    },

    /// Decimal odds must be finite and above even money.
    #[error("decimal odds must be finite and greater than 1.0, got {odds} at outcome {index}")]
    InvalidOdds {
        /// Index of the offending outcome.
        index: usize,
        /// The invalid odds value.
        odds: f64,
    },

    /// An anchor or target outcome index outside the odds vector.
    #[error("outcome index {index} out of range for {count} outcomes")]
    OutcomeOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of outcomes in the vector.
        count: usize,
    },

    /// Stakes, stake totals and gain caps must be strictly positive.
    #[error("stake must be a positive amount, got {stake}")]
    NonPositiveStake {
        /// The invalid amount.
        stake: f64,
    },

    /// Refund rates are a fraction of the lost stake.
    #[error("refund rate must be within (0, 1], got {rate}")]
    InvalidRefundRate {
        /// The invalid rate.
        rate: f64,
    },

    /// Boost promotions need at least one outcome inside a boost tier.
    #[error("no outcome qualifies for a boost, highest odds {highest}")]
    NoBoostCandidate {
        /// Highest odds in the vector, for context.
        highest: f64,
    },

    /// The full-refund equation system has no stable solution.
    #[error("refund system is degenerate: {reason}")]
    DegenerateSystem {
        /// What went wrong during or after the solve.
        reason: String,
    },
}
