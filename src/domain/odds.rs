//! Validated decimal odds and odds transforms.
//!
//! [`OddsVector`] is the entry type for every engine operation: an ordered
//! sequence of decimal odds, one per mutually exclusive outcome of an
//! event. The constructor enforces the engine invariants so downstream
//! arithmetic can divide by any element without further checks.
//!
//! Adapter-transformed vectors (free-bet discounted odds, boosted odds)
//! deliberately bypass this type and flow as plain slices into the
//! crate-internal equalizer entry points: a discounted odds value may sit
//! below even money, which a caller-supplied vector never may.

use crate::domain::error::DomainError;

/// Floor substituted for even-money-or-below odds after the free-bet
/// discount, keeping transformed vectors divisible.
pub const FREEBET_ODDS_FLOOR: f64 = 0.01;

/// Combined odds are kept to four decimal places. Declared precision
/// contract, not incidental rounding.
const COMBINE_SCALE: f64 = 10_000.0;

/// An ordered vector of validated decimal odds.
#[derive(Debug, Clone, PartialEq)]
pub struct OddsVector(Vec<f64>);

impl OddsVector {
    /// Validate and wrap a vector of decimal odds.
    ///
    /// # Errors
    ///
    /// - [`DomainError::EmptyOdds`] for an empty vector
    /// - [`DomainError::NotEnoughOutcomes`] for fewer than two outcomes
    /// - [`DomainError::InvalidOdds`] for any element that is not finite
    ///   or not strictly greater than 1.0
    pub fn try_new(odds: Vec<f64>) -> Result<Self, DomainError> {
        if odds.is_empty() {
            return Err(DomainError::EmptyOdds);
        }
        if odds.len() < 2 {
            return Err(DomainError::NotEnoughOutcomes { count: odds.len() });
        }
        for (index, &value) in odds.iter().enumerate() {
            if !value.is_finite() || value <= 1.0 {
                return Err(DomainError::InvalidOdds { index, odds: value });
            }
        }
        Ok(Self(odds))
    }

    /// The odds as a slice, index-aligned with every stake vector.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of outcomes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a validated vector; present for API completeness.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Index of the lowest-odds outcome (first on ties).
    pub fn lowest(&self) -> usize {
        let mut best = 0;
        for (index, &value) in self.0.iter().enumerate().skip(1) {
            if value < self.0[best] {
                best = index;
            }
        }
        best
    }

    /// Index of the highest-odds outcome (first on ties).
    pub fn highest(&self) -> usize {
        let mut best = 0;
        for (index, &value) in self.0.iter().enumerate().skip(1) {
            if value > self.0[best] {
                best = index;
            }
        }
        best
    }

    /// The odds as played with free bets.
    ///
    /// A free bet pays profit only, never the stake back, so each odds
    /// value drops by one; values at or below even money degenerate to
    /// the [`FREEBET_ODDS_FLOOR`].
    pub fn freebet_odds(&self) -> Vec<f64> {
        self.0
            .iter()
            .map(|&value| {
                if value > 1.0 {
                    value - 1.0
                } else {
                    FREEBET_ODDS_FLOOR
                }
            })
            .collect()
    }
}

/// Combine the odds of several independent legs into a single vector.
///
/// Produces one element per outcome combination: the product of one odds
/// value chosen from each leg, rounded to four decimal places. Rows are
/// ordered with the first leg slowest and the last leg fastest.
///
/// # Errors
///
/// [`DomainError::EmptyOdds`] when no leg is given; validation errors if
/// rounding drags a near-even product to or below 1.0.
pub fn combine(legs: &[OddsVector]) -> Result<OddsVector, DomainError> {
    if legs.is_empty() {
        return Err(DomainError::EmptyOdds);
    }
    let mut rows = vec![1.0_f64];
    for leg in legs {
        let mut next = Vec::with_capacity(rows.len() * leg.len());
        for &acc in &rows {
            for &value in leg.as_slice() {
                next.push(acc * value);
            }
        }
        rows = next;
    }
    let rounded = rows
        .into_iter()
        .map(|product| (product * COMBINE_SCALE).round() / COMBINE_SCALE)
        .collect();
    OddsVector::try_new(rounded)
}
