//! Integration tests for the full-refund equation system.

use surebet::config::PromotionPolicy;
use surebet::domain::promotion::{refund, FullRefund, Promotion};
use surebet::domain::solver::HighsSolver;
use surebet::domain::OddsVector;

const SOLVE_TOLERANCE: f64 = 1e-6;

#[test]
fn refund_ceiling_excludes_the_highest_odds_leg() {
    let odds = OddsVector::try_new(vec![2.1, 3.4, 7.5]).unwrap();
    let policy = PromotionPolicy::default();
    let plan = refund::full_refund(&odds, 40.0, false, 0.5, &policy, &HighsSolver::new()).unwrap();

    // The 7.5 leg is the fixed one: the cap binds the other two.
    let refundable = 0.5 * (plan.stakes()[0] + plan.stakes()[1]);
    assert!((refundable - 40.0).abs() < SOLVE_TOLERANCE);
}

#[test]
fn solution_satisfies_every_outcome_equation() {
    let odds = OddsVector::try_new(vec![5.2, 3.9, 3.0, 2.6]).unwrap();
    let policy = PromotionPolicy::default();
    let plan = refund::full_refund(&odds, 60.0, true, 1.0, &policy, &HighsSolver::new()).unwrap();

    // Freebet refunds are worth 0.8 on the unit inside each equation.
    let total: f64 = plan.stakes().iter().sum();
    for (index, &value) in odds.as_slice().iter().enumerate() {
        let refunds = 0.8 * (total - plan.stakes()[index]);
        let gross = plan.stakes()[index] * value + refunds;
        assert!(
            (gross - plan.gross_return()).abs() < SOLVE_TOLERANCE,
            "outcome {index} returns {gross}, expected {}",
            plan.gross_return()
        );
    }
    assert!((plan.profit() - (plan.gross_return() - total)).abs() < SOLVE_TOLERANCE);
}

#[test]
fn stakes_are_non_negative() {
    let odds = OddsVector::try_new(vec![2.05, 3.6, 4.4]).unwrap();
    let policy = PromotionPolicy::default();
    let plan = refund::full_refund(&odds, 25.0, false, 1.0, &policy, &HighsSolver::new()).unwrap();

    assert!(plan.stakes().iter().all(|&stake| stake >= -SOLVE_TOLERANCE));
}

#[test]
fn full_refund_works_as_a_registered_promotion() {
    let promotion = FullRefund {
        refund_cap: 100.0,
        as_freebet: false,
        refund_rate: 1.0,
        solver: HighsSolver::new(),
    };
    assert_eq!(promotion.name(), "full_refund");

    let odds = OddsVector::try_new(vec![3.0, 2.5]).unwrap();
    let plan = promotion
        .plan(&odds, &PromotionPolicy::default())
        .unwrap();

    assert_eq!(plan.stakes().len(), 2);
    assert!((plan.profit() - 150.0).abs() < SOLVE_TOLERANCE);
}
