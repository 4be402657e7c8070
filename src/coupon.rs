use crate::api::*;
use crate::stack::SelectionStack;
use log::{debug, warn};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

pub const DEFAULT_STAKE: Credits = 10;
pub const MIN_STAKE: Credits = 1;

/// Holds the stake and derives the multiplier and payout from whatever is in
/// the stack at the time of the call. Nothing derived is cached.
#[derive(Debug, Clone)]
pub struct CouponCalculator {
    stake: Credits,
    default_stake: Credits,
}

impl Default for CouponCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_STAKE)
    }
}

impl CouponCalculator {
    pub fn new(default_stake: Credits) -> Self {
        let default_stake = default_stake.max(MIN_STAKE);
        Self {
            stake: default_stake,
            default_stake,
        }
    }
    pub fn stake(&self) -> Credits {
        self.stake
    }
    pub fn aggregate_multiplier(selections: &[PredictionSelection]) -> f64 {
        selections.iter().map(|selection| selection.odds).product()
    }
    pub fn potential_payout(stake: Credits, multiplier: f64) -> f64 {
        f64::from(stake) * multiplier
    }
    /// Parses user input. Numbers below the minimum are raised to it, anything
    /// that is not a number keeps the previous stake.
    pub fn set_stake(&mut self, input: &str) -> Credits {
        let input = input.trim();
        let parsed = input.parse::<i64>().ok().or_else(|| {
            input
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(|value| value.trunc() as i64)
        });
        match parsed {
            Some(value) => self.set_stake_value(value),
            None => {
                warn!(
                    "Ignoring stake input {:?}, keeping {}",
                    input, self.stake
                );
                self.stake
            }
        }
    }
    pub fn set_stake_value(&mut self, value: i64) -> Credits {
        self.stake = value.clamp(i64::from(MIN_STAKE), i64::from(Credits::MAX)) as Credits;
        debug!("Stake set to {}", self.stake);
        self.stake
    }
    pub fn reset(&mut self) {
        self.stake = self.default_stake;
    }
    pub fn summary(&self, stack: &SelectionStack) -> CouponSummary {
        let multiplier = Self::aggregate_multiplier(stack.as_slice());
        let payout = Self::potential_payout(self.stake, multiplier);
        CouponSummary {
            selections: stack.as_slice().to_vec(),
            stake: self.stake,
            capacity: stack.capacity(),
            is_full: stack.is_full(),
            multiplier,
            payout,
            display_multiplier: round_display(multiplier, 2),
            display_payout: round_display(payout, 0),
        }
    }
}

fn round_display(value: f64, dp: u32) -> Decimal {
    Decimal::from_f64(value)
        .unwrap_or_default()
        .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod test {
    use super::*;
    use rust_decimal_macros::dec;

    fn selection(question: QuestionId, odds: Odds) -> PredictionSelection {
        PredictionSelection {
            question,
            vote: Vote::Yes,
            odds,
            normal_odds: odds,
            boosted: false,
            percentage: 55,
            category: "Crypto".into(),
        }
    }

    #[test]
    fn empty_multiplier_is_one() {
        assert_eq!(CouponCalculator::aggregate_multiplier(&[]), 1.0);
    }

    #[test]
    fn multiplier_is_product() {
        let selections = vec![selection(1, 1.5), selection(2, 2.0)];
        assert_eq!(CouponCalculator::aggregate_multiplier(&selections), 3.0);
        assert_eq!(CouponCalculator::potential_payout(10, 3.0), 30.0);
        let selections = vec![selection(1, 1.4), selection(2, 2.0)];
        assert_eq!(CouponCalculator::aggregate_multiplier(&selections), 2.8);
        assert_eq!(CouponCalculator::potential_payout(10, 2.8), 28.0);
    }

    #[test]
    fn stake_parsing() {
        let mut coupon = CouponCalculator::default();
        assert_eq!(coupon.stake(), 10);
        assert_eq!(coupon.set_stake("25"), 25);
        assert_eq!(coupon.set_stake("abc"), 25);
        assert_eq!(coupon.set_stake(""), 25);
        assert_eq!(coupon.set_stake("0"), 1);
        assert_eq!(coupon.set_stake("-40"), 1);
        assert_eq!(coupon.set_stake(" 12.9 "), 12);
        assert_eq!(coupon.set_stake("NaN"), 12);
        assert_eq!(coupon.set_stake("99999999999"), Credits::MAX);
        coupon.reset();
        assert_eq!(coupon.stake(), 10);
    }

    #[test]
    fn zero_default_stake_is_raised() {
        assert_eq!(CouponCalculator::new(0).stake(), MIN_STAKE);
    }

    #[test]
    fn summary_rounds_for_display() {
        let mut stack = SelectionStack::new(3);
        stack.push(selection(1, 1.5)).unwrap();
        stack.push(selection(2, 2.0)).unwrap();
        stack.push(selection(3, 1.25)).unwrap();
        let summary = CouponCalculator::default().summary(&stack);
        assert_eq!(summary.multiplier, 3.75);
        assert_eq!(summary.payout, 37.5);
        assert_eq!(summary.display_multiplier, dec!(3.75));
        assert_eq!(summary.display_payout, dec!(38));
        assert!(summary.is_full);
        assert_eq!(summary.selections.len(), 3);
    }

    #[test]
    fn summary_tracks_stack_changes() {
        let mut stack = SelectionStack::default();
        let mut coupon = CouponCalculator::default();
        stack.push(selection(1, 1.4)).unwrap();
        stack.push(selection(2, 2.0)).unwrap();
        coupon.set_stake_value(10);
        assert_eq!(coupon.summary(&stack).display_payout, dec!(28));
        stack.remove(2);
        assert_eq!(coupon.summary(&stack).multiplier, 1.4);
        stack.clear();
        let summary = coupon.summary(&stack);
        assert_eq!(summary.multiplier, 1.0);
        assert_eq!(summary.payout, 10.0);
        assert_eq!(summary.display_multiplier, dec!(1.00));
    }
}
