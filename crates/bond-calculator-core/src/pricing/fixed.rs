//! Present-value pricing for a bullet fixed-coupon bond, and the YTM/YTC
//! solves built on top of it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::day_count;
use crate::error::BondCalcError;
use crate::solver::{self, NewtonConfig};
use crate::types::{CallEntry, Money, Rate};
use crate::BondCalcResult;

/// Price a bullet bond: coupons over `num_periods` periods plus the face
/// value redeemed at the final period, discounted at `yield_rate`.
///
/// A degenerate range (`maturity <= settle`) leaves the coupon sum empty and
/// returns the undiscounted redemption; no error is raised here.
pub fn price(
    face: Money,
    coupon_rate: Rate,
    settle: NaiveDate,
    maturity: NaiveDate,
    yield_rate: Rate,
    frequency: u32,
) -> Money {
    let n = day_count::num_periods(settle, maturity, frequency);
    discount_cashflows(face, coupon_rate, yield_rate, frequency, n, face)
}

/// Discount `periods` coupons of `face * coupon_rate / frequency` plus a
/// redemption amount at the final period.
///
/// Discount factors are accumulated by iterative multiplication, which is
/// exact in decimal for integer period exponents. Once the factor leaves
/// decimal range (overflow at extreme yields over long horizons, or
/// underflow to zero at deeply negative yields) the remaining cashflows
/// discount to nothing and the sum so far is returned.
fn discount_cashflows(
    face: Money,
    coupon_rate: Rate,
    yield_rate: Rate,
    frequency: u32,
    periods: i64,
    redemption: Money,
) -> Money {
    let freq = Decimal::from(frequency);
    let coupon = face * coupon_rate / freq;
    let periodic = Decimal::ONE + yield_rate / freq;

    let mut discount = Decimal::ONE;
    let mut total = Decimal::ZERO;
    for _ in 0..periods.max(0) {
        discount = match discount.checked_mul(periodic) {
            Some(next) if !next.is_zero() => next,
            _ => return total,
        };
        match coupon.checked_div(discount).and_then(|pv| total.checked_add(pv)) {
            Some(next) => total = next,
            None => return total,
        }
    }
    match redemption.checked_div(discount).and_then(|pv| total.checked_add(pv)) {
        Some(result) => result,
        None => total,
    }
}

/// Solve for the yield at which the modeled price equals the market price.
pub fn yield_to_maturity(
    market_price: Money,
    face: Money,
    coupon_rate: Rate,
    settle: NaiveDate,
    maturity: NaiveDate,
    frequency: u32,
    config: &NewtonConfig,
) -> BondCalcResult<Rate> {
    let n = day_count::num_periods(settle, maturity, frequency);
    solver::solve(
        "yield_to_maturity",
        |rate| discount_cashflows(face, coupon_rate, rate, frequency, n, face) - market_price,
        config,
    )
}

/// Solve a yield per call entry, with the call price replacing face value at
/// the call date, and return the minimum across entries: the investor's
/// worst-case outcome among call possibilities.
pub fn yield_to_call(
    market_price: Money,
    face: Money,
    coupon_rate: Rate,
    settle: NaiveDate,
    call_schedule: &[CallEntry],
    frequency: u32,
    config: &NewtonConfig,
) -> BondCalcResult<Rate> {
    if call_schedule.is_empty() {
        return Err(BondCalcError::EmptySchedule {
            context: "yield to call requires at least one call entry".into(),
        });
    }

    let mut entries = call_schedule.to_vec();
    entries.sort_by_key(|entry| entry.call_date);

    let mut worst: Option<Rate> = None;
    for entry in &entries {
        let n = day_count::num_periods(settle, entry.call_date, frequency);
        let rate = solver::solve(
            "yield_to_call",
            |r| discount_cashflows(face, coupon_rate, r, frequency, n, entry.call_price) - market_price,
            config,
        )?;
        worst = Some(match worst {
            Some(w) => w.min(rate),
            None => rate,
        });
    }

    worst.ok_or_else(|| BondCalcError::EmptySchedule {
        context: "yield to call requires at least one call entry".into(),
    })
}

/// Input for a standalone fixed-leg price calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedPriceInput {
    pub face_value: Money,
    pub coupon_rate: Rate,
    pub settlement_date: NaiveDate,
    pub maturity_date: NaiveDate,
    pub yield_rate: Rate,
    pub frequency: u32,
}

pub fn price_from_input(input: &FixedPriceInput) -> Money {
    price(
        input.face_value,
        input.coupon_rate,
        input.settlement_date,
        input.maturity_date,
        input.yield_rate,
        input.frequency,
    )
}
