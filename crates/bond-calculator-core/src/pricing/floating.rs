//! Present-value pricing for a schedule of floating coupon resets.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::BondCalcError;
use crate::types::{FloatingRateEntry, Money, Rate};
use crate::BondCalcResult;

/// Price a floating-rate bond from its reset schedule.
///
/// Entries are sorted ascending by reset date; only resets strictly after
/// settlement and on/before maturity qualify. Each qualifying coupon is
/// discounted at an exponent equal to the count of qualifying entries seen
/// so far, and the redemption at the final count. The discount index is
/// therefore tied to schedule position, not elapsed calendar time; with no
/// qualifying entries the face value comes back undiscounted.
pub fn price(
    face: Money,
    schedule: &[FloatingRateEntry],
    settle: NaiveDate,
    maturity: NaiveDate,
    discount_rate: Rate,
    frequency: u32,
) -> BondCalcResult<Money> {
    if schedule.is_empty() {
        return Err(BondCalcError::EmptySchedule {
            context: "floating price requires at least one reset entry".into(),
        });
    }

    let mut entries = schedule.to_vec();
    entries.sort_by_key(|entry| entry.reset_date);

    let freq = Decimal::from(frequency);
    let periodic = Decimal::ONE + discount_rate / freq;

    let mut discount = Decimal::ONE;
    let mut total = Decimal::ZERO;
    for entry in entries
        .iter()
        .filter(|entry| entry.reset_date > settle && entry.reset_date <= maturity)
    {
        // Same out-of-range handling as the fixed-leg accumulation: a
        // factor past decimal range discounts the tail to nothing.
        discount = match discount.checked_mul(periodic) {
            Some(next) if !next.is_zero() => next,
            _ => return Ok(total),
        };
        let coupon = face * entry.rate / freq;
        match coupon.checked_div(discount).and_then(|pv| total.checked_add(pv)) {
            Some(next) => total = next,
            None => return Ok(total),
        }
    }

    match face.checked_div(discount).and_then(|pv| total.checked_add(pv)) {
        Some(result) => Ok(result),
        None => Ok(total),
    }
}
