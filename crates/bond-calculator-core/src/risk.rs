//! First-order interest-rate risk metrics derived from the fixed pricer.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::BondCalcError;
use crate::pricing::fixed;
use crate::types::{Money, Rate};
use crate::BondCalcResult;

/// One basis point, the yield shift behind PV01.
const ONE_BP: Decimal = dec!(0.0001);

/// Price drop for a one-basis-point yield increase. Positive for a standard
/// bond, since yield up means price down.
pub fn pv01(
    ytm: Rate,
    face: Money,
    coupon_rate: Rate,
    settle: NaiveDate,
    maturity: NaiveDate,
    frequency: u32,
) -> Money {
    let base = fixed::price(face, coupon_rate, settle, maturity, ytm, frequency);
    let shifted = fixed::price(face, coupon_rate, settle, maturity, ytm + ONE_BP, frequency);
    base - shifted
}

/// Dollar value of a basis point, quoted per 100 of face value.
pub fn dv01(pv01: Money, face: Money) -> Money {
    pv01 * (face / dec!(100))
}

/// Modified duration from the basis-point sensitivity: `pv01 / price * 10000`.
/// The scaling constant ties PV01's 1bp denominator back to a yield-percent
/// duration and must stay exact.
pub fn modified_duration(price: Money, pv01: Money) -> BondCalcResult<Decimal> {
    let ratio = pv01.checked_div(price).ok_or_else(|| BondCalcError::InvalidInput {
        field: "price".into(),
        reason: "Modified duration is undefined at zero price".into(),
    })?;
    Ok(ratio * dec!(10000))
}
