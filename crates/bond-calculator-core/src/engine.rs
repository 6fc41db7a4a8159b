//! Engine facade: one structured valuation request in, one structured
//! response out. Transport and serialization belong to the caller.

use std::time::Instant;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::day_count;
use crate::error::BondCalcError;
use crate::pricing::{fixed, floating};
use crate::risk;
use crate::solver::NewtonConfig;
use crate::types::{with_metadata, CallEntry, ComputationOutput, FloatingRateEntry, Money, Rate};
use crate::BondCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A complete bond valuation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationRequest {
    /// Par / face value (typically 1000)
    pub face_value: Money,
    /// Annual coupon rate as a decimal (e.g. 0.05 = 5%)
    pub coupon_rate: Rate,
    /// Observed market price the YTM solve targets
    pub market_price: Money,
    /// Coupon payments per year
    pub frequency: u32,
    /// Settlement (valuation) date
    pub settlement_date: NaiveDate,
    /// Maturity date
    pub maturity_date: NaiveDate,
    /// Issuer call options; YTC is computed only when non-empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub call_schedule: Vec<CallEntry>,
    /// Floating coupon resets; the floating price is computed only when
    /// non-empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub floating_rates: Vec<FloatingRateEntry>,
}

/// Output of a complete bond valuation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationResponse {
    /// Yield to maturity, solved via Newton-Raphson
    pub ytm: Rate,
    /// Model price at the solved YTM
    pub price: Money,
    /// Accrued interest since the notional last coupon date
    pub accrued_interest: Money,
    /// Price drop for a one-basis-point yield increase
    pub pv01: Money,
    /// PV01 scaled to dollars per basis point per 100 face
    pub dv01: Money,
    /// Modified duration derived from PV01
    pub modified_duration: Decimal,
    /// Yield to call: present only when a call schedule was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ytc: Option<Rate>,
    /// Floating-leg price: present only when resets were supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floating_bond_price: Option<Money>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run a full bond valuation: YTM solve, re-price, accrued interest, risk
/// metrics, and the optional YTC / floating legs.
pub fn value_bond(
    request: &ValuationRequest,
) -> BondCalcResult<ComputationOutput<ValuationResponse>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_request(request)?;

    let config = NewtonConfig::default();

    let ytm = fixed::yield_to_maturity(
        request.market_price,
        request.face_value,
        request.coupon_rate,
        request.settlement_date,
        request.maturity_date,
        request.frequency,
        &config,
    )?;

    let price = fixed::price(
        request.face_value,
        request.coupon_rate,
        request.settlement_date,
        request.maturity_date,
        ytm,
        request.frequency,
    );

    // Notional last coupon: one coupon interval before maturity, with
    // integer month division.
    let months_back = (12 / request.frequency) as i32;
    if 12 % request.frequency != 0 {
        warnings.push(format!(
            "Frequency {} does not divide 12; notional last coupon date is approximate",
            request.frequency
        ));
    }
    let last_coupon = day_count::subtract_months(request.maturity_date, months_back);
    let accrued_interest = day_count::accrued_interest(
        request.face_value,
        request.coupon_rate,
        request.settlement_date,
        last_coupon,
        request.frequency,
    );

    let pv01 = risk::pv01(
        ytm,
        request.face_value,
        request.coupon_rate,
        request.settlement_date,
        request.maturity_date,
        request.frequency,
    );
    let dv01 = risk::dv01(pv01, request.face_value);
    let modified_duration = risk::modified_duration(price, pv01)?;

    let ytc = if request.call_schedule.is_empty() {
        None
    } else {
        Some(fixed::yield_to_call(
            request.market_price,
            request.face_value,
            request.coupon_rate,
            request.settlement_date,
            &request.call_schedule,
            request.frequency,
            &config,
        )?)
    };

    // The floating leg discounts at the solved YTM.
    let floating_bond_price = if request.floating_rates.is_empty() {
        None
    } else {
        Some(floating::price(
            request.face_value,
            &request.floating_rates,
            request.settlement_date,
            request.maturity_date,
            ytm,
            request.frequency,
        )?)
    };

    let output = ValuationResponse {
        ytm,
        price,
        accrued_interest,
        pv01,
        dv01,
        modified_duration,
        ytc,
        floating_bond_price,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Bond valuation — Newton-Raphson YTM/YTC over day-count periods",
        request,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_request(request: &ValuationRequest) -> BondCalcResult<()> {
    if request.face_value <= Decimal::ZERO {
        return Err(BondCalcError::InvalidInput {
            field: "face_value".into(),
            reason: "Face value must be positive".into(),
        });
    }
    if request.frequency == 0 {
        return Err(BondCalcError::InvalidInput {
            field: "frequency".into(),
            reason: "Coupon frequency must be positive".into(),
        });
    }
    if request.maturity_date <= request.settlement_date {
        return Err(BondCalcError::InvalidInput {
            field: "maturity_date".into(),
            reason: "Maturity date must be after settlement date".into(),
        });
    }
    for entry in &request.call_schedule {
        if entry.call_date <= request.settlement_date {
            return Err(BondCalcError::InvalidInput {
                field: "call_schedule".into(),
                reason: format!(
                    "Call date {} must be after settlement date",
                    entry.call_date
                ),
            });
        }
        if entry.call_date > request.maturity_date {
            return Err(BondCalcError::InvalidInput {
                field: "call_schedule".into(),
                reason: format!(
                    "Call date {} must be on or before maturity date",
                    entry.call_date
                ),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn discount_bond_request() -> ValuationRequest {
        ValuationRequest {
            face_value: dec!(1000),
            coupon_rate: dec!(0.05),
            market_price: dec!(980),
            frequency: 2,
            settlement_date: date(2024, 1, 15),
            maturity_date: date(2029, 1, 15),
            call_schedule: Vec::new(),
            floating_rates: Vec::new(),
        }
    }

    #[test]
    fn test_validation_rejects_zero_face() {
        let mut request = discount_bond_request();
        request.face_value = Decimal::ZERO;
        let err = value_bond(&request).unwrap_err();
        assert!(matches!(err, BondCalcError::InvalidInput { .. }));
    }

    #[test]
    fn test_validation_rejects_zero_frequency() {
        let mut request = discount_bond_request();
        request.frequency = 0;
        let err = value_bond(&request).unwrap_err();
        assert!(matches!(err, BondCalcError::InvalidInput { .. }));
    }

    #[test]
    fn test_validation_rejects_inverted_dates() {
        let mut request = discount_bond_request();
        request.maturity_date = request.settlement_date;
        let err = value_bond(&request).unwrap_err();
        assert!(matches!(err, BondCalcError::InvalidInput { .. }));
    }

    #[test]
    fn test_validation_rejects_call_date_outside_window() {
        let mut request = discount_bond_request();
        request.call_schedule = vec![CallEntry {
            call_date: date(2030, 1, 15), // past maturity
            call_price: dec!(1010),
        }];
        let err = value_bond(&request).unwrap_err();
        assert!(matches!(err, BondCalcError::InvalidInput { .. }));

        request.call_schedule = vec![CallEntry {
            call_date: date(2024, 1, 15), // on settlement
            call_price: dec!(1010),
        }];
        let err = value_bond(&request).unwrap_err();
        assert!(matches!(err, BondCalcError::InvalidInput { .. }));
    }

    #[test]
    fn test_optional_legs_absent_without_schedules() {
        let result = value_bond(&discount_bond_request()).unwrap();
        assert!(result.result.ytc.is_none());
        assert!(result.result.floating_bond_price.is_none());
    }

    #[test]
    fn test_irregular_frequency_warns() {
        let mut request = discount_bond_request();
        request.frequency = 5;
        let result = value_bond(&request).unwrap();
        assert!(
            result.warnings.iter().any(|w| w.contains("does not divide 12")),
            "expected a notional-coupon warning, got {:?}",
            result.warnings
        );
    }
}
