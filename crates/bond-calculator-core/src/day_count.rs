//! Period counting and day-count-convention fractions.
//!
//! Centralizes all calendar arithmetic used by the pricing models: whole-day
//! spans, leap-year handling, month stepping, and the 30/360 stub rules.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::BondCalcError;
use crate::types::{Money, Rate};

// ---------------------------------------------------------------------------
// Day count conventions
// ---------------------------------------------------------------------------

/// Day count convention for computing accrued interest and period fractions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCountConvention {
    /// 30/360 US corporate convention
    Thirty360,
    /// ACT/360 money market convention
    Actual360,
    /// ACT/365 fixed (UK gilts)
    Actual365,
    /// ACT/ACT (US Treasury)
    ActualActual,
}

impl DayCountConvention {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayCountConvention::Thirty360 => "30/360",
            DayCountConvention::Actual360 => "ACT/360",
            DayCountConvention::Actual365 => "ACT/365",
            DayCountConvention::ActualActual => "ACT/ACT",
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayCountConvention {
    type Err = BondCalcError;

    /// Parse a convention from its market name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "30/360" => Ok(DayCountConvention::Thirty360),
            "ACT/360" => Ok(DayCountConvention::Actual360),
            "ACT/365" => Ok(DayCountConvention::Actual365),
            "ACT/ACT" => Ok(DayCountConvention::ActualActual),
            _ => Err(BondCalcError::InvalidInput {
                field: "day_count_convention".into(),
                reason: format!("Unsupported day count convention: {s}"),
            }),
        }
    }
}

impl Serialize for DayCountConvention {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DayCountConvention {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Period counting
// ---------------------------------------------------------------------------

/// Approximate number of whole coupon periods between two dates.
///
/// floor(whole days / (365/frequency)). This is a day-count approximation,
/// not a coupon-date enumeration: it undercounts when the span does not
/// divide evenly into periods, and returns zero or negative values when
/// `end <= settle`. Callers own that guard.
pub fn num_periods(settle: NaiveDate, end: NaiveDate, frequency: u32) -> i64 {
    let total_days = Decimal::from((end - settle).num_days());
    let period_length = dec!(365) / Decimal::from(frequency);
    (total_days / period_length).floor().to_i64().unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Accrued interest
// ---------------------------------------------------------------------------

/// Accrued interest since the last coupon date, on a 365-day period basis.
pub fn accrued_interest(
    face: Money,
    coupon_rate: Rate,
    settle: NaiveDate,
    last_coupon: NaiveDate,
    frequency: u32,
) -> Money {
    let freq = Decimal::from(frequency);
    let days_accrued = Decimal::from((settle - last_coupon).num_days());
    let period_days = dec!(365) / freq;
    (face * coupon_rate / freq) * (days_accrued / period_days)
}

/// Accrued interest under an explicit day count convention.
///
/// Returns `face * coupon_rate * fraction`. Unlike [`accrued_interest`],
/// the result is not scaled by `1/frequency`; the two paths are distinct
/// operations with distinct conventions and must not be unified. The
/// frequency parameter is unused but kept for call-shape compatibility.
pub fn accrued_interest_with_convention(
    face: Money,
    coupon_rate: Rate,
    settle: NaiveDate,
    last_coupon: NaiveDate,
    _frequency: u32,
    convention: DayCountConvention,
) -> Money {
    face * coupon_rate * year_fraction(convention, last_coupon, settle)
}

/// Year fraction between two dates under the given convention.
pub fn year_fraction(convention: DayCountConvention, start: NaiveDate, end: NaiveDate) -> Decimal {
    match convention {
        DayCountConvention::Thirty360 => {
            let d1 = i64::from(start.day().min(30));
            let d2 = i64::from(end.day().min(30));
            let years = i64::from(end.year() - start.year());
            let months = i64::from(end.month() as i32 - start.month() as i32);
            Decimal::from(360 * years + 30 * months + (d2 - d1)) / dec!(360)
        }
        DayCountConvention::Actual360 => {
            Decimal::from((end - start).num_days()) / dec!(360)
        }
        DayCountConvention::Actual365 => {
            Decimal::from((end - start).num_days()) / dec!(365)
        }
        DayCountConvention::ActualActual => {
            // Denominator follows the year the accrual period started in.
            let year_length = if is_leap_year(start.year()) {
                dec!(366)
            } else {
                dec!(365)
            };
            Decimal::from((end - start).num_days()) / year_length
        }
    }
}

// ---------------------------------------------------------------------------
// Calendar helpers
// ---------------------------------------------------------------------------

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Subtract a number of months from a date, clamping the day to the month's max.
pub fn subtract_months(date: NaiveDate, months: i32) -> NaiveDate {
    let total_months = date.year() * 12 + date.month() as i32 - 1 - months;
    let new_year = total_months.div_euclid(12);
    let new_month = (total_months.rem_euclid(12) + 1) as u32;
    let max_day = days_in_month(new_year, new_month);
    let day = date.day().min(max_day);
    NaiveDate::from_ymd_opt(new_year, new_month, day).unwrap_or(date)
}

/// Number of days in a given month/year.
fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

// ---------------------------------------------------------------------------
// Wire input
// ---------------------------------------------------------------------------

/// Input for a standalone accrued interest calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccruedInterestInput {
    pub face_value: Money,
    pub coupon_rate: Rate,
    pub settlement_date: NaiveDate,
    pub last_coupon_date: NaiveDate,
    pub frequency: u32,
    /// When present, accrue under this convention instead of the plain
    /// 365-day period basis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_count: Option<DayCountConvention>,
}

/// Compute accrued interest from a wire input, dispatching on whether a
/// day count convention was supplied.
pub fn accrued_interest_from_input(input: &AccruedInterestInput) -> Money {
    match input.day_count {
        Some(convention) => accrued_interest_with_convention(
            input.face_value,
            input.coupon_rate,
            input.settlement_date,
            input.last_coupon_date,
            input.frequency,
            convention,
        ),
        None => accrued_interest(
            input.face_value,
            input.coupon_rate,
            input.settlement_date,
            input.last_coupon_date,
            input.frequency,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // -----------------------------------------------------------------------
    // num_periods
    // -----------------------------------------------------------------------

    #[test]
    fn test_num_periods_five_year_semi_annual() {
        // 2024-01-15 to 2029-01-15 is 1827 days; 1827 / 182.5 = 10.01 -> 10
        let n = num_periods(date(2024, 1, 15), date(2029, 1, 15), 2);
        assert_eq!(n, 10);
    }

    #[test]
    fn test_num_periods_undercounts_short_span() {
        // 180 days is just under one semi-annual period of 182.5 days
        let n = num_periods(date(2024, 1, 1), date(2024, 6, 29), 2);
        assert_eq!(n, 0);
    }

    #[test]
    fn test_num_periods_degenerate_range() {
        let settle = date(2024, 1, 15);
        assert_eq!(num_periods(settle, settle, 2), 0);
        assert!(
            num_periods(settle, date(2023, 1, 15), 2) < 0,
            "reversed range should go negative, not error"
        );
    }

    // -----------------------------------------------------------------------
    // Plain accrued interest
    // -----------------------------------------------------------------------

    #[test]
    fn test_accrued_interest_half_period() {
        // 1000 face, 5% coupon, semi-annual, 182 of 182.5 period days accrued
        let accrued = accrued_interest(dec!(1000), dec!(0.05), date(2024, 7, 15), date(2024, 1, 15), 2);
        // 25 * 182/182.5 = 24.9315...
        assert!(
            (accrued - dec!(24.9315)).abs() < dec!(0.0001),
            "got {accrued}"
        );
    }

    #[test]
    fn test_accrued_interest_zero_days() {
        let settle = date(2024, 1, 15);
        let accrued = accrued_interest(dec!(1000), dec!(0.05), settle, settle, 2);
        assert_eq!(accrued, Decimal::ZERO);
    }

    // -----------------------------------------------------------------------
    // Convention-based accrued interest
    // -----------------------------------------------------------------------

    #[test]
    fn test_thirty_360_known_quarter() {
        // Jan 15 -> Apr 15 is exactly 90/360 = 0.25 under 30/360
        let accrued = accrued_interest_with_convention(
            dec!(1000),
            dec!(0.05),
            date(2024, 4, 15),
            date(2024, 1, 15),
            2,
            DayCountConvention::Thirty360,
        );
        assert_eq!(accrued, dec!(12.5));
    }

    #[test]
    fn test_thirty_360_clamps_day_31() {
        // Both month-ends clamp to 30, so Jan 31 -> Mar 31 is 60/360
        let fraction = year_fraction(
            DayCountConvention::Thirty360,
            date(2024, 1, 31),
            date(2024, 3, 31),
        );
        assert_eq!(fraction, dec!(60) / dec!(360));
    }

    #[test]
    fn test_act_360_and_act_365_fractions() {
        let start = date(2024, 1, 15);
        let end = date(2024, 4, 15);
        // 91 actual days in this span (2024 is a leap year)
        assert_eq!(
            year_fraction(DayCountConvention::Actual360, start, end),
            dec!(91) / dec!(360)
        );
        assert_eq!(
            year_fraction(DayCountConvention::Actual365, start, end),
            dec!(91) / dec!(365)
        );
    }

    #[test]
    fn test_act_act_uses_leap_year_of_period_start() {
        let leap = year_fraction(
            DayCountConvention::ActualActual,
            date(2024, 1, 15),
            date(2024, 4, 15),
        );
        let non_leap = year_fraction(
            DayCountConvention::ActualActual,
            date(2023, 1, 15),
            date(2023, 4, 15),
        );
        assert_eq!(leap, dec!(91) / dec!(366));
        assert_eq!(non_leap, dec!(90) / dec!(365));
    }

    #[test]
    fn test_convention_paths_not_interchangeable() {
        // The plain path scales days by the 365/frequency period length,
        // which reduces to a full-year ACT/365 fraction, so ACT/365 is the
        // one convention that coincides with it. Any other basis diverges.
        let settle = date(2024, 4, 15);
        let last_coupon = date(2024, 1, 15);
        let plain = accrued_interest(dec!(1000), dec!(0.05), settle, last_coupon, 2);

        let act365 = accrued_interest_with_convention(
            dec!(1000),
            dec!(0.05),
            settle,
            last_coupon,
            2,
            DayCountConvention::Actual365,
        );
        assert!(
            (plain - act365).abs() < dec!(0.000000001),
            "plain ({plain}) coincides with ACT/365 ({act365})"
        );

        // 91/360 basis: 1000 * 0.05 * 91/360 = 12.6389 vs plain 12.4658
        let act360 = accrued_interest_with_convention(
            dec!(1000),
            dec!(0.05),
            settle,
            last_coupon,
            2,
            DayCountConvention::Actual360,
        );
        assert!(
            plain != act360,
            "plain ({plain}) and ACT/360 ({act360}) accrual must stay distinct"
        );
        assert!(
            (act360 - dec!(12.6389)).abs() < dec!(0.0001),
            "got {act360}"
        );
    }

    // -----------------------------------------------------------------------
    // Convention parsing
    // -----------------------------------------------------------------------

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            "act/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Actual360
        );
        assert_eq!(
            "Act/Act".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::ActualActual
        );
        assert_eq!(
            "30/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Thirty360
        );
    }

    #[test]
    fn test_parse_rejects_unknown_convention() {
        let err = "30E/360".parse::<DayCountConvention>().unwrap_err();
        assert!(
            err.to_string().contains("30E/360"),
            "error should name the unsupported convention, got: {err}"
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&DayCountConvention::ActualActual).unwrap();
        assert_eq!(json, "\"ACT/ACT\"");
        let parsed: DayCountConvention = serde_json::from_str("\"act/365\"").unwrap();
        assert_eq!(parsed, DayCountConvention::Actual365);
    }

    // -----------------------------------------------------------------------
    // Calendar helpers
    // -----------------------------------------------------------------------

    #[test]
    fn test_leap_year_rules() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn test_subtract_months_clamps_day() {
        // Mar 31 minus one month clamps to Feb 29 in a leap year
        assert_eq!(subtract_months(date(2024, 3, 31), 1), date(2024, 2, 29));
        assert_eq!(subtract_months(date(2023, 3, 31), 1), date(2023, 2, 28));
        // Crossing a year boundary
        assert_eq!(subtract_months(date(2024, 1, 15), 6), date(2023, 7, 15));
    }

    #[test]
    fn test_accrued_from_input_dispatches_on_convention() {
        let mut input = AccruedInterestInput {
            face_value: dec!(1000),
            coupon_rate: dec!(0.05),
            settlement_date: date(2024, 4, 15),
            last_coupon_date: date(2024, 1, 15),
            frequency: 2,
            day_count: None,
        };
        let plain = accrued_interest_from_input(&input);
        input.day_count = Some(DayCountConvention::Thirty360);
        let conv = accrued_interest_from_input(&input);
        assert_eq!(conv, dec!(12.5));
        assert!(plain != conv);
    }
}
