use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::Years;

const DAYS_PER_YEAR: Decimal = dec!(365);

/// Remaining contractual life in years, Actual/365.
///
/// First matching rule wins:
/// 1. Termination and original expiry both present and both after the
///    report date — the grant survives its termination guard, so the
///    original expiry governs.
/// 2. Updated expiry present and after the report date — administratively
///    extended grants fall back to the updated expiry.
/// 3. Otherwise the grant is expired or ineligible: 0.
///
/// Absent dates select the next rule; they are never an error.
pub fn remaining_contractual_life(
    report_date: NaiveDate,
    termination_date: Option<NaiveDate>,
    original_expiry: Option<NaiveDate>,
    updated_expiry: Option<NaiveDate>,
) -> Years {
    if let (Some(termination), Some(expiry)) = (termination_date, original_expiry) {
        if termination > report_date && expiry > report_date {
            return year_fraction(report_date, expiry);
        }
    }

    if let Some(expiry) = updated_expiry {
        if expiry > report_date {
            return year_fraction(report_date, expiry);
        }
    }

    Decimal::ZERO
}

fn year_fraction(from: NaiveDate, to: NaiveDate) -> Years {
    let days = (to - from).num_days();
    Decimal::from(days) / DAYS_PER_YEAR
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    // -----------------------------------------------------------------------
    // 1. Terminated grant with original expiry still in the future
    // -----------------------------------------------------------------------
    #[test]
    fn test_termination_guard_uses_original_expiry() {
        let report = d(2026, 6, 30);
        let life = remaining_contractual_life(
            report,
            Some(d(2026, 9, 30)),
            Some(d(2027, 6, 30)),
            Some(d(2030, 6, 30)),
        );
        // 365 days to original expiry; updated expiry is ignored
        assert_eq!(life, Decimal::ONE);
    }

    // -----------------------------------------------------------------------
    // 2. Updated-expiry fallback
    // -----------------------------------------------------------------------
    #[test]
    fn test_updated_expiry_fallback_two_years() {
        let report = d(2026, 6, 30);
        let updated = report.checked_add_days(Days::new(730)).unwrap();
        let life = remaining_contractual_life(report, None, None, Some(updated));
        assert_eq!(life, Decimal::TWO);
    }

    #[test]
    fn test_past_termination_falls_back_to_updated_expiry() {
        let report = d(2026, 6, 30);
        // terminated before the report date: rule 1 does not apply
        let life = remaining_contractual_life(
            report,
            Some(d(2026, 1, 15)),
            Some(d(2027, 6, 30)),
            Some(d(2026, 12, 27)),
        );
        assert_eq!(life, Decimal::from(180) / Decimal::from(365));
    }

    // -----------------------------------------------------------------------
    // 3. Expired / ineligible rows
    // -----------------------------------------------------------------------
    #[test]
    fn test_all_absent_is_zero() {
        assert_eq!(
            remaining_contractual_life(d(2026, 6, 30), None, None, None),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_expiries_in_the_past_are_zero() {
        let report = d(2026, 6, 30);
        let life = remaining_contractual_life(
            report,
            Some(d(2027, 1, 1)),
            Some(d(2026, 1, 1)),
            Some(d(2025, 12, 31)),
        );
        assert_eq!(life, Decimal::ZERO);
    }

    #[test]
    fn test_expiry_on_report_date_is_zero() {
        let report = d(2026, 6, 30);
        // strict comparison: an expiry on the report date does not count
        let life = remaining_contractual_life(report, None, None, Some(report));
        assert_eq!(life, Decimal::ZERO);
    }

    // -----------------------------------------------------------------------
    // 4. Non-negativity
    // -----------------------------------------------------------------------
    #[test]
    fn test_never_negative() {
        let report = d(2026, 6, 30);
        let cases = [
            (None, None, None),
            (Some(d(2020, 1, 1)), Some(d(2019, 1, 1)), Some(d(2018, 1, 1))),
            (Some(d(2030, 1, 1)), None, None),
            (None, Some(d(2030, 1, 1)), None),
        ];
        for (t, o, u) in cases {
            assert!(remaining_contractual_life(report, t, o, u) >= Decimal::ZERO);
        }
    }
}
