use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::OptionReportError;
use crate::types::GrantRow;
use crate::OptionReportResult;

pub const COL_EXERCISE_PRICE: &str = "Exercise Price";
pub const COL_EXERCISE_PRICE_CURRENCY: &str = "Exercise Price Currency";
pub const COL_OUTSTANDING: &str = "Outstanding";
pub const COL_EXERCISABLE: &str = "Exercisable";
pub const COL_EMPLOYMENT_TERMINATION_DATE: &str = "Employment Termination Date";
pub const COL_ORIGINAL_EXPIRY_DATE: &str = "Original Expiry Date";
pub const COL_UPDATED_EXPIRY_DATE: &str = "Updated Expiry Date";

const RECOGNIZED_COLUMNS: [&str; 7] = [
    COL_EXERCISE_PRICE,
    COL_EXERCISE_PRICE_CURRENCY,
    COL_OUTSTANDING,
    COL_EXERCISABLE,
    COL_EMPLOYMENT_TERMINATION_DATE,
    COL_ORIGINAL_EXPIRY_DATE,
    COL_UPDATED_EXPIRY_DATE,
];

/// An order/presence-agnostic snapshot of the uploaded grant register.
/// Collaborators (the CLI, a service frontend) build this from whatever
/// tabular source they read; the engine never touches files.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        RawTable { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Case- and whitespace-insensitive header lookup.
    fn column(&self, name: &str) -> Option<usize> {
        let wanted = name.trim().to_lowercase();
        self.headers
            .iter()
            .position(|h| h.trim().to_lowercase() == wanted)
    }

    /// Cell text, empty for a missing column or a short row.
    fn cell<'a>(&'a self, row: &'a [String], column: Option<usize>) -> &'a str {
        column
            .and_then(|idx| row.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Parse a numeric cell. Tolerates surrounding whitespace, thousands
/// separators, and a leading currency symbol; anything else is absent.
pub fn parse_decimal_cell(raw: &str) -> Option<Decimal> {
    let trimmed = raw
        .trim()
        .trim_start_matches(['$', '€', '£', '₪'])
        .trim();
    if trimmed.is_empty() {
        return None;
    }
    let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&cleaned).ok()
}

/// Parse a date cell. Spreadsheet exports mix ISO dates, ISO datetimes and
/// day-first regional forms; the register is produced day-first, so
/// ambiguous slashed dates resolve as day/month/year. Unparsable is absent,
/// never an error.
pub fn parse_date_cell(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }

    for fmt in ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%d/%m/%y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }

    None
}

/// Strict parse for the report-date parameter: ISO yyyy-mm-dd only, since
/// it is operator-entered rather than spreadsheet-exported. Unlike register
/// cells, a malformed report date aborts the run.
pub fn parse_report_date(raw: &str) -> OptionReportResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        OptionReportError::DateError(format!(
            "Unparsable report date '{}' (expected yyyy-mm-dd)",
            raw.trim()
        ))
    })
}

/// Coerce the raw register into typed grant rows.
///
/// Missing columns degrade to absent for every row and per-cell failures
/// degrade to absent/0 for that cell only. The single run-fatal shape
/// error is a table with none of the recognized columns, which means the
/// wrong file was uploaded.
pub fn normalize_register(table: &RawTable) -> OptionReportResult<Vec<GrantRow>> {
    let recognized = RECOGNIZED_COLUMNS
        .iter()
        .filter(|c| table.column(c).is_some())
        .count();
    if recognized == 0 {
        return Err(OptionReportError::InsufficientData(format!(
            "No recognized grant-register columns found (expected at least one of: {})",
            RECOGNIZED_COLUMNS.join(", ")
        )));
    }

    let price_col = table.column(COL_EXERCISE_PRICE);
    let currency_col = table.column(COL_EXERCISE_PRICE_CURRENCY);
    let outstanding_col = table.column(COL_OUTSTANDING);
    let exercisable_col = table.column(COL_EXERCISABLE);
    let termination_col = table.column(COL_EMPLOYMENT_TERMINATION_DATE);
    let original_expiry_col = table.column(COL_ORIGINAL_EXPIRY_DATE);
    let updated_expiry_col = table.column(COL_UPDATED_EXPIRY_DATE);

    let rows = table
        .rows
        .iter()
        .map(|row| GrantRow {
            exercise_price: parse_decimal_cell(table.cell(row, price_col)),
            exercise_price_currency: table.cell(row, currency_col).trim().to_string(),
            outstanding: parse_decimal_cell(table.cell(row, outstanding_col))
                .unwrap_or(Decimal::ZERO),
            exercisable: parse_decimal_cell(table.cell(row, exercisable_col))
                .unwrap_or(Decimal::ZERO),
            employment_termination_date: parse_date_cell(table.cell(row, termination_col)),
            original_expiry_date: parse_date_cell(table.cell(row, original_expiry_col)),
            updated_expiry_date: parse_date_cell(table.cell(row, updated_expiry_col)),
        })
        .collect();

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    // -----------------------------------------------------------------------
    // 1. Cell parsers
    // -----------------------------------------------------------------------
    #[test]
    fn test_parse_decimal_cell() {
        assert_eq!(parse_decimal_cell(" 1,234.50 "), Some(dec!(1234.50)));
        assert_eq!(parse_decimal_cell("$12.00"), Some(dec!(12.00)));
        assert_eq!(parse_decimal_cell("0"), Some(dec!(0)));
        assert_eq!(parse_decimal_cell(""), None);
        assert_eq!(parse_decimal_cell("n/a"), None);
    }

    #[test]
    fn test_parse_date_cell_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();
        for raw in [
            "2026-06-30",
            "2026-06-30 00:00:00",
            "30/06/2026",
            "30-06-2026",
            "30.06.2026",
        ] {
            assert_eq!(parse_date_cell(raw), Some(expected), "raw {raw:?}");
        }
        assert_eq!(parse_date_cell("not a date"), None);
        assert_eq!(parse_date_cell(""), None);
    }

    #[test]
    fn test_slashed_dates_are_day_first() {
        // 03/04/2026 is 3 April, not 4 March
        assert_eq!(
            parse_date_cell("03/04/2026"),
            NaiveDate::from_ymd_opt(2026, 4, 3)
        );
    }

    // -----------------------------------------------------------------------
    // 2. Column matching and degradation
    // -----------------------------------------------------------------------
    #[test]
    fn test_headers_match_case_and_whitespace_insensitive() {
        let t = table(
            &["  exercise price ", "OUTSTANDING"],
            &[&["10.5", "1000"]],
        );
        let rows = normalize_register(&t).unwrap();
        assert_eq!(rows[0].exercise_price, Some(dec!(10.5)));
        assert_eq!(rows[0].outstanding, dec!(1000));
    }

    #[test]
    fn test_missing_columns_degrade_to_absent() {
        let t = table(&["Outstanding"], &[&["500"]]);
        let rows = normalize_register(&t).unwrap();
        let row = &rows[0];
        assert_eq!(row.exercise_price, None);
        assert_eq!(row.exercise_price_currency, "");
        assert_eq!(row.exercisable, Decimal::ZERO);
        assert_eq!(row.employment_termination_date, None);
        assert_eq!(row.original_expiry_date, None);
        assert_eq!(row.updated_expiry_date, None);
    }

    #[test]
    fn test_unrecognized_columns_are_ignored() {
        let t = table(
            &["Grant Date", "Vesting Start Date", "Exercisable"],
            &[&["01/02/2020", "01/02/2021", "250"]],
        );
        let rows = normalize_register(&t).unwrap();
        assert_eq!(rows[0].exercisable, dec!(250));
    }

    #[test]
    fn test_no_recognized_columns_is_run_fatal() {
        let t = table(&["Employee", "Department"], &[&["a", "b"]]);
        let err = normalize_register(&t).unwrap_err();
        assert!(matches!(err, OptionReportError::InsufficientData(_)));
    }

    // -----------------------------------------------------------------------
    // 3. Per-cell failures never abort
    // -----------------------------------------------------------------------
    #[test]
    fn test_malformed_cells_degrade_per_row() {
        let t = table(
            &["Exercise Price", "Outstanding", "Updated Expiry Date"],
            &[
                &["oops", "garbage", "32/13/2026"],
                &["10", "100", "30/06/2030"],
            ],
        );
        let rows = normalize_register(&t).unwrap();

        assert_eq!(rows[0].exercise_price, None);
        assert_eq!(rows[0].outstanding, Decimal::ZERO);
        assert_eq!(rows[0].updated_expiry_date, None);

        assert_eq!(rows[1].exercise_price, Some(dec!(10)));
        assert_eq!(rows[1].outstanding, dec!(100));
        assert_eq!(
            rows[1].updated_expiry_date,
            NaiveDate::from_ymd_opt(2030, 6, 30)
        );
    }

    #[test]
    fn test_short_rows_are_padded_with_absent() {
        let t = table(
            &["Exercise Price", "Outstanding", "Exercisable"],
            &[&["10"]],
        );
        let rows = normalize_register(&t).unwrap();
        assert_eq!(rows[0].exercise_price, Some(dec!(10)));
        assert_eq!(rows[0].outstanding, Decimal::ZERO);
        assert_eq!(rows[0].exercisable, Decimal::ZERO);
    }

    // -----------------------------------------------------------------------
    // 4. Report-date parameter is strict
    // -----------------------------------------------------------------------
    #[test]
    fn test_parse_report_date() {
        assert_eq!(
            parse_report_date(" 2026-06-30 ").unwrap(),
            NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()
        );
        assert!(matches!(
            parse_report_date("June 30"),
            Err(OptionReportError::DateError(_))
        ));
    }

    #[test]
    fn test_report_date_rejects_non_iso_forms() {
        // register cells accept day-first dates, the report-date parameter
        // does not
        for raw in ["30/06/2026", "30-06-2026", "2026-06-30 00:00:00"] {
            assert!(
                matches!(
                    parse_report_date(raw),
                    Err(OptionReportError::DateError(_))
                ),
                "raw {raw:?}"
            );
        }
    }
}
