use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

use option_report_core::report::ReportOutput;
use option_report_core::schema::{
    COL_EMPLOYMENT_TERMINATION_DATE, COL_EXERCISABLE, COL_EXERCISE_PRICE,
    COL_EXERCISE_PRICE_CURRENCY, COL_ORIGINAL_EXPIRY_DATE, COL_OUTSTANDING,
    COL_UPDATED_EXPIRY_DATE,
};
use option_report_core::{Money, ValuedGrantRow};

/// Derived-column headers, matching the original Excel export layout.
const COL_PRICE_CONVERTED: &str = "Exercise Price (Converted)";
const COL_REMAINING_LIFE: &str = "O";
const COL_INTRINSIC: &str = "X";

/// Export the report as a two-sheet workbook rendered as CSV files:
/// the full per-row register with derived columns, and the summary as
/// (Metric, Value) rows. Returns the written paths.
pub fn export(dir: &str, output: &ReportOutput) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let dir = Path::new(dir);
    fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create '{}': {}", dir.display(), e))?;

    let register_path = dir.join("register.csv");
    write_register_sheet(&register_path, &output.rows)?;

    let summary_path = dir.join("summary.csv");
    write_summary_sheet(&summary_path, output)?;

    Ok(vec![register_path, summary_path])
}

fn write_register_sheet(
    path: &Path,
    rows: &[ValuedGrantRow],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))?;

    wtr.write_record([
        COL_EXERCISE_PRICE,
        COL_EXERCISE_PRICE_CURRENCY,
        COL_OUTSTANDING,
        COL_EXERCISABLE,
        COL_EMPLOYMENT_TERMINATION_DATE,
        COL_ORIGINAL_EXPIRY_DATE,
        COL_UPDATED_EXPIRY_DATE,
        COL_PRICE_CONVERTED,
        COL_REMAINING_LIFE,
        COL_INTRINSIC,
    ])?;

    for row in rows {
        wtr.write_record([
            money_cell(row.grant.exercise_price),
            row.grant.exercise_price_currency.clone(),
            row.grant.outstanding.to_string(),
            row.grant.exercisable.to_string(),
            date_cell(row.grant.employment_termination_date),
            date_cell(row.grant.original_expiry_date),
            date_cell(row.grant.updated_expiry_date),
            money_cell(row.exercise_price_reporting),
            row.remaining_life_years.to_string(),
            row.intrinsic_value_per_unit.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

fn write_summary_sheet(path: &Path, output: &ReportOutput) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))?;

    wtr.write_record(["Metric", "Value"])?;
    for (label, value) in output.summary.metrics() {
        wtr.write_record([label, &value.to_string()])?;
    }

    wtr.flush()?;
    Ok(())
}

fn money_cell(value: Option<Money>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn date_cell(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
