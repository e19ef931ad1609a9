use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use option_report_core::report::{run_outstanding_report, ReportInput};
use option_report_core::schema::{self, RawTable};
use option_report_core::{FxRates, ReportParameters};

use crate::input;
use crate::output;

/// Arguments for the full disclosure report
#[derive(Args)]
pub struct ReportArgs {
    /// Path to the grant register CSV (or pipe it via stdin)
    #[arg(long)]
    pub register: Option<String>,

    /// Report date, yyyy-mm-dd
    #[arg(long)]
    pub report_date: Option<String>,

    /// Closing price of the underlying, reporting currency
    #[arg(long)]
    pub closing_price: Option<Decimal>,

    /// EUR → USD rate (0 = do not convert)
    #[arg(long, default_value = "0")]
    pub eur_rate: Decimal,

    /// GBP → USD rate (0 = do not convert)
    #[arg(long, default_value = "0")]
    pub gbp_rate: Decimal,

    /// ILS → USD rate (0 = do not convert)
    #[arg(long, default_value = "0")]
    pub ils_rate: Decimal,

    /// Path to JSON parameters file (overrides individual flags)
    #[arg(long)]
    pub params: Option<String>,

    /// Directory to export the two-sheet workbook (register.csv, summary.csv)
    #[arg(long)]
    pub export_dir: Option<String>,
}

/// JSON parameters file shape; any field present overrides its flag.
#[derive(Debug, Deserialize)]
pub struct ParamsFile {
    pub report_date: Option<String>,
    pub closing_price: Option<Decimal>,
    pub eur_rate: Option<Decimal>,
    pub gbp_rate: Option<Decimal>,
    pub ils_rate: Option<Decimal>,
}

pub fn run_report(args: ReportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let table = load_register(&args)?;
    let parameters = build_parameters(&args)?;

    let register = schema::normalize_register(&table)?;
    let input = ReportInput {
        register,
        parameters,
    };

    let computed = run_outstanding_report(&input)?;

    if let Some(ref dir) = args.export_dir {
        let written = output::workbook::export(dir, &computed.result)?;
        for path in written {
            eprintln!("exported {}", path.display());
        }
    }

    Ok(serde_json::to_value(computed)?)
}

fn load_register(args: &ReportArgs) -> Result<RawTable, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.register {
        return input::file::read_register(path);
    }
    if let Some(table) = input::stdin::read_register_stdin()? {
        return Ok(table);
    }
    Err("--register <csv> is required (or pipe the register via stdin)".into())
}

fn build_parameters(args: &ReportArgs) -> Result<ReportParameters, Box<dyn std::error::Error>> {
    let file: Option<ParamsFile> = match args.params {
        Some(ref path) => Some(input::file::read_json(path)?),
        None => None,
    };
    let file = file.as_ref();

    let report_date_raw = file
        .and_then(|f| f.report_date.clone())
        .or_else(|| args.report_date.clone())
        .ok_or("--report-date is required (or provide --params)")?;
    let report_date = schema::parse_report_date(&report_date_raw)?;

    let closing_price = file
        .and_then(|f| f.closing_price)
        .or(args.closing_price)
        .ok_or("--closing-price is required (or provide --params)")?;

    Ok(ReportParameters {
        report_date,
        closing_price,
        fx_rates: FxRates {
            eur_usd: file.and_then(|f| f.eur_rate).unwrap_or(args.eur_rate),
            gbp_usd: file.and_then(|f| f.gbp_rate).unwrap_or(args.gbp_rate),
            ils_usd: file.and_then(|f| f.ils_rate).unwrap_or(args.ils_rate),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::fs;

    fn flag_args() -> ReportArgs {
        ReportArgs {
            register: None,
            report_date: Some("2026-06-30".to_string()),
            closing_price: Some(dec!(50)),
            eur_rate: dec!(1.1),
            gbp_rate: dec!(1.25),
            ils_rate: dec!(0.27),
            params: None,
            export_dir: None,
        }
    }

    #[test]
    fn test_parameters_from_flags() {
        let params = build_parameters(&flag_args()).unwrap();
        assert_eq!(
            params.report_date,
            NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()
        );
        assert_eq!(params.closing_price, dec!(50));
        assert_eq!(params.fx_rates.eur_usd, dec!(1.1));
        assert_eq!(params.fx_rates.gbp_usd, dec!(1.25));
        assert_eq!(params.fx_rates.ils_usd, dec!(0.27));
    }

    #[test]
    fn test_params_file_overrides_flags_per_field() {
        let path = std::env::temp_dir().join(format!("odr-params-{}.json", std::process::id()));
        // report_date and gbp/ils rates absent: those fall back to the flags
        fs::write(&path, r#"{ "closing_price": "60", "eur_rate": "1.2" }"#).unwrap();

        let mut args = flag_args();
        args.params = Some(path.to_str().unwrap().to_string());

        let params = build_parameters(&args).unwrap();
        assert_eq!(params.closing_price, dec!(60));
        assert_eq!(params.fx_rates.eur_usd, dec!(1.2));
        assert_eq!(
            params.report_date,
            NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()
        );
        assert_eq!(params.fx_rates.gbp_usd, dec!(1.25));
        assert_eq!(params.fx_rates.ils_usd, dec!(0.27));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_closing_price_is_an_error() {
        let mut args = flag_args();
        args.closing_price = None;
        let err = build_parameters(&args).unwrap_err();
        assert!(err.to_string().contains("--closing-price"));
    }
}
