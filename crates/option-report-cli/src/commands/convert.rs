use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use option_report_core::currency::to_reporting_currency;
use option_report_core::FxRates;

/// Arguments for a one-off currency normalization
#[derive(Args)]
pub struct ConvertArgs {
    /// Exercise price in grant-currency units
    #[arg(long)]
    pub price: Decimal,

    /// Currency code as it appears in the register (e.g. EUR, nis, ₪)
    #[arg(long)]
    pub currency: String,

    /// EUR → USD rate (0 = do not convert)
    #[arg(long, default_value = "0")]
    pub eur_rate: Decimal,

    /// GBP → USD rate (0 = do not convert)
    #[arg(long, default_value = "0")]
    pub gbp_rate: Decimal,

    /// ILS → USD rate (0 = do not convert)
    #[arg(long, default_value = "0")]
    pub ils_rate: Decimal,
}

pub fn run_convert(args: ConvertArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rates = FxRates {
        eur_usd: args.eur_rate,
        gbp_usd: args.gbp_rate,
        ils_usd: args.ils_rate,
    };

    let converted = to_reporting_currency(Some(args.price), &args.currency, &rates)
        .unwrap_or(Decimal::ZERO);

    Ok(serde_json::json!({
        "price": args.price.to_string(),
        "currency": args.currency,
        "converted": converted.to_string(),
    }))
}
