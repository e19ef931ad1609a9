use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{FxRates, Money};

/// ILS amounts at or below this are assumed to already be in converted or
/// negligible units and are passed through unconverted. Preserved exactly
/// from the production rule; no stated business justification exists.
pub const ILS_CONVERSION_FLOOR: Decimal = dec!(0.1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CurrencyClass {
    /// Reporting currency or blank code: fx = 1.
    Reporting,
    Eur,
    Gbp,
    Ils,
    /// Unrecognized code: passed through, not an error.
    Other,
}

pub(crate) fn classify(currency_code: &str) -> CurrencyClass {
    match currency_code.trim().to_uppercase().as_str() {
        "" | "USD" => CurrencyClass::Reporting,
        "EUR" => CurrencyClass::Eur,
        "GBP" => CurrencyClass::Gbp,
        "ILS" | "NIS" | "₪" => CurrencyClass::Ils,
        _ => CurrencyClass::Other,
    }
}

/// Convert an exercise price into the reporting currency.
///
/// Total function: every input yields a value, never an error. Conversion
/// is opt-in per rate — a rate of 0 leaves the price unchanged. An absent
/// price stays absent; downstream aggregation coerces it to 0.
pub fn to_reporting_currency(
    price: Option<Money>,
    currency_code: &str,
    rates: &FxRates,
) -> Option<Money> {
    let price = price?;

    let converted = match classify(currency_code) {
        CurrencyClass::Reporting | CurrencyClass::Other => price,
        CurrencyClass::Eur if rates.eur_usd > Decimal::ZERO => price * rates.eur_usd,
        CurrencyClass::Gbp if rates.gbp_usd > Decimal::ZERO => price * rates.gbp_usd,
        CurrencyClass::Ils
            if price > ILS_CONVERSION_FLOOR && rates.ils_usd > Decimal::ZERO =>
        {
            price * rates.ils_usd
        }
        _ => price,
    };

    Some(converted)
}
