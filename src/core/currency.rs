use rust_decimal::{Decimal, RoundingStrategy};

/// Satang per baht
pub const SATANG_PER_BAHT: Decimal = Decimal::ONE_HUNDRED;

/// Decimal places used when presenting baht amounts (1 satang)
pub const BAHT_SCALE: u32 = 2;

/// Convert a satang amount (e.g. an FT rate in satang/kWh) to baht
pub fn satang_to_baht(satang: Decimal) -> Decimal {
    satang / SATANG_PER_BAHT
}

/// Round a baht amount for presentation.
///
/// Amounts are carried unrounded through the calculation; only the response
/// layer calls this. Half-way values round away from zero, as printed bills do.
pub fn round_baht(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(BAHT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a baht amount for log lines
pub fn format_baht(amount: Decimal) -> String {
    format!("THB {:.2}", round_baht(amount))
}
