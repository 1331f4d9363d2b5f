//! Conversions between on-chain integer amounts and display amounts.

/// Decimals of STX (1 STX = 10^6 micro-STX).
pub const STX_DECIMALS: u32 = 6;

/// Largest raw amount whose display value converts back to the same raw amount
/// for any `decimals` up to 18. Display values are `f64`, so precision drops beyond it.
pub const MAX_EXACT_RAW: u128 = 1 << 51;

/// `raw / 10^decimals`. Exact round trips through [`raw_value`] hold up to [`MAX_EXACT_RAW`].
pub fn display_value(raw: u128, decimals: u32) -> f64 {
    raw as f64 / 10f64.powi(decimals as i32)
}

/// Inverse of [`display_value`], rounded to the nearest raw unit.
pub fn raw_value(display: f64, decimals: u32) -> u128 {
    (display * 10f64.powi(decimals as i32)).round() as u128
}

pub fn micro_stx_to_stx(ustx: u128) -> f64 {
    display_value(ustx, STX_DECIMALS)
}

/// Raw-unit price of one asset in another; `None` when nothing is being priced.
pub fn price_per_unit(quote_raw: u128, base_raw: u128) -> Option<f64> {
    (base_raw != 0).then(|| quote_raw as f64 / base_raw as f64)
}

/// Rescale a raw-unit price between assets with different decimals:
/// `price * 10^(base_decimals - quote_decimals)`.
pub fn normalize_price(price: f64, base_decimals: u32, quote_decimals: u32) -> f64 {
    price * 10f64.powi(base_decimals as i32 - quote_decimals as i32)
}

/// STX per whole token for an ask of `amount` token units priced at `ustx`.
pub fn ask_price_in_stx(ustx: u128, amount: u128, token_decimals: u32) -> Option<f64> {
    price_per_unit(ustx, amount).map(|p| normalize_price(p, token_decimals, STX_DECIMALS))
}
