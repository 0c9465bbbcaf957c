//! Money helpers. Prices live in integer minor units (cents); floats only
//! appear as derived display values or when ingesting legacy price lists.

/// Converts a minor-unit amount to its major-unit display value.
pub fn cents_to_amount(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Converts a major-unit float price to cents, rounding to the nearest cent.
///
/// Truncating instead would turn `19.99` into `1998`, because `19.99 * 100.0`
/// is `1998.9999999999998` in binary floating point.
pub fn amount_to_cents(amount: f64) -> Option<i64> {
    if !amount.is_finite() || amount < 0.0 {
        return None;
    }
    let cents = (amount * 100.0).round();
    if cents > i64::MAX as f64 {
        return None;
    }
    Some(cents as i64)
}

/// `quantity * unit_price_cents`, or `None` on overflow or a negative quantity.
pub fn line_total(quantity: i32, unit_price_cents: i64) -> Option<i64> {
    if quantity < 0 {
        return None;
    }
    unit_price_cents.checked_mul(i64::from(quantity))
}
