use rust_decimal::Decimal;

/// Monetary amounts are stored as DECIMAL(14,2)
pub const SCALE: u32 = 2;

/// Rounds a value to the monetary scale (banker's rounding)
pub fn round(amount: Decimal) -> Decimal {
    amount.round_dp(SCALE)
}

/// Validates that an amount is strictly positive and fits the monetary scale
pub fn validate_amount(amount: Decimal) -> Result<(), String> {
    if amount.scale() > SCALE {
        return Err(format!(
            "amounts must have at most {} decimal places, got {}",
            SCALE,
            amount.scale()
        ));
    }

    if amount <= Decimal::ZERO {
        return Err("amount must be greater than zero".to_string());
    }

    Ok(())
}

/// Percentage change from `previous` to `current`, rounded to 2 dp.
/// `None` when there is no baseline to compare against.
pub fn percent_change(current: Decimal, previous: Decimal) -> Option<Decimal> {
    if previous.is_zero() {
        return None;
    }

    let change = (current - previous) / previous * Decimal::ONE_HUNDRED;
    Some(round(change))
}
