use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to whole pence, half away from zero, always with two decimals.
pub fn to_pennies(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Formats an amount as pounds sterling, e.g. `£1,333.95` or `-£12.35`.
pub fn format_gbp(value: Decimal) -> String {
    let pennies = to_pennies(value);
    let sign = if pennies.is_sign_negative() { "-" } else { "" };

    let text = pennies.abs().to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{sign}£{}.{fraction}", group_thousands(whole))
}
