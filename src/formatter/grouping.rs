//! Regional digit grouping.

use rust_decimal::Decimal;

use crate::config::DigitGrouping;

/// Renders an amount with regional digit-group separators.
///
/// Any fractional part is kept as-is after the decimal point; trailing zeros
/// are dropped.
///
/// # Examples
///
/// ```
/// use ld_engine::config::DigitGrouping;
/// use ld_engine::formatter::group_digits;
/// use rust_decimal::Decimal;
///
/// assert_eq!(group_digits(Decimal::from(1_234_567), DigitGrouping::Indian), "12,34,567");
/// assert_eq!(group_digits(Decimal::from(1_234_567), DigitGrouping::International), "1,234,567");
/// ```
pub fn group_digits(amount: Decimal, grouping: DigitGrouping) -> String {
    let text = amount.abs().normalize().to_string();
    let (integer, fraction) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = match grouping {
        DigitGrouping::Indian => group_indian(integer),
        DigitGrouping::International => group_every(integer, 3),
    };

    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    if amount.is_sign_negative() && !amount.is_zero() {
        grouped.insert(0, '-');
    }

    grouped
}

/// Last three digits, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    format!("{},{}", group_every(head, 2), tail)
}

fn group_every(digits: &str, size: usize) -> String {
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / size);

    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % size == 0 {
            out.push(',');
        }
        out.push(*b as char);
    }

    out
}
