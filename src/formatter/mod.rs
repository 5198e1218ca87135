//! LD sentence formatting.
//!
//! Renders a rounded LD amount into the sentence placed in generated reports.
//! Formatting never feeds back into the computed amount.

mod grouping;

use rust_decimal::Decimal;

use crate::config::FormatterConfig;

pub use grouping::group_digits;

/// Renders an amount as currency text, e.g. `Rs. 5,07,992/-`.
pub fn render_currency(amount: Decimal, config: &FormatterConfig) -> String {
    format!(
        "{}{}{}",
        config.currency_prefix,
        group_digits(amount, config.grouping),
        config.currency_suffix
    )
}

/// Renders the LD sentence for a rounded amount.
///
/// A zero amount yields the configured zero phrase. Otherwise `{amount}` in the
/// template is replaced by the currency text and `{clause}` by the clause
/// reference.
///
/// # Examples
///
/// ```
/// use ld_engine::config::FormatterConfig;
/// use ld_engine::formatter::format_amount;
/// use rust_decimal::Decimal;
///
/// let config = FormatterConfig::default();
///
/// let sentence = format_amount(Decimal::from(73_540), &config);
/// assert!(sentence.starts_with("Liquidated damages of Rs. 73,540/- are leviable under Clause 2"));
///
/// assert_eq!(format_amount(Decimal::ZERO, &config), config.zero_phrase);
/// ```
pub fn format_amount(rounded_amount: Decimal, config: &FormatterConfig) -> String {
    if rounded_amount.is_zero() {
        return config.zero_phrase.clone();
    }

    config
        .template
        .replace("{amount}", &render_currency(rounded_amount, config))
        .replace("{clause}", &config.clause_ref)
}
