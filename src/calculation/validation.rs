//! Input validation functionality.
//!
//! This module rejects structurally invalid bills before any computation
//! starts, and parses caller-supplied amount text into decimals.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Bill};

/// The result of validating a bill, including the audit step.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// The contract duration in whole days, guaranteed to be positive.
    pub total_duration_days: i64,
    /// The audit step recording this validation.
    pub audit_step: AuditStep,
}

/// Validates the five bill inputs.
///
/// Checks are made in this order:
/// 1. the scheduled completion date must not precede the start date
/// 2. the total amount must be positive and the progress amount non-negative
/// 3. the contract duration must be at least one day
///
/// Progress above the total amount is accepted.
///
/// # Examples
///
/// ```
/// use ld_engine::calculation::validate_bill;
/// use ld_engine::error::EngineError;
/// use ld_engine::models::Bill;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let bill = Bill::new(Decimal::from(1000), Decimal::ZERO, day, day, day);
///
/// let err = validate_bill(&bill, 1).unwrap_err();
/// assert!(matches!(err, EngineError::DegenerateDuration { days: 0 }));
/// ```
pub fn validate_bill(bill: &Bill, step_number: u32) -> EngineResult<ValidationResult> {
    let schedule = &bill.schedule;

    if schedule.scheduled_completion_date < schedule.start_date {
        return Err(EngineError::InvalidSchedule {
            start: schedule.start_date,
            scheduled_completion: schedule.scheduled_completion_date,
        });
    }

    if bill.total_amount() <= Decimal::ZERO {
        return Err(EngineError::invalid_amount(
            "total_amount",
            format!("must be greater than zero, got {}", bill.total_amount()),
        ));
    }

    if bill.actual_progress_amount() < Decimal::ZERO {
        return Err(EngineError::invalid_amount(
            "actual_progress_amount",
            format!("must not be negative, got {}", bill.actual_progress_amount()),
        ));
    }

    let total_duration_days = schedule.total_duration_days();
    if total_duration_days <= 0 {
        return Err(EngineError::DegenerateDuration {
            days: total_duration_days,
        });
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "input_validation".to_string(),
        rule_name: "Input Validation".to_string(),
        input: serde_json::json!({
            "total_amount": bill.total_amount().normalize().to_string(),
            "actual_progress_amount": bill.actual_progress_amount().normalize().to_string(),
            "start_date": schedule.start_date.to_string(),
            "scheduled_completion_date": schedule.scheduled_completion_date.to_string(),
            "actual_completion_date": schedule.actual_completion_date.to_string()
        }),
        output: serde_json::json!({
            "valid": true,
            "total_duration_days": total_duration_days,
            "delayed": schedule.is_delayed(),
            "progress_exceeds_total": bill.actual_progress_amount() > bill.total_amount()
        }),
        reasoning: format!(
            "Schedule of {} days from {} to {} accepted",
            total_duration_days, schedule.start_date, schedule.scheduled_completion_date
        ),
    };

    Ok(ValidationResult {
        total_duration_days,
        audit_step,
    })
}

/// Parses a caller-supplied amount such as a spreadsheet cell value.
///
/// Surrounding whitespace is ignored and scientific notation is accepted.
/// Commas are accepted only as well-formed digit-group separators in the
/// integer part, either Indian (`12,34,567`) or international (`1,234,567`).
/// The sign is not checked here; that is left to [`validate_bill`].
///
/// # Examples
///
/// ```
/// use ld_engine::calculation::parse_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount("total_amount", " 5,07,992 ").unwrap(), Decimal::from(507_992));
/// assert_eq!(parse_amount("total_amount", "1e6").unwrap(), Decimal::from(1_000_000));
/// assert!(parse_amount("total_amount", "n/a").is_err());
/// assert!(parse_amount("total_amount", "1,2,3").is_err());
/// ```
pub fn parse_amount(field: &str, raw: &str) -> EngineResult<Decimal> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(EngineError::invalid_amount(field, "value is empty"));
    }

    let not_a_number = || EngineError::invalid_amount(field, format!("'{}' is not a number", trimmed));

    // rust_decimal itself tolerates `_` between digits.
    if trimmed.contains('_') {
        return Err(not_a_number());
    }

    let cleaned = strip_group_separators(trimmed).ok_or_else(not_a_number)?;

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| not_a_number())
}

/// Removes digit-group commas, or returns `None` if they are misplaced.
///
/// The last integer group must have three digits. The groups before it are
/// either all three digits wide or all two digits wide, and the leading group
/// is no wider than the others.
fn strip_group_separators(text: &str) -> Option<String> {
    if !text.contains(',') {
        return Some(text.to_string());
    }

    let (sign, unsigned) = match text.chars().next() {
        Some('-' | '+') => text.split_at(1),
        _ => ("", text),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let groups: Vec<&str> = integer.split(',').collect();
    if groups
        .iter()
        .any(|g| g.is_empty() || !g.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    let (leading, rest) = groups.split_first()?;
    let (last, middle) = rest.split_last()?;
    if last.len() != 3 {
        return None;
    }

    let international = leading.len() <= 3 && middle.iter().all(|g| g.len() == 3);
    let indian = leading.len() <= 2 && middle.iter().all(|g| g.len() == 2);
    if !(international || indian) {
        return None;
    }

    if fraction.is_some_and(|f| !f.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }

    let mut cleaned = String::with_capacity(text.len());
    cleaned.push_str(sign);
    cleaned.push_str(&groups.concat());
    if let Some(fraction) = fraction {
        cleaned.push('.');
        cleaned.push_str(fraction);
    }
    Some(cleaned)
}
