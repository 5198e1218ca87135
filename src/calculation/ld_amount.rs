//! Liquidated damages amount calculation functionality.
//!
//! This module applies the three-way LD decision:
//! - no delay: no penalty
//! - delayed with work outstanding: the current quarter's rate on the shortfall
//! - delayed but caught up: the final quarter's rate on the final quarter's
//!   daily rate multiplied by the delay

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, LdOutcome, Quarter};

use super::progress_requirement::ProgressRequirement;
use super::quarter_segments::QuarterSegmentation;

/// The result of the LD amount calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct LdAmountResult {
    /// Which branch of the decision produced the amount.
    pub outcome: LdOutcome,
    /// Work the penalty was charged on.
    pub unexecuted_work_amount: Decimal,
    /// The penalty rate applied.
    pub applicable_penalty_rate: Decimal,
    /// The penalty before rounding.
    pub raw_amount: Decimal,
    /// The penalty rounded to whole currency units.
    pub rounded_amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Rounds to whole currency units, with halves rounded up, never below zero.
///
/// # Examples
///
/// ```
/// use ld_engine::calculation::round_half_up;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_half_up(Decimal::from_str("4141.2391").unwrap()), Decimal::from(4141));
/// assert_eq!(round_half_up(Decimal::from_str("2.5").unwrap()), Decimal::from(3));
/// assert_eq!(round_half_up(Decimal::from_str("-3.2").unwrap()), Decimal::ZERO);
/// ```
pub fn round_half_up(amount: Decimal) -> Decimal {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .max(Decimal::ZERO)
}

/// Calculates the liquidated damages for a bill.
///
/// # Arguments
///
/// * `segmentation` - The quarter segments of the contract
/// * `requirement` - Required progress at the actual completion date
/// * `actual_progress_amount` - Work actually executed
/// * `step_number` - The step number for audit trail sequencing
///
/// # Decision
///
/// 1. `delay_days <= 0` gives [`LdOutcome::Zero`], even if work is incomplete.
/// 2. Otherwise `unexecuted = required - actual`:
///    - positive: [`LdOutcome::QuarterlyProrated`] at the current quarter's rate
///    - zero or negative: [`LdOutcome::FinalSegmentDelayed`], charging the final
///      quarter's daily rate for every delay day at the final quarter's rate,
///      whichever quarter is nominally current
///
/// # Examples
///
/// ```
/// use ld_engine::calculation::{calculate_ld_amount, calculate_required_progress, segment_duration};
/// use ld_engine::models::LdOutcome;
/// use rust_decimal::Decimal;
///
/// let seg = segment_duration(Decimal::from(1_000_000), 181, 1).unwrap().segmentation;
/// let req = calculate_required_progress(&seg, 211, 2).unwrap().requirement;
/// let result = calculate_ld_amount(&seg, &req, Decimal::from(700_000), 3).unwrap();
///
/// assert_eq!(result.outcome, LdOutcome::QuarterlyProrated);
/// assert_eq!(result.rounded_amount, Decimal::from(30_000));
/// ```
pub fn calculate_ld_amount(
    segmentation: &QuarterSegmentation,
    requirement: &ProgressRequirement,
    actual_progress_amount: Decimal,
    step_number: u32,
) -> EngineResult<LdAmountResult> {
    let delay_days = requirement.delay_days;

    if delay_days <= 0 {
        let audit_step = AuditStep {
            step_number,
            rule_id: "ld_amount".to_string(),
            rule_name: "Liquidated Damages".to_string(),
            input: serde_json::json!({
                "delay_days": delay_days,
                "required_progress": requirement.required_progress.round_dp(2).normalize().to_string(),
                "actual_progress_amount": actual_progress_amount.normalize().to_string()
            }),
            output: serde_json::json!({
                "outcome": "zero",
                "rounded_amount": "0"
            }),
            reasoning: format!(
                "Completed {} day(s) before or on the scheduled date - no liquidated damages",
                -delay_days
            ),
        };

        return Ok(LdAmountResult {
            outcome: LdOutcome::Zero,
            unexecuted_work_amount: Decimal::ZERO,
            applicable_penalty_rate: Decimal::ZERO,
            raw_amount: Decimal::ZERO,
            rounded_amount: Decimal::ZERO,
            audit_step,
        });
    }

    let shortfall = requirement.required_progress - actual_progress_amount;

    let (outcome, unexecuted_work_amount, applicable_penalty_rate, reasoning_basis) =
        if shortfall > Decimal::ZERO {
            (
                LdOutcome::QuarterlyProrated,
                shortfall,
                requirement.applicable_penalty_rate,
                format!(
                    "{} unexecuted work in the {}",
                    shortfall.round_dp(2).normalize(),
                    requirement.quarter
                ),
            )
        } else {
            let final_segment = segmentation.final_segment();
            let charged_work = final_segment
                .daily_rate
                .checked_mul(Decimal::from(delay_days))
                .ok_or_else(|| EngineError::overflow("final quarter delay work"))?;
            (
                LdOutcome::FinalSegmentDelayed,
                charged_work,
                final_segment.penalty_rate,
                format!(
                    "work complete; {} delay day(s) × {} daily rate of the {}",
                    delay_days,
                    final_segment.daily_rate.round_dp(2).normalize(),
                    Quarter::Fourth
                ),
            )
        };

    let raw_amount = applicable_penalty_rate
        .checked_mul(unexecuted_work_amount)
        .ok_or_else(|| EngineError::overflow("liquidated damages"))?;
    let rounded_amount = round_half_up(raw_amount);

    let audit_step = AuditStep {
        step_number,
        rule_id: "ld_amount".to_string(),
        rule_name: "Liquidated Damages".to_string(),
        input: serde_json::json!({
            "delay_days": delay_days,
            "required_progress": requirement.required_progress.round_dp(2).normalize().to_string(),
            "actual_progress_amount": actual_progress_amount.normalize().to_string()
        }),
        output: serde_json::json!({
            "outcome": outcome,
            "unexecuted_work_amount": unexecuted_work_amount.round_dp(2).normalize().to_string(),
            "applicable_penalty_rate": applicable_penalty_rate.normalize().to_string(),
            "raw_amount": raw_amount.round_dp(4).normalize().to_string(),
            "rounded_amount": rounded_amount.normalize().to_string()
        }),
        reasoning: format!(
            "{}: {} × {} = {} (rounded {})",
            reasoning_basis,
            unexecuted_work_amount.round_dp(2).normalize(),
            applicable_penalty_rate.normalize(),
            raw_amount.round_dp(2).normalize(),
            rounded_amount.normalize()
        ),
    };

    Ok(LdAmountResult {
        outcome,
        unexecuted_work_amount,
        applicable_penalty_rate,
        raw_amount,
        rounded_amount,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{calculate_required_progress, segment_duration};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn assess(total: &str, progress: &str, duration: i64, elapsed: i64) -> LdAmountResult {
        let seg = segment_duration(dec(total), duration, 1).unwrap().segmentation;
        let req = calculate_required_progress(&seg, elapsed, 2)
            .unwrap()
            .requirement;
        calculate_ld_amount(&seg, &req, dec(progress), 3).unwrap()
    }

    #[test]
    fn test_round_half_up_midpoints() {
        assert_eq!(round_half_up(dec("0.5")), dec("1"));
        assert_eq!(round_half_up(dec("1.49")), dec("1"));
        assert_eq!(round_half_up(dec("30000.000")), dec("30000"));
        assert_eq!(round_half_up(dec("73539.5")), dec("73540"));
    }

    #[test]
    fn test_round_half_up_floors_negative_at_zero() {
        assert_eq!(round_half_up(dec("-0.6")), Decimal::ZERO);
    }

    /// LD-001: on-time completion
    #[test]
    fn test_on_time_is_zero() {
        let result = assess("1000000", "1000000", 181, 181);

        assert_eq!(result.outcome, LdOutcome::Zero);
        assert_eq!(result.rounded_amount, Decimal::ZERO);
        assert_eq!(result.applicable_penalty_rate, Decimal::ZERO);
    }

    /// LD-002: incomplete but on time still pays nothing
    #[test]
    fn test_incomplete_but_on_time_is_zero() {
        let result = assess("1000000", "100000", 181, 181);

        assert_eq!(result.outcome, LdOutcome::Zero);
        assert_eq!(result.rounded_amount, Decimal::ZERO);
    }

    #[test]
    fn test_early_completion_is_zero() {
        let result = assess("1000000", "0", 181, 100);
        assert_eq!(result.outcome, LdOutcome::Zero);
        assert!(result.audit_step.reasoning.contains("81 day(s)"));
    }

    /// LD-003: delayed with shortfall
    #[test]
    fn test_delayed_with_shortfall_is_prorated() {
        let result = assess("1000000", "700000", 181, 211);

        assert_eq!(result.outcome, LdOutcome::QuarterlyProrated);
        assert_eq!(result.unexecuted_work_amount, dec("300000"));
        assert_eq!(result.applicable_penalty_rate, dec("0.10"));
        assert_eq!(result.rounded_amount, dec("30000"));
    }

    #[test]
    fn test_delayed_with_larger_shortfall() {
        let result = assess("1000000", "264600", 181, 211);

        assert_eq!(result.unexecuted_work_amount, dec("735400"));
        assert_eq!(result.rounded_amount, dec("73540"));
    }

    /// LD-004: caught up but delayed charges the final quarter
    #[test]
    fn test_complete_but_delayed_uses_final_quarter() {
        let result = assess("507992", "507992", 91, 96);

        assert_eq!(result.outcome, LdOutcome::FinalSegmentDelayed);
        assert_eq!(result.applicable_penalty_rate, dec("0.10"));
        assert_eq!(result.unexecuted_work_amount.round_dp(2), dec("41412.39"));
        assert_eq!(result.raw_amount.round_dp(2), dec("4141.24"));
        assert_eq!(result.rounded_amount, dec("4141"));
    }

    #[test]
    fn test_progress_above_total_but_delayed_uses_final_quarter() {
        let result = assess("1000000", "1000400", 181, 183);

        assert_eq!(result.outcome, LdOutcome::FinalSegmentDelayed);
        // 375000 / 46 × 2 × 0.10 = 1630.43
        assert_eq!(result.rounded_amount, dec("1630"));
    }

    #[test]
    fn test_one_day_late_with_tiny_shortfall() {
        let result = assess("1000000", "999999", 181, 182);

        assert_eq!(result.outcome, LdOutcome::QuarterlyProrated);
        assert_eq!(result.raw_amount, dec("0.10"));
        assert_eq!(result.rounded_amount, Decimal::ZERO);
    }

    #[test]
    fn test_audit_step_records_outcome() {
        let result = assess("507992", "507992", 91, 96);

        assert_eq!(result.audit_step.rule_id, "ld_amount");
        assert_eq!(result.audit_step.output["outcome"], "final_segment_delayed");
        assert_eq!(result.audit_step.output["rounded_amount"], "4141");
        assert!(result.audit_step.reasoning.contains("5 delay day(s)"));
    }
}
