//! The liquidated damages entry point.
//!
//! Runs validation, segmentation, the required progress calculation and the
//! LD decision in sequence and collects their audit steps.

use tracing::debug;

use crate::error::EngineResult;
use crate::models::{Bill, ComputationResult};

use super::ld_amount::calculate_ld_amount;
use super::progress_requirement::calculate_required_progress;
use super::quarter_segments::segment_duration;
use super::validation::validate_bill;

/// Computes liquidated damages for one bill.
///
/// The computation is pure: no I/O, no shared state, and identical bills
/// always give identical results, so it is safe to call concurrently and to
/// cache on the bill.
///
/// # Errors
///
/// Returns `InvalidSchedule`, `InvalidAmount` or `DegenerateDuration` before
/// any computation if the bill is invalid.
///
/// # Examples
///
/// ```
/// use ld_engine::calculation::compute_liquidated_damages;
/// use ld_engine::models::{Bill, LdOutcome};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let bill = Bill::new(
///     Decimal::from(507_992),
///     Decimal::from(507_992),
///     NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
/// );
///
/// let result = compute_liquidated_damages(&bill).unwrap();
/// assert_eq!(result.outcome, LdOutcome::FinalSegmentDelayed);
/// assert_eq!(result.rounded_amount, Decimal::from(4141));
/// assert_eq!(result.audit_steps.len(), 4);
/// ```
pub fn compute_liquidated_damages(bill: &Bill) -> EngineResult<ComputationResult> {
    let mut step_number: u32 = 1;

    let validation = validate_bill(bill, step_number)?;
    step_number += 1;

    let segmentation_result =
        segment_duration(bill.total_amount(), validation.total_duration_days, step_number)?;
    let segmentation = segmentation_result.segmentation;
    step_number += 1;

    debug!(
        total_duration_days = validation.total_duration_days,
        boundaries = ?segmentation.boundaries(),
        "Segmented contract duration"
    );

    let elapsed_days = bill.schedule.elapsed_days();
    let progress_result = calculate_required_progress(&segmentation, elapsed_days, step_number)?;
    let requirement = progress_result.requirement;
    step_number += 1;

    debug!(
        elapsed_days,
        quarter = requirement.quarter.number(),
        required_progress = %requirement.required_progress.round_dp(2),
        delay_days = requirement.delay_days,
        "Calculated required progress"
    );

    let amount_result = calculate_ld_amount(
        &segmentation,
        &requirement,
        bill.actual_progress_amount(),
        step_number,
    )?;

    debug!(
        outcome = ?amount_result.outcome,
        rounded_amount = %amount_result.rounded_amount,
        "Calculated liquidated damages"
    );

    Ok(ComputationResult {
        outcome: amount_result.outcome,
        quarter: requirement.quarter,
        total_duration_days: validation.total_duration_days,
        elapsed_days,
        delay_days: requirement.delay_days,
        required_progress: requirement.required_progress,
        unexecuted_work_amount: amount_result.unexecuted_work_amount,
        applicable_penalty_rate: amount_result.applicable_penalty_rate,
        raw_amount: amount_result.raw_amount,
        rounded_amount: amount_result.rounded_amount,
        audit_steps: vec![
            validation.audit_step,
            segmentation_result.audit_step,
            progress_result.audit_step,
            amount_result.audit_step,
        ],
    })
}
