//! Required progress calculation functionality.
//!
//! This module works out which quarter the actual completion date falls in,
//! how much work should have been executed by then, and which penalty rate is
//! in force.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Quarter};

use super::quarter_segments::{QuarterSegment, QuarterSegmentation};

/// Work that should have been executed by a given elapsed-day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressRequirement {
    /// The quarter the elapsed-day count falls in.
    pub quarter: Quarter,
    /// Days from start to actual completion.
    pub elapsed_days: i64,
    /// Days counted inside the current quarter, clamped to its length.
    pub days_into_quarter: i64,
    /// Cumulative work required by the elapsed-day count.
    pub required_progress: Decimal,
    /// Penalty rate of the current quarter.
    pub applicable_penalty_rate: Decimal,
    /// Days beyond the contract duration (zero or negative if on time).
    pub delay_days: i64,
}

/// The result of the required progress calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct ProgressRequirementResult {
    /// The computed requirement.
    pub requirement: ProgressRequirement,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Selects the current segment for an elapsed-day count.
///
/// The first segment whose boundary is at or beyond `elapsed_days` wins.
/// Past the final boundary the final segment stays current.
pub fn current_segment(segmentation: &QuarterSegmentation, elapsed_days: i64) -> &QuarterSegment {
    segmentation
        .segments
        .iter()
        .find(|s| s.boundary >= elapsed_days)
        .unwrap_or_else(|| segmentation.final_segment())
}

/// Calculates the work that should have been executed after `elapsed_days`.
///
/// Work from earlier quarters counts in full. Within the current quarter the
/// day count is clamped to `[0, length]` and multiplied by the quarter's daily
/// rate, so the requirement never exceeds the work order total however late
/// the work finishes. A quarter that has fully elapsed contributes exactly its
/// work amount, and an empty quarter contributes nothing for days falling in
/// it.
///
/// # Arguments
///
/// * `segmentation` - The quarter segments of the contract
/// * `elapsed_days` - Days from start to actual completion
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use ld_engine::calculation::{calculate_required_progress, segment_duration};
/// use ld_engine::models::Quarter;
/// use rust_decimal::Decimal;
///
/// let seg = segment_duration(Decimal::from(1_000_000), 181, 1).unwrap().segmentation;
/// let result = calculate_required_progress(&seg, 211, 2).unwrap();
///
/// assert_eq!(result.requirement.quarter, Quarter::Fourth);
/// assert_eq!(result.requirement.required_progress, Decimal::from(1_000_000));
/// assert_eq!(result.requirement.delay_days, 30);
/// ```
pub fn calculate_required_progress(
    segmentation: &QuarterSegmentation,
    elapsed_days: i64,
    step_number: u32,
) -> EngineResult<ProgressRequirementResult> {
    let segment = current_segment(segmentation, elapsed_days);
    let days_into_quarter = (elapsed_days - segment.start_offset).clamp(0, segment.length_days);

    let within_quarter = if !segment.is_empty() && days_into_quarter == segment.length_days {
        segment.work_amount
    } else {
        segment
            .daily_rate
            .checked_mul(Decimal::from(days_into_quarter))
            .ok_or_else(|| EngineError::overflow("required progress"))?
    };

    let required_progress = segment.work_before() + within_quarter;
    let delay_days = elapsed_days - segmentation.total_duration_days;

    let requirement = ProgressRequirement {
        quarter: segment.quarter,
        elapsed_days,
        days_into_quarter,
        required_progress,
        applicable_penalty_rate: segment.penalty_rate,
        delay_days,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "required_progress".to_string(),
        rule_name: "Required Progress".to_string(),
        input: serde_json::json!({
            "elapsed_days": elapsed_days,
            "total_duration_days": segmentation.total_duration_days
        }),
        output: serde_json::json!({
            "quarter": segment.quarter.number(),
            "days_into_quarter": days_into_quarter,
            "required_progress": required_progress.round_dp(2).normalize().to_string(),
            "applicable_penalty_rate": segment.penalty_rate.normalize().to_string(),
            "delay_days": delay_days
        }),
        reasoning: format!(
            "Day {} falls in the {}: {} of prior work + {} of {} days in quarter = {}",
            elapsed_days,
            segment.quarter,
            segment.work_before().normalize(),
            days_into_quarter,
            segment.length_days,
            required_progress.round_dp(2).normalize()
        ),
    };

    Ok(ProgressRequirementResult {
        requirement,
        audit_step,
    })
}
