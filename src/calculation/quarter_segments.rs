//! Quarter segmentation functionality.
//!
//! This module splits a contract duration into the four chronological
//! segments of the quarterly work-distribution method and derives the work
//! amount and daily work rate of each segment.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Quarter};

/// Returns the share of the total work assigned to a quarter.
///
/// The shares are 12.5%, 25%, 25% and 37.5%, which sum to exactly 100%.
pub fn work_share(quarter: Quarter) -> Decimal {
    match quarter {
        Quarter::First => Decimal::new(125, 3),
        Quarter::Second => Decimal::new(25, 2),
        Quarter::Third => Decimal::new(25, 2),
        Quarter::Fourth => Decimal::new(375, 3),
    }
}

/// Returns the penalty rate in force while a quarter is current.
///
/// The rates are 2.5%, 5%, 7.5% and 10%, strictly increasing.
pub fn penalty_rate(quarter: Quarter) -> Decimal {
    match quarter {
        Quarter::First => Decimal::new(25, 3),
        Quarter::Second => Decimal::new(5, 2),
        Quarter::Third => Decimal::new(75, 3),
        Quarter::Fourth => Decimal::new(10, 2),
    }
}

/// One segment of the contract duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuarterSegment {
    /// Which quarter this is.
    pub quarter: Quarter,
    /// Day offset from the start date where the segment begins (exclusive).
    pub start_offset: i64,
    /// Day offset from the start date where the segment ends (inclusive).
    pub boundary: i64,
    /// Number of days in the segment. May be zero for very short contracts.
    pub length_days: i64,
    /// The work amount assigned to this segment.
    pub work_amount: Decimal,
    /// Work per day; zero for an empty segment.
    pub daily_rate: Decimal,
    /// Cumulative work at the end of this segment.
    pub cumulative_work: Decimal,
    /// Penalty rate while this segment is current.
    pub penalty_rate: Decimal,
}

impl QuarterSegment {
    /// Cumulative work at the start of this segment.
    pub fn work_before(&self) -> Decimal {
        self.cumulative_work - self.work_amount
    }

    /// Returns true if the segment spans no days.
    pub fn is_empty(&self) -> bool {
        self.length_days == 0
    }
}

/// The four segments of a contract, in chronological order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuarterSegmentation {
    /// The contract duration in whole days.
    pub total_duration_days: i64,
    /// The work order total being distributed.
    pub total_amount: Decimal,
    /// Segments in chronological order.
    pub segments: [QuarterSegment; 4],
}

impl QuarterSegmentation {
    /// Returns the segment for a quarter.
    pub fn segment(&self, quarter: Quarter) -> &QuarterSegment {
        &self.segments[quarter.index()]
    }

    /// Returns the final segment.
    pub fn final_segment(&self) -> &QuarterSegment {
        self.segment(Quarter::Fourth)
    }

    /// Returns the four boundaries `[B1, B2, B3, B4]`.
    pub fn boundaries(&self) -> [i64; 4] {
        self.segments.map(|s| s.boundary)
    }

    /// Returns the four segment lengths.
    pub fn lengths(&self) -> [i64; 4] {
        self.segments.map(|s| s.length_days)
    }
}

/// The result of segmenting a duration, including the audit step.
#[derive(Debug, Clone)]
pub struct SegmentationResult {
    /// The computed segmentation.
    pub segmentation: QuarterSegmentation,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Day offsets of the four segment boundaries.
///
/// `B1 = floor(D/4)`, `B2 = floor(D/2)`, `B3 = floor(3D/4)`, `B4 = D`. The floor
/// can make segment lengths drift from their nominal shares for short
/// durations; that drift is part of the method.
pub fn quarter_boundaries(total_duration_days: i64) -> [i64; 4] {
    let d = total_duration_days;
    [d / 4, d / 2, d * 3 / 4, d]
}

/// Splits the contract duration into four segments.
///
/// # Arguments
///
/// * `total_amount` - The work order total
/// * `total_duration_days` - Days from start to scheduled completion; must be positive
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns `DegenerateDuration` for a non-positive duration and
/// `CalculationError` if decimal arithmetic overflows.
///
/// # Examples
///
/// ```
/// use ld_engine::calculation::segment_duration;
/// use rust_decimal::Decimal;
///
/// let result = segment_duration(Decimal::from(507_992), 91, 1).unwrap();
/// let seg = result.segmentation;
///
/// assert_eq!(seg.boundaries(), [22, 45, 68, 91]);
/// assert_eq!(seg.lengths(), [22, 23, 23, 23]);
/// assert_eq!(seg.final_segment().work_amount, Decimal::from(190_497));
/// ```
pub fn segment_duration(
    total_amount: Decimal,
    total_duration_days: i64,
    step_number: u32,
) -> EngineResult<SegmentationResult> {
    if total_duration_days <= 0 {
        return Err(EngineError::DegenerateDuration {
            days: total_duration_days,
        });
    }

    let boundaries = quarter_boundaries(total_duration_days);
    let mut start_offset = 0;
    let mut cumulative_work = Decimal::ZERO;
    let mut segments = Vec::with_capacity(4);

    for quarter in Quarter::ALL {
        let boundary = boundaries[quarter.index()];
        let length_days = boundary - start_offset;

        let work_amount = total_amount
            .checked_mul(work_share(quarter))
            .ok_or_else(|| EngineError::overflow("segment work amount"))?;

        let daily_rate = if length_days == 0 {
            Decimal::ZERO
        } else {
            work_amount
                .checked_div(Decimal::from(length_days))
                .ok_or_else(|| EngineError::overflow("segment daily rate"))?
        };

        cumulative_work = cumulative_work
            .checked_add(work_amount)
            .ok_or_else(|| EngineError::overflow("cumulative work"))?;

        segments.push(QuarterSegment {
            quarter,
            start_offset,
            boundary,
            length_days,
            work_amount,
            daily_rate,
            cumulative_work,
            penalty_rate: penalty_rate(quarter),
        });

        start_offset = boundary;
    }

    let segments: [QuarterSegment; 4] = segments
        .try_into()
        .map_err(|_| EngineError::CalculationError {
            message: "expected exactly four quarter segments".to_string(),
        })?;

    let segmentation = QuarterSegmentation {
        total_duration_days,
        total_amount,
        segments,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "quarter_segmentation".to_string(),
        rule_name: "Quarter Segmentation".to_string(),
        input: serde_json::json!({
            "total_amount": total_amount.normalize().to_string(),
            "total_duration_days": total_duration_days
        }),
        output: serde_json::json!({
            "boundaries": segmentation.boundaries(),
            "lengths": segmentation.lengths(),
            "work_amounts": segmentation
                .segments
                .iter()
                .map(|s| s.work_amount.normalize().to_string())
                .collect::<Vec<_>>(),
            "daily_rates": segmentation
                .segments
                .iter()
                .map(|s| s.daily_rate.round_dp(4).normalize().to_string())
                .collect::<Vec<_>>()
        }),
        reasoning: format!(
            "{} days split at day offsets {:?} into segments of {:?} days",
            total_duration_days,
            segmentation.boundaries(),
            segmentation.lengths()
        ),
    };

    Ok(SegmentationResult {
        segmentation,
        audit_step,
    })
}
