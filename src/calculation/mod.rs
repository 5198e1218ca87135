//! Calculation logic for the Liquidated Damages Engine.
//!
//! This module contains the four stages of the quarterly work-distribution
//! method: input validation, quarter segmentation, the required progress
//! calculation, and the liquidated damages decision, plus the
//! [`compute_liquidated_damages`] entry point that runs them in sequence.

mod engine;
mod ld_amount;
mod progress_requirement;
mod quarter_segments;
mod validation;

pub use engine::compute_liquidated_damages;
pub use ld_amount::{LdAmountResult, calculate_ld_amount, round_half_up};
pub use progress_requirement::{
    ProgressRequirement, ProgressRequirementResult, calculate_required_progress, current_segment,
};
pub use quarter_segments::{
    QuarterSegment, QuarterSegmentation, SegmentationResult, penalty_rate, quarter_boundaries,
    segment_duration, work_share,
};
pub use validation::{ValidationResult, parse_amount, validate_bill};
