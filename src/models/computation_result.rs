//! Computation result models for the Liquidated Damages Engine.
//!
//! This module contains the [`ComputationResult`] type and its associated
//! structures: the quarter label, the outcome tag of the LD decision tree, and
//! the audit steps recorded by each stage.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four chronological segments of the contract duration.
///
/// # Example
///
/// ```
/// use ld_engine::models::Quarter;
///
/// assert_eq!(Quarter::Third.number(), 3);
/// assert_eq!(Quarter::Third.to_string(), "3rd Quarter");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quarter {
    /// The first segment (12.5% of the work, 2.5% penalty).
    First,
    /// The second segment (25% of the work, 5% penalty).
    Second,
    /// The third segment (25% of the work, 7.5% penalty).
    Third,
    /// The final segment (37.5% of the work, 10% penalty).
    Fourth,
}

impl Quarter {
    /// All quarters in chronological order.
    pub const ALL: [Quarter; 4] = [
        Quarter::First,
        Quarter::Second,
        Quarter::Third,
        Quarter::Fourth,
    ];

    /// Zero-based position of the quarter.
    pub fn index(self) -> usize {
        match self {
            Quarter::First => 0,
            Quarter::Second => 1,
            Quarter::Third => 2,
            Quarter::Fourth => 3,
        }
    }

    /// One-based quarter number.
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// The human-readable label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Quarter::First => "1st Quarter",
            Quarter::Second => "2nd Quarter",
            Quarter::Third => "3rd Quarter",
            Quarter::Fourth => "4th Quarter",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Terminal outcome of the LD decision tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LdOutcome {
    /// Completed on or before the scheduled date; no penalty.
    Zero,
    /// Delayed with work outstanding; penalty on the unexecuted work at the
    /// current quarter's rate.
    QuarterlyProrated,
    /// Delayed although progress caught up; the whole delay is charged to the
    /// final quarter at its rate.
    FinalSegmentDelayed,
}

impl LdOutcome {
    /// Returns true if this outcome carries a penalty.
    pub fn is_penalty(self) -> bool {
        !matches!(self, LdOutcome::Zero)
    }
}

/// A single step in the audit trail recording one stage of the computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete result of one LD computation.
///
/// Identical inputs always produce an identical result; nothing in here
/// depends on the wall clock or on random identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputationResult {
    /// Which branch of the decision tree produced the amount.
    pub outcome: LdOutcome,
    /// The quarter the elapsed-day count falls in.
    pub quarter: Quarter,
    /// Whole days from start to scheduled completion.
    pub total_duration_days: i64,
    /// Whole days from start to actual completion.
    pub elapsed_days: i64,
    /// Days beyond the scheduled completion date (zero or negative if on time).
    pub delay_days: i64,
    /// Work that should have been executed by the actual completion date.
    pub required_progress: Decimal,
    /// Work the penalty is charged on. Zero when no penalty applies.
    pub unexecuted_work_amount: Decimal,
    /// The penalty rate applied, as a fraction. Zero when no penalty applies.
    pub applicable_penalty_rate: Decimal,
    /// The penalty before rounding.
    pub raw_amount: Decimal,
    /// The penalty rounded half-up to whole currency units, never negative.
    pub rounded_amount: Decimal,
    /// The stage-by-stage audit trail.
    pub audit_steps: Vec<AuditStep>,
}
