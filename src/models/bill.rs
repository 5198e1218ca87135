//! Bill input models.
//!
//! A [`Bill`] bundles the three records the engine consumes: the work order
//! value, the measured progress, and the schedule window.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ScheduleWindow;

/// The contracted work order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkOrder {
    /// The total value of the work order. Must be greater than zero.
    pub total_amount: Decimal,
}

/// Measured progress against the work order.
///
/// The amount is expected to be at most the work order total, but a slight
/// excess from upstream measurement rounding is tolerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// The value of work actually executed. Must not be negative.
    pub actual_progress_amount: Decimal,
}

/// Everything needed to assess liquidated damages for one bill.
///
/// # Example
///
/// ```
/// use ld_engine::models::Bill;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let bill = Bill::new(
///     Decimal::from(1_000_000),
///     Decimal::from(700_000),
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 7, 30).unwrap(),
/// );
///
/// assert_eq!(bill.total_amount(), Decimal::from(1_000_000));
/// assert_eq!(bill.schedule.delay_days(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bill {
    /// The work order being billed.
    pub work_order: WorkOrder,
    /// Progress measured at completion.
    pub progress: ProgressRecord,
    /// Start, scheduled and actual completion dates.
    pub schedule: ScheduleWindow,
}

impl Bill {
    /// Builds a bill from the five flat inputs.
    pub fn new(
        total_amount: Decimal,
        actual_progress_amount: Decimal,
        start_date: NaiveDate,
        scheduled_completion_date: NaiveDate,
        actual_completion_date: NaiveDate,
    ) -> Self {
        Self {
            work_order: WorkOrder { total_amount },
            progress: ProgressRecord {
                actual_progress_amount,
            },
            schedule: ScheduleWindow {
                start_date,
                scheduled_completion_date,
                actual_completion_date,
            },
        }
    }

    /// Returns the work order total.
    pub fn total_amount(&self) -> Decimal {
        self.work_order.total_amount
    }

    /// Returns the measured progress amount.
    pub fn actual_progress_amount(&self) -> Decimal {
        self.progress.actual_progress_amount
    }
}
