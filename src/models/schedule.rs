//! Schedule window model.
//!
//! This module contains the [`ScheduleWindow`] type describing when a work
//! order started, when it was due, and when it was actually completed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The three calendar dates that drive the LD computation.
///
/// All day counts use a plain `end - start` convention in whole days, with no
/// partial-day or timezone semantics.
///
/// # Example
///
/// ```
/// use ld_engine::models::ScheduleWindow;
/// use chrono::NaiveDate;
///
/// let window = ScheduleWindow {
///     start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     scheduled_completion_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
///     actual_completion_date: NaiveDate::from_ymd_opt(2024, 7, 30).unwrap(),
/// };
///
/// assert_eq!(window.total_duration_days(), 181);
/// assert_eq!(window.elapsed_days(), 211);
/// assert_eq!(window.delay_days(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleWindow {
    /// The date the contract period started.
    pub start_date: NaiveDate,
    /// The contractual completion date.
    pub scheduled_completion_date: NaiveDate,
    /// The date the work was actually completed.
    pub actual_completion_date: NaiveDate,
}

impl ScheduleWindow {
    /// Whole days from start to scheduled completion.
    pub fn total_duration_days(&self) -> i64 {
        (self.scheduled_completion_date - self.start_date).num_days()
    }

    /// Whole days from start to actual completion.
    ///
    /// May exceed the total duration for late work, and is negative if the
    /// actual completion date precedes the start date.
    pub fn elapsed_days(&self) -> i64 {
        (self.actual_completion_date - self.start_date).num_days()
    }

    /// Days of delay beyond the scheduled completion date.
    ///
    /// Zero or negative when the work finished on time.
    pub fn delay_days(&self) -> i64 {
        self.elapsed_days() - self.total_duration_days()
    }

    /// Returns true if the work finished after the scheduled completion date.
    pub fn is_delayed(&self) -> bool {
        self.delay_days() > 0
    }
}
