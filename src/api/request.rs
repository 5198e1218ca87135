//! Request types for the Liquidated Damages Engine API.
//!
//! This module defines the JSON request structures for the `/calculate` and
//! `/calculate/batch` endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::parse_amount;
use crate::error::EngineResult;
use crate::models::Bill;

/// An amount as supplied by the caller: a JSON number or a string.
///
/// Numbers keep the literal text they were written with, so no digits are
/// lost to a float on the way to a decimal. Strings are accepted because
/// spreadsheet extraction often yields text such as `"5,07,992"`. Parsing happens in [`LdCalculationRequest::to_bill`], so a
/// non-numeric string surfaces as an `INVALID_AMOUNT` error rather than a
/// JSON error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    /// A JSON number.
    Number(serde_json::Number),
    /// A string to be parsed.
    Text(String),
}

impl AmountInput {
    fn as_text(&self) -> String {
        match self {
            AmountInput::Number(n) => n.to_string(),
            AmountInput::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        AmountInput::Text(value.to_string())
    }
}

impl From<u64> for AmountInput {
    fn from(value: u64) -> Self {
        AmountInput::Number(value.into())
    }
}

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LdCalculationRequest {
    /// The work order total.
    pub total_amount: AmountInput,
    /// The value of work actually executed.
    pub actual_progress_amount: AmountInput,
    /// The contract start date.
    pub start_date: NaiveDate,
    /// The contractual completion date.
    pub scheduled_completion_date: NaiveDate,
    /// The actual completion date.
    pub actual_completion_date: NaiveDate,
    /// Whether to render the LD sentence.
    #[serde(default = "default_include_sentence")]
    pub include_sentence: bool,
}

fn default_include_sentence() -> bool {
    true
}

impl LdCalculationRequest {
    /// Parses the amounts and builds the engine input.
    pub fn to_bill(&self) -> EngineResult<Bill> {
        let total_amount = parse_amount("total_amount", &self.total_amount.as_text())?;
        let actual_progress_amount = parse_amount(
            "actual_progress_amount",
            &self.actual_progress_amount.as_text(),
        )?;

        Ok(Bill::new(
            total_amount,
            actual_progress_amount,
            self.start_date,
            self.scheduled_completion_date,
            self.actual_completion_date,
        ))
    }
}
