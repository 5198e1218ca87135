//! HTTP API module for the Liquidated Damages Engine.
//!
//! This module exposes the engine to report-generation tooling over REST.
//! The engine itself stays pure; identifiers, timestamps and logging live here.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{MAX_BATCH_SIZE, create_router};
pub use request::{AmountInput, LdCalculationRequest};
pub use response::{ApiError, BatchItem, BatchResponse, LdAssessment};
pub use state::AppState;
