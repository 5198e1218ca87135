//! Response types for the Liquidated Damages Engine API.
//!
//! This module defines the assessment envelope, the batch response, and the
//! error response structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::ComputationResult;

/// A completed assessment as returned by the API.
///
/// The embedded [`ComputationResult`] is deterministic; the identifier,
/// timestamp and duration belong to this request only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LdAssessment {
    /// Unique identifier for this assessment.
    pub calculation_id: Uuid,
    /// When the assessment was made.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that made the assessment.
    pub engine_version: String,
    /// The engine result.
    pub result: ComputationResult,
    /// The rendered LD sentence, if requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentence: Option<String>,
    /// Time spent computing, in microseconds.
    pub duration_us: u64,
}

/// One entry of a batch response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItem {
    /// Position of the bill in the request.
    pub index: usize,
    /// The assessment, if the bill was valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<LdAssessment>,
    /// The error, if the bill was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

/// Response body for the `/calculate/batch` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResponse {
    /// Number of bills assessed successfully.
    pub succeeded: usize,
    /// Number of bills rejected.
    pub failed: usize,
    /// Per-bill results in request order.
    pub results: Vec<BatchItem>,
}

/// API error response structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::InvalidSchedule { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_SCHEDULE",
                    message,
                    "The scheduled completion date must not precede the start date",
                ),
            },
            EngineError::InvalidAmount { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_AMOUNT",
                    message,
                    "The total amount must be positive and the progress amount non-negative",
                ),
            },
            EngineError::DegenerateDuration { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "DEGENERATE_DURATION",
                    message,
                    "The contract must last at least one day",
                ),
            },
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
            EngineError::CalculationError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_invalid_schedule_maps_to_bad_request() {
        let api_error: ApiErrorResponse = EngineError::InvalidSchedule {
            start: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            scheduled_completion: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
        .into();

        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_SCHEDULE");
        assert!(api_error.error.message.contains("2024-01-01"));
    }

    #[test]
    fn test_invalid_amount_maps_to_bad_request() {
        let api_error: ApiErrorResponse =
            EngineError::invalid_amount("total_amount", "must be greater than zero").into();

        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_AMOUNT");
    }

    #[test]
    fn test_degenerate_duration_maps_to_bad_request() {
        let api_error: ApiErrorResponse = EngineError::DegenerateDuration { days: 0 }.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "DEGENERATE_DURATION");
    }

    #[test]
    fn test_calculation_error_maps_to_server_error() {
        let api_error: ApiErrorResponse = EngineError::CalculationError {
            message: "overflow".to_string(),
        }
        .into();

        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CALCULATION_ERROR");
        assert_eq!(api_error.error.details.as_deref(), Some("Calculation error: overflow"));
    }

    #[test]
    fn test_error_response_carries_status_and_json_body() {
        let response = ApiErrorResponse::from(EngineError::DegenerateDuration { days: 0 }).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(axum::http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}
