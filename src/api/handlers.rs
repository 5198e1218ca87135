//! HTTP request handlers for the Liquidated Damages Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::compute_liquidated_damages;
use crate::error::EngineError;
use crate::formatter::format_amount;

use super::request::LdCalculationRequest;
use super::response::{ApiError, ApiErrorResponse, BatchItem, BatchResponse, LdAssessment};
use super::state::AppState;

/// The largest number of bills accepted in one batch request.
pub const MAX_BATCH_SIZE: usize = 1000;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/calculate/batch", post(batch_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<LdCalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing LD calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match assess(&request, &state) {
        Ok(assessment) => {
            info!(
                correlation_id = %correlation_id,
                calculation_id = %assessment.calculation_id,
                outcome = ?assessment.result.outcome,
                penalty = assessment.result.outcome.is_penalty(),
                rounded_amount = %assessment.result.rounded_amount,
                duration_us = assessment.duration_us,
                "LD calculation completed successfully"
            );
            json_response(StatusCode::OK, assessment)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "LD calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /calculate/batch endpoint.
///
/// Each bill is assessed on its own; one rejected bill does not affect the
/// others.
async fn batch_handler(
    State(state): State<AppState>,
    payload: Result<Json<Vec<LdCalculationRequest>>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let requests = match payload {
        Ok(Json(reqs)) => reqs,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    info!(
        correlation_id = %correlation_id,
        bills = requests.len(),
        "Processing LD batch request"
    );

    if requests.len() > MAX_BATCH_SIZE {
        warn!(correlation_id = %correlation_id, bills = requests.len(), "Batch too large");
        return json_response(
            StatusCode::BAD_REQUEST,
            ApiError::with_details(
                "BATCH_TOO_LARGE",
                format!("Batch of {} bills exceeds the limit", requests.len()),
                format!("At most {} bills may be submitted per request", MAX_BATCH_SIZE),
            ),
        );
    }

    let results: Vec<BatchItem> = requests
        .iter()
        .enumerate()
        .map(|(index, request)| match assess(request, &state) {
            Ok(assessment) => BatchItem {
                index,
                assessment: Some(assessment),
                error: None,
            },
            Err(err) => {
                let api_error: ApiErrorResponse = err.into();
                BatchItem {
                    index,
                    assessment: None,
                    error: Some(api_error.error),
                }
            }
        })
        .collect();

    let succeeded = results.iter().filter(|r| r.assessment.is_some()).count();
    let failed = results.len() - succeeded;

    info!(
        correlation_id = %correlation_id,
        succeeded,
        failed,
        "LD batch completed"
    );

    json_response(
        StatusCode::OK,
        BatchResponse {
            succeeded,
            failed,
            results,
        },
    )
}

/// Assesses one bill and wraps the result in an envelope.
fn assess(request: &LdCalculationRequest, state: &AppState) -> Result<LdAssessment, EngineError> {
    let start_time = Instant::now();

    let bill = request.to_bill()?;
    let result = compute_liquidated_damages(&bill)?;

    let sentence = request
        .include_sentence
        .then(|| format_amount(result.rounded_amount, state.config().formatter()));

    Ok(LdAssessment {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: state.engine_version().to_string(),
        result,
        sentence,
        duration_us: start_time.elapsed().as_micros() as u64,
    })
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    json_response(StatusCode::BAD_REQUEST, error)
}
