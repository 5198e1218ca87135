//! Integration tests for the Liquidated Damages Engine.
//!
//! This test suite drives the HTTP API end to end and covers:
//! - Completion on time (no LD)
//! - Delayed with work outstanding (quarterly prorated LD)
//! - Delayed but fully executed (final quarter LD)
//! - Sentence rendering from the shipped configuration
//! - Validation errors
//! - Batch requests

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use ld_engine::api::{AppState, MAX_BATCH_SIZE, create_router};
use ld_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn post_json(router: Router, uri: &str, body: String) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post_calculate(body: Value) -> (StatusCode, Value) {
    post_json(create_router_for_test(), "/calculate", body.to_string()).await
}

fn create_request(total: Value, progress: Value, start: &str, scheduled: &str, actual: &str) -> Value {
    json!({
        "total_amount": total,
        "actual_progress_amount": progress,
        "start_date": start,
        "scheduled_completion_date": scheduled,
        "actual_completion_date": actual
    })
}

fn assert_rounded_amount(result: &Value, expected: &str) {
    let actual = result["result"]["rounded_amount"].as_str().unwrap();
    assert_eq!(
        decimal(actual),
        decimal(expected),
        "Expected rounded_amount {}, got {}",
        expected,
        actual
    );
}

// =============================================================================
// Reference scenarios
// =============================================================================

#[tokio::test]
async fn test_on_time_completion_has_no_ld() {
    let (status, body) = post_calculate(create_request(
        json!(1000000),
        json!(1000000),
        "2024-01-01",
        "2024-06-30",
        "2024-06-30",
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["outcome"], "zero");
    assert_rounded_amount(&body, "0");
    assert_eq!(
        body["sentence"],
        "No liquidated damages are leviable as the work was completed within the stipulated time."
    );
}

#[tokio::test]
async fn test_complete_but_late_charges_final_quarter() {
    let (status, body) = post_calculate(create_request(
        json!(507992),
        json!(507992),
        "2024-10-01",
        "2024-12-31",
        "2025-01-05",
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["outcome"], "final_segment_delayed");
    assert_eq!(body["result"]["quarter"], "fourth");
    assert_eq!(body["result"]["delay_days"], 5);
    assert_rounded_amount(&body, "4141");
    assert_eq!(
        body["sentence"],
        "Liquidated damages of Rs. 4,141/- are leviable under Clause 2 of the agreement for delay in completion of the work, and shall be recovered from the bill."
    );
}

#[tokio::test]
async fn test_shortfall_and_late_is_prorated() {
    let (status, body) = post_calculate(create_request(
        json!(1000000),
        json!(700000),
        "2024-01-01",
        "2024-06-30",
        "2024-07-30",
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["outcome"], "quarterly_prorated");
    assert_eq!(body["result"]["applicable_penalty_rate"], "0.10");
    assert_rounded_amount(&body, "30000");
    assert!(body["sentence"].as_str().unwrap().contains("Rs. 30,000/-"));
}

#[tokio::test]
async fn test_large_shortfall_in_final_quarter() {
    let (status, body) = post_calculate(create_request(
        json!(1000000),
        json!(264600),
        "2024-01-01",
        "2024-06-30",
        "2024-07-30",
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["total_duration_days"], 181);
    assert_eq!(body["result"]["elapsed_days"], 211);
    assert_rounded_amount(&body, "73540");
    assert!(body["sentence"].as_str().unwrap().contains("Rs. 73,540/-"));
}

#[tokio::test]
async fn test_string_amounts_with_lakh_separators() {
    let (status, body) = post_calculate(create_request(
        json!("10,00,000"),
        json!("2,64,600"),
        "2024-01-01",
        "2024-06-30",
        "2024-07-30",
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_rounded_amount(&body, "73540");
}

#[tokio::test]
async fn test_long_numeric_amounts_are_exact() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/calculate",
        r#"{
            "total_amount": 1234567890123.456789,
            "actual_progress_amount": 1234567890123.456789,
            "start_date": "2024-01-01",
            "scheduled_completion_date": "2024-06-30",
            "actual_completion_date": "2024-06-30"
        }"#
        .to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let input = &body["result"]["audit_steps"][0]["input"];
    assert_eq!(input["total_amount"], "1234567890123.456789");
    assert_eq!(input["actual_progress_amount"], "1234567890123.456789");
}

#[tokio::test]
async fn test_misplaced_commas_are_invalid_amount() {
    let (status, body) = post_calculate(create_request(
        json!("1,2,3,4,5"),
        json!(0),
        "2024-01-01",
        "2024-06-30",
        "2024-07-30",
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_AMOUNT");
}

#[tokio::test]
async fn test_response_envelope_fields() {
    let (status, body) = post_calculate(create_request(
        json!(1000000),
        json!(700000),
        "2024-01-01",
        "2024-06-30",
        "2024-07-30",
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["calculation_id"].is_string());
    assert!(body["timestamp"].is_string());
    assert_eq!(body["engine_version"], "0.1.0");
    assert!(body["duration_us"].is_u64());
    assert_eq!(body["result"]["audit_steps"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_sentence_can_be_omitted() {
    let mut request = create_request(
        json!(1000000),
        json!(700000),
        "2024-01-01",
        "2024-06-30",
        "2024-07-30",
    );
    request["include_sentence"] = json!(false);

    let (status, body) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("sentence").is_none());
    assert_rounded_amount(&body, "30000");
}

// =============================================================================
// Open question: incomplete but on time
// =============================================================================

#[tokio::test]
async fn test_incomplete_but_on_time_has_no_ld() {
    // Half the work missing at the scheduled date still incurs no LD.
    let (status, body) = post_calculate(create_request(
        json!(1000000),
        json!(500000),
        "2024-01-01",
        "2024-06-30",
        "2024-06-30",
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["outcome"], "zero");
    assert_rounded_amount(&body, "0");
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_scheduled_before_start_is_rejected() {
    let (status, body) = post_calculate(create_request(
        json!(1000000),
        json!(0),
        "2024-06-30",
        "2024-01-01",
        "2024-07-30",
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_SCHEDULE");
}

#[tokio::test]
async fn test_negative_progress_is_rejected() {
    let (status, body) = post_calculate(create_request(
        json!(1000000),
        json!(-1),
        "2024-01-01",
        "2024-06-30",
        "2024-07-30",
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_AMOUNT");
    assert!(body["message"].as_str().unwrap().contains("actual_progress_amount"));
}

#[tokio::test]
async fn test_non_numeric_amount_is_rejected() {
    let (status, body) = post_calculate(create_request(
        json!("#VALUE!"),
        json!(0),
        "2024-01-01",
        "2024-06-30",
        "2024-07-30",
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_AMOUNT");
}

#[tokio::test]
async fn test_zero_day_contract_is_rejected() {
    let (status, body) = post_calculate(create_request(
        json!(1000),
        json!(0),
        "2024-01-01",
        "2024-01-01",
        "2024-01-05",
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "DEGENERATE_DURATION");
}

#[tokio::test]
async fn test_missing_field_is_validation_error() {
    let (status, body) = post_calculate(json!({
        "total_amount": 1000,
        "actual_progress_amount": 0,
        "start_date": "2024-01-01",
        "scheduled_completion_date": "2024-06-30"
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().contains("actual_completion_date"));
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/calculate",
        "{\"total_amount\": ".to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
}

// =============================================================================
// Batch
// =============================================================================

#[tokio::test]
async fn test_batch_mixes_successes_and_failures() {
    let batch = json!([
        create_request(json!(1000000), json!(700000), "2024-01-01", "2024-06-30", "2024-07-30"),
        create_request(json!(1000), json!(0), "2024-01-01", "2024-01-01", "2024-01-05"),
        create_request(json!(507992), json!(507992), "2024-10-01", "2024-12-31", "2025-01-05"),
    ]);

    let (status, body) = post_json(create_router_for_test(), "/calculate/batch", batch.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["succeeded"], 2);
    assert_eq!(body["failed"], 1);

    let results = body["results"].as_array().unwrap();
    assert_eq!(results[0]["assessment"]["result"]["rounded_amount"], "30000");
    assert_eq!(results[1]["error"]["code"], "DEGENERATE_DURATION");
    assert!(results[1].get("assessment").is_none());
    assert_eq!(results[2]["assessment"]["result"]["rounded_amount"], "4141");
    assert_eq!(results[2]["index"], 2);
}

#[tokio::test]
async fn test_empty_batch_is_ok() {
    let (status, body) = post_json(create_router_for_test(), "/calculate/batch", "[]".to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["succeeded"], 0);
    assert_eq!(body["failed"], 0);
}

#[tokio::test]
async fn test_oversized_batch_is_rejected() {
    let one = create_request(json!(1000), json!(0), "2024-01-01", "2024-06-30", "2024-07-30");
    let batch = Value::Array(vec![one; MAX_BATCH_SIZE + 1]);

    let (status, body) = post_json(create_router_for_test(), "/calculate/batch", batch.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BATCH_TOO_LARGE");
}
