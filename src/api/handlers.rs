//! HTTP request handlers for the pay statement engine API.
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
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::ScheduleConfig;
use crate::error::EngineResult;
use crate::models::StatementRun;
use crate::render::PayStatement;

use super::request::ScheduleRequest;
use super::response::{ApiError, ApiErrorResponse, StatementBatch};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/schedule", post(schedule_handler))
        .route("/statements", post(statements_handler))
        .with_state(state)
}

/// Handler for POST /schedule endpoint.
///
/// Accepts a schedule request and returns every period record in a
/// [`StatementRun`].
async fn schedule_handler(
    payload: Result<Json<ScheduleRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing schedule request");

    let request = match extract_request(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    match generate_run(request) {
        Ok(run) => {
            info!(
                correlation_id = %correlation_id,
                run_id = %run.run_id,
                records = run.records.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Schedule generated successfully"
            );
            json_response(StatusCode::OK, run)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Schedule generation failed");
            error_response(err.into())
        }
    }
}

/// Handler for POST /statements endpoint.
///
/// Same input as `/schedule`; each record is joined with the configured
/// parties and returned as a [`PayStatement`].
async fn statements_handler(
    State(state): State<AppState>,
    payload: Result<Json<ScheduleRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing statements request");

    let request = match extract_request(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    match generate_run(request) {
        Ok(run) => {
            let batch = StatementBatch {
                run_id: run.run_id,
                generated_at: run.generated_at,
                statements: PayStatement::for_records(run.records, state.parties()),
            };
            info!(
                correlation_id = %correlation_id,
                run_id = %batch.run_id,
                statements = batch.statements.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Statements generated successfully"
            );
            json_response(StatusCode::OK, batch)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Statement generation failed");
            error_response(err.into())
        }
    }
}

/// Validates the request and runs the accrual over the whole schedule.
fn generate_run(request: ScheduleRequest) -> EngineResult<StatementRun> {
    let config: ScheduleConfig = request.into();
    let schedule = config.build()?;
    StatementRun::generate(&schedule)
}

/// Unwraps the JSON body or turns the rejection into a 400 response.
fn extract_request(
    payload: Result<Json<ScheduleRequest>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<ScheduleRequest, Response> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // body_text carries the serde message
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
    Err(error_response(ApiErrorResponse::bad_request(error)))
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, api_error.error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use axum::{body::Body, http::Request};
    use rust_decimal::Decimal;
    use serde_json::Value;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        AppState::new(config)
    }

    fn valid_body() -> String {
        r#"{
            "anchor_date": "2021-10-28",
            "cadence_days": 14,
            "end_date": "2022-02-10",
            "annual_salary": "90000",
            "periods_per_year": 26
        }"#
        .to_string()
    }

    async fn post_json(uri: &str, body: impl Into<Body>) -> Response {
        create_router(create_test_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(body.into())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_bytes(response: Response) -> axum::body::Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_schedule_returns_all_records() {
        let response = post_json("/schedule", valid_body()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = body_bytes(response).await;
        let run: Value = serde_json::from_slice(&body).unwrap();
        let records = run["records"].as_array().unwrap();
        assert_eq!(records.len(), 8);
        assert_eq!(records[0]["pay_date"], "2021-10-28");
        assert_eq!(records[7]["pay_date"], "2022-02-10");
        assert_eq!(run["engine_version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_schedule_rolls_back_end_date() {
        let body = r#"{
            "anchor_date": "2021-10-28",
            "cadence_days": 14,
            "end_date": "2021-11-13",
            "gross_per_period": "100"
        }"#;
        let response = post_json("/schedule", body).await;
        assert_eq!(response.status(), StatusCode::OK);

        let run: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(run["records"].as_array().unwrap().len(), 2);
        assert_eq!(run["schedule"]["end_date"], "2021-11-11");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let response = post_json("/schedule", "{invalid json").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let body = r#"{ "anchor_date": "2021-10-28", "cadence_days": 14 }"#;
        let response = post_json("/schedule", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("end_date"), "got: {}", error.message);
    }

    #[tokio::test]
    async fn test_non_positive_cadence_returns_invalid_schedule() {
        let body = r#"{
            "anchor_date": "2021-10-28",
            "cadence_days": 0,
            "end_date": "2022-02-10",
            "gross_per_period": "100"
        }"#;
        let response = post_json("/schedule", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "INVALID_SCHEDULE");
    }

    #[tokio::test]
    async fn test_end_before_anchor_returns_invalid_schedule() {
        let body = r#"{
            "anchor_date": "2021-10-28",
            "cadence_days": 14,
            "end_date": "2021-10-01",
            "gross_per_period": "100"
        }"#;
        let response = post_json("/schedule", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_cadence_past_earliest_date_returns_invalid_schedule() {
        let body = r#"{
            "anchor_date": "2021-10-28",
            "cadence_days": 200000000,
            "end_date": "2025-04-30",
            "gross_per_period": "100"
        }"#;
        let response = post_json("/schedule", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "INVALID_SCHEDULE");
        assert!(error.message.contains("cadence_days"), "got: {}", error.message);
    }

    #[tokio::test]
    async fn test_overflowing_gross_returns_invalid_schedule() {
        let body = r#"{
            "anchor_date": "2021-10-28",
            "cadence_days": 14,
            "end_date": "2022-02-10",
            "gross_per_period": "79228162514264337593543950335"
        }"#;
        let response = post_json("/statements", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "INVALID_SCHEDULE");
        assert!(error.message.contains("overflows"), "got: {}", error.message);
    }

    #[tokio::test]
    async fn test_missing_content_type_returns_400() {
        let response = create_router(create_test_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/schedule")
                    .body(Body::from(valid_body()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "MISSING_CONTENT_TYPE");
    }

    #[tokio::test]
    async fn test_statements_join_configured_parties() {
        let response = post_json("/statements", valid_body()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let batch: StatementBatch =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(batch.statements.len(), 8);

        let first = &batch.statements[0];
        assert_eq!(first.artifact_name, "paystub-2021-10-28");
        assert_eq!(first.parties.pay_method, "Electronic Transfer");
        assert_eq!(first.deductions.len(), 5);
        assert_eq!(first.net_amount, first.record.gross_amount);

        let last = batch.statements.last().unwrap();
        assert_eq!(last.record.ytd_rounded(), Decimal::from_str("8307.69").unwrap());
    }
}
