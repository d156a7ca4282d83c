//! HTTP request handlers for the PAYE API.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::calculation::calculate_paye;
use crate::classification::{TaxProfile, assess_readiness, build_checklist, classify};
use crate::error::EngineError;
use crate::models::CalculationInput;

use super::request::{
    AssessmentRequest, CalculationRequest, ChecklistQuery, ClassifyRequest, from_body,
};
use super::response::{ApiEnvelope, ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/rules", get(rules_handler))
        .route("/api/calculate-paye", post(calculate_handler))
        .route("/api/classify", post(classify_handler))
        .route("/api/assessment", post(assessment_handler))
        .route("/api/checklist", get(checklist_handler))
        .with_state(state)
}

/// Handler for GET /api/health.
async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Handler for GET /api/rules. Returns the active bracket table and reliefs.
async fn rules_handler(State(state): State<AppState>) -> Response {
    ApiEnvelope::ok(state.rules().clone()).into_response()
}

/// Handler for POST /api/calculate-paye.
///
/// Accepts gross income and deductions and returns the full tax breakdown.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing PAYE calculation request");

    let request: CalculationRequest = match read_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let outcome = CalculationInput::try_from(request)
        .and_then(|input| calculate_paye(&input, state.rules()));

    match outcome {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                gross_income = %result.gross_income,
                taxable_income = %result.taxable_income,
                total_tax = %result.total_tax,
                duration_us = start_time.elapsed().as_micros(),
                "PAYE calculation completed successfully"
            );
            ApiEnvelope::ok(result).into_response()
        }
        Err(err) => engine_failure(correlation_id, err),
    }
}

/// Handler for POST /api/classify.
async fn classify_handler(payload: Result<Json<Value>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();

    let request: ClassifyRequest = match read_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match TaxProfile::try_from(request) {
        Ok(profile) => {
            let result = classify(&profile);
            info!(
                correlation_id = %correlation_id,
                classification = %result.classification,
                obligations = result.obligations.len(),
                "Classification completed"
            );
            ApiEnvelope::ok(result).into_response()
        }
        Err(err) => engine_failure(correlation_id, err),
    }
}

/// Handler for POST /api/assessment.
async fn assessment_handler(payload: Result<Json<Value>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();

    let answers: AssessmentRequest = match read_body(payload, correlation_id) {
        Ok(answers) => answers,
        Err(response) => return response,
    };

    let report = assess_readiness(&answers);
    info!(
        correlation_id = %correlation_id,
        score = report.score,
        level = %report.level,
        "Readiness assessment completed"
    );
    ApiEnvelope::ok(report).into_response()
}

/// Handler for GET /api/checklist?category=ID&completed=ID,ID.
async fn checklist_handler(query: Result<Query<ChecklistQuery>, QueryRejection>) -> Response {
    let correlation_id = Uuid::new_v4();

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            let body_text = rejection.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "Query string error");
            return ApiErrorResponse::bad_request(ApiError::invalid_input(body_text))
                .into_response();
        }
    };

    match query.category() {
        Ok(category) => {
            let checklist = build_checklist(category, &query.completed_ids());
            info!(
                correlation_id = %correlation_id,
                category = %checklist.category,
                progress = checklist.progress,
                "Checklist built"
            );
            ApiEnvelope::ok(checklist).into_response()
        }
        Err(err) => engine_failure(correlation_id, err),
    }
}

/// Unwraps a JSON body and decodes it as `T`.
///
/// axum's rejections become 400 envelopes; bodies that are not objects or
/// whose fields fail to decode become `INVALID_INPUT`.
fn read_body<T: DeserializeOwned>(
    payload: Result<Json<Value>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    match payload {
        Ok(Json(body)) => from_body(body).map_err(|err| engine_failure(correlation_id, err)),
        Err(rejection) => Err(reject_body(rejection, correlation_id).into_response()),
    }
}

/// Maps axum's JSON rejection onto an error code.
fn reject_body(rejection: JsonRejection, correlation_id: Uuid) -> ApiErrorResponse {

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's message, e.g. the field that failed.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            ApiError::invalid_input(body_text)
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
            warn!(correlation_id = %correlation_id, "Missing JSON content type");
            ApiError::missing_content_type()
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

/// Logs and converts a domain error.
fn engine_failure(correlation_id: Uuid, err: EngineError) -> Response {
    if err.is_client_error() {
        warn!(correlation_id = %correlation_id, error = %err, "Request rejected");
    } else {
        error!(correlation_id = %correlation_id, error = %err, "Request failed");
    }
    ApiErrorResponse::from(err).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::CalculationResult;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use rust_decimal_macros::dec;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/nta2025").expect("Failed to load config");
        AppState::new(config)
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let router = create_router(create_test_state());
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn post_json(uri: &str, body: &str) -> (StatusCode, Value) {
        send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    #[tokio::test]
    async fn test_health_returns_ok() {
        let (status, body) = send(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_rules_lists_six_bands() {
        let (status, body) = send(
            Request::builder()
                .uri("/api/rules")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["metadata"]["code"], "NTA-2025");
        assert_eq!(body["data"]["schedule"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_calculate_valid_request_returns_200() {
        let (status, body) = post_json("/api/calculate-paye", r#"{"grossIncome": 12000000}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let result: CalculationResult = serde_json::from_value(body["data"].clone()).unwrap();
        assert_eq!(result.total_tax, dec!(1950000));
        assert_eq!(result.monthly_tax, dec!(162500));
        assert_eq!(result.effective_rate, dec!(16.25));
        assert_eq!(result.tax_breakdown.len(), 6);
    }

    #[tokio::test]
    async fn test_calculate_malformed_json_returns_400() {
        let (status, body) = post_json("/api/calculate-paye", "{invalid json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_calculate_non_numeric_returns_invalid_input() {
        let (status, body) =
            post_json("/api/calculate-paye", r#"{"grossIncome": "a lot"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_calculate_missing_gross_income_returns_400() {
        let (status, body) = post_json("/api/calculate-paye", r#"{"pension": 1000}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_INPUT");
        assert!(body["error"]["message"].as_str().unwrap().contains("grossIncome"));
    }

    #[tokio::test]
    async fn test_calculate_negative_amount_returns_400() {
        let (status, body) = post_json(
            "/api/calculate-paye",
            r#"{"grossIncome": 1000000, "pension": -5}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"].as_str().unwrap().contains("pension"));
    }

    #[tokio::test]
    async fn test_calculate_without_content_type_returns_400() {
        let (status, body) = send(
            Request::builder()
                .method("POST")
                .uri("/api/calculate-paye")
                .body(Body::from(r#"{"grossIncome": 1}"#))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "MISSING_CONTENT_TYPE");
    }

    #[tokio::test]
    async fn test_calculate_overflow_returns_500() {
        let max = rust_decimal::Decimal::MAX;
        let body = format!(r#"{{"grossIncome": "{max}", "pension": "{max}", "nhf": "{max}"}}"#);
        let (status, body) = post_json("/api/calculate-paye", &body).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "CALCULATION_ERROR");
    }

    #[tokio::test]
    async fn test_calculate_array_body_returns_invalid_input() {
        for body in ["[1, 2, 3]", "[12000000]", "12000000"] {
            let (status, json) = post_json("/api/calculate-paye", body).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
            assert_eq!(json["error"]["code"], "INVALID_INPUT");
            assert!(json.get("data").is_none());
        }
    }

    #[tokio::test]
    async fn test_calculate_amount_out_of_range_returns_400() {
        let (status, body) = post_json("/api/calculate-paye", r#"{"grossIncome": 1e29}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_INPUT");
        assert!(
            body["error"]["message"]
                .as_str()
                .unwrap()
                .contains("exceeds the supported range")
        );
    }

    #[tokio::test]
    async fn test_classify_array_body_returns_invalid_input() {
        let (status, body) = post_json("/api/classify", r#"["salary"]"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_classify_business_owner() {
        let (status, body) = post_json(
            "/api/classify",
            r#"{"workType": "business", "complexity": ["shop"]}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["classification"], "Business Owner");
    }

    #[tokio::test]
    async fn test_classify_unknown_work_type_returns_400() {
        let (status, body) = post_json("/api/classify", r#"{"workType": "pirate"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_PROFILE");
    }

    #[tokio::test]
    async fn test_assessment_scores_answers() {
        let (status, body) = post_json(
            "/api/assessment",
            r#"{"hasTin": true, "keepsRecords": true, "filedLastYear": true}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["score"], 60);
        assert_eq!(body["data"]["level"], "Medium Readiness");
        assert_eq!(body["data"]["advice"].as_array().unwrap().len(), 2);
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    #[tokio::test]
    async fn test_checklist_for_category() {
        let (status, body) =
            get_json("/api/checklist?category=mixed-income&completed=tin-mixed").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["category"], "Mixed Income");
        assert_eq!(body["data"]["items"].as_array().unwrap().len(), 6);
        assert_eq!(body["data"]["completed"], json!(["tin-mixed"]));
        assert_eq!(body["data"]["progress"], 17);
    }

    #[tokio::test]
    async fn test_checklist_without_category_returns_400() {
        let (status, body) = get_json("/api/checklist").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_PROFILE");
    }

    #[tokio::test]
    async fn test_checklist_unknown_category_returns_400() {
        let (status, body) = get_json("/api/checklist?category=astronaut").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_PROFILE");
        assert!(body["error"]["message"].as_str().unwrap().contains("non-profit"));
    }
}
