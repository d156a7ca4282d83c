//! Integration tests for the PAYE engine HTTP API.
//!
//! This test suite covers:
//! - Reference scenarios for the NTA 2025 bracket table
//! - Deductions and rent relief
//! - Response shape (envelope, labels, number encoding)
//! - Classifier, checklist and readiness endpoints
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use paye_engine::api::{AppState, create_router};
use paye_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/nta2025").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a JSON number as a Decimal.
fn number(value: &Value) -> Decimal {
    assert!(value.is_number(), "expected a JSON number, got {value}");
    decimal(&value.to_string())
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
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

async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post_calculate(router: Router, body: Value) -> (StatusCode, Value) {
    post_json(router, "/api/calculate-paye", body).await
}

/// Posts a calculation that is expected to succeed and returns `data`.
async fn calculate_ok(body: Value) -> Value {
    let (status, json) = post_calculate(create_router_for_test(), body).await;
    assert_eq!(status, StatusCode::OK, "unexpected response: {json}");
    assert_eq!(json["success"], true);
    json["data"].clone()
}

// =============================================================================
// SECTION 1: Reference Scenarios
// =============================================================================

#[tokio::test]
async fn test_scenario_a_twelve_million() {
    let data = calculate_ok(json!({ "grossIncome": 12000000 })).await;

    assert_eq!(number(&data["grossIncome"]), decimal("12000000"));
    assert_eq!(number(&data["taxableIncome"]), decimal("12000000"));
    assert_eq!(number(&data["totalDeductions"]), decimal("0"));
    assert_eq!(number(&data["totalTax"]), decimal("1950000"));
    assert_eq!(number(&data["monthlyTax"]), decimal("162500"));
    assert_eq!(number(&data["effectiveRate"]), decimal("16.25"));

    let bands = data["taxBreakdown"].as_array().unwrap();
    assert_eq!(number(&bands[0]["tax"]), decimal("0"));
    assert_eq!(number(&bands[1]["tax"]), decimal("330000"));
    assert_eq!(number(&bands[2]["tax"]), decimal("1620000"));
    assert_eq!(number(&bands[3]["amount"]), decimal("0"));
}

#[tokio::test]
async fn test_scenario_b_first_band_only() {
    let data = calculate_ok(json!({ "grossIncome": 800000 })).await;

    assert_eq!(number(&data["totalTax"]), decimal("0"));
    assert_eq!(number(&data["monthlyTax"]), decimal("0"));
    assert_eq!(number(&data["effectiveRate"]), decimal("0"));
    assert_eq!(number(&data["taxBreakdown"][0]["amount"]), decimal("800000"));
}

#[tokio::test]
async fn test_scenario_c_top_band() {
    let data = calculate_ok(json!({ "grossIncome": 60000000 })).await;

    assert_eq!(number(&data["totalTax"]), decimal("12930000"));
    assert_eq!(number(&data["monthlyTax"]), decimal("1077500"));
    assert_eq!(number(&data["effectiveRate"]), decimal("21.55"));

    let top = &data["taxBreakdown"][5];
    assert_eq!(top["label"], "Above ₦50,000,000 @ 25%");
    assert_eq!(number(&top["amount"]), decimal("10000000"));
    assert_eq!(number(&top["tax"]), decimal("2500000"));
}

#[tokio::test]
async fn test_zero_income() {
    let data = calculate_ok(json!({ "grossIncome": 0 })).await;

    assert_eq!(number(&data["totalTax"]), decimal("0"));
    assert_eq!(number(&data["effectiveRate"]), decimal("0"));
    assert_eq!(data["taxBreakdown"].as_array().unwrap().len(), 6);
}

// =============================================================================
// SECTION 2: Deductions and Rent Relief
// =============================================================================

#[tokio::test]
async fn test_mixed_deductions() {
    let data = calculate_ok(json!({
        "grossIncome": 10000000,
        "pension": 800000,
        "nhf": 250000,
        "nhis": 150000,
        "annualRent": 1500000
    }))
    .await;

    let breakdown = &data["deductionsBreakdown"];
    assert_eq!(number(&breakdown["Pension Contribution"]), decimal("800000"));
    assert_eq!(number(&breakdown["NHF Contribution"]), decimal("250000"));
    assert_eq!(number(&breakdown["NHIS Contribution"]), decimal("150000"));
    assert_eq!(number(&breakdown["Rent Relief"]), decimal("300000"));
    assert_eq!(number(&breakdown["Interest on Loan"]), decimal("0"));
    assert_eq!(number(&breakdown["Life Insurance"]), decimal("0"));

    assert_eq!(number(&data["totalDeductions"]), decimal("1500000"));
    assert_eq!(number(&data["taxableIncome"]), decimal("8500000"));
    assert_eq!(number(&data["totalTax"]), decimal("1320000"));
    assert_eq!(number(&data["monthlyTax"]), decimal("110000"));
    assert_eq!(number(&data["effectiveRate"]), decimal("13.2"));
}

#[tokio::test]
async fn test_rent_relief_is_capped() {
    let data = calculate_ok(json!({ "grossIncome": 20000000, "annualRent": 10000000 })).await;

    assert_eq!(
        number(&data["deductionsBreakdown"]["Rent Relief"]),
        decimal("500000")
    );
    assert_eq!(number(&data["taxableIncome"]), decimal("19500000"));
    assert_eq!(number(&data["totalTax"]), decimal("3525000"));
    assert_eq!(number(&data["monthlyTax"]), decimal("293750"));
}

#[tokio::test]
async fn test_rent_relief_below_cap() {
    let data = calculate_ok(json!({ "grossIncome": 5000000, "annualRent": 1000000 })).await;

    assert_eq!(
        number(&data["deductionsBreakdown"]["Rent Relief"]),
        decimal("200000")
    );
}

#[tokio::test]
async fn test_deductions_exceeding_income_floor_taxable_at_zero() {
    let data = calculate_ok(json!({
        "grossIncome": 1000000,
        "pension": 600000,
        "lifeInsurance": 700000
    }))
    .await;

    assert_eq!(number(&data["totalDeductions"]), decimal("1300000"));
    assert_eq!(number(&data["taxableIncome"]), decimal("0"));
    assert_eq!(number(&data["totalTax"]), decimal("0"));
    assert_eq!(number(&data["effectiveRate"]), decimal("0"));
}

#[tokio::test]
async fn test_numeric_strings_and_nulls_are_accepted() {
    let data = calculate_ok(json!({
        "grossIncome": "12000000",
        "pension": null,
        "loanInterest": "0"
    }))
    .await;

    assert_eq!(number(&data["totalTax"]), decimal("1950000"));
}

// =============================================================================
// SECTION 3: Response Shape
// =============================================================================

#[tokio::test]
async fn test_band_labels_in_order() {
    let data = calculate_ok(json!({ "grossIncome": 1 })).await;

    let labels: Vec<&str> = data["taxBreakdown"]
        .as_array()
        .unwrap()
        .iter()
        .map(|line| line["label"].as_str().unwrap())
        .collect();

    assert_eq!(
        labels,
        vec![
            "First ₦800,000 @ 0%",
            "Next ₦2,200,000 @ 15%",
            "Next ₦9,000,000 @ 18%",
            "Next ₦13,000,000 @ 21%",
            "Next ₦25,000,000 @ 23%",
            "Above ₦50,000,000 @ 25%",
        ]
    );
}

#[tokio::test]
async fn test_bracket_sums_match_totals() {
    let data = calculate_ok(json!({ "grossIncome": 33333333, "annualRent": 777777 })).await;

    let bands = data["taxBreakdown"].as_array().unwrap();
    let amount_sum: Decimal = bands.iter().map(|b| number(&b["amount"])).sum();
    let tax_sum: Decimal = bands.iter().map(|b| number(&b["tax"])).sum();

    assert_eq!(amount_sum, number(&data["taxableIncome"]));
    assert_eq!(tax_sum, number(&data["totalTax"]));
}

#[tokio::test]
async fn test_identical_requests_give_identical_bodies() {
    let body = json!({ "grossIncome": 18500000, "nhis": 120000, "annualRent": 2400000 });

    let (_, first) = post_calculate(create_router_for_test(), body.clone()).await;
    let (_, second) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(first.to_string(), second.to_string());
}

#[tokio::test]
async fn test_rules_endpoint_reports_active_schedule() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .uri("/api/rules")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    let schedule = json["data"]["schedule"].as_array().unwrap();
    assert_eq!(number(&schedule[1]["lowerBound"]), decimal("800000"));
    assert_eq!(number(&schedule[5]["rate"]), decimal("0.25"));
    assert!(schedule[5]["width"].is_null());
    assert_eq!(number(&json["data"]["rentRelief"]["cap"]), decimal("500000"));
}

// =============================================================================
// SECTION 4: Classifier, Checklist and Readiness
// =============================================================================

#[tokio::test]
async fn test_classify_company_owner() {
    let (status, json) = post_json(
        create_router_for_test(),
        "/api/classify",
        json!({ "workType": "company", "incomeSource": "foreign" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["classification"], "Company Owner");

    let obligations: Vec<&str> = json["data"]["obligations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o.as_str().unwrap())
        .collect();
    assert!(obligations.iter().any(|o| o.starts_with("Foreign Income")));
    assert!(obligations.last().unwrap().starts_with("Record-Keeping Reminder"));
}

#[tokio::test]
async fn test_classify_ngo() {
    let (status, json) = post_json(
        create_router_for_test(),
        "/api/classify",
        json!({
            "workType": "ngo",
            "ngoTypes": ["cooperative"],
            "ngoIncome": ["sales"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["classification"], "Non-Profit Organisation");
    assert_eq!(
        json["data"]["obligations"][0],
        "Organisation Type: Cooperative society"
    );
}

#[tokio::test]
async fn test_assessment_all_yes() {
    let (status, json) = post_json(
        create_router_for_test(),
        "/api/assessment",
        json!({
            "hasTin": true,
            "keepsRecords": true,
            "filedLastYear": true,
            "understandsDeductions": true,
            "separatesBusinessPersonal": true
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["score"], 100);
    assert_eq!(json["data"]["level"], "High Readiness");
    assert!(json["data"]["advice"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_assessment_empty_body_is_low() {
    let (status, json) = post_json(create_router_for_test(), "/api/assessment", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["score"], 0);
    assert_eq!(json["data"]["level"], "Low Readiness");
}

#[tokio::test]
async fn test_checklist_for_each_category() {
    let expected = [
        ("salary-earner", "Salary Earner", 3),
        ("self-employed", "Self-Employed", 5),
        ("business-owner", "Business Owner", 6),
        ("mixed-income", "Mixed Income", 6),
        ("company-owner", "Company Owner", 8),
        ("non-profit", "Non-Profit Organisation", 7),
    ];

    for (id, label, count) in expected {
        let (status, json) =
            get_json(create_router_for_test(), &format!("/api/checklist?category={id}")).await;

        assert_eq!(status, StatusCode::OK, "category {id}");
        assert_eq!(json["data"]["category"], label);
        assert_eq!(json["data"]["items"].as_array().unwrap().len(), count);
        assert_eq!(json["data"]["progress"], 0);
    }
}

#[tokio::test]
async fn test_classification_feeds_checklist() {
    let (_, classified) = post_json(
        create_router_for_test(),
        "/api/classify",
        json!({ "workType": "business", "complexity": ["cac"] }),
    )
    .await;
    assert_eq!(classified["data"]["classification"], "Business Owner");

    let (status, json) = get_json(
        create_router_for_test(),
        "/api/checklist?category=business-owner&completed=tin-biz,cac,records-biz",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["category"], classified["data"]["classification"]);
    assert_eq!(json["data"]["completed"], json!(["tin-biz", "cac", "records-biz"]));
    assert_eq!(json["data"]["progress"], 50);
}

// =============================================================================
// SECTION 5: Error Cases
// =============================================================================

#[tokio::test]
async fn test_missing_gross_income() {
    let (status, json) = post_calculate(create_router_for_test(), json!({ "nhf": 5000 })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_non_numeric_field() {
    let (status, json) = post_calculate(
        create_router_for_test(),
        json!({ "grossIncome": 1000000, "nhis": "abc" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "INVALID_INPUT");
    assert!(json.get("data").is_none());
}

#[tokio::test]
async fn test_negative_field() {
    let (status, json) = post_calculate(
        create_router_for_test(),
        json!({ "grossIncome": -1 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"]["message"].as_str().unwrap().contains("grossIncome"));
}

#[tokio::test]
async fn test_array_body_is_rejected() {
    let (status, json) = post_calculate(create_router_for_test(), json!([1, 2, 3])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "INVALID_INPUT");

    let (status, json) = post_calculate(create_router_for_test(), json!([12000000])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json.get("data").is_none());
}

#[tokio::test]
async fn test_array_body_is_rejected_by_classifier_and_assessment() {
    for uri in ["/api/classify", "/api/assessment"] {
        let (status, json) = post_json(create_router_for_test(), uri, json!([true])).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json["error"]["code"], "INVALID_INPUT");
    }
}

#[tokio::test]
async fn test_amount_beyond_supported_range() {
    let (status, json) =
        post_calculate(create_router_for_test(), json!({ "grossIncome": 1e29 })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "INVALID_INPUT");
    assert!(
        json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("exceeds the supported range")
    );
}

#[tokio::test]
async fn test_unknown_checklist_category() {
    let (status, json) =
        get_json(create_router_for_test(), "/api/checklist?category=Salary%20Earner").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "INVALID_PROFILE");
}

#[tokio::test]
async fn test_unknown_profile_option() {
    let (status, json) = post_json(
        create_router_for_test(),
        "/api/classify",
        json!({ "workType": "salary", "incomeSource": "moon" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "INVALID_PROFILE");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .uri("/api/does-not-exist")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
