//! HTTP API tests
//!
//! The router runs against the in-memory stores, so these tests exercise
//! routing, extraction, authorization and error mapping end to end without
//! a database.

use std::sync::Arc;

use axum::body::Bytes;
use axum::http::{header, HeaderValue, StatusCode};
use axum_test::{TestRequest, TestServer};
use serde_json::{json, Value};

use domain_accounts::service::mock::PlaintextHasher;
use domain_accounts::{AccountPort, AccountService, AccountStatus, InMemoryAccountStore};
use domain_claims::ports::mock::{FailPoint, InMemoryLostFoundStore};
use domain_claims::ClaimLifecycleManager;
use interface_api::auth::{create_token, roles};
use interface_api::config::ApiConfig;
use interface_api::{create_router, AppState};
use test_utils::{assert_error_body, AccountFixtures, SignupFormBuilder};

const SECRET: &str = "api-test-secret";

struct Harness {
    server: TestServer,
    lost_found: InMemoryLostFoundStore,
    accounts: InMemoryAccountStore,
}

async fn harness() -> Harness {
    let config = ApiConfig {
        admin_email: Some(AccountFixtures::ADMIN_EMAIL.to_string()),
        admin_key: Some(AccountFixtures::ADMIN_KEY.to_string()),
        ..ApiConfig::default()
    };
    harness_with(config).await
}

/// Builds the router the way the server binary does, including the
/// administrator bootstrap
async fn harness_with(config: ApiConfig) -> Harness {
    let lost_found = InMemoryLostFoundStore::with_default_categories();
    let accounts = InMemoryAccountStore::new();

    let config = ApiConfig {
        jwt_secret: SECRET.to_string(),
        ..config
    };
    let state = AppState::new(
        config,
        ClaimLifecycleManager::new(Arc::new(lost_found.clone())),
        AccountService::new(Arc::new(accounts.clone()), Arc::new(PlaintextHasher)),
    );
    state.provision_admin().await.unwrap();

    Harness {
        server: TestServer::new(create_router(state)).unwrap(),
        lost_found,
        accounts,
    }
}

fn bearer(request: TestRequest, token: &str) -> TestRequest {
    request.add_header(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    )
}

fn admin_token() -> String {
    create_token("admin:1", vec![roles::ADMIN.to_string()], SECRET, 300).unwrap()
}

fn user_token() -> String {
    create_token("1", vec![roles::USER.to_string()], SECRET, 300).unwrap()
}

fn backpack() -> Value {
    json!({
        "itemName": "Blue Backpack",
        "categoryId": 2,
        "description": "Navy blue backpack with a laptop sleeve",
        "location": "Library",
        "dateFound": "2024-03-01"
    })
}

async fn report_backpack(server: &TestServer) -> i64 {
    let response = server.post("/api/report-found-item").json(&backpack()).await;
    response.assert_status_ok();
    response.json::<Value>()["reportId"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health_endpoints() {
    let h = harness().await;

    let response = h.server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "healthy");

    let response = h.server.get("/health/ready").await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["adapters"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let h = harness().await;
    let response = h.server.get("/api/categories").await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_categories_are_listed_in_order() {
    let h = harness().await;
    let body = h.server.get("/api/categories").await.json::<Value>();

    assert_eq!(body.as_array().unwrap().len(), 6);
    assert_eq!(body[1], json!({ "id": 2, "name": "Bags" }));
}

#[tokio::test]
async fn test_blue_backpack_end_to_end() {
    let h = harness().await;
    let report_id = report_backpack(&h.server).await;
    assert!(report_id > 0);

    let unclaimed = h.server.get("/api/found-unclaimed-items").await.json::<Value>();
    assert_eq!(unclaimed[0]["itemName"], "Blue Backpack");
    assert_eq!(unclaimed[0]["categoryName"], "Bags");
    assert_eq!(unclaimed[0]["location"], "Library");
    assert_eq!(unclaimed[0]["date"], "2024-03-01");
    assert_eq!(unclaimed[0]["isClaimed"], false);

    let response = h
        .server
        .post("/api/submit-claim")
        .json(&json!({ "reportID": report_id, "reason": "  It has my student card  " }))
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["success"], true);
    assert!(body["claimId"].as_i64().unwrap() > 0);

    let claims = bearer(h.server.get("/api/claims"), &admin_token()).await.json::<Value>();
    assert_eq!(claims[0]["state"], "Pending");
    assert_eq!(claims[0]["reason"], "It has my student card");

    let response = bearer(h.server.post("/api/claims/accept"), &admin_token())
        .json(&json!({ "reportId": report_id }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["state"], "Approved");

    let claimed = h.server.get("/api/found-claimed-items").await.json::<Value>();
    assert_eq!(claimed[0]["id"], report_id);
    assert_eq!(claimed[0]["isClaimed"], true);
    assert!(h
        .server
        .get("/api/found-unclaimed-items")
        .await
        .json::<Value>()
        .as_array()
        .unwrap()
        .is_empty());

    let response = h
        .server
        .post("/api/submit-claim")
        .json(&json!({ "reportID": report_id, "reason": "mine too" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_error_body(&response.json::<Value>(), "conflict");
}

#[tokio::test]
async fn test_second_decision_is_conflict() {
    let h = harness().await;
    let report_id = report_backpack(&h.server).await;
    h.server
        .post("/api/submit-claim")
        .json(&json!({ "reportID": report_id, "reason": "mine" }))
        .await
        .assert_status_ok();

    bearer(h.server.post("/api/claims/reject"), &admin_token())
        .json(&json!({ "reportId": report_id }))
        .await
        .assert_status_ok();

    let response = bearer(h.server.post("/api/claims/accept"), &admin_token())
        .json(&json!({ "reportId": report_id }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_error_body(&response.json::<Value>(), "conflict");

    let unclaimed = h.server.get("/api/found-unclaimed-items").await.json::<Value>();
    assert_eq!(unclaimed[0]["isClaimed"], false);
}

#[tokio::test]
async fn test_decision_without_claims_is_not_found() {
    let h = harness().await;
    let report_id = report_backpack(&h.server).await;

    let response = bearer(h.server.post("/api/claims/accept"), &admin_token())
        .json(&json!({ "reportId": report_id }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_error_body(&response.json::<Value>(), "not_found");
}

#[tokio::test]
async fn test_submit_claim_rejects_invalid_report_ids() {
    let h = harness().await;

    for raw in [json!(0), json!(-5), json!("abc"), json!(""), json!(2.5), Value::Null] {
        let response = h
            .server
            .post("/api/submit-claim")
            .json(&json!({ "reportID": raw, "reason": "mine" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_error_body(&response.json::<Value>(), "bad_request");
    }
}

#[tokio::test]
async fn test_submit_claim_edge_cases() {
    let h = harness().await;

    let response = h
        .server
        .post("/api/submit-claim")
        .json(&json!({ "reportID": 999_999, "reason": "mine" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let report_id = report_backpack(&h.server).await;
    let response = h
        .server
        .post("/api/submit-claim")
        .json(&json!({ "reportID": report_id.to_string(), "reason": "   " }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    h.server
        .post("/api/submit-claim")
        .json(&json!({ "reportID": report_id as f64, "reason": "first" }))
        .await
        .assert_status_ok();
    h.server
        .post("/api/submit-claim")
        .json(&json!({ "reportID": report_id, "reason": "second" }))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let h = harness().await;

    let response = h
        .server
        .post("/api/submit-claim")
        .content_type("application/json")
        .bytes(Bytes::from_static(b"{\"reportID\": 1,"))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error_body(&response.json::<Value>(), "bad_request");

    let response = h
        .server
        .post("/api/signup")
        .json(&json!({ "fullName": "No Email" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_report_item_validation() {
    let h = harness().await;

    let mut missing_name = backpack();
    missing_name["itemName"] = json!("  ");
    h.server
        .post("/api/report-found-item")
        .json(&missing_name)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let mut bad_date = backpack();
    bad_date["dateFound"] = json!("yesterday");
    h.server
        .post("/api/report-found-item")
        .json(&bad_date)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let mut unknown_category = backpack();
    unknown_category["categoryId"] = json!(404);
    let response = h.server.post("/api/report-found-item").json(&unknown_category).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_error_body(&response.json::<Value>(), "not_found");
}

#[tokio::test]
async fn test_store_failure_is_generic_500() {
    let h = harness().await;
    h.lost_found.fail_next(FailPoint::InsertReport);

    let response = h.server.post("/api/report-found-item").json(&backpack()).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert_error_body(&body, "internal_error");
    assert!(!body["message"].as_str().unwrap().contains("injected"));

    assert!(h
        .server
        .get("/api/found-unclaimed-items")
        .await
        .json::<Value>()
        .as_array()
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_admin_routes_require_admin_token() {
    let h = harness().await;

    let response = h.server.get("/api/claims").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_error_body(&response.json::<Value>(), "unauthorized");

    bearer(h.server.get("/api/users/summary"), "not-a-jwt")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let forged = create_token("admin:1", vec![roles::ADMIN.to_string()], "other-secret", 300).unwrap();
    bearer(h.server.get("/api/found-items"), &forged)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let response = bearer(h.server.get("/api/reviews/summary"), &user_token()).await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_error_body(&response.json::<Value>(), "forbidden");

    bearer(h.server.get("/api/reviews/summary"), &admin_token())
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let h = harness().await;
    h.server
        .get("/api/does-not-exist")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_login_issues_working_token() {
    let h = harness().await;

    let response = h
        .server
        .post("/api/admin/login")
        .json(&json!({
            "email": AccountFixtures::ADMIN_EMAIL,
            "adminkey": AccountFixtures::ADMIN_KEY
        }))
        .await;
    response.assert_status_ok();
    let token = response.json::<Value>()["token"].as_str().unwrap().to_string();

    bearer(h.server.get("/api/found-items"), &token)
        .await
        .assert_status_ok();

    let response = h
        .server
        .post("/api/admin/login")
        .json(&json!({ "email": AccountFixtures::ADMIN_EMAIL, "adminkey": "wrong" }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_error_body(&response.json::<Value>(), "forbidden");
}

#[tokio::test]
async fn test_admin_bootstrap_opens_claim_decisions() {
    let h = harness().await;
    let report_id = report_backpack(&h.server).await;
    h.server
        .post("/api/submit-claim")
        .json(&json!({ "reportID": report_id, "reason": "My initials are on the tag" }))
        .await
        .assert_status_ok();

    let stored = h.accounts.find_admin_by_email(AccountFixtures::ADMIN_EMAIL).await.unwrap();
    assert!(stored.is_some_and(|admin| admin.key_hash != AccountFixtures::ADMIN_KEY));

    let response = h
        .server
        .post("/api/admin/login")
        .json(&json!({
            "email": AccountFixtures::ADMIN_EMAIL,
            "adminkey": AccountFixtures::ADMIN_KEY
        }))
        .await;
    response.assert_status_ok();
    let token = response.json::<Value>()["token"].as_str().unwrap().to_string();

    let response = bearer(h.server.post("/api/claims/accept"), &token)
        .json(&json!({ "reportId": report_id }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["state"], "Approved");
}

#[tokio::test]
async fn test_without_admin_config_admin_login_is_refused() {
    let h = harness_with(ApiConfig::default()).await;

    assert!(h
        .accounts
        .find_admin_by_email(AccountFixtures::ADMIN_EMAIL)
        .await
        .unwrap()
        .is_none());

    let response = h
        .server
        .post("/api/admin/login")
        .json(&json!({
            "email": AccountFixtures::ADMIN_EMAIL,
            "adminkey": AccountFixtures::ADMIN_KEY
        }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_error_body(&response.json::<Value>(), "forbidden");
}

#[tokio::test]
async fn test_signup_and_login_round_trip() {
    let h = harness().await;
    let signup = SignupFormBuilder::new().with_email("Jane.Doe@Example.com").build_json();

    let response = h.server.post("/api/signup").json(&signup).await;
    response.assert_status_ok();
    let user_id = response.json::<Value>()["userId"].as_i64().unwrap();

    h.server
        .post("/api/signup")
        .json(&signup)
        .await
        .assert_status(StatusCode::CONFLICT);

    let response = h
        .server
        .post("/api/login")
        .json(&json!({ "email": "jane.doe@example.com", "password": AccountFixtures::PASSWORD }))
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["userId"], user_id);
    assert!(!body["token"].as_str().unwrap().is_empty());

    let response = h
        .server
        .post("/api/login")
        .json(&json!({ "email": "jane.doe@example.com", "password": "wrong password" }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["message"], "Invalid email or password");

    let users = bearer(h.server.get("/api/users/summary"), &admin_token()).await.json::<Value>();
    assert_eq!(users[0]["email"], "jane.doe@example.com");
    assert!(users[0].get("password").is_none());
    assert!(users[0].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_suspended_account_cannot_log_in() {
    let h = harness().await;
    let response = h
        .server
        .post("/api/signup")
        .json(&SignupFormBuilder::new().build_json())
        .await;
    let user_id = response.json::<Value>()["userId"].as_i64().unwrap();
    h.accounts
        .set_status(core_kernel::UserId::new(user_id).unwrap(), AccountStatus::Suspended)
        .await
        .unwrap();

    let response = h
        .server
        .post("/api/login")
        .json(&json!({
            "email": AccountFixtures::signup_form().email,
            "password": AccountFixtures::PASSWORD
        }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["message"], "Account is not active");
}

#[tokio::test]
async fn test_signup_validation() {
    let h = harness().await;

    let short_password = SignupFormBuilder::new().with_password("short").build_json();
    h.server
        .post("/api/signup")
        .json(&short_password)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let bad_email = SignupFormBuilder::new().with_email("not-an-email").build_json();
    h.server
        .post("/api/signup")
        .json(&bad_email)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_feedback_rating_bounds_and_authors() {
    let h = harness().await;

    for rating in [0, 6, -1] {
        h.server
            .post("/api/submit-feedback")
            .json(&json!({ "rating": rating, "comments": "ok" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
    h.server
        .post("/api/submit-feedback")
        .json(&json!({ "rating": 3, "comments": "  " }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    h.server
        .post("/api/submit-feedback")
        .json(&json!({ "rating": 3, "comments": "ok", "email": "nobody@example.com" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    h.server
        .post("/api/signup")
        .json(&SignupFormBuilder::new().build_json())
        .await
        .assert_status_ok();

    for rating in [1, 5] {
        h.server
            .post("/api/submit-feedback")
            .json(&json!({
                "rating": rating,
                "comments": "Found my keys",
                "email": AccountFixtures::signup_form().email
            }))
            .await
            .assert_status_ok();
    }
    h.server
        .post("/api/submit-feedback")
        .json(&json!({ "rating": "4", "comments": "anonymous praise" }))
        .await
        .assert_status_ok();

    let reviews = bearer(h.server.get("/api/reviews/summary"), &admin_token()).await.json::<Value>();
    let reviews = reviews.as_array().unwrap();
    assert_eq!(reviews.len(), 3);
    let named = reviews.iter().filter(|r| r["authorName"] == "Jane Doe").count();
    assert_eq!(named, 2);
}

#[tokio::test]
async fn test_claim_item_marks_report_claimed() {
    let h = harness().await;
    let report_id = report_backpack(&h.server).await;

    let response = h
        .server
        .post("/api/claim-item")
        .json(&json!({ "itemId": report_id, "claimantInfo": "Jane Doe, 555-0100" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["success"], true);

    h.server
        .post("/api/claim-item")
        .json(&json!({ "itemId": report_id, "claimantInfo": "Someone else" }))
        .await
        .assert_status(StatusCode::CONFLICT);

    h.server
        .post("/api/claim-item")
        .json(&json!({ "itemId": report_id, "claimantInfo": "" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_lost_report_lifecycle() {
    let h = harness().await;

    let response = h
        .server
        .post("/api/report-lost-item")
        .json(&json!({
            "itemName": "Black Phone",
            "categoryId": "1",
            "description": "Cracked screen, red case",
            "imageUrl": "https://img.example.com/phone.jpg",
            "location": "Cafeteria",
            "dateLost": "2024-02-28T09:30:00Z"
        }))
        .await;
    response.assert_status_ok();
    let report_id = response.json::<Value>()["reportId"].as_i64().unwrap();

    let lost = h.server.get("/api/lost-items").await.json::<Value>();
    assert_eq!(lost[0]["date"], "2024-02-28");
    assert_eq!(lost[0]["imageUrl"], "https://img.example.com/phone.jpg");

    h.server
        .post("/api/submit-claim")
        .json(&json!({ "reportID": report_id, "reason": "mine" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let path = format!("/api/lost-items/{}", report_id);
    h.server.delete(&path).await.assert_status(StatusCode::UNAUTHORIZED);
    bearer(h.server.delete(&path), &admin_token()).await.assert_status_ok();
    bearer(h.server.delete(&path), &admin_token())
        .await
        .assert_status(StatusCode::NOT_FOUND);
    bearer(h.server.delete("/api/lost-items/abc"), &admin_token())
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert!(h
        .server
        .get("/api/lost-items")
        .await
        .json::<Value>()
        .as_array()
        .unwrap()
        .is_empty());
}
