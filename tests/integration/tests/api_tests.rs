//! API Integration Tests
//!
//! Spawn the Axum app on an ephemeral port over the in-memory backends and
//! exercise every route through a real HTTP client.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_data, assert_error, assert_status, club_body, invite_body, invite_token, seed_club,
    seed_invite, seed_person, sign_in, signup_body, unique_email, unique_subdomain, FailPoint,
    TestApp, TestServer,
};
use club_common::RateLimitConfig;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();
    let server = TestServer::start(&app).await.expect("Failed to start server");

    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready_reports_database() {
    let app = TestApp::new();

    let server = TestServer::start(&app).await.unwrap();
    let response = server.get("/health/ready").await.unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");

    let server = TestServer::start_with_readiness(&app, false).await.unwrap();
    let response = server.get("/health/ready").await.unwrap();
    assert_status(response, StatusCode::SERVICE_UNAVAILABLE)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = TestApp::new();
    let server = TestServer::start(&app).await.unwrap();

    let response = server.get("/health").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_cors_preflight_is_answered() {
    let app = TestApp::new();
    let server = TestServer::start(&app).await.unwrap();

    let response = server
        .client
        .request(Method::OPTIONS, format!("{}/clubs/invite", server.base_url()))
        .header("Origin", "https://members.example.com")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "authorization,content-type")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn test_rate_limited_requests_get_failure_envelope() {
    let app = TestApp::new();
    let limits = RateLimitConfig {
        requests_per_second: 1,
        burst: 1,
    };
    let server = TestServer::start_rate_limited(&app, &limits).await.unwrap();

    let first = server.get("/clubs").await.unwrap();
    assert_ne!(first.status(), StatusCode::TOO_MANY_REQUESTS);

    let second = server.get("/clubs").await.unwrap();
    let code = assert_error(second, StatusCode::TOO_MANY_REQUESTS)
        .await
        .unwrap();
    assert_eq!(code, "RATE_LIMITED");
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_mutations_require_bearer_token() {
    let app = TestApp::new();
    let server = TestServer::start(&app).await.unwrap();

    let response = server.post("/clubs", &club_body("nobody")).await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_AUTHORIZATION");

    let response = server
        .post_auth("/clubs/join", "forged-token", &json!({}))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_SESSION");
}

// ============================================================================
// Signup
// ============================================================================

#[tokio::test]
async fn test_signup_with_club() {
    let app = TestApp::new();
    let server = TestServer::start(&app).await.unwrap();
    let subdomain = unique_subdomain();

    let response = server
        .post(
            "/signup",
            &signup_body(&unique_email("ann"), Some(("Harbor Rowing", &subdomain))),
        )
        .await
        .unwrap();
    let data: Value = assert_data(response, StatusCode::OK).await.unwrap();

    assert_eq!(data["user"]["name"], "Ann Lee");
    assert_eq!(data["club"]["subdomain"], subdomain.as_str());
    assert_eq!(data["club"]["is_owner"], true);
}

#[tokio::test]
async fn test_signup_conflict_and_missing_fields() {
    let app = TestApp::new();
    let server = TestServer::start(&app).await.unwrap();
    let email = unique_email("ann");

    let response = server.post("/signup", &signup_body(&email, None)).await.unwrap();
    let data: Value = assert_data(response, StatusCode::OK).await.unwrap();
    assert!(data.get("club").is_none());

    let response = server.post("/signup", &signup_body(&email, None)).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "EMAIL_ALREADY_EXISTS");

    let response = server
        .post("/signup", &json!({ "email": unique_email("x") }))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "MISSING_FIELD");
}

// ============================================================================
// Clubs
// ============================================================================

#[tokio::test]
async fn test_create_and_fetch_club() {
    let app = TestApp::new();
    let server = TestServer::start(&app).await.unwrap();
    let owner = seed_person(&app, "Uma");
    let subdomain = unique_subdomain();

    let response = server
        .post_auth("/clubs", &owner.token, &club_body(&subdomain))
        .await
        .unwrap();
    let created: Value = assert_data(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created["subdomain"], subdomain.as_str());
    assert_eq!(created["onboarding_completed"], false);

    let response = server
        .get_auth(&format!("/clubs/by-subdomain/{subdomain}"), &owner.token)
        .await
        .unwrap();
    let fetched: Value = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched["id"], created["id"]);

    let response = server.get_auth("/clubs", &owner.token).await.unwrap();
    let mine: Vec<Value> = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(mine.len(), 1);

    let response = server
        .post_auth("/clubs", &owner.token, &club_body(&subdomain))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "SUBDOMAIN_TAKEN");
}

#[tokio::test]
async fn test_create_club_rollback_over_http() {
    let app = TestApp::new();
    let server = TestServer::start(&app).await.unwrap();
    let owner = seed_person(&app, "Uma");
    app.store.fail(FailPoint::UpdateUser);

    let response = server
        .post_auth("/clubs", &owner.token, &club_body(&unique_subdomain()))
        .await
        .unwrap();
    assert_error(response, StatusCode::INTERNAL_SERVER_ERROR)
        .await
        .unwrap();

    assert!(app.store.clubs().is_empty());
    assert!(app.store.members().is_empty());
}

#[tokio::test]
async fn test_update_club_owner_only() {
    let app = TestApp::new();
    let server = TestServer::start(&app).await.unwrap();
    let owner = seed_person(&app, "Uma");
    let club = seed_club(&app, &owner).await;
    let stranger = seed_person(&app, "Out");
    let path = format!("/clubs/{}", club.id);

    let response = server
        .put_auth(&path, &stranger.token, &json!({ "city": "Ogdenville" }))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_CLUB_OWNER");

    let response = server
        .put_auth(&path, &owner.token, &json!({ "city": "Ogdenville" }))
        .await
        .unwrap();
    let updated: Value = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated["city"], "Ogdenville");

    let response = server
        .put_auth("/clubs/not-a-uuid", &owner.token, &json!({}))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_PATH_PARAMETER");
}

#[tokio::test]
async fn test_invalid_body_is_rejected() {
    let app = TestApp::new();
    let server = TestServer::start(&app).await.unwrap();
    let owner = seed_person(&app, "Uma");

    let response = server
        .post_auth("/clubs", &owner.token, &json!({ "name": 42 }))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_BODY");

    let response = server
        .post_auth(
            "/clubs",
            &owner.token,
            &json!({ "name": "x".repeat(101), "subdomain": "long" }),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
}

// ============================================================================
// Invites
// ============================================================================

#[tokio::test]
async fn test_invite_then_confirm() {
    let app = TestApp::new();
    let server = TestServer::start(&app).await.unwrap();
    let owner = seed_person(&app, "Uma");
    let club = seed_club(&app, &owner).await;
    let email = unique_email("sam");

    let response = server
        .post_auth("/clubs/invite", &owner.token, &invite_body(club.id, &email))
        .await
        .unwrap();
    let member: Value = assert_data(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(member["membership_status"], "pending");

    let response = server
        .post_auth("/clubs/invite", &owner.token, &invite_body(club.id, &email))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "ALREADY_MEMBER");

    let member_id = member["id"].as_str().unwrap().parse().unwrap();
    let user_id = member["user_id"].as_str().unwrap().parse().unwrap();
    let token = invite_token(&app, member_id);
    let invitee = sign_in(&app, user_id, &email);
    let intruder = seed_person(&app, "Mal");

    let response = server
        .post_auth("/clubs/confirm-invite", &intruder.token, &json!({ "token": token }))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "EMAIL_MISMATCH");

    let response = server
        .post_auth("/clubs/confirm-invite", &invitee.token, &json!({ "token": token }))
        .await
        .unwrap();
    let confirmed: Value = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(confirmed["membership_status"], "active");

    let response = server
        .post_auth("/clubs/confirm-invite", &invitee.token, &json!({ "token": token }))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "ALREADY_ACTIVE");
}

#[tokio::test]
async fn test_confirm_unknown_token() {
    let app = TestApp::new();
    let server = TestServer::start(&app).await.unwrap();
    let caller = seed_person(&app, "Pat");

    let response = server
        .post_auth(
            "/clubs/confirm-invite",
            &caller.token,
            &json!({ "token": uuid::Uuid::new_v4().to_string() }),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_INVITE");
}

#[tokio::test]
async fn test_bulk_invite_partial_success() {
    let app = TestApp::new();
    let server = TestServer::start(&app).await.unwrap();
    let owner = seed_person(&app, "Uma");
    let club = seed_club(&app, &owner).await;

    let body = json!({
        "club_id": club.id.to_string(),
        "members": [
            { "email": unique_email("a"), "first_name": "A", "last_name": "One" },
            { "email": "broken@", "first_name": "B", "last_name": "Two" },
            { "email": unique_email("c"), "first_name": "C", "last_name": "Three" },
        ],
    });
    let response = server
        .post_auth("/clubs/bulk-invite", &owner.token, &body)
        .await
        .unwrap();
    let data: Value = assert_data(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(data["successful"].as_array().unwrap().len(), 2);
    assert_eq!(data["failed"].as_array().unwrap().len(), 1);
    assert_eq!(data["failed"][0]["email"], "broken@");

    let response = server
        .post_auth(
            "/clubs/bulk-invite",
            &owner.token,
            &json!({ "club_id": club.id.to_string(), "members": [] }),
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_onboarding_route() {
    let app = TestApp::new();
    let server = TestServer::start(&app).await.unwrap();
    let owner = seed_person(&app, "Uma");
    let club = seed_club(&app, &owner).await;
    let email = unique_email("onb");
    let member = seed_invite(&app, &owner, &club, &email).await;
    let invitee = sign_in(&app, member.user_id.unwrap(), &email);

    let response = server
        .post_auth(
            "/clubs/onboarding",
            &invitee.token,
            &json!({
                "invite_token": invite_token(&app, member.id),
                "first_name": "Joanna",
                "last_name": "Doe",
                "phone": "(555) 444-5555",
            }),
        )
        .await
        .unwrap();
    let data: Value = assert_data(response, StatusCode::OK).await.unwrap();

    assert_eq!(data["membership_status"], "active");
    assert_eq!(data["first_name"], "Joanna");
    assert_eq!(app.store.outbox().len(), 1);
}

// ============================================================================
// Members
// ============================================================================

#[tokio::test]
async fn test_join_and_list_members() {
    let app = TestApp::new();
    let server = TestServer::start(&app).await.unwrap();
    let owner = seed_person(&app, "Uma");
    let club = seed_club(&app, &owner).await;
    let joiner = seed_person(&app, "Jay");

    let response = server
        .post_auth(
            "/clubs/join",
            &joiner.token,
            &json!({ "club_id": club.id.to_string() }),
        )
        .await
        .unwrap();
    let member: Value = assert_data(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(member["membership_status"], "pending");
    assert_eq!(member["member_type"], "individual");

    let response = server
        .post_auth(
            "/clubs/join",
            &joiner.token,
            &json!({ "club_id": club.id.to_string() }),
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::CONFLICT).await.unwrap();

    let path = format!("/clubs/{}/members", club.id);
    let response = server.get_auth(&path, &owner.token).await.unwrap();
    let members: Vec<Value> = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(members.len(), 2);

    // a pending member cannot list the roster yet
    let response = server.get_auth(&path, &joiner.token).await.unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NO_CLUB_ACCESS");
}
