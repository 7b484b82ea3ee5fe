use axum::http::StatusCode;
use serde_json::{Value, json};

use athenaeum_domain::user::UserRole;
use athenaeum_testing::auth::MockAuth;

use crate::helpers::{
    TEST_PASSWORD, available_copies, seed_book, seed_user, test_server, test_state,
};

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_answer_health_checks_without_token() {
    let state = test_state().await;
    let server = test_server(&state);

    server.get("/healthz").await.assert_status_ok();
    server.get("/readyz").await.assert_status_ok();
}

#[tokio::test]
async fn should_echo_generated_request_id() {
    let state = test_state().await;
    let server = test_server(&state);

    let res = server.get("/healthz").await;
    assert!(res.headers().contains_key("x-request-id"));
}

// ── Auth ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_requests_without_bearer_token() {
    let state = test_state().await;
    let server = test_server(&state);

    let res = server.get("/api/books").await;
    res.assert_status(StatusCode::UNAUTHORIZED);

    let res = server
        .get("/api/books")
        .authorization_bearer("not-a-jwt")
        .await;
    res.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_sign_up_then_sign_in_with_same_credentials() {
    let state = test_state().await;
    let server = test_server(&state);

    let res = server
        .post("/api/auth/sign-up")
        .json(&json!({
            "username": "reader01",
            "email": "reader01@example.com",
            "password": "hunter22"
        }))
        .await;
    res.assert_status(StatusCode::CREATED);
    let body: Value = res.json();
    assert_eq!(body["tokenType"], "Bearer");
    assert_eq!(body["user"]["role"], "ROLE_USER");
    assert!(body.get("password").is_none());

    let res = server
        .post("/api/auth/sign-in")
        .json(&json!({ "username": "reader01", "password": "hunter22" }))
        .await;
    res.assert_status_ok();
    let token = res.json::<Value>()["accessToken"]
        .as_str()
        .unwrap()
        .to_owned();

    server
        .get("/api/books")
        .authorization_bearer(token)
        .await
        .assert_status_ok();

    let res = server
        .post("/api/auth/sign-in")
        .json(&json!({ "username": "reader01", "password": "wrong-one" }))
        .await;
    res.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(res.json::<Value>()["kind"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn should_conflict_on_duplicate_sign_up() {
    let state = test_state().await;
    seed_user(&state, "reader01", UserRole::User).await;
    let server = test_server(&state);

    let res = server
        .post("/api/auth/sign-up")
        .json(&json!({
            "username": "reader01",
            "email": "someone@example.com",
            "password": TEST_PASSWORD
        }))
        .await;
    res.assert_status(StatusCode::CONFLICT);
    assert_eq!(res.json::<Value>()["kind"], "USER_ALREADY_EXISTS");
}

// ── Roles ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_forbid_plain_user_from_catalog_writes() {
    let state = test_state().await;
    let server = test_server(&state);
    let (name, value) = MockAuth::user(1).header();

    let res = server
        .post("/api/books")
        .add_header(name, value)
        .json(&json!({
            "title": "Dune",
            "description": "Spice",
            "availableCopies": 1,
            "totalCopies": 1
        }))
        .await;
    res.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(res.json::<Value>()["kind"], "FORBIDDEN");
}

#[tokio::test]
async fn should_restrict_user_admin_to_admins() {
    let state = test_state().await;
    let server = test_server(&state);

    let (name, value) = MockAuth::moderator(1).header();
    server
        .get("/api/users")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let (name, value) = MockAuth::admin(1).header();
    server
        .get("/api/users")
        .add_header(name, value)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn should_forbid_loaning_on_behalf_of_another_user() {
    let state = test_state().await;
    let owner = seed_user(&state, "reader01", UserRole::User).await;
    let book = seed_book(&state, "Dune", 1, 1).await;
    let server = test_server(&state);
    let (name, value) = MockAuth::user(owner.id + 1).header();

    let res = server
        .post("/api/loans/loan")
        .add_header(name, value)
        .add_query_param("userId", owner.id)
        .add_query_param("bookId", book.id)
        .add_query_param("loanTime", 7)
        .await;
    res.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(available_copies(&state, book.id).await, 1);
}

#[tokio::test]
async fn should_forbid_returning_another_users_loan() {
    let state = test_state().await;
    let owner = seed_user(&state, "reader01", UserRole::User).await;
    let book = seed_book(&state, "Dune", 1, 1).await;
    let server = test_server(&state);
    let (name, value) = MockAuth::user(owner.id).header();

    let res = server
        .post("/api/loans/loan")
        .add_header(name, value)
        .add_query_param("userId", owner.id)
        .add_query_param("bookId", book.id)
        .add_query_param("loanTime", 7)
        .await;
    res.assert_status(StatusCode::CREATED);
    let loan_id = res.json::<Value>()["loanId"].as_i64().unwrap();

    let (name, value) = MockAuth::user(owner.id + 1).header();
    let res = server
        .post(&format!("/api/loans/return/{loan_id}"))
        .add_header(name, value)
        .await;
    res.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(available_copies(&state, book.id).await, 0);

    let (name, value) = MockAuth::moderator(owner.id + 1).header();
    let res = server
        .post(&format!("/api/loans/return/{loan_id}"))
        .add_header(name, value)
        .await;
    res.assert_status_ok();
    assert!(res.json::<bool>());
    assert_eq!(available_copies(&state, book.id).await, 1);
}

#[tokio::test]
async fn should_forbid_cancelling_another_users_reservation() {
    let state = test_state().await;
    let owner = seed_user(&state, "reader01", UserRole::User).await;
    let book = seed_book(&state, "Dune", 1, 1).await;
    let server = test_server(&state);
    let (owner_name, owner_value) = MockAuth::user(owner.id).header();

    let res = server
        .post("/api/reservations/reserve")
        .add_header(owner_name.clone(), owner_value.clone())
        .add_query_param("userId", owner.id)
        .add_query_param("bookId", book.id)
        .await;
    res.assert_status(StatusCode::CREATED);
    let id = res.json::<Value>()["reservationId"].as_i64().unwrap();

    let (name, value) = MockAuth::user(owner.id + 1).header();
    let res = server
        .delete(&format!("/api/reservations/cancel/{id}"))
        .add_header(name, value)
        .await;
    res.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(res.json::<Value>()["kind"], "FORBIDDEN");

    let res = server
        .get(&format!("/api/reservations/user/{}", owner.id))
        .add_header(owner_name, owner_value)
        .await;
    res.assert_status_ok();
    assert_eq!(res.json::<Vec<Value>>().len(), 1);

    let (name, value) = MockAuth::moderator(owner.id + 1).header();
    server
        .delete(&format!("/api/reservations/cancel/{id}"))
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn should_report_missing_loan_before_ownership() {
    let state = test_state().await;
    let server = test_server(&state);
    let (name, value) = MockAuth::user(1).header();

    let res = server
        .post("/api/loans/return/999")
        .add_header(name, value)
        .await;
    res.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>()["kind"], "LOAN_NOT_FOUND");
}

// ── Malformed input ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_malformed_query_with_error_body() {
    let state = test_state().await;
    let server = test_server(&state);
    let (name, value) = MockAuth::user(1).header();

    let res = server
        .post("/api/loans/loan")
        .add_header(name.clone(), value.clone())
        .add_query_param("userId", "abc")
        .add_query_param("bookId", 1)
        .add_query_param("loanTime", 7)
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>()["kind"], "VALIDATION_FAILED");

    let res = server
        .post("/api/reservations/reserve")
        .add_header(name.clone(), value.clone())
        .add_query_param("userId", 1)
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>()["kind"], "VALIDATION_FAILED");

    let res = server
        .get("/api/books/search/available")
        .add_header(name, value)
        .add_query_param("min", "one")
        .add_query_param("max", 3)
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>()["kind"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn should_reject_non_numeric_path_id_with_error_body() {
    let state = test_state().await;
    let server = test_server(&state);
    let (name, value) = MockAuth::user(1).header();

    let res = server
        .get("/api/books/abc")
        .add_header(name, value)
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["kind"], "VALIDATION_FAILED");
    assert!(body["message"].is_string());
}

// ── Books ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_fetch_and_delete_book() {
    let state = test_state().await;
    let server = test_server(&state);
    let (name, value) = MockAuth::moderator(1).header();

    let res = server
        .post("/api/books")
        .add_header(name.clone(), value.clone())
        .json(&json!({
            "title": "Dune",
            "description": "Spice",
            "availableCopies": 2,
            "totalCopies": 3
        }))
        .await;
    res.assert_status(StatusCode::CREATED);
    let created: Value = res.json();
    let id = created["bookId"].as_i64().unwrap();

    let res = server
        .get(&format!("/api/books/{id}"))
        .add_header(name.clone(), value.clone())
        .await;
    res.assert_status_ok();
    assert_eq!(res.json::<Value>(), created);

    server
        .delete(&format!("/api/books/{id}"))
        .add_header(name.clone(), value.clone())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let res = server
        .get(&format!("/api/books/{id}"))
        .add_header(name, value)
        .await;
    res.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>()["kind"], "BOOK_NOT_FOUND");
}

#[tokio::test]
async fn should_reject_more_available_than_total_copies() {
    let state = test_state().await;
    let server = test_server(&state);
    let (name, value) = MockAuth::moderator(1).header();

    let res = server
        .post("/api/books")
        .add_header(name, value)
        .json(&json!({
            "title": "Dune",
            "description": "Spice",
            "availableCopies": 4,
            "totalCopies": 3
        }))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>()["kind"], "INVALID_COPIES");
}

#[tokio::test]
async fn should_search_books_by_title_over_http() {
    let state = test_state().await;
    seed_book(&state, "The Dispossessed", 1, 1).await;
    seed_book(&state, "Dune", 1, 1).await;
    let server = test_server(&state);
    let (name, value) = MockAuth::user(1).header();

    let res = server
        .get("/api/books/search/title")
        .add_header(name, value)
        .add_query_param("title", "POSSESS")
        .await;
    res.assert_status_ok();
    let found: Vec<Value> = res.json();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["title"], "The Dispossessed");
}

// ── Lending ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_loan_and_return_over_http() {
    let state = test_state().await;
    let user = seed_user(&state, "reader01", UserRole::User).await;
    let book = seed_book(&state, "Dune", 1, 1).await;
    let server = test_server(&state);
    let (name, value) = MockAuth::user(user.id).header();

    let res = server
        .post("/api/loans/loan")
        .add_header(name.clone(), value.clone())
        .add_query_param("userId", user.id)
        .add_query_param("bookId", book.id)
        .add_query_param("loanTime", 14)
        .await;
    res.assert_status(StatusCode::CREATED);
    let loan: Value = res.json();
    assert_eq!(loan["status"], "ACTIVE");
    let loan_id = loan["loanId"].as_i64().unwrap();

    let res = server
        .post("/api/loans/loan")
        .add_header(name.clone(), value.clone())
        .add_query_param("userId", user.id)
        .add_query_param("bookId", book.id)
        .add_query_param("loanTime", 14)
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>()["kind"], "NO_AVAILABLE_COPIES");

    let res = server
        .post(&format!("/api/loans/return/{loan_id}"))
        .add_header(name.clone(), value.clone())
        .await;
    res.assert_status_ok();
    assert!(res.json::<bool>());

    let res = server
        .post(&format!("/api/loans/return/{loan_id}"))
        .add_header(name, value)
        .await;
    res.assert_status_ok();
    assert!(!res.json::<bool>());
    assert_eq!(available_copies(&state, book.id).await, 1);
}

#[tokio::test]
async fn should_reject_zero_day_loan() {
    let state = test_state().await;
    let user = seed_user(&state, "reader01", UserRole::User).await;
    let book = seed_book(&state, "Dune", 1, 1).await;
    let server = test_server(&state);
    let (name, value) = MockAuth::user(user.id).header();

    let res = server
        .post("/api/loans/loan")
        .add_header(name, value)
        .add_query_param("userId", user.id)
        .add_query_param("bookId", book.id)
        .add_query_param("loanTime", 0)
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>()["kind"], "VALIDATION_FAILED");
}

// ── Reservations ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reserve_and_cancel_over_http() {
    let state = test_state().await;
    let user = seed_user(&state, "reader01", UserRole::User).await;
    let book = seed_book(&state, "Dune", 1, 1).await;
    let server = test_server(&state);
    let (name, value) = MockAuth::user(user.id).header();

    let res = server
        .post("/api/reservations/reserve")
        .add_header(name.clone(), value.clone())
        .add_query_param("userId", user.id)
        .add_query_param("bookId", book.id)
        .await;
    res.assert_status(StatusCode::CREATED);
    let reservation: Value = res.json();
    assert_eq!(reservation["status"], "CONFIRMED");
    assert_eq!(available_copies(&state, book.id).await, 1);
    let id = reservation["reservationId"].as_i64().unwrap();

    server
        .delete(&format!("/api/reservations/cancel/{id}"))
        .add_header(name.clone(), value.clone())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let res = server
        .get(&format!("/api/reservations/user/{}", user.id))
        .add_header(name, value)
        .await;
    res.assert_status_ok();
    assert!(res.json::<Vec<Value>>().is_empty());
}

// ── Reviews ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_out_of_range_rating() {
    let state = test_state().await;
    let user = seed_user(&state, "reader01", UserRole::User).await;
    let book = seed_book(&state, "Dune", 1, 1).await;
    let server = test_server(&state);
    let (name, value) = MockAuth::user(user.id).header();

    let res = server
        .post("/api/reviews")
        .add_header(name.clone(), value.clone())
        .json(&json!({
            "userId": user.id,
            "bookId": book.id,
            "comment": "Loved it",
            "rating": 11
        }))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>()["kind"], "VALIDATION_FAILED");

    let res = server
        .get(&format!("/api/reviews/book/{}", book.id))
        .add_header(name, value)
        .await;
    res.assert_status_ok();
    assert!(res.json::<Vec<Value>>().is_empty());
}

#[tokio::test]
async fn should_default_review_timestamp_to_now() {
    let state = test_state().await;
    let user = seed_user(&state, "reader01", UserRole::User).await;
    let book = seed_book(&state, "Dune", 1, 1).await;
    let server = test_server(&state);
    let (name, value) = MockAuth::user(user.id).header();

    let res = server
        .post("/api/reviews")
        .add_header(name, value)
        .json(&json!({
            "userId": user.id,
            "bookId": book.id,
            "comment": "Loved it",
            "rating": 10
        }))
        .await;
    res.assert_status(StatusCode::CREATED);
    let review: Value = res.json();
    assert_eq!(review["rating"], 10);
    let created_at = review["createdAt"].as_str().unwrap();
    assert!(created_at.ends_with('Z'));
}
