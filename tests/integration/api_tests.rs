//! API integration tests
//!
//! These run against a live server with a database and a summary provider
//! configured. Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// ISBN unlikely to collide between test runs
fn unique_isbn() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("978{:010}", nanos % 10_000_000_000)
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_list_books() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["page"], 1);
    assert!(body["items"].is_array());
    assert_eq!(body["count"], body["total"]);
}

#[tokio::test]
#[ignore]
async fn test_create_book_missing_title() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({ "isbn": unique_isbn() }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "RequiredFieldMissing");
}

#[tokio::test]
#[ignore]
async fn test_create_update_and_duplicate_book() {
    let client = Client::new();
    let isbn = unique_isbn();
    let payload = json!({
        "isbn": isbn,
        "title": "The Dispossessed",
        "author": "Ursula K. Le Guin",
        "publicationYear": 1974,
        "language": "en"
    });

    // Create
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let created: Value = response.json().await.expect("Failed to parse response");
    let book_id = created["id"].as_i64().expect("No book ID");
    assert!(!created["summary"].as_str().unwrap_or_default().is_empty());

    // Same ISBN again
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);

    // Partial update keeps everything else
    let response = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .json(&json!({ "title": "The Dispossessed: An Ambiguous Utopia" }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let updated: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(updated["title"], "The Dispossessed: An Ambiguous Utopia");
    assert_eq!(updated["author"], created["author"]);
    assert_eq!(updated["summary"], created["summary"]);
}

#[tokio::test]
#[ignore]
async fn test_update_unknown_book() {
    let client = Client::new();

    let response = client
        .put(format!("{}/books/999999", BASE_URL))
        .json(&json!({ "title": "Nothing" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_publication_years_sorted_descending() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/publication-years", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let years: Vec<i64> = body["items"]
        .as_array()
        .expect("items array")
        .iter()
        .filter_map(Value::as_i64)
        .collect();
    assert!(years.windows(2).all(|w| w[0] > w[1]));
}

#[tokio::test]
#[ignore]
async fn test_create_user_and_login() {
    let client = Client::new();
    let username = format!("reader{}", &unique_isbn()[3..]);

    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({ "username": username, "password": "secret-pass" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.get("password").is_none());

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "username": username, "password": "wrong" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "username": username, "password": "secret-pass" }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}
