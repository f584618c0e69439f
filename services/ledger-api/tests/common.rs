#![allow(dead_code)]

use axum_test::TestServer;
use ledger_api::{build_router, AppState, Config};
use serde_json::{json, Value};

/// Test server over a fresh in-memory store
pub async fn create_test_server() -> TestServer {
    create_test_server_with_config(Config::default()).await
}

/// Test server with custom configuration; the store is always in-memory
pub async fn create_test_server_with_config(mut config: Config) -> TestServer {
    config.database_url = "sqlite::memory:".to_string();

    let pool = ledger_db::create_pool_with_options(&config.database_url, config.pool.clone())
        .await
        .expect("Failed to open in-memory store");
    ledger_db::create_all_tables(&pool)
        .await
        .expect("Failed to create tables");

    let app = build_router(AppState::new(pool, config), None);
    TestServer::new(app).expect("Failed to create test server")
}

/// Create a client and return its JSON body
pub async fn create_client(server: &TestServer, name: &str, email: &str) -> Value {
    let response = server
        .post("/clients/")
        .json(&json!({ "name": name, "age": 30, "email": email }))
        .await;
    assert_eq!(response.status_code(), 201, "{}", response.text());
    response.json()
}

/// Create a subscription plan and return its id
pub async fn create_plan(server: &TestServer, name: &str, price: i64) -> i64 {
    let response = server
        .post("/subscriptions/")
        .json(&json!({ "name": name, "price": price }))
        .await;
    assert_eq!(response.status_code(), 200, "{}", response.text());
    response.json::<Value>()["id"].as_i64().unwrap()
}

/// Field error details from a 422 body as `(field, type)` pairs
pub fn field_errors(body: &Value) -> Vec<(String, String)> {
    body["error"]["details"]
        .as_array()
        .map(|details| {
            details
                .iter()
                .map(|d| {
                    let field = d["loc"]
                        .as_array()
                        .and_then(|loc| loc.last())
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string();
                    let kind = d["type"].as_str().unwrap_or_default().to_string();
                    (field, kind)
                })
                .collect()
        })
        .unwrap_or_default()
}

pub fn has_field_error(body: &Value, field: &str, kind: &str) -> bool {
    field_errors(body)
        .iter()
        .any(|(f, k)| f == field && k == kind)
}
