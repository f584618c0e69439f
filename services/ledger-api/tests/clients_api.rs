//! End-to-end client and enrollment scenarios over HTTP

mod common;

use axum::http::{header, HeaderValue};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use common::{create_client, create_plan, create_test_server, has_field_error};
use ledger_api::Config;
use ledger_core::LedgerConfig;
use serde_json::{json, Value};

// ============================================================================
// Root challenge
// ============================================================================

#[tokio::test]
async fn test_root_without_credentials_is_challenged() {
    let server = create_test_server().await;

    let response = server.get("/").await;
    assert_eq!(response.status_code(), 401);
    assert_eq!(response.header(header::WWW_AUTHENTICATE), "Basic");
}

#[tokio::test]
async fn test_root_with_malformed_credentials_is_challenged() {
    let server = create_test_server().await;

    let response = server
        .get("/")
        .add_header(header::AUTHORIZATION, HeaderValue::from_static("Basic %%%"))
        .await;
    assert_eq!(response.status_code(), 401);
    assert_eq!(response.header(header::WWW_AUTHENTICATE), "Basic");
}

#[tokio::test]
async fn test_root_with_any_credentials_welcomes() {
    let server = create_test_server().await;
    let value = format!("Basic {}", STANDARD.encode("anyone:anything"));

    let response = server
        .get("/")
        .add_header(header::AUTHORIZATION, HeaderValue::from_str(&value).unwrap())
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), json!({ "message": "Welcome to the API" }));
}

// ============================================================================
// Create / read
// ============================================================================

#[tokio::test]
async fn test_create_client_scenario() {
    let server = create_test_server().await;

    let response = server
        .post("/clients/")
        .json(&json!({ "name": "Mauricio", "age": 40, "email": "mauricio@test.com" }))
        .await;
    assert_eq!(response.status_code(), 201);

    let created: Value = response.json();
    assert!(created["id"].as_i64().is_some());
    assert_eq!(created["name"], "Mauricio");
    assert_eq!(created["age"], 40);
    assert_eq!(created["email"], "mauricio@test.com");

    let fetched: Value = server
        .get(&format!("/clients/{}", created["id"]))
        .await
        .json();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_collection_routes_accept_both_slash_forms() {
    let server = create_test_server().await;
    create_client(&server, "A", "a@x.com").await;

    let response = server
        .post("/clients")
        .json(&json!({ "name": "B", "age": 2, "email": "b@x.com" }))
        .await;
    assert_eq!(response.status_code(), 201);

    let with_slash: Vec<Value> = server.get("/clients/").await.json();
    let without: Vec<Value> = server.get("/clients").await.json();
    assert_eq!(with_slash.len(), 2);
    assert_eq!(with_slash, without);
}

#[tokio::test]
async fn test_create_duplicate_email_is_422() {
    let server = create_test_server().await;
    create_client(&server, "A", "dup@x.com").await;

    let response = server
        .post("/clients/")
        .json(&json!({ "name": "B", "age": 20, "email": "dup@x.com" }))
        .await;
    assert_eq!(response.status_code(), 422);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(has_field_error(&body, "email", "duplicate_email"));
}

#[tokio::test]
async fn test_create_reports_every_missing_field() {
    let server = create_test_server().await;

    let response = server.post("/clients/").json(&json!({})).await;
    assert_eq!(response.status_code(), 422);

    let body: Value = response.json();
    for field in ["name", "age", "email"] {
        assert!(has_field_error(&body, field, "missing_field"), "{field}");
    }
}

#[tokio::test]
async fn test_create_rejects_wrong_types_and_bad_email() {
    let server = create_test_server().await;

    let response = server
        .post("/clients/")
        .json(&json!({ "name": "A", "age": "forty", "email": "a@x.com" }))
        .await;
    assert_eq!(response.status_code(), 422);
    assert!(has_field_error(&response.json(), "age", "wrong_type"));

    let response = server
        .post("/clients/")
        .json(&json!({ "name": "A", "age": 40, "email": "not-an-email" }))
        .await;
    assert_eq!(response.status_code(), 422);
    assert!(has_field_error(&response.json(), "email", "invalid_email"));

    let response = server
        .post("/clients/")
        .json(&json!({ "name": "A", "age": 40, "email": "" }))
        .await;
    assert_eq!(response.status_code(), 422);
    assert!(has_field_error(&response.json(), "email", "missing_email"));
}

#[tokio::test]
async fn test_configured_minimum_age() {
    let config = Config {
        ledger: LedgerConfig::new().with_min_client_age(18),
        ..Config::default()
    };
    let server = common::create_test_server_with_config(config).await;

    let response = server
        .post("/clients/")
        .json(&json!({ "name": "Kid", "age": 12, "email": "kid@x.com" }))
        .await;
    assert_eq!(response.status_code(), 422);
    assert!(has_field_error(&response.json(), "age", "below_minimum"));
}

#[tokio::test]
async fn test_malformed_json_is_422_on_the_body() {
    let server = create_test_server().await;

    let response = server
        .post("/clients/")
        .bytes("{\"name\": ".into())
        .content_type("application/json")
        .await;
    assert_eq!(response.status_code(), 422);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["details"][0]["loc"], json!(["body"]));
    assert_eq!(body["error"]["details"][0]["type"], "json_invalid");
}

#[tokio::test]
async fn test_body_without_json_content_type_is_422() {
    let server = create_test_server().await;

    let response = server
        .put("/clients/1")
        .text(r#"{"name": "A", "age": 1, "email": "a@x.com"}"#)
        .await;
    assert_eq!(response.status_code(), 422);
    assert_eq!(
        response.json::<Value>()["error"]["details"][0]["loc"],
        json!(["body"])
    );
}

#[tokio::test]
async fn test_non_numeric_id_is_422_on_the_path() {
    let server = create_test_server().await;

    let response = server.get("/clients/abc").await;
    assert_eq!(response.status_code(), 422);

    let body: Value = response.json();
    assert_eq!(body["error"]["details"][0]["loc"], json!(["path", "id"]));
    assert_eq!(body["error"]["details"][0]["type"], "wrong_type");

    let response = server.delete("/clients/1.5").await;
    assert_eq!(response.status_code(), 422);
    assert!(has_field_error(&response.json(), "id", "wrong_type"));
}

#[tokio::test]
async fn test_non_numeric_subscription_id_names_its_segment() {
    let server = create_test_server().await;
    let client = create_client(&server, "A", "a@x.com").await;

    let response = server
        .post(&format!("/clients/{}/subscribe/gold", client["id"]))
        .await;
    assert_eq!(response.status_code(), 422);
    assert_eq!(
        response.json::<Value>()["error"]["details"][0]["loc"],
        json!(["path", "subscription_id"])
    );
}

// ============================================================================
// Not found
// ============================================================================

#[tokio::test]
async fn test_unknown_client_is_404_for_every_verb() {
    let server = create_test_server().await;
    let full = json!({ "name": "A", "age": 1, "email": "a@x.com" });

    let responses = [
        server.get("/clients/9999999").await,
        server.patch("/clients/9999999").json(&json!({ "age": 2 })).await,
        server.put("/clients/9999999").json(&full).await,
        server.delete("/clients/9999999").await,
    ];

    for response in responses {
        assert_eq!(response.status_code(), 404);
        assert_eq!(response.json::<Value>()["error"]["code"], "CLIENT_NOT_FOUND");
    }
}

#[tokio::test]
async fn test_unrouted_path_and_unwired_verb() {
    let server = create_test_server().await;

    let response = server.get("/nowhere").await;
    assert_eq!(response.status_code(), 404);
    assert_eq!(response.json::<Value>()["error"]["code"], "NOT_FOUND");

    let response = server.post("/clients/1").await;
    assert_eq!(response.status_code(), 405);
}

// ============================================================================
// Update / replace / delete
// ============================================================================

#[tokio::test]
async fn test_patch_only_phone_preserves_other_fields() {
    let server = create_test_server().await;
    let created = create_client(&server, "A", "a@x.com").await;
    let path = format!("/clients/{}", created["id"]);

    let response = server.patch(&path).json(&json!({ "phone": "555-0100" })).await;
    assert_eq!(response.status_code(), 200);

    let updated: Value = response.json();
    assert_eq!(updated["name"], created["name"]);
    assert_eq!(updated["age"], created["age"]);
    assert_eq!(updated["email"], created["email"]);
    assert_eq!(updated["phone"], "555-0100");

    let fetched: Value = server.get(&path).await.json();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_patch_to_taken_email_is_422() {
    let server = create_test_server().await;
    create_client(&server, "A", "a@x.com").await;
    let b = create_client(&server, "B", "b@x.com").await;

    let response = server
        .patch(&format!("/clients/{}", b["id"]))
        .json(&json!({ "email": "a@x.com" }))
        .await;
    assert_eq!(response.status_code(), 422);
    assert!(has_field_error(&response.json(), "email", "duplicate_email"));
}

#[tokio::test]
async fn test_put_replaces_and_clears_phone() {
    let server = create_test_server().await;
    let created: Value = server
        .post("/clients/")
        .json(&json!({ "name": "A", "age": 30, "email": "a@x.com", "phone": "1" }))
        .await
        .json();
    let path = format!("/clients/{}", created["id"]);

    let response = server
        .put(&path)
        .json(&json!({ "name": "A2", "age": 31, "email": "a2@x.com" }))
        .await;
    assert_eq!(response.status_code(), 200);

    let replaced: Value = response.json();
    assert_eq!(replaced["name"], "A2");
    assert_eq!(replaced["age"], 31);
    assert_eq!(replaced["email"], "a2@x.com");
    assert!(replaced["phone"].is_null());

    let response = server.put(&path).json(&json!({ "name": "A3" })).await;
    assert_eq!(response.status_code(), 422);
}

#[tokio::test]
async fn test_delete_acknowledges_and_cascades() {
    let server = create_test_server().await;
    let created = create_client(&server, "A", "a@x.com").await;
    let keeper = create_client(&server, "K", "k@x.com").await;
    let plan = create_plan(&server, "Gold", 100).await;

    server
        .post(&format!("/clients/{}/subscribe/{plan}", created["id"]))
        .await;
    for client in [&created, &keeper] {
        let response = server
            .post("/transactions/")
            .json(&json!({ "client_id": client["id"], "amount": 10, "description": "fee" }))
            .await;
        assert_eq!(response.status_code(), 201);
    }

    let response = server.delete(&format!("/clients/{}", created["id"])).await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["id"], created["id"]);
    assert!(body["message"].is_string());

    assert_eq!(
        server
            .get(&format!("/clients/{}", created["id"]))
            .await
            .status_code(),
        404
    );

    let remaining: Vec<Value> = server.get("/transactions/").await.json();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["client_id"], keeper["id"]);
}

// ============================================================================
// Enrollment
// ============================================================================

#[tokio::test]
async fn test_subscribe_defaults_to_active_and_is_not_idempotent() {
    let server = create_test_server().await;
    let client = create_client(&server, "A", "a@x.com").await;
    let plan = create_plan(&server, "Gold", 100).await;
    let path = format!("/clients/{}/subscribe/{plan}", client["id"]);

    let first = server.post(&path).await;
    assert_eq!(first.status_code(), 200);
    let first: Value = first.json();
    assert_eq!(first["status"], "active");
    assert_eq!(first["client_id"], client["id"]);
    assert_eq!(first["subscription_id"], plan);

    let second: Value = server.post(&path).await.json();
    assert_ne!(first["id"], second["id"]);

    let all: Vec<Value> = server
        .get(&format!("/clients/{}/subscriptions", client["id"]))
        .await
        .json();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_subscribe_unknown_ids_and_bad_status() {
    let server = create_test_server().await;
    let client = create_client(&server, "A", "a@x.com").await;
    let plan = create_plan(&server, "Gold", 100).await;

    let response = server.post(&format!("/clients/9999999/subscribe/{plan}")).await;
    assert_eq!(response.status_code(), 404);

    let response = server
        .post(&format!("/clients/{}/subscribe/9999999", client["id"]))
        .await;
    assert_eq!(response.status_code(), 404);
    assert_eq!(
        response.json::<Value>()["error"]["code"],
        "SUBSCRIPTION_NOT_FOUND"
    );

    let response = server
        .post(&format!("/clients/{}/subscribe/{plan}", client["id"]))
        .add_query_param("status", "paused")
        .await;
    assert_eq!(response.status_code(), 422);
    assert!(has_field_error(&response.json(), "status", "wrong_type"));
}

#[tokio::test]
async fn test_subscription_listing_filters_on_enrollment_status() {
    let server = create_test_server().await;
    let a = create_client(&server, "A", "a@x.com").await;
    let b = create_client(&server, "B", "b@x.com").await;
    let gold = create_plan(&server, "Gold", 100).await;
    let silver = create_plan(&server, "Silver", 50).await;

    server
        .post(&format!("/clients/{}/subscribe/{gold}", a["id"]))
        .add_query_param("status", "active")
        .await;
    server
        .post(&format!("/clients/{}/subscribe/{silver}", a["id"]))
        .add_query_param("status", "inactive")
        .await;
    server
        .post(&format!("/clients/{}/subscribe/{gold}", b["id"]))
        .await;

    let active: Vec<Value> = server
        .get(&format!("/clients/{}/subscriptions", a["id"]))
        .add_query_param("status", "active")
        .await
        .json();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["subscription_id"], gold);
    assert_eq!(active[0]["client_id"], a["id"]);

    let inactive: Vec<Value> = server
        .get(&format!("/clients/{}/suscriptions", a["id"]))
        .add_query_param("status", "inactive")
        .await
        .json();
    assert_eq!(inactive.len(), 1);
    assert_eq!(inactive[0]["subscription_id"], silver);

    let response = server.get("/clients/9999999/subscriptions").await;
    assert_eq!(response.status_code(), 404);
}
