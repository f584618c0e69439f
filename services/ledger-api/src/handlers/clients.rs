//! Client handlers

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use tracing::instrument;

use ledger_core::validation;
use ledger_types::{Client, ClientId, Enrollment, SubscriptionId};

use super::shared::{json_body, path_params, record_op_duration, StatusQuery};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct DeleteClientResponse {
    pub message: &'static str,
    pub id: ClientId,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /clients/
#[instrument(skip_all)]
pub async fn create_client(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Client>)> {
    let start = Instant::now();

    let result = async {
        let profile = validation::parse_client_profile(&json_body(body)?)?;
        Ok::<_, ApiError>(state.clients.create(profile).await?)
    }
    .await;

    record_op_duration("create_client", start, result.is_ok());
    let client = result?;

    metrics::counter!("ledger_clients_created_total").increment(1);
    Ok((StatusCode::CREATED, Json(client)))
}

/// GET /clients/
pub async fn list_clients(State(state): State<AppState>) -> ApiResult<Json<Vec<Client>>> {
    let start = Instant::now();
    let result = state.clients.list().await;
    record_op_duration("list_clients", start, result.is_ok());
    Ok(Json(result?))
}

/// GET /clients/{id}
#[instrument(skip_all)]
pub async fn get_client(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Client>> {
    let id = ClientId(path_params(path, &["id"])?);
    Ok(Json(state.clients.get(id).await?))
}

/// PATCH /clients/{id}
///
/// Merge-patch: fields absent from the body keep their stored value.
#[instrument(skip_all)]
pub async fn patch_client(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Client>> {
    let start = Instant::now();

    let result = async {
        let id = ClientId(path_params(path, &["id"])?);
        let patch = validation::parse_client_patch(&json_body(body)?)?;
        Ok::<_, ApiError>(state.clients.update(id, patch).await?)
    }
    .await;

    record_op_duration("update_client", start, result.is_ok());
    Ok(Json(result?))
}

/// PUT /clients/{id}
///
/// Full replace: the body must carry the whole creation shape, and an
/// omitted `phone` is cleared.
#[instrument(skip_all)]
pub async fn put_client(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Client>> {
    let start = Instant::now();

    let result = async {
        let id = ClientId(path_params(path, &["id"])?);
        let profile = validation::parse_client_profile(&json_body(body)?)?;
        Ok::<_, ApiError>(state.clients.replace(id, profile).await?)
    }
    .await;

    record_op_duration("replace_client", start, result.is_ok());
    Ok(Json(result?))
}

/// DELETE /clients/{id}
#[instrument(skip_all)]
pub async fn delete_client(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<DeleteClientResponse>> {
    let start = Instant::now();

    let result = async {
        let id = ClientId(path_params(path, &["id"])?);
        Ok::<_, ApiError>(state.clients.delete(id).await?)
    }
    .await;

    record_op_duration("delete_client", start, result.is_ok());
    Ok(Json(DeleteClientResponse {
        message: "Client deleted",
        id: result?,
    }))
}

/// POST /clients/{id}/subscribe/{subscription_id}
#[instrument(skip_all)]
pub async fn subscribe_client(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
    Query(query): Query<StatusQuery>,
) -> ApiResult<Json<Enrollment>> {
    let start = Instant::now();

    let result = async {
        let (client_id, subscription_id) = path_params(path, &["id", "subscription_id"])?;
        let status = query.parse()?.unwrap_or_default();
        Ok::<_, ApiError>(state
            .clients
            .subscribe(ClientId(client_id), SubscriptionId(subscription_id), status)
            .await?)
    }
    .await;

    record_op_duration("subscribe_client", start, result.is_ok());
    let enrollment = result?;

    metrics::counter!("ledger_enrollments_created_total", "status" => enrollment.status.as_str())
        .increment(1);
    Ok(Json(enrollment))
}

/// GET /clients/{id}/subscriptions
///
/// Also served under the legacy `/clients/{id}/suscriptions` path.
#[instrument(skip_all)]
pub async fn list_client_subscriptions(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    Query(query): Query<StatusQuery>,
) -> ApiResult<Json<Vec<Enrollment>>> {
    let id = ClientId(path_params(path, &["id"])?);
    let status = query.parse()?;
    Ok(Json(state.clients.list_subscriptions(id, status).await?))
}
