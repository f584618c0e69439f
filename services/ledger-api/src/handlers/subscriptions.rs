//! Subscription plan handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::Value;
use std::time::Instant;
use tracing::instrument;

use ledger_core::validation;
use ledger_types::Subscription;

use super::shared::{json_body, record_op_duration};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// POST /subscriptions/
#[instrument(skip_all)]
pub async fn create_subscription(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Subscription>> {
    let start = Instant::now();

    let result = async {
        let sub = validation::parse_new_subscription(&json_body(body)?)?;
        Ok::<_, ApiError>(state.subscriptions.create(sub).await?)
    }
    .await;

    record_op_duration("create_subscription", start, result.is_ok());
    Ok(Json(result?))
}

/// GET /subscriptions/
pub async fn list_subscriptions(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Subscription>>> {
    Ok(Json(state.subscriptions.list().await?))
}
