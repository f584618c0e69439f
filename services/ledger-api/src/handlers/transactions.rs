//! Transaction and invoice handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use std::time::Instant;
use tracing::instrument;

use ledger_core::validation;
use ledger_types::{InvoiceSummary, Transaction};

use super::shared::{json_body, record_op_duration};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// POST /transactions/
#[instrument(skip_all)]
pub async fn create_transaction(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let start = Instant::now();

    let result = async {
        let tx = validation::parse_new_transaction(&json_body(body)?)?;
        Ok::<_, ApiError>(state.transactions.create(tx).await?)
    }
    .await;

    record_op_duration("create_transaction", start, result.is_ok());
    let tx = result?;

    metrics::counter!("ledger_transactions_recorded_total").increment(1);
    Ok((StatusCode::CREATED, Json(tx)))
}

/// GET /transactions/
pub async fn list_transactions(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let start = Instant::now();
    let result = state.transactions.list().await;
    record_op_duration("list_transactions", start, result.is_ok());
    Ok(Json(result?))
}

/// POST /transactions/invoice/
///
/// Echoes the supplied invoice with `total_amount` set to the sum of its
/// lines, keyed the way the caller spelled it. Nothing is persisted.
pub async fn build_invoice(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<InvoiceSummary>> {
    let (invoice, spelling) = validation::parse_invoice(&json_body(body)?)?;
    Ok(Json(
        state.transactions.build_invoice(invoice).with_spelling(spelling),
    ))
}
