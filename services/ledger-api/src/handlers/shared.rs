//! Shared handler utilities
//!
//! Extractor rejection mapping, query parsing and metrics helpers used
//! across handlers.

use std::time::Instant;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::path::ErrorKind;
use axum::extract::Path;
use axum::Json;
use ledger_core::{FieldError, ValidationErrors, ValidationKind};
use ledger_types::EnrollmentStatus;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

// ============================================================================
// Extraction
// ============================================================================

/// Unwrap a JSON body. Unparseable JSON, or a body not sent as JSON, is a
/// validation failure located at the body itself.
pub fn json_body(body: Result<Json<Value>, JsonRejection>) -> ApiResult<Value> {
    body.map(|Json(value)| value).map_err(|rejection| {
        tracing::debug!(rejection = %rejection.body_text(), "Rejected request body");
        ApiError::from(ValidationErrors::single(FieldError::body(
            &[],
            ValidationKind::JsonInvalid,
            rejection.body_text(),
        )))
    })
}

/// Unwrap integer path parameters, named in route order by `names`.
///
/// A segment that does not parse is a validation failure on that parameter.
pub fn path_params<T>(path: Result<Path<T>, PathRejection>, names: &[&str]) -> ApiResult<T>
where
    T: DeserializeOwned + Send,
{
    path.map(|Path(params)| params).map_err(|rejection| {
        tracing::debug!(rejection = %rejection.body_text(), "Rejected path parameters");
        ApiError::from(ValidationErrors::single(FieldError::path(
            &rejected_param(&rejection, names),
            ValidationKind::WrongType,
            "Input should be a valid integer",
        )))
    })
}

fn rejected_param(rejection: &PathRejection, names: &[&str]) -> String {
    let first = names.first().copied().unwrap_or("id");
    let PathRejection::FailedToDeserializePathParams(inner) = rejection else {
        return first.to_string();
    };
    match inner.kind() {
        ErrorKind::ParseErrorAtKey { key, .. } | ErrorKind::InvalidUtf8InPathParam { key, .. } => {
            key.clone()
        }
        ErrorKind::ParseErrorAtIndex { index, .. } => {
            names.get(*index).copied().unwrap_or(first).to_string()
        }
        _ => first.to_string(),
    }
}

/// `?status=` query string
#[derive(Debug, Default, Deserialize)]
pub struct StatusQuery {
    pub status: Option<String>,
}

impl StatusQuery {
    /// Parse the status filter. Values other than `active` and `inactive`
    /// are a validation failure on the query parameter.
    pub fn parse(&self) -> ApiResult<Option<EnrollmentStatus>> {
        self.status
            .as_deref()
            .map(|raw| {
                raw.parse().map_err(|_| {
                    ApiError::from(ValidationErrors::single(FieldError::query(
                        "status",
                        ValidationKind::WrongType,
                        "Input should be 'active' or 'inactive'",
                    )))
                })
            })
            .transpose()
    }
}

/// Fallback for unrouted paths
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}

// ============================================================================
// Metrics Helpers
// ============================================================================

/// Record operation duration with result label.
///
/// Labels: operation, result (ok/err)
#[inline]
pub fn record_op_duration(operation: &'static str, start: Instant, success: bool) {
    let result = if success { "ok" } else { "err" };
    metrics::histogram!(
        "ledger_operation_duration_seconds",
        "operation" => operation,
        "result" => result
    )
    .record(start.elapsed().as_secs_f64());
}

// ============================================================================
// Tests
// ============================================================================
