//! Axum extractors for HTTP Basic credentials

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;

/// Username and password from an `Authorization: Basic` header.
///
/// Credentials are only checked for shape; any well-formed pair is accepted.
#[derive(Debug, Clone)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    /// Parse the value of an `Authorization` header
    pub fn parse(value: &str) -> Result<Self, BasicRejection> {
        let (scheme, encoded) = value
            .split_once(' ')
            .ok_or(BasicRejection::NOT_AUTHENTICATED)?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return Err(BasicRejection::NOT_AUTHENTICATED);
        }

        let decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|_| BasicRejection::INVALID_CREDENTIALS)?;
        let decoded =
            String::from_utf8(decoded).map_err(|_| BasicRejection::INVALID_CREDENTIALS)?;

        let (username, password) = decoded
            .split_once(':')
            .ok_or(BasicRejection::INVALID_CREDENTIALS)?;

        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
struct BasicErrorResponse {
    error: BasicErrorDetail,
}

#[derive(Debug, Serialize)]
struct BasicErrorDetail {
    code: &'static str,
    message: &'static str,
}

/// Challenge sent back when credentials are missing or malformed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasicRejection {
    code: &'static str,
    message: &'static str,
}

impl BasicRejection {
    const NOT_AUTHENTICATED: Self = Self {
        code: "NOT_AUTHENTICATED",
        message: "Not authenticated",
    };

    const INVALID_CREDENTIALS: Self = Self {
        code: "INVALID_CREDENTIALS",
        message: "Invalid authentication credentials",
    };
}

impl IntoResponse for BasicRejection {
    fn into_response(self) -> Response {
        let body = BasicErrorResponse {
            error: BasicErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Basic")],
            Json(body),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for BasicCredentials
where
    S: Send + Sync,
{
    type Rejection = BasicRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(BasicRejection::NOT_AUTHENTICATED)?
            .to_str()
            .map_err(|_| BasicRejection::INVALID_CREDENTIALS)?;

        let credentials = Self::parse(value)?;
        tracing::debug!(username = %credentials.username, "Basic credentials presented");
        Ok(credentials)
    }
}
