//! Root greeting behind a Basic credential challenge

use axum::Json;
use serde::Serialize;

use crate::extractors::BasicCredentials;

#[derive(Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
}

/// GET /
pub async fn root(_credentials: BasicCredentials) -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the API",
    })
}
