use actix_web::{http::header, HttpRequest, HttpResponse};
use serde_json::json;

use crate::configuration::AuthSettings;

/// Whether the request carries `Authorization: Bearer <configured token>`.
pub fn is_authorized(request: &HttpRequest, auth: &AuthSettings) -> bool {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| token.trim() == auth.token)
}

pub fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({
        "status": "error",
        "error": "Missing or invalid bearer token",
    }))
}
