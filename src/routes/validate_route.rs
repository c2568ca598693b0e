use actix_web::{get, web, HttpRequest, HttpResponse};

use crate::{configuration::AuthSettings, routes::auth};

/// Hands the operator's identity number back to an authenticated caller.
#[get("/validate")]
async fn validate(request: HttpRequest, auth_settings: web::Data<AuthSettings>) -> HttpResponse {
    if !auth::is_authorized(&request, &auth_settings) {
        return auth::unauthorized();
    }

    HttpResponse::Ok().body(auth_settings.identity_number.clone())
}
