use actix_web::{http::StatusCode, post, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::{
    configuration::AuthSettings,
    domain::{ExtractionResult, ResultQuery},
    error::ScrapeError,
    routes::auth,
    services::StudentScraper,
};

const MANUAL_CHECK_NOTE: &str =
    "URL is valid but scraping failed. You can visit the URL manually to see the results.";

#[derive(Deserialize)]
struct StudentDataBody {
    url: String,
    identifier: String,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum StudentDataResponse {
    Success {
        url: String,
        identifier: String,
        student_data: ExtractionResult,
    },
    Error {
        error: String,
        url: String,
        identifier: String,
        note: &'static str,
    },
}

#[post("/student")]
async fn get_student_data(
    request: HttpRequest,
    body: web::Json<StudentDataBody>,
    auth_settings: web::Data<AuthSettings>,
    scraper: web::Data<dyn StudentScraper>,
) -> HttpResponse {
    if !auth::is_authorized(&request, &auth_settings) {
        return auth::unauthorized();
    }

    let StudentDataBody { url, identifier } = body.into_inner();

    let query = match ResultQuery::new(url.clone(), identifier.clone()) {
        Ok(query) => query,
        Err(e) => {
            return HttpResponse::BadRequest().json(StudentDataResponse::Error {
                error: e.to_string(),
                url,
                identifier,
                note: MANUAL_CHECK_NOTE,
            })
        }
    };

    // Runs on its own task: a dropped connection must not cut a scrape
    // short before its browser session is closed.
    let scraper = scraper.into_inner();
    let handle = tokio::spawn(async move { scraper.scrape(&query).await });

    let (status, response) = match handle.await {
        Ok(Ok(student_data)) => (
            StatusCode::OK,
            StudentDataResponse::Success {
                url,
                identifier,
                student_data,
            },
        ),
        Ok(Err(e)) => {
            log::error!("Scrape of '{}' on {} failed: {}", identifier, url, e);
            (
                status_for(&e),
                StudentDataResponse::Error {
                    error: format!("Failed to scrape student data: {}", e),
                    url,
                    identifier,
                    note: MANUAL_CHECK_NOTE,
                },
            )
        }
        Err(e) => {
            log::error!("Scrape task for '{}' did not finish: {}", identifier, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                StudentDataResponse::Error {
                    error: format!("Failed to scrape student data: {}", e),
                    url,
                    identifier,
                    note: MANUAL_CHECK_NOTE,
                },
            )
        }
    };

    HttpResponse::build(status).json(response)
}

fn status_for(error: &ScrapeError) -> StatusCode {
    match error {
        ScrapeError::IdentifierNotFound { .. } => StatusCode::NOT_FOUND,
        ScrapeError::DetailPanelNotReady { .. } => StatusCode::GATEWAY_TIMEOUT,
        ScrapeError::SessionUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        ScrapeError::NavigationFailed { .. }
        | ScrapeError::RowInteractionFailed { .. }
        | ScrapeError::DocumentUnavailable(_) => StatusCode::BAD_GATEWAY,
    }
}
