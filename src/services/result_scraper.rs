use async_trait::async_trait;

use crate::{
    domain::{ExtractionResult, ResultQuery},
    error::ScrapeError,
    services::{extract_student_data, open_detail_panel, Browser, BrowserSession},
};

/// Scrapes one student's result from a listing page.
///
/// Exactly one browser session is opened, and it is closed before this
/// returns whether navigation succeeded or not. Extraction runs on the
/// captured document after the session is gone.
pub async fn scrape_student_data<B: Browser>(
    browser: &B,
    query: &ResultQuery,
) -> Result<ExtractionResult, ScrapeError> {
    let session = browser
        .open()
        .await
        .map_err(ScrapeError::SessionUnavailable)?;

    let navigation = open_detail_panel(&session, query).await;

    if let Err(e) = session.close().await {
        log::error!("Failed to close browser session: {}", e);
    }

    let document = navigation?;
    let result = extract_student_data(&document);

    log::info!(
        "Extracted {} fields for '{}' ({} failures)",
        result.record.len(),
        query.identifier(),
        result.diagnostics.len()
    );

    Ok(result)
}

/// Object-safe handle on a browser, so the HTTP layer does not need to know
/// which browser backs it.
#[async_trait]
pub trait StudentScraper: Send + Sync {
    async fn scrape(&self, query: &ResultQuery) -> Result<ExtractionResult, ScrapeError>;
}

#[async_trait]
impl<B: Browser> StudentScraper for B {
    async fn scrape(&self, query: &ResultQuery) -> Result<ExtractionResult, ScrapeError> {
        scrape_student_data(self, query).await
    }
}
