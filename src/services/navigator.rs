//! Drives a browser session from a listing page to a student's rendered
//! detail panel.

use std::time::Duration;

use crate::{
    domain::{Field, ResultQuery},
    error::ScrapeError,
    services::{
        wait::{poll_until, Backoff},
        BrowserSession,
    },
};

/// Close control of the introductory dialog shown on most page loads.
const OVERLAY_CLOSE_SELECTOR: &str = ".close-button";

const LISTING_TIMEOUT: Duration = Duration::from_secs(10);
const ROW_VISIBLE_TIMEOUT: Duration = Duration::from_secs(1);
pub const DETAIL_PANEL_TIMEOUT: Duration = Duration::from_secs(8);

/// Label whose presence marks the detail panel as rendered.
pub fn detail_sentinel() -> &'static str {
    Field::EnrollmentNumber.label()
}

/// Opens the detail panel for `query.identifier()` and returns the rendered
/// document source. The session is left open; releasing it is the caller's
/// job.
pub async fn open_detail_panel<S: BrowserSession>(
    session: &S,
    query: &ResultQuery,
) -> Result<String, ScrapeError> {
    let url = query.listing_url();
    let identifier = query.identifier();

    log::info!("Loading listing {} for '{}'", url, identifier);
    session
        .goto(url)
        .await
        .map_err(|source| ScrapeError::NavigationFailed {
            url: url.to_string(),
            source,
        })?;

    let listing = poll_until(Backoff::within(LISTING_TIMEOUT), move || async move {
        Ok((session.count_rows().await? > 0).then_some(()))
    })
    .await;
    if listing.is_none() {
        log::warn!(
            "No table rows rendered on {} after {}s",
            url,
            LISTING_TIMEOUT.as_secs()
        );
    }

    match session.click_if_present(OVERLAY_CLOSE_SELECTOR).await {
        Ok(true) => log::debug!("Dismissed introductory overlay"),
        Ok(false) => {}
        Err(e) => log::warn!("Could not dismiss overlay on {}: {}", url, e),
    }

    let row = match session.find_row_containing(identifier).await {
        Ok(Some(row)) => row,
        Ok(None) => {
            return Err(ScrapeError::IdentifierNotFound {
                identifier: identifier.to_string(),
            })
        }
        Err(e) => {
            log::error!("Row lookup for '{}' failed: {}", identifier, e);
            return Err(ScrapeError::IdentifierNotFound {
                identifier: identifier.to_string(),
            });
        }
    };

    activate_row(session, &row, identifier).await?;

    let panel = poll_until(Backoff::within(DETAIL_PANEL_TIMEOUT), move || async move {
        Ok(session.has_text(detail_sentinel()).await?.then_some(()))
    })
    .await;
    if panel.is_none() {
        return Err(ScrapeError::DetailPanelNotReady {
            timeout: DETAIL_PANEL_TIMEOUT,
        });
    }

    session.source().await.map_err(ScrapeError::DocumentUnavailable)
}

async fn activate_row<S: BrowserSession>(
    session: &S,
    row: &S::Row,
    identifier: &str,
) -> Result<(), ScrapeError> {
    if let Err(e) = session.scroll_into_view(row).await {
        log::warn!("Could not scroll row '{}' into view: {}", identifier, e);
    }

    let visible = poll_until(Backoff::within(ROW_VISIBLE_TIMEOUT), move || async move {
        Ok(session.is_displayed(row).await?.then_some(()))
    })
    .await;
    if visible.is_none() {
        log::debug!("Row '{}' never reported displayed", identifier);
    }

    // The listing sometimes layers other content over its rows, so a
    // rejected click falls through to a script-dispatched one.
    if let Err(e) = session.click(row).await {
        log::warn!(
            "Click on row '{}' was rejected ({}); forcing it from script",
            identifier,
            e
        );
        session
            .force_click(row)
            .await
            .map_err(|e| ScrapeError::RowInteractionFailed {
                identifier: identifier.to_string(),
                cause: e.to_string(),
            })?;
    }

    Ok(())
}
