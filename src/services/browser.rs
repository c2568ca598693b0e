//! The seam between the navigator and a concrete browser.
//!
//! A [`Browser`] opens one [`BrowserSession`] per request. Sessions expose
//! only the handful of page operations the result listing needs.

use async_trait::async_trait;

use crate::error::BrowserError;

#[async_trait]
pub trait Browser: Send + Sync {
    type Session: BrowserSession;

    /// Starts a fresh session. Nothing is shared between sessions.
    async fn open(&self) -> Result<Self::Session, BrowserError>;
}

#[async_trait]
pub trait BrowserSession: Send + Sync + Sized {
    /// Handle to a rendered table row.
    type Row: Send + Sync;

    async fn goto(&self, url: &str) -> Result<(), BrowserError>;

    /// Number of rendered `table tr` rows.
    async fn count_rows(&self) -> Result<usize, BrowserError>;

    /// Clicks the first element matching `css` if there is one. Returns
    /// whether anything was clicked.
    async fn click_if_present(&self, css: &str) -> Result<bool, BrowserError>;

    /// First table row whose whitespace-normalized text contains `text`,
    /// case-sensitive.
    async fn find_row_containing(&self, text: &str) -> Result<Option<Self::Row>, BrowserError>;

    async fn scroll_into_view(&self, row: &Self::Row) -> Result<(), BrowserError>;

    async fn is_displayed(&self, row: &Self::Row) -> Result<bool, BrowserError>;

    /// Regular click, subject to the browser's interactability checks.
    async fn click(&self, row: &Self::Row) -> Result<(), BrowserError>;

    /// Click dispatched from script, bypassing interactability checks.
    async fn force_click(&self, row: &Self::Row) -> Result<(), BrowserError>;

    /// Whether some displayed element's normalized text equals `text`
    /// exactly. Hidden matches, such as an unfilled panel template, do not
    /// count.
    async fn has_text(&self, text: &str) -> Result<bool, BrowserError>;

    /// Serialized DOM as currently rendered.
    async fn source(&self) -> Result<String, BrowserError>;

    async fn close(self) -> Result<(), BrowserError>;
}
