use async_trait::async_trait;
use thirtyfour::{By, ChromiumLikeCapabilities, DesiredCapabilities, WebDriver, WebElement};

use crate::{
    configuration::BrowserSettings,
    error::BrowserError,
    services::{Browser, BrowserSession},
};

/// Launches Chrome sessions through a WebDriver server (chromedriver or a
/// selenium hub).
pub struct Droid {
    webdriver_url: String,
    headless: bool,
}

impl Droid {
    pub fn new(settings: &BrowserSettings) -> Self {
        Droid {
            webdriver_url: settings.webdriver_url.clone(),
            headless: settings.headless,
        }
    }
}

#[async_trait]
impl Browser for Droid {
    type Session = DroidSession;

    async fn open(&self) -> Result<DroidSession, BrowserError> {
        let mut caps = DesiredCapabilities::chrome();
        if self.headless {
            caps.set_headless()?;
        }
        caps.set_no_sandbox()?;

        let driver = WebDriver::new(self.webdriver_url.as_str(), caps).await?;
        log::debug!("Opened browser session on {}", self.webdriver_url);

        Ok(DroidSession { driver })
    }
}

pub struct DroidSession {
    driver: WebDriver,
}

#[async_trait]
impl BrowserSession for DroidSession {
    type Row = WebElement;

    async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        self.driver.goto(url).await?;
        Ok(())
    }

    async fn count_rows(&self) -> Result<usize, BrowserError> {
        Ok(self.driver.find_all(By::Css("table tr")).await?.len())
    }

    async fn click_if_present(&self, css: &str) -> Result<bool, BrowserError> {
        match self.driver.find_all(By::Css(css)).await?.into_iter().next() {
            Some(element) => {
                element.click().await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_row_containing(&self, text: &str) -> Result<Option<WebElement>, BrowserError> {
        let rows = self.driver.find_all(By::XPath(row_xpath(text))).await?;
        Ok(rows.into_iter().next())
    }

    async fn scroll_into_view(&self, row: &WebElement) -> Result<(), BrowserError> {
        row.scroll_into_view().await?;
        Ok(())
    }

    async fn is_displayed(&self, row: &WebElement) -> Result<bool, BrowserError> {
        Ok(row.is_displayed().await?)
    }

    async fn click(&self, row: &WebElement) -> Result<(), BrowserError> {
        row.click().await?;
        Ok(())
    }

    async fn force_click(&self, row: &WebElement) -> Result<(), BrowserError> {
        self.driver
            .execute("arguments[0].click();", vec![row.to_json()?])
            .await?;
        Ok(())
    }

    async fn has_text(&self, text: &str) -> Result<bool, BrowserError> {
        for element in self.driver.find_all(By::XPath(exact_text_xpath(text))).await? {
            if element.is_displayed().await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn source(&self) -> Result<String, BrowserError> {
        Ok(self.driver.source().await?)
    }

    async fn close(self) -> Result<(), BrowserError> {
        self.driver.quit().await?;
        Ok(())
    }
}

/// Table rows whose whitespace-normalized text contains `text`.
fn row_xpath(text: &str) -> String {
    format!(
        "//table//tr[contains(normalize-space(.), {})]",
        xpath_literal(text)
    )
}

fn exact_text_xpath(text: &str) -> String {
    format!("//*[normalize-space(.)={}]", xpath_literal(text))
}

/// Quotes `text` as an XPath 1.0 string literal. XPath has no escape
/// sequences, so text holding both quote kinds is spliced with `concat()`.
pub fn xpath_literal(text: &str) -> String {
    if !text.contains('\'') {
        return format!("'{}'", text);
    }
    if !text.contains('"') {
        return format!("\"{}\"", text);
    }

    let parts: Vec<String> = text
        .split('\'')
        .map(|part| format!("'{}'", part))
        .collect();
    format!("concat({})", parts.join(", \"'\", "))
}
