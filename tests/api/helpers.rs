use std::{
    net::TcpListener,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use ranklist::{
    configuration::AuthSettings,
    error::BrowserError,
    services::{Browser, BrowserSession},
    startup::run,
};

pub const TOKEN: &str = "ddea28553198";
pub const IDENTITY_NUMBER: &str = "919876543210";
pub const LISTING_URL: &str =
    "https://www.ipuranklist.com/ranklist/btech?batch=22&branch=ECE&insti=148&sem=0";

/// Detail panel with SGPA and CGPA sections, two subjects and three
/// semesters.
pub const FULL_PANEL: &str = r#"
<div class="modal">
  <p><b>Enrollment Number:</b> 07114802822</p>
  <p><b>Name:</b> SAMAKSH</p>
  <p><b>Marks:</b> 1624</p>
  <p><b>Percentage:</b> 81.2</p>
  <p><b>SGPA:</b> 8.4</p>
  <p><b>CGPA:</b> 8.2</p>
  <p><b>Equivalent Percentage:</b> 78.4</p>
  <p><b>Credits Obtained:</b> 88</p>
  <p><b>Rank:</b> 12</p>
  <table>
    <thead><tr><th>Subject (Credits)</th><th>Marks</th></tr></thead>
    <tbody>
      <tr><td>Applied Mathematics (4)</td><td>82</td></tr>
      <tr><td>Applied Physics (3)</td><td>77</td></tr>
    </tbody>
  </table>
  <table>
    <thead><tr><th>Semester</th><th>Marks</th><th>Percentage</th><th>SGPA</th></tr></thead>
    <tbody>
      <tr><td>1</td><td>540</td><td>77.1</td><td>8.2</td></tr>
      <tr><td>2</td><td>552</td><td>78.9</td><td>8.4</td></tr>
      <tr><td>3</td><td>532</td><td>76.0</td><td>8.0</td></tr>
    </tbody>
  </table>
</div>
"#;

pub fn listing_rows() -> Vec<String> {
    vec![
        "1 07114802822 SAMAKSH 81.2".to_string(),
        "2 07214802822 AMRIT RAJ 80.9".to_string(),
    ]
}

/// A scripted result listing page.
#[derive(Clone)]
pub struct FakeSite {
    pub rows: Vec<String>,
    pub detail_panel: String,
    pub unreachable: bool,
    pub overlay: bool,
    pub click_rejected: bool,
    pub force_click_fails: bool,
    pub panel_renders: bool,
    pub panel_hidden: bool,
}

impl Default for FakeSite {
    fn default() -> Self {
        FakeSite {
            rows: listing_rows(),
            detail_panel: FULL_PANEL.to_string(),
            unreachable: false,
            overlay: true,
            click_rejected: false,
            force_click_fails: false,
            panel_renders: true,
            panel_hidden: false,
        }
    }
}

pub struct FakeBrowser {
    site: FakeSite,
    launch_fails: bool,
    opened: AtomicUsize,
    closed: Arc<AtomicUsize>,
}

impl FakeBrowser {
    pub fn new(site: FakeSite) -> Self {
        FakeBrowser {
            site,
            launch_fails: false,
            opened: AtomicUsize::new(0),
            closed: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn unavailable() -> Self {
        FakeBrowser {
            launch_fails: true,
            ..FakeBrowser::new(FakeSite::default())
        }
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn open_sessions(&self) -> usize {
        self.opened() - self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Browser for FakeBrowser {
    type Session = FakeSession;

    async fn open(&self) -> Result<FakeSession, BrowserError> {
        if self.launch_fails {
            return Err(BrowserError::session("session not created"));
        }
        self.opened.fetch_add(1, Ordering::SeqCst);

        Ok(FakeSession {
            site: self.site.clone(),
            clicked: Mutex::new(None),
            closed: self.closed.clone(),
        })
    }
}

pub struct FakeSession {
    site: FakeSite,
    clicked: Mutex<Option<usize>>,
    closed: Arc<AtomicUsize>,
}

impl FakeSession {
    fn panel_open(&self) -> bool {
        self.site.panel_renders && self.clicked.lock().unwrap().is_some()
    }

    fn panel_displayed(&self) -> bool {
        self.panel_open() && !self.site.panel_hidden
    }
}

#[async_trait]
impl BrowserSession for FakeSession {
    type Row = usize;

    async fn goto(&self, _url: &str) -> Result<(), BrowserError> {
        if self.site.unreachable {
            return Err(BrowserError::session("net::ERR_NAME_NOT_RESOLVED"));
        }
        Ok(())
    }

    async fn count_rows(&self) -> Result<usize, BrowserError> {
        Ok(self.site.rows.len())
    }

    async fn click_if_present(&self, css: &str) -> Result<bool, BrowserError> {
        Ok(self.site.overlay && css == ".close-button")
    }

    async fn find_row_containing(&self, text: &str) -> Result<Option<usize>, BrowserError> {
        Ok(self.site.rows.iter().position(|row| row.contains(text)))
    }

    async fn scroll_into_view(&self, _row: &usize) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn is_displayed(&self, _row: &usize) -> Result<bool, BrowserError> {
        Ok(true)
    }

    async fn click(&self, row: &usize) -> Result<(), BrowserError> {
        if self.site.click_rejected {
            return Err(BrowserError::session("element click intercepted"));
        }
        *self.clicked.lock().unwrap() = Some(*row);
        Ok(())
    }

    async fn force_click(&self, row: &usize) -> Result<(), BrowserError> {
        if self.site.force_click_fails {
            return Err(BrowserError::session("javascript error: node is detached"));
        }
        *self.clicked.lock().unwrap() = Some(*row);
        Ok(())
    }

    async fn has_text(&self, text: &str) -> Result<bool, BrowserError> {
        Ok(self.panel_displayed() && self.site.detail_panel.contains(text))
    }

    async fn source(&self) -> Result<String, BrowserError> {
        let rows: String = self
            .site
            .rows
            .iter()
            .map(|row| format!("<tr><td>{}</td></tr>", row))
            .collect();
        let panel = if self.site.panel_hidden {
            format!(r#"<div style="display: none">{}</div>"#, self.site.detail_panel)
        } else if self.panel_open() {
            self.site.detail_panel.clone()
        } else {
            String::new()
        };

        Ok(format!(
            "<html><body><table><tbody>{}</tbody></table>{}</body></html>",
            rows, panel
        ))
    }

    async fn close(self) -> Result<(), BrowserError> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct TestApp {
    pub address: String,
    pub browser: Arc<FakeBrowser>,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn post_student(&self, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/student", self.address))
            .bearer_auth(TOKEN)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub async fn spawn_app(browser: FakeBrowser) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let auth_settings = AuthSettings {
        token: TOKEN.to_string(),
        identity_number: IDENTITY_NUMBER.to_string(),
    };
    let browser = Arc::new(browser);

    let server = run(listener, auth_settings, browser.clone()).expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        browser,
        client: reqwest::Client::new(),
    }
}
