use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, UPGRADE_INSECURE_REQUESTS};
use thirtyfour::{ChromiumLikeCapabilities, DesiredCapabilities, WebDriver};
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use crate::error::{RenderFailure, SetupFailure};

// Headless Chrome advertises itself as HeadlessChrome, which the anti-bot
// layer keys on. Both backends present this desktop UA instead.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Interstitial fingerprints: seen in the page title on the browser path,
/// in the body on the plain HTTP path.
const CHALLENGE_MARKERS: &[&str] =
    &["Just a moment", "Attention Required", "Checking your browser"];

const PAGE_LOAD_TIMEOUT: Duration = Duration::from_secs(20);
const POLL_INTERVAL: Duration = Duration::from_millis(500);
const SETTLE_DELAY: Duration = Duration::from_millis(1500);
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Turns a URL into rendered HTML. The headless browser is the default
/// backend; anything that can produce the final DOM can stand in for it.
#[async_trait]
pub trait Render: Send + Sync {
    async fn render(&self, url: &str) -> Result<String, RenderFailure>;
}

/// Headless Chrome behind a WebDriver endpoint.
///
/// One throwaway session per page: no cookies or tab state leaks between
/// subpages, and a wedged tab cannot poison the rest of the run.
pub struct Browser {
    endpoint: String,
}

impl Browser {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Browser { endpoint: endpoint.into() }
    }

    /// Open and immediately quit one session, so an unusable endpoint fails
    /// the run before any page work starts.
    pub async fn probe(&self) -> Result<(), SetupFailure> {
        let driver = self.session().await.map_err(|source| SetupFailure {
            endpoint: self.endpoint.clone(),
            source,
        })?;
        if let Err(e) = driver.quit().await {
            warn!("probe session did not quit cleanly: {}", e);
        }
        Ok(())
    }

    async fn session(&self) -> Result<WebDriver, thirtyfour::error::WebDriverError> {
        let mut caps = DesiredCapabilities::chrome();
        caps.add_arg("--headless=new")?;
        caps.add_arg("--no-sandbox")?;
        caps.add_arg("--disable-dev-shm-usage")?;
        caps.add_arg("--disable-blink-features=AutomationControlled")?;
        caps.add_arg(&format!("--user-agent={}", USER_AGENT))?;
        WebDriver::new(self.endpoint.as_str(), caps).await
    }
}

#[async_trait]
impl Render for Browser {
    async fn render(&self, url: &str) -> Result<String, RenderFailure> {
        let driver = self.session().await?;
        // quit() must run on the failure path too, or chromedriver leaks
        // sessions for the rest of the run.
        let outcome = load_and_wait(&driver, url).await;
        if let Err(e) = driver.quit().await {
            warn!("webdriver session did not quit cleanly: {}", e);
        }
        outcome
    }
}

async fn load_and_wait(driver: &WebDriver, url: &str) -> Result<String, RenderFailure> {
    driver.set_page_load_timeout(PAGE_LOAD_TIMEOUT).await?;
    driver.goto(url).await?;

    let deadline = Instant::now() + PAGE_LOAD_TIMEOUT;
    while !page_ready(driver).await? {
        if Instant::now() >= deadline {
            let title = driver.title().await?;
            if is_challenge(&title) {
                return Err(RenderFailure::Challenge { url: url.to_string() });
            }
            return Err(RenderFailure::Timeout {
                url: url.to_string(),
                timeout: PAGE_LOAD_TIMEOUT,
            });
        }
        sleep(POLL_INTERVAL).await;
    }

    // Late scripts keep mutating the DOM after readyState flips.
    sleep(SETTLE_DELAY).await;
    Ok(driver.source().await?)
}

/// Document complete and no interstitial title showing. A challenge page
/// reports itself complete too; it clears by navigating, so keep polling.
async fn page_ready(driver: &WebDriver) -> Result<bool, RenderFailure> {
    let state: String = driver
        .execute("return document.readyState", Vec::new())
        .await?
        .convert()?;
    if state != "complete" {
        debug!("document.readyState = {}", state);
        return Ok(false);
    }
    Ok(!is_challenge(&driver.title().await?))
}

/// Plain HTTP fallback for `--no-browser`. Sends browser-grade headers; a
/// body still carrying a challenge marker is a failure, not a result,
/// because this path has no way to clear it.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(HTTP_TIMEOUT)
            .build()?;
        Ok(HttpFetcher { client })
    }
}

#[async_trait]
impl Render for HttpFetcher {
    async fn render(&self, url: &str) -> Result<String, RenderFailure> {
        let resp = self.client.get(url).send().await?.error_for_status()?;
        let body = resp.text().await?;
        if is_challenge(&body) {
            return Err(RenderFailure::Challenge { url: url.to_string() });
        }
        Ok(body)
    }
}

fn is_challenge(text: &str) -> bool {
    CHALLENGE_MARKERS.iter().any(|m| text.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn challenge_markers_match_interstitials() {
        assert!(is_challenge("Just a moment..."));
        assert!(is_challenge("Attention Required! | Cloudflare"));
        assert!(!is_challenge("People : School of Computing and Information Systems"));
    }

    #[test]
    fn challenge_fixture_is_recognized() {
        let html = std::fs::read_to_string("tests/fixtures/challenge.html").unwrap();
        assert!(is_challenge(&html));
    }

    #[test]
    fn real_pages_are_not_challenges() {
        for fixture in ["tests/fixtures/people.html", "tests/fixtures/academic.html"] {
            let html = std::fs::read_to_string(fixture).unwrap();
            assert!(!is_challenge(&html), "{} misread as a challenge", fixture);
        }
    }
}
