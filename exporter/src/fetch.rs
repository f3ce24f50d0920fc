//! Blocking access to the job board.

use std::time::Duration;

use common::detail::best_text_block;
use common::{Site, USER_AGENT};
use scraper::Html;
use thiserror::Error;
use tracing::debug;

/// Timeout for listing page requests.
const LISTING_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),
}

/// Source of listing and detail pages.
pub trait JobBoard {
    fn fetch_listing(&self, page_size: u32, page_num: u32) -> Result<String, FetchError>;
    fn fetch_detail(&self, link: &str) -> Result<String, FetchError>;
}

/// The real job board over HTTP.
pub struct HttpBoard {
    client: reqwest::blocking::Client,
    site: Site,
    detail_timeout: Duration,
}

impl HttpBoard {
    pub fn new(site: Site, detail_timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            site,
            detail_timeout,
        })
    }

    fn get(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        let response = self.client.get(url).timeout(timeout).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        Ok(response.text()?)
    }
}

impl JobBoard for HttpBoard {
    fn fetch_listing(&self, page_size: u32, page_num: u32) -> Result<String, FetchError> {
        let url = self.site.listing_url(page_size, Some(page_num));
        self.get(url.as_str(), LISTING_TIMEOUT)
    }

    fn fetch_detail(&self, link: &str) -> Result<String, FetchError> {
        self.get(link, self.detail_timeout)
    }
}

/// Full description from a job's detail page, or an empty string when the
/// page could not be fetched.
pub fn full_description(board: &impl JobBoard, link: &str) -> String {
    if link.is_empty() {
        return String::new();
    }
    match board.fetch_detail(link) {
        Ok(body) => best_text_block(&Html::parse_document(&body)),
        Err(e) => {
            debug!("detail fetch failed for {}: {}", link, e);
            String::new()
        }
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::cell::Cell;
    use std::collections::HashMap;

    use super::{FetchError, JobBoard};

    /// In-memory board. Listing page `n` is `pages[n - 1]`; anything past the
    /// end, or a detail link not in `details`, answers 503.
    #[derive(Default)]
    pub struct FakeBoard {
        pub pages: Vec<String>,
        pub details: HashMap<String, String>,
        pub listing_calls: Cell<u32>,
        pub detail_calls: Cell<u32>,
    }

    fn unavailable() -> FetchError {
        FetchError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE)
    }

    impl JobBoard for FakeBoard {
        fn fetch_listing(&self, _page_size: u32, page_num: u32) -> Result<String, FetchError> {
            self.listing_calls.set(self.listing_calls.get() + 1);
            self.pages
                .get(page_num as usize - 1)
                .cloned()
                .ok_or_else(unavailable)
        }

        fn fetch_detail(&self, link: &str) -> Result<String, FetchError> {
            self.detail_calls.set(self.detail_calls.get() + 1);
            self.details.get(link).cloned().ok_or_else(unavailable)
        }
    }

    /// Listing page with one card per id.
    pub fn listing(ids: &[u32]) -> String {
        let cards: String = ids
            .iter()
            .map(|id| {
                format!(
                    r#"<div class="job"><h3>Job {id}</h3><p>Snippet {id}</p><a href="/view-job/?id={id}">View</a></div>"#
                )
            })
            .collect();
        format!("<html><body>{cards}</body></html>")
    }

    pub fn link(id: u32) -> String {
        format!("https://jobs.rwfm.tamu.edu/view-job/?id={id}")
    }
}
