//! Addressing for the upstream job board.

use url::Url;

/// Listing page of the Texas A&M natural resources job board.
pub const DEFAULT_LISTING_URL: &str = "https://jobs.rwfm.tamu.edu/search/";

/// Client signature sent with every upstream request.
pub const USER_AGENT: &str = "ecology-vibe-exporter/1.0 (+https://github.com/KTorres23)";

#[derive(Debug, Clone)]
pub struct Site {
    listing: Url,
    base: Url,
}

impl Site {
    pub fn from_url(listing: &str) -> Result<Self, url::ParseError> {
        let listing = Url::parse(listing)?;
        let base = listing.join("/")?;
        Ok(Self { listing, base })
    }

    pub fn listing(&self) -> &Url {
        &self.listing
    }

    /// Listing URL with `PageSize` and, when given, `PageNum` appended.
    pub fn listing_url(&self, page_size: u32, page_num: Option<u32>) -> Url {
        let mut url = self.listing.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("PageSize", &page_size.to_string());
            if let Some(page) = page_num {
                query.append_pair("PageNum", &page.to_string());
            }
        }
        url
    }

    /// Turns an anchor href into an absolute URL on this site.
    pub fn normalize_link(&self, href: &str) -> String {
        let href = href.trim();
        if href.is_empty() {
            return String::new();
        }
        if href.starts_with("//") {
            return format!("https:{href}");
        }
        if href.starts_with("http") {
            return href.to_string();
        }
        // Root-relative and plain relative paths both resolve against the
        // site root.
        match self.base.join(href) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}{}", self.base, href.trim_start_matches('/')),
        }
    }
}

impl Default for Site {
    fn default() -> Self {
        let listing = Url::parse(DEFAULT_LISTING_URL).expect("default listing URL is valid");
        let base = listing.join("/").expect("default listing URL has a root");
        Self { listing, base }
    }
}
