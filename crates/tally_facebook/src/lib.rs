use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tally_markup::{ScrapeError, browser_headers, og_description, parse_human_count};

pub const BASE_URL: &str = "https://www.facebook.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(25);

static FOLLOWERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([0-9][0-9.,]*\s*[KMB]?)\s+followers").expect("followers pattern")
});

static PEOPLE_FOLLOW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([0-9][0-9.,]*\s*[KMB]?)\s+people\s+follow").expect("people follow pattern")
});

pub struct FacebookClient {
    base_url: String,
    reqwest: Client,
}

impl FacebookClient {
    pub fn new() -> reqwest::Result<Self> {
        Self::with_base_url(BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> reqwest::Result<Self> {
        let reqwest = ClientBuilder::new()
            .default_headers(browser_headers())
            .redirect(Policy::limited(10))
            .timeout(DEFAULT_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            reqwest,
        })
    }

    /// `page` is either a full URL or a page slug under the base URL.
    pub fn page_url(&self, page: &str) -> String {
        let page = page.trim();
        if page.starts_with("http://") || page.starts_with("https://") {
            page.to_string()
        } else {
            format!("{}/{}", self.base_url, page.trim_matches('/'))
        }
    }

    pub(crate) async fn get_html(&self, url: &str) -> reqwest::Result<String> {
        let response = self.reqwest.get(url).send().await?;
        let response = response.error_for_status()?;

        response.text().await
    }

    pub async fn page_followers(&self, page: &str) -> Result<u64, ScrapeError> {
        let url = self.page_url(page);
        let html = self.get_html(&url).await?;
        followers_from_page(&html).ok_or(ScrapeError::CountNotFound(url))
    }
}

/// Follower count from a page's markup.
///
/// Searches the `og:description` when present, otherwise the whole body, for
/// "<count> followers" and then "<count> people follow".
pub fn followers_from_page(html: &str) -> Option<u64> {
    let description = og_description(html);
    let text = description.as_deref().unwrap_or(html);

    FOLLOWERS
        .captures(text)
        .or_else(|| PEOPLE_FOLLOW.captures(text))
        .map(|caps| parse_human_count(&caps[1]))
}
