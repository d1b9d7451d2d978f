pub mod graph;

use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tally_markup::{ScrapeError, browser_headers, leading_token, og_description, parse_human_count};

pub const BASE_URL: &str = "https://www.instagram.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(25);

/// Reads follower counts from public profile pages, no login.
pub struct InstagramClient {
    base_url: String,
    reqwest: Client,
}

impl InstagramClient {
    pub fn new() -> reqwest::Result<Self> {
        Self::with_base_url(BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> reqwest::Result<Self> {
        let reqwest = ClientBuilder::new()
            .default_headers(browser_headers())
            .timeout(DEFAULT_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            reqwest,
        })
    }

    pub fn profile_url(&self, username: &str) -> String {
        format!("{}/{}/", self.base_url, username.trim_start_matches('@'))
    }

    pub(crate) async fn get_html(&self, url: &str) -> reqwest::Result<String> {
        let response = self.reqwest.get(url).send().await?;
        let response = response.error_for_status()?;

        response.text().await
    }

    pub async fn profile_followers(&self, username: &str) -> Result<u64, ScrapeError> {
        let html = self.get_html(&self.profile_url(username)).await?;
        followers_from_profile(&html)
    }
}

/// Follower count from the profile page's `og:description`, which reads
/// "43 Followers, 1 Following, 0 Posts - See Instagram photos…".
pub fn followers_from_profile(html: &str) -> Result<u64, ScrapeError> {
    let description = og_description(html).ok_or(ScrapeError::MissingDescription)?;
    Ok(parse_human_count(leading_token(&description)))
}
