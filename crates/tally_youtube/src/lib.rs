pub mod channels;
pub mod method;

use channels::{Channels, ChannelsParams};
use reqwest::{Client, ClientBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

pub const BASE_URL: &str = "https://www.googleapis.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Error, Debug)]
pub enum YoutubeError {
    #[error("request failed")]
    Http(#[from] reqwest::Error),
    #[error("no channel found for id={0}")]
    ChannelNotFound(String),
    #[error("subscriberCount is not a number: {0:?}")]
    InvalidCount(String),
}

pub struct YoutubeClient {
    api_key: String,
    base_url: String,
    reqwest: Client,
}

impl YoutubeClient {
    pub fn new(api_key: &str) -> reqwest::Result<Self> {
        Self::with_base_url(api_key, BASE_URL)
    }

    pub fn with_base_url(api_key: &str, base_url: &str) -> reqwest::Result<Self> {
        let reqwest = ClientBuilder::new().timeout(DEFAULT_TIMEOUT).build()?;

        Ok(Self {
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            reqwest,
        })
    }

    pub(crate) async fn get<T: DeserializeOwned, P: Serialize + ?Sized>(
        &self,
        url: &str,
        params: &P,
    ) -> reqwest::Result<T> {
        // The API key rides in the query string; keep it out of error text.
        let response = self
            .reqwest
            .get(url)
            .query(params)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(reqwest::Error::without_url)?;

        response
            .json::<T>()
            .await
            .map_err(reqwest::Error::without_url)
    }

    pub async fn call<M: method::Method>(&self, params: M::Params) -> reqwest::Result<M::Response> {
        let url = format!("{}{}", self.base_url, M::PATH);
        self.get(&url, &params).await
    }

    /// Current subscriber count of `channel_id`.
    pub async fn subscriber_count(&self, channel_id: &str) -> Result<u64, YoutubeError> {
        let params = ChannelsParams::builder()
            .channel_id(channel_id)
            .api_key(self.api_key.as_str())
            .build();

        let response = self.call::<Channels>(params).await?;
        response.subscriber_count(channel_id)
    }
}
