use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::DEFAULT_TIMEOUT;

pub const GRAPH_BASE_URL: &str = "https://graph.facebook.com/v19.0";

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("request failed")]
    Http(#[from] reqwest::Error),
    #[error("response has no followers_count for user {0}")]
    MissingField(String),
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UserFields {
    pub id: Option<String>,
    pub followers_count: Option<u64>,
}

#[derive(Serialize, Debug)]
struct FieldsParams<'a> {
    fields: &'a str,
}

/// Graph API client for professional accounts, authenticated with a static
/// access token.
pub struct GraphClient {
    access_token: String,
    base_url: String,
    reqwest: Client,
}

impl GraphClient {
    pub fn new(access_token: &str) -> reqwest::Result<Self> {
        Self::with_base_url(access_token, GRAPH_BASE_URL)
    }

    pub fn with_base_url(access_token: &str, base_url: &str) -> reqwest::Result<Self> {
        let reqwest = ClientBuilder::new().timeout(DEFAULT_TIMEOUT).build()?;

        Ok(Self {
            access_token: access_token.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            reqwest,
        })
    }

    pub async fn user_fields(&self, user_id: &str) -> reqwest::Result<UserFields> {
        self.reqwest
            .get(format!("{}/{}", self.base_url, user_id))
            .query(&FieldsParams {
                fields: "followers_count",
            })
            .bearer_auth(&self.access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    pub async fn followers_count(&self, user_id: &str) -> Result<u64, GraphError> {
        self.user_fields(user_id)
            .await?
            .followers_count
            .ok_or_else(|| GraphError::MissingField(user_id.to_string()))
    }
}
