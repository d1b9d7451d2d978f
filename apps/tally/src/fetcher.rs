use anyhow::Context;
use async_trait::async_trait;
use tally_facebook::FacebookClient;
use tally_instagram::InstagramClient;
use tally_instagram::graph::GraphClient;
use tally_shared_models::Platform;
use tally_youtube::YoutubeClient;

use crate::config::{Config, FacebookConfig, InstagramConfig, YoutubeConfig};

/// One way of obtaining a platform's follower count.
#[async_trait]
pub trait FollowerFetcher: Send + Sync {
    fn platform(&self) -> Platform;

    /// Provenance label written to the record's `source` map.
    fn source(&self) -> &'static str;

    async fn fetch(&self) -> anyhow::Result<u64>;
}

pub struct YoutubeFetcher {
    client: YoutubeClient,
    channel_id: String,
}

impl YoutubeFetcher {
    pub fn new(config: &YoutubeConfig) -> anyhow::Result<Self> {
        let client = match &config.base_url {
            Some(base) => YoutubeClient::with_base_url(&config.api_key, base),
            None => YoutubeClient::new(&config.api_key),
        }
        .context("Failed to build YouTube client")?;

        Ok(Self {
            client,
            channel_id: config.channel_id.clone(),
        })
    }
}

#[async_trait]
impl FollowerFetcher for YoutubeFetcher {
    fn platform(&self) -> Platform {
        Platform::Youtube
    }

    fn source(&self) -> &'static str {
        "youtube_api"
    }

    async fn fetch(&self) -> anyhow::Result<u64> {
        self.client
            .subscriber_count(&self.channel_id)
            .await
            .with_context(|| format!("YouTube channel {}", self.channel_id))
    }
}

pub struct InstagramScrapeFetcher {
    client: InstagramClient,
    username: String,
}

#[async_trait]
impl FollowerFetcher for InstagramScrapeFetcher {
    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    fn source(&self) -> &'static str {
        "instagram_og_description"
    }

    async fn fetch(&self) -> anyhow::Result<u64> {
        self.client
            .profile_followers(&self.username)
            .await
            .with_context(|| format!("Instagram profile {}", self.username))
    }
}

pub struct InstagramGraphFetcher {
    client: GraphClient,
    user_id: String,
}

#[async_trait]
impl FollowerFetcher for InstagramGraphFetcher {
    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    fn source(&self) -> &'static str {
        "instagram_graph_api"
    }

    async fn fetch(&self) -> anyhow::Result<u64> {
        self.client
            .followers_count(&self.user_id)
            .await
            .with_context(|| format!("Instagram Graph user {}", self.user_id))
    }
}

/// A count supplied by hand; never touches the network.
pub struct ManualFetcher {
    pub platform: Platform,
    pub count: u64,
}

#[async_trait]
impl FollowerFetcher for ManualFetcher {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn source(&self) -> &'static str {
        "manual"
    }

    async fn fetch(&self) -> anyhow::Result<u64> {
        Ok(self.count)
    }
}

pub struct FacebookFetcher {
    client: FacebookClient,
    page: String,
}

impl FacebookFetcher {
    pub fn new(config: &FacebookConfig) -> anyhow::Result<Self> {
        let client = match &config.base_url {
            Some(base) => FacebookClient::with_base_url(base),
            None => FacebookClient::new(),
        }
        .context("Failed to build Facebook client")?;

        Ok(Self {
            client,
            page: config.page.clone(),
        })
    }
}

#[async_trait]
impl FollowerFetcher for FacebookFetcher {
    fn platform(&self) -> Platform {
        Platform::Facebook
    }

    fn source(&self) -> &'static str {
        "facebook_page"
    }

    async fn fetch(&self) -> anyhow::Result<u64> {
        self.client
            .page_followers(&self.page)
            .await
            .with_context(|| format!("Facebook page {}", self.page))
    }
}

fn instagram_fetcher(config: &InstagramConfig) -> anyhow::Result<Box<dyn FollowerFetcher>> {
    let fetcher: Box<dyn FollowerFetcher> = match config {
        InstagramConfig::Scrape { username, base_url } => {
            let client = match base_url {
                Some(base) => InstagramClient::with_base_url(base),
                None => InstagramClient::new(),
            }
            .context("Failed to build Instagram client")?;
            Box::new(InstagramScrapeFetcher {
                client,
                username: username.clone(),
            })
        }
        InstagramConfig::Graph {
            access_token,
            user_id,
            base_url,
        } => {
            let client = match base_url {
                Some(base) => GraphClient::with_base_url(access_token, base),
                None => GraphClient::new(access_token),
            }
            .context("Failed to build Instagram Graph client")?;
            Box::new(InstagramGraphFetcher {
                client,
                user_id: user_id.clone(),
            })
        }
        InstagramConfig::Manual { followers } => Box::new(ManualFetcher {
            platform: Platform::Instagram,
            count: *followers,
        }),
    };

    Ok(fetcher)
}

/// One fetcher per enabled platform, in the configured order.
pub fn build_fetchers(config: &Config) -> anyhow::Result<Vec<Box<dyn FollowerFetcher>>> {
    let mut fetchers: Vec<Box<dyn FollowerFetcher>> = Vec::with_capacity(config.platforms.len());

    for platform in &config.platforms {
        match platform {
            Platform::Youtube => fetchers.push(Box::new(YoutubeFetcher::new(&config.youtube)?)),
            Platform::Instagram => {
                if let Some(instagram) = &config.instagram {
                    fetchers.push(instagram_fetcher(instagram)?);
                }
            }
            Platform::Facebook => {
                if let Some(facebook) = &config.facebook {
                    fetchers.push(Box::new(FacebookFetcher::new(facebook)?));
                }
            }
        }
    }

    Ok(fetchers)
}
