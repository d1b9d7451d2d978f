use crate::YoutubeError;
use crate::method::Method;
use bon::Builder;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Builder)]
#[builder(on(String, into))]
pub struct ChannelsParams {
    #[builder(default = "statistics".to_string())]
    pub part: String,
    #[serde(rename = "id")]
    pub channel_id: String,
    #[serde(rename = "key")]
    pub api_key: String,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct ChannelsResponse {
    #[serde(default)]
    pub items: Vec<Channel>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Channel {
    pub id: Option<String>,
    pub statistics: Option<ChannelStatistics>,
}

// The Data API encodes counters as decimal strings.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct ChannelStatistics {
    #[serde(rename = "subscriberCount")]
    pub subscriber_count: Option<String>,
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    #[serde(rename = "videoCount")]
    pub video_count: Option<String>,
    #[serde(rename = "hiddenSubscriberCount", default)]
    pub hidden_subscriber_count: bool,
}

impl ChannelsResponse {
    /// Subscriber count of the first matching channel.
    ///
    /// An empty item list means the id matched nothing. A channel without
    /// statistics reports 0.
    pub fn subscriber_count(&self, channel_id: &str) -> Result<u64, YoutubeError> {
        let channel = self
            .items
            .first()
            .ok_or_else(|| YoutubeError::ChannelNotFound(channel_id.to_string()))?;

        match channel
            .statistics
            .as_ref()
            .and_then(|s| s.subscriber_count.as_deref())
        {
            None => Ok(0),
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| YoutubeError::InvalidCount(raw.to_string())),
        }
    }
}

pub struct Channels;

impl Method for Channels {
    const PATH: &'static str = "/youtube/v3/channels";

    type Response = ChannelsResponse;
    type Params = ChannelsParams;
}
