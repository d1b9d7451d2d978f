use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Platforms a follower count can be collected from.
///
/// Declaration order is the order keys appear in the written record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Youtube,
    Instagram,
    Facebook,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Youtube, Platform::Instagram, Platform::Facebook];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
        }
    }

    /// A mandatory platform aborts the whole run when its fetch fails.
    pub fn is_mandatory(&self) -> bool {
        matches!(self, Platform::Youtube)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown platform '{0}' (expected youtube, instagram or facebook)")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "youtube" | "yt" => Ok(Platform::Youtube),
            "instagram" | "ig" => Ok(Platform::Instagram),
            "facebook" | "fb" => Ok(Platform::Facebook),
            _ => Err(UnknownPlatform(s.trim().to_string())),
        }
    }
}

/// Provenance label used when a count was carried over from the previous run.
pub const CACHED_SOURCE: &str = "cached";

/// The persisted snapshot: one count per platform plus run metadata.
///
/// Only serialized here; previous files are read leniently by
/// `tally_store::record_from_json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FollowerRecord {
    #[serde(flatten)]
    pub counts: BTreeMap<Platform, u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_utc: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub source: BTreeMap<Platform, String>,
}

impl FollowerRecord {
    pub fn count(&self, platform: Platform) -> Option<u64> {
        self.counts.get(&platform).copied()
    }

    /// Count to fall back on when a fresh fetch fails.
    pub fn fallback_count(&self, platform: Platform) -> u64 {
        self.count(platform).unwrap_or(0)
    }

    pub fn set(&mut self, platform: Platform, count: u64, source: impl Into<String>) {
        self.counts.insert(platform, count);
        self.source.insert(platform, source.into());
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
