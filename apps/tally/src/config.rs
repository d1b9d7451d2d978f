use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tally_shared_models::Platform;
use tally_store::DEFAULT_OUTPUT;
use thiserror::Error;
use tracing::warn;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Platforms to collect, comma separated (youtube is mandatory)
    #[arg(
        long,
        env = "TALLY_PLATFORMS",
        value_delimiter = ',',
        default_values_t = [Platform::Youtube, Platform::Instagram]
    )]
    pub platforms: Vec<Platform>,

    /// Where the follower record is read from and written to
    #[arg(short, long, env = "TALLY_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// How the Instagram count is obtained
    #[arg(long, env = "IG_MODE", value_enum, default_value_t = InstagramMode::Auto)]
    pub instagram_mode: InstagramMode,

    /// Fetch and print the record without writing it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InstagramMode {
    /// Graph API when credentials are set, else scrape when a username is set, else IG_FOLLOWERS
    Auto,
    Scrape,
    Graph,
    Manual,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing env var: {0}")]
    Missing(&'static str),
    #[error("{0} is mandatory and cannot be disabled")]
    MandatoryDisabled(Platform),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YoutubeConfig {
    pub api_key: String,
    pub channel_id: String,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstagramConfig {
    Scrape {
        username: String,
        base_url: Option<String>,
    },
    Graph {
        access_token: String,
        user_id: String,
        base_url: Option<String>,
    },
    Manual {
        followers: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacebookConfig {
    pub page: String,
    pub base_url: Option<String>,
}

/// Everything a run needs, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub output: PathBuf,
    pub platforms: Vec<Platform>,
    pub youtube: YoutubeConfig,
    pub instagram: Option<InstagramConfig>,
    pub facebook: Option<FacebookConfig>,
    pub dry_run: bool,
}

impl Config {
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        Self::from_lookup(args, |key| std::env::var(key).ok())
    }

    /// Builds the config from `args` plus settings resolved through `lookup`.
    ///
    /// Blank values count as unset. Only settings of enabled platforms are
    /// required.
    pub fn from_lookup<F>(args: &Args, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings = Settings(lookup);

        let mut platforms = Vec::with_capacity(args.platforms.len());
        for platform in &args.platforms {
            if !platforms.contains(platform) {
                platforms.push(*platform);
            }
        }
        if !platforms.contains(&Platform::Youtube) {
            return Err(ConfigError::MandatoryDisabled(Platform::Youtube));
        }

        let youtube = YoutubeConfig {
            api_key: settings.required("YT_API_KEY")?,
            channel_id: settings.required("YT_CHANNEL_ID")?,
            base_url: settings.get("YT_API_BASE"),
        };

        let instagram = if platforms.contains(&Platform::Instagram) {
            Some(instagram_config(args.instagram_mode, &settings)?)
        } else {
            None
        };

        let facebook = if platforms.contains(&Platform::Facebook) {
            Some(FacebookConfig {
                page: settings.required("FB_PAGE")?,
                base_url: settings.get("FB_BASE_URL"),
            })
        } else {
            None
        };

        Ok(Self {
            output: args.output.clone(),
            platforms,
            youtube,
            instagram,
            facebook,
            dry_run: args.dry_run,
        })
    }
}

fn instagram_config<F>(mode: InstagramMode, settings: &Settings<F>) -> Result<InstagramConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mode = match mode {
        InstagramMode::Auto if settings.has("IG_ACCESS_TOKEN") && settings.has("IG_USER_ID") => {
            InstagramMode::Graph
        }
        InstagramMode::Auto if settings.has("IG_USERNAME") => InstagramMode::Scrape,
        InstagramMode::Auto if settings.has("IG_FOLLOWERS") => InstagramMode::Manual,
        // Nothing configured: a silent 0 would overwrite the last real count.
        InstagramMode::Auto => return Err(ConfigError::Missing("IG_USERNAME")),
        explicit => explicit,
    };

    Ok(match mode {
        InstagramMode::Graph => InstagramConfig::Graph {
            access_token: settings.required("IG_ACCESS_TOKEN")?,
            user_id: settings.required("IG_USER_ID")?,
            base_url: settings.get("IG_GRAPH_BASE"),
        },
        InstagramMode::Scrape => InstagramConfig::Scrape {
            username: settings.required("IG_USERNAME")?,
            base_url: settings.get("IG_BASE_URL"),
        },
        InstagramMode::Manual | InstagramMode::Auto => InstagramConfig::Manual {
            followers: manual_followers(settings.get("IG_FOLLOWERS")),
        },
    })
}

fn manual_followers(raw: Option<String>) -> u64 {
    let Some(raw) = raw else {
        return 0;
    };
    raw.parse().unwrap_or_else(|_| {
        warn!(value = %raw, "IG_FOLLOWERS is not a count, using 0");
        0
    })
}

struct Settings<F>(F);

impl<F> Settings<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::Missing(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["tally"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const YT: [(&str, &str); 2] = [("YT_API_KEY", "key"), ("YT_CHANNEL_ID", "UC123")];

    #[test]
    fn youtube_settings_are_required() {
        let err = Config::from_lookup(&args(&[]), env(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("YT_API_KEY"));
        assert_eq!(err.to_string(), "Missing env var: YT_API_KEY");

        let err = Config::from_lookup(&args(&[]), env(&[("YT_API_KEY", "key")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("YT_CHANNEL_ID"));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let err = Config::from_lookup(
            &args(&[]),
            env(&[("YT_API_KEY", "   "), ("YT_CHANNEL_ID", "UC1")]),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("YT_API_KEY"));
    }

    #[test]
    fn youtube_cannot_be_disabled() {
        let err = Config::from_lookup(&args(&["--platforms", "instagram"]), env(&YT)).unwrap_err();
        assert_eq!(err, ConfigError::MandatoryDisabled(Platform::Youtube));
    }

    #[test]
    fn defaults_to_youtube_and_instagram() {
        let config =
            Config::from_lookup(&args(&[]), env(&[YT[0], YT[1], ("IG_USERNAME", "someone")])).unwrap();
        assert_eq!(config.platforms, vec![Platform::Youtube, Platform::Instagram]);
        assert_eq!(config.output, PathBuf::from("followers.json"));
        assert_eq!(config.youtube.channel_id, "UC123");
        assert_eq!(config.facebook, None);
        assert!(!config.dry_run);
    }

    #[test]
    fn platforms_are_deduplicated_in_order() {
        let config = Config::from_lookup(
            &args(&["--platforms", "facebook,youtube,fb"]),
            env(&[YT[0], YT[1], ("FB_PAGE", "acme")]),
        )
        .unwrap();
        assert_eq!(config.platforms, vec![Platform::Facebook, Platform::Youtube]);
        assert_eq!(config.instagram, None);
        assert_eq!(config.facebook.unwrap().page, "acme");
    }

    #[test]
    fn facebook_requires_page() {
        let err = Config::from_lookup(&args(&["--platforms", "youtube,facebook"]), env(&YT))
            .unwrap_err();
        assert_eq!(err, ConfigError::Missing("FB_PAGE"));
    }

    #[test]
    fn auto_mode_prefers_graph_then_scrape_then_manual() {
        let graph = Config::from_lookup(
            &args(&[]),
            env(&[
                YT[0],
                YT[1],
                ("IG_ACCESS_TOKEN", "tok"),
                ("IG_USER_ID", "1784"),
                ("IG_USERNAME", "someone"),
            ]),
        )
        .unwrap();
        assert!(matches!(graph.instagram, Some(InstagramConfig::Graph { .. })));

        let scrape = Config::from_lookup(
            &args(&[]),
            env(&[YT[0], YT[1], ("IG_ACCESS_TOKEN", "tok"), ("IG_USERNAME", "someone")]),
        )
        .unwrap();
        assert_eq!(
            scrape.instagram,
            Some(InstagramConfig::Scrape {
                username: "someone".to_string(),
                base_url: None,
            })
        );

        let manual =
            Config::from_lookup(&args(&[]), env(&[YT[0], YT[1], ("IG_FOLLOWERS", "1200")])).unwrap();
        assert_eq!(manual.instagram, Some(InstagramConfig::Manual { followers: 1200 }));
    }

    #[test]
    fn auto_mode_without_instagram_settings_is_an_error() {
        let err = Config::from_lookup(&args(&[]), env(&YT)).unwrap_err();
        assert_eq!(err, ConfigError::Missing("IG_USERNAME"));

        let err = Config::from_lookup(&args(&[]), env(&[YT[0], YT[1], ("IG_FOLLOWERS", " ")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::Missing("IG_USERNAME"));
    }

    #[test]
    fn explicit_manual_mode_defaults_to_zero() {
        let config =
            Config::from_lookup(&args(&["--instagram-mode", "manual"]), env(&YT)).unwrap();
        assert_eq!(config.instagram, Some(InstagramConfig::Manual { followers: 0 }));
    }

    #[test]
    fn instagram_settings_not_needed_when_disabled() {
        let config = Config::from_lookup(&args(&["--platforms", "youtube"]), env(&YT)).unwrap();
        assert_eq!(config.instagram, None);
    }

    #[test]
    fn explicit_mode_requires_its_settings() {
        let err = Config::from_lookup(&args(&["--instagram-mode", "scrape"]), env(&YT)).unwrap_err();
        assert_eq!(err, ConfigError::Missing("IG_USERNAME"));

        let err = Config::from_lookup(
            &args(&["--instagram-mode", "graph"]),
            env(&[YT[0], YT[1], ("IG_ACCESS_TOKEN", "tok")]),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("IG_USER_ID"));
    }

    #[test]
    fn manual_followers_default_to_zero_when_unparsable() {
        let manual = |value: &str| {
            Config::from_lookup(
                &args(&["--instagram-mode", "manual"]),
                env(&[YT[0], YT[1], ("IG_FOLLOWERS", value), ("IG_USERNAME", "someone")]),
            )
            .unwrap()
            .instagram
        };
        assert_eq!(manual("1500"), Some(InstagramConfig::Manual { followers: 1500 }));
        assert_eq!(manual("lots"), Some(InstagramConfig::Manual { followers: 0 }));
        assert_eq!(manual("-3"), Some(InstagramConfig::Manual { followers: 0 }));
    }

    #[test]
    fn base_url_overrides_are_picked_up() {
        let config = Config::from_lookup(
            &args(&["--output", "out/counts.json", "--dry-run"]),
            env(&[
                YT[0],
                YT[1],
                ("YT_API_BASE", "http://127.0.0.1:9000"),
                ("IG_USERNAME", "someone"),
                ("IG_BASE_URL", "http://127.0.0.1:9001"),
            ]),
        )
        .unwrap();
        assert_eq!(config.youtube.base_url.as_deref(), Some("http://127.0.0.1:9000"));
        assert_eq!(
            config.instagram,
            Some(InstagramConfig::Scrape {
                username: "someone".to_string(),
                base_url: Some("http://127.0.0.1:9001".to_string()),
            })
        );
        assert_eq!(config.output, PathBuf::from("out/counts.json"));
        assert!(config.dry_run);
    }
}
