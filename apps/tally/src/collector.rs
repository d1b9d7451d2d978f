use chrono::{DateTime, SecondsFormat, Utc};
use tally_shared_models::{CACHED_SOURCE, FollowerRecord};
use tracing::{info, warn};

use crate::fetcher::FollowerFetcher;

/// Runs every fetcher once and assembles this run's record.
///
/// An optional platform that fails keeps its count from `previous` (0 when
/// it had none). A failing mandatory platform aborts the run.
pub async fn collect_followers(
    fetchers: &[Box<dyn FollowerFetcher>],
    previous: &FollowerRecord,
    now: DateTime<Utc>,
) -> anyhow::Result<FollowerRecord> {
    let mut record = FollowerRecord {
        updated_at_utc: Some(now.to_rfc3339_opts(SecondsFormat::Secs, true)),
        ..FollowerRecord::default()
    };

    for fetcher in fetchers {
        let platform = fetcher.platform();

        match fetcher.fetch().await {
            Ok(count) => {
                info!(%platform, count, source = fetcher.source(), "fetched follower count");
                record.set(platform, count, fetcher.source());
            }
            Err(e) if platform.is_mandatory() => {
                return Err(e.context(format!("{platform} fetch failed; nothing written")));
            }
            Err(e) => {
                let fallback = previous.fallback_count(platform);
                warn!(%platform, error = %format!("{e:#}"), fallback, "fetch failed, keeping previous count");
                record.set(platform, fallback, CACHED_SOURCE);
            }
        }
    }

    Ok(record)
}
