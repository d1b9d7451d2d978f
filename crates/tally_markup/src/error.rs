use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("request failed")]
    Http(#[from] reqwest::Error),
    #[error("could not find og:description (profile may be private, blocked, or markup changed)")]
    MissingDescription,
    #[error("no follower count found on {0}")]
    CountNotFound(String),
}
