pub mod count;
pub mod error;
pub mod headers;
pub mod meta;

pub use count::parse_human_count;
pub use error::ScrapeError;
pub use headers::browser_headers;
pub use meta::{leading_token, og_description};
