use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static OG_DESCRIPTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta\s+property="og:description"\s+content="([^"]+)""#)
        .expect("og:description pattern")
});

/// Content of the first `og:description` meta tag, entity-decoded.
pub fn og_description(html: &str) -> Option<Cow<'_, str>> {
    let caps = OG_DESCRIPTION.captures(html)?;
    let raw = caps.get(1)?.as_str();
    Some(html_escape::decode_html_entities(raw))
}

/// Everything up to the first space.
///
/// Profile descriptions read like "43 Followers, 1 Following, 0 Posts", so
/// this is the follower count.
pub fn leading_token(text: &str) -> &str {
    text.split(' ').next().unwrap_or_default()
}
